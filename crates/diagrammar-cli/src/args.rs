//! Command-line argument definitions for the Diagrammar CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, the output shape, and logging verbosity.

use clap::{Parser, ValueEnum};

use diagrammar::config::OutputFormat;

/// JSON shape written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Typed nodes and edges, with class members and note participants
    Full,
    /// `{nodes:[{id,label}], edges:[{from,to,label}]}`
    Wire,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Full => OutputFormat::Full,
            FormatArg::Wire => OutputFormat::Wire,
        }
    }
}

/// Command-line arguments for the Diagrammar graph extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output JSON file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format, overriding the configuration file
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
