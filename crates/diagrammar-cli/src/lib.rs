//! Diagrammar CLI library
//!
//! This module contains the core CLI logic for the Diagrammar graph extractor.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, FormatArg};

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use diagrammar::{DiagrammarError, GraphBuilder, ParseError};

/// Run the Diagrammar CLI application
///
/// This function reads the input file, extracts its graph, and writes the
/// JSON export to the output file or stdout. An empty graph is still written.
///
/// Returns the reason the graph came out empty, if it did.
///
/// # Errors
///
/// Returns `DiagrammarError` for:
/// - Configuration loading errors
/// - Unsupported extensions, unreadable or oversized sources
/// - Export and output I/O errors
pub fn run(args: &Args) -> Result<Option<ParseError>, DiagrammarError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing diagram"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.format {
        app_config.output_mut().set_format(format.into());
    }

    let builder = GraphBuilder::new(app_config);
    let source = builder.read_source(&args.input)?;
    let graph = builder.parse(&source)?;
    let empty_reason = if graph.is_empty() {
        builder.parser().try_parse(&source).err()
    } else {
        None
    };

    let json = builder.export(&graph)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            info!(output_file = path; "Graph exported successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    Ok(empty_reason)
}
