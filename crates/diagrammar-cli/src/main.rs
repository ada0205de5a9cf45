//! Diagrammar CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use diagrammar_cli::{
    Args,
    error_adapter::{Reportable, render},
};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    info!(log_level:?; "Starting Diagrammar");
    debug!(args:?; "Parsed arguments");

    match diagrammar_cli::run(&args) {
        Ok(None) => info!("Completed successfully"),
        Ok(Some(reason)) => {
            warn!("{}", render(&Reportable::from(reason)));
            info!("Completed with an empty graph");
        }
        Err(err) => {
            error!("{}", render(&Reportable::from(&err)));
            process::exit(1);
        }
    }
}
