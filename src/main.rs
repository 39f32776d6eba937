//! Swagger route generator - Command-line tool for converting an API schema into route stubs.
//!
//! This binary reads a Swagger/OpenAPI document, scaffolds an application for it and
//! writes one route module per resource, each holding a handler stub for every
//! method, response code and content type the schema declares.
//!
//! # Usage
//!
//! ```bash
//! swagger-routegen [OPTIONS] <SCHEMA> [OUTPUT_DIR]
//! ```
//!
//! # Examples
//!
//! Generate into the current directory:
//! ```bash
//! swagger-routegen swagger.json
//! ```
//!
//! Generate into another directory with verbose logging:
//! ```bash
//! swagger-routegen petstore.yaml ./outpath -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use swagger_routegen::cli;

fn main() -> Result<()> {
    // The verbose flag decides the log level, so parse before the logger exists
    // and validate afterwards, once validation can log.
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Swagger route generator starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("Route generation completed successfully");

    Ok(())
}
