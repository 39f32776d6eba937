use crate::generator::GenerationSummary;
use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use std::path::PathBuf;

/// Swagger route generator - Convert a Swagger/OpenAPI schema into an application with one route file per resource
#[derive(Parser, Debug)]
#[command(name = "swagger-routegen")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the Swagger/OpenAPI schema (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema_path: PathBuf,

    /// Directory the application is generated into
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.schema_path.exists() {
        anyhow::bail!("Schema file does not exist: {}", args.schema_path.display());
    }

    if !args.schema_path.is_file() {
        anyhow::bail!("Schema path is not a file: {}", args.schema_path.display());
    }

    info!("Schema: {}", args.schema_path.display());
    info!("Output directory: {}", args.output_dir.display());

    Ok(args)
}

/// Run the main workflow
///
/// Returns an error when generation failed so the binary can exit non-zero;
/// the failure itself has already been logged.
pub fn run(args: CliArgs) -> Result<GenerationSummary> {
    info!("Starting route generation...");

    let summary = crate::generator::create_app(&args.schema_path, &args.output_dir)
        .ok_or_else(|| anyhow::anyhow!("Generation failed for {}", args.schema_path.display()))?;

    info!("Generation complete!");
    info!("Summary:");
    info!("  - Application: {}", summary.app_name);
    info!("  - Route files: {}", summary.units_written);
    info!("  - Route handlers: {}", summary.blocks_written);
    for file in &summary.files {
        debug!("  - {}", file.display());
    }

    Ok(summary)
}
