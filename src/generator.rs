//! End-to-end generation: schema file in, route files out.

use crate::aggregator::ResourceAggregator;
use crate::emitter::write_unit;
use crate::naming::derive_app_name;
use crate::parser::SchemaParser;
use crate::scaffold::{AppConfig, ProjectScaffolder, SkeletonScaffolder};
use anyhow::{Context, Result};
use log::{debug, error, info};
use std::path::{Path, PathBuf};

/// What a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub app_name: String,
    pub units_written: usize,
    pub blocks_written: usize,
    /// Route files in the order they were written
    pub files: Vec<PathBuf>,
}

/// Generates the application and its route files.
///
/// Steps run strictly in sequence: parse the schema, derive the application
/// name, scaffold the skeleton, then build and write one route file per
/// resource group in declaration order. Files written before a failure stay on
/// disk.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded, the scaffolder fails, or a
/// route file cannot be written.
pub fn generate(
    schema: &Path,
    output_root: &Path,
    scaffolder: &dyn ProjectScaffolder,
) -> Result<GenerationSummary> {
    info!("Loading schema {}", schema.display());
    let document = SchemaParser::parse_file(schema)
        .with_context(|| format!("Failed to load schema {}", schema.display()))?;

    let name = derive_app_name(document.info.title.as_deref());
    let config = AppConfig::new(&name, &document.info);
    info!("Creating application {}", config.name);

    scaffolder
        .create_files(&config, output_root)
        .context("Failed to scaffold application")?;

    let aggregator = ResourceAggregator::new(output_root, &name);
    let units = aggregator.build_units(&document);
    info!(
        "Writing {} route files for {} paths",
        units.len(),
        document.paths.len()
    );

    let mut summary = GenerationSummary {
        app_name: name,
        units_written: 0,
        blocks_written: 0,
        files: Vec::with_capacity(units.len()),
    };

    for unit in &units {
        let path = write_unit(unit)?;
        debug!("Wrote {} ({} blocks)", path.display(), unit.blocks.len());
        summary.units_written += 1;
        summary.blocks_written += unit.blocks.len();
        summary.files.push(path);
    }

    Ok(summary)
}

/// Creates app sources with the default scaffolder, converting paths to routes.
///
/// Failures are logged and swallowed: the result is `None` and the caller
/// carries on. Use [`generate`] to handle the error instead.
pub fn create_app(schema: &Path, output_root: &Path) -> Option<GenerationSummary> {
    match generate(schema, output_root, &SkeletonScaffolder) {
        Ok(summary) => Some(summary),
        Err(e) => {
            error!("Failed to parse file: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    const SCHEMA: &str = r#"
info:
  title: Zoo
paths:
  /animals:
    get:
      responses:
        "200":
          content:
            application/json: {}
  /animals/{animalId}:
    parameters:
      - in: path
        name: animalId
    get:
      responses:
        "200":
          content:
            application/json: {}
        "404":
          content:
            text/plain: {}
  /keepers:
    post:
      responses:
        "201":
          content:
            application/json: {}
"#;

    /// Records the calls it receives and checks nothing was emitted yet.
    struct RecordingScaffolder {
        calls: RefCell<Vec<AppConfig>>,
    }

    impl ProjectScaffolder for RecordingScaffolder {
        fn create_files(&self, config: &AppConfig, output_root: &Path) -> Result<()> {
            assert!(!config.app_dir(output_root).join("src/routes").exists());
            self.calls.borrow_mut().push(config.clone());
            Ok(())
        }
    }

    struct FailingScaffolder;

    impl ProjectScaffolder for FailingScaffolder {
        fn create_files(&self, _config: &AppConfig, _output_root: &Path) -> Result<()> {
            anyhow::bail!("disk full")
        }
    }

    fn schema_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("zoo.yaml");
        fs::write(&path, SCHEMA).unwrap();
        path
    }

    #[test]
    fn test_generate_writes_one_file_per_resource() {
        let temp_dir = TempDir::new().unwrap();
        let schema = schema_file(&temp_dir);
        let out = temp_dir.path().join("out");

        let summary = generate(&schema, &out, &SkeletonScaffolder).unwrap();

        assert_eq!(summary.app_name, "zoo");
        assert_eq!(summary.units_written, 2);
        assert_eq!(summary.blocks_written, 4);
        assert_eq!(
            summary.files,
            vec![
                out.join("zoo/zoo/src/routes/Animals.js"),
                out.join("zoo/zoo/src/routes/Keepers.js"),
            ]
        );
    }

    #[test]
    fn test_scaffolder_runs_once_before_routes() {
        let temp_dir = TempDir::new().unwrap();
        let schema = schema_file(&temp_dir);
        let scaffolder = RecordingScaffolder {
            calls: RefCell::new(Vec::new()),
        };

        generate(&schema, temp_dir.path(), &scaffolder).unwrap();

        let calls = scaffolder.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "zoo");
    }

    #[test]
    fn test_scaffold_failure_stops_before_routes() {
        let temp_dir = TempDir::new().unwrap();
        let schema = schema_file(&temp_dir);

        let err = generate(&schema, temp_dir.path(), &FailingScaffolder).unwrap_err();

        assert!(format!("{:#}", err).contains("disk full"));
        assert!(!temp_dir.path().join("zoo").exists());
    }

    #[test]
    fn test_create_app_swallows_errors() {
        let temp_dir = TempDir::new().unwrap();

        let result = create_app(&temp_dir.path().join("missing.json"), temp_dir.path());

        assert!(result.is_none());
    }
}
