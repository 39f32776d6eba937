use crate::document::Document;
use crate::error::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Loader for Swagger/OpenAPI schema files.
///
/// The `SchemaParser` reads a schema from disk and deserializes it into a
/// [`Document`]. JSON and YAML are both accepted; the format is chosen from the
/// file extension and, for unknown extensions, by trying JSON before YAML.
///
/// No validation happens beyond the existence of the `info` object.
///
/// # Example
///
/// ```no_run
/// use swagger_routegen::parser::SchemaParser;
/// use std::path::Path;
///
/// let doc = SchemaParser::parse_file(Path::new("swagger.json")).unwrap();
/// println!("Declared {} paths", doc.paths.len());
/// ```
pub struct SchemaParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaFormat {
    Json,
    Yaml,
    Unknown,
}

impl SchemaParser {
    /// Parses a schema file into a [`Document`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The content is neither valid JSON nor valid YAML for the document shape
    /// - The document has no `info` object
    pub fn parse_file(path: &Path) -> Result<Document> {
        debug!("Parsing schema: {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| Error::IoError {
            file: path.to_path_buf(),
            source,
        })?;

        let document = Self::parse_str(&content, Self::format_of(path), path)?;

        debug!(
            "Parsed schema {} with {} paths",
            path.display(),
            document.paths.len()
        );
        Ok(document)
    }

    fn parse_str(content: &str, format: SchemaFormat, path: &Path) -> Result<Document> {
        Self::require_info(content, format, path)?;

        match format {
            SchemaFormat::Json => serde_json::from_str(content).map_err(|e| Error::parse(path, e)),
            SchemaFormat::Yaml => serde_yaml::from_str(content).map_err(|e| Error::parse(path, e)),
            SchemaFormat::Unknown => match serde_json::from_str(content) {
                Ok(document) => Ok(document),
                Err(json_err) => {
                    debug!("Not JSON ({}), retrying as YAML", json_err);
                    serde_yaml::from_str(content).map_err(|e| Error::parse(path, e))
                }
            },
        }
    }

    /// Distinguishes a missing `info` object from other shape errors.
    fn require_info(content: &str, format: SchemaFormat, path: &Path) -> Result<()> {
        // Any JSON text is also YAML, so one probe covers every format.
        let probe: serde_yaml::Value = match serde_yaml::from_str(content) {
            Ok(value) => value,
            Err(e) if format == SchemaFormat::Yaml => return Err(Error::parse(path, e)),
            Err(_) => return Ok(()),
        };

        match probe.get("info") {
            Some(info) if !info.is_null() => Ok(()),
            _ => Err(Error::MissingInfo {
                file: path.to_path_buf(),
            }),
        }
    }

    fn format_of(path: &Path) -> SchemaFormat {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => SchemaFormat::Json,
            Some("yaml") | Some("yml") => SchemaFormat::Yaml,
            other => {
                warn!(
                    "Unrecognised schema extension {:?}, guessing the format",
                    other.unwrap_or("")
                );
                SchemaFormat::Unknown
            }
        }
    }
}
