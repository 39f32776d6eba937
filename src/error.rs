use std::path::PathBuf;

/// Result type alias for schema loading
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised while loading a schema document
#[derive(Debug)]
pub enum Error {
    IoError { file: PathBuf, source: std::io::Error },
    SchemaParse { file: PathBuf, message: String },
    MissingInfo { file: PathBuf },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError { file, source } => {
                write!(f, "Cannot read schema {}: {}", file.display(), source)
            }
            Error::SchemaParse { file, message } => {
                write!(f, "Malformed schema {}: {}", file.display(), message)
            }
            Error::MissingInfo { file } => {
                write!(f, "Schema {} has no info object", file.display())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    pub(crate) fn parse(file: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Error::SchemaParse {
            file: file.to_path_buf(),
            message: err.to_string(),
        }
    }
}
