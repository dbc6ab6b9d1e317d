use std::path::PathBuf;

use thiserror::Error;

/// Core error type shared across DataMirage crates.
#[derive(Debug, Error)]
pub enum Error {
    /// A document or directory could not be read.
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A document was read but is not valid YAML.
    #[error("malformed document {document}: {message}")]
    Parse { document: String, message: String },
    /// The locale code is not one of the supported locales.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
    /// The configuration file is unreadable or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for results returned by DataMirage crates.
pub type Result<T> = std::result::Result<T, Error>;
