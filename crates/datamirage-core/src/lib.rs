//! Core contracts for DataMirage.
//!
//! This crate defines the supported locales, the locale data documents and
//! the sources they are read from, and the configuration shared by the
//! generator, the validator and the CLI.

pub mod config;
pub mod document;
pub mod embedded;
pub mod error;
pub mod locale;
pub mod source;

pub use config::MirageConfig;
pub use document::{Node, parse_document};
pub use embedded::EmbeddedSource;
pub use error::{Error, Result};
pub use locale::{Locale, REFERENCE_LOCALE};
pub use source::{DocumentSource, FsSource, LayeredSource, default_data_dir};

/// File extension of locale data documents.
pub const DOCUMENT_EXTENSION: &str = "yaml";
