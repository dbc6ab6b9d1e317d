use std::fmt;

use thiserror::Error;

use datamirage_core::Locale;

/// Why a category field could not be served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    /// No document for the category exists in the locale.
    CategoryNotFound,
    /// The document exists but has no such field.
    FieldNotFound,
    /// The field is declared with an empty list.
    FieldEmpty,
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::CategoryNotFound => "category not found",
            Self::FieldNotFound => "field not found",
            Self::FieldEmpty => "field is empty",
        };
        f.write_str(text)
    }
}

/// Errors emitted while generating values.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("missing locale-specific data for {category}.{field} in locale {locale} ({reason})")]
    MissingData {
        locale: Locale,
        category: String,
        field: String,
        reason: MissingReason,
    },
    #[error("empty input: {0}")]
    EmptyInput(String),
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("unresolved token '{token}' in pattern '{pattern}'")]
    UnresolvedToken { token: String, pattern: String },
    #[error("data source error: {0}")]
    Source(#[from] datamirage_core::Error),
}

impl GenerationError {
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Self::MissingData { .. })
    }
}
