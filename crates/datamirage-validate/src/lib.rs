//! Structural validation of locale data documents against the reference
//! locale.

pub mod report;
pub mod validate;

pub use report::{ValidationResult, ValidationSummary};
pub use validate::{SchemaValidator, compare_documents};
