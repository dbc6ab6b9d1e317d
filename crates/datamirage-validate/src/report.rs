use std::fmt;

use datamirage_core::{DOCUMENT_EXTENSION, Locale};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

/// Outcome of validating one document of one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    file_name: String,
    locale: Locale,
    file_exists: bool,
    keys_in_same_order: bool,
    missing_keys: Vec<String>,
    extra_keys: Vec<String>,
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn new(file_name: impl Into<String>, locale: Locale) -> Self {
        Self {
            file_name: file_name.into(),
            locale,
            file_exists: false,
            keys_in_same_order: true,
            missing_keys: Vec::new(),
            extra_keys: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn file_exists(&self) -> bool {
        self.file_exists
    }

    pub fn keys_in_same_order(&self) -> bool {
        self.keys_in_same_order
    }

    /// Dotted paths present in the reference but not in the target.
    pub fn missing_keys(&self) -> &[String] {
        &self.missing_keys
    }

    /// Dotted paths present in the target but not in the reference.
    pub fn extra_keys(&self) -> &[String] {
        &self.extra_keys
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True only when the file exists and nothing was flagged.
    pub fn is_valid(&self) -> bool {
        self.file_exists
            && self.keys_in_same_order
            && self.missing_keys.is_empty()
            && self.extra_keys.is_empty()
            && self.errors.is_empty()
    }

    pub(crate) fn set_file_exists(&mut self, exists: bool) {
        self.file_exists = exists;
    }

    pub(crate) fn mark_out_of_order(&mut self, path: &str) {
        self.keys_in_same_order = false;
        let level = if path.is_empty() { "root" } else { path };
        self.errors
            .push(format!("Keys at {level} are not in the same order"));
    }

    pub(crate) fn push_missing(&mut self, path: String) {
        self.missing_keys.push(path);
    }

    pub(crate) fn push_extra(&mut self, path: String) {
        self.extra_keys.push(path);
    }

    pub(crate) fn push_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Validation result for {} in locale {}:",
            self.file_name,
            self.locale.code()
        )?;

        if !self.file_exists {
            writeln!(f, "- File does not exist")?;
            if !self.errors.is_empty() {
                writeln!(f, "- Errors: {}", self.errors.join(", "))?;
            }
            return Ok(());
        }

        if self.is_valid() {
            return writeln!(f, "- Valid: All keys match the reference file");
        }

        if !self.missing_keys.is_empty() {
            writeln!(f, "- Missing keys: {}", self.missing_keys.join(", "))?;
        }
        if !self.extra_keys.is_empty() {
            writeln!(f, "- Extra keys: {}", self.extra_keys.join(", "))?;
        }
        if !self.keys_in_same_order {
            writeln!(f, "- Keys are not in the same order as the reference file")?;
        }
        if !self.errors.is_empty() {
            writeln!(f, "- Errors: {}", self.errors.join(", "))?;
        }
        Ok(())
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 8)?;
        state.serialize_field("file_name", &self.file_name)?;
        state.serialize_field("locale", &self.locale)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("file_exists", &self.file_exists)?;
        state.serialize_field("keys_in_same_order", &self.keys_in_same_order)?;
        state.serialize_field("missing_keys", &self.missing_keys)?;
        state.serialize_field("extra_keys", &self.extra_keys)?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

/// Counts over a validation sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    /// File names (with extension) of every invalid result, in sweep order.
    pub invalid_files: Vec<String>,
}

impl ValidationSummary {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let invalid_files: Vec<String> = results
            .iter()
            .filter(|result| !result.is_valid())
            .map(|result| format!("{}.{DOCUMENT_EXTENSION}", result.file_name()))
            .collect();
        Self {
            total: results.len(),
            valid: results.len() - invalid_files.len(),
            invalid_files,
        }
    }

    pub fn all_valid(&self) -> bool {
        self.invalid_files.is_empty()
    }
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Summary ---")?;
        writeln!(f, "Valid files: {} out of {}", self.valid, self.total)?;
        if !self.all_valid() {
            writeln!(f, "Invalid files:")?;
            for file in &self.invalid_files {
                writeln!(f, "- {file}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_result_is_not_valid_until_found() {
        let mut result = ValidationResult::new("address", Locale::EnUs);
        assert!(!result.is_valid());
        result.set_file_exists(true);
        assert!(result.is_valid());
    }

    #[test]
    fn renders_absent_file() {
        let result = ValidationResult::new("address", Locale::DeDe);
        assert_eq!(
            result.to_string(),
            "Validation result for address in locale de_DE:\n- File does not exist\n"
        );
    }

    #[test]
    fn renders_every_finding() {
        let mut result = ValidationResult::new("name", Locale::FrFr);
        result.set_file_exists(true);
        result.push_missing("prefixes".to_string());
        result.push_extra("nicknames".to_string());
        result.mark_out_of_order("");

        let text = result.to_string();
        assert!(text.contains("- Missing keys: prefixes\n"));
        assert!(text.contains("- Extra keys: nicknames\n"));
        assert!(text.contains("- Keys are not in the same order as the reference file\n"));
        assert!(text.contains("- Errors: Keys at root are not in the same order\n"));
    }

    #[test]
    fn summary_lists_invalid_files() {
        let mut valid = ValidationResult::new("address", Locale::EsEs);
        valid.set_file_exists(true);
        let absent = ValidationResult::new("phone", Locale::EsEs);

        let summary = ValidationSummary::from_results(&[valid, absent]);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.invalid_files, vec!["phone.yaml"]);
        assert!(summary.to_string().contains("Valid files: 1 out of 2\n"));
    }
}
