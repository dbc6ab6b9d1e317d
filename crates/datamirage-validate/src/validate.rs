use std::collections::HashSet;

use datamirage_core::{
    DOCUMENT_EXTENSION, DocumentSource, Locale, MirageConfig, Node, REFERENCE_LOCALE,
    parse_document,
};

use crate::report::ValidationResult;

/// Checks that a locale's documents have the key layout of the reference
/// locale.
///
/// Only structure is compared: key presence, nesting and the relative order
/// of shared keys. Leaf values are expected to differ between locales.
#[derive(Debug)]
pub struct SchemaValidator {
    source: Box<dyn DocumentSource>,
    reference: Locale,
}

impl SchemaValidator {
    pub fn new(source: impl DocumentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            reference: REFERENCE_LOCALE,
        }
    }

    pub fn from_config(config: &MirageConfig) -> Self {
        Self::new(config.document_source())
    }

    pub fn reference(&self) -> Locale {
        self.reference
    }

    /// One result per document of the reference locale.
    ///
    /// The target's own document list is never consulted, so files that
    /// only exist in the target are not reported here.
    pub fn validate_locale(&self, target: Locale) -> Vec<ValidationResult> {
        let names = match self.source.list(self.reference) {
            Ok(names) => names,
            Err(err) => {
                tracing::warn!(
                    event = "reference_listing_failed",
                    reference = %self.reference,
                    source = %self.source.describe(),
                    error = %err
                );
                Vec::new()
            }
        };

        let results: Vec<ValidationResult> = names
            .iter()
            .map(|name| self.validate_file(name, target))
            .collect();

        tracing::info!(
            event = "locale_validated",
            locale = %target,
            files = results.len(),
            invalid = results.iter().filter(|result| !result.is_valid()).count()
        );
        results
    }

    /// Validate one document of `target` against the reference locale.
    ///
    /// Read and parse failures are recorded in the result rather than
    /// returned.
    pub fn validate_file(&self, name: &str, target: Locale) -> ValidationResult {
        let mut result = ValidationResult::new(name, target);

        let reference = match self.load(name, self.reference) {
            Ok(node) => node,
            Err(message) => {
                result.push_error(message);
                return result;
            }
        };
        let target_doc = match self.load(name, target) {
            Ok(node) => node,
            Err(message) => {
                result.push_error(message);
                return result;
            }
        };
        let Some(target_doc) = target_doc else {
            tracing::debug!(event = "document_absent", locale = %target, document = name);
            return result;
        };

        result.set_file_exists(true);
        let Some(reference) = reference else {
            result.push_error(format!(
                "Reference file {name}.{DOCUMENT_EXTENSION} is missing for {}",
                self.reference.code()
            ));
            return result;
        };

        compare_roots(&reference, &target_doc, self.reference, target, name, &mut result);
        result
    }

    fn load(&self, name: &str, locale: Locale) -> Result<Option<Node>, String> {
        let document = format!("{}/{name}.{DOCUMENT_EXTENSION}", locale.code());
        let loaded = self
            .source
            .read(locale, name)
            .and_then(|text| text.map(|text| parse_document(&document, &text)).transpose());
        loaded.map_err(|err| {
            tracing::warn!(event = "document_load_failed", document = %document, error = %err);
            format!("Error loading YAML file: {err}")
        })
    }
}

/// Compare two already parsed documents.
///
/// `target` must be the target locale's document; the result is marked as
/// existing.
pub fn compare_documents(
    name: &str,
    locale: Locale,
    reference: &Node,
    target: &Node,
) -> ValidationResult {
    let mut result = ValidationResult::new(name, locale);
    result.set_file_exists(true);
    compare_roots(reference, target, REFERENCE_LOCALE, locale, name, &mut result);
    result
}

fn compare_roots(
    reference: &Node,
    target: &Node,
    reference_locale: Locale,
    target_locale: Locale,
    name: &str,
    result: &mut ValidationResult,
) {
    let root_error = |locale: Locale, node: &Node| {
        format!(
            "Root of {}/{name}.{DOCUMENT_EXTENSION} is a {}, expected a mapping",
            locale.code(),
            node.kind()
        )
    };

    match (reference.as_mapping(), target.as_mapping()) {
        (Some(reference), Some(target)) => compare_keys(reference, target, "", result),
        (None, _) => result.push_error(root_error(reference_locale, reference)),
        (_, None) => result.push_error(root_error(target_locale, target)),
    }
}

fn compare_keys(
    reference: &[(String, Node)],
    target: &[(String, Node)],
    path: &str,
    result: &mut ValidationResult,
) {
    let qualified = |key: &str| {
        if path.is_empty() {
            key.to_string()
        } else {
            format!("{path}.{key}")
        }
    };
    for (key, ref_value) in reference {
        match entry(target, key) {
            None => result.push_missing(qualified(key)),
            Some(target_value) => {
                if let (Node::Mapping(ref_nested), Node::Mapping(target_nested)) =
                    (ref_value, target_value)
                {
                    compare_keys(ref_nested, target_nested, &qualified(key), result);
                }
            }
        }
    }

    let reference_keys: HashSet<&str> = reference.iter().map(|(key, _)| key.as_str()).collect();
    let target_keys: HashSet<&str> = target.iter().map(|(key, _)| key.as_str()).collect();

    for (key, _) in target {
        if !reference_keys.contains(key.as_str()) {
            result.push_extra(qualified(key));
        }
    }

    let common_reference: Vec<&str> = reference
        .iter()
        .map(|(key, _)| key.as_str())
        .filter(|key| target_keys.contains(key))
        .collect();
    let common_target: Vec<&str> = target
        .iter()
        .map(|(key, _)| key.as_str())
        .filter(|key| reference_keys.contains(key))
        .collect();

    if !common_reference.is_empty() && common_reference != common_target {
        result.mark_out_of_order(path);
    }
}

fn entry<'a>(entries: &'a [(String, Node)], key: &str) -> Option<&'a Node> {
    entries
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, node)| node)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> Node {
        parse_document("test", text).expect("parse document")
    }

    #[test]
    fn identical_documents_are_valid() {
        let reference = doc("a: 1\nb: [x, y]\n");
        let result = compare_documents("t", Locale::EnUs, &reference, &reference);
        assert!(result.is_valid());
    }

    #[test]
    fn swapped_keys_are_out_of_order_only() {
        let reference = doc("a: 1\nb: 2\n");
        let target = doc("b: 2\na: 1\n");
        let result = compare_documents("t", Locale::EnUs, &reference, &target);
        assert!(!result.keys_in_same_order());
        assert!(result.missing_keys().is_empty());
        assert!(result.extra_keys().is_empty());
        assert_eq!(result.errors(), ["Keys at root are not in the same order"]);
    }

    #[test]
    fn missing_and_extra_keys_are_reported() {
        let reference = doc("a: 1\nb: 2\nc: 3\n");
        let missing = compare_documents("t", Locale::EnUs, &reference, &doc("a: 1\nc: 3\n"));
        assert_eq!(missing.missing_keys(), ["b"]);
        assert!(missing.extra_keys().is_empty());
        assert!(missing.keys_in_same_order());

        let extra = compare_documents("t", Locale::EnUs, &doc("a: 1\n"), &doc("a: 1\nz: 2\n"));
        assert_eq!(extra.extra_keys(), ["z"]);
        assert!(extra.missing_keys().is_empty());
    }

    #[test]
    fn nested_paths_are_dotted() {
        let reference = doc("address:\n  cities: [a]\n  streets: [b]\n");
        let target = doc("address:\n  streets: [b]\n  lanes: [c]\n");
        let result = compare_documents("t", Locale::EnUs, &reference, &target);
        assert_eq!(result.missing_keys(), ["address.cities"]);
        assert_eq!(result.extra_keys(), ["address.lanes"]);
    }

    #[test]
    fn nested_order_names_its_path() {
        let reference = doc("outer:\n  a: 1\n  b: 2\n");
        let target = doc("outer:\n  b: 2\n  a: 1\n");
        let result = compare_documents("t", Locale::EnUs, &reference, &target);
        assert_eq!(result.errors(), ["Keys at outer are not in the same order"]);
    }

    #[test]
    fn leaf_shapes_and_values_are_not_compared() {
        let reference = doc("a: [1, 2]\nb: scalar\n");
        let target = doc("a: single\nb:\n  nested: true\n");
        assert!(compare_documents("t", Locale::EnUs, &reference, &target).is_valid());
    }

    #[test]
    fn no_common_keys_is_not_an_order_problem() {
        let result = compare_documents("t", Locale::EnUs, &doc("a: 1\n"), &doc("b: 1\n"));
        assert!(result.keys_in_same_order());
        assert_eq!(result.missing_keys(), ["a"]);
        assert_eq!(result.extra_keys(), ["b"]);
    }

    #[test]
    fn non_mapping_root_is_an_error() {
        let result = compare_documents("t", Locale::EnUs, &doc("a: 1\n"), &doc("- a\n- b\n"));
        assert!(!result.is_valid());
        assert_eq!(
            result.errors(),
            ["Root of en_US/t.yaml is a sequence, expected a mapping"]
        );
    }
}
