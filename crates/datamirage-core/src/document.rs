use serde_yaml::Value;

use crate::error::{Error, Result};

/// Parsed locale data document.
///
/// Every nesting level is one of three shapes, so consumers walk the tree
/// with a single `match` instead of probing dynamic types. Mapping entries
/// keep the order they have in the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Scalar(String),
    Sequence(Vec<Node>),
    Mapping(Vec<(String, Node)>),
}

impl Node {
    pub fn as_mapping(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping()?
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, node)| node)
    }

    /// Keys of a mapping node in document order; empty for other shapes.
    pub fn keys(&self) -> Vec<&str> {
        self.as_mapping()
            .map(|entries| entries.iter().map(|(key, _)| key.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Scalar(_) => "scalar",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }
}

/// Parse YAML text into a [`Node`] tree.
///
/// An empty document parses as an empty mapping. `document` names the
/// source in error messages.
pub fn parse_document(document: &str, text: &str) -> Result<Node> {
    let value: Value = serde_yaml::from_str(text).map_err(|err| Error::Parse {
        document: document.to_string(),
        message: err.to_string(),
    })?;
    match value {
        Value::Null => Ok(Node::Mapping(Vec::new())),
        other => convert(document, other),
    }
}

fn convert(document: &str, value: Value) -> Result<Node> {
    match value {
        Value::Sequence(items) => items
            .into_iter()
            .map(|item| convert(document, item))
            .collect::<Result<Vec<_>>>()
            .map(Node::Sequence),
        Value::Mapping(mapping) => {
            let mut entries = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = scalar_text(&key).ok_or_else(|| Error::Parse {
                    document: document.to_string(),
                    message: "mapping keys must be scalars".to_string(),
                })?;
                entries.push((key, convert(document, value)?));
            }
            Ok(Node::Mapping(entries))
        }
        Value::Tagged(tagged) => convert(document, tagged.value),
        scalar => Ok(Node::Scalar(scalar_text(&scalar).unwrap_or_default())),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(value) => Some(value.to_string()),
        Value::Number(value) => Some(value.to_string()),
        Value::String(value) => Some(value.clone()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
