use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::DOCUMENT_EXTENSION;
use crate::error::{Error, Result};
use crate::locale::Locale;

/// A place locale documents can be read from.
///
/// `read` distinguishes an absent document (`Ok(None)`) from one that
/// exists but could not be read (`Err`), so callers can decide whether
/// absence is fatal.
pub trait DocumentSource: Send + Sync + fmt::Debug {
    fn read(&self, locale: Locale, name: &str) -> Result<Option<String>>;

    /// Document names (without extension) available for `locale`, sorted.
    fn list(&self, locale: Locale) -> Result<Vec<String>>;

    fn describe(&self) -> String;
}

/// Data directory shipped with this crate, laid out as
/// `<root>/<locale>/<category>.yaml`.
pub fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Documents on disk under `<root>/<locale>/<name>.yaml`.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, locale: Locale, name: &str) -> PathBuf {
        self.root
            .join(locale.code())
            .join(format!("{name}.{DOCUMENT_EXTENSION}"))
    }
}

impl DocumentSource for FsSource {
    fn read(&self, locale: Locale, name: &str) -> Result<Option<String>> {
        let path = self.document_path(locale, name);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io { path, source }),
        }
    }

    fn list(&self, locale: Locale) -> Result<Vec<String>> {
        let dir = self.root.join(locale.code());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(Error::Io { path: dir, source }),
        };

        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.insert(stem.to_string());
            }
        }
        Ok(names.into_iter().collect())
    }

    fn describe(&self) -> String {
        format!("filesystem:{}", self.root.display())
    }
}

/// Ordered fallback chain over several sources.
///
/// The first source that has a document wins; listing returns the union.
#[derive(Debug, Default)]
pub struct LayeredSource {
    layers: Vec<Box<dyn DocumentSource>>,
}

impl LayeredSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layer(mut self, layer: impl DocumentSource + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    pub fn push(&mut self, layer: Box<dyn DocumentSource>) {
        self.layers.push(layer);
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl DocumentSource for LayeredSource {
    fn read(&self, locale: Locale, name: &str) -> Result<Option<String>> {
        for layer in &self.layers {
            if let Some(contents) = layer.read(locale, name)? {
                tracing::trace!(
                    event = "document_resolved",
                    locale = %locale,
                    document = name,
                    source = %layer.describe()
                );
                return Ok(Some(contents));
            }
        }
        Ok(None)
    }

    fn list(&self, locale: Locale) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();
        for layer in &self.layers {
            names.extend(layer.list(locale)?);
        }
        Ok(names.into_iter().collect())
    }

    fn describe(&self) -> String {
        let layers: Vec<String> = self.layers.iter().map(|layer| layer.describe()).collect();
        format!("layered[{}]", layers.join(", "))
    }
}
