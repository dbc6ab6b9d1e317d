use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use datamirage_core::{
    DocumentSource, Locale, MirageConfig, Node, REFERENCE_LOCALE, parse_document,
};

use crate::errors::{GenerationError, MissingReason};

/// One parsed category document: field name to its ordered values.
///
/// Scalar fields hold a single format pattern. Nested mappings are
/// flattened to dotted field names such as `formats.mobile`.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    fields: HashMap<String, Arc<[String]>>,
}

impl DataTable {
    pub fn from_node(node: &Node) -> Self {
        let mut fields = HashMap::new();
        if let Node::Mapping(entries) = node {
            flatten("", entries, &mut fields);
        }
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&Arc<[String]>> {
        self.fields.get(name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn flatten(prefix: &str, entries: &[(String, Node)], fields: &mut HashMap<String, Arc<[String]>>) {
    for (key, value) in entries {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Node::Scalar(text) => {
                fields.insert(name, Arc::from(vec![text.clone()]));
            }
            Node::Sequence(items) => {
                let values: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Node::Scalar(text) => Some(text.clone()),
                        _ => None,
                    })
                    .collect();
                fields.insert(name, Arc::from(values));
            }
            Node::Mapping(nested) => flatten(&name, nested, fields),
        }
    }
}

#[derive(Debug, Clone)]
enum TableEntry {
    Loaded(Arc<DataTable>),
    Missing,
}

/// Process-wide cache of locale tables keyed by `(locale, category)`.
///
/// Each table is read and parsed from the document source at most once;
/// absent documents are remembered as missing. Read or parse failures are
/// not cached and surface to the caller. Every query names its locale; use
/// a [`LocaleSession`] to pin one.
#[derive(Debug)]
pub struct LocaleDataStore {
    source: Box<dyn DocumentSource>,
    cache: RwLock<HashMap<(Locale, String), TableEntry>>,
}

impl LocaleDataStore {
    pub fn new(source: impl DocumentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &MirageConfig) -> Self {
        Self::new(config.document_source())
    }

    pub fn session(self: &Arc<Self>, locale: Locale) -> LocaleSession {
        LocaleSession::new(Arc::clone(self), locale)
    }

    /// Table for `(locale, category)`, or `None` when no document exists.
    pub fn table(
        &self,
        locale: Locale,
        category: &str,
    ) -> Result<Option<Arc<DataTable>>, GenerationError> {
        let key = (locale, category.to_string());
        if let Some(entry) = self.cached(&key) {
            return Ok(entry_table(entry));
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = cache.get(&key) {
            return Ok(entry_table(entry.clone()));
        }

        let entry = self.load(locale, category)?;
        cache.insert(key, entry.clone());
        Ok(entry_table(entry))
    }

    /// Whether `field` exists and is non-empty for the locale.
    ///
    /// Never fails: unreadable documents are logged and reported as absent.
    pub fn has_field(&self, locale: Locale, category: &str, field: &str) -> bool {
        match self.table(locale, category) {
            Ok(Some(table)) => table.field(field).is_some_and(|values| !values.is_empty()),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(
                    event = "field_lookup_failed",
                    locale = %locale,
                    category,
                    field,
                    error = %err
                );
                false
            }
        }
    }

    /// Values of a field. The shared slice cannot be mutated by callers.
    pub fn list_data(
        &self,
        locale: Locale,
        category: &str,
        field: &str,
    ) -> Result<Arc<[String]>, GenerationError> {
        let missing = |reason| GenerationError::MissingData {
            locale,
            category: category.to_string(),
            field: field.to_string(),
            reason,
        };

        let table = self
            .table(locale, category)?
            .ok_or_else(|| missing(MissingReason::CategoryNotFound))?;
        let values = table
            .field(field)
            .ok_or_else(|| missing(MissingReason::FieldNotFound))?;
        if values.is_empty() {
            return Err(missing(MissingReason::FieldEmpty));
        }
        Ok(Arc::clone(values))
    }

    /// Field names of a category, sorted; empty when the category is absent.
    pub fn fields(&self, locale: Locale, category: &str) -> Result<Vec<String>, GenerationError> {
        Ok(self
            .table(locale, category)?
            .map(|table| table.field_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default())
    }

    /// Number of `(locale, category)` entries resolved so far, including
    /// ones remembered as missing.
    pub fn loaded_tables(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn cached(&self, key: &(Locale, String)) -> Option<TableEntry> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        cache.get(key).cloned()
    }

    fn load(&self, locale: Locale, category: &str) -> Result<TableEntry, GenerationError> {
        let document = format!("{}/{category}", locale.code());
        let Some(text) = self.source.read(locale, category)? else {
            tracing::debug!(event = "table_missing", locale = %locale, category);
            return Ok(TableEntry::Missing);
        };
        let node = parse_document(&document, &text)?;
        let table = DataTable::from_node(&node);
        tracing::debug!(
            event = "table_loaded",
            locale = %locale,
            category,
            fields = table.len()
        );
        Ok(TableEntry::Loaded(Arc::new(table)))
    }
}

fn entry_table(entry: TableEntry) -> Option<Arc<DataTable>> {
    match entry {
        TableEntry::Loaded(table) => Some(table),
        TableEntry::Missing => None,
    }
}

/// Store shared by every generator that was not given its own, backed by
/// the default configuration (crate data directory, then packaged data).
pub fn global_store() -> Arc<LocaleDataStore> {
    static STORE: OnceLock<Arc<LocaleDataStore>> = OnceLock::new();
    Arc::clone(
        STORE.get_or_init(|| Arc::new(LocaleDataStore::from_config(&MirageConfig::default()))),
    )
}

/// A store handle pinned to one locale.
///
/// Switching the locale of one session never affects another session or
/// calls already in flight.
#[derive(Debug, Clone)]
pub struct LocaleSession {
    store: Arc<LocaleDataStore>,
    locale: Locale,
}

impl LocaleSession {
    pub fn new(store: Arc<LocaleDataStore>, locale: Locale) -> Self {
        Self { store, locale }
    }

    /// Session on the global store at the reference locale.
    pub fn global() -> Self {
        Self::new(global_store(), REFERENCE_LOCALE)
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn current_locale(&self) -> Locale {
        self.locale
    }

    pub fn store(&self) -> &Arc<LocaleDataStore> {
        &self.store
    }

    pub fn has_field(&self, category: &str, field: &str) -> bool {
        self.store.has_field(self.locale, category, field)
    }

    pub fn list_data(&self, category: &str, field: &str) -> Result<Arc<[String]>, GenerationError> {
        self.store.list_data(self.locale, category, field)
    }
}
