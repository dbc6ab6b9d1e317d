use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Keyed memoisation owned by a single provider instance.
///
/// `load` runs its supplier only while no value is stored under the key.
/// The supplier runs without holding the lock, so it may itself use the
/// same cache for other keys. If two callers race on a first access, the
/// value stored first wins and both callers receive it. Failed suppliers
/// store nothing.
#[derive(Debug)]
pub struct LazyCache<V> {
    slots: RwLock<HashMap<String, V>>,
}

impl<V> Default for LazyCache<V> {
    fn default() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone> LazyCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<E, F>(&self, key: &str, supplier: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let value = supplier()?;
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Ok(slots.entry(key.to_string()).or_insert(value).clone())
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
