use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::entry::ConfigEntry;
use crate::error::{Error, Result};
use crate::source::{
    normalize_source_value, source_key, FileSourceEvaluator, SourceEvaluator, Sources,
};

pub type ConfigMap = BTreeMap<String, ConfigEntry>;

/// In-memory key/value configuration store.
///
/// `get` returns entries as stored. The `offset_*` family behaves like array
/// indexing: `offset_get` hides null literals and runs thunk entries on every
/// read.
#[derive(Debug, Clone, Default)]
pub struct ConfigRepository {
    configs: ConfigMap,
}

impl ConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_configs(configs: ConfigMap) -> Self {
        Self { configs }
    }

    pub fn from_json_map(map: Map<String, Value>) -> Self {
        Self {
            configs: map
                .into_iter()
                .map(|(key, value)| (key, ConfigEntry::Literal(value)))
                .collect(),
        }
    }

    pub fn configs(&self) -> &ConfigMap {
        &self.configs
    }

    pub fn into_configs(self) -> ConfigMap {
        self.configs
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(String::as_str)
    }

    /// True when `key` is present, even if it holds `null`.
    pub fn has(&self, key: &str) -> bool {
        self.configs.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigEntry>) -> &mut Self {
        self.configs.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&ConfigEntry> {
        self.configs.get(key)
    }

    pub fn get_or(&self, key: &str, default: impl Into<ConfigEntry>) -> ConfigEntry {
        match self.configs.get(key) {
            Some(entry) => entry.clone(),
            None => default.into(),
        }
    }

    pub fn remove(&mut self, key: &str) -> &mut Self {
        self.configs.remove(key);
        self
    }

    /// Loads every source from disk and replaces the whole mapping with the
    /// result. See [`ConfigRepository::load_with`].
    pub fn load(&mut self, files: impl Into<Sources>) -> Result<()> {
        self.load_with(files, &FileSourceEvaluator)
    }

    /// Evaluates each source in order and stores its value under
    /// [`source_key`]. Values that are not a non-empty mapping or sequence
    /// are stored as `{}`.
    ///
    /// On success the previous mapping is discarded entirely, including keys
    /// added with `set`. If any source fails, the call aborts with
    /// [`Error::FileLoad`](crate::Error::FileLoad) and the repository is left
    /// untouched.
    pub fn load_with<E>(&mut self, files: impl Into<Sources>, evaluator: &E) -> Result<()>
    where
        E: SourceEvaluator + ?Sized,
    {
        let files = files.into();
        let mut configs = ConfigMap::new();

        for source in files.iter() {
            let _span = tracing::debug_span!("config_source", source).entered();
            let key = source_key(source);
            let value = evaluator.evaluate(source)?;
            let value = normalize_source_value(value);
            tracing::debug!(key = %key, "loaded config source");
            configs.insert(key, ConfigEntry::Literal(value));
        }

        tracing::info!(
            sources = files.len(),
            keys = configs.len(),
            replaced = self.configs.len(),
            "config repository reloaded"
        );
        self.configs = configs;
        Ok(())
    }

    pub fn offset_set(&mut self, key: impl Into<String>, value: impl Into<ConfigEntry>) {
        self.configs.insert(key.into(), value.into());
    }

    /// Appends under the next implicit index and returns it. The index is one
    /// past the largest key that is a canonical non-negative integer, or `"0"`.
    /// It is derived from the keys present now, so an index freed by
    /// `offset_unset` can be handed out again.
    ///
    /// Fails without touching the mapping when the largest index is `u64::MAX`.
    pub fn offset_push(&mut self, value: impl Into<ConfigEntry>) -> Result<String> {
        let key = self
            .next_index()
            .ok_or_else(|| {
                Error::Config(format!(
                    "cannot append: next index after {} is out of range",
                    u64::MAX
                ))
            })?
            .to_string();
        self.configs.insert(key.clone(), value.into());
        Ok(key)
    }

    pub fn offset_exists(&self, key: &str) -> bool {
        self.configs.get(key).is_some_and(|entry| !entry.is_null())
    }

    pub fn offset_unset(&mut self, key: &str) {
        self.configs.remove(key);
    }

    /// Returns `None` for absent keys and for null, whether stored as a
    /// literal or produced by a thunk. Thunks are invoked with `self` each
    /// time; results are never cached.
    pub fn offset_get(&self, key: &str) -> Option<Value> {
        let value = self.configs.get(key)?.resolve(self);
        (!value.is_null()).then_some(value)
    }

    /// Every entry read through `offset_get` semantics; nulls stay `null`.
    pub fn resolved(&self) -> Map<String, Value> {
        self.configs
            .iter()
            .map(|(key, entry)| (key.clone(), entry.resolve(self)))
            .collect()
    }

    fn next_index(&self) -> Option<u64> {
        self.configs
            .keys()
            .filter_map(|key| {
                key.parse::<u64>()
                    .ok()
                    .filter(|index| index.to_string() == *key)
            })
            .max()
            .map_or(Some(0), |max| max.checked_add(1))
    }
}

impl From<ConfigMap> for ConfigRepository {
    fn from(configs: ConfigMap) -> Self {
        Self::with_configs(configs)
    }
}
