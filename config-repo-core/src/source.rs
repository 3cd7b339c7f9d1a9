use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Turns a source identifier into the value stored under its key.
///
/// Sources are data only. Nothing is executed while evaluating them.
pub trait SourceEvaluator {
    fn evaluate(&self, source: &str) -> Result<Value>;
}

impl<F> SourceEvaluator for F
where
    F: Fn(&str) -> Result<Value>,
{
    fn evaluate(&self, source: &str) -> Result<Value> {
        self(source)
    }
}

/// Reads sources from disk and picks a deserializer by file extension:
/// `toml`, `yaml`/`yml`, otherwise JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSourceEvaluator;

impl FileSourceEvaluator {
    fn parse(source: &str, raw: &str) -> Result<Value> {
        let ext = Path::new(source)
            .extension()
            .and_then(|value| value.to_str())
            .unwrap_or_default();

        match ext {
            "toml" => toml::from_str::<Value>(raw)
                .map_err(|err| Error::file_load(source, format!("invalid toml: {err}"))),
            "yaml" | "yml" => {
                let yaml_value = serde_yaml::from_str::<serde_yaml::Value>(raw)
                    .map_err(|err| Error::file_load(source, format!("invalid yaml: {err}")))?;
                serde_json::to_value(yaml_value).map_err(|err| {
                    Error::file_load(source, format!("yaml is not representable as json: {err}"))
                })
            }
            _ => serde_json::from_str::<Value>(raw)
                .map_err(|err| Error::file_load(source, format!("invalid json: {err}"))),
        }
    }
}

impl SourceEvaluator for FileSourceEvaluator {
    fn evaluate(&self, source: &str) -> Result<Value> {
        let raw = std::fs::read_to_string(source)
            .map_err(|err| Error::file_load(source, format!("failed to read: {err}")))?;
        Self::parse(source, &raw)
    }
}

/// Key a source is stored under: the last `/` segment, cut at its first `.`.
///
/// `/a/b/database.config.json` gives `database`; `settings` gives `settings`.
pub fn source_key(source: &str) -> String {
    let file_name = source.rsplit('/').next().unwrap_or(source);
    file_name
        .split('.')
        .next()
        .unwrap_or(file_name)
        .to_owned()
}

/// Anything other than a non-empty mapping or sequence becomes `{}`.
pub fn normalize_source_value(value: Value) -> Value {
    match value {
        Value::Object(map) if !map.is_empty() => Value::Object(map),
        Value::Array(items) if !items.is_empty() => Value::Array(items),
        other => {
            tracing::debug!(
                value = %other,
                "source value is not a non-empty collection; storing {{}}"
            );
            Value::Object(Map::new())
        }
    }
}

/// One source path or an ordered list of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sources(Vec<String>);

impl Sources {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Sources {
    fn from(source: &str) -> Self {
        Self(vec![source.to_owned()])
    }
}

impl From<String> for Sources {
    fn from(source: String) -> Self {
        Self(vec![source])
    }
}

/// Paths must be valid UTF-8; a lossy conversion would name a different file.
impl TryFrom<&Path> for Sources {
    type Error = Error;

    fn try_from(source: &Path) -> Result<Self> {
        let source = source.to_str().ok_or_else(|| {
            Error::Config(format!(
                "config source path is not valid UTF-8: {}",
                source.display()
            ))
        })?;
        Ok(Self::from(source))
    }
}

impl From<Vec<String>> for Sources {
    fn from(sources: Vec<String>) -> Self {
        Self(sources)
    }
}

impl From<Vec<&str>> for Sources {
    fn from(sources: Vec<&str>) -> Self {
        Self(sources.into_iter().map(str::to_owned).collect())
    }
}

impl From<&[&str]> for Sources {
    fn from(sources: &[&str]) -> Self {
        Self(sources.iter().map(|source| (*source).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Sources {
    fn from(sources: [&str; N]) -> Self {
        Self(sources.iter().map(|source| (*source).to_owned()).collect())
    }
}

impl FromIterator<String> for Sources {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
