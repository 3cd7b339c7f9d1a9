use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::repository::ConfigRepository;

pub type ThunkFn = dyn Fn(&ConfigRepository) -> Value + Send + Sync;

/// A stored configuration entry: either a plain value or a computation over
/// the repository that runs on every indexed read.
#[derive(Clone)]
pub enum ConfigEntry {
    Literal(Value),
    Thunk(Arc<ThunkFn>),
}

impl ConfigEntry {
    pub fn thunk<F>(f: F) -> Self
    where
        F: Fn(&ConfigRepository) -> Value + Send + Sync + 'static,
    {
        Self::Thunk(Arc::new(f))
    }

    pub fn is_thunk(&self) -> bool {
        matches!(self, Self::Thunk(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Literal(Value::Null))
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Thunk(_) => None,
        }
    }

    /// Literal values are cloned; thunks are invoked with `repository`.
    pub fn resolve(&self, repository: &ConfigRepository) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Thunk(f) => f(repository),
        }
    }
}

impl fmt::Debug for ConfigEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Thunk(_) => f.write_str("Thunk(<fn>)"),
        }
    }
}

// Thunks compare by identity: two entries are equal only if they share the
// same closure allocation.
impl PartialEq for ConfigEntry {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Thunk(a), Self::Thunk(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl PartialEq<Value> for ConfigEntry {
    fn eq(&self, other: &Value) -> bool {
        self.as_literal() == Some(other)
    }
}

impl From<Value> for ConfigEntry {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl From<&str> for ConfigEntry {
    fn from(value: &str) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<String> for ConfigEntry {
    fn from(value: String) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<bool> for ConfigEntry {
    fn from(value: bool) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i64> for ConfigEntry {
    fn from(value: i64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<i32> for ConfigEntry {
    fn from(value: i32) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<u64> for ConfigEntry {
    fn from(value: u64) -> Self {
        Self::Literal(Value::from(value))
    }
}

impl From<f64> for ConfigEntry {
    fn from(value: f64) -> Self {
        Self::Literal(Value::from(value))
    }
}
