//! Read options for schema discovery.
//!
//! Options are opaque key/value settings. Only `read-field-list` is
//! interpreted here; every other key is kept so the caller's transport layer
//! can read it from the same object.

use std::{collections::BTreeMap, fs, path::Path};

use serde_yaml::Value;

use crate::{
    error::{Result, SchemaError},
    mapping::FieldSelection,
};

pub const READ_FIELD_LIST: &str = "read-field-list";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    settings: BTreeMap<String, String>,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let settings = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self { settings }
    }

    /// Parse a flat YAML mapping. Scalar values are kept as their string
    /// rendering; `null` values are dropped.
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_yaml::from_str(input)
            .map_err(|err| SchemaError::InvalidOptions(err.to_string()))?;
        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(Self::new()),
            other => {
                return Err(SchemaError::InvalidOptions(format!(
                    "expected a mapping of settings but found {other:?}"
                )));
            }
        };

        let mut settings = BTreeMap::new();
        for (key, val) in mapping {
            let key = scalar_to_string(&key).ok_or_else(|| {
                SchemaError::InvalidOptions(format!("setting keys must be scalars: {key:?}"))
            })?;
            if val.is_null() {
                continue;
            }
            let rendered = scalar_to_string(&val).ok_or_else(|| {
                SchemaError::InvalidOptions(format!("setting '{key}' must be a scalar value"))
            })?;
            settings.insert(key, rendered);
        }
        Ok(Self { settings })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| {
            SchemaError::InvalidOptions(format!("reading {}: {err}", path.display()))
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into(), value.into());
    }

    pub fn with_field_list(mut self, list: impl Into<String>) -> Self {
        self.set(READ_FIELD_LIST, list);
        self
    }

    pub fn field_list(&self) -> Option<&str> {
        self.get(READ_FIELD_LIST)
    }

    pub fn field_selection(&self) -> FieldSelection {
        FieldSelection::parse(self.field_list())
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
