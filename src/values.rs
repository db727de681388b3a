//! The value mapping placeholders are resolved against.
//!
//! A [`ValueMapping`] is captured once when the run starts, from the process
//! environment and optionally from a JSON object read on stdin, and is never
//! mutated afterwards.

use crate::error::{Error, Result};
use log::debug;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::Read;

/// Immutable string-keyed, string-valued substitution source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMapping {
    values: BTreeMap<String, String>,
}

impl ValueMapping {
    /// Captures the current process environment.
    pub fn from_env() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Builds a mapping from raw environment pairs, skipping entries that are not valid UTF-8.
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    values.insert(key, value);
                }
                (Ok(key), Err(_)) => debug!("Skipping variable '{key}': value is not UTF-8."),
                (Err(key), _) => debug!("Skipping variable {key:?}: name is not UTF-8."),
            }
        }
        Self { values }
    }

    /// Returns the value for `key`, or an empty string when the key is absent.
    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns a new mapping where entries of `overrides` replace entries of `self`.
    pub fn overlay(self, overrides: ValueMapping) -> Self {
        let mut values = self.values;
        values.extend(overrides.values);
        Self { values }
    }

    /// Parses a JSON object into a mapping.
    ///
    /// Strings are taken as is, numbers and booleans by their JSON text and
    /// `null` as an empty string. Arrays and objects have no flat text form and
    /// are rejected. Empty input yields an empty mapping.
    pub fn from_json(content: &str) -> Result<Self> {
        let content = content.trim();
        if content.is_empty() {
            return Ok(Self::default());
        }

        let parsed: serde_json::Value = serde_json::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse values as JSON: {e}")))?;
        let object = parsed.as_object().ok_or_else(|| {
            Error::ConfigError("values read from stdin must be a JSON object".to_string())
        })?;

        let mut values = BTreeMap::new();
        for (key, value) in object {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Null => String::new(),
                serde_json::Value::Bool(_) | serde_json::Value::Number(_) => value.to_string(),
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(Error::ConfigError(format!(
                        "value of '{key}' must be a string, number, boolean or null"
                    )));
                }
            };
            values.insert(key.clone(), text);
        }
        Ok(Self { values })
    }

    /// Reads a JSON object of values from stdin.
    pub fn from_stdin() -> Result<Self> {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Self::from_json(&buffer)
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
