//! An ordered, string-keyed key/value tree addressed by dotted paths.
//!
//! Wraps the YAML representation behind typed accessors so callers never
//! touch the serialization library directly. Paths are dot-separated
//! (`StructureLocation.SpawnY`); intermediate nodes must be mappings.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{ConfigError, ConfigResult};

/// A hierarchical key/value document backed by a YAML mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    root: Mapping,
}

fn key(part: &str) -> Value {
    Value::String(part.to_owned())
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Mapping::new(),
        }
    }

    /// Loads a document from a YAML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parses a document from a YAML string.
    ///
    /// An empty or all-comment input yields an empty document; any other
    /// non-mapping root is an error.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value = serde_yaml::from_str(text)?;
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new()),
            _ => Err(ConfigError::NotAMapping),
        }
    }

    /// Serializes the document to a YAML string.
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(&Value::Mapping(self.root.clone()))?)
    }

    /// Persists the document to a YAML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let text = self.to_yaml()?;
        fs::write(path, text)?;
        Ok(())
    }

    fn node(&self, path: &str) -> Option<&Value> {
        let mut map = &self.root;
        let mut parts = path.split('.').peekable();
        loop {
            let part = parts.next()?;
            let value = map.get(&key(part))?;
            if parts.peek().is_none() {
                return Some(value);
            }
            map = value.as_mapping()?;
        }
    }

    fn node_mut(&mut self, path: &str) -> Option<&mut Value> {
        let mut map = &mut self.root;
        let mut parts = path.split('.').peekable();
        loop {
            let part = parts.next()?;
            let value = map.get_mut(&key(part))?;
            if parts.peek().is_none() {
                return Some(value);
            }
            map = value.as_mapping_mut()?;
        }
    }

    /// Returns true if a value exists at the path.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.node(path).is_some()
    }

    /// Returns the string at the path, if present and a string.
    #[must_use]
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.node(path).and_then(Value::as_str)
    }

    /// Returns the value at the path rendered as a string.
    ///
    /// Strings, numbers, and booleans all stringify; lists and mappings
    /// do not. This matches host config APIs where `SpawnY: 64` and
    /// `SpawnY: "64"` read identically.
    #[must_use]
    pub fn get_scalar_string(&self, path: &str) -> Option<String> {
        self.node(path).and_then(scalar_to_string)
    }

    /// Returns the integer at the path, if present and an integer.
    #[must_use]
    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.node(path).and_then(Value::as_i64)
    }

    /// Returns true if the path holds an integer value.
    #[must_use]
    pub fn is_i64(&self, path: &str) -> bool {
        self.get_i64(path).is_some()
    }

    /// Returns the boolean at the path, if present and a boolean.
    #[must_use]
    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.node(path).and_then(Value::as_bool)
    }

    /// Returns the list of scalar strings at the path.
    ///
    /// A missing path or non-list value yields an empty list; non-scalar
    /// elements are skipped.
    #[must_use]
    pub fn get_str_list(&self, path: &str) -> Vec<String> {
        match self.node(path) {
            Some(Value::Sequence(seq)) => seq.iter().filter_map(scalar_to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Returns the immediate child keys of the mapping at the path.
    ///
    /// An empty path addresses the root. Returns `None` when the path is
    /// absent or does not hold a mapping. Non-string keys are skipped.
    #[must_use]
    pub fn section_keys(&self, path: &str) -> Option<Vec<String>> {
        let map = if path.is_empty() {
            &self.root
        } else {
            self.node(path)?.as_mapping()?
        };
        Some(
            map.keys()
                .filter_map(|k| k.as_str().map(str::to_owned))
                .collect(),
        )
    }

    /// Returns the string at the path or a [`ConfigError`] naming it.
    pub fn require_str(&self, path: &str) -> ConfigResult<&str> {
        match self.node(path) {
            None => Err(ConfigError::MissingKey(path.to_owned())),
            Some(value) => value.as_str().ok_or(ConfigError::WrongType {
                path: path.to_owned(),
                expected: "string",
            }),
        }
    }

    /// Returns the integer at the path or a [`ConfigError`] naming it.
    pub fn require_i64(&self, path: &str) -> ConfigResult<i64> {
        match self.node(path) {
            None => Err(ConfigError::MissingKey(path.to_owned())),
            Some(value) => value.as_i64().ok_or(ConfigError::WrongType {
                path: path.to_owned(),
                expected: "integer",
            }),
        }
    }

    /// Sets the value at the path, creating intermediate mappings.
    ///
    /// A non-mapping value along the path is replaced by a mapping.
    pub fn set(&mut self, path: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut map = &mut self.root;
        let mut parts = path.split('.').peekable();
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                map.insert(key(part), value);
                return;
            }
            let entry = map
                .entry(key(part))
                .or_insert_with(|| Value::Mapping(Mapping::new()));
            if !entry.is_mapping() {
                *entry = Value::Mapping(Mapping::new());
            }
            match entry {
                Value::Mapping(next) => map = next,
                _ => return,
            }
        }
    }

    /// Sets a list of strings at the path.
    pub fn set_str_list<S: AsRef<str>>(&mut self, path: &str, items: &[S]) {
        let seq: Vec<Value> = items
            .iter()
            .map(|item| Value::String(item.as_ref().to_owned()))
            .collect();
        self.set(path, seq);
    }

    /// Removes and returns the value at the path.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        match path.rsplit_once('.') {
            None => self.root.remove(&key(path)),
            Some((parent, last)) => self
                .node_mut(parent)?
                .as_mapping_mut()?
                .remove(&key(last)),
        }
    }
}
