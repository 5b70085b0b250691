use crate::error::SchemaError;
use derive_more::Display;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

///
/// StorageKind
///
/// Value shape a storage path holds in the document store.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum StorageKind {
    Boolean,
    Mixed,
    Number,
    String,
}

impl StorageKind {
    /// Whether a JSON value is acceptable for this kind. `null` always is.
    #[must_use]
    pub const fn accepts(self, value: &JsonValue) -> bool {
        match (self, value) {
            (_, JsonValue::Null)
            | (Self::Mixed, _)
            | (Self::Boolean, JsonValue::Bool(_))
            | (Self::Number, JsonValue::Number(_))
            | (Self::String, JsonValue::String(_)) => true,
            _ => false,
        }
    }
}

///
/// StoragePath
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StoragePath {
    pub kind: StorageKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,

    #[serde(default)]
    pub index: bool,
}

impl StoragePath {
    #[must_use]
    pub const fn new(kind: StorageKind) -> Self {
        Self {
            kind,
            default: None,
            index: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: Option<JsonValue>) -> Self {
        self.default = default;
        self
    }

    #[must_use]
    pub const fn indexed(mut self) -> Self {
        self.index = true;
        self
    }
}

///
/// SchemaOptions
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Drop submitted paths that the schema does not define.
    pub strict: bool,

    /// Record `created_at` / `updated_at` on write.
    pub timestamps: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            strict: true,
            timestamps: false,
        }
    }
}

///
/// StorageSchema
///
/// Persistence layout for one list. Fields contribute their paths in
/// declaration order; a list-level hook may extend it afterwards.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct StorageSchema {
    pub options: SchemaOptions,
    paths: IndexMap<String, StoragePath>,
}

impl StorageSchema {
    #[must_use]
    pub fn new(options: SchemaOptions) -> Self {
        Self {
            options,
            paths: IndexMap::new(),
        }
    }

    /// Add a path. Each path may be added once.
    pub fn add(&mut self, name: impl Into<String>, path: StoragePath) -> Result<(), SchemaError> {
        let name = name.into();
        if self.paths.contains_key(&name) {
            return Err(SchemaError::DuplicatePath(name));
        }
        self.paths.insert(name, path);

        Ok(())
    }

    /// Mutate an existing path in place.
    pub fn modify(
        &mut self,
        name: &str,
        f: impl FnOnce(&mut StoragePath),
    ) -> Result<(), SchemaError> {
        let path = self
            .paths
            .get_mut(name)
            .ok_or_else(|| SchemaError::UnknownPath(name.to_string()))?;
        f(path);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StoragePath> {
        self.paths.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.paths.contains_key(name)
    }

    pub fn paths(&self) -> impl Iterator<Item = (&str, &StoragePath)> {
        self.paths.iter().map(|(name, path)| (name.as_str(), path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Apply strictness to a submitted document, returning the dropped keys.
    pub fn retain_known(&self, fields: &mut Map<String, JsonValue>) -> Vec<String> {
        if !self.options.strict {
            return Vec::new();
        }

        let dropped: Vec<String> = fields
            .keys()
            .filter(|key| !self.paths.contains_key(key.as_str()))
            .cloned()
            .collect();
        for key in &dropped {
            fields.remove(key);
        }

        dropped
    }

    /// Fill missing paths that declare a default.
    pub fn apply_defaults(&self, fields: &mut Map<String, JsonValue>) {
        for (name, path) in &self.paths {
            if let Some(default) = &path.default
                && !fields.contains_key(name)
            {
                fields.insert(name.clone(), default.clone());
            }
        }
    }
}
