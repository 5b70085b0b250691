use listforge_core::{
    admin::AdminFieldMeta,
    error::{FieldError, RequestError, SchemaError},
    field::{Field, FieldBase, InputContext},
    schema::{StorageKind, StoragePath, StorageSchema},
    store::Document,
};
use serde_json::{Map, Value as JsonValue};

///
/// Password
///
/// Write-only secret. Input is bcrypt-hashed before it reaches the store;
/// the GraphQL surface only reports whether a value is set.
///

#[derive(Debug)]
pub struct Password {
    base: FieldBase,
    min_length: u64,
    work_factor: u32,
}

impl Password {
    pub const TYPE: &'static str = "Password";
    pub const DEFAULT_MIN_LENGTH: u64 = 8;
    pub const DEFAULT_WORK_FACTOR: u32 = 10;

    pub fn new(base: FieldBase) -> Result<Self, FieldError> {
        let min_length = match base.config_u64("min_length")? {
            Some(len) => Some(len),
            None => base.config_u64("minLength")?,
        }
        .unwrap_or(Self::DEFAULT_MIN_LENGTH);

        let work_factor = match base.config_u64("work_factor")? {
            Some(cost) => Some(cost),
            None => base.config_u64("workFactor")?,
        }
        .map_or(Ok(Self::DEFAULT_WORK_FACTOR), u32::try_from)
        .ok()
        .filter(|cost| (4..=31).contains(cost))
        .ok_or_else(|| FieldError::InvalidConfig {
            path: base.path.clone(),
            message: "'work_factor' must be between 4 and 31".to_string(),
        })?;

        Ok(Self {
            base,
            min_length,
            work_factor,
        })
    }

    pub fn factory(base: FieldBase) -> Result<Box<dyn Field>, FieldError> {
        Ok(Box::new(Self::new(base)?))
    }

    #[must_use]
    pub const fn min_length(&self) -> u64 {
        self.min_length
    }

    #[must_use]
    pub const fn work_factor(&self) -> u32 {
        self.work_factor
    }

    /// Output key reporting whether a password is stored.
    #[must_use]
    pub fn is_set_key(&self) -> String {
        format!("{}_is_set", self.base.path)
    }

    /// Hash a plaintext with a fresh salt at the given bcrypt cost.
    pub fn hash(plaintext: &str, work_factor: u32) -> Result<String, bcrypt::BcryptError> {
        bcrypt::hash(plaintext, work_factor)
    }

    /// Check a candidate plaintext against a stored hash. Malformed hashes
    /// never verify.
    #[must_use]
    pub fn verify(stored: &str, candidate: &str) -> bool {
        bcrypt::verify(candidate, stored).unwrap_or(false)
    }
}

impl Field for Password {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError> {
        schema.add(self.path(), StoragePath::new(StorageKind::String))
    }

    fn graphql_type(&self) -> Option<&str> {
        Some("Boolean")
    }

    fn graphql_field_schema(&self) -> Result<String, FieldError> {
        Ok(format!("{}: Boolean", self.is_set_key()))
    }

    fn graphql_update_args(&self) -> Option<String> {
        Some(format!("{}: String", self.path()))
    }

    fn apply_input(
        &self,
        value: &JsonValue,
        _ctx: &InputContext<'_>,
    ) -> Result<JsonValue, RequestError> {
        let JsonValue::String(plaintext) = value else {
            return Err(RequestError::validation(
                self.path(),
                format!("expected a string, got {value}"),
            ));
        };

        let len = u64::try_from(plaintext.chars().count()).unwrap_or(u64::MAX);
        if len < self.min_length {
            return Err(RequestError::validation(
                self.path(),
                format!("must be at least {} characters", self.min_length),
            ));
        }

        let hashed = Self::hash(plaintext, self.work_factor)
            .map_err(|err| RequestError::validation(self.path(), err.to_string()))?;

        Ok(JsonValue::String(hashed))
    }

    fn write_output(&self, document: &Document, out: &mut Map<String, JsonValue>) {
        let is_set = document.get(self.path()).is_some_and(JsonValue::is_string);
        out.insert(self.is_set_key(), JsonValue::Bool(is_set));
    }

    fn extend_admin_metadata(&self, meta: AdminFieldMeta) -> AdminFieldMeta {
        meta.extend("minLength", self.min_length)
            .extend("workFactor", self.work_factor)
    }
}
