//! Field capability contract.
//!
//! Every field type implements [`Field`]. Storage contribution is
//! required by the trait; the remaining capabilities default to "nothing
//! to contribute", except `graphql_field_schema`, which fails fast when a
//! type declares no GraphQL type.

mod registry;

pub use registry::{FieldFactory, FieldTypeRegistration, FieldTypeRegistry};

use crate::{
    admin::AdminFieldMeta,
    error::{FieldError, RequestError, SchemaError},
    naming::inflect,
    predicate::{CompareOp, ComparePredicate, Predicate, TextMode},
    schema::StorageSchema,
    store::Document,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

///
/// FieldSpec
///
/// One entry of a list's `fields` configuration. Keys other than the
/// common ones are collected into the type-specific `config` bag.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct FieldSpec {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<JsonValue>,

    #[serde(default)]
    pub required: bool,

    #[serde(flatten)]
    pub config: Map<String, JsonValue>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            label: None,
            default_value: None,
            required: false,
            config: Map::new(),
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: JsonValue) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.config.insert(key.into(), value);
        self
    }
}

///
/// FieldBase
///
/// State shared by every field type. `list_key` is a back-reference only.
///

#[derive(Clone, Debug, PartialEq)]
pub struct FieldBase {
    pub path: String,
    pub label: String,
    pub list_key: String,
    pub default_value: Option<JsonValue>,
    pub required: bool,
    pub config: Map<String, JsonValue>,
}

impl FieldBase {
    #[must_use]
    pub fn new(path: &str, list_key: &str, spec: &FieldSpec) -> Self {
        Self {
            path: path.to_string(),
            label: spec
                .label
                .clone()
                .unwrap_or_else(|| inflect::humanize(path)),
            list_key: list_key.to_string(),
            default_value: spec.default_value.clone(),
            required: spec.required,
            config: spec.config.clone(),
        }
    }

    fn invalid(&self, message: String) -> FieldError {
        FieldError::InvalidConfig {
            path: self.path.clone(),
            message,
        }
    }

    /// Read an optional unsigned integer from the config bag.
    pub fn config_u64(&self, key: &str) -> Result<Option<u64>, FieldError> {
        match self.config.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| self.invalid(format!("'{key}' must be a non-negative integer"))),
        }
    }

    /// Read an optional boolean from the config bag.
    pub fn config_bool(&self, key: &str) -> Result<Option<bool>, FieldError> {
        match self.config.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.invalid(format!("'{key}' must be a boolean"))),
        }
    }

    /// Read an optional string from the config bag.
    pub fn config_str(&self, key: &str) -> Result<Option<&str>, FieldError> {
        match self.config.get(key) {
            None | Some(JsonValue::Null) => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| self.invalid(format!("'{key}' must be a string"))),
        }
    }
}

///
/// FieldCondition
///
/// A filter produced by a field from query arguments, not yet bound to a
/// document path.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldCondition {
    pub op: CompareOp,
    pub value: JsonValue,
    pub mode: TextMode,
}

impl FieldCondition {
    #[must_use]
    pub const fn new(op: CompareOp, value: JsonValue) -> Self {
        Self {
            op,
            value,
            mode: TextMode::Cs,
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: TextMode) -> Self {
        self.mode = mode;
        self
    }

    /// Bind this condition to a document path.
    #[must_use]
    pub fn on(self, path: &str) -> Predicate {
        Predicate::Compare(ComparePredicate::new(path, self.op, self.value).with_mode(self.mode))
    }
}

///
/// InputOperation
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputOperation {
    Create,
    Update,
}

///
/// InputContext
///
/// What a field sees when asked to turn submitted input into a stored value.
///

#[derive(Clone, Copy, Debug)]
pub struct InputContext<'a> {
    pub list_key: &'a str,
    pub operation: InputOperation,

    /// The stored document, on update.
    pub existing: Option<&'a Document>,
}

///
/// Field
///

pub trait Field: fmt::Debug + Send + Sync {
    fn base(&self) -> &FieldBase;

    /// Registered type name, used in admin metadata and errors.
    fn type_name(&self) -> &'static str;

    fn path(&self) -> &str {
        &self.base().path
    }

    fn label(&self) -> &str {
        &self.base().label
    }

    /// Add this field's storage representation to the list schema.
    fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError>;

    fn graphql_type(&self) -> Option<&str> {
        None
    }

    /// `<path>: <GraphQLType>` line for the list's object type.
    fn graphql_field_schema(&self) -> Result<String, FieldError> {
        let ty = self
            .graphql_type()
            .ok_or_else(|| FieldError::UnimplementedCapability {
                type_name: self.type_name().to_string(),
                capability: "graphql_type",
            })?;

        Ok(format!("{}: {ty}", self.path()))
    }

    fn graphql_auxiliary_types(&self) -> Option<String> {
        None
    }

    fn graphql_query_args(&self) -> Option<String> {
        None
    }

    fn graphql_update_args(&self) -> Option<String> {
        None
    }

    fn graphql_create_args(&self) -> Option<String> {
        self.graphql_update_args()
    }

    /// Filter conditions derived from list-query arguments.
    fn query_conditions(
        &self,
        _args: &Map<String, JsonValue>,
    ) -> Result<Vec<FieldCondition>, RequestError> {
        Ok(Vec::new())
    }

    /// Turn submitted input into the value stored at `path()`.
    fn apply_input(
        &self,
        value: &JsonValue,
        _ctx: &InputContext<'_>,
    ) -> Result<JsonValue, RequestError> {
        Ok(value.clone())
    }

    /// Project the stored value into the GraphQL output object.
    fn write_output(&self, document: &Document, out: &mut Map<String, JsonValue>) {
        let value = document.get(self.path()).cloned().unwrap_or(JsonValue::Null);
        out.insert(self.path().to_string(), value);
    }

    fn admin_metadata(&self) -> AdminFieldMeta {
        let base = self.base();

        self.extend_admin_metadata(AdminFieldMeta::new(
            &base.label,
            &base.path,
            self.type_name(),
            base.default_value.clone(),
        ))
    }

    fn extend_admin_metadata(&self, meta: AdminFieldMeta) -> AdminFieldMeta {
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{StorageKind, StoragePath};
    use serde_json::json;

    #[derive(Debug)]
    struct Bare(FieldBase);

    impl Field for Bare {
        fn base(&self) -> &FieldBase {
            &self.0
        }

        fn type_name(&self) -> &'static str {
            "Bare"
        }

        fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError> {
            schema.add(self.path(), StoragePath::new(StorageKind::Mixed))
        }
    }

    fn bare(path: &str, spec: &FieldSpec) -> Bare {
        Bare(FieldBase::new(path, "Thing", spec))
    }

    #[test]
    fn label_defaults_to_humanized_path() {
        let field = bare("firstName", &FieldSpec::new("Bare"));

        assert_eq!(field.label(), "First name");
        assert_eq!(field.base().list_key, "Thing");
    }

    #[test]
    fn explicit_label_wins() {
        let field = bare("firstName", &FieldSpec::new("Bare").label("Given name"));

        assert_eq!(field.label(), "Given name");
    }

    #[test]
    fn missing_graphql_type_is_unimplemented_capability() {
        let err = bare("x", &FieldSpec::new("Bare"))
            .graphql_field_schema()
            .unwrap_err();

        assert_eq!(
            err,
            FieldError::UnimplementedCapability {
                type_name: "Bare".into(),
                capability: "graphql_type",
            }
        );
    }

    #[test]
    fn defaults_contribute_nothing() {
        let field = bare("x", &FieldSpec::new("Bare"));

        assert!(field.graphql_auxiliary_types().is_none());
        assert!(field.graphql_query_args().is_none());
        assert!(field.graphql_update_args().is_none());
        assert!(field.graphql_create_args().is_none());
        assert!(field.query_conditions(&Map::new()).unwrap().is_empty());
    }

    #[test]
    fn admin_metadata_always_has_base_keys() {
        let field = bare("x", &FieldSpec::new("Bare"));
        let json = serde_json::to_value(field.admin_metadata()).unwrap();

        for key in ["label", "path", "type", "defaultValue"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["defaultValue"], JsonValue::Null);
    }

    #[test]
    fn config_readers_validate_types() {
        let spec = FieldSpec::new("Bare")
            .option("minLength", json!(4))
            .option("flag", json!("yes"));
        let field = bare("x", &spec);

        assert_eq!(field.base().config_u64("minLength").unwrap(), Some(4));
        assert_eq!(field.base().config_u64("absent").unwrap(), None);
        assert!(field.base().config_bool("flag").is_err());
    }

    #[test]
    fn spec_collects_unknown_keys_into_config() {
        let spec: FieldSpec = serde_json::from_value(json!({
            "type": "Text",
            "required": true,
            "index": true,
        }))
        .unwrap();

        assert_eq!(spec.type_name, "Text");
        assert!(spec.required);
        assert_eq!(spec.config.get("index"), Some(&json!(true)));
    }

    #[test]
    fn condition_binds_to_path() {
        let pred = FieldCondition::new(CompareOp::Eq, json!("a")).on("name");

        assert_eq!(pred, Predicate::eq("name", json!("a")));
    }
}
