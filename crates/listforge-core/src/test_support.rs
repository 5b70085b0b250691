//! Minimal field types and fixtures for core tests.

use crate::{
    error::{FieldError, RequestError, SchemaError},
    field::{
        Field, FieldBase, FieldCondition, FieldSpec, FieldTypeRegistration, FieldTypeRegistry,
        InputContext,
    },
    list::ListConfig,
    list_set::ListSet,
    predicate::CompareOp,
    schema::{StorageKind, StoragePath, StorageSchema},
    store::{MemoryStore, Store},
};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

///
/// Plain
///
/// String field filtered by exact match on `<path>`.
///

#[derive(Debug)]
pub(crate) struct Plain(FieldBase);

impl Field for Plain {
    fn base(&self) -> &FieldBase {
        &self.0
    }

    fn type_name(&self) -> &'static str {
        "Plain"
    }

    fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError> {
        schema.add(
            self.path(),
            StoragePath::new(StorageKind::String).with_default(self.0.default_value.clone()),
        )
    }

    fn graphql_type(&self) -> Option<&str> {
        Some("String")
    }

    fn graphql_query_args(&self) -> Option<String> {
        Some(format!("{}: String", self.path()))
    }

    fn graphql_update_args(&self) -> Option<String> {
        Some(format!("{}: String", self.path()))
    }

    fn query_conditions(
        &self,
        args: &Map<String, JsonValue>,
    ) -> Result<Vec<FieldCondition>, RequestError> {
        Ok(args
            .get(self.path())
            .map(|v| vec![FieldCondition::new(CompareOp::Eq, v.clone())])
            .unwrap_or_default())
    }

    fn apply_input(
        &self,
        value: &JsonValue,
        _ctx: &InputContext<'_>,
    ) -> Result<JsonValue, RequestError> {
        if value.is_string() {
            Ok(value.clone())
        } else {
            Err(RequestError::validation(self.path(), "expected a string"))
        }
    }
}

///
/// Count
///
/// Number field filtered by `<path>_gt`.
///

#[derive(Debug)]
pub(crate) struct Count(FieldBase);

impl Field for Count {
    fn base(&self) -> &FieldBase {
        &self.0
    }

    fn type_name(&self) -> &'static str {
        "Count"
    }

    fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError> {
        schema.add(self.path(), StoragePath::new(StorageKind::Number))
    }

    fn graphql_type(&self) -> Option<&str> {
        Some("Int")
    }

    fn graphql_query_args(&self) -> Option<String> {
        Some(format!("{}_gt: Int", self.path()))
    }

    fn graphql_update_args(&self) -> Option<String> {
        Some(format!("{}: Int", self.path()))
    }

    fn query_conditions(
        &self,
        args: &Map<String, JsonValue>,
    ) -> Result<Vec<FieldCondition>, RequestError> {
        Ok(args
            .get(&format!("{}_gt", self.path()))
            .map(|v| vec![FieldCondition::new(CompareOp::Gt, v.clone())])
            .unwrap_or_default())
    }
}

///
/// Opaque
///
/// Declares no GraphQL type.
///

#[derive(Debug)]
pub(crate) struct Opaque(FieldBase);

impl Field for Opaque {
    fn base(&self) -> &FieldBase {
        &self.0
    }

    fn type_name(&self) -> &'static str {
        "Opaque"
    }

    fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError> {
        schema.add(self.path(), StoragePath::new(StorageKind::Mixed))
    }
}

fn plain(base: FieldBase) -> Result<Box<dyn Field>, FieldError> {
    Ok(Box::new(Plain(base)))
}

fn count(base: FieldBase) -> Result<Box<dyn Field>, FieldError> {
    Ok(Box::new(Count(base)))
}

fn opaque(base: FieldBase) -> Result<Box<dyn Field>, FieldError> {
    Ok(Box::new(Opaque(base)))
}

pub(crate) fn registry() -> FieldTypeRegistry {
    let mut registry = FieldTypeRegistry::new();
    for registration in [
        FieldTypeRegistration::new("Plain", plain, "plain/Controller").view("Field", "plain/Field"),
        FieldTypeRegistration::new("Count", count, "count/Controller").view("Field", "count/Field"),
        FieldTypeRegistration::new("Opaque", opaque, "opaque/Controller"),
    ] {
        registry.register(registration).unwrap();
    }

    registry
}

pub(crate) fn store() -> Arc<dyn Store> {
    Arc::new(MemoryStore::new())
}

/// `name: Plain (required)` and `age: Count`.
pub(crate) fn user_config() -> ListConfig {
    ListConfig::new()
        .field("name", FieldSpec::new("Plain").required())
        .field("age", FieldSpec::new("Count"))
}

pub(crate) fn user_set() -> ListSet {
    ListSet::build([("User", user_config())], &registry(), &store()).unwrap()
}
