use crate::args;
use listforge_core::{
    error::{FieldError, RequestError, SchemaError},
    field::{Field, FieldBase, FieldCondition, InputContext},
    predicate::CompareOp,
    schema::{StorageKind, StoragePath, StorageSchema},
};
use serde_json::{Map, Value as JsonValue};

///
/// Checkbox
///

#[derive(Debug)]
pub struct Checkbox {
    base: FieldBase,
}

impl Checkbox {
    pub const TYPE: &'static str = "Checkbox";

    #[must_use]
    pub const fn new(base: FieldBase) -> Self {
        Self { base }
    }

    pub fn factory(base: FieldBase) -> Result<Box<dyn Field>, FieldError> {
        if let Some(default) = &base.default_value
            && !default.is_boolean()
        {
            return Err(FieldError::InvalidConfig {
                path: base.path.clone(),
                message: format!("default_value must be a boolean, got {default}"),
            });
        }

        Ok(Box::new(Self::new(base)))
    }
}

impl Field for Checkbox {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError> {
        schema.add(
            self.path(),
            StoragePath::new(StorageKind::Boolean).with_default(self.base.default_value.clone()),
        )
    }

    fn graphql_type(&self) -> Option<&str> {
        Some("Boolean")
    }

    fn graphql_query_args(&self) -> Option<String> {
        Some(format!(
            "{path}: Boolean\n{path}_not: Boolean",
            path = self.path()
        ))
    }

    fn graphql_update_args(&self) -> Option<String> {
        Some(format!("{}: Boolean", self.path()))
    }

    fn query_conditions(
        &self,
        query: &Map<String, JsonValue>,
    ) -> Result<Vec<FieldCondition>, RequestError> {
        let mut conditions = Vec::new();
        if let Some(value) = args::boolean(query, self.path())? {
            conditions.push(FieldCondition::new(CompareOp::Eq, JsonValue::Bool(value)));
        }
        if let Some(value) = args::boolean(query, &format!("{}_not", self.path()))? {
            conditions.push(FieldCondition::new(CompareOp::Ne, JsonValue::Bool(value)));
        }

        Ok(conditions)
    }

    fn apply_input(
        &self,
        value: &JsonValue,
        _ctx: &InputContext<'_>,
    ) -> Result<JsonValue, RequestError> {
        match value {
            JsonValue::Bool(_) => Ok(value.clone()),
            other => Err(RequestError::validation(
                self.path(),
                format!("expected a boolean, got {other}"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listforge_core::field::{FieldSpec, InputOperation};
    use serde_json::json;

    fn active(spec: &FieldSpec) -> Checkbox {
        Checkbox::new(FieldBase::new("active", "User", spec))
    }

    #[test]
    fn default_feeds_storage_schema() {
        let field = active(&FieldSpec::new("Checkbox").default_value(json!(true)));
        let mut schema = StorageSchema::default();
        field.contribute_storage_schema(&mut schema).unwrap();

        let path = schema.get("active").unwrap();
        assert_eq!(path.kind, StorageKind::Boolean);
        assert_eq!(path.default, Some(json!(true)));
    }

    #[test]
    fn not_filter_maps_to_ne() {
        let field = active(&FieldSpec::new("Checkbox"));
        let mut query = Map::new();
        query.insert("active_not".into(), json!(true));

        assert_eq!(
            field.query_conditions(&query).unwrap(),
            vec![FieldCondition::new(CompareOp::Ne, json!(true))]
        );
    }

    #[test]
    fn input_must_be_boolean() {
        let field = active(&FieldSpec::new("Checkbox"));
        let ctx = InputContext {
            list_key: "User",
            operation: InputOperation::Update,
            existing: None,
        };

        assert!(field.apply_input(&json!("yes"), &ctx).is_err());
        assert_eq!(field.apply_input(&json!(false), &ctx).unwrap(), json!(false));
    }
}
