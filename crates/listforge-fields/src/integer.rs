use crate::args;
use listforge_core::{
    error::{FieldError, RequestError, SchemaError},
    field::{Field, FieldBase, FieldCondition, InputContext},
    predicate::CompareOp,
    schema::{StorageKind, StoragePath, StorageSchema},
};
use serde_json::{Map, Value as JsonValue};

const FILTERS: [(&str, CompareOp); 6] = [
    ("", CompareOp::Eq),
    ("not", CompareOp::Ne),
    ("lt", CompareOp::Lt),
    ("lte", CompareOp::Lte),
    ("gt", CompareOp::Gt),
    ("gte", CompareOp::Gte),
];

///
/// Integer
///

#[derive(Debug)]
pub struct Integer {
    base: FieldBase,
}

impl Integer {
    pub const TYPE: &'static str = "Integer";

    #[must_use]
    pub const fn new(base: FieldBase) -> Self {
        Self { base }
    }

    pub fn factory(base: FieldBase) -> Result<Box<dyn Field>, FieldError> {
        if let Some(default) = &base.default_value
            && !(default.is_i64() || default.is_u64())
        {
            return Err(FieldError::InvalidConfig {
                path: base.path.clone(),
                message: format!("default_value must be an integer, got {default}"),
            });
        }

        Ok(Box::new(Self::new(base)))
    }

    fn arg(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            self.base.path.clone()
        } else {
            format!("{}_{suffix}", self.base.path)
        }
    }
}

impl Field for Integer {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError> {
        schema.add(
            self.path(),
            StoragePath::new(StorageKind::Number).with_default(self.base.default_value.clone()),
        )
    }

    fn graphql_type(&self) -> Option<&str> {
        Some("Int")
    }

    fn graphql_query_args(&self) -> Option<String> {
        let mut lines: Vec<String> = FILTERS
            .iter()
            .map(|(suffix, _)| format!("{}: Int", self.arg(suffix)))
            .collect();
        lines.push(format!("{}: [Int]", self.arg("in")));

        Some(lines.join("\n"))
    }

    fn graphql_update_args(&self) -> Option<String> {
        Some(format!("{}: Int", self.path()))
    }

    fn query_conditions(
        &self,
        query: &Map<String, JsonValue>,
    ) -> Result<Vec<FieldCondition>, RequestError> {
        let mut conditions = Vec::new();
        for (suffix, op) in FILTERS {
            if let Some(value) = args::int(query, &self.arg(suffix))? {
                conditions.push(FieldCondition::new(op, value));
            }
        }
        if let Some(values) = args::int_list(query, &self.arg("in"))? {
            conditions.push(FieldCondition::new(CompareOp::In, values));
        }

        Ok(conditions)
    }

    fn apply_input(
        &self,
        value: &JsonValue,
        _ctx: &InputContext<'_>,
    ) -> Result<JsonValue, RequestError> {
        if value.is_i64() || value.is_u64() {
            Ok(value.clone())
        } else {
            Err(RequestError::validation(
                self.path(),
                format!("expected an integer, got {value}"),
            ))
        }
    }
}
