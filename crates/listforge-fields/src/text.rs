use crate::args;
use listforge_core::{
    error::{FieldError, RequestError, SchemaError},
    field::{Field, FieldBase, FieldCondition, InputContext},
    predicate::{CompareOp, TextMode},
    schema::{StorageKind, StoragePath, StorageSchema},
};
use serde_json::{Map, Value as JsonValue};

///
/// Text
///
/// Free-form string. Substring filters are case-insensitive unless the
/// query passes `<path>_case_sensitive: true`.
///

#[derive(Debug)]
pub struct Text {
    base: FieldBase,
    index: bool,
}

impl Text {
    pub const TYPE: &'static str = "Text";

    pub fn new(base: FieldBase) -> Result<Self, FieldError> {
        let index = base.config_bool("index")?.unwrap_or(false);

        Ok(Self { base, index })
    }

    pub fn factory(base: FieldBase) -> Result<Box<dyn Field>, FieldError> {
        Ok(Box::new(Self::new(base)?))
    }

    fn arg(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            self.base.path.clone()
        } else {
            format!("{}_{suffix}", self.base.path)
        }
    }
}

// (suffix, operator) for every string-valued filter argument
const FILTERS: [(&str, CompareOp); 5] = [
    ("", CompareOp::Eq),
    ("not", CompareOp::Ne),
    ("contains", CompareOp::Contains),
    ("starts_with", CompareOp::StartsWith),
    ("ends_with", CompareOp::EndsWith),
];

impl Field for Text {
    fn base(&self) -> &FieldBase {
        &self.base
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError> {
        let mut path =
            StoragePath::new(StorageKind::String).with_default(self.base.default_value.clone());
        if self.index {
            path = path.indexed();
        }

        schema.add(self.path(), path)
    }

    fn graphql_type(&self) -> Option<&str> {
        Some("String")
    }

    fn graphql_query_args(&self) -> Option<String> {
        let mut lines: Vec<String> = FILTERS
            .iter()
            .map(|(suffix, _)| format!("{}: String", self.arg(suffix)))
            .collect();
        lines.push(format!("{}: Boolean", self.arg("case_sensitive")));

        Some(lines.join("\n"))
    }

    fn graphql_update_args(&self) -> Option<String> {
        Some(format!("{}: String", self.path()))
    }

    fn query_conditions(
        &self,
        query: &Map<String, JsonValue>,
    ) -> Result<Vec<FieldCondition>, RequestError> {
        let case_sensitive =
            args::boolean(query, &self.arg("case_sensitive"))?.unwrap_or(false);
        let mode = if case_sensitive {
            TextMode::Cs
        } else {
            TextMode::Ci
        };

        let mut conditions = Vec::new();
        for (suffix, op) in FILTERS {
            if let Some(value) = args::string(query, &self.arg(suffix))? {
                let condition = FieldCondition::new(op, value);
                conditions.push(if op.is_text() {
                    condition.with_mode(mode)
                } else {
                    condition
                });
            }
        }

        Ok(conditions)
    }

    fn apply_input(
        &self,
        value: &JsonValue,
        _ctx: &InputContext<'_>,
    ) -> Result<JsonValue, RequestError> {
        match value {
            JsonValue::String(_) => Ok(value.clone()),
            other => Err(RequestError::validation(
                self.path(),
                format!("expected a string, got {other}"),
            )),
        }
    }
}
