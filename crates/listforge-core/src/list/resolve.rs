use super::List;
use crate::{
    api::{Operation, OperationKind, RequestContext},
    error::RequestError,
    field::{InputContext, InputOperation},
    store::Document,
};
use serde_json::{Map, Value as JsonValue};
use std::sync::{Arc, LazyLock};

impl List {
    /// `(name, operation)` pairs for `type Query`.
    #[must_use]
    pub fn query_resolvers(self: &Arc<Self>) -> Vec<(String, Operation)> {
        vec![
            (
                self.names.list_query_name.clone(),
                Operation::new(OperationKind::ListItems, Arc::clone(self)),
            ),
            (
                self.names.item_query_name.clone(),
                Operation::new(OperationKind::Item, Arc::clone(self)),
            ),
        ]
    }

    /// `(name, operation)` pairs for `type Mutation`.
    #[must_use]
    pub fn mutation_resolvers(self: &Arc<Self>) -> Vec<(String, Operation)> {
        vec![
            (
                self.names.create_mutation_name.clone(),
                Operation::new(OperationKind::Create, Arc::clone(self)),
            ),
            (
                self.names.update_mutation_name.clone(),
                Operation::new(OperationKind::Update, Arc::clone(self)),
            ),
            (
                self.names.delete_mutation_name.clone(),
                Operation::new(OperationKind::Delete, Arc::clone(self)),
            ),
        ]
    }

    pub async fn list_items(
        &self,
        args: &Map<String, JsonValue>,
        ctx: &RequestContext,
    ) -> Result<JsonValue, RequestError> {
        let query = self.build_items_query(args)?;
        let documents = ctx.run(self.model.find(&query)).await?;

        Ok(JsonValue::Array(
            documents.iter().map(|d| self.to_output(d)).collect(),
        ))
    }

    pub async fn item(
        &self,
        args: &Map<String, JsonValue>,
        ctx: &RequestContext,
    ) -> Result<JsonValue, RequestError> {
        let id = id_arg(args)?;
        let document = ctx
            .run(self.model.find_by_id(id))
            .await?
            .ok_or_else(|| self.not_found(id))?;

        Ok(self.to_output(&document))
    }

    pub async fn create(
        &self,
        args: &Map<String, JsonValue>,
        ctx: &RequestContext,
    ) -> Result<JsonValue, RequestError> {
        let data = data_arg(args)?;
        let values = self.resolve_input(data, InputOperation::Create, None)?;

        for field in &self.fields {
            let path = field.path();
            let has_default = self
                .schema()
                .get(path)
                .is_some_and(|p| p.default.is_some());

            if field.base().required && !values.contains_key(path) && !has_default {
                return Err(RequestError::validation(path, "is required"));
            }
        }

        let document = ctx.run(self.model.create(values)).await?;

        Ok(self.to_output(&document))
    }

    pub async fn update(
        &self,
        args: &Map<String, JsonValue>,
        ctx: &RequestContext,
    ) -> Result<JsonValue, RequestError> {
        let id = id_arg(args)?;
        let data = data_arg(args)?;

        let mut document = ctx
            .run(self.model.find_by_id(id))
            .await?
            .ok_or_else(|| self.not_found(id))?;
        let values = self.resolve_input(data, InputOperation::Update, Some(&document))?;
        document.fields.extend(values);

        let saved = ctx
            .run(self.model.save(document))
            .await?
            .ok_or_else(|| self.not_found(id))?;

        Ok(self.to_output(&saved))
    }

    pub async fn delete(
        &self,
        args: &Map<String, JsonValue>,
        ctx: &RequestContext,
    ) -> Result<JsonValue, RequestError> {
        let id = id_arg(args)?;
        let removed = ctx
            .run(self.model.remove(id))
            .await?
            .ok_or_else(|| self.not_found(id))?;

        Ok(self.to_output(&removed))
    }

    // route each submitted key through the field that owns it
    fn resolve_input(
        &self,
        data: &Map<String, JsonValue>,
        operation: InputOperation,
        existing: Option<&Document>,
    ) -> Result<Map<String, JsonValue>, RequestError> {
        let ctx = InputContext {
            list_key: &self.key,
            operation,
            existing,
        };

        let mut out = Map::new();
        for (key, value) in data {
            let field = self.field(key).ok_or_else(|| {
                RequestError::validation(key, format!("{} has no such field", self.key))
            })?;

            if value.is_null() {
                if field.base().required {
                    return Err(RequestError::validation(key, "is required"));
                }
                out.insert(key.clone(), JsonValue::Null);
                continue;
            }

            let stored = field.apply_input(value, &ctx)?;
            if let Some(path) = self.schema().get(key)
                && !path.kind.accepts(&stored)
            {
                return Err(RequestError::validation(
                    key,
                    format!("value does not fit storage kind {}", path.kind),
                ));
            }
            out.insert(key.clone(), stored);
        }

        Ok(out)
    }

    fn not_found(&self, id: &str) -> RequestError {
        RequestError::NotFound {
            list: self.key.clone(),
            id: id.to_string(),
        }
    }
}

fn id_arg(args: &Map<String, JsonValue>) -> Result<&str, RequestError> {
    match args.get("id") {
        Some(JsonValue::String(id)) if !id.is_empty() => Ok(id),
        Some(_) => Err(RequestError::invalid_argument("id", "expected a non-empty string")),
        None => Err(RequestError::invalid_argument("id", "is required")),
    }
}

// a missing or null `data` is an empty submission
fn data_arg(args: &Map<String, JsonValue>) -> Result<&Map<String, JsonValue>, RequestError> {
    static EMPTY: LazyLock<Map<String, JsonValue>> = LazyLock::new(Map::new);

    match args.get("data") {
        None | Some(JsonValue::Null) => Ok(&EMPTY),
        Some(JsonValue::Object(data)) => Ok(data),
        Some(other) => Err(RequestError::invalid_argument(
            "data",
            format!("expected an input object, got {other}"),
        )),
    }
}
