use crate::{
    error::StoreError,
    schema::StorageSchema,
    store::{Document, Query, Store},
};
use serde_json::{Map, Value as JsonValue};
use std::{
    fmt,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tracing::debug;

pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

///
/// Model
///
/// A storage schema bound to a named collection of a store.
///

#[derive(Clone)]
pub struct Model {
    name: String,
    schema: Arc<StorageSchema>,
    store: Arc<dyn Store>,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Register the collection and bind the schema to it.
    pub fn bind(
        name: impl Into<String>,
        schema: StorageSchema,
        store: Arc<dyn Store>,
    ) -> Result<Self, StoreError> {
        let name = name.into();
        store.register_collection(&name)?;
        debug!(model = %name, paths = schema.len(), "model bound");

        Ok(Self {
            name,
            schema: Arc::new(schema),
            store,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn schema(&self) -> &StorageSchema {
        &self.schema
    }

    pub async fn find(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        self.store.find(&self.name, query).await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.store.find_by_id(&self.name, id).await
    }

    /// Insert a new document after applying strictness and defaults.
    pub async fn create(&self, mut fields: Map<String, JsonValue>) -> Result<Document, StoreError> {
        let dropped = self.schema.retain_known(&mut fields);
        if !dropped.is_empty() {
            debug!(model = %self.name, ?dropped, "dropped unknown paths");
        }
        self.schema.apply_defaults(&mut fields);

        if self.schema.options.timestamps {
            let now = now_millis();
            fields.insert(CREATED_AT.to_string(), now.clone());
            fields.insert(UPDATED_AT.to_string(), now);
        }

        self.store.insert(&self.name, fields).await
    }

    /// Persist a modified document; `None` when it vanished meanwhile.
    pub async fn save(&self, mut document: Document) -> Result<Option<Document>, StoreError> {
        // bookkeeping paths are not schema paths; lift them out across strictness
        let created = document.fields.remove(CREATED_AT);
        self.schema.retain_known(&mut document.fields);

        if let Some(created) = created {
            document.fields.insert(CREATED_AT.to_string(), created);
        }
        if self.schema.options.timestamps {
            document.fields.insert(UPDATED_AT.to_string(), now_millis());
        }

        self.store.replace(&self.name, document).await
    }

    pub async fn remove(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.store.remove(&self.name, id).await
    }
}

fn now_millis() -> JsonValue {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));

    JsonValue::from(millis)
}
