mod memory;
mod model;

pub use memory::MemoryStore;
pub use model::Model;

use crate::{
    error::StoreError,
    predicate::{FieldPresence, Predicate, Row, SortSpec},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

///
/// Document
///
/// One stored entity. `id` is assigned by the store on insert.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Document {
    pub id: String,

    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
}

impl Document {
    #[must_use]
    pub const fn new(id: String, fields: Map<String, JsonValue>) -> Self {
        Self { id, fields }
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<&JsonValue> {
        self.fields.get(path)
    }
}

impl Row for Document {
    fn field(&self, name: &str) -> FieldPresence<'_> {
        match self.fields.get(name) {
            Some(value) => FieldPresence::Present(value),
            None => FieldPresence::Missing,
        }
    }
}

///
/// Query
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
    pub filter: Predicate,
    pub sort: SortSpec,
}

impl Query {
    #[must_use]
    pub fn new(filter: Predicate) -> Self {
        Self {
            filter,
            sort: SortSpec::default(),
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(Predicate::True)
    }
}

///
/// Store
///
/// Document store driver boundary. Every data operation is async; callers
/// treat each call as a suspension point.
///

#[async_trait]
pub trait Store: Send + Sync {
    /// Declare a collection. Called once per list at startup.
    fn register_collection(&self, name: &str) -> Result<(), StoreError>;

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    async fn insert(
        &self,
        collection: &str,
        fields: Map<String, JsonValue>,
    ) -> Result<Document, StoreError>;

    /// Replace a stored document; `None` when the id does not exist.
    async fn replace(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Remove by id, returning the removed document.
    async fn remove(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;
}
