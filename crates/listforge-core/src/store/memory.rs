use crate::{
    error::StoreError,
    predicate::eval,
    store::{Document, Query, Store},
};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};
use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use ulid::Ulid;

type Collections = HashMap<String, IndexMap<String, Document>>;

///
/// MemoryStore
///
/// In-process store keyed by collection then id, in insertion order.
/// Locks are held only for the synchronous body of each call.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> Result<usize, StoreError> {
        let guard = self.read()?;

        guard
            .get(collection)
            .map(IndexMap::len)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
    }
}

fn collection_mut<'a>(
    guard: &'a mut Collections,
    name: &str,
) -> Result<&'a mut IndexMap<String, Document>, StoreError> {
    guard
        .get_mut(name)
        .ok_or_else(|| StoreError::UnknownCollection(name.to_string()))
}

#[async_trait]
impl Store for MemoryStore {
    fn register_collection(&self, name: &str) -> Result<(), StoreError> {
        let mut guard = self.write()?;
        if guard.contains_key(name) {
            return Err(StoreError::DuplicateCollection(name.to_string()));
        }
        guard.insert(name.to_string(), IndexMap::new());

        Ok(())
    }

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        let guard = self.read()?;
        let docs = guard
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;

        let mut matched: Vec<Document> = docs
            .values()
            .filter(|doc| eval(*doc, &query.filter))
            .cloned()
            .collect();

        if !query.sort.is_empty() {
            // stable: ties keep insertion order
            matched.sort_by(|a, b| query.sort.compare(a, b));
        }

        Ok(matched)
    }

    async fn find_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let guard = self.read()?;
        let docs = guard
            .get(collection)
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))?;

        Ok(docs.get(id).cloned())
    }

    async fn insert(
        &self,
        collection: &str,
        fields: Map<String, JsonValue>,
    ) -> Result<Document, StoreError> {
        let mut guard = self.write()?;
        let docs = collection_mut(&mut guard, collection)?;

        let doc = Document::new(Ulid::new().to_string(), fields);
        docs.insert(doc.id.clone(), doc.clone());

        Ok(doc)
    }

    async fn replace(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut guard = self.write()?;
        let docs = collection_mut(&mut guard, collection)?;

        match docs.get_mut(&document.id) {
            Some(slot) => {
                *slot = document.clone();
                Ok(Some(document))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let mut guard = self.write()?;
        let docs = collection_mut(&mut guard, collection)?;

        Ok(docs.shift_remove(id))
    }
}
