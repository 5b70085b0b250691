use crate::{error::AdminMetaError, list::ClientList};
use indexmap::IndexMap;
use listforge_core::admin::AdminMetaSnapshot;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use tracing::debug;

///
/// AdminMeta
///
/// Client-side view of the admin metadata snapshot. Lookup tables are
/// built once; nothing is derived again on the client.
///

#[derive(Clone, Debug, Default)]
pub struct AdminMeta {
    lists: IndexMap<String, ClientList>,
    by_path: HashMap<String, String>,
    list_keys: Vec<String>,
    extra: Map<String, JsonValue>,
}

impl AdminMeta {
    pub fn from_snapshot(snapshot: AdminMetaSnapshot) -> Result<Self, AdminMetaError> {
        let mut lists = IndexMap::with_capacity(snapshot.lists.len());
        let mut by_path: HashMap<String, String> = HashMap::new();

        for (entry, meta) in snapshot.lists {
            if entry != meta.key {
                return Err(AdminMetaError::KeyMismatch {
                    entry,
                    key: meta.key,
                });
            }

            let list = ClientList::new(meta);
            if let Some(first) = by_path.get(list.path()) {
                return Err(AdminMetaError::DuplicatePath {
                    path: list.path().to_string(),
                    first: first.clone(),
                    second: entry,
                });
            }

            by_path.insert(list.path().to_string(), entry.clone());
            lists.insert(entry, list);
        }

        let list_keys: Vec<String> = lists.keys().cloned().collect();
        debug!(lists = list_keys.len(), "admin meta loaded");

        Ok(Self {
            lists,
            by_path,
            list_keys,
            extra: snapshot.extra,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, AdminMetaError> {
        let snapshot: AdminMetaSnapshot = serde_json::from_str(json)?;

        Self::from_snapshot(snapshot)
    }

    /// List keys in declaration order.
    #[must_use]
    pub fn list_keys(&self) -> &[String] {
        &self.list_keys
    }

    #[must_use]
    pub fn get_list_by_key(&self, key: &str) -> Option<&ClientList> {
        self.lists.get(key)
    }

    #[must_use]
    pub fn get_list_by_path(&self, path: &str) -> Option<&ClientList> {
        self.by_path.get(path).and_then(|key| self.lists.get(key))
    }

    pub fn lists(&self) -> impl Iterator<Item = &ClientList> {
        self.lists.values()
    }

    /// Snapshot keys other than the lists, passed through untouched.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&JsonValue> {
        self.extra.get(key)
    }

    #[must_use]
    pub fn admin_path(&self) -> Option<&str> {
        self.extra("adminPath").and_then(JsonValue::as_str)
    }
}
