use crate::Error;
use listforge_admin::AdminMeta;
use listforge_config::{Config, DEFAULT_ADMIN_PATH};
use listforge_core::{
    admin::AdminMetaSnapshot,
    api::{Api, RequestKind},
    field::{FieldTypeRegistration, FieldTypeRegistry},
    list::ListConfig,
    list_set::ListSet,
    store::{MemoryStore, Store},
};
use serde_json::{Map, Value as JsonValue};
use std::{sync::Arc, time::Duration};
use tracing::info;

///
/// AppBuilder
///
/// Collects field types, lists and runtime options. The built-in field
/// types are always registered first.
///

pub struct AppBuilder {
    field_types: Vec<FieldTypeRegistration>,
    lists: Vec<(String, ListConfig)>,
    store: Option<Arc<dyn Store>>,
    admin_path: String,
    request_timeout: Option<Duration>,
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self {
            field_types: Vec::new(),
            lists: Vec::new(),
            store: None,
            admin_path: DEFAULT_ADMIN_PATH.to_string(),
            request_timeout: None,
        }
    }
}

impl AppBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a parsed configuration file.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut builder = Self::new()
            .admin_path(config.admin_path.clone())
            .request_timeout(config.request_timeout());
        for (key, list) in &config.lists {
            builder = builder.list(key.clone(), list.clone());
        }

        builder
    }

    /// Register an additional field type.
    #[must_use]
    pub fn field_type(mut self, registration: FieldTypeRegistration) -> Self {
        self.field_types.push(registration);
        self
    }

    #[must_use]
    pub fn list(mut self, key: impl Into<String>, config: ListConfig) -> Self {
        self.lists.push((key.into(), config));
        self
    }

    /// Store backing every list; defaults to a fresh `MemoryStore`.
    #[must_use]
    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn admin_path(mut self, admin_path: impl Into<String>) -> Self {
        self.admin_path = admin_path.into();
        self
    }

    #[must_use]
    pub const fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<App, Error> {
        let mut registry = FieldTypeRegistry::new();
        listforge_fields::register_defaults(&mut registry)?;
        for registration in self.field_types {
            registry.register(registration)?;
        }

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn Store>);
        let lists = ListSet::build(self.lists, &registry, &store)?;
        let api = Api::new(&lists).with_timeout(self.request_timeout);

        info!(
            lists = lists.len(),
            field_types = registry.len(),
            admin_path = %self.admin_path,
            "app built"
        );

        Ok(App {
            lists,
            api,
            store,
            admin_path: self.admin_path,
        })
    }
}

///
/// App
///

pub struct App {
    lists: ListSet,
    api: Api,
    store: Arc<dyn Store>,
    admin_path: String,
}

impl App {
    #[must_use]
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn from_config(config: &Config) -> Result<Self, Error> {
        AppBuilder::from_config(config).build()
    }

    #[must_use]
    pub const fn lists(&self) -> &ListSet {
        &self.lists
    }

    #[must_use]
    pub const fn api(&self) -> &Api {
        &self.api
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    #[must_use]
    pub fn admin_path(&self) -> &str {
        &self.admin_path
    }

    /// Complete GraphQL SDL for every list.
    #[must_use]
    pub fn schema_sdl(&self) -> String {
        self.lists.schema_sdl()
    }

    /// Snapshot handed to the admin client, with `adminPath` attached.
    #[must_use]
    pub fn admin_meta(&self) -> AdminMetaSnapshot {
        self.lists
            .admin_meta()
            .with_extra("adminPath", self.admin_path.clone())
    }

    /// Client-side provider over this app's snapshot, via its JSON form.
    pub fn admin_client(&self) -> Result<AdminMeta, Error> {
        let json = self.admin_meta().to_json()?;

        Ok(AdminMeta::from_json(&json)?)
    }

    /// Run a query with a fresh request context and wrap it as a response.
    pub async fn query(&self, name: &str, args: JsonValue) -> JsonValue {
        self.respond(RequestKind::Query, name, args).await
    }

    /// Run a mutation with a fresh request context and wrap it as a response.
    pub async fn mutate(&self, name: &str, args: JsonValue) -> JsonValue {
        self.respond(RequestKind::Mutation, name, args).await
    }

    async fn respond(&self, kind: RequestKind, name: &str, args: JsonValue) -> JsonValue {
        let args = match args {
            JsonValue::Object(map) => map,
            _ => Map::new(),
        };
        let ctx = self.api.request_context();

        self.api.respond(kind, name, &args, &ctx).await
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("lists", &self.lists.keys().collect::<Vec<_>>())
            .field("admin_path", &self.admin_path)
            .finish_non_exhaustive()
    }
}
