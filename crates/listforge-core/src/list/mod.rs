//! List compiler.
//!
//! A `List` is compiled once from its key and configuration: names are
//! derived, fields instantiated through the registry, the storage schema
//! assembled and bound to a model, and the GraphQL fragments generated.
//! Everything is immutable afterwards and shared as `Arc<List>`.

mod query;
mod resolve;
pub(crate) mod sdl;

pub use query::SEARCH_FIELD;
pub use sdl::ListSdl;

use crate::{
    admin::{FieldViews, ListAdminMeta},
    error::{CompileError, SchemaError},
    field::{Field, FieldBase, FieldSpec, FieldTypeRegistry},
    list_set::ListSet,
    naming::{ListNames, NameOverrides},
    schema::{SchemaOptions, StorageSchema},
    store::{Document, Model, Store},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::{fmt, sync::Arc};
use tracing::debug;

/// List-level storage schema customization, run after every field has
/// contributed. Receives the lists compiled so far.
pub type SchemaHook =
    Arc<dyn Fn(&mut StorageSchema, &ListSet) -> Result<(), SchemaError> + Send + Sync>;

///
/// ListConfig
///

#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ListConfig {
    #[serde(flatten)]
    pub names: NameOverrides,

    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,

    #[serde(default)]
    pub schema_options: SchemaOptions,

    #[serde(skip)]
    pub configure_schema: Option<SchemaHook>,
}

impl fmt::Debug for ListConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListConfig")
            .field("names", &self.names)
            .field("fields", &self.fields)
            .field("schema_options", &self.schema_options)
            .field("configure_schema", &self.configure_schema.is_some())
            .finish()
    }
}

impl ListConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn field(mut self, path: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(path.into(), spec);
        self
    }

    #[must_use]
    pub fn names(mut self, names: NameOverrides) -> Self {
        self.names = names;
        self
    }

    #[must_use]
    pub fn schema_options(mut self, options: SchemaOptions) -> Self {
        self.schema_options = options;
        self
    }

    #[must_use]
    pub fn configure_schema<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut StorageSchema, &ListSet) -> Result<(), SchemaError> + Send + Sync + 'static,
    {
        self.configure_schema = Some(Arc::new(hook));
        self
    }
}

///
/// CompileContext
///

pub struct CompileContext<'a> {
    pub registry: &'a FieldTypeRegistry,
    pub store: Arc<dyn Store>,
    pub lists: &'a ListSet,
}

///
/// List
///

#[derive(Debug)]
pub struct List {
    key: String,
    names: ListNames,
    fields: Vec<Box<dyn Field>>,
    controllers: IndexMap<String, String>,
    views: IndexMap<String, FieldViews>,
    sdl: ListSdl,
    model: Model,
}

impl List {
    pub fn compile(
        key: &str,
        config: &ListConfig,
        ctx: &CompileContext<'_>,
    ) -> Result<Self, CompileError> {
        let names = ListNames::derive(key, &config.names);

        // fields, controllers and views in declaration order
        let mut fields = Vec::with_capacity(config.fields.len());
        let mut controllers = IndexMap::new();
        let mut views = IndexMap::new();
        for (path, spec) in &config.fields {
            let registration = ctx.registry.get(&spec.type_name).ok_or_else(|| {
                CompileError::UnregisteredFieldType {
                    list: key.to_string(),
                    field: path.clone(),
                    type_name: spec.type_name.clone(),
                }
            })?;

            let field = registration
                .instantiate(FieldBase::new(path, key, spec))
                .map_err(|source| CompileError::Field {
                    list: key.to_string(),
                    source,
                })?;

            controllers.insert(path.clone(), registration.controller.clone());
            views.insert(path.clone(), registration.views.clone());
            fields.push(field);
        }

        // storage schema
        let schema_err = |source| CompileError::Schema {
            list: key.to_string(),
            source,
        };
        let mut schema = StorageSchema::new(config.schema_options.clone());
        for field in &fields {
            field
                .contribute_storage_schema(&mut schema)
                .map_err(schema_err)?;
        }
        if let Some(hook) = &config.configure_schema {
            hook(&mut schema, ctx.lists).map_err(schema_err)?;
        }

        // sdl before binding so a failing field leaves no collection behind
        let sdl = ListSdl::generate(key, &names, &fields).map_err(|source| CompileError::Field {
            list: key.to_string(),
            source,
        })?;

        let model = Model::bind(key, schema, Arc::clone(&ctx.store)).map_err(|source| {
            CompileError::Store {
                list: key.to_string(),
                source,
            }
        })?;

        debug!(list = %key, path = %names.path, fields = fields.len(), "list compiled");

        Ok(Self {
            key: key.to_string(),
            names,
            fields,
            controllers,
            views,
            sdl,
            model,
        })
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn names(&self) -> &ListNames {
        &self.names
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.names.path
    }

    #[must_use]
    pub fn fields(&self) -> &[Box<dyn Field>] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, path: &str) -> Option<&dyn Field> {
        self.fields
            .iter()
            .find(|f| f.path() == path)
            .map(AsRef::as_ref)
    }

    #[must_use]
    pub const fn controllers(&self) -> &IndexMap<String, String> {
        &self.controllers
    }

    #[must_use]
    pub const fn views(&self) -> &IndexMap<String, FieldViews> {
        &self.views
    }

    #[must_use]
    pub const fn model(&self) -> &Model {
        &self.model
    }

    #[must_use]
    pub fn schema(&self) -> &StorageSchema {
        self.model.schema()
    }

    /// Object type, update/create inputs and auxiliary types.
    #[must_use]
    pub fn admin_graphql_types(&self) -> &str {
        &self.sdl.types
    }

    /// Query field declarations for `type Query`.
    #[must_use]
    pub fn admin_graphql_queries(&self) -> &str {
        &self.sdl.queries
    }

    /// Mutation field declarations for `type Mutation`.
    #[must_use]
    pub fn admin_graphql_mutations(&self) -> &str {
        &self.sdl.mutations
    }

    /// GraphQL output object for a stored document.
    #[must_use]
    pub fn to_output(&self, document: &Document) -> JsonValue {
        let mut out = Map::new();
        out.insert("id".to_string(), JsonValue::String(document.id.clone()));
        for field in &self.fields {
            field.write_output(document, &mut out);
        }

        JsonValue::Object(out)
    }

    #[must_use]
    pub fn admin_metadata(&self) -> ListAdminMeta {
        ListAdminMeta {
            key: self.key.clone(),
            names: self.names.clone(),
            fields: self.fields.iter().map(|f| f.admin_metadata()).collect(),
            controllers: self.controllers.clone(),
            views: self.views.clone(),
        }
    }
}
