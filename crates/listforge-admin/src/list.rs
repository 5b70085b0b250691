use listforge_core::{
    admin::{AdminFieldMeta, FieldViews, ListAdminMeta},
    naming::ListNames,
};
use serde_json::Value as JsonValue;

///
/// ClientField
///
/// A field's admin metadata with its controller and views joined in.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ClientField {
    meta: AdminFieldMeta,
    controller: Option<String>,
    views: FieldViews,
}

impl ClientField {
    #[must_use]
    pub fn path(&self) -> &str {
        &self.meta.path
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.meta.label
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.meta.type_name
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&JsonValue> {
        self.meta.default_value.as_ref()
    }

    #[must_use]
    pub fn controller(&self) -> Option<&str> {
        self.controller.as_deref()
    }

    #[must_use]
    pub fn view(&self, role: &str) -> Option<&str> {
        self.views.get(role).map(String::as_str)
    }

    #[must_use]
    pub const fn views(&self) -> &FieldViews {
        &self.views
    }

    /// Type-specific metadata key, e.g. `minLength`.
    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&JsonValue> {
        self.meta.extensions.get(key)
    }

    #[must_use]
    pub const fn meta(&self) -> &AdminFieldMeta {
        &self.meta
    }
}

///
/// ClientList
///

#[derive(Clone, Debug, PartialEq)]
pub struct ClientList {
    key: String,
    names: ListNames,
    fields: Vec<ClientField>,
}

impl ClientList {
    #[must_use]
    pub fn new(meta: ListAdminMeta) -> Self {
        let ListAdminMeta {
            key,
            names,
            fields,
            mut controllers,
            mut views,
        } = meta;

        let fields = fields
            .into_iter()
            .map(|meta| ClientField {
                controller: controllers.shift_remove(&meta.path),
                views: views.shift_remove(&meta.path).unwrap_or_default(),
                meta,
            })
            .collect();

        Self { key, names, fields }
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
    pub fn label(&self) -> &str {
        &self.names.label
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.names.path
    }

    #[must_use]
    pub fn fields(&self) -> &[ClientField] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, path: &str) -> Option<&ClientField> {
        self.fields.iter().find(|f| f.path() == path)
    }
}
