use crate::{
    error::FieldError,
    field::{Field, FieldBase},
};
use indexmap::IndexMap;
use tracing::debug;

/// Constructs a field implementation from its shared base state.
pub type FieldFactory = fn(FieldBase) -> Result<Box<dyn Field>, FieldError>;

///
/// FieldTypeRegistration
///
/// The plugin boundary: a named field type with its implementation, its
/// client controller reference and its view references by role.
///

#[derive(Clone, Debug)]
pub struct FieldTypeRegistration {
    pub type_name: String,
    pub implementation: FieldFactory,
    pub controller: String,
    pub views: IndexMap<String, String>,
    pub adapters: IndexMap<String, String>,
}

impl FieldTypeRegistration {
    #[must_use]
    pub fn new(
        type_name: impl Into<String>,
        implementation: FieldFactory,
        controller: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            implementation,
            controller: controller.into(),
            views: IndexMap::new(),
            adapters: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn view(mut self, role: impl Into<String>, reference: impl Into<String>) -> Self {
        self.views.insert(role.into(), reference.into());
        self
    }

    #[must_use]
    pub fn adapter(mut self, name: impl Into<String>, reference: impl Into<String>) -> Self {
        self.adapters.insert(name.into(), reference.into());
        self
    }

    /// Run the implementation factory.
    pub fn instantiate(&self, base: FieldBase) -> Result<Box<dyn Field>, FieldError> {
        (self.implementation)(base)
    }
}

///
/// FieldTypeRegistry
///
/// Field types available to the list compiler. Built before compilation
/// and passed in explicitly; read-only afterwards.
///

#[derive(Clone, Debug, Default)]
pub struct FieldTypeRegistry {
    types: IndexMap<String, FieldTypeRegistration>,
}

impl FieldTypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, registration: FieldTypeRegistration) -> Result<(), FieldError> {
        if self.types.contains_key(&registration.type_name) {
            return Err(FieldError::DuplicateRegistration {
                type_name: registration.type_name,
            });
        }

        debug!(field_type = %registration.type_name, "field type registered");
        self.types
            .insert(registration.type_name.clone(), registration);

        Ok(())
    }

    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&FieldTypeRegistration> {
        self.types.get(type_name)
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::SchemaError,
        schema::{StorageKind, StoragePath, StorageSchema},
    };

    #[derive(Debug)]
    struct Dummy(FieldBase);

    impl Field for Dummy {
        fn base(&self) -> &FieldBase {
            &self.0
        }

        fn type_name(&self) -> &'static str {
            "Dummy"
        }

        fn contribute_storage_schema(&self, schema: &mut StorageSchema) -> Result<(), SchemaError> {
            schema.add(self.path(), StoragePath::new(StorageKind::String))
        }
    }

    fn dummy(base: FieldBase) -> Result<Box<dyn Field>, FieldError> {
        Ok(Box::new(Dummy(base)))
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = FieldTypeRegistry::new();
        registry
            .register(FieldTypeRegistration::new("Dummy", dummy, "dummy/Controller"))
            .unwrap();

        let err = registry
            .register(FieldTypeRegistration::new("Dummy", dummy, "other"))
            .unwrap_err();

        assert_eq!(
            err,
            FieldError::DuplicateRegistration {
                type_name: "Dummy".into()
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registration_keeps_views_in_order() {
        let reg = FieldTypeRegistration::new("Dummy", dummy, "dummy/Controller")
            .view("Field", "dummy/views/Field")
            .view("Cell", "dummy/views/Cell");

        let roles: Vec<_> = reg.views.keys().cloned().collect();
        assert_eq!(roles, vec!["Field".to_string(), "Cell".to_string()]);
    }
}
