//! Core runtime for listforge: the field capability contract, the list
//! compiler, predicate composition, the store boundary and request dispatch.

// public exports are one module level down
pub mod admin;
pub mod api;
pub mod error;
pub mod field;
pub mod list;
pub mod list_set;
pub mod naming;
pub mod predicate;
pub mod schema;
pub mod store;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Domain vocabulary only. Errors, stores and helpers stay in their modules.
///

pub mod prelude {
    pub use crate::{
        api::{Api, RequestContext, RequestKind},
        field::{Field, FieldBase, FieldSpec, FieldTypeRegistration, FieldTypeRegistry},
        list::{List, ListConfig},
        list_set::ListSet,
        naming::{ListNames, NameOverrides},
        predicate::Predicate,
        schema::{SchemaOptions, StorageKind, StoragePath, StorageSchema},
    };
}
