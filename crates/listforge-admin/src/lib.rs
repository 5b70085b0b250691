//! Admin metadata provider for listforge clients.
//!
//! Consumes the snapshot produced by the server's `ListSet::admin_meta`
//! and exposes list lookups by key and by URL path. Share one instance
//! behind an `Arc`.

pub mod error;
pub mod list;
pub mod meta;

pub use error::AdminMetaError;
pub use list::{ClientField, ClientList};
pub use meta::AdminMeta;
