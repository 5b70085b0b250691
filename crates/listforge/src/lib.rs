//! ## Crate layout
//! - `core`: field contract, list compiler, predicates, store boundary, API.
//! - `fields`: built-in field types (`Text`, `Password`, `Integer`, `Checkbox`).
//! - `admin`: client-side admin metadata provider.
//! - `config`: TOML application configuration.
//!
//! [`App`] wires them together: register field types, compile lists,
//! and serve the resulting operation tables.

pub use listforge_admin as admin;
pub use listforge_config as config;
pub use listforge_core as core;
pub use listforge_fields as fields;

mod app;
mod error;

pub use app::{App, AppBuilder};
pub use error::Error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{App, AppBuilder, Error};
    pub use listforge_core::prelude::*;
    pub use listforge_fields::{Checkbox, Integer, Password, Text};
}
