//! Built-in field types for listforge.
//!
//! Each type registers under its name with a client controller and its
//! views, referenced as `@listforge/fields/types/<Type>/…`.

mod args;
pub mod checkbox;
pub mod integer;
pub mod password;
pub mod text;

pub use checkbox::Checkbox;
pub use integer::Integer;
pub use password::Password;
pub use text::Text;

use listforge_core::{
    error::FieldError,
    field::{FieldFactory, FieldTypeRegistration, FieldTypeRegistry},
};
use tracing::debug;

const REFERENCE_ROOT: &str = "@listforge/fields/types";

fn registration(type_name: &str, factory: FieldFactory, views: &[&str]) -> FieldTypeRegistration {
    let root = format!("{REFERENCE_ROOT}/{type_name}");

    views.iter().fold(
        FieldTypeRegistration::new(type_name, factory, format!("{root}/Controller")),
        |reg, view| reg.view(*view, format!("{root}/views/{view}")),
    )
}

/// Registrations for every built-in type.
#[must_use]
pub fn default_registrations() -> Vec<FieldTypeRegistration> {
    vec![
        registration(Text::TYPE, Text::factory, &["Field", "Cell", "Filter"]),
        registration(Password::TYPE, Password::factory, &["Field"]),
        registration(Integer::TYPE, Integer::factory, &["Field", "Cell", "Filter"]),
        registration(Checkbox::TYPE, Checkbox::factory, &["Field", "Cell", "Filter"]),
    ]
}

/// Register every built-in type.
pub fn register_defaults(registry: &mut FieldTypeRegistry) -> Result<(), FieldError> {
    for registration in default_registrations() {
        registry.register(registration)?;
    }
    debug!(types = registry.len(), "default field types registered");

    Ok(())
}
