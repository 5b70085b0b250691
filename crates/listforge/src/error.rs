use listforge_admin::AdminMetaError;
use listforge_config::ConfigError;
use listforge_core::error::{CompileError, FieldError};
use thiserror::Error as ThisError;

///
/// Error
///
/// Startup failures of an application. Request-time failures stay
/// `RequestError`s and are returned inside GraphQL responses.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    AdminMeta(#[from] AdminMetaError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("admin meta serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
