use thiserror::Error as ThisError;

///
/// AdminMetaError
///

#[derive(Debug, ThisError)]
pub enum AdminMetaError {
    #[error("admin meta is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lists '{first}' and '{second}' share the path '{path}'")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },

    #[error("list entry '{entry}' carries key '{key}'")]
    KeyMismatch { entry: String, key: String },
}
