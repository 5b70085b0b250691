use serde_json::{Value as JsonValue, json};
use std::{collections::BTreeMap, fmt};
use thiserror::Error as ThisError;

///
/// ErrorTree
///
/// Route-aware accumulator for validation failures.
/// Build-time passes collect every problem before failing so startup
/// reports the full set instead of the first hit.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: BTreeMap<String, Self>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Record a message at this level.
    pub fn add(&mut self, message: impl ToString) {
        self.messages.push(message.to_string());
    }

    /// Record a message under a child route.
    pub fn add_for(&mut self, route: impl Into<String>, message: impl ToString) {
        self.children
            .entry(route.into())
            .or_default()
            .add(message);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.values().all(Self::is_empty)
    }

    /// Total number of recorded messages across all routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.values().map(Self::len).sum::<usize>()
    }

    /// Flatten into `route: message` lines, deterministic by route.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.flatten_into(None, &mut out);

        out
    }

    fn flatten_into(&self, prefix: Option<&str>, out: &mut Vec<String>) {
        for message in &self.messages {
            match prefix {
                Some(route) => out.push(format!("{route}: {message}")),
                None => out.push(message.clone()),
            }
        }

        for (key, child) in &self.children {
            let route = match prefix {
                Some(route) => format!("{route}.{key}"),
                None => key.clone(),
            };
            child.flatten_into(Some(&route), out);
        }
    }

    /// Ok when nothing was recorded.
    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flatten().join("; "))
    }
}

impl std::error::Error for ErrorTree {}

///
/// FieldError
///
/// Failures raised by field types while they are being constructed or
/// asked for a build-time capability.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FieldError {
    #[error("field type [{type_name}] does not implement {capability}")]
    UnimplementedCapability {
        type_name: String,
        capability: &'static str,
    },

    #[error("field '{path}' has invalid config: {message}")]
    InvalidConfig { path: String, message: String },

    #[error("field type '{type_name}' is already registered")]
    DuplicateRegistration { type_name: String },
}

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("storage path '{0}' is already defined")]
    DuplicatePath(String),

    #[error("storage path '{0}' is not defined")]
    UnknownPath(String),
}

///
/// CompileError
///
/// Startup failures. Any of these aborts building the list set.
///

#[derive(Debug, ThisError)]
pub enum CompileError {
    #[error("list '{list}' field '{field}' references unregistered field type '{type_name}'")]
    UnregisteredFieldType {
        list: String,
        field: String,
        type_name: String,
    },

    #[error("list '{list}': {source}")]
    Field {
        list: String,
        #[source]
        source: FieldError,
    },

    #[error("list '{list}': {source}")]
    Schema {
        list: String,
        #[source]
        source: SchemaError,
    },

    #[error("list '{list}': {source}")]
    Store {
        list: String,
        #[source]
        source: StoreError,
    },

    #[error("list '{0}' is already defined")]
    DuplicateList(String),

    #[error("validation failed: {0}")]
    Validation(ErrorTree),
}

///
/// StoreError
///
/// Failures surfaced by a document store driver.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("collection '{0}' is not registered")]
    UnknownCollection(String),

    #[error("collection '{0}' is already registered")]
    DuplicateCollection(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

///
/// RequestError
///
/// Request-time failures. These are returned to the caller as GraphQL
/// errors and never abort the serving process.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum RequestError {
    #[error("request cancelled")]
    Cancelled,

    #[error("invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    #[error("no {list} item with id '{id}'")]
    NotFound { list: String, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("request timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("unknown {kind} '{name}'")]
    UnknownOperation { kind: &'static str, name: String },

    #[error("validation error on field '{field}': {message}")]
    Validation { field: String, message: String },
}

impl RequestError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable machine-readable code carried in GraphQL error extensions.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Cancelled => "CANCELLED",
            Self::InvalidArgument { .. } | Self::Validation { .. } => "BAD_USER_INPUT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Store(_) => "INTERNAL_SERVER_ERROR",
            Self::Timeout { .. } => "TIMEOUT",
            Self::UnknownOperation { .. } => "GRAPHQL_VALIDATION_FAILED",
        }
    }

    /// Render as a GraphQL response error object.
    #[must_use]
    pub fn to_graphql_error(&self) -> JsonValue {
        json!({
            "message": self.to_string(),
            "extensions": { "code": self.code() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_tree_flattens_routes_in_order() {
        let mut errs = ErrorTree::new();
        errs.add("top level");
        errs.add_for("users", "path collision");
        errs.add_for("posts", "bad name");

        assert_eq!(
            errs.flatten(),
            vec![
                "top level".to_string(),
                "posts: bad name".to_string(),
                "users: path collision".to_string(),
            ]
        );
        assert_eq!(errs.len(), 3);
    }

    #[test]
    fn empty_error_tree_is_ok() {
        let errs = ErrorTree::new();

        assert!(errs.is_empty());
        assert!(errs.result().is_ok());
    }

    #[test]
    fn unimplemented_capability_names_type_and_capability() {
        let err = FieldError::UnimplementedCapability {
            type_name: "Color".into(),
            capability: "graphql_type",
        };

        assert_eq!(
            err.to_string(),
            "field type [Color] does not implement graphql_type"
        );
    }

    #[test]
    fn request_errors_carry_codes() {
        let err = RequestError::NotFound {
            list: "User".into(),
            id: "abc".into(),
        };
        let rendered = err.to_graphql_error();

        assert_eq!(rendered["extensions"]["code"], "NOT_FOUND");
        assert_eq!(rendered["message"], "no User item with id 'abc'");
    }
}
