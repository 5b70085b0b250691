//! TOML configuration for a listforge application.
//!
//! ```toml
//! admin_path = "/admin"
//! request_timeout_ms = 5000
//!
//! [lists.User.fields.name]
//! type = "Text"
//! required = true
//! ```

use indexmap::IndexMap;
use listforge_core::list::ListConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error as ThisError;
use tracing::debug;

pub const DEFAULT_ADMIN_PATH: &str = "/admin";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

///
/// Config
///

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// URL prefix the admin UI is mounted under.
    pub admin_path: String,

    /// Per-request budget for store calls; unset means no timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,

    /// Lists in declaration order.
    pub lists: IndexMap<String, ListConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_path: DEFAULT_ADMIN_PATH.to_string(),
            request_timeout_ms: None,
            lists: IndexMap::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        debug!(lists = config.lists.len(), "config parsed");

        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const SAMPLE: &str = r#"
        admin_path = "/manage"
        request_timeout_ms = 5000

        [lists.User]
        label = "People"
        schema_options = { timestamps = true }

        [lists.User.fields.name]
        type = "Text"
        required = true
        index = true

        [lists.User.fields.password]
        type = "Password"
        min_length = 10

        [lists.Post.fields.title]
        type = "Text"
        label = "Headline"
    "#;

    #[test]
    fn parses_lists_in_order() {
        let config = Config::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.admin_path, "/manage");
        assert_eq!(config.request_timeout(), Some(Duration::from_millis(5000)));
        assert_eq!(config.lists.keys().collect::<Vec<_>>(), vec!["User", "Post"]);

        let user = &config.lists["User"];
        assert_eq!(user.names.label.as_deref(), Some("People"));
        assert!(user.schema_options.timestamps);
        assert!(user.schema_options.strict);
        assert_eq!(user.fields.keys().collect::<Vec<_>>(), vec!["name", "password"]);
    }

    #[test]
    fn type_specific_keys_land_in_config_bag() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        let user = &config.lists["User"];

        let name = &user.fields["name"];
        assert_eq!(name.type_name, "Text");
        assert!(name.required);
        assert_eq!(name.config.get("index"), Some(&json!(true)));

        let password = &user.fields["password"];
        assert_eq!(password.config.get("min_length"), Some(&json!(10)));

        let title = &config.lists["Post"].fields["title"];
        assert_eq!(title.label.as_deref(), Some("Headline"));
        assert!(title.config.is_empty());
    }

    #[test]
    fn empty_source_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();

        assert_eq!(config.admin_path, DEFAULT_ADMIN_PATH);
        assert_eq!(config.request_timeout(), None);
        assert!(config.lists.is_empty());
    }

    #[test]
    fn field_without_type_is_a_parse_error() {
        let err = Config::from_toml_str("[lists.User.fields.name]\nrequired = true\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.lists.len(), 2);

        let err = Config::load(file.path().with_extension("missing")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
