//! Admin metadata projection shared by the server and the admin client.

use crate::naming::ListNames;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

///
/// AdminFieldMeta
///
/// The four base keys are always serialized, `defaultValue` as `null`
/// when unset. Field types add their own keys through `extensions`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminFieldMeta {
    pub label: String,
    pub path: String,

    #[serde(rename = "type")]
    pub type_name: String,

    pub default_value: Option<JsonValue>,

    #[serde(flatten)]
    pub extensions: Map<String, JsonValue>,
}

impl AdminFieldMeta {
    #[must_use]
    pub fn new(label: &str, path: &str, type_name: &str, default_value: Option<JsonValue>) -> Self {
        Self {
            label: label.to_string(),
            path: path.to_string(),
            type_name: type_name.to_string(),
            default_value,
            extensions: Map::new(),
        }
    }

    #[must_use]
    pub fn extend(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }
}

/// View references by role, e.g. `Field` → `@listforge/fields/types/Text/views/Field`.
pub type FieldViews = IndexMap<String, String>;

///
/// ListAdminMeta
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAdminMeta {
    pub key: String,

    #[serde(flatten)]
    pub names: ListNames,

    pub fields: Vec<AdminFieldMeta>,

    /// Field path → client controller reference.
    pub controllers: IndexMap<String, String>,

    /// Field path → view role → view reference.
    pub views: IndexMap<String, FieldViews>,
}

///
/// AdminMetaSnapshot
///
/// Everything the admin client needs, produced once per page context.
/// Keys other than `lists` / `listKeys` are carried through untouched.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMetaSnapshot {
    pub lists: IndexMap<String, ListAdminMeta>,

    #[serde(default)]
    pub list_keys: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl AdminMetaSnapshot {
    #[must_use]
    pub fn new(lists: impl IntoIterator<Item = ListAdminMeta>) -> Self {
        let lists: IndexMap<String, ListAdminMeta> =
            lists.into_iter().map(|l| (l.key.clone(), l)).collect();
        let list_keys = lists.keys().cloned().collect();

        Self {
            lists,
            list_keys,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::NameOverrides;
    use serde_json::json;

    fn list_meta(key: &str) -> ListAdminMeta {
        ListAdminMeta {
            key: key.to_string(),
            names: ListNames::derive(key, &NameOverrides::default()),
            fields: vec![
                AdminFieldMeta::new("Name", "name", "Text", None),
                AdminFieldMeta::new("Password", "password", "Password", None)
                    .extend("minLength", 8),
            ],
            controllers: IndexMap::from([("name".to_string(), "text/Controller".to_string())]),
            views: IndexMap::new(),
        }
    }

    #[test]
    fn list_meta_flattens_names() {
        let json = serde_json::to_value(list_meta("User")).unwrap();

        assert_eq!(json["key"], "User");
        assert_eq!(json["path"], "users");
        assert_eq!(json["itemQueryName"], "user");
        assert_eq!(json["fields"][1]["minLength"], 8);
        assert_eq!(json["fields"][0]["defaultValue"], JsonValue::Null);
    }

    #[test]
    fn snapshot_lists_keys_in_order_and_keeps_extra() {
        let snapshot =
            AdminMetaSnapshot::new([list_meta("User"), list_meta("Post")]).with_extra("adminPath", "/admin");
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["listKeys"], json!(["User", "Post"]));
        assert_eq!(json["adminPath"], "/admin");

        let back: AdminMetaSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }
}
