pub mod inflect;

use serde::{Deserialize, Serialize};

///
/// NameOverrides
///
/// Explicit naming from list configuration. Any `None` entry is derived
/// from the list key.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct NameOverrides {
    pub label: Option<String>,
    pub singular: Option<String>,
    pub plural: Option<String>,
    pub path: Option<String>,
    pub item_query_name: Option<String>,
    pub list_query_name: Option<String>,
    pub create_mutation_name: Option<String>,
    pub update_mutation_name: Option<String>,
    pub delete_mutation_name: Option<String>,
}

///
/// ListNames
///
/// Every human- and API-facing name of a list, derived once from its key.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNames {
    pub label: String,
    pub singular: String,
    pub plural: String,
    pub path: String,
    pub list_query_name: String,
    pub item_query_name: String,
    pub create_mutation_name: String,
    pub update_mutation_name: String,
    pub delete_mutation_name: String,
}

impl ListNames {
    /// Derive names for `key`, honouring each override individually.
    #[must_use]
    pub fn derive(key: &str, overrides: &NameOverrides) -> Self {
        let label = overrides
            .label
            .clone()
            .unwrap_or_else(|| inflect::pluralize(&inflect::titleize(key)));
        let singular = overrides
            .singular
            .clone()
            .unwrap_or_else(|| inflect::singularize(&label));
        let plural = overrides
            .plural
            .clone()
            .unwrap_or_else(|| inflect::pluralize(&label));
        let path = overrides
            .path
            .clone()
            .unwrap_or_else(|| inflect::dasherize(&plural));

        let item = inflect::camelize_upper(&singular);
        let item_query_name = overrides
            .item_query_name
            .clone()
            .unwrap_or_else(|| inflect::camelize_lower(&singular));
        let list_query_name = overrides
            .list_query_name
            .clone()
            .unwrap_or_else(|| format!("all{}", inflect::camelize_upper(&plural)));
        let create_mutation_name = overrides
            .create_mutation_name
            .clone()
            .unwrap_or_else(|| format!("create{item}"));
        let update_mutation_name = overrides
            .update_mutation_name
            .clone()
            .unwrap_or_else(|| format!("update{item}"));
        let delete_mutation_name = overrides
            .delete_mutation_name
            .clone()
            .unwrap_or_else(|| format!("delete{item}"));

        Self {
            label,
            singular,
            plural,
            path,
            list_query_name,
            item_query_name,
            create_mutation_name,
            update_mutation_name,
            delete_mutation_name,
        }
    }

    /// Query operation names, list query first.
    #[must_use]
    pub fn query_names(&self) -> [&str; 2] {
        [&self.list_query_name, &self.item_query_name]
    }

    /// Mutation operation names in SDL order.
    #[must_use]
    pub fn mutation_names(&self) -> [&str; 3] {
        [
            &self.delete_mutation_name,
            &self.update_mutation_name,
            &self.create_mutation_name,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn user_key_derives_expected_names() {
        let names = ListNames::derive("User", &NameOverrides::default());

        assert_eq!(names.label, "Users");
        assert_eq!(names.singular, "User");
        assert_eq!(names.plural, "Users");
        assert_eq!(names.path, "users");
        assert_eq!(names.list_query_name, "allUsers");
        assert_eq!(names.item_query_name, "user");
        assert_eq!(names.create_mutation_name, "createUser");
        assert_eq!(names.update_mutation_name, "updateUser");
        assert_eq!(names.delete_mutation_name, "deleteUser");
    }

    #[test]
    fn multi_word_key_derives_dashed_path() {
        let names = ListNames::derive("BlogPost", &NameOverrides::default());

        assert_eq!(names.label, "Blog Posts");
        assert_eq!(names.singular, "Blog Post");
        assert_eq!(names.path, "blog-posts");
        assert_eq!(names.list_query_name, "allBlogPosts");
        assert_eq!(names.item_query_name, "blogPost");
        assert_eq!(names.delete_mutation_name, "deleteBlogPost");
    }

    #[test]
    fn keys_ending_in_s_keep_their_singular() {
        for (key, label, item) in [
            ("Status", "Statuses", "status"),
            ("Campus", "Campuses", "campus"),
            ("Virus", "Viri", "virus"),
            ("Gas", "Gases", "gas"),
            ("Atlas", "Atlases", "atlas"),
            ("Analysis", "Analyses", "analysis"),
        ] {
            let names = ListNames::derive(key, &NameOverrides::default());

            assert_eq!(names.label, label, "{key}");
            assert_eq!(names.singular, key, "{key}");
            assert_eq!(names.item_query_name, item, "{key}");
            assert_eq!(names.create_mutation_name, format!("create{key}"));
            assert_eq!(names.delete_mutation_name, format!("delete{key}"));
        }
    }

    #[test]
    fn overrides_apply_individually() {
        let overrides = NameOverrides {
            label: Some("People".into()),
            path: Some("team".into()),
            list_query_name: Some("everyone".into()),
            ..NameOverrides::default()
        };
        let names = ListNames::derive("Person", &overrides);

        assert_eq!(names.singular, "Person");
        assert_eq!(names.plural, "People");
        assert_eq!(names.path, "team");
        assert_eq!(names.list_query_name, "everyone");
        assert_eq!(names.item_query_name, "person");
        assert_eq!(names.create_mutation_name, "createPerson");
    }

    #[test]
    fn serializes_camel_case() {
        let names = ListNames::derive("User", &NameOverrides::default());
        let json = serde_json::to_value(&names).unwrap();

        assert_eq!(json["listQueryName"], "allUsers");
        assert_eq!(json["deleteMutationName"], "deleteUser");
    }

    proptest! {
        #[test]
        fn derivation_is_deterministic(key in "[A-Z][a-z]{1,8}([A-Z][a-z]{1,8})?") {
            let a = ListNames::derive(&key, &NameOverrides::default());
            let b = ListNames::derive(&key, &NameOverrides::default());

            prop_assert_eq!(a, b);
        }

        #[test]
        fn derived_operation_names_share_item_suffix(key in "[A-Z][a-z]{1,8}") {
            let names = ListNames::derive(&key, &NameOverrides::default());
            let item = names.create_mutation_name.trim_start_matches("create").to_string();

            prop_assert_eq!(names.update_mutation_name, format!("update{item}"));
            prop_assert_eq!(names.delete_mutation_name, format!("delete{item}"));
        }
    }
}
