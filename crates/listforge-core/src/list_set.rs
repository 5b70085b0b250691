use crate::{
    admin::AdminMetaSnapshot,
    api::Operation,
    error::{CompileError, ErrorTree},
    field::FieldTypeRegistry,
    list::{CompileContext, List, ListConfig, sdl},
    store::Store,
};
use indexmap::IndexMap;
use std::{collections::HashMap, sync::Arc};
use tracing::info;

///
/// ListSet
///
/// Every compiled list, in declaration order, with a path index.
/// Lists compile one at a time and each sees the set compiled so far.
///

#[derive(Clone, Debug, Default)]
pub struct ListSet {
    lists: IndexMap<String, Arc<List>>,
    by_path: HashMap<String, String>,
}

impl ListSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every list, then validate names across the whole set.
    pub fn build<I, K>(
        configs: I,
        registry: &FieldTypeRegistry,
        store: &Arc<dyn Store>,
    ) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = (K, ListConfig)>,
        K: AsRef<str>,
    {
        let mut set = Self::new();

        for (key, config) in configs {
            let key = key.as_ref();
            if set.lists.contains_key(key) {
                return Err(CompileError::DuplicateList(key.to_string()));
            }

            let list = {
                let ctx = CompileContext {
                    registry,
                    store: Arc::clone(store),
                    lists: &set,
                };
                List::compile(key, &config, &ctx)?
            };
            set.insert(list);
        }

        set.validate().map_err(CompileError::Validation)?;
        info!(
            lists = set.len(),
            queries = set.query_resolvers().len(),
            mutations = set.mutation_resolvers().len(),
            "list set built"
        );

        Ok(set)
    }

    fn insert(&mut self, list: List) {
        // first path wins the index; collisions are reported by validate
        self.by_path
            .entry(list.path().to_string())
            .or_insert_with(|| list.key().to_string());
        self.lists.insert(list.key().to_string(), Arc::new(list));
    }

    /// Paths and operation names must be unique across the set.
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();
        let mut paths: HashMap<&str, &str> = HashMap::new();
        let mut operations: HashMap<&str, &str> = HashMap::new();

        for (key, list) in &self.lists {
            if let Some(other) = paths.insert(list.path(), key) {
                errs.add_for(
                    key.as_str(),
                    format!("path '{}' is already used by list '{other}'", list.path()),
                );
            }

            let names = list.names();
            for name in names.query_names().into_iter().chain(names.mutation_names()) {
                match operations.insert(name, key) {
                    Some(other) if other == key.as_str() => errs.add_for(
                        key.as_str(),
                        format!("operation '{name}' is declared twice"),
                    ),
                    Some(other) => errs.add_for(
                        key.as_str(),
                        format!("operation '{name}' is already used by list '{other}'"),
                    ),
                    None => {}
                }
            }
        }

        errs.result()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Arc<List>> {
        self.lists.get(key)
    }

    #[must_use]
    pub fn get_by_path(&self, path: &str) -> Option<&Arc<List>> {
        self.by_path.get(path).and_then(|key| self.lists.get(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<List>> {
        self.lists.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Full schema: every list's types, then `type Query` and `type Mutation`.
    #[must_use]
    pub fn schema_sdl(&self) -> String {
        let mut blocks: Vec<String> = self
            .iter()
            .map(|list| list.admin_graphql_types().to_string())
            .collect();

        let root = |name: &str, fragments: Vec<&str>| {
            let body = fragments
                .into_iter()
                .map(sdl::indent)
                .collect::<Vec<_>>()
                .join("\n");
            if body.is_empty() {
                format!("type {name} {{\n}}")
            } else {
                format!("type {name} {{\n{body}\n}}")
            }
        };

        blocks.push(root(
            "Query",
            self.iter().map(|l| l.admin_graphql_queries()).collect(),
        ));
        blocks.push(root(
            "Mutation",
            self.iter().map(|l| l.admin_graphql_mutations()).collect(),
        ));

        blocks.join("\n\n")
    }

    #[must_use]
    pub fn query_resolvers(&self) -> Vec<(String, Operation)> {
        self.iter().flat_map(List::query_resolvers).collect()
    }

    #[must_use]
    pub fn mutation_resolvers(&self) -> Vec<(String, Operation)> {
        self.iter().flat_map(List::mutation_resolvers).collect()
    }

    #[must_use]
    pub fn admin_meta(&self) -> AdminMetaSnapshot {
        AdminMetaSnapshot::new(self.iter().map(|list| list.admin_metadata()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        naming::NameOverrides,
        test_support::{registry, store, user_config, user_set},
    };

    #[test]
    fn lookup_by_key_and_path() {
        let set = user_set();

        assert_eq!(set.get("User").unwrap().key(), "User");
        assert_eq!(set.get_by_path("users").unwrap().key(), "User");
        assert!(set.get_by_path("people").is_none());
        assert_eq!(set.keys().collect::<Vec<_>>(), vec!["User"]);
    }

    #[test]
    fn later_lists_see_earlier_ones() {
        let post = ListConfig::new().configure_schema(|_, lists| {
            assert!(lists.get("User").is_some());
            Ok(())
        });

        let set = ListSet::build(
            [("User", user_config()), ("Post", post)],
            &registry(),
            &store(),
        )
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let err = ListSet::build(
            [("User", user_config()), ("User", user_config())],
            &registry(),
            &store(),
        )
        .unwrap_err();

        assert!(matches!(err, CompileError::DuplicateList(ref key) if key == "User"));
    }

    #[test]
    fn collisions_name_both_lists() {
        let member = user_config().names(NameOverrides {
            path: Some("users".into()),
            item_query_name: Some("user".into()),
            ..NameOverrides::default()
        });

        let err = ListSet::build(
            [("User", user_config()), ("Member", member)],
            &registry(),
            &store(),
        )
        .unwrap_err();

        let CompileError::Validation(tree) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let lines = tree.flatten();
        assert_eq!(
            lines,
            vec![
                "Member: path 'users' is already used by list 'User'".to_string(),
                "Member: operation 'user' is already used by list 'User'".to_string(),
            ]
        );
    }

    #[test]
    fn clash_within_one_list_is_not_blamed_on_itself() {
        let user = user_config().names(NameOverrides {
            update_mutation_name: Some("deleteUser".into()),
            ..NameOverrides::default()
        });

        let err = ListSet::build([("User", user)], &registry(), &store()).unwrap_err();

        let CompileError::Validation(tree) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(
            tree.flatten(),
            vec!["User: operation 'deleteUser' is declared twice".to_string()]
        );
    }

    #[test]
    fn field_less_list_omits_empty_inputs() {
        let set = ListSet::build([("Post", ListConfig::new())], &registry(), &store()).unwrap();
        let sdl = set.schema_sdl();

        assert!(sdl.starts_with("type Post {\n  id: String\n}\n\ntype Query {"));
        assert!(!sdl.contains("input "));
        assert!(!sdl.contains("{\n}"));
        assert!(sdl.contains("  updatePost(\n    id: String!\n  ): Post\n"));
        assert!(sdl.ends_with("  createPost: Post\n}"));
    }

    #[test]
    fn schema_sdl_wraps_root_types() {
        let sdl = user_set().schema_sdl();

        assert!(sdl.starts_with("type User {\n  id: String\n"));
        assert!(sdl.contains("type Query {\n  allUsers(\n    search: String\n"));
        assert!(sdl.contains("\n  user(id: String!): User\n}"));
        assert!(sdl.contains("type Mutation {\n  deleteUser(\n    id: String!\n  ): User\n"));
        assert!(sdl.ends_with("  createUser(\n    data: UserUpdateInput\n  ): User\n}"));
    }

    #[test]
    fn resolver_tables_cover_every_operation() {
        let set = user_set();
        let queries: Vec<_> = set.query_resolvers().into_iter().map(|(n, _)| n).collect();
        let mutations: Vec<_> = set.mutation_resolvers().into_iter().map(|(n, _)| n).collect();

        assert_eq!(queries, vec!["allUsers", "user"]);
        assert_eq!(mutations, vec!["createUser", "updateUser", "deleteUser"]);
    }

    #[test]
    fn admin_meta_snapshot_lists_keys() {
        let snapshot = user_set().admin_meta();

        assert_eq!(snapshot.list_keys, vec!["User".to_string()]);
        assert_eq!(snapshot.lists["User"].names.path, "users");
    }
}
