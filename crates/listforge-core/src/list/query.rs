use super::List;
use crate::{
    error::RequestError,
    predicate::{Predicate, SortSpec},
    store::Query,
};
use serde_json::{Map, Value as JsonValue};

/// Document path matched by the list query's `search` argument.
pub const SEARCH_FIELD: &str = "name";

impl List {
    /// Compose the store query for the list query's arguments.
    ///
    /// Every field's conditions are bound to its path; a non-empty
    /// `search` adds a case-insensitive prefix match on [`SEARCH_FIELD`].
    pub fn build_items_query(&self, args: &Map<String, JsonValue>) -> Result<Query, RequestError> {
        let mut conditions = Vec::new();
        for field in &self.fields {
            let path = field.path();
            conditions.extend(
                field
                    .query_conditions(args)?
                    .into_iter()
                    .map(|condition| condition.on(path)),
            );
        }

        if let Some(search) = string_arg(args, "search")? {
            conditions.push(Predicate::starts_with_ci(SEARCH_FIELD, search));
        }

        let sort = match string_arg(args, "sort")? {
            Some(sort) => SortSpec::parse(sort)?,
            None => SortSpec::default(),
        };

        Ok(Query::new(Predicate::conjoin(conditions)).with_sort(sort))
    }
}

// absent, null and empty strings all mean "not given"
fn string_arg<'a>(
    args: &'a Map<String, JsonValue>,
    name: &str,
) -> Result<Option<&'a str>, RequestError> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) if s.is_empty() => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(other) => Err(RequestError::invalid_argument(
            name,
            format!("expected a string, got {other}"),
        )),
    }
}
