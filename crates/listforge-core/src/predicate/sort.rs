use crate::{
    error::RequestError,
    predicate::{FieldPresence, Row, eval::compare_order},
};
use derive_more::{Deref, IntoIterator};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

///
/// SortKey
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

///
/// SortSpec
///
/// Parsed from the `sort` argument: whitespace- or comma-separated field
/// names, `-` prefix for descending, optional `+` for ascending.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct SortSpec(Vec<SortKey>);

impl SortSpec {
    pub fn parse(input: &str) -> Result<Self, RequestError> {
        let mut keys = Vec::new();

        for token in input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let (direction, field) = match token.as_bytes()[0] {
                b'-' => (SortDirection::Desc, &token[1..]),
                b'+' => (SortDirection::Asc, &token[1..]),
                _ => (SortDirection::Asc, token),
            };
            if field.is_empty() {
                return Err(RequestError::invalid_argument(
                    "sort",
                    format!("'{token}' does not name a field"),
                ));
            }
            keys.push(SortKey {
                field: field.to_string(),
                direction,
            });
        }

        Ok(Self(keys))
    }

    /// Compare two rows by every key in turn. Missing sorts first.
    pub fn compare<R: Row + ?Sized>(&self, a: &R, b: &R) -> Ordering {
        for key in &self.0 {
            let ord = compare_presence(a.field(&key.field), b.field(&key.field));
            let ord = match key.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }

        Ordering::Equal
    }
}

fn compare_presence(a: FieldPresence<'_>, b: FieldPresence<'_>) -> Ordering {
    match (a, b) {
        (FieldPresence::Missing, FieldPresence::Missing) => Ordering::Equal,
        (FieldPresence::Missing, _) => Ordering::Less,
        (_, FieldPresence::Missing) => Ordering::Greater,
        (FieldPresence::Present(a), FieldPresence::Present(b)) => {
            compare_order(a, b).unwrap_or_else(|| family_rank(a).cmp(&family_rank(b)))
        }
    }
}

// Cross-family order: null < bool < number < string < array < object.
const fn family_rank(value: &JsonValue) -> u8 {
    match value {
        JsonValue::Null => 0,
        JsonValue::Bool(_) => 1,
        JsonValue::Number(_) => 2,
        JsonValue::String(_) => 3,
        JsonValue::Array(_) => 4,
        JsonValue::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_directions() {
        let spec = SortSpec::parse("name -age,+email").unwrap();

        assert_eq!(spec.len(), 3);
        assert_eq!(spec[0].direction, SortDirection::Asc);
        assert_eq!(spec[1].field, "age");
        assert_eq!(spec[1].direction, SortDirection::Desc);
        assert_eq!(spec[2].field, "email");
    }

    #[test]
    fn empty_input_is_empty_spec() {
        assert!(SortSpec::parse("  ").unwrap().is_empty());
    }

    #[test]
    fn bare_sign_is_rejected() {
        let err = SortSpec::parse("name -").unwrap_err();

        assert!(matches!(err, RequestError::InvalidArgument { ref name, .. } if name == "sort"));
    }
}
