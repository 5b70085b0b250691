use derive_more::Display;
use serde_json::Value as JsonValue;

///
/// Predicate AST
///
/// Pure, schema-agnostic representation of list filters. Fields produce
/// `FieldCondition`s; the list compiler wraps them onto field paths and
/// composes the result with `Predicate::conjoin`.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    In,
    Contains,
    StartsWith,
    EndsWith,
}

impl CompareOp {
    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Contains | Self::StartsWith | Self::EndsWith)
    }
}

///
/// TextMode
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TextMode {
    #[default]
    Cs, // case-sensitive
    Ci, // case-insensitive
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparePredicate {
    pub field: String,
    pub op: CompareOp,
    pub value: JsonValue,
    pub mode: TextMode,
}

impl ComparePredicate {
    #[must_use]
    pub fn new(field: impl Into<String>, op: CompareOp, value: JsonValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
            mode: TextMode::Cs,
        }
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: TextMode) -> Self {
        self.mode = mode;
        self
    }
}

///
/// Predicate
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Predicate {
    True,
    And(Vec<Self>),
    Compare(ComparePredicate),
}

impl Predicate {
    /// Combine conditions: none matches everything, one is used as-is,
    /// two or more are conjoined.
    #[must_use]
    pub fn conjoin(mut conditions: Vec<Self>) -> Self {
        match conditions.len() {
            0 => Self::True,
            1 => conditions.remove(0),
            _ => Self::And(conditions),
        }
    }

    #[must_use]
    pub fn eq(field: impl Into<String>, value: JsonValue) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Eq, value))
    }

    #[must_use]
    pub fn ne(field: impl Into<String>, value: JsonValue) -> Self {
        Self::Compare(ComparePredicate::new(field, CompareOp::Ne, value))
    }

    /// Case-insensitive prefix match, the input taken literally.
    #[must_use]
    pub fn starts_with_ci(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::Compare(
            ComparePredicate::new(field, CompareOp::StartsWith, JsonValue::String(prefix.into()))
                .with_mode(TextMode::Ci),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn conjoin_zero_matches_all() {
        assert_eq!(Predicate::conjoin(Vec::new()), Predicate::True);
    }

    #[test]
    fn conjoin_one_is_unwrapped() {
        let only = Predicate::eq("name", json!("a"));

        assert_eq!(Predicate::conjoin(vec![only.clone()]), only);
    }

    #[test]
    fn conjoin_many_is_and() {
        let a = Predicate::eq("name", json!("a"));
        let b = Predicate::ne("age", json!(3));

        assert_eq!(
            Predicate::conjoin(vec![a.clone(), b.clone()]),
            Predicate::And(vec![a, b])
        );
    }

    #[test]
    fn text_operators_are_flagged() {
        assert!(CompareOp::Contains.is_text());
        assert!(!CompareOp::In.is_text());
    }
}
