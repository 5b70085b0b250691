use crate::predicate::{CompareOp, ComparePredicate, Predicate, TextMode};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;

///
/// FieldPresence
///
/// Result of attempting to read a field from a row during predicate
/// evaluation. This distinguishes between a missing field and a
/// present field whose value may be `null`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldPresence<'a> {
    /// Field exists and has a value (including `null`).
    Present(&'a JsonValue),
    /// Field is not present on the row.
    Missing,
}

///
/// Row
///
/// Abstraction over a row-like value that can expose fields by name.
/// This decouples predicate evaluation from the concrete document type.
///

pub trait Row {
    fn field(&self, name: &str) -> FieldPresence<'_>;
}

// Evaluate a field predicate only when the field is present.
fn on_present<R: Row + ?Sized>(row: &R, field: &str, f: impl FnOnce(&JsonValue) -> bool) -> bool {
    match row.field(field) {
        FieldPresence::Present(value) => f(value),
        FieldPresence::Missing => false,
    }
}

///
/// Evaluate a predicate against a single row.
///
/// Any comparison that is not defined for the operand types evaluates to
/// `false`.
///
#[must_use]
pub fn eval<R: Row + ?Sized>(row: &R, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::True => true,
        Predicate::And(children) => children.iter().all(|child| eval(row, child)),
        Predicate::Compare(cmp) => eval_compare(row, cmp),
    }
}

fn eval_compare<R: Row + ?Sized>(row: &R, cmp: &ComparePredicate) -> bool {
    let ComparePredicate {
        field,
        op,
        value,
        mode,
    } = cmp;

    // Ne also matches documents that never set the field.
    if *op == CompareOp::Ne && matches!(row.field(field), FieldPresence::Missing) {
        return true;
    }

    on_present(row, field, |actual| match op {
        CompareOp::Eq => compare_eq(actual, value, *mode),
        CompareOp::Ne => !compare_eq(actual, value, *mode),

        CompareOp::Lt => compare_order(actual, value).is_some_and(Ordering::is_lt),
        CompareOp::Lte => compare_order(actual, value).is_some_and(Ordering::is_le),
        CompareOp::Gt => compare_order(actual, value).is_some_and(Ordering::is_gt),
        CompareOp::Gte => compare_order(actual, value).is_some_and(Ordering::is_ge),

        CompareOp::In => in_list(actual, value, *mode).unwrap_or(false),

        CompareOp::Contains | CompareOp::StartsWith | CompareOp::EndsWith => {
            compare_text(actual, value, *op, *mode).unwrap_or(false)
        }
    })
}

fn compare_eq(actual: &JsonValue, expected: &JsonValue, mode: TextMode) -> bool {
    match (actual, expected, mode) {
        (JsonValue::String(a), JsonValue::String(b), TextMode::Ci) => {
            a.to_lowercase() == b.to_lowercase()
        }
        (JsonValue::Number(a), JsonValue::Number(b), _) => a.as_f64() == b.as_f64(),
        _ => actual == expected,
    }
}

/// Total order over comparable JSON scalars of the same family.
pub(crate) fn compare_order(actual: &JsonValue, expected: &JsonValue) -> Option<Ordering> {
    match (actual, expected) {
        (JsonValue::Number(a), JsonValue::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (JsonValue::String(a), JsonValue::String(b)) => Some(a.cmp(b)),
        (JsonValue::Bool(a), JsonValue::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

fn in_list(actual: &JsonValue, list: &JsonValue, mode: TextMode) -> Option<bool> {
    let JsonValue::Array(items) = list else {
        return None;
    };

    Some(items.iter().any(|item| compare_eq(actual, item, mode)))
}

fn compare_text(actual: &JsonValue, needle: &JsonValue, op: CompareOp, mode: TextMode) -> Option<bool> {
    let (JsonValue::String(actual), JsonValue::String(needle)) = (actual, needle) else {
        return None;
    };

    let (actual, needle) = match mode {
        TextMode::Cs => (actual.clone(), needle.clone()),
        TextMode::Ci => (actual.to_lowercase(), needle.to_lowercase()),
    };

    match op {
        CompareOp::Contains => Some(actual.contains(&needle)),
        CompareOp::StartsWith => Some(actual.starts_with(&needle)),
        CompareOp::EndsWith => Some(actual.ends_with(&needle)),
        _ => None,
    }
}
