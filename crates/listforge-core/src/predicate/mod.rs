mod ast;
mod eval;
mod sort;

pub use ast::{CompareOp, ComparePredicate, Predicate, TextMode};
pub use eval::{FieldPresence, Row, eval};
pub use sort::{SortDirection, SortKey, SortSpec};
