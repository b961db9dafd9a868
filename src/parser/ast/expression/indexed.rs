use serde::Serialize;

use super::Expression;

/// An array or map access on a named binding: `arr[0]`, `map["key"]`. The
/// index can be any expression; which container it applies to is decided
/// at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedIdentifier {
    pub symbol: String,
    pub index: Box<Expression>,
}
