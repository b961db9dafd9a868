use serde::Serialize;

use super::Expression;

/// Member access, either `object.property` (non-computed, property is an
/// identifier) or `object[expr]` (computed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberAccess {
    pub object: Expression,
    pub property: Expression,
    pub computed: bool,
}
