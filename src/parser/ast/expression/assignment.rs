use serde::Serialize;

use super::Expression;

/// `target = value`. The target is validated at evaluation time: only
/// plain identifiers may be assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub target: Expression,
    pub value: Expression,
}
