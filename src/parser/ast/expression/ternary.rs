use serde::Serialize;

use super::Expression;

/// `condition ? left : right`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ternary {
    pub condition: Expression,
    pub left: Expression,
    pub right: Expression,
}
