use serde::Serialize;

use super::Expression;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Call {
    pub callee: Expression,
    pub args: Vec<Expression>,
}
