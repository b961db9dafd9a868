use serde::Serialize;

use crate::lexer::BinaryOp;

use super::Expression;

/// A binary expression. Arithmetic and comparison share this node; the
/// operator decides which it is at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryExpression {
    pub left: Expression,
    pub right: Expression,
    pub op: BinaryOp,
}
