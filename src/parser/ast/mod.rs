pub mod expression;
pub mod statement;

pub use self::expression::*;
pub use self::statement::*;

use serde::Serialize;

/// Wrapper for everything a parsing function can produce. Combinator
/// results are sequences of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AstNode {
    Expression(Expression),
    Statement(Statement),
    Id(Id),
    Shorthand(Shorthand),
}

/// A whole source fragment: the statements of a file or of one REPL line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub body: Vec<Statement>,
}
