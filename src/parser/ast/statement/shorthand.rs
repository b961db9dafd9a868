use serde::Serialize;

use crate::{
    lexer::{ShorthandOp, Token},
    parser::{
        ast::{AstNode, Expression, Id},
        combinators::Comb,
        FromTokens, ParseError, ParseState,
    },
};

/// A shorthand operator statement on a named numeric binding: `x++`,
/// `x--`, or a compound assignment like `x += 1`. The simple forms carry
/// no right-hand side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shorthand {
    pub target: String,
    pub op: ShorthandOp,
    pub value: Option<Expression>,
}

impl FromTokens<Token> for Shorthand {
    fn parse(tokens: &mut ParseState<Token>) -> Result<AstNode, ParseError> {
        let result = Comb::ID.parse(tokens)?;
        let [AstNode::Id(Id(target))] = result.as_slice() else {
            unreachable!()
        };

        let Some(next) = tokens.next() else {
            return Err(ParseError::eof("shorthand operator"));
        };
        let Token::ShorthandOperator { op, .. } = next else {
            return Err(ParseError {
                message: "expecting 'ShorthandOperator'".into(),
                found: Some(next.lexeme()),
                position: Some(next.position()),
                echo: None,
            });
        };

        let value = if op.is_simple() {
            None
        } else {
            let result = Comb::EXPR.parse(tokens)?;
            let [AstNode::Expression(value)] = result.as_slice() else {
                unreachable!()
            };
            Some(value.clone())
        };

        Ok(Shorthand {
            target: target.clone(),
            op,
            value,
        }
        .into())
    }
}

impl From<Shorthand> for AstNode {
    fn from(value: Shorthand) -> Self {
        AstNode::Shorthand(value)
    }
}
