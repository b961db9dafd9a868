use serde::Serialize;

use crate::parser::{
    ast::{AstNode, Expression},
    combinators::Comb,
    ParseError, ParseState,
};
use crate::lexer::Token;

use super::{parse_block, Statement};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhileLoop {
    pub condition: Expression,
    pub body: Vec<Statement>,
}

impl WhileLoop {
    pub(crate) fn parse(tokens: &mut ParseState<Token>) -> Result<WhileLoop, ParseError> {
        let matcher = Comb::WHILE_KEYWORD >> Comb::LPAREN >> Comb::EXPR >> Comb::RPAREN;
        let result = matcher.parse(tokens)?;
        let [AstNode::Expression(condition)] = result.as_slice() else {
            unreachable!()
        };

        let body = parse_block(tokens)?;

        Ok(WhileLoop {
            condition: condition.clone(),
            body,
        })
    }
}
