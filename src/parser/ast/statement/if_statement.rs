use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{
        ast::{AstNode, Expression},
        combinators::Comb,
        ParseError, ParseState,
    },
};

use super::{parse_block, Statement};

/// `if (cond) { … }` with an optional `else { … }`. There is no `else if`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct If {
    pub condition: Expression,
    pub body: Vec<Statement>,
    pub else_body: Option<Vec<Statement>>,
}

impl If {
    pub(crate) fn parse(tokens: &mut ParseState<Token>) -> Result<If, ParseError> {
        let matcher = Comb::IF_KEYWORD >> Comb::LPAREN >> Comb::EXPR >> Comb::RPAREN;
        let result = matcher.parse(tokens)?;
        let [AstNode::Expression(condition)] = result.as_slice() else {
            unreachable!()
        };

        let body = parse_block(tokens)?;

        let else_body = if matches!(tokens.peek(), Some(Token::Else { .. })) {
            Comb::ELSE_KEYWORD.parse(tokens)?;
            Some(parse_block(tokens)?)
        } else {
            None
        };

        Ok(If {
            condition: condition.clone(),
            body,
            else_body,
        })
    }
}
