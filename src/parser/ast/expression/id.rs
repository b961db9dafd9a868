use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{ast::AstNode, FromTokens, ParseError, ParseState},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Id(pub String);

impl FromTokens<Token> for Id {
    fn parse(tokens: &mut ParseState<Token>) -> Result<AstNode, ParseError> {
        let Some(next) = tokens.next() else {
            return Err(ParseError::eof("identifier"));
        };

        match next {
            Token::Identifier { value, .. } => Ok(Id(value).into()),
            other => Err(ParseError {
                message: "expecting 'Identifier'".into(),
                found: Some(other.lexeme()),
                position: Some(other.position()),
                echo: None,
            }),
        }
    }
}

impl From<Id> for AstNode {
    fn from(value: Id) -> Self {
        AstNode::Id(value)
    }
}
