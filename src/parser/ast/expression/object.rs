use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{ast::AstNode, combinators::Comb, ParseError, ParseState},
};

use super::{Expression, Id};

/// One `key: value` entry of an object literal. A missing value is the
/// shorthand form `{ key }`; the key is then looked up as an identifier at
/// evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub key: String,
    pub value: Option<Expression>,
}

/// An object literal in expression position, e.g. `{ x: 10, y }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectLiteral {
    pub properties: Vec<Property>,
}

impl ObjectLiteral {
    pub fn parse(tokens: &mut ParseState<Token>) -> Result<ObjectLiteral, ParseError> {
        Comb::LBRACE.parse(tokens)?;

        let mut properties = vec![];

        loop {
            match tokens.peek() {
                Some(Token::CloseBrace { .. }) => break,
                Some(Token::Eof { .. }) | None => return Err(ParseError::eof("object literal")),
                _ => {}
            }

            let result = Comb::ID.parse(tokens)?;
            let [AstNode::Id(Id(key))] = result.as_slice() else {
                unreachable!()
            };

            match tokens.peek() {
                // Shorthand entry: `{ key, ... }`.
                Some(Token::Comma { .. }) => {
                    tokens.next();
                    properties.push(Property {
                        key: key.clone(),
                        value: None,
                    });
                    continue;
                }
                // Shorthand entry closing the literal: `{ key }`.
                Some(Token::CloseBrace { .. }) => {
                    properties.push(Property {
                        key: key.clone(),
                        value: None,
                    });
                    continue;
                }
                _ => {}
            }

            let matcher = Comb::COLON >> Comb::EXPR;
            let result = matcher.parse(tokens)?;
            let [AstNode::Expression(value)] = result.as_slice() else {
                unreachable!()
            };

            properties.push(Property {
                key: key.clone(),
                value: Some(value.clone()),
            });

            if !matches!(tokens.peek(), Some(Token::CloseBrace { .. })) {
                Comb::COMMA.parse(tokens)?;
            }
        }

        Comb::RBRACE.parse(tokens)?;

        Ok(ObjectLiteral { properties })
    }
}
