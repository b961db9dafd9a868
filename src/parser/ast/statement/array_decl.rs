use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{
        ast::{AstNode, Expression},
        combinators::Comb,
        ParseError, ParseState,
    },
};

/// `let arr = [e1, e2, …];`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrayDecl {
    pub name: String,
    pub elements: Vec<Expression>,
    pub constant: bool,
}

impl ArrayDecl {
    /// Parses the `[e1, e2, …];` tail of an array declaration. The
    /// identifier and `=` have already been consumed.
    pub(crate) fn parse(
        tokens: &mut ParseState<Token>,
        name: String,
        constant: bool,
    ) -> Result<ArrayDecl, ParseError> {
        Comb::LBRACKET.parse(tokens)?;

        let mut elements = vec![];

        loop {
            match tokens.peek() {
                Some(Token::CloseBracket { .. }) => break,
                Some(Token::Eof { .. }) | None => return Err(ParseError::eof("array declaration")),
                _ => {}
            }

            let result = Comb::EXPR.parse(tokens)?;
            let [AstNode::Expression(value)] = result.as_slice() else {
                unreachable!()
            };
            elements.push(value.clone());

            if matches!(tokens.peek(), Some(Token::CloseBracket { .. })) {
                break;
            }

            Comb::COMMA.parse(tokens)?;
        }

        let matcher = Comb::RBRACKET >> Comb::SEMI;
        matcher.parse(tokens)?;

        Ok(ArrayDecl {
            name,
            elements,
            constant,
        })
    }
}
