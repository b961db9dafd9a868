use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{
        ast::{AstNode, Expression, Id},
        combinators::Comb,
        ParseError, ParseState,
    },
};

use super::{ArrayDecl, MapDecl, Statement};

/// A `let` or `const` declaration of a single value. A missing initializer
/// (`let x;`) binds null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VarDecl {
    pub name: String,
    pub value: Option<Expression>,
    pub constant: bool,
}

/// Parses any of the declaration forms behind `let`/`const`:
///
/// - `let x;` / `let x = expr;`
/// - `let x = [e1, e2];` (array declaration)
/// - `let x = { key: value, };` (map declaration)
pub(crate) fn parse_declaration(tokens: &mut ParseState<Token>) -> Result<Statement, ParseError> {
    let keyword = tokens.next();
    let constant = matches!(keyword, Some(Token::Const { .. }));

    let result = Comb::ID.parse(tokens)?;
    let [AstNode::Id(Id(name))] = result.as_slice() else {
        unreachable!()
    };

    if matches!(tokens.peek(), Some(Token::Eol { .. })) {
        tokens.next();

        if constant {
            return Err(ParseError::new(
                "no value provided for const decleration",
                None,
            ));
        }

        return Ok(Statement::VarDecl(VarDecl {
            name: name.clone(),
            value: None,
            constant,
        }));
    }

    Comb::EQ.parse(tokens)?;

    match tokens.peek() {
        Some(Token::OpenBracket { .. }) => {
            Ok(Statement::ArrayDecl(ArrayDecl::parse(tokens, name.clone(), constant)?))
        }
        Some(Token::OpenBrace { .. }) => {
            Ok(Statement::MapDecl(MapDecl::parse(tokens, name.clone(), constant)?))
        }
        _ => {
            let matcher = Comb::EXPR >> Comb::SEMI;
            let result = matcher.parse(tokens)?;
            let [AstNode::Expression(value)] = result.as_slice() else {
                unreachable!()
            };

            Ok(Statement::VarDecl(VarDecl {
                name: name.clone(),
                value: Some(value.clone()),
                constant,
            }))
        }
    }
}
