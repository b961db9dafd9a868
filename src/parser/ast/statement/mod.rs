mod array_decl;
mod for_loop;
mod function;
mod if_statement;
mod map_decl;
mod shorthand;
mod using;
mod var_decl;
mod while_loop;

pub use self::array_decl::*;
pub use self::for_loop::*;
pub use self::function::*;
pub use self::if_statement::*;
pub use self::map_decl::*;
pub use self::shorthand::*;
pub use self::using::*;
pub use self::var_decl::*;
pub use self::while_loop::*;

use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{combinators::Comb, FromTokens, ParseError, ParseState},
};

use super::{AstNode, Expression};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    VarDecl(VarDecl),
    ArrayDecl(ArrayDecl),
    MapDecl(MapDecl),
    FnDecl(FnDecl),
    Using(UsingDecl),
    If(If),
    While(WhileLoop),
    For(ForLoop),
    Shorthand(Shorthand),
    Expression(Expression),
}

impl FromTokens<Token> for Statement {
    fn parse(tokens: &mut ParseState<Token>) -> Result<AstNode, ParseError> {
        let Some(next) = tokens.peek() else {
            return Err(ParseError::eof("statement"));
        };

        match next {
            Token::Let { .. } | Token::Const { .. } => {
                Ok(AstNode::Statement(parse_declaration(tokens)?))
            }
            Token::Fn { .. } => Ok(Statement::FnDecl(FnDecl::parse(tokens)?).into()),
            Token::If { .. } => Ok(Statement::If(If::parse(tokens)?).into()),
            Token::While { .. } => Ok(Statement::While(WhileLoop::parse(tokens)?).into()),
            Token::For { .. } => Ok(Statement::For(ForLoop::parse(tokens)?).into()),
            Token::Using { .. } => Ok(Statement::Using(UsingDecl::parse(tokens)?).into()),
            _ => {
                // A shorthand statement or an expression statement, both
                // terminated by `;`. Shorthand is tried first since its
                // prefix (an identifier) also starts an expression.
                let matcher = (Comb::SHORTHAND | Comb::EXPR) >> Comb::SEMI;
                let result = matcher.parse(tokens)?;

                match result.as_slice() {
                    [AstNode::Shorthand(shorthand)] => {
                        Ok(Statement::Shorthand(shorthand.clone()).into())
                    }
                    [AstNode::Expression(expression)] => {
                        Ok(Statement::Expression(expression.clone()).into())
                    }
                    _ => unreachable!(),
                }
            }
        }
    }
}

/// Parses a `{ … }` body of statements.
pub(crate) fn parse_block(tokens: &mut ParseState<Token>) -> Result<Vec<Statement>, ParseError> {
    Comb::LBRACE.parse(tokens)?;

    let mut body = vec![];

    loop {
        match tokens.peek() {
            Some(Token::CloseBrace { .. }) => break,
            Some(Token::Eof { .. }) | None => return Err(ParseError::eof("block")),
            _ => {}
        }

        let result = Comb::STATEMENT.parse(tokens)?;
        let [AstNode::Statement(statement)] = result.as_slice() else {
            unreachable!()
        };
        body.push(statement.clone());
    }

    Comb::RBRACE.parse(tokens)?;

    Ok(body)
}

impl From<Statement> for AstNode {
    fn from(value: Statement) -> Self {
        AstNode::Statement(value)
    }
}
