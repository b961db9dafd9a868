use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{
        ast::{AstNode, Id},
        combinators::Comb,
        ParseError, ParseState,
    },
};

use super::{parse_block, Statement};

/// `fn name(p1, p2) { … }`. There is no `return`; a call evaluates to the
/// value of the last statement of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FnDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Statement>,
}

impl FnDecl {
    pub(crate) fn parse(tokens: &mut ParseState<Token>) -> Result<FnDecl, ParseError> {
        let matcher = Comb::FN_KEYWORD >> Comb::ID >> Comb::LPAREN;
        let result = matcher.parse(tokens)?;
        let [AstNode::Id(Id(name))] = result.as_slice() else {
            unreachable!()
        };

        let mut params = vec![];

        if !matches!(tokens.peek(), Some(Token::CloseParen { .. })) {
            loop {
                let result = Comb::ID.parse(tokens)?;
                let [AstNode::Id(Id(param))] = result.as_slice() else {
                    unreachable!()
                };
                params.push(param.clone());

                if matches!(tokens.peek(), Some(Token::Comma { .. })) {
                    tokens.next();
                    continue;
                }
                break;
            }
        }

        Comb::RPAREN.parse(tokens)?;

        let body = parse_block(tokens)?;

        Ok(FnDecl {
            name: name.clone(),
            params,
            body,
        })
    }
}
