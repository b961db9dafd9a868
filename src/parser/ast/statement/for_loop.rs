use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{
        ast::{AstNode, BinaryExpression, Expression, Shorthand},
        combinators::Comb,
        ParseError, ParseState,
    },
};

use super::{parse_block, parse_declaration, Statement, VarDecl};

/// `for (init; cond; step;) { … }` — the init is a variable declaration,
/// the condition a binary expression, the step a shorthand operator
/// statement. Note the trailing `;` after the step clause; this grammar
/// requires it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForLoop {
    pub init: VarDecl,
    pub condition: BinaryExpression,
    pub step: Shorthand,
    pub body: Vec<Statement>,
}

impl ForLoop {
    pub(crate) fn parse(tokens: &mut ParseState<Token>) -> Result<ForLoop, ParseError> {
        let matcher = Comb::FOR_KEYWORD >> Comb::LPAREN;
        matcher.parse(tokens)?;

        // The init clause, including its terminating `;`.
        let init = match parse_declaration(tokens)? {
            Statement::VarDecl(init) => init,
            _ => {
                return Err(ParseError::new(
                    "invalid assigment statement provided in loop header",
                    None,
                ))
            }
        };

        let result = Comb::EXPR.parse(tokens)?;
        let [AstNode::Expression(condition)] = result.as_slice() else {
            unreachable!()
        };
        let Expression::Binary(condition) = condition else {
            return Err(ParseError::new("invalid condition in loop", None));
        };

        Comb::SEMI.parse(tokens)?;

        let matcher = Comb::SHORTHAND >> Comb::SEMI >> Comb::RPAREN;
        let result = matcher.parse(tokens)?;
        let [AstNode::Shorthand(step)] = result.as_slice() else {
            unreachable!()
        };

        let body = parse_block(tokens)?;

        Ok(ForLoop {
            init,
            condition: (**condition).clone(),
            step: step.clone(),
            body,
        })
    }
}
