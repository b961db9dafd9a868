use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{
        ast::{AstNode, Bool, Expression, Num, StringLiteral},
        combinators::Comb,
        ParseError, ParseState,
    },
};

/// `let m = { "key": value, … };`
///
/// Keys are restricted to number, string and boolean literals; that is
/// checked here, at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapDecl {
    pub name: String,
    pub entries: Vec<(Expression, Expression)>,
    pub constant: bool,
}

impl MapDecl {
    /// Parses the `{ key: value, … };` tail of a map declaration. The
    /// identifier and `=` have already been consumed.
    pub(crate) fn parse(
        tokens: &mut ParseState<Token>,
        name: String,
        constant: bool,
    ) -> Result<MapDecl, ParseError> {
        Comb::LBRACE.parse(tokens)?;

        let mut entries: Vec<(Expression, Expression)> = vec![];

        loop {
            match tokens.peek() {
                Some(Token::CloseBrace { .. }) => break,
                Some(Token::Eof { .. }) | None => return Err(ParseError::eof("map declaration")),
                _ => {}
            }

            let key = Self::parse_key(tokens)?;

            if entries.iter().any(|(existing, _)| *existing == key) {
                return Err(ParseError::new("maps keys should be unique", None));
            }

            let matcher = Comb::COLON >> Comb::EXPR;
            let result = matcher.parse(tokens)?;
            let [AstNode::Expression(value)] = result.as_slice() else {
                unreachable!()
            };

            entries.push((key, value.clone()));

            if matches!(tokens.peek(), Some(Token::CloseBrace { .. })) {
                break;
            }

            Comb::COMMA.parse(tokens)?;
        }

        let matcher = Comb::RBRACE >> Comb::SEMI;
        matcher.parse(tokens)?;

        Ok(MapDecl {
            name,
            entries,
            constant,
        })
    }

    fn parse_key(tokens: &mut ParseState<Token>) -> Result<Expression, ParseError> {
        let Some(next) = tokens.next() else {
            return Err(ParseError::eof("map key"));
        };

        match next {
            Token::Number { value, .. } => Ok(Expression::Num(Num(value))),
            Token::Str { value, .. } => Ok(Expression::Str(StringLiteral(value))),
            Token::Boolean { value, .. } => Ok(Expression::Bool(Bool(value))),
            other => Err(ParseError {
                message: format!("invalid type provided for map key: '{}'", other.lexeme()),
                found: Some(other.lexeme()),
                position: Some(other.position()),
                echo: None,
            }),
        }
    }
}
