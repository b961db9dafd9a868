use serde::Serialize;

use crate::{
    lexer::Token,
    parser::{combinators::Comb, ParseError, ParseState},
};

/// `using "io";` — makes a standard-library namespace available to the
/// program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsingDecl {
    pub namespace: String,
}

impl UsingDecl {
    pub(crate) fn parse(tokens: &mut ParseState<Token>) -> Result<UsingDecl, ParseError> {
        Comb::USING_KEYWORD.parse(tokens)?;

        let Some(next) = tokens.next() else {
            return Err(ParseError::eof("using declaration"));
        };
        let Token::Str { value, .. } = next else {
            return Err(ParseError {
                message: "expecting 'String'".into(),
                found: Some(next.lexeme()),
                position: Some(next.position()),
                echo: None,
            });
        };

        Comb::SEMI.parse(tokens)?;

        Ok(UsingDecl { namespace: value })
    }
}
