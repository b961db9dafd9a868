use colored::Colorize;
use std::{error::Error, fmt::Display};

pub mod ast;
pub mod combinators;
mod parse_state;

pub use self::parse_state::*;

use crate::lexer::{Position, Terminal, Token};

use self::{
    ast::{AstNode, Program},
    combinators::Comb,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub found: Option<String>,
    pub position: Option<Position>,
    pub echo: Option<String>,
}

impl ParseError {
    pub fn new(message: impl ToString, position: Option<Position>) -> ParseError {
        ParseError {
            message: message.to_string(),
            found: None,
            position,
            echo: None,
        }
    }

    pub fn eof(item: &str) -> ParseError {
        ParseError {
            message: format!("hit EOF while parsing {item}"),
            found: None,
            position: None,
            echo: None,
        }
    }

    pub fn expected(terminal: Terminal, found: &Token) -> ParseError {
        ParseError {
            message: format!("expecting '{terminal}'"),
            found: Some(found.lexeme()),
            position: Some(found.position()),
            echo: None,
        }
    }

    pub fn unexpected(found: &Token) -> ParseError {
        ParseError {
            message: format!("unexpected token found during parsing - '{}'", found.lexeme()),
            found: Some(found.lexeme()),
            position: Some(found.position()),
            echo: None,
        }
    }

    pub fn with_echo(mut self, echo: Option<String>) -> ParseError {
        self.echo = echo;
        self
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.position, &self.echo) {
            (Some((line, col)), Some(echo)) => {
                // The caret lines up under the offending token, one row
                // below the echoed source line. The left padding accounts
                // for the `parse error: ` prefix the driver prepends.
                let padding = " ".repeat("parse error:".len() + 1);
                let caret_at = col + self.found.as_ref().map(String::len).unwrap_or(1);

                let mut underline = String::new();
                for i in 0..=echo.len() {
                    underline.push(if i == caret_at { '^' } else { '~' });
                }

                write!(
                    f,
                    "{echo}\n{padding}{}\n{} on line {line} col {col}",
                    underline.red(),
                    self.message
                )
            }
            (Some((line, col)), None) => match &self.found {
                Some(found) => write!(
                    f,
                    "{} on line {line} col {col}, got '{found}'",
                    self.message
                ),
                None => write!(f, "{} on line {line} col {col}", self.message),
            },
            _ => f.write_str(&self.message),
        }
    }
}

impl Error for ParseError {}

pub trait FromTokens<T> {
    fn parse(tokens: &mut ParseState<T>) -> Result<AstNode, ParseError>;
}

/// Turn a token stream into a program. Statements are parsed until the EOF
/// token; the first error aborts the parse and gets the offending source
/// line attached for display.
pub fn parse(tokens: &mut ParseState<Token>) -> Result<Program, ParseError> {
    let mut body = vec![];

    let matcher = Comb::STATEMENT;
    while let Some(next) = tokens.peek() {
        if matches!(next, Token::Eof { .. }) {
            break;
        }

        match matcher.parse(tokens) {
            Ok(result) => {
                let [AstNode::Statement(statement)] = result.as_slice() else {
                    unreachable!()
                };
                body.push(statement.clone());
            }
            Err(e) => {
                let echo = e
                    .position
                    .and_then(|(line, _)| tokens.echo_line(line))
                    .map(str::to_owned);
                return Err(e.with_echo(echo));
            }
        }
    }

    Ok(Program { body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn state_for(source: &str) -> ParseState<Token> {
        let tokens = Lexer::new(source).lex().expect("should lex");
        ParseState::new(tokens, source.lines().map(str::to_owned).collect())
    }

    #[test]
    fn test_parse_program() {
        let mut tokens = state_for("let x = 1; x = 2;");

        let program = parse(&mut tokens).expect("should parse");

        assert_eq!(2, program.body.len());
    }

    #[test]
    fn test_parse_empty_program() {
        let mut tokens = state_for("");

        let program = parse(&mut tokens).expect("should parse");

        assert!(program.body.is_empty());
    }

    #[test]
    fn test_parse_error_carries_echo() {
        let mut tokens = state_for("let x = ;");

        let error = parse(&mut tokens).expect_err("should fail");

        assert_eq!(Some("let x = ;".to_string()), error.echo);
    }

    #[test]
    fn test_parse_error_position() {
        let mut tokens = state_for("using io;");

        let error = parse(&mut tokens).expect_err("should fail");

        assert_eq!(Some((1, 6)), error.position);
    }
}
