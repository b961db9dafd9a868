use std::{error::Error, fmt::Display};

use log::debug;

use crate::{
    lexer::{LexError, Lexer},
    parser::{parse, ast::Program, ParseError, ParseState},
    runtime::{interpreter::evaluate, Environment, RuntimeError, RuntimeValue},
};

/// Any failure of the lex → parse → evaluate pipeline. The display
/// prefixes are stable and part of the observable surface.
#[derive(Debug, Clone, PartialEq)]
pub enum GoblinError {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl Display for GoblinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GoblinError::Lex(e) => write!(f, "LexError: {e}"),
            GoblinError::Parse(e) => write!(f, "parse error: {e}"),
            GoblinError::Runtime(e) => write!(f, "interpreter error: {e}"),
        }
    }
}

impl Error for GoblinError {}

impl From<LexError> for GoblinError {
    fn from(value: LexError) -> Self {
        GoblinError::Lex(value)
    }
}

impl From<ParseError> for GoblinError {
    fn from(value: ParseError) -> Self {
        GoblinError::Parse(value)
    }
}

impl From<RuntimeError> for GoblinError {
    fn from(value: RuntimeError) -> Self {
        GoblinError::Runtime(value)
    }
}

/// Lex and parse a source fragment without evaluating it.
pub fn parse_source(source: &str) -> Result<Program, GoblinError> {
    let tokens = Lexer::new(source).lex()?;
    debug!("lexed {} tokens", tokens.len());

    let mut state = ParseState::new(tokens, source.lines().map(str::to_owned).collect());
    let program = parse(&mut state)?;
    debug!("parsed {} top-level statements", program.body.len());

    Ok(program)
}

/// Where a source fragment goes to be lexed, parsed and evaluated. The
/// result is the value of the last statement; on error no further
/// statements of the fragment execute.
pub fn run(source: &str, env: &Environment) -> Result<RuntimeValue, GoblinError> {
    let program = parse_source(source)?;

    let value = evaluate(&program, env)?;

    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, io::Cursor, rc::Rc};

    use super::*;

    fn test_env() -> Environment {
        let stdout: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
        let stdin: Rc<RefCell<Cursor<Vec<u8>>>> = Rc::new(RefCell::new(Cursor::new(Vec::new())));
        Environment::new(stdin, stdout, ".")
    }

    #[test]
    fn test_run_returns_last_value() {
        let env = test_env();

        assert_eq!(Ok(RuntimeValue::Number(3)), run("1 + 2;", &env));
    }

    #[test]
    fn test_environment_persists_across_runs() {
        let env = test_env();

        run("let x = 41;", &env).expect("should run");

        assert_eq!(Ok(RuntimeValue::Number(42)), run("x + 1;", &env));
    }

    #[test]
    fn test_lex_error_prefix() {
        let env = test_env();

        let error = run("let x = @;", &env).expect_err("should fail");

        assert_eq!(
            "LexError: unrecognised character '@' at line 1 col 8",
            error.to_string()
        );
    }

    #[test]
    fn test_parse_error_prefix() {
        let env = test_env();

        let error = run("let = 1;", &env).expect_err("should fail");

        assert!(error.to_string().starts_with("parse error: "));
    }

    #[test]
    fn test_interpreter_error_prefix() {
        let env = test_env();

        let error = run("const x = 1; x = 2;", &env).expect_err("should fail");

        assert_eq!(
            "interpreter error: cannot reassign const value 'x'",
            error.to_string()
        );
    }

    #[test]
    fn test_error_stops_execution_of_fragment() {
        let env = test_env();

        run("let x = 1;", &env).expect("should run");
        run("ghost; x = 99;", &env).expect_err("should fail");

        assert_eq!(Ok(RuntimeValue::Number(1)), run("x;", &env));
    }
}
