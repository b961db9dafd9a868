mod lexmap;
mod token;

pub use lexmap::*;
pub use token::*;

use once_cell::sync::Lazy;
use std::{error::Error, fmt::Display, iter::Peekable, str::Chars};

#[macro_export]
macro_rules! terminal {
    ($map:ident, $name:ident, $value:expr) => {
        $map.insert($value, Terminal::$name);
    };
}

static LEX_MAP: Lazy<LexMap> = Lazy::new(|| {
    let mut m = LexMap::default();

    terminal!(m, Plus, "+");
    terminal!(m, PlusPlus, "++");
    terminal!(m, PlusAssign, "+=");
    terminal!(m, Minus, "-");
    terminal!(m, MinusMinus, "--");
    terminal!(m, MinusAssign, "-=");
    terminal!(m, Times, "*");
    terminal!(m, TimesAssign, "*=");
    terminal!(m, Divide, "/");
    terminal!(m, DivideAssign, "/=");
    terminal!(m, Modulo, "%");
    terminal!(m, ModuloAssign, "%=");
    terminal!(m, LessThan, "<");
    terminal!(m, GreaterThan, ">");
    terminal!(m, Equals, "=");
    terminal!(m, Equality, "==");
    terminal!(m, OpenParen, "(");
    terminal!(m, CloseParen, ")");
    terminal!(m, OpenBrace, "{");
    terminal!(m, CloseBrace, "}");
    terminal!(m, OpenBracket, "[");
    terminal!(m, CloseBracket, "]");
    terminal!(m, Comma, ",");
    terminal!(m, Colon, ":");
    terminal!(m, Period, ".");
    terminal!(m, Ternary, "?");
    terminal!(m, Eol, ";");
    terminal!(m, Let, "let");
    terminal!(m, Const, "const");
    terminal!(m, Fn, "fn");
    terminal!(m, If, "if");
    terminal!(m, Else, "else");
    terminal!(m, While, "while");
    terminal!(m, For, "for");
    terminal!(m, Using, "using");

    m
});

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LexError {
    pub character: char,
    pub line: usize,
    pub col: usize,
}

pub type LexResult<T> = Result<T, LexError>;

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognised character '{}' at line {} col {}",
            self.character, self.line, self.col
        )
    }
}

impl Error for LexError {}

/// Scanner over the raw source text. Tracks the 1-based line and 0-based
/// column every token starts at and terminates the stream with an EOF
/// token.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    iterator: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iterator = input.chars().peekable();

        Self {
            tokens: vec![],
            iterator,
            line: 1,
            col: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.iterator.peek().copied()
    }

    fn next(&mut self) -> Option<char> {
        let next = self.iterator.next();
        if next.is_some() {
            self.col += 1;
        }
        next
    }

    fn next_if(&mut self, func: impl FnOnce(&char) -> bool) -> Option<char> {
        let next = self.iterator.next_if(func);
        if next.is_some() {
            self.col += 1;
        }
        next
    }

    fn eat_whitespace(&mut self) {
        while let Some(next) = self.iterator.next_if(|item| item.is_whitespace()) {
            if next == '\n' {
                self.col = 0;
                self.line += 1;
            } else {
                self.col += 1;
            }
        }
    }

    pub fn lex(mut self) -> LexResult<Vec<Token>> {
        loop {
            self.eat_whitespace();

            let Some(next) = self.peek() else {
                break;
            };

            match next {
                'a'..='z' | 'A'..='Z' | '_' => self.lex_alphanumeric(),
                '0'..='9' => self.lex_numeric()?,
                '"' => self.lex_string()?,
                _ => self.lex_special()?,
            };
        }

        self.tokens.push(Token::Eof {
            position: (self.line, self.col),
        });

        Ok(self.tokens)
    }

    fn lex_alphanumeric(&mut self) {
        let mut stack = vec![];

        let position = (self.line, self.col);

        while let Some(next) = self.next_if(|item| item.is_alphanumeric() || *item == '_') {
            stack.push(next);
        }

        let read = stack.iter().collect::<String>();

        if let Some(terminal) = LEX_MAP.get(read.as_str()) {
            self.tokens.push(terminal.to_token(position));
        } else if read == "true" || read == "false" {
            self.tokens.push(Token::Boolean {
                value: read == "true",
                position,
            });
        } else {
            self.tokens.push(Token::Identifier {
                value: read,
                position,
            });
        }
    }

    fn lex_numeric(&mut self) -> LexResult<()> {
        let mut stack = vec![];

        let position = (self.line, self.col);

        while let Some(next) = self.next_if(|item| item.is_ascii_digit()) {
            stack.push(next);
        }

        let read = stack.iter().collect::<String>();

        let num = read.parse::<i64>().map_err(|_| LexError {
            character: stack[0],
            line: position.0,
            col: position.1,
        })?;

        self.tokens.push(Token::Number {
            value: num,
            position,
        });

        Ok(())
    }

    fn lex_string(&mut self) -> LexResult<()> {
        let position = (self.line, self.col);

        // The opening quote.
        self.next();

        let mut stack = vec![];

        loop {
            let Some(next) = self.next() else {
                // Ran off the end of the input without a closing quote.
                return Err(LexError {
                    character: '"',
                    line: position.0,
                    col: position.1,
                });
            };

            match next {
                '"' => break,
                '\n' => {
                    self.col = 0;
                    self.line += 1;
                    stack.push(next);
                }
                _ => stack.push(next),
            }
        }

        self.tokens.push(Token::Str {
            value: stack.iter().collect(),
            position,
        });

        Ok(())
    }

    fn lex_special(&mut self) -> LexResult<()> {
        let mut stack = vec![];

        let position = (self.line, self.col);

        while let Some(next) = self.next() {
            stack.push(next);

            let read = stack.iter().collect::<String>();

            let can_read_next = self
                .peek()
                .map(|item| {
                    let mut stack = stack.clone();
                    stack.push(item);
                    let read = stack.iter().collect::<String>();
                    LEX_MAP.can_match(read.as_str())
                })
                .unwrap_or(false);

            if can_read_next {
                continue;
            }

            let Some(current_match) = LEX_MAP.get(read.as_str()) else {
                return Err(LexError {
                    character: stack[0],
                    line: position.0,
                    col: position.1,
                });
            };

            self.tokens.push(current_match.to_token(position));
            break;
        }

        Ok(())
    }
}
