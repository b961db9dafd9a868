use std::ops::{BitOr, Shr};

use crate::lexer::{Terminal, Token};

use super::{
    ast::{AstNode, Expression, Id, Shorthand, Statement},
    FromTokens, ParseError, ParseState,
};

/// Parser combinators over the token stream. Sequencing and alternation
/// are spelled with `>>` and `|` so grammar rules read like the grammar.
#[derive(Clone)]
pub enum Comb<'a> {
    /// Combinator for parsing a non terminal symbol. Therefore, we utilize
    /// the parsing function of this respective non-terminal.
    Node {
        parser: &'a dyn Fn(&mut ParseState<Token>) -> Result<AstNode, ParseError>,
    },
    /// Combinator for matching a terminal.
    Terminal { token: Terminal },
    /// Combinator for matching a sequence of two other combinators.
    ///
    /// Note: This will nest arbitrary deep
    Sequence {
        current: Box<Comb<'a>>,
        next: Box<Comb<'a>>,
    },
    /// Combinator for parsing either the left or the right combinator.
    ///
    /// Note: It will try to parse the left combinator FIRST.
    Either {
        left: Box<Comb<'a>>,
        right: Box<Comb<'a>>,
    },
}

impl<'a> PartialEq for Comb<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Node { .. }, Self::Node { .. }) => false,
            (Self::Terminal { token: l_token }, Self::Terminal { token: r_token }) => {
                l_token == r_token
            }
            (
                Self::Sequence {
                    current: l_current,
                    next: l_next,
                },
                Self::Sequence {
                    current: r_current,
                    next: r_next,
                },
            ) => l_current == r_current && l_next == r_next,
            (
                Self::Either {
                    left: l_left,
                    right: l_right,
                },
                Self::Either {
                    left: r_left,
                    right: r_right,
                },
            ) => l_left == r_left && l_right == r_right,
            _ => false,
        }
    }
}

impl<'a> std::fmt::Debug for Comb<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node { .. } => f
                .debug_struct("Node")
                .field("parser", &"() -> {}".to_string())
                .finish(),
            Self::Terminal { token } => f.debug_struct("Single").field("token", token).finish(),
            Self::Sequence { current, next } => f
                .debug_struct("Sequence")
                .field("current", current)
                .field("next", next)
                .finish(),
            Self::Either { left, right } => f
                .debug_struct("Either")
                .field("left", left)
                .field("right", right)
                .finish(),
        }
    }
}

/// Create a combinator for a specified terminal symbol.
#[macro_export]
macro_rules! terminal_comb {
    ($name:ident, $terminal:ident) => {
        pub const $name: Comb<'static> = Comb::Terminal {
            token: Terminal::$terminal,
        };
    };
}

/// Create a combinator for a specified non-terminal symbol.
#[macro_export]
macro_rules! node_comb {
    ($name:ident, $struct:ident) => {
        pub const $name: Comb<'static> = Comb::Node {
            parser: &$struct::parse,
        };
    };
}

impl<'a> Comb<'a> {
    terminal_comb!(LET, Let);

    terminal_comb!(CONST, Const);

    terminal_comb!(FN_KEYWORD, Fn);

    terminal_comb!(IF_KEYWORD, If);

    terminal_comb!(ELSE_KEYWORD, Else);

    terminal_comb!(WHILE_KEYWORD, While);

    terminal_comb!(FOR_KEYWORD, For);

    terminal_comb!(USING_KEYWORD, Using);

    terminal_comb!(EQ, Equals);

    terminal_comb!(LPAREN, OpenParen);

    terminal_comb!(RPAREN, CloseParen);

    terminal_comb!(LBRACE, OpenBrace);

    terminal_comb!(RBRACE, CloseBrace);

    terminal_comb!(LBRACKET, OpenBracket);

    terminal_comb!(RBRACKET, CloseBracket);

    terminal_comb!(COMMA, Comma);

    terminal_comb!(COLON, Colon);

    terminal_comb!(PERIOD, Period);

    terminal_comb!(SEMI, Eol);

    node_comb!(ID, Id);

    node_comb!(EXPR, Expression);

    node_comb!(STATEMENT, Statement);

    node_comb!(SHORTHAND, Shorthand);
}

impl<'a> Comb<'a> {
    pub fn parse(&self, tokens: &mut ParseState<Token>) -> Result<Vec<AstNode>, ParseError> {
        let mut matched = vec![];
        match self {
            Comb::Terminal { token } => {
                let Some(t) = tokens.next() else {
                    return Err(ParseError::eof(&token.to_string()));
                };

                // try to parse the terminal
                if *token != t {
                    return Err(ParseError::expected(*token, &t));
                }
            }
            Comb::Sequence { current, next } => {
                let mut current_matches = current.parse(tokens)?;
                matched.append(&mut current_matches);

                let mut next_matches = next.parse(tokens)?;
                matched.append(&mut next_matches);
            }
            Comb::Either { left, right } => {
                let current_index = tokens.get_index();

                if let Ok(mut left_matches) = left.parse(tokens) {
                    matched.append(&mut left_matches);
                } else {
                    tokens.set_index(current_index);
                    let mut right_matches = right.parse(tokens)?;
                    matched.append(&mut right_matches);
                }
            }
            Comb::Node { parser } => {
                let matches = parser(tokens)?;
                matched.push(matches);
            }
        }

        Ok(matched)
    }
}

impl<'a> Shr for Comb<'a> {
    type Output = Self;

    fn shr(self, rhs: Self) -> Self::Output {
        Comb::Sequence {
            current: Box::new(self),
            next: Box::new(rhs),
        }
    }
}

impl<'a> BitOr for Comb<'a> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Comb::Either {
            left: Box::new(self),
            right: Box::new(rhs),
        }
    }
}
