mod assignment;
mod binary;
mod boolean;
mod call;
mod id;
mod indexed;
mod member;
mod num;
mod object;
mod string;
mod ternary;

pub use self::assignment::*;
pub use self::binary::*;
pub use self::boolean::*;
pub use self::call::*;
pub use self::id::*;
pub use self::indexed::*;
pub use self::member::*;
pub use self::num::*;
pub use self::object::*;
pub use self::string::*;
pub use self::ternary::*;

use serde::Serialize;

use crate::lexer::{BinaryOp, Token};
use crate::parser::{combinators::Comb, FromTokens, ParseError, ParseState};

use super::AstNode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expression {
    Id(Id),
    Num(Num),
    Str(StringLiteral),
    Bool(Bool),
    Indexed(IndexedIdentifier),
    Member(Box<MemberAccess>),
    Binary(Box<BinaryExpression>),
    Call(Box<Call>),
    Ternary(Box<Ternary>),
    Object(ObjectLiteral),
    Assignment(Box<Assignment>),
}

impl FromTokens<Token> for Expression {
    /// Parse at assignment level: an object literal or an additive chain,
    /// optionally followed by `= rhs` (right-associative) or `? left :
    /// right`.
    fn parse(tokens: &mut ParseState<Token>) -> Result<AstNode, ParseError> {
        let lhs = match tokens.peek() {
            Some(Token::OpenBrace { .. }) => Expression::Object(ObjectLiteral::parse(tokens)?),
            _ => Self::parse_additive(tokens)?,
        };

        match tokens.peek() {
            Some(Token::Equals { .. }) => {
                tokens.next();

                let result = Comb::EXPR.parse(tokens)?;
                let [AstNode::Expression(value)] = result.as_slice() else {
                    unreachable!()
                };

                Ok(Expression::Assignment(Box::new(Assignment {
                    target: lhs,
                    value: value.clone(),
                }))
                .into())
            }
            Some(Token::Ternary { .. }) => {
                tokens.next();

                let result = Comb::EXPR.parse(tokens)?;
                let [AstNode::Expression(left)] = result.as_slice() else {
                    unreachable!()
                };

                let matcher = Comb::COLON >> Comb::EXPR;
                let result = matcher.parse(tokens)?;
                let [AstNode::Expression(right)] = result.as_slice() else {
                    unreachable!()
                };

                Ok(Expression::Ternary(Box::new(Ternary {
                    condition: lhs,
                    left: left.clone(),
                    right: right.clone(),
                }))
                .into())
            }
            _ => Ok(lhs.into()),
        }
    }
}

impl Expression {
    /// Additive level. Comparisons deliberately share this precedence with
    /// `+` and `-`, so `a + 1 < b` parses as `(a + 1) < b` but
    /// `a < b + 1` parses as `(a < b) + 1`.
    fn parse_additive(tokens: &mut ParseState<Token>) -> Result<Expression, ParseError> {
        let mut left = Self::parse_multiplicative(tokens)?;

        loop {
            let op = match tokens.peek() {
                Some(Token::BinaryOperator { op, .. })
                    if matches!(op, BinaryOp::Addition | BinaryOp::Subtraction) =>
                {
                    op
                }
                Some(Token::ConditionalOperator { op, .. }) => op,
                Some(Token::Equality { .. }) => BinaryOp::Equal,
                _ => break,
            };
            tokens.next();

            let right = Self::parse_multiplicative(tokens)?;
            left = Expression::Binary(Box::new(BinaryExpression { left, right, op }));
        }

        Ok(left)
    }

    fn parse_multiplicative(tokens: &mut ParseState<Token>) -> Result<Expression, ParseError> {
        let mut left = Self::parse_postfix(tokens)?;

        loop {
            let op = match tokens.peek() {
                Some(Token::BinaryOperator { op, .. })
                    if matches!(
                        op,
                        BinaryOp::Multiplication | BinaryOp::Division | BinaryOp::Modulo
                    ) =>
                {
                    op
                }
                _ => break,
            };
            tokens.next();

            let right = Self::parse_postfix(tokens)?;
            left = Expression::Binary(Box::new(BinaryExpression { left, right, op }));
        }

        Ok(left)
    }

    /// Call, dot and bracket member access; all chainable.
    fn parse_postfix(tokens: &mut ParseState<Token>) -> Result<Expression, ParseError> {
        let mut expr = Self::parse_primary(tokens)?;

        loop {
            match tokens.peek() {
                Some(Token::OpenParen { .. }) => {
                    expr = Self::parse_call(expr, tokens)?;
                }
                Some(Token::Period { .. }) => {
                    expr = Self::parse_property_access(expr, tokens)?;
                }
                Some(Token::OpenBracket { .. }) => {
                    expr = Self::parse_index(expr, tokens)?;
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_primary(tokens: &mut ParseState<Token>) -> Result<Expression, ParseError> {
        let Some(next) = tokens.peek() else {
            return Err(ParseError::eof("expression"));
        };

        match next {
            Token::Number { value, .. } => {
                tokens.next();
                Ok(Expression::Num(Num(value)))
            }
            Token::Str { value, .. } => {
                tokens.next();
                Ok(Expression::Str(StringLiteral(value)))
            }
            Token::Boolean { value, .. } => {
                tokens.next();
                Ok(Expression::Bool(Bool(value)))
            }
            Token::Identifier { value, .. } => {
                tokens.next();

                if matches!(tokens.peek(), Some(Token::OpenBracket { .. })) {
                    let matcher = Comb::LBRACKET >> Comb::EXPR >> Comb::RBRACKET;
                    let result = matcher.parse(tokens)?;
                    let [AstNode::Expression(index)] = result.as_slice() else {
                        unreachable!()
                    };

                    return Ok(Expression::Indexed(IndexedIdentifier {
                        symbol: value,
                        index: Box::new(index.clone()),
                    }));
                }

                Ok(Expression::Id(Id(value)))
            }
            Token::OpenParen { .. } => {
                let matcher = Comb::LPAREN >> Comb::EXPR >> Comb::RPAREN;
                let result = matcher.parse(tokens)?;
                let [AstNode::Expression(inner)] = result.as_slice() else {
                    unreachable!()
                };

                Ok(inner.clone())
            }
            other => Err(ParseError::unexpected(&other)),
        }
    }

    fn parse_call(
        callee: Expression,
        tokens: &mut ParseState<Token>,
    ) -> Result<Expression, ParseError> {
        Comb::LPAREN.parse(tokens)?;

        let mut args = vec![];

        if !matches!(tokens.peek(), Some(Token::CloseParen { .. })) {
            loop {
                let result = Comb::EXPR.parse(tokens)?;
                let [AstNode::Expression(arg)] = result.as_slice() else {
                    unreachable!()
                };
                args.push(arg.clone());

                if matches!(tokens.peek(), Some(Token::Comma { .. })) {
                    tokens.next();
                    continue;
                }
                break;
            }
        }

        Comb::RPAREN.parse(tokens)?;

        Ok(Expression::Call(Box::new(Call { callee, args })))
    }

    fn parse_property_access(
        object: Expression,
        tokens: &mut ParseState<Token>,
    ) -> Result<Expression, ParseError> {
        let matcher = Comb::PERIOD >> Comb::ID;

        let result = matcher.parse(tokens)?;
        let [AstNode::Id(property)] = result.as_slice() else {
            unreachable!()
        };

        Ok(Expression::Member(Box::new(MemberAccess {
            object,
            property: Expression::Id(property.clone()),
            computed: false,
        })))
    }

    fn parse_index(
        object: Expression,
        tokens: &mut ParseState<Token>,
    ) -> Result<Expression, ParseError> {
        let matcher = Comb::LBRACKET >> Comb::EXPR >> Comb::RBRACKET;

        let result = matcher.parse(tokens)?;
        let [AstNode::Expression(property)] = result.as_slice() else {
            unreachable!()
        };

        Ok(Expression::Member(Box::new(MemberAccess {
            object,
            property: property.clone(),
            computed: true,
        })))
    }
}

impl From<Expression> for AstNode {
    fn from(value: Expression) -> Self {
        AstNode::Expression(value)
    }
}
