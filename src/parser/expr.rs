//! Expression parsing.
//!
//! `parse_primary` recognises literals, parenthesised expressions,
//! identifiers (variable reference vs. call, disambiguated by probing for a
//! following paren), string literals and cast syntax. `parse_bin_op_rhs`
//! performs standard left-associative precedence climbing over the fixed
//! operator table below.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{nodes::Expr, types::ValueType},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

lazy_static! {
    /// Binary operator precedences. All entries are left-associative; ties
    /// bind left-to-right.
    pub static ref BIN_OP_PRECEDENCE: HashMap<TokenKind, i32> = {
        let mut map = HashMap::new();
        map.insert(TokenKind::Plus, 20);
        map.insert(TokenKind::Dash, 20);
        map.insert(TokenKind::Star, 40);
        map.insert(TokenKind::Slash, 40);
        map.insert(TokenKind::Percent, 40);
        map
    };
}

/// Precedence of the parser's current token, or -1 if it is not a binary
/// operator.
fn get_tok_precedence(parser: &Parser) -> i32 {
    *BIN_OP_PRECEDENCE
        .get(&parser.current_token_kind())
        .unwrap_or(&-1)
}

/// Parses a full expression under an optional expected type used to
/// contextually fix numeric literals.
pub fn parse_expression(parser: &mut Parser, expected: Option<ValueType>) -> Result<Expr, Error> {
    let lhs = parse_primary(parser, expected)?;
    parse_bin_op_rhs(parser, 0, lhs, expected)
}

/// Precedence climbing: while the next operator binds at least as tightly
/// as `expr_prec`, consume it, parse its right operand (recursing for
/// tighter-binding operators) and fold into a binary node.
pub fn parse_bin_op_rhs(
    parser: &mut Parser,
    expr_prec: i32,
    mut lhs: Expr,
    expected: Option<ValueType>,
) -> Result<Expr, Error> {
    loop {
        let tok_prec = get_tok_precedence(parser);
        if tok_prec < expr_prec {
            return Ok(lhs);
        }

        let op = parser.advance().kind;

        let mut rhs = parse_primary(parser, expected)?;

        let next_prec = get_tok_precedence(parser);
        if tok_prec < next_prec {
            rhs = parse_bin_op_rhs(parser, tok_prec + 1, rhs, expected)?;
        }

        lhs = Expr::Binary {
            op,
            left: Box::new(lhs),
            right: Box::new(rhs),
        };
    }
}

/// Parses a primary expression.
pub fn parse_primary(parser: &mut Parser, expected: Option<ValueType>) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => parse_number_expression(parser, expected),
        TokenKind::OpenParen => parse_paren_expression(parser, expected),
        TokenKind::Identifier => parse_identifier_expression(parser),
        TokenKind::String => parse_string_expression(parser),
        TokenKind::Cast => parse_typecast_expression(parser),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

/// Parses a numeric literal, fixing its type from the context when one is
/// given. Without context an integral literal defaults to `i32` and a
/// fractional one to `double`, so the untyped sentinel never leaves the
/// parser.
fn parse_number_expression(
    parser: &mut Parser,
    expected: Option<ValueType>,
) -> Result<Expr, Error> {
    let token = parser.current_token().clone();
    let value: f64 = match token.value.parse() {
        Ok(value) => value,
        Err(_) => {
            return Err(Error::new(
                ErrorImpl::NumberParseError {
                    token: token.value.clone(),
                },
                token.span.start.clone(),
            ))
        }
    };
    parser.advance();

    let is_fractional = value.fract() != 0.0 || token.value.contains('.');
    let ty = match expected {
        Some(expected) if expected.is_float() => expected,
        Some(expected) if expected.is_integer() && !is_fractional => expected,
        _ => {
            if is_fractional {
                ValueType::Double
            } else {
                ValueType::I32
            }
        }
    };

    Ok(Expr::Number { value, ty })
}

fn parse_paren_expression(
    parser: &mut Parser,
    expected: Option<ValueType>,
) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expression(parser, expected)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Parses a bare variable reference, an assignment to it, or, when the
/// identifier is followed by an opening paren, a call expression.
fn parse_identifier_expression(parser: &mut Parser) -> Result<Expr, Error> {
    let name = parser.advance().value.clone();

    if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        let value = parse_expression(parser, None)?;
        return Ok(Expr::Assignment {
            name,
            value: Box::new(value),
        });
    }

    if parser.current_token_kind() != TokenKind::OpenParen {
        return Ok(Expr::Variable(name));
    }

    parser.advance();

    let mut args = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        args.push(parse_expression(parser, None)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Call { callee: name, args })
}

fn parse_string_expression(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Str(parser.advance().value.clone()))
}

/// Parses `cast<type>(expr)`. The conversion always happens, narrowing
/// included; void casts are rejected later, at code-generation time.
fn parse_typecast_expression(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();

    parser.expect(TokenKind::Less)?;
    let target = parser.expect_type()?;
    parser.expect(TokenKind::Greater)?;

    parser.expect(TokenKind::OpenParen)?;
    let value = parse_expression(parser, None)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Expr::Cast {
        value: Box::new(value),
        target,
    })
}
