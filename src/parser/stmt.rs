//! Statement and declaration parsing.
//!
//! Top-level dispatch selects on the first token's kind: a function
//! declaration, a variable declaration, a return, an if-construct, an
//! import, or a bare expression statement. Every statement ends in a
//! semicolon except the block-structured if-construct.

use crate::{
    ast::{
        nodes::{CondJoin, ConditionExpr, FunctionNode, IfNode, Node, Prototype},
        types::ValueType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expression, parser::Parser};

pub fn parse_stmt(parser: &mut Parser) -> Result<Node, Error> {
    match parser.current_token_kind() {
        TokenKind::Fn => parse_fn_declaration(parser),
        TokenKind::Let => parse_variable_declaration(parser),
        TokenKind::Return => parse_return_statement(parser),
        TokenKind::If => parse_if(parser),
        TokenKind::Import => parse_import(parser),
        _ => {
            let expr = parse_expression(parser, None)?;
            parser.expect(TokenKind::Semicolon)?;

            Ok(Node::Expression(expr))
        }
    }
}

/// Parses `name(type name, ...) -> type` after the `fn` keyword.
pub fn parse_prototype(parser: &mut Parser) -> Result<Prototype, Error> {
    let name = parser.expect(TokenKind::Identifier)?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut arg_types = vec![];
    let mut arg_names = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let ty_position = parser.get_position();
        let ty = parser.expect_type()?;
        let arg_name = parser.expect(TokenKind::Identifier)?.value;

        // Parameters need a storage slot; void has none.
        if ty == ValueType::Void {
            return Err(Error::new(
                ErrorImpl::VoidDeclaration { name: arg_name },
                ty_position,
            ));
        }

        arg_types.push(ty);
        arg_names.push(arg_name);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Arrow)?;
    let return_type = parser.expect_type()?;

    Ok(Prototype {
        name,
        arg_types,
        arg_names,
        return_type,
    })
}

pub fn parse_fn_declaration(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();

    let proto = parse_prototype(parser)?;
    let body = parse_fn_body(parser)?;

    Ok(Node::Function(FunctionNode { proto, body }))
}

/// Parses a brace-delimited statement sequence.
fn parse_fn_body(parser: &mut Parser) -> Result<Vec<Node>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly
        && parser.current_token_kind() != TokenKind::EOF
    {
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(body)
}

/// Parses `let name: type = expr;`. The declared type is handed down as the
/// expected type so literal initializers are built with it directly.
pub fn parse_variable_declaration(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();

    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Colon)?;
    let ty_position = parser.get_position();
    let ty = parser.expect_type()?;

    if ty == ValueType::Void {
        return Err(Error::new(
            ErrorImpl::VoidDeclaration { name },
            ty_position,
        ));
    }

    let value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expression(parser, Some(ty))?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Node::VariableDecl { name, ty, value })
}

pub fn parse_return_statement(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expression(parser, None)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Node::Return { value })
}

/// Parses one `expr relop expr` condition.
fn parse_condition(parser: &mut Parser) -> Result<ConditionExpr, Error> {
    let left = parse_expression(parser, None)?;

    let token = parser.current_token();
    if !token.kind.is_relational() {
        return Err(Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from("relational operator"),
                found: token.value.clone(),
            },
            token.span.start.clone(),
        ));
    }
    let op = parser.advance().kind;

    let right = parse_expression(parser, None)?;

    Ok(ConditionExpr { left, op, right })
}

/// Parses an if-construct: conditions joined by `&&`/`||`, then a
/// brace-delimited then body. The grammar has no else branch.
pub fn parse_if(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();

    let mut conditions = vec![parse_condition(parser)?];
    let mut separators = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::And => {
                parser.advance();
                separators.push(CondJoin::And);
            }
            TokenKind::Or => {
                parser.advance();
                separators.push(CondJoin::Or);
            }
            _ => break,
        }
        conditions.push(parse_condition(parser)?);
    }

    let then_body = parse_fn_body(parser)?;

    Ok(Node::If(IfNode {
        conditions,
        separators,
        then_body,
    }))
}

pub fn parse_import(parser: &mut Parser) -> Result<Node, Error> {
    parser.advance();

    let path = parser.expect(TokenKind::String)?.value;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Node::Import { path })
}
