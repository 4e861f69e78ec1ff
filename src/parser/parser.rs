//! The parser context and top-level parse driver.
//!
//! The parser consumes the token stream strictly left-to-right under one
//! token of lookahead. On the first unexpected token it returns an error for
//! the current unit; callers propagate immediately with `?`.

use std::rc::Rc;

use crate::{
    ast::{nodes::Node, types::ValueType},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::stmt::parse_stmt;

/// The parser state: the token stream, a single forward-only cursor and the
/// source file handle used for error positions.
pub struct Parser {
    tokens: Vec<Token>,
    pos: i32,
    file: Rc<String>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos as usize]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos as usize].kind
    }

    /// Advances to the next token and returns the token just consumed.
    pub fn advance(&mut self) -> &Token {
        if (self.pos as usize) < self.tokens.len() - 1 {
            self.pos += 1;
        }
        &self.tokens[(self.pos - 1) as usize]
    }

    /// Consumes a token of the given kind, or fails with a diagnostic
    /// naming the expected and actual token.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            Err(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: expected_kind.to_string(),
                    found: token.value.clone(),
                },
                token.span.start.clone(),
            ))
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Consumes a type-name keyword and resolves it to a value type.
    pub fn expect_type(&mut self) -> Result<ValueType, Error> {
        let token = self.current_token();
        match ValueType::from_token_kind(token.kind) {
            Some(ty) => {
                self.advance();
                Ok(ty)
            }
            None => Err(Error::new(
                ErrorImpl::ExpectedToken {
                    expected: String::from("type name"),
                    found: token.value.clone(),
                },
                token.span.start.clone(),
            )),
        }
    }

    /// Whether any tokens remain before EOF.
    pub fn has_tokens(&self) -> bool {
        (self.pos as usize) < self.tokens.len() && self.current_token_kind() != TokenKind::EOF
    }

    /// The source position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }
}

/// Parses a token stream into a sequence of top-level nodes.
///
/// The first failure aborts parsing and is returned as-is; no recovery or
/// resynchronisation happens here.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Vec<Node>, Error> {
    let mut parser = Parser::new(tokens, file);

    let mut nodes = vec![];
    while parser.has_tokens() {
        nodes.push(parse_stmt(&mut parser)?);
    }

    Ok(nodes)
}
