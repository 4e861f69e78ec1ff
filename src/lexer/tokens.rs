use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("let", TokenKind::Let);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("import", TokenKind::Import);
        map.insert("cast", TokenKind::Cast);
        map.insert("i64", TokenKind::I64);
        map.insert("i32", TokenKind::I32);
        map.insert("i16", TokenKind::I16);
        map.insert("i8", TokenKind::I8);
        map.insert("float", TokenKind::Float);
        map.insert("double", TokenKind::Double);
        map.insert("bool", TokenKind::Bool);
        map.insert("void", TokenKind::Void);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Colon,
    Comma,
    Arrow,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Fn,
    Let,
    Return,
    If,
    Import,
    Cast,

    // Type names
    I64,
    I32,
    I16,
    I8,
    Float,
    Double,
    Bool,
    Void,
}

impl TokenKind {
    /// Relational operators usable inside an if-construct condition.
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
        )
    }

    /// Keywords naming a primitive value type.
    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            TokenKind::I64
                | TokenKind::I32
                | TokenKind::I16
                | TokenKind::I8
                | TokenKind::Float
                | TokenKind::Double
                | TokenKind::Bool
                | TokenKind::Void
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
