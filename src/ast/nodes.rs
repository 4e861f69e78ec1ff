use crate::lexer::tokens::TokenKind;

use super::types::ValueType;

/// An expression node. Every variant lowers to a single typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal carrying the type its context fixed for it.
    Number { value: f64, ty: ValueType },
    /// A reference to a named variable.
    Variable(String),
    /// A string literal.
    Str(String),
    /// A binary arithmetic operation. Children are exclusively owned.
    Binary {
        op: TokenKind,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A call to a named function.
    Call { callee: String, args: Vec<Expr> },
    /// An explicit type conversion, `cast<target>(value)`.
    Cast { value: Box<Expr>, target: ValueType },
    /// An assignment to an already-declared variable.
    Assignment { name: String, value: Box<Expr> },
}

/// A single `lhs relop rhs` condition inside an if-construct.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionExpr {
    pub left: Expr,
    pub op: TokenKind,
    pub right: Expr,
}

/// Logical join between two successive conditions of one if-construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CondJoin {
    And,
    Or,
}

/// An if-construct: one or more conditions chained by logical joins and a
/// brace-delimited then body. The grammar has no else branch.
#[derive(Debug, Clone, PartialEq)]
pub struct IfNode {
    pub conditions: Vec<ConditionExpr>,
    /// One join per adjacent condition pair: `separators.len() ==
    /// conditions.len() - 1`.
    pub separators: Vec<CondJoin>,
    pub then_body: Vec<Node>,
}

/// A function signature: parallel parameter type/name arrays plus the
/// return type. Read-only after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub arg_types: Vec<ValueType>,
    pub arg_names: Vec<String>,
    pub return_type: ValueType,
}

/// A function declaration owning its prototype and body sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    pub proto: Prototype,
    pub body: Vec<Node>,
}

/// A top-level or statement-position node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Function(FunctionNode),
    VariableDecl {
        name: String,
        ty: ValueType,
        value: Option<Expr>,
    },
    Return {
        value: Option<Expr>,
    },
    If(IfNode),
    Import {
        path: String,
    },
    Expression(Expr),
}
