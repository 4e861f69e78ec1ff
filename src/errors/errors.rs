use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A parse or code-generation failure, pairing the concrete error with the
/// source position it was raised at. The first failure halts translation of
/// its unit; callers propagate with `?` and never attempt recovery.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// The error category. One of `SyntaxError`, `UnresolvedSymbolError`,
    /// `TypeError` or `ArityError`.
    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. }
            | ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::ExpectedToken { .. }
            | ErrorImpl::NumberParseError { .. } => "SyntaxError",
            ErrorImpl::UnresolvedVariable { .. } | ErrorImpl::UnresolvedFunction { .. } => {
                "UnresolvedSymbolError"
            }
            ErrorImpl::TypeMismatch { .. }
            | ErrorImpl::VoidCast { .. }
            | ErrorImpl::VoidDeclaration { .. }
            | ErrorImpl::InvalidOperands { .. } => "TypeError",
            ErrorImpl::ArityMismatch { .. } => "ArityError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::ExpectedToken { expected, found } => ErrorTip::Suggestion(format!(
                "Expected `{}`, found `{}`, did you miss a semicolon?",
                expected, found
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnresolvedVariable { name } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", name))
            }
            ErrorImpl::UnresolvedFunction { name } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", name))
            }
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::VoidCast { ty } => {
                ErrorTip::Suggestion(format!("Cannot cast between `void` and `{}`", ty))
            }
            ErrorImpl::VoidDeclaration { name } => {
                ErrorTip::Suggestion(format!("`{}` cannot be declared `void`", name))
            }
            ErrorImpl::InvalidOperands { op, left, right } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot combine `{}` and `{}`",
                op, left, right
            )),
            ErrorImpl::ArityMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` takes {} arguments, received {}",
                function, expected, received
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("expected {expected:?}, found {found:?}")]
    ExpectedToken { expected: String, found: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unresolved variable {name:?}")]
    UnresolvedVariable { name: String },
    #[error("unresolved function {name:?}")]
    UnresolvedFunction { name: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
    #[error("cast between void and {ty:?}")]
    VoidCast { ty: String },
    #[error("{name:?} declared with type void")]
    VoidDeclaration { name: String },
    #[error("operator {op:?} cannot combine {left:?} and {right:?}")]
    InvalidOperands {
        op: String,
        left: String,
        right: String,
    },
    #[error("{function:?} takes {expected:?} arguments, received {received:?}")]
    ArityMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
}
