//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

#[test]
fn test_error_position() {
    let pos = Position(42, Rc::new("test.qz".to_string()));
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        pos,
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_syntax_error_category() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position(10, Rc::new("test.qz".to_string())),
    );
    assert_eq!(error.get_error_name(), "SyntaxError");

    let error = Error::new(
        ErrorImpl::ExpectedToken {
            expected: "Semicolon".to_string(),
            found: "EOF".to_string(),
        },
        Position(0, Rc::new("test.qz".to_string())),
    );
    assert_eq!(error.get_error_name(), "SyntaxError");
}

#[test]
fn test_unresolved_symbol_category() {
    let error = Error::new(
        ErrorImpl::UnresolvedVariable {
            name: "foo".to_string(),
        },
        Position(0, Rc::new("test.qz".to_string())),
    );
    assert_eq!(error.get_error_name(), "UnresolvedSymbolError");

    let error = Error::new(
        ErrorImpl::UnresolvedFunction {
            name: "bar".to_string(),
        },
        Position(0, Rc::new("test.qz".to_string())),
    );
    assert_eq!(error.get_error_name(), "UnresolvedSymbolError");
}

#[test]
fn test_type_error_category() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            expected: "i32".to_string(),
            received: "bool".to_string(),
        },
        Position(0, Rc::new("test.qz".to_string())),
    );
    assert_eq!(error.get_error_name(), "TypeError");

    let error = Error::new(
        ErrorImpl::VoidCast {
            ty: "i32".to_string(),
        },
        Position(0, Rc::new("test.qz".to_string())),
    );
    assert_eq!(error.get_error_name(), "TypeError");
}

#[test]
fn test_arity_error_category() {
    let error = Error::new(
        ErrorImpl::ArityMismatch {
            function: "add".to_string(),
            expected: 2,
            received: 1,
        },
        Position(0, Rc::new("test.qz".to_string())),
    );

    assert_eq!(error.get_error_name(), "ArityError");
}

#[test]
fn test_error_tip_contents() {
    let error = Error::new(
        ErrorImpl::ArityMismatch {
            function: "add".to_string(),
            expected: 2,
            received: 1,
        },
        Position(0, Rc::new("test.qz".to_string())),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => {
            assert!(tip.contains("add"));
            assert!(tip.contains('2'));
            assert!(tip.contains('1'));
        }
        ErrorTip::None => panic!("expected a suggestion"),
    }
}

#[test]
fn test_unrecognised_token_has_no_tip() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        Position(0, Rc::new("test.qz".to_string())),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}
