//! Unit tests for the lexer module.
//!
//! Covers keywords, type names, identifiers, number and string literals,
//! operators, comments and error cases.

use super::{lexer::tokenize, tokens::TokenKind};

#[test]
fn test_tokenize_keywords() {
    let source = "fn let return if import cast".to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Fn);
    assert_eq!(tokens[1].kind, TokenKind::Let);
    assert_eq!(tokens[2].kind, TokenKind::Return);
    assert_eq!(tokens[3].kind, TokenKind::If);
    assert_eq!(tokens[4].kind, TokenKind::Import);
    assert_eq!(tokens[5].kind, TokenKind::Cast);
    assert_eq!(tokens[6].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_type_names() {
    let source = "i64 i32 i16 i8 float double bool void".to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::I64);
    assert_eq!(tokens[1].kind, TokenKind::I32);
    assert_eq!(tokens[2].kind, TokenKind::I16);
    assert_eq!(tokens[3].kind, TokenKind::I8);
    assert_eq!(tokens[4].kind, TokenKind::Float);
    assert_eq!(tokens[5].kind, TokenKind::Double);
    assert_eq!(tokens[6].kind, TokenKind::Bool);
    assert_eq!(tokens[7].kind, TokenKind::Void);
    assert!(tokens[0].kind.is_type_name());
    assert!(!TokenKind::Identifier.is_type_name());
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar baz_123 _underscore CamelCase".to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "CamelCase");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5".to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].kind, TokenKind::Number);
    assert_eq!(tokens[3].value, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "multiple words""#.to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""line\nbreak\ttab""#.to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "line\nbreak\ttab");
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / % == != < <= > >= = && ||".to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Plus);
    assert_eq!(tokens[1].kind, TokenKind::Dash);
    assert_eq!(tokens[2].kind, TokenKind::Star);
    assert_eq!(tokens[3].kind, TokenKind::Slash);
    assert_eq!(tokens[4].kind, TokenKind::Percent);
    assert_eq!(tokens[5].kind, TokenKind::Equals);
    assert_eq!(tokens[6].kind, TokenKind::NotEquals);
    assert_eq!(tokens[7].kind, TokenKind::Less);
    assert_eq!(tokens[8].kind, TokenKind::LessEquals);
    assert_eq!(tokens[9].kind, TokenKind::Greater);
    assert_eq!(tokens[10].kind, TokenKind::GreaterEquals);
    assert_eq!(tokens[11].kind, TokenKind::Assignment);
    assert_eq!(tokens[12].kind, TokenKind::And);
    assert_eq!(tokens[13].kind, TokenKind::Or);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } ; : , ->".to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(tokens[5].kind, TokenKind::Colon);
    assert_eq!(tokens[6].kind, TokenKind::Comma);
    assert_eq!(tokens[7].kind, TokenKind::Arrow);
}

#[test]
fn test_tokenize_prototype() {
    let source = "fn add(i32 a, i32 b) -> i32 { return a + b; }".to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Fn);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].value, "add");
    assert_eq!(tokens[2].kind, TokenKind::OpenParen);
    assert_eq!(tokens[3].kind, TokenKind::I32);
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[8].kind, TokenKind::CloseParen);
    assert_eq!(tokens[9].kind, TokenKind::Arrow);
    assert_eq!(tokens[10].kind, TokenKind::I32);
}

#[test]
fn test_tokenize_comments_skipped() {
    let source = "let x // trailing comment\n42".to_string();
    let tokens = tokenize(source, Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Let);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_relational_helper() {
    assert!(TokenKind::Equals.is_relational());
    assert!(TokenKind::LessEquals.is_relational());
    assert!(!TokenKind::Plus.is_relational());
    assert!(!TokenKind::And.is_relational());
}

#[test]
fn test_tokenize_unrecognised_character() {
    let source = "let a = #;".to_string();
    let result = tokenize(source, Some("test.qz".to_string()));

    assert!(result.is_err());
    assert_eq!(result.err().unwrap().get_error_name(), "SyntaxError");
}

#[test]
fn test_tokenize_empty_source() {
    let tokens = tokenize(String::new(), Some("test.qz".to_string())).unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
}
