//! Recursive-descent parser with precedence climbing for binary
//! expressions.
//!
//! All parsing state lives in an explicit [`parser::Parser`] context passed
//! by exclusive reference, so independent units can be parsed reentrantly.

pub mod expr;
pub mod parser;
pub mod stmt;
