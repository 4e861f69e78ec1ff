//! Tokenization of quartz source text.
//!
//! The lexer walks the source with an ordered regex-pattern table and
//! produces a flat token stream terminated by an EOF token.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
