//! Error types shared by parsing and code generation.

pub mod errors;

#[cfg(test)]
mod tests;
