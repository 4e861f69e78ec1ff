//! The abstract syntax tree.
//!
//! Nodes are closed tagged enums; every child is exclusively owned by its
//! parent and each consumer matches the variants exhaustively.

pub mod nodes;
pub mod types;
