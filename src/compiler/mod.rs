//! Code generation module.
//!
//! Walks the AST and emits LLVM IR through inkwell. It handles:
//!
//! - The single-exit function lowering protocol
//! - Short-circuit lowering of if-construct condition chains
//! - Implicit numeric widening and explicit casts
//! - Symbol resolution against per-function storage slots

pub mod compiler;
pub mod expr;
pub mod stmt;
