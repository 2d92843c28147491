//! Tab-indented outline parsing.
//!
//! # Responsibility
//! - Model outline lines as an owned tree (`OutlineNode`).
//! - Build that tree from raw lines using indentation depth.
//!
//! # Invariants
//! - The tree is built once and never mutated afterwards by core code.

pub mod builder;
pub mod node;

pub use builder::{build_outline, OutlineError};
pub use node::{indent_depth, OutlineNode};
