//! Search query compilation.
//!
//! Translates [`SearchRequest`](crate::types::SearchRequest)s into the
//! engine's query DSL.

pub mod clauses;
pub mod compiler;

pub use compiler::{CompiledQuery, QueryCompiler};
