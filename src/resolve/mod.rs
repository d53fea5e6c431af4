//! Resolve module - Include resolution and recursive flattening
//!
//! Provides:
//! - directive: Whole-line recognition of `#include` directives
//! - locate: Base-name lookup across ordered search roots
//! - flatten: Recursive expansion into a shared output sink
//! - error: Failure taxonomy for a flattening run

pub mod directive;
pub mod error;
pub mod flatten;
pub mod locate;
