//! Backends module - Command implementations on top of the resolve core
//!
//! Provides:
//! - flatten: Write the flattened source to a file or stdout
//! - deps: Report the resolved include tree as a ResultSet

pub mod deps;
pub mod flatten;
