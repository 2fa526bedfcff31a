//! SELECT statement assembly.
//!
//! Statements are composed from validated identifiers and an already rendered
//! predicate, producing plain SQL text with literals inlined:
//!
//! `SELECT * FROM "<table>"[ WHERE <predicate>][ ORDER BY <col>[ ASC|DESC]][ LIMIT <n>]`
//!
//! ## Design
//!
//! - The table is always double-quoted; order columns are emitted unquoted.
//! - Identifiers are validated, never escaped.
//! - Building returns the full statement or an error, never a partial string.

pub mod select;

pub use select::{Direction, MAX_LIMIT, Order, SelectBuilder, compose_select, select};

#[cfg(test)]
mod tests;
