//! # pglit
//!
//! Injection-safe SQL literals and SELECT composition for PostgreSQL adapters.
//!
//! ## Features
//!
//! - **Type-correct literals**: numbers and booleans render bare, text is escaped
//!   and quoted, mappings and sequences become quoted JSON text
//! - **Explicit escaping**: backslash or quote-doubling, chosen at construction
//! - **Validated identifiers**: table and column names outside
//!   `[A-Za-z_][A-Za-z0-9_]*` are rejected, never passed through
//! - **All or nothing**: builders return a complete statement or an error
//!
//! ## Example
//!
//! ```ignore
//! use pglit::{EscapeStyle, LiteralSerializer, Order, QueryBuilder, compose_select};
//!
//! let qb = QueryBuilder::new(LiteralSerializer::new(EscapeStyle::Backslash));
//! let p = qb.predicate(|w| {
//!     w.and_eq("name", "foo");
//! })?;
//! assert_eq!(p.to_sql(), "name = 'foo'");
//!
//! let sql = compose_select("Article", Some(p.to_sql().as_str()), Some(Order::asc("title")?), Some(2))?;
//! assert_eq!(sql, r#"SELECT * FROM "Article" WHERE name = 'foo' ORDER BY title ASC LIMIT 2"#);
//! # Ok::<(), pglit::OrmError>(())
//! ```

pub mod adapter;
pub mod builder;
pub mod client;
pub mod condition;
pub mod config;
pub mod error;
pub mod ident;
pub mod literal;
pub mod value;

pub use adapter::Adapter;
pub use builder::{Direction, Order, SelectBuilder, compose_select, select};
pub use client::{Connection, Row};
pub use condition::{Comparison, Op, Predicate, QueryBuilder, WhereBuilder};
pub use config::{AdapterConfig, ConnectionConfig};
pub use error::{OrmError, OrmResult};
pub use ident::{Ident, IntoIdent};
pub use literal::{EscapeStyle, Literal, LiteralSerializer};
pub use value::Value;
