//! Adapter facade over a [`Connection`].
//!
//! # Example
//! ```ignore
//! use pglit::{Adapter, AdapterConfig, ConnectionConfig, Order};
//!
//! let config = AdapterConfig::new(ConnectionConfig::new("blog"));
//! let (client, connection) = config.to_pg_config().connect(tokio_postgres::NoTls).await?;
//! tokio::spawn(connection);
//! let adapter = Adapter::new(config, client);
//! let p = adapter.query(|w| {
//!     w.and_eq("author", "Jamie");
//! })?;
//! let rows = adapter
//!     .retrieve("Article", Some(&p), Some(Order::desc("created_at")?), Some(10))
//!     .await?;
//! ```

use crate::builder::{Order, SelectBuilder};
use crate::client::{Connection, Row};
use crate::condition::{Predicate, QueryBuilder, WhereBuilder};
use crate::config::AdapterConfig;
use crate::error::OrmResult;
use crate::ident::IntoIdent;
use crate::literal::{Literal, LiteralSerializer};
use crate::value::Value;

/// Ties literal rendering, predicate building and statement assembly to a
/// connection.
pub struct Adapter<C> {
    config: AdapterConfig,
    query: QueryBuilder,
    conn: C,
}

impl<C: Connection> Adapter<C> {
    /// Wrap `conn` with the literal rules of `config`.
    ///
    /// `conn` must read string literals the way `config.escape_style` writes
    /// them. Open it from [`AdapterConfig::to_pg_config`], which sets
    /// `standard_conforming_strings=off` for the backslash style.
    pub fn new(config: AdapterConfig, conn: C) -> Self {
        let query = QueryBuilder::new(config.serializer());
        Self {
            config,
            query,
            conn,
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn serializer(&self) -> &LiteralSerializer {
        self.query.serializer()
    }

    /// Render a value as a SQL literal for this adapter's escape style.
    pub fn literal(&self, value: impl Into<Value>) -> OrmResult<Literal> {
        self.query.serializer().render(value)
    }

    /// Build a predicate; see [`QueryBuilder::predicate`].
    pub fn query<F>(&self, build: F) -> OrmResult<Predicate>
    where
        F: FnOnce(&mut WhereBuilder<'_>),
    {
        self.query.predicate(build)
    }

    /// Start a SELECT over `table`.
    pub fn select<I: IntoIdent>(&self, table: I) -> SelectBuilder {
        SelectBuilder::new(table)
    }

    /// Compose a SELECT and run it. `predicate: None` selects without a WHERE clause.
    pub async fn retrieve<I: IntoIdent>(
        &self,
        table: I,
        predicate: Option<&Predicate>,
        order: Option<Order>,
        limit: Option<u64>,
    ) -> OrmResult<Vec<Row>> {
        let mut qb = self.select(table);
        if let Some(p) = predicate {
            qb.filter(p);
        }
        if let Some(o) = order {
            qb.order_by(o);
        }
        if let Some(n) = limit {
            qb.limit(n);
        }
        let sql = qb.build()?;
        self.execute(&sql).await
    }

    /// Run a complete statement on the connection.
    pub async fn execute(&self, sql: &str) -> OrmResult<Vec<Row>> {
        self.trace_sql(sql);
        let result = self.conn.execute(sql).await;
        #[cfg(feature = "tracing")]
        if let Err(err) = &result {
            tracing::warn!(target: "pglit.sql", error = %err, "statement failed");
        }
        result
    }

    #[cfg(feature = "tracing")]
    fn trace_sql(&self, sql: &str) {
        match self.config.max_logged_sql {
            Some(max) if sql.len() > max => {
                let shown = format!("{}...", truncate_sql_bytes(sql, max));
                tracing::debug!(target: "pglit.sql", sql = %shown);
            }
            _ => tracing::debug!(target: "pglit.sql", sql = %sql),
        }
    }

    #[cfg(not(feature = "tracing"))]
    fn trace_sql(&self, _sql: &str) {}
}

#[cfg(feature = "tracing")]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
