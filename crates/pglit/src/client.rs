//! The connection collaborator.
//!
//! Statements built by this crate carry their values inline as literals, so
//! they are executed through the simple-query protocol with no bind
//! parameters. Rows come back as text.

use crate::error::OrmResult;
use tokio_postgres::SimpleQueryMessage;

/// Executes complete SQL statements.
///
/// Implementations report failures as [`OrmError::Connection`](crate::OrmError::Connection),
/// or [`OrmError::Query`](crate::OrmError::Query) for driver errors. Callers in
/// this crate never retry or reinterpret them.
pub trait Connection: Send + Sync {
    /// Execute `sql` and return every row it produced.
    fn execute(&self, sql: &str) -> impl std::future::Future<Output = OrmResult<Vec<Row>>> + Send;
}

impl Connection for tokio_postgres::Client {
    fn execute(&self, sql: &str) -> impl std::future::Future<Output = OrmResult<Vec<Row>>> + Send {
        async move {
            let messages = self.simple_query(sql).await?;
            Ok(messages
                .iter()
                .filter_map(|m| match m {
                    SimpleQueryMessage::Row(row) => Some(Row::from_simple(row)),
                    _ => None,
                })
                .collect())
        }
    }
}

/// One result row: column names with their text values (`None` for NULL).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    columns: Vec<(String, Option<String>)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Used by connection implementations and test doubles.
    pub fn push(&mut self, name: impl Into<String>, value: Option<impl Into<String>>) -> &mut Self {
        self.columns.push((name.into(), value.map(Into::into)));
        self
    }

    fn from_simple(row: &tokio_postgres::SimpleQueryRow) -> Self {
        let columns = row
            .columns()
            .iter()
            .enumerate()
            .map(|(i, col)| (col.name().to_string(), row.get(i).map(str::to_string)))
            .collect();
        Self { columns }
    }

    /// Text value of `column`. `None` if the column is missing or NULL.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether the row has a column named `column` (even if NULL).
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|(name, _)| name == column)
    }

    /// Column names in result order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
