use crate::condition::Predicate;
use crate::error::{OrmError, OrmResult};
use crate::ident::{Ident, IntoIdent};
use std::str::FromStr;

/// Largest value PostgreSQL accepts for `LIMIT` (a `bigint`).
pub const MAX_LIMIT: u64 = i64::MAX as u64;

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

impl FromStr for Direction {
    type Err = OrmError;

    /// Parse `asc` / `desc`, case-insensitively.
    fn from_str(s: &str) -> OrmResult<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Direction::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Direction::Desc)
        } else {
            Err(OrmError::validation(format!(
                "Unknown order direction {s:?}, expected asc or desc"
            )))
        }
    }
}

/// An `ORDER BY` term: a column and an optional direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    column: Ident,
    direction: Option<Direction>,
}

impl Order {
    /// Order by a column without a direction suffix.
    pub fn by<I: IntoIdent>(column: I) -> OrmResult<Self> {
        Ok(Self {
            column: column.into_ident()?,
            direction: None,
        })
    }

    pub fn asc<I: IntoIdent>(column: I) -> OrmResult<Self> {
        Ok(Self::by(column)?.with_direction(Direction::Asc))
    }

    pub fn desc<I: IntoIdent>(column: I) -> OrmResult<Self> {
        Ok(Self::by(column)?.with_direction(Direction::Desc))
    }

    /// Build from a column name and an optional textual direction (`"asc"`, `"DESC"`).
    pub fn parse<I: IntoIdent>(column: I, direction: Option<&str>) -> OrmResult<Self> {
        let direction = direction.map(str::parse::<Direction>).transpose()?;
        Ok(Self {
            column: column.into_ident()?,
            direction,
        })
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn column(&self) -> &Ident {
        &self.column
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    fn write_sql(&self, out: &mut String) {
        self.column.write_sql(out);
        if let Some(direction) = self.direction {
            out.push(' ');
            out.push_str(direction.as_str());
        }
    }
}

/// Start a SELECT over `table`.
pub fn select<I: IntoIdent>(table: I) -> SelectBuilder {
    SelectBuilder::new(table)
}

/// Compose a SELECT from its parts in one call.
///
/// `predicate` is rendered boolean text (see [`Predicate::to_sql`]); `None`
/// omits the WHERE clause.
pub fn compose_select<I: IntoIdent>(
    table: I,
    predicate: Option<&str>,
    order: Option<Order>,
    limit: Option<u64>,
) -> OrmResult<String> {
    let mut qb = SelectBuilder::new(table);
    if let Some(p) = predicate {
        qb.filter_raw(p);
    }
    if let Some(o) = order {
        qb.order_by(o);
    }
    if let Some(n) = limit {
        qb.limit(n);
    }
    qb.build()
}

/// Structured `SELECT *` builder.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    /// Main table (None when the name failed validation)
    table: Option<Ident>,
    /// Rendered WHERE expression
    predicate: Option<String>,
    /// ORDER BY term
    order: Option<Order>,
    /// LIMIT
    limit: Option<u64>,
    /// Identifier error message (validated at build time)
    build_error: Option<String>,
}

impl SelectBuilder {
    /// Create a new builder. An invalid table name is reported by [`SelectBuilder::build`].
    pub fn new<I: IntoIdent>(table: I) -> Self {
        let (table, build_error) = match table.into_ident() {
            Ok(t) => (Some(t), None),
            Err(e) => (None, Some(identifier_message(e))),
        };
        Self {
            table,
            predicate: None,
            order: None,
            limit: None,
            build_error,
        }
    }

    /// Set the WHERE expression from a built predicate. Replaces any previous one.
    pub fn filter(&mut self, predicate: &Predicate) -> &mut Self {
        self.predicate = Some(predicate.to_sql());
        self
    }

    /// Set the WHERE expression from pre-rendered text.
    ///
    /// The text is embedded verbatim. Pass only output of [`Predicate::to_sql`]
    /// or text built from literals rendered by this crate.
    pub fn filter_raw(&mut self, sql: &str) -> &mut Self {
        self.predicate = Some(sql.to_string());
        self
    }

    pub fn order_by(&mut self, order: Order) -> &mut Self {
        self.order = Some(order);
        self
    }

    /// Order by a column name, recording an invalid name as a build error.
    pub fn order_by_column<I: IntoIdent>(
        &mut self,
        column: I,
        direction: Option<Direction>,
    ) -> &mut Self {
        match Order::by(column) {
            Ok(o) => {
                self.order = Some(match direction {
                    Some(d) => o.with_direction(d),
                    None => o,
                });
            }
            Err(e) => {
                self.build_error.get_or_insert(identifier_message(e));
            }
        }
        self
    }

    pub fn limit(&mut self, limit: u64) -> &mut Self {
        self.limit = Some(limit);
        self
    }

    /// Validate builder state.
    pub fn validate(&self) -> OrmResult<()> {
        if let Some(msg) = &self.build_error {
            return Err(OrmError::identifier(msg.clone()));
        }
        if self.predicate.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(OrmError::validation("WHERE predicate text is empty"));
        }
        match self.limit {
            Some(0) => return Err(OrmError::validation("LIMIT must be a positive integer")),
            Some(n) if n > MAX_LIMIT => {
                return Err(OrmError::validation(format!(
                    "LIMIT {n} exceeds the bigint maximum {MAX_LIMIT}"
                )));
            }
            _ => {}
        }
        Ok(())
    }

    /// Build the SQL string.
    pub fn build(&self) -> OrmResult<String> {
        self.validate()?;
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| OrmError::identifier("Missing table identifier"))?;

        let mut sql = String::from("SELECT * FROM ");
        table.write_quoted(&mut sql);

        if let Some(predicate) = &self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(predicate);
        }

        if let Some(order) = &self.order {
            sql.push_str(" ORDER BY ");
            order.write_sql(&mut sql);
        }

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }

        Ok(sql)
    }
}

fn identifier_message(err: OrmError) -> String {
    match err {
        OrmError::Identifier(msg) => msg,
        other => other.to_string(),
    }
}
