//! Predicate building for WHERE clauses.
//!
//! A [`Predicate`] is an ordered list of [`Comparison`]s joined with `AND`.
//! Right-hand values are rendered to literals by the [`LiteralSerializer`]
//! when the comparison is built, so a predicate never carries unrendered input.
//!
//! # Example
//! ```ignore
//! use pglit::{LiteralSerializer, QueryBuilder};
//!
//! let qb = QueryBuilder::new(LiteralSerializer::default());
//! let p = qb.predicate(|w| {
//!     w.and_eq("name", "foo").and_gt("age", 18);
//! })?;
//! assert_eq!(p.to_sql(), "name = 'foo' AND age > 18");
//! # Ok::<(), pglit::OrmError>(())
//! ```

use crate::error::{OrmError, OrmResult};
use crate::ident::{Ident, IntoIdent};
use crate::literal::{Literal, LiteralSerializer};
use crate::value::Value;
use std::fmt;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal: column = value
    Eq,
    /// Not equal: column != value
    Ne,
    /// Greater than: column > value
    Gt,
    /// Greater than or equal: column >= value
    Gte,
    /// Less than: column < value
    Lt,
    /// Less than or equal: column <= value
    Lte,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "=",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<field> <op> <literal>` term. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    field: Ident,
    op: Op,
    value: Literal,
}

impl Comparison {
    pub fn field(&self) -> &Ident {
        &self.field
    }

    pub fn op(&self) -> Op {
        self.op
    }

    pub fn value(&self) -> &Literal {
        &self.value
    }

    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    fn write_sql(&self, out: &mut String) {
        self.field.write_sql(out);
        out.push(' ');
        out.push_str(self.op.as_str());
        out.push(' ');
        out.push_str(self.value.as_str());
    }
}

/// Comparisons joined with `AND`, left to right.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    comparisons: Vec<Comparison>,
}

impl Predicate {
    /// A predicate that matches every row.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }

    /// Render as a boolean expression. An empty predicate renders `TRUE`.
    pub fn to_sql(&self) -> String {
        if self.comparisons.is_empty() {
            return "TRUE".to_string();
        }
        let mut out = String::new();
        for (i, c) in self.comparisons.iter().enumerate() {
            if i > 0 {
                out.push_str(" AND ");
            }
            c.write_sql(&mut out);
        }
        out
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

/// Builds comparisons and predicates using one [`LiteralSerializer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder {
    serializer: LiteralSerializer,
}

impl QueryBuilder {
    pub fn new(serializer: LiteralSerializer) -> Self {
        Self { serializer }
    }

    pub fn serializer(&self) -> &LiteralSerializer {
        &self.serializer
    }

    /// Build a single comparison, validating the field and rendering the value.
    pub fn comparison<I, V>(&self, field: I, op: Op, value: V) -> OrmResult<Comparison>
    where
        I: IntoIdent,
        V: Into<Value>,
    {
        Ok(Comparison {
            field: field.into_ident()?,
            op,
            value: self.serializer.render(value)?,
        })
    }

    /// Build an equality comparison: field = value
    pub fn eq<I, V>(&self, field: I, value: V) -> OrmResult<Comparison>
    where
        I: IntoIdent,
        V: Into<Value>,
    {
        self.comparison(field, Op::Eq, value)
    }

    /// Start an empty WHERE builder.
    pub fn where_builder(&self) -> WhereBuilder<'_> {
        WhereBuilder {
            builder: self,
            comparisons: Vec::new(),
            build_error: None,
        }
    }

    /// Build a predicate from a closure over a [`WhereBuilder`].
    ///
    /// The first failing comparison is reported; nothing after it is kept.
    pub fn predicate<F>(&self, build: F) -> OrmResult<Predicate>
    where
        F: FnOnce(&mut WhereBuilder<'_>),
    {
        let mut w = self.where_builder();
        build(&mut w);
        w.build()
    }
}

/// Accumulates comparisons for one predicate.
///
/// Methods chain; a failure is recorded and surfaced by [`WhereBuilder::build`].
pub struct WhereBuilder<'a> {
    builder: &'a QueryBuilder,
    comparisons: Vec<Comparison>,
    /// First build error (validated at build time)
    build_error: Option<OrmError>,
}

impl WhereBuilder<'_> {
    fn add_condition<I, V>(&mut self, field: I, op: Op, value: V) -> &mut Self
    where
        I: IntoIdent,
        V: Into<Value>,
    {
        if self.build_error.is_some() {
            return self;
        }
        match self.builder.comparison(field, op, value) {
            Ok(c) => self.comparisons.push(c),
            Err(e) => self.build_error = Some(e),
        }
        self
    }

    /// Add AND equality condition.
    pub fn and_eq<I: IntoIdent, V: Into<Value>>(&mut self, field: I, value: V) -> &mut Self {
        self.add_condition(field, Op::Eq, value)
    }

    /// Add AND not-equal condition.
    pub fn and_ne<I: IntoIdent, V: Into<Value>>(&mut self, field: I, value: V) -> &mut Self {
        self.add_condition(field, Op::Ne, value)
    }

    /// Add AND > condition.
    pub fn and_gt<I: IntoIdent, V: Into<Value>>(&mut self, field: I, value: V) -> &mut Self {
        self.add_condition(field, Op::Gt, value)
    }

    /// Add AND >= condition.
    pub fn and_gte<I: IntoIdent, V: Into<Value>>(&mut self, field: I, value: V) -> &mut Self {
        self.add_condition(field, Op::Gte, value)
    }

    /// Add AND < condition.
    pub fn and_lt<I: IntoIdent, V: Into<Value>>(&mut self, field: I, value: V) -> &mut Self {
        self.add_condition(field, Op::Lt, value)
    }

    /// Add AND <= condition.
    pub fn and_lte<I: IntoIdent, V: Into<Value>>(&mut self, field: I, value: V) -> &mut Self {
        self.add_condition(field, Op::Lte, value)
    }

    /// Add an equality condition only when a value is present.
    pub fn and_eq_opt<I: IntoIdent, V: Into<Value>>(
        &mut self,
        field: I,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.and_eq(field, v);
        }
        self
    }

    /// Add an already built comparison.
    ///
    /// A quoted value rendered under a different
    /// [`EscapeStyle`](crate::EscapeStyle) than this builder's serializer is
    /// recorded as a validation error.
    pub fn and(&mut self, comparison: Comparison) -> &mut Self {
        if self.build_error.is_some() {
            return self;
        }
        let style = self.builder.serializer().style();
        if comparison.value.is_compatible_with(style) {
            self.comparisons.push(comparison);
        } else {
            self.build_error = Some(OrmError::validation(format!(
                "comparison on {} was rendered with {:?} escaping, expected {:?}",
                comparison.field,
                comparison.value.style(),
                style
            )));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }

    /// Finish the predicate, or return the first recorded error.
    pub fn build(self) -> OrmResult<Predicate> {
        if let Some(err) = self.build_error {
            return Err(err);
        }
        Ok(Predicate {
            comparisons: self.comparisons,
        })
    }
}
