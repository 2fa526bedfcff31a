//! SQL literal rendering.
//!
//! [`LiteralSerializer`] turns a [`Value`] into the exact text embedded in a
//! statement:
//!
//! | Value              | Literal                 |
//! |--------------------|-------------------------|
//! | `Integer`, `Float` | `42`, `1.5`             |
//! | `Boolean`          | `TRUE`, `FALSE`         |
//! | `Text`             | `'it\'s'`               |
//! | `Sequence`         | `'[1,"a",{"k":"v"}]'`   |
//! | `Mapping`          | `'{"k":"v"}'`           |
//!
//! Structured values are first written as JSON text (JSON string escaping),
//! then the whole JSON text is escaped and quoted as one SQL string literal.
//!
//! # Example
//! ```ignore
//! use pglit::{EscapeStyle, LiteralSerializer};
//!
//! let s = LiteralSerializer::new(EscapeStyle::Backslash);
//! assert_eq!(s.render("' OR 1; --")?.as_str(), r"'\' OR 1; --'");
//! # Ok::<(), pglit::OrmError>(())
//! ```

use crate::error::{OrmError, OrmResult};
use crate::value::Value;
use std::fmt::{self, Write as _};


/// How quote characters inside a string literal are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EscapeStyle {
    /// `'` becomes `\'` and `\` becomes `\\`.
    ///
    /// Requires a server that treats backslash as an escape inside plain
    /// string literals (`standard_conforming_strings = off`).
    #[default]
    Backslash,
    /// `'` becomes `''` (standard SQL). Backslashes pass through.
    DoubleQuote,
}

impl EscapeStyle {
    /// Escape `raw` without adding surrounding quotes.
    pub fn escape(self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        self.escape_into(raw, &mut out);
        out
    }

    fn escape_into(self, raw: &str, out: &mut String) {
        for ch in raw.chars() {
            match (self, ch) {
                (EscapeStyle::Backslash, '\\') => out.push_str("\\\\"),
                (EscapeStyle::Backslash, '\'') => out.push_str("\\'"),
                (EscapeStyle::DoubleQuote, '\'') => out.push_str("''"),
                _ => out.push(ch),
            }
        }
    }

    fn quote_into(self, raw: &str, out: &mut String) {
        out.reserve(raw.len() + 2);
        out.push('\'');
        self.escape_into(raw, out);
        out.push('\'');
    }
}

/// Renders [`Value`]s as SQL literal text.
///
/// The serializer holds no state besides its escape style, so one instance can
/// be shared freely across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralSerializer {
    style: EscapeStyle,
}

impl LiteralSerializer {
    pub fn new(style: EscapeStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> EscapeStyle {
        self.style
    }

    /// Render a value as a SQL literal.
    pub fn render(&self, value: impl Into<Value>) -> OrmResult<Literal> {
        let value = value.into();
        let mut sql = String::new();
        self.write_literal(&value, &mut sql)?;
        Ok(Literal {
            sql,
            value,
            style: self.style,
        })
    }

    fn write_literal(&self, value: &Value, out: &mut String) -> OrmResult<()> {
        match value {
            Value::Integer(i) => write_display(out, i),
            Value::Float(f) => {
                check_finite(*f)?;
                write_display(out, f);
            }
            Value::Boolean(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
            Value::Text(s) => {
                if s.contains('\0') {
                    return Err(OrmError::serialization(
                        "text",
                        "string literals cannot contain NUL characters",
                    ));
                }
                self.style.quote_into(s, out);
            }
            Value::Mapping(_) | Value::Sequence(_) => {
                let json = to_json_text(value)?;
                self.style.quote_into(&json, out);
            }
        }
        Ok(())
    }
}

fn write_display(out: &mut String, v: impl fmt::Display) {
    // Writing into a String cannot fail.
    let _ = write!(out, "{v}");
}

fn check_finite(f: f64) -> OrmResult<()> {
    if f.is_finite() {
        Ok(())
    } else {
        Err(OrmError::serialization(
            "float",
            format!("{f} has no SQL or JSON representation"),
        ))
    }
}

/// JSON text for a structured value.
///
/// serde_json would quietly write non-finite floats as `null`, so they are
/// rejected up front.
fn to_json_text(value: &Value) -> OrmResult<String> {
    check_json_floats(value)?;
    serde_json::to_string(value)
        .map_err(|e| OrmError::serialization(value.type_name(), e.to_string()))
}

fn check_json_floats(value: &Value) -> OrmResult<()> {
    match value {
        Value::Float(f) => check_finite(*f),
        Value::Integer(_) | Value::Boolean(_) | Value::Text(_) => Ok(()),
        Value::Mapping(entries) => entries.values().try_for_each(check_json_floats),
        Value::Sequence(items) => items.iter().try_for_each(check_json_floats),
    }
}

/// A rendered SQL literal together with the value it was rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    sql: String,
    value: Value,
    style: EscapeStyle,
}

impl Literal {
    /// The literal text, ready to embed in a statement.
    pub fn as_str(&self) -> &str {
        &self.sql
    }

    pub fn into_sql(self) -> String {
        self.sql
    }

    /// The value this literal was rendered from.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Whether the literal is wrapped in single quotes.
    pub fn is_quoted(&self) -> bool {
        !self.value.renders_bare()
    }

    /// The escape style the literal was rendered with.
    pub fn style(&self) -> EscapeStyle {
        self.style
    }

    /// Whether the literal text is read correctly by a session using `style`.
    ///
    /// Bare literals (numbers, booleans) read the same under every style.
    pub fn is_compatible_with(&self, style: EscapeStyle) -> bool {
        !self.is_quoted() || self.style == style
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

impl AsRef<str> for Literal {
    fn as_ref(&self) -> &str {
        &self.sql
    }
}
