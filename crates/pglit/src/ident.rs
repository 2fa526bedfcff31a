//! Safe SQL identifier handling.
//!
//! Identifiers are interpolated into statements as-is (columns) or wrapped in
//! double quotes (tables). Unlike values they are never escaped, so every part
//! must match `[A-Za-z_][A-Za-z0-9_]*`.
//!
//! # Example
//! ```ignore
//! use pglit::Ident;
//!
//! let t = Ident::parse("Article")?;
//! assert_eq!(t.to_quoted_sql(), r#""Article""#);
//! # Ok::<(), pglit::OrmError>(())
//! ```

use crate::error::{OrmError, OrmResult};
use std::fmt;

/// A validated SQL identifier (table, column or order name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    /// Validate an identifier string.
    pub fn parse(s: &str) -> OrmResult<Self> {
        let mut chars = s.chars();
        match chars.next() {
            None => return Err(OrmError::identifier("Identifier cannot be empty")),
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            Some(c) => {
                return Err(OrmError::identifier(format!(
                    "Invalid identifier start character {c:?} in {s:?}"
                )));
            }
        }
        if let Some(c) = chars.find(|c| !(*c == '_' || c.is_ascii_alphanumeric())) {
            return Err(OrmError::identifier(format!(
                "Invalid character {c:?} in identifier {s:?}"
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// The raw identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the identifier unquoted (columns).
    pub fn to_sql(&self) -> String {
        self.0.clone()
    }

    /// Render the identifier double-quoted (tables).
    pub fn to_quoted_sql(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 2);
        self.write_quoted(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push_str(&self.0);
    }

    pub(crate) fn write_quoted(&self, out: &mut String) {
        out.push('"');
        out.push_str(&self.0);
        out.push('"');
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convert an input into an [`Ident`].
///
/// This is mainly for ergonomics in builder APIs.
pub trait IntoIdent {
    fn into_ident(self) -> OrmResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> OrmResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> OrmResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> OrmResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> OrmResult<Ident> {
        Ident::parse(&self)
    }
}

impl IntoIdent for &String {
    fn into_ident(self) -> OrmResult<Ident> {
        Ident::parse(self)
    }
}
