//! Values that can be rendered as SQL literals.
//!
//! [`Value`] is a closed set of variants. Anything outside it (NULL, integers
//! wider than `i64`) is rejected when the value is constructed, so rendering
//! never has to guess.

use crate::error::{OrmError, OrmResult};
use crate::literal::Literal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A value that renders to exactly one SQL literal form.
///
/// # Example
/// ```ignore
/// use pglit::Value;
///
/// let tags = Value::from(vec!["rust", "sql"]);
/// let meta: Value = [("views", 10)].into_iter().collect::<std::collections::BTreeMap<_, _>>().into();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Rendered bare: `42`
    Integer(i64),
    /// Rendered bare: `1.5`
    Float(f64),
    /// Rendered bare: `TRUE` / `FALSE`
    Boolean(bool),
    /// Rendered escaped and quoted: `'text'`
    Text(String),
    /// Rendered as a quoted JSON object: `'{"k":"v"}'`
    Mapping(BTreeMap<String, Value>),
    /// Rendered as a quoted JSON array: `'[1,"a"]'`
    Sequence(Vec<Value>),
}

impl Value {
    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Text(_) => "text",
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
        }
    }

    /// Whether this value renders as an unquoted literal.
    pub fn renders_bare(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_) | Value::Boolean(_))
    }

    /// Whether this value renders as embedded JSON text.
    pub fn is_structured(&self) -> bool {
        matches!(self, Value::Mapping(_) | Value::Sequence(_))
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(v: BTreeMap<K, V>) -> Self {
        Value::Mapping(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(v: HashMap<K, V>) -> Self {
        Value::Mapping(v.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// An already-rendered literal is unwrapped to the value it was rendered from,
/// so nesting it re-renders the structure instead of escaping the SQL text twice.
impl From<Literal> for Value {
    fn from(v: Literal) -> Self {
        v.into_value()
    }
}

impl From<&Literal> for Value {
    fn from(v: &Literal) -> Self {
        v.value().clone()
    }
}

impl TryFrom<u64> for Value {
    type Error = OrmError;

    fn try_from(v: u64) -> OrmResult<Self> {
        i64::try_from(v).map(Value::Integer).map_err(|_| {
            OrmError::serialization("u64", format!("{v} does not fit in a signed 64-bit integer"))
        })
    }
}

impl TryFrom<serde_json::Value> for Value {
    type Error = OrmError;

    fn try_from(v: serde_json::Value) -> OrmResult<Self> {
        match v {
            serde_json::Value::Null => Err(OrmError::serialization(
                "null",
                "NULL has no literal form here",
            )),
            serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(i))
                } else if n.is_u64() {
                    Err(OrmError::serialization(
                        "u64",
                        format!("{n} does not fit in a signed 64-bit integer"),
                    ))
                } else {
                    n.as_f64().map(Value::Float).ok_or_else(|| {
                        OrmError::serialization("number", format!("{n} is not representable"))
                    })
                }
            }
            serde_json::Value::String(s) => Ok(Value::Text(s)),
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<OrmResult<Vec<_>>>()
                .map(Value::Sequence),
            serde_json::Value::Object(entries) => entries
                .into_iter()
                .map(|(k, v)| Value::try_from(v).map(|v| (k, v)))
                .collect::<OrmResult<BTreeMap<_, _>>>()
                .map(Value::Mapping),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_primitives() {
        assert_eq!(Value::from(1i32), Value::Integer(1));
        assert_eq!(Value::from(7u8), Value::Integer(7));
        assert_eq!(Value::from(1.5f64), Value::Float(1.5));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from("a"), Value::Text("a".into()));
    }

    #[test]
    fn from_collections() {
        let seq = Value::from(vec![1, 2]);
        assert_eq!(seq, Value::Sequence(vec![Value::Integer(1), Value::Integer(2)]));

        let mut map = HashMap::new();
        map.insert("k", "v");
        let Value::Mapping(m) = Value::from(map) else {
            panic!("expected mapping");
        };
        assert_eq!(m.get("k"), Some(&Value::Text("v".into())));
    }

    #[test]
    fn u64_out_of_range_is_rejected() {
        assert_eq!(Value::try_from(5u64).unwrap(), Value::Integer(5));
        let err = Value::try_from(u64::MAX).unwrap_err();
        assert!(matches!(err, OrmError::Serialization { type_name: "u64", .. }));
    }

    #[test]
    fn json_null_is_rejected_at_construction() {
        let err = Value::try_from(json!({"a": [1, null]})).unwrap_err();
        assert!(matches!(err, OrmError::Serialization { type_name: "null", .. }));
    }

    #[test]
    fn json_conversion_keeps_structure() {
        let v = Value::try_from(json!({"n": 1, "f": 2.5, "s": "x", "l": [true]})).unwrap();
        let Value::Mapping(m) = v else {
            panic!("expected mapping");
        };
        assert_eq!(m["n"], Value::Integer(1));
        assert_eq!(m["f"], Value::Float(2.5));
        assert_eq!(m["s"], Value::Text("x".into()));
        assert_eq!(m["l"], Value::Sequence(vec![Value::Boolean(true)]));
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::from(vec![1]).type_name(), "sequence");
        assert_eq!(Value::Mapping(BTreeMap::new()).type_name(), "mapping");
        assert!(Value::from(1).renders_bare());
        assert!(Value::from(vec![1]).is_structured());
    }
}
