//! Scalar values carried between controls and the settings store
//!
//! Conversions are total: a value of the wrong type never fails, it degrades
//! to the closest sensible reading or to the empty value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A persistable scalar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
}

impl Value {
    /// Read as a boolean
    ///
    /// Text is false when empty, `"0"` or `"false"` (case-insensitive).
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Double(d) => *d != 0.0,
            Value::Text(s) => {
                let s = s.trim();
                !(s.is_empty() || s == "0" || s.eq_ignore_ascii_case("false"))
            }
        }
    }

    /// Read as an integer
    ///
    /// Doubles round to nearest and saturate at the `i64` bounds; text that is
    /// neither an integer nor a float reads as 0.
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Bool(b) => i64::from(*b),
            Value::Int(i) => *i,
            Value::Double(d) => round_saturating(*d),
            Value::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().map(round_saturating))
                    .unwrap_or(0)
            }
        }
    }

    /// Read as a double; unparseable text reads as 0.0
    pub fn to_double(&self) -> f64 {
        match self {
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Int(i) => *i as f64,
            Value::Double(d) => *d,
            Value::Text(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    /// Read as text
    ///
    /// Doubles use the shortest representation that parses back to the same
    /// value.
    pub fn to_text(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Name of the variant, for logs
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Text(_) => "text",
        }
    }
}

fn round_saturating(d: f64) -> i64 {
    if d.is_nan() {
        0
    } else {
        // `as` saturates at the bounds
        d.round() as i64
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
