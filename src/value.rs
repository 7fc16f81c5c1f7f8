use std::sync::Arc;

use crate::data_type::DataType;

/// Represents a single literal value, used as a filter argument or as the
/// repeated value of a constant column.
///
/// `Null` is the untyped null; once placed in a column it becomes that
/// column's null sentinel (`NaN` for floats, a missing string for text).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// represents an empty or missing value.
    Null,
    /// A 64-bit signed integer value.
    Int(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A UTF-8 string value, wrapped in an [Arc] for efficient,
    /// thread-safe sharing and cheap cloning.
    Text(Arc<str>),
    /// A boolean value.
    Bool(bool),
}

impl Value {
    /// Returns `true` if the value is [Value::Null].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the inner integer value if this is a [Value::Int].
    /// Otherwise, returns `None`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float if this is a [Value::Float] or a [Value::Int].
    /// Integers are widened so that float columns can be compared with integer literals.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns a reference to the inner string slice if this is a [Value::Text].
    /// Otherwise, returns `None`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the inner boolean value if this is a [Value::Bool].
    /// Otherwise, returns `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the [DataType] a column built from this value would have.
    ///
    /// Returns `None` for [Value::Null], which is untyped until it is placed in a column.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Int(_) => Some(DataType::Int),
            Self::Float(_) => Some(DataType::Float),
            Self::Text(_) => Some(DataType::Text),
            Self::Bool(_) => Some(DataType::Bool),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(Arc::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────
    // Test 1 : is_null
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_is_null() {
        assert!(Value::Null.is_null());
        assert!(!Value::Int(1).is_null());
        assert!(!Value::Float(f64::NAN).is_null());
        assert!(!Value::Text("x".into()).is_null());
    }

    // ─────────────────────────────────────────────────────────────
    // Test 2 : int literals widen to float
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_as_float_widens_int() {
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::Int(3).as_float(), Some(3.0));
        assert_eq!(Value::Bool(true).as_float(), None);
        assert_eq!(Value::Null.as_float(), None);
    }

    // ─────────────────────────────────────────────────────────────
    // Test 3 : conversions
    // ─────────────────────────────────────────────────────────────
    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(4), Value::Int(4));
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert_eq!(Value::from(1.5).data_type(), Some(DataType::Float));
        assert_eq!(Value::Null.data_type(), None);
    }
}
