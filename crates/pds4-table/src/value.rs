//! Record field values.

use serde::{Deserialize, Serialize};

/// A single value supplied to [`add_record`](crate::TableCharacter::add_record).
///
/// Values are untyped at declaration time; the field's format specifier
/// decides how a value is rendered, and rejects kinds it cannot express.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Text, rendered by the `s` specifier.
    Text(String),
    /// Signed integer, rendered by `d` and `o` and accepted by `f`, `e`, `E`.
    Integer(i64),
    /// Floating-point number, rendered by `f`, `e` and `E`; `d` and `o`
    /// truncate it toward zero.
    Real(f64),
}

impl FieldValue {
    /// Create a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The value kind name, used in validation errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
        }
    }

    /// The value as an integer, truncating reals toward zero.
    #[must_use]
    pub(crate) fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Text(_) => None,
            Self::Integer(value) => Some(*value),
            Self::Real(value) => Some(value.trunc() as i64),
        }
    }

    /// The value as a real number.
    #[must_use]
    pub(crate) fn as_real(&self) -> Option<f64> {
        match self {
            Self::Text(_) => None,
            Self::Integer(value) => Some(*value as f64),
            Self::Real(value) => Some(*value),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercions() {
        assert_eq!(FieldValue::Real(3.9).as_integer(), Some(3));
        assert_eq!(FieldValue::Real(-3.9).as_integer(), Some(-3));
        assert_eq!(FieldValue::Integer(7).as_real(), Some(7.0));
        assert_eq!(FieldValue::text("abc").as_integer(), None);
        assert_eq!(FieldValue::text("abc").as_real(), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldValue::from("x").kind(), "string");
        assert_eq!(FieldValue::from(1).kind(), "integer");
        assert_eq!(FieldValue::from(1.0).kind(), "real");
    }
}
