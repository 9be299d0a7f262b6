//! Bind parameter and literal values.

use derive_more::Display;

/// A value bound to a parameter marker or written as a literal.
#[derive(Debug, Clone, PartialEq, Display, Default)]
pub enum Value {
    #[default]
    #[display("NULL")]
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    Text(String),
}

impl Value {
    /// Is this SQL NULL?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render as a SQL literal that can be spliced into statement text.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Self::Null => "NULL".into(),
            Self::Bool(true) => "TRUE".into(),
            Self::Bool(false) => "FALSE".into(),
            Self::Integer(value) => value.to_string(),
            Self::Double(value) => value.to_string(),
            Self::Text(value) => format!("'{}'", value.replace('\'', "''")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sql_literal() {
        assert_eq!(Value::Null.to_sql_literal(), "NULL");
        assert_eq!(Value::from(true).to_sql_literal(), "TRUE");
        assert_eq!(Value::from(42).to_sql_literal(), "42");
        assert_eq!(Value::from("it's").to_sql_literal(), "'it''s'");
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
    }
}
