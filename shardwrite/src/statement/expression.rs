use crate::value::Value;

/// Right-hand side of an assignment or one value of an insert row.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Parameter marker, index into the bind parameters.
    Parameter(usize),
    /// Literal written in the statement.
    Literal(Value),
    /// Anything else, kept as written. Parameter markers inside
    /// it are listed so they can be carried over.
    Complex { text: String, parameters: Vec<usize> },
    /// `VALUES(column)` in `ON DUPLICATE KEY UPDATE`.
    ValuesRef(String),
}

impl Expression {
    /// Index of the parameter marker, if this is one.
    pub fn parameter(&self) -> Option<usize> {
        match self {
            Self::Parameter(index) => Some(*index),
            _ => None,
        }
    }

    /// All parameter markers in this expression, in order.
    pub fn parameters(&self) -> Vec<usize> {
        match self {
            Self::Parameter(index) => vec![*index],
            Self::Complex { parameters, .. } => parameters.clone(),
            Self::Literal(_) | Self::ValuesRef(_) => vec![],
        }
    }

    /// Render back to SQL.
    pub fn to_sql(&self) -> String {
        match self {
            Self::Parameter(_) => "?".into(),
            Self::Literal(value) => value.to_sql_literal(),
            Self::Complex { text, .. } => text.clone(),
            Self::ValuesRef(column) => format!("VALUES({})", column),
        }
    }
}

/// `column = value` in `UPDATE ... SET`, `INSERT ... SET`
/// or `ON DUPLICATE KEY UPDATE`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Expression,
}

impl Assignment {
    pub fn new(column: impl ToString, value: Expression) -> Self {
        Self {
            column: column.to_string(),
            value,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_expression_sql() {
        assert_eq!(Expression::Parameter(0).to_sql(), "?");
        assert_eq!(Expression::ValuesRef("pwd".into()).to_sql(), "VALUES(pwd)");
        let complex = Expression::Complex {
            text: "age + ?".into(),
            parameters: vec![3],
        };
        assert_eq!(complex.to_sql(), "age + ?");
        assert_eq!(complex.parameters(), vec![3]);
    }
}
