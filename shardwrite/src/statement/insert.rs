use super::expression::{Assignment, Expression};
use super::select::SelectStatement;
use crate::value::Value;

/// Generated key column.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedKey {
    pub column: String,
    /// One value per insert row.
    pub values: Vec<Value>,
    /// The column wasn't in the statement and the
    /// rewriter has to add it.
    pub derived: bool,
}

/// Bound `INSERT`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertStatement {
    pub table: String,
    /// Inserted columns as written, without the derived generated key.
    pub columns: Vec<String>,
    /// `VALUES (...), (...)`, one entry per row.
    pub rows: Vec<Vec<Expression>>,
    /// `INSERT ... SET col = val`.
    pub set_assignments: Vec<Assignment>,
    /// `ON DUPLICATE KEY UPDATE`.
    pub on_duplicate_key: Vec<Assignment>,
    /// `INSERT ... SELECT`.
    pub select: Option<Box<SelectStatement>>,
    pub generated_key: Option<GeneratedKey>,
}

impl InsertStatement {
    pub fn has_values(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn has_set(&self) -> bool {
        !self.set_assignments.is_empty()
    }

    /// Generated key column that has to be added to the statement.
    pub fn derived_column(&self) -> Option<&GeneratedKey> {
        self.generated_key.as_ref().filter(|key| key.derived)
    }

    /// Statement binds parameters in its value rows.
    pub fn uses_parameters(&self) -> bool {
        self.rows
            .iter()
            .flatten()
            .any(|expression| !expression.parameters().is_empty())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_derived_column() {
        let mut insert = InsertStatement {
            generated_key: Some(GeneratedKey {
                column: "order_id".into(),
                values: vec![Value::from(1)],
                derived: false,
            }),
            ..Default::default()
        };
        assert!(insert.derived_column().is_none());
        if let Some(key) = insert.generated_key.as_mut() {
            key.derived = true;
        }
        assert_eq!(insert.derived_column().unwrap().column, "order_id");
    }
}
