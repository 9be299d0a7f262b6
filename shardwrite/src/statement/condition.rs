use std::collections::BTreeMap;
use std::fmt;

use crate::value::Value;

/// Comparison applied to an encrypted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    In,
    NotIn,
    Between,
    Like,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
        };
        f.write_str(value)
    }
}

/// One operand of a condition, by position.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    Parameter(usize),
    Literal(&'a Value),
}

/// A `WHERE` predicate comparing an encrypted column
/// against parameters and literals.
#[derive(Debug, Clone, PartialEq)]
pub struct EncryptCondition {
    pub table: String,
    pub column: String,
    pub operator: Operator,
    /// Operand position to parameter index.
    pub positions: BTreeMap<usize, usize>,
    /// Operand position to literal value.
    pub literals: BTreeMap<usize, Value>,
}

impl EncryptCondition {
    pub fn new(table: impl ToString, column: impl ToString, operator: Operator) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
            operator,
            positions: BTreeMap::new(),
            literals: BTreeMap::new(),
        }
    }

    /// Operand at `position` is the parameter marker `index`.
    pub fn with_parameter(mut self, position: usize, index: usize) -> Self {
        self.positions.insert(position, index);
        self
    }

    /// Operand at `position` is a literal.
    pub fn with_literal(mut self, position: usize, value: impl Into<Value>) -> Self {
        self.literals.insert(position, value.into());
        self
    }

    /// Operands ordered by position.
    pub fn operands(&self) -> Vec<(usize, Operand<'_>)> {
        let mut operands = self
            .positions
            .iter()
            .map(|(position, index)| (*position, Operand::Parameter(*index)))
            .chain(
                self.literals
                    .iter()
                    .map(|(position, value)| (*position, Operand::Literal(value))),
            )
            .collect::<Vec<_>>();
        operands.sort_by_key(|(position, _)| *position);
        operands
    }
}
