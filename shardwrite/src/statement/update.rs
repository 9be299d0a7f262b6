use super::condition::EncryptCondition;
use super::expression::Assignment;

/// Bound `UPDATE`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateStatement {
    pub table: String,
    pub assignments: Vec<Assignment>,
    pub where_present: bool,
    pub conditions: Vec<EncryptCondition>,
}

/// Bound `DELETE`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteStatement {
    pub table: String,
    pub where_present: bool,
    pub conditions: Vec<EncryptCondition>,
}
