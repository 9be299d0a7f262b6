//! Bound statement handed over by the parser.
//!
//! Only the parts of a statement the rewriter looks at are kept:
//! tables, parameter marker positions, pagination, ordering and the
//! conditions on encrypted columns.

pub mod condition;
pub mod expression;
pub mod insert;
pub mod select;
pub mod update;

pub use condition::{EncryptCondition, Operand, Operator};
pub use expression::{Assignment, Expression};
pub use insert::{GeneratedKey, InsertStatement};
pub use select::{Aggregation, Limit, LimitValue, OrderDirection, OrderItem, SelectStatement};
pub use update::{DeleteStatement, UpdateStatement};

/// Statement kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStatement),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
    /// DDL and anything else that only carries table, schema or index tokens.
    Other,
}

impl Statement {
    /// Conditions on encrypted columns in the `WHERE` clause.
    pub fn conditions(&self) -> &[EncryptCondition] {
        match self {
            Self::Select(select) => &select.conditions,
            Self::Update(update) => &update.conditions,
            Self::Delete(delete) => &delete.conditions,
            Self::Insert(_) | Self::Other => &[],
        }
    }

    /// Statement has a `WHERE` clause.
    pub fn where_present(&self) -> bool {
        match self {
            Self::Select(select) => select.where_present,
            Self::Update(update) => update.where_present,
            Self::Delete(delete) => delete.where_present,
            Self::Insert(_) | Self::Other => false,
        }
    }

    pub fn select(&self) -> Option<&SelectStatement> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }

    pub fn insert(&self) -> Option<&InsertStatement> {
        match self {
            Self::Insert(insert) => Some(insert),
            _ => None,
        }
    }
}
