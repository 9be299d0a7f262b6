//! Parameter rewriting.
//!
//! Tracks replacements and additions against the bound parameters,
//! separately from the statement text.

pub mod grouped;
pub mod standard;

pub use grouped::GroupedParameterBuilder;
pub use standard::StandardParameterBuilder;

use crate::statement::Statement;
use crate::value::Value;

/// Parameters of one statement, flat or grouped by insert row.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterBuilder {
    Standard(StandardParameterBuilder),
    Grouped(GroupedParameterBuilder),
}

impl ParameterBuilder {
    /// Group parameters by row for inserts with a value list,
    /// keep them flat for everything else.
    pub fn new(statement: &Statement, parameters: &[Value]) -> Self {
        match statement.insert() {
            Some(insert) if insert.has_values() => {
                Self::Grouped(GroupedParameterBuilder::new(insert, parameters))
            }
            _ => Self::Standard(StandardParameterBuilder::new(parameters.to_vec())),
        }
    }

    /// Parameter groups for the whole statement. Flat parameters
    /// are a single group.
    pub fn groups(&self) -> Vec<Vec<Value>> {
        match self {
            Self::Standard(builder) => vec![builder.parameters()],
            Self::Grouped(builder) => builder.groups(),
        }
    }

    /// Parameters shared by every group.
    pub fn generic_parameters(&self) -> Vec<Value> {
        match self {
            Self::Standard(_) => vec![],
            Self::Grouped(builder) => builder.generic().parameters(),
        }
    }

    /// All parameters, flattened.
    pub fn parameters(&self) -> Vec<Value> {
        match self {
            Self::Standard(builder) => builder.parameters(),
            Self::Grouped(builder) => builder.parameters(),
        }
    }

    pub fn standard_mut(&mut self) -> Option<&mut StandardParameterBuilder> {
        match self {
            Self::Standard(builder) => Some(builder),
            Self::Grouped(_) => None,
        }
    }

    pub fn grouped(&self) -> Option<&GroupedParameterBuilder> {
        match self {
            Self::Grouped(builder) => Some(builder),
            Self::Standard(_) => None,
        }
    }

    pub fn grouped_mut(&mut self) -> Option<&mut GroupedParameterBuilder> {
        match self {
            Self::Grouped(builder) => Some(builder),
            Self::Standard(_) => None,
        }
    }
}
