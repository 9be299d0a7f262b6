use tracing::debug;

use super::ParameterRewriter;
use crate::encrypt::{EncryptRule, Error};
use crate::parameter::ParameterBuilder;
use crate::statement::{EncryptCondition, Statement};
use crate::value::Value;

/// `WHERE` conditions on encrypted columns.
///
/// Parameters are only ever replaced, so the parameter count
/// stays the same.
#[derive(Debug)]
pub struct PredicateRewriter<'a> {
    rule: &'a EncryptRule,
}

impl<'a> PredicateRewriter<'a> {
    pub fn new(rule: &'a EncryptRule) -> Self {
        Self { rule }
    }

    /// Encrypt parameters bound in `conditions`.
    pub fn rewrite_conditions(
        &self,
        builder: &mut ParameterBuilder,
        conditions: &[EncryptCondition],
        parameters: &[Value],
    ) -> Result<(), Error> {
        let Some(builder) = builder.standard_mut() else {
            return Ok(());
        };

        for condition in conditions {
            let Some(column) = self.rule.find_column(&condition.table, &condition.column) else {
                continue;
            };
            let query = column.query(condition.operator);

            for index in condition.positions.values() {
                if let Some(value) = parameters.get(*index) {
                    builder.add_replaced(*index, query.encrypt(value)?);
                }
            }

            debug!(
                "{}.{} {} compared against \"{}\"",
                condition.table, condition.column, condition.operator, query.column
            );
        }

        Ok(())
    }
}

impl ParameterRewriter for PredicateRewriter<'_> {
    fn is_need_rewrite(&self, statement: &Statement) -> bool {
        statement.where_present() && !statement.conditions().is_empty()
    }

    fn rewrite(
        &self,
        builder: &mut ParameterBuilder,
        statement: &Statement,
        parameters: &[Value],
    ) -> Result<(), Error> {
        self.rewrite_conditions(builder, statement.conditions(), parameters)
    }
}
