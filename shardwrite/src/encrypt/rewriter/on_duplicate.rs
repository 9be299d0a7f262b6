use super::{check_expression, encrypt_parameter, ParameterRewriter};
use crate::encrypt::{EncryptRule, Error};
use crate::parameter::ParameterBuilder;
use crate::statement::{Expression, Statement};
use crate::value::Value;

/// `INSERT ... ON DUPLICATE KEY UPDATE`.
///
/// Parameters go into the generic builder shared by every row.
#[derive(Debug)]
pub struct OnDuplicateKeyUpdateRewriter<'a> {
    rule: &'a EncryptRule,
}

impl<'a> OnDuplicateKeyUpdateRewriter<'a> {
    pub fn new(rule: &'a EncryptRule) -> Self {
        Self { rule }
    }
}

impl ParameterRewriter for OnDuplicateKeyUpdateRewriter<'_> {
    fn is_need_rewrite(&self, statement: &Statement) -> bool {
        statement
            .insert()
            .is_some_and(|insert| !insert.on_duplicate_key.is_empty())
    }

    fn rewrite(
        &self,
        builder: &mut ParameterBuilder,
        statement: &Statement,
        parameters: &[Value],
    ) -> Result<(), Error> {
        let Some(insert) = statement.insert() else {
            return Ok(());
        };

        for assignment in &insert.on_duplicate_key {
            // VALUES(col) reuses the inserted value, which is
            // already encrypted by the insert value rewriter.
            if matches!(assignment.value, Expression::ValuesRef(_)) {
                return Ok(());
            }

            let Some(column) = self.rule.find_column(&insert.table, &assignment.column) else {
                continue;
            };
            check_expression(&insert.table, column, &assignment.value)?;

            let Some(index) = assignment.value.parameter() else {
                continue;
            };
            let Some(value) = parameters.get(index) else {
                continue;
            };

            match builder {
                ParameterBuilder::Grouped(grouped) => {
                    if let Some(local) = grouped.generic_index(index) {
                        encrypt_parameter(grouped.generic_mut(), column, local, value)?;
                    }
                }
                ParameterBuilder::Standard(standard) => {
                    encrypt_parameter(standard, column, index, value)?;
                }
            }
        }

        Ok(())
    }
}
