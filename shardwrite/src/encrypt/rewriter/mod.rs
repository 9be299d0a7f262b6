//! Encrypt parameter rewriters.
//!
//! Each rewriter handles one statement shape and only touches
//! the parameter builder. Statement text is rewritten separately
//! by the encrypt tokens.

pub mod assignment;
pub mod insert_predicate;
pub mod insert_value;
pub mod on_duplicate;
pub mod predicate;

pub use assignment::AssignmentRewriter;
pub use insert_predicate::InsertPredicateRewriter;
pub use insert_value::InsertValueRewriter;
pub use on_duplicate::OnDuplicateKeyUpdateRewriter;
pub use predicate::PredicateRewriter;

use tracing::debug;

use super::rule::{EncryptColumn, EncryptRule};
use super::Error;
use crate::parameter::{ParameterBuilder, StandardParameterBuilder};
use crate::statement::{Expression, Statement};
use crate::value::Value;

/// Rewrites parameters bound to encrypted columns.
pub trait ParameterRewriter {
    /// Statement has the shape this rewriter handles.
    fn is_need_rewrite(&self, statement: &Statement) -> bool;

    /// Replace and add parameters.
    fn rewrite(
        &self,
        builder: &mut ParameterBuilder,
        statement: &Statement,
        parameters: &[Value],
    ) -> Result<(), Error>;
}

/// Run every rewriter that applies to `statement`.
pub fn rewrite_parameters(
    rule: &EncryptRule,
    statement: &Statement,
    builder: &mut ParameterBuilder,
    parameters: &[Value],
) -> Result<(), Error> {
    if rule.is_empty() || parameters.is_empty() {
        return Ok(());
    }

    let rewriters: [&dyn ParameterRewriter; 5] = [
        &AssignmentRewriter::new(rule),
        &InsertValueRewriter::new(rule),
        &OnDuplicateKeyUpdateRewriter::new(rule),
        &PredicateRewriter::new(rule),
        &InsertPredicateRewriter::new(rule),
    ];

    for rewriter in rewriters {
        if rewriter.is_need_rewrite(statement) {
            rewriter.rewrite(builder, statement, parameters)?;
        }
    }

    Ok(())
}

/// Encrypt the value bound to parameter `index`, writing the cipher value
/// at `local` and the assisted and like query values right after it.
pub(crate) fn encrypt_parameter(
    builder: &mut StandardParameterBuilder,
    column: &EncryptColumn,
    local: usize,
    value: &Value,
) -> Result<(), Error> {
    builder.add_replaced(local, column.encrypt(value)?);
    let derived = column.derived_values(value)?;
    if !derived.is_empty() {
        builder.add_added(local, derived);
    }
    debug!(
        "encrypted parameter {} for column \"{}\" [{} derived]",
        local,
        column.name,
        column.derived().count()
    );
    Ok(())
}

/// Encrypted columns can't be assigned anything computed in the database.
pub(crate) fn check_expression(
    table: &str,
    column: &EncryptColumn,
    expression: &Expression,
) -> Result<(), Error> {
    match expression {
        Expression::Complex { text, .. } => Err(Error::UnsupportedExpression {
            table: table.to_string(),
            column: column.name.clone(),
            expression: text.clone(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;

    use super::*;
    use crate::encrypt::encryptor::{AesEncryptor, CharDigestLikeEncryptor, Md5Encryptor};
    use crate::encrypt::rule::QueryColumn;
    use crate::encrypt::Encryptor;

    /// `t_user.pwd` has cipher + assisted, `t_user.name` cipher + like,
    /// `t_user.email` cipher only.
    pub fn rule() -> EncryptRule {
        let aes = Arc::new(AesEncryptor::from_secret("123456abc"));
        EncryptRule::default()
            .with_column(
                "t_user",
                EncryptColumn::new("pwd", QueryColumn::new("pwd_cipher", aes.clone()))
                    .with_assisted_query(QueryColumn::new("pwd_assisted", Arc::new(Md5Encryptor))),
            )
            .with_column(
                "t_user",
                EncryptColumn::new("name", QueryColumn::new("name_cipher", aes.clone()))
                    .with_like_query(QueryColumn::new(
                        "name_like",
                        Arc::new(CharDigestLikeEncryptor::default()),
                    )),
            )
            .with_column(
                "t_user",
                EncryptColumn::new("email", QueryColumn::new("email_cipher", aes)),
            )
    }

    pub fn cipher(value: &str) -> Value {
        AesEncryptor::from_secret("123456abc")
            .encrypt(&value.into())
            .unwrap()
    }

    pub fn assisted(value: &str) -> Value {
        Md5Encryptor.encrypt(&value.into()).unwrap()
    }

    pub fn like(value: &str) -> Value {
        CharDigestLikeEncryptor::default()
            .encrypt(&value.into())
            .unwrap()
    }

    #[test]
    fn test_empty_rule_is_noop() {
        let statement = Statement::Other;
        let params = vec![Value::from(1)];
        let mut builder = ParameterBuilder::new(&statement, &params);
        rewrite_parameters(&EncryptRule::default(), &statement, &mut builder, &params).unwrap();
        assert_eq!(builder.parameters(), params);
    }
}
