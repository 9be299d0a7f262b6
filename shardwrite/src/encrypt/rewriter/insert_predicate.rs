use super::{ParameterRewriter, PredicateRewriter};
use crate::encrypt::{EncryptRule, Error};
use crate::parameter::ParameterBuilder;
use crate::statement::{SelectStatement, Statement};
use crate::value::Value;

/// `WHERE` of the `SELECT` in `INSERT ... SELECT`.
#[derive(Debug)]
pub struct InsertPredicateRewriter<'a> {
    predicate: PredicateRewriter<'a>,
}

impl<'a> InsertPredicateRewriter<'a> {
    pub fn new(rule: &'a EncryptRule) -> Self {
        Self {
            predicate: PredicateRewriter::new(rule),
        }
    }

    fn select(statement: &Statement) -> Option<&SelectStatement> {
        statement
            .insert()
            .and_then(|insert| insert.select.as_deref())
            .filter(|select| select.where_present && !select.conditions.is_empty())
    }
}

impl ParameterRewriter for InsertPredicateRewriter<'_> {
    fn is_need_rewrite(&self, statement: &Statement) -> bool {
        Self::select(statement).is_some()
    }

    fn rewrite(
        &self,
        builder: &mut ParameterBuilder,
        statement: &Statement,
        parameters: &[Value],
    ) -> Result<(), Error> {
        match Self::select(statement) {
            Some(select) => self
                .predicate
                .rewrite_conditions(builder, &select.conditions, parameters),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::super::test::{assisted, rule};
    use super::*;
    use crate::statement::{EncryptCondition, InsertStatement, Operator};

    #[test]
    fn test_embedded_select() {
        let rule = rule();
        let statement = Statement::Insert(InsertStatement {
            table: "t_user_archive".into(),
            columns: vec!["id".into()],
            select: Some(Box::new(SelectStatement {
                tables: vec!["t_user".into()],
                where_present: true,
                conditions: vec![
                    EncryptCondition::new("t_user", "pwd", Operator::Equal).with_parameter(0, 1)
                ],
                ..Default::default()
            })),
            ..Default::default()
        });
        let params = vec![Value::from(1), Value::from("secret")];
        let mut builder = ParameterBuilder::new(&statement, &params);

        let rewriter = InsertPredicateRewriter::new(&rule);
        assert!(rewriter.is_need_rewrite(&statement));
        rewriter.rewrite(&mut builder, &statement, &params).unwrap();

        assert_eq!(builder.parameters(), vec![1.into(), assisted("secret")]);
    }
}
