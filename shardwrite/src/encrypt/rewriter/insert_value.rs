use super::{check_expression, encrypt_parameter, ParameterRewriter};
use crate::encrypt::{EncryptRule, Error};
use crate::parameter::ParameterBuilder;
use crate::statement::{InsertStatement, Statement};
use crate::value::Value;

/// `INSERT ... VALUES`, one parameter group per row.
#[derive(Debug)]
pub struct InsertValueRewriter<'a> {
    rule: &'a EncryptRule,
}

impl<'a> InsertValueRewriter<'a> {
    pub fn new(rule: &'a EncryptRule) -> Self {
        Self { rule }
    }

    fn insert(statement: &Statement) -> Option<&InsertStatement> {
        statement
            .insert()
            .filter(|insert| insert.has_values() && !insert.has_set() && insert.select.is_none())
    }
}

impl ParameterRewriter for InsertValueRewriter<'_> {
    fn is_need_rewrite(&self, statement: &Statement) -> bool {
        Self::insert(statement).is_some()
    }

    fn rewrite(
        &self,
        builder: &mut ParameterBuilder,
        statement: &Statement,
        parameters: &[Value],
    ) -> Result<(), Error> {
        let Some(insert) = Self::insert(statement) else {
            return Ok(());
        };
        let Some(builder) = builder.grouped_mut() else {
            return Ok(());
        };
        let derived_column = builder.derived_column().map(|c| c.to_string());

        // Last column first, so additions for one column
        // don't shift the markers of the columns before it.
        for (position, name) in insert.columns.iter().enumerate().rev() {
            if derived_column
                .as_deref()
                .is_some_and(|derived| derived.eq_ignore_ascii_case(name))
            {
                continue;
            }
            let Some(column) = self.rule.find_column(&insert.table, name) else {
                continue;
            };

            for (row, expressions) in insert.rows.iter().enumerate() {
                let Some(expression) = expressions.get(position) else {
                    continue;
                };
                check_expression(&insert.table, column, expression)?;

                let Some(index) = expression.parameter() else {
                    continue;
                };
                let (Some(local), Some(value)) =
                    (builder.local_index(row, index), parameters.get(index))
                else {
                    continue;
                };
                if let Some(group) = builder.group_mut(row) {
                    encrypt_parameter(group, column, local, value)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::super::test::{assisted, cipher, like, rule};
    use super::*;
    use std::sync::Arc;

    use crate::encrypt::encryptor::Md5Encryptor;
    use crate::encrypt::{EncryptColumn, QueryColumn};
    use crate::statement::{Expression, GeneratedKey};

    fn insert(rows: Vec<Vec<Expression>>) -> Statement {
        Statement::Insert(InsertStatement {
            table: "t_user".into(),
            columns: vec!["id".into(), "pwd".into(), "name".into()],
            rows,
            ..Default::default()
        })
    }

    #[test]
    fn test_single_row() {
        let rule = rule();
        let statement = insert(vec![vec![
            Expression::Parameter(0),
            Expression::Parameter(1),
            Expression::Parameter(2),
        ]]);
        let params = vec![Value::from(1), Value::from("secret"), Value::from("bob")];
        let mut builder = ParameterBuilder::new(&statement, &params);

        let rewriter = InsertValueRewriter::new(&rule);
        assert!(rewriter.is_need_rewrite(&statement));
        rewriter.rewrite(&mut builder, &statement, &params).unwrap();

        assert_eq!(
            builder.groups(),
            vec![vec![
                1.into(),
                cipher("secret"),
                assisted("secret"),
                cipher("bob"),
                like("bob"),
            ]]
        );
    }

    #[test]
    fn test_rows_rewritten_independently() {
        let rule = rule();
        let statement = insert(vec![
            vec![
                Expression::Parameter(0),
                Expression::Parameter(1),
                Expression::Literal("lit".into()),
            ],
            vec![
                Expression::Parameter(2),
                Expression::Literal(Value::Null),
                Expression::Parameter(3),
            ],
        ]);
        let params = vec![1.into(), "a".into(), 2.into(), "b".into()];
        let mut builder = ParameterBuilder::new(&statement, &params);
        InsertValueRewriter::new(&rule)
            .rewrite(&mut builder, &statement, &params)
            .unwrap();

        assert_eq!(
            builder.groups(),
            vec![
                vec![1.into(), cipher("a"), assisted("a")],
                vec![2.into(), cipher("b"), like("b")],
            ]
        );
    }

    #[test]
    fn test_derived_column_skipped() {
        let rule = rule().with_column(
            "t_user",
            EncryptColumn::new("id", QueryColumn::new("id_cipher", Arc::new(Md5Encryptor))),
        );
        let statement = InsertStatement {
            table: "t_user".into(),
            columns: vec!["id".into()],
            rows: vec![vec![Expression::Parameter(0)]],
            generated_key: Some(GeneratedKey {
                column: "id".into(),
                values: vec![10.into()],
                derived: true,
            }),
            ..Default::default()
        };
        let statement = Statement::Insert(statement);
        let params = vec![Value::from(5)];
        let mut builder = ParameterBuilder::new(&statement, &params);
        InsertValueRewriter::new(&rule)
            .rewrite(&mut builder, &statement, &params)
            .unwrap();

        assert_eq!(builder.groups(), vec![vec![5.into(), 10.into()]]);
    }

    #[test]
    fn test_not_for_insert_select() {
        let rule = rule();
        let statement = Statement::Insert(InsertStatement {
            table: "t_user".into(),
            columns: vec!["pwd".into()],
            select: Some(Box::default()),
            ..Default::default()
        });
        assert!(!InsertValueRewriter::new(&rule).is_need_rewrite(&statement));
    }
}
