use super::{check_expression, encrypt_parameter, ParameterRewriter};
use crate::encrypt::{EncryptRule, Error};
use crate::parameter::ParameterBuilder;
use crate::statement::{Assignment, Statement};
use crate::value::Value;

/// `UPDATE ... SET` and `INSERT ... SET`.
#[derive(Debug)]
pub struct AssignmentRewriter<'a> {
    rule: &'a EncryptRule,
}

impl<'a> AssignmentRewriter<'a> {
    pub fn new(rule: &'a EncryptRule) -> Self {
        Self { rule }
    }

    fn assignments(statement: &Statement) -> Option<(&str, &[Assignment])> {
        match statement {
            Statement::Update(update) => Some((&update.table, &update.assignments)),
            Statement::Insert(insert) if insert.has_set() => {
                Some((&insert.table, &insert.set_assignments))
            }
            _ => None,
        }
    }
}

impl ParameterRewriter for AssignmentRewriter<'_> {
    fn is_need_rewrite(&self, statement: &Statement) -> bool {
        Self::assignments(statement).is_some()
    }

    fn rewrite(
        &self,
        builder: &mut ParameterBuilder,
        statement: &Statement,
        parameters: &[Value],
    ) -> Result<(), Error> {
        let Some((table, assignments)) = Self::assignments(statement) else {
            return Ok(());
        };
        let Some(builder) = builder.standard_mut() else {
            return Ok(());
        };

        for assignment in assignments {
            let Some(column) = self.rule.find_column(table, &assignment.column) else {
                continue;
            };
            check_expression(table, column, &assignment.value)?;

            if let Some(index) = assignment.value.parameter() {
                if let Some(value) = parameters.get(index) {
                    encrypt_parameter(builder, column, index, value)?;
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
    use crate::statement::{Expression, InsertStatement, UpdateStatement};

    fn update(assignments: Vec<Assignment>) -> Statement {
        Statement::Update(UpdateStatement {
            table: "t_user".into(),
            assignments,
            where_present: true,
            conditions: vec![],
        })
    }

    #[test]
    fn test_cipher_only() {
        let rule = rule();
        let statement = update(vec![Assignment::new("email", Expression::Parameter(0))]);
        let params = vec![Value::from("secret"), Value::from(1)];
        let mut builder = ParameterBuilder::new(&statement, &params);

        let rewriter = AssignmentRewriter::new(&rule);
        assert!(rewriter.is_need_rewrite(&statement));
        rewriter.rewrite(&mut builder, &statement, &params).unwrap();

        assert_eq!(builder.parameters(), vec![cipher("secret"), 1.into()]);
    }

    #[test]
    fn test_derived_added_after_marker() {
        let rule = rule();
        let statement = update(vec![
            Assignment::new("status", Expression::Parameter(0)),
            Assignment::new("pwd", Expression::Parameter(1)),
            Assignment::new("name", Expression::Parameter(2)),
        ]);
        let params = vec![Value::from("ok"), Value::from("secret"), Value::from("bob"), Value::from(1)];
        let mut builder = ParameterBuilder::new(&statement, &params);
        AssignmentRewriter::new(&rule)
            .rewrite(&mut builder, &statement, &params)
            .unwrap();

        assert_eq!(
            builder.parameters(),
            vec![
                "ok".into(),
                cipher("secret"),
                assisted("secret"),
                cipher("bob"),
                like("bob"),
                1.into(),
            ]
        );
    }

    #[test]
    fn test_insert_set() {
        let rule = rule();
        let statement = Statement::Insert(InsertStatement {
            table: "t_user".into(),
            set_assignments: vec![
                Assignment::new("id", Expression::Parameter(0)),
                Assignment::new("pwd", Expression::Parameter(1)),
            ],
            ..Default::default()
        });
        let params = vec![Value::from(1), Value::from("secret")];
        let mut builder = ParameterBuilder::new(&statement, &params);
        let rewriter = AssignmentRewriter::new(&rule);
        assert!(rewriter.is_need_rewrite(&statement));
        rewriter.rewrite(&mut builder, &statement, &params).unwrap();

        assert_eq!(
            builder.parameters(),
            vec![1.into(), cipher("secret"), assisted("secret")]
        );
    }

    #[test]
    fn test_complex_expression_rejected() {
        let rule = rule();
        let statement = update(vec![Assignment::new(
            "pwd",
            Expression::Complex {
                text: "CONCAT(pwd, ?)".into(),
                parameters: vec![0],
            },
        )]);
        let params = vec![Value::from("x")];
        let mut builder = ParameterBuilder::new(&statement, &params);
        let result = AssignmentRewriter::new(&rule).rewrite(&mut builder, &statement, &params);
        assert!(matches!(result, Err(Error::UnsupportedExpression { .. })));
    }
}
