//! Single pass over the tokens turning the original
//! statement into literals and placeholders.

use tracing::{debug, trace};

use super::builder::SqlBuilder;
use super::pagination::Pagination;
use super::placeholder::Placeholder;
use super::token::{self, Token, TokenKind};
use super::{Error, RewriteContext};
use crate::encrypt::rewriter::check_expression;
use crate::encrypt::EncryptColumn;
use crate::statement::{
    EncryptCondition, Expression, InsertStatement, Operand, SelectStatement, Statement,
};

/// Builds the rewritten statement text.
#[derive(Debug)]
pub struct TextRewriter<'a> {
    context: &'a RewriteContext<'a>,
    /// Statement goes to more than one unit and results are merged.
    rewrite: bool,
}

impl<'a> TextRewriter<'a> {
    pub fn new(context: &'a RewriteContext<'a>, rewrite: bool) -> Self {
        Self { context, rewrite }
    }

    pub fn build(&self) -> Result<SqlBuilder, Error> {
        let sql = self.context.sql.as_str();
        let tokens = self.context.tokens.as_slice();
        let mut builder = SqlBuilder::new();

        let Some(first) = tokens.first() else {
            builder.append_literal(sql);
            return Ok(builder);
        };

        token::validate(sql, tokens)?;
        self.append_initial(&mut builder, first)?;

        for (i, token) in tokens.iter().enumerate() {
            self.append_token(&mut builder, token)?;
            let stop = tokens.get(i + 1).map(|next| next.begin).unwrap_or(sql.len());
            builder.append_literal(&sql[token.end()..stop]);
        }

        trace!("{:#?}", builder.segments());

        Ok(builder)
    }

    /// Text before the first token.
    fn append_initial(&self, builder: &mut SqlBuilder, first: &Token) -> Result<(), Error> {
        let sql = self.context.sql.as_str();
        let prefix = &sql[..first.begin];

        match self.context.statement.select() {
            Some(select) if self.rewrite && select.has_distinct_aggregation() => {
                let start = select.first_select_item_start;
                if start > prefix.len() || !prefix.is_char_boundary(start) {
                    return Err(Error::TokenOutOfBounds {
                        begin: start,
                        end: start,
                        len: prefix.len(),
                    });
                }
                debug!("adding DISTINCT at {}", start);
                builder.append_literal(&prefix[..start]);
                builder.append_placeholder(Placeholder::Distinct, "");
                builder.append_literal(&prefix[start..]);
            }
            _ => builder.append_literal(prefix),
        }

        Ok(())
    }

    fn append_token(&self, builder: &mut SqlBuilder, token: &Token) -> Result<(), Error> {
        let placeholder = match &token.kind {
            TokenKind::Table { table, quote } => Some(Placeholder::Table {
                table: table.clone(),
                quote: *quote,
            }),

            TokenKind::Schema { schema, table } => Some(Placeholder::Schema {
                schema: schema.clone(),
                table: table.clone(),
            }),

            TokenKind::Index {
                index,
                table,
                quote,
            } => Some(Placeholder::Index {
                index: index.clone(),
                table: table.clone(),
                quote: *quote,
            }),

            TokenKind::InsertColumns => {
                let insert = self.insert(token)?;
                Some(Placeholder::InsertColumns {
                    columns: self.insert_columns(insert),
                    added: token.text.is_empty(),
                })
            }

            TokenKind::Items {
                items,
                first_item_special,
            } => {
                let insert = matches!(self.context.statement, Statement::Insert(_));
                (insert || self.rewrite).then(|| Placeholder::Items {
                    items: items.clone(),
                    first_item_special: *first_item_special,
                })
            }

            TokenKind::InsertValues => {
                let insert = self.insert(token)?;
                if !insert.has_values() {
                    return Err(Error::StatementMismatch {
                        token: token.kind.name(),
                        reason: "insert has no values",
                    });
                }
                Some(Placeholder::InsertValues {
                    rows: self.insert_rows(insert)?,
                })
            }

            TokenKind::RowCount(row_count) => {
                let select = self.select(token)?;
                let row_count = if self.rewrite {
                    Pagination::new(select, self.context.rules)
                        .revised_row_count(*row_count, &self.context.parameters)
                } else {
                    *row_count
                };
                Some(Placeholder::RowCount(row_count))
            }

            TokenKind::Offset(offset) => {
                Some(Placeholder::Offset(if self.rewrite { 0 } else { *offset }))
            }

            TokenKind::OrderBy => {
                let select = self.select(token)?;
                self.rewrite
                    .then(|| Placeholder::OrderBy(select.order_by_items.clone()))
            }

            TokenKind::AggregationDistinct { column, alias } => {
                self.rewrite.then(|| Placeholder::AggregationDistinct {
                    column: column.clone(),
                    alias: alias.clone(),
                })
            }

            TokenKind::Remove => Some(Placeholder::Remove),

            TokenKind::EncryptAssignment {
                table,
                column,
                value,
                on_duplicate_key,
            } => match self.encrypt_column(table, column) {
                Some(encrypt) => Some(Placeholder::EncryptAssignment {
                    assignments: self.encrypt_assignment(
                        table,
                        encrypt,
                        value,
                        *on_duplicate_key,
                    )?,
                }),
                None => None,
            },

            TokenKind::EncryptProjection {
                table,
                column,
                alias,
            } => self
                .encrypt_column(table, column)
                .map(|encrypt| Placeholder::EncryptProjection {
                    column: encrypt.cipher.column.clone(),
                    alias: alias.clone().unwrap_or_else(|| column.clone()),
                }),

            TokenKind::EncryptPredicate { condition } => {
                let condition =
                    self.conditions()
                        .get(*condition)
                        .ok_or(Error::StatementMismatch {
                            token: token.kind.name(),
                            reason: "no such encrypt condition",
                        })?;
                self.encrypt_predicate(condition)?
            }
        };

        match placeholder {
            Some(placeholder) => builder.append_placeholder(placeholder, &token.text),
            None => builder.append_literal(&token.text),
        }

        Ok(())
    }

    fn select(&self, token: &Token) -> Result<&'a SelectStatement, Error> {
        self.context
            .statement
            .select()
            .ok_or(Error::StatementMismatch {
                token: token.kind.name(),
                reason: "statement is not a select",
            })
    }

    fn insert(&self, token: &Token) -> Result<&'a InsertStatement, Error> {
        self.context
            .statement
            .insert()
            .ok_or(Error::StatementMismatch {
                token: token.kind.name(),
                reason: "statement is not an insert",
            })
    }

    /// Conditions on encrypted columns, including the ones
    /// in the select of `INSERT ... SELECT`.
    fn conditions(&self) -> &'a [EncryptCondition] {
        match &self.context.statement {
            Statement::Insert(insert) => insert
                .select
                .as_deref()
                .map(|select| select.conditions.as_slice())
                .unwrap_or(&[]),
            statement => statement.conditions(),
        }
    }

    fn encrypt_column(&self, table: &str, column: &str) -> Option<&'a EncryptColumn> {
        self.context.rules.encrypt.find_column(table, column)
    }

    /// Inserted columns with encrypted columns expanded
    /// and the derived generated key at the end.
    fn insert_columns(&self, insert: &InsertStatement) -> Vec<String> {
        let mut columns = vec![];
        for column in &insert.columns {
            match self.encrypt_column(&insert.table, column) {
                Some(encrypt) => columns.extend(encrypt.columns().map(|c| c.to_string())),
                None => columns.push(column.clone()),
            }
        }
        if let Some(key) = insert.derived_column() {
            columns.push(key.column.clone());
        }
        columns
    }

    /// Render every insert row, lined up with [`Self::insert_columns`].
    fn insert_rows(&self, insert: &InsertStatement) -> Result<Vec<String>, Error> {
        let uses_parameters = insert.uses_parameters();
        let mut rows = Vec::with_capacity(insert.rows.len());

        for (row, expressions) in insert.rows.iter().enumerate() {
            let mut values = vec![];

            for (position, expression) in expressions.iter().enumerate() {
                let encrypt = insert
                    .columns
                    .get(position)
                    .and_then(|column| self.encrypt_column(&insert.table, column));

                match encrypt {
                    Some(encrypt) => {
                        values.extend(self.encrypt_values(&insert.table, encrypt, expression)?)
                    }
                    None => values.push(expression.to_sql()),
                }
            }

            if let Some(key) = insert.derived_column() {
                if uses_parameters {
                    values.push("?".into());
                } else {
                    values.push(
                        key.values
                            .get(row)
                            .map(|value| value.to_sql_literal())
                            .unwrap_or_else(|| "NULL".into()),
                    );
                }
            }

            rows.push(format!("({})", values.join(", ")));
        }

        Ok(rows)
    }

    /// Values written to the cipher, assisted and like query
    /// columns for one encrypted value.
    fn encrypt_values(
        &self,
        table: &str,
        column: &EncryptColumn,
        expression: &Expression,
    ) -> Result<Vec<String>, Error> {
        check_expression(table, column, expression)?;
        let count = 1 + column.derived().count();

        Ok(match expression {
            Expression::Literal(value) => {
                let mut values = vec![column.encrypt(value)?.to_sql_literal()];
                values.extend(
                    column
                        .derived_values(value)?
                        .iter()
                        .map(|value| value.to_sql_literal()),
                );
                values
            }
            Expression::ValuesRef(_) => column
                .columns()
                .map(|c| format!("VALUES({})", c))
                .collect(),
            Expression::Parameter(_) | Expression::Complex { .. } => vec!["?".to_string(); count],
        })
    }

    fn encrypt_assignment(
        &self,
        table: &str,
        column: &EncryptColumn,
        value: &Expression,
        on_duplicate_key: Option<usize>,
    ) -> Result<Vec<(String, String)>, Error> {
        // Parameters after VALUES() in ON DUPLICATE KEY UPDATE
        // are left alone, so only the cipher column gets them.
        if self.after_values_ref(on_duplicate_key) && value.parameter().is_some() {
            return Ok(vec![(column.cipher.column.clone(), "?".into())]);
        }

        let values = self.encrypt_values(table, column, value)?;
        Ok(column
            .columns()
            .map(|c| c.to_string())
            .zip(values)
            .collect())
    }

    /// Assignment at `position` in `ON DUPLICATE KEY UPDATE`
    /// comes after a `VALUES()` assignment.
    fn after_values_ref(&self, position: Option<usize>) -> bool {
        let (Some(insert), Some(position)) = (self.context.statement.insert(), position) else {
            return false;
        };
        insert
            .on_duplicate_key
            .get(..position)
            .unwrap_or(insert.on_duplicate_key.as_slice())
            .iter()
            .any(|assignment| matches!(assignment.value, Expression::ValuesRef(_)))
    }

    fn encrypt_predicate(&self, condition: &EncryptCondition) -> Result<Option<Placeholder>, Error> {
        let Some(column) = self.encrypt_column(&condition.table, &condition.column) else {
            return Ok(None);
        };
        let query = column.query(condition.operator);

        let mut operands = vec![];
        for (_, operand) in condition.operands() {
            operands.push(match operand {
                Operand::Parameter(_) => "?".to_string(),
                Operand::Literal(value) => query.encrypt(value)?.to_sql_literal(),
            });
        }

        Ok(Some(Placeholder::EncryptPredicate {
            column: query.column.clone(),
            operator: condition.operator,
            operands,
        }))
    }
}
