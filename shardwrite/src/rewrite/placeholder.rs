//! Placeholders resolved once per route unit.

use super::token::Quote;
use crate::route::RouteUnit;
use crate::statement::{Operator, OrderItem};

/// Route unit specific bits needed to resolve placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    pub unit: &'a RouteUnit,
    /// Actual schema of the unit's data source, if configured.
    pub schema: Option<&'a str>,
}

impl<'a> Resolver<'a> {
    pub fn new(unit: &'a RouteUnit, schema: Option<&'a str>) -> Self {
        Self { unit, schema }
    }
}

/// Rewritten text that depends on the route unit
/// or on the rewrite decisions.
#[derive(Debug, Clone, PartialEq)]
pub enum Placeholder {
    Table {
        table: String,
        quote: Quote,
    },
    Schema {
        schema: String,
        table: String,
    },
    Index {
        index: String,
        table: Option<String>,
        quote: Quote,
    },
    InsertColumns {
        columns: Vec<String>,
        /// Statement had no column list, so one is added after the table.
        added: bool,
    },
    Items {
        items: Vec<String>,
        first_item_special: bool,
    },
    /// Rendered rows, in statement order.
    InsertValues {
        rows: Vec<String>,
    },
    RowCount(u64),
    Offset(u64),
    OrderBy(Vec<OrderItem>),
    AggregationDistinct {
        column: String,
        alias: Option<String>,
    },
    /// `DISTINCT ` in front of the select items.
    Distinct,
    Remove,
    /// `column = value` pairs.
    EncryptAssignment {
        assignments: Vec<(String, String)>,
    },
    EncryptPredicate {
        column: String,
        operator: Operator,
        operands: Vec<String>,
    },
    /// Cipher column read back under the logical name.
    EncryptProjection {
        column: String,
        alias: String,
    },
}

impl Placeholder {
    /// Text for this placeholder on one route unit.
    pub fn resolve(&self, resolver: &Resolver<'_>) -> String {
        match self {
            Self::Table { table, quote } => {
                quote.wrap(resolver.unit.actual_table(table).unwrap_or(table.as_str()))
            }

            Self::Schema { schema, .. } => resolver.schema.unwrap_or(schema.as_str()).to_string(),

            Self::Index {
                index,
                table,
                quote,
            } => match table
                .as_deref()
                .and_then(|table| resolver.unit.actual_table(table))
            {
                Some(actual) => quote.wrap(&format!("{}_{}", index, actual)),
                None => quote.wrap(index),
            },

            Self::InsertColumns { columns, added } => {
                let columns = format!("({})", columns.join(", "));
                if *added {
                    format!(" {}", columns)
                } else {
                    columns
                }
            }

            Self::Items {
                items,
                first_item_special,
            } => {
                let mut result = String::new();
                for (i, item) in items.iter().enumerate() {
                    if i == 0 && *first_item_special {
                        result.push_str(item);
                    } else {
                        result.push_str(", ");
                        result.push_str(item);
                    }
                }
                result
            }

            Self::InsertValues { rows } => rows
                .iter()
                .enumerate()
                .filter(|(row, _)| resolver.unit.contains_row(*row))
                .map(|(_, row)| row.as_str())
                .collect::<Vec<_>>()
                .join(", "),

            Self::RowCount(row_count) => row_count.to_string(),

            Self::Offset(offset) => offset.to_string(),

            Self::OrderBy(items) => {
                let items = items
                    .iter()
                    .map(|item| item.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                format!(" ORDER BY {} ", items)
            }

            Self::AggregationDistinct { column, alias } => match alias {
                Some(alias) => format!("{} {}", column, alias),
                None => column.clone(),
            },

            Self::Distinct => "DISTINCT ".into(),

            Self::Remove => String::new(),

            Self::EncryptAssignment { assignments } => assignments
                .iter()
                .map(|(column, value)| format!("{} = {}", column, value))
                .collect::<Vec<_>>()
                .join(", "),

            Self::EncryptPredicate {
                column,
                operator,
                operands,
            } => {
                let mut result = format!("{} {} ", column, operator);
                match operator {
                    Operator::In | Operator::NotIn => {
                        result.push_str(&format!("({})", operands.join(", ")));
                    }
                    Operator::Between => {
                        result.push_str(&operands.join(" AND "));
                    }
                    Operator::Equal | Operator::NotEqual | Operator::Like => {
                        result.push_str(operands.first().map(|s| s.as_str()).unwrap_or("NULL"));
                    }
                }
                result
            }

            Self::EncryptProjection { column, alias } => format!("{} AS {}", column, alias),
        }
    }
}
