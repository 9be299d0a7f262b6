//! `LIMIT` for statements merged from several shards.
//!
//! Every shard has to return enough rows for the merge to
//! apply the original offset and row count itself.

use tracing::debug;

use crate::config::RuleSnapshot;
use crate::parameter::ParameterBuilder;
use crate::statement::{Limit, LimitValue, SelectStatement};
use crate::value::Value;

#[derive(Debug, Clone, Copy)]
pub struct Pagination<'a> {
    select: &'a SelectStatement,
    limit: Limit,
    rules: &'a RuleSnapshot,
}

impl<'a> Pagination<'a> {
    pub fn new(select: &'a SelectStatement, rules: &'a RuleSnapshot) -> Self {
        Self {
            select,
            limit: select.limit.unwrap_or_default(),
            rules,
        }
    }

    /// Row count sent to every shard.
    pub fn revised_row_count(&self, row_count: u64, parameters: &[Value]) -> u64 {
        if self.select.needs_max_row_count() {
            self.rules.max_row_count
        } else if self.rules.dialect.needs_row_count_rewrite() {
            row_count.saturating_add(self.limit.offset_value(parameters))
        } else {
            row_count
        }
    }

    /// Same rewrite for `LIMIT ? OFFSET ?`.
    pub fn rewrite_parameters(&self, builder: &mut ParameterBuilder, parameters: &[Value]) {
        let Some(builder) = builder.standard_mut() else {
            return;
        };

        if let Some(LimitValue::Parameter(index)) = self.limit.row_count {
            let row_count = self.limit.row_count_value(parameters).unwrap_or(0);
            let revised = self.revised_row_count(row_count, parameters);
            debug!("limit row count parameter {} -> {}", row_count, revised);
            builder.add_replaced(index, Value::Integer(revised.min(i64::MAX as u64) as i64));
        }

        if let Some(LimitValue::Parameter(index)) = self.limit.offset {
            builder.add_replaced(index, Value::Integer(0));
        }
    }
}
