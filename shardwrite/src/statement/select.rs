use std::fmt;

use super::condition::EncryptCondition;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

/// `ORDER BY` or `GROUP BY` item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// Column name or alias, as written.
    pub label: Option<String>,
    /// 1-based position in the select list, for `ORDER BY 2`.
    pub index: usize,
    pub direction: OrderDirection,
}

impl OrderItem {
    pub fn column(label: impl ToString, direction: OrderDirection) -> Self {
        Self {
            label: Some(label.to_string()),
            index: 0,
            direction,
        }
    }

    pub fn position(index: usize, direction: OrderDirection) -> Self {
        Self {
            label: None,
            index,
            direction,
        }
    }
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => write!(f, "{} {}", label, self.direction),
            _ => write!(f, "{} {}", self.index, self.direction),
        }
    }
}

/// Aggregate function in the select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// Expression as written, e.g. `COUNT(DISTINCT id)`.
    pub expression: String,
    pub distinct: bool,
}

impl Aggregation {
    pub fn new(expression: impl ToString, distinct: bool) -> Self {
        Self {
            expression: expression.to_string(),
            distinct,
        }
    }
}

/// `LIMIT` row count or offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitValue {
    Literal(u64),
    Parameter(usize),
}

impl LimitValue {
    /// Numeric value, resolving parameters. Parameters that aren't
    /// non-negative integers count as zero.
    pub fn value(&self, parameters: &[Value]) -> u64 {
        match self {
            Self::Literal(value) => *value,
            Self::Parameter(index) => match parameters.get(*index) {
                Some(Value::Integer(value)) if *value > 0 => *value as u64,
                Some(Value::Text(value)) => value.trim().parse().unwrap_or(0),
                _ => 0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limit {
    pub row_count: Option<LimitValue>,
    pub offset: Option<LimitValue>,
}

impl Limit {
    pub fn offset_value(&self, parameters: &[Value]) -> u64 {
        self.offset.map(|offset| offset.value(parameters)).unwrap_or(0)
    }

    pub fn row_count_value(&self, parameters: &[Value]) -> Option<u64> {
        self.row_count.map(|row_count| row_count.value(parameters))
    }
}

/// Bound `SELECT`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    pub tables: Vec<String>,
    /// Offset of the first select item, where `DISTINCT` goes
    /// when an aggregation is rewritten.
    pub first_select_item_start: usize,
    pub group_by_items: Vec<OrderItem>,
    pub order_by_items: Vec<OrderItem>,
    pub aggregation_items: Vec<Aggregation>,
    pub limit: Option<Limit>,
    pub where_present: bool,
    pub conditions: Vec<EncryptCondition>,
}

impl SelectStatement {
    /// Rows come out of every shard already grouped the way
    /// they need to be ordered.
    pub fn same_group_by_and_order_by(&self) -> bool {
        !self.group_by_items.is_empty() && self.group_by_items == self.order_by_items
    }

    /// Results are merged in memory, so a shard-local `LIMIT`
    /// would drop rows the merge needs.
    pub fn needs_max_row_count(&self) -> bool {
        (!self.group_by_items.is_empty() || !self.aggregation_items.is_empty())
            && !self.same_group_by_and_order_by()
    }

    pub fn has_distinct_aggregation(&self) -> bool {
        self.aggregation_items.iter().any(|item| item.distinct)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_max_row_count() {
        let mut select = SelectStatement::default();
        assert!(!select.needs_max_row_count());

        select.group_by_items = vec![OrderItem::column("user_id", OrderDirection::Asc)];
        assert!(select.needs_max_row_count());

        select.order_by_items = select.group_by_items.clone();
        assert!(!select.needs_max_row_count());

        select.order_by_items = vec![OrderItem::column("user_id", OrderDirection::Desc)];
        assert!(select.needs_max_row_count());

        let select = SelectStatement {
            aggregation_items: vec![Aggregation::new("COUNT(*)", false)],
            ..Default::default()
        };
        assert!(select.needs_max_row_count());
    }

    #[test]
    fn test_limit_value() {
        let params = vec![Value::from(10), Value::from("5"), Value::from(-1)];
        assert_eq!(LimitValue::Parameter(0).value(&params), 10);
        assert_eq!(LimitValue::Parameter(1).value(&params), 5);
        assert_eq!(LimitValue::Parameter(2).value(&params), 0);
        assert_eq!(LimitValue::Literal(3).value(&params), 3);
    }

    #[test]
    fn test_order_item_display() {
        assert_eq!(
            OrderItem::column("name", OrderDirection::Desc).to_string(),
            "name DESC"
        );
        assert_eq!(
            OrderItem::position(2, OrderDirection::Asc).to_string(),
            "2 ASC"
        );
    }
}
