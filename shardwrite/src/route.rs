//! Routing decisions made before the rewrite.

use std::collections::BTreeSet;

use indexmap::IndexMap;

/// One physical target of a logical statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteUnit {
    /// Data source the rewritten statement runs on.
    pub data_source: String,
    /// Logical table to actual table, lowercase logical names.
    /// Binding tables routed alongside are included.
    pub table_mappings: IndexMap<String, String>,
    /// Insert rows sent to this unit. `None` means all of them.
    pub rows: Option<BTreeSet<usize>>,
}

impl RouteUnit {
    pub fn new(data_source: impl ToString) -> Self {
        Self {
            data_source: data_source.to_string(),
            ..Default::default()
        }
    }

    /// Map a logical table to its actual table on this unit.
    pub fn with_table(mut self, logical: &str, actual: impl ToString) -> Self {
        self.table_mappings
            .insert(logical.to_lowercase(), actual.to_string());
        self
    }

    /// Restrict the unit to these insert rows.
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = usize>) -> Self {
        self.rows = Some(rows.into_iter().collect());
        self
    }

    /// Actual table for a logical table, if it's routed here.
    pub fn actual_table(&self, logical: &str) -> Option<&str> {
        self.table_mappings
            .get(&logical.to_lowercase())
            .map(|table| table.as_str())
    }

    /// Insert row `row` goes to this unit.
    pub fn contains_row(&self, row: usize) -> bool {
        self.rows
            .as_ref()
            .map(|rows| rows.contains(&row))
            .unwrap_or(true)
    }
}

/// All units a logical statement fans out to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteResult {
    pub units: Vec<RouteUnit>,
}

impl RouteResult {
    pub fn new(units: Vec<RouteUnit>) -> Self {
        Self { units }
    }

    pub fn single(unit: RouteUnit) -> Self {
        Self { units: vec![unit] }
    }

    /// Statement goes to at most one physical table, so nothing
    /// has to be merged afterwards.
    pub fn is_single_routing(&self) -> bool {
        self.units.len() <= 1
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_route_unit() {
        let unit = RouteUnit::new("ds_0")
            .with_table("T_Order", "t_order_1")
            .with_table("t_order_item", "t_order_item_1")
            .with_rows([0, 2]);

        assert_eq!(unit.actual_table("t_order"), Some("t_order_1"));
        assert_eq!(unit.actual_table("T_ORDER_ITEM"), Some("t_order_item_1"));
        assert_eq!(unit.actual_table("t_user"), None);
        assert!(unit.contains_row(2));
        assert!(!unit.contains_row(1));
        assert!(RouteUnit::new("ds_1").contains_row(7));
    }

    #[test]
    fn test_single_routing() {
        assert!(RouteResult::default().is_single_routing());
        assert!(RouteResult::single(RouteUnit::new("ds_0")).is_single_routing());
        assert!(!RouteResult::new(vec![RouteUnit::new("ds_0"), RouteUnit::new("ds_1")])
            .is_single_routing());
    }
}
