use crate::value::Value;

/// Physical statement for one route unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenUnit {
    pub data_source: String,
    pub sql: String,
    /// One group per insert row routed here, or a single
    /// group for everything else.
    pub parameter_groups: Vec<Vec<Value>>,
    /// Parameters following the groups, e.g. `ON DUPLICATE KEY UPDATE`.
    pub generic_parameters: Vec<Value>,
}

impl RewrittenUnit {
    /// Parameters in the order their markers appear in [`Self::sql`].
    pub fn parameters(&self) -> Vec<Value> {
        self.parameter_groups
            .iter()
            .flatten()
            .chain(self.generic_parameters.iter())
            .cloned()
            .collect()
    }
}
