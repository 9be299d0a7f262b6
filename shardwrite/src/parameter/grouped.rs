use std::collections::BTreeSet;

use super::standard::StandardParameterBuilder;
use crate::statement::InsertStatement;
use crate::value::Value;

/// Parameters of a multi-row `INSERT`, one group per row.
///
/// Parameters outside of the value rows, like the ones in
/// `ON DUPLICATE KEY UPDATE`, go into the generic builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedParameterBuilder {
    groups: Vec<StandardParameterBuilder>,
    /// Global parameter indexes of every group, in order.
    group_indexes: Vec<Vec<usize>>,
    generic: StandardParameterBuilder,
    generic_indexes: Vec<usize>,
    /// Generated key values added by the rewriter, one per row.
    derived: Vec<Value>,
    derived_column: Option<String>,
}

impl GroupedParameterBuilder {
    pub fn new(insert: &InsertStatement, parameters: &[Value]) -> Self {
        let mut used = BTreeSet::new();
        let mut groups = vec![];
        let mut group_indexes = vec![];

        for row in &insert.rows {
            let indexes = row
                .iter()
                .flat_map(|expression| expression.parameters())
                .filter(|index| *index < parameters.len())
                .collect::<Vec<_>>();
            used.extend(indexes.iter().copied());
            groups.push(StandardParameterBuilder::new(
                indexes.iter().map(|i| parameters[*i].clone()).collect(),
            ));
            group_indexes.push(indexes);
        }

        let generic_indexes = (0..parameters.len())
            .filter(|index| !used.contains(index))
            .collect::<Vec<_>>();
        let generic = StandardParameterBuilder::new(
            generic_indexes
                .iter()
                .map(|i| parameters[*i].clone())
                .collect(),
        );

        let (derived, derived_column) = match insert.derived_column() {
            Some(key) if insert.uses_parameters() => {
                (key.values.clone(), Some(key.column.clone()))
            }
            Some(key) => (vec![], Some(key.column.clone())),
            None => (vec![], None),
        };

        Self {
            groups,
            group_indexes,
            generic,
            generic_indexes,
            derived,
            derived_column,
        }
    }

    /// Number of parameter groups, same as the number of rows.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Position of global parameter `index` inside group `group`.
    pub fn local_index(&self, group: usize, index: usize) -> Option<usize> {
        self.group_indexes
            .get(group)?
            .iter()
            .position(|i| *i == index)
    }

    /// Position of global parameter `index` inside the generic builder.
    pub fn generic_index(&self, index: usize) -> Option<usize> {
        self.generic_indexes.iter().position(|i| *i == index)
    }

    pub fn group_mut(&mut self, group: usize) -> Option<&mut StandardParameterBuilder> {
        self.groups.get_mut(group)
    }

    pub fn generic(&self) -> &StandardParameterBuilder {
        &self.generic
    }

    pub fn generic_mut(&mut self) -> &mut StandardParameterBuilder {
        &mut self.generic
    }

    /// Generated key column added by the rewriter.
    pub fn derived_column(&self) -> Option<&str> {
        self.derived_column.as_deref()
    }

    /// Parameters of one row, ending with its derived generated key.
    pub fn group_parameters(&self, group: usize) -> Vec<Value> {
        let mut parameters = self
            .groups
            .get(group)
            .map(|builder| builder.parameters())
            .unwrap_or_default();
        if let Some(value) = self.derived.get(group) {
            parameters.push(value.clone());
        }
        parameters
    }

    /// Parameters of every row.
    pub fn groups(&self) -> Vec<Vec<Value>> {
        (0..self.groups.len())
            .map(|group| self.group_parameters(group))
            .collect()
    }

    /// All groups followed by the generic parameters.
    pub fn parameters(&self) -> Vec<Value> {
        let mut result = self.groups().into_iter().flatten().collect::<Vec<_>>();
        result.extend(self.generic.parameters());
        result
    }
}
