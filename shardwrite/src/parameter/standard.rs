use std::collections::BTreeMap;

use crate::value::Value;

/// Flat parameter list with replacements and additions.
///
/// Additions go right after the value at their index and
/// never move any other parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StandardParameterBuilder {
    original: Vec<Value>,
    replaced: BTreeMap<usize, Value>,
    added: BTreeMap<usize, Vec<Value>>,
}

impl StandardParameterBuilder {
    pub fn new(original: Vec<Value>) -> Self {
        Self {
            original,
            ..Default::default()
        }
    }

    /// Emit `value` instead of the original parameter at `index`.
    pub fn add_replaced(&mut self, index: usize, value: Value) {
        self.replaced.insert(index, value);
    }

    /// Emit `values` after the parameter at `index`.
    pub fn add_added(&mut self, index: usize, values: impl IntoIterator<Item = Value>) {
        self.added.entry(index).or_default().extend(values);
    }

    /// Parameters as they were bound.
    pub fn original(&self) -> &[Value] {
        &self.original
    }

    /// Number of parameters that will be emitted.
    pub fn len(&self) -> usize {
        self.original.len() + self.added.values().map(|v| v.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parameters with replacements and additions applied.
    pub fn parameters(&self) -> Vec<Value> {
        let mut result = Vec::with_capacity(self.len());
        for (index, value) in self.original.iter().enumerate() {
            result.push(self.replaced.get(&index).unwrap_or(value).clone());
            if let Some(added) = self.added.get(&index) {
                result.extend(added.iter().cloned());
            }
        }
        result
    }
}
