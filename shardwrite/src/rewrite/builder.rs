//! Rewritten statement as literal text and placeholders.

use super::placeholder::{Placeholder, Resolver};
use crate::parameter::ParameterBuilder;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Literal(String),
    Placeholder {
        placeholder: Placeholder,
        /// Text the placeholder replaces in the original statement.
        original: String,
    },
}

/// Built once per statement, resolved once per route unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlBuilder {
    segments: Vec<Segment>,
}

impl SqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text to the trailing literal.
    pub fn append_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Literal(literal)) => literal.push_str(text),
            _ => self.segments.push(Segment::Literal(text.to_string())),
        }
    }

    /// Append a placeholder standing in for `original`.
    pub fn append_placeholder(&mut self, placeholder: Placeholder, original: &str) {
        self.segments.push(Segment::Placeholder {
            placeholder,
            original: original.to_string(),
        });
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Statement text and parameter groups for one route unit.
    ///
    /// Only insert values pick parameter groups per unit. Everything
    /// else gets all parameter groups.
    pub fn resolve(
        &self,
        resolver: &Resolver<'_>,
        parameters: &ParameterBuilder,
    ) -> (String, Vec<Vec<Value>>) {
        let mut sql = String::new();
        let mut groups: Option<Vec<Vec<Value>>> = None;

        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => sql.push_str(literal),
                Segment::Placeholder { placeholder, .. } => {
                    if let Placeholder::InsertValues { rows } = placeholder {
                        let groups = groups.get_or_insert_with(Vec::new);
                        if let Some(grouped) = parameters.grouped() {
                            groups.extend(
                                (0..rows.len())
                                    .filter(|row| resolver.unit.contains_row(*row))
                                    .map(|row| grouped.group_parameters(row)),
                            );
                        }
                    }
                    sql.push_str(&placeholder.resolve(resolver));
                }
            }
        }

        (sql, groups.unwrap_or_else(|| parameters.groups()))
    }

    /// Put the original text back in place of every placeholder.
    pub fn to_original(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(literal) => literal.as_str(),
                Segment::Placeholder { original, .. } => original.as_str(),
            })
            .collect()
    }
}
