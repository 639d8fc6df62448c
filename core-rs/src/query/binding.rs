/**
 * binding.rs
 * Variable -> term assignments produced by pattern evaluation
 */

use std::collections::BTreeMap;

use crate::model::Term;

/// Ordered by variable name, so two bindings compare by their full value tuple
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Binding {
    values: BTreeMap<String, Term>,
}

impl Binding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable: &str) -> Option<&Term> {
        self.values.get(variable)
    }

    pub fn is_bound(&self, variable: &str) -> bool {
        self.values.contains_key(variable)
    }

    /// Bind `variable` to `term`. Returns false when it is already bound to a different term.
    pub fn bind(&mut self, variable: &str, term: &Term) -> bool {
        match self.values.get(variable) {
            Some(existing) => existing == term,
            None => {
                self.values.insert(variable.to_string(), term.clone());
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Term)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keep only the listed variables
    pub fn project(&self, variables: &[String]) -> Binding {
        let values = variables
            .iter()
            .filter_map(|v| self.values.get_key_value(v))
            .map(|(k, t)| (k.clone(), t.clone()))
            .collect();
        Binding { values }
    }
}
