/**
 * pattern.rs
 * Prepared query structures: triple patterns, basic graph patterns, ordering
 */

use crate::model::{Iri, Literal, Term};

/// One position of a triple pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermPattern {
    Variable(String),
    Term(Term),
}

impl TermPattern {
    /// Free variable; a leading `?` or `$` is dropped
    pub fn var(name: &str) -> Self {
        TermPattern::Variable(name.trim_start_matches(['?', '$']).to_string())
    }

    pub fn iri(iri: impl Into<String>) -> Self {
        TermPattern::Term(Term::Iri(Iri::new(iri)))
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            TermPattern::Variable(name) => Some(name),
            TermPattern::Term(_) => None,
        }
    }
}

impl From<Term> for TermPattern {
    fn from(term: Term) -> Self {
        TermPattern::Term(term)
    }
}

impl From<Iri> for TermPattern {
    fn from(iri: Iri) -> Self {
        TermPattern::Term(Term::Iri(iri))
    }
}

impl From<&Iri> for TermPattern {
    fn from(iri: &Iri) -> Self {
        TermPattern::Term(Term::Iri(iri.clone()))
    }
}

impl From<Literal> for TermPattern {
    fn from(literal: Literal) -> Self {
        TermPattern::Term(Term::Literal(literal))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriplePattern {
    pub subject: TermPattern,
    pub predicate: TermPattern,
    pub object: TermPattern,
}

impl TriplePattern {
    pub fn new(
        subject: impl Into<TermPattern>,
        predicate: impl Into<TermPattern>,
        object: impl Into<TermPattern>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    pub fn variables(&self) -> impl Iterator<Item = &str> {
        [&self.subject, &self.predicate, &self.object]
            .into_iter()
            .filter_map(TermPattern::as_variable)
    }
}

/// Conjunction of triple patterns joined on shared variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BasicGraphPattern {
    patterns: Vec<TriplePattern>,
    /// Variables in order of first appearance
    variables: Vec<String>,
}

impl BasicGraphPattern {
    pub fn new(patterns: Vec<TriplePattern>) -> Self {
        let mut bgp = Self::default();
        for pattern in patterns {
            bgp.push(pattern);
        }
        bgp
    }

    pub fn push(&mut self, pattern: TriplePattern) {
        for var in pattern.variables() {
            if !self.variables.iter().any(|v| v == var) {
                self.variables.push(var.to_string());
            }
        }
        self.patterns.push(pattern);
    }

    pub fn patterns(&self) -> &[TriplePattern] {
        &self.patterns
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v == name)
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Sort key: one variable, a direction, and whether values compare as numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub variable: String,
    pub direction: Direction,
    pub numeric: bool,
}

impl OrderBy {
    pub fn asc(variable: &str) -> Self {
        Self {
            variable: variable.trim_start_matches(['?', '$']).to_string(),
            direction: Direction::Ascending,
            numeric: false,
        }
    }

    pub fn desc(variable: &str) -> Self {
        Self {
            direction: Direction::Descending,
            ..Self::asc(variable)
        }
    }

    /// Compare the literal's lexical form as a number
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}

/// A basic graph pattern with projection, ordering and limit, built once and evaluated
/// against any store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedQuery {
    pattern: BasicGraphPattern,
    projection: Option<Vec<String>>,
    order_by: Option<OrderBy>,
    limit: Option<usize>,
}

impl PreparedQuery {
    pub fn new(pattern: BasicGraphPattern) -> Self {
        Self {
            pattern,
            ..Default::default()
        }
    }

    pub fn from_patterns(patterns: Vec<TriplePattern>) -> Self {
        Self::new(BasicGraphPattern::new(patterns))
    }

    pub fn select(mut self, variables: &[&str]) -> Self {
        self.projection = Some(
            variables
                .iter()
                .map(|v| v.trim_start_matches(['?', '$']).to_string())
                .collect(),
        );
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn pattern(&self) -> &BasicGraphPattern {
        &self.pattern
    }

    pub fn ordering(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    pub fn limit_value(&self) -> Option<usize> {
        self.limit
    }

    /// Explicit projection, else every pattern variable
    pub fn projection(&self) -> &[String] {
        self.projection
            .as_deref()
            .unwrap_or_else(|| self.pattern.variables())
    }

    pub fn has_projection(&self) -> bool {
        self.projection.is_some()
    }
}
