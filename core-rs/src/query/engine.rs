/**
 * engine.rs
 * Basic graph pattern evaluation over a TripleStore
 *
 * Left-deep nested-loop join in declaration order: each partial binding is extended by
 * matching the next pattern with already-bound variables substituted. A binding that
 * cannot be extended is dropped. Ordering and limit apply to the joined result.
 */

use std::cmp::Ordering;
use tracing::{debug, span, Level};

use crate::model::{Iri, Term, TripleRef};
use crate::store::TripleStore;

use super::binding::Binding;
use super::pattern::{BasicGraphPattern, Direction, OrderBy, PreparedQuery, TermPattern, TriplePattern};

pub struct QueryEngine<'a> {
    store: &'a TripleStore,
}

/// Pattern position after substituting the current binding
enum Slot<'p> {
    Bound(&'p Term),
    Free,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a TripleStore) -> Self {
        Self { store }
    }

    /// Evaluate a prepared query: join, order, limit, project.
    ///
    /// Ordering on a variable the pattern never binds yields no rows.
    pub fn evaluate(&self, query: &PreparedQuery) -> Vec<Binding> {
        let span = span!(Level::DEBUG, "evaluate");
        let _enter = span.enter();

        if let Some(order) = query.ordering() {
            if !query.pattern().contains_variable(&order.variable) {
                debug!(variable = %order.variable, "ORDER BY variable not bound by pattern");
                return Vec::new();
            }
        }

        let mut bindings = self.evaluate_bgp(query.pattern());

        if let Some(order) = query.ordering() {
            bindings.sort_by(|a, b| compare_bindings(order, a, b).then_with(|| a.cmp(b)));
        }

        if let Some(limit) = query.limit_value() {
            bindings.truncate(limit);
        }

        if query.has_projection() {
            let projection = query.projection();
            bindings = bindings.iter().map(|b| b.project(projection)).collect();
        }

        debug!(rows = bindings.len(), "Query evaluated");
        bindings
    }

    /// Join all patterns; an empty pattern yields one empty binding
    pub fn evaluate_bgp(&self, bgp: &BasicGraphPattern) -> Vec<Binding> {
        let mut current = vec![Binding::new()];

        for pattern in bgp.patterns() {
            let mut extended = Vec::new();
            for binding in &current {
                extended.extend(self.extend_binding(pattern, binding));
            }
            current = extended;

            if current.is_empty() {
                break;
            }
        }

        current
    }

    fn extend_binding(&self, pattern: &TriplePattern, binding: &Binding) -> Vec<Binding> {
        // Subjects and predicates are IRIs; a literal bound there matches nothing
        let subject = match resolve(&pattern.subject, binding) {
            Slot::Bound(Term::Iri(iri)) => Some(iri),
            Slot::Bound(Term::Literal(_)) => return Vec::new(),
            Slot::Free => None,
        };
        let predicate = match resolve(&pattern.predicate, binding) {
            Slot::Bound(Term::Iri(iri)) => Some(iri),
            Slot::Bound(Term::Literal(_)) => return Vec::new(),
            Slot::Free => None,
        };
        let object = match resolve(&pattern.object, binding) {
            Slot::Bound(term) => Some(term),
            Slot::Free => None,
        };

        self.store
            .match_pattern(subject, predicate, object)
            .into_iter()
            .filter_map(|triple| bind_triple(pattern, binding, triple))
            .collect()
    }
}

fn resolve<'p>(position: &'p TermPattern, binding: &'p Binding) -> Slot<'p> {
    match position {
        TermPattern::Term(term) => Slot::Bound(term),
        TermPattern::Variable(name) => match binding.get(name) {
            Some(term) => Slot::Bound(term),
            None => Slot::Free,
        },
    }
}

/// Extend `binding` with the variables of `pattern` taken from `triple`.
/// Fails when a variable repeats within the pattern with different values.
fn bind_triple(pattern: &TriplePattern, binding: &Binding, triple: TripleRef<'_>) -> Option<Binding> {
    let mut extended = binding.clone();

    let positions: [(&TermPattern, Term); 3] = [
        (&pattern.subject, Term::Iri(triple.subject.clone())),
        (&pattern.predicate, Term::Iri(triple.predicate.clone())),
        (&pattern.object, triple.object.clone()),
    ];

    for (position, value) in &positions {
        if let TermPattern::Variable(name) = position {
            if !extended.bind(name, value) {
                return None;
            }
        }
    }

    Some(extended)
}

/// Compare on the ORDER BY variable. Values that are unbound (or not numeric under a
/// numeric sort) go last in either direction.
fn compare_bindings(order: &OrderBy, a: &Binding, b: &Binding) -> Ordering {
    if order.numeric {
        let key = |b: &Binding| b.get(&order.variable).and_then(numeric_value);
        compare_keys(key(a), key(b), order.direction, |x, y| x.total_cmp(y))
    } else {
        compare_keys(
            a.get(&order.variable),
            b.get(&order.variable),
            order.direction,
            |x, y| x.cmp(y),
        )
    }
}

fn compare_keys<T>(a: Option<T>, b: Option<T>, direction: Direction, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => match direction {
            Direction::Ascending => cmp(&x, &y),
            Direction::Descending => cmp(&y, &x),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn numeric_value(term: &Term) -> Option<f64> {
    term.as_literal()
        .and_then(|l| l.as_f64())
        .filter(|v| !v.is_nan())
}

/// Convenience: subjects having `rdf:type` = `class`
pub fn instances_of<'a>(store: &'a TripleStore, rdf_type: &Iri, class: &Iri) -> Vec<&'a Iri> {
    let class = Term::Iri(class.clone());
    store
        .match_pattern(None, Some(rdf_type), Some(&class))
        .into_iter()
        .map(|t| t.subject)
        .collect()
}
