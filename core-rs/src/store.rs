/**
 * store.rs
 * In-memory triple store with set semantics
 *
 * Indexes:
 * - spo: subject -> predicate -> objects (primary, owns every statement)
 * - ps:  predicate -> subjects carrying it
 *
 * Both are ordered maps, so enumeration and pattern matches are deterministic.
 */

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Iri, Term, Triple, TripleRef};

type PredicateObjects = BTreeMap<Iri, BTreeSet<Term>>;

#[derive(Debug, Clone, Default)]
pub struct TripleStore {
    spo: BTreeMap<Iri, PredicateObjects>,
    ps: BTreeMap<Iri, BTreeSet<Iri>>,
    len: usize,
}

impl TripleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a statement. Returns false if it was already present (no-op).
    pub fn add(&mut self, triple: Triple) -> bool {
        let Triple { subject, predicate, object } = triple;
        self.insert(subject, predicate, object)
    }

    pub fn insert(&mut self, subject: Iri, predicate: Iri, object: impl Into<Term>) -> bool {
        let object = object.into();

        if self.contains_statement(&subject, &predicate, &object) {
            return false;
        }

        self.ps
            .entry(predicate.clone())
            .or_default()
            .insert(subject.clone());
        self.spo
            .entry(subject)
            .or_default()
            .entry(predicate)
            .or_default()
            .insert(object);
        self.len += 1;
        true
    }

    /// Insert every statement, returning how many were new
    pub fn extend<I: IntoIterator<Item = Triple>>(&mut self, triples: I) -> usize {
        let mut added = 0;
        for triple in triples {
            if self.add(triple) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.contains_statement(&triple.subject, &triple.predicate, &triple.object)
    }

    pub fn contains_statement(&self, subject: &Iri, predicate: &Iri, object: &Term) -> bool {
        self.spo
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .map_or(false, |objects| objects.contains(object))
    }

    /// Count of distinct statements
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every statement, ordered by subject, predicate, object
    pub fn iter(&self) -> impl Iterator<Item = TripleRef<'_>> {
        self.spo.iter().flat_map(|(subject, preds)| {
            preds.iter().flat_map(move |(predicate, objects)| {
                objects.iter().map(move |object| TripleRef { subject, predicate, object })
            })
        })
    }

    /// Owned copy of every statement
    pub fn triples(&self) -> Vec<Triple> {
        self.iter().map(|t| t.to_owned()).collect()
    }

    /// Objects asserted for (subject, predicate)
    pub fn objects<'a>(&'a self, subject: &Iri, predicate: &Iri) -> impl Iterator<Item = &'a Term> + 'a {
        self.spo
            .get(subject)
            .and_then(|preds| preds.get(predicate))
            .into_iter()
            .flatten()
    }

    /// Statements matching the concrete components; `None` components are free.
    pub fn match_pattern<'a>(
        &'a self,
        subject: Option<&Iri>,
        predicate: Option<&Iri>,
        object: Option<&Term>,
    ) -> Vec<TripleRef<'a>> {
        let mut matches = Vec::new();

        match (subject, predicate) {
            (Some(subject), _) => {
                if let Some((subject, preds)) = self.spo.get_key_value(subject) {
                    collect_predicates(subject, preds, predicate, object, &mut matches);
                }
            }
            (None, Some(predicate)) => {
                let subjects = self.ps.get(predicate).into_iter().flatten();
                for subject in subjects {
                    if let Some((subject, preds)) = self.spo.get_key_value(subject) {
                        collect_predicates(subject, preds, Some(predicate), object, &mut matches);
                    }
                }
            }
            (None, None) => {
                for (subject, preds) in &self.spo {
                    collect_predicates(subject, preds, None, object, &mut matches);
                }
            }
        }

        matches
    }

    /// Number of distinct subjects
    pub fn subject_count(&self) -> usize {
        self.spo.len()
    }

    /// Predicates in use with their statement counts
    pub fn predicate_counts(&self) -> BTreeMap<&Iri, usize> {
        let mut counts = BTreeMap::new();
        for (predicate, subjects) in &self.ps {
            let count: usize = subjects
                .iter()
                .map(|s| self.objects(s, predicate).count())
                .sum();
            counts.insert(predicate, count);
        }
        counts
    }
}

fn collect_predicates<'a>(
    subject: &'a Iri,
    preds: &'a PredicateObjects,
    predicate: Option<&Iri>,
    object: Option<&Term>,
    out: &mut Vec<TripleRef<'a>>,
) {
    match predicate {
        Some(predicate) => {
            if let Some((predicate, objects)) = preds.get_key_value(predicate) {
                collect_objects(subject, predicate, objects, object, out);
            }
        }
        None => {
            for (predicate, objects) in preds {
                collect_objects(subject, predicate, objects, object, out);
            }
        }
    }
}

fn collect_objects<'a>(
    subject: &'a Iri,
    predicate: &'a Iri,
    objects: &'a BTreeSet<Term>,
    object: Option<&Term>,
    out: &mut Vec<TripleRef<'a>>,
) {
    match object {
        Some(object) => {
            if let Some(object) = objects.get(object) {
                out.push(TripleRef { subject, predicate, object });
            }
        }
        None => {
            out.extend(objects.iter().map(|object| TripleRef { subject, predicate, object }));
        }
    }
}
