// Triple Store Contract Tests
//
// The store is a set, not a multiset. Every consumer (mapper idempotence, export
// round-trip, query result counts) depends on it.

use catalog_graph::{Iri, Literal, Triple, TripleStore};

fn iri(local: &str) -> Iri {
    Iri::from_parts("http://example.com/", local)
}

/// WHY: Re-adding an identical statement is a no-op
/// REASON: Records sharing artist/album nodes re-assert the same statements
/// BREAKS: Statement counts, export size, query row multiplicity
#[test]
fn add_is_idempotent() {
    let mut store = TripleStore::new();
    let triple = Triple::new(iri("t"), iri("name"), Literal::string("X"));

    assert!(store.add(triple.clone()));
    let size = store.len();
    assert!(!store.add(triple));
    assert_eq!(store.len(), size, "second add must not change size");
}

/// WHY: Literals differing only in datatype are distinct statements
/// REASON: "1" as string and 1 as integer carry different type tags
/// BREAKS: Numeric ordering and export round-trip if collapsed
#[test]
fn literal_type_is_part_of_identity() {
    let mut store = TripleStore::new();
    store.insert(iri("t"), iri("disc"), Literal::integer(1));
    store.insert(iri("t"), iri("disc"), Literal::string("1"));
    assert_eq!(store.len(), 2);
}

/// WHY: Enumeration is stable within and across calls
/// REASON: Export and query tie-breaks rely on a deterministic order
/// BREAKS: Reproducible output files
#[test]
fn enumeration_is_stable() {
    let mut store = TripleStore::new();
    for n in [3, 1, 2] {
        store.insert(iri(&format!("t{}", n)), iri("n"), Literal::integer(n));
    }
    let first = store.triples();
    let second = store.triples();
    assert_eq!(first, second);
    assert_eq!(first.len(), store.len());
}
