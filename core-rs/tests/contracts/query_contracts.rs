// Query Contract Tests
//
// Join semantics, numeric ordering with limit, determinism.

use catalog_graph::{
    Iri, Literal, OrderBy, PreparedQuery, QueryEngine, Term, TermPattern as P, TriplePattern, TripleStore,
};

const EX: &str = "http://example.com/";

fn iri(local: &str) -> Iri {
    Iri::from_parts(EX, local)
}

fn p(local: &str) -> P {
    P::iri(format!("{}{}", EX, local))
}

/// WHY: Shared variables join across patterns (inner join)
/// SCENARIO: A is a Track named "X" performed by B named "Y"
/// BREAKS: Every multi-pattern query
#[test]
fn join_yields_exactly_one_binding() {
    let mut store = TripleStore::new();
    store.insert(iri("A"), iri("type"), iri("Track"));
    store.insert(iri("A"), iri("trackName"), Literal::string("X"));
    store.insert(iri("A"), iri("performer"), iri("B"));
    store.insert(iri("B"), iri("name"), Literal::string("Y"));

    let query = PreparedQuery::from_patterns(vec![
        TriplePattern::new(P::var("t"), p("type"), p("Track")),
        TriplePattern::new(P::var("t"), p("trackName"), P::var("n")),
        TriplePattern::new(P::var("t"), p("performer"), P::var("a")),
        TriplePattern::new(P::var("a"), p("name"), P::var("an")),
    ]);

    let rows = QueryEngine::new(&store).evaluate(&query);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("n"), Some(&Term::Literal(Literal::string("X"))));
    assert_eq!(rows[0].get("an"), Some(&Term::Literal(Literal::string("Y"))));
}

/// WHY: Numeric ordering parses literals before comparing; limit applies after ordering
/// SCENARIO: liveness 0.1, 0.9, 0.5 → desc, limit 2 → 0.9 then 0.5
/// BREAKS: Top-N queries
#[test]
fn order_desc_numeric_then_limit() {
    let mut store = TripleStore::new();
    for (track, value) in [("t1", 0.1), ("t2", 0.9), ("t3", 0.5)] {
        store.insert(iri(track), iri("liveness"), Literal::double(value));
    }

    let query = PreparedQuery::from_patterns(vec![TriplePattern::new(P::var("t"), p("liveness"), P::var("liveness"))])
        .order_by(OrderBy::desc("liveness").numeric())
        .limit(2);

    let rows = QueryEngine::new(&store).evaluate(&query);
    let tracks: Vec<_> = rows.iter().map(|r| r.get("t").cloned()).collect();
    assert_eq!(tracks, vec![Some(Term::Iri(iri("t2"))), Some(Term::Iri(iri("t3")))]);
}

/// WHY: Ordering on a variable no pattern binds yields no rows, not an error
/// BREAKS: Callers that expect Ok-empty for typos in ORDER BY
#[test]
fn order_on_unbound_variable_is_empty() {
    let mut store = TripleStore::new();
    store.insert(iri("t1"), iri("liveness"), Literal::double(0.1));

    let query = PreparedQuery::from_patterns(vec![TriplePattern::new(P::var("t"), p("liveness"), P::var("v"))])
        .order_by(OrderBy::desc("energy").numeric());
    assert!(QueryEngine::new(&store).evaluate(&query).is_empty());
}

/// WHY: Same store, same query → same sequence
/// REASON: Ties broken by the full binding, not by hash order
/// BREAKS: Reproducible reports
#[test]
fn evaluation_is_deterministic() {
    let mut store = TripleStore::new();
    for s in ["z", "m", "a", "q"] {
        store.insert(iri(s), iri("score"), Literal::integer(1));
    }
    let query = PreparedQuery::from_patterns(vec![TriplePattern::new(P::var("s"), p("score"), P::var("v"))])
        .order_by(OrderBy::desc("v").numeric());

    let engine = QueryEngine::new(&store);
    let first = engine.evaluate(&query);
    for _ in 0..5 {
        assert_eq!(engine.evaluate(&query), first);
    }
    assert_eq!(first[0].get("s"), Some(&Term::Iri(iri("a"))));
}
