// Normalizer Contract Tests
//
// normalize() is total and keeps only the first of several comma-separated identifiers.

use catalog_graph::{normalize, UNKNOWN_LOCAL_NAME};

/// WHY: normalize never fails and never returns an empty local name
/// REASON: An empty local name would make the namespace itself a node
/// BREAKS: Missing fields silently merging into the namespace IRI
#[test]
fn normalizer_is_total() {
    let inputs = [
        None,
        Some(""),
        Some("   "),
        Some(","),
        Some(",spotify:artist:2"),
        Some("spotify:"),
        Some(":::"),
        Some("no scheme at all"),
        Some("spotify:track:1"),
    ];
    for input in inputs {
        let local = normalize(input);
        assert!(!local.is_empty(), "empty local name for {:?}", input);
    }
    assert_eq!(normalize(None), UNKNOWN_LOCAL_NAME);
}

/// WHY: Multi-valued identifier fields collapse to their first value
/// REASON: Tracks with several artists link only to the first one
/// BREAKS: Artist node identity across records
#[test]
fn normalizer_first_wins() {
    assert_eq!(normalize(Some("a:1,b:2")), normalize(Some("a:1")));
    assert_eq!(
        normalize(Some("spotify:artist:1,spotify:artist:2")),
        normalize(Some("spotify:artist:1"))
    );
}

/// WHY: Provider scheme stripped, separators become path segments
/// FORMAT: spotify:track:1 → track/1
/// BREAKS: Every resource IRI in exported graphs
#[test]
fn normalizer_format() {
    assert_eq!(normalize(Some("spotify:track:1")), "track/1");
    assert_eq!(normalize(Some("spotify:album:xyz")), "album/xyz");
}

/// WHY: Every normalized identifier forms a valid IRI under the resource namespace
/// REASON: Export rejects invalid IRIs, so one bad identifier would abort the whole run
/// BREAKS: Export of catalogs with spaces or punctuation in identifier fields
#[test]
fn normalizer_output_is_iri_safe() {
    let inputs = [
        "spotify:track:a b",
        "spotify:track:<x>",
        "spotify:track:\"quoted\"",
        "spotify:track:{a}|b\\c^d`e",
        "spotify:track:100%",
        "spotify:track:tab\there",
        "spotify:artist:Sigur Rós",
    ];
    for input in inputs {
        let iri = format!("https://open.spotify.com/{}", normalize(Some(input)));
        assert!(
            oxigraph::model::NamedNode::new(iri.as_str()).is_ok(),
            "{:?} normalized to invalid IRI {}",
            input,
            iri
        );
    }
}
