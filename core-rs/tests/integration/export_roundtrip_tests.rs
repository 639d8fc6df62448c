//! Integration tests for graph export
//!
//! Serializing a mapped catalog and parsing it back must yield the identical statement set,
//! for every supported syntax and both vocabularies.

use catalog_graph::export::{import_file, to_string};
use catalog_graph::{
    export_to_file, import_graph, GraphBuilder, RdfSyntax, RecordMapper, SchemaLoader, SchemaSource,
    TrackRecord, TripleStore, VocabularyKind,
};
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn catalog_store(kind: VocabularyKind) -> TripleStore {
    let records = (1..=4).map(|n| {
        Ok(TrackRecord {
            track_uri: Some(format!("spotify:track:{}", n)),
            track_name: Some(format!("Song \"{}\" <live>", n)),
            artist_uris: Some(format!("spotify:artist:{}", n % 2)),
            artist_names: Some("Björk & Co".to_string()),
            album_uri: Some("spotify:album:1".to_string()),
            album_name: Some("Album".to_string()),
            album_artist_uris: Some("spotify:artist:0".to_string()),
            album_artist_names: Some("Björk & Co".to_string()),
            disc_number: Some("1".to_string()),
            track_number: Some(n.to_string()),
            copyrights: None,
            loudness: Some(format!("-{}.25", n)),
            liveness: Some("1e-3".to_string()),
            ..Default::default()
        })
    });

    let mut store = TripleStore::new();
    RecordMapper::new(&mut store, kind.vocabulary())
        .with_audio_features(true)
        .map_all(records)
        .unwrap();
    store
}

fn statement_set(store: &TripleStore) -> BTreeSet<String> {
    store.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_roundtrip_every_syntax() {
    for kind in [VocabularyKind::Catalog, VocabularyKind::MusicOntology] {
        let store = catalog_store(kind);
        for syntax in [RdfSyntax::Turtle, RdfSyntax::NTriples, RdfSyntax::RdfXml] {
            let text = to_string(&store, Some(kind.vocabulary()), syntax).unwrap();
            let back = import_graph(text.as_bytes(), syntax).unwrap();

            assert_eq!(back.len(), store.len(), "{:?} via {}", kind, syntax);
            assert_eq!(statement_set(&back), statement_set(&store), "{:?} via {}", kind, syntax);
        }
    }
}

#[test]
fn test_roundtrip_through_file() {
    let temp = TempDir::new().unwrap();
    let store = catalog_store(VocabularyKind::Catalog);
    let path = temp.path().join("nested/dir/catalog.ttl");

    export_to_file(&store, Some(VocabularyKind::Catalog.vocabulary()), RdfSyntax::Turtle, &path).unwrap();
    let back = import_file(&path, RdfSyntax::Turtle).unwrap();
    assert_eq!(back.triples(), store.triples());
}

#[test]
fn test_exported_graph_bootstraps_as_schema() {
    let temp = TempDir::new().unwrap();
    let schema_path = temp.path().join("schema.nt");
    let schema_store = catalog_store(VocabularyKind::Catalog);
    fs::write(&schema_path, to_string(&schema_store, None, RdfSyntax::NTriples).unwrap()).unwrap();

    let mut store = TripleStore::new();
    let added = SchemaLoader::new(RdfSyntax::Turtle).bootstrap(&mut store, &SchemaSource::File(schema_path));
    assert_eq!(added, schema_store.len());
}

#[test]
fn test_export_is_deterministic() {
    let temp = TempDir::new().unwrap();
    let csv = temp.path().join("c.csv");
    fs::write(
        &csv,
        "Track URI,Track Name,Disc Number,Track Number\nspotify:track:b,B,1,2\nspotify:track:a,A,1,1\n",
    )
    .unwrap();

    let builder = GraphBuilder::new(VocabularyKind::Catalog);
    let (first, _) = builder.build_from_csv(&csv).unwrap();
    let (second, _) = builder.build_from_csv(&csv).unwrap();

    let a = to_string(&first, None, RdfSyntax::NTriples).unwrap();
    let b = to_string(&second, None, RdfSyntax::NTriples).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_identifier_with_space_roundtrips() {
    let record = TrackRecord {
        track_uri: Some("spotify:track:a b".to_string()),
        artist_uris: Some("spotify:artist:x y".to_string()),
        disc_number: Some("1".to_string()),
        track_number: Some("1".to_string()),
        ..Default::default()
    };

    let mut store = TripleStore::new();
    RecordMapper::new(&mut store, VocabularyKind::Catalog.vocabulary())
        .map_all(vec![Ok(record)])
        .unwrap();

    let text = to_string(&store, None, RdfSyntax::NTriples).unwrap();
    assert!(text.contains("<https://open.spotify.com/track/a%20b>"));

    let back = import_graph(text.as_bytes(), RdfSyntax::NTriples).unwrap();
    assert_eq!(statement_set(&back), statement_set(&store));
}
