//! Integration tests for the CSV → store → query pipeline
//!
//! Covers:
//! - Scenario record mapped to the expected identifiers and statements
//! - Config-driven builds with schema bootstrap and export
//! - Text queries and canned queries over a mapped catalog
//! - Fail-fast mapping with the offending record index

use catalog_graph::{
    AudioFeature, CatalogQuery, CsvRecordSource, GraphBuilder, GraphError, Iri, Literal, QueryEngine,
    QueryParser, RecordMapper, RunConfig, Term, TripleStore, VocabularyKind, CATALOG,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ==================== Test Helper Functions ====================

const HEADER: &str = "Track URI,Track Name,Artist URI(s),Artist Name(s),Album URI,Album Name,Album Artist URI(s),Album Artist Name(s),Disc Number,Track Number,Copyrights,Loudness,Speechiness,Acousticness,Instrumentalness,Energy,Danceability,Liveness";

fn write_catalog(dir: &Path) -> std::path::PathBuf {
    let rows = [
        "spotify:track:1,Song,spotify:artist:1,Artist,spotify:album:1,Album,spotify:artist:1,Artist,1,1,(c) 2020,-5.0,0.05,0.1,0,0.7,0.6,0.1",
        "spotify:track:2,Encore,\"spotify:artist:1,spotify:artist:9\",\"Artist,Guest\",spotify:album:1,Album,spotify:artist:1,Artist,1,2,(c) 2020,-4.0,0.04,0.2,0,0.8,0.5,0.9",
        "spotify:track:3,Solo,spotify:artist:2,Other,spotify:album:2,Illuminate (Deluxe),spotify:artist:2,Other,1,1,(p) 2017,-6.0,0.03,0.3,0.1,0.6,0.7,0.5",
    ];
    let path = dir.join("catalog.csv");
    fs::write(&path, format!("{}\n{}\n", HEADER, rows.join("\n"))).unwrap();
    path
}

fn spotify(local: &str) -> Iri {
    Iri::from_parts("https://open.spotify.com/", local)
}

// ==================== Tests ====================

#[test]
fn test_scenario_record_statements() {
    let temp = TempDir::new().unwrap();
    let csv = temp.path().join("one.csv");
    fs::write(
        &csv,
        "Track URI,Artist URI(s),Album URI,Album Artist URI(s),Track Name,Disc Number,Track Number,Copyrights,Album Name,Album Artist Name(s)\n\
         spotify:track:1,spotify:artist:1,spotify:album:1,spotify:artist:1,Song,1,1,(c) 2020,Album,Artist\n",
    )
    .unwrap();

    let mut store = TripleStore::new();
    let summary = RecordMapper::new(&mut store, &CATALOG)
        .map_all(CsvRecordSource::open(&csv).unwrap())
        .unwrap();
    assert_eq!(summary.records, 1);

    let track = spotify("track/1");
    let artist = spotify("artist/1");
    let album = spotify("album/1");
    let v = &*CATALOG;

    let expected: Vec<(Iri, Iri, Term)> = vec![
        (track.clone(), v.rdf_type.clone(), Term::Iri(v.track_class.clone())),
        (track.clone(), v.track_name.clone(), Literal::string("Song").into()),
        (track.clone(), v.performer.clone(), Term::Iri(artist.clone())),
        (track.clone(), v.on_album.clone(), Term::Iri(album.clone())),
        (track.clone(), v.disc_number.clone(), Literal::integer(1).into()),
        (track.clone(), v.track_number.clone(), Literal::integer(1).into()),
        (track.clone(), v.copyright.clone(), Literal::string("(c) 2020").into()),
        (artist.clone(), v.rdf_type.clone(), Term::Iri(v.artist_class.clone())),
        // Artist Name(s) column is absent from this input
        (artist.clone(), v.artist_name.clone(), Literal::string("").into()),
        (album.clone(), v.rdf_type.clone(), Term::Iri(v.album_class.clone())),
        (album.clone(), v.album_name.clone(), Literal::string("Album").into()),
        (album.clone(), v.album_artist.clone(), Term::Iri(artist.clone())),
        (album.clone(), v.album_artist_name.clone(), Literal::string("Artist").into()),
    ];

    assert_eq!(store.len(), expected.len());
    for (s, p, o) in &expected {
        assert!(store.contains_statement(s, p, o), "missing {} {} {}", s, p, o);
    }
}

#[test]
fn test_config_driven_build_with_schema_and_export() {
    let temp = TempDir::new().unwrap();
    let csv = write_catalog(temp.path());
    let schema = temp.path().join("schema.ttl");
    fs::write(
        &schema,
        "@prefix ns: <http://example.com/ontology#> .\n\
         @prefix owl: <http://www.w3.org/2002/07/owl#> .\n\
         ns:Track a owl:Class .\nns:Artist a owl:Class .\nns:Album a owl:Class .\n",
    )
    .unwrap();
    let config_path = temp.path().join("run.yaml");
    fs::write(
        &config_path,
        format!(
            "apiVersion: catalog-graph/v1\nkind: Run\nspec:\n  input: {}\n  audioFeatures: true\n  schema:\n    url: {}\n    format: turtle\n  export:\n    path: {}\n    format: ntriples\n",
            csv.display(),
            schema.display(),
            temp.path().join("out/graph.nt").display()
        ),
    )
    .unwrap();

    let config = RunConfig::load(&config_path).unwrap();
    let (store, report) = GraphBuilder::from_config(&config).build_from_csv(&config.spec.input).unwrap();

    assert_eq!(report.schema_statements, 3);
    assert_eq!(report.mapping.records, 3);
    assert_eq!(report.total_statements, store.len());
    assert_eq!(report.total_statements, report.schema_statements + report.mapping.statements_added);
    assert!(temp.path().join("out/graph.nt").exists());
}

#[test]
fn test_multi_valued_artist_collapses_to_first() {
    let temp = TempDir::new().unwrap();
    let csv = write_catalog(temp.path());
    let (store, _) = GraphBuilder::new(VocabularyKind::Catalog).build_from_csv(&csv).unwrap();

    let performers: Vec<&Term> = store.objects(&spotify("track/2"), &CATALOG.performer).collect();
    assert_eq!(performers, vec![&Term::Iri(spotify("artist/1"))]);
    assert!(store.match_pattern(Some(&spotify("artist/9")), None, None).is_empty());
}

#[test]
fn test_text_query_album_artist() {
    let temp = TempDir::new().unwrap();
    let csv = write_catalog(temp.path());
    let (store, _) = GraphBuilder::new(VocabularyKind::Catalog).build_from_csv(&csv).unwrap();

    let query = QueryParser::new()
        .with_vocabulary(&CATALOG)
        .parse(
            r#"SELECT ?albumArtistName WHERE {
                 ?album rdf:type ns:Album .
                 ?album ns:albumName "Illuminate (Deluxe)" .
                 ?album ns:albumArtistName ?albumArtistName .
               }"#,
        )
        .unwrap();

    let rows = QueryEngine::new(&store).evaluate(&query);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("albumArtistName"), Some(&Term::Literal(Literal::string("Other"))));
}

#[test]
fn test_canned_top_tracks_by_liveness() {
    let temp = TempDir::new().unwrap();
    let csv = write_catalog(temp.path());
    let (store, _) = GraphBuilder::new(VocabularyKind::Catalog)
        .with_audio_features(true)
        .build_from_csv(&csv)
        .unwrap();

    let query = CatalogQuery::top_tracks_by_feature(&CATALOG, AudioFeature::Liveness, 2);
    let rows = QueryEngine::new(&store).evaluate(&query);
    let names: Vec<_> = rows.iter().filter_map(|r| r.get("trackName")).collect();
    assert_eq!(
        names,
        vec![&Term::Literal(Literal::string("Encore")), &Term::Literal(Literal::string("Solo"))]
    );
}

#[test]
fn test_malformed_row_aborts_with_index() {
    let temp = TempDir::new().unwrap();
    let csv = temp.path().join("bad.csv");
    fs::write(
        &csv,
        format!(
            "{}\n{}\n{}\n",
            HEADER,
            "spotify:track:1,Song,spotify:artist:1,Artist,spotify:album:1,Album,spotify:artist:1,Artist,1,1,(c),,,,,,,",
            "spotify:track:2,Song,spotify:artist:1,Artist,spotify:album:1,Album,spotify:artist:1,Artist,first,2,(c),,,,,,,"
        ),
    )
    .unwrap();

    let err = GraphBuilder::new(VocabularyKind::Catalog).build_from_csv(&csv).unwrap_err();
    assert!(matches!(err, GraphError::MalformedNumericField { column: "Disc Number", .. }));
    assert_eq!(err.record_index(), Some(1));
    assert!(err.to_string().contains("Record 1"));
}

#[test]
fn test_missing_input_file() {
    let result = GraphBuilder::new(VocabularyKind::Catalog).build_from_csv("/nonexistent/catalog.csv");
    assert!(matches!(result, Err(GraphError::FileNotFound(_))));
}
