// Mapping Contract Tests
//
// Statement shape per record, the album-artist denormalization, and fail-fast coercion.

use catalog_graph::{
    GraphError, Iri, Literal, RecordMapper, Term, TrackRecord, TripleStore, CATALOG, MUSIC_ONTOLOGY,
};

fn record(n: usize) -> TrackRecord {
    TrackRecord {
        track_uri: Some(format!("spotify:track:{}", n)),
        track_name: Some(format!("Song {}", n)),
        artist_uris: Some(format!("spotify:artist:{}", n)),
        artist_names: Some(format!("Artist {}", n)),
        album_uri: Some(format!("spotify:album:{}", n)),
        album_name: Some(format!("Album {}", n)),
        album_artist_uris: Some(format!("spotify:albumartist:{}", n)),
        album_artist_names: Some(format!("Album Artist {}", n)),
        disc_number: Some("1".to_string()),
        track_number: Some(n.to_string()),
        copyrights: Some("(c) 2020".to_string()),
        loudness: Some("-5.5".to_string()),
        speechiness: Some("0.04".to_string()),
        acousticness: Some("0.2".to_string()),
        instrumentalness: Some("0".to_string()),
        energy: Some("0.8".to_string()),
        danceability: Some("0.6".to_string()),
        liveness: Some("0.1".to_string()),
    }
}

/// WHY: N distinct, complete records yield at least 7×N statements
/// REASON: One type statement plus attributes for each of track, artist and album
/// BREAKS: Any consumer expecting every entity to be typed and named
#[test]
fn mapping_completeness() {
    for audio_features in [false, true] {
        let n = 5;
        let mut store = TripleStore::new();
        let summary = RecordMapper::new(&mut store, &CATALOG)
            .with_audio_features(audio_features)
            .map_all((0..n).map(|i| Ok(record(i))))
            .unwrap();

        assert!(store.len() >= 7 * n);
        assert_eq!(store.len(), n * CATALOG.statements_per_record(audio_features));
        assert_eq!(summary.records, n);
        assert_eq!(summary.statements_added, store.len());
    }
}

/// WHY: Album-artist display name is asserted on the album node
/// REASON: The album-artist-by-album-title query reads it from there
/// BREAKS: Observable query results
#[test]
fn album_artist_name_lives_on_album() {
    for vocab in [&*CATALOG, &*MUSIC_ONTOLOGY] {
        let mut store = TripleStore::new();
        let ids = RecordMapper::new(&mut store, vocab).map_record(0, &record(1)).unwrap();

        let expected = Term::Literal(Literal::string("Album Artist 1"));
        assert!(store.contains_statement(&ids.album, &vocab.album_artist_name, &expected));
        assert!(store.contains_statement(&ids.album, &vocab.album_artist, &Term::Iri(ids.album_artist.clone())));
    }
}

/// WHY: A malformed numeric cell aborts the run and names the record
/// REASON: No recovery path; the diagnostic must identify the offending row
/// BREAKS: Silent data loss if coercion failures are skipped
#[test]
fn malformed_numeric_field_is_fatal_and_indexed() {
    let mut bad = record(2);
    bad.track_number = Some("two".to_string());

    let mut store = TripleStore::new();
    let result = RecordMapper::new(&mut store, &CATALOG).map_all(vec![Ok(record(0)), Ok(record(1)), Ok(bad)]);

    let err = result.unwrap_err();
    assert!(matches!(err, GraphError::MalformedNumericField { column: "Track Number", .. }));
    assert_eq!(err.record_index(), Some(2));
    // Earlier records stay, the failing one wrote nothing
    assert_eq!(store.len(), 2 * CATALOG.statements_per_record(false));
}

/// WHY: Missing identifiers map to the shared "unknown" node
/// BREAKS: Records with blank URI cells
#[test]
fn missing_identifier_maps_to_unknown() {
    let mut blank = record(1);
    blank.artist_uris = None;

    let mut store = TripleStore::new();
    let ids = RecordMapper::new(&mut store, &CATALOG).map_record(0, &blank).unwrap();
    assert_eq!(ids.artist, Iri::new("https://open.spotify.com/unknown"));
}
