/**
 * vocab.rs
 * Ontology vocabularies used by the mapper and the canned queries
 *
 * - catalog: the ingest ontology (http://example.com/ontology#), resources under open.spotify.com
 * - musicOntology: Music Ontology classes (mo:Track, mo:MusicArtist, mo:Release) with
 *   FOAF / Dublin Core properties
 */

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::Iri;

pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema#";
pub const OWL_NS: &str = "http://www.w3.org/2002/07/owl#";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const SPOTIFY_NS: &str = "https://open.spotify.com/";
pub const CATALOG_NS: &str = "http://example.com/ontology#";
pub const MO_NS: &str = "http://purl.org/ontology/mo/";
pub const FOAF_NS: &str = "http://xmlns.com/foaf/0.1/";
pub const DC_NS: &str = "http://purl.org/dc/elements/1.1/";

/// Numeric audio-feature columns, all typed xsd:double
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AudioFeature {
    Loudness,
    Speechiness,
    Acousticness,
    Instrumentalness,
    Energy,
    Danceability,
    Liveness,
}

impl AudioFeature {
    pub const ALL: [AudioFeature; 7] = [
        AudioFeature::Loudness,
        AudioFeature::Speechiness,
        AudioFeature::Acousticness,
        AudioFeature::Instrumentalness,
        AudioFeature::Energy,
        AudioFeature::Danceability,
        AudioFeature::Liveness,
    ];

    /// Input column header
    pub fn column(&self) -> &'static str {
        match self {
            AudioFeature::Loudness => "Loudness",
            AudioFeature::Speechiness => "Speechiness",
            AudioFeature::Acousticness => "Acousticness",
            AudioFeature::Instrumentalness => "Instrumentalness",
            AudioFeature::Energy => "Energy",
            AudioFeature::Danceability => "Danceability",
            AudioFeature::Liveness => "Liveness",
        }
    }

    /// Local name of the ontology property
    pub fn local_name(&self) -> &'static str {
        match self {
            AudioFeature::Loudness => "loudness",
            AudioFeature::Speechiness => "speechiness",
            AudioFeature::Acousticness => "acousticness",
            AudioFeature::Instrumentalness => "instrumentalness",
            AudioFeature::Energy => "energy",
            AudioFeature::Danceability => "danceability",
            AudioFeature::Liveness => "liveness",
        }
    }
}

impl FromStr for AudioFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AudioFeature::ALL
            .into_iter()
            .find(|f| f.local_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown audio feature '{}'", s))
    }
}

impl fmt::Display for AudioFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.local_name())
    }
}

/// Which vocabulary the mapper emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VocabularyKind {
    #[default]
    Catalog,
    MusicOntology,
}

impl VocabularyKind {
    pub fn vocabulary(&self) -> &'static Vocabulary {
        match self {
            VocabularyKind::Catalog => &CATALOG,
            VocabularyKind::MusicOntology => &MUSIC_ONTOLOGY,
        }
    }
}

impl FromStr for VocabularyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catalog" => Ok(VocabularyKind::Catalog),
            "musicOntology" | "music-ontology" | "mo" => Ok(VocabularyKind::MusicOntology),
            other => Err(format!("unknown vocabulary '{}' (expected catalog or musicOntology)", other)),
        }
    }
}

/// Fixed set of class and property IRIs the mapper writes
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub kind: VocabularyKind,
    /// Namespace prepended to normalized local names
    pub resource_ns: String,
    /// Prefix declarations for serialization and query parsing
    pub prefixes: Vec<(&'static str, &'static str)>,

    pub rdf_type: Iri,

    pub track_class: Iri,
    pub track_name: Iri,
    pub performer: Iri,
    pub on_album: Iri,
    pub disc_number: Iri,
    pub track_number: Iri,
    pub copyright: Iri,

    pub artist_class: Iri,
    pub artist_name: Iri,

    pub album_class: Iri,
    pub album_name: Iri,
    pub album_artist: Iri,
    pub album_artist_name: Iri,

    /// Indexed by `AudioFeature as usize`
    features: [Iri; 7],
}

impl Vocabulary {
    pub fn feature(&self, feature: AudioFeature) -> &Iri {
        &self.features[feature as usize]
    }

    pub fn features(&self) -> impl Iterator<Item = (AudioFeature, &Iri)> {
        AudioFeature::ALL.into_iter().zip(self.features.iter())
    }

    /// Statements emitted per record: 7 track + 2 artist + 4 album, plus one per audio feature
    pub fn statements_per_record(&self, audio_features: bool) -> usize {
        13 + if audio_features { self.features.len() } else { 0 }
    }
}

fn ns(namespace: &str, local: &str) -> Iri {
    Iri::from_parts(namespace, local)
}

fn catalog_features() -> [Iri; 7] {
    AudioFeature::ALL.map(|f| ns(CATALOG_NS, f.local_name()))
}

pub static CATALOG: Lazy<Vocabulary> = Lazy::new(|| Vocabulary {
    kind: VocabularyKind::Catalog,
    resource_ns: SPOTIFY_NS.to_string(),
    prefixes: vec![
        ("rdf", RDF_NS),
        ("rdfs", RDFS_NS),
        ("xsd", XSD_NS),
        ("ns", CATALOG_NS),
        ("ex", SPOTIFY_NS),
    ],
    rdf_type: Iri::new(RDF_TYPE),
    track_class: ns(CATALOG_NS, "Track"),
    track_name: ns(CATALOG_NS, "trackName"),
    performer: ns(CATALOG_NS, "artist"),
    on_album: ns(CATALOG_NS, "album"),
    disc_number: ns(CATALOG_NS, "diskNumber"),
    track_number: ns(CATALOG_NS, "trackNumber"),
    copyright: ns(CATALOG_NS, "copyright"),
    artist_class: ns(CATALOG_NS, "Artist"),
    artist_name: ns(CATALOG_NS, "artistName"),
    album_class: ns(CATALOG_NS, "Album"),
    album_name: ns(CATALOG_NS, "albumName"),
    album_artist: ns(CATALOG_NS, "albumArtist"),
    album_artist_name: ns(CATALOG_NS, "albumArtistName"),
    features: catalog_features(),
});

pub static MUSIC_ONTOLOGY: Lazy<Vocabulary> = Lazy::new(|| Vocabulary {
    kind: VocabularyKind::MusicOntology,
    resource_ns: SPOTIFY_NS.to_string(),
    prefixes: vec![
        ("rdf", RDF_NS),
        ("rdfs", RDFS_NS),
        ("xsd", XSD_NS),
        ("mo", MO_NS),
        ("foaf", FOAF_NS),
        ("dc", DC_NS),
        ("ns", CATALOG_NS),
        ("ex", SPOTIFY_NS),
    ],
    rdf_type: Iri::new(RDF_TYPE),
    track_class: ns(MO_NS, "Track"),
    track_name: ns(DC_NS, "title"),
    performer: ns(FOAF_NS, "maker"),
    on_album: ns(DC_NS, "isPartOf"),
    disc_number: ns(CATALOG_NS, "diskNumber"),
    track_number: ns(MO_NS, "track_number"),
    copyright: ns(DC_NS, "rights"),
    artist_class: ns(MO_NS, "MusicArtist"),
    artist_name: ns(FOAF_NS, "name"),
    album_class: ns(MO_NS, "Release"),
    album_name: ns(DC_NS, "title"),
    album_artist: ns(FOAF_NS, "maker"),
    album_artist_name: ns(CATALOG_NS, "albumArtistName"),
    features: catalog_features(),
});
