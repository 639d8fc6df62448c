/**
 * record.rs
 * Tabular catalog records and the CSV source that yields them
 *
 * Every column is optional at read time; an empty cell is an absent value. Numeric columns
 * are kept as raw text and coerced by the mapper, so coercion failures carry the record index.
 */

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::{GraphError, Result};
use crate::vocab::AudioFeature;

/// One input row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackRecord {
    #[serde(rename = "Track URI")]
    pub track_uri: Option<String>,
    #[serde(rename = "Track Name")]
    pub track_name: Option<String>,
    #[serde(rename = "Artist URI(s)")]
    pub artist_uris: Option<String>,
    #[serde(rename = "Artist Name(s)")]
    pub artist_names: Option<String>,
    #[serde(rename = "Album URI")]
    pub album_uri: Option<String>,
    #[serde(rename = "Album Name")]
    pub album_name: Option<String>,
    #[serde(rename = "Album Artist URI(s)")]
    pub album_artist_uris: Option<String>,
    #[serde(rename = "Album Artist Name(s)")]
    pub album_artist_names: Option<String>,
    #[serde(rename = "Disc Number")]
    pub disc_number: Option<String>,
    #[serde(rename = "Track Number")]
    pub track_number: Option<String>,
    #[serde(rename = "Copyrights")]
    pub copyrights: Option<String>,

    #[serde(rename = "Loudness")]
    pub loudness: Option<String>,
    #[serde(rename = "Speechiness")]
    pub speechiness: Option<String>,
    #[serde(rename = "Acousticness")]
    pub acousticness: Option<String>,
    #[serde(rename = "Instrumentalness")]
    pub instrumentalness: Option<String>,
    #[serde(rename = "Energy")]
    pub energy: Option<String>,
    #[serde(rename = "Danceability")]
    pub danceability: Option<String>,
    #[serde(rename = "Liveness")]
    pub liveness: Option<String>,
}

impl TrackRecord {
    /// Raw cell for an audio-feature column
    pub fn audio_feature(&self, feature: AudioFeature) -> Option<&str> {
        let cell = match feature {
            AudioFeature::Loudness => &self.loudness,
            AudioFeature::Speechiness => &self.speechiness,
            AudioFeature::Acousticness => &self.acousticness,
            AudioFeature::Instrumentalness => &self.instrumentalness,
            AudioFeature::Energy => &self.energy,
            AudioFeature::Danceability => &self.danceability,
            AudioFeature::Liveness => &self.liveness,
        };
        cell.as_deref()
    }
}

/// Ordered record stream over CSV input (header row required)
pub struct CsvRecordSource<R: Read> {
    records: csv::DeserializeRecordsIntoIter<R, TrackRecord>,
}

impl CsvRecordSource<File> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(GraphError::FileNotFound(path.to_string_lossy().to_string()));
        }

        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> CsvRecordSource<R> {
    pub fn from_reader(reader: R) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader)
            .into_deserialize();
        Self { records }
    }
}

impl<R: Read> Iterator for CsvRecordSource<R> {
    type Item = Result<TrackRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|r| r.map_err(GraphError::from))
    }
}
