/**
 * mapper.rs
 * Record-to-triples mapping
 *
 * Per record (catalog vocabulary shown):
 *
 *   track   a ns:Track ; ns:trackName ; ns:artist <artist> ; ns:album <album> ;
 *           ns:diskNumber xsd:integer ; ns:trackNumber xsd:integer ; ns:copyright
 *           [ ns:loudness ... ns:liveness xsd:double ]
 *   artist  a ns:Artist ; ns:artistName
 *   album   a ns:Album ; ns:albumName ; ns:albumArtist <albumArtist> ; ns:albumArtistName
 *
 * The album-artist display name is asserted on the album node itself. Downstream queries
 * (e.g. album-artist name by album title) rely on it.
 *
 * Numeric coercion runs before the first `add`, so a failing record writes nothing.
 */

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{GraphError, Result};
use crate::model::{Iri, Literal, Term};
use crate::normalize::resource_iri;
use crate::record::TrackRecord;
use crate::store::TripleStore;
use crate::vocab::{AudioFeature, Vocabulary};

/// Identifiers derived for one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRecord {
    pub track: Iri,
    pub artist: Iri,
    pub album: Iri,
    pub album_artist: Iri,
}

/// Outcome of a mapping run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingSummary {
    pub records: usize,
    pub statements_added: usize,
    /// Scalar assertions that added a second, different value for (subject, predicate)
    pub ambiguous_values: usize,
}

pub struct RecordMapper<'a> {
    store: &'a mut TripleStore,
    vocab: &'a Vocabulary,
    audio_features: bool,
    summary: MappingSummary,
}

/// Numeric cells coerced up front
struct NumericCells {
    disc_number: i64,
    track_number: i64,
    features: Vec<(AudioFeature, f64)>,
}

impl<'a> RecordMapper<'a> {
    pub fn new(store: &'a mut TripleStore, vocab: &'a Vocabulary) -> Self {
        Self {
            store,
            vocab,
            audio_features: false,
            summary: MappingSummary::default(),
        }
    }

    /// Emit the audio-feature attributes (full-feature variant)
    pub fn with_audio_features(mut self, enabled: bool) -> Self {
        self.audio_features = enabled;
        self
    }

    pub fn summary(&self) -> MappingSummary {
        self.summary
    }

    /// Map every record in order. Stops at the first failing record.
    pub fn map_all<I>(mut self, records: I) -> Result<MappingSummary>
    where
        I: IntoIterator<Item = Result<TrackRecord>>,
    {
        for (index, record) in records.into_iter().enumerate() {
            let record = record?;
            self.map_record(index, &record)?;
        }

        info!(
            records = self.summary.records,
            statements = self.summary.statements_added,
            ambiguous = self.summary.ambiguous_values,
            "Mapped catalog records"
        );
        Ok(self.summary)
    }

    /// Map a single record; `index` identifies it in diagnostics
    pub fn map_record(&mut self, index: usize, record: &TrackRecord) -> Result<MappedRecord> {
        let numeric = self.coerce_numeric(index, record)?;
        let vocab = self.vocab;

        let ids = MappedRecord {
            track: resource_iri(&vocab.resource_ns, record.track_uri.as_deref()),
            artist: resource_iri(&vocab.resource_ns, record.artist_uris.as_deref()),
            album: resource_iri(&vocab.resource_ns, record.album_uri.as_deref()),
            album_artist: resource_iri(&vocab.resource_ns, record.album_artist_uris.as_deref()),
        };

        // Track
        self.add(&ids.track, &vocab.rdf_type, vocab.track_class.clone());
        self.add_scalar(&ids.track, &vocab.track_name, text(&record.track_name));
        self.add(&ids.track, &vocab.performer, ids.artist.clone());
        self.add(&ids.track, &vocab.on_album, ids.album.clone());
        self.add_scalar(&ids.track, &vocab.disc_number, Literal::integer(numeric.disc_number));
        self.add_scalar(&ids.track, &vocab.track_number, Literal::integer(numeric.track_number));
        self.add_scalar(&ids.track, &vocab.copyright, text(&record.copyrights));
        for (feature, value) in numeric.features {
            self.add_scalar(&ids.track, vocab.feature(feature), Literal::double(value));
        }

        // Artist
        self.add(&ids.artist, &vocab.rdf_type, vocab.artist_class.clone());
        self.add_scalar(&ids.artist, &vocab.artist_name, text(&record.artist_names));

        // Album
        self.add(&ids.album, &vocab.rdf_type, vocab.album_class.clone());
        self.add_scalar(&ids.album, &vocab.album_name, text(&record.album_name));
        self.add(&ids.album, &vocab.album_artist, ids.album_artist.clone());
        self.add_scalar(&ids.album, &vocab.album_artist_name, text(&record.album_artist_names));

        self.summary.records += 1;
        Ok(ids)
    }

    fn coerce_numeric(&self, index: usize, record: &TrackRecord) -> Result<NumericCells> {
        let disc_number = coerce_integer(index, "Disc Number", record.disc_number.as_deref())?;
        let track_number = coerce_integer(index, "Track Number", record.track_number.as_deref())?;

        let mut features = Vec::new();
        if self.audio_features {
            for feature in AudioFeature::ALL {
                if let Some(value) = coerce_double(index, feature.column(), record.audio_feature(feature))? {
                    features.push((feature, value));
                }
            }
        }

        Ok(NumericCells {
            disc_number,
            track_number,
            features,
        })
    }

    fn add(&mut self, subject: &Iri, predicate: &Iri, object: impl Into<Term>) {
        if self.store.insert(subject.clone(), predicate.clone(), object) {
            self.summary.statements_added += 1;
        }
    }

    /// Add a literal attribute, counting it when the subject already holds a different value
    fn add_scalar(&mut self, subject: &Iri, predicate: &Iri, value: Literal) {
        let object = Term::Literal(value);
        let conflicting = self.store.objects(subject, predicate).any(|existing| existing != &object);

        if conflicting && !self.store.contains_statement(subject, predicate, &object) {
            self.summary.ambiguous_values += 1;
            debug!(
                subject = subject.as_str(),
                predicate = predicate.as_str(),
                value = %object,
                "Accumulating second value for scalar attribute"
            );
        }

        self.add(subject, predicate, object);
    }
}

/// Absent text cells become the empty string literal
fn text(cell: &Option<String>) -> Literal {
    Literal::string(cell.as_deref().unwrap_or_default())
}

fn coerce_integer(index: usize, column: &'static str, raw: Option<&str>) -> Result<i64> {
    let value = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(GraphError::MissingNumericField { index, column })?;

    if let Ok(parsed) = value.parse::<i64>() {
        return Ok(parsed);
    }

    // Integral floats ("1.0") come from columns that once held NaN.
    // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound.
    match value.parse::<f64>() {
        Ok(parsed)
            if parsed.fract() == 0.0 && parsed >= i64::MIN as f64 && parsed < i64::MAX as f64 =>
        {
            Ok(parsed as i64)
        }
        _ => Err(GraphError::MalformedNumericField {
            index,
            column,
            value: value.to_string(),
        }),
    }
}

fn coerce_double(index: usize, column: &'static str, raw: Option<&str>) -> Result<Option<f64>> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| GraphError::MalformedNumericField {
            index,
            column,
            value: value.to_string(),
        })
}
