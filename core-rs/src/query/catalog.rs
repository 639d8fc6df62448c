/**
 * catalog.rs
 * Canned catalog queries, built as prepared queries against a vocabulary
 *
 * Every query pins the class of the nodes it walks, so vocabularies that reuse one
 * property for several classes (dc:title, foaf:maker) stay unambiguous.
 */

use crate::model::Literal;
use crate::vocab::{AudioFeature, Vocabulary};

use super::pattern::{OrderBy, PreparedQuery, TermPattern as P, TriplePattern};

pub struct CatalogQuery;

impl CatalogQuery {
    /// Album-artist name asserted on the album titled `album_name`
    ///
    /// Binds `?album` and `?albumArtistName`.
    pub fn album_artist_name(vocab: &Vocabulary, album_name: &str) -> PreparedQuery {
        PreparedQuery::from_patterns(vec![
            TriplePattern::new(P::var("album"), &vocab.rdf_type, &vocab.album_class),
            TriplePattern::new(P::var("album"), &vocab.album_name, Literal::string(album_name)),
            TriplePattern::new(P::var("album"), &vocab.album_artist_name, P::var("albumArtistName")),
        ])
        .select(&["albumArtistName"])
        .order_by(OrderBy::asc("albumArtistName"))
    }

    /// Tracks performed by the artist named `artist_name`, ordered by track name
    pub fn tracks_by_artist(vocab: &Vocabulary, artist_name: &str) -> PreparedQuery {
        PreparedQuery::from_patterns(vec![
            TriplePattern::new(P::var("artist"), &vocab.rdf_type, &vocab.artist_class),
            TriplePattern::new(P::var("artist"), &vocab.artist_name, Literal::string(artist_name)),
            TriplePattern::new(P::var("track"), &vocab.performer, P::var("artist")),
            TriplePattern::new(P::var("track"), &vocab.rdf_type, &vocab.track_class),
            TriplePattern::new(P::var("track"), &vocab.track_name, P::var("trackName")),
        ])
        .select(&["track", "trackName"])
        .order_by(OrderBy::asc("trackName"))
    }

    /// The `limit` tracks with the highest value of `feature`
    pub fn top_tracks_by_feature(vocab: &Vocabulary, feature: AudioFeature, limit: usize) -> PreparedQuery {
        let value = feature.local_name();
        PreparedQuery::from_patterns(vec![
            TriplePattern::new(P::var("track"), &vocab.rdf_type, &vocab.track_class),
            TriplePattern::new(P::var("track"), &vocab.track_name, P::var("trackName")),
            TriplePattern::new(P::var("track"), vocab.feature(feature), P::var(value)),
        ])
        .select(&["track", "trackName", value])
        .order_by(OrderBy::desc(value).numeric())
        .limit(limit)
    }

    /// Track listing of the album titled `album_name`, by disc then track number
    ///
    /// Only the track number drives ordering; disc number is projected for display.
    pub fn track_listing(vocab: &Vocabulary, album_name: &str) -> PreparedQuery {
        PreparedQuery::from_patterns(vec![
            TriplePattern::new(P::var("album"), &vocab.rdf_type, &vocab.album_class),
            TriplePattern::new(P::var("album"), &vocab.album_name, Literal::string(album_name)),
            TriplePattern::new(P::var("track"), &vocab.on_album, P::var("album")),
            TriplePattern::new(P::var("track"), &vocab.rdf_type, &vocab.track_class),
            TriplePattern::new(P::var("track"), &vocab.track_name, P::var("trackName")),
            TriplePattern::new(P::var("track"), &vocab.disc_number, P::var("discNumber")),
            TriplePattern::new(P::var("track"), &vocab.track_number, P::var("trackNumber")),
        ])
        .select(&["discNumber", "trackNumber", "trackName"])
        .order_by(OrderBy::asc("trackNumber").numeric())
    }
}
