/**
 * normalize.rs
 * Raw catalog identifier field -> local name under a resource namespace
 *
 * "spotify:track:4uLU6hMCjMI75M1A2tKUQC"          -> "track/4uLU6hMCjMI75M1A2tKUQC"
 * "spotify:artist:1,spotify:artist:2"             -> "artist/1"
 * " spotify:artist:1 , spotify:artist:2"          -> "artist/1"   (first entry is trimmed)
 * "spotify:track:a b"                             -> "track/a%20b"
 * (missing)                                       -> "unknown"
 *
 * The first comma entry is trimmed of surrounding whitespace; a plain split-and-replace of
 * the raw field would keep it. Characters that may not appear in an IRI are percent-encoded
 * (spaces, controls, angle brackets, quotes, braces, pipe, backslash, caret, backtick, `%`
 * and non-ASCII) so every local name yields an exportable IRI.
 */

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::model::Iri;

/// Local name used when the identifier field is missing or normalizes to nothing
pub const UNKNOWN_LOCAL_NAME: &str = "unknown";

/// Provider scheme stripped from raw identifiers
pub const PROVIDER_SCHEME: &str = "spotify:";

/// Bytes escaped in local names
const IRI_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Normalize a raw identifier field into a local name.
///
/// Multi-valued fields collapse to their first comma-separated entry. Total: every input,
/// including malformed strings, yields a non-empty local name.
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_LOCAL_NAME.to_string();
    };

    let first = raw.split(',').next().unwrap_or_default().trim();
    let local = first.replace(PROVIDER_SCHEME, "").replace(':', "/");

    if local.is_empty() {
        UNKNOWN_LOCAL_NAME.to_string()
    } else {
        utf8_percent_encode(&local, IRI_UNSAFE).to_string()
    }
}

/// Full resource identifier: `namespace` + normalized local name
pub fn resource_iri(namespace: &str, raw: Option<&str>) -> Iri {
    Iri::from_parts(namespace, &normalize(raw))
}
