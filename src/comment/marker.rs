//! Hidden comment marker encoding and scanning.
//!
//! The marker is the first line of every published comment body: an HTML
//! comment (invisible in rendered markdown) holding a JSON payload that
//! names the publish identity. The format is versioned through the fixed
//! prefix token, and self-delimiting on a single line, so extraction never
//! has to parse the surrounding markdown.

use serde::{Deserialize, Serialize};

use crate::types::PublishId;

/// Opens a marker line. The `v1` token versions the format; a future format
/// change uses a different prefix rather than a payload field, so old
/// readers see new markers as foreign content instead of mis-parsing them.
pub const MARKER_PREFIX: &str = "<!-- coverage-comment:v1 ";

/// Closes a marker line.
pub const MARKER_SUFFIX: &str = " -->";

/// The marker payload: which publish identity produced this comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentMarker {
    pub comment_from: PublishId,
}

/// Encodes a marker line for the given identity.
pub fn format_marker(identity: &PublishId) -> String {
    let marker = CommentMarker {
        comment_from: identity.clone(),
    };
    let payload = serde_json::to_string(&marker).expect("marker serialization should not fail");
    format!("{}{}{}", MARKER_PREFIX, payload, MARKER_SUFFIX)
}

/// Result of scanning a comment body for a marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerScan {
    /// The body does not begin with the marker prefix.
    NoMarker,

    /// The prefix is present but the line is not a well-formed marker.
    Malformed,

    /// A well-formed marker naming this publish identity.
    Marker(PublishId),
}

/// Scans a comment body for a leading marker line.
///
/// A marker only counts when it is the very first content of the body; a
/// marker-shaped line quoted further down in a human comment is not one.
/// Never panics and never errors: unparseable input is `Malformed`.
pub fn scan_marker(body: &str) -> MarkerScan {
    let Some(rest) = body.strip_prefix(MARKER_PREFIX) else {
        return MarkerScan::NoMarker;
    };
    let line = rest.lines().next().unwrap_or("");
    // The payload is JSON ending in `}`, so stripping the suffix from the
    // end of the line is unambiguous even if the identity itself contains
    // the suffix text.
    let Some(payload) = line.strip_suffix(MARKER_SUFFIX) else {
        return MarkerScan::Malformed;
    };
    match serde_json::from_str::<CommentMarker>(payload) {
        Ok(marker) => MarkerScan::Marker(marker.comment_from),
        Err(_) => MarkerScan::Malformed,
    }
}
