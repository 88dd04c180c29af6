//! Comment rendering and reconciliation.
//!
//! Published comments carry a hidden first-line marker identifying which
//! publish identity produced them. The marker is the system's only durable
//! state: finding it again on a later run is what turns "post a comment"
//! into "update the comment posted last time".

pub mod format;
pub mod marker;
pub mod reconcile;

pub use format::{RenderedPublication, format_comment};
pub use marker::{CommentMarker, MarkerScan, format_marker, scan_marker};
pub use reconcile::{ReconcileError, ReconcileOutcome, reconcile};
