//! flagdiff core - feature-flag snapshot diff engine
//!
//! This crate compares two snapshots of feature-flag configuration and
//! produces structured, presentation-ready diff records:
//! - Typed value normalization for semantic equality of flag values
//! - Feature-state, segment-override and multivariate weight diffs
//! - Aggregate per-feature and change-request reports with badge counts
//! - Snapshot decoding, digests and uniqueness checks
//! - Markdown summaries for review displays

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod snapshot;
pub mod value;

#[doc(hidden)]
pub use flagdiff_core_types;

// Re-export commonly used types
pub use diff::{diff_change_request, diff_feature};
pub use errors::{ExError, ExErrorKind, FlagDiffError, Result};
pub use model::{FeatureState, FlagValue, ProjectFlag, Segment};
pub use snapshot::Snapshot;
pub use value::{normalize, TypedValue};
