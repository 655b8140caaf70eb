//! Feature-flag diff engine.
//!
//! Compares two snapshots of feature states and produces structured diff
//! records for review displays (change requests, version history).
//!
//! ## Entry points
//!
//! ```ignore
//! use flagdiff_core::diff::{diff_feature, diff_change_request};
//!
//! let feature = diff_feature(&old_states, &new_states, &project_flag, &segments);
//! let review = diff_change_request(&live, &proposed, &project_flags, &segments);
//! ```
//!
//! ## Guarantees
//!
//! - **Purity**: every function takes shared references and returns owned
//!   records; inputs are never mutated and repeated calls give equal output.
//! - **Totality**: missing fields degrade to defaults (`enabled = false`,
//!   empty value, priority `-1`); nothing here returns an error or panics.
//! - **Identity matching**: segments and variations are matched by id, never
//!   by position.
//! - **Environment scoping**: a [`FeatureDiff`] covers one feature in one
//!   environment; change-request diffs emit one per (feature, environment).

pub mod change_request;
pub mod engine;
pub mod feature_state;
pub mod human_summary;
pub mod model;
pub mod scalar;
pub mod segment;
pub mod variation;

pub use change_request::diff_change_request;
pub use engine::{diff_feature, diff_feature_in_environment};
pub use feature_state::diff_feature_state;
pub use human_summary::{render_change_request_summary, render_feature_summary};
pub use model::{
    ChangeRequestDiff, FeatureDiff, FeatureStateDiff, SegmentDiff, SegmentDiffReport,
    VariationDiff, VariationDiffReport,
};
pub use scalar::{diff_enabled, diff_value};
pub use segment::diff_segments;
pub use variation::diff_variations;
