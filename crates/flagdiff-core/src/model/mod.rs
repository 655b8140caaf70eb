//! Wire-level records supplied by the data-fetching layer.
//!
//! All records are read-only inputs to the diff engine. Optional wire fields
//! deserialize to their documented defaults so that partially populated API
//! payloads still diff cleanly.

pub mod feature_state;
pub mod flag_value;
pub mod project_flag;
pub mod segment;

pub use feature_state::{FeatureSegment, FeatureState, MultivariateFeatureStateValue};
pub use flag_value::{FlagValue, TaggedFlagValue, ValueType};
pub use project_flag::{MultivariateOption, ProjectFlag};
pub use segment::Segment;

/// Identifier of a feature (`ProjectFlag.id`, `FeatureState.feature`)
pub type FeatureId = u64;
/// Identifier of an environment
pub type EnvironmentId = u64;
/// Identifier of a segment
pub type SegmentId = u64;
/// Identifier of a multivariate option
pub type OptionId = u64;
