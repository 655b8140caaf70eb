//! Snapshots: point-in-time collections of feature states.
//!
//! ## Responsibilities
//!
//! - Decode snapshot and catalog documents handed over by the data-fetching layer
//! - Compute deterministic snapshot digests (memoization keys for diffs)
//! - Detect per-snapshot uniqueness violations
//!
//! ## Non-Responsibilities
//!
//! - Fetching (the caller supplies bytes or already-decoded records)
//! - Diffing (handled by `crate::diff`)

pub mod digest;
pub mod invariants;
pub mod loader;

pub use digest::compute_snapshot_digest;
pub use invariants::check_snapshot_invariants;
pub use loader::{load_project_flags, load_segments};

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::{EnvironmentId, FeatureId, FeatureState};

/// A point-in-time collection of feature states.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub feature_states: Vec<FeatureState>,
}

impl Snapshot {
    pub fn new(feature_states: Vec<FeatureState>) -> Self {
        Self { feature_states }
    }

    /// Decode a snapshot document.
    ///
    /// Accepts either a JSON array of feature states or an object with a
    /// `feature_states` array.
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshot`: bytes are not UTF-8 JSON, the root is neither an
    ///   array nor an object, or an element is not a feature state
    /// - `MissingField`: object root without `feature_states`
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_named_json_bytes("snapshot", bytes)
    }

    /// Same as [`Snapshot::from_json_bytes`], naming the document in errors.
    pub fn from_named_json_bytes(document: &str, bytes: &[u8]) -> Result<Self> {
        let feature_states = loader::parse_record_list(document, bytes, "feature_states")
            .map_err(|e| crate::errors::ExError::from(e).with_op("load_snapshot"))?;
        Ok(Self { feature_states })
    }

    /// States belonging to one feature, in input order.
    pub fn states_for(&self, feature_id: FeatureId) -> Vec<FeatureState> {
        self.feature_states
            .iter()
            .filter(|s| s.feature == feature_id)
            .cloned()
            .collect()
    }

    /// Distinct feature ids, ascending.
    pub fn feature_ids(&self) -> Vec<FeatureId> {
        let mut ids: Vec<FeatureId> = self.feature_states.iter().map(|s| s.feature).collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    /// Distinct (feature, environment) pairs, ascending.
    pub fn feature_keys(&self) -> Vec<(FeatureId, Option<EnvironmentId>)> {
        let mut keys: Vec<(FeatureId, Option<EnvironmentId>)> = self
            .feature_states
            .iter()
            .map(|s| (s.feature, s.environment))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Hex SHA-256 digest of the snapshot's canonical form.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the states cannot be serialized.
    pub fn digest(&self) -> Result<String> {
        compute_snapshot_digest(&self.feature_states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_ids_sorted_and_distinct() {
        let snapshot = Snapshot::new(vec![
            FeatureState::new(5, true, None),
            FeatureState::new(2, true, None),
            FeatureState::new(5, false, None).with_segment(1, 0),
        ]);
        assert_eq!(snapshot.feature_ids(), vec![2, 5]);
        assert_eq!(snapshot.states_for(5).len(), 2);
    }

    #[test]
    fn test_feature_keys_split_environments() {
        let snapshot = Snapshot::new(vec![
            FeatureState::new(5, true, None).with_environment(2),
            FeatureState::new(5, true, None).with_environment(1),
            FeatureState::new(5, true, None).with_environment(2).with_segment(1, 0),
            FeatureState::new(3, true, None),
        ]);
        assert_eq!(snapshot.feature_keys(), vec![(3, None), (5, Some(1)), (5, Some(2))]);
    }
}
