//! Snapshot digests.
//!
//! The digest is order-insensitive: states are sorted by (feature,
//! environment, segment), then by their serialized form, before hashing, so
//! two fetches of the same data in a different order share one memoization
//! key even when a snapshot holds duplicate states.

use sha2::{Digest, Sha256};

use crate::errors::{FlagDiffError, Result};
use crate::model::{EnvironmentId, FeatureId, FeatureState, SegmentId};

type StateKey = (FeatureId, Option<EnvironmentId>, Option<SegmentId>);

/// Compute the hex SHA-256 digest of a list of feature states.
///
/// # Errors
///
/// Returns `Serialization` if JSON serialization fails.
pub fn compute_snapshot_digest(states: &[FeatureState]) -> Result<String> {
    let mut ordered: Vec<(StateKey, String)> = states
        .iter()
        .map(|s| -> Result<(StateKey, String)> {
            let json = serde_json::to_string(s).map_err(FlagDiffError::from)?;
            Ok(((s.feature, s.environment, s.segment_id()), json))
        })
        .collect::<Result<_>>()?;
    ordered.sort();

    let canonical = format!(
        "[{}]",
        ordered
            .into_iter()
            .map(|(_, json)| json)
            .collect::<Vec<_>>()
            .join(",")
    );
    Ok(hash_string(&canonical))
}

fn hash_string(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    hex::encode(hasher.finalize())
}
