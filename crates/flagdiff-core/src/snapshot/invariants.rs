//! Per-snapshot uniqueness checks.
//!
//! A snapshot holds at most one environment-level state per (feature,
//! environment) and at most one override per (feature, environment, segment).
//! Violations are reported, never fatal.

use std::collections::BTreeMap;

use crate::diff::model::InvariantViolationEntry;
use crate::model::{EnvironmentId, FeatureId, FeatureState, SegmentId};

/// Check uniqueness rules on one side of a comparison.
///
/// `which` labels the side ("old" / "new") in the returned entries, which are
/// sorted by feature, environment and segment.
pub fn check_snapshot_invariants(
    which: &str,
    states: &[FeatureState],
) -> Vec<InvariantViolationEntry> {
    let mut env_counts: BTreeMap<(FeatureId, Option<EnvironmentId>), usize> = BTreeMap::new();
    let mut override_counts: BTreeMap<(FeatureId, Option<EnvironmentId>, SegmentId), usize> =
        BTreeMap::new();

    for state in states {
        match state.segment_id() {
            None => *env_counts.entry((state.feature, state.environment)).or_default() += 1,
            Some(segment_id) => {
                *override_counts
                    .entry((state.feature, state.environment, segment_id))
                    .or_default() += 1
            }
        }
    }

    let env_violations = env_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((feature_id, environment_id), count)| {
            InvariantViolationEntry::DuplicateEnvironmentState {
                which: which.to_string(),
                feature_id,
                environment_id,
                count,
            }
        });

    let override_violations = override_counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((feature_id, environment_id, segment_id), count)| {
            InvariantViolationEntry::DuplicateSegmentOverride {
                which: which.to_string(),
                feature_id,
                environment_id,
                segment_id,
                count,
            }
        });

    let violations: Vec<InvariantViolationEntry> =
        env_violations.chain(override_violations).collect();
    if !violations.is_empty() {
        tracing::debug!(which, count = violations.len(), "snapshot invariant violations");
    }
    violations
}
