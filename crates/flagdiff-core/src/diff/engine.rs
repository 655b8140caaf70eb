//! Aggregate feature diff.
//!
//! The core entry point is [`diff_feature_in_environment`], which composes the
//! feature-state, segment-override and variation diffs of one feature in one
//! environment into a [`FeatureDiff`]. The three sub-reports are independent
//! views over the same two snapshots.
//!
//! [`diff_feature`] takes whatever states the caller holds for a feature. When
//! they span several environments it diffs the first one and reports a
//! `MixedEnvironments` violation; callers comparing whole snapshots split by
//! environment first (see `diff_change_request`).

use crate::diff::feature_state::diff_feature_state;
use crate::diff::model::{FeatureDiff, InvariantViolationEntry};
use crate::diff::segment::diff_segments;
use crate::diff::variation::diff_variations;
use crate::model::{EnvironmentId, FeatureState, ProjectFlag, Segment};
use crate::snapshot::check_snapshot_invariants;

/// Compare one feature across two snapshots.
///
/// `old` and `new` may hold states of other features; only states whose
/// `feature` equals `project_flag.id` take part. The environment is the first
/// one seen in `old`, then `new`.
pub fn diff_feature(
    old: &[FeatureState],
    new: &[FeatureState],
    project_flag: &ProjectFlag,
    segments: &[Segment],
) -> FeatureDiff {
    let environments = environments_of(old, new, project_flag);
    let environment = environments.first().copied().flatten();

    let mut diff = diff_feature_in_environment(old, new, project_flag, environment, segments);
    if environments.len() > 1 {
        diff.invariant_violations.push(InvariantViolationEntry::MixedEnvironments {
            feature_id: project_flag.id,
            environment_ids: environments,
        });
    }
    diff
}

/// Compare one feature in one environment across two snapshots.
///
/// Only states with `feature == project_flag.id` and a matching `environment`
/// take part. The environment-level state of each side (first in input
/// order) feeds the feature-state and variation diffs; every segment-scoped
/// state feeds the segment diff.
pub fn diff_feature_in_environment(
    old: &[FeatureState],
    new: &[FeatureState],
    project_flag: &ProjectFlag,
    environment: Option<EnvironmentId>,
    segments: &[Segment],
) -> FeatureDiff {
    let old_states = states_of(old, project_flag, environment);
    let new_states = states_of(new, project_flag, environment);

    let old_default = environment_default(&old_states);
    let new_default = environment_default(&new_states);

    let feature_state = diff_feature_state(old_default, new_default);
    let segment_report = diff_segments(&old_states, &new_states, segments);
    let variations = diff_variations(old_default, new_default, project_flag);

    let mut invariant_violations = check_snapshot_invariants("old", &old_states);
    invariant_violations.extend(check_snapshot_invariants("new", &new_states));

    let total_changes =
        feature_state.total_changes + segment_report.total_changes + variations.total_changes;

    tracing::debug!(
        feature_id = project_flag.id,
        environment_id = ?environment,
        total_changes,
        "feature compared"
    );

    FeatureDiff {
        feature_id: project_flag.id,
        environment_id: environment,
        feature_name: project_flag.name.clone(),
        feature_state,
        segments: segment_report,
        variations,
        total_changes,
        invariant_violations,
    }
}

fn states_of(
    states: &[FeatureState],
    project_flag: &ProjectFlag,
    environment: Option<EnvironmentId>,
) -> Vec<FeatureState> {
    states
        .iter()
        .filter(|s| s.feature == project_flag.id && s.environment == environment)
        .cloned()
        .collect()
}

/// Distinct environments of the feature, in first-appearance order.
fn environments_of(
    old: &[FeatureState],
    new: &[FeatureState],
    project_flag: &ProjectFlag,
) -> Vec<Option<EnvironmentId>> {
    let mut environments = Vec::new();
    for state in old.iter().chain(new) {
        if state.feature == project_flag.id && !environments.contains(&state.environment) {
            environments.push(state.environment);
        }
    }
    environments
}

fn environment_default(states: &[FeatureState]) -> Option<&FeatureState> {
    states.iter().find(|s| s.is_environment_default())
}
