//! Change-request diff: a proposed snapshot against live state, across every
//! (feature, environment) either side mentions.

use std::time::Instant;

use crate::diff::engine::diff_feature_in_environment;
use crate::diff::model::{ChangeRequestDiff, DiffIdentity, FeatureDiff};
use crate::model::{EnvironmentId, FeatureId, ProjectFlag, Segment};
use crate::snapshot::Snapshot;
use crate::{log_op_end, log_op_start};

/// Schema version of [`ChangeRequestDiff`]
pub const DIFF_SCHEMA_VERSION: u32 = 1;

/// Compare a proposed snapshot with the live one.
///
/// Each environment of a feature gets its own [`FeatureDiff`], so a change in
/// any environment is reported. Features without a matching [`ProjectFlag`] are compared with an empty
/// option list. A digest that cannot be computed is reported as an empty
/// string; the diff itself never fails.
pub fn diff_change_request(
    live: &Snapshot,
    proposed: &Snapshot,
    project_flags: &[ProjectFlag],
    segments: &[Segment],
) -> ChangeRequestDiff {
    let mut feature_keys: Vec<(FeatureId, Option<EnvironmentId>)> = live.feature_keys();
    feature_keys.extend(proposed.feature_keys());
    feature_keys.sort_unstable();
    feature_keys.dedup();

    log_op_start!("diff_change_request", feature_count = feature_keys.len());
    let start = Instant::now();

    let features: Vec<FeatureDiff> = feature_keys
        .iter()
        .map(|(feature_id, environment_id)| {
            let bare;
            let project_flag = match project_flags.iter().find(|f| f.id == *feature_id) {
                Some(flag) => flag,
                None => {
                    bare = ProjectFlag::bare(*feature_id);
                    &bare
                }
            };
            diff_feature_in_environment(
                &live.feature_states,
                &proposed.feature_states,
                project_flag,
                *environment_id,
                segments,
            )
        })
        .collect();

    let identity = DiffIdentity {
        old_digest: live.digest().unwrap_or_default(),
        new_digest: proposed.digest().unwrap_or_default(),
    };
    let total_changes: u32 = features.iter().map(|f| f.total_changes).sum();
    let invariant_violations: Vec<_> = features
        .iter()
        .flat_map(|f| f.invariant_violations.iter().cloned())
        .collect();

    log_op_end!(
        "diff_change_request",
        duration_ms = start.elapsed().as_millis() as u64,
        total_changes = total_changes
    );

    ChangeRequestDiff {
        diff_schema_version: DIFF_SCHEMA_VERSION,
        identity,
        features,
        total_changes,
        invariant_violations,
    }
}
