//! Segment-override diff.
//!
//! Every segment id referenced by either snapshot yields exactly one
//! [`SegmentDiff`]. An override present on one side only is `created` or
//! `deleted`; change detection for it compares the present side with itself,
//! so the transition alone contributes no field change. The reported old/new
//! fields still show the absent side's defaults (`false`, empty,
//! [`ABSENT_PRIORITY`]).

use std::collections::BTreeSet;

use crate::diff::feature_state::diff_feature_state;
use crate::diff::model::{SegmentDiff, SegmentDiffReport, ABSENT_PRIORITY};
use crate::model::{FeatureState, Segment, SegmentId};

/// Diff the segment overrides of one feature between two snapshots.
///
/// Output order follows first appearance in `old`, then `new`; callers sort
/// for display (see [`SegmentDiffReport::grouped`]).
pub fn diff_segments(
    old: &[FeatureState],
    new: &[FeatureState],
    segments: &[Segment],
) -> SegmentDiffReport {
    let mut seen = BTreeSet::new();
    let segment_ids: Vec<SegmentId> = old
        .iter()
        .chain(new)
        .filter_map(FeatureState::segment_id)
        .filter(|id| seen.insert(*id))
        .collect();

    let diffs: Vec<SegmentDiff> = segment_ids
        .into_iter()
        .map(|segment_id| {
            let segment = segments.iter().find(|s| s.id == segment_id).cloned();
            diff_segment_override(
                segment_id,
                segment,
                find_override(old, segment_id),
                find_override(new, segment_id),
            )
        })
        .collect();

    let total_changes = diffs.iter().filter(|d| d.total_changes > 0).count() as u32;
    tracing::debug!(
        segment_count = diffs.len(),
        total_changes,
        "segment overrides compared"
    );

    SegmentDiffReport {
        diffs,
        total_changes,
    }
}

/// Diff a single override given both sides.
pub fn diff_segment_override(
    segment_id: SegmentId,
    segment: Option<Segment>,
    old: Option<&FeatureState>,
    new: Option<&FeatureState>,
) -> SegmentDiff {
    let (compare_old, compare_new) = match (old, new) {
        (None, Some(n)) => (Some(n), Some(n)),
        (Some(o), None) => (Some(o), Some(o)),
        sides => sides,
    };

    let reported = diff_feature_state(old, new);
    let compared = diff_feature_state(compare_old, compare_new);
    let priority_changed = display_priority(compare_old) != display_priority(compare_new);

    SegmentDiff {
        segment_id,
        segment,
        old_enabled: reported.old_enabled,
        new_enabled: reported.new_enabled,
        enabled_changed: compared.enabled_changed,
        old_value: reported.old_value,
        new_value: reported.new_value,
        value_changed: compared.value_changed,
        old_priority: display_priority(old),
        new_priority: display_priority(new),
        priority_changed,
        created: old.is_none() && new.is_some(),
        deleted: old.is_some() && new.is_none(),
        total_changes: compared.total_changes + u32::from(priority_changed),
    }
}

/// First state overriding `segment_id`.
fn find_override(states: &[FeatureState], segment_id: SegmentId) -> Option<&FeatureState> {
    states.iter().find(|s| s.segment_id() == Some(segment_id))
}

/// 1-based priority, or [`ABSENT_PRIORITY`].
fn display_priority(state: Option<&FeatureState>) -> i64 {
    state
        .and_then(|s| s.feature_segment.as_ref())
        .and_then(|fs| fs.priority)
        .map(|p| p.saturating_add(1))
        .unwrap_or(ABSENT_PRIORITY)
}
