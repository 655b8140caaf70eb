//! Multivariate weight diff.
//!
//! Options are matched by id against the project flag's option list, never by
//! position. An option with no allocation has weight `None`, which differs
//! from an explicit `Some(0.0)`. Option values are not versioned across
//! snapshots, so old and new values are the same by construction and only
//! weights can change.

use crate::diff::model::{VariationDiff, VariationDiffReport};
use crate::model::{FeatureState, ProjectFlag};
use crate::value::typed_value_from_option;

/// Diff multivariate allocations of two environment-level states.
pub fn diff_variations(
    old: Option<&FeatureState>,
    new: Option<&FeatureState>,
    project_flag: &ProjectFlag,
) -> VariationDiffReport {
    let diffs: Vec<VariationDiff> = project_flag
        .multivariate_options
        .iter()
        .map(|option| {
            let old_weight = old.and_then(|s| s.allocation_for(option.id));
            let new_weight = new.and_then(|s| s.allocation_for(option.id));
            let old_value = typed_value_from_option(option);
            let new_value = old_value.clone();
            VariationDiff {
                option_id: option.id,
                has_changed: old_weight != new_weight || old_value != new_value,
                old_value,
                new_value,
                old_weight,
                new_weight,
            }
        })
        .collect();

    let total_changes = diffs.iter().filter(|d| d.has_changed).count() as u32;

    VariationDiffReport {
        diffs,
        total_changes,
    }
}
