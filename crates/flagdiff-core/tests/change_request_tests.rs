//! Change-request diffs across every feature in two snapshots.

mod common;

use common::{multivariate_flag, segments};
use flagdiff_core::diff::human_summary::render_change_request_summary;
use flagdiff_core::diff::model::InvariantViolationEntry;
use flagdiff_core::model::{FeatureState, FlagValue};
use flagdiff_core::{diff_change_request, Snapshot};

fn state(feature: u64, enabled: bool, value: &str) -> FeatureState {
    FeatureState::new(feature, enabled, Some(FlagValue::string(value)))
}

#[test]
fn test_features_unioned_and_sorted() {
    let live = Snapshot::new(vec![state(3, true, "a"), state(1, true, "a")]);
    let proposed = Snapshot::new(vec![state(1, false, "a"), state(2, true, "b")]);

    let diff = diff_change_request(&live, &proposed, &[], &segments());

    let ids: Vec<u64> = diff.features.iter().map(|f| f.feature_id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(diff.diff_schema_version, 1);
    assert!(!diff.identity.is_identical());
}

#[test]
fn test_totals_sum_feature_badges() {
    let live = Snapshot::new(vec![state(1, true, "a"), state(2, true, "x")]);
    let proposed = Snapshot::new(vec![state(1, false, "b"), state(2, true, "x")]);

    let diff = diff_change_request(&live, &proposed, &[], &[]);

    assert_eq!(diff.feature(1).unwrap().total_changes, 2);
    assert_eq!(diff.feature(2).unwrap().total_changes, 0);
    assert_eq!(diff.total_changes, 2);
    assert_eq!(diff.changed_features().count(), 1);
}

#[test]
fn test_identical_snapshots() {
    let live = Snapshot::new(vec![state(1, true, "10")]);

    let diff = diff_change_request(&live, &live, &[], &[]);

    assert!(diff.identity.is_identical());
    assert_eq!(diff.total_changes, 0);
    assert_eq!(diff.changed_features().count(), 0);
}

#[test]
fn test_project_flag_supplies_name_and_options() {
    let flag = multivariate_flag(&[(10, "A")]);
    let live = Snapshot::new(vec![state(1, true, "x").with_allocation(10, 50.0)]);
    let proposed = Snapshot::new(vec![state(1, true, "x").with_allocation(10, 25.0)]);

    let diff = diff_change_request(&live, &proposed, &[flag], &[]);

    let feature = diff.feature(1).unwrap();
    assert_eq!(feature.feature_name.as_deref(), Some("checkout_button"));
    assert_eq!(feature.variations.total_changes, 1);
}

#[test]
fn test_invariant_violations_collected() {
    let live = Snapshot::new(vec![state(1, true, "a"), state(1, false, "b")]);
    let proposed = Snapshot::new(vec![state(1, true, "a")]);

    let diff = diff_change_request(&live, &proposed, &[], &[]);

    assert_eq!(diff.invariant_violations.len(), 1);
    assert!(matches!(
        &diff.invariant_violations[0],
        InvariantViolationEntry::DuplicateEnvironmentState { which, count: 2, .. } if which == "old"
    ));
    // First matching state wins
    assert_eq!(diff.total_changes, 0);
}

#[test]
fn test_summary_lists_changed_features_only() {
    let live = Snapshot::new(vec![state(1, true, "a"), state(2, true, "x")]);
    let proposed = Snapshot::new(vec![state(1, false, "a"), state(2, true, "x")]);

    let diff = diff_change_request(&live, &proposed, &[], &[]);
    let summary = render_change_request_summary(&diff);

    assert!(summary.starts_with("# Change Request Diff"));
    assert!(summary.contains("**Features changed**: 1 of 2"));
    assert!(summary.contains("## Feature 1"));
    assert!(!summary.contains("## Feature 2"));
}

#[test]
fn test_each_environment_diffed() {
    let live = Snapshot::new(vec![
        state(1, true, "a").with_environment(1),
        state(1, false, "a").with_environment(2),
    ]);
    let proposed = Snapshot::new(vec![
        state(1, true, "a").with_environment(1),
        state(1, true, "CHANGED").with_environment(2),
    ]);

    let diff = diff_change_request(&live, &proposed, &[], &[]);

    assert_eq!(diff.features.len(), 2);
    assert!(diff.invariant_violations.is_empty());
    assert_eq!(diff.feature_in(1, Some(1)).unwrap().total_changes, 0);
    let env2 = diff.feature_in(1, Some(2)).unwrap();
    assert!(env2.feature_state.enabled_changed);
    assert!(env2.feature_state.value_changed);
    assert_eq!(env2.total_changes, 2);
    assert_eq!(diff.total_changes, 2);
    assert_eq!(diff.changed_features().count(), 1);
}

#[test]
fn test_environment_only_in_proposed() {
    let live = Snapshot::new(vec![state(1, true, "a").with_environment(1)]);
    let proposed = Snapshot::new(vec![
        state(1, true, "a").with_environment(1),
        state(1, true, "a").with_environment(3),
    ]);

    let diff = diff_change_request(&live, &proposed, &[], &[]);

    let added = diff.feature_in(1, Some(3)).unwrap();
    assert!(!added.feature_state.old_enabled);
    assert!(added.feature_state.enabled_changed);
}
