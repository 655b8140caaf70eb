//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq` and
//! serialize with camelCase keys, the shape presentation components consume.
//! Records own their data; nothing borrows from the compared snapshots.

use serde::{Deserialize, Serialize};

use crate::model::{EnvironmentId, FeatureId, OptionId, Segment, SegmentId};
use crate::value::TypedValue;

/// Priority reported for a side with no segment override.
pub const ABSENT_PRIORITY: i64 = -1;

/// Old/new enabled flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EnabledDiff {
    pub old_enabled: bool,
    pub new_enabled: bool,
    pub enabled_changed: bool,
}

/// Old/new canonical values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValueDiff {
    pub old_value: TypedValue,
    pub new_value: TypedValue,
    pub value_changed: bool,
}

/// Difference between two environment-level states of one feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStateDiff {
    pub old_enabled: bool,
    pub new_enabled: bool,
    pub enabled_changed: bool,
    pub old_value: TypedValue,
    pub new_value: TypedValue,
    pub value_changed: bool,
    /// Number of changed fields among enabled and value
    pub total_changes: u32,
}

impl FeatureStateDiff {
    pub fn from_parts(enabled: EnabledDiff, value: ValueDiff) -> Self {
        let total_changes = u32::from(enabled.enabled_changed) + u32::from(value.value_changed);
        Self {
            old_enabled: enabled.old_enabled,
            new_enabled: enabled.new_enabled,
            enabled_changed: enabled.enabled_changed,
            old_value: value.old_value,
            new_value: value.new_value,
            value_changed: value.value_changed,
            total_changes,
        }
    }

    pub fn has_changes(&self) -> bool {
        self.total_changes > 0
    }
}

/// Difference for one segment override.
///
/// Priorities are 1-based; a side without an override reports
/// [`ABSENT_PRIORITY`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDiff {
    pub segment_id: SegmentId,
    /// Segment definition, when one was supplied for this id
    pub segment: Option<Segment>,
    pub old_enabled: bool,
    pub new_enabled: bool,
    pub enabled_changed: bool,
    pub old_value: TypedValue,
    pub new_value: TypedValue,
    pub value_changed: bool,
    pub old_priority: i64,
    pub new_priority: i64,
    pub priority_changed: bool,
    /// Override exists only in the new snapshot
    pub created: bool,
    /// Override exists only in the old snapshot
    pub deleted: bool,
    /// Number of changed fields among enabled, value and priority
    pub total_changes: u32,
}

impl SegmentDiff {
    /// Present on both sides with at least one changed field.
    pub fn is_modified(&self) -> bool {
        !self.created && !self.deleted && self.total_changes > 0
    }

    /// Present on both sides with no changed field.
    pub fn is_unchanged(&self) -> bool {
        !self.created && !self.deleted && self.total_changes == 0
    }

    /// Segment name, falling back to the id.
    pub fn display_name(&self) -> String {
        self.segment
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("segment {}", self.segment_id))
    }
}

/// All segment override diffs for one feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDiffReport {
    pub diffs: Vec<SegmentDiff>,
    /// Number of segments with a nonzero `total_changes`
    pub total_changes: u32,
}

/// Segment diffs bucketed for display, each bucket sorted by `new_priority`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentDiffGroups<'a> {
    pub created: Vec<&'a SegmentDiff>,
    pub deleted: Vec<&'a SegmentDiff>,
    pub modified: Vec<&'a SegmentDiff>,
    pub unchanged: Vec<&'a SegmentDiff>,
}

impl SegmentDiffReport {
    pub fn created_count(&self) -> usize {
        self.diffs.iter().filter(|d| d.created).count()
    }

    pub fn deleted_count(&self) -> usize {
        self.diffs.iter().filter(|d| d.deleted).count()
    }

    /// Find the diff for a segment id
    pub fn get(&self, segment_id: SegmentId) -> Option<&SegmentDiff> {
        self.diffs.iter().find(|d| d.segment_id == segment_id)
    }

    /// Bucket into created / deleted / modified / unchanged.
    ///
    /// Buckets are stably sorted by `new_priority` ascending.
    pub fn grouped(&self) -> SegmentDiffGroups<'_> {
        let mut sorted: Vec<&SegmentDiff> = self.diffs.iter().collect();
        sorted.sort_by_key(|d| d.new_priority);

        let mut groups = SegmentDiffGroups::default();
        for diff in sorted {
            if diff.created {
                groups.created.push(diff);
            } else if diff.deleted {
                groups.deleted.push(diff);
            } else if diff.is_modified() {
                groups.modified.push(diff);
            } else {
                groups.unchanged.push(diff);
            }
        }
        groups
    }
}

/// Weight difference for one multivariate option.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariationDiff {
    pub option_id: OptionId,
    pub old_value: TypedValue,
    pub new_value: TypedValue,
    /// `None` when the option has no allocation in the old state
    pub old_weight: Option<f64>,
    /// `None` when the option has no allocation in the new state
    pub new_weight: Option<f64>,
    pub has_changed: bool,
}

/// All variation diffs for one feature, in option declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariationDiffReport {
    pub diffs: Vec<VariationDiff>,
    /// Number of variations with `has_changed`
    pub total_changes: u32,
}

impl VariationDiffReport {
    pub fn get(&self, option_id: OptionId) -> Option<&VariationDiff> {
        self.diffs.iter().find(|d| d.option_id == option_id)
    }
}

/// Complete comparison of one feature in one environment across two snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDiff {
    pub feature_id: FeatureId,
    /// Environment the compared states belong to
    pub environment_id: Option<EnvironmentId>,
    pub feature_name: Option<String>,
    pub feature_state: FeatureStateDiff,
    pub segments: SegmentDiffReport,
    pub variations: VariationDiffReport,
    /// Badge count: feature-state field changes + changed segments + changed variations
    pub total_changes: u32,
    /// Non-fatal uniqueness violations found in either snapshot
    pub invariant_violations: Vec<InvariantViolationEntry>,
}

impl FeatureDiff {
    /// True when anything differs, including created or deleted overrides.
    pub fn has_changes(&self) -> bool {
        self.total_changes > 0
            || self.segments.diffs.iter().any(|d| d.created || d.deleted)
    }
}

/// Digest identity for both snapshots being diffed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiffIdentity {
    pub old_digest: String,
    pub new_digest: String,
}

impl DiffIdentity {
    pub fn is_identical(&self) -> bool {
        self.old_digest == self.new_digest
    }
}

/// Comparison of a proposed change request against live state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestDiff {
    /// Schema version of this structure (always 1)
    pub diff_schema_version: u32,
    pub identity: DiffIdentity,
    /// One entry per (feature, environment) present in either snapshot,
    /// sorted by feature id then environment
    pub features: Vec<FeatureDiff>,
    /// Sum of per-feature badge counts
    pub total_changes: u32,
    pub invariant_violations: Vec<InvariantViolationEntry>,
}

impl ChangeRequestDiff {
    /// Features with at least one difference
    pub fn changed_features(&self) -> impl Iterator<Item = &FeatureDiff> {
        self.features.iter().filter(|f| f.has_changes())
    }

    /// First entry for a feature (its lowest environment)
    pub fn feature(&self, feature_id: FeatureId) -> Option<&FeatureDiff> {
        self.features.iter().find(|f| f.feature_id == feature_id)
    }

    pub fn feature_in(
        &self,
        feature_id: FeatureId,
        environment_id: Option<EnvironmentId>,
    ) -> Option<&FeatureDiff> {
        self.features
            .iter()
            .find(|f| f.feature_id == feature_id && f.environment_id == environment_id)
    }
}

/// A non-fatal uniqueness violation detected in one snapshot.
///
/// The diff still runs; the first matching state in input order is used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InvariantViolationEntry {
    /// More than one environment-level state for a (feature, environment)
    #[serde(rename_all = "camelCase")]
    DuplicateEnvironmentState {
        /// Which side ("old" or "new")
        which: String,
        feature_id: FeatureId,
        environment_id: Option<EnvironmentId>,
        count: usize,
    },
    /// More than one override for a (feature, environment, segment)
    #[serde(rename_all = "camelCase")]
    DuplicateSegmentOverride {
        which: String,
        feature_id: FeatureId,
        environment_id: Option<EnvironmentId>,
        segment_id: SegmentId,
        count: usize,
    },
    /// States handed to a single-environment diff span several environments;
    /// only the first is compared
    #[serde(rename_all = "camelCase")]
    MixedEnvironments {
        feature_id: FeatureId,
        environment_ids: Vec<Option<EnvironmentId>>,
    },
}
