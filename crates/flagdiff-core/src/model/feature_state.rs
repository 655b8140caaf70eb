use serde::{Deserialize, Serialize};

use super::flag_value::FlagValue;
use super::{EnvironmentId, FeatureId, OptionId, SegmentId};

/// Segment scoping of a feature state.
///
/// `priority` is 0-based on the wire; lower wins among matching segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSegment {
    pub segment: SegmentId,
    #[serde(default)]
    pub priority: Option<i64>,
}

/// Weight allocated to one multivariate option in one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultivariateFeatureStateValue {
    pub multivariate_feature_option: OptionId,
    #[serde(default)]
    pub percentage_allocation: Option<f64>,
}

/// The enabled/value configuration of one feature in one environment,
/// optionally scoped to a segment override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub feature: FeatureId,
    #[serde(default)]
    pub environment: Option<EnvironmentId>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub feature_state_value: Option<FlagValue>,
    #[serde(default)]
    pub feature_segment: Option<FeatureSegment>,
    #[serde(default)]
    pub multivariate_feature_state_values: Vec<MultivariateFeatureStateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_from: Option<String>,
}

impl FeatureState {
    /// Environment-level state for `feature` with the given enabled flag and value.
    pub fn new(feature: FeatureId, enabled: bool, value: Option<FlagValue>) -> Self {
        Self {
            id: None,
            feature,
            environment: None,
            enabled,
            feature_state_value: value,
            feature_segment: None,
            multivariate_feature_state_values: Vec::new(),
            live_from: None,
        }
    }

    /// Scope this state to a segment override with a 0-based priority.
    pub fn with_segment(mut self, segment: SegmentId, priority: i64) -> Self {
        self.feature_segment = Some(FeatureSegment {
            segment,
            priority: Some(priority),
        });
        self
    }

    pub fn with_environment(mut self, environment: EnvironmentId) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Add a multivariate weight allocation.
    pub fn with_allocation(mut self, option: OptionId, percentage: f64) -> Self {
        self.multivariate_feature_state_values
            .push(MultivariateFeatureStateValue {
                multivariate_feature_option: option,
                percentage_allocation: Some(percentage),
            });
        self
    }

    /// Segment id this state overrides, if it is segment-scoped.
    pub fn segment_id(&self) -> Option<SegmentId> {
        self.feature_segment.as_ref().map(|fs| fs.segment)
    }

    /// True for the environment-level (non-override) state.
    pub fn is_environment_default(&self) -> bool {
        self.feature_segment.is_none()
    }

    /// Weight allocated to `option`, `None` when the option has no allocation.
    pub fn allocation_for(&self, option: OptionId) -> Option<f64> {
        self.multivariate_feature_state_values
            .iter()
            .find(|v| v.multivariate_feature_option == option)
            .and_then(|v| v.percentage_allocation)
    }
}
