use flagdiff_core::model::{FeatureState, FlagValue, MultivariateOption, ProjectFlag, Segment};
use serde_json::Value;

pub const FEATURE: u64 = 1;

/// Environment-level state with a raw JSON value
#[allow(dead_code)]
pub fn env_state(enabled: bool, value: Value) -> FeatureState {
    FeatureState::new(FEATURE, enabled, Some(FlagValue::from(value)))
}

/// Segment override with a 0-based priority
#[allow(dead_code)]
pub fn override_state(segment: u64, priority: i64, enabled: bool, value: Value) -> FeatureState {
    env_state(enabled, value).with_segment(segment, priority)
}

/// Project flag with string-valued options `(id, value)`
#[allow(dead_code)]
pub fn multivariate_flag(options: &[(u64, &str)]) -> ProjectFlag {
    ProjectFlag {
        id: FEATURE,
        name: Some("checkout_button".to_string()),
        multivariate_options: options
            .iter()
            .map(|(id, value)| MultivariateOption::string(*id, *value))
            .collect(),
    }
}

#[allow(dead_code)]
pub fn segments() -> Vec<Segment> {
    vec![
        Segment::new(1, "beta testers"),
        Segment::new(2, "enterprise"),
        Segment::new(3, "internal"),
    ]
}
