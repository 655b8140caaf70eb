//! Feature-state diff: enabled flag and value of one feature in one
//! environment at two points in time.

use crate::diff::model::FeatureStateDiff;
use crate::diff::scalar::{diff_enabled, diff_value};
use crate::model::FeatureState;

/// Compare two optional states of the same feature in the same environment.
///
/// An absent side means "no explicit state": enabled is `false`, value is
/// empty.
pub fn diff_feature_state(
    old: Option<&FeatureState>,
    new: Option<&FeatureState>,
) -> FeatureStateDiff {
    let enabled = diff_enabled(old.map(|s| s.enabled), new.map(|s| s.enabled));
    let value = diff_value(
        old.and_then(|s| s.feature_state_value.as_ref()),
        new.and_then(|s| s.feature_state_value.as_ref()),
    );
    FeatureStateDiff::from_parts(enabled, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlagValue;
    use crate::value::TypedValue;

    #[test]
    fn test_identical_states_have_no_changes() {
        let a = FeatureState::new(1, true, Some(FlagValue::string("x")));
        let d = diff_feature_state(Some(&a), Some(&a.clone()));
        assert!(!d.enabled_changed);
        assert!(!d.value_changed);
        assert_eq!(d.total_changes, 0);
    }

    #[test]
    fn test_total_counts_each_changed_field() {
        let a = FeatureState::new(1, false, Some(FlagValue::string("x")));
        let b = FeatureState::new(1, true, Some(FlagValue::string("y")));
        let d = diff_feature_state(Some(&a), Some(&b));
        assert_eq!(d.total_changes, 2);
    }

    #[test]
    fn test_absent_side_defaults() {
        let b = FeatureState::new(1, true, Some(FlagValue::int(3)));
        let d = diff_feature_state(None, Some(&b));
        assert!(!d.old_enabled);
        assert_eq!(d.old_value, TypedValue::Empty);
        assert_eq!(d.total_changes, 2);

        let d = diff_feature_state(None, None);
        assert_eq!(d.total_changes, 0);
    }
}
