//! Scalar diff primitives.
//!
//! Missing inputs default to `false` / the empty value; nothing here can fail.

use crate::diff::model::{EnabledDiff, ValueDiff};
use crate::model::FlagValue;
use crate::value::{normalize, TypedValue};

/// Compare two enabled flags.
pub fn diff_enabled(old: Option<bool>, new: Option<bool>) -> EnabledDiff {
    let old_enabled = old.unwrap_or(false);
    let new_enabled = new.unwrap_or(false);
    EnabledDiff {
        old_enabled,
        new_enabled,
        enabled_changed: old_enabled != new_enabled,
    }
}

/// Compare two wire values after normalization.
pub fn diff_value(old: Option<&FlagValue>, new: Option<&FlagValue>) -> ValueDiff {
    diff_typed(normalize(old), normalize(new))
}

/// Compare two already-normalized values.
pub fn diff_typed(old_value: TypedValue, new_value: TypedValue) -> ValueDiff {
    let value_changed = old_value != new_value;
    ValueDiff {
        old_value,
        new_value,
        value_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_enabled_defaults_to_false() {
        let d = diff_enabled(None, Some(false));
        assert!(!d.enabled_changed);
        let d = diff_enabled(None, Some(true));
        assert!(d.enabled_changed);
        assert!(!d.old_enabled);
        assert!(d.new_enabled);
    }

    #[test]
    fn test_value_semantic_equality() {
        let d = diff_value(Some(&FlagValue::string("true")), Some(&FlagValue::bool(true)));
        assert!(!d.value_changed);
        assert_eq!(d.new_value, TypedValue::Bool(true));

        let d = diff_value(Some(&FlagValue::Raw(Value::Null)), None);
        assert!(!d.value_changed);

        let d = diff_value(Some(&FlagValue::string("a")), Some(&FlagValue::string("b")));
        assert!(d.value_changed);
    }
}
