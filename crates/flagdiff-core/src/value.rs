//! Typed value normalization.
//!
//! Converts wire-level feature values into a canonical [`TypedValue`] so that
//! semantically equal values compare equal: `"true"` and `true`, `"10"` and
//! `10`, and `null`/missing/`""` as the single empty value.
//!
//! Tagged records are read according to their tag and never coerced from
//! content, so a `unicode` value of `"007"` stays a string. Raw strings are
//! coerced only when they are in canonical form (`"10"`, `"-3"`, `"1.5"`,
//! `"true"`); `"007"`, `"1.10"` or `"1e3"` stay strings.
//!
//! Normalization is total: shapes it does not recognise come back as
//! [`TypedValue::Opaque`] and compare by strict JSON equality.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{FlagValue, MultivariateOption, TaggedFlagValue, ValueType};

/// Canonical, comparable form of a feature value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypedValue {
    /// `null`, missing, or `""`
    #[default]
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Any shape the normalizer does not recognise
    Opaque(Value),
}

impl TypedValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, TypedValue::Empty)
    }
}

impl PartialEq for TypedValue {
    fn eq(&self, other: &Self) -> bool {
        use TypedValue::*;
        match (self, other) {
            (Empty, Empty) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => int_equals_float(*a, *b),
            (String(a), String(b)) => a == b,
            (Opaque(a), Opaque(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for TypedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypedValue::Empty => write!(f, "(empty)"),
            TypedValue::Bool(b) => write!(f, "{}", b),
            TypedValue::Int(n) => write!(f, "{}", n),
            TypedValue::Float(x) => write!(f, "{}", x),
            TypedValue::String(s) => write!(f, "\"{}\"", s),
            TypedValue::Opaque(v) => write!(f, "{}", v),
        }
    }
}

/// Normalize an optional wire value. `None` is the empty value.
pub fn normalize(raw: Option<&FlagValue>) -> TypedValue {
    match raw {
        None => TypedValue::Empty,
        Some(FlagValue::Tagged(tagged)) => normalize_tagged(tagged),
        Some(FlagValue::Raw(value)) => normalize_json(value),
    }
}

/// Normalize an arbitrary JSON value.
///
/// Objects carrying a `type` tag are read as tagged records.
pub fn normalize_json(value: &Value) -> TypedValue {
    match value {
        Value::Null => TypedValue::Empty,
        Value::Bool(b) => TypedValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => TypedValue::Int(i),
            None => n
                .as_f64()
                .map(TypedValue::Float)
                .unwrap_or_else(|| TypedValue::Opaque(value.clone())),
        },
        Value::String(s) => normalize_str(s),
        Value::Object(obj) if obj.contains_key("type") => {
            match serde_json::from_value::<TaggedFlagValue>(value.clone()) {
                Ok(tagged) => normalize_tagged(&tagged),
                Err(_) => TypedValue::Opaque(value.clone()),
            }
        }
        Value::Array(_) | Value::Object(_) => TypedValue::Opaque(value.clone()),
    }
}

/// Normalize an untagged string by content.
pub fn normalize_str(s: &str) -> TypedValue {
    if s.is_empty() {
        return TypedValue::Empty;
    }
    match s {
        "true" => return TypedValue::Bool(true),
        "false" => return TypedValue::Bool(false),
        _ => {}
    }
    if is_canonical_integer(s) {
        // Integers too large for i64 keep their exact text
        return s
            .parse::<i64>()
            .map(TypedValue::Int)
            .unwrap_or_else(|_| TypedValue::String(s.to_string()));
    }
    if is_canonical_decimal(s) {
        if let Ok(x) = s.parse::<f64>() {
            return TypedValue::Float(x);
        }
    }
    TypedValue::String(s.to_string())
}

/// Read a tagged record according to its tag.
pub fn normalize_tagged(tagged: &TaggedFlagValue) -> TypedValue {
    match tagged.value_type {
        ValueType::Unicode => match tagged.string_value.as_deref() {
            None | Some("") => TypedValue::Empty,
            Some(s) => TypedValue::String(s.to_string()),
        },
        ValueType::Int => {
            if let Some(n) = tagged.integer_value {
                return TypedValue::Int(n);
            }
            match tagged.string_value.as_deref().map(str::trim) {
                None | Some("") => TypedValue::Empty,
                Some(s) => s
                    .parse::<i64>()
                    .map(TypedValue::Int)
                    .unwrap_or_else(|_| TypedValue::String(s.to_string())),
            }
        }
        ValueType::Bool => {
            if let Some(b) = tagged.boolean_value {
                return TypedValue::Bool(b);
            }
            match tagged.string_value.as_deref().map(str::trim) {
                None | Some("") => TypedValue::Empty,
                Some("true") => TypedValue::Bool(true),
                Some("false") => TypedValue::Bool(false),
                Some(s) => TypedValue::String(s.to_string()),
            }
        }
    }
}

/// Canonical value of a multivariate option.
///
/// An explicit `type` is honored; otherwise the first populated payload wins
/// (integer, then boolean, then string).
pub fn typed_value_from_option(option: &MultivariateOption) -> TypedValue {
    if let Some(value_type) = option.value_type {
        return normalize_tagged(&TaggedFlagValue {
            value_type,
            string_value: option.string_value.clone(),
            integer_value: option.integer_value,
            boolean_value: option.boolean_value,
        });
    }
    if let Some(n) = option.integer_value {
        return TypedValue::Int(n);
    }
    if let Some(b) = option.boolean_value {
        return TypedValue::Bool(b);
    }
    option
        .string_value
        .as_deref()
        .map(normalize_str)
        .unwrap_or_default()
}

fn is_canonical_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if digits == "0" {
        return !s.starts_with('-');
    }
    !digits.starts_with('0')
}

/// `-?<integer>.<digits>` with no trailing zero in the fraction.
fn is_canonical_decimal(s: &str) -> bool {
    match s.split_once('.') {
        Some((int_part, frac)) => {
            is_canonical_integer(int_part.strip_prefix('-').unwrap_or(int_part))
                && !frac.is_empty()
                && !frac.ends_with('0')
                && frac.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

/// Exact comparison; no rounding of `a` through `f64`.
fn int_equals_float(a: i64, b: f64) -> bool {
    // 2^63, the first f64 above i64::MAX
    const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;
    b.fract() == 0.0 && (-I64_UPPER..I64_UPPER).contains(&b) && b as i64 == a
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_equivalence() {
        let from_null = normalize(Some(&FlagValue::Raw(Value::Null)));
        let from_missing = normalize(None);
        let from_blank = normalize(Some(&FlagValue::string("")));
        assert_eq!(from_null, from_missing);
        assert_eq!(from_missing, from_blank);
        assert!(from_blank.is_empty());
    }

    #[test]
    fn test_boolean_strings() {
        assert_eq!(normalize_str("true"), TypedValue::Bool(true));
        assert_eq!(normalize_str("false"), TypedValue::Bool(false));
        assert_eq!(normalize_str("True"), TypedValue::String("True".into()));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(normalize_str("10"), TypedValue::Int(10));
        assert_eq!(normalize_str("-3"), TypedValue::Int(-3));
        assert_eq!(normalize_str("0"), TypedValue::Int(0));
        assert_eq!(normalize_str("1.5"), TypedValue::Float(1.5));
        assert_eq!(normalize_str("007"), TypedValue::String("007".into()));
        assert_eq!(normalize_str("-0"), TypedValue::String("-0".into()));
        assert_eq!(normalize_str("1."), TypedValue::String("1.".into()));
        assert_eq!(normalize_str("1e3"), TypedValue::String("1e3".into()));
        assert_eq!(normalize_str("-1.5"), TypedValue::Float(-1.5));
    }

    #[test]
    fn test_trailing_zero_fraction_stays_string() {
        assert_eq!(normalize_str("1.10"), TypedValue::String("1.10".into()));
        assert_eq!(normalize_str("2.0"), TypedValue::String("2.0".into()));
        assert_ne!(normalize_str("1.1"), normalize_str("1.10"));
    }

    #[test]
    fn test_overflowing_integer_string_stays_string() {
        let big = "99999999999999999999";
        assert_eq!(normalize_str(big), TypedValue::String(big.into()));
    }

    #[test]
    fn test_int_equals_whole_float() {
        assert_eq!(TypedValue::Int(2), TypedValue::Float(2.0));
        assert_eq!(TypedValue::Float(2.0), TypedValue::Int(2));
        assert_ne!(TypedValue::Int(2), TypedValue::Float(2.5));
    }

    #[test]
    fn test_int_float_equality_is_exact_beyond_f64_precision() {
        // 2^53 + 1 has no exact f64 representation
        let big = 9_007_199_254_740_993_i64;
        assert_ne!(TypedValue::Int(big), TypedValue::Float(9_007_199_254_740_992.0));
        assert_eq!(
            TypedValue::Int(9_007_199_254_740_992),
            TypedValue::Float(9_007_199_254_740_992.0)
        );
        assert_ne!(TypedValue::Int(i64::MAX), TypedValue::Float(9_223_372_036_854_775_808.0));
        assert_ne!(TypedValue::Int(0), TypedValue::Float(f64::NAN));
    }

    #[test]
    fn test_tag_is_honored_over_content() {
        let unicode = FlagValue::tagged(ValueType::Unicode, "007");
        assert_eq!(normalize(Some(&unicode)), TypedValue::String("007".into()));

        let unicode_ten = FlagValue::tagged(ValueType::Unicode, "10");
        assert_ne!(normalize(Some(&unicode_ten)), TypedValue::Int(10));

        let int_ten = FlagValue::tagged(ValueType::Int, "10");
        assert_eq!(normalize(Some(&int_ten)), TypedValue::Int(10));
    }

    #[test]
    fn test_tagged_payload_fields() {
        let v = FlagValue::from(json!({"type": "int", "integer_value": 42}));
        assert_eq!(normalize(Some(&v)), TypedValue::Int(42));

        let v = FlagValue::from(json!({"type": "bool", "boolean_value": false}));
        assert_eq!(normalize(Some(&v)), TypedValue::Bool(false));

        let v = FlagValue::from(json!({"type": "unicode", "string_value": null}));
        assert_eq!(normalize(Some(&v)), TypedValue::Empty);
    }

    #[test]
    fn test_unrecognised_shapes_are_opaque() {
        let v = FlagValue::Raw(json!([1, 2]));
        assert_eq!(normalize(Some(&v)), TypedValue::Opaque(json!([1, 2])));
        assert_ne!(normalize(Some(&v)), TypedValue::Opaque(json!([2, 1])));

        let bad_tag = json!({"type": "json", "string_value": "{}"});
        assert_eq!(normalize_json(&bad_tag), TypedValue::Opaque(bad_tag.clone()));
    }

    #[test]
    fn test_option_values() {
        let mut option = MultivariateOption::string(1, "blue");
        assert_eq!(
            typed_value_from_option(&option),
            TypedValue::String("blue".into())
        );

        option.value_type = None;
        option.string_value = Some("5".into());
        assert_eq!(typed_value_from_option(&option), TypedValue::Int(5));

        option.integer_value = Some(6);
        assert_eq!(typed_value_from_option(&option), TypedValue::Int(6));
    }

    #[test]
    fn test_serialization_shape() {
        assert_eq!(serde_json::to_value(TypedValue::Empty).unwrap(), Value::Null);
        assert_eq!(serde_json::to_value(TypedValue::Int(3)).unwrap(), json!(3));
        assert_eq!(
            serde_json::to_value(TypedValue::String("a".into())).unwrap(),
            json!("a")
        );
    }
}
