//! Human-readable summary renderer for feature and change-request diffs.

use crate::diff::model::{ChangeRequestDiff, FeatureDiff, SegmentDiff};

/// Render a Markdown summary of one [`FeatureDiff`].
///
/// Informational only; the structured diff is the source of truth.
pub fn render_feature_summary(diff: &FeatureDiff) -> String {
    let mut out = String::new();

    let title = diff
        .feature_name
        .clone()
        .unwrap_or_else(|| format!("Feature {}", diff.feature_id));
    let heading = match diff.environment_id {
        Some(environment_id) => format!("## {} (environment {})", title, environment_id),
        None => format!("## {}", title),
    };
    out.push_str(&format!("{}\n\n", heading));
    out.push_str(&format!("**Changes**: {}\n\n", diff.total_changes));

    if !diff.has_changes() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    let fs = &diff.feature_state;
    if fs.has_changes() {
        out.push_str("### Value\n\n");
        if fs.enabled_changed {
            out.push_str(&format!(
                "- **Enabled**: {} → {}\n",
                fs.old_enabled, fs.new_enabled
            ));
        }
        if fs.value_changed {
            out.push_str(&format!("- **Value**: {} → {}\n", fs.old_value, fs.new_value));
        }
        out.push('\n');
    }

    let groups = diff.segments.grouped();
    if !(groups.created.is_empty() && groups.deleted.is_empty() && groups.modified.is_empty()) {
        out.push_str("### Segment Overrides\n\n");
        for created in &groups.created {
            out.push_str(&format!(
                "- **Created** {} (priority {}): enabled={}, value={}\n",
                created.display_name(),
                created.new_priority,
                created.new_enabled,
                created.new_value
            ));
        }
        for deleted in &groups.deleted {
            out.push_str(&format!(
                "- **Deleted** {} (priority {})\n",
                deleted.display_name(),
                deleted.old_priority
            ));
        }
        for modified in &groups.modified {
            out.push_str(&format!(
                "- **Modified** {}: {}\n",
                modified.display_name(),
                changes_of(modified)
            ));
        }
        if !groups.unchanged.is_empty() {
            out.push_str(&format!("- {} unchanged\n", groups.unchanged.len()));
        }
        out.push('\n');
    }

    let changed_variations: Vec<_> = diff
        .variations
        .diffs
        .iter()
        .filter(|v| v.has_changed)
        .collect();
    if !changed_variations.is_empty() {
        out.push_str("### Variations\n\n");
        for v in changed_variations {
            out.push_str(&format!(
                "- {}: {} → {}\n",
                v.new_value,
                weight(v.old_weight),
                weight(v.new_weight)
            ));
        }
        out.push('\n');
    }

    out
}

/// Render a Markdown summary of a [`ChangeRequestDiff`].
pub fn render_change_request_summary(diff: &ChangeRequestDiff) -> String {
    let mut out = String::new();

    out.push_str("# Change Request Diff\n\n");
    out.push_str(&format!(
        "| | Digest |\n|---|---|\n| Live | `{}` |\n| Proposed | `{}` |\n\n",
        short(&diff.identity.old_digest),
        short(&diff.identity.new_digest)
    ));

    let changed: Vec<&FeatureDiff> = diff.changed_features().collect();
    out.push_str(&format!(
        "**Features changed**: {} of {}  \n**Total changes**: {}\n\n",
        changed.len(),
        diff.features.len(),
        diff.total_changes
    ));

    if !diff.invariant_violations.is_empty() {
        out.push_str(&format!(
            "> {} snapshot invariant violation(s); first matching state used.\n\n",
            diff.invariant_violations.len()
        ));
    }

    for feature in changed {
        out.push_str(&render_feature_summary(feature));
    }

    out
}

fn changes_of(diff: &SegmentDiff) -> String {
    let mut parts = Vec::new();
    if diff.enabled_changed {
        parts.push(format!("enabled {} → {}", diff.old_enabled, diff.new_enabled));
    }
    if diff.value_changed {
        parts.push(format!("value {} → {}", diff.old_value, diff.new_value));
    }
    if diff.priority_changed {
        parts.push(format!("priority {} → {}", diff.old_priority, diff.new_priority));
    }
    parts.join(", ")
}

fn weight(w: Option<f64>) -> String {
    match w {
        Some(w) => format!("{}%", w),
        None => "unset".to_string(),
    }
}

/// First 12 characters of a digest.
fn short(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::engine::diff_feature;
    use crate::model::{FeatureState, FlagValue, ProjectFlag};

    #[test]
    fn test_unchanged_feature_summary() {
        let states = vec![FeatureState::new(1, true, None)];
        let diff = diff_feature(&states, &states, &ProjectFlag::bare(1), &[]);
        let summary = render_feature_summary(&diff);
        assert!(summary.contains("_No changes detected._"));
    }

    #[test]
    fn test_value_change_rendered() {
        let old = vec![FeatureState::new(1, false, Some(FlagValue::string("a")))];
        let new = vec![FeatureState::new(1, true, Some(FlagValue::string("b")))];
        let diff = diff_feature(&old, &new, &ProjectFlag::bare(1), &[]);
        let summary = render_feature_summary(&diff);
        assert!(summary.contains("**Enabled**: false → true"));
        assert!(summary.contains("**Value**: \"a\" → \"b\""));
    }

    #[test]
    fn test_environment_in_title() {
        let old = vec![FeatureState::new(1, false, None).with_environment(4)];
        let new = vec![FeatureState::new(1, true, None).with_environment(4)];
        let diff = diff_feature(&old, &new, &ProjectFlag::bare(1), &[]);
        let summary = render_feature_summary(&diff);
        assert!(summary.starts_with("## Feature 1 (environment 4)"));
    }

    #[test]
    fn test_short_digest() {
        assert_eq!(short("abcdef0123456789"), "abcdef012345");
        assert_eq!(short("abc"), "abc");
    }
}
