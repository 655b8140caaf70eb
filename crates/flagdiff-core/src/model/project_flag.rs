use serde::{Deserialize, Serialize};

use super::flag_value::ValueType;
use super::{FeatureId, OptionId};

/// One of the fixed alternative values a multivariate feature can resolve to.
///
/// Options are shared across environments; only their weights vary per
/// environment, so an option's value is not versioned between snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultivariateOption {
    pub id: OptionId,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default)]
    pub string_value: Option<String>,
    #[serde(default)]
    pub integer_value: Option<i64>,
    #[serde(default)]
    pub boolean_value: Option<bool>,
    #[serde(default)]
    pub default_percentage_allocation: Option<f64>,
}

impl MultivariateOption {
    /// Create a string-typed option
    pub fn string(id: OptionId, value: impl Into<String>) -> Self {
        Self {
            id,
            value_type: Some(ValueType::Unicode),
            string_value: Some(value.into()),
            integer_value: None,
            boolean_value: None,
            default_percentage_allocation: None,
        }
    }
}

/// Feature definition at project level.
///
/// `multivariate_options` is the universe for variation diffing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFlag {
    pub id: FeatureId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub multivariate_options: Vec<MultivariateOption>,
}

impl ProjectFlag {
    /// A flag with no multivariate options, used when only the feature id is known.
    pub fn bare(id: FeatureId) -> Self {
        Self {
            id,
            name: None,
            multivariate_options: Vec::new(),
        }
    }

    /// Find an option by id
    pub fn option(&self, option_id: OptionId) -> Option<&MultivariateOption> {
        self.multivariate_options.iter().find(|o| o.id == option_id)
    }
}
