//! Aggregator configuration, validation, and error types.
//!
//! [`AggregatorConfig`] is the builder-input for a
//! [`CountAggregator`](crate::aggregator::CountAggregator).
//! [`validate()`](AggregatorConfig::validate) compiles the expected
//! features under the configured counting mode and returns the schema.

use std::error::Error;
use std::fmt;

use census_core::InputError;
use census_schema::{ExpectedFeatures, ExpectedSchema};
use serde::{Deserialize, Serialize};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while loading or validating an [`AggregatorConfig`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The serialized configuration could not be read.
    Parse {
        /// Description of the parse failure.
        reason: String,
    },
    /// The expected features do not compile.
    ExpectedFeatures(InputError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { reason } => write!(f, "invalid config: {reason}"),
            Self::ExpectedFeatures(e) => write!(f, "expected features: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ExpectedFeatures(e) => Some(e),
            Self::Parse { .. } => None,
        }
    }
}

impl From<InputError> for ConfigError {
    fn from(e: InputError) -> Self {
        Self::ExpectedFeatures(e)
    }
}

// ── AggregatorConfig ───────────────────────────────────────────────

/// Complete configuration for constructing a count aggregator.
///
/// # Examples
///
/// ```
/// use census_engine::AggregatorConfig;
///
/// let config = AggregatorConfig::from_json(
///     r#"{"count_subcategories": false, "expected_features": {"amenity": "pub"}}"#,
/// )
/// .unwrap();
/// assert!(!config.count_subcategories);
/// config.validate().unwrap();
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AggregatorConfig {
    /// Count every observed tag value separately (`amenity_pub`,
    /// `amenity_bar`, ...) instead of counting each tag column as a
    /// whole. Default: `true`.
    pub count_subcategories: bool,
    /// Columns every result must have, in order. Missing columns are
    /// filled with zeros and unexpected ones are dropped. Default: `None`.
    pub expected_features: Option<ExpectedFeatures>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            count_subcategories: true,
            expected_features: None,
        }
    }
}

impl AggregatorConfig {
    /// Read a configuration from JSON. Absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })
    }

    /// Validate all structural invariants, returning the compiled
    /// expected schema (`None` when no columns are expected).
    pub fn validate(&self) -> Result<Option<ExpectedSchema>, ConfigError> {
        Ok(self.expected_schema()?)
    }

    /// Compile the expected features under the configured counting mode.
    pub(crate) fn expected_schema(&self) -> Result<Option<ExpectedSchema>, InputError> {
        ExpectedSchema::compile(self.expected_features.as_ref(), self.count_subcategories)
    }
}
