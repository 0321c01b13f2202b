//! Tunable settings for local frame computation.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::lcs::DEFAULT_PARALLEL_EPSILON;

/// Settings shared by every frame computed with a provider.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LcsSettings {
    /// Two unit vectors are parallel when `| |a · b| - 1 |` is below this value.
    pub parallel_epsilon: f64,
}

impl Default for LcsSettings {
    fn default() -> Self {
        Self {
            parallel_epsilon: DEFAULT_PARALLEL_EPSILON,
        }
    }
}

impl LcsSettings {
    /// Parse and validate settings from a JSON document.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidParallelEpsilon`] for an out of range tolerance.
    ///
    /// # Examples
    /// ```
    /// use barframe::LcsSettings;
    ///
    /// let settings = LcsSettings::from_json(r#"{ "parallel_epsilon": 0.001 }"#)
    ///     .expect("valid settings");
    /// assert_eq!(settings.parallel_epsilon, 0.001);
    /// ```
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings describe a usable tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidParallelEpsilon`] unless the tolerance is
    /// finite and strictly between 0 and 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let eps = self.parallel_epsilon;
        if eps.is_finite() && eps > 0.0 && eps < 1.0 {
            Ok(())
        } else {
            Err(ConfigError::InvalidParallelEpsilon(eps))
        }
    }
}
