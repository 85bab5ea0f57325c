//! Runtime configuration for the factorizer and the forbidden attack
//!
//! Field parameters (the reduction polynomial, the field order) are fixed at
//! compile time in [`crate::field`]. The only tunable is the retry budget of
//! the randomized root finder.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default number of consecutive failed splits tolerated per fragment
pub const DEFAULT_MAX_SPLIT_ATTEMPTS: usize = 256;

/// Tunables for [`crate::cantor::find_zeros`] and
/// [`crate::forbidden::ForbiddenAttack`]
///
/// # Example
/// ```
/// use l4::config::Config;
///
/// let config = Config::from_json(r#"{ "max_split_attempts": 32 }"#).unwrap();
/// assert_eq!(config.max_split_attempts, 32);
///
/// // Missing fields fall back to the defaults
/// let config = Config::from_json("{}").unwrap();
/// assert_eq!(config, Config::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Consecutive `split_once` failures allowed on a single fragment before
    /// the factorization is reported as failed
    pub max_split_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_split_attempts: DEFAULT_MAX_SPLIT_ATTEMPTS,
        }
    }
}

impl Config {
    /// Parses a configuration from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns a copy with a different retry budget
    pub fn with_max_split_attempts(mut self, attempts: usize) -> Self {
        self.max_split_attempts = attempts;
        self
    }
}
