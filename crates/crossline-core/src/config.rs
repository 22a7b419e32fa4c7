//! Tunable constants for drawing and collapsing.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Default divisor applied to a segment's extent to get its per-step shrink rate.
pub const DEFAULT_DIVISOR: f64 = 750.0;

/// Default radius around a moving endpoint inside which markers disappear.
pub const DEFAULT_MARKER_RADIUS: f64 = 4.0;

/// Default delay between two collapse steps, in milliseconds.
pub const DEFAULT_STEP_DELAY_MS: u64 = 5;

/// Default slope difference under which two lines count as parallel.
pub const DEFAULT_PARALLEL_EPSILON: f64 = 1e-9;

/// Default slack added to segment extents when testing containment.
pub const DEFAULT_CONTAINMENT_EPSILON: f64 = 1e-9;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Numeric tolerances used by the intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Maximum slope difference treated as parallel.
    pub parallel: f64,
    /// Slack around each segment's bounding box.
    pub containment: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            parallel: DEFAULT_PARALLEL_EPSILON,
            containment: DEFAULT_CONTAINMENT_EPSILON,
        }
    }
}

/// Collapse and intersection settings.
///
/// Every field has a default, so a partial JSON object is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollapseConfig {
    /// Animation-speed divisor: a segment's delta is its extent divided by this.
    pub divisor: f64,
    /// Markers closer than this to a moved endpoint are dropped.
    pub marker_radius: f64,
    /// Delay between collapse steps in milliseconds.
    pub step_delay_ms: u64,
    /// See [`Tolerances::parallel`].
    pub parallel_epsilon: f64,
    /// See [`Tolerances::containment`].
    pub containment_epsilon: f64,
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self {
            divisor: DEFAULT_DIVISOR,
            marker_radius: DEFAULT_MARKER_RADIUS,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            parallel_epsilon: DEFAULT_PARALLEL_EPSILON,
            containment_epsilon: DEFAULT_CONTAINMENT_EPSILON,
        }
    }
}

impl CollapseConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::debug!("Loaded collapse config from {}", path.display());
        Ok(config)
    }

    /// Check that the values can drive a terminating collapse.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.divisor.is_finite() || self.divisor <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "divisor must be positive and finite, got {}",
                self.divisor
            )));
        }
        if self.marker_radius.is_nan() || self.marker_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "marker_radius must be non-negative, got {}",
                self.marker_radius
            )));
        }
        let negative = |v: f64| v.is_nan() || v < 0.0;
        if negative(self.parallel_epsilon) || negative(self.containment_epsilon) {
            return Err(ConfigError::Invalid(
                "tolerances must be non-negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Delay the host should wait between two collapse steps.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Intersection tolerances.
    pub fn tolerances(&self) -> Tolerances {
        Tolerances {
            parallel: self.parallel_epsilon,
            containment: self.containment_epsilon,
        }
    }
}
