use serde::{Deserialize, Serialize};

/// Default minimum bootstrap confidence (percent) required to accept a change point.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 95.0;
/// Default number of random permutations per significance test.
pub const DEFAULT_BOOTSTRAP_COUNT: usize = 10_000;
/// Default tolerance (whole percent) below which a mean shift is considered subtle.
pub const DEFAULT_CHANGE_TOLERANCE: u32 = 10;

/// Tuning parameters for a detection run.
///
/// The configuration is validated once, when a [`Detector`](crate::Detector) is built,
/// and is immutable for the duration of every analysis it runs.
///
/// # Example
///
/// ```
/// use meanshift_detect::DetectorConfig;
///
/// let config = DetectorConfig {
///     bootstrap_count: 1000,
///     ..DetectorConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Minimum confidence (0-100) a split must reach to be accepted.
    pub min_confidence: f64,
    /// Number of permutations drawn by the bootstrap significance test.
    pub bootstrap_count: usize,
    /// Mean shifts of at most this many percent are merged into their parent segment.
    pub change_tolerance: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            bootstrap_count: DEFAULT_BOOTSTRAP_COUNT,
            change_tolerance: DEFAULT_CHANGE_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("bootstrap count must be positive")]
    ZeroBootstrapCount,
    #[display("minimum confidence must be within [0, 100], got {value}")]
    MinConfidenceOutOfRange {
        value: f64,
    },
    #[display("change tolerance must be within [0, 100], got {value}")]
    ChangeToleranceOutOfRange {
        value: u32,
    },
}

impl DetectorConfig {
    /// Checks that every parameter is within its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bootstrap_count == 0 {
            return Err(ConfigError::ZeroBootstrapCount);
        }
        if !(0.0..=100.0).contains(&self.min_confidence) {
            return Err(ConfigError::MinConfidenceOutOfRange {
                value: self.min_confidence,
            });
        }
        if self.change_tolerance > 100 {
            return Err(ConfigError::ChangeToleranceOutOfRange {
                value: self.change_tolerance,
            });
        }
        Ok(())
    }
}
