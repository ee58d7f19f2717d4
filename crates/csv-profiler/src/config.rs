//! Configuration types for the profiler.
//!
//! Every policy threshold used by the quality rules lives here so that callers
//! can tune them, while the defaults reproduce the standard audit.

use serde::{Deserialize, Serialize};

/// Default missing-value markers, compared case-insensitively after trimming.
pub const DEFAULT_MISSING_MARKERS: [&str; 6] = ["", "na", "n/a", "null", "none", "nan"];

/// Configuration for a profiling run.
///
/// Use [`ProfilerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use csv_profiler::config::ProfilerConfig;
///
/// let config = ProfilerConfig::builder()
///     .high_missing_threshold(0.6)
///     .top_k(10)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilerConfig {
    /// Missing fraction above which a column gets a `HighMissing` warning.
    /// Default: 0.5
    pub high_missing_threshold: f64,

    /// Missing fraction above which (up to the high threshold) a column gets
    /// a `ModerateMissing` note.
    /// Default: 0.2
    pub moderate_missing_threshold: f64,

    /// IQR multiplier for the outlier fences (Q1 - k*IQR, Q3 + k*IQR).
    /// Default: 1.5
    pub outlier_iqr_multiplier: f64,

    /// Absolute coefficient of variation above which a column is flagged as
    /// highly variable.
    /// Default: 1.0
    pub high_variability_threshold: f64,

    /// Share of non-missing values the most frequent value must exceed to be
    /// reported as dominant.
    /// Default: 0.5
    pub dominant_value_threshold: f64,

    /// Number of most frequent values kept for text columns.
    /// Default: 5
    pub top_k: usize,

    /// Raw cell contents treated as missing during ingestion.
    /// Default: [`DEFAULT_MISSING_MARKERS`]
    pub missing_markers: Vec<String>,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            high_missing_threshold: 0.5,
            moderate_missing_threshold: 0.2,
            outlier_iqr_multiplier: 1.5,
            high_variability_threshold: 1.0,
            dominant_value_threshold: 0.5,
            top_k: 5,
            missing_markers: default_missing_markers(),
        }
    }
}

fn default_missing_markers() -> Vec<String> {
    DEFAULT_MISSING_MARKERS.iter().map(|m| m.to_string()).collect()
}

impl ProfilerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProfilerConfigBuilder {
        ProfilerConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        for (field, value) in [
            ("high_missing_threshold", self.high_missing_threshold),
            ("moderate_missing_threshold", self.moderate_missing_threshold),
            ("dominant_value_threshold", self.dominant_value_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigValidationError::InvalidThreshold {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.moderate_missing_threshold > self.high_missing_threshold {
            return Err(ConfigValidationError::MissingThresholdOrder {
                moderate: self.moderate_missing_threshold,
                high: self.high_missing_threshold,
            });
        }

        for (field, value) in [
            ("outlier_iqr_multiplier", self.outlier_iqr_multiplier),
            ("high_variability_threshold", self.high_variability_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigValidationError::NonPositive {
                    field: field.to_string(),
                    value,
                });
            }
        }

        if self.top_k == 0 {
            return Err(ConfigValidationError::InvalidTopK(self.top_k));
        }

        Ok(())
    }

    /// Whether a raw cell should be treated as missing.
    pub fn is_missing_marker(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        self.missing_markers
            .iter()
            .any(|marker| marker.trim().eq_ignore_ascii_case(trimmed))
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be between 0.0 and 1.0)")]
    InvalidThreshold { field: String, value: f64 },

    #[error(
        "Moderate missing threshold {moderate} must not exceed high missing threshold {high}"
    )]
    MissingThresholdOrder { moderate: f64, high: f64 },

    #[error("Invalid value for '{field}': {value} (must be a finite number greater than 0)")]
    NonPositive { field: String, value: f64 },

    #[error("Invalid top_k: {0} (must be at least 1)")]
    InvalidTopK(usize),
}

/// Builder for [`ProfilerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ProfilerConfigBuilder {
    high_missing_threshold: Option<f64>,
    moderate_missing_threshold: Option<f64>,
    outlier_iqr_multiplier: Option<f64>,
    high_variability_threshold: Option<f64>,
    dominant_value_threshold: Option<f64>,
    top_k: Option<usize>,
    missing_markers: Option<Vec<String>>,
}

impl ProfilerConfigBuilder {
    /// Set the missing fraction above which `HighMissing` fires.
    ///
    /// # Arguments
    /// * `threshold` - Value between 0.0 and 1.0 (e.g., 0.5 = 50%)
    pub fn high_missing_threshold(mut self, threshold: f64) -> Self {
        self.high_missing_threshold = Some(threshold);
        self
    }

    /// Set the missing fraction above which `ModerateMissing` fires.
    pub fn moderate_missing_threshold(mut self, threshold: f64) -> Self {
        self.moderate_missing_threshold = Some(threshold);
        self
    }

    /// Set the IQR multiplier used for outlier fences.
    pub fn outlier_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.outlier_iqr_multiplier = Some(multiplier);
        self
    }

    /// Set the coefficient-of-variation threshold for `HighVariability`.
    pub fn high_variability_threshold(mut self, threshold: f64) -> Self {
        self.high_variability_threshold = Some(threshold);
        self
    }

    /// Set the share above which the most frequent value is dominant.
    pub fn dominant_value_threshold(mut self, threshold: f64) -> Self {
        self.dominant_value_threshold = Some(threshold);
        self
    }

    /// Set how many top values are kept for text columns.
    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }

    /// Replace the set of raw values treated as missing.
    pub fn missing_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ProfilerConfig` or an error if validation fails.
    pub fn build(self) -> Result<ProfilerConfig, ConfigValidationError> {
        let config = ProfilerConfig {
            high_missing_threshold: self.high_missing_threshold.unwrap_or(0.5),
            moderate_missing_threshold: self.moderate_missing_threshold.unwrap_or(0.2),
            outlier_iqr_multiplier: self.outlier_iqr_multiplier.unwrap_or(1.5),
            high_variability_threshold: self.high_variability_threshold.unwrap_or(1.0),
            dominant_value_threshold: self.dominant_value_threshold.unwrap_or(0.5),
            top_k: self.top_k.unwrap_or(5),
            missing_markers: self.missing_markers.unwrap_or_else(default_missing_markers),
        };

        config.validate()?;
        Ok(config)
    }
}
