//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Accepted heart-rate band in BPM.
///
/// Spectral peaks outside this band are rejected as physiologically
/// implausible. The default covers resting through active heart rates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FrequencyBand {
    /// Lower bound in BPM (inclusive).
    pub min_bpm: f32,
    /// Upper bound in BPM (inclusive).
    pub max_bpm: f32,
}

impl Default for FrequencyBand {
    fn default() -> Self {
        Self {
            min_bpm: 40.0,
            max_bpm: 180.0,
        }
    }
}

impl FrequencyBand {
    /// Returns `true` when `bpm` lies inside the band (inclusive bounds).
    pub fn contains(&self, bpm: f32) -> bool {
        bpm >= self.min_bpm && bpm <= self.max_bpm
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_bpm.is_finite() && self.max_bpm.is_finite()) {
            return Err(ConfigError::Validation(
                "frequency band bounds must be finite".to_string(),
            ));
        }
        if self.min_bpm <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "min_bpm must be positive, got {}",
                self.min_bpm
            )));
        }
        if self.min_bpm >= self.max_bpm {
            return Err(ConfigError::Validation(format!(
                "min_bpm {} must be below max_bpm {}",
                self.min_bpm, self.max_bpm
            )));
        }
        Ok(())
    }
}

/// Which candidate to use when the detector reports more than one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FaceSelection {
    /// First candidate in detector order.
    #[default]
    First,
    /// Candidate with the largest bounding-box area. Preferred when the
    /// detector's ordering carries no meaning.
    LargestArea,
}

/// What to do on a frame where no usable region was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetectionLossPolicy {
    /// End extraction at the first such frame and keep the partial signal.
    #[default]
    Halt,
    /// Drop the frame and keep scanning. The signal keeps its nominal
    /// sampling rate; dropped frames leave small timing gaps.
    Skip,
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Accepted heart-rate band.
    pub band: FrequencyBand,
    /// Candidate selection policy for multi-face frames.
    pub selection: FaceSelection,
    /// Behavior when a frame yields no usable region.
    pub on_detection_loss: DetectionLossPolicy,
}

impl PipelineConfig {
    /// Check invariants. Called by the pipeline before any frame is read.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.band.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_band_is_physiological() {
        let band = FrequencyBand::default();
        assert_eq!(band.min_bpm, 40.0);
        assert_eq!(band.max_bpm, 180.0);
        assert!(band.contains(40.0));
        assert!(band.contains(180.0));
        assert!(!band.contains(39.9));
        assert!(!band.contains(180.1));
    }

    #[test]
    fn default_config_validates() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_band_is_rejected() {
        let config = PipelineConfig {
            band: FrequencyBand {
                min_bpm: 180.0,
                max_bpm: 40.0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_finite_band_is_rejected() {
        let config = PipelineConfig {
            band: FrequencyBand {
                min_bpm: 40.0,
                max_bpm: f32::NAN,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
