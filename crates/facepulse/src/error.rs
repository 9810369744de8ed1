//! Error taxonomy for the measurement pipeline.
//!
//! Failures are values: every error is distinguishable from every valid BPM
//! result, and no sentinel numbers are ever returned. Losing the face
//! mid-video is deliberately *not* an error; see
//! [`StopReason`](crate::extract::StopReason).

use thiserror::Error;

/// Fatal configuration failures, raised before any frame is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Frame source failures. Fatal for the invocation: a source that cannot be
/// opened or yields an unreadable frame aborts the run.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("cannot open frame source: {0}")]
    Open(String),
    #[error("cannot decode frame: {0}")]
    Decode(String),
    #[error("invalid frame rate {0} (must be positive and finite)")]
    InvalidFrameRate(f32),
}

/// Frequency estimation failures.
#[derive(Error, Debug, PartialEq)]
pub enum EstimateError {
    /// The signal was empty when estimation began.
    #[error("insufficient data: signal is empty")]
    InsufficientData,
    /// No bin in the eligible band carried real spectral power.
    #[error("could not determine dominant frequency in band")]
    NoDominantFrequency,
    #[error("invalid sample rate {0} (must be positive and finite)")]
    InvalidSampleRate(f32),
}

/// Top-level pipeline error.
#[derive(Error, Debug)]
pub enum PulseError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Estimate(#[from] EstimateError),
}
