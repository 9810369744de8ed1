//! # facepulse
//!
//! Heart rate estimation from face video via remote photoplethysmography:
//! blood flow causes subtle periodic changes in skin color, strongest in
//! the green channel. The pipeline extracts a 1-D signal from a forehead
//! region of interest across frames and recovers the dominant periodic
//! frequency inside the physiologically plausible 40-180 BPM band.
//!
//! Two stages, run in sequence with no feedback loop:
//!
//! 1. **Extraction** ([`extract_signal`]): per frame, equalized grayscale
//!    for detection, face candidate selection, forehead ROI, mean green
//!    intensity. Produces the full signal (or a usable partial one on
//!    early termination).
//! 2. **Estimation** ([`estimate_bpm`]): forward FFT of the signal,
//!    band-limited dominant-power bin, exact bin-to-BPM conversion.
//!
//! Frame decoding and face localization are capability interfaces
//! ([`FrameSource`], [`RegionDetector`]); reference backends are provided
//! for image-sequence playback and externally precomputed detections.
//!
//! ## Example
//!
//! ```no_run
//! use facepulse::{measure, CenterRegionDetector, ImageSequenceSource, PipelineConfig};
//!
//! let mut source = ImageSequenceSource::open("frames/", 30.0)?;
//! let mut detector = CenterRegionDetector;
//! let report = measure(&mut source, &mut detector, &PipelineConfig::default())?;
//! println!("Heart rate: {:.1} BPM", report.estimate.bpm);
//! # Ok::<(), facepulse::PulseError>(())
//! ```

pub mod config;
pub mod dsp;
pub mod error;
pub mod estimate;
pub mod extract;
pub mod pipeline;
pub mod vision;

pub use config::{DetectionLossPolicy, FaceSelection, FrequencyBand, PipelineConfig};
pub use error::{ConfigError, EstimateError, PulseError, SourceError};
pub use estimate::{estimate_bpm, HeartRateEstimate};
pub use extract::{extract_signal, ExtractOptions, Extraction, StopReason};
pub use pipeline::{measure, PipelineReport};
pub use vision::{
    CenterRegionDetector, FaceRect, Frame, FrameSource, ImageSequenceSource,
    PrecomputedDetections, RegionDetector,
};
