//! End-to-end measurement: frame source to heart-rate report.

use ndarray::Array1;
use serde::Serialize;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PulseError;
use crate::estimate::{estimate_bpm, HeartRateEstimate};
use crate::extract::{extract_signal, ExtractOptions, StopReason};
use crate::vision::{FrameSource, RegionDetector};

/// Full result of one measurement run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// The heart-rate estimate.
    pub estimate: HeartRateEstimate,
    /// Sampling rate the estimate was computed at.
    pub sample_rate: f32,
    /// Frames read from the source.
    pub frames_seen: usize,
    /// Frames that contributed a signal sample.
    pub frames_sampled: usize,
    /// Why extraction ended.
    pub stop: StopReason,
}

/// Measure heart rate from a frame source.
///
/// Runs extraction to completion (or early termination), then estimates
/// once over the whole accumulated signal at the source's reported frame
/// rate. Single-threaded and synchronous; independent invocations share no
/// state.
pub fn measure(
    source: &mut dyn FrameSource,
    detector: &mut dyn RegionDetector,
    config: &PipelineConfig,
) -> Result<PipelineReport, PulseError> {
    config.validate()?;

    let sample_rate = source.frame_rate();
    let options = ExtractOptions {
        selection: config.selection,
        on_detection_loss: config.on_detection_loss,
    };

    let extraction = extract_signal(source, detector, &options)?;
    let signal = Array1::from(extraction.signal);
    let estimate = estimate_bpm(&signal, sample_rate, &config.band)?;

    info!(
        "Estimated {:.1} BPM from {} samples @ {:.2} fps",
        estimate.bpm, extraction.frames_sampled, sample_rate
    );

    Ok(PipelineReport {
        estimate,
        sample_rate,
        frames_seen: extraction.frames_seen,
        frames_sampled: extraction.frames_sampled,
        stop: extraction.stop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FrequencyBand;
    use crate::error::{EstimateError, SourceError};
    use crate::vision::{CenterRegionDetector, Frame, PrecomputedDetections};

    struct UniformGreenSource {
        greens: Vec<u8>,
        cursor: usize,
        fps: f32,
    }

    impl FrameSource for UniformGreenSource {
        fn frame_rate(&self) -> f32 {
            self.fps
        }

        fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
            let Some(&g) = self.greens.get(self.cursor) else {
                return Ok(None);
            };
            self.cursor += 1;
            let mut data = Vec::with_capacity(32 * 32 * 3);
            for _ in 0..(32 * 32) {
                data.extend_from_slice(&[64, g, 64]);
            }
            Ok(Some(Frame::new(data, 32, 32)))
        }
    }

    #[test]
    fn test_invalid_config_fails_before_frames_are_read() {
        let mut source = UniformGreenSource {
            greens: vec![128; 10],
            cursor: 0,
            fps: 30.0,
        };
        let mut detector = CenterRegionDetector;
        let config = PipelineConfig {
            band: FrequencyBand {
                min_bpm: 100.0,
                max_bpm: 50.0,
            },
            ..Default::default()
        };

        let err = measure(&mut source, &mut detector, &config);
        assert!(matches!(err, Err(PulseError::Config(_))));
        // No frame was consumed
        assert_eq!(source.cursor, 0);
    }

    #[test]
    fn test_empty_source_reports_insufficient_data() {
        let mut source = UniformGreenSource {
            greens: vec![],
            cursor: 0,
            fps: 30.0,
        };
        let mut detector = CenterRegionDetector;

        let err = measure(&mut source, &mut detector, &PipelineConfig::default());
        assert!(matches!(
            err,
            Err(PulseError::Estimate(EstimateError::InsufficientData))
        ));
    }

    #[test]
    fn test_face_lost_early_reports_insufficient_data() {
        let mut source = UniformGreenSource {
            greens: vec![128; 10],
            cursor: 0,
            fps: 30.0,
        };
        // Detector loses the face immediately
        let mut detector = PrecomputedDetections::from_frames(vec![]);

        let err = measure(&mut source, &mut detector, &PipelineConfig::default());
        assert!(matches!(
            err,
            Err(PulseError::Estimate(EstimateError::InsufficientData))
        ));
    }

    #[test]
    fn test_measures_synthetic_pulse() {
        use std::f32::consts::TAU;

        // 72 BPM (1.2 Hz) green-channel oscillation, 300 frames at 30 fps
        let greens: Vec<u8> = (0..300)
            .map(|i| {
                let t = i as f32 / 30.0;
                (128.0 + 10.0 * (TAU * 1.2 * t).sin()).round() as u8
            })
            .collect();
        let mut source = UniformGreenSource {
            greens,
            cursor: 0,
            fps: 30.0,
        };
        let mut detector = CenterRegionDetector;

        let report = measure(&mut source, &mut detector, &PipelineConfig::default()).unwrap();
        assert_eq!(report.frames_seen, 300);
        assert_eq!(report.frames_sampled, 300);
        assert_eq!(report.stop, StopReason::SourceExhausted);
        assert!(
            (report.estimate.bpm - 72.0).abs() < 2.0,
            "expected ~72 BPM, got {}",
            report.estimate.bpm
        );
    }

    #[test]
    fn test_report_serializes() {
        let greens: Vec<u8> = (0..300)
            .map(|i| {
                let t = i as f32 / 30.0;
                (128.0 + 10.0 * (std::f32::consts::TAU * 1.2 * t).sin()).round() as u8
            })
            .collect();
        let mut source = UniformGreenSource {
            greens,
            cursor: 0,
            fps: 30.0,
        };
        let mut detector = CenterRegionDetector;

        let report = measure(&mut source, &mut detector, &PipelineConfig::default()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"bpm\""));
        assert!(json.contains("\"frames_sampled\""));
    }
}
