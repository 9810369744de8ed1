//! Signal extraction: video frames to a 1-D blood-volume-pulse signal.
//!
//! One pass over the frame source. For each frame: convert to equalized
//! grayscale, detect face candidates, select one, derive the forehead
//! region, and append its mean green intensity to the signal. Extraction is
//! monotone and append-only; the signal never changes after the pass ends.

use tracing::{info, warn};

use crate::config::{DetectionLossPolicy, FaceSelection};
use crate::error::SourceError;
use crate::vision::{select_candidate, FrameSource, RegionDetector};

/// Extraction options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Candidate selection policy for multi-face frames.
    pub selection: FaceSelection,
    /// Behavior when a frame yields no usable region.
    pub on_detection_loss: DetectionLossPolicy,
}

/// Why extraction stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum StopReason {
    /// The frame source ran out of frames (normal completion).
    SourceExhausted,
    /// The detector reported no candidates on this frame (halt policy).
    FaceLost { frame_index: usize },
    /// The derived forehead region had zero area on this frame (halt
    /// policy).
    EmptyForehead { frame_index: usize },
}

/// Result of an extraction pass.
///
/// Losing the face is not an error: the partial signal is still usable
/// downstream, though the estimator will reject it if it is empty.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Mean green intensity per sampled frame, in frame order.
    pub signal: Vec<f32>,
    /// Frames read from the source.
    pub frames_seen: usize,
    /// Frames that contributed a sample.
    pub frames_sampled: usize,
    /// Why the pass ended.
    pub stop: StopReason,
}

/// Run one extraction pass over a frame source.
///
/// Source open/decode failures are fatal and propagate; detection loss
/// terminates (or skips, per policy) without error.
pub fn extract_signal(
    source: &mut dyn FrameSource,
    detector: &mut dyn RegionDetector,
    options: &ExtractOptions,
) -> Result<Extraction, SourceError> {
    let mut signal = Vec::new();
    let mut frames_seen = 0usize;

    let stop = loop {
        let Some(frame) = source.next_frame()? else {
            break StopReason::SourceExhausted;
        };
        let frame_index = frames_seen;
        frames_seen += 1;

        let gray = frame.to_equalized_grayscale();
        let candidates = detector.detect(&gray);

        let Some(face) = select_candidate(&candidates, options.selection) else {
            warn!("No face candidates on frame {}", frame_index);
            match options.on_detection_loss {
                DetectionLossPolicy::Halt => break StopReason::FaceLost { frame_index },
                DetectionLossPolicy::Skip => continue,
            }
        };

        let forehead = face.forehead().clipped_to(frame.width, frame.height);
        let sample = if forehead.area() == 0 {
            None
        } else {
            frame.region_mean_green(forehead.x, forehead.y, forehead.width, forehead.height)
        };

        let Some(sample) = sample else {
            warn!("Degenerate forehead region on frame {}", frame_index);
            match options.on_detection_loss {
                DetectionLossPolicy::Halt => break StopReason::EmptyForehead { frame_index },
                DetectionLossPolicy::Skip => continue,
            }
        };

        signal.push(sample);
    };

    let frames_sampled = signal.len();
    info!(
        "Extraction stopped ({:?}): {} samples from {} frames",
        stop, frames_sampled, frames_seen
    );

    Ok(Extraction {
        signal,
        frames_seen,
        frames_sampled,
        stop,
    })
}
