//! Face region detection interface and reference backends.
//!
//! Face localization itself is an external capability: implement
//! [`RegionDetector`] to plug in a real detector (ONNX model, platform SDK,
//! ...). The crate ships two backends so the pipeline runs end to end:
//!
//! - [`PrecomputedDetections`]: per-frame rectangles produced by an
//!   external tool, loaded once at startup.
//! - [`CenterRegionDetector`]: fixed center-third fallback for footage
//!   where the face is known to fill the frame.

use std::path::Path;

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::config::FaceSelection;
use crate::error::ConfigError;

/// Axis-aligned face bounding box in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRect {
    /// X coordinate of the top-left corner.
    pub x: u32,
    /// Y coordinate of the top-left corner.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FaceRect {
    /// Bounding-box area in pixels.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Forehead sub-rectangle: same x, y, and width, top quarter of the
    /// height (truncating division).
    pub fn forehead(&self) -> FaceRect {
        FaceRect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height / 4,
        }
    }

    /// Clip to a `frame_width` x `frame_height` frame. The clipped
    /// rectangle may have zero area.
    pub fn clipped_to(&self, frame_width: u32, frame_height: u32) -> FaceRect {
        let x = self.x.min(frame_width);
        let y = self.y.min(frame_height);
        FaceRect {
            x,
            y,
            width: self.width.min(frame_width - x),
            height: self.height.min(frame_height - y),
        }
    }
}

/// Pluggable face detection backend.
///
/// `detect` receives the histogram-equalized grayscale frame and returns
/// candidate rectangles in detector order (possibly empty). Implementations
/// must be deterministic for a given frame and configuration; `&mut self`
/// because backends may keep per-frame state.
pub trait RegionDetector {
    fn detect(&mut self, gray: &GrayImage) -> Vec<FaceRect>;
}

/// Apply a [`FaceSelection`] policy to a candidate list.
pub fn select_candidate(candidates: &[FaceRect], policy: FaceSelection) -> Option<FaceRect> {
    match policy {
        FaceSelection::First => candidates.first().copied(),
        FaceSelection::LargestArea => candidates.iter().max_by_key(|r| r.area()).copied(),
    }
}

/// Per-frame detections produced by an external face detector.
///
/// The track is loaded once at startup; a missing or malformed file is a
/// fatal [`ConfigError`], distinct from per-frame detection failure. Each
/// `detect` call consumes the next frame's candidate list; past the end of
/// the track every frame reports no candidates.
#[derive(Debug, Clone)]
pub struct PrecomputedDetections {
    frames: Vec<Vec<FaceRect>>,
    cursor: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct DetectionTrack {
    frames: Vec<Vec<FaceRect>>,
}

impl PrecomputedDetections {
    /// Load a detection track from a JSON file of the form
    /// `{"frames": [[{"x":..,"y":..,"width":..,"height":..}, ...], ...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let track: DetectionTrack = serde_json::from_str(&text)?;
        tracing::info!(
            "Loaded detection track: {} frames from {}",
            track.frames.len(),
            path.display()
        );
        Ok(Self {
            frames: track.frames,
            cursor: 0,
        })
    }

    /// Build a track directly from per-frame candidate lists.
    pub fn from_frames(frames: Vec<Vec<FaceRect>>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Number of frames covered by the track.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when the track covers no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl RegionDetector for PrecomputedDetections {
    fn detect(&mut self, _gray: &GrayImage) -> Vec<FaceRect> {
        let candidates = self.frames.get(self.cursor).cloned().unwrap_or_default();
        self.cursor += 1;
        candidates
    }
}

/// Fallback detector reporting the fixed center third of every frame.
///
/// Useful for footage where the face is known to fill the frame, and for
/// exercising the pipeline without an external detector.
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterRegionDetector;

impl RegionDetector for CenterRegionDetector {
    fn detect(&mut self, gray: &GrayImage) -> Vec<FaceRect> {
        let (w, h) = gray.dimensions();
        let rect = FaceRect {
            x: w / 3,
            y: h / 3,
            width: w / 3,
            height: h / 3,
        };
        if rect.area() == 0 {
            Vec::new()
        } else {
            vec![rect]
        }
    }
}
