//! Frames, frame sources, and face region detection.

pub mod detect;
pub mod frame;
pub mod source;

pub use detect::{
    select_candidate, CenterRegionDetector, FaceRect, PrecomputedDetections, RegionDetector,
};
pub use frame::Frame;
pub use source::{FrameSource, ImageSequenceSource};
