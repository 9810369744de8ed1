//! Frame sources.
//!
//! A [`FrameSource`] is a lazy, finite, forward-only producer of decoded
//! frames with a fixed reported frame rate. It is not restartable
//! mid-stream; open a fresh source to start over. All underlying resources
//! are released on drop, on every exit path.

use std::path::{Path, PathBuf};

use tracing::info;
use walkdir::WalkDir;

use super::frame::Frame;
use crate::error::SourceError;

/// Supported still-image extensions for sequence playback.
const SEQUENCE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Producer of decoded video frames in presentation order.
pub trait FrameSource {
    /// Reported frames per second. Positive and finite, validated at open.
    fn frame_rate(&self) -> f32;

    /// Next frame in presentation order, or `None` when the source is
    /// exhausted. A decode failure is fatal for the invocation.
    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError>;
}

/// Frame source backed by a directory of numbered image files.
///
/// Files are played back in sorted filename order at a caller-supplied
/// frame rate (image sequences carry no fps metadata of their own). Frames
/// decode lazily, one per [`FrameSource::next_frame`] call.
#[derive(Debug)]
pub struct ImageSequenceSource {
    frames: Vec<PathBuf>,
    cursor: usize,
    frame_rate: f32,
}

impl ImageSequenceSource {
    /// Open a sequence from a directory.
    ///
    /// Validates the frame rate and scans the directory (non-recursively)
    /// for supported image files. Fails when the directory is missing, is
    /// not a directory, or contains no supported images.
    pub fn open<P: AsRef<Path>>(directory: P, frame_rate: f32) -> Result<Self, SourceError> {
        let directory = directory.as_ref();

        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(SourceError::InvalidFrameRate(frame_rate));
        }
        if !directory.exists() {
            return Err(SourceError::Open(format!(
                "directory not found: {}",
                directory.display()
            )));
        }
        if !directory.is_dir() {
            return Err(SourceError::Open(format!(
                "path is not a directory: {}",
                directory.display()
            )));
        }

        let mut frames = Vec::new();
        for entry in WalkDir::new(directory)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && Self::is_supported_image(path) {
                frames.push(path.to_path_buf());
            }
        }

        if frames.is_empty() {
            return Err(SourceError::Open(format!(
                "no image files found in directory: {}",
                directory.display()
            )));
        }

        info!(
            "Image sequence opened: {} frames @ {:.2} fps from {}",
            frames.len(),
            frame_rate,
            directory.display()
        );

        Ok(Self {
            frames,
            cursor: 0,
            frame_rate,
        })
    }

    /// Total number of frames in the sequence.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when the sequence contains no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    fn is_supported_image(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                SEQUENCE_EXTENSIONS.iter().any(|s| *s == ext)
            })
            .unwrap_or(false)
    }
}

impl FrameSource for ImageSequenceSource {
    fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    fn next_frame(&mut self) -> Result<Option<Frame>, SourceError> {
        let Some(path) = self.frames.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;

        let img = image::open(path)
            .map_err(|e| SourceError::Decode(format!("{}: {}", path.display(), e)))?;
        Ok(Some(Frame::from_dynamic_image(&img)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn write_frame(dir: &Path, name: &str, value: u8) {
        let mut img = RgbImage::new(4, 4);
        for px in img.pixels_mut() {
            px.0 = [value, value, value];
        }
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_open_missing_directory() {
        let err = ImageSequenceSource::open("/nonexistent/frames", 30.0).unwrap_err();
        assert!(matches!(err, SourceError::Open(_)));
    }

    #[test]
    fn test_open_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = ImageSequenceSource::open(dir.path(), 30.0).unwrap_err();
        assert!(matches!(err, SourceError::Open(_)));
    }

    #[test]
    fn test_open_rejects_bad_frame_rate() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "frame_000.png", 0);

        for fps in [0.0, -30.0, f32::NAN, f32::INFINITY] {
            let err = ImageSequenceSource::open(dir.path(), fps).unwrap_err();
            assert!(matches!(err, SourceError::InvalidFrameRate(_)));
        }
    }

    #[test]
    fn test_frames_play_back_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "frame_002.png", 30);
        write_frame(dir.path(), "frame_000.png", 10);
        write_frame(dir.path(), "frame_001.png", 20);
        // Non-image files are ignored
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let mut source = ImageSequenceSource::open(dir.path(), 25.0).unwrap();
        assert_eq!(source.len(), 3);
        assert_eq!(source.frame_rate(), 25.0);

        let mut values = Vec::new();
        while let Some(frame) = source.next_frame().unwrap() {
            values.push(frame.get_pixel(0, 0)[0]);
        }
        assert_eq!(values, vec![10, 20, 30]);

        // Exhausted source keeps returning None
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_frame_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("frame_000.png"), b"not a png").unwrap();

        let mut source = ImageSequenceSource::open(dir.path(), 30.0).unwrap();
        let err = source.next_frame().unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
