//! Raw video frames and per-region color statistics.

use image::GrayImage;

/// A single decoded video frame.
///
/// Raw RGB8 pixel data, row-major. Frames are ephemeral: the source produces
/// one, the extractor consumes it, and it is dropped before the next frame
/// is read.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw RGB8 pixel data (row-major).
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Frame {
    /// Create a frame from raw RGB8 data.
    ///
    /// # Panics
    /// Panics when `data.len() != width * height * 3`.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        assert_eq!(
            data.len(),
            (width * height * 3) as usize,
            "data size mismatch"
        );
        Self {
            data,
            width,
            height,
        }
    }

    /// Create a black frame.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width * height * 3) as usize],
            width,
            height,
        }
    }

    /// Convert from an `image` crate [`image::DynamicImage`].
    pub fn from_dynamic_image(img: &image::DynamicImage) -> Self {
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self {
            data: rgb.into_raw(),
            width,
            height,
        }
    }

    /// Pixel at (x, y) as `[R, G, B]`. Out of bounds reads as black.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0];
        }
        let idx = ((y * self.width + x) * 3) as usize;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Convert to grayscale using ITU-R BT.601 luma coefficients.
    pub fn to_grayscale(&self) -> GrayImage {
        let mut gray = Vec::with_capacity((self.width * self.height) as usize);
        for chunk in self.data.chunks_exact(3) {
            let luma =
                0.299 * chunk[0] as f32 + 0.587 * chunk[1] as f32 + 0.114 * chunk[2] as f32;
            gray.push(luma as u8);
        }
        GrayImage::from_raw(self.width, self.height, gray).expect("buffer matches dimensions")
    }

    /// Grayscale with histogram equalization applied.
    ///
    /// Equalization stabilizes detection across lighting conditions; this is
    /// the representation handed to region detectors.
    pub fn to_equalized_grayscale(&self) -> GrayImage {
        imageproc::contrast::equalize_histogram(&self.to_grayscale())
    }

    /// Mean green-channel intensity over a rectangle.
    ///
    /// Pixels outside the frame are skipped. Returns `None` when the
    /// rectangle covers no in-bounds pixels.
    pub fn region_mean_green(&self, x: u32, y: u32, w: u32, h: u32) -> Option<f32> {
        let mut sum = 0.0f64;
        let mut count = 0u32;

        for dy in 0..h {
            let py = y + dy;
            if py >= self.height {
                break;
            }
            for dx in 0..w {
                let px = x + dx;
                if px >= self.width {
                    break;
                }
                let idx = ((py * self.width + px) * 3) as usize;
                sum += self.data[idx + 1] as f64;
                count += 1;
            }
        }

        if count > 0 {
            Some((sum / count as f64) as f32)
        } else {
            None
        }
    }
}
