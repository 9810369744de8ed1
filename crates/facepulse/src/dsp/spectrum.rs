//! Forward transform and power spectrum.

use ndarray::Array1;
use num_complex::Complex32;
use rustfft::FftPlanner;

/// Power spectrum of a real signal: squared magnitudes of the first
/// `n / 2` coefficients (DC included) of the canonical unnormalized
/// forward transform. The input is real-valued, so the upper half of the
/// spectrum is redundant.
pub fn power_spectrum(signal: &Array1<f32>) -> Vec<f32> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    let mut buffer: Vec<Complex32> = signal.iter().map(|&s| Complex32::new(s, 0.0)).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    buffer.iter().take(n / 2).map(|c| c.norm_sqr()).collect()
}

/// Frequency in Hz of bin `bin` for a length-`n` signal sampled at
/// `sample_rate`.
#[inline]
pub fn bin_to_hz(bin: usize, n: usize, sample_rate: f32) -> f32 {
    bin as f32 * sample_rate / n as f32
}
