//! Frequency-domain signal analysis.

pub mod spectrum;

pub use spectrum::{bin_to_hz, power_spectrum};
