//! Dominant-frequency estimation: signal to BPM.

use ndarray::Array1;
use serde::Serialize;
use tracing::debug;

use crate::config::FrequencyBand;
use crate::dsp::{bin_to_hz, power_spectrum};
use crate::error::EstimateError;

/// Eligibility floor as a fraction of the strongest spectral power.
///
/// A floating-point transform of a constant or out-of-band signal leaves
/// tiny rounding residue in every bin; residue must not count as band
/// energy.
const RESIDUE_POWER_FLOOR: f32 = 1e-9;

/// A heart-rate estimate from one signal.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HeartRateEstimate {
    /// Estimated heart rate in beats per minute.
    pub bpm: f32,
    /// Dominant frequency in Hz.
    pub frequency_hz: f32,
    /// Winning bin index in the half-spectrum.
    pub bin: usize,
    /// Spectral power at the winning bin.
    pub power: f32,
    /// Peak power vs. the rest of the eligible band, in dB.
    pub snr_db: f32,
}

/// Estimate heart rate from a signal sampled at `sample_rate` Hz.
///
/// Computes the unwindowed forward transform, inspects bins `1..n/2`, and
/// selects the strictly strongest bin whose frequency falls inside `band`
/// (first-seen wins ties). Conversion uses
/// `bin * sample_rate / n` Hz and `* 60` BPM exactly.
///
/// Pure function: identical inputs yield identical results.
pub fn estimate_bpm(
    signal: &Array1<f32>,
    sample_rate: f32,
    band: &FrequencyBand,
) -> Result<HeartRateEstimate, EstimateError> {
    if signal.is_empty() {
        return Err(EstimateError::InsufficientData);
    }
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(EstimateError::InvalidSampleRate(sample_rate));
    }

    let n = signal.len();
    let spectrum = power_spectrum(signal);

    // Rounding residue threshold, relative to the strongest coefficient
    // anywhere in the half-spectrum (DC included).
    let max_power = spectrum.iter().cloned().fold(0.0f32, f32::max);
    let floor = RESIDUE_POWER_FLOOR * max_power;

    let mut best: Option<(usize, f32)> = None;
    let mut band_total = 0.0f32;

    for (bin, &power) in spectrum.iter().enumerate().skip(1) {
        let bpm = bin_to_hz(bin, n, sample_rate) * 60.0;
        if !band.contains(bpm) {
            continue;
        }
        if power <= floor {
            continue;
        }
        band_total += power;
        if best.map(|(_, p)| power > p).unwrap_or(true) {
            best = Some((bin, power));
        }
    }

    let Some((bin, power)) = best else {
        return Err(EstimateError::NoDominantFrequency);
    };

    let frequency_hz = bin_to_hz(bin, n, sample_rate);
    let bpm = frequency_hz * 60.0;

    let rest = band_total - power;
    let snr_db = if rest > 0.0 {
        10.0 * (power / rest).log10()
    } else {
        0.0
    };

    debug!(
        "Dominant frequency: bin {} of {} -> {:.3} Hz ({:.1} BPM), snr {:.1} dB",
        bin, n, frequency_hz, bpm, snr_db
    );

    Ok(HeartRateEstimate {
        bpm,
        frequency_hz,
        bin,
        power,
        snr_db,
    })
}
