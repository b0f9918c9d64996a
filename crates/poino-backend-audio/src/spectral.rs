//! Envelope-to-waveform synthesis.
//!
//! A phoneme's spectral envelope is sampled at every harmonic of `f0`. Each
//! harmonic's linear magnitude is written into the nearest frequency bin of an
//! otherwise empty spectrum, and the inverse transform's real part is the
//! segment waveform, normalized so its peak equals the target amplitude.

use poino_spec::{BufferSizing, EngineConfig, EnvelopePoint};
use rustfft::num_complex::Complex;

use crate::dft;

/// Highest harmonic frequency placed in the spectrum, in Hz.
pub const MAX_HARMONIC_HZ: f64 = 48_000.0;

/// Scale from envelope ratio to the Hz axis harmonics are looked up on.
const RATIO_TO_HZ: f64 = 100.0;

/// Synthesizes one segment of `duration_ms` from a spectral envelope.
///
/// Returns an empty buffer for a non-positive duration. With `f0 <= 0` no
/// harmonics are placed and the result is all zeros.
pub fn envelope_to_wave(
    envelope: &[EnvelopePoint],
    f0: f64,
    duration_ms: f64,
    amplitude: f64,
    config: &EngineConfig,
) -> Vec<f64> {
    if duration_ms.is_nan() || duration_ms <= 0.0 {
        return Vec::new();
    }

    let len = config.ms_to_samples(duration_ms);
    if len == 0 {
        return Vec::new();
    }

    let buffer_len = match config.buffer_sizing {
        BufferSizing::Exact => len,
        BufferSizing::PowerOfTwo => len.next_power_of_two(),
    };

    let bins = bin_frequencies(buffer_len, config.sample_rate as f64);
    let mut spectrum = vec![Complex::new(0.0, 0.0); buffer_len];

    for harmonic in harmonics(f0) {
        let magnitude = 10f64.powf(lerp(envelope, harmonic)) - 1.0;
        if let Some(index) = nearest_index(&bins, harmonic) {
            spectrum[index].re += magnitude;
        }
    }

    let mut wave = dft::inverse_real(&spectrum);
    wave.truncate(len);
    normalize(&mut wave, amplitude);
    wave
}

/// Harmonic frequencies `k * f0` for `k = 1, 2, ...` up to [`MAX_HARMONIC_HZ`].
pub fn harmonics(f0: f64) -> Vec<f64> {
    if !f0.is_finite() || f0 <= 0.0 {
        return Vec::new();
    }

    (1..)
        .map(|k| k as f64 * f0)
        .take_while(|&freq| freq <= MAX_HARMONIC_HZ)
        .collect()
}

/// Frequencies of the bins of an `n`-point buffer below Nyquist.
///
/// Bins are spaced `sample_rate / (n - 1)` apart, starting at 0 Hz. A
/// one-point buffer has the single bin 0 Hz.
pub fn bin_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = sample_rate / (n - 1) as f64;
            let nyquist = sample_rate / 2.0;
            (0..n)
                .map(|i| i as f64 * step)
                .take_while(|&freq| freq < nyquist)
                .collect()
        }
    }
}

/// Index of the value closest to `target`; ties go to the first.
pub fn nearest_index(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in values.iter().enumerate() {
        let distance = (value - target).abs();
        match best {
            Some((_, d)) if distance >= d => {}
            _ => best = Some((i, distance)),
        }
    }
    best.map(|(i, _)| i)
}

/// Piecewise-linear envelope lookup at frequency `x` in Hz.
///
/// Finds the segment with `x0 <= x < x1`. A frequency exactly on the last
/// point takes that point's value. Anything outside the envelope is 0.
pub fn lerp(envelope: &[EnvelopePoint], x: f64) -> f64 {
    let last = match envelope.len() {
        0 => return 0.0,
        n => n - 1,
    };

    for (j, point) in envelope.iter().enumerate() {
        let x0 = point.ratio * RATIO_TO_HZ;
        if j < last {
            let next = &envelope[j + 1];
            let x1 = next.ratio * RATIO_TO_HZ;
            if x >= x0 && x < x1 {
                let (y0, y1) = (point.log_magnitude, next.log_magnitude);
                return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
            }
        } else if x == x0 {
            return point.log_magnitude;
        }
    }

    0.0
}

fn normalize(wave: &mut [f64], amplitude: f64) {
    let peak = wave.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if peak > 0.0 {
        let scale = amplitude / peak;
        for sample in wave.iter_mut() {
            *sample *= scale;
        }
    } else {
        wave.fill(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flat_envelope(log_magnitude: f64) -> Vec<EnvelopePoint> {
        vec![
            EnvelopePoint::new(0.0, log_magnitude),
            EnvelopePoint::new(480.0, log_magnitude),
        ]
    }

    #[test]
    fn test_non_positive_duration_is_empty() {
        let config = EngineConfig::default();
        assert!(envelope_to_wave(&flat_envelope(1.0), 200.0, 0.0, 0.5, &config).is_empty());
        assert!(envelope_to_wave(&flat_envelope(1.0), 200.0, -10.0, 0.5, &config).is_empty());
        assert!(envelope_to_wave(&flat_envelope(1.0), 200.0, f64::NAN, 0.5, &config).is_empty());
    }

    #[test]
    fn test_length_and_peak() {
        let config = EngineConfig::default();
        let wave = envelope_to_wave(&flat_envelope(1.0), 200.0, 100.0, 0.4, &config);
        assert_eq!(wave.len(), 4800);

        let peak = wave.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!((peak - 0.4).abs() < 1e-9);
        assert!(wave.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_zero_f0_is_silent() {
        let config = EngineConfig::default();
        let wave = envelope_to_wave(&flat_envelope(1.0), 0.0, 10.0, 0.5, &config);
        assert_eq!(wave, vec![0.0; 480]);
    }

    #[test]
    fn test_power_of_two_sizing_truncates() {
        let config = EngineConfig {
            buffer_sizing: BufferSizing::PowerOfTwo,
            ..EngineConfig::default()
        };
        let wave = envelope_to_wave(&flat_envelope(1.0), 200.0, 10.0, 0.5, &config);
        assert_eq!(wave.len(), 480);
        assert!(wave.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_harmonics_bounded() {
        assert_eq!(harmonics(20_000.0), vec![20_000.0, 40_000.0]);
        assert_eq!(harmonics(48_000.0), vec![48_000.0]);
        assert!(harmonics(0.0).is_empty());
        assert!(harmonics(-5.0).is_empty());
        assert!(harmonics(f64::NAN).is_empty());
    }

    #[test]
    fn test_bin_frequencies() {
        assert_eq!(bin_frequencies(1, 48_000.0), vec![0.0]);
        assert!(bin_frequencies(0, 48_000.0).is_empty());
        // step 12000: 0, 12000 below 24000; 24000 is not
        assert_eq!(bin_frequencies(5, 48_000.0), vec![0.0, 12_000.0]);
    }

    #[test]
    fn test_nearest_index_ties_go_first() {
        let values = [0.0, 10.0, 20.0];
        assert_eq!(nearest_index(&values, 5.0), Some(0));
        assert_eq!(nearest_index(&values, 15.0), Some(1));
        assert_eq!(nearest_index(&values, 19.0), Some(2));
        assert_eq!(nearest_index(&values, 1000.0), Some(2));
        assert_eq!(nearest_index(&[], 1.0), None);
    }

    #[test]
    fn test_lerp() {
        let envelope = vec![
            EnvelopePoint::new(1.0, 0.0),
            EnvelopePoint::new(2.0, 1.0),
            EnvelopePoint::new(4.0, 3.0),
        ];
        // x axis is ratio * 100
        assert_eq!(lerp(&envelope, 150.0), 0.5);
        assert_eq!(lerp(&envelope, 300.0), 2.0);
        assert_eq!(lerp(&envelope, 400.0), 3.0);
        assert_eq!(lerp(&envelope, 50.0), 0.0);
        assert_eq!(lerp(&envelope, 401.0), 0.0);
        assert_eq!(lerp(&[], 100.0), 0.0);
    }

    #[test]
    fn test_silent_envelope_gives_zeros() {
        // 10^0 - 1 = 0 at every harmonic
        let config = EngineConfig::default();
        let wave = envelope_to_wave(&flat_envelope(0.0), 200.0, 5.0, 0.5, &config);
        assert_eq!(wave, vec![0.0; 240]);
    }
}
