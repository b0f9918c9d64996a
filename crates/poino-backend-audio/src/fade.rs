//! Linear fade in/out.

/// Applies a linear fade-in over the first `fade_in` samples and a linear
/// fade-out over the last `fade_out` samples.
///
/// Both ramps run from 0 to 1 inclusive, so the first and last samples end up
/// silent. The wave is returned unchanged when either window is zero or longer
/// than the wave; an oversize window is never clamped.
pub fn apply_fade(wave: &mut [f64], fade_in: usize, fade_out: usize) {
    let len = wave.len();
    if fade_in == 0 || fade_in > len || fade_out == 0 || fade_out > len {
        return;
    }

    for (i, sample) in wave[..fade_in].iter_mut().enumerate() {
        *sample *= ramp(i, fade_in);
    }

    for (i, sample) in wave.iter_mut().rev().take(fade_out).enumerate() {
        *sample *= ramp(i, fade_out);
    }
}

/// Returns `i / (n - 1)`, or 0 for a one-sample ramp.
fn ramp(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.0
    } else {
        i as f64 / (n - 1) as f64
    }
}
