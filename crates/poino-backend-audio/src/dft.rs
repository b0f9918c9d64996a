//! Complex discrete Fourier transform for arbitrary lengths.
//!
//! Power-of-two lengths run an iterative radix-2 transform directly. Every
//! other length goes through the chirp (Bluestein) transform, which rewrites
//! the DFT as a circular convolution of two power-of-two buffers of length
//! `(2n - 1).next_power_of_two()`.
//!
//! The inverse transform scales by `1 / n` exactly once, on the result of the
//! outermost call.

use std::f64::consts::PI;

use rustfft::num_complex::Complex;

/// Transforms `input`, forward or inverse.
///
/// Returns a buffer of the same length. An empty input yields an empty output.
///
/// # Example
/// ```
/// use poino_backend_audio::dft::transform;
/// use rustfft::num_complex::Complex;
///
/// let x: Vec<Complex<f64>> = (0..5).map(|i| Complex::new(i as f64, 0.0)).collect();
/// let back = transform(&transform(&x, false), true);
/// for (a, b) in x.iter().zip(&back) {
///     assert!((a - b).norm() < 1e-9);
/// }
/// ```
pub fn transform(input: &[Complex<f64>], inverse: bool) -> Vec<Complex<f64>> {
    let n = input.len();
    if n == 0 {
        return Vec::new();
    }

    let mut output = if n.is_power_of_two() {
        let mut buffer = input.to_vec();
        radix2(&mut buffer, inverse);
        buffer
    } else {
        chirp(input, inverse)
    };

    if inverse {
        let scale = 1.0 / n as f64;
        for value in &mut output {
            *value *= scale;
        }
    }

    output
}

/// Inverse transform keeping only the real part.
pub fn inverse_real(spectrum: &[Complex<f64>]) -> Vec<f64> {
    transform(spectrum, true).into_iter().map(|c| c.re).collect()
}

/// Unscaled in-place radix-2 transform. `buffer.len()` must be a power of two.
fn radix2(buffer: &mut [Complex<f64>], inverse: bool) {
    let n = buffer.len();
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if j > i {
            buffer.swap(i, j);
        }
    }

    let sign = if inverse { 2.0 } else { -2.0 };
    let mut size = 2;
    while size <= n {
        let half = size / 2;
        let step = sign * PI / size as f64;
        for start in (0..n).step_by(size) {
            for k in 0..half {
                let twiddle = Complex::from_polar(1.0, step * k as f64);
                let even = buffer[start + k];
                let odd = buffer[start + k + half] * twiddle;
                buffer[start + k] = even + odd;
                buffer[start + k + half] = even - odd;
            }
        }
        size *= 2;
    }
}

/// Unscaled chirp transform for any length.
fn chirp(input: &[Complex<f64>], inverse: bool) -> Vec<Complex<f64>> {
    let n = input.len();
    let sign = if inverse { 1.0 } else { -1.0 };
    let period = 2 * n as u64;

    // i^2 is reduced modulo 2n before scaling to keep the phase accurate for
    // long inputs.
    let bc: Vec<Complex<f64>> = (0..n as u64)
        .map(|i| {
            let phase = ((i * i) % period) as f64;
            Complex::from_polar(1.0, sign * PI * phase / n as f64)
        })
        .collect();
    let b: Vec<Complex<f64>> = bc.iter().map(Complex::conj).collect();

    let m = (2 * n - 1).next_power_of_two();

    let mut a2 = vec![Complex::new(0.0, 0.0); m];
    for (slot, (x, w)) in a2.iter_mut().zip(input.iter().zip(&bc)) {
        *slot = x * w;
    }

    let mut b2 = vec![Complex::new(0.0, 0.0); m];
    b2[..n].copy_from_slice(&b);
    for i in 1..n {
        b2[m - i] = b[i];
    }

    let convolved = circular_convolve(a2, b2);

    bc.iter()
        .zip(&convolved)
        .map(|(w, c)| w * c)
        .collect()
}

/// Circular convolution of two equal power-of-two length buffers.
fn circular_convolve(mut a: Vec<Complex<f64>>, mut b: Vec<Complex<f64>>) -> Vec<Complex<f64>> {
    let m = a.len();
    radix2(&mut a, false);
    radix2(&mut b, false);

    for (x, y) in a.iter_mut().zip(&b) {
        *x *= *y;
    }

    radix2(&mut a, true);
    let scale = 1.0 / m as f64;
    for value in &mut a {
        *value *= scale;
    }
    a
}
