//! Zero-stuffing and causal FIR evaluation.
//!
//! The filter sees the symbol stream upsampled by `up`, i.e. with `up - 1`
//! zeros after every symbol. Only one stuffed position in `up` is non-zero, so
//! each output sample is evaluated from the symbols directly and the stuffed
//! sequence is never materialised by the engine.

use rustfft::num_complex::Complex;
use rayon::prelude::*;

use crate::types::Sample;

fn zero<T: Sample>() -> Complex<T> {
    Complex::new(T::zero(), T::zero())
}

/// Inserts `up - 1` zeros after every symbol.
pub fn zero_stuff<T: Sample>(symbols: &[Complex<T>], up: usize) -> Vec<Complex<T>> {
    assert!(up >= 1);
    let mut stuffed = vec![zero::<T>(); symbols.len() * up];
    for (k, &s) in symbols.iter().enumerate() {
        stuffed[k * up] = s;
    }
    stuffed
}

/// Output `n` of the causal FIR applied to the zero-stuffed symbols, with zero
/// initial state. Terms are summed in increasing tap order.
pub fn filtered_sample<T: Sample>(
    symbols: &[Complex<T>],
    taps: &[T],
    up: usize,
    n: usize,
) -> Complex<T> {
    let mut acc = zero::<T>();
    let mut j = n % up;

    while j < taps.len() && j <= n {
        let k = (n - j) / up;
        if k < symbols.len() {
            acc = acc + symbols[k] * taps[j];
        }
        j += up;
    }
    acc
}

/// Full filter output, `up * symbols.len()` samples.
pub fn fir_filter<T: Sample>(symbols: &[Complex<T>], taps: &[T], up: usize) -> Vec<Complex<T>> {
    (0..symbols.len() * up)
        .map(|n| filtered_sample(symbols, taps, up, n))
        .collect()
}

/// Same as [`fir_filter`], spread over the current rayon pool. Every index is
/// computed independently so the result does not depend on the split.
pub fn fir_filter_par<T: Sample>(
    symbols: &[Complex<T>],
    taps: &[T],
    up: usize,
) -> Vec<Complex<T>> {
    (0..symbols.len() * up)
        .into_par_iter()
        .map(|n| filtered_sample(symbols, taps, up, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::num_complex::Complex64;

    // Plain convolution of the stuffed sequence, truncated to its length.
    fn lfilter(taps: &[f64], x: &[Complex64]) -> Vec<Complex64> {
        (0..x.len())
            .map(|n| {
                let mut acc = Complex64::new(0.0, 0.0);
                for (j, &h) in taps.iter().enumerate() {
                    if j <= n {
                        acc += x[n - j] * h;
                    }
                }
                acc
            })
            .collect()
    }

    #[test]
    fn test_zero_stuff() {
        let x = [Complex64::new(1.0, 2.0), Complex64::new(-3.0, 0.5)];
        let y = zero_stuff(&x, 3);
        assert_eq!(y.len(), 6);
        assert_eq!(y[0], x[0]);
        assert_eq!(y[3], x[1]);
        for i in [1, 2, 4, 5] {
            assert_eq!(y[i], Complex64::new(0.0, 0.0));
        }
        assert_eq!(zero_stuff(&x, 1), x.to_vec());
    }

    #[test]
    fn test_impulse_response_is_taps() {
        let taps = [0.1, 1.0, 0.1, -0.2, 0.3];
        let x = [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
        let y = fir_filter(&x, &taps, 4);
        assert_eq!(y.len(), 8);
        for (n, v) in y.iter().enumerate() {
            let expected = if n < taps.len() { taps[n] } else { 0.0 };
            assert_eq!(v.re, expected);
            assert_eq!(v.im, 0.0);
        }
    }

    #[test]
    fn test_matches_direct_convolution() {
        let taps: Vec<f64> = (0..11).map(|i| ((i as f64) * 0.37).sin()).collect();
        let x: Vec<Complex64> = (0..9)
            .map(|i| Complex64::new((i as f64 * 0.7).cos(), (i as f64 * 1.3).sin()))
            .collect();

        for up in 1..6 {
            let expected = lfilter(&taps, &zero_stuff(&x, up));
            let got = fir_filter(&x, &taps, up);
            assert_eq!(got.len(), expected.len());
            for (a, b) in got.iter().zip(expected.iter()) {
                assert!((a - b).norm() < 1e-12, "up={} got={} expected={}", up, a, b);
            }
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let taps = [0.25f32, 0.5, 0.25];
        let x: Vec<Complex<f32>> = (0..64)
            .map(|i| Complex::new(i as f32, -(i as f32) * 0.5))
            .collect();
        assert_eq!(fir_filter(&x, &taps, 3), fir_filter_par(&x, &taps, 3));
    }
}
