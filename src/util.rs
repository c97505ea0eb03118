use rustfft::num_complex::Complex64;

/// `num` evenly spaced values over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => vec![],
        1 => vec![start],
        _ => {
            let delta = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + i as f64 * delta).collect()
        }
    }
}

pub fn norm_square(v: &[Complex64]) -> f64 {
    v.iter().map(|&x| x.norm_sqr()).sum::<f64>()
}

pub fn max_abs_diff(va: &[Complex64], vb: &[Complex64]) -> f64 {
    assert_eq!(va.len(), vb.len());
    va.iter()
        .zip(vb.iter())
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max)
}
