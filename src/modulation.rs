//! QPSK symbol mapping (2 bits per symbol)
//!
//! Index i maps to the i-th point of {1, i, -1, -i}, i.e. 90° per step
//! counter-clockwise from the real axis. No Gray coding.

use rustfft::num_complex::Complex;

use crate::error::{UflError, UflResult};
use crate::types::Sample;

#[derive(Debug, Clone, Copy, Default)]
pub struct Qpsk;

impl Qpsk {
    pub fn point<T: Sample>(&self, sym: u8) -> UflResult<Complex<T>> {
        let (one, zero) = (T::one(), T::zero());
        match sym {
            0 => Ok(Complex::new(one, zero)),
            1 => Ok(Complex::new(zero, one)),
            2 => Ok(Complex::new(-one, zero)),
            3 => Ok(Complex::new(zero, -one)),
            _ => Err(UflError::InvalidConfig(format!(
                "qpsk symbol out of range: {}",
                sym
            ))),
        }
    }

    pub fn map<T: Sample>(&self, symbols: &[u8]) -> UflResult<Vec<Complex<T>>> {
        symbols.iter().map(|&s| self.point(s)).collect()
    }
}
