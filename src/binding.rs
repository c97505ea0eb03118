//! Precision-specific front end over dynamically typed arrays.
//!
//! Callers holding loosely typed buffers go through [`UflDouble`] (or
//! [`UflFloat`]). Every array is checked against the engine precision and
//! refused, never converted, when its element type differs.

use crate::error::{UflError, UflResult};
use crate::types::{ArrayMut, ArrayRef, DType, Sample};
use crate::upfirlerp::UpfirLerp;

pub type UflDouble = DynUfl<f64>;
pub type UflFloat = DynUfl<f32>;

#[derive(Debug, Clone, Default)]
pub struct DynUfl<T: Sample> {
    engine: UpfirLerp<T>,
}

fn positive(name: &str, value: i64) -> UflResult<usize> {
    if value < 1 {
        return Err(UflError::InvalidConfig(format!(
            "{} must be >= 1, got {}",
            name, value
        )));
    }
    usize::try_from(value)
        .map_err(|_| UflError::InvalidConfig(format!("{} out of range: {}", name, value)))
}

fn mismatch(expected: DType, actual: DType) -> UflError {
    UflError::TypeMismatch { expected, actual }
}

impl<T: Sample> DynUfl<T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn engine(&self) -> &UpfirLerp<T> {
        &self.engine
    }

    pub fn set_up_rate(&mut self, up: i64) -> UflResult<()> {
        self.engine.set_up_rate(positive("up", up)?)?;
        Ok(())
    }

    pub fn get_up_rate(&self) -> i64 {
        self.engine.get_up_rate() as i64
    }

    pub fn set_threads(&mut self, threads: i64) -> UflResult<()> {
        self.engine.set_threads(positive("threads", threads)?)?;
        Ok(())
    }

    pub fn get_threads(&self) -> i64 {
        self.engine.get_threads() as i64
    }

    pub fn set_up_taps(&mut self, taps: ArrayRef<'_>) -> UflResult<()> {
        let dtype = taps.dtype();
        let taps = T::view_real(taps).ok_or_else(|| mismatch(T::PRECISION.real_dtype(), dtype))?;
        self.engine.set_up_taps(taps)?;
        Ok(())
    }

    /// Fills `output` with the waveform evaluated at `t`.
    ///
    /// `input` and `output` must hold complex samples of the engine precision
    /// and `t` must be `float64`; `t` and `output` must have the same length.
    pub fn interpolate_array(
        &self,
        input: ArrayRef<'_>,
        in_t: f64,
        t: ArrayRef<'_>,
        output: ArrayMut<'_>,
    ) -> UflResult<()> {
        if t.len() != output.len() {
            return Err(UflError::LengthMismatch {
                expected: t.len(),
                actual: output.len(),
            });
        }
        let dtype = input.dtype();
        let input =
            T::view_complex(input).ok_or_else(|| mismatch(T::PRECISION.complex_dtype(), dtype))?;
        let dtype = t.dtype();
        let t = f64::view_real(t).ok_or_else(|| mismatch(DType::F64, dtype))?;
        let dtype = output.dtype();
        let output = T::view_complex_mut(output)
            .ok_or_else(|| mismatch(T::PRECISION.complex_dtype(), dtype))?;

        self.engine.interpolate_into(input, in_t, t, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::num_complex::{Complex32, Complex64};

    fn configured() -> UflDouble {
        let mut ufl = UflDouble::new();
        ufl.set_up_rate(2).unwrap();
        ufl.set_threads(2).unwrap();
        ufl.set_up_taps(ArrayRef::from(&[0.5f64, 0.5][..])).unwrap();
        ufl
    }

    #[test]
    fn test_setters_and_getters() {
        let ufl = configured();
        assert_eq!(ufl.get_up_rate(), 2);
        assert_eq!(ufl.get_threads(), 2);
        assert_eq!(ufl.engine().get_up_taps(), &[0.5, 0.5]);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let mut ufl = configured();
        for v in [0, -1, i64::MIN] {
            assert!(matches!(ufl.set_up_rate(v), Err(UflError::InvalidConfig(_))));
            assert!(matches!(ufl.set_threads(v), Err(UflError::InvalidConfig(_))));
        }
        assert_eq!(ufl.get_up_rate(), 2);
        assert_eq!(ufl.get_threads(), 2);
    }

    #[test]
    fn test_single_precision_taps_rejected() {
        let mut ufl = configured();
        let res = ufl.set_up_taps(ArrayRef::from(&[1.0f32, 2.0, 3.0][..]));
        assert!(matches!(
            res,
            Err(UflError::TypeMismatch {
                expected: DType::F64,
                actual: DType::F32
            })
        ));
        assert_eq!(ufl.engine().get_up_taps(), &[0.5, 0.5]);

        let iq = [Complex64::new(1.0, 0.0)];
        assert!(matches!(
            ufl.set_up_taps(ArrayRef::from(&iq[..])),
            Err(UflError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_float_engine_rejects_double_taps() {
        let mut ufl = UflFloat::new();
        let res = ufl.set_up_taps(ArrayRef::from(&[1.0f64][..]));
        assert!(matches!(
            res,
            Err(UflError::TypeMismatch {
                expected: DType::F32,
                actual: DType::F64
            })
        ));
        assert!(ufl.engine().get_up_taps().is_empty());
    }

    #[test]
    fn test_interpolate_array() {
        let ufl = configured();
        let input = [Complex64::new(2.0, -2.0), Complex64::new(4.0, 0.0)];
        let t = [0.0, 0.5, 1.0, 2.0];
        let mut out = [Complex64::new(9.0, 9.0); 4];
        ufl.interpolate_array(
            ArrayRef::from(&input[..]),
            2.0,
            ArrayRef::from(&t[..]),
            ArrayMut::from(&mut out[..]),
        )
        .unwrap();

        // grid: [1-1i, 1-1i, 2+0i, 2+0i] at t = 0, 1, 2, 3
        assert_eq!(out[0], Complex64::new(1.0, -1.0));
        assert_eq!(out[1], Complex64::new(1.0, -1.0));
        assert_eq!(out[2], Complex64::new(1.0, -1.0));
        assert_eq!(out[3], Complex64::new(2.0, 0.0));
    }

    #[test]
    fn test_interpolate_array_type_checks() {
        let ufl = configured();
        let input = [Complex64::new(1.0, 0.0)];
        let input32 = [Complex32::new(1.0, 0.0)];
        let t = [0.0f64];
        let t32 = [0.0f32];
        let mut out = [Complex64::new(0.0, 0.0)];
        let mut out32 = [Complex32::new(0.0, 0.0)];

        let res = ufl.interpolate_array(
            ArrayRef::from(&input32[..]),
            1.0,
            ArrayRef::from(&t[..]),
            ArrayMut::from(&mut out[..]),
        );
        assert!(matches!(
            res,
            Err(UflError::TypeMismatch {
                expected: DType::Complex128,
                actual: DType::Complex64
            })
        ));

        let res = ufl.interpolate_array(
            ArrayRef::from(&input[..]),
            1.0,
            ArrayRef::from(&t32[..]),
            ArrayMut::from(&mut out[..]),
        );
        assert!(matches!(
            res,
            Err(UflError::TypeMismatch {
                expected: DType::F64,
                actual: DType::F32
            })
        ));

        let res = ufl.interpolate_array(
            ArrayRef::from(&input[..]),
            1.0,
            ArrayRef::from(&t[..]),
            ArrayMut::from(&mut out32[..]),
        );
        assert!(matches!(res, Err(UflError::TypeMismatch { .. })));
    }

    #[test]
    fn test_huge_up_rate_is_an_error() {
        let mut ufl = configured();
        ufl.set_up_rate(i64::MAX).unwrap();
        ufl.set_up_taps(ArrayRef::from(&[1.0f64][..])).unwrap();
        let input = [Complex64::new(1.0, 0.0); 3];
        let t = [0.0];
        let mut out = [Complex64::new(0.0, 0.0)];
        let res = ufl.interpolate_array(
            ArrayRef::from(&input[..]),
            0.01,
            ArrayRef::from(&t[..]),
            ArrayMut::from(&mut out[..]),
        );
        assert!(matches!(res, Err(UflError::InvalidConfig(_))));
    }

    #[test]
    fn test_interpolate_array_length_check() {
        let ufl = configured();
        let input = [Complex64::new(1.0, 0.0)];
        let t = [0.0, 0.1, 0.2];
        let mut out = [Complex64::new(0.0, 0.0); 2];
        let res = ufl.interpolate_array(
            ArrayRef::from(&input[..]),
            1.0,
            ArrayRef::from(&t[..]),
            ArrayMut::from(&mut out[..]),
        );
        assert!(matches!(
            res,
            Err(UflError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
