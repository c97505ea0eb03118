use rustfft::num_complex::{Complex, Complex32, Complex64};
use rustfft::num_traits::{Float, FromPrimitive};
use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use std::str::FromStr;

/// Floating-point width an engine is specialised to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Float,
    Double,
}

impl Precision {
    pub fn real_dtype(self) -> DType {
        match self {
            Precision::Float => DType::F32,
            Precision::Double => DType::F64,
        }
    }

    pub fn complex_dtype(self) -> DType {
        match self {
            Precision::Float => DType::Complex64,
            Precision::Double => DType::Complex128,
        }
    }
}

impl FromStr for Precision {
    type Err = Box<dyn Error>;
    fn from_str(input: &str) -> Result<Precision, Self::Err> {
        match input {
            "float" | "f32" => Ok(Precision::Float),
            "double" | "f64" => Ok(Precision::Double),
            _ => Err(format!("Failed to parse {}", input).into()),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Precision::Float => write!(f, "float"),
            Precision::Double => write!(f, "double"),
        }
    }
}

/// Element type of a loosely typed array, named the numpy way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    F32,
    F64,
    Complex64,
    Complex128,
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DType::F32 => write!(f, "float32"),
            DType::F64 => write!(f, "float64"),
            DType::Complex64 => write!(f, "complex64"),
            DType::Complex128 => write!(f, "complex128"),
        }
    }
}

/// Borrowed one-dimensional array whose element type is only known at runtime.
#[derive(Debug, Clone, Copy)]
pub enum ArrayRef<'a> {
    F32(&'a [f32]),
    F64(&'a [f64]),
    Complex64(&'a [Complex32]),
    Complex128(&'a [Complex64]),
}

impl ArrayRef<'_> {
    pub fn dtype(&self) -> DType {
        match self {
            ArrayRef::F32(_) => DType::F32,
            ArrayRef::F64(_) => DType::F64,
            ArrayRef::Complex64(_) => DType::Complex64,
            ArrayRef::Complex128(_) => DType::Complex128,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayRef::F32(v) => v.len(),
            ArrayRef::F64(v) => v.len(),
            ArrayRef::Complex64(v) => v.len(),
            ArrayRef::Complex128(v) => v.len(),
        }
    }
}

impl<'a> From<&'a [f32]> for ArrayRef<'a> {
    fn from(v: &'a [f32]) -> Self {
        ArrayRef::F32(v)
    }
}

impl<'a> From<&'a [f64]> for ArrayRef<'a> {
    fn from(v: &'a [f64]) -> Self {
        ArrayRef::F64(v)
    }
}

impl<'a> From<&'a [Complex32]> for ArrayRef<'a> {
    fn from(v: &'a [Complex32]) -> Self {
        ArrayRef::Complex64(v)
    }
}

impl<'a> From<&'a [Complex64]> for ArrayRef<'a> {
    fn from(v: &'a [Complex64]) -> Self {
        ArrayRef::Complex128(v)
    }
}

/// Mutable counterpart of [`ArrayRef`], used for caller-owned output buffers.
#[derive(Debug)]
pub enum ArrayMut<'a> {
    Complex64(&'a mut [Complex32]),
    Complex128(&'a mut [Complex64]),
}

impl ArrayMut<'_> {
    pub fn dtype(&self) -> DType {
        match self {
            ArrayMut::Complex64(_) => DType::Complex64,
            ArrayMut::Complex128(_) => DType::Complex128,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ArrayMut::Complex64(v) => v.len(),
            ArrayMut::Complex128(v) => v.len(),
        }
    }
}

impl<'a> From<&'a mut [Complex32]> for ArrayMut<'a> {
    fn from(v: &'a mut [Complex32]) -> Self {
        ArrayMut::Complex64(v)
    }
}

impl<'a> From<&'a mut [Complex64]> for ArrayMut<'a> {
    fn from(v: &'a mut [Complex64]) -> Self {
        ArrayMut::Complex128(v)
    }
}

/// Real sample type an engine can be instantiated with.
///
/// The `view_*` helpers return `None` when a dynamic array holds any other
/// element type: arrays are never converted between precisions.
pub trait Sample: Float + FromPrimitive + Default + Debug + Send + Sync + 'static {
    const PRECISION: Precision;

    fn view_real<'a>(array: ArrayRef<'a>) -> Option<&'a [Self]>;
    fn view_complex<'a>(array: ArrayRef<'a>) -> Option<&'a [Complex<Self>]>;
    fn view_complex_mut<'a>(array: ArrayMut<'a>) -> Option<&'a mut [Complex<Self>]>;
}

impl Sample for f64 {
    const PRECISION: Precision = Precision::Double;

    fn view_real<'a>(array: ArrayRef<'a>) -> Option<&'a [f64]> {
        match array {
            ArrayRef::F64(v) => Some(v),
            _ => None,
        }
    }

    fn view_complex<'a>(array: ArrayRef<'a>) -> Option<&'a [Complex64]> {
        match array {
            ArrayRef::Complex128(v) => Some(v),
            _ => None,
        }
    }

    fn view_complex_mut<'a>(array: ArrayMut<'a>) -> Option<&'a mut [Complex64]> {
        match array {
            ArrayMut::Complex128(v) => Some(v),
            _ => None,
        }
    }
}

impl Sample for f32 {
    const PRECISION: Precision = Precision::Float;

    fn view_real<'a>(array: ArrayRef<'a>) -> Option<&'a [f32]> {
        match array {
            ArrayRef::F32(v) => Some(v),
            _ => None,
        }
    }

    fn view_complex<'a>(array: ArrayRef<'a>) -> Option<&'a [Complex32]> {
        match array {
            ArrayRef::Complex64(v) => Some(v),
            _ => None,
        }
    }

    fn view_complex_mut<'a>(array: ArrayMut<'a>) -> Option<&'a mut [Complex32]> {
        match array {
            ArrayMut::Complex64(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_parse() {
        assert_eq!("double".parse::<Precision>().unwrap(), Precision::Double);
        assert_eq!("f32".parse::<Precision>().unwrap(), Precision::Float);
        assert!("half".parse::<Precision>().is_err());
        assert_eq!(Precision::Double.to_string(), "double");
    }

    #[test]
    fn test_views_reject_other_widths() {
        let taps32 = [0.5f32, 0.5];
        let taps64 = [0.5f64, 0.5];
        assert!(f64::view_real(ArrayRef::from(&taps32[..])).is_none());
        assert_eq!(f64::view_real(ArrayRef::from(&taps64[..])), Some(&taps64[..]));
        assert!(f32::view_real(ArrayRef::from(&taps64[..])).is_none());

        let iq = [Complex64::new(1.0, 0.0)];
        assert!(f64::view_complex(ArrayRef::from(&taps64[..])).is_none());
        assert!(f32::view_complex(ArrayRef::from(&iq[..])).is_none());
        assert_eq!(ArrayRef::from(&iq[..]).dtype(), DType::Complex128);
        assert_eq!(Precision::Double.complex_dtype(), DType::Complex128);
    }
}
