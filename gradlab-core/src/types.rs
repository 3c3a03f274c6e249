use std::fmt::Debug;
use std::sync::Arc;

use crate::buffer::Buffer;
use crate::error::GradLabError;

/// Defines the possible data types for Tensor elements.
///
/// Binary operations never promote between types: both operands must share
/// the same `DType`, otherwise the operation fails with
/// [`GradLabError::DataTypeMismatch`]. Conversions are explicit
/// (see [`crate::ops::dtype::cast_op`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit floating-point type. Default for creation helpers.
    F32,
    /// 64-bit floating-point type.
    F64,
    /// 64-bit signed integer type. Cannot require gradients.
    I64,
}

impl DType {
    /// Returns `true` for types that can take part in differentiation.
    pub fn is_floating_point(&self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    /// Size of one element in bytes.
    pub fn size_of(&self) -> usize {
        match self {
            DType::F32 => std::mem::size_of::<f32>(),
            DType::F64 => std::mem::size_of::<f64>(),
            DType::I64 => std::mem::size_of::<i64>(),
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for i64 {}
}

/// Rust scalar types that can be stored in a tensor buffer.
///
/// Ties each scalar type to its [`DType`] and its [`Buffer`] variant so that
/// constructors and extractors can be written once, generically.
pub trait Element: sealed::Sealed + Copy + Debug + PartialEq + Send + Sync + 'static {
    const DTYPE: DType;

    /// Wraps an owned vector in the matching buffer variant.
    fn into_buffer(data: Vec<Self>) -> Buffer;

    /// Borrows the buffer contents if the buffer holds this element type.
    fn try_slice(buffer: &Buffer) -> Result<&[Self], GradLabError>;

    /// Borrows the buffer contents mutably, cloning shared storage first.
    fn try_slice_mut(buffer: &mut Buffer) -> Result<&mut [Self], GradLabError>;

    /// Lossy conversion used for inspection and logging.
    fn to_f64(self) -> f64;

    /// Lossy conversion from `f64`, used for scalar operands.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_element {
    ($ty:ty, $dtype:ident) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$dtype;

            fn into_buffer(data: Vec<Self>) -> Buffer {
                Buffer::$dtype(Arc::new(data))
            }

            fn try_slice(buffer: &Buffer) -> Result<&[Self], GradLabError> {
                match buffer {
                    Buffer::$dtype(data) => Ok(data.as_slice()),
                    other => Err(GradLabError::DataTypeMismatch {
                        expected: DType::$dtype,
                        actual: other.dtype(),
                        operation: "buffer access".to_string(),
                    }),
                }
            }

            fn try_slice_mut(buffer: &mut Buffer) -> Result<&mut [Self], GradLabError> {
                match buffer {
                    Buffer::$dtype(data) => Ok(Arc::make_mut(data).as_mut_slice()),
                    other => Err(GradLabError::DataTypeMismatch {
                        expected: DType::$dtype,
                        actual: other.dtype(),
                        operation: "mutable buffer access".to_string(),
                    }),
                }
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }
        }
    };
}

impl_element!(f32, F32);
impl_element!(f64, F64);
impl_element!(i64, I64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dtype_floating_point() {
        assert!(DType::F32.is_floating_point());
        assert!(DType::F64.is_floating_point());
        assert!(!DType::I64.is_floating_point());
    }

    #[test]
    fn test_element_buffer_roundtrip_rejects_wrong_type() {
        let buffer = f64::into_buffer(vec![1.0, 2.0]);
        assert_eq!(buffer.dtype(), DType::F64);
        assert_eq!(f64::try_slice(&buffer).unwrap(), &[1.0, 2.0]);
        match f32::try_slice(&buffer) {
            Err(GradLabError::DataTypeMismatch { expected, actual, .. }) => {
                assert_eq!(expected, DType::F32);
                assert_eq!(actual, DType::F64);
            }
            other => panic!("Expected DataTypeMismatch, got {:?}", other),
        }
    }
}
