//! ndarray integration
//!
//! Conversions between [`Array`] and ndarray's `ArrayD` type. Every ndarray
//! enters the file engine through [`Array::from_ndarray`], which is where
//! non-contiguous layouts are rejected, before any file I/O happens.
//!
//! Enable with the `ndarray` feature flag (on by default).

use crate::error::Error;
use crate::types::{Array, DType};
use ndarray::{ArrayD, IxDyn};

/// Trait for element types that can be stored in an npy file
pub trait ArrayType: Sized + Clone + 'static {
    const DTYPE: DType;
}

impl ArrayType for u8 {
    const DTYPE: DType = DType::U8;
}
impl ArrayType for i8 {
    const DTYPE: DType = DType::I8;
}
impl ArrayType for u16 {
    const DTYPE: DType = DType::U16;
}
impl ArrayType for i16 {
    const DTYPE: DType = DType::I16;
}
impl ArrayType for u32 {
    const DTYPE: DType = DType::U32;
}
impl ArrayType for i32 {
    const DTYPE: DType = DType::I32;
}
impl ArrayType for u64 {
    const DTYPE: DType = DType::U64;
}
impl ArrayType for i64 {
    const DTYPE: DType = DType::I64;
}
impl ArrayType for f32 {
    const DTYPE: DType = DType::F32;
}
impl ArrayType for f64 {
    const DTYPE: DType = DType::F64;
}

impl Array {
    /// Create an [`Array`] from an ndarray `ArrayD`
    ///
    /// Takes ownership of a contiguous array. Returns [`Error::NotContiguous`]
    /// otherwise; use `.as_standard_layout().into_owned()` to make
    /// non-contiguous arrays contiguous first.
    pub fn from_ndarray<T: ArrayType>(arr: ArrayD<T>) -> Result<Self, Error> {
        if !arr.is_standard_layout() {
            return Err(Error::NotContiguous);
        }

        let shape: Vec<u64> = arr.shape().iter().map(|&d| d as u64).collect();
        let (vec, offset) = arr.into_raw_vec_and_offset();

        // offset must be 0 for safe reinterpretation
        // (offset > 0 means data doesn't start at vec's allocation start)
        if offset != Some(0) && !vec.is_empty() {
            return Err(Error::NotContiguous);
        }

        let byte_len = vec.len() * std::mem::size_of::<T>();
        let cap = vec.capacity() * std::mem::size_of::<T>();
        let ptr = vec.as_ptr();

        std::mem::forget(vec);

        // SAFETY:
        // - vec is forgotten so we own the allocation
        // - offset == 0 ensures ptr points to start of allocation
        // - byte_len/cap are correctly scaled for u8
        // - T is a primitive (ArrayType) with same memory repr as bytes
        let data = unsafe { Vec::from_raw_parts(ptr as *mut u8, byte_len, cap) };
        Ok(Array::new(T::DTYPE, shape, data))
    }

    /// Convert to an ndarray `ArrayD`
    pub fn to_ndarray<T: ArrayType>(&self) -> Result<ArrayD<T>, Error> {
        if T::DTYPE != self.dtype {
            return Err(Error::DtypeMismatch {
                expected: self.dtype,
                actual: T::DTYPE,
            });
        }

        let actual = self.data.len() as u64;
        let expected = match self.expected_size() {
            Some(size) if size == actual => size,
            other => {
                return Err(Error::DataSizeMismatch {
                    expected: other.unwrap_or(u64::MAX),
                    actual,
                });
            }
        };

        // Copy data into a properly typed vec
        let elements: Vec<T> = self
            .data
            .chunks_exact(std::mem::size_of::<T>())
            .map(|chunk| {
                let mut arr = [0u8; 16]; // Max element size we support
                arr[..chunk.len()].copy_from_slice(chunk);
                // SAFETY:
                // - arr is a local buffer we just wrote valid bytes into
                // - T is constrained to ArrayType (primitives only)
                // - All primitive types have no invalid bit patterns
                // - read_unaligned handles any alignment
                unsafe { std::ptr::read_unaligned(arr.as_ptr() as *const T) }
            })
            .collect();

        let shape: Vec<usize> = self.shape.iter().map(|&d| d as usize).collect();
        ArrayD::from_shape_vec(IxDyn(&shape), elements)
            .map_err(|_| Error::DataSizeMismatch { expected, actual })
    }
}
