//! Owned array data

use super::DType;

/// Owned array: element type, shape, and contiguous row-major bytes
///
/// The data is contiguous by construction; non-contiguous layouts can only
/// enter through the ndarray conversions, which reject them.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub dtype: DType,
    pub shape: Vec<u64>,
    pub data: Vec<u8>,
}

impl Array {
    pub fn new(dtype: DType, shape: Vec<u64>, data: Vec<u8>) -> Self {
        Self { dtype, shape, data }
    }

    /// Total number of elements, or `None` if the product overflows a u64
    pub fn num_elements(&self) -> Option<u64> {
        self.shape
            .iter()
            .try_fold(1u64, |acc, &dim| acc.checked_mul(dim))
    }

    /// Expected data size in bytes, or `None` on overflow
    pub fn expected_size(&self) -> Option<u64> {
        self.num_elements()?.checked_mul(self.dtype.size() as u64)
    }
}
