//! Header constants and structure

use super::DType;

/// Magic bytes identifying an npy file
pub const MAGIC: &[u8; 6] = b"\x93NUMPY";

/// Format version written and accepted: 2.0 is the only version with a
/// 4-byte header length field, which the reserved slack relies on
pub const VERSION: (u8, u8) = (2, 0);

/// Granule the header is padded to, and the size of the reserved slack
pub const BLOCK: usize = 64;

/// Bytes before the header text: magic + version + u32 length field
pub const PROLOGUE: usize = MAGIC.len() + 2 + 4;

/// Decoded form of the header text: element type, storage order, shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub dtype: DType,
    pub fortran_order: bool,
    pub shape: Vec<u64>,
}

impl Header {
    pub fn new(dtype: DType, fortran_order: bool, shape: Vec<u64>) -> Self {
        Self {
            dtype,
            fortran_order,
            shape,
        }
    }

    /// Payload size in bytes implied by the shape, or `None` if the product
    /// overflows a u64
    ///
    /// Headers are attacker-supplied input; a shape like `(2^62, 4)` parses
    /// fine but its byte count does not fit.
    pub fn payload_size(&self) -> Option<u64> {
        self.shape
            .iter()
            .try_fold(self.dtype.size() as u64, |acc, &dim| acc.checked_mul(dim))
    }
}
