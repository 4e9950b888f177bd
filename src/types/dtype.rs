//! Element types for stored arrays

/// Element type of a stored array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F32,
    F64,
}

impl DType {
    /// Size in bytes of a single element
    pub fn size(self) -> usize {
        match self {
            DType::U8 | DType::I8 => 1,
            DType::U16 | DType::I16 => 2,
            DType::U32 | DType::I32 | DType::F32 => 4,
            DType::U64 | DType::I64 | DType::F64 => 8,
        }
    }

    /// NumPy descriptor string, little-endian for multi-byte types
    pub fn descr(self) -> &'static str {
        match self {
            DType::U8 => "|u1",
            DType::I8 => "|i1",
            DType::U16 => "<u2",
            DType::I16 => "<i2",
            DType::U32 => "<u4",
            DType::I32 => "<i4",
            DType::U64 => "<u8",
            DType::I64 => "<i8",
            DType::F32 => "<f4",
            DType::F64 => "<f8",
        }
    }

    /// Try to convert from a descriptor string
    ///
    /// Accepts `<` (little-endian), `|` (byte order irrelevant) and `=`
    /// (native, which this crate treats as little-endian) prefixes.
    /// Big-endian descriptors are not recognized.
    pub fn from_descr(descr: &str) -> Option<Self> {
        let tail = descr.strip_prefix(['<', '|', '=']).unwrap_or(descr);
        match tail {
            "u1" => Some(DType::U8),
            "i1" => Some(DType::I8),
            "u2" => Some(DType::U16),
            "i2" => Some(DType::I16),
            "u4" => Some(DType::U32),
            "i4" => Some(DType::I32),
            "u8" => Some(DType::U64),
            "i8" => Some(DType::I64),
            "f4" => Some(DType::F32),
            "f8" => Some(DType::F64),
            _ => None,
        }
    }
}
