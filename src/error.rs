//! Error types for npyfile

use crate::types::DType;
use std::error;
use std::fmt;
use std::io;

/// Npyfile-specific error type
#[derive(Debug)]
pub enum Error {
    /// Underlying I/O failure
    Io(io::Error),
    /// Invalid magic bytes
    InvalidMagic,
    /// Unsupported format version
    UnsupportedVersion { major: u8, minor: u8 },
    /// Header text could not be parsed
    InvalidHeader(String),
    /// Unknown or big-endian dtype descriptor
    UnknownDescr(String),
    /// Fortran (column-major) order
    FortranOrder,
    /// Array data is not contiguous row-major
    NotContiguous,
    /// Zero-dimensional array, no leading axis to grow
    ZeroRank,
    /// Element type differs from the stored one
    DtypeMismatch { expected: DType, actual: DType },
    /// Number of dimensions differs from the stored one
    RankMismatch { expected: usize, actual: usize },
    /// A trailing dimension differs from the stored one
    ShapeMismatch { expected: Vec<u64>, actual: Vec<u64> },
    /// Payload byte count differs from what the shape implies
    DataSizeMismatch { expected: u64, actual: u64 },
    /// New header no longer fits the reserved length; the file cannot be
    /// appended to any further without relocating the payload
    HeaderOverflow { reserved: usize, required: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "i/o error: {}", e),
            Error::InvalidMagic => write!(f, "invalid magic bytes, not an npy file"),
            Error::UnsupportedVersion { major, minor } => {
                write!(f, "unsupported npy version {}.{}", major, minor)
            }
            Error::InvalidHeader(msg) => write!(f, "invalid npy header: {}", msg),
            Error::UnknownDescr(descr) => {
                write!(f, "unknown dtype descriptor '{}'", descr)
            }
            Error::FortranOrder => write!(f, "fortran-order arrays are not supported"),
            Error::NotContiguous => write!(
                f,
                "array is not contiguous; call .as_standard_layout().into_owned() first"
            ),
            Error::ZeroRank => {
                write!(f, "zero-dimensional arrays have no leading axis to grow")
            }
            Error::DtypeMismatch { expected, actual } => {
                write!(
                    f,
                    "dtype mismatch: file holds {:?}, array is {:?}",
                    expected, actual
                )
            }
            Error::RankMismatch { expected, actual } => {
                write!(
                    f,
                    "rank mismatch: file has {} dimensions, array has {}",
                    expected, actual
                )
            }
            Error::ShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "shapes can only differ on the leading axis: file {:?}, array {:?}",
                    expected, actual
                )
            }
            Error::DataSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "payload size mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
            Error::HeaderOverflow { reserved, required } => {
                write!(
                    f,
                    "header overflow: {} bytes needed but only {} reserved",
                    required, reserved
                )
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
