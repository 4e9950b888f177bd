//! npyfile - Appendable NumPy `.npy` files
//!
//! Persists numeric arrays in the standard `.npy` interchange format and
//! grows them incrementally: each append adds payload bytes at end-of-file
//! and rewrites the header in place. The header is written with 64 bytes of
//! reserved padding so the shape's leading dimension can take more decimal
//! digits without relocating anything. Files written without that slack
//! (for example by a plain one-shot writer) are migrated transparently on
//! the first append-mode open.
//!
//! # Features
//!
//! - Byte-exact npy version 2.0 headers, readable by any npy consumer
//! - Append along the leading axis without rewriting existing payload
//! - Validation before any byte is written: dtype, rank, trailing dimensions
//! - Crash-conservative ordering: payload first, header second
//! - `ndarray` conversions behind the default `ndarray` feature
//!
//! # Example
//!
//! ```no_run
//! use npyfile::{Array, DType, Mode, read, save};
//!
//! let rows: Vec<f64> = (0..30).map(f64::from).collect();
//! let data: Vec<u8> = rows.iter().flat_map(|v| v.to_le_bytes()).collect();
//! let batch = Array::new(DType::F64, vec![3, 10], data);
//!
//! save("data/ticks.npy", &batch, Mode::Write)?;
//! save("data/ticks.npy", &batch, Mode::Append)?;
//!
//! let merged = read("data/ticks.npy")?;
//! assert_eq!(merged.shape, vec![6, 10]);
//! # Ok::<(), npyfile::Error>(())
//! ```
//!
//! # Limitations
//!
//! Fortran (column-major) order is not supported, only the leading axis can
//! grow, and exactly one writer per path is assumed: there is no locking,
//! and concurrent writers to the same path will corrupt it.

pub mod error;
pub mod file;
pub mod parser;
pub mod types;
pub mod writer;

#[cfg(feature = "ndarray")]
pub mod ndarray_ext;

// Re-export common types at crate root
pub use error::Error;
pub use file::{Mode, NpyFile, read, save};
pub use types::{Array, BLOCK, DType, Header, MAGIC, PROLOGUE, VERSION};

#[cfg(feature = "ndarray")]
pub use ndarray_ext::ArrayType;
