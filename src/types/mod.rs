//! Core types for the npy format

mod array;
mod dtype;
mod header;

pub use array::Array;
pub use dtype::DType;
pub use header::{BLOCK, Header, MAGIC, PROLOGUE, VERSION};
