//! Header encoding and array serialization

use crate::error::Error;
use crate::types::{Array, BLOCK, Header, MAGIC, PROLOGUE, VERSION};
use std::io::Write;

/// Encode a version 2.0 header
///
/// Layout: magic, version bytes, a u32 little-endian field holding the
/// remaining header length, then the textual mapping padded with spaces and
/// one trailing newline so the total length is a multiple of [`BLOCK`].
///
/// With `spare` set, [`BLOCK`] extra padding bytes are reserved so the
/// shape's leading dimension can grow in place across appends.
pub fn encode_header(header: &Header, spare: bool) -> Vec<u8> {
    let dict = format_dict(header);

    let mut total = (PROLOGUE + dict.len() + 1).div_ceil(BLOCK) * BLOCK;
    if spare {
        total += BLOCK;
    }

    let mut buf = Vec::with_capacity(total);
    buf.extend_from_slice(MAGIC);
    buf.push(VERSION.0);
    buf.push(VERSION.1);
    buf.extend_from_slice(&((total - PROLOGUE) as u32).to_le_bytes());
    buf.extend_from_slice(dict.as_bytes());
    buf.resize(total - 1, b' ');
    buf.push(b'\n');
    buf
}

/// Write a complete array: slack-reserving header followed by the payload
///
/// Zero-rank arrays are rejected: the format could hold them, but a file
/// without a leading axis can never be appended to.
pub fn write_array<W: Write>(writer: &mut W, array: &Array) -> Result<(), Error> {
    if array.shape.is_empty() {
        return Err(Error::ZeroRank);
    }
    let header = Header::new(array.dtype, false, array.shape.clone());
    writer.write_all(&encode_header(&header, true))?;
    writer.write_all(&array.data)?;
    Ok(())
}

/// Write a complete array to bytes
pub fn to_bytes(array: &Array) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    write_array(&mut buf, array)?;
    Ok(buf)
}

fn format_dict(header: &Header) -> String {
    format!(
        "{{'descr': '{}', 'fortran_order': {}, 'shape': {}, }}",
        header.dtype.descr(),
        if header.fortran_order { "True" } else { "False" },
        format_shape(&header.shape),
    )
}

/// Python tuple repr: `(100,)` for one dimension, `(100, 10)` otherwise
fn format_shape(shape: &[u64]) -> String {
    match shape {
        [dim] => format!("({},)", dim),
        dims => {
            let inner = dims
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("({})", inner)
        }
    }
}
