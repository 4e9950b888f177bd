//! Decoding of npy headers and whole files

mod dict;

use crate::error::Error;
use crate::types::{Array, Header, MAGIC, PROLOGUE, VERSION};
use std::io::Read;

/// Read and decode a header from the start of a stream
///
/// Returns the header together with its total on-disk byte length, which is
/// also the offset of the first payload byte. Only version 2.0 is accepted.
pub fn read_header<R: Read>(reader: &mut R) -> Result<(Header, usize), Error> {
    let mut prologue = [0u8; PROLOGUE];
    reader.read_exact(&mut prologue)?;

    if &prologue[..6] != MAGIC {
        return Err(Error::InvalidMagic);
    }
    let (major, minor) = (prologue[6], prologue[7]);
    if (major, minor) != VERSION {
        return Err(Error::UnsupportedVersion { major, minor });
    }

    let len = u32::from_le_bytes([prologue[8], prologue[9], prologue[10], prologue[11]]) as usize;
    let mut text = vec![0u8; len];
    reader.read_exact(&mut text)?;
    let text = std::str::from_utf8(&text)
        .map_err(|_| Error::InvalidHeader("header text is not valid UTF-8".to_string()))?;

    let header = dict::parse_dict(text)?;
    Ok((header, PROLOGUE + len))
}

/// Read a whole array from a stream positioned at the start of a file
///
/// Reads exactly the payload the header declares; bytes past that point are
/// ignored, so a file whose header understates an interrupted append still
/// reads as the last fully recorded shape.
pub fn read_array<R: Read>(reader: &mut R) -> Result<Array, Error> {
    let (header, _) = read_header(reader)?;
    if header.fortran_order {
        return Err(Error::FortranOrder);
    }

    let expected = header
        .payload_size()
        .ok_or_else(|| Error::InvalidHeader("payload size overflows a u64".to_string()))?;
    let mut data = Vec::new();
    reader.take(expected).read_to_end(&mut data)?;
    if (data.len() as u64) < expected {
        return Err(Error::DataSizeMismatch {
            expected,
            actual: data.len() as u64,
        });
    }

    Ok(Array::new(header.dtype, header.shape, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BLOCK, DType};
    use crate::writer;

    fn sample() -> Array {
        let data: Vec<u8> = (0..6u32).flat_map(|v| v.to_le_bytes()).collect();
        Array::new(DType::U32, vec![2, 3], data)
    }

    #[test]
    fn roundtrip_header() {
        let header = Header::new(DType::F32, false, vec![5, 4, 3]);
        let bytes = writer::encode_header(&header, true);

        let (parsed, len) = read_header(&mut bytes.as_slice()).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(len, bytes.len());
        assert_eq!(len % BLOCK, 0);
    }

    #[test]
    fn roundtrip_array() {
        let array = sample();
        let bytes = writer::to_bytes(&array).unwrap();
        assert_eq!(read_array(&mut bytes.as_slice()).unwrap(), array);
    }

    #[test]
    fn invalid_magic() {
        let mut bytes = writer::to_bytes(&sample()).unwrap();
        bytes[0] = 0x00;
        let result = read_array(&mut bytes.as_slice());
        assert!(matches!(result, Err(Error::InvalidMagic)));
    }

    #[test]
    fn wrong_version() {
        let mut bytes = writer::to_bytes(&sample()).unwrap();
        bytes[6] = 1;
        let result = read_array(&mut bytes.as_slice());
        assert!(matches!(
            result,
            Err(Error::UnsupportedVersion { major: 1, minor: 0 })
        ));
    }

    #[test]
    fn truncated_payload() {
        let bytes = writer::to_bytes(&sample()).unwrap();
        let result = read_array(&mut &bytes[..bytes.len() - 4]);
        assert!(matches!(
            result,
            Err(Error::DataSizeMismatch {
                expected: 24,
                actual: 20
            })
        ));
    }

    #[test]
    fn overflowing_shape_rejected() {
        // The shape parses but its byte count does not fit a u64; the read
        // must fail cleanly rather than wrap
        let header = Header::new(DType::F64, false, vec![1 << 62, 4]);
        let mut bytes = writer::encode_header(&header, true);
        bytes.extend_from_slice(&[0u8; 64]);
        let result = read_array(&mut bytes.as_slice());
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn fortran_order_rejected() {
        let header = Header::new(DType::F64, true, vec![2, 2]);
        let mut bytes = writer::encode_header(&header, true);
        bytes.extend_from_slice(&[0u8; 32]);
        let result = read_array(&mut bytes.as_slice());
        assert!(matches!(result, Err(Error::FortranOrder)));
    }
}
