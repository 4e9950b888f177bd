//! Append-capable npy files
//!
//! [`NpyFile`] owns the handle to a single `.npy` file and grows it in place:
//! payload bytes are appended at end-of-file, then the header is re-encoded
//! into its original fixed-length window at offset 0. The reserved slack
//! written by [`NpyFile::write`] guarantees the shape's leading dimension has
//! room to grow for any practically reachable file size.
//!
//! One writer per path is assumed; no locking is done, and concurrent writers
//! to the same path will corrupt it.

use crate::error::Error;
use crate::parser::{read_array, read_header};
use crate::types::{Array, Header};
use crate::writer::encode_header;
use std::fs::{self, OpenOptions};
use std::io::{BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// What [`NpyFile::save`] does with the array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Grow an existing file, or create it if absent
    Append,
    /// Replace the file
    Write,
}

/// An open (or lazily opened) append-capable npy file
///
/// The handle is released on [`NpyFile::close`] or when the value is dropped,
/// whichever comes first.
pub struct NpyFile {
    path: PathBuf,
    mode: Mode,
    open: Option<OpenState>,
}

struct OpenState {
    file: fs::File,
    header: Header,
    /// Fixed at creation; every header rewrite must produce exactly this
    /// many bytes
    header_len: usize,
}

impl NpyFile {
    /// Open a path for appending or overwriting
    ///
    /// `Mode::Write` defers all I/O to the first [`write`](Self::write) or
    /// [`append`](Self::append). `Mode::Append` on an existing file decodes
    /// its header immediately; a valid file without reserved header slack is
    /// migrated on the spot (read fully, rewritten with slack) so appends
    /// become possible.
    pub fn open<P: AsRef<Path>>(path: P, mode: Mode) -> Result<Self, Error> {
        let mut this = Self {
            path: path.as_ref().to_path_buf(),
            mode,
            open: None,
        };
        if mode == Mode::Append && this.path.is_file() {
            this.init_existing()?;
        }
        Ok(this)
    }

    fn init_existing(&mut self) -> Result<(), Error> {
        let mut file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        let (header, header_len) = read_header(&mut file)?;
        if header.fortran_order {
            return Err(Error::FortranOrder);
        }

        // Probe for reserved slack: a file written by this crate re-encodes
        // to its exact on-disk header length. Anything shorter or longer has
        // no room for the shape to grow and must be rewritten first.
        if encode_header(&header, true).len() == header_len {
            file.seek(SeekFrom::End(0))?;
            self.open = Some(OpenState {
                file,
                header,
                header_len,
            });
            return Ok(());
        }

        // Legacy file. The original is only replaced once the full read
        // succeeded; a read failure propagates and leaves it untouched.
        file.seek(SeekFrom::Start(0))?;
        let array = read_array(&mut BufReader::new(file))?;
        self.write(&array)
    }

    /// Create or truncate the file and write the array with header slack
    pub fn write(&mut self, array: &Array) -> Result<(), Error> {
        if array.shape.is_empty() {
            return Err(Error::ZeroRank);
        }

        // Release any previous handle before truncating the path
        self.open = None;

        let header = Header::new(array.dtype, false, array.shape.clone());
        let bytes = encode_header(&header, true);

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        file.write_all(&bytes)?;
        file.write_all(&array.data)?;

        self.open = Some(OpenState {
            file,
            header,
            header_len: bytes.len(),
        });
        Ok(())
    }

    /// Append the array along the leading axis
    ///
    /// The first append on an uninitialized target is a plain
    /// [`write`](Self::write). All validation runs before any byte reaches
    /// the file. The payload is appended first and the header rewritten
    /// second, so an interruption in between understates the shape but never
    /// corrupts the file.
    pub fn append(&mut self, array: &Array) -> Result<(), Error> {
        let Some(mut state) = self.open.take() else {
            return self.write(array);
        };
        let result = Self::append_to(&mut state, array);
        self.open = Some(state);
        result
    }

    fn append_to(state: &mut OpenState, array: &Array) -> Result<(), Error> {
        if array.dtype != state.header.dtype {
            return Err(Error::DtypeMismatch {
                expected: state.header.dtype,
                actual: array.dtype,
            });
        }
        if array.shape.len() != state.header.shape.len() {
            return Err(Error::RankMismatch {
                expected: state.header.shape.len(),
                actual: array.shape.len(),
            });
        }
        if array.shape[1..] != state.header.shape[1..] {
            return Err(Error::ShapeMismatch {
                expected: state.header.shape.clone(),
                actual: array.shape.clone(),
            });
        }

        state.file.seek(SeekFrom::End(0))?;
        state.file.write_all(&array.data)?;
        state.header.shape[0] += array.shape[0];

        let mut bytes = encode_header(&state.header, true);
        if bytes.len() != state.header_len {
            // Shape digits crossed a padding block; spend the slack
            bytes = encode_header(&state.header, false);
        }
        if bytes.len() != state.header_len {
            return Err(Error::HeaderOverflow {
                reserved: state.header_len,
                required: bytes.len(),
            });
        }

        state.file.seek(SeekFrom::Start(0))?;
        state.file.write_all(&bytes)?;
        state.file.seek(SeekFrom::End(0))?;
        Ok(())
    }

    /// Append or write according to the mode given at [`open`](Self::open)
    pub fn save(&mut self, array: &Array) -> Result<(), Error> {
        match self.mode {
            Mode::Append => self.append(array),
            Mode::Write => self.write(array),
        }
    }

    /// Release the file handle; safe to call repeatedly
    pub fn close(&mut self) {
        self.open = None;
    }

    /// Shape currently recorded in the header, if the file is initialized
    pub fn shape(&self) -> Option<&[u64]> {
        self.open.as_ref().map(|state| state.header.shape.as_slice())
    }
}

/// Save an array to a path: open, append or write, close
///
/// Parent directories are created as needed. Returns the path written to.
pub fn save<P: AsRef<Path>>(path: P, array: &Array, mode: Mode) -> Result<PathBuf, Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = NpyFile::open(path, mode)?;
    file.save(array)?;
    file.close();
    Ok(path.to_path_buf())
}

/// Load a whole file into memory
pub fn read<P: AsRef<Path>>(path: P) -> Result<Array, Error> {
    let file = fs::File::open(path)?;
    read_array(&mut BufReader::new(file))
}
