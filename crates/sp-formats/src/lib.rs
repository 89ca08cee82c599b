//! Format parsers for splicer.
//!
//! Decodes drum-machine `.splice` pattern files into the IR.

mod byte_reader;
mod splice_format;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub use byte_reader::ByteReader;
pub use splice_format::{decode, decode_bytes, SENTINEL};

use sp_ir::Pattern;

/// Error type for [`ByteReader`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// No bytes were left when the read started
    #[error("end of input")]
    EndOfInput,
    /// Some bytes were left, but not enough
    #[error("wanted {wanted} bytes, only {available} available")]
    Truncated { wanted: usize, available: usize },
}

/// Error type for pattern decoding. Any of these aborts the whole decode.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Input shorter than the fixed header
    #[error("truncated header: {0}")]
    TruncatedHeader(ReadError),
    /// A track id block was cut short
    #[error("corrupt track header at offset {offset}: {source}")]
    CorruptTrackHeader { offset: usize, source: ReadError },
    /// Input ended while scanning a track name
    #[error("unterminated track name starting at offset {offset}")]
    UnterminatedName { offset: usize },
    /// Input ended inside a track's step grid
    #[error("truncated step grid for track {track}: {source}")]
    TruncatedStepGrid { track: u8, source: ReadError },
    /// Could not open or read the input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// True for errors raised by malformed track records, as opposed to the
    /// header or the underlying stream.
    pub fn is_track_error(&self) -> bool {
        matches!(
            self,
            DecodeError::CorruptTrackHeader { .. }
                | DecodeError::UnterminatedName { .. }
                | DecodeError::TruncatedStepGrid { .. }
        )
    }
}

/// Read all of `reader` into memory and decode it.
pub fn decode_reader(mut reader: impl Read, name: &str) -> Result<Pattern, DecodeError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_bytes(&data, name)
}

/// Decode the pattern file at `path`.
///
/// The display name is the final path component. The file is closed
/// before this returns, whether decoding succeeded or not.
pub fn decode_file(path: impl AsRef<Path>) -> Result<Pattern, DecodeError> {
    let path = path.as_ref();
    let name = display_name(path);
    let file = File::open(path)?;
    decode_reader(BufReader::new(file), &name)
}

/// Final component of `path`, or the whole path when there is none.
pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}
