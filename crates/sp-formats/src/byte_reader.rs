//! Cursor over an in-memory byte slice with one byte of pushback.

use crate::ReadError;

pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    pushed: Option<u8>,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0, pushed: None }
    }

    /// Offset of the next byte to be read, counting a pushed-back byte as unread.
    pub fn position(&self) -> usize {
        self.pos - usize::from(self.pushed.is_some())
    }

    /// Bytes left to read, including a pushed-back byte.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos + usize::from(self.pushed.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read exactly `N` bytes.
    ///
    /// Nothing left at all is [`ReadError::EndOfInput`]; some but fewer
    /// than `N` is [`ReadError::Truncated`]. On failure nothing is consumed.
    pub fn read_exact<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let available = self.remaining();
        if available == 0 && N > 0 {
            return Err(ReadError::EndOfInput);
        }
        if available < N {
            return Err(ReadError::Truncated { wanted: N, available });
        }

        let mut out = [0u8; N];
        let mut filled = 0;
        if N > 0 {
            if let Some(b) = self.pushed.take() {
                out[0] = b;
                filled = 1;
            }
        }
        let rest = N - filled;
        out[filled..].copy_from_slice(&self.data[self.pos..self.pos + rest]);
        self.pos += rest;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, ReadError> {
        if let Some(b) = self.pushed.take() {
            return Ok(b);
        }
        let b = *self.data.get(self.pos).ok_or(ReadError::EndOfInput)?;
        self.pos += 1;
        Ok(b)
    }

    /// Return `byte` to the front of the stream.
    ///
    /// Only one byte can be pending; pushing twice without a read in
    /// between is a caller bug.
    pub fn push_back(&mut self, byte: u8) {
        debug_assert!(self.pushed.is_none(), "only one byte of pushback");
        self.pushed = Some(byte);
    }
}
