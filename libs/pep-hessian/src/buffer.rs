//! Growable byte buffer with independent read and write cursors.
//!
//! Every serialize call appends at the write cursor and every deserialize
//! call consumes from the read cursor. The buffer keeps
//! `0 <= rpos <= wpos <= capacity` at all times.

use crate::error::HessianError;
use std::fmt;
use std::io;

/// Smallest capacity a buffer is ever created with.
pub const MIN_CAPACITY: usize = 16;

/// Resizable byte store used as the I/O substrate of the codec.
#[derive(Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
    rpos: usize,
    wpos: usize,
}

impl ByteBuffer {
    /// Creates an empty buffer with [`MIN_CAPACITY`] bytes of storage.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: vec![0; MIN_CAPACITY],
            rpos: 0,
            wpos: 0,
        }
    }

    /// Creates an empty buffer able to hold at least `capacity` bytes.
    ///
    /// # Errors
    /// Returns [`HessianError::Allocation`] if the storage cannot be obtained.
    pub fn with_capacity(capacity: usize) -> Result<Self, HessianError> {
        let size = capacity.max(MIN_CAPACITY);
        let mut data = Vec::new();
        data.try_reserve_exact(size)?;
        data.resize(size, 0);
        Ok(Self {
            data,
            rpos: 0,
            wpos: 0,
        })
    }

    /// Creates a buffer whose unread region is a copy of `bytes`.
    ///
    /// # Errors
    /// Returns [`HessianError::Allocation`] if the storage cannot be obtained.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HessianError> {
        let mut buffer = Self::with_capacity(bytes.len())?;
        buffer.write_bytes(bytes)?;
        Ok(buffer)
    }

    /// Allocated storage in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of bytes written but not yet read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wpos - self.rpos
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` once every written byte has been read.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.rpos == self.wpos
    }

    #[must_use]
    pub fn read_position(&self) -> usize {
        self.rpos
    }

    #[must_use]
    pub fn write_position(&self) -> usize {
        self.wpos
    }

    /// Grows the storage so that `additional` more bytes fit after `wpos`.
    ///
    /// Storage grows by at least 50% to amortize repeated appends.
    fn reserve(&mut self, additional: usize) -> Result<(), HessianError> {
        let required = self.wpos.saturating_add(additional);
        let size = self.data.len();
        if required <= size {
            return Ok(());
        }
        let new_size = required.max(size + size / 2);
        self.data.try_reserve_exact(new_size - size)?;
        self.data.resize(new_size, 0);
        tracing::trace!(from = size, to = new_size, "byte buffer grown");
        Ok(())
    }

    /// Appends one byte.
    ///
    /// # Errors
    /// Returns [`HessianError::Allocation`] if the buffer cannot grow.
    pub fn put_byte(&mut self, byte: u8) -> Result<(), HessianError> {
        self.reserve(1)?;
        self.data[self.wpos] = byte;
        self.wpos += 1;
        Ok(())
    }

    /// Reads one byte, or `None` at end of buffer.
    pub fn get_byte(&mut self) -> Option<u8> {
        if self.is_eof() {
            return None;
        }
        let byte = self.data[self.rpos];
        self.rpos += 1;
        Some(byte)
    }

    /// Returns the next unread byte without consuming it.
    #[must_use]
    pub fn peek_byte(&self) -> Option<u8> {
        if self.is_eof() {
            None
        } else {
            Some(self.data[self.rpos])
        }
    }

    /// Pushes `byte` back in front of the read cursor.
    ///
    /// When nothing has been read yet, the unread region is shifted right by
    /// one byte to make room and the read cursor stays at 0.
    ///
    /// # Errors
    /// Returns [`HessianError::Allocation`] if the shift needs more storage
    /// and the buffer cannot grow.
    pub fn unget_byte(&mut self, byte: u8) -> Result<(), HessianError> {
        if self.rpos > 0 {
            self.rpos -= 1;
            self.data[self.rpos] = byte;
            return Ok(());
        }
        self.reserve(1)?;
        self.data.copy_within(0..self.wpos, 1);
        self.data[0] = byte;
        self.wpos += 1;
        Ok(())
    }

    /// Appends all of `src` and returns the number of bytes written.
    ///
    /// # Errors
    /// Returns [`HessianError::Allocation`] if the buffer cannot grow.
    pub fn write_bytes(&mut self, src: &[u8]) -> Result<usize, HessianError> {
        self.reserve(src.len())?;
        let end = self.wpos + src.len();
        self.data[self.wpos..end].copy_from_slice(src);
        self.wpos = end;
        Ok(src.len())
    }

    /// Copies up to `dst.len()` unread bytes into `dst`.
    ///
    /// Returns the number of bytes copied, which is smaller than requested
    /// when fewer bytes are buffered. Callers must check it.
    pub fn read_bytes(&mut self, dst: &mut [u8]) -> usize {
        let n = dst.len().min(self.len());
        dst[..n].copy_from_slice(&self.data[self.rpos..self.rpos + n]);
        self.rpos += n;
        n
    }

    /// Consumes exactly `n` bytes and borrows them, or consumes nothing and
    /// returns `None` when fewer than `n` bytes are buffered.
    pub fn take(&mut self, n: usize) -> Option<&[u8]> {
        if n > self.len() {
            return None;
        }
        let start = self.rpos;
        self.rpos += n;
        Some(&self.data[start..self.rpos])
    }

    /// Consumes exactly `N` bytes into an array.
    pub fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Some(out)
    }

    /// Clears contents and both cursors.
    pub fn reset(&mut self) {
        self.data.fill(0);
        self.rpos = 0;
        self.wpos = 0;
    }

    /// Moves the read cursor back to the start so the content can be read again.
    pub fn rewind(&mut self) {
        self.rpos = 0;
    }

    /// Unread bytes.
    #[must_use]
    pub fn unread(&self) -> &[u8] {
        &self.data[self.rpos..self.wpos]
    }

    /// Everything written so far, including bytes already read.
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.data[..self.wpos]
    }

    /// Consumes the buffer and returns its unread bytes.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.data.truncate(self.wpos);
        self.data.drain(..self.rpos);
        self.data
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(mut data: Vec<u8>) -> Self {
        let wpos = data.len();
        if data.len() < MIN_CAPACITY {
            data.resize(MIN_CAPACITY, 0);
        }
        Self { data, rpos: 0, wpos }
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("capacity", &self.data.len())
            .field("rpos", &self.rpos)
            .field("wpos", &self.wpos)
            .finish_non_exhaustive()
    }
}

impl io::Read for ByteBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_bytes(buf))
    }
}

impl io::Write for ByteBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
