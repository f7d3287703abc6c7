//! Read position over a decode buffer.

use bytes::Bytes;

/// An immutable buffer plus a read offset.
///
/// A cursor lives for one decode attempt. When more bytes arrive the caller
/// builds a new cursor over the longer buffer instead of reusing this one.
#[derive(Debug, Clone)]
pub struct ParseCursor {
    buffer: Bytes,
    pos: usize,
}

impl ParseCursor {
    /// Create a cursor positioned at the start of `buffer`.
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self {
            buffer: buffer.into(),
            pos: 0,
        }
    }

    /// Create a cursor positioned at `pos`, clamped to the buffer length.
    pub fn at(buffer: impl Into<Bytes>, pos: usize) -> Self {
        let buffer = buffer.into();
        let pos = pos.min(buffer.len());
        Self { buffer, pos }
    }

    /// The underlying buffer.
    #[inline]
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    /// Current read offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the read offset.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.pos
    }

    /// Returns true when no bytes are left.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.buffer.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.buffer.get(self.pos).copied()
    }

    /// Move the read offset to `pos`.
    #[inline]
    pub(crate) fn seek(&mut self, pos: usize) {
        debug_assert!(pos <= self.buffer.len());
        self.pos = pos;
    }

    /// Absolute offset of the next `\r\n` at or after the read offset.
    #[inline]
    pub(crate) fn find_line_end(&self) -> Option<usize> {
        memchr::memmem::find(&self.buffer[self.pos..], b"\r\n").map(|i| self.pos + i)
    }

    #[inline]
    pub(crate) fn bytes(&self, start: usize, end: usize) -> &[u8] {
        &self.buffer[start..end]
    }

    /// Zero-copy slice of the buffer.
    #[inline]
    pub(crate) fn slice(&self, start: usize, end: usize) -> Bytes {
        self.buffer.slice(start..end)
    }
}
