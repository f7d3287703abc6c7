//! An in-memory reassembly buffer that honours [`ResumeRequest`]s.
//!
//! Segments are appended to a pending buffer. The buffer is frozen and
//! decoded as a whole, the completed frames are handed back, and only the
//! bytes from the requested resume offset are kept for the next attempt.
//! Decoding is skipped entirely until the requested number of bytes has
//! arrived.

use bytes::BytesMut;

use crate::decoder::{Decoder, ResumeRequest};
use crate::error::ReassemblyError;
use crate::value::Node;

/// Reassembles RESP frames from a stream of segments.
///
/// Frame ranges are reported in absolute stream offsets, counted from the
/// first byte ever pushed.
#[derive(Debug, Clone)]
pub struct Reassembler {
    decoder: Decoder,
    buf: BytesMut,
    /// Stream offset of `buf[0]`.
    base: usize,
    /// Pending length required before the next decode attempt.
    wanted: usize,
}

impl Reassembler {
    /// Create an empty reassembler that decodes with `decoder`.
    pub fn new(decoder: Decoder) -> Self {
        Self {
            decoder,
            buf: BytesMut::new(),
            base: 0,
            wanted: 0,
        }
    }

    /// The decoder frames are decoded with.
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Bytes retained for an incomplete frame.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }

    /// Stream offset of the first retained byte.
    #[inline]
    pub fn stream_offset(&self) -> usize {
        self.base
    }

    /// Append a segment and return every frame it completed.
    ///
    /// On [`ReassemblyError::BufferLimit`] the retained bytes are dropped and
    /// the stream offset moves past them. Frames the segment completed before
    /// the oversized one are carried in the error.
    pub fn push(&mut self, segment: &[u8]) -> Result<Vec<Node>, ReassemblyError> {
        self.buf.extend_from_slice(segment);
        if self.buf.len() < self.wanted {
            self.check_limit(self.buf.len(), &mut Vec::new())?;
            return Ok(Vec::new());
        }

        let data = std::mem::take(&mut self.buf).freeze();
        let result = self.decoder.decode(data.clone());
        let consumed = result
            .resume
            .map_or(data.len(), |request| request.resume_offset);

        let mut frames = result.frames;
        for frame in &mut frames {
            frame.shift(self.base);
        }
        self.base += consumed;

        match result.resume {
            Some(ResumeRequest {
                min_additional_bytes,
                ..
            }) => {
                let pending = data.len() - consumed;
                self.check_limit(pending, &mut frames)?;
                self.buf.extend_from_slice(&data[consumed..]);
                self.wanted = pending + min_additional_bytes.unwrap_or(1);
            }
            None => self.wanted = 0,
        }
        Ok(frames)
    }

    /// Decode whatever is still pending as if the stream had closed.
    ///
    /// Retained bytes are decoded partially rather than resumed.
    pub fn finish(&mut self) -> Vec<Node> {
        if self.buf.is_empty() {
            return Vec::new();
        }
        let mut decoder = self.decoder.clone();
        decoder.options.enable_reassembly = false;

        let data = std::mem::take(&mut self.buf).freeze();
        let mut frames = decoder.decode(data.clone()).frames;
        for frame in &mut frames {
            frame.shift(self.base);
        }
        self.base += data.len();
        self.wanted = 0;
        frames
    }

    fn check_limit(
        &mut self,
        pending: usize,
        completed: &mut Vec<Node>,
    ) -> Result<(), ReassemblyError> {
        let limit = self.decoder.options.max_pending_len;
        if pending <= limit {
            return Ok(());
        }
        tracing::warn!(
            stream_offset = self.base,
            pending,
            limit,
            "reassembly buffer limit exceeded, discarding pending bytes"
        );
        self.buf.clear();
        self.base += pending;
        self.wanted = 0;
        Err(ReassemblyError::BufferLimit {
            pending,
            limit,
            completed: std::mem::take(completed),
        })
    }
}
