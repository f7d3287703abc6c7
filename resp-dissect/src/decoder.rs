//! Message dispatch: reading a frame header and routing on its sigil.
//!
//! Decoding is a pure function from the bytes on hand to either a decoded
//! node or a [`ResumeRequest`]. No parser state survives between attempts:
//! when the transport has gathered more bytes it re-runs the decode from the
//! requested offset over the longer buffer.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use bytes::Bytes;

use crate::cursor::ParseCursor;
use crate::embedded::{EmbeddedDecoder, EmbeddedSummary, looks_like_json};
use crate::error::MalformedReason;
use crate::options::DecoderOptions;
use crate::sigil::{Layout, Sigil};
use crate::stream::StreamDecode;
use crate::value::{DecodedValue, Node};

/// A signal that decoding cannot finish with the bytes on hand.
///
/// The transport should re-run decoding from `resume_offset` once the buffer
/// has grown by at least `min_additional_bytes`, or by an unspecified amount
/// (one more segment) when that is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeRequest {
    /// Offset of the frame to decode again, relative to the decode buffer.
    pub resume_offset: usize,
    /// Lower bound on the bytes still missing, if known.
    pub min_additional_bytes: Option<usize>,
}

impl ResumeRequest {
    pub(crate) fn new(resume_offset: usize, min_additional_bytes: Option<usize>) -> Self {
        Self {
            resume_offset,
            min_additional_bytes,
        }
    }

    /// Re-point the request at an enclosing aggregate's header line.
    #[inline]
    pub(crate) fn restart_at(self, resume_offset: usize) -> Self {
        Self {
            resume_offset,
            ..self
        }
    }
}

/// The header line of a frame.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    /// Offset of the sigil byte.
    pub start: usize,
    /// Line content after the sigil, CRLF excluded.
    pub content: Range<usize>,
    /// Offset just after the line's CRLF, or the buffer end if unterminated.
    pub next: usize,
    /// False when the line ran to the end of the buffer without a CRLF.
    pub terminated: bool,
}

/// A RESP decoder.
///
/// Holds the options and the optional embedded document delegate. Cloning
/// is cheap and a decoder can be shared across streams; all per-attempt
/// state lives in the [`ParseCursor`] and the depth argument.
#[derive(Clone)]
pub struct Decoder {
    pub(crate) options: DecoderOptions,
    embedded: Option<Arc<dyn EmbeddedDecoder>>,
}

impl fmt::Debug for Decoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("options", &self.options)
            .field("embedded", &self.embedded.is_some())
            .finish()
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderOptions::default())
    }
}

impl Decoder {
    /// Create a decoder. With the `json` feature, JSON payloads are sniffed
    /// by [`JsonSniffer`](crate::JsonSniffer).
    pub fn new(options: DecoderOptions) -> Self {
        #[cfg(feature = "json")]
        let embedded: Option<Arc<dyn EmbeddedDecoder>> = Some(Arc::new(crate::JsonSniffer));
        #[cfg(not(feature = "json"))]
        let embedded: Option<Arc<dyn EmbeddedDecoder>> = None;
        Self { options, embedded }
    }

    /// Replace the embedded document delegate.
    pub fn with_embedded(mut self, delegate: impl EmbeddedDecoder + 'static) -> Self {
        self.embedded = Some(Arc::new(delegate));
        self
    }

    /// Remove the embedded document delegate.
    pub fn without_embedded(mut self) -> Self {
        self.embedded = None;
        self
    }

    /// The options this decoder was built with.
    #[inline]
    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decode every frame in `data`.
    pub fn decode(&self, data: impl Into<Bytes>) -> StreamDecode {
        let mut cursor = ParseCursor::new(data);
        self.decode_stream(&mut cursor)
    }

    /// Decode one message at the cursor's position.
    ///
    /// On success the cursor is advanced past the message. On a
    /// [`ResumeRequest`] the cursor position is unspecified; callers restart
    /// from `resume_offset` with a fresh cursor.
    ///
    /// An exhausted cursor always yields a resume request, even with
    /// reassembly disabled, since there is no frame to decode partially.
    pub fn decode_message(
        &self,
        cursor: &mut ParseCursor,
        depth: usize,
    ) -> Result<Node, ResumeRequest> {
        let start = cursor.position();
        let Some(first) = cursor.peek() else {
            return Err(ResumeRequest::new(start, None));
        };
        let frame = self.read_frame(cursor)?;

        // Only a bare CRLF is an empty line. An unknown sigil followed
        // directly by CRLF is still a one-byte fragment.
        if frame.terminated && frame.next == start + 2 {
            cursor.seek(frame.next);
            return Ok(Node::new(
                start..frame.next,
                DecodedValue::Malformed(MalformedReason::EmptyLine),
            ));
        }

        let Some(sigil) = Sigil::from_byte(first) else {
            tracing::trace!(offset = start, sigil = first, "unrecognized sigil");
            let line_end = frame.content.end;
            cursor.seek(frame.next);
            return Ok(Node::new(
                start..frame.next,
                DecodedValue::Fragment(cursor.slice(start, line_end)),
            )
            .with_partial(!frame.terminated));
        };

        match sigil.layout() {
            Layout::Line(kind) => Ok(self.decode_line(cursor, &frame, kind)),
            Layout::LengthPrefixed(kind) => {
                self.decode_length_prefixed(cursor, &frame, kind, depth)
            }
            Layout::Aggregate(kind) => self.decode_aggregate(cursor, &frame, kind, depth),
        }
    }

    /// Locate the header line at the cursor.
    fn read_frame(&self, cursor: &ParseCursor) -> Result<Frame, ResumeRequest> {
        let start = cursor.position();
        let (line_end, next, terminated) = match cursor.find_line_end() {
            Some(end) => (end, end + 2, true),
            None if self.options.enable_reassembly => {
                return Err(ResumeRequest::new(start, None));
            }
            None => (cursor.len(), cursor.len(), false),
        };
        Ok(Frame {
            start,
            content: (start + 1).min(line_end)..line_end,
            next,
            terminated,
        })
    }

    /// Ask the embedded delegate about a payload, if it is eligible.
    pub(crate) fn sniff(&self, payload: &[u8], depth: usize) -> Option<EmbeddedSummary> {
        if !self.options.enable_embedded_sniffing
            || depth > 1
            || payload.len() > self.options.display_threshold
            || !looks_like_json(payload)
        {
            return None;
        }
        self.embedded.as_ref()?.try_decode_embedded(payload)
    }
}
