//! The stream loop: decoding sibling frames until the input runs out.
//!
//! The same loop drives the top level of a stream (unbounded sibling count)
//! and the children of an aggregate (exactly the announced count). It keeps
//! no state between calls; resumption is the caller building a new cursor
//! at the requested offset over a longer buffer.

use crate::cursor::ParseCursor;
use crate::decoder::{Decoder, ResumeRequest};
use crate::value::Node;

/// Smallest possible frame: a sigil plus CRLF, e.g. `_\r\n`.
const MIN_FRAME_LEN: usize = 3;

/// Outcome of decoding a run of sibling frames.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Siblings {
    pub nodes: Vec<Node>,
    /// All expected siblings were decoded.
    pub complete: bool,
    /// Set when a sibling needed more bytes than are available.
    pub resume: Option<ResumeRequest>,
}

/// Result of decoding a stream buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamDecode {
    /// Top-level frames decoded, in arrival order.
    pub frames: Vec<Node>,
    /// Set when the bytes after the last frame hold an incomplete frame.
    ///
    /// Frames before `resume_offset` are final; the transport should keep
    /// the bytes from `resume_offset` onwards and decode again once more
    /// have arrived.
    pub resume: Option<ResumeRequest>,
}

impl StreamDecode {
    /// Returns true if the buffer was decoded to its end.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.resume.is_none()
    }
}

impl Decoder {
    /// Decode every top-level frame from the cursor's position onwards.
    ///
    /// With reassembly enabled an incomplete trailing frame yields a
    /// [`ResumeRequest`] alongside the frames that preceded it. With
    /// reassembly disabled the trailing frame is decoded partially instead.
    pub fn decode_stream(&self, cursor: &mut ParseCursor) -> StreamDecode {
        let siblings = self.decode_siblings(cursor, 0, None);
        if let Some(request) = &siblings.resume {
            tracing::debug!(
                resume_offset = request.resume_offset,
                min_additional_bytes = ?request.min_additional_bytes,
                frames = siblings.nodes.len(),
                "stream needs more bytes"
            );
        }
        StreamDecode {
            frames: siblings.nodes,
            resume: siblings.resume,
        }
    }

    /// Decode sibling frames at `depth`.
    ///
    /// `expected` bounds the count for aggregate children; `None` decodes
    /// until the cursor is exhausted.
    pub(crate) fn decode_siblings(
        &self,
        cursor: &mut ParseCursor,
        depth: usize,
        expected: Option<usize>,
    ) -> Siblings {
        // A hostile count must not drive the allocation.
        let capacity = expected
            .unwrap_or(0)
            .min(cursor.remaining() / MIN_FRAME_LEN + 1);
        let mut nodes = Vec::with_capacity(capacity);

        loop {
            if expected == Some(nodes.len()) {
                return Siblings {
                    nodes,
                    complete: true,
                    resume: None,
                };
            }

            if cursor.is_exhausted() {
                let (complete, resume) = match expected {
                    None => (true, None),
                    Some(_) if self.options.enable_reassembly => {
                        (false, Some(ResumeRequest::new(cursor.position(), None)))
                    }
                    Some(_) => (false, None),
                };
                return Siblings {
                    nodes,
                    complete,
                    resume,
                };
            }

            match self.decode_message(cursor, depth) {
                Ok(node) => {
                    if depth == 0 {
                        tracing::trace!(
                            start = node.range.start,
                            end = node.range.end,
                            kind = node.value.type_name(),
                            "frame decoded"
                        );
                    }
                    nodes.push(node);
                }
                Err(request) => {
                    return Siblings {
                        nodes,
                        complete: false,
                        resume: Some(request),
                    };
                }
            }
        }
    }
}
