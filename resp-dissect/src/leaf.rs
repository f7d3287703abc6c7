//! Decoders for single-value frames.
//!
//! Line-bounded kinds (`+ - : , ( # _`) are complete once their header line
//! is found. Length-prefixed kinds (`$ ! =`) carry a byte length on the
//! header line and need `len + 2` more bytes for the payload and its CRLF.

use bytes::Bytes;

use crate::cursor::ParseCursor;
use crate::decoder::{Decoder, Frame, ResumeRequest};
use crate::error::MalformedReason;
use crate::sigil::{BulkKind, LineKind};
use crate::value::{DecodedValue, Node};

impl Decoder {
    /// Decode a line-bounded frame. Never needs more bytes.
    pub(crate) fn decode_line(
        &self,
        cursor: &mut ParseCursor,
        frame: &Frame,
        kind: LineKind,
    ) -> Node {
        let content = cursor.bytes(frame.content.start, frame.content.end);
        let text = || cursor.slice(frame.content.start, frame.content.end);
        let value = match kind {
            LineKind::SimpleString => DecodedValue::SimpleString(text()),
            LineKind::Error => DecodedValue::Error(text()),
            LineKind::Integer => DecodedValue::Integer(parse_integer_lenient(content)),
            LineKind::Double => DecodedValue::Double(parse_double_lenient(content)),
            LineKind::BigNumber => {
                if is_big_number(content) {
                    DecodedValue::BigNumber(text())
                } else {
                    DecodedValue::Malformed(MalformedReason::InvalidBigNumber)
                }
            }
            LineKind::Boolean => match content {
                b"t" => DecodedValue::Boolean(true),
                b"f" => DecodedValue::Boolean(false),
                _ => DecodedValue::Malformed(MalformedReason::InvalidBoolean),
            },
            LineKind::Null => DecodedValue::Null,
        };
        cursor.seek(frame.next);
        Node::new(frame.start..frame.next, value).with_partial(!frame.terminated)
    }

    /// Decode a bulk string, bulk error or verbatim string.
    pub(crate) fn decode_length_prefixed(
        &self,
        cursor: &mut ParseCursor,
        frame: &Frame,
        kind: BulkKind,
        depth: usize,
    ) -> Result<Node, ResumeRequest> {
        let header_only = |cursor: &mut ParseCursor, value: DecodedValue| {
            cursor.seek(frame.next);
            Node::new(frame.start..frame.next, value).with_partial(!frame.terminated)
        };

        let len = match parse_length(cursor.bytes(frame.content.start, frame.content.end)) {
            Some(-1) => {
                let value = match kind {
                    BulkKind::String => DecodedValue::BulkString(None),
                    BulkKind::Error | BulkKind::Verbatim => DecodedValue::Null,
                };
                return Ok(header_only(cursor, value));
            }
            Some(len) => usize::try_from(len).ok(),
            None => None,
        };
        let bounds = len.and_then(|len| {
            let payload_end = frame.next.checked_add(len)?;
            Some((len, payload_end, payload_end.checked_add(2)?))
        });
        let Some((len, payload_end, total_end)) = bounds else {
            return Ok(header_only(
                cursor,
                DecodedValue::Malformed(MalformedReason::InvalidLength),
            ));
        };

        let buffer_len = cursor.len();
        if buffer_len < total_end {
            let available = buffer_len - frame.next;
            if self.options.enable_reassembly {
                // Payload bytes first; the terminator is asked for once the
                // payload itself is whole.
                let missing = if available < len {
                    len - available
                } else {
                    total_end - buffer_len
                };
                tracing::debug!(
                    offset = frame.start,
                    len,
                    available,
                    missing,
                    "bulk payload incomplete"
                );
                return Err(ResumeRequest::new(frame.start, Some(missing)));
            }

            let payload = cursor.slice(frame.next, payload_end.min(buffer_len));
            cursor.seek(buffer_len);
            let node = Node::new(frame.start..buffer_len, bulk_value(kind, payload));
            return Ok(node.with_partial(true));
        }

        if cursor.bytes(payload_end, total_end) != b"\r\n" {
            cursor.seek(total_end);
            return Ok(Node::new(
                frame.start..total_end,
                DecodedValue::Malformed(MalformedReason::MissingTerminator),
            ));
        }

        let payload = cursor.slice(frame.next, payload_end);
        cursor.seek(total_end);
        let value = bulk_value(kind, payload);
        let mut node = Node::new(frame.start..total_end, value);
        node.embedded = match &node.value {
            DecodedValue::BulkString(Some(payload))
            | DecodedValue::VerbatimString { payload, .. } => self.sniff(payload, depth),
            _ => None,
        };
        Ok(node)
    }
}

fn bulk_value(kind: BulkKind, payload: Bytes) -> DecodedValue {
    match kind {
        BulkKind::String => DecodedValue::BulkString(Some(payload)),
        BulkKind::Error => DecodedValue::BulkError(payload),
        BulkKind::Verbatim => {
            if payload.len() < 4 || payload[3] != b':' {
                return DecodedValue::Malformed(MalformedReason::InvalidVerbatim);
            }
            DecodedValue::VerbatimString {
                encoding: [payload[0], payload[1], payload[2]],
                payload: payload.slice(4..),
            }
        }
    }
}

/// Parse a length or element count. Strict: anything but an optionally
/// signed decimal integer is rejected.
pub(crate) fn parse_length(content: &[u8]) -> Option<i64> {
    std::str::from_utf8(content).ok()?.parse().ok()
}

/// Parse an integer value, decoding malformed text as `0`.
fn parse_integer_lenient(content: &[u8]) -> i64 {
    std::str::from_utf8(content)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0)
}

/// Parse a double value, decoding malformed text as `0.0`.
///
/// Accepts the RESP3 spellings `inf`, `-inf` and `nan`.
fn parse_double_lenient(content: &[u8]) -> f64 {
    std::str::from_utf8(content)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

/// A sign or digit, followed by digits only.
fn is_big_number(content: &[u8]) -> bool {
    match content.split_first() {
        Some((first, rest)) => {
            (first.is_ascii_digit() || *first == b'-' || *first == b'+')
                && rest.iter().all(u8::is_ascii_digit)
        }
        None => false,
    }
}
