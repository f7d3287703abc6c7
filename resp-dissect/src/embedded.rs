//! Best-effort decoding of documents embedded in bulk payloads.
//!
//! Applications commonly store JSON in Redis strings. When a bulk or
//! verbatim payload looks like a JSON document, the decoder offers it to an
//! [`EmbeddedDecoder`] and attaches the resulting summary to the node. A
//! delegate that declines, or is absent, changes nothing else about the
//! decode.

use std::fmt;

/// Top-level shape of an embedded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Object,
    Array,
}

/// What the embedded decoder recognized in a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedSummary {
    /// Short format name, e.g. `"JSON"`.
    pub format: &'static str,
    /// Top-level document shape.
    pub kind: DocumentKind,
    /// Number of top-level members (object keys or array elements).
    pub members: usize,
}

impl fmt::Display for EmbeddedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            DocumentKind::Object => "object",
            DocumentKind::Array => "array",
        };
        let noun = if self.members == 1 { "member" } else { "members" };
        write!(f, "{} {}, {} {}", self.format, kind, self.members, noun)
    }
}

/// A decoder for documents embedded in bulk payloads.
///
/// Implementations must not panic on arbitrary input; returning `None` is
/// the failure path.
pub trait EmbeddedDecoder: Send + Sync {
    /// Try to decode `payload`, returning a summary on success.
    fn try_decode_embedded(&self, payload: &[u8]) -> Option<EmbeddedSummary>;
}

/// Returns true if the first and last non-whitespace bytes of `payload`
/// are a matching `{}` or `[]` pair.
pub fn looks_like_json(payload: &[u8]) -> bool {
    let first = payload.iter().position(|b| !b.is_ascii_whitespace());
    let last = payload.iter().rposition(|b| !b.is_ascii_whitespace());
    match (first, last) {
        (Some(first), Some(last)) if first < last => matches!(
            (payload[first], payload[last]),
            (b'{', b'}') | (b'[', b']')
        ),
        _ => false,
    }
}

/// [`EmbeddedDecoder`] for JSON, backed by `serde_json`.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSniffer;

#[cfg(feature = "json")]
impl EmbeddedDecoder for JsonSniffer {
    fn try_decode_embedded(&self, payload: &[u8]) -> Option<EmbeddedSummary> {
        let (kind, members) = match serde_json::from_slice::<serde_json::Value>(payload).ok()? {
            serde_json::Value::Object(map) => (DocumentKind::Object, map.len()),
            serde_json::Value::Array(items) => (DocumentKind::Array, items.len()),
            _ => return None,
        };
        Some(EmbeddedSummary {
            format: "JSON",
            kind,
            members,
        })
    }
}
