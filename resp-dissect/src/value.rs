//! Decoded RESP values and the byte ranges they came from.
//!
//! RESP2 defines the following value types:
//! - Simple String: `+OK\r\n`
//! - Error: `-ERR message\r\n`
//! - Integer: `:1000\r\n`
//! - Bulk String: `$6\r\nfoobar\r\n`
//! - Null Bulk String: `$-1\r\n`
//! - Array: `*2\r\n:1\r\n:2\r\n`
//!
//! RESP3 adds:
//! - Null: `_\r\n`
//! - Boolean: `#t\r\n` or `#f\r\n`
//! - Double: `,3.14159\r\n`
//! - Big Number: `(12345678901234567890\r\n`
//! - Bulk Error: `!<len>\r\n<error>\r\n`
//! - Verbatim String: `=<len>\r\ntxt:<data>\r\n`
//! - Map: `%<len>\r\n<key><val>...`
//! - Set: `~<len>\r\n<elem>...`
//! - Push: `><len>\r\n<elem>...`
//! - Attribute: `|<len>\r\n<key><val>...`

use std::ops::Range;

use bytes::Bytes;

use crate::embedded::EmbeddedSummary;
use crate::error::MalformedReason;

/// A decoded RESP value.
///
/// Aggregates hold their children as [`Node`]s so every child keeps the byte
/// range it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    /// Simple string: `+OK\r\n`
    SimpleString(Bytes),
    /// Error: `-ERR message\r\n`
    Error(Bytes),
    /// Integer: `:1000\r\n`. Unparseable text decodes to `0`.
    Integer(i64),
    /// Double: `,3.14159\r\n`. Unparseable text decodes to `0.0`.
    Double(f64),
    /// Big number, kept as its decimal text: `(12345678901234567890\r\n`
    BigNumber(Bytes),
    /// Boolean: `#t\r\n` or `#f\r\n`
    Boolean(bool),
    /// Null: `_\r\n`, and the `-1` length of bulk errors, verbatim strings
    /// and aggregates.
    Null,
    /// Bulk string: `$6\r\nfoobar\r\n`. `None` is the null bulk string
    /// `$-1\r\n`, distinct from the empty string.
    BulkString(Option<Bytes>),
    /// Bulk error: `!<len>\r\n<error>\r\n`
    BulkError(Bytes),
    /// Verbatim string: `=<len>\r\ntxt:<data>\r\n`
    VerbatimString {
        /// 3-byte encoding tag (e.g. `txt`, `mkd`)
        encoding: [u8; 3],
        /// Text after the `:` separator
        payload: Bytes,
    },
    /// Array: `*<len>\r\n<elem>...`
    Array(Vec<Node>),
    /// Set: `~<len>\r\n<elem>...`
    Set(Vec<Node>),
    /// Push message: `><len>\r\n<elem>...`
    Push(Vec<Node>),
    /// Map: `%<len>\r\n<key><val>...`
    Map(Vec<(Node, Node)>),
    /// Attribute: `|<len>\r\n<key><val>...`
    Attribute(Vec<(Node, Node)>),
    /// A line with a sigil this decoder does not know, kept verbatim.
    Fragment(Bytes),
    /// A frame that was consumed but could not be interpreted.
    Malformed(MalformedReason),
}

impl DecodedValue {
    /// Human-readable name of the value kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            DecodedValue::SimpleString(_) => "Simple String",
            DecodedValue::Error(_) => "Error",
            DecodedValue::Integer(_) => "Integer",
            DecodedValue::Double(_) => "Double",
            DecodedValue::BigNumber(_) => "Big Number",
            DecodedValue::Boolean(_) => "Boolean",
            DecodedValue::Null => "Null",
            DecodedValue::BulkString(_) => "Bulk String",
            DecodedValue::BulkError(_) => "Bulk Error",
            DecodedValue::VerbatimString { .. } => "Verbatim String",
            DecodedValue::Array(_) => "Array",
            DecodedValue::Set(_) => "Set",
            DecodedValue::Push(_) => "Push",
            DecodedValue::Map(_) => "Map",
            DecodedValue::Attribute(_) => "Attribute",
            DecodedValue::Fragment(_) => "Fragment",
            DecodedValue::Malformed(_) => "Malformed",
        }
    }

    /// Returns true for `Null` and the null bulk string.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, DecodedValue::Null | DecodedValue::BulkString(None))
    }

    /// Returns the value as an integer.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DecodedValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value as a double.
    #[inline]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            DecodedValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the value as a boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DecodedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the textual content of string-like values.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            DecodedValue::SimpleString(b)
            | DecodedValue::Error(b)
            | DecodedValue::BigNumber(b)
            | DecodedValue::BulkString(Some(b))
            | DecodedValue::BulkError(b)
            | DecodedValue::VerbatimString { payload: b, .. }
            | DecodedValue::Fragment(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the children of an array, set or push message.
    #[inline]
    pub fn elements(&self) -> Option<&[Node]> {
        match self {
            DecodedValue::Array(v) | DecodedValue::Set(v) | DecodedValue::Push(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the entries of a map or attribute.
    #[inline]
    pub fn entries(&self) -> Option<&[(Node, Node)]> {
        match self {
            DecodedValue::Map(v) | DecodedValue::Attribute(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the reason if this value is malformed.
    #[inline]
    pub fn malformed_reason(&self) -> Option<MalformedReason> {
        match self {
            DecodedValue::Malformed(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// A decoded value together with the bytes it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Byte range in the decode buffer, header line included.
    pub range: Range<usize>,
    /// The decoded value.
    pub value: DecodedValue,
    /// Set when the frame ran past the end of the available bytes and was
    /// decoded from what was there.
    pub partial: bool,
    /// Summary from the embedded document decoder, if the payload was
    /// recognized.
    pub embedded: Option<EmbeddedSummary>,
}

impl Node {
    pub(crate) fn new(range: Range<usize>, value: DecodedValue) -> Self {
        Self {
            range,
            value,
            partial: false,
            embedded: None,
        }
    }

    pub(crate) fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    /// Number of bytes this node covers.
    #[inline]
    pub fn len(&self) -> usize {
        self.range.end - self.range.start
    }

    /// Returns true if the node covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Move this node and all of its children `by` bytes forward.
    pub fn shift(&mut self, by: usize) {
        self.range = self.range.start + by..self.range.end + by;
        match &mut self.value {
            DecodedValue::Array(children)
            | DecodedValue::Set(children)
            | DecodedValue::Push(children) => {
                for child in children {
                    child.shift(by);
                }
            }
            DecodedValue::Map(entries) | DecodedValue::Attribute(entries) => {
                for (key, value) in entries {
                    key.shift(by);
                    value.shift(by);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(range: Range<usize>, n: i64) -> Node {
        Node::new(range, DecodedValue::Integer(n))
    }

    #[test]
    fn test_is_null() {
        assert!(DecodedValue::Null.is_null());
        assert!(DecodedValue::BulkString(None).is_null());
        assert!(!DecodedValue::BulkString(Some(Bytes::new())).is_null());
    }

    #[test]
    fn test_as_bytes() {
        let v = DecodedValue::VerbatimString {
            encoding: *b"txt",
            payload: Bytes::from_static(b"hi"),
        };
        assert_eq!(v.as_bytes(), Some(&b"hi"[..]));
        assert_eq!(DecodedValue::Integer(1).as_bytes(), None);
        assert_eq!(DecodedValue::BulkString(None).as_bytes(), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(DecodedValue::Integer(7).as_integer(), Some(7));
        assert_eq!(DecodedValue::Double(1.5).as_double(), Some(1.5));
        assert_eq!(DecodedValue::Boolean(true).as_bool(), Some(true));
        assert_eq!(
            DecodedValue::Malformed(MalformedReason::InvalidLength).malformed_reason(),
            Some(MalformedReason::InvalidLength)
        );
        let array = DecodedValue::Array(vec![int(4..8, 1)]);
        assert_eq!(array.elements().map(<[Node]>::len), Some(1));
        assert!(array.entries().is_none());
    }

    #[test]
    fn test_shift_moves_children() {
        let mut node = Node::new(
            0..12,
            DecodedValue::Map(vec![(int(4..8, 1), int(8..12, 2))]),
        );
        node.shift(100);
        assert_eq!(node.range, 100..112);
        let entries = node.value.entries().unwrap();
        assert_eq!(entries[0].0.range, 104..108);
        assert_eq!(entries[0].1.range, 108..112);
    }

    #[test]
    fn test_len() {
        let node = int(3..7, 0);
        assert_eq!(node.len(), 4);
        assert!(!node.is_empty());
    }
}
