//! Type sigils: the leading byte of every RESP frame.
//!
//! RESP2 defines `+ - : $ *`. RESP3 adds `_ # , ( ! = % ~ > |`.

/// The value kind announced by a frame's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sigil {
    /// `+OK\r\n`
    SimpleString,
    /// `-ERR message\r\n`
    Error,
    /// `:1000\r\n`
    Integer,
    /// `,3.14\r\n`
    Double,
    /// `(12345678901234567890\r\n`
    BigNumber,
    /// `#t\r\n`
    Boolean,
    /// `_\r\n`
    Null,
    /// `$6\r\nfoobar\r\n`
    BulkString,
    /// `!21\r\nSYNTAX invalid syntax\r\n`
    BulkError,
    /// `=15\r\ntxt:Hello World\r\n`
    VerbatimString,
    /// `*2\r\n...`
    Array,
    /// `~2\r\n...`
    Set,
    /// `>2\r\n...`
    Push,
    /// `%2\r\n<key><val>...`
    Map,
    /// `|1\r\n<key><val>...`
    Attribute,
}

/// How the body of a frame is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// The value is the rest of the header line.
    Line(LineKind),
    /// The header line holds a byte length; the payload follows.
    LengthPrefixed(BulkKind),
    /// The header line holds an element count; the children follow.
    Aggregate(AggregateKind),
}

/// Kinds whose value is the header line itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    SimpleString,
    Error,
    Integer,
    Double,
    BigNumber,
    Boolean,
    Null,
}

/// Length-prefixed kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkKind {
    String,
    Error,
    Verbatim,
}

/// Aggregate kinds, split by how children are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Array,
    Set,
    Push,
    Map,
    Attribute,
}

impl AggregateKind {
    /// Returns true if children are grouped as key/value pairs.
    #[inline]
    pub fn is_keyed(self) -> bool {
        matches!(self, AggregateKind::Map | AggregateKind::Attribute)
    }

    /// Number of child frames that follow a header announcing `count`.
    #[inline]
    pub fn children_for(self, count: usize) -> Option<usize> {
        if self.is_keyed() {
            count.checked_mul(2)
        } else {
            Some(count)
        }
    }
}

impl Sigil {
    /// Look up the sigil for a frame's first byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        let sigil = match byte {
            b'+' => Sigil::SimpleString,
            b'-' => Sigil::Error,
            b':' => Sigil::Integer,
            b',' => Sigil::Double,
            b'(' => Sigil::BigNumber,
            b'#' => Sigil::Boolean,
            b'_' => Sigil::Null,
            b'$' => Sigil::BulkString,
            b'!' => Sigil::BulkError,
            b'=' => Sigil::VerbatimString,
            b'*' => Sigil::Array,
            b'~' => Sigil::Set,
            b'>' => Sigil::Push,
            b'%' => Sigil::Map,
            b'|' => Sigil::Attribute,
            _ => return None,
        };
        Some(sigil)
    }

    /// The wire byte for this sigil.
    pub fn as_byte(self) -> u8 {
        match self {
            Sigil::SimpleString => b'+',
            Sigil::Error => b'-',
            Sigil::Integer => b':',
            Sigil::Double => b',',
            Sigil::BigNumber => b'(',
            Sigil::Boolean => b'#',
            Sigil::Null => b'_',
            Sigil::BulkString => b'$',
            Sigil::BulkError => b'!',
            Sigil::VerbatimString => b'=',
            Sigil::Array => b'*',
            Sigil::Set => b'~',
            Sigil::Push => b'>',
            Sigil::Map => b'%',
            Sigil::Attribute => b'|',
        }
    }

    /// How frames of this kind are delimited.
    pub fn layout(self) -> Layout {
        match self {
            Sigil::SimpleString => Layout::Line(LineKind::SimpleString),
            Sigil::Error => Layout::Line(LineKind::Error),
            Sigil::Integer => Layout::Line(LineKind::Integer),
            Sigil::Double => Layout::Line(LineKind::Double),
            Sigil::BigNumber => Layout::Line(LineKind::BigNumber),
            Sigil::Boolean => Layout::Line(LineKind::Boolean),
            Sigil::Null => Layout::Line(LineKind::Null),
            Sigil::BulkString => Layout::LengthPrefixed(BulkKind::String),
            Sigil::BulkError => Layout::LengthPrefixed(BulkKind::Error),
            Sigil::VerbatimString => Layout::LengthPrefixed(BulkKind::Verbatim),
            Sigil::Array => Layout::Aggregate(AggregateKind::Array),
            Sigil::Set => Layout::Aggregate(AggregateKind::Set),
            Sigil::Push => Layout::Aggregate(AggregateKind::Push),
            Sigil::Map => Layout::Aggregate(AggregateKind::Map),
            Sigil::Attribute => Layout::Aggregate(AggregateKind::Attribute),
        }
    }
}
