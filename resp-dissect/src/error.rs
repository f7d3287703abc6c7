//! Error types for RESP decoding.
//!
//! Nothing here aborts a stream. [`MalformedReason`] describes a frame that
//! was consumed but could not be interpreted, and [`ReassemblyError`] is
//! raised by the reference [`Reassembler`](crate::Reassembler) when a
//! pending value outgrows its buffer cap.

use crate::value::Node;

/// Why a frame was reported as malformed.
///
/// The frame's bytes are still attributed to the malformed node so the
/// stream stays in step with the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    /// Boolean line other than `t` or `f`.
    #[error("invalid boolean")]
    InvalidBoolean,

    /// Big number with a non-digit character.
    #[error("invalid big number")]
    InvalidBigNumber,

    /// Length or count that is non-numeric or negative but not `-1`.
    #[error("invalid length")]
    InvalidLength,

    /// Aggregate nested deeper than the configured limit.
    #[error("recursion too deep")]
    RecursionTooDeep,

    /// Verbatim string payload without a `xxx:` encoding prefix.
    #[error("invalid verbatim string")]
    InvalidVerbatim,

    /// Length-prefixed payload not followed by CRLF.
    #[error("missing CRLF terminator")]
    MissingTerminator,

    /// A bare CRLF where a frame was expected.
    #[error("empty line")]
    EmptyLine,
}

/// Error returned by the [`Reassembler`](crate::Reassembler).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReassemblyError {
    /// The bytes retained for an incomplete frame exceed the configured cap.
    ///
    /// `completed` holds the frames the same segment finished before the
    /// oversized one; they are final and are not reported again.
    #[error("reassembly buffer limit exceeded: {pending} bytes pending, limit {limit}")]
    BufferLimit {
        pending: usize,
        limit: usize,
        completed: Vec<Node>,
    },
}
