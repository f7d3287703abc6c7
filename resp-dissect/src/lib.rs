//! Incremental RESP2/RESP3 decoding for traffic inspection.
//!
//! This crate turns raw Redis Serialization Protocol bytes, as captured off
//! the wire, into a tree of decoded nodes. Every node records the exact byte
//! range it was decoded from, so a viewer can map values back onto the
//! capture.
//!
//! - **Decoding**: a pure function from a buffer to the frames it holds plus,
//!   when the buffer ends mid-frame, a [`ResumeRequest`] naming the offset to
//!   retry from and how many more bytes are needed.
//! - **Tolerance**: malformed frames are reported as [`DecodedValue::Malformed`]
//!   or [`DecodedValue::Fragment`] and decoding carries on with the next frame.
//! - **Reporting**: decoded frames are walked into a [`Sink`], such as the
//!   [`TextTree`] renderer.
//! - **Reassembly**: [`Reassembler`] buffers segments the way a capture
//!   transport would and honours resume requests.
//!
//! # Features
//!
//! - `json` (default) - Bulk payloads that look like JSON documents are
//!   summarized with [`JsonSniffer`].
//!
//! # Example - One Buffer
//!
//! ```
//! use resp_dissect::{Decoder, DecodedValue, ResumeRequest};
//!
//! let result = Decoder::default().decode(&b"+OK\r\n$5\r\nhel"[..]);
//! assert_eq!(result.frames.len(), 1);
//! assert_eq!(result.frames[0].range, 0..5);
//! assert!(matches!(result.frames[0].value, DecodedValue::SimpleString(_)));
//!
//! // The bulk string needs two more payload bytes; retry from offset 5.
//! assert_eq!(
//!     result.resume,
//!     Some(ResumeRequest { resume_offset: 5, min_additional_bytes: Some(2) })
//! );
//! ```
//!
//! # Example - Segmented Stream
//!
//! ```
//! use resp_dissect::{Decoder, Reassembler, TextTree, report};
//!
//! let mut reassembler = Reassembler::new(Decoder::default());
//! assert!(reassembler.push(b"*2\r\n$3\r\nGET\r\n$3\r").unwrap().is_empty());
//! let frames = reassembler.push(b"\nkey\r\n").unwrap();
//!
//! let mut tree = TextTree::new();
//! report(&frames, reassembler.decoder().options(), &mut tree);
//! assert_eq!(tree.summaries(), ["GET key"]);
//! ```

mod aggregate;
mod cursor;
mod decoder;
mod embedded;
mod error;
mod leaf;
mod options;
mod reassembly;
pub mod report;
mod sigil;
mod stream;
mod value;

pub use cursor::ParseCursor;
pub use decoder::{Decoder, ResumeRequest};
#[cfg(feature = "json")]
pub use embedded::JsonSniffer;
pub use embedded::{DocumentKind, EmbeddedDecoder, EmbeddedSummary, looks_like_json};
pub use error::{MalformedReason, ReassemblyError};
pub use options::{
    DEFAULT_DISPLAY_THRESHOLD, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PENDING_LEN, DecoderOptions,
};
pub use reassembly::Reassembler;
pub use report::{Entry, Sink, TextTree, report, summarize};
pub use sigil::{AggregateKind, BulkKind, Layout, LineKind, Sigil};
pub use stream::StreamDecode;
pub use value::{DecodedValue, Node};
