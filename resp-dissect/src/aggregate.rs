//! Decoders for aggregates: arrays, sets, push messages, maps and
//! attributes.
//!
//! An aggregate is never resumed in the middle of its children. If any child
//! needs more bytes the whole aggregate is abandoned and the resume request
//! is re-pointed at the aggregate's own header line.

use crate::cursor::ParseCursor;
use crate::decoder::{Decoder, Frame, ResumeRequest};
use crate::error::MalformedReason;
use crate::leaf::parse_length;
use crate::sigil::AggregateKind;
use crate::value::{DecodedValue, Node};

impl Decoder {
    /// Decode an aggregate whose header line is `frame`, at nesting `depth`.
    pub(crate) fn decode_aggregate(
        &self,
        cursor: &mut ParseCursor,
        frame: &Frame,
        kind: AggregateKind,
        depth: usize,
    ) -> Result<Node, ResumeRequest> {
        let header_only = |cursor: &mut ParseCursor, value: DecodedValue| {
            cursor.seek(frame.next);
            Node::new(frame.start..frame.next, value).with_partial(!frame.terminated)
        };

        let count = match parse_length(cursor.bytes(frame.content.start, frame.content.end)) {
            Some(-1) => return Ok(header_only(cursor, DecodedValue::Null)),
            Some(0) => return Ok(header_only(cursor, build(kind, Vec::new()))),
            Some(count) => usize::try_from(count).ok(),
            None => None,
        };
        let Some(expected) = count.and_then(|count| kind.children_for(count)) else {
            return Ok(header_only(
                cursor,
                DecodedValue::Malformed(MalformedReason::InvalidLength),
            ));
        };

        if depth >= self.options.max_depth {
            tracing::debug!(
                offset = frame.start,
                depth,
                max_depth = self.options.max_depth,
                "aggregate nested too deep, children left undecoded"
            );
            return Ok(header_only(
                cursor,
                DecodedValue::Malformed(MalformedReason::RecursionTooDeep),
            ));
        }

        cursor.seek(frame.next);
        let siblings = self.decode_siblings(cursor, depth + 1, Some(expected));
        if let Some(request) = siblings.resume {
            return Err(request.restart_at(frame.start));
        }

        let partial = !siblings.complete || siblings.nodes.iter().any(|node| node.partial);
        let range = frame.start..cursor.position();
        Ok(Node::new(range, build(kind, siblings.nodes)).with_partial(partial))
    }
}

/// Assemble an aggregate value from its children in input order.
///
/// A keyed aggregate cut short after a key keeps that key's bytes inside the
/// aggregate's range but drops it from the entries.
fn build(kind: AggregateKind, children: Vec<Node>) -> DecodedValue {
    match kind {
        AggregateKind::Array => DecodedValue::Array(children),
        AggregateKind::Set => DecodedValue::Set(children),
        AggregateKind::Push => DecodedValue::Push(children),
        AggregateKind::Map => DecodedValue::Map(pairs(children)),
        AggregateKind::Attribute => DecodedValue::Attribute(pairs(children)),
    }
}

fn pairs(children: Vec<Node>) -> Vec<(Node, Node)> {
    let mut entries = Vec::with_capacity(children.len() / 2);
    let mut iter = children.into_iter();
    while let (Some(key), Some(value)) = (iter.next(), iter.next()) {
        entries.push((key, value));
    }
    entries
}
