//! Reporting decoded frames to an output sink.
//!
//! A sink receives one [`Entry`] per decoded node, depth-first in input
//! order, and one summary line per top-level frame. Nothing is reported
//! while a frame is still incomplete: callers report the frames of a
//! [`StreamDecode`](crate::StreamDecode) once they are final.

use std::fmt::{self, Write};
use std::ops::Range;

use crate::embedded::EmbeddedSummary;
use crate::options::DecoderOptions;
use crate::value::{DecodedValue, Node};

/// One reported node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Nesting depth; top-level frames are at 0.
    pub depth: usize,
    /// Byte range of the node.
    pub range: Range<usize>,
    /// Value kind, e.g. `"Bulk String"`.
    pub tag: &'static str,
    /// `"key"` or `"value"` for map and attribute members.
    pub label: Option<&'static str>,
    /// Human-readable value.
    pub display: String,
    /// The node was decoded from a truncated buffer.
    pub partial: bool,
    /// Embedded document summary, if one was recognized.
    pub embedded: Option<EmbeddedSummary>,
}

/// Receiver of decoded nodes.
pub trait Sink {
    /// Called once per node, parents before children.
    fn node(&mut self, entry: Entry);

    /// Called once per top-level frame with a one-line summary.
    fn summary(&mut self, _frame: usize, _text: &str) {}
}

impl Sink for Vec<Entry> {
    fn node(&mut self, entry: Entry) {
        self.push(entry);
    }
}

/// Report `frames` to `sink`.
pub fn report<S: Sink + ?Sized>(frames: &[Node], options: &DecoderOptions, sink: &mut S) {
    for (index, frame) in frames.iter().enumerate() {
        walk(frame, None, 0, options, sink);
        sink.summary(index, &summarize(frame, options));
    }
}

fn walk<S: Sink + ?Sized>(
    node: &Node,
    label: Option<&'static str>,
    depth: usize,
    options: &DecoderOptions,
    sink: &mut S,
) {
    sink.node(Entry {
        depth,
        range: node.range.clone(),
        tag: node.value.type_name(),
        label,
        display: display_value(&node.value, options),
        partial: node.partial,
        embedded: node.embedded.clone(),
    });
    if let Some(elements) = node.value.elements() {
        for child in elements {
            walk(child, None, depth + 1, options, sink);
        }
    } else if let Some(entries) = node.value.entries() {
        for (key, value) in entries {
            walk(key, Some("key"), depth + 1, options, sink);
            walk(value, Some("value"), depth + 1, options, sink);
        }
    }
}

/// Human-readable rendering of a single value (children not included).
pub fn display_value(value: &DecodedValue, options: &DecoderOptions) -> String {
    match value {
        DecodedValue::SimpleString(s)
        | DecodedValue::Error(s)
        | DecodedValue::BigNumber(s)
        | DecodedValue::Fragment(s) => s.escape_ascii().to_string(),
        DecodedValue::Integer(n) => itoa::Buffer::new().format(*n).to_owned(),
        DecodedValue::Double(d) => ryu::Buffer::new().format(*d).to_owned(),
        DecodedValue::Boolean(b) => b.to_string(),
        DecodedValue::Null | DecodedValue::BulkString(None) => "(nil)".to_owned(),
        DecodedValue::BulkString(Some(data)) | DecodedValue::BulkError(data) => {
            bulk_display(data, options)
        }
        DecodedValue::VerbatimString { encoding, payload } => format!(
            "{}:{}",
            encoding.escape_ascii(),
            bulk_display(payload, options)
        ),
        DecodedValue::Array(v) | DecodedValue::Set(v) | DecodedValue::Push(v) => {
            count_display(v.len(), "element", "elements")
        }
        DecodedValue::Map(v) | DecodedValue::Attribute(v) => {
            count_display(v.len(), "entry", "entries")
        }
        DecodedValue::Malformed(reason) => reason.to_string(),
    }
}

fn bulk_display(data: &[u8], options: &DecoderOptions) -> String {
    if data.len() <= options.display_threshold {
        data.escape_ascii().to_string()
    } else {
        format!("<{} bytes>", data.len())
    }
}

fn count_display(n: usize, one: &str, many: &str) -> String {
    let mut buf = itoa::Buffer::new();
    let noun = if n == 1 { one } else { many };
    format!("{} {}", buf.format(n), noun)
}

/// One-line summary of a top-level frame.
///
/// An array of strings (the shape of every client command) is shown as its
/// space-separated words, e.g. `SET key value`. Anything else is shown as
/// `<kind>: <value>`.
pub fn summarize(node: &Node, options: &DecoderOptions) -> String {
    let mut out = match command_words(&node.value, options) {
        Some(words) => words.join(" "),
        None => format!(
            "{}: {}",
            node.value.type_name(),
            display_value(&node.value, options)
        ),
    };
    if node.partial {
        out.push_str(" [partial]");
    }
    out
}

fn command_words(value: &DecodedValue, options: &DecoderOptions) -> Option<Vec<String>> {
    let DecodedValue::Array(elements) = value else {
        return None;
    };
    if elements.is_empty() {
        return None;
    }
    elements
        .iter()
        .map(|element| match &element.value {
            DecodedValue::BulkString(Some(word)) | DecodedValue::SimpleString(word) => {
                Some(bulk_display(word, options))
            }
            _ => None,
        })
        .collect()
}

/// A [`Sink`] that renders an indented text tree.
///
/// ```text
/// Array: 2 elements [0..22]
///   Bulk String: GET [4..13]
///   Bulk String: key [13..22]
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextTree {
    out: String,
    summaries: Vec<String>,
}

impl TextTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered tree.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Summary lines, one per top-level frame.
    pub fn summaries(&self) -> &[String] {
        &self.summaries
    }
}

impl Sink for TextTree {
    fn node(&mut self, entry: Entry) {
        for _ in 0..entry.depth {
            self.out.push_str("  ");
        }
        if let Some(label) = entry.label {
            let _ = write!(self.out, "{}: ", label);
        }
        let _ = write!(
            self.out,
            "{}: {} [{}..{}]",
            entry.tag, entry.display, entry.range.start, entry.range.end
        );
        if entry.partial {
            self.out.push_str(" [partial]");
        }
        if let Some(embedded) = &entry.embedded {
            let _ = write!(self.out, " ({})", embedded);
        }
        self.out.push('\n');
    }

    fn summary(&mut self, _frame: usize, text: &str) {
        self.summaries.push(text.to_owned());
    }
}

impl fmt::Display for TextTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.out)
    }
}
