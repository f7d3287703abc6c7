//! End-to-end decoding of whole buffers.

use bytes::Bytes;
use resp_dissect::{
    DEFAULT_MAX_DEPTH, DecodedValue, Decoder, DecoderOptions, MalformedReason, Node,
    ResumeRequest,
};

fn decode(data: &[u8]) -> resp_dissect::StreamDecode {
    Decoder::default().decode(Bytes::copy_from_slice(data))
}

fn nested_arrays(levels: usize, leaf: &[u8]) -> Vec<u8> {
    let mut data = b"*1\r\n".repeat(levels);
    data.extend_from_slice(leaf);
    data
}

/// Follow the first child of each aggregate down to `depth`.
fn descend(node: &Node, depth: usize) -> &Node {
    (0..depth).fold(node, |node, _| &node.value.elements().unwrap()[0])
}

#[test]
fn simple_string() {
    let result = decode(b"+OK\r\n");
    assert!(result.is_complete());
    assert_eq!(result.frames.len(), 1);
    assert_eq!(
        result.frames[0].value,
        DecodedValue::SimpleString(Bytes::from_static(b"OK"))
    );
    assert_eq!(result.frames[0].range, 0..5);
}

#[test]
fn null_bulk_string() {
    let result = decode(b"$-1\r\n");
    assert_eq!(result.resume, None);
    assert_eq!(result.frames[0].value, DecodedValue::BulkString(None));
    assert_eq!(result.frames[0].range, 0..5);
}

#[test]
fn truncated_bulk_string() {
    let result = decode(b"$5\r\nhel");
    assert!(result.frames.is_empty());
    assert_eq!(
        result.resume,
        Some(ResumeRequest {
            resume_offset: 0,
            min_additional_bytes: Some(2),
        })
    );
}

#[test]
fn array_of_integers() {
    let result = decode(b"*2\r\n:1\r\n:2\r\n");
    let elements = result.frames[0].value.elements().unwrap();
    let values: Vec<_> = elements.iter().map(|e| e.value.as_integer()).collect();
    assert_eq!(values, vec![Some(1), Some(2)]);
    assert_eq!(result.frames[0].range, 0..12);
}

#[test]
fn map_with_one_entry() {
    let result = decode(b"%1\r\n+a\r\n+b\r\n");
    let entries = result.frames[0].value.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0.value.as_bytes(), Some(&b"a"[..]));
    assert_eq!(entries[0].1.value.as_bytes(), Some(&b"b"[..]));
}

#[test]
fn recursion_limit_at_thirty_first_level() {
    let data = nested_arrays(32, b":1\r\n");
    let result = decode(&data);
    let outer = &result.frames[0];

    for depth in 0..DEFAULT_MAX_DEPTH {
        assert!(descend(outer, depth).value.elements().is_some(), "depth {}", depth);
    }
    let too_deep = descend(outer, DEFAULT_MAX_DEPTH);
    assert_eq!(
        too_deep.value,
        DecodedValue::Malformed(MalformedReason::RecursionTooDeep)
    );
    assert_eq!(too_deep.range, 120..124);

    // The outer frame ends after the too-deep header; the bytes below it are
    // not part of it.
    assert_eq!(outer.range, 0..124);
    assert!(result.is_complete());
    assert_eq!(result.frames[1].range, 124..132);
}

#[test]
fn depth_limit_boundary() {
    // Thirty nested aggregates decode fully.
    let data = nested_arrays(30, b":1\r\n");
    let result = decode(&data);
    assert_eq!(result.frames.len(), 1);
    assert_eq!(
        descend(&result.frames[0], 30).value,
        DecodedValue::Integer(1)
    );

    // A thirty-first with a nonzero count is too deep.
    let data = nested_arrays(31, b":1\r\n");
    let result = decode(&data);
    assert_eq!(
        descend(&result.frames[0], 30).value.malformed_reason(),
        Some(MalformedReason::RecursionTooDeep)
    );

    // A thirty-first with a zero count has no children to descend into.
    let data = nested_arrays(30, b"*0\r\n");
    let result = decode(&data);
    assert_eq!(
        descend(&result.frames[0], 30).value,
        DecodedValue::Array(vec![])
    );
}

#[test]
fn null_and_empty_aggregates() {
    for sigil in [b'*', b'~', b'>', b'%', b'|'] {
        let null = decode(&[sigil, b'-', b'1', b'\r', b'\n']);
        assert!(null.frames[0].value.is_null(), "{}", sigil as char);
        assert_eq!(null.frames[0].range, 0..5);

        let empty = decode(&[sigil, b'0', b'\r', b'\n']);
        let value = &empty.frames[0].value;
        let children = value
            .elements()
            .map(<[Node]>::len)
            .or(value.entries().map(<[(Node, Node)]>::len));
        assert_eq!(children, Some(0), "{}", sigil as char);
    }
}

#[test]
fn child_count_matches_header() {
    for n in 0..=30usize {
        let mut data = format!("*{}\r\n", n).into_bytes();
        for i in 0..n {
            data.extend_from_slice(format!(":{}\r\n", i).as_bytes());
        }
        let result = decode(&data);
        assert!(result.is_complete());
        assert_eq!(result.frames[0].value.elements().unwrap().len(), n);

        let mut data = format!("%{}\r\n", n).into_bytes();
        for i in 0..n {
            data.extend_from_slice(format!("+k{}\r\n:{}\r\n", i, i).as_bytes());
        }
        let result = decode(&data);
        assert_eq!(result.frames[0].value.entries().unwrap().len(), n);
    }
}

fn collect_ranges(node: &Node, out: &mut Vec<(std::ops::Range<usize>, usize)>, depth: usize) {
    out.push((node.range.clone(), depth));
    if let Some(elements) = node.value.elements() {
        for child in elements {
            collect_ranges(child, out, depth + 1);
        }
    }
    if let Some(entries) = node.value.entries() {
        for (key, value) in entries {
            collect_ranges(key, out, depth + 1);
            collect_ranges(value, out, depth + 1);
        }
    }
}

#[test]
fn sibling_ranges_tile_the_input() {
    let data: &[u8] = b"+OK\r\n*3\r\n$3\r\nSET\r\n%1\r\n:1\r\n#t\r\n,1.5\r\n\
        _\r\n(123\r\n!3\r\nbad\r\n=7\r\ntxt:abc\r\n";
    let result = decode(data);
    assert!(result.is_complete());

    let mut cursor = 0;
    for frame in &result.frames {
        assert_eq!(frame.range.start, cursor);
        cursor = frame.range.end;
    }
    assert_eq!(cursor, data.len());

    // Children tile their parent after the header line.
    let mut ranges = Vec::new();
    collect_ranges(&result.frames[1], &mut ranges, 0);
    assert_eq!(
        ranges,
        vec![
            (5..36, 0),
            (9..18, 1),
            (18..30, 1),
            (22..26, 2),
            (26..30, 2),
            (30..36, 1),
        ]
    );
}

#[test]
fn every_sigil_is_decoded() {
    let cases: [(&[u8], &str); 15] = [
        (b"+s\r\n", "Simple String"),
        (b"-ERR x\r\n", "Error"),
        (b":1\r\n", "Integer"),
        (b",2.5\r\n", "Double"),
        (b"(99\r\n", "Big Number"),
        (b"#f\r\n", "Boolean"),
        (b"_\r\n", "Null"),
        (b"$1\r\na\r\n", "Bulk String"),
        (b"!1\r\na\r\n", "Bulk Error"),
        (b"=5\r\ntxt:a\r\n", "Verbatim String"),
        (b"*0\r\n", "Array"),
        (b"~0\r\n", "Set"),
        (b">0\r\n", "Push"),
        (b"%0\r\n", "Map"),
        (b"|0\r\n", "Attribute"),
    ];
    for (data, tag) in cases {
        let result = decode(data);
        assert!(result.is_complete());
        assert_eq!(result.frames.len(), 1, "{:?}", data);
        assert_eq!(result.frames[0].value.type_name(), tag);
        assert_eq!(result.frames[0].range, 0..data.len());
    }
}

#[test]
fn malformed_frames_do_not_stop_the_stream() {
    let result = decode(b"#x\r\n\r\n@hello\r\n$abc\r\n:1\r\n");
    let values: Vec<_> = result.frames.iter().map(|f| &f.value).collect();
    assert_eq!(
        values,
        vec![
            &DecodedValue::Malformed(MalformedReason::InvalidBoolean),
            &DecodedValue::Malformed(MalformedReason::EmptyLine),
            &DecodedValue::Fragment(Bytes::from_static(b"@hello")),
            &DecodedValue::Malformed(MalformedReason::InvalidLength),
            &DecodedValue::Integer(1),
        ]
    );
}

#[test]
fn lenient_numbers() {
    let result = decode(b":12abc\r\n,not-a-double\r\n");
    assert_eq!(result.frames[0].value, DecodedValue::Integer(0));
    assert_eq!(result.frames[1].value, DecodedValue::Double(0.0));
}

#[test]
fn partial_mode_consumes_to_end() {
    let decoder = Decoder::new(DecoderOptions::new().enable_reassembly(false));
    let result = decoder.decode(&b":1\r\n*2\r\n$5\r\nhel"[..]);
    assert!(result.is_complete());
    assert_eq!(result.frames.len(), 2);

    let array = &result.frames[1];
    assert!(array.partial);
    assert_eq!(array.range, 4..15);
    let elements = array.value.elements().unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].value.as_bytes(), Some(&b"hel"[..]));
    assert!(elements[0].partial);
}

#[test]
fn frame_range_reproduces_frame() {
    let data: &[u8] = b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n\
        %1\r\n+a\r\n~2\r\n:1\r\n(-5\r\n=6\r\nmkd:hi\r\n";
    let result = decode(data);
    assert_eq!(result.frames.len(), 3);
    for frame in &result.frames {
        let mut alone = decode(&data[frame.range.clone()]);
        assert!(alone.is_complete());
        assert_eq!(alone.frames.len(), 1);
        alone.frames[0].shift(frame.range.start);
        assert_eq!(&alone.frames[0], frame);
    }
}
