//! Decoding a stream in pieces must agree with decoding it in one shot.

use bytes::Bytes;
use resp_dissect::{Decoder, Node, ParseCursor, Reassembler, ResumeRequest};

const STREAM: &[u8] = b"+OK\r\n\
*3\r\n$3\r\nSET\r\n$3\r\nkey\r\n$13\r\n{\"a\":1,\"b\":2}\r\n\
%2\r\n+first\r\n*2\r\n:1\r\n,2.5\r\n+second\r\n~1\r\n#t\r\n\
|1\r\n+ttl\r\n:3600\r\n\
$-1\r\n\
=9\r\ntxt:hello\r\n\
>2\r\n+message\r\n$5\r\nhello\r\n\
(123456789012345678901234567890\r\n\
_\r\n";

fn one_shot() -> Vec<Node> {
    let result = Decoder::default().decode(STREAM);
    assert!(result.is_complete());
    result.frames
}

#[test]
fn two_pieces_through_reassembler() {
    let expected = one_shot();
    for split in 0..=STREAM.len() {
        let mut reassembler = Reassembler::new(Decoder::default());
        let mut frames = reassembler.push(&STREAM[..split]).unwrap();
        frames.extend(reassembler.push(&STREAM[split..]).unwrap());
        assert_eq!(frames, expected, "split at {}", split);
        assert_eq!(reassembler.pending_len(), 0);
        assert_eq!(reassembler.stream_offset(), STREAM.len());
    }
}

#[test]
fn byte_at_a_time_through_reassembler() {
    let mut reassembler = Reassembler::new(Decoder::default());
    let mut frames = Vec::new();
    for byte in STREAM.chunks(1) {
        frames.extend(reassembler.push(byte).unwrap());
    }
    assert_eq!(frames, one_shot());
}

#[test]
fn resume_from_requested_offset() {
    let expected = one_shot();
    let decoder = Decoder::default();
    let full = Bytes::from_static(STREAM);

    for split in 0..=STREAM.len() {
        let first = decoder.decode(full.slice(..split));
        let mut frames = first.frames;
        if let Some(request) = first.resume {
            let mut cursor = ParseCursor::at(full.clone(), request.resume_offset);
            let second = decoder.decode_stream(&mut cursor);
            assert!(second.is_complete());
            frames.extend(second.frames);
        }
        assert_eq!(frames, expected, "split at {}", split);
    }
}

#[test]
fn requested_bytes_never_overshoot() {
    let decoder = Decoder::default();
    for split in 0..STREAM.len() {
        let result = decoder.decode(&STREAM[..split]);
        let Some(ResumeRequest {
            min_additional_bytes: Some(missing),
            ..
        }) = result.resume
        else {
            continue;
        };
        assert!(missing > 0, "split at {}", split);
        assert!(split + missing <= STREAM.len(), "split at {}", split);
    }
}

#[test]
fn nested_incomplete_points_at_outermost_aggregate() {
    let data = b"+OK\r\n%1\r\n+k\r\n*2\r\n:1\r\n$4\r\nab";
    let result = Decoder::default().decode(&data[..]);
    assert_eq!(result.frames.len(), 1);
    assert_eq!(
        result.resume,
        Some(ResumeRequest {
            resume_offset: 5,
            min_additional_bytes: Some(2),
        })
    );
}
