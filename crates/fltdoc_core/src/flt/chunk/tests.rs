use std::io::Cursor as IoCursor;

use crate::flt::FltError;
use crate::flt::chunk::read_body;
use crate::flt::cursor::{ReadBe, StreamCursor};

fn record(opcode: i16, body: &[u8]) -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(&opcode.to_be_bytes());
	out.extend_from_slice(&((body.len() + 4) as u16).to_be_bytes());
	out.extend_from_slice(body);
	out
}

#[test]
fn appends_continuations_and_stops_at_next_record() {
	let mut bytes = record(31, b"abcd");
	bytes.extend(record(23, b"efgh"));
	bytes.extend(record(23, b"ij\0\0"));
	bytes.extend(record(10, &[]));

	let mut stream = StreamCursor::new(IoCursor::new(bytes)).expect("cursor opens");
	assert_eq!(stream.read_opcode().expect("opcode"), Some(31));
	let len = stream.read_u16().expect("length");
	let chunk = read_body(&mut stream, "comment", len, true).expect("chunk");

	assert_eq!(chunk.bytes, b"abcdefghij\0\0");
	assert_eq!(chunk.start, 4);
	assert_eq!(chunk.continuations, 2);
	assert_eq!(stream.read_opcode().expect("next"), Some(10));
}

#[test]
fn non_chunked_body_leaves_continuation_for_dispatch() {
	let mut bytes = record(33, b"long");
	bytes.extend(record(23, b"tail"));

	let mut stream = StreamCursor::new(IoCursor::new(bytes)).expect("cursor opens");
	stream.read_opcode().expect("opcode");
	let len = stream.read_u16().expect("length");
	let chunk = read_body(&mut stream, "long ID", len, false).expect("chunk");

	assert_eq!(chunk.bytes, b"long");
	assert_eq!(chunk.continuations, 0);
	assert_eq!(stream.peek_opcode().expect("peek"), Some(23));
}

#[test]
fn length_below_record_header_is_size_mismatch() {
	let bytes = vec![0x00, 0x1F, 0x00, 0x02];
	let mut stream = StreamCursor::new(IoCursor::new(bytes)).expect("cursor opens");
	stream.read_opcode().expect("opcode");
	let len = stream.read_u16().expect("length");
	let err = read_body(&mut stream, "comment", len, true).expect_err("too short");
	assert!(matches!(err, FltError::RecordSizeMismatch { name: "comment", expected: 4, actual: 2 }));
}

#[test]
fn truncated_continuation_body_is_reported() {
	let mut bytes = record(31, b"abcd");
	bytes.extend_from_slice(&23_i16.to_be_bytes());
	bytes.extend_from_slice(&40_u16.to_be_bytes());
	bytes.extend_from_slice(b"xy");

	let mut stream = StreamCursor::new(IoCursor::new(bytes)).expect("cursor opens");
	stream.read_opcode().expect("opcode");
	let len = stream.read_u16().expect("length");
	let err = read_body(&mut stream, "comment", len, true).expect_err("short tail");
	assert!(matches!(err, FltError::TruncatedRecord { need: 36, remaining: 2, .. }));
}
