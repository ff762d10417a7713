use std::io::Cursor as IoCursor;

use crate::flt::cursor::{ChunkCursor, ReadBe, StreamCursor, trim_nul};
use crate::flt::FltError;

#[test]
fn stream_reads_big_endian_scalars() {
	let mut bytes = Vec::new();
	bytes.extend_from_slice(&0x0102_u16.to_be_bytes());
	bytes.extend_from_slice(&(-2_i16).to_be_bytes());
	bytes.extend_from_slice(&0xDEAD_BEEF_u32.to_be_bytes());
	bytes.extend_from_slice(&1.5_f32.to_be_bytes());
	bytes.extend_from_slice(&(-0.25_f64).to_be_bytes());

	let mut cursor = StreamCursor::new(IoCursor::new(bytes)).expect("cursor opens");
	assert_eq!(cursor.len(), 20);
	assert_eq!(cursor.read_u16().expect("u16"), 0x0102);
	assert_eq!(cursor.read_i16().expect("i16"), -2);
	assert_eq!(cursor.read_u32().expect("u32"), 0xDEAD_BEEF);
	assert_eq!(cursor.read_f32().expect("f32"), 1.5);
	assert_eq!(cursor.read_f64().expect("f64"), -0.25);
	assert_eq!(cursor.position(), 20);
	assert_eq!(cursor.read_opcode().expect("eof is clean"), None);
}

#[test]
fn stream_over_read_is_truncated_record() {
	let mut cursor = StreamCursor::new(IoCursor::new(vec![0_u8; 3])).expect("cursor opens");
	cursor.skip(2).expect("skip within bound");
	let err = cursor.read_u16().expect_err("crosses end");
	assert!(matches!(err, FltError::TruncatedRecord { at: 2, need: 2, remaining: 1 }));
}

#[test]
fn stream_skip_rewinds_and_peek_does_not_consume() {
	let bytes = [0x00, 0x17, 0x00, 0x08, 0xAA, 0xBB];
	let mut cursor = StreamCursor::new(IoCursor::new(bytes.to_vec())).expect("cursor opens");
	assert_eq!(cursor.peek_opcode().expect("peek"), Some(23));
	assert_eq!(cursor.position(), 0);
	assert_eq!(cursor.read_opcode().expect("read"), Some(23));
	cursor.skip(2).expect("forward skip");
	assert_eq!(cursor.read_u8().expect("u8"), 0xAA);
	cursor.skip(-3).expect("rewind");
	assert_eq!(cursor.read_u16().expect("u16"), 0x0008);
	assert!(cursor.skip(-10).is_err(), "rewind before start rejected");
}

#[test]
fn strings_trim_trailing_nul_only() {
	assert_eq!(trim_nul(b"db\0\0\0\0\0\0"), "db");
	assert_eq!(trim_nul(b"a\0b\0"), "a\0b");
	assert_eq!(trim_nul(b"\0\0"), "");

	let mut chunk = ChunkCursor::new(b"name\0\0\0\0tail", 100);
	assert_eq!(chunk.read_string(8).expect("string"), "name");
	assert_eq!(chunk.position(), 108);
	assert_eq!(chunk.read_rest_string(), "tail");
	assert_eq!(chunk.remaining(), 0);
}

#[test]
fn chunk_over_read_reports_file_offset() {
	let mut chunk = ChunkCursor::new(&[1, 2, 3], 40);
	chunk.skip(1).expect("skip");
	let err = chunk.read_u32().expect_err("crosses bound");
	assert!(matches!(err, FltError::TruncatedRecord { at: 41, need: 4, remaining: 2 }));
}

#[test]
fn matrix_reads_row_major() {
	let mut bytes = Vec::new();
	for value in 0..16 {
		bytes.extend_from_slice(&(value as f32).to_be_bytes());
	}
	let mut chunk = ChunkCursor::new(&bytes, 0);
	let matrix = chunk.read_matrix_f32().expect("matrix");
	assert_eq!(matrix[0], [0.0, 1.0, 2.0, 3.0]);
	assert_eq!(matrix[3][1], 13.0);
}

#[test]
fn oversized_byte_reads_fail_before_allocating() {
	let mut chunk = ChunkCursor::new(&[7; 8], 12);
	chunk.skip(2).expect("skip");
	let err = chunk.read_string(u32::MAX as usize).expect_err("beyond bound");
	assert!(matches!(err, FltError::TruncatedRecord { at: 14, need, remaining: 6 } if need == u64::from(u32::MAX)));
	assert_eq!(chunk.position(), 14);

	let mut stream = StreamCursor::new(IoCursor::new(vec![0_u8; 4])).expect("cursor opens");
	let err = stream.read_bytes(usize::MAX).expect_err("beyond source");
	assert!(matches!(err, FltError::TruncatedRecord { at: 0, remaining: 4, .. }));
	assert_eq!(stream.available(), 4);
}
