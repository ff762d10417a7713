use std::io::{Read, Seek};

use crate::flt::cursor::{ReadBe, StreamCursor};
use crate::flt::opcode::CONTINUATION_OPCODE;
use crate::flt::{FltError, Result};

/// Record body reassembled from a primary record and its continuations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
	/// Concatenated bodies, record headers excluded.
	pub bytes: Vec<u8>,
	/// File offset of the first body byte.
	pub start: u64,
	/// Number of continuation records appended.
	pub continuations: u32,
}

impl Chunk {
	/// Body length in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return `true` when the body is empty.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}
}

/// Read the body of a length-prefixed record whose length field has just been consumed.
///
/// With `chunked` set, every directly following continuation record is consumed
/// and its body appended. The stream is left at the start of the next real record.
pub fn read_body<R: Read + Seek>(stream: &mut StreamCursor<R>, name: &'static str, declared: u16, chunked: bool) -> Result<Chunk> {
	let start = stream.position();
	let mut bytes = stream.read_bytes(body_len(name, declared)?)?;
	let mut continuations = 0_u32;

	if chunked {
		while stream.peek_opcode()? == Some(CONTINUATION_OPCODE) {
			stream.skip(2)?;
			let len = stream.read_u16()?;
			let body = body_len("continuation", len)?;
			let tail = stream.read_bytes(body)?;
			bytes.extend_from_slice(&tail);
			continuations += 1;
		}
	}

	if continuations > 0 {
		tracing::trace!(record = name, continuations, total = bytes.len(), "reassembled chunked record");
	}

	Ok(Chunk { bytes, start, continuations })
}

fn body_len(name: &'static str, declared: u16) -> Result<usize> {
	if declared < 4 {
		return Err(FltError::RecordSizeMismatch {
			name,
			expected: 4,
			actual: declared,
		});
	}
	Ok(usize::from(declared - 4))
}

#[cfg(test)]
mod tests;
