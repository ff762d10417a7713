use std::io::{Read, Seek};

use crate::flt::cursor::{ReadBe, StreamCursor};
use crate::flt::header::HEADER_LEN;
use crate::flt::{FltError, Header, Layout, Result, Warning};

/// Header validation outcome: the open stream positioned for dispatch.
pub struct Validated<R> {
	/// Stream positioned at [`Validated::resume`].
	pub stream: StreamCursor<R>,
	/// Decoded header.
	pub header: Header,
	/// Layout derived from the header revision.
	pub layout: Layout,
	/// Offset of the first record after the header.
	pub resume: u64,
	/// Recoverable anomalies found in the header.
	pub warnings: Vec<Warning>,
}

/// Validate file shape and header, leaving the stream at the first record.
pub fn validate<R: Read + Seek>(source: R) -> Result<Validated<R>> {
	let mut stream = StreamCursor::new(source)?;
	if stream.len() % 4 != 0 {
		return Err(FltError::MisalignedFile { size: stream.len() });
	}

	let opcode = stream.read_opcode()?;
	if opcode != Some(1) {
		return Err(FltError::NotThisFormat { opcode, length: None });
	}
	let length = stream.read_u16().map_err(|_| FltError::NotThisFormat { opcode, length: None })?;
	if length < HEADER_LEN {
		return Err(FltError::NotThisFormat { opcode, length: Some(length) });
	}

	let header = Header::parse(&mut stream)?;
	let layout = Layout::for_revision(header.revision);
	let mut warnings = Vec::new();

	if length != HEADER_LEN {
		if !layout.lenient_header {
			return Err(FltError::NotThisFormat { opcode, length: Some(length) });
		}
		tracing::warn!(
			revision = header.revision.raw(),
			length,
			expected = HEADER_LEN,
			"tolerating non-standard header length"
		);
		warnings.push(Warning::HeaderLength {
			revision: header.revision,
			length,
		});
		stream.seek_to(u64::from(length))?;
	}

	let resume = stream.position();
	tracing::debug!(name = %header.name, revision = header.revision.label(), resume, "header validated");

	Ok(Validated {
		stream,
		header,
		layout,
		resume,
		warnings,
	})
}

#[cfg(test)]
mod tests;
