use std::io::{self, Read, Seek, SeekFrom};

use crate::flt::{FltError, Result};

/// Big-endian primitive reads shared by the stream and chunk cursors.
///
/// Record decoders are written once against this trait and never know
/// whether they read the live file or a reassembled chunk.
pub trait ReadBe {
	/// Fill `buf` completely or fail with [`FltError::TruncatedRecord`].
	fn read_into(&mut self, buf: &mut [u8]) -> Result<()>;

	/// Move the cursor by `n` bytes; negative values rewind.
	fn skip(&mut self, n: i64) -> Result<()>;

	/// Current file-relative byte offset.
	fn position(&self) -> u64;

	/// Bytes left before the cursor's bound.
	fn available(&self) -> u64;

	/// Read a fixed number of bytes into an array.
	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut out = [0_u8; N];
		self.read_into(&mut out)?;
		Ok(out)
	}

	/// Read `n` raw bytes. The bound is checked before the buffer is allocated.
	fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
		if n as u64 > self.available() {
			return Err(FltError::TruncatedRecord {
				at: self.position(),
				need: n as u64,
				remaining: self.available(),
			});
		}
		let mut out = vec![0_u8; n];
		self.read_into(&mut out)?;
		Ok(out)
	}

	/// Read a `u8`.
	fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read an `i8`.
	fn read_i8(&mut self) -> Result<i8> {
		Ok(i8::from_be_bytes(self.read_array()?))
	}

	/// Read a one-byte boolean (any non-zero byte is `true`).
	fn read_bool(&mut self) -> Result<bool> {
		Ok(self.read_u8()? != 0)
	}

	/// Read a big-endian `u16`.
	fn read_u16(&mut self) -> Result<u16> {
		Ok(u16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i16`.
	fn read_i16(&mut self) -> Result<i16> {
		Ok(i16::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u32`.
	fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i32`.
	fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian IEEE `f32`.
	fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian IEEE `f64`.
	fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_be_bytes(self.read_array()?))
	}

	/// Read a fixed-width NUL-padded string, trimming trailing NUL bytes.
	fn read_string(&mut self, n: usize) -> Result<String> {
		let raw = self.read_bytes(n)?;
		Ok(trim_nul(&raw))
	}

	/// Read three `f64` values.
	fn read_vec3d(&mut self) -> Result<[f64; 3]> {
		Ok([self.read_f64()?, self.read_f64()?, self.read_f64()?])
	}

	/// Read three `f32` values.
	fn read_vec3f(&mut self) -> Result<[f32; 3]> {
		Ok([self.read_f32()?, self.read_f32()?, self.read_f32()?])
	}

	/// Read a row-major 4x4 `f32` matrix.
	fn read_matrix_f32(&mut self) -> Result<[[f32; 4]; 4]> {
		let mut out = [[0_f32; 4]; 4];
		for row in &mut out {
			for cell in row.iter_mut() {
				*cell = self.read_f32()?;
			}
		}
		Ok(out)
	}

	/// Read a row-major 4x4 `f64` matrix.
	fn read_matrix_f64(&mut self) -> Result<[[f64; 4]; 4]> {
		let mut out = [[0_f64; 4]; 4];
		for row in &mut out {
			for cell in row.iter_mut() {
				*cell = self.read_f64()?;
			}
		}
		Ok(out)
	}
}

/// Decode NUL-padded bytes, dropping trailing NUL bytes.
pub fn trim_nul(raw: &[u8]) -> String {
	let end = raw.iter().rposition(|byte| *byte != 0).map_or(0, |idx| idx + 1);
	String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Stream-mode cursor over a seekable byte source.
///
/// The source length is captured on construction, so over-reads are
/// reported before the source is touched.
pub struct StreamCursor<R> {
	inner: R,
	pos: u64,
	len: u64,
}

impl<R: Read + Seek> StreamCursor<R> {
	/// Wrap `inner`, recording its length and rewinding to offset 0.
	pub fn new(mut inner: R) -> Result<Self> {
		let len = inner.seek(SeekFrom::End(0))?;
		inner.seek(SeekFrom::Start(0))?;
		Ok(Self { inner, pos: 0, len })
	}

	/// Total source length in bytes.
	pub fn len(&self) -> u64 {
		self.len
	}

	/// Return `true` when the source is empty.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Bytes left between the cursor and the end of the source.
	pub fn remaining(&self) -> u64 {
		self.len.saturating_sub(self.pos)
	}

	/// Move to an absolute offset.
	pub fn seek_to(&mut self, pos: u64) -> Result<()> {
		if pos > self.len {
			return Err(FltError::TruncatedRecord {
				at: self.pos,
				need: pos - self.pos,
				remaining: self.remaining(),
			});
		}
		self.inner.seek(SeekFrom::Start(pos))?;
		self.pos = pos;
		Ok(())
	}

	/// Read the next opcode, or `None` at a clean end of stream.
	pub fn read_opcode(&mut self) -> Result<Option<i16>> {
		if self.remaining() == 0 {
			return Ok(None);
		}
		self.read_i16().map(Some)
	}

	/// Look at the next opcode without consuming it.
	pub fn peek_opcode(&mut self) -> Result<Option<i16>> {
		if self.remaining() < 2 {
			return Ok(None);
		}
		let opcode = self.read_i16()?;
		self.skip(-2)?;
		Ok(Some(opcode))
	}
}

impl<R: Read + Seek> ReadBe for StreamCursor<R> {
	fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
		let need = buf.len() as u64;
		if need > self.remaining() {
			return Err(FltError::TruncatedRecord {
				at: self.pos,
				need,
				remaining: self.remaining(),
			});
		}
		self.inner.read_exact(buf)?;
		self.pos += need;
		Ok(())
	}

	fn skip(&mut self, n: i64) -> Result<()> {
		let target = i128::from(self.pos) + i128::from(n);
		if target < 0 || target > i128::from(self.len) {
			return Err(FltError::TruncatedRecord {
				at: self.pos,
				need: n.unsigned_abs(),
				remaining: self.remaining(),
			});
		}

		if n >= 0 {
			let want = n as u64;
			let copied = io::copy(&mut (&mut self.inner).take(want), &mut io::sink())?;
			if copied != want {
				return Err(FltError::Io(io::Error::from(io::ErrorKind::UnexpectedEof)));
			}
		} else {
			self.inner.seek(SeekFrom::Current(n))?;
		}
		self.pos = target as u64;
		Ok(())
	}

	fn position(&self) -> u64 {
		self.pos
	}

	fn available(&self) -> u64 {
		self.remaining()
	}
}

/// Bounded-mode cursor over a reassembled in-memory chunk.
pub struct ChunkCursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	base: u64,
}

impl<'a> ChunkCursor<'a> {
	/// Create a cursor whose first byte sits at file offset `base`.
	pub fn new(bytes: &'a [u8], base: u64) -> Self {
		Self { bytes, pos: 0, base }
	}

	/// Bytes left in the chunk.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Consume and return every remaining byte.
	pub fn read_rest(&mut self) -> &'a [u8] {
		let rest = &self.bytes[self.pos..];
		self.pos = self.bytes.len();
		rest
	}

	/// Read every remaining byte as a NUL-trimmed string.
	pub fn read_rest_string(&mut self) -> String {
		trim_nul(self.read_rest())
	}

	fn overrun(&self, need: u64) -> FltError {
		FltError::TruncatedRecord {
			at: self.position(),
			need,
			remaining: self.remaining() as u64,
		}
	}
}

impl ReadBe for ChunkCursor<'_> {
	fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
		if buf.len() > self.remaining() {
			return Err(self.overrun(buf.len() as u64));
		}
		let end = self.pos + buf.len();
		buf.copy_from_slice(&self.bytes[self.pos..end]);
		self.pos = end;
		Ok(())
	}

	fn skip(&mut self, n: i64) -> Result<()> {
		let target = self.pos as i128 + i128::from(n);
		if target < 0 || target > self.bytes.len() as i128 {
			return Err(self.overrun(n.unsigned_abs()));
		}
		self.pos = target as usize;
		Ok(())
	}

	fn position(&self) -> u64 {
		self.base + self.pos as u64
	}

	fn available(&self) -> u64 {
		self.remaining() as u64
	}
}

#[cfg(test)]
mod tests;
