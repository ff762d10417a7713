//! Shared test helpers for workspace crates.
//!
//! [`RecordWriter`] assembles big-endian record streams; [`Fixture`] puts
//! them on disk in a temporary directory so path resolution can be exercised.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Header field values written by [`RecordWriter::header_with`].
#[derive(Debug, Clone)]
pub struct HeaderFields {
	/// Database identifier (at most 8 bytes).
	pub name: String,
	/// Raw format revision.
	pub revision: i32,
	/// Declared header length; bytes past 324 are zero filled.
	pub length: u16,
	/// Unit multiplier (must be 1 to validate).
	pub multiplier: u16,
	/// Raw coordinate units.
	pub units: u8,
	/// Raw projection.
	pub projection: i32,
	/// Raw vertex storage type.
	pub storage: u16,
	/// Raw database origin.
	pub origin: i32,
	/// Raw earth ellipsoid model.
	pub ellipsoid: i32,
}

impl Default for HeaderFields {
	fn default() -> Self {
		Self {
			name: "db".to_owned(),
			revision: 1640,
			length: 324,
			multiplier: 1,
			units: 0,
			projection: 0,
			storage: 1,
			origin: 100,
			ellipsoid: 0,
		}
	}
}

/// Field-by-field big-endian record body builder.
#[derive(Debug, Clone, Default)]
pub struct Body {
	buf: Vec<u8>,
}

impl Body {
	/// Start an empty body.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a byte.
	pub fn u8(mut self, value: u8) -> Self {
		self.buf.push(value);
		self
	}

	/// Append a big-endian `u16`.
	pub fn u16(mut self, value: u16) -> Self {
		self.buf.extend_from_slice(&value.to_be_bytes());
		self
	}

	/// Append a big-endian `i16`.
	pub fn i16(mut self, value: i16) -> Self {
		self.buf.extend_from_slice(&value.to_be_bytes());
		self
	}

	/// Append a big-endian `u32`.
	pub fn u32(mut self, value: u32) -> Self {
		self.buf.extend_from_slice(&value.to_be_bytes());
		self
	}

	/// Append a big-endian `i32`.
	pub fn i32(mut self, value: i32) -> Self {
		self.buf.extend_from_slice(&value.to_be_bytes());
		self
	}

	/// Append a big-endian `f32`.
	pub fn f32(mut self, value: f32) -> Self {
		self.buf.extend_from_slice(&value.to_be_bytes());
		self
	}

	/// Append a big-endian `f64`.
	pub fn f64(mut self, value: f64) -> Self {
		self.buf.extend_from_slice(&value.to_be_bytes());
		self
	}

	/// Append `n` zero bytes.
	pub fn zeros(mut self, n: usize) -> Self {
		self.buf.resize(self.buf.len() + n, 0);
		self
	}

	/// Append `text` NUL-padded (or cut) to `width` bytes.
	pub fn string(mut self, text: &str, width: usize) -> Self {
		let mut field = text.as_bytes().to_vec();
		field.resize(width, 0);
		self.buf.extend_from_slice(&field);
		self
	}

	/// Append raw bytes.
	pub fn bytes(mut self, raw: &[u8]) -> Self {
		self.buf.extend_from_slice(raw);
		self
	}

	/// Current body length.
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// Return `true` when nothing was appended.
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Finish the body.
	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

/// Big-endian record stream writer.
#[derive(Debug, Clone, Default)]
pub struct RecordWriter {
	buf: Vec<u8>,
}

impl RecordWriter {
	/// Start an empty stream.
	pub fn new() -> Self {
		Self::default()
	}

	/// Start a stream with a default header of `revision`.
	pub fn with_header(revision: i32) -> Self {
		let mut writer = Self::new();
		writer.header(revision);
		writer
	}

	/// Append a valid 324-byte header record.
	pub fn header(&mut self, revision: i32) -> &mut Self {
		self.header_with(&HeaderFields {
			revision,
			..HeaderFields::default()
		})
	}

	/// Append a header record with explicit field values.
	pub fn header_with(&mut self, fields: &HeaderFields) -> &mut Self {
		let mut record = vec![0_u8; usize::from(fields.length.max(324))];
		put(&mut record, 0, &1_i16.to_be_bytes());
		put(&mut record, 2, &fields.length.to_be_bytes());
		let mut name = fields.name.as_bytes().to_vec();
		name.resize(8, 0);
		put(&mut record, 4, &name);
		put(&mut record, 12, &fields.revision.to_be_bytes());
		put(&mut record, 60, &fields.multiplier.to_be_bytes());
		record[62] = fields.units;
		put(&mut record, 92, &fields.projection.to_be_bytes());
		put(&mut record, 126, &fields.storage.to_be_bytes());
		put(&mut record, 128, &fields.origin.to_be_bytes());
		put(&mut record, 268, &fields.ellipsoid.to_be_bytes());
		record.truncate(usize::from(fields.length.max(4)));
		self.buf.extend_from_slice(&record);
		self
	}

	/// Append a record whose length field is `body.len() + 4`.
	pub fn record(&mut self, opcode: i16, body: &[u8]) -> &mut Self {
		let len = u16::try_from(body.len() + 4).unwrap_or(u16::MAX);
		self.record_with_len(opcode, len, body)
	}

	/// Append a record with an explicit length field.
	pub fn record_with_len(&mut self, opcode: i16, len: u16, body: &[u8]) -> &mut Self {
		self.buf.extend_from_slice(&opcode.to_be_bytes());
		self.buf.extend_from_slice(&len.to_be_bytes());
		self.buf.extend_from_slice(body);
		self
	}

	/// Append a fixed record, zero filling the body to `size - 4` bytes.
	pub fn fixed(&mut self, opcode: i16, size: u16, body: &[u8]) -> &mut Self {
		let mut padded = body.to_vec();
		padded.resize(usize::from(size.saturating_sub(4)), 0);
		self.record_with_len(opcode, size, &padded)
	}

	/// Append raw bytes.
	pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.buf.extend_from_slice(bytes);
		self
	}

	/// Append a bare padding opcode.
	pub fn padding(&mut self) -> &mut Self {
		self.raw(&0_i16.to_be_bytes())
	}

	/// Append a push record.
	pub fn push(&mut self) -> &mut Self {
		self.record(10, &[])
	}

	/// Append a pop record.
	pub fn pop(&mut self) -> &mut Self {
		self.record(11, &[])
	}

	/// Append a push subface record.
	pub fn push_subface(&mut self) -> &mut Self {
		self.record(19, &[])
	}

	/// Append a pop subface record.
	pub fn pop_subface(&mut self) -> &mut Self {
		self.record(20, &[])
	}

	/// Append a push extension record.
	pub fn push_extension(&mut self, vertex_reference: u16) -> &mut Self {
		self.record(21, &Body::new().zeros(18).u16(vertex_reference).finish())
	}

	/// Append a pop extension record.
	pub fn pop_extension(&mut self, vertex_reference: u16) -> &mut Self {
		self.record(22, &Body::new().zeros(18).u16(vertex_reference).finish())
	}

	/// Append a push attribute record.
	pub fn push_attribute(&mut self) -> &mut Self {
		self.record(122, &[0; 4])
	}

	/// Append a pop attribute record.
	pub fn pop_attribute(&mut self) -> &mut Self {
		self.record(123, &[])
	}

	/// Append a 44-byte group record.
	pub fn group(&mut self, name: &str) -> &mut Self {
		self.fixed(2, 44, &Body::new().string(name, 8).finish())
	}

	/// Append a 32-byte group record without the loop block.
	pub fn group_without_loop(&mut self, name: &str) -> &mut Self {
		self.fixed(2, 32, &Body::new().string(name, 8).finish())
	}

	/// Append an object record.
	pub fn object(&mut self, name: &str) -> &mut Self {
		self.fixed(4, 28, &Body::new().string(name, 8).finish())
	}

	/// Append a face record with a texture pattern index (`-1` for none).
	pub fn face(&mut self, name: &str, texture: i16) -> &mut Self {
		let body = Body::new()
			.string(name, 8)
			.zeros(4)
			.i16(0)
			.u8(0)
			.u8(0)
			.u16(0)
			.u16(0)
			.zeros(1)
			.u8(0)
			.i16(-1)
			.i16(texture)
			.i16(-1)
			.finish();
		self.fixed(5, 80, &body)
	}

	/// Append a comment record holding `text`.
	pub fn comment(&mut self, text: &[u8]) -> &mut Self {
		self.record(31, text)
	}

	/// Append a continuation record holding `body`.
	pub fn continuation(&mut self, body: &[u8]) -> &mut Self {
		self.record(23, body)
	}

	/// Append a vertex palette record declaring `total` palette bytes.
	pub fn vertex_palette(&mut self, total: u32) -> &mut Self {
		self.record(67, &total.to_be_bytes())
	}

	/// Append a 40-byte vertex-with-colour record.
	pub fn vertex(&mut self, position: [f64; 3]) -> &mut Self {
		let body = Body::new()
			.u16(0)
			.u16(0)
			.f64(position[0])
			.f64(position[1])
			.f64(position[2])
			.u32(0xFFFF_FFFF)
			.u32(0)
			.finish();
		self.record(68, &body)
	}

	/// Append a vertex list record.
	pub fn vertex_list(&mut self, offsets: &[u32]) -> &mut Self {
		let body: Vec<u8> = offsets.iter().flat_map(|offset| offset.to_be_bytes()).collect();
		self.record(72, &body)
	}

	/// Append a translate record.
	pub fn translate(&mut self, from: [f64; 3], delta: [f64; 3]) -> &mut Self {
		let body = Body::new().zeros(4).f64(from[0]).f64(from[1]).f64(from[2]).f64(delta[0]).f64(delta[1]).f64(delta[2]).finish();
		self.record(78, &body)
	}

	/// Append a scale record centred on the origin.
	pub fn scale(&mut self, factors: [f32; 3]) -> &mut Self {
		let body = Body::new().zeros(4).zeros(24).f32(factors[0]).f32(factors[1]).f32(factors[2]).zeros(4).finish();
		self.record(79, &body)
	}

	/// Append an external reference record.
	pub fn external_reference(&mut self, path: &str) -> &mut Self {
		self.fixed(63, 216, &Body::new().string(path, 200).finish())
	}

	/// Append a texture palette record.
	pub fn texture_palette(&mut self, path: &str, pattern: u32) -> &mut Self {
		let body = Body::new().string(path, 200).u32(pattern).u32(0).u32(0).finish();
		self.record(64, &body)
	}

	/// Append an instance definition record.
	pub fn instance_definition(&mut self, id: u16) -> &mut Self {
		self.record(62, &Body::new().zeros(2).u16(id).finish())
	}

	/// Append an instance reference record.
	pub fn instance_reference(&mut self, id: u16) -> &mut Self {
		self.record(61, &Body::new().zeros(2).u16(id).finish())
	}

	/// Bytes written so far.
	pub fn bytes(&self) -> &[u8] {
		&self.buf
	}

	/// Length written so far.
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// Return `true` when nothing was written.
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Finish the stream.
	pub fn finish(&self) -> Vec<u8> {
		self.buf.clone()
	}
}

fn put(record: &mut [u8], at: usize, bytes: &[u8]) {
	if let Some(slot) = record.get_mut(at..at + bytes.len()) {
		slot.copy_from_slice(bytes);
	}
}

/// Temporary directory holding database fixtures.
pub struct Fixture {
	dir: TempDir,
}

impl Fixture {
	/// Create an empty fixture directory.
	pub fn new() -> io::Result<Self> {
		Ok(Self { dir: tempfile::tempdir()? })
	}

	/// Fixture directory.
	pub fn dir(&self) -> &Path {
		self.dir.path()
	}

	/// Path of `name` inside the fixture directory.
	pub fn path(&self, name: &str) -> PathBuf {
		self.dir.path().join(name)
	}

	/// Write `bytes` to `name`, creating parent directories.
	pub fn write(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
		let path = self.path(name);
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::write(&path, bytes)?;
		Ok(path)
	}
}
