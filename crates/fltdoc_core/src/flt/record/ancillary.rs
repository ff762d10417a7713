use crate::flt::cursor::{ChunkCursor, ReadBe, trim_nul};
use crate::flt::record::require;
use crate::flt::{Opcode, Result};

/// Comment record (opcode 31).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
	/// Comment text, all continuations joined.
	pub text: String,
}

impl Comment {
	/// Take the whole reassembled body as text.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Self {
		Self { text: r.read_rest_string() }
	}
}

/// Long ID record (opcode 33): replaces the 8-byte ID of its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongId {
	/// Identifier text.
	pub id: String,
}

impl LongId {
	/// Take the whole body as the identifier.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Self {
		Self { id: r.read_rest_string() }
	}
}

/// Record kept as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueRecord {
	/// Record body.
	pub data: Vec<u8>,
}

impl OpaqueRecord {
	/// Take the whole body.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Self {
		Self { data: r.read_rest().to_vec() }
	}
}

/// Indexed string record (opcode 132).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedString {
	/// String index.
	pub index: u32,
	/// String text.
	pub text: String,
}

impl IndexedString {
	/// Parse the index and the text after it.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let index = r.read_u32()?;
		Ok(Self {
			index,
			text: r.read_rest_string(),
		})
	}
}

/// Extension GUID palette record (opcode 148).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionGuidPalette {
	/// Palette index.
	pub index: u32,
	/// GUID text.
	pub guid: String,
}

impl ExtensionGuidPalette {
	/// Parse the palette entry.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self {
			index: r.read_u32()?,
			guid: r.read_string(40)?,
		})
	}
}

/// Typed value of an extension field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
	/// Opcode 149.
	Bool(bool),
	/// Opcode 150.
	Int(i32),
	/// Opcode 151.
	Float(f32),
	/// Opcode 152.
	Double(f64),
	/// Opcode 153.
	String(String),
	/// Opcode 154.
	Xml(String),
}

impl FieldValue {
	/// Opcode of the record carrying this value.
	pub fn opcode(&self) -> Opcode {
		match self {
			Self::Bool(_) => Opcode::ExtensionFieldBool,
			Self::Int(_) => Opcode::ExtensionFieldInt,
			Self::Float(_) => Opcode::ExtensionFieldFloat,
			Self::Double(_) => Opcode::ExtensionFieldDouble,
			Self::String(_) => Opcode::ExtensionFieldString,
			Self::Xml(_) => Opcode::ExtensionFieldXmlString,
		}
	}
}

/// Extension field record (opcodes 149-154).
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionField {
	/// Index into the extension GUID palette.
	pub guid_index: u32,
	/// Field value.
	pub value: FieldValue,
}

impl ExtensionField {
	/// Parse a boolean field.
	pub fn parse_bool(r: &mut impl ReadBe) -> Result<Self> {
		let guid_index = r.read_u32()?;
		let value = FieldValue::Bool(r.read_u32()? != 0);
		Ok(Self { guid_index, value })
	}

	/// Parse an integer field.
	pub fn parse_int(r: &mut impl ReadBe) -> Result<Self> {
		let guid_index = r.read_u32()?;
		let value = FieldValue::Int(r.read_i32()?);
		Ok(Self { guid_index, value })
	}

	/// Parse a float field.
	pub fn parse_float(r: &mut impl ReadBe) -> Result<Self> {
		let guid_index = r.read_u32()?;
		let value = FieldValue::Float(r.read_f32()?);
		Ok(Self { guid_index, value })
	}

	/// Parse a double field.
	pub fn parse_double(r: &mut impl ReadBe) -> Result<Self> {
		let guid_index = r.read_u32()?;
		let value = FieldValue::Double(r.read_f64()?);
		Ok(Self { guid_index, value })
	}

	/// Parse a string or XML string field, across continuations.
	pub fn parse_string(r: &mut ChunkCursor<'_>, xml: bool) -> Result<Self> {
		let name = if xml { "extension field XML string" } else { "extension field string" };
		let guid_index = r.read_u32()?;
		let length = r.read_u32()?;
		require(r, name, u64::from(length))?;
		let text = trim_nul(&r.read_bytes(length as usize)?);
		let value = if xml { FieldValue::Xml(text) } else { FieldValue::String(text) };
		Ok(Self { guid_index, value })
	}
}
