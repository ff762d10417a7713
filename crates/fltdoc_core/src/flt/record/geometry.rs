use crate::flt::cursor::{ChunkCursor, ReadBe};
use crate::flt::record::{index_u32, require};
use crate::flt::{FltError, Layout, Opcode, Result};

/// Vertex palette record (opcode 67).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexPalette {
	/// Length of the palette including this record.
	pub total_length: u32,
}

impl VertexPalette {
	/// Parse the palette length word.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self { total_length: r.read_u32()? })
	}
}

/// Attribute set carried by a vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexKind {
	/// Position and colour (opcode 68).
	Colour,
	/// Position, colour and normal (opcode 69).
	ColourNormal,
	/// Position, colour, normal and UV (opcode 70).
	ColourNormalUv,
	/// Position, colour and UV (opcode 71).
	ColourUv,
}

impl VertexKind {
	/// Kind decoded by a vertex opcode.
	pub fn from_opcode(opcode: Opcode) -> Option<Self> {
		match opcode {
			Opcode::VertexColour => Some(Self::Colour),
			Opcode::VertexColourNormal => Some(Self::ColourNormal),
			Opcode::VertexColourNormalUv => Some(Self::ColourNormalUv),
			Opcode::VertexColourUv => Some(Self::ColourUv),
			_ => None,
		}
	}

	/// Whether the record carries a normal.
	pub fn has_normal(self) -> bool {
		matches!(self, Self::ColourNormal | Self::ColourNormalUv)
	}

	/// Whether the record carries a texture coordinate.
	pub fn has_uv(self) -> bool {
		matches!(self, Self::ColourNormalUv | Self::ColourUv)
	}
}

/// Vertex palette entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
	/// Source record kind.
	pub kind: VertexKind,
	/// Colour name index.
	pub colour_name_index: u16,
	/// Flag word.
	pub flags: u16,
	/// Position.
	pub position: [f64; 3],
	/// Normal, for kinds that carry one.
	pub normal: Option<[f32; 3]>,
	/// Texture coordinate, for kinds that carry one.
	pub uv: Option<[f32; 2]>,
	/// Packed ABGR colour.
	pub packed_colour: u32,
	/// Colour index.
	pub colour_index: Option<u32>,
}

impl Vertex {
	/// Parse a vertex record of `opcode` under `layout`.
	pub fn parse(opcode: Opcode, r: &mut impl ReadBe, layout: Layout) -> Result<Self> {
		let kind = VertexKind::from_opcode(opcode).ok_or(FltError::UnknownOpcode { opcode: opcode.raw() })?;
		let colour_name_index = r.read_u16()?;
		let flags = r.read_u16()?;
		let position = r.read_vec3d()?;
		let normal = if kind.has_normal() { Some(r.read_vec3f()?) } else { None };
		let uv = if kind.has_uv() { Some([r.read_f32()?, r.read_f32()?]) } else { None };
		let packed_colour = r.read_u32()?;
		let colour_index = index_u32(r.read_u32()?);
		if kind.has_normal() && layout.vertex_reserved {
			r.skip(4)?;
		}

		Ok(Self {
			kind,
			colour_name_index,
			flags,
			position,
			normal,
			uv,
			packed_colour,
			colour_index,
		})
	}
}

/// Vertex list record (opcode 72): byte offsets into the vertex palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexList {
	/// Palette offsets in record order.
	pub offsets: Vec<u32>,
}

impl VertexList {
	/// Parse every offset in the reassembled body.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let mut offsets = Vec::with_capacity(r.remaining() / 4);
		while r.remaining() >= 4 {
			offsets.push(r.read_u32()?);
		}
		Ok(Self { offsets })
	}
}

/// Morph vertex list record (opcode 89): pairs of 0% and 100% offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphVertexList {
	/// `(0% offset, 100% offset)` pairs.
	pub pairs: Vec<(u32, u32)>,
}

impl MorphVertexList {
	/// Parse every offset pair in the reassembled body.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let mut pairs = Vec::with_capacity(r.remaining() / 8);
		while r.remaining() >= 8 {
			pairs.push((r.read_u32()?, r.read_u32()?));
		}
		Ok(Self { pairs })
	}
}

/// Layers 1-7 named by a multitexture attribute mask, most significant bit first.
fn mask_layers(mask: u32) -> Vec<u8> {
	(0..7u8).filter(|bit| mask & (0x8000_0000 >> bit) != 0).map(|bit| bit + 1).collect()
}

/// One texture layer of a multitexture record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureLayer {
	/// Layer number, 1 to 7.
	pub layer: u8,
	/// Texture pattern index.
	pub texture: u16,
	/// Multitexture effect.
	pub effect: u16,
	/// Texture mapping index.
	pub mapping: Option<u16>,
	/// Texture data, user defined.
	pub data: u16,
}

/// Multitexture record (opcode 52).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multitexture {
	/// Attribute mask.
	pub mask: u32,
	/// Layers present in the mask.
	pub layers: Vec<TextureLayer>,
}

impl Multitexture {
	/// Parse the mask and one entry per layer bit.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let mask = r.read_u32()?;
		let mut layers = Vec::new();
		for layer in mask_layers(mask) {
			let texture = r.read_u16()?;
			let effect = r.read_u16()?;
			let mapping = r.read_u16()?;
			let data = r.read_u16()?;
			layers.push(TextureLayer {
				layer,
				texture,
				effect,
				mapping: (mapping != u16::MAX).then_some(mapping),
				data,
			});
		}
		Ok(Self { mask, layers })
	}
}

/// UV list record (opcode 53): per-vertex coordinates for each layer in the mask.
#[derive(Debug, Clone, PartialEq)]
pub struct UvList {
	/// Attribute mask.
	pub mask: u32,
	/// Layers present in the mask.
	pub layers: Vec<u8>,
	/// One row per vertex, one coordinate per layer.
	pub coordinates: Vec<Vec<[f32; 2]>>,
}

impl UvList {
	/// Parse the mask and every whole vertex row.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let mask = r.read_u32()?;
		let layers = mask_layers(mask);
		let stride = layers.len() * 8;
		let mut coordinates = Vec::new();
		if stride > 0 {
			while r.remaining() >= stride {
				let mut row = Vec::with_capacity(layers.len());
				for _ in &layers {
					row.push([r.read_f32()?, r.read_f32()?]);
				}
				coordinates.push(row);
			}
		}
		Ok(Self { mask, layers, coordinates })
	}
}

const HAS_POSITION: u32 = 0x8000_0000;
const HAS_COLOUR_INDEX: u32 = 0x4000_0000;
const HAS_PACKED_COLOUR: u32 = 0x2000_0000;
const HAS_NORMAL: u32 = 0x1000_0000;
const HAS_BASE_UV: u32 = 0x0800_0000;

/// One vertex of a local vertex pool.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalVertex {
	/// Position.
	pub position: Option<[f64; 3]>,
	/// Colour index.
	pub colour_index: Option<u32>,
	/// Packed ABGR colour.
	pub packed_colour: Option<u32>,
	/// Normal.
	pub normal: Option<[f32; 3]>,
	/// Base UV followed by layers 1 to 7.
	pub uvs: [Option<[f32; 2]>; 8],
}

impl LocalVertex {
	fn parse(r: &mut ChunkCursor<'_>, mask: u32) -> Result<Self> {
		let mut vertex = Self::default();
		if mask & HAS_POSITION != 0 {
			vertex.position = Some(r.read_vec3d()?);
		}
		if mask & HAS_COLOUR_INDEX != 0 {
			vertex.colour_index = Some(r.read_u32()?);
		}
		if mask & HAS_PACKED_COLOUR != 0 {
			vertex.packed_colour = Some(r.read_u32()?);
		}
		if mask & HAS_NORMAL != 0 {
			vertex.normal = Some(r.read_vec3f()?);
		}
		for (slot, uv) in vertex.uvs.iter_mut().enumerate() {
			if mask & (HAS_BASE_UV >> slot) != 0 {
				*uv = Some([r.read_f32()?, r.read_f32()?]);
			}
		}
		Ok(vertex)
	}
}

fn local_vertex_stride(mask: u32) -> u64 {
	let mut stride = 0;
	if mask & HAS_POSITION != 0 {
		stride += 24;
	}
	if mask & HAS_COLOUR_INDEX != 0 {
		stride += 4;
	}
	if mask & HAS_PACKED_COLOUR != 0 {
		stride += 4;
	}
	if mask & HAS_NORMAL != 0 {
		stride += 12;
	}
	stride + 8 * u64::from((mask & 0x0FF0_0000).count_ones())
}

/// Local vertex pool record (opcode 85).
#[derive(Debug, Clone, PartialEq)]
pub struct LocalVertexPool {
	/// Attribute mask.
	pub mask: u32,
	/// Pool vertices.
	pub vertices: Vec<LocalVertex>,
}

impl LocalVertexPool {
	/// Parse the pool, across continuations.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let count = r.read_u32()?;
		let mask = r.read_u32()?;
		let stride = local_vertex_stride(mask);
		if stride == 0 && count > 0 {
			return Err(FltError::InvalidEnumValue {
				field: "local vertex pool attribute mask",
				value: i64::from(mask),
			});
		}
		require(r, "local vertex pool", u64::from(count) * stride)?;
		let mut vertices = Vec::with_capacity((count as usize).min(r.remaining() / stride.max(1) as usize));
		for _ in 0..count {
			vertices.push(LocalVertex::parse(r, mask)?);
		}
		Ok(Self { mask, vertices })
	}
}

/// Mesh primitive topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
	/// Triangle strip.
	TriangleStrip,
	/// Triangle fan.
	TriangleFan,
	/// Quadrilateral strip.
	QuadStrip,
	/// Indexed polygon.
	IndexedPolygon,
}

/// Mesh primitive record (opcode 86).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshPrimitive {
	/// Topology.
	pub primitive: PrimitiveType,
	/// Vertex indices into the enclosing local vertex pool.
	pub indices: Vec<u32>,
}

impl MeshPrimitive {
	/// Parse the primitive, across continuations.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let primitive = match r.read_i16()? {
			1 => PrimitiveType::TriangleStrip,
			2 => PrimitiveType::TriangleFan,
			3 => PrimitiveType::QuadStrip,
			4 => PrimitiveType::IndexedPolygon,
			other => {
				return Err(FltError::InvalidEnumValue {
					field: "mesh primitive type",
					value: i64::from(other),
				});
			}
		};
		let index_size = r.read_u16()?;
		if !matches!(index_size, 1 | 2 | 4) {
			return Err(FltError::InvalidEnumValue {
				field: "mesh primitive index size",
				value: i64::from(index_size),
			});
		}
		let count = r.read_u32()?;
		require(r, "mesh primitive", u64::from(count) * u64::from(index_size))?;

		let mut indices = Vec::with_capacity(count as usize);
		for _ in 0..count {
			indices.push(match index_size {
				1 => u32::from(r.read_u8()?),
				2 => u32::from(r.read_u16()?),
				_ => r.read_u32()?,
			});
		}
		Ok(Self { primitive, indices })
	}
}
