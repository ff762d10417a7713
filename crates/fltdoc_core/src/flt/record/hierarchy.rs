use crate::flt::cursor::{ChunkCursor, ReadBe};
use crate::flt::record::{index_i16, index_u32, one_of, require};
use crate::flt::{FltError, Layout, Result};

/// Optional loop-animation block of a group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupLoop {
	/// Number of loops, 0 for forever.
	pub loop_count: u32,
	/// Duration of one loop in seconds.
	pub loop_duration: f32,
	/// Duration of the last frame in seconds.
	pub last_frame_duration: f32,
}

/// Group record (opcode 2).
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
	/// ASCII identifier.
	pub id: String,
	/// Relative draw priority.
	pub priority: i16,
	/// Flag word.
	pub flags: u32,
	/// Special effect IDs.
	pub special_effects: [i16; 2],
	/// Significance.
	pub significance: i16,
	/// Layer code.
	pub layer_code: u8,
	/// Loop block, present from revision 15.8.
	pub animation: Option<GroupLoop>,
}

impl Group {
	/// Parse the group body under `layout`.
	pub fn parse(r: &mut impl ReadBe, layout: Layout) -> Result<Self> {
		let id = r.read_string(8)?;
		let priority = r.read_i16()?;
		r.skip(2)?;
		let flags = r.read_u32()?;
		let special_effects = [r.read_i16()?, r.read_i16()?];
		let significance = r.read_i16()?;
		let layer_code = r.read_u8()?;
		r.skip(5)?;

		let animation = if layout.group_loop {
			Some(GroupLoop {
				loop_count: r.read_u32()?,
				loop_duration: r.read_f32()?,
				last_frame_duration: r.read_f32()?,
			})
		} else {
			None
		};

		Ok(Self {
			id,
			priority,
			flags,
			special_effects,
			significance,
			layer_code,
			animation,
		})
	}
}

/// Object record (opcode 4).
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
	/// ASCII identifier.
	pub id: String,
	/// Flag word.
	pub flags: u32,
	/// Relative draw priority.
	pub priority: i16,
	/// Transparency, 0 opaque to 65535 clear.
	pub transparency: u16,
	/// Special effect IDs.
	pub special_effects: [i16; 2],
	/// Significance.
	pub significance: i16,
}

impl Object {
	/// Parse the object body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		let flags = r.read_u32()?;
		let priority = r.read_i16()?;
		let transparency = r.read_u16()?;
		let special_effects = [r.read_i16()?, r.read_i16()?];
		let significance = r.read_i16()?;
		r.skip(2)?;
		Ok(Self {
			id,
			flags,
			priority,
			transparency,
			special_effects,
			significance,
		})
	}
}

/// Face and mesh draw type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawType {
	/// Draw solid with backface culling.
	SolidCulled,
	/// Draw solid, no backface culling.
	SolidDoubleSided,
	/// Draw wireframe and close.
	WireframeClosed,
	/// Draw wireframe.
	Wireframe,
	/// Surround with wireframe in the alternate colour.
	Surround,
	/// Omnidirectional light.
	OmniLight,
	/// Unidirectional light.
	UnidirectionalLight,
	/// Bidirectional light.
	BidirectionalLight,
}

impl DrawType {
	fn from_raw(raw: u8) -> Result<Self> {
		match raw {
			0 => Ok(Self::SolidCulled),
			1 => Ok(Self::SolidDoubleSided),
			2 => Ok(Self::WireframeClosed),
			3 => Ok(Self::Wireframe),
			4 => Ok(Self::Surround),
			8 => Ok(Self::OmniLight),
			9 => Ok(Self::UnidirectionalLight),
			10 => Ok(Self::BidirectionalLight),
			other => Err(FltError::InvalidEnumValue {
				field: "draw type",
				value: i64::from(other),
			}),
		}
	}
}

/// Billboard template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
	/// Fixed, no alpha blending.
	Fixed,
	/// Fixed, alpha blending.
	FixedAlpha,
	/// Axial rotate with alpha blending.
	AxialRotate,
	/// Point rotate with alpha blending.
	PointRotate,
}

impl Template {
	fn from_raw(raw: u8) -> Result<Self> {
		match raw {
			0 => Ok(Self::Fixed),
			1 => Ok(Self::FixedAlpha),
			2 => Ok(Self::AxialRotate),
			4 => Ok(Self::PointRotate),
			other => Err(FltError::InvalidEnumValue {
				field: "template",
				value: i64::from(other),
			}),
		}
	}
}

/// Lighting source for a face or mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightMode {
	/// Use face colour, not illuminated.
	FaceColour,
	/// Use vertex colours, not illuminated.
	VertexColour,
	/// Use face colour and vertex normals.
	FaceColourLit,
	/// Use vertex colours and vertex normals.
	VertexColourLit,
}

impl LightMode {
	fn from_raw(raw: u8) -> Result<Self> {
		match raw {
			0 => Ok(Self::FaceColour),
			1 => Ok(Self::VertexColour),
			2 => Ok(Self::FaceColourLit),
			3 => Ok(Self::VertexColourLit),
			other => Err(FltError::InvalidEnumValue {
				field: "light mode",
				value: i64::from(other),
			}),
		}
	}
}

/// Surface attributes shared by face and mesh records.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
	/// IR colour code.
	pub ir_colour: u32,
	/// Relative draw priority.
	pub priority: i16,
	/// Draw type.
	pub draw_type: DrawType,
	/// Draw textured face white.
	pub texture_white: bool,
	/// Colour name index.
	pub colour_name_index: u16,
	/// Alternate colour name index.
	pub alt_colour_name_index: u16,
	/// Billboard template.
	pub template: Template,
	/// Detail texture pattern index.
	pub detail_texture: Option<i16>,
	/// Texture pattern index.
	pub texture: Option<i16>,
	/// Material index.
	pub material: Option<i16>,
	/// Surface material code.
	pub surface_material_code: i16,
	/// Feature ID.
	pub feature_id: i16,
	/// IR material code.
	pub ir_material_code: u32,
	/// Transparency, 0 opaque to 65535 clear.
	pub transparency: u16,
	/// LOD generation control.
	pub lod_generation_control: u8,
	/// Line style index.
	pub line_style: u8,
	/// Flag word.
	pub flags: u32,
	/// Light mode.
	pub light_mode: LightMode,
	/// Packed ABGR colour.
	pub packed_colour: u32,
	/// Alternate packed ABGR colour.
	pub alt_packed_colour: u32,
	/// Texture mapping index.
	pub texture_mapping: Option<i16>,
	/// Primary colour index.
	pub primary_colour: Option<u32>,
	/// Alternate colour index.
	pub alt_colour: Option<u32>,
	/// Shader index.
	pub shader: Option<i16>,
}

impl Surface {
	/// Parse the 68-byte attribute block.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let ir_colour = r.read_u32()?;
		let priority = r.read_i16()?;
		let draw_type = DrawType::from_raw(r.read_u8()?)?;
		let texture_white = r.read_bool()?;
		let colour_name_index = r.read_u16()?;
		let alt_colour_name_index = r.read_u16()?;
		r.skip(1)?;
		let template = Template::from_raw(r.read_u8()?)?;
		let detail_texture = index_i16(r.read_i16()?);
		let texture = index_i16(r.read_i16()?);
		let material = index_i16(r.read_i16()?);
		let surface_material_code = r.read_i16()?;
		let feature_id = r.read_i16()?;
		let ir_material_code = r.read_u32()?;
		let transparency = r.read_u16()?;
		let lod_generation_control = r.read_u8()?;
		let line_style = r.read_u8()?;
		let flags = r.read_u32()?;
		let light_mode = LightMode::from_raw(r.read_u8()?)?;
		r.skip(7)?;
		let packed_colour = r.read_u32()?;
		let alt_packed_colour = r.read_u32()?;
		let texture_mapping = index_i16(r.read_i16()?);
		r.skip(2)?;
		let primary_colour = index_u32(r.read_u32()?);
		let alt_colour = index_u32(r.read_u32()?);
		r.skip(2)?;
		let shader = index_i16(r.read_i16()?);

		Ok(Self {
			ir_colour,
			priority,
			draw_type,
			texture_white,
			colour_name_index,
			alt_colour_name_index,
			template,
			detail_texture,
			texture,
			material,
			surface_material_code,
			feature_id,
			ir_material_code,
			transparency,
			lod_generation_control,
			line_style,
			flags,
			light_mode,
			packed_colour,
			alt_packed_colour,
			texture_mapping,
			primary_colour,
			alt_colour,
			shader,
		})
	}
}

/// Face record (opcode 5).
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
	/// ASCII identifier.
	pub id: String,
	/// Surface attributes.
	pub surface: Surface,
}

impl Face {
	/// Parse the face body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		let surface = Surface::parse(r)?;
		Ok(Self { id, surface })
	}
}

/// Mesh record (opcode 84).
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
	/// ASCII identifier.
	pub id: String,
	/// Surface attributes.
	pub surface: Surface,
}

impl Mesh {
	/// Parse the mesh body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		let surface = Surface::parse(r)?;
		Ok(Self { id, surface })
	}
}

/// Level of detail record (opcode 73).
#[derive(Debug, Clone, PartialEq)]
pub struct LevelOfDetail {
	/// ASCII identifier.
	pub id: String,
	/// Switch-in distance.
	pub switch_in: f64,
	/// Switch-out distance.
	pub switch_out: f64,
	/// Special effect IDs.
	pub special_effects: [i16; 2],
	/// Flag word.
	pub flags: u32,
	/// Centre of the LOD.
	pub centre: [f64; 3],
	/// Transition range.
	pub transition_range: f64,
	/// Significant size.
	pub significant_size: f64,
}

impl LevelOfDetail {
	/// Parse the LOD body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		Ok(Self {
			id,
			switch_in: r.read_f64()?,
			switch_out: r.read_f64()?,
			special_effects: [r.read_i16()?, r.read_i16()?],
			flags: r.read_u32()?,
			centre: r.read_vec3d()?,
			transition_range: r.read_f64()?,
			significant_size: r.read_f64()?,
		})
	}
}

/// Minimum, maximum, current and increment of one DOF axis.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DofLimits {
	/// Minimum value.
	pub min: f64,
	/// Maximum value.
	pub max: f64,
	/// Current value.
	pub current: f64,
	/// Increment.
	pub increment: f64,
}

impl DofLimits {
	fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self {
			min: r.read_f64()?,
			max: r.read_f64()?,
			current: r.read_f64()?,
			increment: r.read_f64()?,
		})
	}
}

/// Degree of freedom record (opcode 14).
#[derive(Debug, Clone, PartialEq)]
pub struct DegreeOfFreedom {
	/// ASCII identifier.
	pub id: String,
	/// Origin of the DOF local frame.
	pub origin: [f64; 3],
	/// Point on the local x axis.
	pub point_x: [f64; 3],
	/// Point in the local xy plane.
	pub point_xy: [f64; 3],
	/// Translation along z.
	pub z: DofLimits,
	/// Translation along y.
	pub y: DofLimits,
	/// Translation along x.
	pub x: DofLimits,
	/// Pitch.
	pub pitch: DofLimits,
	/// Roll.
	pub roll: DofLimits,
	/// Yaw.
	pub yaw: DofLimits,
	/// Scale along z.
	pub scale_z: DofLimits,
	/// Scale along y.
	pub scale_y: DofLimits,
	/// Scale along x.
	pub scale_x: DofLimits,
	/// Flag word.
	pub flags: u32,
}

impl DegreeOfFreedom {
	/// Parse the DOF body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		let origin = r.read_vec3d()?;
		let point_x = r.read_vec3d()?;
		let point_xy = r.read_vec3d()?;
		let z = DofLimits::parse(r)?;
		let y = DofLimits::parse(r)?;
		let x = DofLimits::parse(r)?;
		let pitch = DofLimits::parse(r)?;
		let roll = DofLimits::parse(r)?;
		let yaw = DofLimits::parse(r)?;
		let scale_z = DofLimits::parse(r)?;
		let scale_y = DofLimits::parse(r)?;
		let scale_x = DofLimits::parse(r)?;
		let flags = r.read_u32()?;
		r.skip(4)?;
		Ok(Self {
			id,
			origin,
			point_x,
			point_xy,
			z,
			y,
			x,
			pitch,
			roll,
			yaw,
			scale_z,
			scale_y,
			scale_x,
			flags,
		})
	}
}

/// Switch record (opcode 96).
#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
	/// ASCII identifier.
	pub id: String,
	/// Index of the active mask.
	pub current_mask: u32,
	/// Mask words, one vector per mask.
	pub masks: Vec<Vec<u32>>,
}

impl Switch {
	/// Parse the switch body.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		let current_mask = r.read_u32()?;
		let mask_count = r.read_u32()?;
		let words = r.read_u32()?;
		if words == 0 && mask_count > 0 {
			return Err(FltError::InvalidEnumValue {
				field: "switch words per mask",
				value: 0,
			});
		}
		require(r, "switch", u64::from(mask_count) * u64::from(words) * 4)?;

		let mut masks = Vec::with_capacity(mask_count as usize);
		for _ in 0..mask_count {
			let mut mask = Vec::with_capacity(words as usize);
			for _ in 0..words {
				mask.push(r.read_u32()?);
			}
			masks.push(mask);
		}
		Ok(Self { id, current_mask, masks })
	}
}

/// Binary separating plane record (opcode 55).
#[derive(Debug, Clone, PartialEq)]
pub struct BinarySeparatingPlane {
	/// ASCII identifier.
	pub id: String,
	/// Plane equation coefficients `a x + b y + c z + d = 0`.
	pub plane: [f64; 4],
}

impl BinarySeparatingPlane {
	/// Parse the BSP body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		let plane = [r.read_f64()?, r.read_f64()?, r.read_f64()?, r.read_f64()?];
		Ok(Self { id, plane })
	}
}

/// External reference record (opcode 63).
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalReference {
	/// Path text as stored, node suffix removed.
	pub path: String,
	/// Node name from a trailing `<name>` suffix.
	pub node: Option<String>,
	/// Flag word.
	pub flags: u32,
	/// Display the reference as a bounding box.
	pub view_as_bounding_box: u16,
}

impl ExternalReference {
	/// Parse the external reference body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let raw = r.read_string(200)?;
		r.skip(4)?;
		let flags = r.read_u32()?;
		let view_as_bounding_box = r.read_u16()?;
		r.skip(2)?;
		let (path, node) = split_node(&raw);
		Ok(Self {
			path,
			node,
			flags,
			view_as_bounding_box,
		})
	}
}

fn split_node(raw: &str) -> (String, Option<String>) {
	if let Some(open) = raw.find('<')
		&& let Some(rest) = raw[open + 1..].strip_suffix('>')
	{
		return (raw[..open].trim_end().to_owned(), Some(rest.to_owned()));
	}
	(raw.to_owned(), None)
}

/// Instance reference node (opcode 61) bound to the instance arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceRef {
	/// Instance ID.
	pub id: u16,
	/// Arena slot holding the instance contents.
	pub handle: crate::flt::InstanceHandle,
}

impl InstanceRef {
	/// Parse the instance ID shared by definition and reference records.
	pub fn parse_id(r: &mut impl ReadBe) -> Result<u16> {
		r.skip(2)?;
		r.read_u16()
	}
}

/// Sound record (opcode 91).
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
	/// ASCII identifier.
	pub id: String,
	/// Index into the sound palette.
	pub palette_index: u32,
	/// Offset of the emitter.
	pub offset: [f64; 3],
	/// Direction of the emitter.
	pub direction: [f32; 3],
	/// Amplitude.
	pub amplitude: f32,
	/// Pitch bend.
	pub pitch_bend: f32,
	/// Priority.
	pub priority: f32,
	/// Falloff.
	pub falloff: f32,
	/// Lobe width.
	pub width: f32,
	/// Flag word.
	pub flags: u32,
}

impl Sound {
	/// Parse the sound body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		let palette_index = r.read_u32()?;
		r.skip(4)?;
		let sound = Self {
			id,
			palette_index,
			offset: r.read_vec3d()?,
			direction: r.read_vec3f()?,
			amplitude: r.read_f32()?,
			pitch_bend: r.read_f32()?,
			priority: r.read_f32()?,
			falloff: r.read_f32()?,
			width: r.read_f32()?,
			flags: r.read_u32()?,
		};
		r.skip(4)?;
		Ok(sound)
	}
}

/// Text record (opcode 95).
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
	/// ASCII identifier.
	pub id: String,
	/// Text type: -1 static, 0 text, 1 float, 2 integer.
	pub kind: i32,
	/// Draw type: 0 solid, 1 wireframe closed, 2 wireframe, 3 surround.
	pub draw_type: i32,
	/// Justification: -1 left, 0 centre, 1 right, 2 none.
	pub justification: i32,
	/// Floating-point value.
	pub float_value: f64,
	/// Integer value.
	pub int_value: i32,
	/// Flag word.
	pub flags: u32,
	/// Colour index.
	pub colour: u32,
	/// Alternate colour index.
	pub alt_colour: u32,
	/// Material index.
	pub material: u32,
	/// Maximum number of lines.
	pub max_lines: u32,
	/// Maximum number of characters.
	pub max_characters: u32,
	/// Current text length.
	pub current_length: u32,
	/// Next line number.
	pub next_line: u32,
	/// Line number at top of display.
	pub top_line: u32,
	/// Integer range.
	pub int_range: [u32; 2],
	/// Floating-point range.
	pub float_range: [f64; 2],
	/// Lower left corner of the text box.
	pub lower_left: [f64; 3],
	/// Upper right corner of the text box.
	pub upper_right: [f64; 3],
	/// Font name.
	pub font: String,
	/// Draw vertical, italic, bold and underline switches.
	pub style: [u32; 4],
	/// Line style index.
	pub line_style: u32,
}

impl Text {
	/// Parse the text body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(8)?;
		let kind = r.read_i32()?;
		one_of("text type", i64::from(kind), &[-1, 0, 1, 2])?;
		let draw_type = r.read_i32()?;
		one_of("text draw type", i64::from(draw_type), &[0, 1, 2, 3])?;
		let justification = r.read_i32()?;
		one_of("text justification", i64::from(justification), &[-1, 0, 1, 2])?;
		let float_value = r.read_f64()?;
		let int_value = r.read_i32()?;
		r.skip(20)?;
		let flags = r.read_u32()?;
		let colour = r.read_u32()?;
		let alt_colour = r.read_u32()?;
		let material = r.read_u32()?;
		r.skip(4)?;
		let max_lines = r.read_u32()?;
		let max_characters = r.read_u32()?;
		let current_length = r.read_u32()?;
		let next_line = r.read_u32()?;
		let top_line = r.read_u32()?;
		let int_range = [r.read_u32()?, r.read_u32()?];
		let float_range = [r.read_f64()?, r.read_f64()?];
		let lower_left = r.read_vec3d()?;
		let upper_right = r.read_vec3d()?;
		let font = r.read_string(120)?;
		let style = [r.read_u32()?, r.read_u32()?, r.read_u32()?, r.read_u32()?];
		let line_style = r.read_u32()?;
		r.skip(4)?;

		Ok(Self {
			id,
			kind,
			draw_type,
			justification,
			float_value,
			int_value,
			flags,
			colour,
			alt_colour,
			material,
			max_lines,
			max_characters,
			current_length,
			next_line,
			top_line,
			int_range,
			float_range,
			lower_left,
			upper_right,
			font,
			style,
			line_style,
		})
	}
}

/// Clip region record (opcode 98).
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRegion {
	/// ASCII identifier.
	pub id: String,
	/// Per-plane enable flags.
	pub enabled: [bool; 5],
	/// Region corner points.
	pub corners: [[f64; 3]; 4],
	/// Plane coefficients A, B, C and D for the five clip planes.
	pub coefficients: [[f64; 5]; 4],
}

impl ClipRegion {
	/// Parse the clip region body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(6)?;
		let mut enabled = [false; 5];
		for flag in &mut enabled {
			*flag = r.read_bool()?;
		}
		r.skip(1)?;

		let mut corners = [[0.0; 3]; 4];
		for corner in &mut corners {
			*corner = r.read_vec3d()?;
		}
		let mut coefficients = [[0.0; 5]; 4];
		for row in &mut coefficients {
			for value in row.iter_mut() {
				*value = r.read_f64()?;
			}
		}
		Ok(Self {
			id,
			enabled,
			corners,
			coefficients,
		})
	}
}

/// Continuously adaptive terrain record (opcode 115).
#[derive(Debug, Clone, PartialEq)]
pub struct Cat {
	/// ASCII identifier.
	pub id: String,
	/// Remaining record bytes.
	pub data: Vec<u8>,
}

impl Cat {
	/// Parse the CAT body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		let data = r.read_bytes(68)?;
		Ok(Self { id, data })
	}
}

/// Extension record (opcode 100).
#[derive(Debug, Clone, PartialEq)]
pub struct Extension {
	/// ASCII identifier.
	pub id: String,
	/// Site ID of the extending tool.
	pub site: String,
	/// Extension revision.
	pub revision: i8,
	/// Record code defined by the site.
	pub code: u16,
	/// Extended data.
	pub data: Vec<u8>,
}

impl Extension {
	/// Parse the extension body.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let id = r.read_string(8)?;
		let site = r.read_string(8)?;
		r.skip(1)?;
		let revision = r.read_i8()?;
		let code = r.read_u16()?;
		let data = r.read_rest().to_vec();
		Ok(Self {
			id,
			site,
			revision,
			code,
			data,
		})
	}
}
