use crate::flt::cursor::{ChunkCursor, ReadBe};
use crate::flt::record::{index_u32, one_of, require};
use crate::flt::{FltError, Result};

const COLOUR_ENTRIES: usize = 1024;

/// Named colour entry of a colour palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourName {
	/// Colour index the name applies to.
	pub index: u16,
	/// Colour name.
	pub name: String,
}

/// Colour palette record (opcode 32).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColourPalette {
	/// Brightest RGB of each of the 1024 colours, packed ABGR.
	pub colours: Vec<u32>,
	/// Optional colour names.
	pub names: Vec<ColourName>,
}

impl ColourPalette {
	/// Parse the colour table and any trailing name entries.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		r.skip(128)?;
		let mut colours = Vec::with_capacity(COLOUR_ENTRIES);
		for _ in 0..COLOUR_ENTRIES {
			colours.push(r.read_u32()?);
		}

		let mut names = Vec::new();
		if r.remaining() >= 4 {
			let count = r.read_u32()?;
			for _ in 0..count {
				let length = r.read_u16()?;
				if length < 8 {
					return Err(FltError::RecordSizeMismatch {
						name: "colour name entry",
						expected: 8,
						actual: length,
					});
				}
				r.skip(2)?;
				let index = r.read_u16()?;
				r.skip(2)?;
				let name = r.read_string(usize::from(length - 8))?;
				names.push(ColourName { index, name });
			}
		}
		Ok(Self { colours, names })
	}
}

/// Texture palette record (opcode 64).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexturePalette {
	/// Image file name as stored.
	pub path: String,
	/// Texture pattern index.
	pub pattern: u32,
	/// Location in the texture palette window.
	pub location: [u32; 2],
}

impl TexturePalette {
	/// Parse the texture palette body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self {
			path: r.read_string(200)?,
			pattern: r.read_u32()?,
			location: [r.read_u32()?, r.read_u32()?],
		})
	}
}

/// Material palette record (opcode 113).
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialPalette {
	/// Material index.
	pub index: u32,
	/// Material name.
	pub name: String,
	/// Flag word.
	pub flags: u32,
	/// Ambient RGB.
	pub ambient: [f32; 3],
	/// Diffuse RGB.
	pub diffuse: [f32; 3],
	/// Specular RGB.
	pub specular: [f32; 3],
	/// Emissive RGB.
	pub emissive: [f32; 3],
	/// Shininess.
	pub shininess: f32,
	/// Alpha.
	pub alpha: f32,
}

impl MaterialPalette {
	/// Parse the material body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let material = Self {
			index: r.read_u32()?,
			name: r.read_string(12)?,
			flags: r.read_u32()?,
			ambient: r.read_vec3f()?,
			diffuse: r.read_vec3f()?,
			specular: r.read_vec3f()?,
			emissive: r.read_vec3f()?,
			shininess: r.read_f32()?,
			alpha: r.read_f32()?,
		};
		r.skip(4)?;
		Ok(material)
	}
}

/// Line style palette record (opcode 97).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStylePalette {
	/// Line style index.
	pub index: u16,
	/// Pattern mask.
	pub pattern_mask: u16,
	/// Line width.
	pub width: u32,
}

impl LineStylePalette {
	/// Parse the line style body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self {
			index: r.read_u16()?,
			pattern_mask: r.read_u16()?,
			width: r.read_u32()?,
		})
	}
}

/// One eyepoint of the eyepoint and trackplane palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eyepoint {
	/// Rotation centre.
	pub rotation_centre: [f64; 3],
	/// Yaw, pitch and roll.
	pub angles: [f32; 3],
	/// Rotation matrix.
	pub rotation: [[f32; 4]; 4],
	/// Field of view.
	pub field_of_view: f32,
	/// Scale.
	pub scale: f32,
	/// Near clipping plane.
	pub near: f32,
	/// Far clipping plane.
	pub far: f32,
	/// Flythrough matrix.
	pub flythrough: [[f32; 4]; 4],
	/// Eyepoint position.
	pub position: [f32; 3],
	/// Yaw of flythrough.
	pub flythrough_yaw: f32,
	/// Pitch of flythrough.
	pub flythrough_pitch: f32,
	/// Eyepoint direction.
	pub direction: [f32; 3],
	/// No-flythrough flag.
	pub no_flythrough: bool,
	/// Orthographic view flag.
	pub ortho: bool,
	/// Eyepoint is valid.
	pub valid: bool,
	/// Image offset, x and y.
	pub image_offset: [i32; 2],
	/// Image zoom.
	pub zoom: i32,
}

impl Eyepoint {
	fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let eyepoint = Self {
			rotation_centre: r.read_vec3d()?,
			angles: r.read_vec3f()?,
			rotation: r.read_matrix_f32()?,
			field_of_view: r.read_f32()?,
			scale: r.read_f32()?,
			near: r.read_f32()?,
			far: r.read_f32()?,
			flythrough: r.read_matrix_f32()?,
			position: r.read_vec3f()?,
			flythrough_yaw: r.read_f32()?,
			flythrough_pitch: r.read_f32()?,
			direction: r.read_vec3f()?,
			no_flythrough: r.read_i32()? != 0,
			ortho: r.read_i32()? != 0,
			valid: r.read_i32()? != 0,
			image_offset: [r.read_i32()?, r.read_i32()?],
			zoom: r.read_i32()?,
		};
		r.skip(36)?;
		Ok(eyepoint)
	}
}

/// One trackplane of the eyepoint and trackplane palette.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trackplane {
	/// Trackplane is valid.
	pub valid: bool,
	/// Origin.
	pub origin: [f64; 3],
	/// Alignment point.
	pub alignment: [f64; 3],
	/// Plane point.
	pub plane: [f64; 3],
	/// Grid visible.
	pub grid_visible: bool,
	/// Grid type.
	pub grid_type: u8,
	/// Grid under.
	pub grid_under: u8,
	/// Grid angle.
	pub grid_angle: f32,
	/// Grid spacing, x and y.
	pub grid_spacing: [f64; 2],
	/// Radial grid direction.
	pub radial_direction: i8,
	/// Rectangular grid direction.
	pub rectangular_direction: i8,
	/// Snap to grid.
	pub snap: u8,
	/// Grid size.
	pub grid_size: f64,
	/// Visible grid quadrants.
	pub visible_quadrants: [bool; 4],
}

impl Trackplane {
	fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let valid = r.read_i32()? != 0;
		r.skip(4)?;
		let origin = r.read_vec3d()?;
		let alignment = r.read_vec3d()?;
		let plane = r.read_vec3d()?;
		let grid_visible = r.read_bool()?;
		let grid_type = r.read_u8()?;
		let grid_under = r.read_u8()?;
		r.skip(1)?;
		let grid_angle = r.read_f32()?;
		let grid_spacing = [r.read_f64()?, r.read_f64()?];
		let radial_direction = r.read_i8()?;
		let rectangular_direction = r.read_i8()?;
		let snap = r.read_u8()?;
		r.skip(5)?;
		let grid_size = r.read_f64()?;
		let visible_quadrants = [r.read_bool()?, r.read_bool()?, r.read_bool()?, r.read_bool()?];
		r.skip(4)?;
		Ok(Self {
			valid,
			origin,
			alignment,
			plane,
			grid_visible,
			grid_type,
			grid_under,
			grid_angle,
			grid_spacing,
			radial_direction,
			rectangular_direction,
			snap,
			grid_size,
			visible_quadrants,
		})
	}
}

/// Eyepoint and trackplane palette record (opcode 83).
#[derive(Debug, Clone, PartialEq)]
pub struct EyepointTrackplanePalette {
	/// Ten eyepoints.
	pub eyepoints: Vec<Eyepoint>,
	/// Ten trackplanes.
	pub trackplanes: Vec<Trackplane>,
}

impl EyepointTrackplanePalette {
	/// Parse the ten eyepoints and ten trackplanes.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		let eyepoints = (0..10).map(|_| Eyepoint::parse(r)).collect::<Result<Vec<_>>>()?;
		let trackplanes = (0..10).map(|_| Trackplane::parse(r)).collect::<Result<Vec<_>>>()?;
		Ok(Self { eyepoints, trackplanes })
	}
}

/// Parameters of a three-point put texture mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePointMapping {
	/// Put texture tool state.
	pub tool_state: i32,
	/// Active geometry point.
	pub active_geometry_point: i32,
	/// Lower left corner of the bounding box.
	pub lower_left: [f64; 3],
	/// Upper right corner of the bounding box.
	pub upper_right: [f64; 3],
	/// Use real world size flags.
	pub real_world_size: [i32; 3],
	/// Texture origin, alignment and shear points.
	pub texture_points: [[f64; 3]; 3],
	/// Geometry origin, alignment and shear points.
	pub geometry_points: [[f64; 3]; 3],
	/// Active texture point.
	pub active_texture_point: i32,
	/// UV display type.
	pub uv_display: i32,
	/// U and V repetition.
	pub repetition: [f32; 2],
}

/// Parameters of a four-point put texture mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourPointMapping {
	/// Put texture tool state.
	pub tool_state: i32,
	/// Active geometry point.
	pub active_geometry_point: i32,
	/// Lower left corner of the bounding box.
	pub lower_left: [f64; 3],
	/// Upper right corner of the bounding box.
	pub upper_right: [f64; 3],
	/// Use real world size flags.
	pub real_world_size: [i32; 3],
	/// Texture origin, alignment, shear and perspective points.
	pub texture_points: [[f64; 3]; 4],
	/// Geometry origin, alignment, shear and perspective points.
	pub geometry_points: [[f64; 3]; 4],
	/// Active texture point.
	pub active_texture_point: i32,
	/// UV display type.
	pub uv_display: i32,
	/// Depth scale factor.
	pub depth_scale: f32,
	/// Perspective transformation matrix.
	pub transform: [[f64; 4]; 4],
	/// U and V repetition.
	pub repetition: [f32; 2],
}

/// Parameters of a spherical projection mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalMapping {
	/// Scale.
	pub scale: f32,
	/// Projection centre.
	pub centre: [f64; 3],
	/// Scale of the bounding box.
	pub box_scale: f32,
	/// Maximum dimension of the mapped geometry bounding box.
	pub max_dimension: f32,
}

/// Parameters of a radial projection mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialMapping {
	/// Active geometry point.
	pub active_geometry_point: u32,
	/// Radial scale.
	pub radial_scale: f32,
	/// Cylinder length scale.
	pub length_scale: f32,
	/// XY transformation matrix.
	pub transform: [[f64; 4]; 4],
	/// Cylinder end points.
	pub end_points: [[f64; 3]; 2],
}

/// Type-specific texture mapping parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingParameters {
	/// Type 0, no parameters.
	None,
	/// Type 1.
	ThreePoint(Box<ThreePointMapping>),
	/// Type 2.
	FourPoint(Box<FourPointMapping>),
	/// Type 4.
	Spherical(SphericalMapping),
	/// Type 5.
	Radial(Box<RadialMapping>),
	/// Type 6, environment mapping without parameters.
	Environment,
}

/// Warped mapping control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpParameters {
	/// Active geometry point.
	pub active_geometry_point: u32,
	/// Warp tool state.
	pub tool_state: u32,
	/// Warped-from points.
	pub from: [[f64; 2]; 8],
	/// Warped-to points.
	pub to: [[f64; 2]; 8],
}

/// Texture mapping palette record (opcode 112).
#[derive(Debug, Clone, PartialEq)]
pub struct TextureMappingPalette {
	/// Mapping index.
	pub index: u32,
	/// Mapping name.
	pub name: String,
	/// Mapping type.
	pub mapping_type: u32,
	/// Transformation matrix.
	pub transform: [[f64; 4]; 4],
	/// Type-specific parameters.
	pub parameters: MappingParameters,
	/// Warp control points when the warped flag is set.
	pub warp: Option<WarpParameters>,
}

impl TextureMappingPalette {
	/// Parse the mapping entry and its type-specific tail.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		r.skip(4)?;
		let index = r.read_u32()?;
		let name = r.read_string(20)?;
		let mapping_type = r.read_u32()?;
		one_of("texture mapping type", i64::from(mapping_type), &[0, 1, 2, 4, 5, 6])?;
		let warped = r.read_i32()? == 1;
		let transform = r.read_matrix_f64()?;

		let parameters = match mapping_type {
			1 => MappingParameters::ThreePoint(Box::new(parse_three_point(r)?)),
			2 => MappingParameters::FourPoint(Box::new(parse_four_point(r)?)),
			4 => MappingParameters::Spherical(parse_spherical(r)?),
			5 => MappingParameters::Radial(Box::new(parse_radial(r)?)),
			6 => MappingParameters::Environment,
			_ => MappingParameters::None,
		};
		let warp = if warped { Some(parse_warp(r)?) } else { None };

		Ok(Self {
			index,
			name,
			mapping_type,
			transform,
			parameters,
			warp,
		})
	}
}

fn read_checked(r: &mut impl ReadBe, field: &'static str, allowed: &[i64]) -> Result<i32> {
	let value = r.read_i32()?;
	one_of(field, i64::from(value), allowed)?;
	Ok(value)
}

fn parse_three_point(r: &mut impl ReadBe) -> Result<ThreePointMapping> {
	let tool_state = read_checked(r, "put texture tool state", &[0, 1, 2, 3])?;
	let active_geometry_point = read_checked(r, "active geometry point", &[1, 2, 3])?;
	let lower_left = r.read_vec3d()?;
	let upper_right = r.read_vec3d()?;
	let real_world_size = [r.read_i32()?, r.read_i32()?, r.read_i32()?];
	r.skip(4)?;
	let texture_points = [r.read_vec3d()?, r.read_vec3d()?, r.read_vec3d()?];
	let geometry_points = [r.read_vec3d()?, r.read_vec3d()?, r.read_vec3d()?];
	let active_texture_point = read_checked(r, "active texture point", &[1, 2, 3])?;
	let uv_display = read_checked(r, "UV display type", &[1, 2])?;
	let repetition = [r.read_f32()?, r.read_f32()?];
	Ok(ThreePointMapping {
		tool_state,
		active_geometry_point,
		lower_left,
		upper_right,
		real_world_size,
		texture_points,
		geometry_points,
		active_texture_point,
		uv_display,
		repetition,
	})
}

fn parse_four_point(r: &mut impl ReadBe) -> Result<FourPointMapping> {
	let tool_state = read_checked(r, "put texture tool state", &[0, 1, 2, 3, 4])?;
	let active_geometry_point = read_checked(r, "active geometry point", &[1, 2, 3, 4])?;
	let lower_left = r.read_vec3d()?;
	let upper_right = r.read_vec3d()?;
	let real_world_size = [r.read_i32()?, r.read_i32()?, r.read_i32()?];
	r.skip(4)?;
	let texture_points = [r.read_vec3d()?, r.read_vec3d()?, r.read_vec3d()?, r.read_vec3d()?];
	let geometry_points = [r.read_vec3d()?, r.read_vec3d()?, r.read_vec3d()?, r.read_vec3d()?];
	let active_texture_point = read_checked(r, "active texture point", &[1, 2, 3, 4])?;
	let uv_display = read_checked(r, "UV display type", &[1, 2])?;
	let depth_scale = r.read_f32()?;
	r.skip(4)?;
	let transform = r.read_matrix_f64()?;
	let repetition = [r.read_f32()?, r.read_f32()?];
	Ok(FourPointMapping {
		tool_state,
		active_geometry_point,
		lower_left,
		upper_right,
		real_world_size,
		texture_points,
		geometry_points,
		active_texture_point,
		uv_display,
		depth_scale,
		transform,
		repetition,
	})
}

fn parse_spherical(r: &mut impl ReadBe) -> Result<SphericalMapping> {
	let scale = r.read_f32()?;
	r.skip(4)?;
	Ok(SphericalMapping {
		scale,
		centre: r.read_vec3d()?,
		box_scale: r.read_f32()?,
		max_dimension: r.read_f32()?,
	})
}

fn parse_radial(r: &mut impl ReadBe) -> Result<RadialMapping> {
	let active_geometry_point = r.read_u32()?;
	one_of("active geometry point", i64::from(active_geometry_point), &[1, 2])?;
	r.skip(4)?;
	Ok(RadialMapping {
		active_geometry_point,
		radial_scale: r.read_f32()?,
		length_scale: r.read_f32()?,
		transform: r.read_matrix_f64()?,
		end_points: [r.read_vec3d()?, r.read_vec3d()?],
	})
}

fn parse_warp(r: &mut impl ReadBe) -> Result<WarpParameters> {
	let active_geometry_point = r.read_u32()?;
	let tool_state = r.read_u32()?;
	r.skip(8)?;
	let mut from = [[0.0; 2]; 8];
	for point in &mut from {
		*point = [r.read_f64()?, r.read_f64()?];
	}
	let mut to = [[0.0; 2]; 8];
	for point in &mut to {
		*point = [r.read_f64()?, r.read_f64()?];
	}
	Ok(WarpParameters {
		active_geometry_point,
		tool_state,
		from,
		to,
	})
}

/// Program sources of a shader palette entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderProgram {
	/// Cg vertex and fragment programs.
	Cg {
		/// Vertex program file.
		vertex_file: String,
		/// Fragment program file.
		fragment_file: String,
		/// Vertex program profile.
		vertex_profile: i32,
		/// Fragment program profile.
		fragment_profile: i32,
		/// Vertex program entry point.
		vertex_entry: String,
		/// Fragment program entry point.
		fragment_entry: String,
	},
	/// CgFX payload, kept opaque.
	CgFx(Vec<u8>),
	/// OpenGL shading language program files.
	Glsl {
		/// Vertex program files.
		vertex_files: Vec<String>,
		/// Fragment program files.
		fragment_files: Vec<String>,
	},
}

/// Shader palette record (opcode 133).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPalette {
	/// Shader index.
	pub index: u32,
	/// Shader name.
	pub name: String,
	/// Programs.
	pub program: ShaderProgram,
}

impl ShaderPalette {
	/// Parse the shader entry.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let index = r.read_u32()?;
		let kind = r.read_u32()?;
		one_of("shader type", i64::from(kind), &[0, 1, 2])?;
		let name = r.read_string(1024)?;

		let program = match kind {
			0 => ShaderProgram::Cg {
				vertex_file: r.read_string(1024)?,
				fragment_file: r.read_string(1024)?,
				vertex_profile: r.read_i32()?,
				fragment_profile: r.read_i32()?,
				vertex_entry: r.read_string(256)?,
				fragment_entry: r.read_string(256)?,
			},
			1 => ShaderProgram::CgFx(r.read_rest().to_vec()),
			_ => {
				let vertex_count = r.read_u32()?;
				let fragment_count = r.read_u32()?;
				let vertex_files = (0..vertex_count).map(|_| r.read_string(1024)).collect::<Result<Vec<_>>>()?;
				let fragment_files = (0..fragment_count).map(|_| r.read_string(1024)).collect::<Result<Vec<_>>>()?;
				ShaderProgram::Glsl {
					vertex_files,
					fragment_files,
				}
			}
		};
		Ok(Self { index, name, program })
	}
}

/// Sound palette header entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundEntry {
	/// Sound index.
	pub index: u32,
	/// Offset of the file name in the packed data record.
	pub name_offset: u32,
}

/// Sound palette record (opcode 93), one of two subtypes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundPalette {
	/// Subtype 1: sound index table.
	Header {
		/// Maximum number of sounds.
		max: u32,
		/// Sound entries.
		entries: Vec<SoundEntry>,
	},
	/// Subtype 2: packed NUL-separated file names.
	Data {
		/// Declared total length.
		total_length: u32,
		/// Packed file names.
		packed: Vec<u8>,
	},
}

impl SoundPalette {
	/// Parse either subtype.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let subtype = r.read_u32()?;
		match subtype {
			1 => {
				let max = r.read_u32()?;
				let count = r.read_u32()?;
				r.skip(12)?;
				let mut entries = Vec::with_capacity((count as usize).min(r.remaining() / 12));
				for _ in 0..count {
					let index = r.read_u32()?;
					r.skip(4)?;
					let name_offset = r.read_u32()?;
					entries.push(SoundEntry { index, name_offset });
				}
				Ok(Self::Header { max, entries })
			}
			2 => Ok(Self::Data {
				total_length: r.read_u32()?,
				packed: r.read_rest().to_vec(),
			}),
			other => Err(FltError::InvalidEnumValue {
				field: "sound palette subtype",
				value: i64::from(other),
			}),
		}
	}

	/// File name starting at `offset` in a data record.
	pub fn name_at(&self, offset: u32) -> Option<String> {
		let Self::Data { packed, .. } = self else {
			return None;
		};
		let tail = packed.get(offset as usize..)?;
		let end = tail.iter().position(|byte| *byte == 0).unwrap_or(tail.len());
		Some(String::from_utf8_lossy(&tail[..end]).into_owned())
	}
}

/// Name table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
	/// Name index.
	pub index: u16,
	/// Name text.
	pub name: String,
}

/// Name table record (opcode 114).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
	/// Next available name index.
	pub next_index: u16,
	/// Entries in record order.
	pub entries: Vec<NameEntry>,
}

impl NameTable {
	/// Parse the table, across continuations.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let count = r.read_u32()?;
		let next_index = r.read_u16()?;
		require(r, "name table", u64::from(count) * 6)?;

		let mut entries = Vec::with_capacity(count as usize);
		for _ in 0..count {
			let length = r.read_u32()?;
			if length < 6 {
				return Err(FltError::RecordSizeMismatch {
					name: "name table entry",
					expected: 6,
					actual: u16::try_from(length).unwrap_or(u16::MAX),
				});
			}
			let index = r.read_u16()?;
			require(r, "name table entry", u64::from(length - 6))?;
			let name = r.read_string((length - 6) as usize)?;
			entries.push(NameEntry { index, name });
		}
		Ok(Self { next_index, entries })
	}
}

/// Texture and UV set reference of an extended material component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerRef {
	/// Texture index.
	pub texture: Option<u32>,
	/// UV set.
	pub uv_set: u32,
}

fn read_layers(r: &mut impl ReadBe) -> Result<[LayerRef; 4]> {
	let mut layers = [LayerRef { texture: None, uv_set: 0 }; 4];
	for layer in &mut layers {
		layer.texture = index_u32(r.read_u32()?);
		layer.uv_set = r.read_u32()?;
	}
	Ok(layers)
}

/// Extended material header record (opcode 135).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialHeader {
	/// Material index.
	pub index: u32,
	/// Material name.
	pub name: String,
	/// Flag word.
	pub flags: u32,
	/// Shade model: 0 fixed, 1 per-vertex, 2 per-pixel.
	pub shade_model: u32,
}

impl MaterialHeader {
	/// Parse the header body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let index = r.read_u32()?;
		let name = r.read_string(12)?;
		let flags = r.read_u32()?;
		let shade_model = r.read_u32()?;
		one_of("shade model", i64::from(shade_model), &[0, 1, 2])?;
		Ok(Self {
			index,
			name,
			flags,
			shade_model,
		})
	}
}

/// Ambient, diffuse or emissive component of an extended material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialColour {
	/// RGB.
	pub colour: [f32; 3],
	/// Texture layers.
	pub layers: [LayerRef; 4],
}

impl MaterialColour {
	/// Parse the component body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self {
			colour: r.read_vec3f()?,
			layers: read_layers(r)?,
		})
	}
}

/// Specular component of an extended material (opcode 138).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSpecular {
	/// Shininess.
	pub shininess: f32,
	/// RGB.
	pub colour: [f32; 3],
	/// Texture layers.
	pub layers: [LayerRef; 4],
}

impl MaterialSpecular {
	/// Parse the specular body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self {
			shininess: r.read_f32()?,
			colour: r.read_vec3f()?,
			layers: read_layers(r)?,
		})
	}
}

/// Alpha component of an extended material (opcode 140).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialAlpha {
	/// Alpha.
	pub alpha: f32,
	/// Texture layers.
	pub layers: [LayerRef; 4],
	/// Quality: 0 low, 1 high.
	pub quality: u32,
}

impl MaterialAlpha {
	/// Parse the alpha body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let alpha = r.read_f32()?;
		let layers = read_layers(r)?;
		let quality = r.read_u32()?;
		one_of("alpha quality", i64::from(quality), &[0, 1])?;
		Ok(Self { alpha, layers, quality })
	}
}

/// Light, normal, bump or shadow map of an extended material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialMap {
	/// Maximum intensity, for light and shadow maps.
	pub max_intensity: Option<f32>,
	/// Texture index.
	pub texture: Option<u32>,
	/// UV set.
	pub uv_set: u32,
	/// Tangent and binormal UV sets, for bump maps.
	pub tangent_binormal: Option<[u32; 2]>,
}

impl MaterialMap {
	/// Parse a light or shadow map body.
	pub fn parse_intensity(r: &mut impl ReadBe) -> Result<Self> {
		let max_intensity = Some(r.read_f32()?);
		Ok(Self {
			max_intensity,
			..Self::parse_plain(r)?
		})
	}

	/// Parse a normal map body.
	pub fn parse_plain(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self {
			max_intensity: None,
			texture: index_u32(r.read_u32()?),
			uv_set: r.read_u32()?,
			tangent_binormal: None,
		})
	}

	/// Parse a bump map body.
	pub fn parse_bump(r: &mut impl ReadBe) -> Result<Self> {
		let plain = Self::parse_plain(r)?;
		Ok(Self {
			tangent_binormal: Some([r.read_u32()?, r.read_u32()?]),
			..plain
		})
	}
}

/// Reflection map of an extended material (opcode 147).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialReflection {
	/// Tint RGB.
	pub tint: [f32; 3],
	/// Reflection texture index.
	pub texture: Option<u32>,
	/// Reflection UV set.
	pub uv_set: u32,
	/// Environment texture index.
	pub environment: Option<u32>,
}

impl MaterialReflection {
	/// Parse the reflection body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let reflection = Self {
			tint: r.read_vec3f()?,
			texture: index_u32(r.read_u32()?),
			uv_set: r.read_u32()?,
			environment: index_u32(r.read_u32()?),
		};
		r.skip(4)?;
		Ok(reflection)
	}
}
