use crate::flt::Result;
use crate::flt::cursor::{ChunkCursor, ReadBe};
use crate::flt::record::{index_i16, one_of};

/// Light source record (opcode 101).
#[derive(Debug, Clone, PartialEq)]
pub struct LightSource {
	/// ASCII identifier.
	pub id: String,
	/// Index into the light source palette.
	pub palette_index: u32,
	/// Flag word.
	pub flags: u32,
	/// Position of the light.
	pub position: [f64; 3],
	/// Yaw in degrees.
	pub yaw: f32,
	/// Pitch in degrees.
	pub pitch: f32,
}

impl LightSource {
	/// Parse the light source body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		let palette_index = r.read_u32()?;
		r.skip(4)?;
		let flags = r.read_u32()?;
		r.skip(4)?;
		Ok(Self {
			id,
			palette_index,
			flags,
			position: r.read_vec3d()?,
			yaw: r.read_f32()?,
			pitch: r.read_f32()?,
		})
	}
}

/// Light source palette entry (opcode 102).
#[derive(Debug, Clone, PartialEq)]
pub struct LightSourcePalette {
	/// Palette index.
	pub index: u32,
	/// Light name.
	pub name: String,
	/// Ambient RGBA.
	pub ambient: [f32; 4],
	/// Diffuse RGBA.
	pub diffuse: [f32; 4],
	/// Specular RGBA.
	pub specular: [f32; 4],
	/// Lighting type: 0 infinite, 1 local, 2 spot.
	pub kind: u32,
	/// Spot exponential dropoff term.
	pub spot_exponent: f32,
	/// Spot cutoff angle in degrees.
	pub spot_cutoff: f32,
	/// Yaw in degrees.
	pub yaw: f32,
	/// Pitch in degrees.
	pub pitch: f32,
	/// Constant, linear and quadratic attenuation coefficients.
	pub attenuation: [f32; 3],
	/// Active during modelling.
	pub modelling: bool,
}

impl LightSourcePalette {
	/// Parse the palette entry body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let index = r.read_u32()?;
		r.skip(8)?;
		let name = r.read_string(20)?;
		r.skip(4)?;
		let ambient = read_rgba(r)?;
		let diffuse = read_rgba(r)?;
		let specular = read_rgba(r)?;
		let kind = r.read_u32()?;
		one_of("lighting type", i64::from(kind), &[0, 1, 2])?;
		r.skip(40)?;
		let spot_exponent = r.read_f32()?;
		let spot_cutoff = r.read_f32()?;
		let yaw = r.read_f32()?;
		let pitch = r.read_f32()?;
		let attenuation = r.read_vec3f()?;
		let modelling = r.read_u32()?;
		one_of("modelling light", i64::from(modelling), &[0, 1])?;
		r.skip(76)?;
		Ok(Self {
			index,
			name,
			ambient,
			diffuse,
			specular,
			kind,
			spot_exponent,
			spot_cutoff,
			yaw,
			pitch,
			attenuation,
			modelling: modelling == 1,
		})
	}
}

fn read_rgba(r: &mut impl ReadBe) -> Result<[f32; 4]> {
	Ok([r.read_f32()?, r.read_f32()?, r.read_f32()?, r.read_f32()?])
}

/// Optical attributes shared by light points and light point appearances.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOptics {
	/// Intensity.
	pub intensity: f32,
	/// Back intensity for bidirectional points.
	pub back_intensity: f32,
	/// Minimum defocus.
	pub min_defocus: f32,
	/// Maximum defocus.
	pub max_defocus: f32,
	/// Fading mode: 0 enable perspective, 1 disable.
	pub fading_mode: u32,
	/// Fog punch mode: 0 off, 1 on.
	pub fog_punch_mode: u32,
	/// Directional mode: 0 off, 1 on.
	pub directional_mode: u32,
	/// Range mode: 0 depth, 1 slant range.
	pub range_mode: u32,
	/// Minimum pixel size.
	pub min_pixel_size: f32,
	/// Maximum pixel size.
	pub max_pixel_size: f32,
	/// Actual size.
	pub actual_size: f32,
	/// Transparent falloff pixel size.
	pub falloff_pixel_size: f32,
	/// Transparent falloff exponent.
	pub falloff_exponent: f32,
	/// Transparent falloff scalar.
	pub falloff_scalar: f32,
	/// Transparent falloff clamp.
	pub falloff_clamp: f32,
	/// Fog scalar.
	pub fog_scalar: f32,
	/// Size difference threshold.
	pub size_difference_threshold: f32,
	/// Directionality: 0 omni, 1 uni, 2 bidirectional.
	pub directionality: u32,
	/// Horizontal lobe angle.
	pub horizontal_lobe: f32,
	/// Vertical lobe angle.
	pub vertical_lobe: f32,
	/// Lobe roll angle.
	pub lobe_roll: f32,
	/// Directional falloff exponent.
	pub directional_falloff: f32,
	/// Directional ambient intensity.
	pub directional_ambient: f32,
}

impl PointOptics {
	/// Parse the 96-byte optics block.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let intensity = r.read_f32()?;
		let back_intensity = r.read_f32()?;
		let min_defocus = r.read_f32()?;
		let max_defocus = r.read_f32()?;
		let fading_mode = read_switch(r, "fading mode")?;
		let fog_punch_mode = read_switch(r, "fog punch mode")?;
		let directional_mode = read_switch(r, "directional mode")?;
		let range_mode = read_switch(r, "range mode")?;
		let min_pixel_size = r.read_f32()?;
		let max_pixel_size = r.read_f32()?;
		let actual_size = r.read_f32()?;
		let falloff_pixel_size = r.read_f32()?;
		let falloff_exponent = r.read_f32()?;
		let falloff_scalar = r.read_f32()?;
		let falloff_clamp = r.read_f32()?;
		let fog_scalar = r.read_f32()?;
		r.skip(4)?;
		let size_difference_threshold = r.read_f32()?;
		let directionality = r.read_u32()?;
		one_of("directionality", i64::from(directionality), &[0, 1, 2])?;

		Ok(Self {
			intensity,
			back_intensity,
			min_defocus,
			max_defocus,
			fading_mode,
			fog_punch_mode,
			directional_mode,
			range_mode,
			min_pixel_size,
			max_pixel_size,
			actual_size,
			falloff_pixel_size,
			falloff_exponent,
			falloff_scalar,
			falloff_clamp,
			fog_scalar,
			size_difference_threshold,
			directionality,
			horizontal_lobe: r.read_f32()?,
			vertical_lobe: r.read_f32()?,
			lobe_roll: r.read_f32()?,
			directional_falloff: r.read_f32()?,
			directional_ambient: r.read_f32()?,
		})
	}
}

fn read_switch(r: &mut impl ReadBe, field: &'static str) -> Result<u32> {
	let value = r.read_u32()?;
	one_of(field, i64::from(value), &[0, 1])?;
	Ok(value)
}

fn read_display_mode(r: &mut impl ReadBe) -> Result<u32> {
	let value = r.read_u32()?;
	one_of("display mode", i64::from(value), &[0, 1, 2])?;
	Ok(value)
}

/// Light point record (opcode 111).
#[derive(Debug, Clone, PartialEq)]
pub struct LightPoint {
	/// ASCII identifier.
	pub id: String,
	/// Surface material code.
	pub surface_material_code: u16,
	/// Feature ID.
	pub feature_id: u16,
	/// Back colour for bidirectional points.
	pub back_colour: u32,
	/// Display mode: 0 raster, 1 calligraphic, 2 either.
	pub display_mode: u32,
	/// Optical attributes.
	pub optics: PointOptics,
	/// Animation period in seconds.
	pub animation_period: f32,
	/// Animation phase delay in seconds.
	pub animation_phase_delay: f32,
	/// Animation enabled period in seconds.
	pub animation_enabled_period: f32,
	/// Significance.
	pub significance: f32,
	/// Calligraphic draw order.
	pub draw_order: i32,
	/// Flag word.
	pub flags: u32,
	/// Axis of rotation for rotating animation.
	pub axis: [f32; 3],
}

impl LightPoint {
	/// Parse the light point body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		let surface_material_code = r.read_u16()?;
		let feature_id = r.read_u16()?;
		let back_colour = r.read_u32()?;
		let display_mode = read_display_mode(r)?;
		let optics = PointOptics::parse(r)?;
		Ok(Self {
			id,
			surface_material_code,
			feature_id,
			back_colour,
			display_mode,
			optics,
			animation_period: r.read_f32()?,
			animation_phase_delay: r.read_f32()?,
			animation_enabled_period: r.read_f32()?,
			significance: r.read_f32()?,
			draw_order: r.read_i32()?,
			flags: r.read_u32()?,
			axis: r.read_vec3f()?,
		})
	}
}

/// Indexed light point record (opcode 130).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedLightPoint {
	/// ASCII identifier.
	pub id: String,
	/// Appearance palette index.
	pub appearance: i32,
	/// Animation palette index.
	pub animation: i32,
	/// Calligraphic draw order.
	pub draw_order: i32,
}

impl IndexedLightPoint {
	/// Parse the indexed light point body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let point = Self {
			id: r.read_string(8)?,
			appearance: r.read_i32()?,
			animation: r.read_i32()?,
			draw_order: r.read_i32()?,
		};
		r.skip(4)?;
		Ok(point)
	}
}

/// Light point system record (opcode 131).
#[derive(Debug, Clone, PartialEq)]
pub struct LightPointSystem {
	/// ASCII identifier.
	pub id: String,
	/// Intensity.
	pub intensity: f32,
	/// Animation state: 0 on, 1 off, 2 random.
	pub animation_state: u32,
	/// Flag word.
	pub flags: u32,
}

impl LightPointSystem {
	/// Parse the light point system body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		let intensity = r.read_f32()?;
		let animation_state = r.read_u32()?;
		one_of("animation state", i64::from(animation_state), &[0, 1, 2])?;
		let flags = r.read_u32()?;
		Ok(Self {
			id,
			intensity,
			animation_state,
			flags,
		})
	}
}

/// Light point appearance palette entry (opcode 128).
#[derive(Debug, Clone, PartialEq)]
pub struct LightPointAppearancePalette {
	/// Appearance name.
	pub name: String,
	/// Appearance index.
	pub index: u32,
	/// Surface material code.
	pub surface_material_code: u16,
	/// Feature ID.
	pub feature_id: u16,
	/// Back colour for bidirectional points.
	pub back_colour: u32,
	/// Display mode: 0 raster, 1 calligraphic, 2 either.
	pub display_mode: u32,
	/// Optical attributes.
	pub optics: PointOptics,
	/// Significance.
	pub significance: f32,
	/// Flag word.
	pub flags: u32,
	/// Visibility range.
	pub visibility_range: f32,
	/// Fade range ratio.
	pub fade_range_ratio: f32,
	/// Fade-in duration in seconds.
	pub fade_in: f32,
	/// Fade-out duration in seconds.
	pub fade_out: f32,
	/// LOD range ratio.
	pub lod_range_ratio: f32,
	/// LOD scale.
	pub lod_scale: f32,
	/// Texture pattern index.
	pub texture: Option<i16>,
}

impl LightPointAppearancePalette {
	/// Parse the appearance entry body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		let name = r.read_string(256)?;
		let index = r.read_u32()?;
		let surface_material_code = r.read_u16()?;
		let feature_id = r.read_u16()?;
		let back_colour = r.read_u32()?;
		let display_mode = read_display_mode(r)?;
		let optics = PointOptics::parse(r)?;
		let entry = Self {
			name,
			index,
			surface_material_code,
			feature_id,
			back_colour,
			display_mode,
			optics,
			significance: r.read_f32()?,
			flags: r.read_u32()?,
			visibility_range: r.read_f32()?,
			fade_range_ratio: r.read_f32()?,
			fade_in: r.read_f32()?,
			fade_out: r.read_f32()?,
			lod_range_ratio: r.read_f32()?,
			lod_scale: r.read_f32()?,
			texture: index_i16(r.read_i16()?),
		};
		r.skip(2)?;
		Ok(entry)
	}
}

/// One step of a light point animation sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sequence {
	/// State: 0 on, 1 off, 2 colour change.
	pub state: u32,
	/// Duration in seconds.
	pub duration: f32,
	/// Packed colour for colour-change steps.
	pub colour: u32,
}

/// Light point animation palette entry (opcode 129).
#[derive(Debug, Clone, PartialEq)]
pub struct LightPointAnimationPalette {
	/// Animation name.
	pub name: String,
	/// Animation index.
	pub index: u32,
	/// Animation period in seconds.
	pub period: f32,
	/// Animation phase delay in seconds.
	pub phase_delay: f32,
	/// Animation enabled period in seconds.
	pub enabled_period: f32,
	/// Axis of rotation.
	pub axis: [f32; 3],
	/// Flag word.
	pub flags: u32,
	/// Animation type: 0 flashing, 1 rotating, 2 strobe, 3 Morse code.
	pub kind: u32,
	/// Morse code timing: 0 standard, 1 Farnsworth.
	pub morse_timing: u32,
	/// Word rate for Farnsworth timing.
	pub word_rate: u32,
	/// Character rate for Farnsworth timing.
	pub character_rate: u32,
	/// Morse code text.
	pub morse: String,
	/// Animation steps.
	pub sequence: Vec<Sequence>,
}

impl LightPointAnimationPalette {
	/// Parse the animation entry and its sequence.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		r.skip(4)?;
		let name = r.read_string(256)?;
		let index = r.read_u32()?;
		let period = r.read_f32()?;
		let phase_delay = r.read_f32()?;
		let enabled_period = r.read_f32()?;
		let axis = r.read_vec3f()?;
		let flags = r.read_u32()?;
		let kind = r.read_u32()?;
		one_of("animation type", i64::from(kind), &[0, 1, 2, 3])?;
		let morse_timing = r.read_u32()?;
		let word_rate = r.read_u32()?;
		let character_rate = r.read_u32()?;
		let morse = r.read_string(1024)?;
		let count = r.read_u32()?;

		let mut sequence = Vec::with_capacity((count as usize).min(r.remaining() / 12));
		for _ in 0..count {
			sequence.push(Sequence {
				state: r.read_u32()?,
				duration: r.read_f32()?,
				colour: r.read_u32()?,
			});
		}

		Ok(Self {
			name,
			index,
			period,
			phase_delay,
			enabled_period,
			axis,
			flags,
			kind,
			morse_timing,
			word_rate,
			character_rate,
			morse,
			sequence,
		})
	}
}
