use crate::flt::Result;
use crate::flt::cursor::{ChunkCursor, ReadBe};
use crate::flt::record::one_of;

/// Road segment record (opcode 87).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadSegment {
	/// ASCII identifier.
	pub id: String,
}

impl RoadSegment {
	/// Parse the road segment body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self { id: r.read_string(8)? })
	}
}

/// Road zone record (opcode 88).
#[derive(Debug, Clone, PartialEq)]
pub struct RoadZone {
	/// Zone file name.
	pub file_name: String,
	/// Lower left corner, x and y.
	pub lower_left: [f64; 2],
	/// Upper right corner, x and y.
	pub upper_right: [f64; 2],
	/// Grid interval.
	pub grid_interval: f64,
	/// Number of posts along x.
	pub posts_x: u32,
	/// Number of posts along y.
	pub posts_y: u32,
}

impl RoadZone {
	/// Parse the road zone body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let file_name = r.read_string(120)?;
		r.skip(4)?;
		Ok(Self {
			file_name,
			lower_left: [r.read_f64()?, r.read_f64()?],
			upper_right: [r.read_f64()?, r.read_f64()?],
			grid_interval: r.read_f64()?,
			posts_x: r.read_u32()?,
			posts_y: r.read_u32()?,
		})
	}
}

/// Road path record (opcode 92).
#[derive(Debug, Clone, PartialEq)]
pub struct RoadPath {
	/// ASCII identifier.
	pub id: String,
	/// Path name.
	pub path_name: String,
	/// Speed limit.
	pub speed_limit: f64,
	/// No-passing flag.
	pub no_passing: bool,
	/// Vertex type: 1 tangent, 2 up.
	pub vertex_type: u32,
}

impl RoadPath {
	/// Parse the road path body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		let path_name = r.read_string(120)?;
		let speed_limit = r.read_f64()?;
		let no_passing = r.read_u32()? != 0;
		let vertex_type = r.read_u32()?;
		one_of("road path vertex type", i64::from(vertex_type), &[1, 2])?;
		r.skip(480)?;
		Ok(Self {
			id,
			path_name,
			speed_limit,
			no_passing,
			vertex_type,
		})
	}
}

/// Road construction record (opcode 127).
#[derive(Debug, Clone, PartialEq)]
pub struct RoadConstruction {
	/// ASCII identifier.
	pub id: String,
	/// Road type: 0 curve, 1 hill, 2 straight.
	pub road_type: u32,
	/// Road tools version.
	pub tools_version: u32,
	/// Entry control point.
	pub entry: [f64; 3],
	/// Alignment control point.
	pub alignment: [f64; 3],
	/// Exit control point.
	pub exit: [f64; 3],
	/// Arc radius.
	pub arc_radius: f64,
	/// Entry spiral length.
	pub entry_spiral: f64,
	/// Exit spiral length.
	pub exit_spiral: f64,
	/// Superelevation.
	pub superelevation: f64,
	/// Spiral type: 0 linear, 1 radial, 2 radial cubic.
	pub spiral_type: u32,
	/// Vertical parabola flag.
	pub vertical_parabola: u32,
	/// Vertical curve length.
	pub vertical_curve_length: f64,
	/// Minimum curve length.
	pub min_curve_length: f64,
	/// Entry slope.
	pub entry_slope: f64,
	/// Exit slope.
	pub exit_slope: f64,
}

impl RoadConstruction {
	/// Parse the road construction body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		let road_type = r.read_u32()?;
		one_of("road type", i64::from(road_type), &[0, 1, 2])?;
		let tools_version = r.read_u32()?;
		let entry = r.read_vec3d()?;
		let alignment = r.read_vec3d()?;
		let exit = r.read_vec3d()?;
		let arc_radius = r.read_f64()?;
		let entry_spiral = r.read_f64()?;
		let exit_spiral = r.read_f64()?;
		let superelevation = r.read_f64()?;
		let spiral_type = r.read_u32()?;
		one_of("spiral type", i64::from(spiral_type), &[0, 1, 2])?;
		let vertical_parabola = r.read_u32()?;

		Ok(Self {
			id,
			road_type,
			tools_version,
			entry,
			alignment,
			exit,
			arc_radius,
			entry_spiral,
			exit_spiral,
			superelevation,
			spiral_type,
			vertical_parabola,
			vertical_curve_length: r.read_f64()?,
			min_curve_length: r.read_f64()?,
			entry_slope: r.read_f64()?,
			exit_slope: r.read_f64()?,
		})
	}
}

/// Curve record (opcode 126).
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
	/// ASCII identifier.
	pub id: String,
	/// Curve type: 4 B-spline, 5 cardinal, 6 Bezier.
	pub curve_type: u32,
	/// Control points.
	pub control_points: Vec<[f64; 3]>,
}

impl Curve {
	/// Parse the curve header and control points.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let id = r.read_string(8)?;
		r.skip(4)?;
		let curve_type = r.read_u32()?;
		one_of("curve type", i64::from(curve_type), &[4, 5, 6])?;
		let count = r.read_u32()?;
		r.skip(4)?;

		let mut control_points = Vec::with_capacity((count as usize).min(r.remaining() / 24));
		for _ in 0..count {
			control_points.push(r.read_vec3d()?);
		}
		Ok(Self {
			id,
			curve_type,
			control_points,
		})
	}
}
