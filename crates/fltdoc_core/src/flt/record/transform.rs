use crate::flt::Result;
use crate::flt::cursor::{ChunkCursor, ReadBe};
use crate::flt::record::require;

/// 4x4 single-precision matrix record (opcodes 49 and 94), row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
	/// Matrix rows.
	pub rows: [[f32; 4]; 4],
}

impl Matrix {
	/// Parse the 16 matrix elements.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self { rows: r.read_matrix_f32()? })
	}
}

/// Vector record (opcode 50).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
	/// i, j and k components.
	pub components: [f32; 3],
}

impl Vector {
	/// Parse the vector body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		Ok(Self { components: r.read_vec3f()? })
	}
}

/// Replicate record (opcode 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replicate {
	/// Number of replications.
	pub count: u16,
}

impl Replicate {
	/// Parse the replicate body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		let count = r.read_u16()?;
		r.skip(2)?;
		Ok(Self { count })
	}
}

/// Translate record (opcode 78).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Translate {
	/// Origin of the translation.
	pub from: [f64; 3],
	/// Translation delta.
	pub delta: [f64; 3],
}

impl Translate {
	/// Parse the translate body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		Ok(Self {
			from: r.read_vec3d()?,
			delta: r.read_vec3d()?,
		})
	}
}

/// Scale record (opcode 79).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
	/// Scale centre.
	pub centre: [f64; 3],
	/// Per-axis scale factors.
	pub factors: [f32; 3],
}

impl Scale {
	/// Parse the scale body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		let centre = r.read_vec3d()?;
		let factors = r.read_vec3f()?;
		r.skip(4)?;
		Ok(Self { centre, factors })
	}
}

/// Rotate about edge record (opcode 76).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateAboutEdge {
	/// First point of the edge.
	pub first: [f64; 3],
	/// Second point of the edge.
	pub second: [f64; 3],
	/// Rotation angle in degrees.
	pub angle: f32,
}

impl RotateAboutEdge {
	/// Parse the rotate about edge body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		let first = r.read_vec3d()?;
		let second = r.read_vec3d()?;
		let angle = r.read_f32()?;
		r.skip(4)?;
		Ok(Self { first, second, angle })
	}
}

/// Rotate about point record (opcode 80).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateAboutPoint {
	/// Rotation centre.
	pub centre: [f64; 3],
	/// Rotation axis.
	pub axis: [f32; 3],
	/// Rotation angle in degrees.
	pub angle: f32,
}

impl RotateAboutPoint {
	/// Parse the rotate about point body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		Ok(Self {
			centre: r.read_vec3d()?,
			axis: r.read_vec3f()?,
			angle: r.read_f32()?,
		})
	}
}

/// Rotate and/or scale to point record (opcode 81).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateScaleToPoint {
	/// Scale centre.
	pub centre: [f64; 3],
	/// Reference point.
	pub reference: [f64; 3],
	/// Target point.
	pub to: [f64; 3],
	/// Overall scale factor.
	pub overall_scale: f32,
	/// Scale factor in the reference direction.
	pub directional_scale: f32,
	/// Rotation angle in degrees.
	pub angle: f32,
}

impl RotateScaleToPoint {
	/// Parse the rotate/scale body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		let record = Self {
			centre: r.read_vec3d()?,
			reference: r.read_vec3d()?,
			to: r.read_vec3d()?,
			overall_scale: r.read_f32()?,
			directional_scale: r.read_f32()?,
			angle: r.read_f32()?,
		};
		r.skip(4)?;
		Ok(record)
	}
}

/// Put record (opcode 82).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Put {
	/// Source origin.
	pub from_origin: [f64; 3],
	/// Source alignment point.
	pub from_align: [f64; 3],
	/// Source track point.
	pub from_track: [f64; 3],
	/// Destination origin.
	pub to_origin: [f64; 3],
	/// Destination alignment point.
	pub to_align: [f64; 3],
	/// Destination track point.
	pub to_track: [f64; 3],
}

impl Put {
	/// Parse the put body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		Ok(Self {
			from_origin: r.read_vec3d()?,
			from_align: r.read_vec3d()?,
			from_track: r.read_vec3d()?,
			to_origin: r.read_vec3d()?,
			to_align: r.read_vec3d()?,
			to_track: r.read_vec3d()?,
		})
	}
}

/// Bounding box record (opcode 74).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
	/// Lowest corner.
	pub min: [f64; 3],
	/// Highest corner.
	pub max: [f64; 3],
}

impl BoundingBox {
	/// Parse the bounding box body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		Ok(Self {
			min: r.read_vec3d()?,
			max: r.read_vec3d()?,
		})
	}
}

/// Bounding sphere record (opcode 105).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
	/// Sphere radius.
	pub radius: f64,
}

impl BoundingSphere {
	/// Parse the bounding sphere body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		Ok(Self { radius: r.read_f64()? })
	}
}

/// Bounding cylinder record (opcode 106).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCylinder {
	/// Cylinder radius.
	pub radius: f64,
	/// Cylinder height.
	pub height: f64,
}

impl BoundingCylinder {
	/// Parse the bounding cylinder body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		Ok(Self {
			radius: r.read_f64()?,
			height: r.read_f64()?,
		})
	}
}

/// Bounding convex hull record (opcode 107).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingConvexHull {
	/// Hull triangles, three corners each.
	pub triangles: Vec<[[f64; 3]; 3]>,
}

impl BoundingConvexHull {
	/// Parse the triangle count and triangles, across continuations.
	pub fn parse(r: &mut ChunkCursor<'_>) -> Result<Self> {
		let count = r.read_u32()?;
		require(r, "bounding convex hull", u64::from(count) * 72)?;
		let mut triangles = Vec::with_capacity(count as usize);
		for _ in 0..count {
			triangles.push([r.read_vec3d()?, r.read_vec3d()?, r.read_vec3d()?]);
		}
		Ok(Self { triangles })
	}
}

/// Bounding volume centre record (opcode 108).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolumeCentre {
	/// Centre point.
	pub centre: [f64; 3],
}

impl BoundingVolumeCentre {
	/// Parse the centre body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		Ok(Self { centre: r.read_vec3d()? })
	}
}

/// Bounding volume orientation record (opcode 109).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolumeOrientation {
	/// Yaw, pitch and roll in degrees.
	pub angles: [f64; 3],
}

impl BoundingVolumeOrientation {
	/// Parse the orientation body.
	pub fn parse(r: &mut impl ReadBe) -> Result<Self> {
		r.skip(4)?;
		Ok(Self { angles: r.read_vec3d()? })
	}
}
