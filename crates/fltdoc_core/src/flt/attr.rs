use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::flt::cursor::{ChunkCursor, ReadBe};
use crate::flt::{FltError, Result};

/// Leading fixed fields of a texture attribute file.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureAttributes {
	/// Texel count along u.
	pub texels_u: i32,
	/// Texel count along v.
	pub texels_v: i32,
	/// Up vector, x then y.
	pub up_vector: [i32; 2],
	/// Image file format code.
	pub file_format: i32,
	/// Minification filter code.
	pub min_filter: i32,
	/// Magnification filter code.
	pub mag_filter: i32,
	/// Wrap mode for both axes.
	pub wrap: i32,
	/// Wrap mode along u.
	pub wrap_u: i32,
	/// Wrap mode along v.
	pub wrap_v: i32,
	/// Real-world size along u.
	pub real_world_u: f64,
	/// Real-world size along v.
	pub real_world_v: f64,
	/// Every byte after the decoded fields.
	pub rest: Vec<u8>,
}

/// Bytes read before [`TextureAttributes::rest`] starts.
const FIXED_LEN: usize = 116;

impl TextureAttributes {
	/// Decode the fixed leading fields of an attribute file image.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let mut r = ChunkCursor::new(bytes, 0);
		let texels_u = r.read_i32()?;
		let texels_v = r.read_i32()?;
		r.skip(8)?;
		let up_vector = [r.read_i32()?, r.read_i32()?];
		let file_format = r.read_i32()?;
		let min_filter = r.read_i32()?;
		let mag_filter = r.read_i32()?;
		let wrap = r.read_i32()?;
		let wrap_u = r.read_i32()?;
		let wrap_v = r.read_i32()?;
		// modified flag, pivot, environment type, intensity-as-alpha, spares
		r.skip(52)?;
		let real_world_u = r.read_f64()?;
		let real_world_v = r.read_f64()?;
		Ok(Self {
			texels_u,
			texels_v,
			up_vector,
			file_format,
			min_filter,
			mag_filter,
			wrap,
			wrap_u,
			wrap_v,
			real_world_u,
			real_world_v,
			rest: r.read_rest().to_vec(),
		})
	}
}

/// Collaborator that turns an attribute file path into attributes.
pub trait AttributeLoader {
	/// Load attributes at `path`, or `None` when no such file exists.
	fn load(&self, path: &Path) -> Result<Option<TextureAttributes>>;
}

/// Default loader reading attribute files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttrFileLoader;

impl AttributeLoader for AttrFileLoader {
	fn load(&self, path: &Path) -> Result<Option<TextureAttributes>> {
		let bytes = match fs::read(path) {
			Ok(bytes) => bytes,
			Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
			Err(err) => return Err(err.into()),
		};
		if bytes.len() < FIXED_LEN {
			return Err(invalid(path, "shorter than the fixed attribute fields"));
		}
		TextureAttributes::parse(&bytes).map(Some).map_err(|_| invalid(path, "undecodable attribute fields"))
	}
}

fn invalid(path: &Path, reason: &'static str) -> FltError {
	FltError::InvalidAttributes {
		path: PathBuf::from(path),
		reason,
	}
}
