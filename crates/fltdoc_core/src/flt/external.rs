use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::flt::document::{Session, decode};
use crate::flt::{Document, FltError, Result, TextureAttributes, Warning};

/// One loaded external resource.
#[derive(Debug, Clone, PartialEq)]
pub enum External {
	/// Nested database referenced by an external reference node.
	Database(Box<Document>),
	/// Texture attribute file referenced by a texture palette node.
	Attributes(TextureAttributes),
	/// Attribute file was missing and skipping was enabled.
	MissingAttributes,
}

impl External {
	/// Stable lowercase label.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Database(_) => "database",
			Self::Attributes(_) => "attributes",
			Self::MissingAttributes => "missing_attributes",
		}
	}
}

/// Resources loaded during one root parse, keyed by cleaned path.
///
/// Owned by the root [`Document`] and shared by every nested parse, so each
/// path is loaded at most once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalCache {
	entries: IndexMap<PathBuf, External>,
	active: Vec<PathBuf>,
}

impl ExternalCache {
	/// Number of cached resources.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return `true` when nothing was loaded.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Resource cached under `path`.
	pub fn get(&self, path: &Path) -> Option<&External> {
		self.entries.get(path)
	}

	/// Resources in load order.
	pub fn iter(&self) -> impl Iterator<Item = (&Path, &External)> + '_ {
		self.entries.iter().map(|(path, external)| (path.as_path(), external))
	}

	/// Mark `path` as being parsed up the current chain.
	pub(crate) fn enter(&mut self, path: PathBuf) {
		self.active.push(path);
	}

	pub(crate) fn leave(&mut self) {
		self.active.pop();
	}
}

/// Candidate locations for a stored path, in lookup order.
///
/// Backslashes become `/`. Candidates are the path as given when it is
/// absolute (or no base is known), the path joined to `base`, and the bare
/// file name inside `base`.
pub fn path_candidates(raw: &str, base: Option<&Path>) -> Vec<PathBuf> {
	let path = PathBuf::from(raw.trim().replace('\\', "/"));
	let mut out = Vec::new();
	if path.is_absolute() || base.is_none() {
		out.push(path.clone());
	}
	if let Some(base) = base {
		if !path.is_absolute() {
			out.push(base.join(&path));
		}
		if let Some(name) = path.file_name() {
			let bare = base.join(name);
			if !out.contains(&bare) {
				out.push(bare);
			}
		}
	}
	out
}

/// Resolve a stored path to an existing, canonical file path.
pub fn clean_path(raw: &str, base: Option<&Path>) -> Result<PathBuf> {
	path_candidates(raw, base)
		.into_iter()
		.find(|candidate| candidate.is_file())
		.map(|candidate| candidate.canonicalize())
		.transpose()?
		.ok_or_else(|| FltError::UnresolvedPath {
			raw: raw.to_owned(),
			base: base.map(Path::to_path_buf),
		})
}

/// Attribute file path of a texture image.
pub fn attribute_path(image: &Path) -> PathBuf {
	let mut path = image.as_os_str().to_owned();
	path.push(".attr");
	PathBuf::from(path)
}

/// Parse the database referenced by an external reference node, once.
pub(crate) fn load_database(session: &mut Session<'_>, raw: &str, base: Option<&Path>) -> Result<()> {
	let path = clean_path(raw, base)?;
	if session.cache.active.contains(&path) {
		return Err(FltError::ReferenceCycle { path });
	}
	if session.cache.entries.contains_key(&path) {
		tracing::trace!(path = %path.display(), "external database already loaded");
		return Ok(());
	}

	tracing::debug!(path = %path.display(), "loading external database");
	session.cache.enter(path.clone());
	let nested = File::open(&path)
		.map_err(FltError::from)
		.and_then(|file| decode(BufReader::new(file), Some(&path), session));
	session.cache.leave();

	let document = nested.map_err(|source| FltError::External {
		path: path.clone(),
		source: Box::new(source),
	})?;
	session.cache.entries.insert(path, External::Database(Box::new(document)));
	Ok(())
}

/// Load the attribute file of a texture palette entry, once.
pub(crate) fn load_texture(session: &mut Session<'_>, raw: &str, base: Option<&Path>, warnings: &mut Vec<Warning>) -> Result<()> {
	let candidates: Vec<PathBuf> = path_candidates(raw, base).iter().map(|image| attribute_path(image)).collect();

	for candidate in &candidates {
		let key = candidate.canonicalize().unwrap_or_else(|_| candidate.clone());
		if session.cache.entries.contains_key(&key) {
			return Ok(());
		}
		if let Some(attributes) = session.loader.load(candidate)? {
			tracing::debug!(path = %key.display(), "loaded texture attributes");
			session.cache.entries.insert(key, External::Attributes(attributes));
			return Ok(());
		}
	}

	let Some(key) = candidates.into_iter().next().filter(|_| session.options.skip_missing_textures) else {
		return Err(FltError::MissingTexture { raw: raw.to_owned() });
	};
	tracing::warn!(texture = raw, path = %key.display(), "texture attribute file missing, skipping");
	warnings.push(Warning::MissingAttributes {
		texture: raw.to_owned(),
		path: key.clone(),
	});
	session.cache.entries.insert(key, External::MissingAttributes);
	Ok(())
}
