use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use crate::flt::cursor::{ChunkCursor, ReadBe, StreamCursor};
use crate::flt::external::{load_database, load_texture};
use crate::flt::record::{self, Decoded};
use crate::flt::{
	AttrFileLoader, AttributeLoader, Builder, ExternalCache, FltError, Header, Instances, Layout, Node, Opcode, Record, RecordSize, Registry, Result,
	Revision, Scale, TexturePalette, Translate, Validated, Vertex, read_body, validate,
};

/// Per-record narration: `debug` when verbose, `trace` otherwise.
macro_rules! narrate {
	($verbose:expr, $($arg:tt)+) => {
		if $verbose {
			tracing::debug!($($arg)+);
		} else {
			tracing::trace!($($arg)+);
		}
	};
}

/// Configuration consumed by the decoding engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
	/// Store a sentinel instead of failing when a texture attribute file is missing.
	pub skip_missing_textures: bool,
	/// Raise per-record narration from `trace` to `debug`.
	pub verbose: bool,
	/// Load external databases and texture attribute files.
	pub resolve_externals: bool,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self {
			skip_missing_textures: false,
			verbose: false,
			resolve_externals: true,
		}
	}
}

/// Recoverable anomaly recorded on a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
	/// Header length other than 324 tolerated for this revision.
	HeaderLength {
		/// Header revision.
		revision: Revision,
		/// Declared header length.
		length: u16,
	},
	/// Texture attribute file missing while skipping was enabled.
	MissingAttributes {
		/// Texture path as stored.
		texture: String,
		/// Attribute path recorded in the cache.
		path: PathBuf,
	},
}

impl fmt::Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::HeaderLength { revision, length } => {
				write!(f, "header length {length} tolerated for {}", revision.label())
			}
			Self::MissingAttributes { texture, path } => {
				write!(f, "texture {texture:?} has no attribute file ({})", path.display())
			}
		}
	}
}

/// Vertex palette entries keyed by byte offset from the palette record start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexIndex {
	entries: BTreeMap<u32, Vertex>,
}

impl VertexIndex {
	/// Vertex stored at `offset`.
	pub fn get(&self, offset: u32) -> Option<&Vertex> {
		self.entries.get(&offset)
	}

	/// Number of vertices.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return `true` when no vertex was read.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Vertices in offset order.
	pub fn iter(&self) -> impl Iterator<Item = (u32, &Vertex)> + '_ {
		self.entries.iter().map(|(offset, vertex)| (*offset, vertex))
	}
}

/// One vertex list together with the records in effect when it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexListTrace {
	/// Vertex palette offsets.
	pub offsets: Vec<u32>,
	/// Texture pattern of the most recent face or mesh.
	pub texture: Option<i16>,
	/// Most recent scale record.
	pub scale: Option<Scale>,
	/// Most recent translate record.
	pub translate: Option<Translate>,
}

/// Fully decoded database.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
	path: Option<PathBuf>,
	header: Header,
	layout: Layout,
	tree: Vec<Node>,
	instances: Instances,
	vertices: VertexIndex,
	vertex_lists: Vec<VertexListTrace>,
	textures: Vec<TexturePalette>,
	externals: ExternalCache,
	warnings: Vec<Warning>,
}

impl Document {
	/// Read and decode a database file.
	pub fn read_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<Self> {
		Self::read_file_with_loader(path, options, &AttrFileLoader)
	}

	/// Read a database file, loading texture attributes through `loader`.
	pub fn read_file_with_loader(path: impl AsRef<Path>, options: &ParseOptions, loader: &dyn AttributeLoader) -> Result<Self> {
		let path = path.as_ref().canonicalize()?;
		let file = File::open(&path)?;
		let mut session = Session::new(options, loader);
		session.cache.enter(path.clone());
		let mut document = decode(BufReader::new(file), Some(&path), &mut session)?;
		session.cache.leave();
		document.externals = session.cache;
		Ok(document)
	}

	/// Decode a database from an in-memory or already opened source.
	///
	/// Relative external paths resolve against the working directory.
	pub fn read_from<R: Read + Seek>(source: R, options: &ParseOptions) -> Result<Self> {
		let mut session = Session::new(options, &AttrFileLoader);
		let mut document = decode(source, None, &mut session)?;
		document.externals = session.cache;
		Ok(document)
	}

	/// Canonical path of the decoded file, when read from disk.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// Header metadata.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Layout derived from the header revision.
	pub fn layout(&self) -> Layout {
		self.layout
	}

	/// Root forest.
	pub fn tree(&self) -> &[Node] {
		&self.tree
	}

	/// Instance definitions.
	pub fn instances(&self) -> &Instances {
		&self.instances
	}

	/// Vertex palette entries.
	pub fn vertices(&self) -> &VertexIndex {
		&self.vertices
	}

	/// Vertex list trace in stream order.
	pub fn vertex_lists(&self) -> &[VertexListTrace] {
		&self.vertex_lists
	}

	/// Texture palette entries in stream order.
	pub fn textures(&self) -> &[TexturePalette] {
		&self.textures
	}

	/// External resources; empty on nested documents.
	pub fn externals(&self) -> &ExternalCache {
		&self.externals
	}

	/// Recoverable anomalies.
	pub fn warnings(&self) -> &[Warning] {
		&self.warnings
	}

	/// Nodes in the root forest, instance contents excluded.
	pub fn node_count(&self) -> usize {
		self.tree.iter().map(Node::count).sum()
	}
}

/// State shared by a root parse and every nested parse below it.
pub(crate) struct Session<'a> {
	pub(crate) options: &'a ParseOptions,
	pub(crate) loader: &'a dyn AttributeLoader,
	pub(crate) cache: ExternalCache,
}

impl<'a> Session<'a> {
	fn new(options: &'a ParseOptions, loader: &'a dyn AttributeLoader) -> Self {
		Self {
			options,
			loader,
			cache: ExternalCache::default(),
		}
	}
}

/// Validate and decode one database stream.
pub(crate) fn decode<R: Read + Seek>(source: R, path: Option<&Path>, session: &mut Session<'_>) -> Result<Document> {
	let Validated {
		mut stream,
		header,
		layout,
		warnings,
		..
	} = validate(source)?;

	let mut pass = Pass {
		registry: Registry::new(layout),
		base: path.and_then(Path::parent).map(Path::to_path_buf),
		builder: Builder::new(),
		vertices: VertexIndex::default(),
		palette_start: None,
		vertex_lists: Vec::new(),
		textures: Vec::new(),
		warnings,
		texture: None,
		scale: None,
		translate: None,
	};

	let mut previous = None;
	loop {
		let offset = stream.position();
		let Some(raw) = stream.read_opcode()? else {
			break;
		};
		pass.record(&mut stream, raw, offset, session).map_err(|source| FltError::AtRecord {
			opcode: raw,
			name: Opcode::from_raw(raw).map_or("unknown", Opcode::name),
			offset,
			previous,
			source: Box::new(source),
		})?;
		previous = Some(raw);
	}

	let (tree, instances) = pass.builder.finish();
	tracing::debug!(
		nodes = tree.len(),
		instances = instances.len(),
		vertices = pass.vertices.len(),
		"record stream decoded"
	);

	Ok(Document {
		path: path.map(Path::to_path_buf),
		header,
		layout,
		tree,
		instances,
		vertices: pass.vertices,
		vertex_lists: pass.vertex_lists,
		textures: pass.textures,
		externals: ExternalCache::default(),
		warnings: pass.warnings,
	})
}

/// Mutable state of one forward pass over the record stream.
struct Pass {
	registry: Registry,
	base: Option<PathBuf>,
	builder: Builder,
	vertices: VertexIndex,
	palette_start: Option<u64>,
	vertex_lists: Vec<VertexListTrace>,
	textures: Vec<TexturePalette>,
	warnings: Vec<Warning>,
	texture: Option<i16>,
	scale: Option<Scale>,
	translate: Option<Translate>,
}

impl Pass {
	fn record<R: Read + Seek>(&mut self, stream: &mut StreamCursor<R>, raw: i16, offset: u64, session: &mut Session<'_>) -> Result<()> {
		let entry = self.registry.lookup(raw)?;
		let opcode = entry.opcode;
		match opcode {
			Opcode::Header => return Err(FltError::UnexpectedHeader),
			Opcode::Continuation => return Err(FltError::UnexpectedContinuation),
			_ => {}
		}
		narrate!(session.options.verbose, opcode = raw, record = entry.name(), offset, "record");

		if !entry.size.has_length() {
			return Ok(());
		}

		let length = stream.read_u16()?;
		let decoded = match entry.size {
			RecordSize::Padding => Decoded::Skip,
			RecordSize::Fixed(size) => {
				if length != size {
					return Err(FltError::RecordSizeMismatch {
						name: entry.name(),
						expected: size,
						actual: length,
					});
				}
				let decoded = record::parse_fixed(opcode, stream, self.registry.layout())?;
				let consumed = stream.position() - offset;
				if consumed != u64::from(size) {
					return Err(FltError::LayoutMismatch {
						name: entry.name(),
						declared: size,
						consumed,
					});
				}
				decoded
			}
			RecordSize::Variable | RecordSize::Chunked => {
				let chunk = read_body(stream, entry.name(), length, entry.size == RecordSize::Chunked)?;
				if opcode.is_reserved() {
					Decoded::Skip
				} else {
					record::parse_variable(opcode, &mut ChunkCursor::new(&chunk.bytes, chunk.start))?
				}
			}
		};

		match decoded {
			Decoded::Node(record) => {
				self.observe(&record, offset, session)?;
				self.builder.add(record);
			}
			Decoded::Vertex(vertex) => {
				let start = self.palette_start.ok_or(FltError::VertexOutsidePalette)?;
				let relative = u32::try_from(offset - start).map_err(|_| FltError::VertexOutsidePalette)?;
				self.vertices.entries.insert(relative, vertex);
			}
			Decoded::Push(kind) => self.builder.push(kind),
			Decoded::Pop(kind) => self.builder.pop(kind)?,
			Decoded::BeginInstance(id) => self.builder.begin_instance(id)?,
			Decoded::ReferenceInstance(id) => self.builder.reference(id)?,
			Decoded::Skip => {}
		}
		Ok(())
	}

	/// Update derived indices and trigger external loads for one node.
	fn observe(&mut self, record: &Record, offset: u64, session: &mut Session<'_>) -> Result<()> {
		match record {
			Record::VertexPalette(_) => self.palette_start = Some(offset),
			Record::Face(face) => self.texture = face.surface.texture,
			Record::Mesh(mesh) => self.texture = mesh.surface.texture,
			Record::Scale(scale) => self.scale = Some(*scale),
			Record::Translate(translate) => self.translate = Some(*translate),
			Record::VertexList(list) => self.vertex_lists.push(VertexListTrace {
				offsets: list.offsets.clone(),
				texture: self.texture,
				scale: self.scale,
				translate: self.translate,
			}),
			Record::TexturePalette(texture) => {
				self.textures.push(texture.clone());
				if session.options.resolve_externals {
					load_texture(session, &texture.path, self.base.as_deref(), &mut self.warnings)?;
				}
			}
			Record::ExternalReference(external) if session.options.resolve_externals => {
				load_database(session, &external.path, self.base.as_deref())?;
			}
			_ => {}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
