use std::path::PathBuf;

use fltdoc::flt::{Document, ParseOptions, Result};

use crate::cmd::util::{emit_json, print_warnings};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Decode a database and print header metadata plus document counts.
pub fn run(args: Args, options: &ParseOptions) -> Result<()> {
	let Args { path, json } = args;

	let doc = Document::read_file(&path, options)?;
	let header = doc.header();
	let counts = CountsJson {
		tree_roots: doc.tree().len(),
		nodes: doc.node_count(),
		instances: doc.instances().len(),
		vertices: doc.vertices().len(),
		vertex_lists: doc.vertex_lists().len(),
		textures: doc.textures().len(),
		externals: doc.externals().len(),
		warnings: doc.warnings().len(),
	};

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			name: header.name.clone(),
			revision: header.revision.raw(),
			revision_label: header.revision.label(),
			edit_revision: header.edit_revision,
			last_revision: header.last_revision.clone(),
			units: header.units.symbol(),
			projection: header.projection.label(),
			ellipsoid: header.ellipsoid.label(),
			origin: format!("{:?}", header.origin),
			counts,
			warnings: doc.warnings().iter().map(ToString::to_string).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("name: {}", header.name);
	println!("revision: {} ({})", header.revision.label(), header.revision.raw());
	println!("edit_revision: {}", header.edit_revision);
	println!("last_revision: {}", header.last_revision);
	println!("units: {}", header.units.symbol());
	println!("projection: {}", header.projection.label());
	println!("ellipsoid: {}", header.ellipsoid.label());
	println!("origin: {:?}", header.origin);
	println!("tree_roots: {}", counts.tree_roots);
	println!("nodes: {}", counts.nodes);
	println!("instances: {}", counts.instances);
	println!("vertices: {}", counts.vertices);
	println!("vertex_lists: {}", counts.vertex_lists);
	println!("textures: {}", counts.textures);
	println!("externals: {}", counts.externals);
	print_warnings(doc.warnings());
	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	name: String,
	revision: i32,
	revision_label: &'static str,
	edit_revision: i32,
	last_revision: String,
	units: &'static str,
	projection: &'static str,
	ellipsoid: &'static str,
	origin: String,
	counts: CountsJson,
	warnings: Vec<String>,
}

#[derive(serde::Serialize)]
struct CountsJson {
	tree_roots: usize,
	nodes: usize,
	instances: usize,
	vertices: usize,
	vertex_lists: usize,
	textures: usize,
	externals: usize,
	warnings: usize,
}
