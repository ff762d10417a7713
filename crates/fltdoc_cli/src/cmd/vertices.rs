use std::path::PathBuf;

use fltdoc::flt::{Document, ParseOptions, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub limit: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Decode a database and list vertex palette entries in offset order.
pub fn run(args: Args, options: &ParseOptions) -> Result<()> {
	let Args { path, limit, json } = args;

	let doc = Document::read_file(&path, options)?;
	let total = doc.vertices().len();
	let shown: Vec<VertexJson> = doc
		.vertices()
		.iter()
		.take(limit.unwrap_or(usize::MAX))
		.map(|(offset, vertex)| VertexJson {
			offset,
			kind: format!("{:?}", vertex.kind),
			position: vertex.position,
		})
		.collect();

	if json {
		let payload = VerticesJson {
			path: path.display().to_string(),
			total,
			vertices: shown,
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("vertices: {total}");
	println!("offset\tkind\tx\ty\tz");
	for item in &shown {
		let [x, y, z] = item.position;
		println!("{}\t{}\t{x}\t{y}\t{z}", item.offset, item.kind);
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct VerticesJson {
	path: String,
	total: usize,
	vertices: Vec<VertexJson>,
}

#[derive(serde::Serialize)]
struct VertexJson {
	offset: u32,
	kind: String,
	position: [f64; 3],
}
