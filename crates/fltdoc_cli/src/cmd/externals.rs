use std::path::PathBuf;

use fltdoc::flt::{Document, ParseOptions, Result};

use crate::cmd::util::{emit_json, external_summary};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Decode a database and list every external resource it loaded.
pub fn run(args: Args, options: &ParseOptions) -> Result<()> {
	let Args { path, json } = args;

	let doc = Document::read_file(&path, options)?;

	if json {
		let payload = ExternalsJson {
			path: path.display().to_string(),
			externals: doc
				.externals()
				.iter()
				.map(|(path, external)| ExternalJson {
					path: path.display().to_string(),
					kind: external.kind(),
					summary: external_summary(external),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("externals: {}", doc.externals().len());
	println!("kind\tpath\tsummary");
	for (path, external) in doc.externals().iter() {
		println!("{}\t{}\t{}", external.kind(), path.display(), external_summary(external));
	}
	Ok(())
}

#[derive(serde::Serialize)]
struct ExternalsJson {
	path: String,
	externals: Vec<ExternalJson>,
}

#[derive(serde::Serialize)]
struct ExternalJson {
	path: String,
	kind: &'static str,
	summary: String,
}
