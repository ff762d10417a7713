use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use fltdoc::flt::{Result, validate};

use crate::cmd::util::{emit_json, print_warnings};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Validate file alignment and the header record without decoding the stream.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let validated = validate(BufReader::new(File::open(&path)?))?;
	let header = &validated.header;

	if json {
		let payload = CheckJson {
			path: path.display().to_string(),
			name: header.name.clone(),
			revision: header.revision.raw(),
			revision_label: header.revision.label(),
			resume: validated.resume,
			warnings: validated.warnings.iter().map(ToString::to_string).collect(),
		};
		return emit_json(&payload);
	}

	println!("path: {}", path.display());
	println!("name: {}", header.name);
	println!("revision: {} ({})", header.revision.label(), header.revision.raw());
	println!("resume: {}", validated.resume);
	print_warnings(&validated.warnings);
	Ok(())
}

#[derive(serde::Serialize)]
struct CheckJson {
	path: String,
	name: String,
	revision: i32,
	revision_label: &'static str,
	resume: u64,
	warnings: Vec<String>,
}
