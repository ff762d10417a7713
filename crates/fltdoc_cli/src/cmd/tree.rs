use std::path::PathBuf;

use fltdoc::flt::{Document, Instances, Node, ParseOptions, Record, Result};

use crate::cmd::util::{emit_json, record_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Deepest level to print; roots are level 0.
	#[arg(long)]
	pub depth: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Decode a database and print its node forest.
pub fn run(args: Args, options: &ParseOptions) -> Result<()> {
	let Args { path, depth, json } = args;
	let max_depth = depth.unwrap_or(usize::MAX);

	let doc = Document::read_file(&path, options)?;

	if json {
		let payload = TreeJson {
			path: path.display().to_string(),
			roots: doc.tree().iter().map(|node| node_json(node, 0, max_depth)).collect(),
			instances: doc
				.instances()
				.iter()
				.map(|(id, nodes)| InstanceJson {
					id,
					nodes: nodes.iter().map(|node| node_json(node, 0, max_depth)).collect(),
				})
				.collect(),
		};
		return emit_json(&payload);
	}

	let mut out = String::new();
	for node in doc.tree() {
		render_node(&mut out, node, doc.instances(), 0, max_depth);
	}
	print!("{out}");
	Ok(())
}

fn render_node(out: &mut String, node: &Node, instances: &Instances, level: usize, max_depth: usize) {
	out.push_str(&"  ".repeat(level));
	out.push_str(&record_label(&node.record));
	out.push('\n');
	if level >= max_depth {
		return;
	}

	if let Record::InstanceReference(reference) = &node.record {
		for shared in instances.resolve(reference.handle).unwrap_or_default() {
			render_node(out, shared, instances, level + 1, max_depth);
		}
	}
	for child in &node.children {
		render_node(out, child, instances, level + 1, max_depth);
	}
}

fn node_json(node: &Node, level: usize, max_depth: usize) -> NodeJson {
	let truncated = level >= max_depth && !node.children.is_empty();
	NodeJson {
		opcode: node.record.opcode().raw(),
		name: node.record.name(),
		id: node.record.id().filter(|id| !id.is_empty()).map(str::to_owned),
		instance: match &node.record {
			Record::InstanceReference(reference) => Some(reference.id),
			_ => None,
		},
		children: if truncated {
			Vec::new()
		} else {
			node.children.iter().map(|child| node_json(child, level + 1, max_depth)).collect()
		},
		truncated,
	}
}

#[derive(serde::Serialize)]
struct TreeJson {
	path: String,
	roots: Vec<NodeJson>,
	instances: Vec<InstanceJson>,
}

#[derive(serde::Serialize)]
struct InstanceJson {
	id: u16,
	nodes: Vec<NodeJson>,
}

#[derive(serde::Serialize)]
struct NodeJson {
	opcode: i16,
	name: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	instance: Option<u16>,
	children: Vec<NodeJson>,
	#[serde(skip_serializing_if = "std::ops::Not::not")]
	truncated: bool,
}
