#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use fltdoc_testkit::{Fixture, RecordWriter};

pub fn run_fltdoc(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_fltdoc")).args(args).output().expect("fltdoc command executes")
}

pub fn run_fltdoc_json(args: &[&str]) -> serde_json::Value {
	let output = run_fltdoc(args);
	assert!(
		output.status.success(),
		"fltdoc command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

pub fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn arg(path: &Path) -> String {
	path.display().to_string()
}

/// Write a small scene: a group holding an object and a face, an instance, a
/// vertex palette and one external reference to `part.flt`.
pub fn write_scene(fixture: &Fixture) -> PathBuf {
	let mut part = RecordWriter::with_header(1640);
	part.object("part");
	fixture.write("part.flt", &part.finish()).expect("part fixture");

	let mut root = RecordWriter::with_header(1640);
	root.vertex_palette(88)
		.vertex([1.0, 2.0, 3.0])
		.vertex([4.0, 5.0, 6.0])
		.instance_definition(3)
		.object("shared")
		.pop()
		.group("g1")
		.push()
		.object("o1")
		.push()
		.face("f1", -1)
		.vertex_list(&[8, 48])
		.pop()
		.instance_reference(3)
		.external_reference("part.flt")
		.pop();
	fixture.write("scene.flt", &root.finish()).expect("scene fixture")
}
