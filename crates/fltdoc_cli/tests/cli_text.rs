#![allow(missing_docs)]

mod support;

use fltdoc_testkit::{Fixture, RecordWriter};
use support::{arg, run_fltdoc, stdout, write_scene};

#[test]
fn tree_text_indents_and_expands_instances() {
	let fixture = Fixture::new().expect("fixture");
	let scene = arg(&write_scene(&fixture));
	let output = run_fltdoc(&["tree", &scene]);
	assert!(output.status.success());

	let text = stdout(&output);
	assert!(text.contains("\ngroup g1\n"), "{text}");
	assert!(text.contains("\n  object o1\n    face f1\n"), "{text}");
	assert!(text.contains("\n  instance reference 3\n    object shared\n"), "{text}");
	assert!(text.contains("\n  external reference part.flt\n"), "{text}");
}

#[test]
fn check_text_prints_resume_offset() {
	let fixture = Fixture::new().expect("fixture");
	let scene = arg(&write_scene(&fixture));
	let output = run_fltdoc(&["check", &scene]);
	assert!(output.status.success());
	assert!(stdout(&output).contains("resume: 324\n"));
}

#[test]
fn decode_errors_exit_with_status_one() {
	let fixture = Fixture::new().expect("fixture");
	let mut writer = RecordWriter::with_header(1640);
	writer.record(6, &[0; 4]);
	let path = arg(&fixture.write("obsolete.flt", &writer.finish()).expect("fixture"));

	let output = run_fltdoc(&["info", &path]);
	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error (obsolete_opcode)"), "{stderr}");
	assert!(stderr.contains("obsolete opcode 6"), "{stderr}");
}

#[test]
fn check_rejects_non_openflight_files() {
	let fixture = Fixture::new().expect("fixture");
	let path = arg(&fixture.write("junk.flt", b"JUNKJUNK").expect("fixture"));

	let output = run_fltdoc(&["check", &path]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("error (structural)"));
}
