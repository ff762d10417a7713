#![allow(missing_docs)]

use std::cell::Cell;
use std::path::{Path, PathBuf};

use fltdoc::flt::{AttributeLoader, Document, ErrorKind, External, FltError, ParseOptions, Record, TextureAttributes, Warning};
use fltdoc_testkit::{Body, Fixture, RecordWriter};

fn child_database(name: &str) -> Vec<u8> {
	let mut writer = RecordWriter::with_header(1640);
	writer.object(name);
	writer.finish()
}

fn attribute_file(texels: i32) -> Vec<u8> {
	Body::new().i32(texels).i32(texels).zeros(108).bytes(&[9; 8]).finish()
}

fn canonical(path: &Path) -> PathBuf {
	path.canonicalize().expect("canonical path")
}

#[test]
fn nested_database_loads_once_per_path() {
	let fixture = Fixture::new().expect("fixture");
	let child = fixture.write("parts/child.flt", &child_database("c1")).expect("child");
	let mut root = RecordWriter::with_header(1640);
	root.group("g").push().external_reference("parts\\child.flt").external_reference("parts/child.flt<c1>").pop();
	let root = fixture.write("root.flt", &root.finish()).expect("root");

	let doc = Document::read_file(&root, &ParseOptions::default()).expect("decode");
	assert_eq!(doc.path(), Some(canonical(&root).as_path()));
	assert_eq!(doc.tree()[0].children.len(), 2);
	assert_eq!(doc.externals().len(), 1);

	let Some(External::Database(nested)) = doc.externals().get(&canonical(&child)) else {
		panic!("expected nested database");
	};
	assert_eq!(nested.tree()[0].record.id(), Some("c1"));
	assert!(nested.externals().is_empty());
}

#[test]
fn reference_cycle_is_reported() {
	let fixture = Fixture::new().expect("fixture");
	let mut a = RecordWriter::with_header(1640);
	a.external_reference("b.flt");
	let mut b = RecordWriter::with_header(1640);
	b.external_reference("a.flt");
	let a = fixture.write("a.flt", &a.finish()).expect("a");
	fixture.write("b.flt", &b.finish()).expect("b");

	let err = Document::read_file(&a, &ParseOptions::default()).expect_err("cycle");
	assert_eq!(err.kind(), ErrorKind::ReferenceResolution);
	let FltError::ReferenceCycle { path } = err.root_cause() else {
		panic!("expected cycle, got {err}");
	};
	assert_eq!(path, &canonical(&a));
}

#[test]
fn nested_failures_name_the_nested_file() {
	let fixture = Fixture::new().expect("fixture");
	let mut broken = RecordWriter::with_header(1640);
	broken.record(999, &[]);
	let broken = fixture.write("broken.flt", &broken.finish()).expect("broken");
	let mut root = RecordWriter::with_header(1640);
	root.external_reference("broken.flt");
	let root = fixture.write("root.flt", &root.finish()).expect("root");

	let err = Document::read_file(&root, &ParseOptions::default()).expect_err("nested");
	assert_eq!(err.kind(), ErrorKind::UnknownOpcode);
	assert_eq!(err.opcode(), Some(999));
	let FltError::AtRecord { source, .. } = &err else {
		panic!("expected record context");
	};
	assert!(matches!(source.as_ref(), FltError::External { path, .. } if path == &canonical(&broken)));
}

#[test]
fn missing_geometry_reference_is_fatal_even_when_skipping_textures() {
	let fixture = Fixture::new().expect("fixture");
	let mut root = RecordWriter::with_header(1640);
	root.external_reference("nowhere.flt");
	let root = fixture.write("root.flt", &root.finish()).expect("root");
	let options = ParseOptions {
		skip_missing_textures: true,
		..ParseOptions::default()
	};

	let err = Document::read_file(&root, &options).expect_err("unresolved");
	assert!(matches!(err.root_cause(), FltError::UnresolvedPath { raw, .. } if raw == "nowhere.flt"));
}

#[test]
fn texture_attributes_are_read_beside_the_image() {
	let fixture = Fixture::new().expect("fixture");
	let attr = fixture.write("tex/brick.rgb.attr", &attribute_file(512)).expect("attr");
	let mut root = RecordWriter::with_header(1640);
	root.texture_palette("tex\\brick.rgb", 0).texture_palette("tex/brick.rgb", 1);
	let root = fixture.write("root.flt", &root.finish()).expect("root");

	let doc = Document::read_file(&root, &ParseOptions::default()).expect("decode");
	assert_eq!(doc.textures().len(), 2);
	assert_eq!(doc.externals().len(), 1);
	let Some(External::Attributes(attributes)) = doc.externals().get(&canonical(&attr)) else {
		panic!("expected attributes");
	};
	assert_eq!(attributes.texels_u, 512);
	assert_eq!(attributes.rest, vec![9; 8]);
}

#[test]
fn missing_texture_is_skipped_with_a_warning() {
	let fixture = Fixture::new().expect("fixture");
	let mut root = RecordWriter::with_header(1640);
	root.texture_palette("gone.rgb", 0).object("o");
	let root = fixture.write("root.flt", &root.finish()).expect("root");

	let err = Document::read_file(&root, &ParseOptions::default()).expect_err("strict");
	assert!(matches!(err.root_cause(), FltError::MissingTexture { .. }));

	let options = ParseOptions {
		skip_missing_textures: true,
		..ParseOptions::default()
	};
	let doc = Document::read_file(&root, &options).expect("skip");
	assert_eq!(doc.node_count(), 2);
	let sentinel = canonical(fixture.dir()).join("gone.rgb.attr");
	assert_eq!(doc.externals().get(&sentinel), Some(&External::MissingAttributes));
	assert!(matches!(&doc.warnings()[..], [Warning::MissingAttributes { path, .. }] if path == &sentinel));
}

#[derive(Default)]
struct CountingLoader {
	calls: Cell<usize>,
}

impl AttributeLoader for CountingLoader {
	fn load(&self, path: &Path) -> fltdoc::flt::Result<Option<TextureAttributes>> {
		self.calls.set(self.calls.get() + 1);
		if !path.ends_with("shared.rgb.attr") {
			return Ok(None);
		}
		Ok(Some(TextureAttributes {
			texels_u: 4,
			texels_v: 4,
			up_vector: [0, 1],
			file_format: 0,
			min_filter: 0,
			mag_filter: 0,
			wrap: 0,
			wrap_u: 0,
			wrap_v: 0,
			real_world_u: 1.0,
			real_world_v: 1.0,
			rest: Vec::new(),
		}))
	}
}

#[test]
fn nested_parses_share_the_root_cache() {
	let fixture = Fixture::new().expect("fixture");
	let mut child = RecordWriter::with_header(1640);
	child.texture_palette("shared.rgb", 0);
	fixture.write("child.flt", &child.finish()).expect("child");
	let mut root = RecordWriter::with_header(1640);
	root.texture_palette("shared.rgb", 0).external_reference("child.flt");
	let root = fixture.write("root.flt", &root.finish()).expect("root");

	let loader = CountingLoader::default();
	let doc = Document::read_file_with_loader(&root, &ParseOptions::default(), &loader).expect("decode");
	assert_eq!(loader.calls.get(), 1);
	assert_eq!(doc.externals().len(), 2);
	let kinds: Vec<&str> = doc.externals().iter().map(|(_, external)| external.kind()).collect();
	assert_eq!(kinds, vec!["attributes", "database"]);
}

#[test]
fn resolution_can_be_turned_off() {
	let fixture = Fixture::new().expect("fixture");
	let mut root = RecordWriter::with_header(1640);
	root.external_reference("nowhere.flt").texture_palette("gone.rgb", 0);
	let root = fixture.write("root.flt", &root.finish()).expect("root");
	let options = ParseOptions {
		resolve_externals: false,
		..ParseOptions::default()
	};

	let doc = Document::read_file(&root, &options).expect("decode");
	assert!(doc.externals().is_empty());
	assert!(matches!(&doc.tree()[0].record, Record::ExternalReference(external) if external.path == "nowhere.flt"));
}
