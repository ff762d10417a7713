use std::io::Cursor;
use std::path::Path;

use fltdoc_testkit::{Body, HeaderFields, RecordWriter};

use crate::flt::{Document, ErrorKind, External, FltError, ParseOptions, Record, Revision, Warning};

fn read(writer: &RecordWriter) -> crate::flt::Result<Document> {
	read_with(writer, ParseOptions::default())
}

fn read_with(writer: &RecordWriter, options: ParseOptions) -> crate::flt::Result<Document> {
	Document::read_from(Cursor::new(writer.finish()), &options)
}

#[test]
fn padding_and_reserved_records_are_skipped() {
	let mut writer = RecordWriter::with_header(1640);
	writer.padding().padding().record(103, &[1, 2, 3, 4]).object("o1");
	let doc = read(&writer).expect("decode");
	assert_eq!(doc.tree().len(), 1);
	assert_eq!(doc.tree()[0].record.id(), Some("o1"));
}

#[test]
fn padding_consumes_only_its_opcode() {
	let mut writer = RecordWriter::with_header(1640);
	writer.padding().record(999, &[0; 2]);
	let err = read(&writer).expect_err("unknown after padding");
	assert_eq!(err.kind(), ErrorKind::UnknownOpcode);
	assert_eq!(err.offset(), Some(326));
}

#[test]
fn fixed_length_must_match_registry() {
	let mut writer = RecordWriter::with_header(1640);
	writer.record(4, &[0; 20]);
	let err = read(&writer).expect_err("short object");
	assert_eq!(err.kind(), ErrorKind::StreamDesync);
	assert!(matches!(
		err.root_cause(),
		FltError::RecordSizeMismatch {
			name: "object",
			expected: 28,
			actual: 24
		}
	));
}

#[test]
fn group_size_follows_header_revision() {
	let mut writer = RecordWriter::with_header(1570);
	writer.group_without_loop("old");
	let doc = read(&writer).expect("decode");
	let Record::Group(group) = &doc.tree()[0].record else {
		panic!("expected group");
	};
	assert!(group.animation.is_none());

	let mut writer = RecordWriter::with_header(1570);
	writer.group("new");
	let err = read(&writer).expect_err("loop block before 15.8");
	assert!(matches!(err.root_cause(), FltError::RecordSizeMismatch { expected: 32, actual: 44, .. }));
}

#[test]
fn record_errors_carry_stream_context() {
	let mut writer = RecordWriter::with_header(1640);
	writer.group("g").record(999, &[]);
	let err = read(&writer).expect_err("unknown opcode");
	let FltError::AtRecord {
		opcode,
		name,
		offset,
		previous,
		..
	} = &err
	else {
		panic!("expected record context, got {err:?}");
	};
	assert_eq!((*opcode, *name, *offset, *previous), (999, "unknown", 368, Some(2)));
	assert_eq!(err.kind(), ErrorKind::UnknownOpcode);
	assert_eq!(err.opcode(), Some(999));
	assert_eq!(err.offset(), Some(368));
}

#[test]
fn stray_header_and_continuation_desync() {
	let mut writer = RecordWriter::with_header(1640);
	writer.header(1640);
	let err = read(&writer).expect_err("second header");
	assert!(matches!(err.root_cause(), FltError::UnexpectedHeader));

	let mut writer = RecordWriter::with_header(1640);
	writer.object("o").continuation(&[0; 4]);
	let err = read(&writer).expect_err("continuation after fixed record");
	assert!(matches!(err.root_cause(), FltError::UnexpectedContinuation));
	assert_eq!(err.offset(), Some(324 + 28));
}

#[test]
fn comment_continuations_are_joined() {
	let mut writer = RecordWriter::with_header(1640);
	writer.comment(b"hello there ").continuation(b"world\0\0\0").object("o");
	let doc = read(&writer).expect("decode");
	let Record::Comment(comment) = &doc.tree()[0].record else {
		panic!("expected comment");
	};
	assert_eq!(comment.text, "hello there world");
	assert_eq!(doc.tree().len(), 2);
}

#[test]
fn vertices_are_keyed_by_palette_offset() {
	let mut writer = RecordWriter::with_header(1640);
	writer
		.vertex_palette(88)
		.vertex([1.0, 0.0, 0.0])
		.vertex([0.0, 1.0, 0.0])
		.face("f", 4)
		.scale([2.0, 2.0, 2.0])
		.vertex_list(&[8, 48]);
	let doc = read(&writer).expect("decode");

	assert_eq!(doc.vertices().len(), 2);
	assert_eq!(doc.vertices().get(8).map(|vertex| vertex.position), Some([1.0, 0.0, 0.0]));
	assert_eq!(doc.vertices().get(48).map(|vertex| vertex.position), Some([0.0, 1.0, 0.0]));

	let trace = &doc.vertex_lists()[0];
	assert_eq!(trace.offsets, vec![8, 48]);
	assert_eq!(trace.texture, Some(4));
	assert_eq!(trace.scale.map(|scale| scale.factors), Some([2.0, 2.0, 2.0]));
	assert!(trace.translate.is_none());
}

#[test]
fn vertex_list_joins_its_continuations() {
	let tail: Vec<u8> = [88_u32, 128].iter().flat_map(|offset| offset.to_be_bytes()).collect();
	let mut writer = RecordWriter::with_header(1640);
	writer.face("f", 2).vertex_list(&[8, 48]).continuation(&tail).comment(b"end\0");
	let doc = read(&writer).expect("decode");

	assert_eq!(doc.vertex_lists().len(), 1);
	assert_eq!(doc.vertex_lists()[0].offsets, vec![8, 48, 88, 128]);
	assert_eq!(doc.vertex_lists()[0].texture, Some(2));
	assert_eq!(doc.tree().len(), 3);
	assert!(matches!(&doc.tree()[1].record, Record::VertexList(list) if list.offsets == doc.vertex_lists()[0].offsets));
}

#[test]
fn vertex_before_palette_desyncs() {
	let mut writer = RecordWriter::with_header(1640);
	writer.vertex([0.0; 3]);
	let err = read(&writer).expect_err("no palette");
	assert!(matches!(err.root_cause(), FltError::VertexOutsidePalette));
}

#[test]
fn header_warnings_reach_the_document() {
	let mut writer = RecordWriter::new();
	writer.header_with(&HeaderFields {
		revision: 1610,
		length: 328,
		..HeaderFields::default()
	});
	writer.object("o");
	let doc = read(&writer).expect("decode");
	assert_eq!(
		doc.warnings(),
		&[Warning::HeaderLength {
			revision: Revision::OpenFlight161,
			length: 328
		}]
	);
	assert_eq!(doc.warnings()[0].to_string(), "header length 328 tolerated for OpenFlight v16.1");
	assert_eq!(doc.tree().len(), 1);
}

#[test]
fn externals_are_left_alone_when_resolution_is_off() {
	let options = ParseOptions {
		resolve_externals: false,
		..ParseOptions::default()
	};
	let mut writer = RecordWriter::with_header(1640);
	writer.external_reference("nowhere/model.flt<hull>").texture_palette("nowhere/tex.rgb", 3);
	let doc = read_with(&writer, options).expect("decode");

	assert!(doc.externals().is_empty());
	assert_eq!(doc.textures().len(), 1);
	assert_eq!(doc.textures()[0].pattern, 3);
	let Record::ExternalReference(external) = &doc.tree()[0].record else {
		panic!("expected external reference");
	};
	assert_eq!(external.node.as_deref(), Some("hull"));
}

#[test]
fn missing_texture_attributes_follow_skip_option() {
	let mut writer = RecordWriter::with_header(1640);
	writer.texture_palette("fltdoc-missing-texture.rgb", 0);

	let err = read(&writer).expect_err("strict");
	assert_eq!(err.kind(), ErrorKind::ReferenceResolution);
	assert!(matches!(err.root_cause(), FltError::MissingTexture { raw } if raw == "fltdoc-missing-texture.rgb"));

	let options = ParseOptions {
		skip_missing_textures: true,
		..ParseOptions::default()
	};
	let doc = read_with(&writer, options).expect("skipping");
	let key = Path::new("fltdoc-missing-texture.rgb.attr");
	assert_eq!(doc.externals().get(key), Some(&External::MissingAttributes));
	assert!(matches!(&doc.warnings()[0], Warning::MissingAttributes { texture, .. } if texture == "fltdoc-missing-texture.rgb"));
}

#[test]
fn extension_scope_wraps_children() {
	let mut writer = RecordWriter::with_header(1640);
	writer.object("o").push_extension(0).comment(b"ext\0").pop_extension(0);
	let doc = read(&writer).expect("decode");
	assert_eq!(doc.tree().len(), 1);
	assert_eq!(doc.tree()[0].children.len(), 1);

	let mut writer = RecordWriter::with_header(1640);
	writer.object("o").push_extension(0).pop();
	let err = read(&writer).expect_err("mismatched pop");
	assert!(matches!(err.root_cause(), FltError::MismatchedPop { .. }));
}

#[test]
fn long_text_is_read_from_body() {
	let body = Body::new().string("renamed-object", 16).finish();
	let mut writer = RecordWriter::with_header(1640);
	writer.object("o").record(33, &body);
	let doc = read(&writer).expect("decode");
	assert_eq!(doc.tree()[1].record.id(), Some("renamed-object"));
	assert_eq!(doc.node_count(), 2);
}
