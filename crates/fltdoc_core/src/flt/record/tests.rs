use fltdoc_testkit::Body;

use super::{Decoded, Record, ScopeKind, parse_fixed, parse_variable};
use crate::flt::cursor::{ChunkCursor, ReadBe};
use crate::flt::{DrawType, FieldValue, FltError, Layout, Opcode, PrimitiveType, Revision, ShaderProgram, SoundPalette, VertexKind};

fn fixed(opcode: Opcode, body: &[u8], layout: Layout) -> (crate::flt::Result<Decoded>, u64) {
	let mut cursor = ChunkCursor::new(body, 0);
	let decoded = parse_fixed(opcode, &mut cursor, layout);
	(decoded, cursor.position())
}

fn variable(opcode: Opcode, body: &[u8]) -> crate::flt::Result<Decoded> {
	parse_variable(opcode, &mut ChunkCursor::new(body, 0))
}

fn node(decoded: crate::flt::Result<Decoded>) -> Record {
	match decoded.expect("decodes") {
		Decoded::Node(record) => record,
		other => panic!("expected a node, got {other:?}"),
	}
}

#[test]
fn group_loop_block_follows_revision() {
	let body = Body::new().string("g1", 8).i16(3).zeros(2).u32(0x8000_0000).zeros(12).u32(5).f32(2.0).f32(0.5).finish();

	let (decoded, consumed) = fixed(Opcode::Group, &body, Layout::for_revision(Revision::OpenFlight164));
	assert_eq!(consumed, 40);
	let Record::Group(group) = node(decoded) else {
		panic!("expected group");
	};
	assert_eq!(group.id, "g1");
	assert_eq!(group.priority, 3);
	assert_eq!(group.animation.map(|a| a.loop_count), Some(5));

	let (decoded, consumed) = fixed(Opcode::Group, &body[..28], Layout::for_revision(Revision::OpenFlight157));
	assert_eq!(consumed, 28);
	let Record::Group(group) = node(decoded) else {
		panic!("expected group");
	};
	assert!(group.animation.is_none());
}

#[test]
fn face_decodes_sentinels_and_rejects_bad_draw_type() {
	let mut body = Body::new().string("f1", 8).zeros(4).i16(0).u8(1).u8(0).zeros(5).u8(0).i16(-1).i16(7).i16(-1).finish();
	body.resize(76, 0);

	let (decoded, consumed) = fixed(Opcode::Face, &body, Layout::default());
	assert_eq!(consumed, 76);
	let Record::Face(face) = node(decoded) else {
		panic!("expected face");
	};
	assert_eq!(face.surface.draw_type, DrawType::SolidDoubleSided);
	assert_eq!(face.surface.texture, Some(7));
	assert_eq!(face.surface.detail_texture, None);
	assert_eq!(face.surface.material, None);

	body[14] = 5;
	let (decoded, _) = fixed(Opcode::Face, &body, Layout::default());
	assert!(matches!(decoded, Err(FltError::InvalidEnumValue { field: "draw type", value: 5 })));
}

#[test]
fn external_reference_splits_node_suffix() {
	let mut body = Body::new().string("models/tank.flt<turret>", 200).finish();
	body.resize(212, 0);
	let (decoded, consumed) = fixed(Opcode::ExternalReference, &body, Layout::default());
	assert_eq!(consumed, 212);
	let Record::ExternalReference(external) = node(decoded) else {
		panic!("expected external reference");
	};
	assert_eq!(external.path, "models/tank.flt");
	assert_eq!(external.node.as_deref(), Some("turret"));

	let mut body = Body::new().string("plain.flt", 200).finish();
	body.resize(212, 0);
	let Record::ExternalReference(external) = node(fixed(Opcode::ExternalReference, &body, Layout::default()).0) else {
		panic!("expected external reference");
	};
	assert_eq!(external.path, "plain.flt");
	assert_eq!(external.node, None);
}

#[test]
fn vertex_reserved_word_follows_revision() {
	let body = Body::new().u16(0).u16(0).f64(1.0).f64(2.0).f64(3.0).f32(0.0).f32(0.0).f32(1.0).u32(0).u32(u32::MAX).zeros(4).finish();

	let (decoded, consumed) = fixed(Opcode::VertexColourNormal, &body, Layout::for_revision(Revision::OpenFlight157));
	assert_eq!(consumed, 52);
	let Decoded::Vertex(vertex) = decoded.expect("vertex") else {
		panic!("expected vertex");
	};
	assert_eq!(vertex.kind, VertexKind::ColourNormal);
	assert_eq!(vertex.position, [1.0, 2.0, 3.0]);
	assert_eq!(vertex.normal, Some([0.0, 0.0, 1.0]));
	assert_eq!(vertex.colour_index, None);

	let (_, consumed) = fixed(Opcode::VertexColourNormal, &body[..48], Layout::for_revision(Revision::OpenFlight156));
	assert_eq!(consumed, 48);
}

#[test]
fn scope_markers_carry_their_kind() {
	let layout = Layout::default();
	assert_eq!(fixed(Opcode::Push, &[], layout).0.expect("push"), Decoded::Push(ScopeKind::Plain));
	assert_eq!(fixed(Opcode::PopSubface, &[], layout).0.expect("pop"), Decoded::Pop(ScopeKind::Subface));

	let (decoded, consumed) = fixed(Opcode::PushExtension, &[0; 20], layout);
	assert_eq!(decoded.expect("push extension"), Decoded::Push(ScopeKind::Extension));
	assert_eq!(consumed, 20);

	let (decoded, consumed) = fixed(Opcode::PushAttribute, &[0; 4], layout);
	assert_eq!(decoded.expect("push attribute"), Decoded::Push(ScopeKind::Attribute));
	assert_eq!(consumed, 4);

	let instance = Body::new().zeros(2).u16(42).finish();
	assert_eq!(fixed(Opcode::InstanceDefinition, &instance, layout).0.expect("definition"), Decoded::BeginInstance(42));
	assert_eq!(fixed(Opcode::InstanceReference, &instance, layout).0.expect("reference"), Decoded::ReferenceInstance(42));
}

#[test]
fn switch_reads_every_mask_word() {
	let body = Body::new().string("sw", 8).zeros(4).u32(1).u32(2).u32(2).u32(1).u32(2).u32(3).u32(4).finish();
	let Record::Switch(switch) = node(variable(Opcode::Switch, &body)) else {
		panic!("expected switch");
	};
	assert_eq!(switch.current_mask, 1);
	assert_eq!(switch.masks, vec![vec![1, 2], vec![3, 4]]);
}

#[test]
fn switch_counts_are_bounded_by_the_body() {
	let empty_masks = Body::new().string("sw", 8).zeros(4).u32(0).u32(u32::MAX).u32(0).finish();
	let err = variable(Opcode::Switch, &empty_masks).expect_err("zero-word masks");
	assert!(matches!(err, FltError::InvalidEnumValue { field: "switch words per mask", value: 0 }));

	let oversized = Body::new().string("sw", 8).zeros(4).u32(0).u32(u32::MAX).u32(1).u32(7).finish();
	let err = variable(Opcode::Switch, &oversized).expect_err("counts exceed body");
	assert!(matches!(err, FltError::MissingContinuation { name: "switch", need, have: 4 } if need == u64::from(u32::MAX) * 4));

	let bare = Body::new().string("sw", 8).zeros(4).u32(0).u32(0).u32(0).finish();
	let Record::Switch(switch) = node(variable(Opcode::Switch, &bare)) else {
		panic!("expected switch");
	};
	assert!(switch.masks.is_empty());
}

#[test]
fn local_vertex_pool_rejects_attributeless_vertices() {
	let body = Body::new().u32(u32::MAX).u32(0).zeros(8).finish();
	let err = variable(Opcode::LocalVertexPool, &body).expect_err("empty mask");
	assert!(matches!(err, FltError::InvalidEnumValue { field: "local vertex pool attribute mask", value: 0 }));

	let body = Body::new().u32(0).u32(0).finish();
	let Record::LocalVertexPool(pool) = node(variable(Opcode::LocalVertexPool, &body)) else {
		panic!("expected local vertex pool");
	};
	assert!(pool.vertices.is_empty());
}

#[test]
fn name_table_entry_length_is_bounded() {
	let body = Body::new().u32(2).u16(5).u32(10).u16(1).string("tank", 4).u32(u32::MAX).u16(2).finish();
	let err = variable(Opcode::NameTable, &body).expect_err("entry exceeds body");
	assert!(matches!(
		err,
		FltError::MissingContinuation {
			name: "name table entry",
			need: 0xFFFF_FFF9,
			have: 0
		}
	));
}

#[test]
fn chunked_payload_counts_are_checked_against_reassembly() {
	let body = Body::new().u32(10).u32(0x8000_0000).f64(0.0).finish();
	let err = variable(Opcode::LocalVertexPool, &body).expect_err("short pool");
	assert!(matches!(
		err,
		FltError::MissingContinuation {
			name: "local vertex pool",
			need: 240,
			have: 8
		}
	));
}

#[test]
fn mesh_primitive_reads_sized_indices() {
	let body = Body::new().i16(2).u16(2).u32(3).u16(0).u16(1).u16(2).zeros(2).finish();
	let Record::MeshPrimitive(mesh) = node(variable(Opcode::MeshPrimitive, &body)) else {
		panic!("expected mesh primitive");
	};
	assert_eq!(mesh.primitive, PrimitiveType::TriangleFan);
	assert_eq!(mesh.indices, vec![0, 1, 2]);

	let body = Body::new().i16(1).u16(3).u32(0).finish();
	let err = variable(Opcode::MeshPrimitive, &body).expect_err("bad index size");
	assert!(matches!(err, FltError::InvalidEnumValue { field: "mesh primitive index size", value: 3 }));
}

#[test]
fn colour_palette_reads_optional_names() {
	let plain = Body::new().zeros(128 + 1024 * 4).finish();
	let Record::ColourPalette(palette) = node(variable(Opcode::ColourPalette, &plain)) else {
		panic!("expected colour palette");
	};
	assert_eq!(palette.colours.len(), 1024);
	assert!(palette.names.is_empty());

	let named = Body::new().zeros(128 + 1024 * 4).u32(1).u16(12).zeros(2).u16(9).zeros(2).string("red", 4).finish();
	let Record::ColourPalette(palette) = node(variable(Opcode::ColourPalette, &named)) else {
		panic!("expected colour palette");
	};
	assert_eq!(palette.names.len(), 1);
	assert_eq!(palette.names[0].index, 9);
	assert_eq!(palette.names[0].name, "red");
}

#[test]
fn multitexture_and_uv_list_follow_layer_mask() {
	let body = Body::new().u32(0xA000_0000).u16(1).u16(0).u16(0xFFFF).u16(0).u16(2).u16(1).u16(3).u16(0).finish();
	let Record::Multitexture(multi) = node(variable(Opcode::Multitexture, &body)) else {
		panic!("expected multitexture");
	};
	let layers: Vec<_> = multi.layers.iter().map(|layer| (layer.layer, layer.texture, layer.mapping)).collect();
	assert_eq!(layers, vec![(1, 1, None), (3, 2, Some(3))]);

	let body = Body::new().u32(0x8000_0000).f32(0.5).f32(0.25).f32(1.0).f32(0.0).finish();
	let Record::UvList(uv) = node(variable(Opcode::UvList, &body)) else {
		panic!("expected UV list");
	};
	assert_eq!(uv.layers, vec![1]);
	assert_eq!(uv.coordinates, vec![vec![[0.5, 0.25]], vec![[1.0, 0.0]]]);
}

#[test]
fn text_rejects_unknown_justification() {
	let mut body = Body::new().string("t", 8).zeros(8).i32(0).i32(0).i32(7).finish();
	body.resize(316, 0);
	let (decoded, _) = fixed(Opcode::Text, &body, Layout::default());
	assert!(matches!(decoded, Err(FltError::InvalidEnumValue { field: "text justification", value: 7 })));
}

#[test]
fn shader_and_sound_palettes_branch_on_subtype() {
	let body = Body::new().u32(0).u32(2).string("glsl", 1024).u32(1).u32(0).string("a.vert", 1024).finish();
	let Record::ShaderPalette(shader) = node(variable(Opcode::ShaderPalette, &body)) else {
		panic!("expected shader palette");
	};
	assert_eq!(shader.name, "glsl");
	assert_eq!(
		shader.program,
		ShaderProgram::Glsl {
			vertex_files: vec!["a.vert".into()],
			fragment_files: Vec::new(),
		}
	);

	let body = Body::new().u32(2).u32(12).bytes(b"one\0two\0").finish();
	let Record::SoundPalette(sound) = node(variable(Opcode::SoundPalette, &body)) else {
		panic!("expected sound palette");
	};
	assert_eq!(sound.name_at(4).as_deref(), Some("two"));

	let err = variable(Opcode::SoundPalette, &Body::new().u32(3).finish()).expect_err("bad subtype");
	assert!(matches!(err, FltError::InvalidEnumValue { field: "sound palette subtype", value: 3 }));
	assert!(matches!(sound, SoundPalette::Data { total_length: 12, .. }));
}

#[test]
fn extension_fields_report_their_opcode() {
	let (decoded, _) = fixed(Opcode::ExtensionFieldDouble, &Body::new().u32(4).f64(2.5).finish(), Layout::default());
	let record = node(decoded);
	assert_eq!(record.opcode(), Opcode::ExtensionFieldDouble);
	let Record::ExtensionField(field) = record else {
		panic!("expected extension field");
	};
	assert_eq!(field.guid_index, 4);
	assert_eq!(field.value, FieldValue::Double(2.5));

	let body = Body::new().u32(1).u32(5).bytes(b"<a/>\0").zeros(3).finish();
	let record = node(variable(Opcode::ExtensionFieldXmlString, &body));
	assert_eq!(record.opcode(), Opcode::ExtensionFieldXmlString);
	let Record::ExtensionField(field) = record else {
		panic!("expected extension field");
	};
	assert_eq!(field.value, FieldValue::Xml("<a/>".into()));
}

#[test]
fn primary_records_open_scopes_and_carry_ids() {
	let Record::Comment(comment) = node(variable(Opcode::Comment, b"hello\0\0\0")) else {
		panic!("expected comment");
	};
	assert_eq!(comment.text, "hello");
	assert!(!Record::Comment(comment).opens_scope());

	let long = node(variable(Opcode::LongId, b"a-very-long-name\0\0\0\0"));
	assert_eq!(long.id(), Some("a-very-long-name"));
	assert!(!long.opens_scope());

	let object = Body::new().string("o1", 8).zeros(16).finish();
	let record = node(fixed(Opcode::Object, &object, Layout::default()).0);
	assert!(record.opens_scope());
	assert_eq!(record.id(), Some("o1"));
	assert_eq!(record.name(), "object");
}

#[test]
fn unhandled_opcodes_are_skipped() {
	assert_eq!(fixed(Opcode::Reserved103, &[], Layout::default()).0.expect("skip"), Decoded::Skip);
	assert_eq!(variable(Opcode::Reserved110, &[1, 2, 3, 4]).expect("skip"), Decoded::Skip);
}
