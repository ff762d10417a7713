#![allow(missing_docs)]

use std::io::Cursor;

use fltdoc::flt::{Document, ErrorKind, FltError, Layout, Opcode, ParseOptions, Record, RecordSize, Registry, Revision};
use fltdoc_testkit::RecordWriter;
use proptest::prelude::*;

fn isolated() -> ParseOptions {
	ParseOptions {
		resolve_externals: false,
		..ParseOptions::default()
	}
}

fn fixed_entries(revision: Revision) -> Vec<(Opcode, u16)> {
	Registry::new(Layout::for_revision(revision))
		.entries()
		.filter(|entry| entry.opcode != Opcode::Header)
		.filter_map(|entry| match entry.size {
			RecordSize::Fixed(size) => Some((entry.opcode, size)),
			_ => None,
		})
		.collect()
}

fn aligned(mut bytes: Vec<u8>) -> Vec<u8> {
	bytes.resize(bytes.len().div_ceil(4) * 4, 0);
	bytes
}

fn is_size_violation(err: &FltError) -> bool {
	matches!(
		err.root_cause(),
		FltError::LayoutMismatch { .. } | FltError::RecordSizeMismatch { .. } | FltError::TruncatedRecord { .. }
	)
}

proptest! {
	#[test]
	fn fixed_records_consume_exactly_their_declared_size(
		revision in proptest::sample::select(Revision::ALL.to_vec()),
		index in any::<prop::sample::Index>(),
		fill in proptest::collection::vec(any::<u8>(), 0..400),
	) {
		let entries = fixed_entries(revision);
		let (opcode, size) = entries[index.index(entries.len())];
		let mut body = fill;
		body.resize(usize::from(size - 4), 0);

		let mut writer = RecordWriter::with_header(revision.raw());
		writer.vertex_palette(0).fixed(opcode.raw(), size, &body);
		match Document::read_from(Cursor::new(writer.finish()), &isolated()) {
			Ok(_) => {}
			Err(err) => prop_assert!(!is_size_violation(&err), "{} under {:?}: {err}", opcode.name(), revision),
		}
	}

	#[test]
	fn continuation_bodies_concatenate(
		head in proptest::collection::vec(b'a'..=b'z', 1..64),
		tails in proptest::collection::vec(proptest::collection::vec(b'a'..=b'z', 1..64), 0..4),
	) {
		let chunks: Vec<Vec<u8>> = std::iter::once(head).chain(tails).map(aligned).collect();
		let mut writer = RecordWriter::with_header(1640);
		writer.comment(&chunks[0]);
		for chunk in &chunks[1..] {
			writer.continuation(chunk);
		}
		let doc = Document::read_from(Cursor::new(writer.finish()), &isolated()).expect("decode");

		let mut expected = chunks.concat();
		let end = expected.iter().rposition(|byte| *byte != 0).map_or(0, |idx| idx + 1);
		expected.truncate(end);

		let Record::Comment(comment) = &doc.tree()[0].record else {
			panic!("expected comment");
		};
		prop_assert_eq!(comment.text.as_bytes(), expected.as_slice());
		prop_assert_eq!(doc.tree().len(), 1);
	}

	#[test]
	fn vertex_list_offsets_survive_continuations(
		head in proptest::collection::vec(any::<u32>(), 1..32),
		tails in proptest::collection::vec(proptest::collection::vec(any::<u32>(), 1..32), 0..4),
	) {
		let mut writer = RecordWriter::with_header(1640);
		writer.vertex_list(&head);
		for tail in &tails {
			let body: Vec<u8> = tail.iter().flat_map(|offset| offset.to_be_bytes()).collect();
			writer.continuation(&body);
		}
		let doc = Document::read_from(Cursor::new(writer.finish()), &isolated()).expect("decode");

		let expected: Vec<u32> = std::iter::once(&head).chain(&tails).flatten().copied().collect();
		let Record::VertexList(list) = &doc.tree()[0].record else {
			panic!("expected vertex list");
		};
		prop_assert_eq!(&list.offsets, &expected);
		prop_assert_eq!(doc.vertex_lists().len(), 1);
		prop_assert_eq!(&doc.vertex_lists()[0].offsets, &expected);
		prop_assert_eq!(doc.tree().len(), 1);
	}

	#[test]
	fn pops_beyond_pushes_always_fail(pushes in 0_usize..8, pops in 0_usize..12) {
		let mut writer = RecordWriter::with_header(1640);
		for _ in 0..pushes {
			writer.group("g").push();
		}
		for _ in 0..pops {
			writer.pop();
		}
		let result = Document::read_from(Cursor::new(writer.finish()), &isolated());
		if pops > pushes {
			let err = result.expect_err("unbalanced");
			prop_assert_eq!(err.kind(), ErrorKind::StreamDesync);
			prop_assert!(matches!(err.root_cause(), FltError::UnbalancedPop));
		} else {
			let doc = result.expect("balanced");
			prop_assert_eq!(doc.node_count(), pushes);
		}
	}
}
