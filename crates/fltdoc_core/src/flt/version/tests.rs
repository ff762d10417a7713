use crate::flt::{ErrorKind, FltError, Layout, Opcode, RecordSize, Revision};

#[test]
fn revision_round_trips_known_values() {
	for revision in Revision::ALL {
		assert_eq!(Revision::from_raw(revision.raw()).expect("known"), revision);
	}
	assert_eq!(Revision::from_raw(1570).expect("15.7"), Revision::OpenFlight157);
}

#[test]
fn unknown_revision_is_structural() {
	let err = Revision::from_raw(1590).expect_err("not a revision");
	assert!(matches!(err, FltError::UnknownRevision { revision: 1590 }));
	assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn group_loop_block_starts_at_15_8() {
	let old = Layout::for_revision(Revision::OpenFlight157);
	let new = Layout::for_revision(Revision::OpenFlight158);
	assert_eq!(old.size_of(Opcode::Group), RecordSize::Fixed(32));
	assert_eq!(new.size_of(Opcode::Group), RecordSize::Fixed(44));
}

#[test]
fn vertex_reserved_word_starts_at_15_7() {
	let old = Layout::for_revision(Revision::OpenFlight156);
	let new = Layout::for_revision(Revision::OpenFlight157);
	assert_eq!(old.size_of(Opcode::VertexColourNormal), RecordSize::Fixed(52));
	assert_eq!(old.size_of(Opcode::VertexColourNormalUv), RecordSize::Fixed(60));
	assert_eq!(new.size_of(Opcode::VertexColourNormal), RecordSize::Fixed(56));
	assert_eq!(new.size_of(Opcode::VertexColourNormalUv), RecordSize::Fixed(64));
	assert_eq!(old.size_of(Opcode::VertexColour), new.size_of(Opcode::VertexColour));
}

#[test]
fn header_leniency_starts_at_16_0() {
	assert!(!Layout::for_revision(Revision::OpenFlight158).lenient_header);
	assert!(Layout::for_revision(Revision::OpenFlight160).lenient_header);
	assert!(Layout::for_revision(Revision::OpenFlight164).lenient_header);
}
