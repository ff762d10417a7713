use crate::flt::opcode::OBSOLETE_OPCODES;
use crate::flt::{ErrorKind, FltError, Layout, Opcode, RecordSize, Registry, Revision};

#[test]
fn obsolete_opcodes_fail_before_registry_lookup() {
	let registry = Registry::new(Layout::default());
	for raw in OBSOLETE_OPCODES {
		let err = registry.lookup(raw).expect_err("obsolete");
		assert!(matches!(err, FltError::ObsoleteOpcode { opcode } if opcode == raw));
		assert_eq!(err.kind(), ErrorKind::ObsoleteOpcode);
	}
}

#[test]
fn unknown_opcodes_are_reported() {
	let registry = Registry::new(Layout::default());
	for raw in [24, 75, 99, 155, 999, -1] {
		let err = registry.lookup(raw).expect_err("unknown");
		assert!(matches!(err, FltError::UnknownOpcode { opcode } if opcode == raw));
	}
}

#[test]
fn obsolete_and_registry_sets_are_disjoint() {
	for raw in OBSOLETE_OPCODES {
		assert!(Opcode::from_raw(raw).is_none(), "obsolete opcode {raw} in registry");
	}
}

#[test]
fn raw_values_round_trip_and_ascend() {
	let mut previous = -1;
	for opcode in Opcode::ALL {
		assert_eq!(Opcode::from_raw(opcode.raw()), Some(*opcode));
		assert!(opcode.raw() > previous, "{} out of order", opcode.name());
		previous = opcode.raw();
	}
}

#[test]
fn entries_apply_revision_patches() {
	let registry = Registry::new(Layout::for_revision(Revision::OpenFlight142));
	assert_eq!(registry.lookup(2).expect("group").size, RecordSize::Fixed(32));
	assert_eq!(registry.lookup(69).expect("vertex").size, RecordSize::Fixed(52));
	assert_eq!(registry.lookup(5).expect("face").size, RecordSize::Fixed(80));

	let padding = registry.entry(Opcode::Padding);
	assert!(!padding.size.has_length());
	assert_eq!(registry.entries().count(), Opcode::ALL.len());
}

#[test]
fn reserved_entries_are_length_prefixed() {
	let registry = Registry::new(Layout::default());
	let reserved: Vec<i16> = registry.entries().filter(|entry| entry.opcode.is_reserved()).map(|entry| entry.opcode.raw()).collect();
	assert_eq!(reserved, vec![103, 104, 110, 117, 118, 120, 121, 124, 125, 134, 144, 146]);
	assert!(registry.entries().filter(|entry| entry.opcode.is_reserved()).all(|entry| entry.size == RecordSize::Variable));
}
