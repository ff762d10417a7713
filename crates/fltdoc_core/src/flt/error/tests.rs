use std::path::PathBuf;

use crate::flt::{ErrorKind, FltError};

#[test]
fn record_wrapper_is_transparent_for_kind() {
	let err = FltError::AtRecord {
		opcode: 11,
		name: "pop",
		offset: 332,
		previous: Some(2),
		source: Box::new(FltError::UnbalancedPop),
	};
	assert_eq!(err.kind(), ErrorKind::StreamDesync);
	assert_eq!(err.offset(), Some(332));
	assert_eq!(err.opcode(), Some(11));
	assert!(matches!(err.root_cause(), FltError::UnbalancedPop));
}

#[test]
fn unknown_and_obsolete_are_distinct_kinds() {
	let unknown = FltError::UnknownOpcode { opcode: 999 };
	let obsolete = FltError::ObsoleteOpcode { opcode: 6 };
	assert_eq!(unknown.kind(), ErrorKind::UnknownOpcode);
	assert_eq!(obsolete.kind(), ErrorKind::ObsoleteOpcode);
	assert_ne!(unknown.kind(), obsolete.kind());
}

#[test]
fn nested_external_error_reports_inner_opcode() {
	let inner = FltError::AtRecord {
		opcode: 999,
		name: "unknown",
		offset: 324,
		previous: None,
		source: Box::new(FltError::UnknownOpcode { opcode: 999 }),
	};
	let outer = FltError::AtRecord {
		opcode: 63,
		name: "external reference",
		offset: 400,
		previous: Some(2),
		source: Box::new(FltError::External {
			path: PathBuf::from("/db/child.flt"),
			source: Box::new(inner),
		}),
	};

	assert_eq!(outer.kind(), ErrorKind::UnknownOpcode);
	assert_eq!(outer.opcode(), Some(999));
	assert_eq!(outer.offset(), Some(400));
}

#[test]
fn display_names_record_and_offset() {
	let err = FltError::AtRecord {
		opcode: 5,
		name: "face",
		offset: 1024,
		previous: Some(10),
		source: Box::new(FltError::RecordSizeMismatch {
			name: "face",
			expected: 80,
			actual: 76,
		}),
	};
	let text = err.to_string();
	assert!(text.contains("opcode 5 (face) at offset 1024"), "{text}");
	assert!(text.contains("expected 80"), "{text}");
}
