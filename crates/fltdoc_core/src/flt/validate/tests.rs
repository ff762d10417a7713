use std::io::Cursor as IoCursor;

use fltdoc_testkit::{HeaderFields, RecordWriter};

use crate::flt::validate::validate;
use crate::flt::{Ellipsoid, ErrorKind, FltError, Projection, Revision, Units, Warning};

fn run(bytes: Vec<u8>) -> crate::flt::Result<crate::flt::validate::Validated<IoCursor<Vec<u8>>>> {
	validate(IoCursor::new(bytes))
}

fn header(fields: HeaderFields) -> Vec<u8> {
	let mut writer = RecordWriter::new();
	writer.header_with(&fields);
	writer.finish()
}

#[test]
fn valid_header_resumes_after_record() {
	let validated = run(RecordWriter::with_header(1640).finish()).expect("valid");
	assert_eq!(validated.resume, 324);
	assert_eq!(validated.header.name, "db");
	assert_eq!(validated.header.revision, Revision::OpenFlight164);
	assert_eq!(validated.header.units, Units::Metres);
	assert_eq!(validated.header.projection, Projection::FlatEarth);
	assert_eq!(validated.header.ellipsoid, Ellipsoid::Wgs1984);
	assert!(validated.warnings.is_empty());
}

#[test]
fn misaligned_size_is_checked_first() {
	let mut bytes = RecordWriter::with_header(1640).finish();
	bytes.push(0);
	let err = run(bytes).err().expect("misaligned");
	assert!(matches!(err, FltError::MisalignedFile { size: 325 }));
	assert_eq!(err.kind(), ErrorKind::Structural);
}

#[test]
fn wrong_first_opcode_is_not_this_format() {
	let mut writer = RecordWriter::new();
	writer.group("g1");
	let err = run(writer.finish()).err().expect("not a header");
	assert!(matches!(err, FltError::NotThisFormat { opcode: Some(2), length: None }));

	let err = run(Vec::new()).err().expect("empty");
	assert!(matches!(err, FltError::NotThisFormat { opcode: None, .. }));
}

#[test]
fn short_header_length_is_not_this_format() {
	let err = run(header(HeaderFields {
		length: 320,
		..HeaderFields::default()
	}))
	.err()
	.expect("short header");
	assert!(matches!(err, FltError::NotThisFormat { opcode: Some(1), length: Some(320) }));
}

#[test]
fn unknown_revision_is_rejected() {
	let err = run(header(HeaderFields {
		revision: 1590,
		..HeaderFields::default()
	}))
	.err()
	.expect("unknown revision");
	assert!(matches!(err, FltError::UnknownRevision { revision: 1590 }));
}

#[test]
fn enumerated_fields_are_validated() {
	let cases = [
		(
			HeaderFields {
				multiplier: 2,
				..HeaderFields::default()
			},
			"unit multiplier",
			2,
		),
		(
			HeaderFields {
				units: 3,
				..HeaderFields::default()
			},
			"coordinate units",
			3,
		),
		(
			HeaderFields {
				projection: 7,
				..HeaderFields::default()
			},
			"projection",
			7,
		),
		(
			HeaderFields {
				storage: 2,
				..HeaderFields::default()
			},
			"vertex storage type",
			2,
		),
		(
			HeaderFields {
				ellipsoid: 5,
				..HeaderFields::default()
			},
			"earth ellipsoid model",
			5,
		),
	];

	for (fields, expected_field, expected_value) in cases {
		let err = run(header(fields)).err().expect("invalid enum");
		match err {
			FltError::InvalidEnumValue { field, value } => {
				assert_eq!(field, expected_field);
				assert_eq!(value, expected_value);
			}
			other => panic!("unexpected error: {other}"),
		}
	}
}

#[test]
fn user_defined_ellipsoid_and_unknown_origin_are_accepted() {
	let validated = run(header(HeaderFields {
		ellipsoid: -1,
		origin: 900,
		units: 8,
		..HeaderFields::default()
	}))
	.expect("valid");
	assert_eq!(validated.header.ellipsoid, Ellipsoid::UserDefined);
	assert_eq!(validated.header.origin, crate::flt::DatabaseOrigin::Other(900));
	assert_eq!(validated.header.units, Units::NauticalMiles);
}

#[test]
fn long_header_is_tolerated_from_16_0() {
	let validated = run(header(HeaderFields {
		revision: 1600,
		length: 328,
		..HeaderFields::default()
	}))
	.expect("tolerated");
	assert_eq!(validated.resume, 328);
	assert_eq!(
		validated.warnings,
		vec![Warning::HeaderLength {
			revision: Revision::OpenFlight160,
			length: 328,
		}]
	);
}

#[test]
fn long_header_is_rejected_before_16_0() {
	let err = run(header(HeaderFields {
		revision: 1580,
		length: 328,
		..HeaderFields::default()
	}))
	.err()
	.expect("strict");
	assert!(matches!(err, FltError::NotThisFormat { opcode: Some(1), length: Some(328) }));
}
