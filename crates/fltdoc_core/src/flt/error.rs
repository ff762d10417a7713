use std::path::PathBuf;

use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, FltError>;

/// Coarse error classes callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Underlying stream failure.
	Io,
	/// File shape or a field value is outside what the format allows, in the
	/// header or in a record body.
	Structural,
	/// The record stream no longer lines up with the record size contract.
	StreamDesync,
	/// Opcode newer than this decoder.
	UnknownOpcode,
	/// Opcode removed from the format.
	ObsoleteOpcode,
	/// A referenced database or texture could not be located.
	ReferenceResolution,
	/// Instance definition/reference misuse.
	InstanceIndex,
}

impl ErrorKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Io => "io",
			Self::Structural => "structural",
			Self::StreamDesync => "stream_desync",
			Self::UnknownOpcode => "unknown_opcode",
			Self::ObsoleteOpcode => "obsolete_opcode",
			Self::ReferenceResolution => "reference_resolution",
			Self::InstanceIndex => "instance_index",
		}
	}
}

/// Errors produced while validating and decoding a database.
#[derive(Debug, Error)]
pub enum FltError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Total file size is not a multiple of four bytes.
	#[error("file size {size} is not a multiple of 4")]
	MisalignedFile {
		/// Stream length in bytes.
		size: u64,
	},
	/// First record is not a recognizable header.
	#[error("not an OpenFlight database (first opcode={opcode:?}, length={length:?})")]
	NotThisFormat {
		/// First opcode, when two bytes were available.
		opcode: Option<i16>,
		/// Declared header length, when it was read.
		length: Option<u16>,
	},
	/// Header format revision is outside the known set.
	#[error("unknown format revision {revision}")]
	UnknownRevision {
		/// Raw revision value.
		revision: i32,
	},
	/// An enumerated field held a value outside its enumeration.
	#[error("invalid value {value} for {field}")]
	InvalidEnumValue {
		/// Field label.
		field: &'static str,
		/// Raw value read from the stream.
		value: i64,
	},
	/// A read would cross the end of the current bound.
	#[error("truncated record at offset {at}: need {need} bytes, remaining {remaining}")]
	TruncatedRecord {
		/// Cursor position where the read was attempted.
		at: u64,
		/// Requested bytes.
		need: u64,
		/// Bytes still available in the bound.
		remaining: u64,
	},
	/// Declared record length disagrees with the registry.
	#[error("unexpected {name} record length {actual} (expected {expected})")]
	RecordSizeMismatch {
		/// Friendly record name.
		name: &'static str,
		/// Registry size, or the minimum for variable records.
		expected: u16,
		/// Length field read from the stream.
		actual: u16,
	},
	/// A fixed-size decoder consumed a different number of bytes than declared.
	#[error("{name} decoder consumed {consumed} bytes of a {declared}-byte record")]
	LayoutMismatch {
		/// Friendly record name.
		name: &'static str,
		/// Declared record size.
		declared: u16,
		/// Bytes actually consumed including the record header.
		consumed: u64,
	},
	/// Continuation record reached dispatch on its own.
	#[error("continuation record without a preceding chunked record")]
	UnexpectedContinuation,
	/// A chunked payload declares more content than its records carry.
	#[error("{name} payload needs {need} bytes but continuation chain holds {have}")]
	MissingContinuation {
		/// Friendly record name.
		name: &'static str,
		/// Bytes required by the payload's own counts.
		need: u64,
		/// Bytes present after reassembly.
		have: u64,
	},
	/// A header record appeared after the first record.
	#[error("header record found inside the record stream")]
	UnexpectedHeader,
	/// Pop without a matching push.
	#[error("pop at depth 0")]
	UnbalancedPop,
	/// Pop of a different scope kind than the innermost push.
	#[error("{found} closes a {expected} scope")]
	MismatchedPop {
		/// Scope kind opened by the innermost push.
		expected: &'static str,
		/// Scope kind of the pop record.
		found: &'static str,
	},
	/// Vertex record seen before any vertex palette record.
	#[error("vertex record outside a vertex palette")]
	VertexOutsidePalette,
	/// Opcode is not in the registry.
	#[error("unknown opcode {opcode}")]
	UnknownOpcode {
		/// Raw opcode.
		opcode: i16,
	},
	/// Opcode belongs to the obsolete set.
	#[error("obsolete opcode {opcode}")]
	ObsoleteOpcode {
		/// Raw opcode.
		opcode: i16,
	},
	/// Referenced path could not be resolved against the referencing file.
	#[error("cannot resolve reference {raw:?} (relative to {base:?})")]
	UnresolvedPath {
		/// Path text stored in the record.
		raw: String,
		/// Directory of the referencing file, when known.
		base: Option<PathBuf>,
	},
	/// Texture attribute file is missing and skipping is disabled.
	#[error("missing texture attribute file for {raw:?}")]
	MissingTexture {
		/// Texture path text stored in the record.
		raw: String,
	},
	/// External reference chain loops back to a file still being parsed.
	#[error("external reference cycle through {path}")]
	ReferenceCycle {
		/// Cleaned path that is already open up the chain.
		path: PathBuf,
	},
	/// A nested external database failed to parse.
	#[error("external database {path}: {source}")]
	External {
		/// Cleaned path of the nested database.
		path: PathBuf,
		/// Error raised by the nested parse.
		source: Box<FltError>,
	},
	/// Attribute file exists but could not be decoded.
	#[error("texture attribute file {path}: {reason}")]
	InvalidAttributes {
		/// Attribute file path.
		path: PathBuf,
		/// Short decoder diagnostic.
		reason: &'static str,
	},
	/// Instance id defined twice.
	#[error("instance {id} already defined")]
	DuplicateInstance {
		/// Instance id.
		id: u16,
	},
	/// Instance reference to an undefined id.
	#[error("instance {id} referenced before definition")]
	UndefinedInstance {
		/// Instance id.
		id: u16,
	},
	/// Instance referenced from inside its own open definition.
	#[error("instance {id} referenced inside its own definition")]
	RecursiveInstance {
		/// Instance id.
		id: u16,
	},
	/// Error raised while handling one record, with stream context.
	#[error("opcode {opcode} ({name}) at offset {offset}: {source}")]
	AtRecord {
		/// Raw opcode of the failing record.
		opcode: i16,
		/// Friendly record name, or `unknown`.
		name: &'static str,
		/// Byte offset where the record starts.
		offset: u64,
		/// Previously decoded opcode.
		previous: Option<i16>,
		/// Underlying error.
		source: Box<FltError>,
	},
}

impl FltError {
	/// Classify this error into the engine's error taxonomy.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) => ErrorKind::Io,
			Self::MisalignedFile { .. } | Self::NotThisFormat { .. } | Self::UnknownRevision { .. } | Self::InvalidEnumValue { .. } => ErrorKind::Structural,
			Self::TruncatedRecord { .. }
			| Self::RecordSizeMismatch { .. }
			| Self::LayoutMismatch { .. }
			| Self::UnexpectedContinuation
			| Self::MissingContinuation { .. }
			| Self::UnexpectedHeader
			| Self::UnbalancedPop
			| Self::MismatchedPop { .. }
			| Self::VertexOutsidePalette => ErrorKind::StreamDesync,
			Self::UnknownOpcode { .. } => ErrorKind::UnknownOpcode,
			Self::ObsoleteOpcode { .. } => ErrorKind::ObsoleteOpcode,
			Self::UnresolvedPath { .. } | Self::MissingTexture { .. } | Self::ReferenceCycle { .. } | Self::InvalidAttributes { .. } => {
				ErrorKind::ReferenceResolution
			}
			Self::DuplicateInstance { .. } | Self::UndefinedInstance { .. } | Self::RecursiveInstance { .. } => ErrorKind::InstanceIndex,
			Self::External { source, .. } | Self::AtRecord { source, .. } => source.kind(),
		}
	}

	/// Opcode of the innermost failing record, if the error carries stream context.
	pub fn opcode(&self) -> Option<i16> {
		match self {
			Self::AtRecord { opcode, source, .. } => source.opcode().or(Some(*opcode)),
			Self::External { source, .. } => source.opcode(),
			Self::UnknownOpcode { opcode } | Self::ObsoleteOpcode { opcode } => Some(*opcode),
			_ => None,
		}
	}

	/// Byte offset of the failing record in the top-level file.
	pub fn offset(&self) -> Option<u64> {
		match self {
			Self::AtRecord { offset, .. } => Some(*offset),
			_ => None,
		}
	}

	/// Strip record and external-database wrappers.
	pub fn root_cause(&self) -> &FltError {
		match self {
			Self::AtRecord { source, .. } | Self::External { source, .. } => source.root_cause(),
			other => other,
		}
	}
}

#[cfg(test)]
mod tests;
