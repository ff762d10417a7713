use std::io::{self, Write};

use fltdoc::flt::{External, Record, Result, Warning};

/// Write a JSON payload to stdout followed by a newline.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let mut out = io::stdout().lock();
	serde_json::to_writer_pretty(&mut out, payload).map_err(io::Error::from)?;
	writeln!(out)?;
	Ok(())
}

/// One-line label of a record: friendly name, then its ASCII ID when present.
pub(crate) fn record_label(record: &Record) -> String {
	match (record, record.id()) {
		(Record::InstanceReference(reference), _) => format!("{} {}", record.name(), reference.id),
		(Record::ExternalReference(external), _) => match &external.node {
			Some(node) => format!("{} {}<{node}>", record.name(), external.path),
			None => format!("{} {}", record.name(), external.path),
		},
		(_, Some(id)) if !id.is_empty() => format!("{} {id}", record.name()),
		_ => record.name().to_owned(),
	}
}

/// Short summary of a cache entry.
pub(crate) fn external_summary(external: &External) -> String {
	match external {
		External::Database(document) => format!("{} nodes", document.node_count()),
		External::Attributes(attributes) => format!("{}x{} texels", attributes.texels_u, attributes.texels_v),
		External::MissingAttributes => "-".to_owned(),
	}
}

/// Print warnings as `warning:` lines on stdout.
pub(crate) fn print_warnings(warnings: &[Warning]) {
	for warning in warnings {
		println!("warning: {warning}");
	}
}
