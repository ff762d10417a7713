use crate::flt::opcode::is_obsolete;
use crate::flt::{FltError, Layout, Opcode, Result};

/// Record size contract of one registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSize {
	/// Total record length, header included, must equal this value.
	Fixed(u16),
	/// Length-prefixed record without continuations.
	Variable,
	/// Length-prefixed record that may be followed by continuation records.
	Chunked,
	/// Bare two-byte opcode with no length field.
	Padding,
}

impl RecordSize {
	/// Return `true` when the record carries a 2-byte length field.
	pub fn has_length(self) -> bool {
		!matches!(self, Self::Padding)
	}
}

/// One registry row after revision patches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
	/// Record kind.
	pub opcode: Opcode,
	/// Declared size under the active layout.
	pub size: RecordSize,
}

impl Entry {
	/// Friendly record name.
	pub fn name(&self) -> &'static str {
		self.opcode.name()
	}
}

/// Opcode table bound to one revision layout.
///
/// The table itself is static; revision patches are resolved through
/// [`Layout::size_of`] when an entry is looked up.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
	layout: Layout,
}

impl Registry {
	/// Bind the registry to a layout.
	pub fn new(layout: Layout) -> Self {
		Self { layout }
	}

	/// Layout the registry was built with.
	pub fn layout(&self) -> Layout {
		self.layout
	}

	/// Resolve a wire opcode into its entry.
	pub fn lookup(&self, raw: i16) -> Result<Entry> {
		if is_obsolete(raw) {
			return Err(FltError::ObsoleteOpcode { opcode: raw });
		}
		let opcode = Opcode::from_raw(raw).ok_or(FltError::UnknownOpcode { opcode: raw })?;
		Ok(self.entry(opcode))
	}

	/// Entry for a known opcode.
	pub fn entry(&self, opcode: Opcode) -> Entry {
		Entry {
			opcode,
			size: self.layout.size_of(opcode),
		}
	}

	/// Every entry in ascending opcode order.
	pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
		Opcode::ALL.iter().map(|opcode| self.entry(*opcode))
	}
}

#[cfg(test)]
mod tests;
