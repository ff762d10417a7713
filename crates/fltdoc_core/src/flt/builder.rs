use indexmap::IndexMap;

use crate::flt::{FltError, InstanceRef, Node, Record, Result, ScopeKind};

/// Arena slot holding one instance definition's node sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(usize);

impl InstanceHandle {
	/// Arena index.
	pub fn index(self) -> usize {
		self.0
	}
}

/// Instance arena plus the id index over it.
///
/// Every reference node holds an [`InstanceHandle`] into the same arena slot,
/// so all references observe one sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instances {
	arena: Vec<Vec<Node>>,
	ids: IndexMap<u16, InstanceHandle>,
}

impl Instances {
	/// Number of defined instances.
	pub fn len(&self) -> usize {
		self.ids.len()
	}

	/// Return `true` when no instance is defined.
	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	/// Handle of instance `id`.
	pub fn handle(&self, id: u16) -> Option<InstanceHandle> {
		self.ids.get(&id).copied()
	}

	/// Nodes of instance `id`.
	pub fn get(&self, id: u16) -> Option<&[Node]> {
		self.handle(id).and_then(|handle| self.resolve(handle))
	}

	/// Nodes stored behind `handle`.
	pub fn resolve(&self, handle: InstanceHandle) -> Option<&[Node]> {
		self.arena.get(handle.0).map(Vec::as_slice)
	}

	/// Instances in definition order.
	pub fn iter(&self) -> impl Iterator<Item = (u16, &[Node])> + '_ {
		self.ids.iter().filter_map(|(id, handle)| self.resolve(*handle).map(|nodes| (*id, nodes)))
	}
}

#[derive(Debug, Clone, Copy)]
struct Frame {
	kind: ScopeKind,
	/// Index of the owning node in the enclosing sequence; `None` for a transparent frame.
	anchor: Option<usize>,
}

#[derive(Debug)]
struct InstanceScope {
	id: u16,
	handle: InstanceHandle,
	frames: Vec<Frame>,
}

/// Push/pop tree construction over a flat record stream.
///
/// Insertion happens either in the root forest or in the innermost open
/// instance definition. Each push descends into the most recent
/// scope-opening node of the current sequence.
#[derive(Debug, Default)]
pub struct Builder {
	tree: Vec<Node>,
	instances: Instances,
	root: Vec<Frame>,
	open: Vec<InstanceScope>,
}

impl Builder {
	/// Start with an empty forest.
	pub fn new() -> Self {
		Self::default()
	}

	/// Open push frames, across the root and every open instance.
	pub fn depth(&self) -> usize {
		self.root.len() + self.open.iter().map(|scope| scope.frames.len()).sum::<usize>()
	}

	/// Id of the innermost open instance definition.
	pub fn current_instance(&self) -> Option<u16> {
		self.open.last().map(|scope| scope.id)
	}

	/// Append a node at the current insertion point.
	pub fn add(&mut self, record: Record) {
		self.sequence().push(Node::new(record));
	}

	/// Open a scope of `kind`.
	pub fn push(&mut self, kind: ScopeKind) {
		let anchor = self.sequence().iter().rposition(|node| node.record.opens_scope());
		let frame = Frame { kind, anchor };
		match self.open.last_mut() {
			Some(scope) => scope.frames.push(frame),
			None => self.root.push(frame),
		}
	}

	/// Close the innermost scope, which must be of `kind`.
	pub fn pop(&mut self, kind: ScopeKind) -> Result<()> {
		if let Some(scope) = self.open.last_mut() {
			match scope.frames.last() {
				Some(frame) => {
					check_kind(frame.kind, kind)?;
					scope.frames.pop();
					if scope.frames.is_empty() {
						self.close_instance();
					}
				}
				None => {
					check_kind(ScopeKind::Plain, kind)?;
					self.close_instance();
				}
			}
			return Ok(());
		}

		let frame = self.root.last().ok_or(FltError::UnbalancedPop)?;
		check_kind(frame.kind, kind)?;
		self.root.pop();
		Ok(())
	}

	/// Open a new instance definition; later nodes land in it until it closes.
	pub fn begin_instance(&mut self, id: u16) -> Result<()> {
		if self.instances.ids.contains_key(&id) {
			return Err(FltError::DuplicateInstance { id });
		}
		let handle = InstanceHandle(self.instances.arena.len());
		self.instances.arena.push(Vec::new());
		self.instances.ids.insert(id, handle);
		self.open.push(InstanceScope {
			id,
			handle,
			frames: Vec::new(),
		});
		tracing::trace!(id, handle = handle.0, "instance definition opened");
		Ok(())
	}

	/// Append a reference node aliasing instance `id`.
	pub fn reference(&mut self, id: u16) -> Result<()> {
		let handle = self.instances.handle(id).ok_or(FltError::UndefinedInstance { id })?;
		if self.open.iter().any(|scope| scope.id == id) {
			return Err(FltError::RecursiveInstance { id });
		}
		self.add(Record::InstanceReference(InstanceRef { id, handle }));
		Ok(())
	}

	/// Finish building, returning the root forest and the instances.
	pub fn finish(self) -> (Vec<Node>, Instances) {
		if !self.root.is_empty() || !self.open.is_empty() {
			tracing::debug!(depth = self.depth(), open_instances = self.open.len(), "stream ended with open scopes");
		}
		(self.tree, self.instances)
	}

	fn close_instance(&mut self) {
		if let Some(scope) = self.open.pop() {
			tracing::trace!(id = scope.id, "instance definition closed");
		}
	}

	fn sequence(&mut self) -> &mut Vec<Node> {
		let (mut sequence, frames) = match self.open.last() {
			Some(scope) => (&mut self.instances.arena[scope.handle.0], &scope.frames),
			None => (&mut self.tree, &self.root),
		};
		for anchor in frames.iter().filter_map(|frame| frame.anchor) {
			sequence = &mut sequence[anchor].children;
		}
		sequence
	}
}

fn check_kind(expected: ScopeKind, found: ScopeKind) -> Result<()> {
	if expected == found {
		return Ok(());
	}
	Err(FltError::MismatchedPop {
		expected: expected.label(),
		found: found.label(),
	})
}
