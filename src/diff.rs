//! Structural comparison of [`ResolvedNode`] trees.
//!
//! Children are aligned strictly by index. Inserting or reordering siblings therefore
//! results in a [`Patch::Replace`] or [`Patch::Update`] for each shifted position, plus a trailing [`Patch::Create`] or [`Patch::Remove`].

use core::cmp::max;
use tracing::{instrument, trace, trace_span};

use crate::{
	build::{NodeId, ResolvedNode},
	element::Props,
};

/// One atomic edit against the host tree.
#[derive(Debug, Clone)]
pub enum Patch {
	/// Instantiate `node` and all its descendants as the last child of `parent`, or of the render target root if [`None`].
	Create { parent: Option<NodeId>, node: ResolvedNode },
	/// Detach the host node tagged `id`, along with its descendants.
	Remove { id: NodeId },
	/// Detach the host node tagged `id` and instantiate `node` in its place.
	Replace { id: NodeId, node: ResolvedNode },
	/// Overwrite the properties of the host node tagged `id`.
	Update { id: NodeId, props: Props },
}

impl Patch {
	/// The structural id of the host node this patch correlates first.
	#[must_use]
	pub fn target(&self) -> Option<&NodeId> {
		match self {
			Patch::Create { parent, .. } => parent.as_ref(),
			Patch::Remove { id } | Patch::Replace { id, .. } | Patch::Update { id, .. } => Some(id),
		}
	}
}

/// Computes the edits that turn `previous` into `current`, in the order they must be applied.
///
/// `parent` is the structural id under which `current` is created if `previous` is absent.
#[must_use]
#[instrument(skip(previous, current))]
pub fn diff(previous: Option<&ResolvedNode>, current: Option<&ResolvedNode>, parent: Option<&NodeId>) -> Vec<Patch> {
	let mut patches = Vec::new();
	diff_into(previous, current, parent, &mut patches);
	trace!("Diffed into {} patch(es).", patches.len());
	patches
}

/// Like [`diff`], but appends to `patches`.
pub fn diff_into(previous: Option<&ResolvedNode>, current: Option<&ResolvedNode>, parent: Option<&NodeId>, patches: &mut Vec<Patch>) {
	match (previous, current) {
		(None, None) => (),

		(None, Some(current)) => {
			trace!(id = %current.id, tag = %current.tag, "Creating");
			patches.push(Patch::Create {
				parent: parent.cloned(),
				node: current.clone(),
			});
		}

		(Some(previous), None) => {
			trace!(id = %previous.id, tag = %previous.tag, "Removing");
			patches.push(Patch::Remove { id: previous.id.clone() });
		}

		// A type change discards the whole subtree. Children are not compared.
		(Some(previous), Some(current)) if previous.tag != current.tag => {
			trace!(id = %previous.id, from = %previous.tag, to = %current.tag, "Replacing");
			patches.push(Patch::Replace {
				id: previous.id.clone(),
				node: current.clone(),
			});
		}

		(Some(_), Some(current)) if current.from_cache => {
			trace!(id = %current.id, "Skipping memoized subtree");
		}

		(Some(previous), Some(current)) => {
			let span = trace_span!("Diffing", id = %current.id, tag = %current.tag);
			let _enter = span.enter();

			if !previous.props.shallow_eq(&current.props) {
				trace!(props = ?current.props, "Updating");
				patches.push(Patch::Update {
					id: current.id.clone(),
					props: current.props.clone(),
				});
			}

			for i in 0..max(previous.children.len(), current.children.len()) {
				diff_into(previous.children.get(i), current.children.get(i), Some(&current.id), patches);
			}
		}
	}
}
