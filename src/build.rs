//! Expansion of [`Element`] trees into [`ResolvedNode`] trees.

use core::fmt::{self, Display, Formatter};
use std::rc::Rc;
use tracing::{error, instrument, trace, trace_span};

use crate::{
	element::{ComponentRef, Element, ElementKind, Props, Tag},
	error::RenderError,
	memo::Memoized,
};

/// The structural id of the root node.
pub const ROOT_ID: &str = "r/";

/// Terminates each path segment of a [`NodeId`].
pub const SEPARATOR: char = '/';

/// The default maximum nesting of host elements and component expansions.
pub const DEFAULT_DEPTH_LIMIT: usize = 1024;

/// A path-based identifier encoding a node's position in its resolved tree.
///
/// The root is [`ROOT_ID`] and the `i`th child of `P` is `P` + `i` + [`SEPARATOR`].
/// Inserting or reordering siblings shifts the ids of all following siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
	#[must_use]
	pub fn root() -> Self {
		Self(ROOT_ID.to_owned())
	}

	#[must_use]
	pub fn child(&self, index: usize) -> Self {
		Self(format!("{}{}{}", self.0, index, SEPARATOR))
	}

	#[must_use]
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Default for NodeId {
	fn default() -> Self {
		Self::root()
	}
}

impl Display for NodeId {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for NodeId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// A fully component-expanded node, ready for diffing.
#[derive(Debug, Clone)]
pub struct ResolvedNode {
	pub id: NodeId,
	pub tag: Tag,
	pub props: Props,
	pub children: Rc<[ResolvedNode]>,
	/// Set iff this subtree was handed out by a [`Memo`](`crate::Memo`) unchanged since it was last committed.
	/// The differ does not look into such subtrees.
	pub from_cache: bool,
}

impl ResolvedNode {
	/// The ids of this node and all its descendants, in document order.
	#[must_use]
	pub fn ids(&self) -> Vec<NodeId> {
		let mut ids = Vec::new();
		self.for_each(&mut |node| ids.push(node.id.clone()));
		ids
	}

	/// Visits this node and all its descendants, in document order.
	pub fn for_each<'a>(&'a self, f: &mut dyn FnMut(&'a ResolvedNode)) {
		f(self);
		for child in self.children.iter() {
			child.for_each(f);
		}
	}
}

/// Expands `element` at [`ROOT_ID`] with the [`DEFAULT_DEPTH_LIMIT`], without a previously committed tree.
///
/// # Errors
///
/// See [`build_at`].
pub fn build(element: &Element) -> Result<ResolvedNode, RenderError> {
	build_at(element, NodeId::root(), None, DEFAULT_DEPTH_LIMIT)
}

/// Expands `element` at `id`, invoking components along the way.
///
/// Component expansion doesn't consume a path segment: a component's output is built at the component's own id.
///
/// `previous` is the committed tree at `id`, i.e. what the host currently shows there.
/// A memoized component served from cache contributes its previously built subtree, marked [`ResolvedNode::from_cache`],
/// only if that very subtree is also the one committed at its position.
/// Otherwise the cached output is built anew, without invoking the component.
///
/// # Errors
///
/// - [`RenderError::Component`] iff a component function fails.
/// - [`RenderError::DepthLimit`] iff host nesting plus component expansions exceed `depth_limit`.
#[instrument(skip(element, previous))]
pub fn build_at(element: &Element, id: NodeId, previous: Option<&ResolvedNode>, depth_limit: usize) -> Result<ResolvedNode, RenderError> {
	let previous = previous.filter(|previous| previous.id == id);
	Expansion { depth_limit }.build(element, id, previous, depth_limit)
}

/// Whether `cached` is the subtree that was committed as `previous`.
fn is_committed(cached: &ResolvedNode, previous: &ResolvedNode) -> bool {
	cached.id == previous.id && cached.tag == previous.tag && Rc::ptr_eq(&cached.children, &previous.children)
}

struct Expansion {
	depth_limit: usize,
}

impl Expansion {
	fn build(&self, element: &Element, id: NodeId, previous: Option<&ResolvedNode>, remaining: usize) -> Result<ResolvedNode, RenderError> {
		if remaining == 0 {
			error!("Depth limit reached at {}", id);
			return Err(RenderError::DepthLimit { id, limit: self.depth_limit });
		}

		match element.kind() {
			ElementKind::Host(tag) => {
				let span = trace_span!("Building host element", %tag, %id);
				let _enter = span.enter();
				let children = element
					.children()
					.iter()
					.enumerate()
					.map(|(i, child)| self.build(child, id.child(i), previous.and_then(|previous| previous.children.get(i)), remaining - 1))
					.collect::<Result<Vec<_>, _>>()?;
				Ok(ResolvedNode {
					id,
					tag: tag.clone(),
					props: element.props().clone(),
					children: children.into(),
					from_cache: false,
				})
			}

			ElementKind::Component(ComponentRef::Plain { name, render }) => {
				let span = trace_span!("Expanding component", name, %id);
				let _enter = span.enter();
				let output = render(element.props()).map_err(|source| RenderError::Component { id: id.clone(), name: *name, source })?;
				self.build(&output, id, previous, remaining - 1)
			}

			ElementKind::Component(ComponentRef::Memo(memo)) => {
				let span = trace_span!("Expanding memoized component", name = memo.name(), %id);
				let _enter = span.enter();
				let Memoized { element: output, from_cache } = memo.call(element.props()).map_err(|source| RenderError::Component {
					id: id.clone(),
					name: memo.name(),
					source,
				})?;

				if from_cache {
					match (memo.resolved(), previous) {
						(Some(resolved), Some(previous)) if is_committed(&resolved, previous) => {
							trace!("Reusing the committed subtree.");
							return Ok(ResolvedNode { from_cache: true, ..resolved });
						}
						(Some(resolved), _) => trace!("Cached subtree built at {} isn't committed here. Rebuilding the cached output.", resolved.id),
						(None, _) => trace!("No previously built subtree. Building the cached output."),
					}
				}

				let resolved = self.build(&output, id, previous, remaining - 1)?;
				memo.set_resolved(resolved.clone());
				Ok(resolved)
			}
		}
	}
}
