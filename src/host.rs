use crate::{
	build::{NodeId, ResolvedNode},
	element::Props,
};

/// The mutable tree that patches are applied to, like a browser DOM.
///
/// Implementations keep track of which host node is tagged with which structural [`NodeId`].
/// Host-level failures (for example exceptions thrown by a browser) may panic.
pub trait Host {
	/// A handle to one node of the host tree.
	type Node: Clone;

	/// Finds the host node tagged `id`, or the render target root for [`None`].
	fn correlate(&mut self, id: Option<&NodeId>) -> Option<Self::Node>;

	/// Materializes `node` and all its descendants under `parent`, tagging each with its [`ResolvedNode::id`].
	///
	/// The new subtree is inserted before `before` if given, otherwise appended as last child.
	fn instantiate(&mut self, node: &ResolvedNode, parent: &Self::Node, before: Option<&Self::Node>);

	/// Removes `node` (with its descendants) from its parent.
	///
	/// Afterwards, none of the removed nodes may correlate anymore.
	fn detach(&mut self, node: &Self::Node);

	fn parent(&mut self, node: &Self::Node) -> Option<Self::Node>;

	fn next_sibling(&mut self, node: &Self::Node) -> Option<Self::Node>;

	/// Replaces all properties of `node` with `props`.
	fn update_props(&mut self, node: &Self::Node, props: &Props);
}
