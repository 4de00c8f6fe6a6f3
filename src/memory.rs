//! An in-memory [`Host`], for tests and for callers without a real UI surface.

use core::fmt::Write as _;
use hashbrown::HashMap;
use tracing::{level_filters::STATIC_MAX_LEVEL, trace, warn, Level};

use crate::{
	build::{NodeId, ResolvedNode},
	element::{Props, Tag, Value, TEXT_PROP, TEXT_TAG},
	host::Host,
};

/// A handle to a node of a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryRef(usize);

#[derive(Debug, Clone)]
pub struct MemoryNode {
	pub tag: Tag,
	/// [`None`] only for the render target root.
	pub id: Option<NodeId>,
	pub props: Props,
	parent: Option<MemoryRef>,
	children: Vec<MemoryRef>,
}

impl MemoryNode {
	#[must_use]
	pub fn parent(&self) -> Option<MemoryRef> {
		self.parent
	}

	#[must_use]
	pub fn children(&self) -> &[MemoryRef] {
		&self.children
	}
}

/// A host tree held in an arena, with an index from structural id to node.
///
/// Slots of detached nodes are reused, so a stale [`MemoryRef`] may point to a newer node.
#[derive(Debug)]
pub struct MemoryHost {
	nodes: Vec<Option<MemoryNode>>,
	vacant: Vec<MemoryRef>,
	index: HashMap<NodeId, MemoryRef>,
}

const ROOT: MemoryRef = MemoryRef(0);

impl Default for MemoryHost {
	fn default() -> Self {
		Self::new("root")
	}
}

impl MemoryHost {
	/// Creates a host tree consisting only of a render target root with the given tag.
	#[must_use]
	pub fn new(root_tag: impl Into<Tag>) -> Self {
		Self {
			nodes: vec![Some(MemoryNode {
				tag: root_tag.into(),
				id: None,
				props: Props::new(),
				parent: None,
				children: Vec::new(),
			})],
			vacant: Vec::new(),
			index: HashMap::new(),
		}
	}

	#[must_use]
	pub fn root(&self) -> MemoryRef {
		ROOT
	}

	/// [`None`] iff `node` was detached and its slot wasn't reused since.
	#[must_use]
	pub fn get(&self, node: MemoryRef) -> Option<&MemoryNode> {
		self.nodes.get(node.0).and_then(Option::as_ref)
	}

	/// The attached host node tagged `id`, if any.
	#[must_use]
	pub fn find(&self, id: &NodeId) -> Option<&MemoryNode> {
		self.index.get(id).and_then(|&node| self.get(node))
	}

	/// The number of attached nodes, excluding the root.
	#[must_use]
	pub fn len(&self) -> usize {
		self.index.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.index.is_empty()
	}

	/// The size of the node arena, including the root and vacant slots.
	#[must_use]
	pub fn slots(&self) -> usize {
		self.nodes.len()
	}

	/// Serializes the content of the render target root as markup, with attributes ordered by name.
	///
	/// Text nodes are written as their bare content.
	#[must_use]
	pub fn markup(&self) -> String {
		let mut markup = String::new();
		if let Some(root) = self.get(ROOT) {
			for &child in root.children() {
				self.write_markup(child, &mut markup);
			}
		}
		markup
	}

	fn write_markup(&self, node: MemoryRef, markup: &mut String) {
		let node = match self.get(node) {
			Some(node) => node,
			None => return,
		};

		if node.tag == TEXT_TAG {
			if let Some(text) = node.props.get(TEXT_PROP) {
				write_value(text, markup);
			}
			return;
		}

		let mut props = node.props.iter().collect::<Vec<_>>();
		props.sort_unstable_by_key(|&(key, _)| key);

		markup.push('<');
		markup.push_str(&node.tag);
		for (key, value) in props {
			markup.push(' ');
			markup.push_str(key);
			markup.push_str("=\"");
			write_value(value, markup);
			markup.push('"');
		}
		markup.push('>');
		for &child in node.children() {
			self.write_markup(child, markup);
		}
		markup.push_str("</");
		markup.push_str(&node.tag);
		markup.push('>');
	}

	fn create(&mut self, resolved: &ResolvedNode, parent: MemoryRef) -> MemoryRef {
		let created = MemoryNode {
			tag: resolved.tag.clone(),
			id: Some(resolved.id.clone()),
			props: resolved.props.clone(),
			parent: Some(parent),
			children: Vec::with_capacity(resolved.children.len()),
		};
		let node = match self.vacant.pop() {
			Some(node) => {
				self.nodes[node.0] = Some(created);
				node
			}
			None => {
				self.nodes.push(Some(created));
				MemoryRef(self.nodes.len() - 1)
			}
		};
		if self.index.insert(resolved.id.clone(), node).is_some() {
			warn!("Host node {} was instantiated while another node with the same id was still attached.", resolved.id);
		}

		for child in resolved.children.iter() {
			let child = self.create(child, node);
			if let Some(node) = self.nodes[node.0].as_mut() {
				node.children.push(child);
			}
		}
		node
	}

	fn free(&mut self, node: MemoryRef) {
		let freed = match self.nodes.get_mut(node.0).and_then(Option::take) {
			Some(freed) => freed,
			None => return,
		};
		self.vacant.push(node);
		if let Some(id) = &freed.id {
			// The id may have been taken over already.
			if self.index.get(id) == Some(&node) {
				self.index.remove(id);
			}
		}
		for child in freed.children {
			self.free(child);
		}
	}
}

fn write_value(value: &Value, markup: &mut String) {
	// Writing to a `String` can't fail.
	let _ = match value {
		Value::Bool(value) => write!(markup, "{}", value),
		Value::Int(value) => write!(markup, "{}", value),
		Value::Float(value) => write!(markup, "{}", value),
		Value::Str(value) => write!(markup, "{}", value),
		Value::Shared(_) => write!(markup, "[shared]"),
	};
}

impl Host for MemoryHost {
	type Node = MemoryRef;

	fn correlate(&mut self, id: Option<&NodeId>) -> Option<MemoryRef> {
		match id {
			None => Some(ROOT),
			Some(id) => self.index.get(id).copied(),
		}
	}

	fn instantiate(&mut self, node: &ResolvedNode, parent: &MemoryRef, before: Option<&MemoryRef>) {
		trace!(id = %node.id, tag = %node.tag, "Instantiating");
		if self.get(*parent).is_none() {
			return warn!("Tried to instantiate {} under a detached parent.", node.id);
		}

		let created = self.create(node, *parent);
		if let Some(parent) = self.nodes[parent.0].as_mut() {
			let position = before.and_then(|before| parent.children.iter().position(|child| child == before));
			match position {
				Some(position) => parent.children.insert(position, created),
				None => parent.children.push(created),
			}
		}
	}

	fn detach(&mut self, node: &MemoryRef) {
		if *node == ROOT {
			return warn!("Refusing to detach the render target root.");
		}

		let parent = match self.get(*node) {
			Some(detached) => detached.parent,
			None => return warn!("Tried to detach an already detached node."),
		};
		if STATIC_MAX_LEVEL >= Level::TRACE {
			trace!(id = ?self.get(*node).and_then(|node| node.id.as_ref()).map(NodeId::as_str), "Detaching");
		}

		if let Some(parent) = parent.and_then(|parent| self.nodes[parent.0].as_mut()) {
			parent.children.retain(|child| child != node);
		}
		self.free(*node);
	}

	fn parent(&mut self, node: &MemoryRef) -> Option<MemoryRef> {
		self.get(*node).and_then(MemoryNode::parent)
	}

	fn next_sibling(&mut self, node: &MemoryRef) -> Option<MemoryRef> {
		let parent = self.get(self.get(*node)?.parent?)?;
		let position = parent.children.iter().position(|child| child == node)?;
		parent.children.get(position + 1).copied()
	}

	fn update_props(&mut self, node: &MemoryRef, props: &Props) {
		match self.nodes.get_mut(node.0).and_then(Option::as_mut) {
			Some(node) => node.props = props.clone(),
			None => warn!("Tried to update a detached node."),
		}
	}
}
