//! A [`Host`] that renders into the [***childNodes***](https://developer.mozilla.org/en-US/docs/Web/API/Node/childNodes) of a [`web_sys::Element`].

use hashbrown::HashMap;
use tracing::{error, level_filters::STATIC_MAX_LEVEL, trace, trace_span, warn, Level};
use wasm_bindgen::JsCast;

use crate::{
	build::{NodeId, ResolvedNode},
	element::{Props, Value, TEXT_PROP, TEXT_TAG},
	host::Host,
};

/// The attribute each created element carries its structural id in, for debugging.
pub const ID_ATTRIBUTE: &str = "data-xylem-id";

/// Renders into the child nodes of an existing element.
///
/// Correlation uses an index of the nodes this host created, since text nodes can't carry attributes.
#[derive(Debug)]
pub struct DomHost {
	document: web_sys::Document,
	root: web_sys::Element,
	index: HashMap<NodeId, web_sys::Node>,
}

impl DomHost {
	/// [`None`] iff `root` has no owner document.
	#[must_use]
	pub fn new_for_element_child_nodes(root: web_sys::Element) -> Option<Self> {
		Some(Self {
			document: root.owner_document()?,
			root,
			index: HashMap::new(),
		})
	}

	#[must_use]
	pub fn root(&self) -> &web_sys::Element {
		&self.root
	}

	fn create(&mut self, node: &ResolvedNode) -> Option<web_sys::Node> {
		let created: web_sys::Node = if node.tag == TEXT_TAG {
			let text = node.props.get(TEXT_PROP).and_then(attribute_value).unwrap_or_default();
			self.document.create_text_node(&text).into()
		} else {
			let element = match self.document.create_element(&node.tag) {
				Ok(element) => element,
				Err(error) => {
					error!("Failed to create <{}>: {:?}", node.tag, error);
					return None;
				}
			};
			if let Err(error) = element.set_attribute(ID_ATTRIBUTE, node.id.as_str()) {
				warn!("Failed to set {}: {:?}", ID_ATTRIBUTE, error);
			}
			set_attributes(&element, &node.props);
			element.into()
		};

		for child in node.children.iter() {
			if let Some(child) = self.create(child) {
				if let Err(error) = created.append_child(&child) {
					error!("Failed to append child {}: {:?}", node.id, error);
				}
			}
		}

		self.index.insert(node.id.clone(), created.clone());
		Some(created)
	}
}

/// [`None`] means the attribute should be absent.
fn attribute_value(value: &Value) -> Option<String> {
	match value {
		Value::Bool(true) => Some(String::new()),
		Value::Bool(false) | Value::Shared(_) => None,
		Value::Int(value) => Some(value.to_string()),
		Value::Float(value) => Some(value.to_string()),
		Value::Str(value) => Some(value.to_string()),
	}
}

fn set_attributes(element: &web_sys::Element, props: &Props) {
	for (name, value) in props.iter() {
		let result = match attribute_value(value) {
			Some(value) => element.set_attribute(name, &value),
			None => element.remove_attribute(name),
		};
		if let Err(error) = result {
			error!("Failed to set attribute {:?}: {:?}", name, error);
		}
	}
}

impl Host for DomHost {
	type Node = web_sys::Node;

	fn correlate(&mut self, id: Option<&NodeId>) -> Option<web_sys::Node> {
		match id {
			None => Some(self.root.clone().into()),
			Some(id) => self.index.get(id).cloned(),
		}
	}

	fn instantiate(&mut self, node: &ResolvedNode, parent: &web_sys::Node, before: Option<&web_sys::Node>) {
		let span = trace_span!("Instantiating", id = %node.id, tag = %node.tag);
		let _enter = span.enter();
		if let Some(created) = self.create(node) {
			if let Err(error) = parent.insert_before(&created, before) {
				error!("Failed to insert {}: {:?}", node.id, error);
			}
		}
	}

	fn detach(&mut self, node: &web_sys::Node) {
		let before = self.index.len();
		self.index.retain(|_, indexed| !node.contains(Some(&*indexed)));
		if STATIC_MAX_LEVEL >= Level::TRACE {
			trace!("Detaching {} indexed node(s).", before - self.index.len());
		}

		match node.parent_node() {
			Some(parent) => {
				if let Err(error) = parent.remove_child(node) {
					error!("Failed to remove the node: {:?}", error);
				}
			}
			None => error!("Could not find parent node of node to remove. Ignoring."),
		}
	}

	fn parent(&mut self, node: &web_sys::Node) -> Option<web_sys::Node> {
		node.parent_node()
	}

	fn next_sibling(&mut self, node: &web_sys::Node) -> Option<web_sys::Node> {
		node.next_sibling()
	}

	fn update_props(&mut self, node: &web_sys::Node, props: &Props) {
		if let Some(text) = node.dyn_ref::<web_sys::Text>() {
			text.set_data(&props.get(TEXT_PROP).and_then(attribute_value).unwrap_or_default());
			return;
		}

		let element = match node.dyn_ref::<web_sys::Element>() {
			Some(element) => element,
			None => return error!("Expected to update `web_sys::Element` but found {}.", node.node_name()),
		};

		let attributes = element.attributes();
		let stale = (0..attributes.length())
			.filter_map(|i| attributes.item(i))
			.map(|attribute| attribute.local_name())
			.filter(|name| name != ID_ATTRIBUTE && props.get(name).is_none())
			.collect::<Vec<_>>();
		for name in stale {
			if let Err(error) = element.remove_attribute(&name) {
				error!("Failed to remove attribute {:?}: {:?}", name, error);
			}
		}
		set_attributes(element, props);
	}
}
