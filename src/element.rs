//! Immutable element descriptors, as authored by callers.

use core::{
	any::Any,
	fmt::{self, Debug, Formatter},
	iter::FromIterator,
};
use hashbrown::HashMap;
use std::{borrow::Cow, rc::Rc};

use crate::memo::Memo;

/// The tag of host elements that represent text content.
///
/// Text elements carry their content in the [`TEXT_PROP`] property and never have children.
pub const TEXT_TAG: &str = "#text";

/// The property that holds the content of [`TEXT_TAG`] elements.
pub const TEXT_PROP: &str = "text";

/// A host element tag, like `"div"`.
pub type Tag = Cow<'static, str>;

/// The error type component functions may fail with.
pub type ComponentError = Box<dyn std::error::Error>;

/// A component function.
pub type RenderFn = dyn Fn(&Props) -> Result<Element, ComponentError>;

/// A single property value.
///
/// Comparison is one level deep only: primitive variants compare by value,
/// [`Value::Shared`] compares by pointer identity.
#[derive(Clone)]
pub enum Value {
	Bool(bool),
	Int(i64),
	/// Compared with IEEE semantics, so [`f64::NAN`] is never equal to itself.
	Float(f64),
	Str(Rc<str>),
	/// Any other (nested) data, opaque to the reconciler.
	Shared(Rc<dyn Any>),
}

impl PartialEq for Value {
	#[allow(clippy::float_cmp)]
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Int(a), Value::Int(b)) => a == b,
			(Value::Float(a), Value::Float(b)) => a == b,
			(Value::Str(a), Value::Str(b)) => a == b,
			(Value::Shared(a), Value::Shared(b)) => Rc::ptr_eq(a, b),
			_ => false,
		}
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Bool(value) => value.fmt(f),
			Value::Int(value) => value.fmt(f),
			Value::Float(value) => value.fmt(f),
			Value::Str(value) => value.fmt(f),
			Value::Shared(value) => write!(f, "Shared({:p})", Rc::as_ptr(value)),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Int(value.into())
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Str(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Str(value.into())
	}
}

impl From<Rc<str>> for Value {
	fn from(value: Rc<str>) -> Self {
		Value::Str(value)
	}
}

impl Value {
	#[must_use]
	pub fn shared<T: Any>(value: T) -> Self {
		Value::Shared(Rc::new(value))
	}

	#[must_use]
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::Str(value) => Some(value),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_bool(&self) -> Option<bool> {
		match *self {
			Value::Bool(value) => Some(value),
			_ => None,
		}
	}

	#[must_use]
	pub fn as_int(&self) -> Option<i64> {
		match *self {
			Value::Int(value) => Some(value),
			_ => None,
		}
	}
}

/// A property mapping.
#[derive(Clone, Default, PartialEq)]
pub struct Props(HashMap<Cow<'static, str>, Value>);

impl Props {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insertion.
	#[must_use]
	pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn insert(&mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(key.into(), value.into())
	}

	#[must_use]
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.0.iter().map(|(key, value)| (key.as_ref(), value))
	}

	/// One-level comparison: same key set, and each pair of values equal per [`Value`]'s [`PartialEq`].
	///
	/// Nested data behind [`Value::Shared`] is never inspected.
	#[must_use]
	pub fn shallow_eq(&self, other: &Self) -> bool {
		self.0.len() == other.0.len() && self.0.iter().all(|(key, value)| other.0.get(key) == Some(value))
	}
}

impl Debug for Props {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if cfg!(feature = "dangerous-logging") {
			f.debug_map().entries(self.0.iter()).finish()
		} else {
			f.debug_set().entries(self.0.keys()).finish()
		}
	}
}

impl<K: Into<Cow<'static, str>>, V: Into<Value>> FromIterator<(K, V)> for Props {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}
}

/// A reference to a component function, either invoked on every build or through a [`Memo`].
#[derive(Clone)]
pub enum ComponentRef {
	Plain { name: &'static str, render: Rc<RenderFn> },
	Memo(Rc<Memo>),
}

impl ComponentRef {
	#[must_use]
	pub fn name(&self) -> &'static str {
		match self {
			ComponentRef::Plain { name, .. } => name,
			ComponentRef::Memo(memo) => memo.name(),
		}
	}
}

impl Debug for ComponentRef {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ComponentRef::Plain { name, .. } => f.debug_tuple("Plain").field(name).finish(),
			ComponentRef::Memo(memo) => f.debug_tuple("Memo").field(&memo.name()).finish(),
		}
	}
}

/// Whether an [`Element`] is a host element or a component, decided at construction.
#[derive(Debug, Clone)]
pub enum ElementKind {
	Host(Tag),
	Component(ComponentRef),
}

/// An immutable element descriptor.
#[derive(Debug, Clone)]
pub struct Element {
	kind: ElementKind,
	props: Props,
	children: Rc<[Element]>,
}

impl Element {
	/// Constructs a descriptor from its parts. No validation takes place.
	#[must_use]
	pub fn new(kind: ElementKind, props: Props, children: impl Into<Rc<[Element]>>) -> Self {
		Self { kind, props, children: children.into() }
	}

	#[must_use]
	pub fn host(tag: impl Into<Tag>, props: Props, children: impl Into<Rc<[Element]>>) -> Self {
		Self::new(ElementKind::Host(tag.into()), props, children)
	}

	/// A [`TEXT_TAG`] element.
	#[must_use]
	pub fn text(text: impl Into<Value>) -> Self {
		Self::host(TEXT_TAG, Props::new().with(TEXT_PROP, text), Vec::<Element>::new())
	}

	/// Describes a component invocation.
	///
	/// Components see only their props, so the descriptor has no children.
	#[must_use]
	pub fn component(component: impl Into<ComponentRef>, props: Props) -> Self {
		Self::new(ElementKind::Component(component.into()), props, Vec::<Element>::new())
	}

	#[must_use]
	pub fn kind(&self) -> &ElementKind {
		&self.kind
	}

	#[must_use]
	pub fn props(&self) -> &Props {
		&self.props
	}

	#[must_use]
	pub fn children(&self) -> &[Element] {
		&self.children
	}
}

/// Wraps a component function so that it is invoked on every build.
pub fn component<F>(name: &'static str, render: F) -> ComponentRef
where
	F: Fn(&Props) -> Result<Element, ComponentError> + 'static,
{
	ComponentRef::Plain { name, render: Rc::new(render) }
}

impl From<Rc<Memo>> for ComponentRef {
	fn from(memo: Rc<Memo>) -> Self {
		ComponentRef::Memo(memo)
	}
}
