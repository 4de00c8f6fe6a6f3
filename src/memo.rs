//! Memoized components.
//!
//! A [`Memo`] belongs to exactly one component position in the tree.
//! Sharing one instance between two positions makes both positions thrash its single [`CacheEntry`].

use core::{
	cell::RefCell,
	fmt::{self, Debug, Formatter},
};
use std::rc::Rc;
use tracing::{instrument, trace};

use crate::{
	build::ResolvedNode,
	element::{ComponentError, Element, Props, RenderFn},
};

/// The last input/output pair of a [`Memo`].
#[derive(Debug, Clone)]
pub struct CacheEntry {
	pub props: Props,
	pub element: Element,
	/// The tree built from `element` during the last build, if any.
	///
	/// That build may belong to a render that failed later on, so this is only reused where it was committed.
	pub resolved: Option<ResolvedNode>,
}

/// A component output together with where it came from.
///
/// Never mutated after construction.
#[derive(Debug, Clone)]
pub struct Memoized {
	pub element: Element,
	pub from_cache: bool,
}

/// Wraps a component function so that consecutive calls with [shallow-equal](`Props::shallow_eq`) props invoke it only once.
pub struct Memo {
	name: &'static str,
	render: Box<RenderFn>,
	cache: RefCell<Option<CacheEntry>>,
}

impl Debug for Memo {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Memo").field("name", &self.name).field("cache", &self.cache).finish_non_exhaustive()
	}
}

/// Shorthand for [`Memo::new`].
pub fn memo<F>(name: &'static str, render: F) -> Rc<Memo>
where
	F: Fn(&Props) -> Result<Element, ComponentError> + 'static,
{
	Memo::new(name, render)
}

impl Memo {
	#[must_use]
	pub fn new<F>(name: &'static str, render: F) -> Rc<Self>
	where
		F: Fn(&Props) -> Result<Element, ComponentError> + 'static,
	{
		Rc::new(Self {
			name,
			render: Box::new(render),
			cache: RefCell::new(None),
		})
	}

	#[must_use]
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns the cached element if `props` is shallow-equal to the last props seen,
	/// otherwise invokes the component and caches its output.
	///
	/// # Errors
	///
	/// Iff the component function fails. The cache is left unchanged in that case.
	#[instrument(skip(self), fields(name = self.name))]
	pub fn call(&self, props: &Props) -> Result<Memoized, ComponentError> {
		if let Some(entry) = &*self.cache.borrow() {
			if entry.props.shallow_eq(props) {
				trace!("Props are shallow-equal. Serving from cache.");
				return Ok(Memoized {
					element: entry.element.clone(),
					from_cache: true,
				});
			}
		}

		// No borrow may be held here: the component can build (other) memoized components.
		let element = (self.render)(props)?;
		*self.cache.borrow_mut() = Some(CacheEntry {
			props: props.clone(),
			element: element.clone(),
			resolved: None,
		});
		Ok(Memoized { element, from_cache: false })
	}

	/// Whether a call with `props` would be served from cache.
	#[must_use]
	pub fn is_cached(&self, props: &Props) -> bool {
		self.cache.borrow().as_ref().map_or(false, |entry| entry.props.shallow_eq(props))
	}

	/// Forgets the cached input/output pair, so that the next call invokes the component.
	pub fn reset(&self) {
		self.cache.borrow_mut().take();
	}

	pub(crate) fn resolved(&self) -> Option<ResolvedNode> {
		self.cache.borrow().as_ref().and_then(|entry| entry.resolved.clone())
	}

	pub(crate) fn set_resolved(&self, resolved: ResolvedNode) {
		if let Some(entry) = &mut *self.cache.borrow_mut() {
			entry.resolved = Some(resolved);
		}
	}
}
