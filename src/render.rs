//! Render sessions: build, diff and apply against one render target.

use tracing::{info, instrument};

use crate::{
	build::{build_at, NodeId, ResolvedNode, DEFAULT_DEPTH_LIMIT},
	diff::{diff, Patch},
	element::Element,
	error::RenderError,
	host::Host,
	patch::apply,
};

/// Owns one render target and the tree last rendered into it.
///
/// # Correct Use
///
/// The previously rendered tree is only replaced after all of a render's patches were applied.
/// Nothing else may mutate the nodes of the host tree that this renderer created,
/// or later renders will fail with [`RenderError::Correlation`] or patch the wrong nodes.
#[derive(Debug)]
pub struct Renderer<H: Host> {
	host: H,
	previous: Option<ResolvedNode>,
	last_patches: Vec<Patch>,
	depth_limit: usize,
}

impl<H: Host> Renderer<H> {
	#[must_use]
	pub fn new(host: H) -> Self {
		Self {
			host,
			previous: None,
			last_patches: Vec::new(),
			depth_limit: DEFAULT_DEPTH_LIMIT,
		}
	}

	/// Sets the maximum nesting of host elements plus component expansions. The default is [`DEFAULT_DEPTH_LIMIT`].
	#[must_use]
	pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
		self.depth_limit = depth_limit;
		self
	}

	#[must_use]
	pub fn host(&self) -> &H {
		&self.host
	}

	/// Note that mutating the host tree directly can desynchronize it from [`Self::previous`].
	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	#[must_use]
	pub fn into_host(self) -> H {
		self.host
	}

	/// The tree of the last successful render.
	#[must_use]
	pub fn previous(&self) -> Option<&ResolvedNode> {
		self.previous.as_ref()
	}

	/// The patches applied by the last successful render (or unmount).
	#[must_use]
	pub fn last_patches(&self) -> &[Patch] {
		&self.last_patches
	}

	/// Expands `root`, diffs it against the previous tree and applies the difference to the host.
	///
	/// # Errors
	///
	/// Iff building or applying failed. See [`RenderError`].
	/// The previous tree is kept in either case.
	#[instrument(skip(self, root))]
	pub fn render(&mut self, root: &Element) -> Result<(), RenderError> {
		let current = build_at(root, NodeId::root(), self.previous.as_ref(), self.depth_limit)?;
		let patches = diff(self.previous.as_ref(), Some(&current), None);
		self.commit(Some(current), patches)
	}

	/// Removes everything rendered so far from the host.
	///
	/// # Errors
	///
	/// [`RenderError::Correlation`] iff the rendered root can't be found in the host anymore.
	#[instrument(skip(self))]
	pub fn unmount(&mut self) -> Result<(), RenderError> {
		let patches = diff(self.previous.as_ref(), None, None);
		self.commit(None, patches)
	}

	fn commit(&mut self, current: Option<ResolvedNode>, patches: Vec<Patch>) -> Result<(), RenderError> {
		apply(&mut self.host, &patches)?;
		info!("Applied {} patch(es).", patches.len());
		self.previous = current;
		self.last_patches = patches;
		Ok(())
	}
}

/// Creates a render function closed over a new [`Renderer`] for `host`.
pub fn create_renderer<H: Host>(host: H) -> impl FnMut(&Element) -> Result<(), RenderError> {
	let mut renderer = Renderer::new(host);
	move |root| renderer.render(root)
}
