use thiserror::Error;

use crate::{build::NodeId, element::ComponentError};

/// Why a render was aborted.
///
/// In every case the [`Renderer`](`crate::Renderer`)'s previous tree is left untouched,
/// so that a later render can retry from the last successfully applied state.
#[derive(Debug, Error)]
pub enum RenderError {
	/// A component function failed during expansion. Nothing was applied to the host.
	#[error("component `{name}` at {id} failed: {source}")]
	Component {
		id: NodeId,
		name: &'static str,
		source: ComponentError,
	},

	/// The host has no node tagged with this structural id, or no root for [`None`].
	///
	/// This means the host tree and the previously rendered tree are out of sync.
	/// Patches before the failing one remain applied.
	#[error("no host node correlates with {}", .id.as_ref().map_or("the render target root", NodeId::as_str))]
	Correlation { id: Option<NodeId> },

	/// Expansion nested deeper than the configured limit, which usually means a component renders itself.
	#[error("depth limit ({limit}) reached at {id}")]
	DepthLimit { id: NodeId, limit: usize },
}
