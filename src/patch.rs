//! Application of [`Patch`]es to a [`Host`].

use tracing::{error, instrument, trace_span};

use crate::{build::NodeId, diff::Patch, error::RenderError, host::Host};

/// Applies `patches` to `host` strictly in order.
///
/// # Errors
///
/// [`RenderError::Correlation`] iff a patch targets a structural id the host doesn't know.
/// Application stops there and the patches before it stay applied.
#[instrument(skip(host, patches), fields(count = patches.len()))]
pub fn apply<H: Host + ?Sized>(host: &mut H, patches: &[Patch]) -> Result<(), RenderError> {
	for patch in patches {
		apply_one(host, patch)?;
	}
	Ok(())
}

fn apply_one<H: Host + ?Sized>(host: &mut H, patch: &Patch) -> Result<(), RenderError> {
	match patch {
		Patch::Create { parent, node } => {
			let span = trace_span!("Applying create", parent = ?parent.as_ref().map(NodeId::as_str), id = %node.id);
			let _enter = span.enter();
			let parent = correlate(host, parent.as_ref())?;
			host.instantiate(node, &parent, None);
		}

		Patch::Remove { id } => {
			let span = trace_span!("Applying remove", %id);
			let _enter = span.enter();
			let node = correlate(host, Some(id))?;
			host.detach(&node);
		}

		Patch::Replace { id, node } => {
			let span = trace_span!("Applying replace", %id, tag = %node.tag);
			let _enter = span.enter();
			let old = correlate(host, Some(id))?;
			let parent = match host.parent(&old) {
				Some(parent) => parent,
				None => {
					error!("Host node {} to replace has no parent.", id);
					return Err(RenderError::Correlation { id: Some(id.clone()) });
				}
			};
			let next_sibling = host.next_sibling(&old);
			host.detach(&old);
			host.instantiate(node, &parent, next_sibling.as_ref());
		}

		Patch::Update { id, props } => {
			let span = trace_span!("Applying update", %id, ?props);
			let _enter = span.enter();
			let node = correlate(host, Some(id))?;
			host.update_props(&node, props);
		}
	}
	Ok(())
}

fn correlate<H: Host + ?Sized>(host: &mut H, id: Option<&NodeId>) -> Result<H::Node, RenderError> {
	host.correlate(id).ok_or_else(|| {
		error!("Failed to correlate {:?} with a host node. The host tree is out of sync.", id.map(NodeId::as_str));
		RenderError::Correlation { id: id.cloned() }
	})
}
