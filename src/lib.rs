#![doc(html_root_url = "https://docs.rs/xylem/0.0.1")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod build;
pub mod diff;
pub mod element;
pub mod error;
pub mod host;
pub mod memo;
pub mod memory;
pub mod patch;
pub mod render;
#[cfg(feature = "web")]
pub mod web;

pub use build::{build, NodeId, ResolvedNode};
pub use diff::{diff, Patch};
pub use element::{component, ComponentRef, Element, ElementKind, Props, Value};
pub use error::RenderError;
pub use host::Host;
pub use memo::{memo, Memo};
pub use memory::MemoryHost;
pub use render::{create_renderer, Renderer};
