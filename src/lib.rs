//! # Aligator
//!
//! Renders nested markup (nested `<ul>` lists by default) from a page tree,
//! one sibling group per depth, using per-level filters and callbacks.
//!
//! ```
//! use aligator::{MemoryTree, NodeSource, TreeRenderer};
//!
//! let tree = MemoryTree::from_json(r#"{
//!     "root": { "id": 1, "url": "/", "title": "Home", "children": [
//!         { "id": 2, "url": "/about/", "title": "About" }
//!     ] }
//! }"#).unwrap();
//!
//! let renderer = TreeRenderer::new(&tree);
//! let markup = renderer.render(&NodeSource::Single(tree.root().clone()), &[]);
//! assert_eq!(markup.as_deref(), Some("<ul><li><a href='/about/'>About</a></li></ul>"));
//! ```

pub mod error;
pub mod options;
pub mod renderer;
pub mod tree;

#[cfg(test)]
mod tests;

pub use error::RenderError;
pub use options::RenderOptions;
pub use renderer::*;
pub use tree::*;
