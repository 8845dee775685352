use crate::renderer::components::DescriptorPatch;
use crate::renderer::state::StateFlags;
use crate::tree::Node;

/// Per-node information handed to render callbacks.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// 1-based distance from the render root.
    pub depth: usize,
    pub flags: StateFlags,
    /// Space-joined state labels, empty when labels are disabled.
    pub states: String,
}

impl RenderContext {
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            flags: StateFlags::default(),
            states: String::new(),
        }
    }

    pub fn with_state(&self, flags: StateFlags, states: String) -> Self {
        Self {
            depth: self.depth,
            flags,
            states,
        }
    }
}

/// Produces the markup fragments for one node.
pub trait RenderCallback: Send + Sync {
    fn render(&self, node: &Node, context: &RenderContext) -> DescriptorPatch;
}

impl<F> RenderCallback for F
where
    F: Fn(&Node, &RenderContext) -> DescriptorPatch + Send + Sync,
{
    fn render(&self, node: &Node, context: &RenderContext) -> DescriptorPatch {
        self(node, context)
    }
}

/// Nested list markup: `<ul><li><a href='url'>title</a>...</li></ul>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCallback;

impl RenderCallback for DefaultCallback {
    fn render(&self, node: &Node, _context: &RenderContext) -> DescriptorPatch {
        DescriptorPatch::new()
            .item(format!("<a href='{}'>{}</a>", node.url, node.title))
            .list("<li>", "</li>")
            .wrapper("<ul>", "</ul>")
    }
}
