use crate::tree::selector::Selector;
use crate::tree::types::Node;

/// Read-only view of the content system the renderer walks.
///
/// Every lookup is synchronous. Implementations return owned nodes in
/// their natural sibling order and an empty list when nothing matches.
pub trait ContentHost {
    /// Children of `node` that match `filter`.
    fn children(&self, node: &Node, filter: &Selector) -> Vec<Node>;

    fn child_count(&self, node: &Node, filter: &Selector) -> usize {
        self.children(node, filter).len()
    }

    /// All children of `node`'s parent that match `filter`, `node` included
    /// when it matches. A parentless node has no siblings.
    fn siblings(&self, node: &Node, filter: &Selector) -> Vec<Node>;

    /// The node currently being viewed.
    fn active_node(&self) -> Option<Node>;

    /// Ancestors of `node`, nearest root first, excluding `node` itself.
    fn ancestors(&self, node: &Node) -> Vec<Node>;

    fn is_debug(&self) -> bool {
        false
    }
}
