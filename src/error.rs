//! Error types

use crate::tree::NodeId;

/// Errors raised while loading trees or building render configuration.
///
/// Rendering itself never fails: empty branches simply produce no markup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A template, selector or options file cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A referenced node id does not exist in the tree.
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The same id appears twice in a tree document.
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// Node id 0 is reserved for "no node".
    #[error("node id 0 is reserved")]
    InvalidNodeId,

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
