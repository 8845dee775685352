use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a node in the host tree. Zero is reserved for "no node".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl NodeId {
    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A page-like entity supplied by the host. The renderer only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub url: String,
    pub title: String,
    pub attributes: BTreeMap<String, String>,
}

impl Node {
    pub fn new(id: u64, url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            url: url.into(),
            title: title.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Field lookup used by selectors and templates.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "id" => Some(self.id.to_string()),
            "url" => Some(self.url.clone()),
            "title" => Some(self.title.clone()),
            other => self.attribute(other).map(str::to_string),
        }
    }
}

/// Where a render starts: one parent whose children form depth 1, or an
/// explicit root set rendered as the depth-1 sibling group.
#[derive(Debug, Clone)]
pub enum NodeSource {
    Single(Node),
    Set(Vec<Node>),
}

impl From<Node> for NodeSource {
    fn from(node: Node) -> Self {
        NodeSource::Single(node)
    }
}

impl From<Vec<Node>> for NodeSource {
    fn from(nodes: Vec<Node>) -> Self {
        NodeSource::Set(nodes)
    }
}

// Serialized tree format read by `MemoryTree`

#[derive(Debug, Deserialize)]
pub struct TreeDocument {
    pub root: NodeRecord,
    #[serde(default)]
    pub active: Option<NodeId>,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<NodeRecord>,
}

impl NodeRecord {
    pub fn to_node(&self) -> Node {
        Node {
            id: self.id,
            url: self.url.clone(),
            title: self.title.clone(),
            attributes: self.attributes.clone(),
        }
    }
}
