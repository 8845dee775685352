use crate::error::RenderError;
use crate::tree::host::ContentHost;
use crate::tree::selector::Selector;
use crate::tree::types::{Node, NodeId, NodeRecord, TreeDocument};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug)]
struct Entry {
    node: Node,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A fully loaded tree indexed by id, usable as a `ContentHost`.
#[derive(Debug)]
pub struct MemoryTree {
    entries: HashMap<NodeId, Entry>,
    root: NodeId,
    active: Option<NodeId>,
    debug: bool,
}

impl MemoryTree {
    pub fn from_document(document: TreeDocument) -> Result<Self, RenderError> {
        let mut tree = MemoryTree {
            entries: HashMap::new(),
            root: document.root.id,
            active: None,
            debug: document.debug,
        };
        tree.insert(&document.root, None)?;

        if let Some(active) = document.active {
            tree.set_active(active)?;
        }

        Ok(tree)
    }

    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let document: TreeDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn insert(&mut self, record: &NodeRecord, parent: Option<NodeId>) -> Result<(), RenderError> {
        if !record.id.is_valid() {
            return Err(RenderError::InvalidNodeId);
        }
        if self.entries.contains_key(&record.id) {
            return Err(RenderError::DuplicateNode(record.id));
        }

        self.entries.insert(
            record.id,
            Entry {
                node: record.to_node(),
                parent,
                children: record.children.iter().map(|c| c.id).collect(),
            },
        );

        for child in &record.children {
            self.insert(child, Some(record.id))?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Node {
        // The root is always inserted first by `from_document`
        &self.entries[&self.root].node
    }

    pub fn get(&self, id: NodeId) -> Result<&Node, RenderError> {
        self.entries
            .get(&id)
            .map(|e| &e.node)
            .ok_or(RenderError::UnknownNode(id))
    }

    pub fn set_active(&mut self, id: NodeId) -> Result<(), RenderError> {
        self.get(id)?;
        self.active = Some(id);
        Ok(())
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn child_nodes(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.entries
            .get(&id)
            .into_iter()
            .flat_map(|e| e.children.iter())
            .filter_map(|c| self.entries.get(c).map(|e| &e.node))
    }
}

impl ContentHost for MemoryTree {
    fn children(&self, node: &Node, filter: &Selector) -> Vec<Node> {
        filter.apply(self.child_nodes(node.id))
    }

    fn siblings(&self, node: &Node, filter: &Selector) -> Vec<Node> {
        match self.entries.get(&node.id).and_then(|e| e.parent) {
            Some(parent) => filter.apply(self.child_nodes(parent)),
            None => Vec::new(),
        }
    }

    fn active_node(&self) -> Option<Node> {
        self.active
            .and_then(|id| self.entries.get(&id))
            .map(|e| e.node.clone())
    }

    fn ancestors(&self, node: &Node) -> Vec<Node> {
        let mut chain = Vec::new();
        let mut current = self.entries.get(&node.id).and_then(|e| e.parent);
        while let Some(id) = current {
            let Some(entry) = self.entries.get(&id) else {
                break;
            };
            chain.push(entry.node.clone());
            current = entry.parent;
        }
        chain.reverse();
        chain
    }

    fn is_debug(&self) -> bool {
        self.debug
    }
}
