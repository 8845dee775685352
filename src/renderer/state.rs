use crate::tree::{ContentHost, Node, NodeId, Selector};
use std::collections::BTreeMap;

/// Relational flags, in the order their labels are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StateFlag {
    Parent,
    Current,
    HasChildren,
    First,
    Last,
}

impl StateFlag {
    pub const ALL: [StateFlag; 5] = [
        StateFlag::Parent,
        StateFlag::Current,
        StateFlag::HasChildren,
        StateFlag::First,
        StateFlag::Last,
    ];

    pub fn default_label(&self) -> &'static str {
        match self {
            StateFlag::Parent => "parent",
            StateFlag::Current => "current",
            StateFlag::HasChildren => "has_children",
            StateFlag::First => "first",
            StateFlag::Last => "last",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateFlags {
    pub is_parent: bool,
    pub is_current: bool,
    pub has_children: bool,
    pub is_first: bool,
    pub is_last: bool,
}

impl StateFlags {
    pub fn get(&self, flag: StateFlag) -> bool {
        match flag {
            StateFlag::Parent => self.is_parent,
            StateFlag::Current => self.is_current,
            StateFlag::HasChildren => self.has_children,
            StateFlag::First => self.is_first,
            StateFlag::Last => self.is_last,
        }
    }
}

/// Label vocabulary for state flags and whether labels are emitted at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLabels {
    enabled: bool,
    labels: BTreeMap<StateFlag, String>,
}

impl Default for StateLabels {
    fn default() -> Self {
        Self {
            enabled: false,
            labels: Self::builtin(),
        }
    }
}

impl StateLabels {
    fn builtin() -> BTreeMap<StateFlag, String> {
        StateFlag::ALL
            .iter()
            .map(|f| (*f, f.default_label().to_string()))
            .collect()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn label(&self, flag: StateFlag) -> Option<&str> {
        self.labels.get(&flag).map(String::as_str)
    }

    /// `true` restores the built-in vocabulary, `false` clears it.
    pub fn toggle(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.labels = if enabled { Self::builtin() } else { BTreeMap::new() };
    }

    pub fn extend(&mut self, custom: BTreeMap<StateFlag, String>) {
        self.labels.extend(custom);
        self.enabled = true;
    }

    /// Space-joined labels of the flags that are set, or "" when disabled.
    pub fn describe(&self, flags: &StateFlags) -> String {
        if !self.enabled {
            return String::new();
        }
        StateFlag::ALL
            .iter()
            .filter(|f| flags.get(**f))
            .filter_map(|f| self.label(*f))
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The active node and its ancestor chain, looked up once per render.
#[derive(Debug, Clone, Default)]
pub struct ActivePath {
    active: Option<NodeId>,
    ancestors: Vec<NodeId>,
}

impl ActivePath {
    pub fn from_host<H: ContentHost + ?Sized>(host: &H) -> Self {
        match host.active_node() {
            Some(active) => Self {
                active: Some(active.id),
                ancestors: host.ancestors(&active).iter().map(|n| n.id).collect(),
            },
            None => Self::default(),
        }
    }

    pub fn is_current(&self, node: &Node) -> bool {
        self.active == Some(node.id)
    }

    pub fn has_ancestor(&self, node: &Node) -> bool {
        self.ancestors.contains(&node.id)
    }
}

/// Where a node sits while its sibling group is being rendered.
#[derive(Debug, Clone, Copy)]
pub struct StateScope<'a> {
    pub group: &'a [Node],
    pub depth: usize,
    pub depth_limit: Option<usize>,
    pub filter: &'a Selector,
    /// The group is an explicit root set rendered at depth 1.
    pub root_set: bool,
}

impl StateScope<'_> {
    fn next_depth_allowed(&self) -> bool {
        self.depth_limit.map_or(true, |limit| self.depth < limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState {
    pub flags: StateFlags,
    /// Filtered children exist and the next depth is within the limit.
    pub expandable: bool,
}

pub fn compute_state<H: ContentHost + ?Sized>(
    host: &H,
    node: &Node,
    scope: &StateScope<'_>,
    active: &ActivePath,
) -> NodeState {
    let expandable = scope.next_depth_allowed() && host.child_count(node, scope.filter) > 0;

    // A root-set member that is the host's top node is everyone's ancestor
    let set_root = scope.root_set && host.ancestors(node).is_empty();

    // Reported only in limited mode; unlimited traversal never sets it
    let has_children = !set_root && scope.depth_limit.is_some() && expandable;

    let is_parent = !set_root && active.has_ancestor(node);

    let is_first = scope.group.first().map(|n| n.id) == Some(node.id);
    let is_last = scope.group.last().map(|n| n.id) == Some(node.id)
        || host.siblings(node, scope.filter).last().map(|n| n.id) == Some(node.id);

    NodeState {
        flags: StateFlags {
            is_parent,
            is_current: active.is_current(node),
            has_children,
            is_first,
            is_last,
        },
        expandable,
    }
}
