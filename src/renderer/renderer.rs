use crate::renderer::components::RenderDescriptor;
use crate::renderer::config::{level_option, LevelOption, RenderConfig};
use crate::renderer::state::{compute_state, ActivePath, NodeState, StateScope};
use crate::renderer::traits::RenderContext;
use crate::tree::{ContentHost, Node, NodeSource, Selector};
use tracing::{debug, trace};

const FALLBACK_WRAPPER_OPEN: &str = "<ul>";
const FALLBACK_WRAPPER_CLOSE: &str = "</ul>";

/// Renders nested markup for a host tree using per-level callbacks.
pub struct TreeRenderer<'h, H: ContentHost + ?Sized> {
    host: &'h H,
    config: RenderConfig,
}

impl<'h, H: ContentHost + ?Sized> TreeRenderer<'h, H> {
    pub fn new(host: &'h H) -> Self {
        Self::with_config(host, RenderConfig::new())
    }

    pub fn with_config(host: &'h H, config: RenderConfig) -> Self {
        Self { host, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    /// Renders `root` down to the configured depth limit.
    ///
    /// `levels[i]` overrides filter and callback for depth `i + 1`. Returns
    /// `None` when the first level has nothing to render.
    ///
    /// Callbacks run once per node in pre-order: a node's callbacks are
    /// invoked before any callback of its descendants.
    pub fn render(&self, root: &NodeSource, levels: &[Option<LevelOption>]) -> Option<String> {
        let pass = RenderPass {
            host: self.host,
            config: &self.config,
            levels,
            active: ActivePath::from_host(self.host),
            debug: self.host.is_debug(),
        };

        let parent = match root {
            NodeSource::Single(node) => Parent::Node(node),
            NodeSource::Set(nodes) => Parent::Set(nodes),
        };
        pass.render_level(parent, 1)
    }
}

#[derive(Clone, Copy)]
enum Parent<'a> {
    Node(&'a Node),
    Set(&'a [Node]),
}

/// State shared by one render call.
struct RenderPass<'a, H: ContentHost + ?Sized> {
    host: &'a H,
    config: &'a RenderConfig,
    levels: &'a [Option<LevelOption>],
    active: ActivePath,
    debug: bool,
}

impl<H: ContentHost + ?Sized> RenderPass<'_, H> {
    fn render_level(&self, parent: Parent<'_>, depth: usize) -> Option<String> {
        if let Some(limit) = self.config.depth_limit {
            if depth > limit {
                debug!(depth, limit, "depth limit reached");
                return None;
            }
        }

        let level = level_option(self.levels, depth);
        let filter = self.config.effective_filter(level);

        let (group, root_set) = match parent {
            Parent::Set(nodes) => (nodes.to_vec(), true),
            Parent::Node(node) => (self.host.children(node, filter), false),
        };

        // Groups bounded by a node without identity count as empty
        let (first, last) = (group.first()?, group.last()?);
        if !first.id.is_valid() || !last.id.is_valid() {
            return None;
        }

        // The group came from the parent, so the parent has children
        let group_has_children = !group.is_empty();

        debug!(depth, filter = %filter, nodes = group.len(), "rendering level");

        let scope = StateScope {
            group: &group,
            depth,
            depth_limit: self.config.depth_limit,
            filter,
            root_set,
        };

        let mut body = String::new();
        let mut first_descriptor: Option<RenderDescriptor> = None;
        let mut last_descriptor: Option<RenderDescriptor> = None;

        for node in &group {
            let state = compute_state(self.host, node, &scope, &self.active);
            let descriptor = self.resolve(node, depth, &state, level);

            let expand = self.should_expand(&state);
            trace!(
                node = %node.id,
                depth,
                parent = state.flags.is_parent,
                current = state.flags.is_current,
                expand,
                "visiting node"
            );

            let subtree = if expand {
                self.render_level(Parent::Node(node), depth + 1)
                    .unwrap_or_default()
            } else {
                String::new()
            };

            body.push_str(&descriptor.render_item(&subtree));
            if self.debug {
                body.push_str(&debug_comment(depth, filter));
            }

            if first_descriptor.is_none() {
                first_descriptor = Some(descriptor.clone());
            }
            last_descriptor = Some(descriptor);
        }

        let mut output = String::new();
        if let Some(first) = &first_descriptor {
            output.push_str(wrapper_open(first, depth, group_has_children));
        }
        output.push_str(&body);
        if let Some(last) = &last_descriptor {
            output.push_str(wrapper_close(last, depth, group_has_children));
        }

        Some(output)
    }

    /// Default callback result with the level callback merged on top.
    fn resolve(&self, node: &Node, depth: usize, state: &NodeState, level: Option<&LevelOption>) -> RenderDescriptor {
        let states = self.config.state_labels.describe(&state.flags);
        let context = RenderContext::new(depth).with_state(state.flags, states);

        let base = RenderDescriptor::from(self.config.default_callback.render(node, &context));
        match level.and_then(|l| l.callback.as_ref()) {
            Some(callback) => base.merge(callback.render(node, &context)),
            None => base,
        }
    }

    fn should_expand(&self, state: &NodeState) -> bool {
        let on_active_branch = state.flags.is_parent || state.flags.is_current;
        state.expandable && (!self.config.collapsed || on_active_branch)
    }
}

fn wrapper_open(descriptor: &RenderDescriptor, depth: usize, group_has_children: bool) -> &str {
    if descriptor.has_wrapper() {
        &descriptor.wrapper_open
    } else if depth == 1 || group_has_children {
        FALLBACK_WRAPPER_OPEN
    } else {
        ""
    }
}

fn wrapper_close(descriptor: &RenderDescriptor, depth: usize, group_has_children: bool) -> &str {
    if descriptor.has_wrapper() {
        &descriptor.wrapper_close
    } else if depth == 1 || group_has_children {
        FALLBACK_WRAPPER_CLOSE
    } else {
        ""
    }
}

fn debug_comment(depth: usize, filter: &Selector) -> String {
    format!("<!-- [aligator] depth: {} filter: '{}' -->", depth, filter)
}
