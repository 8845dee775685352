use crate::renderer::state::{StateFlag, StateLabels};
use crate::renderer::traits::{DefaultCallback, RenderCallback};
use crate::tree::Selector;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Overrides for one depth. Unset fields fall back to the configured defaults.
#[derive(Clone, Default)]
pub struct LevelOption {
    pub filter: Option<Selector>,
    pub callback: Option<Arc<dyn RenderCallback>>,
}

impl LevelOption {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Selector) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn callback(mut self, callback: impl RenderCallback + 'static) -> Self {
        self.callback = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for LevelOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelOption")
            .field("filter", &self.filter)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// The entry for `depth` (1-based), if one was configured.
pub fn level_option(levels: &[Option<LevelOption>], depth: usize) -> Option<&LevelOption> {
    depth
        .checked_sub(1)
        .and_then(|index| levels.get(index))
        .and_then(Option::as_ref)
}

/// Partial update for the global defaults.
#[derive(Clone, Default)]
pub struct DefaultOptions {
    pub filter: Option<Selector>,
    pub callback: Option<Arc<dyn RenderCallback>>,
}

impl From<LevelOption> for DefaultOptions {
    fn from(option: LevelOption) -> Self {
        Self {
            filter: option.filter,
            callback: option.callback,
        }
    }
}

/// Argument of `RenderConfig::set_default_states`.
#[derive(Debug, Clone)]
pub enum DefaultStates {
    Toggle(bool),
    Labels(BTreeMap<StateFlag, String>),
}

impl From<bool> for DefaultStates {
    fn from(enabled: bool) -> Self {
        DefaultStates::Toggle(enabled)
    }
}

impl From<BTreeMap<StateFlag, String>> for DefaultStates {
    fn from(labels: BTreeMap<StateFlag, String>) -> Self {
        DefaultStates::Labels(labels)
    }
}

/// Settings shared by every render call. Configure before rendering.
#[derive(Clone)]
pub struct RenderConfig {
    pub default_callback: Arc<dyn RenderCallback>,
    pub default_filter: Selector,
    /// `None` renders the whole tree.
    pub depth_limit: Option<usize>,
    /// Only expand the branch leading to the active node.
    pub collapsed: bool,
    pub state_labels: StateLabels,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self {
            default_callback: Arc::new(DefaultCallback),
            default_filter: Selector::all(),
            depth_limit: None,
            collapsed: false,
            state_labels: StateLabels::default(),
        }
    }

    pub fn set_default_options(&mut self, options: DefaultOptions) {
        if let Some(filter) = options.filter {
            self.default_filter = filter;
        }
        if let Some(callback) = options.callback {
            self.default_callback = callback;
        }
    }

    pub fn set_default_states(&mut self, states: impl Into<DefaultStates>) {
        match states.into() {
            DefaultStates::Toggle(enabled) => self.state_labels.toggle(enabled),
            DefaultStates::Labels(labels) => self.state_labels.extend(labels),
        }
    }

    pub fn set_depth_limit(&mut self, limit: Option<usize>) {
        self.depth_limit = limit;
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    /// Level filter if set, otherwise the default filter.
    pub fn effective_filter<'a>(&'a self, level: Option<&'a LevelOption>) -> &'a Selector {
        level
            .and_then(|l| l.filter.as_ref())
            .unwrap_or(&self.default_filter)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("default_filter", &self.default_filter)
            .field("depth_limit", &self.depth_limit)
            .field("collapsed", &self.collapsed)
            .field("state_labels", &self.state_labels)
            .finish_non_exhaustive()
    }
}
