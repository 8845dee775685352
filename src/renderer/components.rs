/// Partial markup for one node, as returned by a render callback.
///
/// `None` means the callback leaves the field to whatever the default
/// callback produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorPatch {
    pub item: Option<String>,
    pub list_open: Option<String>,
    pub list_close: Option<String>,
    pub wrapper_open: Option<String>,
    pub wrapper_close: Option<String>,
}

impl DescriptorPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    pub fn list(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.list_open = Some(open.into());
        self.list_close = Some(close.into());
        self
    }

    pub fn wrapper(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.wrapper_open = Some(open.into());
        self.wrapper_close = Some(close.into());
        self
    }
}

/// Fully resolved markup fragments for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderDescriptor {
    pub item: String,
    pub list_open: String,
    pub list_close: String,
    pub wrapper_open: String,
    pub wrapper_close: String,
}

impl RenderDescriptor {
    /// Overwrites every field the patch supplies, keeping the rest.
    pub fn merge(mut self, patch: DescriptorPatch) -> Self {
        if let Some(item) = patch.item {
            self.item = item;
        }
        if let Some(open) = patch.list_open {
            self.list_open = open;
        }
        if let Some(close) = patch.list_close {
            self.list_close = close;
        }
        if let Some(open) = patch.wrapper_open {
            self.wrapper_open = open;
        }
        if let Some(close) = patch.wrapper_close {
            self.wrapper_close = close;
        }
        self
    }

    pub fn has_wrapper(&self) -> bool {
        !self.wrapper_open.is_empty()
    }

    /// `listOpen + item + subtree + listClose`
    pub fn render_item(&self, subtree: &str) -> String {
        let mut output = String::with_capacity(
            self.list_open.len() + self.item.len() + subtree.len() + self.list_close.len(),
        );
        output.push_str(&self.list_open);
        output.push_str(&self.item);
        output.push_str(subtree);
        output.push_str(&self.list_close);
        output
    }
}

impl From<DescriptorPatch> for RenderDescriptor {
    fn from(patch: DescriptorPatch) -> Self {
        RenderDescriptor::default().merge(patch)
    }
}
