//! JSON options files: default options plus one entry per depth.
//!
//! ```json
//! {
//!   "default": { "filter": "hidden!=1" },
//!   "levels": [
//!     { "template": { "listOpen": "<li class='{states}'>" } },
//!     null,
//!     { "filter": "template=article", "template": { "item": "{title}" } }
//!   ]
//! }
//! ```

use crate::error::RenderError;
use crate::renderer::{DefaultOptions, DescriptorTemplate, LevelOption, RenderConfig, TemplateSpec};
use crate::tree::Selector;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelSpec {
    pub filter: Option<String>,
    pub template: Option<TemplateSpec>,
}

impl LevelSpec {
    pub fn build(&self) -> Result<LevelOption, RenderError> {
        let mut option = LevelOption::new();
        if let Some(filter) = &self.filter {
            option.filter = Some(Selector::parse(filter)?);
        }
        if let Some(template) = &self.template {
            option.callback = Some(Arc::new(DescriptorTemplate::from_spec(template)?));
        }
        Ok(option)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderOptions {
    #[serde(default)]
    pub default: Option<LevelSpec>,
    #[serde(default)]
    pub levels: Vec<Option<LevelSpec>>,
}

impl RenderOptions {
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        let options: RenderOptions = serde_json::from_str(json)
            .map_err(|e| RenderError::InvalidConfiguration(format!("options: {}", e)))?;
        Ok(options)
    }

    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Applies the `default` entry to `config`.
    pub fn apply_defaults(&self, config: &mut RenderConfig) -> Result<(), RenderError> {
        if let Some(default) = &self.default {
            config.set_default_options(DefaultOptions::from(default.build()?));
        }
        Ok(())
    }

    /// Builds the per-depth overrides, validating every selector and template.
    pub fn level_options(&self) -> Result<Vec<Option<LevelOption>>, RenderError> {
        self.levels
            .iter()
            .map(|spec| spec.as_ref().map(LevelSpec::build).transpose())
            .collect()
    }
}
