use crate::error::RenderError;
use crate::renderer::components::DescriptorPatch;
use crate::renderer::traits::{RenderCallback, RenderContext};
use crate::tree::Node;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Id,
    Url,
    Title,
    Depth,
    States,
    Attribute(String),
}

/// A string with `{placeholder}` slots, checked when it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, RenderError> {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => name.push(ch),
                            None => {
                                return Err(RenderError::InvalidConfiguration(format!(
                                    "unclosed placeholder in template '{}'",
                                    source
                                )))
                            }
                        }
                    }
                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Self::placeholder(&name, source)?);
                }
                '}' => {
                    return Err(RenderError::InvalidConfiguration(format!(
                        "unmatched '}}' in template '{}'",
                        source
                    )))
                }
                other => text.push(other),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }
        Ok(Self { segments })
    }

    fn placeholder(name: &str, source: &str) -> Result<Segment, RenderError> {
        let segment = match name.trim() {
            "id" => Segment::Id,
            "url" => Segment::Url,
            "title" => Segment::Title,
            "depth" => Segment::Depth,
            "states" => Segment::States,
            other => match other.strip_prefix("attr:") {
                Some(attr) if !attr.is_empty() => Segment::Attribute(attr.to_string()),
                _ => {
                    return Err(RenderError::InvalidConfiguration(format!(
                        "unknown placeholder '{{{}}}' in template '{}'",
                        name, source
                    )))
                }
            },
        };
        Ok(segment)
    }

    pub fn expand(&self, node: &Node, context: &RenderContext) -> String {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Id => output.push_str(&node.id.to_string()),
                Segment::Url => output.push_str(&node.url),
                Segment::Title => output.push_str(&node.title),
                Segment::Depth => output.push_str(&context.depth.to_string()),
                Segment::States => output.push_str(&context.states),
                Segment::Attribute(key) => output.push_str(node.attribute(key).unwrap_or_default()),
            }
        }
        output
    }
}

/// Raw template strings as they appear in an options file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TemplateSpec {
    pub item: Option<String>,
    pub list_open: Option<String>,
    pub list_close: Option<String>,
    pub wrapper_open: Option<String>,
    pub wrapper_close: Option<String>,
}

/// A render callback defined by templates; fields left out stay unset
/// so they merge over the default callback.
#[derive(Debug, Clone, Default)]
pub struct DescriptorTemplate {
    item: Option<Template>,
    list_open: Option<Template>,
    list_close: Option<Template>,
    wrapper_open: Option<Template>,
    wrapper_close: Option<Template>,
}

impl DescriptorTemplate {
    pub fn from_spec(spec: &TemplateSpec) -> Result<Self, RenderError> {
        let parse = |field: &Option<String>| field.as_deref().map(Template::parse).transpose();
        Ok(Self {
            item: parse(&spec.item)?,
            list_open: parse(&spec.list_open)?,
            list_close: parse(&spec.list_close)?,
            wrapper_open: parse(&spec.wrapper_open)?,
            wrapper_close: parse(&spec.wrapper_close)?,
        })
    }
}

impl TryFrom<TemplateSpec> for DescriptorTemplate {
    type Error = RenderError;

    fn try_from(spec: TemplateSpec) -> Result<Self, Self::Error> {
        Self::from_spec(&spec)
    }
}

impl RenderCallback for DescriptorTemplate {
    fn render(&self, node: &Node, context: &RenderContext) -> DescriptorPatch {
        let expand = |t: &Option<Template>| t.as_ref().map(|t| t.expand(node, context));
        DescriptorPatch {
            item: expand(&self.item),
            list_open: expand(&self.list_open),
            list_close: expand(&self.list_close),
            wrapper_open: expand(&self.wrapper_open),
            wrapper_close: expand(&self.wrapper_close),
        }
    }
}
