use crate::error::RenderError;
use crate::tree::types::Node;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Equals,
    NotEquals,
    Contains,
    StartsWith,
}

impl Operator {
    fn symbol(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::Contains => "*=",
            Operator::StartsWith => "^=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Condition {
    field: String,
    op: Operator,
    value: String,
}

impl Condition {
    fn matches(&self, node: &Node) -> bool {
        let actual = node.field(&self.field).unwrap_or_default();
        match self.op {
            Operator::Equals => actual == self.value,
            Operator::NotEquals => actual != self.value,
            Operator::Contains => actual.contains(&self.value),
            Operator::StartsWith => actual.starts_with(&self.value),
        }
    }
}

/// A child filter: comma separated `field<op>value` terms plus an optional
/// `limit=N`. The empty selector matches every node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    conditions: Vec<Condition>,
    limit: Option<usize>,
}

impl Selector {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> Result<Self, RenderError> {
        let mut selector = Selector::default();

        for term in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let (field, op, value) = split_term(term).ok_or_else(|| {
                RenderError::InvalidConfiguration(format!("selector term '{}' has no operator", term))
            })?;

            let field = field.trim();
            let value = value.trim();
            if field.is_empty() {
                return Err(RenderError::InvalidConfiguration(format!(
                    "selector term '{}' has no field",
                    term
                )));
            }

            if field == "limit" && op == Operator::Equals {
                let limit = value.parse::<usize>().map_err(|_| {
                    RenderError::InvalidConfiguration(format!("selector limit '{}' is not a number", value))
                })?;
                selector.limit = Some(limit);
                continue;
            }

            selector.conditions.push(Condition {
                field: field.to_string(),
                op,
                value: value.to_string(),
            });
        }

        Ok(selector)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.limit.is_none()
    }

    pub fn matches(&self, node: &Node) -> bool {
        self.conditions.iter().all(|c| c.matches(node))
    }

    /// Applies conditions and limit to an ordered candidate list.
    pub fn apply<'a, I>(&self, nodes: I) -> Vec<Node>
    where
        I: IntoIterator<Item = &'a Node>,
    {
        let matched = nodes.into_iter().filter(|n| self.matches(n)).cloned();
        match self.limit {
            Some(limit) => matched.take(limit).collect(),
            None => matched.collect(),
        }
    }
}

/// Splits a term at its leftmost operator; the value may contain operator characters.
fn split_term(term: &str) -> Option<(&str, Operator, &str)> {
    term.char_indices().find_map(|(i, c)| {
        let op = match (c, term[i + c.len_utf8()..].starts_with('=')) {
            ('!', true) => Operator::NotEquals,
            ('*', true) => Operator::Contains,
            ('^', true) => Operator::StartsWith,
            ('=', _) => Operator::Equals,
            _ => return None,
        };
        let width = op.symbol().len();
        Some((&term[..i], op, &term[i + width..]))
    })
}

impl FromStr for Selector {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut terms: Vec<String> = self
            .conditions
            .iter()
            .map(|c| format!("{}{}{}", c.field, c.op.symbol(), c.value))
            .collect();
        if let Some(limit) = self.limit {
            terms.push(format!("limit={}", limit));
        }
        write!(f, "{}", terms.join(", "))
    }
}
