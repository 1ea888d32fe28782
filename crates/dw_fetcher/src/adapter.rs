//! Markup constants for the DW article template.

use dw_core::{Error, Result};
use regex::bytes::Regex;

use crate::dom::{Element, Node};

const DATE_MARKER: &str = r#"articleChangeDateShort:\s*"([^"]*)""#;
const INTRO_MARKER: &str = r#"<p class="intro">(.*?)</p>"#;

/// Where the article body lives, and the one layout quirk it is known to have.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    pub tag: String,
    pub class: String,
    /// Some pages carry a spurious node right after the container's first
    /// child node (text and comments count); it is identified by the value of
    /// its first attribute.
    pub spurious_sibling_sentinel: Option<String>,
}

impl ContainerConfig {
    /// Drops the spurious sibling if present. Returns whether anything was removed.
    pub fn correct_layout(&self, container: &mut Element) -> bool {
        let Some(sentinel) = self.spurious_sibling_sentinel.as_deref() else {
            return false;
        };
        let is_spurious = match container.children.get(1) {
            Some(Node::Element(el)) => el.attrs.first().map_or(false, |(_, v)| v == sentinel),
            _ => false,
        };
        if is_spurious {
            container.children.remove(1);
        }
        is_spurious
    }
}

#[derive(Debug, Clone)]
pub struct SiteAdapter {
    pub title_tag: String,
    pub title_separator: char,
    /// First capture group holds the compact date.
    pub date_marker: Regex,
    pub date_format: String,
    /// First capture group holds the intro text.
    pub intro_marker: Regex,
    pub container: ContainerConfig,
    pub heading_tags: Vec<String>,
    pub paragraph_tag: String,
    pub span_tag: String,
    /// Extra block tags rendered as plain lines.
    pub extra_block_tags: Vec<String>,
    /// Inline-markup leftovers removed from the assembled body.
    pub residue: Vec<String>,
}

impl SiteAdapter {
    /// DW layout with custom date and intro patterns.
    pub fn with_patterns(date_marker: &str, intro_marker: &str) -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern).map_err(|e| Error::Config(format!("Invalid pattern {}: {}", pattern, e)))
        };

        Ok(Self {
            title_tag: "title".to_string(),
            title_separator: '|',
            date_marker: compile(date_marker)?,
            date_format: "%Y%m%d".to_string(),
            intro_marker: compile(intro_marker)?,
            container: ContainerConfig {
                tag: "div".to_string(),
                class: "longText".to_string(),
                spurious_sibling_sentinel: Some("col1".to_string()),
            },
            heading_tags: vec!["h2".to_string()],
            paragraph_tag: "p".to_string(),
            span_tag: "span".to_string(),
            extra_block_tags: Vec::new(),
            residue: vec![
                "strong  \n".to_string(),
                "em  \n".to_string(),
                "**\n**   \n".to_string(),
            ],
        })
    }

    pub fn dw() -> Self {
        Self::with_patterns(DATE_MARKER, INTRO_MARKER).expect("built-in DW patterns compile")
    }

    /// Every tag the body walk stops at, in no particular order.
    pub fn block_tags(&self) -> Vec<&str> {
        self.heading_tags
            .iter()
            .chain(std::iter::once(&self.paragraph_tag))
            .chain(self.extra_block_tags.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn is_heading(&self, tag: &str) -> bool {
        self.heading_tags.iter().any(|h| h == tag)
    }

    pub fn strip_residue(&self, body: &str) -> String {
        self.residue
            .iter()
            .fold(body.to_string(), |acc, r| acc.replace(r.as_str(), ""))
    }
}

impl Default for SiteAdapter {
    fn default() -> Self {
        Self::dw()
    }
}
