use dw_core::{Error, Result};
use tracing::debug;

use crate::adapter::SiteAdapter;
use crate::dom::{Document, Element};

/// Intro paragraph text, searched in the raw page with newlines removed.
fn extract_intro(raw: &[u8], adapter: &SiteAdapter) -> Result<String> {
    let flat: Vec<u8> = raw.iter().copied().filter(|&b| b != b'\n').collect();
    adapter
        .intro_marker
        .captures(&flat)
        .and_then(|c| c.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
        .ok_or_else(|| Error::NotFound("intro matched nothing".to_string()))
}

/// Appends the first fragment of every nested span, and its last fragment when
/// that one differs. Returns false when the block has no spans.
fn merge_spans(block: &Element, adapter: &SiteAdapter, body: &mut String) -> bool {
    let spans = block.elements_by_tag(&[adapter.span_tag.as_str()]);
    for span in &spans {
        if let (Some(first), Some(last)) = (span.first_child(), span.last_child()) {
            body.push_str(first.data());
            if first.data() != last.data() {
                body.push_str(last.data());
            }
        }
    }
    !spans.is_empty()
}

/// Rebuilds the article body as flat markdown-ish text: the intro as a quote,
/// headings in bold, one line per paragraph.
pub fn extract_body(document: &Document, raw: &[u8], adapter: &SiteAdapter) -> Result<String> {
    let mut body = String::new();

    let intro = extract_intro(raw, adapter)?;
    if !intro.is_empty() {
        body.push_str("> ");
        body.push_str(&intro);
        body.push_str("  \n\n");
    }

    let config = &adapter.container;
    let mut container = document
        .root()
        .find_by_tag_and_class(&config.tag, &config.class)
        .cloned()
        .ok_or_else(|| {
            Error::NotFound(format!("no <{} class=\"{}\"> container", config.tag, config.class))
        })?;
    if config.correct_layout(&mut container) {
        debug!("removed spurious sibling from content container");
    }

    let mut blocks = 0;
    for block in container.elements_by_tag(&adapter.block_tags()) {
        let Some(first) = block.first_child() else {
            continue;
        };
        blocks += 1;

        if adapter.is_heading(&block.name) {
            body.push_str("\n**");
            if !merge_spans(block, adapter, &mut body) {
                body.push_str(first.data());
            }
            body.push_str("**   \n");
        } else if block.name == adapter.paragraph_tag {
            if !merge_spans(block, adapter, &mut body) {
                body.push_str(first.data());
            }
            body.push_str("  \n");
        } else {
            body.push_str(first.data());
            body.push_str("  \n");
        }
    }

    if blocks == 0 {
        return Err(Error::NotFound("no paragraph or heading in content container".to_string()));
    }

    let body = adapter.strip_residue(&body);
    if body.trim().is_empty() {
        return Err(Error::NotFound("content container has no text".to_string()));
    }
    Ok(body)
}
