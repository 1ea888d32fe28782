use dw_core::{Error, Result};

use crate::adapter::SiteAdapter;
use crate::dom::Document;

/// Characters replaced by their full-width forms so titles are safe as
/// file names and storage keys.
const REPLACEMENTS: &[(char, char)] = &[
    ('"', '″'),
    ('?', '？'),
    (':', '：'),
    ('*', '＊'),
    ('<', '＜'),
    ('>', '＞'),
    ('\\', '＼'),
    ('/', '／'),
    ('|', '｜'),
];

/// Drops control characters and swaps storage-unsafe ones.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .map(|c| {
            REPLACEMENTS
                .iter()
                .find(|(from, _)| *from == c)
                .map_or(c, |(_, to)| *to)
        })
        .collect()
}

/// Title text before the site separator, e.g. `"Headline | DW | 20.02.2021"`.
pub fn extract_title(document: &Document, adapter: &SiteAdapter) -> Result<String> {
    let raw = document
        .root()
        .elements_by_tag(&[adapter.title_tag.as_str()])
        .first()
        .and_then(|el| el.first_child())
        .map(|node| node.data().to_string())
        .ok_or_else(|| Error::NotFound(format!("there is no element <{}>", adapter.title_tag)))?;

    let (head, _) = raw.split_once(adapter.title_separator).ok_or_else(|| {
        Error::MalformedTitle(format!(
            "separator {:?} missing in title {:?}",
            adapter.title_separator, raw
        ))
    })?;

    Ok(sanitize(head.trim()))
}
