//! Subscriber setup and the span every article is processed under.
//!
//! Events carry `site`, `url` and `stage` as structured fields instead of
//! message prefixes, so a failed run can be filtered by any of them.

use std::sync::Once;

use tracing::{Level, Span};

static INIT: Once = Once::new();

/// Installs the fmt subscriber once; later calls are no-ops.
pub fn init_logging(verbose: bool) {
    INIT.call_once(|| {
        let level = if verbose { Level::DEBUG } else { Level::INFO };
        let installed = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init();
        if installed.is_err() {
            tracing::debug!("global subscriber already set, keeping it");
        }
    });
}

pub fn article_span(site: &str, url: &str) -> Span {
    tracing::info_span!("article", site = %site, url = %url)
}

pub fn batch_span(site: &str, size: usize) -> Span {
    tracing::info_span!("batch", site = %site, size)
}
