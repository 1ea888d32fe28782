//! Field extractors. Each one is a pure function of the page and the adapter.

pub mod body;
pub mod date;
pub mod format;
pub mod title;

pub use body::extract_body;
pub use date::extract_date;
pub use format::format_document;
pub use title::{extract_title, sanitize};
