pub mod adapter;
pub mod cli;
pub mod dom;
pub mod dw;
pub mod extract;
pub mod fetch;
pub mod logging;
pub mod manager;
pub mod pipeline;

pub use adapter::{ContainerConfig, SiteAdapter};
pub use cli::{handle_command, FetchArgs, FetchCommands};
pub use dw::DwScraper;
pub use fetch::{HttpFetcher, Page, PageFetcher};
pub use manager::{FetchManager, FetchOutcome};
pub use pipeline::ExtractionPipeline;

pub mod prelude {
    pub use super::{DwScraper, ExtractionPipeline, FetchManager, Page, PageFetcher};
    pub use dw_core::{ArticleRecord, Error, Result};
}
