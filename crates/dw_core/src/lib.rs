pub mod config;
pub mod error;
pub mod query;
pub mod storage;
pub mod types;

pub use config::{Config, HumanDuration, SiteConfig};
pub use error::{Error, Result, Stage};
pub use storage::{ArticleStatus, ArticleStorage};
pub use types::{derive_id, ArticleRecord, SiteIdentity};
