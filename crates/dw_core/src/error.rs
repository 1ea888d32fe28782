use std::fmt;

use thiserror::Error;

/// Pipeline stage a failure is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetch,
    Title,
    Date,
    Body,
    Format,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetch => "fetch",
            Stage::Title => "title",
            Stage::Date => "date",
            Stage::Body => "body",
            Stage::Format => "format",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed title: {0}")]
    MalformedTitle(String),

    #[error("Malformed date: {0}")]
    MalformedDate(String),

    #[error("Article too old: published {published}, limit {max_age_days} days")]
    TooOld {
        published: chrono::NaiveDate,
        max_age_days: u32,
    },

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Persist error: {0}")]
    Persist(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("[{site}] {stage} stage failed for {url}: {source}")]
    Extraction {
        site: String,
        stage: Stage,
        url: String,
        #[source]
        source: Box<Error>,
    },

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Wraps an error with the site, stage and URL it happened at.
    pub fn at_stage(self, site: &str, stage: Stage, url: &str) -> Self {
        Error::Extraction {
            site: site.to_string(),
            stage,
            url: url.to_string(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping `Extraction` wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Extraction { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Extraction { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
