use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content address of a string: lowercase hex SHA-256 over its exact bytes.
pub fn derive_id(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// The site a deployment targets. Shared read-only across pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteIdentity {
    pub id: String,
    pub domain: String,
    pub title: String,
}

impl SiteIdentity {
    pub fn new(domain: impl Into<String>, title: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            id: derive_id(&domain),
            domain,
            title: title.into(),
        }
    }
}

/// A normalized article. Fields are only readable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    id: String,
    title: String,
    content: String,
    source_url: String,
    publication_date: NaiveDate,
    website_id: String,
    website_domain: String,
    website_title: String,
}

impl ArticleRecord {
    pub fn new(
        source_url: &str,
        title: String,
        content: String,
        publication_date: NaiveDate,
        site: &SiteIdentity,
    ) -> Self {
        Self {
            id: derive_id(source_url),
            title,
            content,
            source_url: source_url.to_string(),
            publication_date,
            website_id: site.id.clone(),
            website_domain: site.domain.clone(),
            website_title: site.title.clone(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn publication_date(&self) -> NaiveDate {
        self.publication_date
    }

    pub fn website_id(&self) -> &str {
        &self.website_id
    }

    pub fn website_domain(&self) -> &str {
        &self.website_domain
    }

    pub fn website_title(&self) -> &str {
        &self.website_title
    }
}
