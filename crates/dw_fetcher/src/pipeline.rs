//! Extraction pipeline.
//!
//! Stages are separate types, each only constructible from the previous one:
//! `Extraction -> TitleResolved -> DateResolved -> BodyResolved -> Formatted`.
//! A failing stage returns `Error::Extraction` tagged with site, stage and URL
//! and nothing else is produced.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use dw_core::{ArticleRecord, Error, Result, SiteIdentity, Stage};
use tracing::{debug, info, warn};

use crate::adapter::SiteAdapter;
use crate::extract;
use crate::fetch::Page;
use crate::logging::article_span;

#[derive(Clone)]
pub struct ExtractionPipeline {
    site: Arc<SiteIdentity>,
    adapter: Arc<SiteAdapter>,
    max_age_days: Option<u32>,
}

impl ExtractionPipeline {
    pub fn new(site: Arc<SiteIdentity>, adapter: Arc<SiteAdapter>) -> Self {
        Self {
            site,
            adapter,
            max_age_days: None,
        }
    }

    /// Reject articles published more than `days` days before the run date.
    pub fn with_max_age_days(mut self, days: Option<u32>) -> Self {
        self.max_age_days = days;
        self
    }

    pub fn site(&self) -> &SiteIdentity {
        &self.site
    }

    pub fn start<'a>(&'a self, url: &'a str, page: &'a Page) -> Extraction<'a> {
        Extraction {
            pipeline: self,
            url,
            page,
        }
    }

    /// Runs every stage against an already fetched page.
    pub fn run(&self, url: &str, page: &Page) -> Result<ArticleRecord> {
        self.run_on(url, page, Utc::now().date_naive())
    }

    pub fn run_on(&self, url: &str, page: &Page, today: NaiveDate) -> Result<ArticleRecord> {
        let _span = article_span(&self.site.title, url).entered();
        let record = self
            .start(url, page)
            .resolve_title()?
            .resolve_date(today)?
            .resolve_body()?
            .format()
            .into_record();
        info!(id = %record.id(), title = %record.title(), "article extracted");
        Ok(record)
    }

    fn fail(&self, err: Error, stage: Stage, url: &str) -> Error {
        warn!(%stage, error = %err, "extraction stage failed");
        err.at_stage(&self.site.title, stage, url)
    }
}

pub struct Extraction<'a> {
    pipeline: &'a ExtractionPipeline,
    url: &'a str,
    page: &'a Page,
}

impl<'a> Extraction<'a> {
    pub fn resolve_title(self) -> Result<TitleResolved<'a>> {
        let p = self.pipeline;
        let title = extract::extract_title(self.page.document(), &p.adapter)
            .map_err(|e| p.fail(e, Stage::Title, self.url))?;
        debug!(stage = %Stage::Title, %title);
        Ok(TitleResolved { ctx: self, title })
    }
}

pub struct TitleResolved<'a> {
    ctx: Extraction<'a>,
    title: String,
}

impl<'a> TitleResolved<'a> {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn resolve_date(self, today: NaiveDate) -> Result<DateResolved<'a>> {
        let p = self.ctx.pipeline;
        let url = self.ctx.url;
        let date = extract::extract_date(self.ctx.page.raw(), &p.adapter)
            .and_then(|date| check_age(date, today, p.max_age_days))
            .map_err(|e| p.fail(e, Stage::Date, url))?;
        debug!(stage = %Stage::Date, %date);
        Ok(DateResolved {
            ctx: self.ctx,
            title: self.title,
            date,
        })
    }
}

fn check_age(date: NaiveDate, today: NaiveDate, max_age_days: Option<u32>) -> Result<NaiveDate> {
    match max_age_days {
        Some(max) if (today - date).num_days() > i64::from(max) => Err(Error::TooOld {
            published: date,
            max_age_days: max,
        }),
        _ => Ok(date),
    }
}

pub struct DateResolved<'a> {
    ctx: Extraction<'a>,
    title: String,
    date: NaiveDate,
}

impl<'a> DateResolved<'a> {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Body comes last: it is the most expensive stage and the only one that
    /// needs the container tree.
    pub fn resolve_body(self) -> Result<BodyResolved<'a>> {
        let p = self.ctx.pipeline;
        let page = self.ctx.page;
        let body = extract::extract_body(page.document(), page.raw(), &p.adapter)
            .map_err(|e| p.fail(e, Stage::Body, self.ctx.url))?;
        debug!(stage = %Stage::Body, bytes = body.len());
        Ok(BodyResolved {
            ctx: self.ctx,
            title: self.title,
            date: self.date,
            body,
        })
    }
}

pub struct BodyResolved<'a> {
    ctx: Extraction<'a>,
    title: String,
    date: NaiveDate,
    body: String,
}

impl<'a> BodyResolved<'a> {
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn format(self) -> Formatted {
        let site = &self.ctx.pipeline.site;
        let content = extract::format_document(&self.title, self.date, &self.body, self.ctx.url, site);
        Formatted {
            record: ArticleRecord::new(self.ctx.url, self.title, content, self.date, site),
        }
    }
}

pub struct Formatted {
    record: ArticleRecord,
}

impl Formatted {
    pub fn into_record(self) -> ArticleRecord {
        self.record
    }
}
