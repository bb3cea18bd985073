//! Crawl orchestration.
//!
//! For each category, in order: fetch the listing, then fetch and extract
//! every article it links to, one request at a time, pausing between
//! articles and between categories.
//!
//! # Failure handling
//!
//! - A listing that cannot be fetched is logged and the category contributes
//!   no records; the run moves on to the next category.
//! - An article page that cannot be fetched or read still yields a record,
//!   with [`ArticleDetail::retrieval_error`] fields and
//!   [`DetailStatus::Failed`](crate::models::DetailStatus::Failed) so the
//!   failure stays visible downstream.

use crate::errors::{ExtractError, FetchError};
use crate::fetch::PageFetcher;
use crate::models::{ArticleDetail, ArticleRecord, Category};
use crate::scrapers::{extract_article, extract_listing};
use crate::utils::resolve_link;
use chrono::Utc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};
use url::Url;

/// Fixed pauses between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Pause after each article page.
    pub between_articles: Duration,
    /// Pause after each category.
    pub between_categories: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            between_articles: Duration::from_secs(1),
            between_categories: Duration::from_secs(2),
        }
    }
}

impl Pacing {
    /// No pauses at all.
    pub fn none() -> Self {
        Self {
            between_articles: Duration::ZERO,
            between_categories: Duration::ZERO,
        }
    }
}

/// Sequential crawler over a [`PageFetcher`].
#[derive(Debug)]
pub struct Crawler<F> {
    fetcher: F,
    pacing: Pacing,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, pacing: Pacing) -> Self {
        Self { fetcher, pacing }
    }

    /// Crawl every category and return all records, in category order and
    /// then listing order.
    #[instrument(level = "info", skip_all, fields(categories = categories.len()))]
    pub async fn run(&self, categories: &[Category]) -> Vec<ArticleRecord> {
        let mut records = Vec::new();

        for category in categories {
            info!(category = %category.name, url = %category.url, "Crawling category");
            match self.crawl_category(category).await {
                Ok(found) => {
                    info!(category = %category.name, count = found.len(), "Category complete");
                    records.extend(found);
                }
                Err(e) => {
                    error!(category = %category.name, error = %e, "Category listing failed; skipping");
                }
            }
            sleep(self.pacing.between_categories).await;
        }

        info!(count = records.len(), "Crawl complete");
        records
    }

    /// Crawl a single category.
    ///
    /// # Errors
    ///
    /// Returns the [`FetchError`] of the listing page. Article failures are
    /// absorbed into their records.
    #[instrument(level = "info", skip_all, fields(category = %category.name))]
    pub async fn crawl_category(&self, category: &Category) -> Result<Vec<ArticleRecord>, FetchError> {
        let html = self.fetcher.fetch(&category.url).await?;
        let stubs = extract_listing(&html);
        info!(count = stubs.len(), "Found articles in listing");

        let base = Url::parse(&category.url).ok();
        let mut records = Vec::with_capacity(stubs.len());

        for mut stub in stubs {
            if let Some(base) = &base {
                stub.link = resolve_link(base, &stub.link);
                stub.thumbnail = stub.thumbnail.map(|t| resolve_link(base, &t));
            }
            info!(title = %stub.title, link = %stub.link, "Fetching article");

            let (detail, detail_error) = match self.fetch_detail(&stub.link).await {
                Ok(detail) => (detail, None),
                Err(e) => {
                    warn!(link = %stub.link, error = %e, "Article details unavailable; storing defaults");
                    (ArticleDetail::retrieval_error(), Some(e.to_string()))
                }
            };

            records.push(ArticleRecord::assemble(
                stub,
                detail,
                detail_error,
                category,
                Utc::now(),
            ));
            sleep(self.pacing.between_articles).await;
        }

        Ok(records)
    }

    /// Fetch one article page and extract its fields.
    pub async fn fetch_detail(&self, url: &str) -> Result<ArticleDetail, ExtractError> {
        let html = self.fetcher.fetch(url).await?;
        Ok(extract_article(&html)?)
    }
}
