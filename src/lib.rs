//! # Blog Scraper
//!
//! Crawls the category listings of the Blog du Modérateur, extracts the
//! details of every linked article, stores the merged records keyed by link,
//! and renders filtered views of the stored records as Markdown.
//!
//! ## Architecture
//!
//! 1. **Listing**: [`scrapers::extract_listing`] turns a category page into stubs
//! 2. **Details**: [`scrapers::extract_article`] reads one article page
//! 3. **Crawl**: [`crawl::Crawler`] walks categories sequentially with pauses
//! 4. **Store**: [`store::RecordStore`] upserts records by link
//! 5. **Browse**: [`browse::SnapshotCache`], [`query`] and [`outputs`] filter
//!    and render what is stored

pub mod browse;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod errors;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod query;
pub mod scrapers;
pub mod store;
pub mod utils;
