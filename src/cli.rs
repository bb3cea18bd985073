//! Command-line interface definitions for the blog scraper.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The store path can also be provided via the `BLOG_SCRAPER_STORE`
//! environment variable.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the blog scraper.
///
/// # Examples
///
/// ```sh
/// # Crawl the built-in categories and persist after confirmation
/// blog_scraper crawl
///
/// # Crawl from a config file and persist without asking
/// blog_scraper crawl --config scraper.yaml --yes
///
/// # Browse stored Tech articles mentioning "ia"
/// blog_scraper browse --category Tech --search ia --details
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl every configured category and store the articles
    Crawl(CrawlArgs),
    /// Filter stored articles and render them as Markdown
    Browse(BrowseArgs),
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// Optional path to a YAML crawl configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON document store
    #[arg(short, long, env = "BLOG_SCRAPER_STORE", default_value = "articles.json")]
    pub store: PathBuf,

    /// Store the results without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Crawl and print the summary, never store
    #[arg(long, conflicts_with = "yes")]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// JSON document store
    #[arg(short, long, env = "BLOG_SCRAPER_STORE", default_value = "articles.json")]
    pub store: PathBuf,

    /// Only this category ("Toutes les catégories" shows all)
    #[arg(long)]
    pub category: Option<String>,

    /// Only this author ("Tous les auteurs" shows all)
    #[arg(long)]
    pub author: Option<String>,

    /// Whitespace-separated terms, any of which must match
    #[arg(long)]
    pub search: Option<String>,

    /// List results without category sections
    #[arg(long)]
    pub flat: bool,

    /// Include the full details block for every article
    #[arg(long)]
    pub details: bool,

    /// Re-render every N seconds until interrupted
    #[arg(long, value_name = "SECS")]
    pub watch: Option<u64>,

    /// Write the Markdown to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
