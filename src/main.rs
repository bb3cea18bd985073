//! # Blog Scraper
//!
//! Command-line entry point.
//!
//! ## Usage
//!
//! ```sh
//! blog_scraper crawl --yes
//! blog_scraper browse --author "Jane Doe" --details
//! ```
//!
//! ## Subcommands
//!
//! - **crawl**: Crawl every configured category, print a summary, then store
//!   the records after confirmation
//! - **browse**: Filter the stored records and render them as Markdown,
//!   optionally re-rendering on a fixed cadence

use blog_scraper::browse::{DEFAULT_TTL, SnapshotCache};
use blog_scraper::cli::{BrowseArgs, Cli, Command, CrawlArgs};
use blog_scraper::config::ScraperConfig;
use blog_scraper::crawl::Crawler;
use blog_scraper::fetch::HttpFetcher;
use blog_scraper::outputs::markdown::{RenderOptions, write_page};
use blog_scraper::outputs::summary::write_crawl_summary;
use blog_scraper::query::{FilterCriteria, filter};
use blog_scraper::store::{JsonFileCollection, RecordStore};
use blog_scraper::utils::confirm;
use clap::Parser;
use std::error::Error;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

const PERSIST_QUESTION: &str = "Voulez-vous enregistrer ces articles dans la base de données ?";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Crawl(args) => crawl(args).await,
        Command::Browse(args) => browse(args).await,
    }
}

#[instrument(level = "info", skip_all, fields(store = %args.store.display()))]
async fn crawl(args: CrawlArgs) -> Result<(), Box<dyn Error>> {
    let config = ScraperConfig::load(args.config.as_deref())?;
    let crawler = Crawler::new(HttpFetcher::new(&config.user_agent)?, config.pacing());

    let start_time = Instant::now();
    let records = crawler.run(&config.categories).await;
    let elapsed = start_time.elapsed();
    info!(?elapsed, count = records.len(), "Crawl finished");

    write_crawl_summary(&mut io::stdout().lock(), elapsed, &records)?;

    if args.dry_run {
        info!("Dry run; nothing stored");
        return Ok(());
    }
    if records.is_empty() {
        warn!("No articles crawled; nothing to store");
        return Ok(());
    }
    if !args.yes && !confirm(PERSIST_QUESTION, io::stdin().lock(), io::stdout())? {
        println!("Articles non enregistrés.");
        return Ok(());
    }

    let store = RecordStore::new(JsonFileCollection::open(&args.store).await?);
    let processed = store.upsert_all(&records).await?;
    println!(
        "{processed} articles enregistrés dans {}",
        store.collection().path().display()
    );
    Ok(())
}

#[instrument(level = "info", skip_all, fields(store = %args.store.display()))]
async fn browse(args: BrowseArgs) -> Result<(), Box<dyn Error>> {
    let criteria = FilterCriteria {
        category: args.category.clone(),
        author: args.author.clone(),
        search: args.search.clone(),
    };
    let options = RenderOptions {
        grouped: !args.flat && criteria.spans_all_categories(),
        details: args.details,
    };

    let ttl = args.watch.map(Duration::from_secs).unwrap_or(DEFAULT_TTL);
    let store = RecordStore::new(JsonFileCollection::open(&args.store).await?);
    let mut cache = SnapshotCache::new(store, ttl);

    render(&mut cache, &criteria, options, &args).await?;

    let Some(secs) = args.watch else {
        return Ok(());
    };
    let mut ticker = tokio::time::interval(Duration::from_secs(secs.max(1)));
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => render(&mut cache, &criteria, options, &args).await?,
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted; stopping watch");
                return Ok(());
            }
        }
    }
}

async fn render(
    cache: &mut SnapshotCache<JsonFileCollection>,
    criteria: &FilterCriteria,
    options: RenderOptions,
    args: &BrowseArgs,
) -> Result<(), Box<dyn Error>> {
    let records = cache.snapshot().await?;
    let matched = filter(&records, criteria);
    info!(total = records.len(), matched = matched.len(), "Rendering browse view");

    let mut page = String::new();
    write_page(&mut page, &records, &matched, options)?;

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, page).await?;
            info!(path = %path.display(), "Wrote Markdown");
        }
        None => println!("{page}"),
    }
    Ok(())
}
