//! End-of-crawl summary printed before the persistence prompt.

use crate::models::{ArticleRecord, DetailStatus};
use crate::query::category_counts;
use std::io::{self, Write};
use std::time::Duration;

/// Elapsed time, total count, failed-detail count and per-category counts.
pub fn write_crawl_summary<W: Write>(
    out: &mut W,
    elapsed: Duration,
    records: &[ArticleRecord],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Scraping terminé en {:.2} secondes", elapsed.as_secs_f64())?;
    writeln!(out, "Total d'articles récupérés: {}", records.len())?;

    let failed = records
        .iter()
        .filter(|r| r.detail_status == DetailStatus::Failed)
        .count();
    if failed > 0 {
        writeln!(out, "Articles sans détails: {failed}")?;
    }

    writeln!(out, "Articles par catégorie:")?;
    for (category, count) in category_counts(records) {
        writeln!(out, "- {category}: {count} articles")?;
    }
    Ok(())
}
