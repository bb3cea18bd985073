//! Category listing extraction.
//!
//! A listing page holds one `article.post` block per article. A block only
//! becomes an [`ArticleStub`] when it has `header.entry-header`, a link inside
//! it with an `href`, and an `h3.entry-title` inside that link.

use super::image_source;
use super::traverse::Probe;
use crate::models::ArticleStub;
use scraper::Html;
use tracing::{debug, instrument};

/// Extract article stubs from a category page, in document order.
#[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
pub fn extract_listing(html: &str) -> Vec<ArticleStub> {
    let document = Html::parse_document(html);
    let posts = Probe::document(&document).find_all("article.post");
    let total = posts.len();

    let stubs: Vec<ArticleStub> = posts.into_iter().filter_map(extract_stub).collect();

    debug!(posts = total, stubs = stubs.len(), "Extracted listing");
    stubs
}

fn extract_stub(post: Probe<'_>) -> Option<ArticleStub> {
    let link = post.find("header.entry-header").find("a");
    let Some(href) = link.attr("href") else {
        debug!("Skipping post without header link");
        return None;
    };
    let Some(title) = link.find("h3.entry-title").text() else {
        debug!(%href, "Skipping post without title heading");
        return None;
    };

    let thumbnail = image_source(post.find("div.post-thumbnail").find("img"));

    Some(ArticleStub {
        title,
        link: href.to_string(),
        thumbnail,
    })
}
