//! Article page extraction.
//!
//! Every field is looked up independently and falls back to its own default
//! when its markup is missing, so a page with half its structure still yields
//! a usable [`ArticleDetail`].
//!
//! # Markup
//!
//! | Field | Location |
//! |-------|----------|
//! | title | `h1.entry-title` |
//! | summary | first `p` in `div.article-hat` |
//! | author | `div.meta-info span.byline a` |
//! | date | `div.meta-info span.posted-on time` (text and `datetime`) |
//! | images | every `figure` |
//! | category | `div.article-terms div.cats-list span.cat[data-cat]` |
//! | tags | `div.article-terms ul.tags-list a.post-tags` |

use super::image_source;
use super::traverse::Probe;
use crate::errors::ParseError;
use crate::models::{AUTHOR_NOT_SPECIFIED, ArticleDetail, ArticleImage, TITLE_NOT_FOUND, Tag};
use crate::utils::truncate_for_log;
use scraper::Html;
use tracing::{debug, instrument};

/// Extract the detail fields of one article page.
///
/// # Errors
///
/// Only a document with no content at all is rejected; missing fields are
/// replaced by [`TITLE_NOT_FOUND`], [`AUTHOR_NOT_SPECIFIED`] or empty values.
#[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
pub fn extract_article(html: &str) -> Result<ArticleDetail, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    let document = Html::parse_document(html);
    let root = Probe::document(&document);

    let title = root
        .find("h1.entry-title")
        .text()
        .unwrap_or_else(|| TITLE_NOT_FOUND.to_string());

    let summary = root.find("div.article-hat").find("p").text().unwrap_or_default();

    let meta = root.find("div.meta-info");
    let author = meta
        .find("span.byline")
        .find("a")
        .text()
        .unwrap_or_else(|| AUTHOR_NOT_SPECIFIED.to_string());

    let time = meta.find("span.posted-on").find("time");
    let publish_date = time.text().unwrap_or_default();
    let publish_datetime = time.attr("datetime").unwrap_or_default().to_string();

    let images: Vec<ArticleImage> = root
        .find_all("figure")
        .into_iter()
        .filter_map(extract_image)
        .collect();

    let terms = root.find("div.article-terms");
    let main_category = terms
        .find("div.cats-list")
        .find("span.cat")
        .attr("data-cat")
        .unwrap_or_default()
        .to_string();
    let tags: Vec<Tag> = terms
        .find("ul.tags-list")
        .find_all("a.post-tags")
        .into_iter()
        .map(extract_tag)
        .collect();

    debug!(
        %title,
        summary = %truncate_for_log(&summary, 50),
        %author,
        %publish_date,
        %main_category,
        images = images.len(),
        tags = tags.len(),
        "Extracted article fields"
    );

    Ok(ArticleDetail {
        title,
        summary,
        author,
        publish_date,
        publish_datetime,
        main_category,
        tags,
        images,
    })
}

/// One figure, or `None` when it has no image source, lightbox link or caption.
///
/// A lightbox link counts even without an `href`; the image is then kept
/// with no `full_size_url`.
fn extract_image(figure: Probe<'_>) -> Option<ArticleImage> {
    let mut image = ArticleImage::default();

    let img = figure.find("img");
    if let Some(url) = image_source(img) {
        image.url = Some(url);
        image.alt = img.attr("alt").unwrap_or_default().to_string();
        image.dimensions = match (img.non_empty_attr("width"), img.non_empty_attr("height")) {
            (Some(w), Some(h)) => Some(format!("{w}x{h}")),
            _ => None,
        };
    }

    let lightbox = figure.find("a.lightbox");
    image.full_size_url = lightbox.attr("href").map(str::to_string);
    image.caption = figure.find("figcaption").text();

    (!image.is_empty() || lightbox.is_present()).then_some(image)
}

fn extract_tag(link: Probe<'_>) -> Tag {
    Tag {
        name: link.text().unwrap_or_default(),
        url: link.attr("href").map(str::to_string),
        data_tag: link.attr("data-tag").map(str::to_string),
    }
}
