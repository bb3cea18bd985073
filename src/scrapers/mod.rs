//! HTML extraction for the crawled blog.
//!
//! The site exposes two kinds of pages, each handled by its own submodule:
//!
//! 1. **Listing**: a category index page with one block per article
//!    ([`listing::extract_listing`])
//! 2. **Article**: the article page itself ([`article::extract_article`])
//!
//! Both are pure functions over page text; fetching and pacing live in
//! [`crate::crawl`]. Lookups go through [`traverse::Probe`] so a missing
//! element anywhere in a chain simply yields the field's default.

pub mod article;
pub mod listing;
pub mod traverse;

pub use article::extract_article;
pub use listing::extract_listing;

use traverse::Probe;

/// Image URL from an `<img>`, preferring the lazy-load source.
///
/// Empty attribute values are ignored, so a blank `data-lazy-src` falls back
/// to `src`.
pub(crate) fn image_source(img: Probe<'_>) -> Option<String> {
    img.non_empty_attr("data-lazy-src")
        .or_else(|| img.non_empty_attr("src"))
        .map(str::to_string)
}
