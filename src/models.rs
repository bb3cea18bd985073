//! Data models for scraped articles and their stored representation.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`Category`]: A named category index page to crawl
//! - [`ArticleStub`]: Lightweight listing entry discovered on a category page
//! - [`ArticleDetail`]: Fields extracted from a single article page
//! - [`ArticleRecord`]: The merged, normalized unit of storage
//! - Nested types: [`Tag`], [`ArticleImage`], [`DetailStatus`]
//!
//! Placeholder strings are French because the crawled site is; they are
//! stored verbatim and matched verbatim by the query layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title stored when the article page has no entry-title heading.
pub const TITLE_NOT_FOUND: &str = "Titre non trouvé";

/// Author stored when the byline chain is incomplete.
pub const AUTHOR_NOT_SPECIFIED: &str = "Auteur non spécifié";

/// Title stored when the article page could not be retrieved at all.
pub const RETRIEVAL_ERROR_TITLE: &str = "Erreur de récupération";

/// Title shown when a record has neither a page title nor a list title.
pub const UNTITLED: &str = "Sans titre";

/// A category index page, e.g. `Web` at `https://www.blogdumoderateur.com/web/`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    /// Display name, copied into every record crawled from this page.
    pub name: String,
    /// URL of the category listing page.
    pub url: String,
}

impl Category {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// An article reference found on a category listing before its page is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleStub {
    /// Title as shown in the listing.
    pub title: String,
    /// Link to the article page.
    pub link: String,
    /// Listing thumbnail, lazy-load source preferred.
    pub thumbnail: Option<String>,
}

/// A tag link attached to an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tag {
    /// Visible link text.
    #[serde(default)]
    pub name: String,
    /// Link to the tag page.
    #[serde(default)]
    pub url: Option<String>,
    /// Site-side tag identifier (`data-tag`).
    #[serde(default)]
    pub data_tag: Option<String>,
}

/// One figure found in an article body.
///
/// `alt` and `dimensions` are only ever filled alongside `url`, since they
/// come from the same `<img>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: String,
    /// `"{width}x{height}"`, present only if both attributes exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_size_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl ArticleImage {
    /// True when no sub-field of the figure resolved.
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.full_size_url.is_none() && self.caption.is_none()
    }
}

/// Fields extracted from one article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDetail {
    pub title: String,
    pub summary: String,
    pub author: String,
    pub publish_date: String,
    pub publish_datetime: String,
    /// Category from the page's terms block. Records take their category
    /// from the listing instead; this is kept for diagnostics.
    pub main_category: String,
    pub tags: Vec<Tag>,
    pub images: Vec<ArticleImage>,
}

impl ArticleDetail {
    /// The detail substituted for an article whose page could not be used.
    pub fn retrieval_error() -> Self {
        Self {
            title: RETRIEVAL_ERROR_TITLE.to_string(),
            summary: String::new(),
            author: String::new(),
            publish_date: String::new(),
            publish_datetime: String::new(),
            main_category: String::new(),
            tags: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// Whether the detail fields of a record came from the article page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStatus {
    #[default]
    Ok,
    Failed,
}

/// The unit of storage: a listing stub merged with its page details.
///
/// `link` is the primary key of the record store.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleRecord {
    pub list_title: String,
    pub link: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub page_title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub publish_datetime: String,
    #[serde(default)]
    pub main_category: String,
    #[serde(default)]
    pub category_url: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub images: Vec<ArticleImage>,
    pub date_scraped: DateTime<Utc>,
    #[serde(default)]
    pub detail_status: DetailStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_error: Option<String>,
}

impl ArticleRecord {
    /// Merge a listing stub, its page details and the listing's category.
    ///
    /// `detail_error` is the reason the page could not be used, in which case
    /// `detail` is expected to be [`ArticleDetail::retrieval_error`].
    pub fn assemble(
        stub: ArticleStub,
        detail: ArticleDetail,
        detail_error: Option<String>,
        category: &Category,
        date_scraped: DateTime<Utc>,
    ) -> Self {
        let detail_status = if detail_error.is_some() {
            DetailStatus::Failed
        } else {
            DetailStatus::Ok
        };

        Self {
            list_title: stub.title,
            link: stub.link,
            thumbnail: stub.thumbnail,
            page_title: detail.title,
            summary: detail.summary,
            author: detail.author,
            publish_date: detail.publish_date,
            publish_datetime: detail.publish_datetime,
            main_category: category.name.clone(),
            category_url: category.url.clone(),
            tags: detail.tags,
            images: detail.images,
            date_scraped,
            detail_status,
            detail_error,
        }
    }

    /// Page title, else list title, else [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        if !self.page_title.is_empty() {
            &self.page_title
        } else if !self.list_title.is_empty() {
            &self.list_title
        } else {
            UNTITLED
        }
    }

    /// Thumbnail, else the first article image that has a URL.
    pub fn display_image(&self) -> Option<&str> {
        self.thumbnail
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.images.first().and_then(|img| img.url.as_deref()))
    }

    /// Names of all tags, in page order.
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|t| t.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub() -> ArticleStub {
        ArticleStub {
            title: "List title".to_string(),
            link: "https://example.com/a".to_string(),
            thumbnail: Some("https://example.com/a.jpg".to_string()),
        }
    }

    fn detail() -> ArticleDetail {
        ArticleDetail {
            title: "Page title".to_string(),
            summary: "Summary".to_string(),
            author: "Jane".to_string(),
            publish_date: "6 mai 2025".to_string(),
            publish_datetime: "2025-05-06T10:00:00+02:00".to_string(),
            main_category: "from-page".to_string(),
            tags: vec![Tag {
                name: "IA".to_string(),
                url: Some("https://example.com/tag/ia".to_string()),
                data_tag: Some("42".to_string()),
            }],
            images: vec![],
        }
    }

    #[test]
    fn test_assemble_takes_category_from_listing() {
        let category = Category::new("Web", "https://example.com/web/");
        let record = ArticleRecord::assemble(stub(), detail(), None, &category, Utc::now());

        assert_eq!(record.main_category, "Web");
        assert_eq!(record.category_url, "https://example.com/web/");
        assert_eq!(record.list_title, "List title");
        assert_eq!(record.page_title, "Page title");
        assert_eq!(record.detail_status, DetailStatus::Ok);
        assert!(record.detail_error.is_none());
    }

    #[test]
    fn test_assemble_marks_failed_detail() {
        let category = Category::new("Tech", "https://example.com/tech/");
        let record = ArticleRecord::assemble(
            stub(),
            ArticleDetail::retrieval_error(),
            Some("http error 503".to_string()),
            &category,
            Utc::now(),
        );

        assert_eq!(record.page_title, RETRIEVAL_ERROR_TITLE);
        assert_eq!(record.author, "");
        assert_eq!(record.detail_status, DetailStatus::Failed);
        assert_eq!(record.detail_error.as_deref(), Some("http error 503"));
    }

    #[test]
    fn test_record_serialization() {
        let category = Category::new("Web", "https://example.com/web/");
        let record = ArticleRecord::assemble(stub(), detail(), None, &category, Utc::now());

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"link\":\"https://example.com/a\""));
        assert!(json.contains("\"detail_status\":\"ok\""));
        assert!(!json.contains("detail_error"));
    }

    #[test]
    fn test_record_deserialization_defaults() {
        let json = r#"{
            "list_title": "Old",
            "link": "https://example.com/old",
            "page_title": "Old page",
            "date_scraped": "2025-05-06T08:00:00Z"
        }"#;

        let record: ArticleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.detail_status, DetailStatus::Ok);
        assert!(record.tags.is_empty());
        assert!(record.thumbnail.is_none());
    }

    #[test]
    fn test_display_fallbacks() {
        let category = Category::new("Web", "https://example.com/web/");
        let mut record = ArticleRecord::assemble(stub(), detail(), None, &category, Utc::now());
        assert_eq!(record.display_title(), "Page title");
        assert_eq!(record.display_image(), Some("https://example.com/a.jpg"));

        record.page_title.clear();
        record.thumbnail = None;
        record.images.push(ArticleImage {
            url: Some("https://example.com/fig.png".to_string()),
            ..Default::default()
        });
        assert_eq!(record.display_title(), "List title");
        assert_eq!(record.display_image(), Some("https://example.com/fig.png"));

        record.list_title.clear();
        assert_eq!(record.display_title(), UNTITLED);
    }

    #[test]
    fn test_image_is_empty() {
        assert!(ArticleImage::default().is_empty());
        let captioned = ArticleImage {
            caption: Some(String::new()),
            ..Default::default()
        };
        assert!(!captioned.is_empty());
    }
}
