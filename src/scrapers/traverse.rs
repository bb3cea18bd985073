//! Absent-aware HTML traversal.
//!
//! [`Probe`] wraps an optional element so lookups can be chained without
//! checking every step: once a step misses, every later step misses too and
//! the final accessor yields `None`.
//!
//! ```ignore
//! let author = root.find("div.meta-info").find("span.byline").find("a").text();
//! ```

use crate::errors::ParseError;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

/// Compile a CSS selector, mapping failures into [`ParseError::Selector`].
pub fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector(format!("{css}: {e}")))
}

/// A possibly-missing element.
#[derive(Debug, Clone, Copy)]
pub struct Probe<'a>(Option<ElementRef<'a>>);

impl<'a> Probe<'a> {
    /// Probe rooted at the document's top element.
    pub fn document(document: &'a Html) -> Self {
        Self(Some(document.root_element()))
    }

    /// A probe that never matches anything.
    pub fn absent() -> Self {
        Self(None)
    }

    /// First descendant matching `css`.
    pub fn find(self, css: &str) -> Self {
        let Some(element) = self.0 else {
            return Self::absent();
        };
        match selector(css) {
            Ok(sel) => Self(element.select(&sel).next()),
            Err(e) => {
                warn!(error = %e, "Skipping lookup");
                Self::absent()
            }
        }
    }

    /// Every descendant matching `css`, in document order.
    pub fn find_all(self, css: &str) -> Vec<Probe<'a>> {
        let Some(element) = self.0 else {
            return Vec::new();
        };
        match selector(css) {
            Ok(sel) => element.select(&sel).map(Probe::from).collect(),
            Err(e) => {
                warn!(error = %e, "Skipping lookup");
                Vec::new()
            }
        }
    }

    pub fn attr(self, name: &str) -> Option<&'a str> {
        self.0.and_then(|el| el.value().attr(name))
    }

    /// Attribute value, treating an empty value as absent.
    pub fn non_empty_attr(self, name: &str) -> Option<&'a str> {
        self.attr(name).filter(|v| !v.is_empty())
    }

    /// Concatenated descendant text with surrounding whitespace trimmed.
    pub fn text(self) -> Option<String> {
        self.0
            .map(|el| el.text().collect::<String>().trim().to_string())
    }

    pub fn is_present(self) -> bool {
        self.0.is_some()
    }
}

impl<'a> From<ElementRef<'a>> for Probe<'a> {
    fn from(element: ElementRef<'a>) -> Self {
        Self(Some(element))
    }
}
