//! Utility functions for link resolution, log formatting and console prompts.
//!
//! This module provides helper functions used throughout the crate:
//! - Resolving listing hrefs against their category page
//! - String truncation for log previews
//! - The yes/no confirmation asked before persisting a crawl

use std::io::{self, BufRead, Write};
use url::Url;

/// Resolve `href` against `base`, leaving it untouched if it cannot be joined.
///
/// Absolute hrefs are returned as-is.
///
/// # Examples
///
/// ```ignore
/// let base = Url::parse("https://blog.test/web/").unwrap();
/// assert_eq!(resolve_link(&base, "/web/post/"), "https://blog.test/web/post/");
/// ```
pub fn resolve_link(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary)
/// with an ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ask a yes/no question and read one answer line.
///
/// `o`, `oui`, `y` and `yes` (any case) accept; anything else, including
/// end of input, declines.
pub fn confirm<R: BufRead, W: Write>(question: &str, mut input: R, mut output: W) -> io::Result<bool> {
    write!(output, "{question} (o/n): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(matches!(answer.as_str(), "o" | "oui" | "y" | "yes"))
}
