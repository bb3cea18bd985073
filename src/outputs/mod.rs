//! User-facing output for both subcommands.
//!
//! # Submodules
//!
//! - [`markdown`]: Renders statistics, result counts and article cards as
//!   Markdown, either to stdout or to a file chosen with `--output`
//! - [`summary`]: The plain-text crawl summary shown before storing

pub mod markdown;
pub mod summary;
