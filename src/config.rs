//! Crawl configuration loaded from YAML.
//!
//! Every key is optional; anything left out takes the built-in default.
//!
//! ```yaml
//! user_agent: "Mozilla/5.0 (X11; Linux x86_64)"
//! article_delay_ms: 500
//! category_delay_ms: 1500
//! categories:
//!   - name: Web
//!     url: https://www.blogdumoderateur.com/web/
//! ```

use crate::crawl::Pacing;
use crate::errors::ConfigError;
use crate::fetch::DEFAULT_USER_AGENT;
use crate::models::Category;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

const SITE_ROOT: &str = "https://www.blogdumoderateur.com";

/// Built-in category names and their URL slugs.
const DEFAULT_CATEGORIES: [(&str, &str); 5] = [
    ("Web", "web"),
    ("Marketing", "marketing"),
    ("Social", "social"),
    ("Tech", "tech"),
    ("Tools", "tools"),
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub categories: Vec<Category>,
    pub user_agent: String,
    pub article_delay_ms: u64,
    pub category_delay_ms: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES
                .iter()
                .map(|(name, slug)| Category::new(*name, format!("{SITE_ROOT}/{slug}/")))
                .collect(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            article_delay_ms: 1000,
            category_delay_ms: 2000,
        }
    }
}

impl ScraperConfig {
    /// Load from `path`, or the defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid YAML for this shape, or
    /// explicitly lists an empty set of categories.
    #[instrument(level = "info", skip_all)]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given; using built-in categories");
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        info!(path = %path.display(), categories = config.categories.len(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        if config.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        Ok(config)
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            between_articles: Duration::from_millis(self.article_delay_ms),
            between_categories: Duration::from_millis(self.category_delay_ms),
        }
    }
}
