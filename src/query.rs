//! Filtering and grouping over a snapshot of stored records.
//!
//! Everything here is a pure function of the records passed in, so a
//! presentation layer can hold any snapshot it likes and re-run filters
//! without touching the store.
//!
//! # Filter semantics
//!
//! - Category and author are exact matches, disabled by `None` or by their
//!   "all" placeholders ([`ALL_CATEGORIES`], [`ALL_AUTHORS`]).
//! - Search is case-insensitive; the query is split on whitespace and a
//!   record matches if **any** term occurs in its titles, summary, author or
//!   tag names. Only a missing or empty query disables it.
//! - The three filters are combined with AND.

use crate::models::ArticleRecord;
use itertools::Itertools;
use std::collections::HashMap;

/// Category choice meaning "do not filter by category".
pub const ALL_CATEGORIES: &str = "Toutes les catégories";

/// Author choice meaning "do not filter by author".
pub const ALL_AUTHORS: &str = "Tous les auteurs";

/// Heading for records whose category is empty.
pub const UNCATEGORIZED: &str = "Non catégorisé";

/// The three optional browse filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub author: Option<String>,
    pub search: Option<String>,
}

impl FilterCriteria {
    /// Effective category filter, if any.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| *c != ALL_CATEGORIES)
    }

    /// Effective author filter, if any.
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref().filter(|a| *a != ALL_AUTHORS)
    }

    /// Lowercased search terms, or `None` when search is off.
    ///
    /// Search is off only for `None` or an empty string. A query made only of
    /// whitespace has no terms and therefore matches nothing.
    pub fn search_terms(&self) -> Option<Vec<String>> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| s.split_whitespace().map(str::to_lowercase).collect())
    }

    /// Whether results span every category (and are shown grouped).
    pub fn spans_all_categories(&self) -> bool {
        self.category().is_none()
    }
}

/// Records matching `criteria`, in input order.
pub fn filter<'a>(records: &'a [ArticleRecord], criteria: &FilterCriteria) -> Vec<&'a ArticleRecord> {
    let category = criteria.category();
    let author = criteria.author();
    let terms = criteria.search_terms();

    records
        .iter()
        .filter(|r| category.is_none_or(|c| r.main_category == c))
        .filter(|r| author.is_none_or(|a| r.author == a))
        .filter(|r| terms.as_deref().is_none_or(|t| matches_any_term(r, t)))
        .collect()
}

fn matches_any_term(record: &ArticleRecord, terms: &[String]) -> bool {
    let mut haystack = format!(
        "{} {} {} {}",
        record.page_title, record.list_title, record.summary, record.author
    )
    .to_lowercase();
    for name in record.tag_names() {
        haystack.push(' ');
        haystack.push_str(&name.to_lowercase());
    }

    terms.iter().any(|term| haystack.contains(term.as_str()))
}

/// Records sharing one `main_category`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub records: Vec<&'a ArticleRecord>,
}

impl CategoryGroup<'_> {
    /// Category name for display, [`UNCATEGORIZED`] when empty.
    pub fn label(&self) -> &str {
        if self.category.is_empty() {
            UNCATEGORIZED
        } else {
            self.category
        }
    }
}

/// Group records by category, keeping first-seen category order and the
/// input order within each group.
pub fn group_by_category<'a, I>(records: I) -> Vec<CategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a ArticleRecord>,
{
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for record in records {
        let category = record.main_category.as_str();
        let slot = *index.entry(category).or_insert_with(|| {
            groups.push(CategoryGroup {
                category,
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }

    groups
}

/// `(category, count)` pairs in first-seen order.
pub fn category_counts<'a, I>(records: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a ArticleRecord>,
{
    group_by_category(records)
        .into_iter()
        .map(|g| (g.label().to_string(), g.records.len()))
        .collect()
}

/// Category selector options: [`ALL_CATEGORIES`] then each category once.
pub fn category_choices(records: &[ArticleRecord]) -> Vec<String> {
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(
            records
                .iter()
                .map(|r| r.main_category.clone())
                .unique(),
        )
        .collect()
}

/// Author selector options: [`ALL_AUTHORS`] then distinct non-empty authors, sorted.
pub fn author_choices(records: &[ArticleRecord]) -> Vec<String> {
    std::iter::once(ALL_AUTHORS.to_string())
        .chain(
            records
                .iter()
                .map(|r| r.author.as_str())
                .filter(|a| !a.is_empty())
                .unique()
                .sorted()
                .map(str::to_string),
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ArticleDetail, ArticleStub, Category, Tag};
    use chrono::Utc;

    fn record(link: &str, category: &str, author: &str, summary: &str) -> ArticleRecord {
        let stub = ArticleStub {
            title: format!("List {link}"),
            link: link.to_string(),
            thumbnail: None,
        };
        let detail = ArticleDetail {
            title: format!("Page {link}"),
            summary: summary.to_string(),
            author: author.to_string(),
            publish_date: String::new(),
            publish_datetime: String::new(),
            main_category: String::new(),
            tags: Vec::new(),
            images: Vec::new(),
        };
        ArticleRecord::assemble(stub, detail, None, &Category::new(category, ""), Utc::now())
    }

    fn sample() -> Vec<ArticleRecord> {
        let mut tagged = record("c", "Web", "Bo", "Rien");
        tagged.tags.push(Tag {
            name: "Intelligence Artificielle".to_string(),
            ..Default::default()
        });
        vec![
            record("a", "Web", "Ana", "Le Marketing digital évolue"),
            record("b", "Tech", "Bo", "Nouveaux processeurs"),
            tagged,
            record("d", "Tools", "Ana", "Outils no-code"),
        ]
    }

    fn links(records: &[&ArticleRecord]) -> Vec<String> {
        records.iter().map(|r| r.link.clone()).collect()
    }

    #[test]
    fn test_all_placeholders_return_input_unchanged() {
        let records = sample();
        let criteria = FilterCriteria {
            category: Some(ALL_CATEGORIES.to_string()),
            author: Some(ALL_AUTHORS.to_string()),
            search: Some(String::new()),
        };
        let result = filter(&records, &criteria);
        assert_eq!(links(&result), ["a", "b", "c", "d"]);
        assert_eq!(filter(&records, &FilterCriteria::default()).len(), 4);
    }

    #[test]
    fn test_blank_search_matches_nothing() {
        let records = sample();
        let criteria = FilterCriteria {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(criteria.search_terms(), Some(Vec::new()));
        assert!(filter(&records, &criteria).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_on_summary() {
        let records = sample();
        let criteria = FilterCriteria {
            search: Some("marketing".to_string()),
            ..Default::default()
        };
        assert_eq!(links(&filter(&records, &criteria)), ["a"]);
    }

    #[test]
    fn test_search_terms_are_ored() {
        let records = sample();
        let criteria = FilterCriteria {
            search: Some("processeurs   no-code".to_string()),
            ..Default::default()
        };
        assert_eq!(links(&filter(&records, &criteria)), ["b", "d"]);
    }

    #[test]
    fn test_search_covers_tag_names_and_titles() {
        let records = sample();
        let by_tag = FilterCriteria {
            search: Some("ARTIFICIELLE".to_string()),
            ..Default::default()
        };
        assert_eq!(links(&filter(&records, &by_tag)), ["c"]);

        let by_title = FilterCriteria {
            search: Some("page d".to_string()),
            ..Default::default()
        };
        // "page" is in every page title
        assert_eq!(filter(&records, &by_title).len(), 4);
    }

    #[test]
    fn test_filters_are_anded() {
        let records = sample();
        let criteria = FilterCriteria {
            category: Some("Web".to_string()),
            author: Some("Ana".to_string()),
            search: None,
        };
        assert_eq!(links(&filter(&records, &criteria)), ["a"]);

        let none = FilterCriteria {
            category: Some("Tech".to_string()),
            author: Some("Ana".to_string()),
            search: None,
        };
        assert!(filter(&records, &none).is_empty());

        let with_search = FilterCriteria {
            category: Some("Web".to_string()),
            author: None,
            search: Some("processeurs".to_string()),
        };
        assert!(filter(&records, &with_search).is_empty());
    }

    #[test]
    fn test_group_by_category_keeps_first_seen_order() {
        let records = vec![
            record("1", "Web", "x", ""),
            record("2", "Tech", "x", ""),
            record("3", "Web", "x", ""),
        ];
        let groups = group_by_category(&records);

        let names: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(names, ["Web", "Tech"]);
        assert_eq!(links(&groups[0].records), ["1", "3"]);
        assert_eq!(links(&groups[1].records), ["2"]);
    }

    #[test]
    fn test_group_filtered_subset() {
        let records = sample();
        let criteria = FilterCriteria {
            author: Some("Ana".to_string()),
            ..Default::default()
        };
        let groups = group_by_category(filter(&records, &criteria));
        let names: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(names, ["Web", "Tools"]);
    }

    #[test]
    fn test_counts_and_choices() {
        let mut records = sample();
        records.push(record("e", "", "", ""));

        assert_eq!(
            category_counts(&records),
            vec![
                ("Web".to_string(), 2),
                ("Tech".to_string(), 1),
                ("Tools".to_string(), 1),
                (UNCATEGORIZED.to_string(), 1),
            ]
        );
        assert_eq!(
            category_choices(&records),
            [ALL_CATEGORIES, "Web", "Tech", "Tools", ""]
        );
        assert_eq!(author_choices(&records), [ALL_AUTHORS, "Ana", "Bo"]);
    }

    #[test]
    fn test_spans_all_categories() {
        assert!(FilterCriteria::default().spans_all_categories());
        let specific = FilterCriteria {
            category: Some("Web".to_string()),
            ..Default::default()
        };
        assert!(!specific.spans_all_categories());
    }
}
