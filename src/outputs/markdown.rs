//! Markdown rendering of the browse view.
//!
//! Rendering writes into any [`std::fmt::Write`], so the same page can go to
//! a `String` for stdout or a file. Labels are in French to match the site.
//!
//! # Page Layout
//!
//! ```text
//! # 📚 Explorateur d'articles du Blog du Modérateur
//! ## Statistiques                       (whole snapshot)
//! ### N articles correspondent à vos critères
//! ## Web (2 articles)                   (grouped view only)
//! ### [Title](link)
//! **Auteur:** ...
//! ---
//! ```

use crate::models::{ArticleImage, ArticleRecord};
use crate::query::{category_counts, group_by_category};
use std::fmt::{self, Write};

/// Shown when the store holds no records at all.
pub const EMPTY_STORE_MESSAGE: &str =
    "Aucun article trouvé dans la base de données. Veuillez d'abord exécuter le scraping.";

/// Shown when filters leave nothing to display.
pub const NO_MATCH_MESSAGE: &str = "Aucun article ne correspond aux critères de recherche.";

/// How matched records are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// One section per category instead of a flat list.
    pub grouped: bool,
    /// Append the full details block to every card.
    pub details: bool,
}

/// Write the page header and statistics for the whole snapshot.
pub fn write_header<W: Write>(out: &mut W, all: &[ArticleRecord]) -> fmt::Result {
    writeln!(out, "# 📚 Explorateur d'articles du Blog du Modérateur\n")?;
    writeln!(out, "Découvrez tous les articles scrapés par catégories.\n")?;

    writeln!(out, "## Statistiques\n")?;
    writeln!(out, "📊 Nombre total d'articles: {}\n", all.len())?;
    writeln!(out, "### Catégories disponibles\n")?;
    for (category, count) in category_counts(all) {
        writeln!(out, "- {category}: {count} articles")?;
    }
    writeln!(out)
}

/// Write the result count followed by the matched article cards.
pub fn write_results<W: Write>(
    out: &mut W,
    matched: &[&ArticleRecord],
    options: RenderOptions,
) -> fmt::Result {
    writeln!(out, "### {} articles correspondent à vos critères\n", matched.len())?;

    if matched.is_empty() {
        return writeln!(out, "> ⚠️ {NO_MATCH_MESSAGE}");
    }

    if options.grouped {
        for group in group_by_category(matched.iter().copied()) {
            writeln!(out, "## {} ({} articles)\n", group.label(), group.records.len())?;
            for record in group.records {
                write_card(out, record, options.details)?;
            }
        }
    } else {
        for record in matched {
            write_card(out, record, options.details)?;
        }
    }
    Ok(())
}

/// Write a full browse page: header, statistics and results.
pub fn write_page<W: Write>(
    out: &mut W,
    all: &[ArticleRecord],
    matched: &[&ArticleRecord],
    options: RenderOptions,
) -> fmt::Result {
    if all.is_empty() {
        return writeln!(out, "> ❌ {EMPTY_STORE_MESSAGE}");
    }
    write_header(out, all)?;
    write_results(out, matched, options)
}

fn write_card<W: Write>(out: &mut W, record: &ArticleRecord, details: bool) -> fmt::Result {
    if let Some(image) = record.display_image() {
        writeln!(out, "![]({image})\n")?;
    }

    writeln!(out, "### [{}]({})\n", record.display_title(), record.link)?;
    writeln!(out, "**Auteur:** {}  ", or_placeholder(&record.author, "Non spécifié"))?;
    writeln!(
        out,
        "**Date de publication:** {}  ",
        or_placeholder(&record.publish_date, "Non spécifiée")
    )?;
    if !record.summary.is_empty() {
        writeln!(out, "**Résumé:** {}  ", record.summary)?;
    }
    let tags: Vec<&str> = record.tag_names().filter(|n| !n.is_empty()).collect();
    if !tags.is_empty() {
        writeln!(out, "**Tags:** {}  ", tags.join(", "))?;
    }
    if let Some(error) = &record.detail_error {
        writeln!(out, "**Erreur:** {error}  ")?;
    }
    writeln!(out)?;

    if details {
        write_details(out, record)?;
    }
    writeln!(out, "---\n")
}

fn write_details<W: Write>(out: &mut W, record: &ArticleRecord) -> fmt::Result {
    writeln!(out, "#### 📄 Détails complets de l'article\n")?;
    writeln!(out, "- **Titre complet:** {}", or_placeholder(&record.page_title, "Non spécifié"))?;
    writeln!(out, "- **Titre dans la liste:** {}", or_placeholder(&record.list_title, "Non spécifié"))?;
    writeln!(out, "- **URL de l'article:** {}", or_placeholder(&record.link, "Non spécifiée"))?;
    writeln!(out)?;

    if !record.images.is_empty() {
        writeln!(out, "##### Images\n")?;
        for image in &record.images {
            write_image(out, image)?;
        }
    }
    Ok(())
}

fn write_image<W: Write>(out: &mut W, image: &ArticleImage) -> fmt::Result {
    if let Some(url) = &image.url {
        writeln!(out, "![{}]({url})\n", image.alt)?;
    }
    writeln!(
        out,
        "- **Légende:** {}",
        image.caption.as_deref().unwrap_or("Pas de légende")
    )?;
    writeln!(out, "- **Description:** {}", or_placeholder(&image.alt, "Pas de description"))?;
    if let Some(dimensions) = &image.dimensions {
        writeln!(out, "- **Dimensions:** {dimensions}")?;
    }
    if let Some(full) = &image.full_size_url {
        writeln!(out, "- [Voir en taille réelle]({full})")?;
    }
    writeln!(out)
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}
