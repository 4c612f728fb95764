//! Terminal rendering of search results.
//!
//! Publications can be rendered as a table for interactive use, as plain
//! text blocks, or as pretty-printed JSON for scripting.

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use unicode_width::UnicodeWidthChar;

use crate::models::Publication;

/// Maximum width of the title column in table output
pub const TITLE_WIDTH: usize = 60;

/// Maximum width of the authors column in table output
pub const AUTHORS_WIDTH: usize = 40;

/// Shorten a title or author list to `max_width` terminal columns.
///
/// Text is cut at the last word boundary that fits, falling back to a cut
/// between characters when the first word alone is too wide (e.g. CJK titles
/// without spaces). Column widths follow `unicode-width`.
///
/// # Examples
///
/// ```
/// use kitopen::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Detector readout", 14), "Detector...");
/// assert_eq!(truncate_with_ellipsis("Hi", 8), "Hi");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.chars().map(|c| c.width().unwrap_or(1)).sum::<usize>() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut used = 0;
    let mut fits = 0;
    let mut word_end = None;
    for (idx, c) in text.char_indices() {
        let width = c.width().unwrap_or(1);
        if used + width > budget {
            // A cut right before whitespace keeps the whole word
            if c.is_whitespace() {
                word_end = Some(idx);
            }
            break;
        }
        used += width;
        fits = idx + c.len_utf8();
        if c.is_whitespace() {
            word_end = Some(idx);
        }
    }

    let cut = word_end.unwrap_or(fits);
    let kept = text[..cut].trim_end();
    if kept.is_empty() {
        return "...".to_string();
    }
    format!("{}...", kept)
}

/// Render publications as a table
pub fn render_table(publications: &[Publication]) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Title", "Authors", "Type", "DOI", "ID"]);

    for publication in publications {
        table.add_row(vec![
            Cell::new(truncate_with_ellipsis(publication.title(), TITLE_WIDTH))
                .add_attribute(Attribute::Bold),
            Cell::new(truncate_with_ellipsis(
                &publication.indexed_authors(),
                AUTHORS_WIDTH,
            )),
            Cell::new(publication.publication_type()),
            Cell::new(publication.doi()),
            Cell::new(publication.id()),
        ]);
    }

    table.to_string()
}

/// Render publications as plain text blocks separated by blank lines
///
/// With `color` set, titles are highlighted with ANSI escapes.
pub fn render_plain(publications: &[Publication], color: bool) -> String {
    let mut out = String::new();

    for publication in publications {
        if color {
            out.push_str(&format!("{}\n", publication.title().bold()));
        } else {
            out.push_str(&format!("{}\n", publication.title()));
        }

        let authors = publication.indexed_authors();
        if !authors.is_empty() {
            out.push_str(&format!("  Authors: {}\n", authors));
        }
        if !publication.journal().is_empty() {
            match publication.volume() {
                "" => out.push_str(&format!("  Journal: {}\n", publication.journal())),
                volume => out.push_str(&format!(
                    "  Journal: {} ({})\n",
                    publication.journal(),
                    volume
                )),
            }
        }
        if !publication.doi().is_empty() {
            out.push_str(&format!("  DOI: {}\n", publication.doi()));
        }
        if !publication.id().is_empty() {
            out.push_str(&format!("  URL: {}\n", publication.uri()));
        }
        if publication.is_full_text_available() {
            out.push_str("  Full text available\n");
        }
        out.push('\n');
    }

    out
}

/// Render publications as pretty-printed JSON
pub fn render_json(publications: &[Publication]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(publications)
}
