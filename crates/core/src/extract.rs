//! Article text extraction.
//!
//! The readable text of a page is its first `<h1>` followed by every `<p>`.
//! Each element contributes its trimmed text fragments glued together, the
//! paragraphs are joined by single spaces, and the heading is separated from
//! the body by one space.

use crate::Result;
use crate::parse::Document;

/// Extracts heading and paragraph text from an HTML page.
pub fn article_text(html: &str) -> Result<String> {
    let doc = Document::parse(html);

    let title = doc.select_first("h1")?.map(|h| h.stripped_text()).unwrap_or_default();
    let content = doc
        .select("p")?
        .iter()
        .map(|p| p.stripped_text())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(format!("{} {}", title, content))
}
