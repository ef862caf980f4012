//! Main-body isolation via Readability.
//!
//! Delegates content-boundary detection (article body vs. page chrome) to
//! `dom_smoothie` and normalizes its output into a small struct the rest
//! of the pipeline consumes.

use dom_smoothie::Readability;

use crate::dom::Document;
use crate::error::{Error, Result};

/// Simplified article content as isolated by Readability.
#[derive(Debug, Clone, Default)]
pub struct ReadableContent {
    /// Article title.
    pub title: String,
    /// Short excerpt, when the page provides one.
    pub excerpt: Option<String>,
    /// Author byline, when detected.
    pub byline: Option<String>,
    /// Simplified body HTML. Marker tokens inserted by image extraction
    /// survive in here as plain text.
    pub content_html: String,
}

/// Isolate the main article body of `doc`.
///
/// Fails with `Error::NoContent` when no content region can be identified
/// (empty or non-article page). This is fatal for the pipeline.
pub fn extract_readable(doc: &Document) -> Result<ReadableContent> {
    let mut reader = Readability::with_document(doc.clone(), None, None)
        .map_err(|e| Error::Extraction(format!("readability init failed: {e}")))?;

    let article = reader.parse().map_err(|_| Error::NoContent)?;

    let content_html = article.content.to_string();
    if content_html.trim().is_empty() {
        return Err(Error::NoContent);
    }

    Ok(ReadableContent {
        title: article.title,
        excerpt: article.excerpt.filter(|e| !e.trim().is_empty()),
        byline: article.byline.filter(|b| !b.trim().is_empty()),
        content_html,
    })
}
