//! Page metadata extraction.
//!
//! Pulls header image, tags, and SEO fields from the document's meta tags
//! (Open Graph first), with tag-link elements as a secondary source. The
//! orchestrator applies the fallback chains to extracted content.

use dom_query::{Document, Selection};

use crate::dom;

/// Metadata lifted from the page head (and tag links).
///
/// All fields optional; absence triggers the orchestrator's fallbacks
/// (og:image → first extracted image, seo fields → title/excerpt).
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    /// `og:image` content.
    pub header_image: Option<String>,
    /// `og:title` (or `twitter:title`) content.
    pub seo_title: Option<String>,
    /// `og:description` (or `twitter:description`/`description`) content.
    pub seo_description: Option<String>,
    /// Union of `article:tag` metas, `keywords`, and tag-link elements.
    pub tags: Vec<String>,
}

/// Examine meta tags and tag links for page metadata.
///
/// First value wins per field; `article:tag` metas accumulate. Call this
/// before any stage that mutates the body (it only reads, but the og tags
/// should reflect the page as served).
#[must_use]
pub fn extract_page_meta(doc: &Document) -> PageMeta {
    let mut meta = PageMeta::default();
    let mut description_fallback = None;

    for node in doc.select("meta").nodes() {
        let tag = Selection::from(*node);

        let name = dom::get_attribute(&tag, "property")
            .or_else(|| dom::get_attribute(&tag, "name"))
            .unwrap_or_default()
            .to_lowercase();
        let content = dom::get_attribute(&tag, "content").unwrap_or_default();
        let content = content.trim();

        if name.is_empty() || content.is_empty() {
            continue;
        }

        match name.as_str() {
            "og:image" | "og:image:url" => {
                if meta.header_image.is_none() {
                    meta.header_image = Some(content.to_string());
                }
            }
            "og:title" | "twitter:title" => {
                if meta.seo_title.is_none() {
                    meta.seo_title = Some(content.to_string());
                }
            }
            "og:description" | "twitter:description" => {
                if meta.seo_description.is_none() {
                    meta.seo_description = Some(content.to_string());
                }
            }
            "description" => {
                if description_fallback.is_none() {
                    description_fallback = Some(content.to_string());
                }
            }
            "article:tag" => push_tags(&mut meta.tags, content),
            "keywords" => push_tags(&mut meta.tags, content),
            _ => {}
        }
    }

    // Platform-specific tag links rendered in the page body.
    for link in doc
        .select("a[rel='tag'], a[href*='/tag/'], a[href*='/tags/']")
        .iter()
    {
        let text = link.text();
        push_tags(&mut meta.tags, text.trim());
    }

    meta.seo_description = meta.seo_description.or(description_fallback);
    meta
}

/// Append comma/semicolon-separated tags, de-duplicating case-insensitively.
fn push_tags(tags: &mut Vec<String>, content: &str) {
    for tag in content.split([',', ';']) {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        let lower = tag.to_lowercase();
        if !tags.iter().any(|t| t.to_lowercase() == lower) {
            tags.push(tag.to_string());
        }
    }
}
