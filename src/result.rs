//! Result types for pipeline output.
//!
//! This module defines the structured record produced by a successful
//! scrape. The record is immutable once assembled; persistence is the
//! caller's concern.

use serde::{Deserialize, Serialize};

/// Source classification applied to every scraped article.
pub const PLATFORM: &str = "web";

/// A fully normalized article produced by the pipeline.
///
/// Either a complete record is produced or the pipeline fails with a typed
/// error; there is no partial-result mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedArticle {
    /// Article title, from Readability with metadata fallback.
    pub title: String,

    /// Article body as Markdown. Non-empty when parsing succeeded.
    pub content: String,

    /// Short summary. Falls back to the title if unavailable.
    pub excerpt: String,

    /// Canonical hero image URL, if one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,

    /// De-duplicated content tags. Order is not significant.
    pub tags: Vec<String>,

    /// The originally requested URL.
    pub canonical_url: String,

    /// Author name, from Readability's byline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// SEO title. Falls back to `title`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,

    /// SEO description. Falls back to `excerpt`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,

    /// Source classification. Always [`PLATFORM`].
    pub platform: String,
}
