//! # article-scraper
//!
//! Article ingestion pipeline: fetch a web page and normalize it into clean
//! Markdown with metadata.
//!
//! The pipeline strips navigation, ads, and boilerplate via readability
//! extraction, then re-inserts content images at their original positions,
//! upgrades CDN thumbnails to full resolution, converts the result to
//! Markdown with language-tagged code fences, and collects SEO metadata
//! from the page head.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use article_scraper::scrape;
//!
//! # async fn run() -> article_scraper::Result<()> {
//! let article = scrape("https://example.com/post/hello").await?;
//! println!("Title: {}", article.title);
//! println!("{}", article.content);
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Content Extraction**: Readability-based isolation of the main article
//! - **Image Preservation**: Positional markers keep content images where
//!   the author placed them, with CDN URLs upgraded to full size
//! - **Markdown Output**: Headings, lists, tables, blockquotes, and fenced
//!   code blocks with heuristic language classification
//! - **Metadata**: Open Graph / Twitter card titles, descriptions, header
//!   image, and tags

mod error;
mod result;

/// HTTP fetching with a browser-like client.
pub mod fetch;

/// Thin helpers over the `dom_query` node API.
pub mod dom;

/// Compiled regex tables shared across the pipeline.
pub mod patterns;

/// Content image extraction and marker insertion.
pub mod images;

/// Readability-based main content extraction.
pub mod readability;

/// Re-insertion of extracted images into readable HTML.
pub mod reconstruct;

/// HTML to Markdown conversion.
pub mod markdown;

/// Code block language classification.
pub mod lang;

/// Page head metadata extraction (Open Graph, Twitter cards, tags).
pub mod metadata;

/// Pipeline orchestration.
pub mod pipeline;

// Public API - re-exports
pub use error::{Error, Result};
pub use fetch::Fetcher;
pub use images::ExtractedImage;
pub use lang::{classify, CodeBlockContext, Language};
pub use markdown::MarkdownConverter;
pub use metadata::PageMeta;
pub use pipeline::Scraper;
pub use result::{ScrapedArticle, PLATFORM};

/// Scrapes one article URL with a default pipeline.
///
/// Convenience wrapper around [`Scraper::new`] and [`Scraper::scrape`].
/// Build a [`Scraper`] directly to reuse the HTTP client across calls or
/// to configure a request timeout.
#[allow(clippy::missing_errors_doc)]
pub async fn scrape(url: &str) -> Result<ScrapedArticle> {
    Scraper::new()?.scrape(url).await
}
