//! Pipeline orchestration.
//!
//! Sequences the stages for one URL: fetch → parse → metadata → image
//! extraction → readability → reconstruction → markdown → assembly. Any
//! stage failure aborts the invocation; there is no partial-result mode.

use url::Url;

use crate::dom;
use crate::error::{Error, Result};
use crate::fetch::Fetcher;
use crate::images;
use crate::markdown::MarkdownConverter;
use crate::metadata;
use crate::readability;
use crate::reconstruct;
use crate::result::{ScrapedArticle, PLATFORM};

/// Article scraping pipeline.
///
/// Reusable across invocations; each call owns its own document tree and
/// image list, so concurrent scrapes share no mutable state.
#[derive(Debug, Clone)]
pub struct Scraper {
    fetcher: Fetcher,
    converter: MarkdownConverter,
}

impl Scraper {
    /// Create a scraper with a default fetcher and converter.
    pub fn new() -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new()?,
            converter: MarkdownConverter::new(),
        })
    }

    /// Create a scraper around a preconfigured fetcher (e.g. one with a
    /// request timeout).
    #[must_use]
    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            converter: MarkdownConverter::new(),
        }
    }

    /// Scrape one article URL into a [`ScrapedArticle`].
    ///
    /// The URL is validated before any network access; invalid input fails
    /// fast with `Error::MalformedUrl`.
    pub async fn scrape(&self, url: &str) -> Result<ScrapedArticle> {
        let parsed = parse_article_url(url)?;
        let html = self.fetcher.fetch(&parsed).await?;
        self.scrape_html(&parsed, &html)
    }

    /// Run the network-free tail of the pipeline on already-fetched HTML.
    pub fn scrape_html(&self, url: &Url, html: &str) -> Result<ScrapedArticle> {
        let doc = dom::parse(html);

        // Metadata reads the head; take it before the body is mutated.
        let meta = metadata::extract_page_meta(&doc);

        let extracted = images::extract_images(&doc);
        let readable = readability::extract_readable(&doc)?;
        let merged = reconstruct::merge_images(&readable.content_html, &extracted);
        let content = self.converter.convert(&merged);
        if content.is_empty() {
            return Err(Error::NoContent);
        }

        let title = if readable.title.trim().is_empty() {
            meta.seo_title.clone().unwrap_or_default()
        } else {
            readable.title.clone()
        };
        let excerpt = readable.excerpt.unwrap_or_else(|| title.clone());
        let header_image = meta
            .header_image
            .or_else(|| extracted.first().map(|img| img.src.clone()));
        let seo_title = Some(meta.seo_title.unwrap_or_else(|| title.clone()));
        let seo_description = Some(meta.seo_description.unwrap_or_else(|| excerpt.clone()));

        Ok(ScrapedArticle {
            title,
            content,
            excerpt,
            header_image,
            tags: meta.tags,
            canonical_url: url.to_string(),
            author: readable.byline,
            seo_title,
            seo_description,
            platform: PLATFORM.to_string(),
        })
    }
}

/// Validate an article URL by construction.
///
/// Accepts absolute http(s) URLs with a host; everything else is
/// `Error::MalformedUrl`.
pub fn parse_article_url(url: &str) -> Result<Url> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed).map_err(|e| Error::MalformedUrl(format!("{trimmed}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(Error::MalformedUrl(format!(
            "{trimmed}: not an absolute http(s) URL"
        )));
    }
    Ok(parsed)
}
