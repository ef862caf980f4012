use article_scraper::pipeline::parse_article_url;
use article_scraper::{Error, ScrapedArticle, Scraper, PLATFORM};

fn scrape_fixture(html: &str) -> Result<ScrapedArticle, Error> {
    let scraper = Scraper::new()?;
    let url = parse_article_url("https://example.com/post/fixture")?;
    scraper.scrape_html(&url, html)
}

const FULL_ARTICLE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Understanding Async Rust</title>
    <meta property="og:title" content="Understanding Async Rust">
    <meta property="og:description" content="A walkthrough of futures and executors.">
    <meta property="og:image" content="https://example.com/cover.png">
    <meta property="article:tag" content="rust">
    <meta property="article:tag" content="async">
</head>
<body>
<article>
    <h1>Understanding Async Rust</h1>
    <p>Asynchronous programming in Rust is built around the Future trait,
       which represents a computation that may complete at some later point.
       Executors poll futures to drive them forward.</p>
    <p>The most common executor in production services is Tokio, which pairs
       a work-stealing scheduler with a reactor for IO readiness events.
       <img src="https://example.com/diagram.png" alt="executor diagram">
       The diagram above shows how tasks move between worker threads.</p>
    <pre><code class="language-rust">async fn main() {}</code></pre>
    <p>Pinning is the mechanism that makes self-referential futures sound.
       Once a future is pinned, it can no longer be moved in memory, so
       internal pointers stay valid across polls.</p>
    <p>In practice most application code never touches Pin directly because
       the async and await keywords generate the necessary plumbing.</p>
</article>
</body>
</html>"#;

#[test]
fn full_article_produces_complete_result() {
    let article = match scrape_fixture(FULL_ARTICLE) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(article.title, "Understanding Async Rust");
    assert!(article.content.contains("Future trait"));
    assert!(article.content.contains("![executor diagram](https://example.com/diagram.png)"));
    assert_eq!(article.header_image.as_deref(), Some("https://example.com/cover.png"));
    assert_eq!(article.tags, vec!["rust", "async"]);
    assert_eq!(article.canonical_url, "https://example.com/post/fixture");
    assert_eq!(article.platform, PLATFORM);
    assert_eq!(article.seo_title.as_deref(), Some("Understanding Async Rust"));
    assert_eq!(
        article.seo_description.as_deref(),
        Some("A walkthrough of futures and executors.")
    );
}

#[test]
fn code_blocks_keep_a_language_fence() {
    let article = match scrape_fixture(FULL_ARTICLE) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    // No classifier rule matches Rust, so the fence carries the fallback tag.
    assert!(article.content.contains("```plaintext\nasync fn main() {}\n```"));
}

#[test]
fn seo_title_falls_back_to_extracted_title_without_og_title() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Plain Title Page</title></head>
<body>
<article>
    <h1>Plain Title Page</h1>
    <p>This page carries no Open Graph metadata at all, so every SEO field
       must be derived from the extracted content instead of the head.</p>
    <p>The fallback chain fills the SEO title from the article title and
       the SEO description from the excerpt when the head gives nothing.</p>
    <p>A third paragraph keeps the extractor comfortably above its minimum
       content threshold for short synthetic documents like this one.</p>
</article>
</body>
</html>"#;

    let article = match scrape_fixture(html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert!(!article.title.is_empty());
    assert_eq!(article.seo_title.as_deref(), Some(article.title.as_str()));
    assert_eq!(
        article.seo_description.as_deref(),
        Some(article.excerpt.as_str())
    );
}

#[test]
fn images_keep_document_order_and_pre_anchor_images_are_dropped() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Ordering</title></head>
<body>
<header><img src="https://example.com/site-logo.png" alt="logo"></header>
<article>
    <h1>Ordering</h1>
    <p>The first substantial paragraph of the article anchors the content
       region, and only images that appear after it are kept as content.</p>
    <p>Here is the first figure of the piece, placed between two passages
       of body text so its position is unambiguous.
       <img src="https://example.com/first.png" alt="first"></p>
    <p>And a second figure further down, which must come after the first
       one in the converted Markdown no matter how extraction rewrites
       the tree. <img src="https://example.com/second.png" alt="second"></p>
</article>
</body>
</html>"#;

    let article = match scrape_fixture(html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert!(!article.content.contains("site-logo.png"));

    let first = article
        .content
        .find("https://example.com/first.png")
        .unwrap_or_else(|| panic!("first image missing from:\n{}", article.content));
    let second = article
        .content
        .find("https://example.com/second.png")
        .unwrap_or_else(|| panic!("second image missing from:\n{}", article.content));
    assert!(first < second);

    // No og:image in the head, so the header image falls back to the
    // first content image.
    assert_eq!(
        article.header_image.as_deref(),
        Some("https://example.com/first.png")
    );
}

#[test]
fn single_in_content_image_lands_between_its_paragraphs() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>One Image</title></head>
<body>
<article>
    <h1>One Image</h1>
    <p>FIRST_PARAGRAPH This opening passage runs well past the anchor
       threshold and is followed directly by the only figure on the page.</p>
    <p><img src="https://cdn.example.com/a.jpg" alt="figure one"></p>
    <p>SECOND_PARAGRAPH The closing passage comes after the figure and
       wraps up the piece with a little more ordinary prose.</p>
</article>
</body>
</html>"#;

    let article = match scrape_fixture(html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert_eq!(article.content.matches("![").count(), 1);
    let first = article.content.find("FIRST_PARAGRAPH").unwrap();
    let image = article.content.find("![figure one](https://cdn.example.com/a.jpg)").unwrap();
    let second = article.content.find("SECOND_PARAGRAPH").unwrap();
    assert!(first < image && image < second);
}

#[test]
fn avatar_only_page_has_no_images_and_no_header_image() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Avatars Only</title></head>
<body>
<article>
    <h1>Avatars Only</h1>
    <p>Every image on this page belongs to an author card, so the result
       must contain no image references whatsoever.</p>
    <p>More prose around the portrait so the page still reads as a real
       article to the extraction stage.
       <img class="avatar" src="https://example.com/people/a.png" alt="a"></p>
    <p>And a closing paragraph with a second portrait for good measure.
       <img class="avatar" src="https://example.com/people/b.png" alt="b"></p>
</article>
</body>
</html>"#;

    let article = match scrape_fixture(html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert!(!article.content.contains("!["));
    assert_eq!(article.header_image, None);
}

#[test]
fn noise_images_are_dropped_and_cdn_thumbnails_upgraded() {
    let html = r#"<!DOCTYPE html>
<html>
<head><title>Images</title></head>
<body>
<article>
    <h1>Images</h1>
    <p>Author bios and tracking pixels travel with most syndicated posts,
       and none of them belong in the normalized article body.</p>
    <p>Some body text around the author portrait keeps this paragraph
       anchored in the content region of the page.
       <img class="avatar-small" src="https://example.com/people/jane.png" alt="Jane"></p>
    <p>The real illustration is served through a resizing CDN at a small
       width, which the pipeline upgrades to the original resolution.
       <img src="https://i0.wp.com/example.com/chart.png?w=300&amp;h=200&amp;ssl=1" alt="chart"></p>
</article>
</body>
</html>"#;

    let article = match scrape_fixture(html) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    assert!(!article.content.contains("jane.png"));
    assert!(article.content.contains("chart.png"));
    assert!(article.content.contains("quality=100"));
    assert!(!article.content.contains("w=300"));
    assert!(!article.content.contains("h=200"));
    assert!(article.content.contains("ssl=1"));
}

#[test]
fn page_without_article_content_fails_with_no_content() {
    let html = "<!DOCTYPE html><html><head><title>Empty</title></head><body></body></html>";

    match scrape_fixture(html) {
        Err(Error::NoContent) => {}
        other => panic!("expected Err(NoContent), got {other:?}"),
    }
}

#[test]
fn excerpt_falls_back_to_title_when_readability_gives_none() {
    let article = match scrape_fixture(FULL_ARTICLE) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    // The fixture has real paragraphs, so the excerpt is either derived
    // from them or falls back to the title. Never empty.
    assert!(!article.excerpt.is_empty());
}

#[test]
fn result_serializes_with_camel_case_keys() {
    let article = match scrape_fixture(FULL_ARTICLE) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };

    let json = match serde_json::to_value(&article) {
        Ok(json) => json,
        Err(err) => panic!("serialization failed: {err}"),
    };
    assert!(json.get("canonicalUrl").is_some());
    assert!(json.get("seoTitle").is_some());
    assert!(json.get("headerImage").is_some());
    assert_eq!(json.get("platform").and_then(|v| v.as_str()), Some("web"));
}
