use article_scraper::dom;
use article_scraper::metadata::extract_page_meta;

#[test]
fn twitter_card_fields_back_up_open_graph() {
    let html = r#"<html><head>
        <meta name="twitter:title" content="Card Title">
        <meta name="twitter:description" content="Card Description">
    </head><body></body></html>"#;

    let meta = extract_page_meta(&dom::parse(html));
    assert_eq!(meta.seo_title.as_deref(), Some("Card Title"));
    assert_eq!(meta.seo_description.as_deref(), Some("Card Description"));
}

#[test]
fn open_graph_wins_over_twitter_and_plain_description() {
    let html = r#"<html><head>
        <meta property="og:title" content="OG Title">
        <meta name="twitter:title" content="Card Title">
        <meta name="description" content="Plain description">
        <meta property="og:description" content="OG Description">
    </head><body></body></html>"#;

    let meta = extract_page_meta(&dom::parse(html));
    assert_eq!(meta.seo_title.as_deref(), Some("OG Title"));
    assert_eq!(meta.seo_description.as_deref(), Some("OG Description"));
}

#[test]
fn plain_description_fills_in_when_cards_are_absent() {
    let html = r#"<html><head>
        <meta name="description" content="Only plain description here">
    </head><body></body></html>"#;

    let meta = extract_page_meta(&dom::parse(html));
    assert_eq!(
        meta.seo_description.as_deref(),
        Some("Only plain description here")
    );
}

#[test]
fn tags_union_metas_and_links_without_duplicates() {
    let html = r#"<html><head>
        <meta property="article:tag" content="ethereum">
        <meta name="keywords" content="Ethereum; solidity, testing">
    </head><body>
        <a rel="tag" href="/topics/x">gas</a>
        <a href="https://example.com/tag/solidity">Solidity</a>
        <a href="https://example.com/tags/evm">EVM</a>
    </body></html>"#;

    let meta = extract_page_meta(&dom::parse(html));
    // Case-insensitive de-duplication keeps the first spelling seen.
    assert_eq!(meta.tags, vec!["ethereum", "solidity", "testing", "gas", "EVM"]);
}

#[test]
fn empty_meta_content_is_ignored() {
    let html = r#"<html><head>
        <meta property="og:title" content="   ">
        <meta property="og:image">
    </head><body></body></html>"#;

    let meta = extract_page_meta(&dom::parse(html));
    assert!(meta.seo_title.is_none());
    assert!(meta.header_image.is_none());
}
