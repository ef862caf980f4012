//! Content reconstruction.
//!
//! Re-merges extracted images into the simplified content by replacing
//! each marker token with figure markup. Pure string substitution - by
//! this stage the content is flat HTML text and a DOM re-traversal would
//! only add failure modes.

use tracing::warn;

use crate::images::ExtractedImage;

/// Replace marker tokens in `html` with `<figure><img ...></figure>`
/// markup, in ascending position order.
///
/// Keyed strictly by each image's own marker token; URL equality is never
/// consulted, so images sharing a resolved source URL cannot be
/// misattributed. Markers for images Readability dropped stay untouched in
/// the text and are reported as a data-quality warning, not an error.
#[must_use]
pub fn merge_images(html: &str, images: &[ExtractedImage]) -> String {
    let mut ordered: Vec<&ExtractedImage> = images.iter().collect();
    ordered.sort_by_key(|img| img.position);

    let mut out = html.to_string();
    for image in ordered {
        if !out.contains(&image.marker) {
            warn!(marker = %image.marker, src = %image.src, "image marker missing from simplified content");
            continue;
        }
        let figure = format!(
            r#"<figure><img src="{}" alt="{}"></figure>"#,
            image.src,
            escape_attr(&image.alt)
        );
        out = out.replace(&image.marker, &figure);
    }
    out
}

/// Minimal attribute escaping for alt text re-emitted as HTML.
fn escape_attr(text: &str) -> String {
    text.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;")
}
