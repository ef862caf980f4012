//! Content image extraction.
//!
//! Walks the document for images positioned after the first substantive
//! paragraph, filters out tracking/avatar noise, resolves the best source
//! URL per image, and swaps each accepted image for a position-bearing
//! marker token so ordering survives the readability stage.

use std::collections::HashSet;

use tracing::warn;
use url::Url;

use crate::dom::{self, Document, Selection};
use crate::patterns::{
    image_marker, AVATAR_CONTAINER, MEDIUM_MAX, MEDIUM_RESIZE, NOISE_IMAGE, SUBSTACK_CROP,
    SUBSTACK_HEIGHT, SUBSTACK_WIDTH,
};

/// Minimum text length of the paragraph that demarcates "real content
/// start". Shorter paragraphs (bylines, dates) don't count.
const MIN_ANCHOR_TEXT_LEN: usize = 20;

/// A content image lifted out of the document.
///
/// Created during extraction, consumed exactly once during reconstruction,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    /// Best-quality source URL, CDN parameters already normalized.
    pub src: String,
    /// Alt text, possibly empty.
    pub alt: String,
    /// Zero-based extraction position in document order.
    pub position: usize,
    /// The marker token standing in for this image in the document.
    pub marker: String,
}

/// Extract content images from `doc`, replacing each accepted image (its
/// closest `figure` ancestor, or the `img` node itself) with a marker
/// text node. Rejected images (noise, unresolvable source) are removed
/// from the document entirely. Returns accepted images in document order.
///
/// Images appearing before the first substantive paragraph are ignored;
/// they are almost always avatars and banner clutter. If no such paragraph
/// exists, no image qualifies.
#[must_use]
pub fn extract_images(doc: &Document) -> Vec<ExtractedImage> {
    let body = doc.select("body");
    let Some(root) = body.nodes().first().copied() else {
        return Vec::new();
    };

    // Pass 1: locate the content anchor.
    let mut anchor_id = None;
    for node in root.descendants() {
        if !node.is_element() {
            continue;
        }
        if matches!(dom::node_tag(&node).as_deref(), Some("p" | "blockquote")) {
            let text = Selection::from(node).text();
            if text.trim().chars().count() > MIN_ANCHOR_TEXT_LEN {
                anchor_id = Some(node.id);
                break;
            }
        }
    }
    let Some(anchor_id) = anchor_id else {
        return Vec::new();
    };

    // Pass 2: collect img nodes after the anchor, in document order.
    // Collect first, mutate after - replacing while walking would
    // invalidate the traversal.
    let mut candidates = Vec::new();
    let mut seen_anchor = false;
    for node in root.descendants() {
        if node.id == anchor_id {
            seen_anchor = true;
            continue;
        }
        if !seen_anchor || !node.is_element() {
            continue;
        }
        if dom::node_tag(&node).as_deref() == Some("img") {
            candidates.push(node);
        }
    }

    let mut images = Vec::new();
    let mut replaced_figures: HashSet<dom_query::NodeId> = HashSet::new();

    for node in candidates {
        let sel = Selection::from(node);

        // Rejected images are removed outright. Readability strips class
        // attributes during simplification, so a merely-skipped noise
        // image would reach the converter unrecognizable.
        if is_noise(&sel, &node) {
            sel.remove();
            continue;
        }

        let Some(raw_src) = resolve_source(&sel) else {
            warn!("dropping image with no resolvable source");
            sel.remove();
            continue;
        };
        if NOISE_IMAGE.is_match(&raw_src) {
            sel.remove();
            continue;
        }

        let src = upgrade_cdn_url(&raw_src);
        let alt = dom::get_attribute(&sel, "alt").unwrap_or_default();
        let position = images.len();
        let marker = image_marker(position);

        // Swap out the whole figure when there is one, so captions and
        // wrappers don't leak into the simplified content.
        if let Some(figure) = dom::closest_ancestor(&node, "figure") {
            if !replaced_figures.insert(figure.id) {
                // A sibling img in this figure already produced a marker.
                continue;
            }
            Selection::from(figure).replace_with_html(marker.as_str());
        } else {
            sel.replace_with_html(marker.as_str());
        }

        images.push(ExtractedImage {
            src,
            alt,
            position,
            marker,
        });
    }

    images
}

/// True if this image is tracking/avatar noise rather than content.
fn is_noise(sel: &Selection, node: &dom::NodeRef) -> bool {
    if let Some(class) = dom::get_attribute(sel, "class") {
        if NOISE_IMAGE.is_match(&class) {
            return true;
        }
    }
    dom::ancestor_matches(node, &AVATAR_CONTAINER)
}

/// Shared content-image filter: true when a URL may appear in output.
///
/// The Markdown converter applies this to every image it encounters, which
/// also covers images introduced outside the marker mechanism.
#[must_use]
pub fn is_content_image(src: &str) -> bool {
    let src = src.trim();
    if src.is_empty() || NOISE_IMAGE.is_match(src) {
        return false;
    }
    src.starts_with("http://") || src.starts_with("https://")
}

/// Resolve the best source URL for an `img` element.
///
/// Priority: direct `src`, then common lazy-load data attributes, then the
/// highest-resolution entry of `srcset` (or a sibling `<source>` inside
/// the enclosing `picture`/`figure`).
#[must_use]
pub fn resolve_source(sel: &Selection) -> Option<String> {
    for name in ["src", "data-src", "data-lazy-src", "data-original"] {
        if let Some(value) = dom::get_attribute(sel, name) {
            if let Some(usable) = usable_src(&value) {
                return Some(usable);
            }
        }
    }

    for name in ["srcset", "data-srcset"] {
        if let Some(srcset) = dom::get_attribute(sel, name) {
            if let Some(best) = best_srcset_candidate(&srcset) {
                return Some(best);
            }
        }
    }

    // <picture><source srcset=...> next to the img.
    let node = sel.nodes().first().copied()?;
    let container =
        dom::closest_ancestor(&node, "picture").or_else(|| dom::closest_ancestor(&node, "figure"))?;
    for source in Selection::from(container).select("source").iter() {
        if let Some(srcset) = dom::get_attribute(&source, "srcset") {
            if let Some(best) = best_srcset_candidate(&srcset) {
                return Some(best);
            }
        }
    }
    None
}

/// Accept http(s) URLs; upgrade protocol-relative ones. Rejects `data:`
/// URIs and placeholder values.
fn usable_src(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value.starts_with("data:") {
        return None;
    }
    if value.starts_with("//") {
        return Some(format!("https:{value}"));
    }
    if value.starts_with("http://") || value.starts_with("https://") {
        return Some(value.to_string());
    }
    None
}

/// Pick the srcset entry with the largest declared width.
///
/// Entries without a width descriptor are only used when nothing declares
/// a width at all.
#[must_use]
pub fn best_srcset_candidate(srcset: &str) -> Option<String> {
    let mut best: Option<(u32, String)> = None;
    let mut fallback: Option<String> = None;

    for entry in srcset.split(',') {
        let mut parts = entry.split_whitespace();
        let Some(candidate_url) = parts.next() else {
            continue;
        };
        let Some(candidate_url) = usable_src(candidate_url) else {
            continue;
        };

        let width = parts
            .next()
            .and_then(|d| d.strip_suffix('w'))
            .and_then(|w| w.parse::<u32>().ok());

        match width {
            Some(w) if best.as_ref().is_none_or(|(bw, _)| w > *bw) => {
                best = Some((w, candidate_url));
            }
            Some(_) => {}
            None => {
                if fallback.is_none() {
                    fallback = Some(candidate_url);
                }
            }
        }
    }

    best.map(|(_, u)| u).or(fallback)
}

/// Apply per-CDN query/path rewrites requesting maximum quality.
///
/// Known rules:
/// - WordPress/Photon (`*.wp.com`, `*.files.wordpress.com`): drop the
///   `w`/`h`/`resize`/`fit`/`crop`/`zoom` caps, pin `quality=100`.
/// - Medium (`miro.medium.com`): raise `resize:fit:N` and legacy `/max/N/`
///   to 2400.
/// - Substack (`substackcdn.com`): raise `w_N` to 1456, drop the height
///   cap and crop directives.
///
/// Unknown hosts pass through untouched.
#[must_use]
pub fn upgrade_cdn_url(src: &str) -> String {
    let Ok(url) = Url::parse(src) else {
        return src.to_string();
    };
    let Some(host) = url.host_str() else {
        return src.to_string();
    };

    if host.ends_with(".wp.com") || host.ends_with(".files.wordpress.com") {
        return upgrade_wordpress(url);
    }
    if host == "miro.medium.com" || host.ends_with(".medium.com") {
        let upgraded = MEDIUM_RESIZE.replace_all(src, "resize:fit:2400");
        return MEDIUM_MAX.replace_all(&upgraded, "/max/2400/").into_owned();
    }
    if host.ends_with("substackcdn.com") || host.ends_with(".substack.com") {
        let upgraded = SUBSTACK_WIDTH.replace_all(src, "w_1456");
        let upgraded = SUBSTACK_HEIGHT.replace_all(&upgraded, "");
        return SUBSTACK_CROP.replace_all(&upgraded, "").into_owned();
    }

    src.to_string()
}

fn upgrade_wordpress(mut url: Url) -> String {
    const CAPPED: &[&str] = &["w", "h", "resize", "fit", "crop", "zoom", "quality"];

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !CAPPED.contains(&k.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.set_query(None);
    if !kept.is_empty() {
        url.query_pairs_mut().extend_pairs(kept);
    }
    url.query_pairs_mut().append_pair("quality", "100");
    url.to_string()
}
