//! Compiled regex patterns for image filtering and content cleanup.
//!
//! All patterns are compiled once at startup using `LazyLock`.
//! Patterns are organized by their purpose in the pipeline.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Image Noise Detection
// =============================================================================

/// Matches image URLs and class names that indicate tracking beacons,
/// avatars, or other non-content imagery.
///
/// Note: `profile-` keeps its trailing hyphen so that compound content
/// classes like "profiled-article" are not rejected.
pub static NOISE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(tracking|pixel|profile-|avatar)").expect("NOISE_IMAGE regex")
});

/// Matches class names of containers whose images are never content
/// (author boxes, profile cards).
pub static AVATAR_CONTAINER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(avatar|profile)[\w-]*").expect("AVATAR_CONTAINER regex")
});

// =============================================================================
// Position Markers
// =============================================================================

/// A marker token carrying its extraction position, e.g. `__IMG_PLACEHOLDER_3__`.
///
/// The token is plain word characters so it survives Readability's text
/// handling and can be substituted back with a flat string replace.
pub static IMAGE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__IMG_PLACEHOLDER_(\d+)__").expect("IMAGE_MARKER regex")
});

/// Format the marker token for a given extraction position.
#[must_use]
pub fn image_marker(position: usize) -> String {
    format!("__IMG_PLACEHOLDER_{position}__")
}

// =============================================================================
// CDN Quality Rewrites
// =============================================================================

/// Medium resize directive in the image path, e.g. `resize:fit:640`.
pub static MEDIUM_RESIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"resize:(?:fit|fill):\d+").expect("MEDIUM_RESIZE regex")
});

/// Medium legacy max-width path segment, e.g. `/max/700/`.
pub static MEDIUM_MAX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/max/\d+/").expect("MEDIUM_MAX regex"));

/// Substack width directive, e.g. `w_848`.
pub static SUBSTACK_WIDTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"w_\d+").expect("SUBSTACK_WIDTH regex"));

/// Substack height cap; removed entirely so the aspect ratio is preserved.
pub static SUBSTACK_HEIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",h_\d+").expect("SUBSTACK_HEIGHT regex"));

/// Substack crop/fill directives; removed so the full frame is requested.
pub static SUBSTACK_CROP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",c_(?:crop|fill|lfill|thumb)").expect("SUBSTACK_CROP regex")
});

// =============================================================================
// Text Cleanup
// =============================================================================

/// Matches runs of whitespace for inline-text normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Matches three or more consecutive newlines.
pub static MULTIPLE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("MULTIPLE_NEWLINES regex"));
