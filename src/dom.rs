//! DOM helpers over `dom_query`.
//!
//! Thin accessors shared by the extraction stages. Kept deliberately small:
//! only the operations this pipeline actually performs.

pub use dom_query::{Document, NodeRef, Selection};

use regex::Regex;

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Get any attribute value of the first matched element.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get the lowercase tag name of a node, or `None` for non-elements.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    node.node_name().map(|t| t.to_lowercase())
}

/// Get an attribute value of a single node.
#[must_use]
pub fn node_attr(node: &NodeRef, name: &str) -> Option<String> {
    let sel = Selection::from(*node);
    sel.attr(name).map(|s| s.to_string())
}

/// True if any ancestor of `node` carries a class or id matching `pattern`.
#[must_use]
pub fn ancestor_matches(node: &NodeRef, pattern: &Regex) -> bool {
    for anc in node.ancestors(None) {
        let sel = Selection::from(anc);
        if let Some(class) = sel.attr("class") {
            if pattern.is_match(&class) {
                return true;
            }
        }
        if let Some(id) = sel.attr("id") {
            if pattern.is_match(&id) {
                return true;
            }
        }
    }
    false
}

/// Find the closest ancestor of `node` with the given tag name.
#[must_use]
pub fn closest_ancestor<'a>(node: &NodeRef<'a>, tag: &str) -> Option<NodeRef<'a>> {
    node.ancestors(None)
        .into_iter()
        .find(|anc| node_tag(anc).as_deref() == Some(tag))
}

/// Space-separated class names of a selection, lowercased.
#[must_use]
pub fn class_list(sel: &Selection) -> Vec<String> {
    sel.attr("class")
        .map(|c| {
            c.split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
}
