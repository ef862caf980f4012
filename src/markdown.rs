//! HTML to Markdown conversion.
//!
//! Walks the simplified content tree and emits GitHub Flavored Markdown.
//! Standard rules apply, with custom handling for images (shared content
//! filter), fenced code blocks (cleaned text + classified language), and
//! inline code. Output is deterministic for identical input.

use crate::dom::{self, Document, NodeRef, Selection};
use crate::images::is_content_image;
use crate::lang::{classify, CodeBlockContext};
use crate::patterns::{MULTIPLE_NEWLINES, NOISE_IMAGE, WHITESPACE_NORMALIZE};

/// Upper bound on the preceding-text window handed to the language
/// classifier.
const CONTEXT_WINDOW: usize = 400;

/// HTML to Markdown converter.
///
/// An explicitly constructed value with no shared or hidden configuration
/// state; build one per process (or per call) and pass it where needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl MarkdownConverter {
    /// Create a converter with the standard rule set.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Convert an HTML fragment or document to Markdown.
    #[must_use]
    pub fn convert(&self, html: &str) -> String {
        let doc = Document::from(html);
        let body = doc.select("body");
        let mut out = String::new();
        if let Some(root) = body.nodes().first() {
            render_children(root, &mut out, 0);
        }
        let collapsed = MULTIPLE_NEWLINES.replace_all(&out, "\n\n");
        collapsed.trim().to_string()
    }
}

fn render_children(node: &NodeRef, out: &mut String, list_depth: usize) {
    for child in node.children() {
        render_node(&child, out, list_depth);
    }
}

fn render_node(node: &NodeRef, out: &mut String, list_depth: usize) {
    if node.is_text() {
        push_inline_text(out, &node.text());
        return;
    }
    if !node.is_element() {
        return;
    }

    let tag = dom::node_tag(node).unwrap_or_default();
    match tag.as_str() {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag.as_bytes()[1] - b'0';
            let text = inline_text(node);
            if !text.is_empty() {
                ensure_blank_line(out);
                for _ in 0..level {
                    out.push('#');
                }
                out.push(' ');
                out.push_str(&text);
                out.push_str("\n\n");
            }
        }
        "p" | "figure" => {
            let mut inner = String::new();
            render_children(node, &mut inner, list_depth);
            let trimmed = inner.trim();
            if !trimmed.is_empty() {
                ensure_blank_line(out);
                out.push_str(trimmed);
                out.push_str("\n\n");
            }
        }
        "img" => {
            let sel = Selection::from(*node);
            if let Some(image) = image_markdown(&sel) {
                out.push_str(&image);
            }
        }
        "figcaption" => {
            let text = inline_text(node);
            if !text.is_empty() {
                ensure_blank_line(out);
                out.push('*');
                out.push_str(&text);
                out.push_str("*\n\n");
            }
        }
        "a" => {
            let mut inner = String::new();
            render_children(node, &mut inner, list_depth);
            let text = inner.trim();
            let href = dom::node_attr(node, "href").unwrap_or_default();
            if text.is_empty() {
                // Nothing to link; drop the element entirely.
            } else if href.starts_with("http://") || href.starts_with("https://") {
                out.push('[');
                out.push_str(text);
                out.push_str("](");
                out.push_str(&href);
                out.push(')');
            } else {
                out.push_str(text);
            }
        }
        "strong" | "b" => wrap_inline(node, out, "**", list_depth),
        "em" | "i" => wrap_inline(node, out, "*", list_depth),
        "code" => {
            // Inline only: code under a pre never reaches here, the pre
            // branch consumes the whole subtree.
            let text = Selection::from(*node).text();
            let collapsed = WHITESPACE_NORMALIZE.replace_all(&text, " ");
            let trimmed = collapsed.trim();
            if !trimmed.is_empty() {
                out.push('`');
                out.push_str(trimmed);
                out.push('`');
            }
        }
        "pre" => render_code_block(node, out),
        "ul" => render_list(node, out, list_depth, false),
        "ol" => render_list(node, out, list_depth, true),
        "blockquote" => {
            let mut inner = String::new();
            render_children(node, &mut inner, list_depth);
            let trimmed = inner.trim();
            if !trimmed.is_empty() {
                ensure_blank_line(out);
                for line in trimmed.lines() {
                    out.push_str("> ");
                    out.push_str(line);
                    out.push('\n');
                }
                out.push('\n');
            }
        }
        "br" => out.push('\n'),
        "hr" => {
            ensure_blank_line(out);
            out.push_str("---\n\n");
        }
        "table" => {
            let table = table_to_markdown(&Selection::from(*node));
            if !table.is_empty() {
                ensure_blank_line(out);
                out.push_str(&table);
                out.push('\n');
            }
        }
        "script" | "style" | "noscript" | "iframe" | "svg" | "head" | "meta" | "link"
        | "template" => {}
        _ => render_children(node, out, list_depth),
    }
}

/// Emit `![alt](src)` when the image passes the shared content filter.
///
/// Defense in depth: this covers images introduced outside the extractor's
/// marker mechanism, applying the same noise rules.
fn image_markdown(sel: &Selection) -> Option<String> {
    let src = dom::get_attribute(sel, "src")?;
    if !is_content_image(&src) {
        return None;
    }
    if let Some(class) = dom::get_attribute(sel, "class") {
        if NOISE_IMAGE.is_match(&class) {
            return None;
        }
    }
    let alt = dom::get_attribute(sel, "alt").unwrap_or_default();
    let alt = WHITESPACE_NORMALIZE.replace_all(&alt, " ");
    Some(format!("![{}]({})", alt.trim(), src))
}

fn render_code_block(node: &NodeRef, out: &mut String) {
    let sel = Selection::from(*node);
    let code_sel = sel.select("code");
    let (raw, classes) = if code_sel.exists() {
        (code_sel.text(), dom::class_list(&code_sel))
    } else {
        (sel.text(), dom::class_list(&sel))
    };

    let code = clean_code_text(&raw);
    if code.is_empty() {
        return;
    }

    let context = CodeBlockContext {
        code: code.clone(),
        classes,
        preceding: tail_window(out, CONTEXT_WINDOW),
        parent_text: sel.parent().text().to_string(),
    };
    let language = classify(&context);

    ensure_blank_line(out);
    out.push_str("```");
    out.push_str(language.tag());
    out.push('\n');
    out.push_str(&code);
    out.push_str("\n```\n\n");
}

fn render_list(node: &NodeRef, out: &mut String, list_depth: usize, ordered: bool) {
    if list_depth == 0 {
        ensure_blank_line(out);
    } else if !out.ends_with('\n') {
        out.push('\n');
    }

    let indent = "  ".repeat(list_depth);
    let mut index = 1usize;
    for child in node.children() {
        if !child.is_element() || dom::node_tag(&child).as_deref() != Some("li") {
            continue;
        }
        let mut inner = String::new();
        render_children(&child, &mut inner, list_depth + 1);
        let item = inner.trim();
        if item.is_empty() {
            continue;
        }

        out.push_str(&indent);
        if ordered {
            out.push_str(&format!("{index}. "));
            index += 1;
        } else {
            out.push_str("- ");
        }
        // Continuation lines inside an item stay aligned under the marker.
        out.push_str(&item.replace('\n', &format!("\n{indent}  ")));
        out.push('\n');
    }

    if list_depth == 0 {
        out.push('\n');
    }
}

fn wrap_inline(node: &NodeRef, out: &mut String, delimiter: &str, list_depth: usize) {
    let mut inner = String::new();
    render_children(node, &mut inner, list_depth);
    let text = inner.trim();
    if !text.is_empty() {
        out.push_str(delimiter);
        out.push_str(text);
        out.push_str(delimiter);
    }
}

/// Render a node's content as single-line inline text.
fn inline_text(node: &NodeRef) -> String {
    let mut inner = String::new();
    render_children(node, &mut inner, 0);
    WHITESPACE_NORMALIZE.replace_all(inner.trim(), " ").into_owned()
}

fn push_inline_text(out: &mut String, text: &str) {
    let collapsed = WHITESPACE_NORMALIZE.replace_all(text, " ");
    let chunk = if out.is_empty() || out.ends_with('\n') {
        collapsed.trim_start()
    } else {
        collapsed.as_ref()
    };
    if !chunk.is_empty() {
        out.push_str(chunk);
    }
}

/// Separate block output with exactly one blank line.
fn ensure_blank_line(out: &mut String) {
    while out.ends_with(' ') {
        out.pop();
    }
    if out.is_empty() || out.ends_with("\n\n") {
        return;
    }
    if out.ends_with('\n') {
        out.push('\n');
    } else {
        out.push_str("\n\n");
    }
}

/// The last `limit` characters of `out`, char-boundary safe.
fn tail_window(out: &str, limit: usize) -> String {
    let chars: Vec<char> = out.chars().collect();
    let start = chars.len().saturating_sub(limit);
    chars[start..].iter().collect()
}

/// Normalize code text for fencing: tabs become two spaces, whitespace-only
/// lines become empty, trailing line whitespace and blank edge lines are
/// dropped.
///
/// This transform is a fixed point: applying it to already-cleaned text is
/// a no-op.
#[must_use]
pub fn clean_code_text(raw: &str) -> String {
    let expanded = raw.replace('\t', "  ");
    let mut lines: Vec<&str> = expanded.lines().map(str::trim_end).collect();

    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}

/// Convert an HTML table selection to a GFM pipe table.
///
/// The first row (from `thead` or the leading `tr`) becomes the header.
fn table_to_markdown(table: &Selection) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();

    for tr in table.select("tr").iter() {
        let mut row = Vec::new();
        for cell in tr.select("th, td").iter() {
            let text = WHITESPACE_NORMALIZE
                .replace_all(cell.text().trim(), " ")
                .into_owned();
            row.push(text);
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }

    if rows.is_empty() {
        return String::new();
    }

    let col_count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![3usize; col_count];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (row_idx, row) in rows.iter().enumerate() {
        out.push('|');
        for (col, width) in widths.iter().enumerate() {
            let cell = row.get(col).map_or("", String::as_str);
            let pad = width.saturating_sub(cell.chars().count());
            out.push(' ');
            out.push_str(cell);
            for _ in 0..pad {
                out.push(' ');
            }
            out.push_str(" |");
        }
        out.push('\n');

        if row_idx == 0 {
            out.push('|');
            for width in &widths {
                out.push(' ');
                for _ in 0..*width {
                    out.push('-');
                }
                out.push_str(" |");
            }
            out.push('\n');
        }
    }
    out
}
