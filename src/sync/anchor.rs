//! In-document anchor resolution.
//!
//! Anchors are derived from heading text, not line numbers, so a link
//! like `#setup` keeps working while the document above it grows.

use std::sync::LazyLock;

use regex::Regex;

use crate::tree::{NodeId, OutlineTree};

static HEADING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^h[0-9]$").expect("heading tag pattern"));

/// Find the first heading (in document order) whose normalized content
/// equals `anchor`.
///
/// First match wins and the search short-circuits, so a duplicated
/// anchor always resolves to its first occurrence. A node without a
/// heading tag ends the search along its branch; heading structure is
/// expected to chain from the root. Returns `None` for dangling anchors;
/// callers navigate nowhere.
pub fn locate_heading(tree: &OutlineTree, anchor: &str) -> Option<NodeId> {
    find(tree, tree.root(), anchor)
}

fn find(tree: &OutlineTree, id: NodeId, anchor: &str) -> Option<NodeId> {
    let tag = tree.payload(id).tag.as_deref().unwrap_or_default();
    if !HEADING_TAG.is_match(tag) {
        return None;
    }
    if normalize_anchor(tree.content(id)) == anchor {
        return Some(id);
    }
    tree.children(id)
        .iter()
        .find_map(|&child| find(tree, child, anchor))
}

/// Normalized identifier for heading content: trimmed, every run of
/// non-word characters collapsed to a single hyphen, lowercased.
pub fn normalize_anchor(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last_dash = false;
    for ch in content.trim().chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out
}
