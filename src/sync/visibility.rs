//! Ancestor expansion for bringing a node into view.

use crate::tree::{NodeId, OutlineTree};

/// Expand every collapsed node along `ancestors` (root first).
///
/// Returns true when at least one fold flag was cleared, meaning the
/// caller must re-render before any viewport motion. The whole path is
/// expanded in a single pass so one re-render reflects the fully opened
/// chain instead of flashing through intermediate states.
///
/// Idempotent: a second call over the same path changes nothing and
/// reports no re-render.
pub fn expand_ancestors(tree: &mut OutlineTree, ancestors: &[NodeId]) -> bool {
    let mut expanded = false;
    for &id in ancestors {
        if tree.is_folded(id) {
            tree.expand(id);
            expanded = true;
        }
    }
    expanded
}
