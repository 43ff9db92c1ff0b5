//! Source-line to node resolution.

use crate::tree::{NodeId, OutlineTree};

/// A located node plus the ancestor chain from the root down to (but
/// excluding) the node itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub node: NodeId,
    pub ancestors: Vec<NodeId>,
}

/// Find the most specific node whose line range contains `line`.
///
/// The whole tree is visited: outline ranges nest, so a deeper match
/// recorded later overwrites a shallower one and the innermost container
/// wins. Nodes without a parseable range never match but their subtrees
/// are still searched. Returns `None` when no range contains the line;
/// callers treat that as a no-op, not an error.
pub fn locate_line(tree: &OutlineTree, line: u32) -> Option<Located> {
    let mut best = None;
    let mut path = Vec::new();
    visit(tree, tree.root(), line, &mut path, &mut best);
    best
}

fn visit(
    tree: &OutlineTree,
    id: NodeId,
    line: u32,
    path: &mut Vec<NodeId>,
    best: &mut Option<Located>,
) {
    if tree.line_range(id).is_some_and(|range| range.contains(line)) {
        *best = Some(Located {
            node: id,
            ancestors: path.clone(),
        });
    }
    path.push(id);
    for &child in tree.children(id) {
        visit(tree, child, line, path, best);
    }
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeData;
    use proptest::prelude::*;

    fn tree_from(value: serde_json::Value) -> OutlineTree {
        let data: NodeData = serde_json::from_value(value).unwrap();
        OutlineTree::from_data(data)
    }

    fn nested_sample() -> OutlineTree {
        tree_from(serde_json::json!({
            "content": "root",
            "payload": { "lines": "0,10" },
            "children": [
                {
                    "content": "child",
                    "payload": { "lines": "2,5", "fold": 1 },
                    "children": [
                        { "content": "grandchild", "payload": { "lines": "3,4" } }
                    ]
                }
            ]
        }))
    }

    #[test]
    fn test_deepest_containing_node_wins() {
        let tree = nested_sample();
        let found = locate_line(&tree, 3).unwrap();
        assert_eq!(tree.content(found.node), "grandchild");
        let names: Vec<_> = found.ancestors.iter().map(|&id| tree.content(id)).collect();
        assert_eq!(names, ["root", "child"]);
    }

    #[test]
    fn test_falls_back_to_outer_container() {
        let tree = nested_sample();
        let found = locate_line(&tree, 7).unwrap();
        assert_eq!(tree.content(found.node), "root");
        assert!(found.ancestors.is_empty());
    }

    #[test]
    fn test_no_container_is_none() {
        let tree = nested_sample();
        assert_eq!(locate_line(&tree, 50), None);
    }

    #[test]
    fn test_boundary_lines_are_half_open() {
        let tree = nested_sample();
        let found = locate_line(&tree, 2).unwrap();
        assert_eq!(tree.content(found.node), "child");
        // end is exclusive, so line 5 falls back to the root range
        let found = locate_line(&tree, 5).unwrap();
        assert_eq!(tree.content(found.node), "root");
    }

    #[test]
    fn test_rangeless_node_is_transparent() {
        let tree = tree_from(serde_json::json!({
            "content": "root",
            "payload": { "lines": "0,10" },
            "children": [
                {
                    "content": "wrapper",
                    "children": [
                        { "content": "inner", "payload": { "lines": "4,6" } }
                    ]
                }
            ]
        }));
        let found = locate_line(&tree, 4).unwrap();
        assert_eq!(tree.content(found.node), "inner");
        let names: Vec<_> = found.ancestors.iter().map(|&id| tree.content(id)).collect();
        assert_eq!(names, ["root", "wrapper"]);
    }

    #[test]
    fn test_malformed_range_never_matches() {
        let tree = tree_from(serde_json::json!({
            "content": "root",
            "payload": { "lines": "oops" }
        }));
        assert_eq!(locate_line(&tree, 0), None);
    }

    #[test]
    fn test_later_sibling_match_overwrites_earlier() {
        // Overlapping siblings violate the transformer's invariant; the
        // locator still behaves predictably and keeps the last match.
        let tree = tree_from(serde_json::json!({
            "content": "root",
            "payload": { "lines": "0,10" },
            "children": [
                { "content": "a", "payload": { "lines": "1,5" } },
                { "content": "b", "payload": { "lines": "3,7" } }
            ]
        }));
        let found = locate_line(&tree, 4).unwrap();
        assert_eq!(tree.content(found.node), "b");
    }

    proptest! {
        /// Nested chains resolve to the innermost range containing the
        /// line, regardless of depth or where the line falls.
        #[test]
        fn prop_innermost_chain_member_wins(depth in 1usize..8, line in 0u32..64) {
            // Chain of ranges [0,64), [1,63), [2,62), ...
            let mut value = serde_json::json!({
                "content": format!("n{}", depth - 1),
                "payload": { "lines": format!("{},{}", depth - 1, 64 - depth as u32 + 1) }
            });
            for level in (0..depth - 1).rev() {
                value = serde_json::json!({
                    "content": format!("n{level}"),
                    "payload": { "lines": format!("{},{}", level, 64 - level as u32) },
                    "children": [value]
                });
            }
            let tree = tree_from(value);

            let expected = (0..depth)
                .rev()
                .find(|&level| {
                    let (start, end) = (level as u32, 64 - level as u32);
                    start <= line && line < end
                })
                .map(|level| format!("n{level}"));
            let found = locate_line(&tree, line).map(|hit| tree.content(hit.node).to_string());
            prop_assert_eq!(found, expected);
        }
    }
}
