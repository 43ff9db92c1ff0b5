//! Wire types delivered by the document transformer.
//!
//! The transformer ships the outline as plain JSON: nested objects with
//! `content`, `payload` and `children`. Unknown payload keys are the
//! renderer's business and are ignored here.

use serde::Deserialize;

/// One node of the transformer's JSON tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeData {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub payload: NodePayload,
    #[serde(default)]
    pub children: Vec<NodeData>,
}

/// Auxiliary data the transformer attaches to a node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodePayload {
    /// Source line range encoded as `"start,end"` (half-open).
    #[serde(default)]
    pub lines: Option<String>,
    /// Element tag for heading nodes (`"h1"`..`"h6"`).
    #[serde(default)]
    pub tag: Option<String>,
    /// Collapse flag: absent or 0 = expanded, non-zero = collapsed.
    #[serde(default)]
    pub fold: Option<u32>,
}

/// Half-open source line range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Parse the transformer's `"start,end"` payload encoding.
    ///
    /// Anything non-numeric yields `None`. Extra comma-separated fields
    /// are ignored. Inverted ranges parse fine but can never contain a
    /// line, so they degrade to "no match" at the containment check.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(',');
        let start = parts.next()?.trim().parse().ok()?;
        let end = parts.next()?.trim().parse().ok()?;
        Some(Self { start, end })
    }

    pub const fn contains(&self, line: u32) -> bool {
        self.start <= line && line < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_range() {
        assert_eq!(LineRange::parse("2,5"), Some(LineRange { start: 2, end: 5 }));
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        assert_eq!(
            LineRange::parse(" 10 , 14 "),
            Some(LineRange { start: 10, end: 14 })
        );
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        assert_eq!(LineRange::parse("1,5,9"), Some(LineRange { start: 1, end: 5 }));
    }

    #[test]
    fn test_parse_rejects_missing_end() {
        assert_eq!(LineRange::parse("3"), None);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(LineRange::parse("a,b"), None);
        assert_eq!(LineRange::parse("-1,5"), None);
        assert_eq!(LineRange::parse(""), None);
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = LineRange { start: 2, end: 5 };
        assert!(!range.contains(1));
        assert!(range.contains(2));
        assert!(range.contains(4));
        assert!(!range.contains(5));
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let range = LineRange { start: 5, end: 2 };
        for line in 0..10 {
            assert!(!range.contains(line));
        }
    }

    #[test]
    fn test_empty_range_contains_nothing() {
        let range = LineRange { start: 3, end: 3 };
        assert!(!range.contains(3));
    }
}
