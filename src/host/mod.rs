//! Host message channel.
//!
//! The viewer talks to its host editor through tagged JSON frames,
//! `{"type": ..., "data": ...}` in both directions. This module owns the
//! wire types; [`channel`] drives them over a line-delimited transport.
//!
//! The only obligations at this boundary: inbound events are processed
//! strictly in arrival order, and no outbound navigation event is ever
//! emitted for a node lacking a valid line range.

mod channel;

pub use channel::serve;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::SelectionNotice;
use crate::tree::NodeData;

/// Transport failure. Everything content-level (bad JSON, unknown types)
/// is logged and dropped instead; only losing the transport itself ends
/// the channel.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("host channel i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Inbound frames, in the host's message vocabulary.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum HostRequest {
    /// Replace the whole tree with freshly transformed output.
    SetData(DocumentUpdate),
    /// The editor cursor moved; sync the view to a source line.
    SetCursor(CursorRequest),
    /// Apply a stylesheet to the rendered view.
    #[serde(rename = "setCSS")]
    SetCss(Option<String>),
    /// Re-derive light/dark theming from the host's body classes.
    CheckTheme(Option<Vec<String>>),
    /// Export the rendered view as SVG to the given path.
    DownloadSvg(Option<String>),
    /// Toolbar fold toggle passthrough.
    ToggleNode(Option<bool>),
    /// Editor selection moved (status-bar side feature).
    SelectionChanged(SelectionNotice),
    /// Another editor became active (status-bar side feature).
    ActiveEditorChanged(Option<SelectionNotice>),
}

/// `setData` payload: a fresh root plus rendering options.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentUpdate {
    pub root: NodeData,
    #[serde(default, rename = "jsonOptions")]
    pub json_options: Option<JsonOptions>,
}

/// Transformer options delivered alongside the tree. Only the
/// active-node block matters to the engine; the rest passes through to
/// the renderer untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JsonOptions {
    #[serde(default, rename = "activeNode")]
    pub active_node: Option<ActiveNodeOptions>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// How the viewport should treat the highlighted node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveNodeOptions {
    /// `"center"` recenters on the node; anything else means minimal
    /// scrolling.
    #[serde(default)]
    pub placement: Option<String>,
}

/// `setCursor` payload.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorRequest {
    pub line: u32,
    /// When absent, the session default applies.
    #[serde(default)]
    pub auto_expand: Option<bool>,
}

/// Outbound frames toward the host editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum EditorEvent {
    /// Ask the host for the current document (sent once at startup).
    Refresh,
    /// Follow a relative link to another file.
    OpenFile(String),
    /// Move the editor cursor to a source line.
    SetFocus(u32),
    /// Deliver serialized SVG for download.
    DownloadSvg {
        content: String,
        path: Option<String>,
    },
    /// Toolbar: switch back to the text editor.
    EditAsText,
    /// Toolbar: open the export dialog.
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_set_data_frame() {
        let frame = r#"{
            "type": "setData",
            "data": {
                "root": { "content": "root", "payload": { "lines": "0,4" } },
                "jsonOptions": { "activeNode": { "placement": "center" }, "colorFreezeLevel": 2 }
            }
        }"#;
        let request: HostRequest = serde_json::from_str(frame).unwrap();
        let HostRequest::SetData(update) = request else {
            panic!("expected setData");
        };
        assert_eq!(update.root.content, "root");
        let options = update.json_options.unwrap();
        assert_eq!(
            options.active_node.unwrap().placement.as_deref(),
            Some("center")
        );
        assert!(options.rest.contains_key("colorFreezeLevel"));
    }

    #[test]
    fn test_decode_set_cursor_defaults_auto_expand() {
        let request: HostRequest =
            serde_json::from_str(r#"{"type":"setCursor","data":{"line":12}}"#).unwrap();
        let HostRequest::SetCursor(cursor) = request else {
            panic!("expected setCursor");
        };
        assert_eq!(cursor.line, 12);
        assert_eq!(cursor.auto_expand, None);
    }

    #[test]
    fn test_decode_set_css_null_data() {
        let request: HostRequest =
            serde_json::from_str(r#"{"type":"setCSS","data":null}"#).unwrap();
        assert!(matches!(request, HostRequest::SetCss(None)));
    }

    #[test]
    fn test_decode_selection_changed() {
        let frame = r#"{
            "type": "selectionChanged",
            "data": {
                "languageId": "log",
                "startLine": 4,
                "endLine": 6,
                "endCharacter": 0,
                "lineTexts": ["10:00:00 a", "10:00:01 b", "10:00:02 c"]
            }
        }"#;
        let request: HostRequest = serde_json::from_str(frame).unwrap();
        let HostRequest::SelectionChanged(notice) = request else {
            panic!("expected selectionChanged");
        };
        assert_eq!(notice.language_id, "log");
        assert_eq!(notice.line_texts.len(), 3);
    }

    #[test]
    fn test_encode_refresh_is_bare_tag() {
        let frame = serde_json::to_string(&EditorEvent::Refresh).unwrap();
        assert_eq!(frame, r#"{"type":"refresh"}"#);
    }

    #[test]
    fn test_encode_set_focus() {
        let frame = serde_json::to_string(&EditorEvent::SetFocus(7)).unwrap();
        assert_eq!(frame, r#"{"type":"setFocus","data":7}"#);
    }

    #[test]
    fn test_encode_download_svg() {
        let frame = serde_json::to_string(&EditorEvent::DownloadSvg {
            content: "<svg/>".to_string(),
            path: Some("map.svg".to_string()),
        })
        .unwrap();
        assert_eq!(
            frame,
            r#"{"type":"downloadSvg","data":{"content":"<svg/>","path":"map.svg"}}"#
        );
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        assert!(serde_json::from_str::<HostRequest>(r#"{"type":"zoomTo","data":1}"#).is_err());
    }
}
