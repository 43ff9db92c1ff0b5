//! Highlight/focus orchestration.
//!
//! [`ViewerSession`] owns the viewer-side state that would otherwise be
//! globals — the current tree, the active-node options delivered with
//! it, the first-load flag and the pending-render gate — so independent
//! instances can exist side by side (one per viewer, many in tests).

mod gate;

pub use gate::{RenderGate, RenderToken};

use std::cell::RefCell;
use std::rc::Rc;

use tokio::sync::mpsc;

use crate::config::Placement;
use crate::host::{DocumentUpdate, EditorEvent};
use crate::render::{Renderer, ViewportOptions};
use crate::sync::{expand_ancestors, locate_heading, locate_line};
use crate::tree::{NodeId, OutlineTree, SharedTree};

/// Space kept clear under the highlighted node so the fixed toolbar
/// overlay never covers it.
const DEFAULT_BOTTOM_MARGIN: u16 = 80;

/// Host body classes that select the dark theme.
const DARK_CLASSES: &[&str] = &["vscode-dark", "vscode-high-contrast"];

/// Session-level behavior resolved from configuration before the first
/// document arrives.
#[derive(Debug, Clone, Copy)]
pub struct SessionDefaults {
    /// Placement used when the transformer options carry none.
    pub placement: Placement,
    /// Margin reservation handed to viewport motion.
    pub bottom_margin: u16,
    /// Default for cursor syncs that don't say whether to auto-expand.
    pub auto_expand: bool,
    /// Pin the theme instead of deriving it from host body classes.
    pub forced_dark: Option<bool>,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        Self {
            placement: Placement::Visible,
            bottom_margin: DEFAULT_BOTTOM_MARGIN,
            auto_expand: true,
            forced_dark: None,
        }
    }
}

/// Toolbar buttons that talk to the host rather than the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    EditAsText,
    Export,
}

#[derive(Debug, Default)]
struct ViewState {
    tree: Option<SharedTree>,
    placement: Placement,
    stylesheet: Option<String>,
    dark: bool,
    first_render: bool,
}

/// Orchestrates locate → expand → re-render → highlight → scroll as one
/// atomic-feeling operation, serialized against tree replacement by the
/// render gate.
pub struct ViewerSession<R> {
    renderer: R,
    events: mpsc::UnboundedSender<EditorEvent>,
    defaults: SessionDefaults,
    state: RefCell<ViewState>,
    gate: RenderGate,
}

impl<R: Renderer> ViewerSession<R> {
    pub fn new(renderer: R, events: mpsc::UnboundedSender<EditorEvent>) -> Self {
        Self {
            renderer,
            events,
            defaults: SessionDefaults::default(),
            state: RefCell::new(ViewState {
                first_render: true,
                ..ViewState::default()
            }),
            gate: RenderGate::new(),
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: SessionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Ask the host for the current document.
    pub fn request_refresh(&self) {
        self.post(EditorEvent::Refresh);
    }

    /// Install a freshly transformed tree, replacing the previous one
    /// wholesale. Requests queued behind the gate read the new root only
    /// once the renderer has adopted it.
    pub async fn replace_tree(&self, update: DocumentUpdate) {
        let token = self.gate.begin();
        let options = update.json_options.unwrap_or_default();
        let placement = options
            .active_node
            .as_ref()
            .and_then(|active| active.placement.as_deref())
            .map_or(self.defaults.placement, Placement::from_wire);
        let tree = OutlineTree::shared(update.root);
        {
            let mut state = self.state.borrow_mut();
            state.tree = Some(Rc::clone(&tree));
            state.placement = placement;
        }
        self.renderer.set_data(&tree, &options).await;
        let first = {
            let mut state = self.state.borrow_mut();
            std::mem::take(&mut state.first_render)
        };
        if first {
            self.renderer.fit().await;
        }
        self.gate.settle(token);
        tracing::debug!(nodes = tree.borrow().len(), "tree replaced");
    }

    /// Sync the view to a source line: find the innermost containing
    /// node, open its ancestors, re-render if that changed anything,
    /// then highlight and scroll. A line outside every range is a silent
    /// no-op that leaves highlight and viewport untouched.
    pub async fn focus_line(&self, line: u32, auto_expand: Option<bool>) {
        self.gate.settled().await;
        let Some(tree) = self.current_tree() else {
            return;
        };
        let Some(found) = locate_line(&tree.borrow(), line) else {
            tracing::trace!(line, "no node contains line");
            return;
        };
        let auto_expand = auto_expand.unwrap_or(self.defaults.auto_expand);
        let needs_rerender =
            auto_expand && expand_ancestors(&mut tree.borrow_mut(), &found.ancestors);
        if needs_rerender {
            // Expansion must be laid out before the viewport moves.
            self.renderer.render_data().await;
        }
        self.apply_highlight(Some(found.node)).await;
    }

    /// Follow an in-document anchor. A dangling anchor clears the
    /// highlight but never moves the viewport.
    pub async fn focus_anchor(&self, anchor: &str) {
        self.gate.settled().await;
        let Some(tree) = self.current_tree() else {
            return;
        };
        let target = locate_heading(&tree.borrow(), anchor);
        if target.is_none() {
            tracing::trace!(anchor, "anchor did not resolve");
        }
        self.apply_highlight(target).await;
    }

    /// A link click inside the rendered view. Absolute URLs are the host
    /// webview's own business.
    pub async fn link_clicked(&self, href: &str) {
        if let Some(anchor) = href.strip_prefix('#') {
            self.focus_anchor(anchor).await;
        } else if !href.contains("://") {
            self.post(EditorEvent::OpenFile(href.to_string()));
        }
    }

    /// Double-click on a rendered node: hand the host the node's
    /// starting line. A node without a parseable range emits nothing.
    pub fn node_activated(&self, node: NodeId) {
        let Some(tree) = self.current_tree() else {
            return;
        };
        let Some(range) = tree.borrow().line_range(node) else {
            return;
        };
        self.post(EditorEvent::SetFocus(range.start));
    }

    pub fn apply_stylesheet(&self, css: Option<String>) {
        let css = css.unwrap_or_default();
        self.renderer.apply_stylesheet(&css);
        self.state.borrow_mut().stylesheet = Some(css);
    }

    /// Re-derive theming from the host's body classes, unless the
    /// session pins a theme.
    pub fn check_theme(&self, body_classes: &[String]) {
        let dark = self.defaults.forced_dark.unwrap_or_else(|| {
            body_classes
                .iter()
                .any(|class| DARK_CLASSES.contains(&class.as_str()))
        });
        self.state.borrow_mut().dark = dark;
        self.renderer.set_dark_theme(dark);
    }

    /// Export the current rendering toward the host.
    pub fn export_svg(&self, path: Option<String>) {
        match self.renderer.svg_content() {
            Some(content) => self.post(EditorEvent::DownloadSvg { content, path }),
            None => tracing::warn!("renderer has no svg serialization, export skipped"),
        }
    }

    /// Accepted for protocol compatibility; fold toggling belongs to the
    /// renderer's toolbar.
    pub fn toggle_node(&self, recursive: bool) {
        tracing::trace!(recursive, "toggle_node ignored");
    }

    pub fn toolbar_action(&self, action: ToolbarAction) {
        match action {
            ToolbarAction::EditAsText => self.post(EditorEvent::EditAsText),
            ToolbarAction::Export => self.post(EditorEvent::Export),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.state.borrow().dark
    }

    pub fn stylesheet(&self) -> Option<String> {
        self.state.borrow().stylesheet.clone()
    }

    fn current_tree(&self) -> Option<SharedTree> {
        self.state.borrow().tree.clone()
    }

    async fn apply_highlight(&self, node: Option<NodeId>) {
        self.renderer.set_highlight(node).await;
        let Some(node) = node else { return };
        let options = ViewportOptions {
            bottom: self.defaults.bottom_margin,
        };
        let placement = self.state.borrow().placement;
        match placement {
            Placement::Center => self.renderer.center_node(node, &options).await,
            Placement::Visible => self.renderer.ensure_visible(node, &options).await,
        }
    }

    fn post(&self, event: EditorEvent) {
        if self.events.send(event).is_err() {
            tracing::warn!("host channel closed, outbound event dropped");
        }
    }
}
