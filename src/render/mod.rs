//! The renderer boundary.
//!
//! Layout, zoom and pan live outside this crate. The engine drives the
//! renderer through [`Renderer`] and awaits completion at the points
//! where ordering matters: a re-render must finish before the viewport
//! moves, the initial framing before anything else.

use crate::host::JsonOptions;
use crate::tree::{NodeId, SharedTree};

/// Viewport motion options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewportOptions {
    /// Space reserved at the bottom edge so fixed overlays (the
    /// toolbar) never occlude the target node. Renderer units.
    pub bottom: u16,
}

/// What the engine requires of a rendering backend.
///
/// `set_data` hands over the shared tree handle; `render_data` re-reads
/// its current fold state, which is how an expansion becomes visible.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    /// Adopt a freshly replaced tree and its rendering options.
    async fn set_data(&self, tree: &SharedTree, options: &JsonOptions);

    /// Re-layout from current tree state.
    async fn render_data(&self);

    /// Apply highlight styling; `None` clears it. At most one node is
    /// highlighted at a time.
    async fn set_highlight(&self, node: Option<NodeId>);

    /// Recenter the viewport on a node.
    async fn center_node(&self, node: NodeId, options: &ViewportOptions);

    /// Minimal scroll to bring a node into view.
    async fn ensure_visible(&self, node: NodeId, options: &ViewportOptions);

    /// Frame the whole tree. Invoked once, on first load.
    async fn fit(&self);

    fn apply_stylesheet(&self, css: &str);

    fn set_dark_theme(&self, dark: bool);

    /// Serialized SVG of the current rendering, if the backend can
    /// produce one.
    fn svg_content(&self) -> Option<String>;
}

/// Headless renderer for the stdio bridge, where the real renderer lives
/// on the host side of the channel. Logs every call and renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceRenderer;

impl Renderer for TraceRenderer {
    async fn set_data(&self, tree: &SharedTree, _options: &JsonOptions) {
        tracing::debug!(nodes = tree.borrow().len(), "renderer.set_data");
    }

    async fn render_data(&self) {
        tracing::debug!("renderer.render_data");
    }

    async fn set_highlight(&self, node: Option<NodeId>) {
        tracing::debug!(?node, "renderer.set_highlight");
    }

    async fn center_node(&self, node: NodeId, options: &ViewportOptions) {
        tracing::debug!(?node, bottom = options.bottom, "renderer.center_node");
    }

    async fn ensure_visible(&self, node: NodeId, options: &ViewportOptions) {
        tracing::debug!(?node, bottom = options.bottom, "renderer.ensure_visible");
    }

    async fn fit(&self) {
        tracing::debug!("renderer.fit");
    }

    fn apply_stylesheet(&self, css: &str) {
        tracing::debug!(bytes = css.len(), "renderer.apply_stylesheet");
    }

    fn set_dark_theme(&self, dark: bool) {
        tracing::debug!(dark, "renderer.set_dark_theme");
    }

    fn svg_content(&self) -> Option<String> {
        None
    }
}
