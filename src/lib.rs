// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. tree::NodeData)
    clippy::module_name_repetitions
)]

//! # Mindline
//!
//! Bidirectional line-sync engine for a markdown mind-map viewer.
//!
//! Given a rendered outline tree whose nodes carry their source line
//! ranges, mindline resolves an editor cursor position to the innermost
//! containing node, expands any collapsed ancestors, decides whether a
//! re-render is needed, and drives highlight plus viewport motion —
//! serialized against whole-tree replacement so a sync request never
//! reads a root mid-swap.
//!
//! Parsing markup into the tree and computing layout are external
//! collaborators: the transformer delivers JSON over the host channel,
//! and the renderer sits behind the [`render::Renderer`] trait.
//!
//! ## Modules
//!
//! - [`tree`]: outline tree model and wire decode
//! - [`sync`]: line locator, visibility resolver, anchor resolver
//! - [`view`]: focus controller and the pending-render gate
//! - [`render`]: renderer boundary
//! - [`host`]: host message channel (tagged JSON over stdio)
//! - [`status`]: log time-period status label (separate side feature)
//! - [`config`]: CLI and flag-file configuration

pub mod config;
pub mod host;
pub mod render;
pub mod status;
pub mod sync;
pub mod tree;
pub mod view;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::host::{DocumentUpdate, EditorEvent, HostRequest};
    pub use crate::render::Renderer;
    pub use crate::tree::{NodeId, OutlineTree};
    pub use crate::view::ViewerSession;
}
