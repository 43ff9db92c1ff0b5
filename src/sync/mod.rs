//! Line and anchor resolution over the outline tree.
//!
//! The locator and the anchor resolver are pure reads; expanding
//! collapsed ancestors is a separate pass over the path the locator
//! produced, so each half stays independently testable.

mod anchor;
mod locate;
mod visibility;

pub use anchor::{locate_heading, normalize_anchor};
pub use locate::{Located, locate_line};
pub use visibility::expand_ancestors;
