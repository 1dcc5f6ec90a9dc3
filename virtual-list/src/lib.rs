//! A headless windowed list: renders only the items around the viewport.
//!
//! Given a scroll offset, per-item extents (nominal until measured) and a data set that may be
//! replaced at any time, the list computes which items must exist on the rendering surface,
//! reconciles that set against what is already attached (reusing nodes by key) and keeps
//! leading/trailing padding in place of everything else, so the scrollable extent stays
//! representative of the whole list.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide a [`Surface`]:
//! - viewport height and scroll offset
//! - node attach/detach/measure primitives
//! - scroll and resize notification subscriptions
//!
//! Prefix sums over item extents live in a Fenwick tree, so the anchor lookup and spacer
//! computation are `O(log n)` per pass.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod fenwick;
mod height_cache;
mod key;
mod list;
mod options;
mod reconcile;
mod spacer;
mod store;
mod surface;
mod types;
mod window;

#[cfg(test)]
mod test_surface;
#[cfg(test)]
mod property_tests;

pub use error::{RenderFailure, RenderResult, VirtualListError};
pub use key::{Identify, ItemKey, default_item_key};
pub use list::VirtualList;
pub use options::{ItemKeyFn, ItemRenderer, VirtualListOptions};
pub use reconcile::Rendered;
pub use surface::{Surface, SurfaceEvent};
pub use types::{ListState, Phase, RenderOutcome, RenderStats, Spacing, Window};
pub use window::DEFAULT_BUFFER;

#[doc(hidden)]
pub use key::KeyCacheKey;
