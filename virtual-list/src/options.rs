use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::RenderResult;
use crate::key::{Identify, ItemKey, default_item_key};
use crate::window::DEFAULT_BUFFER;

/// Turns a data item into a renderable node.
///
/// Called once per item as it enters the window; items whose key is already rendered are not
/// passed to it again.
pub type ItemRenderer<T, N> = Arc<dyn Fn(&T) -> RenderResult<N> + Send + Sync>;

/// Derives an item's identity from the item and its current index.
pub type ItemKeyFn<T, K> = Arc<dyn Fn(&T, usize) -> K + Send + Sync>;

/// Configuration for [`crate::VirtualList`].
///
/// Closures are stored in `Arc`s so options stay cheap to clone.
pub struct VirtualListOptions<T, N, K = ItemKey> {
    /// Extent used for items that have not been measured yet.
    ///
    /// `0` means unknown: it is back-filled from the first rendered item's measured extent.
    pub nominal_item_height: u32,
    pub items: Vec<T>,
    pub item_renderer: ItemRenderer<T, N>,
    pub item_key: ItemKeyFn<T, K>,
    /// Items materialized past each edge of the viewport.
    pub buffer: usize,
}

impl<T, N, K> Clone for VirtualListOptions<T, N, K>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            nominal_item_height: self.nominal_item_height,
            items: self.items.clone(),
            item_renderer: Arc::clone(&self.item_renderer),
            item_key: Arc::clone(&self.item_key),
            buffer: self.buffer,
        }
    }
}

impl<T: Identify + 'static, N: 'static> VirtualListOptions<T, N, ItemKey> {
    /// Creates options keyed by [`default_item_key`] (`id`, then `key`, then index).
    pub fn new(
        nominal_item_height: u32,
        items: Vec<T>,
        item_renderer: impl Fn(&T) -> RenderResult<N> + Send + Sync + 'static,
    ) -> Self {
        Self::new_with_key(nominal_item_height, items, item_renderer, |item: &T, i| {
            default_item_key(item, i)
        })
    }
}

impl<T, N, K> VirtualListOptions<T, N, K> {
    /// Creates options with a custom key mapping.
    ///
    /// Measurements and rendered nodes follow keys, so `item_key` should return a stable
    /// identity for each item regardless of its position.
    pub fn new_with_key(
        nominal_item_height: u32,
        items: Vec<T>,
        item_renderer: impl Fn(&T) -> RenderResult<N> + Send + Sync + 'static,
        item_key: impl Fn(&T, usize) -> K + Send + Sync + 'static,
    ) -> Self {
        Self {
            nominal_item_height,
            items,
            item_renderer: Arc::new(item_renderer),
            item_key: Arc::new(item_key),
            buffer: DEFAULT_BUFFER,
        }
    }

    pub fn with_nominal_item_height(mut self, nominal_item_height: u32) -> Self {
        self.nominal_item_height = nominal_item_height;
        self
    }

    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    pub fn with_item_renderer(
        mut self,
        item_renderer: impl Fn(&T) -> RenderResult<N> + Send + Sync + 'static,
    ) -> Self {
        self.item_renderer = Arc::new(item_renderer);
        self
    }

    pub fn with_item_key(
        mut self,
        item_key: impl Fn(&T, usize) -> K + Send + Sync + 'static,
    ) -> Self {
        self.item_key = Arc::new(item_key);
        self
    }

    pub fn with_buffer(mut self, buffer: usize) -> Self {
        self.buffer = buffer;
        self
    }
}

impl<T, N, K> core::fmt::Debug for VirtualListOptions<T, N, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualListOptions")
            .field("nominal_item_height", &self.nominal_item_height)
            .field("items", &self.items.len())
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}
