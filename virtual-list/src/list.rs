use alloc::vec::Vec;

use crate::error::VirtualListError;
use crate::height_cache::HeightCache;
use crate::key::{ItemKey, KeyCacheKey};
use crate::options::{ItemKeyFn, ItemRenderer, VirtualListOptions};
use crate::reconcile::{Rendered, reconcile};
use crate::spacer;
use crate::store::ItemStore;
use crate::surface::{Surface, SurfaceEvent};
use crate::window::compute_window;
use crate::{ListState, Phase, RenderOutcome, Spacing, Window};

/// A list that keeps only the items around the viewport attached to its [`Surface`].
///
/// The list is driven entirely by its owner: forward the surface's scroll and resize
/// notifications to [`VirtualList::on_scroll`] and [`VirtualList::on_resize`], and replace the
/// data with [`VirtualList::update_items`]. Each of these runs one synchronous pass:
///
/// 1. compute the window `[start, end)` from the scroll offset and item extents;
/// 2. if the window did not move (and the pass is not forced), stop without touching the
///    surface;
/// 3. otherwise reconcile the rendered nodes by key, measure newly attached nodes into the
///    height cache, update the spacer padding and restore the scroll offset.
///
/// Construction subscribes to both notifications; [`VirtualList::dispose`] (or dropping the
/// list) unsubscribes them and detaches every rendered node.
pub struct VirtualList<T, S: Surface, K = ItemKey> {
    item_renderer: ItemRenderer<T, S::Node>,
    item_key: ItemKeyFn<T, K>,
    buffer: usize,

    store: ItemStore<T, K>,
    heights: HeightCache<K>,
    viewport_height: u32,
    window: Window,
    spacing: Spacing,
    rendered: Vec<Rendered<K, S::Node>>,
    force_pending: bool,

    phase: Phase,
    subscriptions: Vec<S::Subscription>,
    surface: S,
}

impl<T, S: Surface, K: KeyCacheKey> VirtualList<T, S, K> {
    /// Takes ownership of `surface`, renders the initial window and subscribes to scroll and
    /// resize notifications.
    ///
    /// Fails only when the item renderer fails for an item of the initial window; nothing is
    /// subscribed in that case.
    pub fn new(
        options: VirtualListOptions<T, S::Node, K>,
        mut surface: S,
    ) -> Result<Self, VirtualListError<K>> {
        let VirtualListOptions {
            nominal_item_height,
            items,
            item_renderer,
            item_key,
            buffer,
        } = options;
        vdebug!(
            count = items.len(),
            nominal_item_height,
            buffer,
            "VirtualList::new"
        );

        surface.claim_scroll();
        let store = ItemStore::new(items, &*item_key);
        let mut heights = HeightCache::new(nominal_item_height);
        heights.rebuild(&store);

        let mut list = Self {
            item_renderer,
            item_key,
            buffer,
            store,
            heights,
            viewport_height: surface.viewport_height(),
            window: Window::EMPTY,
            spacing: Spacing::default(),
            rendered: Vec::new(),
            force_pending: false,
            phase: Phase::Idle,
            subscriptions: Vec::new(),
            surface,
        };
        list.run(true)?;

        let scroll = list.surface.subscribe(SurfaceEvent::ContainerScroll);
        let resize = list.surface.subscribe(SurfaceEvent::ViewportResize);
        list.subscriptions.push(scroll);
        list.subscriptions.push(resize);
        Ok(list)
    }

    /// Handles a container scroll notification.
    pub fn on_scroll(&mut self) -> Result<RenderOutcome, VirtualListError<K>> {
        self.ensure_live()?;
        self.run(false)
    }

    /// Handles a viewport resize notification.
    ///
    /// Every cached extent is dropped before the window is recomputed, and the pass is forced
    /// so the rendered nodes are re-measured and the spacer reflects the new layout.
    pub fn on_resize(&mut self) -> Result<RenderOutcome, VirtualListError<K>> {
        self.ensure_live()?;
        self.viewport_height = self.surface.viewport_height();
        self.heights.invalidate_all(&self.store);
        self.run(true)
    }

    /// Replaces the data set, scrolls back to the top and re-renders.
    ///
    /// Measurements survive for items whose key is still present. Nodes are reused by key as
    /// well: an item whose content changed but whose key did not keeps its old node.
    pub fn update_items(&mut self, items: Vec<T>) -> Result<RenderOutcome, VirtualListError<K>> {
        self.ensure_live()?;
        vdebug!(count = items.len(), "update_items");
        self.store.replace(items, &*self.item_key);
        self.heights.rebuild(&self.store);
        self.surface.set_scroll_offset(0);
        self.viewport_height = self.surface.viewport_height();
        self.run(true)
    }

    /// Runs a forced pass without changing any input.
    pub fn refresh(&mut self) -> Result<RenderOutcome, VirtualListError<K>> {
        self.ensure_live()?;
        self.run(true)
    }

    /// Scrolls so that item `index` starts at the top of the viewport (as far as the scroll
    /// range allows) and runs a pass.
    pub fn scroll_to_index(&mut self, index: usize) -> Result<RenderOutcome, VirtualListError<K>> {
        self.ensure_live()?;
        if let Some(last) = self.store.len().checked_sub(1) {
            let target = self
                .heights
                .offset_of(index.min(last))
                .min(self.max_scroll_offset());
            self.surface.set_scroll_offset(target);
        }
        self.run(false)
    }

    /// Changes the buffer size and runs a pass.
    pub fn set_buffer(&mut self, buffer: usize) -> Result<RenderOutcome, VirtualListError<K>> {
        self.ensure_live()?;
        self.buffer = buffer;
        self.run(false)
    }

    /// Computes the window the list would render for the given geometry, using the current
    /// height cache.
    pub fn window_for(&self, scroll_offset: u64, viewport_height: u32) -> Window {
        compute_window(
            scroll_offset,
            viewport_height,
            &self.heights,
            self.buffer,
            self.store.len(),
        )
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Sum of the cached-or-nominal extents of every item.
    pub fn total_height(&self) -> u64 {
        self.heights.total()
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.viewport_height as u64)
    }

    /// The nominal extent; `0` while it is still unknown.
    pub fn nominal_item_height(&self) -> u32 {
        self.heights.nominal()
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn buffer(&self) -> usize {
        self.buffer
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    pub fn items(&self) -> &[T] {
        self.store.items()
    }

    pub fn item_by_key(&self, key: &K) -> Option<&T> {
        self.store.get(key)
    }

    pub fn index_of_key(&self, key: &K) -> Option<usize> {
        self.store.index_of(key)
    }

    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.store.key(index)
    }

    /// Rendered nodes in surface order.
    pub fn rendered(&self) -> &[Rendered<K, S::Node>] {
        &self.rendered
    }

    pub fn node_for(&self, key: &K) -> Option<&S::Node> {
        self.rendered
            .iter()
            .find(|entry| &entry.key == key)
            .map(|entry| &entry.node)
    }

    /// The measured extent for `key`, if one is cached.
    pub fn cached_extent(&self, key: &K) -> Option<u32> {
        self.heights.cached(key)
    }

    /// The extent used for `key`: cached when measured, nominal otherwise.
    pub fn extent_of(&self, key: &K) -> u32 {
        self.heights.get(key)
    }

    /// The extent used for the item at `index`.
    pub fn extent_at(&self, index: usize) -> Option<u32> {
        (index < self.store.len()).then(|| self.heights.extent_at(index))
    }

    /// Returns the number of cached measurements (key → extent).
    pub fn measurement_cache_len(&self) -> usize {
        self.heights.len()
    }

    pub fn state(&self) -> ListState {
        ListState {
            item_count: self.store.len(),
            scroll_offset: self.surface.scroll_offset(),
            viewport_height: self.viewport_height,
            nominal_item_height: self.heights.nominal(),
            window: self.window,
            spacing: self.spacing,
            total_height: self.heights.total(),
        }
    }

    fn ensure_live(&self) -> Result<(), VirtualListError<K>> {
        if self.phase == Phase::Disposed {
            return Err(VirtualListError::Disposed);
        }
        Ok(())
    }

    fn run(&mut self, force: bool) -> Result<RenderOutcome, VirtualListError<K>> {
        let force = force || self.force_pending;
        let nominal_before = self.heights.nominal();
        let result = self.pass(force);
        let outcome = self.settle(result, force)?;

        if nominal_before == 0 && self.heights.nominal() != 0 {
            // Unmeasured items just grew from zero to the back-filled extent.
            let result = self.pass(false);
            let follow = self.settle(result, true)?;
            return Ok(outcome.then(follow));
        }
        Ok(outcome)
    }

    /// Records whether the next event has to retry a failed pass as forced.
    fn settle(
        &mut self,
        result: Result<RenderOutcome, VirtualListError<K>>,
        force: bool,
    ) -> Result<RenderOutcome, VirtualListError<K>> {
        self.force_pending = result.is_err() && force;
        result
    }

    fn pass(&mut self, force: bool) -> Result<RenderOutcome, VirtualListError<K>> {
        debug_assert_eq!(self.phase, Phase::Idle, "re-entrant pass");
        let scroll_offset = self.surface.scroll_offset();
        let count = self.store.len();
        let window = compute_window(
            scroll_offset,
            self.viewport_height,
            &self.heights,
            self.buffer,
            count,
        );
        if !force && window == self.window {
            return Ok(RenderOutcome::Unchanged);
        }
        vtrace!(
            start = window.start,
            end = window.end,
            force,
            "pass"
        );

        self.phase = Phase::Rendering;
        let stats = match reconcile(
            &mut self.rendered,
            &self.store,
            window,
            &*self.item_renderer,
            &mut self.surface,
        ) {
            Ok(stats) => stats,
            Err(err) => {
                self.phase = Phase::Idle;
                return Err(err);
            }
        };
        self.window = window;

        for entry in &self.rendered {
            let extent = self.surface.measure(&entry.node);
            self.heights.set_if_absent(entry.index, &entry.key, extent);
        }
        self.backfill_nominal();

        self.spacing = spacer::spacing_for(&self.heights, window, count);
        self.surface
            .set_spacing(self.spacing.leading, self.spacing.trailing);
        self.surface.set_scroll_offset(scroll_offset);

        self.phase = Phase::Idle;
        Ok(RenderOutcome::Reconciled(stats))
    }

    fn backfill_nominal(&mut self) {
        if self.heights.nominal() != 0 {
            return;
        }
        let Some(first) = self.rendered.first() else {
            return;
        };
        let extent = self.heights.get(&first.key);
        if extent == 0 {
            return;
        }
        vdebug!(extent, "nominal item height back-filled");
        self.heights.set_nominal(extent, &self.store);
    }

    #[cfg(test)]
    pub(crate) fn retry_pending(&self) -> bool {
        self.force_pending
    }
}

impl<T, S: Surface, K> VirtualList<T, S, K> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. to move its scroll offset before calling
    /// [`VirtualList::on_scroll`]. Attaching or detaching nodes through it breaks the list's
    /// bookkeeping.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Unsubscribes from scroll and resize notifications and detaches every rendered node.
    ///
    /// Idempotent. Afterwards every handler returns [`VirtualListError::Disposed`].
    pub fn dispose(&mut self) {
        if self.phase == Phase::Disposed {
            return;
        }
        vdebug!(
            subscriptions = self.subscriptions.len(),
            rendered = self.rendered.len(),
            "dispose"
        );
        for subscription in self.subscriptions.drain(..) {
            self.surface.unsubscribe(subscription);
        }
        for entry in self.rendered.drain(..) {
            self.surface.detach(&entry.node);
        }
        self.window = Window::EMPTY;
        self.spacing = Spacing::default();
        self.phase = Phase::Disposed;
    }
}

impl<T, S: Surface, K> Drop for VirtualList<T, S, K> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T, S: Surface, K> core::fmt::Debug for VirtualList<T, S, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualList")
            .field("buffer", &self.buffer)
            .field("viewport_height", &self.viewport_height)
            .field("window", &self.window)
            .field("spacing", &self.spacing)
            .field("rendered", &self.rendered.len())
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
