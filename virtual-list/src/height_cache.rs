use alloc::vec::Vec;

use crate::fenwick::Fenwick;
use crate::key::{KeyCacheKey, KeyMap};
use crate::store::ItemStore;

/// Measured extents keyed by item identity, plus per-position extents for prefix sums.
///
/// Entries are written once per key ("set if absent") and only dropped by
/// [`HeightCache::invalidate_all`]. Positions without an entry use the nominal extent;
/// positions shadowed by a later duplicate key occupy no space.
#[derive(Clone, Debug)]
pub(crate) struct HeightCache<K> {
    nominal: u32,
    measured: KeyMap<K, u32>,
    extents: Vec<u32>,
    sums: Fenwick,
}

impl<K: KeyCacheKey> HeightCache<K> {
    pub(crate) fn new(nominal: u32) -> Self {
        Self {
            nominal,
            measured: KeyMap::new(),
            extents: Vec::new(),
            sums: Fenwick::from_extents(&[]),
        }
    }

    /// `0` means the nominal extent is not known yet.
    pub(crate) fn nominal(&self) -> u32 {
        self.nominal
    }

    pub(crate) fn get(&self, key: &K) -> u32 {
        self.cached(key).unwrap_or(self.nominal)
    }

    pub(crate) fn cached(&self, key: &K) -> Option<u32> {
        self.measured.get(key).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.measured.len()
    }

    /// Records `extent` for the item at `index` unless `key` already has an entry.
    ///
    /// Returns `true` when the entry was written.
    pub(crate) fn set_if_absent(&mut self, index: usize, key: &K, extent: u32) -> bool {
        if self.measured.contains_key(key) {
            return false;
        }
        self.measured.insert(key.clone(), extent);
        if let Some(cur) = self.extents.get_mut(index) {
            let delta = extent as i64 - *cur as i64;
            *cur = extent;
            self.sums.add(index, delta);
        }
        true
    }

    /// Drops every measurement and re-derives positions from the nominal extent.
    pub(crate) fn invalidate_all<T>(&mut self, store: &ItemStore<T, K>) {
        vdebug!(entries = self.measured.len(), "invalidate_all");
        self.measured.clear();
        self.rebuild(store);
    }

    /// Replaces the nominal extent. Only unmeasured positions change.
    pub(crate) fn set_nominal<T>(&mut self, nominal: u32, store: &ItemStore<T, K>) {
        if self.nominal == nominal {
            return;
        }
        self.nominal = nominal;
        self.rebuild(store);
    }

    /// Lays the cache over a (new) key sequence.
    pub(crate) fn rebuild<T>(&mut self, store: &ItemStore<T, K>) {
        let keys = store.keys();
        vdebug!(
            count = keys.len(),
            cached = self.measured.len(),
            "rebuild_extents"
        );
        let nominal = self.nominal;
        let measured = &self.measured;
        self.extents.clear();
        self.extents.reserve_exact(keys.len());
        self.extents
            .extend(keys.iter().enumerate().map(|(index, key)| {
                if store.index_of(key) != Some(index) {
                    0
                } else {
                    measured.get(key).copied().unwrap_or(nominal)
                }
            }));
        self.sums = Fenwick::from_extents(&self.extents);
    }

    pub(crate) fn extent_at(&self, index: usize) -> u32 {
        self.extents.get(index).copied().unwrap_or(0)
    }

    /// Sum of the extents of the first `count` positions.
    pub(crate) fn offset_of(&self, count: usize) -> u64 {
        self.sums.prefix_sum(count)
    }

    pub(crate) fn total(&self) -> u64 {
        self.sums.total()
    }

    /// Index of the item whose extent contains `offset`, or `None` when `offset` lies at or
    /// past the end of the list.
    pub(crate) fn index_at(&self, offset: u64) -> Option<usize> {
        let consumed = self.sums.lower_bound(offset);
        (consumed < self.extents.len()).then_some(consumed)
    }
}
