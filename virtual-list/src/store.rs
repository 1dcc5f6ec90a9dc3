use alloc::vec::Vec;

use crate::key::{KeyCacheKey, KeyMap};

/// The ordered data set plus its key lookup.
///
/// Keys are recomputed from each item's current index on every [`ItemStore::replace`];
/// duplicate keys collapse in the lookup (last write wins).
#[derive(Clone, Debug)]
pub(crate) struct ItemStore<T, K> {
    items: Vec<T>,
    keys: Vec<K>,
    by_key: KeyMap<K, usize>,
}

impl<T, K: KeyCacheKey> ItemStore<T, K> {
    pub(crate) fn new(items: Vec<T>, key_of: &dyn Fn(&T, usize) -> K) -> Self {
        let mut store = Self {
            items: Vec::new(),
            keys: Vec::new(),
            by_key: KeyMap::new(),
        };
        store.replace(items, key_of);
        store
    }

    pub(crate) fn replace(&mut self, items: Vec<T>, key_of: &dyn Fn(&T, usize) -> K) {
        let keys: Vec<K> = items
            .iter()
            .enumerate()
            .map(|(i, item)| key_of(item, i))
            .collect();
        let mut by_key = KeyMap::new();
        for (i, key) in keys.iter().enumerate() {
            if by_key.insert(key.clone(), i).is_some() {
                vwarn!(index = i, "duplicate item key; earlier item shadowed");
            }
        }
        self.items = items;
        self.keys = keys;
        self.by_key = by_key;
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    pub(crate) fn keys(&self) -> &[K] {
        &self.keys
    }

    pub(crate) fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub(crate) fn key(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    pub(crate) fn index_of(&self, key: &K) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    pub(crate) fn get(&self, key: &K) -> Option<&T> {
        self.index_of(key).and_then(|i| self.items.get(i))
    }
}
