use alloc::string::String;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

#[cfg(feature = "std")]
#[doc(hidden)]
pub trait KeyCacheKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> KeyCacheKey for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait KeyCacheKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> KeyCacheKey for K {}

/// Identity of an item, as derived by the default key function.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKey {
    /// Taken from the item's `id`, or failing that its `key`.
    Named(String),
    /// Positional fallback. Unstable across insertion and removal.
    Index(usize),
}

/// Optional identity accessors consulted by the default key function.
///
/// Both methods default to `None`; an empty `impl Identify for MyRow {}` gives positional
/// identity.
pub trait Identify {
    fn id(&self) -> Option<String> {
        None
    }

    fn key(&self) -> Option<String> {
        None
    }
}

/// The default key function: `id`, then `key`, then the item's index.
pub fn default_item_key<T: Identify + ?Sized>(item: &T, index: usize) -> ItemKey {
    match item.id().or_else(|| item.key()) {
        Some(name) => ItemKey::Named(name),
        None => ItemKey::Index(index),
    }
}
