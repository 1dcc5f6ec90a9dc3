use crate::height_cache::HeightCache;
use crate::key::KeyCacheKey;
use crate::{Spacing, Window};

/// Extent of every item strictly before `start`.
pub(crate) fn leading_space<K: KeyCacheKey>(heights: &HeightCache<K>, start: usize) -> u64 {
    heights.offset_of(start)
}

/// Extent of every item at or after `end`.
pub(crate) fn trailing_space<K: KeyCacheKey>(
    heights: &HeightCache<K>,
    end: usize,
    item_count: usize,
) -> u64 {
    heights
        .offset_of(item_count)
        .saturating_sub(heights.offset_of(end))
}

pub(crate) fn spacing_for<K: KeyCacheKey>(
    heights: &HeightCache<K>,
    window: Window,
    item_count: usize,
) -> Spacing {
    Spacing {
        leading: leading_space(heights, window.start),
        trailing: trailing_space(heights, window.end, item_count),
    }
}
