use core::cmp;

use crate::Window;
use crate::height_cache::HeightCache;
use crate::key::KeyCacheKey;

/// Default number of items materialized past each edge of the viewport.
pub const DEFAULT_BUFFER: usize = 5;

/// Computes the window `[start, end)` for a scroll position.
///
/// The anchor is the item whose cached-or-nominal extent contains `scroll_offset` (`0` when the
/// offset lies past the end of the list). The window runs from `anchor - buffer` to
/// `anchor + ceil(viewport_height / nominal) + buffer`, widened to the measured end of the
/// viewport when the buffer does not already reach it.
pub(crate) fn compute_window<K: KeyCacheKey>(
    scroll_offset: u64,
    viewport_height: u32,
    heights: &HeightCache<K>,
    buffer: usize,
    item_count: usize,
) -> Window {
    if item_count == 0 {
        return Window::EMPTY;
    }

    let nominal = heights.nominal();
    let visible_count = if nominal == 0 {
        0
    } else {
        viewport_height.div_ceil(nominal) as usize
    };

    let (anchor, measured_end) = match heights.index_at(scroll_offset) {
        Some(anchor) if viewport_height > 0 => {
            let last = scroll_offset.saturating_add(viewport_height as u64 - 1);
            let end = heights.index_at(last).map_or(item_count, |i| i + 1);
            (anchor, end)
        }
        Some(anchor) => (anchor, anchor),
        None => (0, 0),
    };

    let buffered_end = anchor.saturating_add(visible_count).saturating_add(buffer);
    let window = Window {
        start: anchor.saturating_sub(buffer),
        end: cmp::min(item_count, cmp::max(buffered_end, measured_end)),
    };
    vtrace!(
        scroll_offset,
        viewport_height,
        anchor,
        start = window.start,
        end = window.end,
        "compute_window"
    );
    window
}
