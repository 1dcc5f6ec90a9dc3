/// Half-open index bounds `[start, end)` of the materialized items.
///
/// Invariant: `start <= end <= item_count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start: usize,
    pub end: usize, // exclusive
}

impl Window {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// Leading/trailing padding standing in for the items outside the window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spacing {
    pub leading: u64,
    pub trailing: u64,
}

/// What a reconciliation pass did to the rendered set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderStats {
    /// Nodes produced by the item renderer.
    pub created: usize,
    /// Nodes carried over from the previous pass.
    pub reused: usize,
    /// Nodes detached from the surface.
    pub removed: usize,
}

impl RenderStats {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            created: self.created + other.created,
            reused: self.reused + other.reused,
            removed: self.removed + other.removed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The window did not move; the surface was not touched.
    Unchanged,
    Reconciled(RenderStats),
}

impl RenderOutcome {
    pub fn stats(&self) -> Option<RenderStats> {
        match self {
            Self::Unchanged => None,
            Self::Reconciled(stats) => Some(*stats),
        }
    }

    pub(crate) fn then(self, next: Self) -> Self {
        match (self, next) {
            (Self::Unchanged, next) => next,
            (this, Self::Unchanged) => this,
            (Self::Reconciled(a), Self::Reconciled(b)) => Self::Reconciled(a.merge(b)),
        }
    }
}

/// Lifecycle of a [`crate::VirtualList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Rendering,
    Disposed,
}

/// A lightweight snapshot of the list's geometry.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListState {
    pub item_count: usize,
    pub scroll_offset: u64,
    pub viewport_height: u32,
    pub nominal_item_height: u32,
    pub window: Window,
    pub spacing: Spacing,
    pub total_height: u64,
}
