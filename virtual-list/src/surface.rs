/// Notifications a [`crate::VirtualList`] listens to for its whole lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceEvent {
    /// The container's scroll offset changed.
    ContainerScroll,
    /// The global viewport was resized.
    ViewportResize,
}

/// The rendering surface a list materializes its window into.
///
/// This is the only seam between the windowing engine and a UI toolkit. An implementation
/// wraps a scrollable container plus an inner wrapper whose padding stands in for the
/// unmaterialized items. The list owns its surface and is the only thing that mutates the
/// wrapper's children.
pub trait Surface {
    /// A renderable node produced by the item renderer.
    type Node;
    /// Handle returned by [`Surface::subscribe`].
    type Subscription;

    /// Makes the container the scroll owner and clips its overflow.
    fn claim_scroll(&mut self);

    /// Current client height of the container. `0` when it is not laid out yet.
    fn viewport_height(&self) -> u32;

    fn scroll_offset(&self) -> u64;

    fn set_scroll_offset(&mut self, offset: u64);

    /// Applies leading/trailing padding to the wrapper.
    fn set_spacing(&mut self, leading: u64, trailing: u64);

    /// Removes `node` from the wrapper.
    fn detach(&mut self, node: &Self::Node);

    /// Appends `nodes` to the wrapper, in order, as one batch.
    ///
    /// A node that is already attached is moved to its new position; it must not be detached
    /// and re-created, so element-internal state (focus, input values) survives.
    fn append<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Self::Node>)
    where
        Self::Node: 'a;

    /// The resolved layout extent of an attached node.
    fn measure(&self, node: &Self::Node) -> u32;

    fn subscribe(&mut self, event: SurfaceEvent) -> Self::Subscription;

    fn unsubscribe(&mut self, subscription: Self::Subscription);
}
