//! A recording in-memory surface for tests.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::{
    Identify, RenderFailure, RenderResult, Surface, SurfaceEvent, VirtualList, VirtualListOptions,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Row {
    pub id: u32,
    pub height: u32,
}

impl Identify for Row {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

pub(crate) fn rows(n: usize, height: u32) -> Vec<Row> {
    (0..n)
        .map(|i| Row {
            id: i as u32,
            height,
        })
        .collect()
}

pub(crate) fn rows_with_heights(heights: &[u32]) -> Vec<Row> {
    heights
        .iter()
        .enumerate()
        .map(|(i, &height)| Row {
            id: i as u32,
            height,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    pub id: u64,
    pub row: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    ClaimScroll,
    Append(Vec<u64>),
    Detach(u64),
    Subscribe(SurfaceEvent),
    Unsubscribe(SurfaceEvent),
}

pub(crate) type OpLog = Rc<RefCell<Vec<Op>>>;

#[derive(Debug, Default)]
pub(crate) struct MemorySurface {
    pub viewport_height: u32,
    pub scroll_offset: u64,
    pub children: Vec<Node>,
    pub leading: u64,
    pub trailing: u64,
    /// Multiplies every measured extent; models a layout change after a resize.
    pub layout_factor: u32,
    pub subscriptions: Vec<(u64, SurfaceEvent)>,
    next_subscription: u64,
    log: OpLog,
}

impl MemorySurface {
    pub(crate) fn new(viewport_height: u32) -> Self {
        Self {
            viewport_height,
            layout_factor: 1,
            ..Self::default()
        }
    }

    pub(crate) fn log(&self) -> OpLog {
        Rc::clone(&self.log)
    }

    pub(crate) fn ops(&self) -> Vec<Op> {
        self.log.borrow().clone()
    }

    /// Number of attach/detach mutations recorded so far.
    pub(crate) fn mutation_count(&self) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|op| matches!(op, Op::Append(_) | Op::Detach(_)))
            .count()
    }

    pub(crate) fn child_ids(&self) -> Vec<u64> {
        self.children.iter().map(|n| n.id).collect()
    }
}

impl Surface for MemorySurface {
    type Node = Node;
    type Subscription = u64;

    fn claim_scroll(&mut self) {
        self.log.borrow_mut().push(Op::ClaimScroll);
    }

    fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
    }

    fn set_spacing(&mut self, leading: u64, trailing: u64) {
        self.leading = leading;
        self.trailing = trailing;
    }

    fn detach(&mut self, node: &Node) {
        self.children.retain(|n| n.id != node.id);
        self.log.borrow_mut().push(Op::Detach(node.id));
    }

    fn append<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Node>)
    where
        Node: 'a,
    {
        let mut ids = Vec::new();
        for node in nodes {
            self.children.retain(|n| n.id != node.id);
            self.children.push(node.clone());
            ids.push(node.id);
        }
        self.log.borrow_mut().push(Op::Append(ids));
    }

    fn measure(&self, node: &Node) -> u32 {
        debug_assert!(
            self.children.iter().any(|n| n.id == node.id),
            "measured a detached node"
        );
        node.height * self.layout_factor
    }

    fn subscribe(&mut self, event: SurfaceEvent) -> u64 {
        self.next_subscription += 1;
        self.subscriptions.push((self.next_subscription, event));
        self.log.borrow_mut().push(Op::Subscribe(event));
        self.next_subscription
    }

    fn unsubscribe(&mut self, subscription: u64) {
        if let Some(pos) = self
            .subscriptions
            .iter()
            .position(|(id, _)| *id == subscription)
        {
            let (_, event) = self.subscriptions.remove(pos);
            self.log.borrow_mut().push(Op::Unsubscribe(event));
        }
    }
}

/// Shared switches for the test renderer.
#[derive(Clone, Debug, Default)]
pub(crate) struct RenderControl {
    pub next_id: Arc<AtomicU64>,
    pub calls: Arc<AtomicU64>,
    /// Rendering the row with this id fails while `failing` is set.
    pub fail_row: Arc<AtomicU64>,
    pub failing: Arc<AtomicBool>,
}

impl RenderControl {
    pub(crate) fn renderer(&self) -> impl Fn(&Row) -> RenderResult<Node> + Send + Sync + 'static {
        let control = self.clone();
        move |row: &Row| {
            control.calls.fetch_add(1, Ordering::Relaxed);
            if control.failing.load(Ordering::Relaxed)
                && control.fail_row.load(Ordering::Relaxed) == row.id as u64
            {
                return Err(RenderFailure::new("row refused to render"));
            }
            Ok(Node {
                id: control.next_id.fetch_add(1, Ordering::Relaxed),
                row: row.id,
                height: row.height,
            })
        }
    }

    pub(crate) fn fail_on(&self, row: u32) {
        self.fail_row.store(row as u64, Ordering::Relaxed);
        self.failing.store(true, Ordering::Relaxed);
    }

    pub(crate) fn recover(&self) {
        self.failing.store(false, Ordering::Relaxed);
    }

    pub(crate) fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

pub(crate) fn new_list(
    items: Vec<Row>,
    nominal: u32,
    viewport_height: u32,
    buffer: usize,
) -> (VirtualList<Row, MemorySurface>, RenderControl) {
    let control = RenderControl::default();
    let options = VirtualListOptions::new(nominal, items, control.renderer()).with_buffer(buffer);
    let list = VirtualList::new(options, MemorySurface::new(viewport_height))
        .unwrap_or_else(|err| panic!("initial render failed: {err}"));
    (list, control)
}
