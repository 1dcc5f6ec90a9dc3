// Example: measurements and nodes follow item keys when the data is reordered.
use std::cell::Cell;
use std::rc::Rc;

use virtual_list::{RenderResult, Surface, SurfaceEvent, VirtualList, VirtualListOptions};

#[derive(Clone)]
struct Message {
    uid: u64,
    lines: u32,
}

#[derive(Debug)]
struct Bubble {
    uid: u64,
    lines: u32,
}

/// Counts attach/detach calls; nodes are measured as 20px per line.
#[derive(Default)]
struct CountingSurface {
    scroll: u64,
    attached: Vec<u64>,
    detaches: Rc<Cell<usize>>,
}

impl Surface for CountingSurface {
    type Node = Bubble;
    type Subscription = ();

    fn claim_scroll(&mut self) {}

    fn viewport_height(&self) -> u32 {
        400
    }

    fn scroll_offset(&self) -> u64 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll = offset;
    }

    fn set_spacing(&mut self, _: u64, _: u64) {}

    fn detach(&mut self, node: &Bubble) {
        self.attached.retain(|&uid| uid != node.uid);
        self.detaches.set(self.detaches.get() + 1);
    }

    fn append<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Bubble>)
    where
        Bubble: 'a,
    {
        for node in nodes {
            self.attached.retain(|&uid| uid != node.uid);
            self.attached.push(node.uid);
        }
    }

    fn measure(&self, node: &Bubble) -> u32 {
        node.lines * 20
    }

    fn subscribe(&mut self, _: SurfaceEvent) {}

    fn unsubscribe(&mut self, _: ()) {}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let messages: Vec<Message> = (0..6)
        .map(|uid| Message {
            uid,
            lines: 1 + uid as u32 % 3,
        })
        .collect();

    let options = VirtualListOptions::new_with_key(
        20,
        messages.clone(),
        |m: &Message| -> RenderResult<Bubble> {
            Ok(Bubble {
                uid: m.uid,
                lines: m.lines,
            })
        },
        |m: &Message, _| m.uid,
    );
    let surface = CountingSurface::default();
    let detaches = Rc::clone(&surface.detaches);
    let mut list = VirtualList::new(options, surface)?;
    println!("attached={:?} total={}", list.surface().attached, list.total_height());

    let mut reversed = messages;
    reversed.reverse();
    list.update_items(reversed)?;
    println!(
        "after reverse: attached={:?} extent_at(0)={:?} detaches={}",
        list.surface().attached,
        list.extent_at(0),
        detaches.get()
    );
    Ok(())
}
