// Example: 10k rows in a 500px viewport; only the window is ever attached.
use virtual_list::{
    Identify, RenderFailure, RenderResult, Surface, SurfaceEvent, VirtualList, VirtualListOptions,
};

struct Row {
    id: usize,
    text: String,
}

impl Identify for Row {
    fn id(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

#[derive(Clone)]
struct Line {
    text: String,
    height: u32,
}

/// A line-oriented surface: every line is one node, wrapped lines grow taller.
#[derive(Default)]
struct TextSurface {
    width: u32,
    height: u32,
    scroll: u64,
    lines: Vec<Line>,
    padding: (u64, u64),
    listeners: usize,
}

impl Surface for TextSurface {
    type Node = Line;
    type Subscription = SurfaceEvent;

    fn claim_scroll(&mut self) {}

    fn viewport_height(&self) -> u32 {
        self.height
    }

    fn scroll_offset(&self) -> u64 {
        self.scroll
    }

    fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll = offset;
    }

    fn set_spacing(&mut self, leading: u64, trailing: u64) {
        self.padding = (leading, trailing);
    }

    fn detach(&mut self, node: &Line) {
        self.lines.retain(|l| l.text != node.text);
    }

    fn append<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Line>)
    where
        Line: 'a,
    {
        for node in nodes {
            self.lines.retain(|l| l.text != node.text);
            self.lines.push(node.clone());
        }
    }

    fn measure(&self, node: &Line) -> u32 {
        let chars = node.text.chars().count() as u32;
        node.height * chars.div_ceil(self.width.max(1)).max(1)
    }

    fn subscribe(&mut self, event: SurfaceEvent) -> SurfaceEvent {
        self.listeners += 1;
        event
    }

    fn unsubscribe(&mut self, _: SurfaceEvent) {
        self.listeners -= 1;
    }
}

fn render(row: &Row) -> RenderResult<Line> {
    if row.text.is_empty() {
        return Err(RenderFailure::new("empty row"));
    }
    Ok(Line {
        text: row.text.clone(),
        height: 50,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rows: Vec<Row> = (0..10_000)
        .map(|id| Row {
            id,
            text: format!("row {id}"),
        })
        .collect();

    let surface = TextSurface {
        width: 80,
        height: 500,
        ..TextSurface::default()
    };
    let options = VirtualListOptions::new(50, rows, render).with_buffer(5);
    let mut list = VirtualList::new(options, surface)?;
    println!("initial window={:?} attached={}", list.window(), list.surface().lines.len());

    list.surface_mut().scroll = 5000;
    let outcome = list.on_scroll()?;
    println!("after scroll: window={:?} outcome={outcome:?}", list.window());
    println!("spacing={:?} total={}", list.spacing(), list.total_height());

    // Same offset again: nothing to do.
    println!("repeat: {:?}", list.on_scroll()?);

    list.surface_mut().height = 250;
    list.surface_mut().width = 4;
    list.on_resize()?;
    println!(
        "after resize: window={:?} cached={}",
        list.window(),
        list.measurement_cache_len()
    );

    list.update_items(vec![Row {
        id: 0,
        text: "only row".to_string(),
    }])?;
    println!("after update: {:?}", list.state());

    list.dispose();
    println!("listeners after dispose={}", list.surface().listeners);
    Ok(())
}
