// Example: a chat log that starts at the newest message and loads older history above it
// without moving what the reader is looking at.
use pagewindow::{Edge, EdgeObservation, Page, Placement, StartDirection, WindowOptions};
use pagewindow_adapter::{Controller, RenderSurface, VecSource};

#[derive(Clone, Debug)]
struct Batch {
    id: u32,
    lines: u32,
}

impl Page for Batch {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }
}

/// A terminal-like surface: heights are line counts.
#[derive(Default)]
struct Terminal {
    rows: u64,
    mounted: Vec<(u32, u32)>,
    offset: u64,
}

impl Terminal {
    fn content(&self) -> u64 {
        self.mounted.iter().map(|&(_, h)| h as u64).sum()
    }
}

impl RenderSurface<Batch> for Terminal {
    fn mount(&mut self, page: &Batch, placement: Placement) {
        match placement {
            Placement::Before => self.mounted.insert(0, (page.id, page.lines)),
            Placement::After => self.mounted.push((page.id, page.lines)),
        }
    }

    fn unmount(&mut self, id: &u32) {
        self.mounted.retain(|&(m, _)| m != *id);
    }

    fn measure(&mut self, id: &u32) -> Option<u32> {
        self.mounted.iter().find(|&&(m, _)| m == *id).map(|&(_, h)| h)
    }

    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn scroll_by(&mut self, delta: i64) {
        let max = self.content().saturating_sub(self.rows);
        self.offset = self.offset.saturating_add_signed(delta).min(max);
    }

    fn pin_to_end(&mut self) {
        self.offset = self.content().saturating_sub(self.rows);
    }
}

fn main() {
    let history: Vec<Batch> = (0..12)
        .map(|id| Batch {
            id,
            lines: 8 + id % 5,
        })
        .collect();
    let mut source = VecSource::from_end(history);
    let mut term = Terminal {
        rows: 24,
        ..Terminal::default()
    };

    let mut c = Controller::new(
        WindowOptions::new()
            .with_max_page_buffer(4)
            .with_start_direction(StartDirection::Bottom),
    )
    .expect("valid options");

    c.start(&mut source, &mut term).expect("first fetch");
    println!("pinned at offset {} of {}", term.offset, term.content());

    // The reader scrolls up; the top sentinel becomes visible each time.
    for (seq, now_ms) in (1..=6).zip((0..).step_by(16)) {
        c.scroll_by_user(-6, &mut term, now_ms);
        let obs = EdgeObservation::new(Edge::Top, seq, 0.1);
        c.on_edge_observation(obs, &mut source, &mut term);
        if let Some(adj) = c.tick(&mut term, now_ms) {
            println!("frame {seq}: scroll_by({})", adj.delta);
        }
        let ids: Vec<u32> = term.mounted.iter().map(|&(id, _)| id).collect();
        println!("frame {seq}: mounted={ids:?} offset={}", term.offset);
    }
    println!("top exhausted: {}", c.engine().is_exhausted(Edge::Top));
}
