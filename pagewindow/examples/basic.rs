// Example: drive the engine by hand with an in-memory list of pages.
use pagewindow::{Edge, EdgeObservation, FetchOutcome, Page, WindowEngine, WindowOptions};

#[derive(Clone, Debug)]
struct Chunk {
    id: u64,
}

impl Page for Chunk {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

fn load(edge: Edge, cursor: Option<u64>) -> Option<Chunk> {
    // Pages 0..20, starting from 0.
    let next = match (edge, cursor) {
        (Edge::Bottom, None) => Some(0),
        (Edge::Bottom, Some(tail)) => Some(tail + 1),
        (Edge::Top, None) => None,
        (Edge::Top, Some(head)) => head.checked_sub(1),
    };
    next.filter(|&id| id < 20).map(|id| Chunk { id })
}

fn main() {
    let opts = WindowOptions::new()
        .with_max_page_buffer(3)
        .with_on_event(Some(|e: &pagewindow::WindowEvent<u64>| println!("event: {e:?}")));
    let mut engine = WindowEngine::new(opts).expect("valid options");

    let req = engine.start().expect("nothing in flight");
    engine.complete_fetch(req.edge, Ok(load(req.edge, req.cursor)));

    // The bottom sentinel keeps coming into view.
    for seq in 1..=5 {
        let obs = EdgeObservation::new(Edge::Bottom, seq, 0.3);
        let Some(req) = engine.on_edge_observation(obs) else {
            continue;
        };
        if let FetchOutcome::Inserted { evicted, .. } =
            engine.complete_fetch(req.edge, Ok(load(req.edge, req.cursor)))
        {
            println!("evicted: {evicted:?}");
        }
    }

    let window: Vec<u64> = engine.iter_window().map(|c| c.id).collect();
    println!("window={window:?}");
    println!("state={:?}", engine.state());
}
