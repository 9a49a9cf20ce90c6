// Example: the scroll corrections produced when pages enter above the viewport or are evicted
// from the top.
use pagewindow::{Edge, Page, WindowEngine, WindowOptions};

#[derive(Clone, Debug)]
struct Block {
    id: i64,
    height: u32,
}

impl Page for Block {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

fn main() {
    let mut engine = WindowEngine::new(WindowOptions::new().with_max_page_buffer(2))
        .expect("valid options");

    let block = |id: i64| Block {
        id,
        height: 200 + (id.unsigned_abs() as u32) * 25,
    };

    let fetch = |engine: &mut WindowEngine<Block>, edge: Edge, id: i64, now_ms: u64| {
        let req = match edge {
            Edge::Top => engine.add_page_before(),
            Edge::Bottom => engine.add_page_after(),
        }
        .expect("one fetch at a time");
        engine.complete_fetch(req.edge, Ok(Some(block(id))));
        // After layout, the host reports the rendered height.
        engine.on_page_measured(&id, block(id).height);
        match engine.take_frame(now_ms) {
            Some(adj) => println!(
                "{edge:?} insert of {id}: scroll_by({}) {} -> {}",
                adj.delta, adj.frame.before, adj.frame.after
            ),
            None => println!("{edge:?} insert of {id}: no correction"),
        }
    };

    fetch(&mut engine, Edge::Bottom, 0, 0);
    engine.on_scroll(120, 1);
    fetch(&mut engine, Edge::Top, -1, 16);
    fetch(&mut engine, Edge::Top, -2, 32);
    println!("bottom slack: {}", engine.bottom_slack());
    fetch(&mut engine, Edge::Bottom, 1, 48);
    println!("bottom slack: {}", engine.bottom_slack());
}
