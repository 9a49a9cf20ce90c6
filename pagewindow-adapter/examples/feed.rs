// Example: a top-down feed with paging disabled, loaded only through explicit
// "load more" actions.
use pagewindow::{Page, Placement, WindowOptions};
use pagewindow_adapter::{Controller, Origin, RenderSurface, VecSource};

#[derive(Clone, Debug)]
struct Post {
    id: u64,
}

impl Page for Post {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Logs what a real renderer would do.
struct Log {
    offset: u64,
}

impl RenderSurface<Post> for Log {
    fn mount(&mut self, page: &Post, placement: Placement) {
        println!("mount {} ({placement:?})", page.id);
    }

    fn unmount(&mut self, id: &u64) {
        println!("unmount {id}");
    }

    fn measure(&mut self, _id: &u64) -> Option<u32> {
        Some(640)
    }

    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn scroll_by(&mut self, delta: i64) {
        self.offset = self.offset.saturating_add_signed(delta);
        println!("scroll_by({delta}) -> {}", self.offset);
    }
}

fn main() {
    let posts: Vec<Post> = (100..110).map(|id| Post { id }).collect();
    let mut source = VecSource::new(posts, Origin::At(5));
    let mut surface = Log { offset: 0 };
    let mut c = Controller::new(
        WindowOptions::new()
            .with_max_page_buffer(3)
            .with_paging_enabled(false),
    )
    .expect("valid options");

    c.start(&mut source, &mut surface).expect("first fetch");
    for now_ms in [16, 32, 48] {
        c.add_page_after(&mut source, &mut surface)
            .expect("nothing in flight");
        c.tick(&mut surface, now_ms);
    }
    c.add_page_before(&mut source, &mut surface)
        .expect("nothing in flight");
    c.tick(&mut surface, 64);

    println!("state: {:?}", c.engine().state());
}
