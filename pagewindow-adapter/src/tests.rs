use crate::*;

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use pagewindow::{
    Bounds, DirectionState, Edge, EdgeObservation, FetchOutcome, ItemObservation, Page,
    Placement, SourceError, StartDirection, WindowOptions,
};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Msg {
    id: u64,
    height: u32,
}

impl Page for Msg {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

fn feed(n: u64) -> Vec<Msg> {
    (0..n)
        .map(|id| Msg {
            id,
            height: 100 + id as u32 * 10,
        })
        .collect()
}

/// A scroll container that stacks mounted pages and lays them out instantly.
#[derive(Debug, Default)]
struct SimSurface {
    mounted: VecDeque<(u64, u32)>,
    offset: u64,
    viewport: u64,
}

impl SimSurface {
    fn new(viewport: u64) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    fn content_height(&self) -> u64 {
        self.mounted.iter().map(|&(_, h)| h as u64).sum()
    }

    fn max_offset(&self) -> u64 {
        self.content_height().saturating_sub(self.viewport)
    }

    fn ids(&self) -> Vec<u64> {
        self.mounted.iter().map(|&(id, _)| id).collect()
    }

    /// Top of `id` relative to the viewport top.
    fn viewport_top(&self, id: u64) -> Option<i64> {
        let mut top = 0u64;
        for &(m, h) in &self.mounted {
            if m == id {
                return Some(top as i64 - self.offset as i64);
            }
            top += h as u64;
        }
        None
    }

    fn resize(&mut self, id: u64, height: u32) {
        if let Some(entry) = self.mounted.iter_mut().find(|(m, _)| *m == id) {
            entry.1 = height;
        }
    }
}

impl RenderSurface<Msg> for SimSurface {
    fn mount(&mut self, page: &Msg, placement: Placement) {
        match placement {
            Placement::Before => self.mounted.push_front((page.id, page.height)),
            Placement::After => self.mounted.push_back((page.id, page.height)),
        }
    }

    fn unmount(&mut self, id: &u64) {
        self.mounted.retain(|&(m, _)| m != *id);
    }

    fn measure(&mut self, id: &u64) -> Option<u32> {
        self.mounted
            .iter()
            .find(|&&(m, _)| m == *id)
            .map(|&(_, h)| h)
    }

    fn page_top(&self, id: &u64) -> Option<i64> {
        self.viewport_top(*id)
    }

    fn scroll_offset(&self) -> u64 {
        self.offset
    }

    fn scroll_by(&mut self, delta: i64) {
        let next = if delta < 0 {
            self.offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.offset.saturating_add(delta as u64)
        };
        self.offset = next.min(self.max_offset());
    }

    fn pin_to_end(&mut self) {
        self.offset = self.max_offset();
    }
}

struct FailingSource;

impl PageSource<Msg> for FailingSource {
    fn page_before(&mut self, _head: Option<&Msg>) -> Result<Option<Msg>, SourceError> {
        Err(SourceError::new("timeout"))
    }

    fn page_after(&mut self, _tail: Option<&Msg>) -> Result<Option<Msg>, SourceError> {
        Err(SourceError::new("timeout"))
    }
}

#[test]
fn vec_source_walks_neighbours() {
    let pages = feed(4);
    let mut src = VecSource::from_start(pages.clone());
    assert_eq!(src.page_after(None).unwrap(), Some(pages[0].clone()));
    assert_eq!(src.page_before(None).unwrap(), None);
    assert_eq!(src.page_after(Some(&pages[3])).unwrap(), None);
    assert_eq!(src.page_before(Some(&pages[2])).unwrap(), Some(pages[1].clone()));

    let mut src = VecSource::from_end(pages.clone());
    assert_eq!(src.page_before(None).unwrap(), Some(pages[3].clone()));
    assert_eq!(src.page_after(None).unwrap(), None);

    let mut src = VecSource::new(pages.clone(), Origin::At(2));
    assert_eq!(src.fetch(Edge::Bottom, None).unwrap(), Some(pages[2].clone()));
    assert_eq!(src.fetch(Edge::Top, None).unwrap(), Some(pages[1].clone()));

    let stranger = Msg { id: 77, height: 1 };
    let err = src.page_after(Some(&stranger)).unwrap_err();
    assert_eq!(err.message(), "unknown cursor 77");
}

#[test]
fn bottom_eviction_keeps_visible_page_still() {
    let mut src = VecSource::from_start(feed(10));
    let mut surface = SimSurface::new(50);
    let mut c = Controller::new(WindowOptions::new().with_max_page_buffer(3)).unwrap();

    c.start(&mut src, &mut surface).unwrap();
    assert_eq!(c.tick(&mut surface, 0), None);
    for seq in 1..=2 {
        let obs = EdgeObservation::new(Edge::Bottom, seq, 0.5);
        assert!(c.on_edge_observation(obs, &mut src, &mut surface).is_some());
    }
    assert_eq!(surface.ids(), [0, 1, 2]);

    assert!(c.scroll_by_user(250, &mut surface, 10));
    let before = surface.viewport_top(2).unwrap();
    assert_eq!(before, -40);

    let obs = EdgeObservation::new(Edge::Bottom, 3, 0.5);
    let outcome = c.on_edge_observation(obs, &mut src, &mut surface).unwrap();
    assert!(matches!(
        outcome,
        FetchOutcome::Inserted {
            edge: Edge::Bottom,
            id: 3,
            evicted: Some(Msg { id: 0, .. })
        }
    ));
    assert_eq!(surface.ids(), [1, 2, 3]);

    let adj = c.tick(&mut surface, 20).unwrap();
    assert_eq!(adj.delta, -100);
    assert_eq!(surface.viewport_top(2), Some(before));
}

#[test]
fn chat_feed_starts_pinned_and_prepends_without_jumping() {
    let mut src = VecSource::from_end(feed(10));
    let mut surface = SimSurface::new(150);
    let mut c = Controller::new(
        WindowOptions::new()
            .with_max_page_buffer(4)
            .with_start_direction(StartDirection::Bottom),
    )
    .unwrap();

    c.start(&mut src, &mut surface).unwrap();
    assert_eq!(surface.ids(), [9]);
    assert_eq!(surface.scroll_offset(), 40);
    let before = surface.viewport_top(9).unwrap();

    let obs = EdgeObservation::new(Edge::Top, 1, 0.1);
    c.on_edge_observation(obs, &mut src, &mut surface).unwrap();
    assert_eq!(surface.ids(), [8, 9]);
    // Not yet corrected: the new page pushed everything down.
    assert_eq!(surface.viewport_top(9), Some(before + 180));

    let adj = c.tick(&mut surface, 5).unwrap();
    assert_eq!(adj.delta, 180);
    assert_eq!(surface.viewport_top(9), Some(before));
    assert_eq!(c.tick(&mut surface, 6), None);
}

#[test]
fn exhausted_top_keeps_gate_closed() {
    let mut src = VecSource::from_start(feed(3));
    let mut surface = SimSurface::new(50);
    let mut c = Controller::new(WindowOptions::new()).unwrap();
    c.start(&mut src, &mut surface).unwrap();

    let obs = EdgeObservation::new(Edge::Top, 1, 0.6);
    let outcome = c.on_edge_observation(obs, &mut src, &mut surface).unwrap();
    assert_eq!(outcome, FetchOutcome::Exhausted(Edge::Top));
    assert_eq!(c.engine().direction_state(Edge::Top), DirectionState::Exhausted);

    assert!(!c.scroll_by_user(-10, &mut surface, 1));
    assert!(c.scroll_by_user(10, &mut surface, 2));
    assert_eq!(surface.scroll_offset(), 10);

    let obs = EdgeObservation::new(Edge::Top, 2, 0.9);
    assert!(c.on_edge_observation(obs, &mut src, &mut surface).is_none());
}

#[test]
fn failed_fetch_mounts_nothing() {
    let mut surface = SimSurface::new(100);
    let mut c = Controller::<Msg>::new(WindowOptions::new()).unwrap();
    let outcome = c.start(&mut FailingSource, &mut surface).unwrap();
    assert_eq!(outcome, FetchOutcome::Failed(Edge::Bottom));
    assert!(surface.ids().is_empty());
    assert_eq!(c.engine().direction_state(Edge::Bottom), DirectionState::Idle);
}

#[test]
fn manual_triggers_work_with_paging_disabled() {
    let mut src = VecSource::new(feed(6), Origin::At(3));
    let mut surface = SimSurface::new(100);
    let mut c = Controller::new(WindowOptions::new().with_paging_enabled(false)).unwrap();

    c.start(&mut src, &mut surface).unwrap();
    let obs = EdgeObservation::new(Edge::Bottom, 1, 1.0);
    assert!(c.on_edge_observation(obs, &mut src, &mut surface).is_none());

    c.add_page_after(&mut src, &mut surface).unwrap();
    c.add_page_before(&mut src, &mut surface).unwrap();
    assert_eq!(surface.ids(), [2, 3, 4]);
    let window: Vec<u64> = c.engine().iter_window().map(|m| m.id).collect();
    assert_eq!(window, surface.ids());
}

#[test]
fn async_completion_goes_through_complete() {
    let mut surface = SimSurface::new(100);
    let mut c = Controller::new(WindowOptions::new()).unwrap();

    let request = c.engine_mut().add_page_after().unwrap();
    assert_eq!(request.cursor, None);
    let page = Msg { id: 5, height: 70 };
    let outcome = c.complete(request.edge, Ok(Some(page)), &mut surface);
    assert!(matches!(outcome, FetchOutcome::Inserted { id: 5, .. }));
    assert_eq!(surface.ids(), [5]);
    assert_eq!(c.engine().buffer().height(&5), Some(70));
}

#[test]
fn remeasure_reports_changed_heights() {
    let mut src = VecSource::from_start(feed(3));
    let mut surface = SimSurface::new(100);
    let mut c = Controller::new(WindowOptions::new()).unwrap();
    c.start(&mut src, &mut surface).unwrap();
    c.add_page_after(&mut src, &mut surface).unwrap();

    assert_eq!(c.remeasure(&mut surface), 0);
    surface.resize(1, 300);
    assert_eq!(c.remeasure(&mut surface), 1);
    assert_eq!(c.engine().buffer().height(&1), Some(300));
}

#[test]
fn growing_page_above_the_anchor_does_not_move_the_view() {
    let mut src = VecSource::from_start(feed(5));
    let mut surface = SimSurface::new(100);
    let mut c = Controller::new(WindowOptions::new()).unwrap();
    c.start(&mut src, &mut surface).unwrap();
    c.add_page_after(&mut src, &mut surface).unwrap();
    c.add_page_after(&mut src, &mut surface).unwrap();
    assert_eq!(c.tick(&mut surface, 0), None);

    assert!(c.scroll_by_user(150, &mut surface, 10));
    let before = surface.viewport_top(1).unwrap();
    assert_eq!(before, -50);
    c.on_item_observation(
        &ItemObservation {
            id: 1,
            ratio: 0.5,
            bounds: Bounds::new(before, before + 110),
            viewport_top: 0,
        },
        12,
    );
    assert_eq!(c.engine().anchor().map(|a| a.id), Some(1));

    // An image above the viewport finishes loading.
    surface.resize(0, 160);
    assert_eq!(surface.viewport_top(1), Some(before + 60));
    assert_eq!(c.remeasure(&mut surface), 1);

    let adj = c.tick(&mut surface, 16).unwrap();
    assert_eq!(adj.delta, 60);
    assert_eq!(surface.viewport_top(1), Some(before));

    // Growing again later is corrected from the restored position.
    surface.resize(0, 170);
    c.remeasure(&mut surface);
    assert_eq!(c.tick(&mut surface, 40).map(|a| a.delta), Some(10));
    assert_eq!(surface.viewport_top(1), Some(before));
}

#[test]
fn shrinking_the_window_unmounts_trimmed_pages() {
    let mut src = VecSource::from_start(feed(5));
    let mut surface = SimSurface::new(100);
    let mut c = Controller::new(WindowOptions::new()).unwrap();
    c.start(&mut src, &mut surface).unwrap();
    for _ in 0..3 {
        c.add_page_after(&mut src, &mut surface).unwrap();
    }
    assert_eq!(surface.ids(), [0, 1, 2, 3]);

    c.configure(WindowOptions::new().with_max_page_buffer(2), &mut surface)
        .unwrap();
    assert_eq!(surface.ids(), [0, 1]);

    c.reset(&mut surface);
    assert!(surface.ids().is_empty());
    assert!(c.engine().is_empty());
}
