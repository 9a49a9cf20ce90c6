use alloc::vec::Vec;

use pagewindow::{
    ConfigError, Edge, EdgeObservation, FetchOutcome, FetchRequest, ItemObservation, Page,
    Rejected, ScrollAdjustment, SourceError, WindowEngine, WindowOptions,
};

use crate::{PageSource, RenderSurface};

/// A framework-neutral controller that wraps a `pagewindow::WindowEngine` and keeps a
/// [`RenderSurface`] in sync with it.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `start` once, then `on_edge_observation` whenever a sentinel's visibility changes
/// - `scroll_by_user` (or `on_scroll`) when the user scrolls
/// - `on_item_observation` while the user scrolls, so an anchor page is tracked
/// - `remeasure` after layout changes
/// - `tick(surface, now_ms)` once per frame, before painting
///
/// Fetches go through a synchronous [`PageSource`]. For asynchronous sources, take the
/// `FetchRequest` from `engine_mut()` and hand the result to `complete` when it arrives.
#[derive(Clone, Debug)]
pub struct Controller<P: Page> {
    engine: WindowEngine<P>,
}

impl<P: Page> Controller<P> {
    pub fn new(options: WindowOptions<P::Id>) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: WindowEngine::new(options)?,
        })
    }

    pub fn from_engine(engine: WindowEngine<P>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &WindowEngine<P> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut WindowEngine<P> {
        &mut self.engine
    }

    pub fn into_engine(self) -> WindowEngine<P> {
        self.engine
    }

    /// Loads the first page toward the configured start direction.
    pub fn start(
        &mut self,
        source: &mut impl PageSource<P>,
        surface: &mut impl RenderSurface<P>,
    ) -> Result<FetchOutcome<P, P::Id>, Rejected> {
        let request = self.engine.start()?;
        Ok(self.fulfil(request, source, surface))
    }

    /// Feeds a sentinel observation and loads a page if that edge was reached.
    pub fn on_edge_observation(
        &mut self,
        obs: EdgeObservation,
        source: &mut impl PageSource<P>,
        surface: &mut impl RenderSurface<P>,
    ) -> Option<FetchOutcome<P, P::Id>> {
        let request = self.engine.on_edge_observation(obs)?;
        Some(self.fulfil(request, source, surface))
    }

    /// Manual "load older" trigger.
    pub fn add_page_before(
        &mut self,
        source: &mut impl PageSource<P>,
        surface: &mut impl RenderSurface<P>,
    ) -> Result<FetchOutcome<P, P::Id>, Rejected> {
        let request = self.engine.add_page_before()?;
        Ok(self.fulfil(request, source, surface))
    }

    /// Manual "load newer" trigger.
    pub fn add_page_after(
        &mut self,
        source: &mut impl PageSource<P>,
        surface: &mut impl RenderSurface<P>,
    ) -> Result<FetchOutcome<P, P::Id>, Rejected> {
        let request = self.engine.add_page_after()?;
        Ok(self.fulfil(request, source, surface))
    }

    /// Runs `request` against `source` and applies the result.
    pub fn fulfil(
        &mut self,
        request: FetchRequest<P::Id>,
        source: &mut impl PageSource<P>,
        surface: &mut impl RenderSurface<P>,
    ) -> FetchOutcome<P, P::Id> {
        atrace!(edge = ?request.edge, cursor = ?request.cursor, "Controller::fulfil");
        let result = source.fetch(request.edge, self.engine.buffer().boundary(request.edge));
        self.complete(request.edge, result, surface)
    }

    /// Applies a fetch result to the engine and mirrors the window change on `surface`:
    /// the evicted page is unmounted, the new one mounted and measured.
    pub fn complete(
        &mut self,
        edge: Edge,
        result: Result<Option<P>, SourceError>,
        surface: &mut impl RenderSurface<P>,
    ) -> FetchOutcome<P, P::Id> {
        let pin = self.engine.is_pin_pending();
        let outcome = self.engine.complete_fetch(edge, result);
        if let FetchOutcome::Inserted { edge, id, evicted } = &outcome {
            if let Some(evicted) = evicted {
                surface.unmount(&evicted.id());
            }
            if let Some(mounted) = self.engine.buffer().get(id) {
                surface.mount(mounted.page(), edge.placement());
            }
            match surface.measure(id) {
                Some(height) => {
                    self.engine.on_page_measured(id, height);
                }
                None => {
                    awarn!(id = ?id, "Controller: page mounted without a layout height");
                }
            }
            if pin {
                surface.pin_to_end();
            }
        }
        outcome
    }

    /// Applies a user scroll through the scroll gate.
    ///
    /// Returns `false` (and leaves the surface untouched) when scrolling toward a sentinel is
    /// paused.
    pub fn scroll_by_user(
        &mut self,
        delta: i64,
        surface: &mut impl RenderSurface<P>,
        now_ms: u64,
    ) -> bool {
        if !self.engine.allows_scroll_delta(delta) {
            atrace!(delta, "Controller: scroll blocked by the gate");
            return false;
        }
        surface.scroll_by(delta);
        self.engine.on_scroll(surface.scroll_offset(), now_ms);
        true
    }

    /// Call this when the UI reports a scroll offset change it performed itself (wheel, drag).
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) {
        self.engine.on_scroll(scroll_offset, now_ms);
    }

    /// Records a viewport resize; anchor selection is active as during a user scroll.
    pub fn on_viewport_resized(&mut self, now_ms: u64) {
        self.engine.on_viewport_resized(now_ms);
    }

    /// Feeds a page visibility sample for anchor selection.
    pub fn on_item_observation(&mut self, obs: &ItemObservation<P::Id>, now_ms: u64) {
        self.engine.on_item_observation(obs, now_ms);
    }

    /// Reports where the anchor page's top is now; queues the correcting delta.
    pub fn on_anchor_moved(&mut self, new_top: i64) -> Option<i64> {
        self.engine.on_anchor_moved(new_top)
    }

    /// Re-measures every mounted page and reports changed heights.
    ///
    /// When an already laid out page changed size, the anchor's new position is read from
    /// `surface` and corrected for at the next `tick`. Returns the number of pages whose height
    /// changed.
    pub fn remeasure(&mut self, surface: &mut impl RenderSurface<P>) -> usize {
        let ids: Vec<P::Id> = self.engine.iter_window().map(Page::id).collect();
        let mut changed = 0;
        let mut resized = false;
        for id in ids {
            let Some(height) = surface.measure(&id) else {
                continue;
            };
            let previous = self.engine.buffer().height(&id);
            if previous != Some(height) {
                // First layouts are settled by the insert compensation instead.
                resized |= previous.is_some();
                self.engine.on_page_measured(&id, height);
                changed += 1;
            }
        }

        if resized {
            let top = self
                .engine
                .anchor()
                .and_then(|anchor| surface.page_top(&anchor.id));
            if let Some(top) = top {
                self.engine.on_anchor_moved(top);
            }
        }
        changed
    }

    /// Applies this frame's coalesced scroll correction to `surface`.
    pub fn tick(
        &mut self,
        surface: &mut impl RenderSurface<P>,
        now_ms: u64,
    ) -> Option<ScrollAdjustment> {
        self.engine.sync_scroll_offset(surface.scroll_offset());
        let adjustment = self.engine.take_frame(now_ms)?;
        surface.scroll_by(adjustment.delta);
        Some(adjustment)
    }

    /// Replaces the engine options, unmounting pages trimmed by a smaller buffer.
    pub fn configure(
        &mut self,
        options: WindowOptions<P::Id>,
        surface: &mut impl RenderSurface<P>,
    ) -> Result<(), ConfigError> {
        for page in self.engine.configure(options)? {
            surface.unmount(&page.id());
        }
        Ok(())
    }

    /// Empties the window and unmounts everything.
    pub fn reset(&mut self, surface: &mut impl RenderSurface<P>) {
        for page in self.engine.reset() {
            surface.unmount(&page.id());
        }
    }
}
