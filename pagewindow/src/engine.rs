use alloc::vec::Vec;

use crate::buffer::{MountedPage, PageBuffer};
use crate::coordinator::{Completion, FetchCoordinator, Trigger};
use crate::{
    Anchor, AnchorTracker, ConfigError, Diagnostic, DirectionState, Edge,
    EdgeObservation, EdgeProximity, FetchRequest, ItemObservation, Page, Rejected,
    ScrollAdjustment, ScrollReconciler, SourceError, StartDirection, WindowEvent, WindowOptions,
    WindowState,
};

/// What `complete_fetch` did with a fetch result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome<P, K> {
    /// The page was inserted at `edge`. `evicted` (if any) left the opposite end and should be
    /// unmounted by the host.
    Inserted {
        edge: Edge,
        id: K,
        evicted: Option<P>,
    },
    /// The source had no page; `edge` is now exhausted.
    Exhausted(Edge),
    /// The page reused an id already in the window and was discarded.
    Duplicate { edge: Edge, id: K },
    /// The source failed; `edge` is idle again.
    Failed(Edge),
    /// No fetch was in flight for `edge`; nothing changed.
    Ignored(Edge),
}

/// A headless, bidirectional paging engine.
///
/// The engine keeps a bounded window of pages, decides when to fetch more at either end, and
/// computes the scroll corrections that keep visible content still while pages come and go.
/// It holds no UI objects and performs no I/O; the host drives it:
///
/// - feed edge-sentinel observations (`on_edge_observation`) and fulfil the returned
///   [`FetchRequest`]s through `complete_fetch`, in any order and at any later time;
/// - report rendered heights (`on_page_measured`) and user scrolls (`on_scroll`);
/// - once per frame, apply the coalesced scroll delta returned by `take_frame`.
///
/// For a driver that wires page sources and render surfaces together, see the
/// `pagewindow-adapter` crate.
#[derive(Clone, Debug)]
pub struct WindowEngine<P: Page> {
    options: WindowOptions<P::Id>,
    buffer: PageBuffer<P>,
    proximity: EdgeProximity,
    coordinator: FetchCoordinator,
    reconciler: ScrollReconciler<P::Id>,
    anchors: AnchorTracker<P::Id>,
    pin_pending: bool,
}

impl<P: Page> WindowEngine<P> {
    pub fn new(options: WindowOptions<P::Id>) -> Result<Self, ConfigError> {
        options.validate()?;
        pdebug!(
            max_page_buffer = options.max_page_buffer,
            paging_enabled = options.paging_enabled,
            start_direction = ?options.start_direction,
            "WindowEngine::new"
        );
        let mut proximity = EdgeProximity::new(options.trigger_ratio, options.pause_ratio);
        proximity.set_gate_enabled(options.scroll_gate_enabled);
        Ok(Self {
            buffer: PageBuffer::new(options.max_page_buffer),
            proximity,
            coordinator: FetchCoordinator::new(),
            reconciler: ScrollReconciler::new(0),
            anchors: AnchorTracker::new(
                options.anchor_selection_window_ms,
                options.anchor_suspend_ms,
            ),
            pin_pending: false,
            options,
        })
    }

    pub fn options(&self) -> &WindowOptions<P::Id> {
        &self.options
    }

    /// Replaces the options.
    ///
    /// Shrinking `max_page_buffer` evicts pages from the end opposite to the start direction;
    /// they are returned (top to bottom) so the host can unmount them. Invalid options are
    /// rejected and the previous ones stay in effect.
    pub fn configure(&mut self, options: WindowOptions<P::Id>) -> Result<Vec<P>, ConfigError> {
        options.validate()?;
        let prev_max = self.options.max_page_buffer;
        self.options = options;
        ptrace!(options = ?self.options, "WindowEngine::configure");

        self.proximity
            .set_thresholds(self.options.trigger_ratio, self.options.pause_ratio);
        self.proximity
            .set_gate_enabled(self.options.scroll_gate_enabled);
        self.anchors.set_timing(
            self.options.anchor_selection_window_ms,
            self.options.anchor_suspend_ms,
        );

        if self.options.max_page_buffer == prev_max {
            return Ok(Vec::new());
        }
        let kept = self.options.start_direction.kept_edge();
        let evicted = self
            .buffer
            .set_max_len(self.options.max_page_buffer, kept);
        Ok(self.retire_all(kept.opposite(), evicted))
    }

    /// Clones the current options, applies `f`, then delegates to `configure`.
    pub fn update_options(
        &mut self,
        f: impl FnOnce(&mut WindowOptions<P::Id>),
    ) -> Result<Vec<P>, ConfigError> {
        let mut next = self.options.clone();
        f(&mut next);
        self.configure(next)
    }

    pub fn set_paging_enabled(&mut self, enabled: bool) {
        self.options.paging_enabled = enabled;
    }

    /// Issues the initial fetch toward the configured start direction.
    ///
    /// For [`StartDirection::Bottom`], a [`WindowEvent::PinToEnd`] follows the first inserted
    /// page.
    pub fn start(&mut self) -> Result<FetchRequest<P::Id>, Rejected> {
        let start = self.options.start_direction;
        let request = self.request(start.fetch_edge(), Trigger::Manual)?;
        if start == StartDirection::Bottom && self.buffer.is_empty() {
            self.pin_pending = true;
        }
        Ok(request)
    }

    /// Feeds an edge-sentinel observation. Returns a fetch request when the edge was reached
    /// and the direction accepted it.
    pub fn on_edge_observation(&mut self, obs: EdgeObservation) -> Option<FetchRequest<P::Id>> {
        let edge = self.proximity.observe(obs)?;
        self.edge_reached(edge).ok()
    }

    /// Signals that `edge` was reached, for hosts that run their own proximity detection.
    pub fn edge_reached(&mut self, edge: Edge) -> Result<FetchRequest<P::Id>, Rejected> {
        self.request(edge, Trigger::Edge)
    }

    /// Requests the page before the current head, bypassing edge detection, `paging_enabled`
    /// and exhaustion.
    pub fn add_page_before(&mut self) -> Result<FetchRequest<P::Id>, Rejected> {
        self.request(Edge::Top, Trigger::Manual)
    }

    /// Requests the page after the current tail, bypassing edge detection, `paging_enabled`
    /// and exhaustion.
    pub fn add_page_after(&mut self) -> Result<FetchRequest<P::Id>, Rejected> {
        self.request(Edge::Bottom, Trigger::Manual)
    }

    fn request(&mut self, edge: Edge, trigger: Trigger) -> Result<FetchRequest<P::Id>, Rejected> {
        self.coordinator
            .begin(edge, trigger, self.options.paging_enabled)?;
        Ok(FetchRequest {
            edge,
            cursor: self.buffer.boundary(edge).map(Page::id),
        })
    }

    /// Applies the result of the fetch in flight for `edge`.
    ///
    /// A page is inserted relative to the *current* boundary, whatever happened to the window
    /// since the request was issued. Failures never propagate: they become state transitions
    /// and [`WindowEvent`]s.
    pub fn complete_fetch(
        &mut self,
        edge: Edge,
        result: Result<Option<P>, SourceError>,
    ) -> FetchOutcome<P, P::Id> {
        if !self.coordinator.is_fetching(edge) {
            pwarn!(edge = ?edge, "WindowEngine: completion without a fetch in flight");
            self.emit(WindowEvent::Diagnostic(Diagnostic::UnexpectedCompletion {
                edge,
            }));
            return FetchOutcome::Ignored(edge);
        }

        let page = match result {
            Ok(Some(page)) => page,
            Ok(None) => {
                self.coordinator.complete(edge, Completion::Exhausted);
                pdebug!(edge = ?edge, "WindowEngine: direction exhausted");
                self.emit(WindowEvent::DirectionExhausted(edge));
                return FetchOutcome::Exhausted(edge);
            }
            Err(error) => {
                self.coordinator.complete(edge, Completion::Settled);
                pwarn!(edge = ?edge, error = %error, "WindowEngine: fetch failed");
                self.emit(WindowEvent::FetchFailed { edge, error });
                return FetchOutcome::Failed(edge);
            }
        };
        self.coordinator.complete(edge, Completion::Settled);

        let id = page.id();
        let compensate = !self.buffer.is_empty();
        let evicted = match self.buffer.insert(page, edge) {
            Ok(evicted) => evicted,
            Err(error) => {
                pwarn!(edge = ?edge, id = ?id, "WindowEngine: duplicate page discarded");
                self.emit(WindowEvent::DuplicatePage { edge, error });
                return FetchOutcome::Duplicate { edge, id };
            }
        };

        self.reconciler.on_insert(edge, id.clone(), compensate);
        self.proximity.release(edge);
        let evicted_id = evicted.as_ref().map(|m| m.page().id());
        if let Some(m) = &evicted {
            self.retire(edge.opposite(), m);
        }
        pdebug!(
            edge = ?edge,
            id = ?id,
            evicted = ?evicted_id,
            len = self.buffer.len(),
            "WindowEngine: page inserted"
        );

        self.emit(WindowEvent::WindowChanged {
            edge,
            inserted: id.clone(),
            evicted: evicted_id,
        });
        if self.pin_pending {
            self.pin_pending = false;
            self.emit(WindowEvent::PinToEnd);
        }

        FetchOutcome::Inserted {
            edge,
            id,
            evicted: evicted.map(MountedPage::into_page),
        }
    }

    /// Reports the rendered height of a mounted page (first layout or a later resize).
    ///
    /// The first report of a page inserted at the top queues its `+height` compensation.
    /// Returns `false` if the page is not mounted.
    pub fn on_page_measured(&mut self, id: &P::Id, height: u32) -> bool {
        if self.buffer.set_height(id, height).is_none() {
            pwarn!(id = ?id, height, "WindowEngine: measurement for an unmounted page");
            self.emit(WindowEvent::Diagnostic(Diagnostic::UnknownMeasurement {
                id: id.clone(),
                height,
            }));
            return false;
        }
        self.reconciler.on_measured(id, height);
        true
    }

    /// Records a user-driven scroll and opens the anchor selection window.
    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) {
        ptrace!(offset, now_ms, "WindowEngine::on_scroll");
        self.reconciler.set_scroll_offset(offset);
        self.anchors.on_user_scroll(now_ms);
    }

    /// Records the host's current scroll offset without treating it as user input.
    pub fn sync_scroll_offset(&mut self, offset: u64) {
        self.reconciler.set_scroll_offset(offset);
    }

    /// Records a viewport resize; anchor selection is active as during a user scroll.
    pub fn on_viewport_resized(&mut self, now_ms: u64) {
        self.anchors.on_user_scroll(now_ms);
    }

    /// Feeds an item observation for anchor selection.
    pub fn on_item_observation(&mut self, obs: &ItemObservation<P::Id>, now_ms: u64) {
        if self.anchors.observe(obs, now_ms) {
            ptrace!(id = ?obs.id, "WindowEngine: anchor changed");
            self.emit(WindowEvent::AnchorChanged {
                anchor: Some(obs.id.clone()),
            });
        }
    }

    /// The anchor's top (relative to the viewport top) is now `new_top` after its content
    /// resized. Queues and returns the correcting delta.
    pub fn on_anchor_moved(&mut self, new_top: i64) -> Option<i64> {
        let delta = self.anchors.on_anchor_moved(new_top)?;
        pdebug!(delta, "WindowEngine: anchor correction");
        self.reconciler.queue(delta);
        Some(delta)
    }

    pub fn clear_anchor(&mut self) {
        if self.anchors.anchor().is_some() {
            self.anchors.clear();
            self.emit(WindowEvent::AnchorChanged { anchor: None });
        }
    }

    /// Drains the coalesced scroll delta for the next frame.
    ///
    /// The host must apply the returned delta relatively (`scroll_by`) before painting. Anchor
    /// selection is suspended briefly afterwards.
    pub fn take_frame(&mut self, now_ms: u64) -> Option<ScrollAdjustment> {
        let adjustment = self.reconciler.take_frame()?;
        self.anchors.on_programmatic_scroll(now_ms);
        Some(adjustment)
    }

    /// Empties the window and returns every state machine to its initial state.
    ///
    /// Returns the removed pages, top to bottom.
    pub fn reset(&mut self) -> Vec<P> {
        let removed = self.buffer.clear();
        self.coordinator = FetchCoordinator::new();
        self.proximity.reset();
        self.reconciler.reset(0);
        self.anchors.clear();
        self.pin_pending = false;
        let ids: Vec<P::Id> = removed.iter().map(|m| m.page().id()).collect();
        if !ids.is_empty() {
            self.emit(WindowEvent::WindowTrimmed { evicted: ids });
        }
        removed.into_iter().map(MountedPage::into_page).collect()
    }

    /// Whether the next inserted page will be followed by [`WindowEvent::PinToEnd`].
    pub fn is_pin_pending(&self) -> bool {
        self.pin_pending
    }

    pub fn reset_exhaustion(&mut self, edge: Edge) -> bool {
        self.coordinator.reset_exhaustion(edge)
    }

    pub fn direction_state(&self, edge: Edge) -> DirectionState {
        self.coordinator.state(edge)
    }

    pub fn is_fetching(&self, edge: Edge) -> bool {
        self.coordinator.is_fetching(edge)
    }

    pub fn is_exhausted(&self, edge: Edge) -> bool {
        self.coordinator.is_exhausted(edge)
    }

    pub fn buffer(&self) -> &PageBuffer<P> {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Read-only snapshot of the window, top to bottom.
    pub fn current_window(&self) -> Vec<&P> {
        self.buffer.pages().collect()
    }

    pub fn iter_window(&self) -> impl Iterator<Item = &P> + '_ {
        self.buffer.pages()
    }

    pub fn proximity(&self) -> &EdgeProximity {
        &self.proximity
    }

    pub fn can_scroll_up(&self) -> bool {
        self.proximity.can_scroll_up()
    }

    pub fn can_scroll_down(&self) -> bool {
        self.proximity.can_scroll_down()
    }

    /// Whether a scroll input of `delta` (negative = toward the top) passes the scroll gate.
    pub fn allows_scroll_delta(&self, delta: i64) -> bool {
        self.proximity.allows_scroll_delta(delta)
    }

    pub fn anchor(&self) -> Option<&Anchor<P::Id>> {
        self.anchors.anchor()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.reconciler.scroll_offset()
    }

    pub fn pending_delta(&self) -> i64 {
        self.reconciler.pending_delta()
    }

    pub fn bottom_slack(&self) -> u64 {
        self.reconciler.bottom_slack()
    }

    pub fn state(&self) -> WindowState<P::Id> {
        WindowState {
            len: self.buffer.len(),
            max_page_buffer: self.buffer.max_len(),
            head: self.buffer.head().map(Page::id),
            tail: self.buffer.tail().map(Page::id),
            top: self.coordinator.state(Edge::Top),
            bottom: self.coordinator.state(Edge::Bottom),
            can_scroll_up: self.can_scroll_up(),
            can_scroll_down: self.can_scroll_down(),
            scroll_offset: self.reconciler.scroll_offset(),
            pending_delta: self.reconciler.pending_delta(),
            bottom_slack: self.reconciler.bottom_slack(),
            anchor: self.anchors.anchor().cloned(),
        }
    }

    fn retire(&mut self, from: Edge, evicted: &MountedPage<P>) {
        let id = evicted.page().id();
        if let Some(diagnostic) = self.reconciler.on_evict(from, &id, evicted.height()) {
            self.emit(WindowEvent::Diagnostic(diagnostic));
        }
        if self.anchors.forget(&id) {
            self.emit(WindowEvent::AnchorChanged { anchor: None });
        }
    }

    fn retire_all(&mut self, from: Edge, evicted: Vec<MountedPage<P>>) -> Vec<P> {
        if evicted.is_empty() {
            return Vec::new();
        }
        let mut ids = Vec::with_capacity(evicted.len());
        for m in &evicted {
            self.retire(from, m);
            ids.push(m.page().id());
        }
        // Pages were popped nearest-to-the-end first; report them top to bottom.
        if from == Edge::Bottom {
            ids.reverse();
        }
        pdebug!(count = ids.len(), "WindowEngine: window trimmed");
        self.emit(WindowEvent::WindowTrimmed { evicted: ids });

        let mut pages: Vec<P> = evicted.into_iter().map(MountedPage::into_page).collect();
        if from == Edge::Bottom {
            pages.reverse();
        }
        pages
    }

    fn emit(&self, event: WindowEvent<P::Id>) {
        if let Some(cb) = &self.options.on_event {
            cb(&event);
        }
    }
}

