use core::fmt;

use crate::key::KeyMap;
use crate::{Diagnostic, Edge, PageKey};

/// The scroll offset before and after a reconciliation was applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollFrame {
    pub before: u64,
    pub after: u64,
}

impl ScrollFrame {
    pub fn delta(&self) -> i64 {
        let delta = self.after as i128 - self.before as i128;
        delta.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }
}

/// One coalesced scroll write for the next frame.
///
/// Hosts apply `delta` as a *relative* scroll (`scroll_by`), which tolerates user scrolling
/// between the mutation and the write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAdjustment {
    pub delta: i64,
    pub frame: ScrollFrame,
}

/// Computes the scroll deltas that keep visible content stationary across window mutations.
///
/// - A page inserted at the top owes `+height` once its height is first reported.
/// - A page evicted from the top owes `-height` immediately.
/// - A page evicted from the bottom owes nothing; its height is credited to `bottom_slack`,
///   which later bottom inserts consume.
/// - Bottom inserts owe nothing.
///
/// Deltas accumulate until [`Self::take_frame`], so several mutations in one tick produce one
/// scroll write.
#[derive(Clone, Debug)]
pub struct ScrollReconciler<K> {
    scroll_offset: u64,
    pending: i64,
    bottom_slack: u64,
    awaiting: KeyMap<K, Edge>,
}

impl<K: PageKey + Clone + fmt::Debug> Default for ScrollReconciler<K> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<K: PageKey + Clone + fmt::Debug> ScrollReconciler<K> {
    pub fn new(scroll_offset: u64) -> Self {
        Self {
            scroll_offset,
            pending: 0,
            bottom_slack: 0,
            awaiting: KeyMap::default(),
        }
    }

    /// The engine's belief about the current scroll offset.
    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Records a scroll offset reported by the host (user scroll). Pending deltas are relative
    /// and stay valid.
    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.scroll_offset = offset;
    }

    pub fn pending_delta(&self) -> i64 {
        self.pending
    }

    pub fn bottom_slack(&self) -> u64 {
        self.bottom_slack
    }

    /// Whether `id` still owes a reconciliation that depends on its first measurement.
    pub fn is_awaiting(&self, id: &K) -> bool {
        self.awaiting.contains_key(id)
    }

    /// Queues an arbitrary relative correction (e.g. from anchoring).
    pub fn queue(&mut self, delta: i64) {
        self.pending = self.pending.saturating_add(delta);
    }

    /// Registers a freshly inserted, not yet measured page.
    ///
    /// `compensate` is `false` for the first page of an empty window: nothing is visible yet,
    /// so there is nothing to keep stationary.
    pub fn on_insert(&mut self, edge: Edge, id: K, compensate: bool) {
        if edge == Edge::Top && !compensate {
            return;
        }
        self.awaiting.insert(id, edge);
    }

    /// Settles the reconciliation owed by `id` on its first measurement. Returns `true` if
    /// something was owed.
    pub fn on_measured(&mut self, id: &K, height: u32) -> bool {
        let Some(edge) = self.awaiting.remove(id) else {
            return false;
        };
        match edge {
            Edge::Top => {
                pdebug!(height, "ScrollReconciler: top insert compensation");
                self.queue(height as i64);
            }
            Edge::Bottom => {
                let used = self.bottom_slack.min(height as u64);
                self.bottom_slack -= used;
            }
        }
        true
    }

    /// Reconciles the eviction of a page from `evicted_from`, given its last known height.
    ///
    /// Returns a diagnostic when the reconciliation had to be skipped.
    pub fn on_evict(
        &mut self,
        evicted_from: Edge,
        id: &K,
        height: Option<u32>,
    ) -> Option<Diagnostic<K>> {
        let owed = self.awaiting.remove(id);
        if owed == Some(Edge::Top) {
            // Its +height was never applied, so removing it needs no correction either.
            pwarn!(id = ?id, "ScrollReconciler: page evicted before it was measured");
            return Some(Diagnostic::EvictedBeforeMeasured { id: id.clone() });
        }

        match (evicted_from, height) {
            (Edge::Top, Some(h)) => {
                pdebug!(height = h, "ScrollReconciler: head eviction compensation");
                self.queue(-(h as i64));
                None
            }
            (Edge::Top, None) => {
                pwarn!(id = ?id, "ScrollReconciler: unmeasured page evicted from the head");
                Some(Diagnostic::EvictedUnmeasured { id: id.clone() })
            }
            (Edge::Bottom, Some(h)) => {
                self.bottom_slack = self.bottom_slack.saturating_add(h as u64);
                None
            }
            (Edge::Bottom, None) => None,
        }
    }

    /// Drains the coalesced delta for the next frame.
    pub fn take_frame(&mut self) -> Option<ScrollAdjustment> {
        if self.pending == 0 {
            return None;
        }
        let delta = self.pending;
        let before = self.scroll_offset;
        let after = if delta > 0 {
            before.saturating_add(delta as u64)
        } else {
            before.saturating_sub(delta.unsigned_abs())
        };
        self.pending = 0;
        self.scroll_offset = after;
        ptrace!(delta, before, after, "ScrollReconciler::take_frame");
        Some(ScrollAdjustment {
            delta,
            frame: ScrollFrame { before, after },
        })
    }

    pub fn reset(&mut self, scroll_offset: u64) {
        self.scroll_offset = scroll_offset;
        self.pending = 0;
        self.bottom_slack = 0;
        self.awaiting.clear();
    }
}
