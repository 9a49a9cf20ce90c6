use crate::ItemObservation;

/// The item straddling the viewport's top edge, and where its top was when it was selected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Anchor<K> {
    pub id: K,
    /// The anchor's top, in viewport coordinates, at selection time.
    pub top: i64,
}

/// Tracks the anchor item used to keep the view stable when content above changes height.
///
/// Selection only happens while a user-driven scroll or resize is in progress (a short window
/// after each such event), and is suspended briefly after every programmatic scroll so the
/// engine's own corrections do not re-select.
#[derive(Clone, Debug)]
pub struct AnchorTracker<K> {
    anchor: Option<Anchor<K>>,
    selection_window_ms: u64,
    suspend_ms: u64,
    selecting_until: Option<u64>,
    suspended_until: Option<u64>,
    /// Last reported top whose correction is queued but not yet applied.
    moved_to: Option<i64>,
}

impl<K: Clone + PartialEq> AnchorTracker<K> {
    pub fn new(selection_window_ms: u64, suspend_ms: u64) -> Self {
        Self {
            anchor: None,
            selection_window_ms,
            suspend_ms,
            selecting_until: None,
            suspended_until: None,
            moved_to: None,
        }
    }

    pub fn set_timing(&mut self, selection_window_ms: u64, suspend_ms: u64) {
        self.selection_window_ms = selection_window_ms;
        self.suspend_ms = suspend_ms;
    }

    pub fn anchor(&self) -> Option<&Anchor<K>> {
        self.anchor.as_ref()
    }

    /// Opens (or extends) the selection window after a user scroll or a viewport resize.
    pub fn on_user_scroll(&mut self, now_ms: u64) {
        self.selecting_until = Some(now_ms.saturating_add(self.selection_window_ms));
    }

    /// Records an applied programmatic scroll. Queued anchor corrections are now in effect, so
    /// the anchor sits at its selected top again.
    pub fn on_programmatic_scroll(&mut self, now_ms: u64) {
        self.suspended_until = Some(now_ms.saturating_add(self.suspend_ms));
        self.moved_to = None;
    }

    pub fn is_selecting(&self, now_ms: u64) -> bool {
        let open = self.selecting_until.is_some_and(|until| now_ms < until);
        let suspended = self.suspended_until.is_some_and(|until| now_ms < until);
        open && !suspended
    }

    /// Feeds an item observation. Returns `true` when the anchor changed to a different item.
    pub fn observe(&mut self, obs: &ItemObservation<K>, now_ms: u64) -> bool {
        if !self.is_selecting(now_ms) {
            return false;
        }
        if obs.ratio <= 0.0 || !obs.bounds.straddles(obs.viewport_top) {
            return false;
        }

        let top = obs.bounds.top.saturating_sub(obs.viewport_top);
        let changed = self.anchor.as_ref().is_none_or(|a| a.id != obs.id);
        self.anchor = Some(Anchor {
            id: obs.id.clone(),
            top,
        });
        self.moved_to = None;
        changed
    }

    /// The anchor's top moved to `new_top` (viewport coordinates, relative to the viewport top)
    /// because content changed size. Returns the scroll delta that puts it back.
    ///
    /// Several moves before the next programmatic scroll only owe the movement since the
    /// previous report.
    pub fn on_anchor_moved(&mut self, new_top: i64) -> Option<i64> {
        let anchor = self.anchor.as_ref()?;
        let baseline = self.moved_to.unwrap_or(anchor.top);
        let delta = new_top.saturating_sub(baseline);
        if delta == 0 {
            return None;
        }
        self.moved_to = Some(new_top);
        Some(delta)
    }

    /// Drops the anchor if it is `id`. Returns `true` if it was.
    pub fn forget(&mut self, id: &K) -> bool {
        if self.anchor.as_ref().is_some_and(|a| a.id == *id) {
            self.anchor = None;
            self.moved_to = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.moved_to = None;
    }
}
