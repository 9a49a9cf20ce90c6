use crate::{Anchor, DirectionState};

/// A serializable snapshot of the engine, for inspection panels and logs.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState<K> {
    pub len: usize,
    pub max_page_buffer: usize,
    pub head: Option<K>,
    pub tail: Option<K>,
    pub top: DirectionState,
    pub bottom: DirectionState,
    pub can_scroll_up: bool,
    pub can_scroll_down: bool,
    pub scroll_offset: u64,
    pub pending_delta: i64,
    pub bottom_slack: u64,
    pub anchor: Option<Anchor<K>>,
}

impl<K> WindowState<K> {
    pub fn top_exhausted(&self) -> bool {
        self.top == DirectionState::Exhausted
    }

    pub fn bottom_exhausted(&self) -> bool {
        self.bottom == DirectionState::Exhausted
    }

    pub fn top_fetch_pending(&self) -> bool {
        self.top == DirectionState::Fetching
    }

    pub fn bottom_fetch_pending(&self) -> bool {
        self.bottom == DirectionState::Fetching
    }
}
