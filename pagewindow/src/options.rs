use alloc::sync::Arc;

use crate::{ConfigError, Edge, PageId, WindowEvent};

/// A callback fired for every [`WindowEvent`].
pub type EventCallback<K> = Arc<dyn Fn(&WindowEvent<K>) + Send + Sync>;

/// Where the view starts inside the content.
///
/// `Top` behaves like a feed: the first page is fetched with "page after nothing" and more
/// content grows downward. `Bottom` behaves like a chat history: the first page is fetched with
/// "page before nothing", the host is asked to pin the view to the end, and older content grows
/// upward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StartDirection {
    #[default]
    Top,
    Bottom,
}

impl StartDirection {
    /// The direction of the initial fetch.
    pub fn fetch_edge(self) -> Edge {
        match self {
            Self::Top => Edge::Bottom,
            Self::Bottom => Edge::Top,
        }
    }

    /// The end of the window that is kept when the window has to shrink.
    pub fn kept_edge(self) -> Edge {
        match self {
            Self::Top => Edge::Top,
            Self::Bottom => Edge::Bottom,
        }
    }
}

/// Configuration for [`crate::WindowEngine`].
///
/// Cheap to clone: the event callback is stored in an `Arc`.
pub struct WindowOptions<K = PageId> {
    /// Upper bound on mounted pages.
    pub max_page_buffer: usize,
    /// When `false`, edge-reached events never start a fetch. Manual triggers still work.
    pub paging_enabled: bool,
    pub start_direction: StartDirection,

    /// A sentinel counts as reached when its intersection ratio is strictly above this.
    pub trigger_ratio: f32,
    /// Scrolling toward a sentinel is paused when its intersection ratio is strictly above this.
    pub pause_ratio: f32,
    /// When `false`, `can_scroll_up`/`can_scroll_down` always report `true`.
    pub scroll_gate_enabled: bool,

    /// How long anchor selection stays active after a user scroll or resize.
    pub anchor_selection_window_ms: u64,
    /// How long anchor selection is suspended after a programmatic scroll adjustment.
    pub anchor_suspend_ms: u64,

    pub on_event: Option<EventCallback<K>>,
}

impl<K> Clone for WindowOptions<K> {
    fn clone(&self) -> Self {
        Self {
            max_page_buffer: self.max_page_buffer,
            paging_enabled: self.paging_enabled,
            start_direction: self.start_direction,
            trigger_ratio: self.trigger_ratio,
            pause_ratio: self.pause_ratio,
            scroll_gate_enabled: self.scroll_gate_enabled,
            anchor_selection_window_ms: self.anchor_selection_window_ms,
            anchor_suspend_ms: self.anchor_suspend_ms,
            on_event: self.on_event.clone(),
        }
    }
}

impl<K> Default for WindowOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> WindowOptions<K> {
    pub fn new() -> Self {
        Self {
            max_page_buffer: 10,
            paging_enabled: true,
            start_direction: StartDirection::Top,
            trigger_ratio: 0.05,
            pause_ratio: 0.2,
            scroll_gate_enabled: true,
            anchor_selection_window_ms: 10,
            anchor_suspend_ms: 10,
            on_event: None,
        }
    }

    pub fn with_max_page_buffer(mut self, max_page_buffer: usize) -> Self {
        self.max_page_buffer = max_page_buffer;
        self
    }

    pub fn with_paging_enabled(mut self, paging_enabled: bool) -> Self {
        self.paging_enabled = paging_enabled;
        self
    }

    pub fn with_start_direction(mut self, start_direction: StartDirection) -> Self {
        self.start_direction = start_direction;
        self
    }

    pub fn with_thresholds(mut self, trigger_ratio: f32, pause_ratio: f32) -> Self {
        self.trigger_ratio = trigger_ratio;
        self.pause_ratio = pause_ratio;
        self
    }

    pub fn with_scroll_gate_enabled(mut self, enabled: bool) -> Self {
        self.scroll_gate_enabled = enabled;
        self
    }

    pub fn with_anchor_timing(mut self, selection_window_ms: u64, suspend_ms: u64) -> Self {
        self.anchor_selection_window_ms = selection_window_ms;
        self.anchor_suspend_ms = suspend_ms;
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: Option<impl Fn(&WindowEvent<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_buffer == 0 {
            return Err(ConfigError::ZeroPageBuffer);
        }
        check_ratio("trigger_ratio", self.trigger_ratio)?;
        check_ratio("pause_ratio", self.pause_ratio)?;
        if self.pause_ratio < self.trigger_ratio {
            return Err(ConfigError::PauseBelowTrigger {
                trigger: self.trigger_ratio,
                pause: self.pause_ratio,
            });
        }
        Ok(())
    }
}

fn check_ratio(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { name, value })
    }
}

impl<K> core::fmt::Debug for WindowOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("max_page_buffer", &self.max_page_buffer)
            .field("paging_enabled", &self.paging_enabled)
            .field("start_direction", &self.start_direction)
            .field("trigger_ratio", &self.trigger_ratio)
            .field("pause_ratio", &self.pause_ratio)
            .field("scroll_gate_enabled", &self.scroll_gate_enabled)
            .field(
                "anchor_selection_window_ms",
                &self.anchor_selection_window_ms,
            )
            .field("anchor_suspend_ms", &self.anchor_suspend_ms)
            .finish_non_exhaustive()
    }
}
