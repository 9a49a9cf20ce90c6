use crate::{Edge, Rejected};

/// Fetch state of one direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionState {
    /// No outstanding request; edge-reached events are accepted.
    #[default]
    Idle,
    /// A request was issued and has not completed yet.
    Fetching,
    /// The source reported no more pages. Edge-reached events are dropped until the exhaustion
    /// is reset.
    Exhausted,
}

/// What asked for a fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// An edge-reached event from proximity detection.
    Edge,
    /// An explicit host request. Bypasses `paging_enabled` and exhaustion, never the
    /// single-in-flight rule.
    Manual,
}

/// How a fetch ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// A page arrived, or the fetch failed / was discarded: back to `Idle`.
    Settled,
    /// The source returned no page.
    Exhausted,
}

/// A request for the host's page source.
///
/// `cursor` is the id of the boundary page (`head` for `Top`, `tail` for `Bottom`) when the
/// request was issued. It is advisory: the result is always applied to the boundary current at
/// completion time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchRequest<K> {
    pub edge: Edge,
    pub cursor: Option<K>,
}

/// Two independent per-direction state machines.
///
/// Events that arrive while a direction is fetching or exhausted are dropped, never queued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchCoordinator {
    top: DirectionState,
    bottom: DirectionState,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, edge: Edge) -> DirectionState {
        match edge {
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn is_fetching(&self, edge: Edge) -> bool {
        self.state(edge) == DirectionState::Fetching
    }

    pub fn is_exhausted(&self, edge: Edge) -> bool {
        self.state(edge) == DirectionState::Exhausted
    }

    /// Tries to move `edge` into `Fetching`.
    pub fn begin(
        &mut self,
        edge: Edge,
        trigger: Trigger,
        paging_enabled: bool,
    ) -> Result<(), Rejected> {
        let state = self.state(edge);
        let verdict = match (state, trigger) {
            (DirectionState::Fetching, _) => Err(Rejected::InFlight),
            (_, Trigger::Edge) if !paging_enabled => Err(Rejected::PagingDisabled),
            (DirectionState::Exhausted, Trigger::Edge) => Err(Rejected::Exhausted),
            _ => Ok(()),
        };
        if verdict.is_ok() {
            *self.state_mut(edge) = DirectionState::Fetching;
        }
        ptrace!(edge = ?edge, trigger = ?trigger, verdict = ?verdict, "FetchCoordinator::begin");
        verdict
    }

    /// Ends the fetch in flight for `edge`. Returns `false` (and changes nothing) when no fetch
    /// was in flight.
    pub fn complete(&mut self, edge: Edge, completion: Completion) -> bool {
        if !self.is_fetching(edge) {
            return false;
        }
        *self.state_mut(edge) = match completion {
            Completion::Settled => DirectionState::Idle,
            Completion::Exhausted => DirectionState::Exhausted,
        };
        ptrace!(edge = ?edge, state = ?self.state(edge), "FetchCoordinator: completed");
        true
    }

    /// Clears exhaustion for `edge`. Returns `true` if it was exhausted.
    pub fn reset_exhaustion(&mut self, edge: Edge) -> bool {
        if !self.is_exhausted(edge) {
            return false;
        }
        *self.state_mut(edge) = DirectionState::Idle;
        true
    }

    fn state_mut(&mut self, edge: Edge) -> &mut DirectionState {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
        }
    }
}
