use crate::{Edge, EdgeObservation};

#[derive(Clone, Copy, Debug, Default)]
struct EdgeSample {
    last: Option<EdgeObservation>,
    paused: bool,
}

/// Turns edge-sentinel observations into discrete "edge reached" signals plus a scroll gate.
///
/// Two thresholds give the hysteresis: a sentinel is *reached* once its intersection ratio is
/// above `trigger_ratio`, and scrolling toward it is *paused* once the ratio is above the higher
/// `pause_ratio`. The pause keeps the user from scrolling past the loading boundary into empty
/// space while the next page is in flight.
#[derive(Clone, Copy, Debug)]
pub struct EdgeProximity {
    trigger_ratio: f32,
    pause_ratio: f32,
    gate_enabled: bool,
    top: EdgeSample,
    bottom: EdgeSample,
}

impl Default for EdgeProximity {
    fn default() -> Self {
        Self::new(0.05, 0.2)
    }
}

impl EdgeProximity {
    pub fn new(trigger_ratio: f32, pause_ratio: f32) -> Self {
        debug_assert!(pause_ratio >= trigger_ratio);
        Self {
            trigger_ratio,
            pause_ratio,
            gate_enabled: true,
            top: EdgeSample::default(),
            bottom: EdgeSample::default(),
        }
    }

    pub fn trigger_ratio(&self) -> f32 {
        self.trigger_ratio
    }

    pub fn pause_ratio(&self) -> f32 {
        self.pause_ratio
    }

    pub fn set_thresholds(&mut self, trigger_ratio: f32, pause_ratio: f32) {
        self.trigger_ratio = trigger_ratio;
        self.pause_ratio = pause_ratio;
    }

    pub fn gate_enabled(&self) -> bool {
        self.gate_enabled
    }

    pub fn set_gate_enabled(&mut self, enabled: bool) {
        self.gate_enabled = enabled;
    }

    /// Feeds one observation. Returns the reached edge, if any.
    ///
    /// Stale observations (`seq` not newer than the last accepted one for that sentinel) are
    /// ignored entirely. An accepted observation below the trigger threshold only updates the
    /// scroll gate.
    pub fn observe(&mut self, obs: EdgeObservation) -> Option<Edge> {
        let trigger = self.trigger_ratio;
        let pause = self.pause_ratio;
        let sample = self.sample_mut(obs.edge);
        if let Some(last) = sample.last {
            if obs.seq <= last.seq {
                ptrace!(
                    edge = ?obs.edge,
                    seq = obs.seq,
                    last_seq = last.seq,
                    "EdgeProximity: stale observation"
                );
                return None;
            }
        }

        sample.paused = obs.ratio > pause;
        sample.last = Some(obs);
        ptrace!(
            edge = ?obs.edge,
            ratio = obs.ratio,
            paused = sample.paused,
            "EdgeProximity::observe"
        );
        (obs.ratio > trigger).then_some(obs.edge)
    }

    /// Re-opens the gate for `edge`. Called when new content arrives at that edge.
    pub fn release(&mut self, edge: Edge) {
        self.sample_mut(edge).paused = false;
    }

    pub fn last_observation(&self, edge: Edge) -> Option<&EdgeObservation> {
        self.sample(edge).last.as_ref()
    }

    pub fn can_scroll(&self, edge: Edge) -> bool {
        !self.gate_enabled || !self.sample(edge).paused
    }

    pub fn can_scroll_up(&self) -> bool {
        self.can_scroll(Edge::Top)
    }

    pub fn can_scroll_down(&self) -> bool {
        self.can_scroll(Edge::Bottom)
    }

    /// Whether a scroll input of `delta` (negative = toward the top) passes the gate.
    pub fn allows_scroll_delta(&self, delta: i64) -> bool {
        match delta {
            d if d < 0 => self.can_scroll_up(),
            d if d > 0 => self.can_scroll_down(),
            _ => true,
        }
    }

    pub fn reset(&mut self) {
        self.top = EdgeSample::default();
        self.bottom = EdgeSample::default();
    }

    fn sample(&self, edge: Edge) -> &EdgeSample {
        match edge {
            Edge::Top => &self.top,
            Edge::Bottom => &self.bottom,
        }
    }

    fn sample_mut(&mut self, edge: Edge) -> &mut EdgeSample {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Bottom => &mut self.bottom,
        }
    }
}
