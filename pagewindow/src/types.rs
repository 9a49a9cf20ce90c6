use core::fmt;

use crate::PageKey;

/// Default page identifier type.
pub type PageId = u64;

/// A unit of content managed as an atomic insert/evict item in the window.
///
/// The engine only ever looks at the id; the payload is lent to the renderer as-is.
pub trait Page {
    type Id: PageKey + Clone + fmt::Debug;

    fn id(&self) -> Self::Id;
}

/// One of the two ends of the window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Where a page fetched for this edge lands relative to the current window.
    pub fn placement(self) -> Placement {
        match self {
            Self::Top => Placement::Before,
            Self::Bottom => Placement::After,
        }
    }
}

/// Position marker of a mounted page: which end of the window it entered from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    Before,
    After,
}

impl Placement {
    pub fn edge(self) -> Edge {
        match self {
            Self::Before => Edge::Top,
            Self::After => Edge::Bottom,
        }
    }
}

/// A vertical extent in viewport coordinates (may be negative above the viewport).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub top: i64,
    pub bottom: i64,
}

impl Bounds {
    pub fn new(top: i64, bottom: i64) -> Self {
        Self { top, bottom }
    }

    pub fn height(&self) -> u64 {
        self.bottom.saturating_sub(self.top).max(0) as u64
    }

    /// Whether `y` lies strictly inside this extent.
    pub fn straddles(&self, y: i64) -> bool {
        self.top < y && y < self.bottom
    }
}

/// A visibility sample of an edge sentinel.
///
/// `seq` orders samples for the same sentinel; a sample that is not newer than the last accepted
/// one is ignored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeObservation {
    pub edge: Edge,
    pub seq: u64,
    /// Intersection ratio of the sentinel with the viewport, in `[0, 1]`.
    pub ratio: f32,
    pub bounds: Bounds,
}

impl EdgeObservation {
    pub fn new(edge: Edge, seq: u64, ratio: f32) -> Self {
        Self {
            edge,
            seq,
            ratio,
            bounds: Bounds::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }
}

/// A visibility sample of a rendered item, used for anchor selection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemObservation<K> {
    pub id: K,
    pub ratio: f32,
    pub bounds: Bounds,
    /// Top edge of the viewport, in the same coordinates as `bounds`.
    pub viewport_top: i64,
}
