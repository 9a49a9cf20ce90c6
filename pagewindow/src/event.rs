use alloc::vec::Vec;

use crate::{BufferError, Edge, SourceError};

/// Why an edge-reached event or manual trigger did not start a fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rejected {
    PagingDisabled,
    InFlight,
    Exhausted,
}

/// A geometry/measurement anomaly. Reconciliation is skipped for the affected mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic<K> {
    /// A page was evicted from the head before its height was ever reported, so the
    /// compensating scroll delta could not be computed.
    EvictedUnmeasured { id: K },
    /// A page inserted at the top was evicted before its height was reported.
    EvictedBeforeMeasured { id: K },
    /// A height was reported for a page that is not mounted.
    UnknownMeasurement { id: K, height: u32 },
    /// A fetch completion arrived for a direction with no fetch in flight.
    UnexpectedCompletion { edge: Edge },
}

/// Host-visible notifications, delivered through [`crate::WindowOptions::on_event`].
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent<K> {
    /// A page was inserted at `edge`, possibly evicting one from the opposite end.
    WindowChanged {
        edge: Edge,
        inserted: K,
        evicted: Option<K>,
    },
    /// Pages were evicted because `max_page_buffer` shrank.
    WindowTrimmed { evicted: Vec<K> },
    /// The source has no more pages in this direction.
    DirectionExhausted(Edge),
    /// A fetched page reused an id already in the window; the page was discarded.
    DuplicatePage { edge: Edge, error: BufferError<K> },
    /// The source rejected a fetch. The direction is idle again; no retry is scheduled.
    FetchFailed { edge: Edge, error: SourceError },
    /// The page straddling the viewport's top edge changed.
    AnchorChanged { anchor: Option<K> },
    /// The first page of a bottom-started window is mounted; the host should scroll to the end.
    PinToEnd,
    Diagnostic(Diagnostic<K>),
}
