//! A headless, bidirectional "infinite scroll" paging engine.
//!
//! For host-side drivers (page sources, render surfaces), see the `pagewindow-adapter` crate.
//!
//! The engine keeps a bounded, sliding window of pages, fetches more as the user approaches
//! either edge, evicts pages from the opposite edge, and computes the scroll corrections that
//! keep visible content from jumping when pages are inserted or evicted above the viewport.
//!
//! It is UI-agnostic. A TUI/GUI/DOM layer is expected to provide:
//! - edge sentinel visibility samples (intersection ratios)
//! - rendered page heights, after layout
//! - user scroll offsets
//! - a relative scroll write, applied once per frame
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod buffer;
mod coordinator;
mod engine;
mod error;
mod event;
mod key;
mod options;
mod proximity;
mod reconciler;
mod state;
mod types;


pub use anchor::{Anchor, AnchorTracker};
pub use buffer::{MountedPage, PageBuffer};
pub use coordinator::{Completion, DirectionState, FetchCoordinator, FetchRequest, Trigger};
pub use engine::{FetchOutcome, WindowEngine};
pub use error::{BufferError, ConfigError, SourceError};
pub use event::{Diagnostic, Rejected, WindowEvent};
pub use key::PageKey;
pub use options::{EventCallback, StartDirection, WindowOptions};
pub use proximity::EdgeProximity;
pub use reconciler::{ScrollAdjustment, ScrollFrame, ScrollReconciler};
pub use state::WindowState;
pub use types::{Bounds, Edge, EdgeObservation, ItemObservation, Page, PageId, Placement};
