//! Adapter utilities for the `pagewindow` crate.
//!
//! The `pagewindow` crate is UI-agnostic and only decides *what* the window should contain and
//! how far the view must move. This crate provides small, framework-neutral pieces that most
//! hosts need around it:
//!
//! - [`PageSource`]: synchronous page loading by neighbour (plus an in-memory [`VecSource`])
//! - [`RenderSurface`]: the mount/measure/scroll operations of a rendering layer
//! - [`Controller`]: wires both to a [`pagewindow::WindowEngine`]
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod source;
mod surface;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use source::{Origin, PageSource, VecSource};
pub use surface::RenderSurface;
