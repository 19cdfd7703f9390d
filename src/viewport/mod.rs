//! Viewport width tracking.
//!
//! The environment dependency is narrowed to one seam: [`WidthSource`], a
//! read capability plus a subscribe capability. Implementations:
//!
//! - [`TerminalWidthSource`] - real environment adapter over crossterm
//! - [`ManualWidthSource`] - deterministic double for tests and headless runs
//!
//! [`ViewportWidthTracker`] sits on top and turns the source into a reactive
//! width signal with two-phase initialization: a fallback reading until the
//! environment confirms a width, then live updates until detach.

mod source;
mod terminal;
mod tracker;

pub use source::{ManualWidthSource, Subscription, WidthListener, WidthSource};
pub use terminal::TerminalWidthSource;
pub use tracker::ViewportWidthTracker;
