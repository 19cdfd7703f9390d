//! # masonry-responsive
//!
//! Responsive layout coordination for masonry-style hosts.
//!
//! Given a viewport width and width-keyed breakpoint tables, the crate
//! derives the applicable `columns_count` and `gutter` and hands the pair to
//! every child layout element. It does not place or balance items; children
//! only need to accept the two values as configuration.
//!
//! ## Architecture
//!
//! The pipeline is purely signal-driven:
//!
//! ```text
//! WidthSource → ViewportWidthTracker → layout derived → fan-out effect
//! ```
//!
//! ## Modules
//!
//! - [`reactive`] - Signals, deriveds, effects (single-threaded core)
//! - [`breakpoints`] - Breakpoint tables and ordered-threshold resolution
//! - [`viewport`] - Width sources and the viewport tracker
//! - [`coordinator`] - Props, mount/unmount, child fan-out
//! - [`types`] - Gutter, ResolvedLayout, ViewportPhase, defaults

pub mod breakpoints;
pub mod coordinator;
pub mod error;
pub mod reactive;
pub mod types;
pub mod viewport;

// Re-export commonly used items
pub use types::*;

pub use breakpoints::{resolve, BreakpointTable};

pub use coordinator::{
    child, default_columns_count_break_points, mount, ChildRef, Children, MasonryChild,
    MasonryHandle, MasonryProps,
};

pub use error::LayoutError;

pub use viewport::{
    ManualWidthSource, Subscription, TerminalWidthSource, ViewportWidthTracker, WidthSource,
};
