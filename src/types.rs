//! Core types for masonry-responsive.
//!
//! These types flow through the reactive pipeline: the viewport tracker
//! produces a [`ViewportPhase`], breakpoint resolution produces a
//! [`ResolvedLayout`], and every child receives that layout by value.

use std::fmt;

// =============================================================================
// Defaults
// =============================================================================

/// Columns count used when the columns table is empty.
pub const DEFAULT_COLUMNS_COUNT: u32 = 1;

/// Gutter used when the gutter table is empty.
pub const DEFAULT_GUTTER: Gutter = Gutter::Px(10);

/// Width reported while the viewport is not yet initialized
/// (headless or pre-presentation context).
pub const FALLBACK_WIDTH: u32 = 0;

// =============================================================================
// Gutter
// =============================================================================

/// Spacing between columns.
///
/// The two shapes callers supply in practice: a pixel length and a raw
/// cell count for character-grid hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gutter {
    /// Length in pixels.
    Px(u32),
    /// Length in terminal cells.
    Cells(u16),
}

impl Default for Gutter {
    fn default() -> Self {
        DEFAULT_GUTTER
    }
}

impl fmt::Display for Gutter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(n) => write!(f, "{n}px"),
            Self::Cells(n) => write!(f, "{n}"),
        }
    }
}

impl From<u32> for Gutter {
    fn from(px: u32) -> Self {
        Self::Px(px)
    }
}

// =============================================================================
// Resolved Layout
// =============================================================================

/// The pair of layout parameters valid for the current viewport width.
///
/// Recomputed from scratch on every width change; handed to each child by
/// value, never shared mutably.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLayout {
    /// Number of columns (always >= 1).
    pub columns_count: u32,
    /// Spacing between columns.
    pub gutter: Gutter,
}

impl Default for ResolvedLayout {
    fn default() -> Self {
        Self {
            columns_count: DEFAULT_COLUMNS_COUNT,
            gutter: DEFAULT_GUTTER,
        }
    }
}

// =============================================================================
// Viewport Phase
// =============================================================================

/// Initialization state of the viewport.
///
/// `Uninitialized` covers the startup window before the environment reports a
/// width (and headless contexts where it never will). Callers that want a
/// plain number use [`ViewportPhase::width_or`] with [`FALLBACK_WIDTH`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportPhase {
    /// No width reading available yet.
    #[default]
    Uninitialized,
    /// The environment reported a width.
    Ready(u32),
}

impl ViewportPhase {
    /// Current width, or `fallback` while uninitialized.
    pub fn width_or(self, fallback: u32) -> u32 {
        match self {
            Self::Uninitialized => fallback,
            Self::Ready(width) => width,
        }
    }

    /// Whether a real width reading has arrived.
    pub fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gutter_display() {
        assert_eq!(Gutter::Px(10).to_string(), "10px");
        assert_eq!(Gutter::Cells(2).to_string(), "2");
    }

    #[test]
    fn test_gutter_default_matches_constant() {
        assert_eq!(Gutter::default(), Gutter::Px(10));
    }

    #[test]
    fn test_viewport_phase_fallback() {
        assert_eq!(ViewportPhase::Uninitialized.width_or(FALLBACK_WIDTH), 0);
        assert_eq!(ViewportPhase::Ready(1280).width_or(FALLBACK_WIDTH), 1280);
        assert!(!ViewportPhase::Uninitialized.is_ready());
        assert!(ViewportPhase::Ready(0).is_ready());
    }
}
