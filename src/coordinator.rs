//! Layout coordinator - composes the tracker and the resolver.
//!
//! [`mount`] wires the pipeline:
//!
//! ```text
//! width source → ViewportWidthTracker → layout derived → fan-out effect
//! ```
//!
//! On mount and on every width change, both breakpoint tables are resolved
//! inside one derived and every child receives the identical
//! [`ResolvedLayout`] by value, in stable positional order. Resolution is
//! memoized: width changes that land on the same breakpoints do not touch
//! the children.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use masonry_responsive::{mount, Children, MasonryChild, MasonryProps, ResolvedLayout};
//! use masonry_responsive::viewport::ManualWidthSource;
//!
//! struct Panel {
//!     layout: ResolvedLayout,
//! }
//!
//! impl MasonryChild for Panel {
//!     fn apply_layout(&mut self, layout: ResolvedLayout) {
//!         self.layout = layout;
//!     }
//! }
//!
//! let source = ManualWidthSource::with_width(800);
//! let panel = Rc::new(RefCell::new(Panel { layout: ResolvedLayout::default() }));
//!
//! let handle = mount(
//!     MasonryProps {
//!         children: Some(Children::one(panel.clone())),
//!         ..Default::default()
//!     },
//!     &source,
//! )?;
//!
//! // 800 exceeds the 750 breakpoint of the default table.
//! assert_eq!(panel.borrow().layout.columns_count, 2);
//!
//! handle.unmount();
//! # Ok::<(), masonry_responsive::LayoutError>(())
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use crate::breakpoints::{resolve, BreakpointTable};
use crate::error::LayoutError;
use crate::reactive::{derived, effect};
use crate::types::{Gutter, ResolvedLayout, DEFAULT_COLUMNS_COUNT, DEFAULT_GUTTER, FALLBACK_WIDTH};
use crate::viewport::{ViewportWidthTracker, WidthSource};

// =============================================================================
// Children
// =============================================================================

/// A layout element that accepts the two resolved parameters as configuration.
///
/// Children never see the tables or the width; they are configured with the
/// resolved pair and keep their own identity (no cloning-with-injected-props).
pub trait MasonryChild {
    /// Receive a freshly resolved layout.
    fn apply_layout(&mut self, layout: ResolvedLayout);
}

/// Shared handle to a child. The coordinator mutates children only through
/// `apply_layout` during fan-out.
pub type ChildRef = Rc<RefCell<dyn MasonryChild>>;

/// Wrap a concrete child into a [`ChildRef`].
pub fn child<C: MasonryChild + 'static>(value: C) -> ChildRef {
    Rc::new(RefCell::new(value))
}

/// One child or an ordered sequence of children.
///
/// Positional order is the child identity: fan-out always walks the sequence
/// front to back, so relative order survives every recomputation.
pub struct Children(Vec<ChildRef>);

impl Children {
    /// A single child.
    pub fn one(child: ChildRef) -> Self {
        Self(vec![child])
    }

    /// An ordered sequence of children.
    pub fn many<I: IntoIterator<Item = ChildRef>>(children: I) -> Self {
        Self(children.into_iter().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ChildRef> for Children {
    fn from(child: ChildRef) -> Self {
        Self::one(child)
    }
}

impl FromIterator<ChildRef> for Children {
    fn from_iter<I: IntoIterator<Item = ChildRef>>(iter: I) -> Self {
        Self::many(iter)
    }
}

// =============================================================================
// Props
// =============================================================================

/// Configuration surface of the coordinator.
///
/// Everything is optional except `children`; `None` means "use the default".
#[derive(Default)]
pub struct MasonryProps {
    /// Columns table. Default: `{350: 1, 750: 2, 900: 3}`.
    pub columns_count_break_points: Option<BreakpointTable<u32>>,
    /// Gutter table. Default: empty, so the gutter stays [`DEFAULT_GUTTER`].
    pub gutter_break_points: Option<BreakpointTable<Gutter>>,
    /// One child or an ordered sequence. Required; absence is a
    /// configuration error at mount time.
    pub children: Option<Children>,
    /// Passthrough presentation attribute for the container.
    pub class_name: Option<String>,
    /// Passthrough presentation attribute for the container.
    pub style: Option<String>,
}

/// The built-in columns table: 1 column up to 350, 2 past 750, 3 past 900.
pub fn default_columns_count_break_points() -> BreakpointTable<u32> {
    let mut table = BreakpointTable::new();
    table.insert(350, 1);
    table.insert(750, 2);
    table.insert(900, 3);
    table
}

// =============================================================================
// Mount
// =============================================================================

/// Handle to a mounted coordinator.
///
/// Carries the container's passthrough attributes and the ordered children
/// for the host to render. Unmounting (or dropping) stops the fan-out effect
/// and releases the width subscription; no notification delivered afterwards
/// reaches the children.
pub struct MasonryHandle {
    tracker: ViewportWidthTracker,
    stop_fan_out: Option<Box<dyn FnOnce()>>,
    class_name: Option<String>,
    style: Option<String>,
    children: Vec<ChildRef>,
}

impl MasonryHandle {
    /// Container class attribute, if supplied.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    /// Container style attribute, if supplied.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// The children, in their original order.
    pub fn children(&self) -> &[ChildRef] {
        &self.children
    }

    /// Whether a real width reading has arrived.
    pub fn is_ready(&self) -> bool {
        self.tracker.is_ready()
    }

    /// Stop the fan-out effect and release the width subscription.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(stop) = self.stop_fan_out.take() {
            stop();
            self.tracker.detach();
            debug!("masonry unmounted");
        }
    }
}

impl Drop for MasonryHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Mount the coordinator onto a width source.
///
/// Validates the configuration, attaches the viewport tracker, builds the
/// layout derived, and installs the single fan-out effect. The effect runs
/// once immediately, so children are configured before this returns.
///
/// # Errors
///
/// [`LayoutError::MissingChildren`] when `children` is absent or empty.
pub fn mount(props: MasonryProps, source: &dyn WidthSource) -> Result<MasonryHandle, LayoutError> {
    let children = props.children.ok_or(LayoutError::MissingChildren)?;
    if children.is_empty() {
        return Err(LayoutError::MissingChildren);
    }
    let children = children.0;

    let columns_table = props
        .columns_count_break_points
        .unwrap_or_else(default_columns_count_break_points);
    let gutter_table = props.gutter_break_points.unwrap_or_default();

    let tracker = ViewportWidthTracker::attach(source);
    let phase = tracker.phase_signal();

    // Both tables resolve inside one derived: a width change that moves both
    // produces a single recomputation with a pair consistent for that width.
    let layout = derived(move || {
        let width = phase.get().width_or(FALLBACK_WIDTH);
        ResolvedLayout {
            columns_count: resolve(&columns_table, DEFAULT_COLUMNS_COUNT, width),
            gutter: resolve(&gutter_table, DEFAULT_GUTTER, width),
        }
    });

    let children_for_effect: Vec<ChildRef> = children.iter().map(Rc::clone).collect();
    let stop = effect(move || {
        let layout = layout.get();
        debug!(
            "fan-out: columns_count={} gutter={} children={}",
            layout.columns_count,
            layout.gutter,
            children_for_effect.len()
        );
        for child in &children_for_effect {
            child.borrow_mut().apply_layout(layout);
        }
    });

    Ok(MasonryHandle {
        tracker,
        stop_fan_out: Some(Box::new(stop)),
        class_name: props.class_name,
        style: props.style,
        children,
    })
}

// =============================================================================
// Tests
// =============================================================================
