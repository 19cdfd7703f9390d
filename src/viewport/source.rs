//! The width-source seam and the manual test double.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Width-change listener (Rc so sources can hold it across notifications).
pub type WidthListener = Rc<dyn Fn(u32)>;

// =============================================================================
// Width Source
// =============================================================================

/// Environment capability: read the current width, subscribe to changes.
///
/// `current` returns `None` when the environment cannot report a width
/// (headless / non-presentation context). That is not an error; the tracker
/// falls back to [`crate::types::FALLBACK_WIDTH`].
pub trait WidthSource {
    /// Best immediately-available width reading.
    fn current(&self) -> Option<u32>;

    /// Register a listener for subsequent width changes.
    ///
    /// The registration lives until the returned [`Subscription`] is released.
    fn subscribe(&self, listener: WidthListener) -> Subscription;
}

// =============================================================================
// Subscription
// =============================================================================

/// A releasable listener registration.
///
/// Released explicitly via [`Subscription::release`] or implicitly on drop.
/// After release the source never calls the listener again.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Wrap a release action.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Release the registration now.
    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

// =============================================================================
// Manual Width Source
// =============================================================================

/// Deterministic width source for tests and examples.
///
/// Widths are injected with [`ManualWidthSource::set_width`]; every live
/// listener is called synchronously, in registration order.
///
/// # Example
///
/// ```
/// use masonry_responsive::viewport::{ManualWidthSource, ViewportWidthTracker, WidthSource};
///
/// let source = ManualWidthSource::with_width(800);
/// assert_eq!(source.current(), Some(800));
///
/// let tracker = ViewportWidthTracker::attach(&source);
/// source.set_width(1200);
/// assert_eq!(tracker.width(), 1200);
/// ```
#[derive(Clone, Default)]
pub struct ManualWidthSource {
    inner: Rc<ManualInner>,
}

#[derive(Default)]
struct ManualInner {
    width: Cell<Option<u32>>,
    listeners: RefCell<Vec<(u64, WidthListener)>>,
    next_id: Cell<u64>,
}

impl ManualWidthSource {
    /// A source with no width yet (headless until the first `set_width`).
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that already reports `width`.
    pub fn with_width(width: u32) -> Self {
        let source = Self::default();
        source.inner.width.set(Some(width));
        source
    }

    /// Inject a width and notify every listener synchronously.
    pub fn set_width(&self, width: u32) {
        self.inner.width.set(Some(width));
        let snapshot: Vec<WidthListener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in snapshot {
            listener(width);
        }
    }

    /// Number of live listener registrations.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl WidthSource for ManualWidthSource {
    fn current(&self) -> Option<u32> {
        self.inner.width.get()
    }

    fn subscribe(&self, listener: WidthListener) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, listener));

        let inner = Rc::clone(&self.inner);
        Subscription::new(move || {
            inner
                .listeners
                .borrow_mut()
                .retain(|(listener_id, _)| *listener_id != id);
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
