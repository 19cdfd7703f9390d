//! Signals - reactive values.

use std::cell::RefCell;
use std::rc::Rc;

use super::effect::{notify, track, SubscriberList};

/// A mutable reactive value.
///
/// Cloning a `Signal` clones the handle, not the value: all clones observe
/// and mutate the same cell. `T: PartialEq` gates propagation, so writing an
/// equal value is a no-op for subscribers.
///
/// # Example
///
/// ```
/// use masonry_responsive::reactive::{effect, signal};
///
/// let width = signal(80u32);
/// let width_for_effect = width.clone();
/// let _stop = effect(move || {
///     let _ = width_for_effect.get(); // registers the dependency
/// });
/// width.set(120); // effect re-runs
/// ```
pub struct Signal<T> {
    inner: Rc<SignalInner<T>>,
}

struct SignalInner<T> {
    value: RefCell<T>,
    subscribers: SubscriberList,
}

/// Create a new signal holding `value`.
pub fn signal<T: Clone + PartialEq + 'static>(value: T) -> Signal<T> {
    Signal::new(value)
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    /// Create a new signal holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(SignalInner {
                value: RefCell::new(value),
                subscribers: Rc::new(RefCell::new(Vec::new())),
            }),
        }
    }

    /// Current value. Registers a dependency when called inside an effect.
    pub fn get(&self) -> T {
        track(&self.inner.subscribers);
        self.inner.value.borrow().clone()
    }

    /// Current value without dependency registration.
    pub fn get_untracked(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Replace the value and notify subscribers synchronously.
    ///
    /// Writing a value equal to the current one notifies nobody.
    pub fn set(&self, value: T) {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value;
        }
        notify(&self.inner.subscribers);
    }

    /// Number of live subscribers. Exposed for lifecycle assertions in tests.
    #[cfg(test)]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
