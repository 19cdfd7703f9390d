//! Effects and the observer stack.
//!
//! An effect is the only node that performs side effects. Dependencies are
//! collected by re-registration: each run first drops every prior
//! subscription, then lets tracked reads re-subscribe, so conditional reads
//! stay precise across runs.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Subscriber list shared between a source and its observers.
pub(crate) type SubscriberList = Rc<RefCell<Vec<Weak<EffectInner>>>>;

thread_local! {
    /// Stack of currently running observers. `None` marks an untracked scope.
    static OBSERVER: RefCell<Vec<Option<Rc<EffectInner>>>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Effect Node
// =============================================================================

pub(crate) struct EffectInner {
    /// The body. Taken on stop so captured resources are released.
    f: RefCell<Option<Box<dyn FnMut()>>>,
    /// Re-entrancy guard: a run triggered by its own writes is skipped.
    running: Cell<bool>,
    stopped: Cell<bool>,
    /// Subscriber lists this effect is currently registered with.
    sources: RefCell<Vec<SubscriberList>>,
}

impl EffectInner {
    fn new(f: Box<dyn FnMut()>) -> Rc<Self> {
        Rc::new(Self {
            f: RefCell::new(Some(f)),
            running: Cell::new(false),
            stopped: Cell::new(false),
            sources: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn run(self: &Rc<Self>) {
        if self.stopped.get() || self.running.get() {
            return;
        }

        self.unsubscribe_all();
        self.running.set(true);
        OBSERVER.with(|stack| stack.borrow_mut().push(Some(Rc::clone(self))));

        if let Some(f) = self.f.borrow_mut().as_mut() {
            f();
        }

        OBSERVER.with(|stack| {
            stack.borrow_mut().pop();
        });
        self.running.set(false);

        // stop() called from inside the body defers the body drop until here.
        if self.stopped.get() {
            self.f.borrow_mut().take();
        }
    }

    pub(crate) fn stop(self: &Rc<Self>) {
        if self.stopped.replace(true) {
            return;
        }
        self.unsubscribe_all();
        if !self.running.get() {
            self.f.borrow_mut().take();
        }
    }

    fn unsubscribe_all(self: &Rc<Self>) {
        for list in self.sources.borrow_mut().drain(..) {
            list.borrow_mut()
                .retain(|weak| weak.upgrade().is_some_and(|rc| !Rc::ptr_eq(&rc, self)));
        }
    }
}

// =============================================================================
// Tracking
// =============================================================================

/// Register the running observer (if any) with a source's subscriber list.
pub(crate) fn track(subscribers: &SubscriberList) {
    OBSERVER.with(|stack| {
        let stack = stack.borrow();
        let Some(Some(current)) = stack.last() else {
            return;
        };
        {
            let mut subs = subscribers.borrow_mut();
            let already = subs
                .iter()
                .any(|weak| weak.upgrade().is_some_and(|rc| Rc::ptr_eq(&rc, current)));
            if !already {
                subs.push(Rc::downgrade(current));
            }
        }
        current.sources.borrow_mut().push(Rc::clone(subscribers));
    });
}

/// Run every live subscriber of a source, in subscription order.
pub(crate) fn notify(subscribers: &SubscriberList) {
    let snapshot: Vec<Rc<EffectInner>> = {
        let mut subs = subscribers.borrow_mut();
        subs.retain(|weak| weak.strong_count() > 0);
        subs.iter().filter_map(Weak::upgrade).collect()
    };
    for observer in snapshot {
        observer.run();
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Create an effect.
///
/// `f` runs immediately and again whenever a signal or derived it read
/// changes. The returned closure stops the effect; a stopped effect never
/// runs again. Dropping the closure without calling it also kills the effect
/// (its subscriptions are weak).
pub fn effect(f: impl FnMut() + 'static) -> impl FnOnce() {
    let inner = EffectInner::new(Box::new(f));
    inner.run();
    move || inner.stop()
}

/// Run `f` without registering dependencies on the current observer.
pub fn untracked<T>(f: impl FnOnce() -> T) -> T {
    OBSERVER.with(|stack| stack.borrow_mut().push(None));
    let value = f();
    OBSERVER.with(|stack| {
        stack.borrow_mut().pop();
    });
    value
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::reactive::signal;

    #[test]
    fn test_effect_runs_immediately() {
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        let _stop = effect(move || runs_clone.set(runs_clone.get() + 1));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_effect_reruns_on_signal_change() {
        let source = signal(1);
        let seen = Rc::new(Cell::new(0));

        let source_clone = source.clone();
        let seen_clone = seen.clone();
        let _stop = effect(move || seen_clone.set(source_clone.get()));
        assert_eq!(seen.get(), 1);

        source.set(5);
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn test_stopped_effect_never_reruns() {
        let source = signal(1);
        let runs = Rc::new(Cell::new(0));

        let source_clone = source.clone();
        let runs_clone = runs.clone();
        let stop = effect(move || {
            source_clone.get();
            runs_clone.set(runs_clone.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        stop();
        assert_eq!(source.subscriber_count(), 0);

        source.set(2);
        source.set(3);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_dropped_stop_handle_kills_effect() {
        let source = signal(1);
        let runs = Rc::new(Cell::new(0));

        let source_clone = source.clone();
        let runs_clone = runs.clone();
        {
            let _stop = effect(move || {
                source_clone.get();
                runs_clone.set(runs_clone.get() + 1);
            });
        }

        source.set(2);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn test_dynamic_dependencies_reregister() {
        let gate = signal(true);
        let a = signal(10);
        let b = signal(20);
        let seen = Rc::new(Cell::new(0));

        let (gate_c, a_c, b_c, seen_c) = (gate.clone(), a.clone(), b.clone(), seen.clone());
        let _stop = effect(move || {
            let value = if gate_c.get() { a_c.get() } else { b_c.get() };
            seen_c.set(value);
        });
        assert_eq!(seen.get(), 10);

        gate.set(false);
        assert_eq!(seen.get(), 20);

        // `a` is no longer a dependency; changing it must not re-run.
        a.set(11);
        assert_eq!(seen.get(), 20);

        b.set(21);
        assert_eq!(seen.get(), 21);
    }

    #[test]
    fn test_untracked_read_is_not_a_dependency() {
        let tracked = signal(1);
        let ignored = signal(100);
        let runs = Rc::new(Cell::new(0));

        let (tracked_c, ignored_c, runs_c) = (tracked.clone(), ignored.clone(), runs.clone());
        let _stop = effect(move || {
            tracked_c.get();
            untracked(|| ignored_c.get());
            runs_c.set(runs_c.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        ignored.set(200);
        assert_eq!(runs.get(), 1);

        tracked.set(2);
        assert_eq!(runs.get(), 2);
    }
}
