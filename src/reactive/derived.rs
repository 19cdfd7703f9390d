//! Deriveds - memoized reactive computations.

use std::cell::RefCell;
use std::rc::Rc;

use super::effect::{effect, untracked};
use super::signal::{signal, Signal};

/// A memoized computation over signals.
///
/// Recomputes when a tracked dependency changes and stores the result in an
/// internal signal. Downstream observers fire only when the recomputed value
/// differs (`PartialEq`), so equal recomputations are absorbed here.
///
/// Clones share the computation; the backing effect stops when the last clone
/// drops.
pub struct Derived<T: Clone + PartialEq + 'static> {
    value: Signal<T>,
    _stop: Rc<StopOnDrop>,
}

struct StopOnDrop(RefCell<Option<Box<dyn FnOnce()>>>);

impl Drop for StopOnDrop {
    fn drop(&mut self) {
        if let Some(stop) = self.0.borrow_mut().take() {
            stop();
        }
    }
}

/// Create a derived from a computation.
///
/// `f` runs once untracked to seed the value, then again under tracking to
/// collect dependencies; the second result is equal to the first, so nothing
/// fires at creation time.
///
/// # Example
///
/// ```
/// use masonry_responsive::reactive::{derived, signal};
///
/// let width = signal(400u32);
/// let width_for_derived = width.clone();
/// let columns = derived(move || if width_for_derived.get() > 750 { 2u32 } else { 1 });
/// assert_eq!(columns.get(), 1);
/// width.set(800);
/// assert_eq!(columns.get(), 2);
/// ```
pub fn derived<T, F>(f: F) -> Derived<T>
where
    T: Clone + PartialEq + 'static,
    F: Fn() -> T + 'static,
{
    let f = Rc::new(f);
    let value = signal(untracked(|| f()));

    let value_for_effect = value.clone();
    let f_for_effect = Rc::clone(&f);
    let stop = effect(move || {
        value_for_effect.set(f_for_effect());
    });

    Derived {
        value,
        _stop: Rc::new(StopOnDrop(RefCell::new(Some(Box::new(stop))))),
    }
}

impl<T: Clone + PartialEq + 'static> Derived<T> {
    /// Current value. Registers a dependency when called inside an effect.
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Current value without dependency registration.
    pub fn get_untracked(&self) -> T {
        self.value.get_untracked()
    }
}

impl<T: Clone + PartialEq + 'static> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _stop: Rc::clone(&self._stop),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::reactive::effect;

    #[test]
    fn test_derived_tracks_dependencies() {
        let base = signal(2);
        let base_c = base.clone();
        let doubled = derived(move || base_c.get() * 2);

        assert_eq!(doubled.get(), 4);
        base.set(10);
        assert_eq!(doubled.get(), 20);
    }

    #[test]
    fn test_equal_recomputation_does_not_fire_downstream() {
        let width = signal(300u32);
        let width_c = width.clone();
        // Collapses many widths onto few values, like breakpoint resolution.
        let columns = derived(move || if width_c.get() > 750 { 2u32 } else { 1 });

        let runs = Rc::new(Cell::new(0));
        let (columns_c, runs_c) = (columns.clone(), runs.clone());
        let _stop = effect(move || {
            columns_c.get();
            runs_c.set(runs_c.get() + 1);
        });
        assert_eq!(runs.get(), 1);

        // Recomputes, but the result is still 1: downstream stays quiet.
        width.set(400);
        assert_eq!(runs.get(), 1);

        width.set(800);
        assert_eq!(runs.get(), 2);
        assert_eq!(columns.get(), 2);
    }

    #[test]
    fn test_chained_deriveds() {
        let base = signal(1);
        let base_c = base.clone();
        let plus_one = derived(move || base_c.get() + 1);
        let plus_one_c = plus_one.clone();
        let doubled = derived(move || plus_one_c.get() * 2);

        assert_eq!(doubled.get(), 4);
        base.set(4);
        assert_eq!(doubled.get(), 10);
    }

    #[test]
    fn test_dropping_last_clone_stops_recomputation() {
        let base = signal(1);
        let computations = Rc::new(Cell::new(0));

        let (base_c, computations_c) = (base.clone(), computations.clone());
        let d = derived(move || {
            computations_c.set(computations_c.get() + 1);
            base_c.get()
        });
        let seed_runs = computations.get();
        assert_eq!(d.get(), 1);

        drop(d);
        base.set(2);
        assert_eq!(computations.get(), seed_runs);
    }
}
