//! Viewport width tracker - the reactive width signal.

use std::rc::Rc;

use log::debug;

use crate::reactive::{signal, Signal};
use crate::types::{ViewportPhase, FALLBACK_WIDTH};

use super::source::WidthSource;
use super::Subscription;

/// Tracks the viewport width as a reactive signal.
///
/// Initialization is two-phase: seed from the best immediately-available
/// reading (fallback when the environment reports nothing), then one
/// corrective read once the listener is in place, then live updates. This
/// keeps a pre-presentation context and a live one on the same code path.
///
/// The tracker owns its subscription exclusively; after [`detach`] no
/// notification can reach the signal again.
///
/// [`detach`]: ViewportWidthTracker::detach
pub struct ViewportWidthTracker {
    phase: Signal<ViewportPhase>,
    subscription: Option<Subscription>,
}

impl ViewportWidthTracker {
    /// Attach to a width source.
    pub fn attach(source: &dyn WidthSource) -> Self {
        let initial = match source.current() {
            Some(width) => ViewportPhase::Ready(width),
            None => ViewportPhase::Uninitialized,
        };
        let phase = signal(initial);

        let phase_for_listener = phase.clone();
        let subscription = source.subscribe(Rc::new(move |width| {
            phase_for_listener.set(ViewportPhase::Ready(width));
        }));

        // Corrective read: the surface may have become ready between the
        // seed read and the listener registration.
        if let Some(width) = source.current() {
            phase.set(ViewportPhase::Ready(width));
        }

        debug!("viewport tracker attached: {:?}", phase.get_untracked());

        Self {
            phase,
            subscription: Some(subscription),
        }
    }

    /// Current width; [`FALLBACK_WIDTH`] while uninitialized.
    ///
    /// Reactive: reading inside an effect registers a dependency.
    pub fn width(&self) -> u32 {
        self.phase.get().width_or(FALLBACK_WIDTH)
    }

    /// Current initialization phase (reactive read).
    pub fn phase(&self) -> ViewportPhase {
        self.phase.get()
    }

    /// Whether a real width reading has arrived.
    pub fn is_ready(&self) -> bool {
        self.phase.get_untracked().is_ready()
    }

    /// The underlying phase signal, for composition into deriveds.
    pub(crate) fn phase_signal(&self) -> Signal<ViewportPhase> {
        self.phase.clone()
    }

    /// Release the subscription. No further updates occur after this.
    pub fn detach(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
            debug!("viewport tracker detached");
        }
    }
}

impl Drop for ViewportWidthTracker {
    fn drop(&mut self) {
        self.detach();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::ManualWidthSource;

    #[test]
    fn test_headless_source_reads_fallback() {
        let source = ManualWidthSource::new();
        let tracker = ViewportWidthTracker::attach(&source);

        assert!(!tracker.is_ready());
        assert_eq!(tracker.width(), FALLBACK_WIDTH);
        assert_eq!(tracker.phase(), ViewportPhase::Uninitialized);
    }

    #[test]
    fn test_ready_source_seeds_immediately() {
        let source = ManualWidthSource::with_width(1024);
        let tracker = ViewportWidthTracker::attach(&source);

        assert!(tracker.is_ready());
        assert_eq!(tracker.width(), 1024);
    }

    #[test]
    fn test_width_follows_notifications() {
        let source = ManualWidthSource::new();
        let tracker = ViewportWidthTracker::attach(&source);
        assert_eq!(tracker.width(), FALLBACK_WIDTH);

        source.set_width(375);
        assert_eq!(tracker.width(), 375);
        assert_eq!(tracker.phase(), ViewportPhase::Ready(375));

        source.set_width(768);
        assert_eq!(tracker.width(), 768);
    }

    #[test]
    fn test_detach_releases_subscription() {
        let source = ManualWidthSource::with_width(500);
        let mut tracker = ViewportWidthTracker::attach(&source);
        assert_eq!(source.listener_count(), 1);

        tracker.detach();
        assert_eq!(source.listener_count(), 0);

        // Post-detach notifications never reach the tracker.
        source.set_width(900);
        assert_eq!(tracker.width(), 500);
    }

    #[test]
    fn test_drop_releases_subscription() {
        let source = ManualWidthSource::new();
        {
            let _tracker = ViewportWidthTracker::attach(&source);
            assert_eq!(source.listener_count(), 1);
        }
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_detach_is_idempotent() {
        let source = ManualWidthSource::new();
        let mut tracker = ViewportWidthTracker::attach(&source);
        tracker.detach();
        tracker.detach();
        assert_eq!(source.listener_count(), 0);
    }
}
