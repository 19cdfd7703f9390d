//! Terminal width source - the real environment adapter.
//!
//! Reads the width in columns via crossterm and fans out resize events the
//! host event loop hands to [`TerminalWidthSource::dispatch`]. The adapter
//! does not poll or own a thread; like the rest of the crate it runs
//! synchronously on whichever loop drives it.
//!
//! ```ignore
//! use crossterm::event;
//! use masonry_responsive::viewport::TerminalWidthSource;
//!
//! let source = TerminalWidthSource::new();
//! loop {
//!     let ev = event::read()?;
//!     source.dispatch(&ev);
//!     // ... rest of the host loop
//! }
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crossterm::event::Event;
use log::trace;

use super::source::{Subscription, WidthListener, WidthSource};

/// Width source backed by the terminal.
///
/// `current()` returns `None` when stdout is not a terminal, which puts the
/// tracker into its fallback phase rather than failing.
#[derive(Clone, Default)]
pub struct TerminalWidthSource {
    listeners: Rc<RefCell<Vec<(u64, WidthListener)>>>,
    next_id: Rc<Cell<u64>>,
}

impl TerminalWidthSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a crossterm event from the host loop.
    ///
    /// Only `Event::Resize` is of interest; everything else passes through
    /// untouched.
    pub fn dispatch(&self, event: &Event) {
        if let Event::Resize(columns, _rows) = event {
            let width = u32::from(*columns);
            trace!("terminal resize: width={width}");
            let snapshot: Vec<WidthListener> = self
                .listeners
                .borrow()
                .iter()
                .map(|(_, listener)| Rc::clone(listener))
                .collect();
            for listener in snapshot {
                listener(width);
            }
        }
    }
}

impl WidthSource for TerminalWidthSource {
    fn current(&self) -> Option<u32> {
        crossterm::terminal::size()
            .ok()
            .map(|(columns, _rows)| u32::from(columns))
    }

    fn subscribe(&self, listener: WidthListener) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));

        let listeners = Rc::clone(&self.listeners);
        Subscription::new(move || {
            listeners
                .borrow_mut()
                .retain(|(listener_id, _)| *listener_id != id);
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
