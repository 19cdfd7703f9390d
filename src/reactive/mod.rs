//! Fine-grained reactivity core.
//!
//! The coordinator runs on a small signal graph:
//!
//! ```text
//! width signal → layout derived → fan-out effect
//! ```
//!
//! - [`signal`] - Mutable reactive value. Reads inside a running effect
//!   register a dependency; writes notify subscribers synchronously.
//! - [`derived`] - Memoized computation. Re-runs when a dependency changes;
//!   downstream observers fire only when the recomputed value differs.
//! - [`effect`] - Side-effecting observer. Runs immediately, re-runs on
//!   dependency change, and returns a stop function that severs all
//!   subscriptions.
//!
//! Single-threaded by design: propagation happens synchronously on the thread
//! that performs the write, and the observer stack lives in a thread local.

mod derived;
mod effect;
mod signal;

pub use derived::{derived, Derived};
pub use effect::{effect, untracked};
pub use signal::{signal, Signal};
