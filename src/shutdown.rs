//! Ctrl-C handling.
//! The handler raises a flag; the organizer checks it between files, so an
//! interrupted run stops cleanly after the copy in progress.

use std::sync::atomic::{AtomicBool, Ordering};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Request a cooperative shutdown (idempotent).
#[inline]
pub fn request() {
    SHUTDOWN.store(true, Ordering::Relaxed);
}

/// Check whether a shutdown has been requested.
#[inline]
pub fn is_requested() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

/// Install the Ctrl-C handler. It raises the flag, then runs `on_signal`
/// (used by the binary to flush the log writer).
pub fn install<F>(mut on_signal: F) -> Result<(), ctrlc::Error>
where
    F: FnMut() + Send + 'static,
{
    ctrlc::set_handler(move || {
        request();
        on_signal();
    })
}
