use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide request counters, incremented under a single atomic
/// discipline rather than the framework-provided lock upstream uses
/// (`incrementCounter`). Only the `ERROR` technique counter exists here —
/// this engine implements only that technique.
#[derive(Debug, Default)]
pub struct Counters {
    error: AtomicU64,
}

impl Counters {
    /// Called once per HTTP request actually performed (§4.8 testable
    /// property: a chunked scalar increments this once per chunk).
    pub fn increment_error(&self) {
        self.error.fetch_add(1, Ordering::SeqCst);
    }

    pub fn error_count(&self) -> u64 {
        self.error.load(Ordering::SeqCst)
    }

    pub fn reset_error(&self) {
        self.error.store(0, Ordering::SeqCst);
    }
}
