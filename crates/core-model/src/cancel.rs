use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide cooperative cancellation flag. `true` means "continue";
/// any worker observing `false` must stop promptly without committing
/// partial per-row results. Single writer (the orchestrator, on abort or
/// reset), many readers.
#[derive(Debug)]
pub struct CancelFlag(AtomicBool);

impl Default for CancelFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelFlag {
    pub fn new() -> Self {
        Self(AtomicBool::new(true))
    }

    pub fn is_continue(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Signals an operator abort: workers observing this stop without
    /// appending further results.
    pub fn cancel(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Rearms the flag at the start of a new technique invocation.
    pub fn reset(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_continuing() {
        assert!(CancelFlag::new().is_continue());
    }

    #[test]
    fn cancel_then_reset_round_trips() {
        let flag = CancelFlag::new();
        flag.cancel();
        assert!(!flag.is_continue());
        flag.reset();
        assert!(flag.is_continue());
    }
}
