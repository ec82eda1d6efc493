use std::sync::Mutex;

/// Shared `[next, stop)` integer iterator handed to worker threads. Exhausts
/// monotonically: once `acquire_next` returns `None` it never returns `Some`
/// again. Guarded by a single dedicated lock per §5 — only `acquire_next`
/// ever touches `next`.
#[derive(Debug)]
pub struct RowCursor {
    next: Mutex<usize>,
    stop: usize,
}

impl RowCursor {
    pub fn new(start: usize, stop: usize) -> Self {
        Self {
            next: Mutex::new(start),
            stop,
        }
    }

    /// Atomically takes and returns the next row index, or `None` once the
    /// range is exhausted.
    pub fn acquire_next(&self) -> Option<usize> {
        let mut next = self.next.lock().unwrap_or_else(|e| e.into_inner());
        if *next >= self.stop {
            return None;
        }
        let index = *next;
        *next += 1;
        Some(index)
    }
}
