use std::collections::HashMap;
use std::sync::Mutex;

/// Persistent key -> value cache keyed by exact expression text (§6). The
/// persistence format is an external concern; this trait only names the
/// two operations the engine needs.
pub trait ResumeStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: &str);
}

/// A non-persistent reference implementation. Useful for tests and for the
/// `inj-bin` demo; a real deployment backs this with on-disk storage so
/// resumption survives a process restart, which is the entire point of the
/// cache upstream.
#[derive(Debug, Default)]
pub struct InMemoryResumeStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResumeStore for InMemoryResumeStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
    }
}
