//! Process-wide `Session` — the explicit struct the Design Notes (§9) ask
//! for in place of upstream's scattered `kb.*`/`conf.*` globals: markers,
//! safe-char placeholders, counters, the cancel flag, and handles to the
//! pluggable collaborators, all threaded through the engine by reference
//! instead of read off module-level state.

mod counters;

pub use counters::Counters;

use core_config::Config;
use core_contracts::{DisplayEncoder, OperatorUi, ResumeStore};
use core_model::{CancelFlag, DbmsId, Markers, SafeCharMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Session {
    pub dbms: DbmsId,
    pub markers: Markers,
    pub safe_chars: SafeCharMap,
    pub config: Config,
    pub cancel_flag: CancelFlag,
    pub counters: Counters,
    pub resume_store: Arc<dyn ResumeStore>,
    pub operator_ui: Arc<dyn OperatorUi>,
    pub display_encoder: Arc<dyn DisplayEncoder>,
    suppress_resume_info: AtomicBool,
}

impl Session {
    pub fn new(
        dbms: DbmsId,
        config: Config,
        resume_store: Arc<dyn ResumeStore>,
        operator_ui: Arc<dyn OperatorUi>,
        display_encoder: Arc<dyn DisplayEncoder>,
    ) -> Self {
        Self {
            dbms,
            markers: Markers::generate(),
            safe_chars: SafeCharMap::generate(),
            config,
            cancel_flag: CancelFlag::new(),
            counters: Counters::default(),
            resume_store,
            operator_ui,
            display_encoder,
            suppress_resume_info: AtomicBool::new(false),
        }
    }

    /// Resets per-technique state at the start of each `extract` call
    /// (`initTechnique` upstream): rearms the cancel flag and zeroes the
    /// request counter so repeated calls on one `Session` don't leak state
    /// between logically independent extractions.
    pub fn reset_technique(&self) {
        self.cancel_flag.reset();
        self.counters.reset_error();
    }

    pub fn suppress_resume_info(&self) -> bool {
        self.suppress_resume_info.load(Ordering::SeqCst)
    }

    pub fn set_suppress_resume_info(&self, value: bool) {
        self.suppress_resume_info.store(value, Ordering::SeqCst);
    }
}
