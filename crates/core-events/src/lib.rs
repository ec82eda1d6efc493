//! `tracing` target/field-name constants shared across the extraction
//! engine crates, so a log filter on e.g. `pool::worker` reliably picks up
//! the same events everywhere instead of each crate inventing its own
//! ad-hoc string.

/// C1: trimmed-output detection.
pub const TARGET_EXTRACT_TRIM: &str = "extract::trim";
/// C2: per-chunk request/response bookkeeping.
pub const TARGET_EXTRACT_CHUNK: &str = "extract::chunk";
/// C3: cache hit/miss bookkeeping.
pub const TARGET_RETRIEVE_CACHE: &str = "retrieve::cache";
/// C4: per-field row expansion.
pub const TARGET_RETRIEVE_ROW: &str = "retrieve::row";
/// C5: row-count planning.
pub const TARGET_PLAN_COUNT: &str = "plan::count";
/// C6: worker pool lifecycle (spawn, abort, exhaustion).
pub const TARGET_POOL_WORKER: &str = "pool::worker";
/// C8: top-level timing/summary.
pub const TARGET_ORCHESTRATOR: &str = "orchestrator";

/// Field name under which the active DBMS identifier is recorded.
pub const FIELD_DBMS: &str = "dbms";
/// Field name under which a row index is recorded.
pub const FIELD_ROW: &str = "row";
