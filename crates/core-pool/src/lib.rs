//! C6 WorkerPool: fans a `Plan::Rows` range out across a bounded set of
//! OS threads, each driving `core_retrieve::expand_row` against a shared
//! `RowCursor` and appending into a shared `OutputBuffer`.
//!
//! A row that fails its transport call is logged and skipped — one bad
//! row never aborts the batch (§7). An operator abort (cancel flag
//! cleared) stops every worker promptly without committing a partial row.

use core_contracts::{PayloadBuilder, Requester};
use core_dialect::DialectSpec;
use core_events::TARGET_POOL_WORKER;
use core_extract::Extractor;
use core_model::{Expression, OutputBuffer, ProjectedFields, RowCursor, RowValue};
use core_session::Session;

/// Runs the `[start, stop)` row range to completion and returns whatever
/// rows were collected, in arrival order. `start >= stop` returns an
/// empty result without spawning any thread.
#[allow(clippy::too_many_arguments)]
pub fn run(
    session: &Session,
    dialect: &DialectSpec,
    extractor: &Extractor,
    requester: &dyn Requester,
    agent: &dyn PayloadBuilder,
    expression: &Expression,
    fields: &ProjectedFields,
    start: usize,
    stop: usize,
) -> Vec<RowValue> {
    let pending = stop.saturating_sub(start);
    if pending == 0 {
        return Vec::new();
    }

    let cursor = RowCursor::new(start, stop);
    let output = OutputBuffer::new();
    let num_threads = session.config.threads.max(1).min(pending);

    tracing::info!(
        target: TARGET_POOL_WORKER,
        start,
        stop,
        threads = num_threads,
        "worker pool starting"
    );

    std::thread::scope(|scope| {
        for _ in 0..num_threads {
            scope.spawn(|| worker_loop(session, dialect, extractor, requester, agent, expression, fields, &cursor, &output));
        }
    });

    let rows = output.snapshot();
    tracing::info!(target: TARGET_POOL_WORKER, collected = rows.len(), "worker pool finished");
    rows
}

#[allow(clippy::too_many_arguments)]
fn worker_loop(
    session: &Session,
    dialect: &DialectSpec,
    extractor: &Extractor,
    requester: &dyn Requester,
    agent: &dyn PayloadBuilder,
    expression: &Expression,
    fields: &ProjectedFields,
    cursor: &RowCursor,
    output: &OutputBuffer,
) {
    while let Some(row_index) = cursor.acquire_next() {
        if !session.cancel_flag.is_continue() {
            break;
        }

        match core_retrieve::expand_row(
            session, dialect, extractor, requester, agent, expression, fields, Some(row_index),
        ) {
            Ok(Some(row)) => {
                if session.cancel_flag.is_continue() {
                    output.push(row);
                } else {
                    break;
                }
            }
            Ok(None) => {
                tracing::debug!(target: TARGET_POOL_WORKER, row = row_index, "row aborted mid-flight, stopping worker");
                break;
            }
            Err(error) => {
                tracing::warn!(target: TARGET_POOL_WORKER, row = row_index, %error, "row retrieval failed, skipping");
                continue;
            }
        }
    }
}
