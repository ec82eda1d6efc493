//! C5 RowPlanner: decides whether an expression may return multiple rows,
//! and if so, the absolute row range a `WorkerPool` should fan out over.

mod error;
mod heuristic;

pub use error::PlanError;

use core_config::settings;
use core_contracts::{PayloadBuilder, Requester};
use core_dialect::{DialectSpec, TOP_N_REGEX};
use core_events::TARGET_PLAN_COUNT;
use core_extract::Extractor;
use core_model::{Expression, ProjectedFields};
use core_session::Session;

/// What the orchestrator should do for this expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Not multi-row (or the count came back zero/empty with nothing to
    /// fetch): a single non-indexed expansion.
    Single { expression: Expression },
    /// Multi-row: fan out `RowExpander` over `[start, stop)` against
    /// `expression` (already rewritten to drop any original `LIMIT`/`TOP`).
    Rows {
        expression: Expression,
        start: usize,
        stop: usize,
    },
    /// The count query returned zero or empty — nothing to retrieve.
    Empty,
}

/// `RowPlanner::plan` per §4.5. `fields` is the already-parsed projection
/// (`agent.getFields`); the planner only ever rewrites `expression`'s
/// `LIMIT`/`TOP`/`ORDER BY` clauses, never its field list.
#[allow(clippy::too_many_arguments)]
pub fn plan(
    session: &Session,
    dialect: &DialectSpec,
    extractor: &Extractor,
    requester: &dyn Requester,
    agent: &dyn PayloadBuilder,
    expression: &Expression,
    fields: &ProjectedFields,
) -> Result<Plan, PlanError> {
    if !heuristic::is_multi_row_candidate(session, expression) {
        return Ok(Plan::Single {
            expression: expression.clone(),
        });
    }

    let (limit_cond, mut start_limit, mut configured_stop, mut working_expression) =
        resolve_limit_clause(dialect, expression);

    // A matched clause whose own stop bound is <= 1 (e.g. `LIMIT 0,1`), or
    // Oracle's permanent `never_multi_row_via_limit`, means this expression
    // is not actually multi-row despite passing the candidate heuristic —
    // skip straight to a single non-indexed expansion, issuing no count
    // query at all.
    if !limit_cond {
        return Ok(Plan::Single {
            expression: expression.clone(),
        });
    }

    if configured_stop.is_none() && session.config.dump {
        start_limit = session
            .config
            .limit_start
            .map(|s| s.saturating_sub(1))
            .unwrap_or(0);
        configured_stop = session.config.limit_stop;
    }

    let count_expression = heuristic::strip_order_by(&heuristic::replace_projection(
        &working_expression,
        &fields.raw,
        &dialect.format_count("*"),
    ));

    let count_value = core_retrieve::retrieve(
        session,
        dialect,
        extractor,
        requester,
        agent,
        &count_expression,
        &dialect.format_count("*"),
    )?
    .value;

    let stop_limit = match count_value.as_deref() {
        None | Some("") => {
            tracing::warn!(target: TARGET_PLAN_COUNT, "count query returned no output");
            return Ok(Plan::Empty);
        }
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(0) => {
                tracing::warn!(target: TARGET_PLAN_COUNT, "count query returned zero rows");
                return Ok(Plan::Empty);
            }
            Ok(count) => {
                let stop = configured_stop.map(|s| s.min(count)).unwrap_or(count);
                tracing::info!(target: TARGET_PLAN_COUNT, count, stop, "row count resolved");
                stop
            }
            Err(_) => {
                tracing::warn!(target: TARGET_PLAN_COUNT, value = %raw, "non-numeric count result, assuming a single row");
                1
            }
        },
    };

    let pending = stop_limit.saturating_sub(start_limit);

    if pending > settings::SLOW_ORDER_COUNT_THRESHOLD
        && heuristic::has_order_by(working_expression.as_str())
    {
        let answer = session.operator_ui.read_input(
            "ORDER BY clause found on a slow query — remove it for speed? [Y/n]",
            "Y",
        );
        if heuristic::answer_is_yes(&answer) {
            working_expression = heuristic::strip_order_by(&working_expression);
        }
    }

    if pending > settings::TURN_OFF_RESUME_INFO_LIMIT {
        session.set_suppress_resume_info(true);
    }

    Ok(Plan::Rows {
        expression: working_expression,
        start: start_limit,
        stop: stop_limit,
    })
}

/// Parses any pre-existing `LIMIT`/`TOP` clause and decides `limitCond`: the
/// original source's gate on whether this expression is actually treated as
/// multi-row. A matched clause whose own stop bound is `<= 1` sets it false
/// (single-row `LIMIT ...,1` idioms are not worth counting); no clause at
/// all leaves it true and both bounds unset for the dump/count step below;
/// Oracle (`never_multi_row_via_limit`) is false unconditionally, since its
/// row selection goes through `ROWNUM` in the projection rather than a
/// rewritable clause.
///
/// Only a matched MYSQL/PGSQL-style `LIMIT` (dialects exposing
/// `limit_string`) truncates the expression — MSSQL/SYBASE `TOP N` is
/// embedded mid-query and is left in place.
fn resolve_limit_clause(
    dialect: &DialectSpec,
    expression: &Expression,
) -> (bool, usize, Option<usize>, Expression) {
    if dialect.never_multi_row_via_limit {
        return (false, 0, None, expression.clone());
    }

    if let Some(re) = dialect.limit_regex() {
        if let Some(caps) = re.captures(expression.as_str()) {
            if let Some(clause) = DialectSpec::parse_limit_captures(&caps) {
                let limit_cond = clause.stop > 1;
                if !limit_cond {
                    return (false, clause.start, Some(clause.stop), expression.clone());
                }
                let stop = clause.stop + clause.start;
                let truncated = if dialect.limit_string.is_some() {
                    expression.truncate_before(" LIMIT")
                } else {
                    expression.clone()
                };
                return (true, clause.start, Some(stop), truncated);
            }
        }
    }

    if dialect.supports_top {
        if let Some(caps) = TOP_N_REGEX.captures(expression.as_str()) {
            if let Some(clause) = DialectSpec::parse_limit_captures(&caps) {
                return (clause.stop > 1, 0, Some(clause.stop), expression.clone());
            }
        }
    }

    (true, 0, None, expression.clone())
}
