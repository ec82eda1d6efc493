//! C8 Orchestrator: the top-level `extract(expression)` entrypoint tying
//! RowPlanner, WorkerPool, RowExpander and SingleShotRetriever together.

use core_contracts::{PayloadBuilder, Requester};
use core_dialect::DialectSpec;
use core_events::TARGET_ORCHESTRATOR;
use core_extract::Extractor;
use core_model::{Expression, RowValue};
use core_plan::{Plan, PlanError};
use core_retrieve::RetrieveError;
use core_session::Session;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error(transparent)]
    Retrieve(#[from] RetrieveError),
}

/// The two shapes `extract` can hand back, mirroring upstream's
/// `string | list<...> | null` return convention (§4.8 step 4): a list with
/// exactly one string element collapses to that bare string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutput {
    Scalar(String),
    List(Vec<RowValue>),
}

/// Clears `Session::suppress_resume_info` on every exit path — success,
/// error, or operator abort — the way `use.py`'s `finally` block does.
struct ResumeInfoGuard<'a>(&'a Session);

impl Drop for ResumeInfoGuard<'_> {
    fn drop(&mut self) {
        self.0.set_suppress_resume_info(false);
    }
}

#[allow(clippy::too_many_arguments)]
pub fn extract(
    session: &Session,
    dialect: &DialectSpec,
    extractor: &Extractor,
    requester: &dyn Requester,
    agent: &dyn PayloadBuilder,
    expression: &Expression,
) -> Result<ExtractionOutput, OrchestratorError> {
    let _resume_info_guard = ResumeInfoGuard(session);
    let started_at = Instant::now();

    session.reset_technique();
    let fields = agent.get_fields(expression);

    let plan = core_plan::plan(session, dialect, extractor, requester, agent, expression, &fields)?;

    let rows = match plan {
        Plan::Empty => Vec::new(),
        Plan::Single { expression } => {
            match core_retrieve::expand_row(
                session, dialect, extractor, requester, agent, &expression, &fields, None,
            )? {
                Some(row) => vec![RowValue::from_row(row)],
                None => {
                    tracing::warn!(target: TARGET_ORCHESTRATOR, "partial output: aborted before the single row completed");
                    Vec::new()
                }
            }
        }
        Plan::Rows { expression, start, stop } => {
            let collected = core_pool::run(
                session, dialect, extractor, requester, agent, &expression, &fields, start, stop,
            );
            if !session.cancel_flag.is_continue() {
                tracing::warn!(target: TARGET_ORCHESTRATOR, collected = collected.len(), "partial output: operator abort mid-dump");
            }
            collected
        }
    };

    let output = finalize(rows);

    if !session.config.brute_mode {
        let elapsed = started_at.elapsed();
        tracing::info!(
            target: TARGET_ORCHESTRATOR,
            queries = session.counters.error_count(),
            seconds = elapsed.as_secs_f64(),
            "performed N queries in D seconds"
        );
    }

    Ok(output)
}

fn finalize(rows: Vec<RowValue>) -> ExtractionOutput {
    if rows.len() == 1 {
        if let RowValue::Scalar(Some(value)) = &rows[0] {
            return ExtractionOutput::Scalar(value.clone());
        }
    }
    ExtractionOutput::List(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{ChunkedRequester, DemoAgent};
    use core_config::Config;
    use core_contracts::{InMemoryResumeStore, OperatorUi, PassthroughEncoder};
    use core_dialect::{DialectCatalogue, StaticCatalogue};
    use core_model::DbmsId;
    use std::sync::Arc;

    struct NoPromptUi;
    impl OperatorUi for NoPromptUi {
        fn read_input(&self, _prompt: &str, default: &str) -> String {
            default.to_string()
        }
        fn emit_retrieval(&self, _resumed: bool, _display_value: &str) {}
    }

    fn session(dbms: DbmsId) -> Session {
        Session::new(
            dbms,
            Config::default(),
            Arc::new(InMemoryResumeStore::new()),
            Arc::new(NoPromptUi),
            Arc::new(PassthroughEncoder),
        )
    }

    #[test]
    fn single_scalar_on_oracle_unwraps_and_costs_one_request() {
        let session = session(DbmsId::Oracle);
        let dialect = StaticCatalogue.spec(DbmsId::Oracle);
        let extractor = Extractor::new(&session.markers);
        let requester = ChunkedRequester::new(session.markers.clone(), vec!["Oracle 11g"]);
        let expr = Expression::new("SELECT banner FROM v$version WHERE rownum=1");

        let output = extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr).unwrap();
        assert_eq!(output, ExtractionOutput::Scalar("Oracle 11g".to_string()));
        assert_eq!(requester.call_count(), 1);
        assert!(!session.suppress_resume_info());
    }

    #[test]
    fn cache_hit_on_second_call_issues_no_requests() {
        let session = session(DbmsId::Oracle);
        let dialect = StaticCatalogue.spec(DbmsId::Oracle);
        let extractor = Extractor::new(&session.markers);
        let requester = ChunkedRequester::new(session.markers.clone(), vec!["Oracle 11g"]);
        let expr = Expression::new("SELECT banner FROM v$version WHERE rownum=1");

        extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr).unwrap();
        let before_second_call = requester.call_count();
        let output = extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr).unwrap();

        assert_eq!(output, ExtractionOutput::Scalar("Oracle 11g".to_string()));
        assert_eq!(requester.call_count(), before_second_call);
    }

    #[test]
    fn chunked_mysql_scalar_reassembles_across_three_requests() {
        const FIFTY_AS: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        const FIFTY_BS: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
        let session = session(DbmsId::MySql);
        let dialect = StaticCatalogue.spec(DbmsId::MySql);
        let extractor = Extractor::new(&session.markers);
        let requester = ChunkedRequester::new(
            session.markers.clone(),
            vec![FIFTY_AS, FIFTY_BS, "tail"],
        );
        let expr = Expression::new("SELECT version()");

        let output = extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr).unwrap();
        let expected = format!("{FIFTY_AS}{FIFTY_BS}tail");
        assert_eq!(output, ExtractionOutput::Scalar(expected));
        assert_eq!(requester.call_count(), 3);
    }

    #[test]
    fn mysql_limit_clause_dumps_three_two_field_rows_through_the_pool() {
        let mut config = Config::default();
        config.threads = 2;
        config.dump = true;
        let session = Session::new(
            DbmsId::MySql,
            config,
            Arc::new(InMemoryResumeStore::new()),
            Arc::new(NoPromptUi),
            Arc::new(PassthroughEncoder),
        );
        let dialect = StaticCatalogue.spec(DbmsId::MySql);
        let extractor = Extractor::new(&session.markers);
        let requester = crate::demo::DumpRequester::new(session.markers.clone(), 3);
        let expr = Expression::new("SELECT user,host FROM mysql.user LIMIT 0, 3");

        let output = extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr).unwrap();
        match output {
            ExtractionOutput::List(mut rows) => {
                rows.sort_by_key(|r| format!("{r:?}"));
                assert_eq!(rows.len(), 3);
                for row in &rows {
                    assert!(matches!(row, RowValue::Row(values) if values.len() == 2));
                }
            }
            other => panic!("expected a list of three rows, got {other:?}"),
        }
    }

    #[test]
    fn operator_abort_mid_dump_commits_only_the_in_flight_row() {
        let mut config = Config::default();
        config.threads = 1;
        config.dump = true;
        let session = Session::new(
            DbmsId::MySql,
            config,
            Arc::new(InMemoryResumeStore::new()),
            Arc::new(NoPromptUi),
            Arc::new(PassthroughEncoder),
        );
        let dialect = StaticCatalogue.spec(DbmsId::MySql);
        let extractor = Extractor::new(&session.markers);
        let requester = crate::demo::DumpRequester::new(session.markers.clone(), 3)
            .aborting_after(&session.cancel_flag, 4);
        let expr = Expression::new("SELECT user,host FROM mysql.user LIMIT 0, 3");

        let output = extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr).unwrap();
        match output {
            ExtractionOutput::List(rows) => assert_eq!(rows.len(), 1),
            other => panic!("expected a one-row list, got {other:?}"),
        }
        assert!(!session.suppress_resume_info());
    }

    #[test]
    fn trimmed_response_is_detected_and_not_fabricated_into_a_value() {
        let session = session(DbmsId::MySql);
        let dialect = StaticCatalogue.spec(DbmsId::MySql);
        let extractor = Extractor::new(&session.markers);
        let requester = crate::demo::ChunkedRequester::with_script(
            session.markers.clone(),
            vec![crate::demo::ScriptedChunk::Trimmed("leaked partial ")],
        );
        let expr = Expression::new("SELECT version()");

        let output = extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr).unwrap();
        match output {
            ExtractionOutput::List(rows) => {
                assert_eq!(rows, vec![RowValue::Scalar(None)]);
            }
            other => panic!("expected a single null scalar, got {other:?}"),
        }
    }
}
