//! CLI entrypoint wiring a `Session` and the demo collaborators together,
//! driving the orchestrator across the scenarios named in spec §8. Not a
//! real scanner: no HTTP transport, no injection-vector discovery — those
//! stay behind `core-contracts`, supplied here by `demo`'s fakes.

mod demo;
mod orchestrator;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use core_config::Config;
use core_contracts::{InMemoryResumeStore, OperatorUi, PassthroughEncoder};
use core_dialect::{DialectCatalogue, StaticCatalogue};
use core_extract::Extractor;
use core_model::{DbmsId, Expression};
use core_session::Session;
use core_ui::ConsoleUi;
use demo::{ChunkedRequester, DemoAgent, DumpRequester, ScriptedChunk};
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scenario {
    /// Single scalar, non-chunking DBMS (Oracle).
    Scalar,
    /// Chunked scalar reassembly (MySQL).
    Chunked,
    /// Multi-row dump with a pooled `LIMIT` rewrite (MySQL).
    Dump,
    /// Second identical call against a warm resume cache.
    CacheHit,
    /// Operator abort partway through a dump.
    Abort,
    /// A response whose markers are truncated before the stop marker.
    Trimmed,
}

#[derive(Parser, Debug)]
#[command(name = "inj", version, about = "Error-based SQL injection extraction engine demo")]
struct Args {
    /// Which spec §8 scenario to run.
    #[arg(long, value_enum, default_value_t = Scenario::Scalar)]
    scenario: Scenario,

    /// Optional path to an engine.toml config file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join("inj.log");
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "inj.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .try_init()
    {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

struct NoPromptUi;
impl OperatorUi for NoPromptUi {
    fn read_input(&self, _prompt: &str, default: &str) -> String {
        default.to_string()
    }
    fn emit_retrieval(&self, _resumed: bool, _display_value: &str) {}
}

fn session(dbms: DbmsId, config: Config, console: bool) -> Session {
    let operator_ui: Arc<dyn OperatorUi> = if console {
        Arc::new(ConsoleUi)
    } else {
        Arc::new(NoPromptUi)
    };
    Session::new(
        dbms,
        config,
        Arc::new(InMemoryResumeStore::new()),
        operator_ui,
        Arc::new(PassthroughEncoder),
    )
}

fn run_scenario(scenario: Scenario, config: Config) -> Result<()> {
    match scenario {
        Scenario::Scalar => {
            let session = session(DbmsId::Oracle, config, true);
            let dialect = StaticCatalogue.spec(DbmsId::Oracle);
            let extractor = Extractor::new(&session.markers);
            let requester = ChunkedRequester::new(session.markers.clone(), vec!["Oracle 11g"]);
            let expr = Expression::new("SELECT banner FROM v$version WHERE rownum=1");
            let output =
                orchestrator::extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr)?;
            println!("{output:?}");
        }
        Scenario::Chunked => {
            let session = session(DbmsId::MySql, config, true);
            let dialect = StaticCatalogue.spec(DbmsId::MySql);
            let extractor = Extractor::new(&session.markers);
            let requester = ChunkedRequester::new(
                session.markers.clone(),
                vec!["abcdefghij", "ABCDEFGHIJ", "123"],
            );
            let expr = Expression::new("SELECT version()");
            let output =
                orchestrator::extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr)?;
            println!("{output:?}");
        }
        Scenario::Dump => {
            let mut config = config;
            config.threads = 2;
            config.dump = true;
            let session = session(DbmsId::MySql, config, true);
            let dialect = StaticCatalogue.spec(DbmsId::MySql);
            let extractor = Extractor::new(&session.markers);
            let requester = DumpRequester::new(session.markers.clone(), 3);
            let expr = Expression::new("SELECT user,host FROM mysql.user LIMIT 0, 3");
            let output =
                orchestrator::extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr)?;
            println!("{output:?}");
        }
        Scenario::CacheHit => {
            let session = session(DbmsId::Oracle, config, true);
            let dialect = StaticCatalogue.spec(DbmsId::Oracle);
            let extractor = Extractor::new(&session.markers);
            let requester = ChunkedRequester::new(session.markers.clone(), vec!["Oracle 11g"]);
            let expr = Expression::new("SELECT banner FROM v$version WHERE rownum=1");
            let first =
                orchestrator::extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr)?;
            println!("first call: {first:?} ({} requests)", requester.call_count());
            let second =
                orchestrator::extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr)?;
            println!("second call: {second:?} ({} requests total)", requester.call_count());
        }
        Scenario::Abort => {
            let mut config = config;
            config.threads = 1;
            config.dump = true;
            let session = session(DbmsId::MySql, config, true);
            let dialect = StaticCatalogue.spec(DbmsId::MySql);
            let extractor = Extractor::new(&session.markers);
            // Calls: 1 = count query, 2-3 = row 0's two fields, 4 = row 1's
            // first field — cancelling there lets row 0 commit and drops
            // row 1 mid-flight, matching the "1 row committed" scenario.
            let requester = DumpRequester::new(session.markers.clone(), 3)
                .aborting_after(&session.cancel_flag, 4);
            let expr = Expression::new("SELECT user,host FROM mysql.user LIMIT 0, 3");
            let output =
                orchestrator::extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr)?;
            println!("{output:?}");
            println!("suppress_resume_info = {}", session.suppress_resume_info());
        }
        Scenario::Trimmed => {
            let session = session(DbmsId::MySql, config, true);
            let dialect = StaticCatalogue.spec(DbmsId::MySql);
            let extractor = Extractor::new(&session.markers);
            let requester = ChunkedRequester::with_script(
                session.markers.clone(),
                vec![ScriptedChunk::Trimmed("leaked partial ")],
            );
            let expr = Expression::new("SELECT version()");
            let output =
                orchestrator::extract(&session, &dialect, &extractor, &requester, &DemoAgent, &expr)?;
            println!("{output:?}");
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    let args = Args::parse();
    let config = Config::load_from_optional(args.config.as_deref())?;
    run_scenario(args.scenario, config)
}
