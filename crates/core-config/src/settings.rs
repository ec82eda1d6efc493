//! Constants a complete implementation needs but an operator does not tune
//! per run (§6 "Settings"). Values mirror the orders of magnitude spec.md
//! cites ("~50 and ~100 characters") rather than any particular upstream
//! build's exact figures.

use core_model::DbmsId;
use regex::Regex;
use std::sync::LazyLock;

/// MYSQL is known to truncate error-based output at roughly this length.
pub const MYSQL_ERROR_CHUNK_LENGTH: usize = 50;
/// MSSQL is known to truncate error-based output at roughly this length.
pub const MSSQL_ERROR_CHUNK_LENGTH: usize = 100;

/// Above this many pending rows with an `ORDER BY` present, the operator is
/// prompted to drop the clause for speed.
pub const SLOW_ORDER_COUNT_THRESHOLD: usize = 10_000;

/// Above this many pending rows, per-row resume info lines are suppressed
/// entirely (they would otherwise flood the console).
pub const TURN_OFF_RESUME_INFO_LIMIT: usize = 20;

/// Matches expressions whose projection opens with a scalar aggregate
/// (`COUNT(...)`, `MAX(...)`, ...) — such expressions are never candidates
/// for multi-row expansion regardless of what follows, including a trailing
/// `FROM` clause. Deliberately un-anchored at the end, matching sqlmap's own
/// `SQL_SCALAR_REGEX`: `SELECT COUNT(*) FROM mysql.user` must still match.
pub static SQL_SCALAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:SELECT\s+)?(?:COUNT|MIN|MAX|SUM|AVG)\s*\(")
        .expect("SQL_SCALAR_REGEX is a fixed pattern")
});

/// Per-DBMS pseudo-table used for `FROM`-less scalar selects (e.g. Oracle's
/// `DUAL`). An expression ending in its own dialect's dummy table is not
/// treated as a row source even though it contains `FROM`.
pub fn from_dummy_table(dbms: DbmsId) -> Option<&'static str> {
    match dbms {
        DbmsId::Oracle => Some("DUAL"),
        _ => None,
    }
}
