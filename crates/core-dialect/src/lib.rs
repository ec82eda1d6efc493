//! Per-DBMS SQL template catalogue (§6 `DialectCatalogue`).
//!
//! Upstream sqlmap keeps this as an XML lookup table (`queries.xml`)
//! consulted through duck-typed attribute access. Per the REDESIGN FLAGS,
//! that becomes a `DbmsId` tag plus a small `DialectSpec` struct here — one
//! static table, no dynamic dispatch needed for the built-in dialects.

use core_config::settings;
use core_model::DbmsId;
use regex::Regex;
use std::sync::LazyLock;

/// A parsed `LIMIT`/`TOP` clause: absolute `[start, stop)` row range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitClause {
    pub start: usize,
    pub stop: usize,
}

/// The query fragments and parsing rules `core-extract`/`core-plan` need
/// for one DBMS. `substring_query` and `chunk_length` are `None` together
/// for any DBMS not known to truncate error output (single-shot
/// retrieval); `limit_regexp` is `None` for dialects that never expose a
/// rewritable row-limiting clause (Oracle relies on `ROWNUM` embedded in
/// the projection instead, handled in `core-retrieve`).
#[derive(Debug, Clone, Copy)]
pub struct DialectSpec {
    pub id: DbmsId,
    substring_query: Option<&'static str>,
    pub chunk_length: Option<usize>,
    limit_regexp: Option<&'static str>,
    pub supports_top: bool,
    pub limit_string: Option<&'static str>,
    count_query: &'static str,
    /// Oracle's row-limiting clause, when present at all, is never treated
    /// as a signal to fall through to scalar retrieval — multi-row Oracle
    /// output is driven entirely by `ROWNUM` in the projection.
    pub never_multi_row_via_limit: bool,
}

impl DialectSpec {
    /// Formats the `SUBSTRING(col, offset, length)`-shaped template for
    /// this dialect, or `None` if the DBMS is not known to truncate error
    /// output (chunking does not apply).
    pub fn format_substring(&self, col: &str, offset: usize, length: usize) -> Option<String> {
        self.substring_query.map(|tmpl| {
            tmpl.replace("{col}", col)
                .replace("{offset}", &offset.to_string())
                .replace("{length}", &length.to_string())
        })
    }

    pub fn format_count(&self, col: &str) -> String {
        self.count_query.replace("{col}", col)
    }

    /// Compiles this dialect's `LIMIT`-shaped regex, if it has one.
    pub fn limit_regex(&self) -> Option<Regex> {
        self.limit_regexp
            .map(|pat| Regex::new(pat).expect("built-in limit regex is valid"))
    }

    /// Parses a matched `LIMIT`/`TOP` clause into an absolute row range,
    /// applying the spec's Open Question resolution: a missing `start`
    /// capture group means `start = 0`, not an error.
    pub fn parse_limit_captures(caps: &regex::Captures<'_>) -> Option<LimitClause> {
        let stop: usize = caps.name("stop")?.as_str().parse().ok()?;
        let start = caps
            .name("start")
            .and_then(|m| m.as_str().parse::<usize>().ok())
            .unwrap_or(0);
        Some(LimitClause { start, stop })
    }
}

/// The TOP-N fallback MSSQL/SYBASE try when no `LIMIT`-shaped clause
/// matches. Dialect-independent shape, so kept as one constant rather than
/// duplicated per spec.
pub static TOP_N_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bTOP\s+(?P<stop>\d+)\s+").expect("fixed pattern"));

const MYSQL_PGSQL_LIMIT: &str = r"(?i)\bLIMIT\s+(?P<start>\d+)\s*,\s*(?P<stop>\d+)";
const MSSQL_SYBASE_LIMIT: &str = r"(?i)\bLIMIT\s+(?P<start>\d+)\s*,\s*(?P<stop>\d+)";

fn spec_for(id: DbmsId) -> DialectSpec {
    match id {
        DbmsId::MySql => DialectSpec {
            id,
            substring_query: Some("SUBSTRING({col},{offset},{length})"),
            chunk_length: Some(settings::MYSQL_ERROR_CHUNK_LENGTH),
            limit_regexp: Some(MYSQL_PGSQL_LIMIT),
            supports_top: false,
            limit_string: Some(" LIMIT"),
            count_query: "COUNT({col})",
            never_multi_row_via_limit: false,
        },
        DbmsId::PgSql => DialectSpec {
            id,
            substring_query: None,
            chunk_length: None,
            limit_regexp: Some(MYSQL_PGSQL_LIMIT),
            supports_top: false,
            limit_string: Some(" LIMIT"),
            count_query: "COUNT({col})",
            never_multi_row_via_limit: false,
        },
        DbmsId::MsSql => DialectSpec {
            id,
            substring_query: Some("SUBSTRING({col},{offset},{length})"),
            chunk_length: Some(settings::MSSQL_ERROR_CHUNK_LENGTH),
            limit_regexp: Some(MSSQL_SYBASE_LIMIT),
            supports_top: true,
            limit_string: None,
            count_query: "COUNT({col})",
            never_multi_row_via_limit: false,
        },
        DbmsId::Sybase => DialectSpec {
            id,
            substring_query: None,
            chunk_length: None,
            limit_regexp: Some(MSSQL_SYBASE_LIMIT),
            supports_top: true,
            limit_string: None,
            count_query: "COUNT({col})",
            never_multi_row_via_limit: false,
        },
        DbmsId::Oracle => DialectSpec {
            id,
            substring_query: None,
            chunk_length: None,
            limit_regexp: None,
            supports_top: false,
            limit_string: None,
            count_query: "COUNT({col})",
            never_multi_row_via_limit: true,
        },
    }
}

/// Looks up query fragments and parsing rules for a given `DbmsId`.
/// Replaces the duck-typed `queries[dbms].xxx.query` lookup from upstream
/// with a plain trait object seam, so a caller can substitute a custom
/// catalogue (e.g. one loaded from an external template file) without
/// touching the engine.
pub trait DialectCatalogue: Send + Sync {
    fn spec(&self, id: DbmsId) -> DialectSpec;
}

/// The built-in catalogue covering the five DBMS this engine knows about.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalogue;

impl DialectCatalogue for StaticCatalogue {
    fn spec(&self, id: DbmsId) -> DialectSpec {
        spec_for(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mysql_chunks_at_the_configured_length() {
        let spec = StaticCatalogue.spec(DbmsId::MySql);
        assert_eq!(spec.chunk_length, Some(settings::MYSQL_ERROR_CHUNK_LENGTH));
        assert_eq!(
            spec.format_substring("field", 1, 50).as_deref(),
            Some("SUBSTRING(field,1,50)")
        );
    }

    #[test]
    fn oracle_is_single_shot_and_never_multi_row() {
        let spec = StaticCatalogue.spec(DbmsId::Oracle);
        assert_eq!(spec.chunk_length, None);
        assert!(spec.format_substring("field", 1, 50).is_none());
        assert!(spec.never_multi_row_via_limit);
    }

    #[test]
    fn mysql_limit_regex_parses_absolute_range() {
        let spec = StaticCatalogue.spec(DbmsId::MySql);
        let re = spec.limit_regex().unwrap();
        let caps = re.captures("SELECT user FROM mysql.user LIMIT 0, 3").unwrap();
        let clause = DialectSpec::parse_limit_captures(&caps).unwrap();
        assert_eq!(clause, LimitClause { start: 0, stop: 3 });
    }

    #[test]
    fn mssql_top_regex_has_no_start_group() {
        let re = &*TOP_N_REGEX;
        let caps = re.captures("SELECT TOP 5 user FROM sysusers").unwrap();
        let clause = DialectSpec::parse_limit_captures(&caps).unwrap();
        assert_eq!(clause, LimitClause { start: 0, stop: 5 });
    }
}
