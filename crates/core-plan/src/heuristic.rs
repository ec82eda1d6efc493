//! Pure helpers backing the multi-row heuristic (§4.5), kept separate from
//! the count-query orchestration in `lib.rs` so each rule can be tested in
//! isolation.

use core_config::settings;
use core_model::{DbmsId, Expression};
use core_session::Session;
use regex::Regex;
use std::sync::LazyLock;

static CASE_CONSTRUCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(CASE\s").expect("fixed pattern"));
static ORDER_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\sORDER\s+BY\s").expect("fixed pattern"));

pub fn is_multi_row_candidate(session: &Session, expression: &Expression) -> bool {
    let from_source = requested_dump_range(session) || contains_from_clause(expression, session.dbms);
    from_source && !has_case_construct(expression.as_str()) && !settings::SQL_SCALAR_REGEX.is_match(expression.as_str())
}

fn requested_dump_range(session: &Session) -> bool {
    session.config.dump
}

fn contains_from_clause(expression: &Expression, dbms: DbmsId) -> bool {
    let text = expression.as_str();
    if !text.to_uppercase().contains(" FROM ") {
        return false;
    }
    match settings::from_dummy_table(dbms) {
        Some(dummy) => !text.trim_end().to_uppercase().ends_with(&dummy.to_uppercase()),
        None => true,
    }
}

/// A `(CASE ` construct excludes an expression from multi-row treatment,
/// except the `"WHEN use"` sentinel, which marks a benign internal rewrite.
fn has_case_construct(text: &str) -> bool {
    CASE_CONSTRUCT.is_match(text) && !text.contains("WHEN use")
}

pub fn has_order_by(text: &str) -> bool {
    ORDER_BY.is_match(text)
}

pub fn strip_order_by(expression: &Expression) -> Expression {
    match ORDER_BY.find(expression.as_str()) {
        Some(m) => Expression::new(&expression.as_str()[..m.start()]),
        None => expression.clone(),
    }
}

pub fn replace_projection(expression: &Expression, raw: &str, replacement: &str) -> Expression {
    expression.replace_first(raw, replacement)
}

pub fn answer_is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Config;
    use core_contracts::{InMemoryResumeStore, OperatorUi, PassthroughEncoder};
    use std::sync::Arc;

    struct NoPromptUi;
    impl OperatorUi for NoPromptUi {
        fn read_input(&self, _prompt: &str, default: &str) -> String {
            default.to_string()
        }
        fn emit_retrieval(&self, _resumed: bool, _display_value: &str) {}
    }

    fn session(dbms: DbmsId, dump: bool) -> Session {
        let mut config = Config::default();
        config.dump = dump;
        Session::new(
            dbms,
            config,
            Arc::new(InMemoryResumeStore::new()),
            Arc::new(NoPromptUi),
            Arc::new(PassthroughEncoder),
        )
    }

    #[test]
    fn from_clause_on_a_real_table_is_a_candidate() {
        let session = session(DbmsId::MySql, false);
        let expr = Expression::new("SELECT user FROM mysql.user");
        assert!(is_multi_row_candidate(&session, &expr));
    }

    #[test]
    fn oracle_dual_is_not_a_candidate() {
        let session = session(DbmsId::Oracle, false);
        let expr = Expression::new("SELECT banner FROM DUAL");
        assert!(!is_multi_row_candidate(&session, &expr));
    }

    #[test]
    fn scalar_aggregate_is_never_a_candidate_even_with_dump() {
        let session = session(DbmsId::MySql, true);
        let expr = Expression::new("SELECT COUNT(*) FROM mysql.user");
        assert!(!is_multi_row_candidate(&session, &expr));
    }

    #[test]
    fn case_construct_excludes_unless_sentinel_present() {
        let session = session(DbmsId::MySql, false);
        let with_case = Expression::new("SELECT (CASE WHEN x=1 THEN a ELSE b END) FROM t");
        assert!(!is_multi_row_candidate(&session, &with_case));

        let sentinel = Expression::new("SELECT (CASE WHEN use x THEN a ELSE b END) FROM t");
        assert!(is_multi_row_candidate(&session, &sentinel));
    }

    #[test]
    fn strip_order_by_truncates_case_insensitively() {
        let expr = Expression::new("SELECT user FROM t order by host");
        assert_eq!(strip_order_by(&expr).as_str(), "SELECT user FROM t");
    }
}
