//! C3: one logical scalar retrieval — cache, else chunked reassembly, then
//! write-through.

use crate::error::RetrieveError;
use core_contracts::{PayloadBuilder, Requester};
use core_dialect::DialectSpec;
use core_events::TARGET_RETRIEVE_CACHE;
use core_extract::Extractor;
use core_model::{Expression, RetrievalResult};
use core_session::Session;

/// A scalar's value alongside whether it came from the resume cache — the
/// explicit per-call replacement for upstream's thread-local `resumed` flag
/// (Design Notes §9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalOutcome {
    pub value: RetrievalResult,
    pub resumed: bool,
}

/// `retrieve(expression, field)` per §4.3. `expression` is the cache key and
/// also the text sent to `core-extract` when the cache misses.
#[allow(clippy::too_many_arguments)]
pub fn retrieve(
    session: &Session,
    dialect: &DialectSpec,
    extractor: &Extractor,
    requester: &dyn Requester,
    agent: &dyn PayloadBuilder,
    expression: &Expression,
    field: &str,
) -> Result<RetrievalOutcome, RetrieveError> {
    let key = expression.as_str();

    let mut outcome = match session.resume_store.get(key) {
        Some(cached) => {
            tracing::debug!(target: TARGET_RETRIEVE_CACHE, %key, "resume cache hit");
            let value = extractor.strip_markers(&cached).unwrap_or(cached);
            RetrievalOutcome {
                value: Some(value),
                resumed: true,
            }
        }
        None => {
            let value =
                core_extract::retrieve_scalar(session, dialect, extractor, requester, agent, expression, field)?;
            if let Some(final_value) = &value {
                session.resume_store.put(key, final_value);
            }
            RetrievalOutcome {
                value,
                resumed: false,
            }
        }
    };

    if session.config.safe_char_encode {
        outcome.value = outcome.value.map(|v| session.display_encoder.encode(&v));
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::Config;
    use core_contracts::{
        InMemoryResumeStore, OperatorUi, PassthroughEncoder, RequesterError, ResponsePage,
    };
    use core_dialect::{DialectCatalogue, StaticCatalogue};
    use core_model::{DbmsId, ProjectedFields};
    use std::cell::Cell;
    use std::sync::Arc;

    struct NoPromptUi;
    impl OperatorUi for NoPromptUi {
        fn read_input(&self, _prompt: &str, default: &str) -> String {
            default.to_string()
        }
        fn emit_retrieval(&self, _resumed: bool, _display_value: &str) {}
    }

    struct StubAgent;
    impl PayloadBuilder for StubAgent {
        fn get_fields(&self, expression: &Expression) -> ProjectedFields {
            ProjectedFields::new(expression.as_str(), vec![expression.as_str().to_string()])
        }
        fn null_and_cast_field(&self, column: &str) -> String {
            column.to_string()
        }
        fn prefix_query(&self, _vector: &str) -> String {
            String::new()
        }
        fn suffix_query(&self, query: String) -> String {
            query
        }
        fn payload(&self, new_value: String) -> String {
            new_value
        }
        fn limit_query(
            &self,
            _row_index: usize,
            expression: &Expression,
            _field: &str,
            _first_field: &str,
        ) -> Expression {
            expression.clone()
        }
        fn injection_vector(&self) -> String {
            String::new()
        }
        fn unescape(&self, injected: &str) -> String {
            injected.to_string()
        }
    }

    struct CountingRequester {
        markers: core_model::Markers,
        calls: Cell<usize>,
    }

    impl Requester for CountingRequester {
        fn query_page(&self, _payload: &str, _content: bool) -> Result<ResponsePage, RequesterError> {
            self.calls.set(self.calls.get() + 1);
            Ok(ResponsePage {
                body: Some(format!("{}value{}", self.markers.start, self.markers.stop)),
                headers: None,
                request_uid: 0,
                last_redirect: None,
            })
        }
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
    fn cache_hit_issues_no_requests() {
        let session = session(DbmsId::Oracle);
        session.resume_store.put("banner", "cached-value");
        let dialect = StaticCatalogue.spec(DbmsId::Oracle);
        let extractor = Extractor::new(&session.markers);
        let requester = CountingRequester {
            markers: session.markers.clone(),
            calls: Cell::new(0),
        };
        let expr = Expression::new("banner");
        let outcome = retrieve(
            &session, &dialect, &extractor, &requester, &StubAgent, &expr, "banner",
        )
        .unwrap();
        assert!(outcome.resumed);
        assert_eq!(outcome.value.as_deref(), Some("cached-value"));
        assert_eq!(requester.calls.get(), 0);
    }

    #[test]
    fn cache_miss_writes_through_after_retrieval() {
        let session = session(DbmsId::Oracle);
        let dialect = StaticCatalogue.spec(DbmsId::Oracle);
        let extractor = Extractor::new(&session.markers);
        let requester = CountingRequester {
            markers: session.markers.clone(),
            calls: Cell::new(0),
        };
        let expr = Expression::new("banner");
        let outcome = retrieve(
            &session, &dialect, &extractor, &requester, &StubAgent, &expr, "banner",
        )
        .unwrap();
        assert!(!outcome.resumed);
        assert_eq!(outcome.value.as_deref(), Some("value"));
        assert_eq!(session.resume_store.get("banner").as_deref(), Some("value"));
        assert_eq!(requester.calls.get(), 1);
    }
}
