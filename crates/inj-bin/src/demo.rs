//! Reference `PayloadBuilder`/`Requester` implementations reproducing the
//! end-to-end scenarios from spec §8, used by this crate's own tests and by
//! `main`'s `demo` subcommand. Not a real HTTP client or payload templater —
//! payloads here are plain text the paired demo `Requester` parses back out
//! to decide what to answer with.

use core_contracts::{Requester, RequesterError, ResponsePage};
use core_model::{CancelFlag, Expression, Markers, ProjectedFields};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A `PayloadBuilder` that does just enough field-splitting and row-index
/// rewriting to drive the demo scenarios; the fragments it wraps an
/// expression in carry no real SQL injection semantics.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoAgent;

impl core_contracts::PayloadBuilder for DemoAgent {
    fn get_fields(&self, expression: &Expression) -> ProjectedFields {
        let text = expression.as_str();
        let after_select = text.split_once("SELECT ").map(|(_, rest)| rest).unwrap_or(text);
        let raw = after_select.split(" FROM ").next().unwrap_or(after_select).trim();
        let fields = raw.split(',').map(|f| f.trim().to_string()).collect();
        ProjectedFields::new(raw, fields)
    }

    fn null_and_cast_field(&self, column: &str) -> String {
        format!("IFNULL(CAST({column} AS CHAR),0x20)")
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
        row_index: usize,
        _expression: &Expression,
        field: &str,
        _first_field: &str,
    ) -> Expression {
        Expression::new(format!("{field} LIMIT {row_index},1"))
    }

    fn injection_vector(&self) -> String {
        "1".to_string()
    }

    fn unescape(&self, injected: &str) -> String {
        injected.to_string()
    }
}

/// One scripted chunk response. `Body` is a well-formed marker pair;
/// `Trimmed` wraps with the start marker and a bare `</` close (no stop
/// marker) to exercise the trim-detection path; `Empty` omits the body
/// entirely, the natural way a chunking DBMS signals "nothing more".
pub enum ScriptedChunk {
    Body(&'static str),
    Trimmed(&'static str),
    Empty,
}

/// Replays a fixed sequence of chunk responses, one per call, then falls
/// back to `Empty` once the script is exhausted.
pub struct ChunkedRequester {
    markers: Markers,
    script: Vec<ScriptedChunk>,
    calls: AtomicUsize,
}

impl ChunkedRequester {
    pub fn new(markers: Markers, bodies: Vec<&'static str>) -> Self {
        Self {
            markers,
            script: bodies.into_iter().map(ScriptedChunk::Body).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_script(markers: Markers, script: Vec<ScriptedChunk>) -> Self {
        Self {
            markers,
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Requester for ChunkedRequester {
    fn query_page(&self, _payload: &str, _content: bool) -> Result<ResponsePage, RequesterError> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst);
        let body = match self.script.get(idx) {
            Some(ScriptedChunk::Body(text)) => {
                Some(format!("{}{}{}", self.markers.start, text, self.markers.stop))
            }
            Some(ScriptedChunk::Trimmed(text)) => {
                Some(format!("{}{}</", self.markers.start, text))
            }
            Some(ScriptedChunk::Empty) | None => None,
        };
        Ok(ResponsePage {
            body,
            headers: None,
            request_uid: idx as u64,
            last_redirect: None,
        })
    }
}

/// Answers a two-field multi-row dump (`user,host`) plus its preceding
/// count query, parsing the row index and field name back out of the
/// payload text `DemoAgent` produces. Optionally cancels `cancel_flag`
/// partway through, to demonstrate an operator abort mid-dump.
pub struct DumpRequester<'a> {
    markers: Markers,
    row_count: usize,
    cancel_flag: Option<&'a CancelFlag>,
    cancel_after_calls: usize,
    calls: AtomicUsize,
}

impl<'a> DumpRequester<'a> {
    pub fn new(markers: Markers, row_count: usize) -> Self {
        Self {
            markers,
            row_count,
            cancel_flag: None,
            cancel_after_calls: usize::MAX,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn aborting_after(mut self, cancel_flag: &'a CancelFlag, calls: usize) -> Self {
        self.cancel_flag = Some(cancel_flag);
        self.cancel_after_calls = calls;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Requester for DumpRequester<'_> {
    fn query_page(&self, payload: &str, _content: bool) -> Result<ResponsePage, RequesterError> {
        let call_number = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

        let body = if payload.contains("COUNT(") {
            format!("{}{}{}", self.markers.start, self.row_count, self.markers.stop)
        } else {
            let row_index: usize = payload
                .split("LIMIT ")
                .nth(1)
                .and_then(|rest| rest.split(',').next())
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
            let field = if payload.contains("CAST(user") { "user" } else { "host" };
            format!("{}{field}{row_index}{}", self.markers.start, self.markers.stop)
        };

        if call_number == self.cancel_after_calls {
            if let Some(flag) = self.cancel_flag {
                flag.cancel();
            }
        }

        Ok(ResponsePage {
            body: Some(body),
            headers: None,
            request_uid: call_number as u64,
            last_redirect: None,
        })
    }
}
