//! C1: locating the marker-wrapped result in a response.

use core_contracts::ResponsePage;
use core_events::TARGET_EXTRACT_TRIM;
use core_model::Markers;
use regex::{Regex, RegexBuilder};

/// Compiles a session's markers into the primary and trim patterns once, so
/// a chunk loop issuing dozens of requests does not recompile a regex per
/// response.
pub struct Extractor {
    primary: Regex,
    trim: Regex,
}

fn build(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
        .expect("marker pattern built from escaped literals is always valid")
}

impl Extractor {
    pub fn new(markers: &Markers) -> Self {
        let start = regex::escape(&markers.start);
        let stop = regex::escape(&markers.stop);
        Self {
            primary: build(&format!("{start}(?P<result>.*?){stop}")),
            trim: build(&format!("{start}(?P<result>.*?)</")),
        }
    }

    /// Applies the primary pattern, in order, to the response body, the
    /// flattened headers, and — only when it is causally tied to this
    /// request — the last followed redirect's body. Falls back to the trim
    /// pattern across the same haystacks, logging a warning once, to detect
    /// server-side truncation rather than retrying.
    pub fn extract(&self, page: &ResponsePage) -> Option<String> {
        let haystacks = self.haystacks(page);

        for haystack in &haystacks {
            if let Some(result) = self.extract_primary(haystack) {
                return Some(result);
            }
        }

        for haystack in &haystacks {
            if let Some(snippet) = self.extract_trim(haystack) {
                tracing::warn!(target: TARGET_EXTRACT_TRIM, snippet = %snippet, "response appears truncated before the stop marker");
                return None;
            }
        }

        None
    }

    fn haystacks<'a>(&self, page: &'a ResponsePage) -> Vec<&'a str> {
        let mut haystacks = Vec::with_capacity(3);
        if let Some(body) = page.body.as_deref() {
            haystacks.push(body);
        }
        if let Some(headers) = page.headers.as_deref() {
            haystacks.push(headers);
        }
        if let Some(redirect) = &page.last_redirect {
            if redirect.uid == page.request_uid {
                haystacks.push(redirect.body.as_str());
            }
        }
        haystacks
    }

    fn extract_primary(&self, haystack: &str) -> Option<String> {
        self.primary
            .captures(haystack)
            .and_then(|caps| caps.name("result"))
            .map(|m| m.as_str().to_string())
    }

    /// Re-runs the primary pattern against a bare string rather than a
    /// response — used on a resume-cache hit to strip any marker framing
    /// the cached value may still carry (§4.3 step 2).
    pub fn strip_markers(&self, text: &str) -> Option<String> {
        self.extract_primary(text)
    }

    fn extract_trim(&self, haystack: &str) -> Option<String> {
        self.trim
            .captures(haystack)
            .and_then(|caps| caps.name("result"))
            .map(|m| m.as_str().to_string())
    }
}
