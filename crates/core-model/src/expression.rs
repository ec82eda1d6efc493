use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

/// An opaque SQL text string consumed by the engine. Immutable once
/// received; every rewrite produces a new `Expression` rather than mutating
/// one in place, so callers can always recover the original.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression(String);

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Replaces the first occurrence of `from` with `to`, leaving the
    /// expression unchanged if `from` does not occur.
    pub fn replace_first(&self, from: &str, to: &str) -> Self {
        match self.0.find(from) {
            Some(pos) => {
                let mut out = String::with_capacity(self.0.len() - from.len() + to.len());
                out.push_str(&self.0[..pos]);
                out.push_str(to);
                out.push_str(&self.0[pos + from.len()..]);
                Self(out)
            }
            None => self.clone(),
        }
    }

    /// Truncates the expression to everything before the first occurrence
    /// of `marker`, if present.
    pub fn truncate_before(&self, marker: &str) -> Self {
        match self.0.find(marker) {
            Some(pos) => Self(self.0[..pos].to_string()),
            None => self.clone(),
        }
    }

    pub fn contains(&self, pat: &str) -> bool {
        self.0.contains(pat)
    }
}

impl From<&str> for Expression {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Process-wide pair of unique byte sequences used to wrap the projected
/// expression's output so it can be located in noisy response text.
/// Invariant: stable for the entire session, chosen once at session init.
#[derive(Debug, Clone)]
pub struct Markers {
    pub start: String,
    pub stop: String,
}

impl Markers {
    /// Generates a fresh marker pair unlikely to occur naturally in a
    /// target's output. Not cryptographic: uniqueness across a session is
    /// the only requirement, so a `RandomState`-seeded hash is sufficient
    /// entropy without pulling in a dedicated RNG crate.
    pub fn generate() -> Self {
        let a = random_u64();
        let b = random_u64();
        Self {
            start: format!("qzXs{a:016x}"),
            stop: format!("qzXe{b:016x}"),
        }
    }
}

fn random_u64() -> u64 {
    RandomState::new().build_hasher().finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_first_only_replaces_once() {
        let expr = Expression::new("a,a,a");
        assert_eq!(expr.replace_first("a", "b").as_str(), "b,a,a");
    }

    #[test]
    fn truncate_before_keeps_prefix() {
        let expr = Expression::new("SELECT x FROM t LIMIT 0,3");
        assert_eq!(
            expr.truncate_before(" LIMIT").as_str(),
            "SELECT x FROM t"
        );
    }

    #[test]
    fn markers_are_distinct_across_calls() {
        let a = Markers::generate();
        let b = Markers::generate();
        assert_ne!(a.start, b.start);
        assert_ne!(a.stop, b.stop);
    }
}
