use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hasher};

/// Process-wide mapping from reserved placeholder byte sequences to the
/// literal characters they stand in for. Payloads substitute placeholders
/// for `' '`, `'$'`, `'@'` to survive intermediate encoders; `CharRestorer`
/// (in `core-extract`) reverses the substitution on the assembled value.
#[derive(Debug, Clone)]
pub struct SafeCharMap {
    pub space: String,
    pub dollar: String,
    pub at: String,
}

impl SafeCharMap {
    pub fn generate() -> Self {
        let seed = RandomState::new().build_hasher().finish();
        Self {
            space: format!("%SP{seed:04x}%"),
            dollar: format!("%DL{seed:04x}%"),
            at: format!("%AT{seed:04x}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_distinct() {
        let map = SafeCharMap::generate();
        assert_ne!(map.space, map.dollar);
        assert_ne!(map.dollar, map.at);
        assert_ne!(map.space, map.at);
    }
}
