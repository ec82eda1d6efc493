//! C7: reverses the safe-placeholder substitutions a payload inserts for
//! spaces, `$`, and `@` so a chunk's assembled value reads the way the
//! target actually stored it.

use core_model::SafeCharMap;

/// Pure function, applied exactly once per assembled scalar, after
/// HTML-unescape and before the value is cached.
pub fn restore_chars(value: &str, safe_chars: &SafeCharMap) -> String {
    value
        .replace(&safe_chars.space, " ")
        .replace(&safe_chars.dollar, "$")
        .replace(&safe_chars.at, "@")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_all_three_placeholders() {
        let map = SafeCharMap {
            space: "%SP%".to_string(),
            dollar: "%DL%".to_string(),
            at: "%AT%".to_string(),
        };
        let encoded = "user%SP%name%AT%host%DL%5";
        assert_eq!(restore_chars(encoded, &map), "user name@host$5");
    }

    #[test]
    fn leaves_text_without_placeholders_untouched() {
        let map = SafeCharMap {
            space: "%SP%".to_string(),
            dollar: "%DL%".to_string(),
            at: "%AT%".to_string(),
        };
        assert_eq!(restore_chars("plain text", &map), "plain text");
    }
}
