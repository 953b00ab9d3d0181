//! Pinyin key normalization.
//!
//! Spellings arrive with inconsistent casing, syllable separators and
//! ü-escapes across sources. Every spelling of the same pronunciation maps to
//! one unsegmented key (`"Xi'an"`, `"xi an"` and `"xian"` all become `"xian"`),
//! which is also the form an IME buffer is matched against.
//!
//! Tone digits are dropped along with every other non-letter, so keys are
//! tone-insensitive.

/// Escape spellings of ü, all mapped to `v`: the ASCII `u:` form, the
/// mis-decoded UTF-8 form (`Ã¼`, matched after lowercasing) and the decoded
/// character itself.
const UMLAUT_ESCAPES: [&str; 3] = ["u:", "ã¼", "ü"];

/// Normalize a raw pinyin spelling into a lookup key.
///
/// Returns an empty string when nothing usable is left; callers must treat
/// an empty key as invalid and skip the record.
pub fn normalize_key(raw: &str) -> String {
    let mut text = raw.to_lowercase();
    for escape in UMLAUT_ESCAPES {
        text = text.replace(escape, "v");
    }
    let text = text.replace(['\'', '-'], " ");

    let mut key = String::with_capacity(text.len());
    for syllable in text.split_whitespace() {
        key.extend(syllable.chars().filter(char::is_ascii_lowercase));
    }
    key
}

/// Like [`normalize_key`], but `None` for an invalid (empty) key.
pub fn try_normalize_key(raw: &str) -> Option<String> {
    let key = normalize_key(raw);
    (!key.is_empty()).then_some(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_examples() {
        assert_eq!(normalize_key("ni hao"), "nihao");
        assert_eq!(normalize_key("ni3 hao"), "nihao");
        assert_eq!(normalize_key("ni3 hao3"), "nihao");
        assert_eq!(normalize_key("xi'an"), "xian");
        assert_eq!(normalize_key("lu:e"), "lve");
        assert_eq!(normalize_key(" Bei-Jing "), "beijing");
    }

    #[test]
    fn test_umlaut_escapes() {
        assert_eq!(normalize_key("LU:E"), "lve");
        assert_eq!(normalize_key("nÃ¼ ren"), "nvren");
        assert_eq!(normalize_key("nü ren"), "nvren");
        assert_eq!(normalize_key("nv ren"), "nvren");
    }

    #[test]
    fn test_invalid_keys() {
        assert_eq!(normalize_key(""), "");
        assert_eq!(normalize_key("   "), "");
        assert_eq!(normalize_key("123"), "");
        assert_eq!(normalize_key("'-' : -"), "");
        assert_eq!(try_normalize_key("42 7"), None);
        assert_eq!(try_normalize_key("ni hao"), Some("nihao".to_string()));
    }

    #[test]
    fn test_strips_non_letters() {
        assert_eq!(normalize_key("zhong1guo2"), "zhongguo");
        assert_eq!(normalize_key("a:b"), "ab");
        assert_eq!(normalize_key("ni\thao"), "nihao");
        assert_eq!(normalize_key("你hao"), "hao");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(raw in "[a-zA-Z0-9 '\\-:]{0,24}") {
            let once = normalize_key(&raw);
            prop_assert_eq!(normalize_key(&once), once.clone());
        }

        #[test]
        fn normalized_key_is_lowercase_ascii(raw in "\\PC{0,24}") {
            let key = normalize_key(&raw);
            prop_assert!(key.chars().all(|c| c.is_ascii_lowercase()));
        }
    }
}
