//! Character-level classification for dictionary phrases and pinyin spellings.

/// CJK Unified Ideographs Extension A through the end of the basic
/// CJK Unified Ideographs block (U+3400..U+9FFF). The range also spans the
/// Yijing hexagram symbols (U+4DC0..U+4DFF); rime dictionaries never carry
/// those in phrase columns, so the contiguous check is kept.
pub fn is_ideograph(c: char) -> bool {
    ('\u{3400}'..='\u{9FFF}').contains(&c)
}

/// Characters allowed in a raw pinyin spelling before normalization.
pub fn is_pinyin_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '\'' | '-' | ':')
}

/// Check if `s` is a phrase of `min..=max` ideographs.
pub fn is_ideographic_phrase(s: &str, min: usize, max: usize) -> bool {
    let mut len = 0usize;
    for c in s.chars() {
        if !is_ideograph(c) {
            return false;
        }
        len += 1;
    }
    (min..=max).contains(&len)
}

/// Check if `s` is a non-empty pinyin spelling (letters, whitespace, `'`, `-`, `:`).
pub fn is_pinyin_spelling(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_pinyin_char)
}

/// Vowels used to decide where pinyin syllables may start.
pub fn is_pinyin_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'v')
}

/// Letters that can open a pinyin syllable as an initial consonant.
pub fn is_pinyin_initial(c: char) -> bool {
    matches!(
        c,
        'b' | 'p'
            | 'm'
            | 'f'
            | 'd'
            | 't'
            | 'n'
            | 'l'
            | 'g'
            | 'k'
            | 'h'
            | 'j'
            | 'q'
            | 'x'
            | 'r'
            | 'z'
            | 'c'
            | 's'
            | 'y'
            | 'w'
    )
}
