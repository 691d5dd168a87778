pub fn is_hiragana_char(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

pub fn is_katakana_char(c: char) -> bool {
    ('\u{30A0}'..='\u{30FF}').contains(&c)
}

pub fn is_kanji_char(c: char) -> bool {
    ('\u{4E00}'..='\u{9FAF}').contains(&c)
}

/// True when the text holds at least one hiragana, katakana or kanji character.
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(|c| is_hiragana_char(c) || is_katakana_char(c) || is_kanji_char(c))
}

/// Every char is in the katakana block (long vowel mark and middle dot included).
pub fn is_all_katakana(word: &str) -> bool {
    !word.is_empty() && word.chars().all(is_katakana_char)
}

pub fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Sentence and clause delimiters used to trim excerpts.
pub fn is_delimiter(c: char) -> bool {
    matches!(c, '。' | '、' | '！' | '？' | '!' | '?' | '「' | '」' | '『' | '』' | '\n' | '…')
        || c.is_whitespace()
}

/// Byte spans of each token inside `text`, searched left to right.
/// Tokens the tokenizer normalised away (not found verbatim) get `None`.
pub fn token_spans(text: &str, surfaces: impl Iterator<Item = impl AsRef<str>>) -> Vec<Option<(usize, usize)>> {
    let mut cursor = 0;
    surfaces
        .map(|surface| {
            let surface = surface.as_ref();
            if surface.is_empty() {
                return None;
            }
            text[cursor..].find(surface).map(|offset| {
                let start = cursor + offset;
                let end = start + surface.len();
                cursor = end;
                (start, end)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_detection() {
        assert!(contains_japanese("hello 日本"));
        assert!(contains_japanese("ひらがな"));
        assert!(!contains_japanese("hello world"));
        assert!(is_all_katakana("コーヒー"));
        assert!(is_all_katakana("タカギ"));
        assert!(!is_all_katakana("コーヒー豆"));
        assert!(!is_all_katakana(""));
    }

    #[test]
    fn test_token_spans() {
        let text = "私は日本語";
        let spans = token_spans(text, ["私", "は", "日本語", "ない"].iter());
        assert_eq!(spans[0], Some((0, 3)));
        assert_eq!(spans[1], Some((3, 6)));
        assert_eq!(spans[2], Some((6, 15)));
        assert_eq!(spans[3], None);
    }
}
