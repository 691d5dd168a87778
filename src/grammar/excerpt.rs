use super::rules::Span;
use crate::core::utils::is_delimiter;

const LEFT_CONTEXT: usize = 10;
const RIGHT_CONTEXT: usize = 2;
const MAX_EXCERPT: usize = 20;

/// Short window around a match: some left context back to the previous
/// delimiter, the match itself and a couple of trailing characters.
/// Falls back to the bare match when the window grows too long.
pub fn excerpt(text: &str, span: Span) -> Option<String> {
    let (start, end) = span;
    let matched = text.get(start..end)?;

    let before: Vec<char> = text[..start].chars().rev().take(LEFT_CONTEXT).collect();
    let left: String = before.iter().rev().collect();
    let left = match left.rfind(is_delimiter) {
        Some(idx) => {
            let cut = idx + left[idx..].chars().next().map_or(0, char::len_utf8);
            left[cut..].to_string()
        }
        None => left,
    };

    let right: String = text[end..]
        .chars()
        .take_while(|c| !is_delimiter(*c))
        .take(RIGHT_CONTEXT)
        .collect();

    let window = format!("{}{}{}", left, matched, right);
    if window.chars().count() > MAX_EXCERPT {
        Some(matched.to_string())
    } else {
        Some(window)
    }
}
