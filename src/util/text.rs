//! Text helpers for the URL input field

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '='
            | '+'
            | '*'
            | '&'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '~'
            | '\\'
            | '?'
    )
}

/// Character class used to find word boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    Whitespace,
    WordChar,
    Punctuation,
}

pub fn char_type(ch: char) -> CharType {
    if ch.is_whitespace() {
        CharType::Whitespace
    } else if is_punctuation(ch) {
        CharType::Punctuation
    } else {
        CharType::WordChar
    }
}

/// Delete the word before the end of `s` (Option+Backspace)
///
/// Trailing whitespace goes first, then one run of same-type characters, so
/// `https://example.com/docs` loses `docs`, then `/`, then `com`.
pub fn delete_word_backward(s: &mut String) {
    while s.ends_with(char::is_whitespace) {
        s.pop();
    }
    let Some(last) = s.chars().last() else {
        return;
    };
    let kind = char_type(last);
    while s.chars().last().map(char_type) == Some(kind) {
        s.pop();
    }
}
