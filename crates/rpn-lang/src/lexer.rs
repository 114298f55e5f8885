//! Token splitting and literal recognition for word-source text.

use rpn_vm::Value;

use crate::error::WordError;

fn is_space(c: char) -> bool {
    c.is_ascii_whitespace()
}

/// Split the next whitespace-delimited word off the front of `rest`.
///
/// Exactly one delimiter after the word is consumed, so inline syntax such
/// as `." text"` sees its text unchanged. Returns an empty string once only
/// whitespace remains.
pub fn next_word(rest: &mut String) -> String {
    let trimmed = rest.trim_start_matches(is_space);
    let (word, tail) = match trimmed.find(is_space) {
        Some(at) => (&trimmed[..at], &trimmed[at + 1..]),
        None => (trimmed, ""),
    };
    let word = word.to_string();
    *rest = tail.to_string();
    word
}

/// Take text up to `delim` off the front of `rest`, consuming the delimiter.
///
/// Returns `None`, leaving `rest` untouched, when the delimiter is missing.
pub fn take_until(rest: &mut String, delim: char) -> Option<String> {
    let at = rest.find(delim)?;
    let taken = rest[..at].to_string();
    rest.replace_range(..at + delim.len_utf8(), "");
    Some(taken)
}

/// True for words that must be read as numbers: a leading digit, or `-`
/// followed by a digit.
pub fn is_number(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Parse a numeric literal.
///
/// `Ok(None)` means the word is not a number at all; a word that looks like
/// one but does not parse is a [`WordError::Parse`].
pub fn parse_number(word: &str) -> Result<Option<Value>, WordError> {
    if !is_number(word) {
        return Ok(None);
    }
    let malformed = || WordError::Parse(format!("malformed number '{word}'"));

    if word.contains('.') {
        return word
            .parse::<f64>()
            .map(|d| Some(Value::Double(d)))
            .map_err(|_| malformed());
    }

    let (negative, digits) = match word.strip_prefix('-') {
        Some(d) => (true, d),
        None => (false, word),
    };
    let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        // from_str_radix takes a sign; the only sign is the leading `-`.
        Some(hex) if hex.starts_with(['+', '-']) => return Err(malformed()),
        Some(hex) => i128::from_str_radix(hex, 16),
        None => digits.parse::<i128>(),
    }
    .map_err(|_| malformed())?;

    let value = if negative { -magnitude } else { magnitude };
    i64::try_from(value)
        .map(|i| Some(Value::Integer(i)))
        .map_err(|_| malformed())
}
