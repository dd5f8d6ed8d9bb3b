//! Best-effort token access
//!
//! All leniency of the flat-file grammar lives here. None of these helpers
//! fail: a missing token is `None`, a non-numeric field is `0`.

/// The `n`-th whitespace-separated token of `line` (zero-based)
pub fn nth_token(line: &str, n: usize) -> Option<&str> {
    line.split_whitespace().nth(n)
}

/// Everything after the first `delimiter`, if there is one
pub fn after_first(line: &str, delimiter: char) -> Option<&str> {
    line.split_once(delimiter).map(|(_, rest)| rest)
}

/// `s` without its final character
pub fn strip_last_char(s: &str) -> &str {
    match s.char_indices().next_back() {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Parse the leading integer of `s`, C `atoi` style.
///
/// Leading whitespace and one sign are accepted, then digits up to the first
/// non-digit. No digits yields 0. Values beyond `i64` saturate.
pub fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(byte - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative {
        -value
    } else {
        value
    }
}
