//! Macro body classification.
//!
//! A macro's tokens are reduced to a body string (name, trailing `#` and
//! comments dropped, the rest joined by single spaces) and the body is then
//! read as an integer literal, a real literal, or kept verbatim.

use ffigen_core::MacroValue;

use crate::oracle::{Token, TokenKind};

/// Join the body tokens of a macro definition.
///
/// The leading token is dropped when it spells the macro name, and a final
/// `#` punctuation token is dropped as well (libclang extents of a
/// definition can run into the next directive).
#[must_use]
pub fn macro_body(name: &str, tokens: &[Token]) -> String {
    let last = tokens.len().saturating_sub(1);
    let parts: Vec<&str> = tokens
        .iter()
        .enumerate()
        .filter(|(index, token)| {
            let is_name = *index == 0 && token.spelling == name;
            let is_trailing_hash =
                *index == last && token.kind == TokenKind::Punctuation && token.spelling == "#";
            !(is_name || is_trailing_hash || token.kind == TokenKind::Comment)
        })
        .map(|(_, token)| token.spelling.as_str())
        .collect();
    parts.join(" ")
}

/// Classify a macro definition. `None` when the body is empty.
#[must_use]
pub fn classify_macro(name: &str, tokens: &[Token]) -> Option<MacroValue> {
    classify_body(&macro_body(name, tokens))
}

/// Classify an already-joined macro body.
#[must_use]
pub fn classify_body(body: &str) -> Option<MacroValue> {
    if body.is_empty() {
        return None;
    }
    if let Some(value) = parse_integer(body) {
        return Some(MacroValue::Integer(value));
    }
    if let Some(value) = parse_real(body) {
        return Some(MacroValue::Real(value));
    }
    Some(MacroValue::String(body.to_string()))
}

/// Read a C integer literal: optional sign, base prefix (`0x` hex, leading
/// `0` octal), digits, then an integer suffix. Out-of-range magnitudes
/// saturate to the `i64` bounds.
#[must_use]
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, unsigned) = split_sign(text);

    let hex_digits = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_hexdigit()));
    let (radix, digits) = match hex_digits {
        Some(rest) => (16, rest),
        None if unsigned.starts_with('0') => (8, unsigned),
        None => (10, unsigned),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let (digits, suffix) = digits.split_at(end);
    if !is_integer_suffix(suffix) {
        return None;
    }

    let magnitude = u128::from_str_radix(digits, radix).unwrap_or(u128::MAX);
    let limit: u128 = if negative { 1 << 63 } else { (1 << 63) - 1 };
    let clamped = i128::try_from(magnitude.min(limit)).ok()?;
    i64::try_from(if negative { -clamped } else { clamped }).ok()
}

/// Read a real literal: decimal, or C99 hexadecimal (`0x1.8p1`), with an
/// optional single `f`/`F` suffix. Non-finite results are rejected.
#[must_use]
pub fn parse_real(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let (negative, unsigned) = split_sign(text);
    let hex = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"));
    let value = match hex {
        Some(rest) => {
            let magnitude = parse_hex_real(rest)?;
            if negative { -magnitude } else { magnitude }
        }
        None => parse_decimal_real(text)?,
    };
    value.is_finite().then_some(value)
}

fn parse_decimal_real(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = count_digits(&bytes[end..]);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = count_digits(&bytes[end + 1..]);
        end += 1 + fraction;
    }
    if whole + fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut probe = end + 1;
        if matches!(bytes.get(probe), Some(b'+' | b'-')) {
            probe += 1;
        }
        let exponent = count_digits(&bytes[probe.min(bytes.len())..]);
        if exponent > 0 {
            end = probe + exponent;
        }
    }

    let (number, suffix) = text.split_at(end);
    if !is_real_suffix(suffix) {
        return None;
    }
    number.parse().ok()
}

/// Hex mantissa (after `0x`), optional `.` fraction, then a mandatory
/// binary exponent.
fn parse_hex_real(text: &str) -> Option<f64> {
    let mut mantissa = 0.0_f64;
    let mut digits = 0_usize;
    let mut fraction_digits = 0_i64;
    let mut seen_point = false;
    let mut chars = text.char_indices().peekable();

    while let Some(&(_, c)) = chars.peek() {
        if c == '.' && !seen_point {
            seen_point = true;
        } else if let Some(digit) = c.to_digit(16) {
            mantissa = mantissa.mul_add(16.0, f64::from(digit));
            digits += 1;
            if seen_point {
                fraction_digits += 1;
            }
        } else {
            break;
        }
        chars.next();
    }
    if digits == 0 {
        return None;
    }

    let (_, marker) = chars.next()?;
    if !matches!(marker, 'p' | 'P') {
        return None;
    }
    let rest = chars.peek().map_or("", |&(index, _)| &text[index..]);
    let (negative, exponent_text) = split_sign(rest);
    let exponent_len = count_digits(exponent_text.as_bytes());
    if exponent_len == 0 {
        return None;
    }
    let (exponent_digits, suffix) = exponent_text.split_at(exponent_len);
    if !is_real_suffix(suffix) {
        return None;
    }

    let exponent = exponent_digits.parse::<i64>().unwrap_or(i64::MAX);
    let exponent = if negative { -exponent } else { exponent };
    let scale = exponent
        .saturating_sub(fraction_digits.saturating_mul(4))
        .clamp(-4096, 4096);
    Some(mantissa * 2.0_f64.powi(i32::try_from(scale).ok()?))
}

fn is_real_suffix(suffix: &str) -> bool {
    matches!(suffix, "" | "f" | "F")
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else {
        (false, text.strip_prefix('+').unwrap_or(text))
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// `u`/`U` at most once and `l`/`L` at most twice, in any order.
fn is_integer_suffix(suffix: &str) -> bool {
    let unsigned = suffix.chars().filter(|c| matches!(c, 'u' | 'U')).count();
    let long = suffix.chars().filter(|c| matches!(c, 'l' | 'L')).count();
    unsigned + long == suffix.len() && unsigned <= 1 && long <= 2
}
