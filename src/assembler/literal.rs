//! Numeric literals. Every operand is written as `0x` followed by
//! one or more hexadecimal digits; decimal, octal and binary forms
//! are rejected.
use regex::Regex;
use std::sync::OnceLock;

fn hex_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]+$").unwrap())
}

/// Parses a hexadecimal literal token.
///
/// Returns `None` if the token is not shaped `0x` + hex digits.
/// Values wider than 32 bits saturate to `u32::MAX`, which no
/// instruction field can hold.
pub fn parse_hex(token: &str) -> Option<u32> {
    if !hex_shape().is_match(token) {
        return None;
    }

    let mut value: u64 = 0;
    for c in token[2..].chars() {
        let digit = c.to_digit(16)?;
        value = match value.checked_mul(16).and_then(|v| v.checked_add(digit as u64)) {
            Some(v) if v <= u32::MAX as u64 => v,
            _ => return Some(u32::MAX),
        };
    }
    Some(value as u32)
}
