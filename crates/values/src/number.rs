//! Bounded integer parsers.
//!
//! The day-file format reserves one large integer as an out-of-band error
//! marker. The parsers here accept only an optional leading sign followed by
//! digits, bounded in length and magnitude, and report a rejected token as
//! `None` instead of the sentinel.

/// The reserved on-disk error value. Valid quantities produced by this crate
/// stay strictly inside `(-SENTINEL, SENTINEL)`.
pub const SENTINEL: i64 = 2_000_000_000;

/// Maximum accepted token length, signs included.
pub const MAX_TOKEN_LEN: usize = 11;

/// Parses an unsigned integer token.
///
/// Accepts an optional leading `+`, all further characters must be digits,
/// total length at most 11. Values reaching the sentinel bound are rejected.
pub fn parse_u32(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_TOKEN_LEN {
        return None;
    }
    if !(bytes[0].is_ascii_digit() || bytes[0] == b'+') {
        return None;
    }
    if !bytes[1..].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = s.strip_prefix('+').unwrap_or(s);
    if digits.is_empty() {
        return None;
    }
    let value: u64 = digits.parse().ok()?;
    if value >= SENTINEL as u64 {
        return None;
    }
    Some(value as u32)
}

/// Parses a signed integer token.
///
/// Accepts an optional leading `+` or `-`, all further characters must be
/// digits, total length at most 11. Values reaching the sentinel bound in
/// either direction are rejected.
pub fn parse_i32(s: &str) -> Option<i32> {
    let bytes = s.as_bytes();
    if bytes.is_empty() || bytes.len() > MAX_TOKEN_LEN {
        return None;
    }
    if !(bytes[0].is_ascii_digit() || bytes[0] == b'+' || bytes[0] == b'-') {
        return None;
    }
    if !bytes[1..].iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if bytes.len() == 1 && !bytes[0].is_ascii_digit() {
        return None;
    }

    let value: i64 = s.parse().ok()?;
    if value <= -SENTINEL || value >= SENTINEL {
        return None;
    }
    Some(value as i32)
}
