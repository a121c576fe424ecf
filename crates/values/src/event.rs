//! Boolean event codec.

/// Decodes a boolean event token: exactly `"0"` or `"1"`.
pub fn parse_event(s: &str) -> Option<bool> {
    match s {
        "0" => Some(false),
        "1" => Some(true),
        _ => None,
    }
}

/// Encodes a boolean event as its single-character token.
pub fn format_event(event: bool) -> &'static str {
    if event {
        "1"
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_both_values() {
        assert_eq!(parse_event("0"), Some(false));
        assert_eq!(parse_event("1"), Some(true));
    }

    #[test]
    fn parse_rejects_everything_else() {
        for bad in ["", "2", "01", "true", " 1", "1 "] {
            assert_eq!(parse_event(bad), None, "accepted: {bad:?}");
        }
    }

    #[test]
    fn format_roundtrip() {
        assert_eq!(parse_event(format_event(true)), Some(true));
        assert_eq!(parse_event(format_event(false)), Some(false));
    }
}
