//! Filtered line reading and token extraction.
//!
//! Day files are 7-bit-clean text. The reader rejects NUL and high-bit
//! bytes, turns tabs into spaces, drops carriage returns and skips blank
//! lines entirely, so the parser above only ever sees non-empty normalized
//! lines.

use std::io::{BufRead, Read};

use crate::error::DayfileError;

/// Maximum length of a normalized line.
pub(crate) const MAX_LINE_LEN: usize = 149;

/// Reads the next non-blank normalized line, or `None` at end of file.
///
/// # Errors
///
/// Returns [`DayfileError::InvalidChar`] on NUL or high-bit bytes and
/// [`DayfileError::LineTooLong`] when a line exceeds [`MAX_LINE_LEN`].
pub(crate) fn next_line<R: Read>(
    reader: &mut std::io::BufReader<R>,
) -> Result<Option<String>, DayfileError> {
    loop {
        let mut raw = Vec::new();
        let n = reader.read_until(b'\n', &mut raw)?;
        if n == 0 {
            return Ok(None);
        }

        let mut line = String::with_capacity(raw.len());
        for &byte in &raw {
            if byte & 0x80 != 0 || byte == 0 {
                return Err(DayfileError::InvalidChar);
            }
            let ch = match byte {
                b'\t' => ' ',
                b'\r' | b'\n' => continue,
                other => other as char,
            };
            line.push(ch);
            if line.len() > MAX_LINE_LEN {
                return Err(DayfileError::LineTooLong);
            }
        }

        if !line.is_empty() {
            return Ok(Some(line));
        }
    }
}

/// Counts space-separated tokens in a normalized line.
pub(crate) fn count_tokens(line: &str) -> usize {
    line.split_ascii_whitespace().count()
}

/// Returns the `k`-th space-separated token of a normalized line.
pub(crate) fn token(line: &str, k: usize) -> Option<&str> {
    line.split_ascii_whitespace().nth(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    fn reader(data: &str) -> BufReader<&[u8]> {
        BufReader::new(data.as_bytes())
    }

    #[test]
    fn reads_lines_in_order() {
        let mut r = reader("one\ntwo\n");
        assert_eq!(next_line(&mut r).unwrap().as_deref(), Some("one"));
        assert_eq!(next_line(&mut r).unwrap().as_deref(), Some("two"));
        assert_eq!(next_line(&mut r).unwrap(), None);
    }

    #[test]
    fn skips_blank_lines() {
        let mut r = reader("\n\r\n  x\n\n\ny\n");
        assert_eq!(next_line(&mut r).unwrap().as_deref(), Some("  x"));
        assert_eq!(next_line(&mut r).unwrap().as_deref(), Some("y"));
        assert_eq!(next_line(&mut r).unwrap(), None);
    }

    #[test]
    fn last_line_without_newline() {
        let mut r = reader("tail");
        assert_eq!(next_line(&mut r).unwrap().as_deref(), Some("tail"));
        assert_eq!(next_line(&mut r).unwrap(), None);
    }

    #[test]
    fn normalizes_tabs_and_cr() {
        let mut r = reader("a\tb\r\n");
        assert_eq!(next_line(&mut r).unwrap().as_deref(), Some("a b"));
    }

    #[test]
    fn rejects_high_bit_bytes() {
        let mut r = BufReader::new(&b"temp \xb0C\n"[..]);
        assert!(matches!(
            next_line(&mut r),
            Err(DayfileError::InvalidChar)
        ));
    }

    #[test]
    fn rejects_nul_bytes() {
        let mut r = BufReader::new(&b"a\x00b\n"[..]);
        assert!(matches!(
            next_line(&mut r),
            Err(DayfileError::InvalidChar)
        ));
    }

    #[test]
    fn rejects_overlong_line() {
        let long = "x".repeat(MAX_LINE_LEN + 1);
        let mut r = BufReader::new(long.as_bytes());
        assert!(matches!(
            next_line(&mut r),
            Err(DayfileError::LineTooLong)
        ));

        let ok = "x".repeat(MAX_LINE_LEN);
        let mut r = BufReader::new(ok.as_bytes());
        assert_eq!(next_line(&mut r).unwrap().as_deref(), Some(ok.as_str()));
    }

    #[test]
    fn token_extraction() {
        let line = "27.12.2021 17:30  -3.7   0.00 1";
        assert_eq!(count_tokens(line), 5);
        assert_eq!(token(line, 0), Some("27.12.2021"));
        assert_eq!(token(line, 1), Some("17:30"));
        assert_eq!(token(line, 2), Some("-3.7"));
        assert_eq!(token(line, 4), Some("1"));
        assert_eq!(token(line, 5), None);
    }
}
