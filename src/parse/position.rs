//! Line/column derivation for backends that only report byte offsets.

/// 1-based line and column for a byte offset into a document.
///
/// Columns count bytes within the line, which matches what the toml
/// backend's span refers to. Offsets past the end clamp to the last
/// position.
pub(crate) fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for byte in text.bytes().take(offset) {
        if byte == b'\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_zero_is_line_one_column_one() {
        assert_eq!(line_col("abc", 0), (1, 1));
    }

    #[test]
    fn test_offset_within_first_line() {
        assert_eq!(line_col("abc\ndef", 2), (1, 3));
    }

    #[test]
    fn test_offset_after_newline() {
        assert_eq!(line_col("abc\ndef", 4), (2, 1));
        assert_eq!(line_col("abc\ndef", 6), (2, 3));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        assert_eq!(line_col("ab", 10), (1, 3));
    }
}
