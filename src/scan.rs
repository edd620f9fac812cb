//! Escape-aware character search.
//!
//! A backslash escapes the character that follows it. Two backslashes in a
//! row cancel out, so `\\` followed by a delimiter leaves the delimiter live.

/// Find the first unescaped `target` in `text`, starting at byte offset `start`.
///
/// Returns the byte index of the match, or `None` when every occurrence is
/// escaped or there is none. `start` must lie on a char boundary.
pub fn find_unescaped(text: &str, target: char, start: usize) -> Option<usize> {
    let mut escaped = false;
    for (offset, c) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
        } else if c == target {
            return Some(start + offset);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a`b", '`', 0, Some(1))]
    #[case("a\\`b`", '`', 0, Some(4))]
    #[case("a\\\\`b", '`', 0, Some(3))]
    #[case("a\\\\\\`b", '`', 0, None)]
    #[case("abc", '`', 0, None)]
    #[case("", ']', 0, None)]
    #[case("`x` `y`", '`', 1, Some(2))]
    #[case("]]", ']', 1, Some(1))]
    fn finds_first_unescaped(
        #[case] text: &str,
        #[case] target: char,
        #[case] start: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(find_unescaped(text, target, start), expected);
    }

    #[test]
    fn escape_state_starts_fresh_at_offset() {
        // The backslash before the offset is not seen.
        assert_eq!(find_unescaped("\\`", '`', 1), Some(1));
    }

    #[test]
    fn handles_multibyte_text() {
        let text = "héllo ✓ `code`";
        let idx = find_unescaped(text, '`', 0).unwrap();
        assert_eq!(&text[idx..], "`code`");
    }
}
