//! Inline rewriting of a single content line.
//!
//! Plain text runs through [`Substitutions`], inline code spans are copied
//! through untouched, and link masks are resolved against the article's
//! [`ReferenceTable`] into native `[mask](url)` syntax.

use crate::error::InlineError;
use crate::references::ReferenceTable;
use crate::scan::find_unescaped;
use crate::substitutions::Substitutions;

/// Rewrites raw lines into display-ready text for one article.
#[derive(Debug, Clone, Copy)]
pub struct InlineRenderer<'a> {
    references: &'a ReferenceTable,
    substitutions: &'a Substitutions,
    freestanding: bool,
}

/// A link mask that was recognized at some `[`.
struct ResolvedMask {
    text: String,
    consumed: usize,
}

impl<'a> InlineRenderer<'a> {
    pub fn new(
        references: &'a ReferenceTable,
        substitutions: &'a Substitutions,
        freestanding: bool,
    ) -> Self {
        Self {
            references,
            substitutions,
            freestanding,
        }
    }

    /// Whether `line` starts with a channel shortcut that this renderer
    /// would rewrite, so it must not be read as a heading.
    pub fn starts_with_channel(&self, line: &str) -> bool {
        !self.freestanding && self.substitutions.channel_at_line_start(line)
    }

    /// Rewrite one line.
    pub fn render(&self, line: &str) -> Result<String, InlineError> {
        let mut out = String::with_capacity(line.len());
        let mut plain = String::new();
        let mut escaped = false;
        let mut cursor = 0;

        while let Some(c) = line[cursor..].chars().next() {
            let width = c.len_utf8();
            if escaped {
                // Keep the escape so the platform renderer still sees it.
                plain.push('\\');
                plain.push(c);
                escaped = false;
                cursor += width;
                continue;
            }
            match c {
                '\\' => {
                    escaped = true;
                    cursor += width;
                }
                '`' => {
                    self.flush(&mut plain, &mut out);
                    match find_unescaped(line, '`', cursor + 1) {
                        Some(end) => {
                            out.push_str(&line[cursor..=end]);
                            cursor = end + 1;
                        }
                        None => {
                            out.push_str(&line[cursor..]);
                            return Ok(out);
                        }
                    }
                }
                '[' => match self.resolve_mask(line, cursor)? {
                    Some(mask) => {
                        self.flush(&mut plain, &mut out);
                        out.push_str(&mask.text);
                        cursor += mask.consumed;
                    }
                    None => {
                        plain.push('[');
                        cursor += width;
                    }
                },
                _ => {
                    plain.push(c);
                    cursor += width;
                }
            }
        }

        if escaped {
            plain.push('\\');
        }
        self.flush(&mut plain, &mut out);
        Ok(out)
    }

    fn flush(&self, plain: &mut String, out: &mut String) {
        if plain.is_empty() {
            return;
        }
        out.push_str(&self.substitutions.apply(plain, self.freestanding));
        plain.clear();
    }

    /// Try to read a link mask starting at the `[` at byte `open`.
    ///
    /// `Ok(None)` means the bracket is literal text. A blank mask (`[]`,
    /// `[ ]`) is never looked up in the reference table and stays literal,
    /// so task-list boxes don't fail as unknown references.
    fn resolve_mask(&self, line: &str, open: usize) -> Result<Option<ResolvedMask>, InlineError> {
        let Some(close) = find_mask_end(line, open) else {
            return Ok(None);
        };
        let mask = &line[open + 1..close];
        if mask.trim().is_empty() {
            return Ok(None);
        }
        let after = close + 1;
        let rest = &line[after..];

        if rest.starts_with('(') {
            let end = find_unescaped(line, ')', after + 1).ok_or_else(|| {
                InlineError::UnterminatedLinkUrl {
                    mask: mask.to_string(),
                }
            })?;
            return Ok(Some(ResolvedMask {
                text: line[open..=end].to_string(),
                consumed: end + 1 - open,
            }));
        }

        if rest.starts_with('[') {
            let end = find_unescaped(line, ']', after + 1).ok_or_else(|| {
                InlineError::UnterminatedReference {
                    mask: mask.to_string(),
                }
            })?;
            // `[mask][]` falls back to the mask as key.
            let key = match line[after + 1..end].trim() {
                "" => mask.trim(),
                key => key,
            };
            let url = self.lookup(key)?;
            return Ok(Some(ResolvedMask {
                text: format!("[{mask}]({url})"),
                consumed: end + 1 - open,
            }));
        }

        let url = self.lookup(mask.trim())?;
        Ok(Some(ResolvedMask {
            text: format!("[{mask}]({url})"),
            consumed: after - open,
        }))
    }

    fn lookup(&self, key: &str) -> Result<&'a str, InlineError> {
        self.references
            .resolve(key)
            .ok_or_else(|| InlineError::UnknownReference {
                key: key.to_string(),
            })
    }
}

/// Find the `]` that balances the `[` at byte `open`.
///
/// Brackets inside inline code do not count. Returns `None` when the mask
/// never closes on this line.
fn find_mask_end(line: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    let mut cursor = open;

    while let Some(c) = line[cursor..].chars().next() {
        if escaped {
            escaped = false;
        } else {
            match c {
                '\\' => escaped = true,
                '`' => cursor = find_unescaped(line, '`', cursor + 1)?,
                '[' => depth += 1,
                ']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(cursor);
                    }
                }
                _ => {}
            }
        }
        // A skipped code span ends on a backtick, so the width still fits.
        cursor += c.len_utf8();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn references() -> ReferenceTable {
        let mut table = ReferenceTable::default();
        table.insert("ref", "http://y");
        table.insert("label", "http://z");
        table.insert("a [nested] key", "http://n");
        table
    }

    fn substitutions() -> Substitutions {
        Substitutions {
            emoji: BTreeMap::from([("tux".to_string(), "<:tux:1001>".to_string())]),
            channels: BTreeMap::from([("resources".to_string(), "2001".to_string())]),
        }
    }

    fn render(line: &str) -> Result<String, InlineError> {
        let refs = references();
        let subs = substitutions();
        InlineRenderer::new(&refs, &subs, false).render(line)
    }

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("[label](http://x)", "[label](http://x)")]
    #[case("see [label][ref] now", "see [label](http://y) now")]
    #[case("[label]", "[label](http://z)")]
    #[case("[label][]", "[label](http://z)")]
    #[case("[a [nested] key]", "[a [nested] key](http://n)")]
    #[case("![img](http://i.png)", "![img](http://i.png)")]
    #[case("[ ] todo", "[ ] todo")]
    #[case("open [bracket never closes", "open [bracket never closes")]
    fn resolves_link_masks(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(render(line).unwrap(), expected);
    }

    #[test]
    fn code_spans_pass_through() {
        assert_eq!(
            render("use `[x]` and `:tux:` here :tux:").unwrap(),
            "use `[x]` and `:tux:` here <:tux:1001>"
        );
    }

    #[test]
    fn unterminated_code_span_copies_remainder() {
        assert_eq!(
            render(":tux: `open [x] :tux:").unwrap(),
            "<:tux:1001> `open [x] :tux:"
        );
    }

    #[test]
    fn escaped_backticks_are_plain() {
        assert_eq!(render("a\\`b\\`c").unwrap(), "a\\`b\\`c");
    }

    #[test]
    fn escaped_bracket_is_not_a_mask() {
        assert_eq!(render("\\[missing]").unwrap(), "\\[missing]");
    }

    #[test]
    fn trailing_backslash_survives() {
        assert_eq!(render("end\\").unwrap(), "end\\");
    }

    #[test]
    fn brackets_in_code_inside_mask_do_not_nest() {
        assert_eq!(
            render("[`a]` label](http://x)").unwrap(),
            "[`a]` label](http://x)"
        );
    }

    #[test]
    fn unknown_reference_is_an_error() {
        assert_eq!(
            render("[label][nope]"),
            Err(InlineError::UnknownReference {
                key: "nope".to_string()
            })
        );
        assert_eq!(
            render("[missing]"),
            Err(InlineError::UnknownReference {
                key: "missing".to_string()
            })
        );
    }

    #[test]
    fn unterminated_url_is_an_error() {
        assert!(matches!(
            render("[label](http://x"),
            Err(InlineError::UnterminatedLinkUrl { .. })
        ));
    }

    #[test]
    fn unterminated_reference_is_an_error() {
        assert!(matches!(
            render("[label][ref"),
            Err(InlineError::UnterminatedReference { .. })
        ));
    }

    #[test]
    fn substitutes_around_links() {
        assert_eq!(
            render(":tux: [label] #resources<br>").unwrap(),
            "<:tux:1001> [label](http://z) <#2001>\n"
        );
    }

    #[test]
    fn freestanding_keeps_shortcodes() {
        let refs = references();
        let subs = substitutions();
        let renderer = InlineRenderer::new(&refs, &subs, true);
        assert_eq!(renderer.render(":tux: #resources").unwrap(), ":tux: #resources");
    }
}
