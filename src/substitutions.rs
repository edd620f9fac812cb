//! Placeholder rewriting for plain (non-code) text.
//!
//! Three rewrites run here: explicit line-break tokens collapse to a newline,
//! `:shortcode:` emoji become platform emoji tokens, and `#channel` shortcuts
//! become channel links. The last two are skipped for freestanding documents.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br\s*/?>(\n)?").expect("valid regex"));

static CHANNEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[^<\w])#([\w-]+)").expect("valid regex"));

/// Openings that sit right before the shortcode inside a platform emoji
/// token: `<:name:id>` for static emoji, `<a:name:id>` for animated ones.
const TOKEN_OPENS: [&str; 2] = ["<", "<a"];

/// Emoji and channel tables applied to plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitutions {
    /// Shortcode (without colons) to platform emoji token.
    #[serde(default)]
    pub emoji: BTreeMap<String, String>,
    /// Channel shortcut name to channel id.
    #[serde(default)]
    pub channels: BTreeMap<String, String>,
}

impl Substitutions {
    /// Rewrite one plain-text fragment.
    pub fn apply(&self, text: &str, freestanding: bool) -> String {
        let mut out = BREAK_RE.replace_all(text, "\n").into_owned();
        if freestanding {
            return out;
        }
        for (name, token) in &self.emoji {
            out = replace_emoji(&out, name, token);
        }
        if !self.channels.is_empty() {
            out = self.replace_channels(&out);
        }
        out
    }

    /// Whether `line` opens with a single `#` directly followed by a
    /// configured channel name, as in `#resources has more`.
    pub fn channel_at_line_start(&self, line: &str) -> bool {
        let Some(rest) = line.strip_prefix('#') else {
            return false;
        };
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(rest.len());
        end > 0 && self.channels.contains_key(&rest[..end])
    }

    fn replace_channels(&self, text: &str) -> String {
        CHANNEL_RE
            .replace_all(text, |caps: &Captures| {
                let whole = &caps[0];
                let prefix = &caps[1];
                let name = &caps[2];
                match self.channels.get(name) {
                    Some(id) => format!("{prefix}<#{id}>"),
                    None => whole.to_string(),
                }
            })
            .into_owned()
    }
}

/// Replace `:name:` with `token` unless it already sits inside an emoji token.
fn replace_emoji(text: &str, name: &str, token: &str) -> String {
    let needle = format!(":{name}:");
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (idx, _) in text.match_indices(&needle) {
        if idx < last {
            continue;
        }
        let before = &text[..idx];
        if TOKEN_OPENS.iter().any(|open| before.ends_with(open)) {
            continue;
        }
        out.push_str(&text[last..idx]);
        out.push_str(token);
        last = idx + needle.len();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn subs() -> Substitutions {
        Substitutions {
            emoji: BTreeMap::from([
                ("tux".to_string(), "<:tux:1001>".to_string()),
                ("success".to_string(), "<:success:1002>".to_string()),
            ]),
            channels: BTreeMap::from([("resources".to_string(), "2001".to_string())]),
        }
    }

    #[rstest]
    #[case("a<br>b", "a\nb")]
    #[case("a<br/>b", "a\nb")]
    #[case("a<br />b", "a\nb")]
    #[case("a<br>\nb", "a\nb")]
    #[case("end<br>", "end\n")]
    fn collapses_break_tokens(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(subs().apply(input, false), expected);
        assert_eq!(subs().apply(input, true), expected);
    }

    #[test]
    fn replaces_emoji_once() {
        let once = subs().apply("hi :tux:", false);
        assert_eq!(once, "hi <:tux:1001>");
        assert_eq!(subs().apply(&once, false), once);
    }

    #[test]
    fn animated_emoji_is_not_doubled() {
        let mut animated = subs();
        animated
            .emoji
            .insert("party".to_string(), "<a:party:1003>".to_string());

        let once = animated.apply("hi :party:", false);
        assert_eq!(once, "hi <a:party:1003>");
        assert_eq!(animated.apply(&once, false), once);
    }

    #[test]
    fn shortcode_after_plain_a_is_replaced() {
        assert_eq!(subs().apply("a:tux:", false), "a<:tux:1001>");
    }

    #[test]
    fn emoji_is_case_sensitive() {
        assert_eq!(subs().apply(":Tux:", false), ":Tux:");
    }

    #[test]
    fn replaces_adjacent_emoji() {
        assert_eq!(
            subs().apply(":tux::success:", false),
            "<:tux:1001><:success:1002>"
        );
    }

    #[rstest]
    #[case("see #resources", "see <#2001>")]
    #[case("#resources first", "<#2001> first")]
    #[case("(#resources)", "(<#2001>)")]
    #[case("#resources-extra", "#resources-extra")]
    #[case("#unknown", "#unknown")]
    #[case("a#resources", "a#resources")]
    #[case("<#resources>", "<#resources>")]
    fn replaces_channel_shortcuts(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(subs().apply(input, false), expected);
    }

    #[rstest]
    #[case("#resources has more", true)]
    #[case("#resources", true)]
    #[case("#resources-extra", false)]
    #[case("#unknown", false)]
    #[case("##resources", false)]
    #[case("# resources", false)]
    #[case("see #resources", false)]
    fn detects_channel_at_line_start(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(subs().channel_at_line_start(line), expected);
    }

    #[test]
    fn freestanding_skips_emoji_and_channels() {
        assert_eq!(
            subs().apply(":tux: in #resources", true),
            ":tux: in #resources"
        );
    }
}
