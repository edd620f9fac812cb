//! Structural directives written as whole-line HTML comments.
//!
//! ```text
//! <!-- inline -->
//! <!-- alias foo, bar -->
//! ```

use regex::Regex;
use std::sync::LazyLock;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<!--(.*?)-->$").expect("valid regex"));

static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^!\[[^\]]*\]\(\s*(\S+?)\s*\)$").expect("valid regex"));

/// A recognized (or unrecognized) directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// The next level-2 heading becomes an inline field.
    Inline,
    /// Start the footer.
    Footer,
    /// Show the invoking user as author.
    UserAuthor,
    /// Render as plain text instead of an embed.
    NoEmbed,
    Image(String),
    Alias(Vec<String>),
    Unknown(String),
}

impl Directive {
    /// Recognize a trimmed line that is a directive comment.
    pub fn from_line(trimmed: &str) -> Option<Self> {
        let caps = COMMENT_RE.captures(trimmed)?;
        Some(Self::from_body(caps.get(1)?.as_str().trim()))
    }

    /// Classify the text between `<!--` and `-->`.
    pub fn from_body(body: &str) -> Self {
        match body {
            "inline" => return Directive::Inline,
            "---" => return Directive::Footer,
            "user author" => return Directive::UserAuthor,
            "no embed" => return Directive::NoEmbed,
            _ => {}
        }
        if let Some(url) = image_url(body) {
            return Directive::Image(url.to_string());
        }
        if let Some(url) = body.strip_prefix("image ") {
            return Directive::Image(url.trim().to_string());
        }
        if let Some(list) = body.strip_prefix("alias ") {
            let aliases = list
                .split(',')
                .map(str::trim)
                .filter(|alias| !alias.is_empty())
                .map(str::to_string)
                .collect();
            return Directive::Alias(aliases);
        }
        Directive::Unknown(body.to_string())
    }
}

/// Extract the url from a bare `![alt](url)` image token.
pub fn image_url(trimmed: &str) -> Option<&str> {
    IMAGE_RE
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("<!-- inline -->", Directive::Inline)]
    #[case("<!--inline-->", Directive::Inline)]
    #[case("<!-- --- -->", Directive::Footer)]
    #[case("<!-- user author -->", Directive::UserAuthor)]
    #[case("<!-- no embed -->", Directive::NoEmbed)]
    #[case(
        "<!-- ![logo](https://example.com/a.png) -->",
        Directive::Image("https://example.com/a.png".to_string())
    )]
    #[case(
        "<!-- image https://example.com/b.png -->",
        Directive::Image("https://example.com/b.png".to_string())
    )]
    #[case(
        "<!-- alias foo, bar ,, baz -->",
        Directive::Alias(vec!["foo".to_string(), "bar".to_string(), "baz".to_string()])
    )]
    #[case("<!-- TODO: tidy -->", Directive::Unknown("TODO: tidy".to_string()))]
    fn recognizes_directives(#[case] line: &str, #[case] expected: Directive) {
        assert_eq!(Directive::from_line(line), Some(expected));
    }

    #[test]
    fn ignores_partial_comments() {
        assert_eq!(Directive::from_line("text <!-- inline -->"), None);
        assert_eq!(Directive::from_line("<!-- inline --> text"), None);
        assert_eq!(Directive::from_line("<!-- inline"), None);
    }

    #[test]
    fn directive_names_are_exact() {
        assert_eq!(
            Directive::from_line("<!-- Inline -->"),
            Some(Directive::Unknown("Inline".to_string()))
        );
    }

    #[test]
    fn extracts_image_urls() {
        assert_eq!(image_url("![](http://x/y.png)"), Some("http://x/y.png"));
        assert_eq!(image_url("![a](http://x/y.png) trailing"), None);
        assert_eq!(image_url("[a](http://x/y.png)"), None);
    }
}
