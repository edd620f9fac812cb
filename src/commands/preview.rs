//! Implementation of the `wikidoc preview` command.
//!
//! Parses one article without a name and prints the resulting document, or
//! the parse error exactly as an article author should see it.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::config::WikiConfig;
use crate::document::Document;
use crate::parser::parse_preview;

/// Arguments for the `wikidoc preview` command.
pub struct PreviewArgs {
    /// Article file, or `-` for stdin.
    pub file: PathBuf,
    /// Output format.
    pub format: OutputFormat,
    /// Force freestanding parsing.
    pub freestanding: bool,
}

/// A document together with its lookup aliases, for display.
#[derive(Debug, Serialize)]
pub struct ArticleView<'a> {
    #[serde(flatten)]
    pub document: &'a Document,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<&'a str>,
}

/// Execute the `wikidoc preview` command.
pub fn execute(args: PreviewArgs) -> Result<()> {
    let (config, _) = WikiConfig::discover()?;
    let mut options = config.parse_options();
    options.freestanding |= args.freestanding;

    let content = read_input(&args.file)?;
    let article = match parse_preview(&content, &options) {
        Ok(article) => article,
        Err(e) => anyhow::bail!("{e}"),
    };

    let view = ArticleView {
        document: &article.document,
        aliases: article.aliases.iter().map(String::as_str).collect(),
    };
    print_article(&view, args.format)
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read article from stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))
}

/// Print an article in the requested format.
pub(crate) fn print_article(view: &ArticleView<'_>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render_text(view)),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(view).context("Failed to serialize document")?;
            println!("{}", json);
        }
    }
    Ok(())
}

/// Plain dump of a document for terminal display.
fn render_text(view: &ArticleView<'_>) -> String {
    let doc = view.document;
    let mut out = String::new();

    out.push_str(&format!("# {}\n", doc.title));
    let mut flags = Vec::new();
    if doc.plain_mode {
        flags.push("no embed");
    }
    if doc.set_author {
        flags.push("user author");
    }
    if !flags.is_empty() {
        out.push_str(&format!("({})\n", flags.join(", ")));
    }

    if let Some(body) = &doc.body {
        out.push_str(&format!("\n{}\n", body));
    }
    for field in &doc.fields {
        let marker = if field.inline { " [inline]" } else { "" };
        out.push_str(&format!("\n## {}{}\n", field.name, marker));
        if !field.value.is_empty() {
            out.push_str(&format!("{}\n", field.value));
        }
    }
    if let Some(footer) = &doc.footer {
        out.push_str(&format!("\n---\n{}\n", footer));
    }
    if let Some(image) = &doc.image {
        out.push_str(&format!("\nimage: {}\n", image));
    }
    if !view.aliases.is_empty() {
        out.push_str(&format!("\naliases: {}\n", view.aliases.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ParseOptions, parse_article};
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_full_document() {
        let content = "<!-- alias b, a -->\n<!-- user author -->\n# Title\nBody.\n<!-- inline -->\n## One\nfirst\n## Two\n---\nFoot\n![](http://x/i.png)";
        let article = parse_article("doc", content, &ParseOptions::default()).unwrap();
        let view = ArticleView {
            document: &article.document,
            aliases: article.aliases.iter().map(String::as_str).collect(),
        };

        assert_eq!(
            render_text(&view),
            "# Title\n(user author)\n\nBody.\n\n## One [inline]\nfirst\n\n## Two\n\n---\nFoot\n\nimage: http://x/i.png\n\naliases: a, b\n"
        );
    }

    #[test]
    fn json_view_flattens_document() {
        let article = parse_preview("# T\nbody", &ParseOptions::default()).unwrap();
        let view = ArticleView {
            document: &article.document,
            aliases: vec!["x"],
        };

        let parsed: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&view).unwrap()).unwrap();

        assert_eq!(parsed["title"], "T");
        assert_eq!(parsed["body"], "body");
        assert_eq!(parsed["aliases"][0], "x");
        assert!(parsed.get("name").is_none());
        assert!(parsed.get("fields").is_none());
    }

    #[test]
    fn reads_article_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.md");
        std::fs::write(&path, "# A").unwrap();

        assert_eq!(read_input(&path).unwrap(), "# A");
        assert!(read_input(&dir.path().join("missing.md")).is_err());
    }
}
