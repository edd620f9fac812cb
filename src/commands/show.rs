//! Implementation of the `wikidoc show` command.

use anyhow::Result;

use crate::catalog::Catalog;
use crate::cli::OutputFormat;
use crate::commands::preview::{ArticleView, print_article};
use crate::config::WikiConfig;

/// Arguments for the `wikidoc show` command.
pub struct ShowArgs {
    /// Article name or alias.
    pub name: String,
    /// Output format.
    pub format: OutputFormat,
}

/// Execute the `wikidoc show` command.
pub fn execute(args: ShowArgs) -> Result<()> {
    let (config, config_dir) = WikiConfig::discover()?;
    let catalog = Catalog::load(&config_dir.join(&config.articles.root), &config.parse_options())?;

    let view = lookup(&catalog, &args.name)?;
    print_article(&view, args.format)
}

/// Resolve a name or alias to a printable article.
fn lookup<'a>(catalog: &'a Catalog, key: &str) -> Result<ArticleView<'a>> {
    let Some(document) = catalog.get(key) else {
        anyhow::bail!("no article named '{}'", key);
    };
    let aliases = match &document.name {
        Some(name) => catalog.aliases_of(name).collect(),
        None => Vec::new(),
    };
    Ok(ArticleView { document, aliases })
}
