//! Implementation of the `wikidoc check` command for validating wiki articles.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::catalog::{Catalog, LoadFailure};
use crate::cli::OutputFormat;
use crate::config::WikiConfig;
use crate::parser::ParseOptions;

/// Arguments for the `wikidoc check` command.
pub struct CheckArgs {
    /// Article directories to check.
    pub paths: Vec<PathBuf>,
    /// Output format.
    pub format: OutputFormat,
    /// Force freestanding parsing.
    pub freestanding: bool,
}

/// Results of checking article directories.
#[derive(Debug, Default, Serialize)]
pub struct CheckResults {
    /// Number of article files found.
    pub articles_checked: usize,
    /// Number of articles that loaded.
    pub articles_loaded: usize,
    /// Articles that failed, with the reason.
    pub failures: Vec<LoadFailure>,
}

impl CheckResults {
    fn add_catalog(&mut self, catalog: &Catalog) {
        self.articles_checked += catalog.scanned();
        self.articles_loaded += catalog.len();
        self.failures.extend(catalog.failures().iter().cloned());
    }

    fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Execute the `wikidoc check` command.
pub fn execute(args: CheckArgs) -> Result<()> {
    let (config, config_dir) = WikiConfig::discover()?;
    let mut options = config.parse_options();
    options.freestanding |= args.freestanding;

    let roots = if args.paths.is_empty() {
        vec![config_dir.join(&config.articles.root)]
    } else {
        args.paths.clone()
    };

    let results = check_roots(&roots, &options)?;

    match args.format {
        OutputFormat::Text => output_text(&results),
        OutputFormat::Json => output_json(&results)?,
    }

    if !results.is_success() {
        let failed = results.failures.len();
        anyhow::bail!(
            "Check failed: {} problem{}",
            failed,
            if failed == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

/// Load each root as its own catalog and collect the outcome.
fn check_roots(roots: &[PathBuf], options: &ParseOptions) -> Result<CheckResults> {
    let mut results = CheckResults::default();
    for root in roots {
        let catalog = Catalog::load(root, options)
            .with_context(|| format!("Failed to load articles from {}", root.display()))?;
        results.add_catalog(&catalog);
    }
    Ok(results)
}

/// Output results in text format.
fn output_text(results: &CheckResults) {
    for failure in &results.failures {
        println!("{}: error: {}", failure.path.display(), failure.message);
    }
    if !results.failures.is_empty() {
        println!();
    }

    print!(
        "Checked {} article{}: ",
        results.articles_checked,
        if results.articles_checked == 1 { "" } else { "s" }
    );
    if results.is_success() {
        println!("all articles loaded");
    } else {
        let failed = results.failures.len();
        println!(
            "{} loaded, {} problem{}",
            results.articles_loaded,
            failed,
            if failed == 1 { "" } else { "s" }
        );
    }
}

/// Output results in JSON format.
fn output_json(results: &CheckResults) -> Result<()> {
    let json = serde_json::to_string_pretty(results).context("Failed to serialize results")?;
    println!("{}", json);
    Ok(())
}
