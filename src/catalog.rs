//! Loading a directory of wiki articles.
//!
//! Every `*.md` file below the articles root is parsed on its own. A broken
//! article is recorded as a [`LoadFailure`] and skipped; the rest still load.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::parser::{ParseOptions, parse_article};

/// A document that could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// Path to the article file.
    pub path: PathBuf,
    /// Why it failed, as shown to the article author.
    pub message: String,
}

/// All articles loaded from one root, addressable by name or alias.
#[derive(Debug, Default)]
pub struct Catalog {
    documents: BTreeMap<String, Document>,
    /// Lookup key (name or alias) to document name.
    routes: BTreeMap<String, String>,
    failures: Vec<LoadFailure>,
    scanned: usize,
}

impl Catalog {
    /// Load every article under `root`.
    pub fn load(root: &Path, options: &ParseOptions) -> Result<Self> {
        if !root.is_dir() {
            anyhow::bail!("articles directory '{}' does not exist", root.display());
        }
        let files = find_articles(root)?;
        let mut catalog = Self {
            scanned: files.len(),
            ..Self::default()
        };
        for path in &files {
            catalog.load_file(root, path, options);
        }
        log::info!(
            "loaded {} of {} articles from {}",
            catalog.documents.len(),
            files.len(),
            root.display()
        );
        Ok(catalog)
    }

    fn load_file(&mut self, root: &Path, path: &Path, options: &ParseOptions) {
        let name = article_name(root, path);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => return self.fail(path, format!("failed to read file: {e}")),
        };
        let article = match parse_article(&name, &content, options) {
            Ok(article) => article,
            Err(e) => return self.fail(path, e.to_string()),
        };

        if let Some(owner) = self.routes.get(&name) {
            let message = format!("name '{name}' is already used by article '{owner}'");
            return self.fail(path, message);
        }
        self.routes.insert(name.clone(), name.clone());
        for alias in article.aliases {
            match self.routes.get(&alias) {
                Some(owner) => {
                    let message = format!("alias '{alias}' is already used by article '{owner}'");
                    self.fail(path, message);
                }
                None => {
                    self.routes.insert(alias, name.clone());
                }
            }
        }
        log::debug!("loaded article '{name}' from {}", path.display());
        self.documents.insert(name, article.document);
    }

    fn fail(&mut self, path: &Path, message: String) {
        log::warn!("{}: {}", path.display(), message);
        self.failures.push(LoadFailure {
            path: path.to_path_buf(),
            message,
        });
    }

    /// Find a document by name or alias.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.routes
            .get(key)
            .and_then(|name| self.documents.get(name))
    }

    /// Names of all loaded documents, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Aliases pointing at `name`, sorted.
    pub fn aliases_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.routes
            .iter()
            .filter(move |(key, target)| key.as_str() != name && target.as_str() == name)
            .map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }

    /// Number of article files found, loaded or not.
    pub fn scanned(&self) -> usize {
        self.scanned
    }
}

/// Find all `*.md` files below `root`, sorted.
pub fn find_articles(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = root.join("**").join("*.md");
    let pattern = pattern.to_string_lossy();
    let mut files = glob::glob(&pattern)
        .with_context(|| format!("invalid article pattern: {pattern}"))?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to enumerate articles")?;
    files.sort();
    Ok(files)
}

/// Article name: the path below `root` without `.md`, `/`-separated.
fn article_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
