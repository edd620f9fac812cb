//! Parser for wiki articles written in a constrained markdown dialect.
//!
//! An article becomes a [`Document`] (title, body, fields, footer, image and
//! rendering flags) plus the aliases it can be looked up under.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod directive;
pub mod document;
pub mod error;
pub mod inline;
pub mod parser;
pub mod references;
pub mod scan;
pub mod substitutions;

pub use catalog::{Catalog, LoadFailure};
pub use document::{AliasSet, Document, Field, ParsedArticle};
pub use error::{InlineError, ParseError};
pub use parser::{ParseOptions, parse_article, parse_preview};
pub use substitutions::Substitutions;
