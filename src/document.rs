//! The structured result of parsing one wiki article.

use serde::Serialize;
use std::collections::BTreeSet;

/// Alternate names that route to the same document.
pub type AliasSet = BTreeSet<String>;

/// A named sub-section of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
    /// Whether the field renders side by side with its neighbours.
    pub inline: bool,
}

/// A parsed article, ready to be rendered as a rich or plain message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Identifier of the article; `None` for previews.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Fields in document order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Show the invoking user as author.
    pub set_author: bool,
    /// Render as raw text instead of an embed.
    pub plain_mode: bool,
}

/// A document together with the aliases it declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedArticle {
    pub document: Document,
    pub aliases: AliasSet,
}
