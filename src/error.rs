//! Errors raised while parsing an article.

/// Malformed inline syntax inside a single line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InlineError {
    #[error("unterminated link url after \"[{mask}]\"")]
    UnterminatedLinkUrl { mask: String },
    #[error("unterminated reference after \"[{mask}]\"")]
    UnterminatedReference { mask: String },
    #[error("unknown reference \"{key}\" in reference-style link")]
    UnknownReference { key: String },
}

/// A failed article parse. No partial document survives one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("missing title heading")]
    MissingTitle,
    #[error("line {line}: duplicate title heading")]
    DuplicateTitle { line: usize },
    #[error("line {line}: duplicate alias \"{alias}\"")]
    DuplicateAlias { line: usize, alias: String },
    #[error("line {line}: expected a field heading after the inline directive")]
    ContentBeforeInlineField { line: usize },
    #[error("unterminated code block")]
    UnterminatedCodeBlock,
    #[error("inline directive is not followed by a field heading")]
    DanglingInlineDirective,
    #[error("no embed article must have a body")]
    PlainWithoutBody,
    #[error("no embed article cannot have a footer")]
    PlainWithFooter,
    #[error("no embed article cannot have fields")]
    PlainWithFields,
    #[error("line {line}: {source}")]
    Inline {
        line: usize,
        #[source]
        source: InlineError,
    },
}
