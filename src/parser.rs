//! Wiki article parser.
//!
//! Turns an article written in the wiki markdown dialect into a [`Document`]
//! plus the set of aliases it declares. The article is read line by line:
//! `#` sets the title, `##` starts a field, directives in HTML comments
//! toggle document flags, and everything else is content that accumulates
//! into the body, the current field or the footer.

use crate::directive::{self, Directive};
use crate::document::{AliasSet, Document, Field, ParsedArticle};
use crate::error::ParseError;
use crate::inline::InlineRenderer;
use crate::references::{self, ReferenceTable};
use crate::substitutions::Substitutions;

/// Caller-supplied settings for a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip platform substitutions (emoji, channel links).
    pub freestanding: bool,
    pub substitutions: Substitutions,
}

/// Parse a named article.
pub fn parse_article(
    name: &str,
    content: &str,
    options: &ParseOptions,
) -> Result<ParsedArticle, ParseError> {
    parse(Some(name), content, options)
}

/// Parse an article that has no name, e.g. for a preview.
pub fn parse_preview(content: &str, options: &ParseOptions) -> Result<ParsedArticle, ParseError> {
    parse(None, content, options)
}

fn parse(
    name: Option<&str>,
    content: &str,
    options: &ParseOptions,
) -> Result<ParsedArticle, ParseError> {
    let content = content.replace("\r\n", "\n");
    let lines: Vec<&str> = content.lines().collect();

    let table = ReferenceTable::collect(lines.iter().copied());
    let renderer = InlineRenderer::new(&table, &options.substitutions, options.freestanding);

    let mut parser = ArticleParser::new(renderer);
    for (idx, line) in lines.iter().enumerate() {
        parser.feed_line(idx + 1, line)?;
    }
    let mut article = parser.finish()?;
    article.document.name = name.map(str::to_string);

    log::debug!(
        "parsed article {:?}: {} fields, {} aliases, {} references",
        article.document.name,
        article.document.fields.len(),
        article.aliases.len(),
        table.len()
    );
    Ok(article)
}

/// Where content lines currently go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Body,
    Field,
    Footer,
    /// An `inline` directive was seen; the next `##` heading is inline.
    PendingInlineField,
}

/// Accumulated text of one section with its line-joining state.
#[derive(Debug, Default)]
struct SectionText {
    text: String,
    last_hard: bool,
    ends_with_break: bool,
}

impl SectionText {
    /// Append a rendered line.
    ///
    /// Hard lines (and the line after one) start on a new line. Other lines
    /// are joined with a single space because the renderer collapses single
    /// newlines anyway.
    fn push(&mut self, rendered: &str, hard: bool) {
        if !self.text.is_empty() {
            if hard || self.last_hard {
                if !self.ends_with_break {
                    self.text.push('\n');
                }
            } else if !self.text.ends_with(char::is_whitespace) {
                self.text.push(' ');
            }
        }
        self.text.push_str(rendered);
        self.last_hard = hard;
        self.ends_with_break = !rendered.is_empty() && rendered.ends_with('\n');
    }

    fn finish(self) -> Option<String> {
        let trimmed = self.text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[derive(Debug)]
struct FieldText {
    name: String,
    inline: bool,
    value: SectionText,
}

/// Single-pass state machine over the lines of one article.
struct ArticleParser<'a> {
    inline: InlineRenderer<'a>,
    section: Section,
    in_code_block: bool,
    last_was_blockquote: bool,
    title: Option<String>,
    body: SectionText,
    fields: Vec<FieldText>,
    footer: SectionText,
    image: Option<String>,
    set_author: bool,
    plain_mode: bool,
    aliases: AliasSet,
}

impl<'a> ArticleParser<'a> {
    fn new(inline: InlineRenderer<'a>) -> Self {
        Self {
            inline,
            section: Section::Body,
            in_code_block: false,
            last_was_blockquote: false,
            title: None,
            body: SectionText::default(),
            fields: Vec::new(),
            footer: SectionText::default(),
            image: None,
            set_author: false,
            plain_mode: false,
            aliases: AliasSet::new(),
        }
    }

    /// Classify and consume one line (`line_no` is 1-indexed).
    fn feed_line(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        let trimmed = line.trim();

        if self.in_code_block || is_fence(trimmed) {
            if is_fence(trimmed) {
                self.in_code_block = !self.in_code_block;
            }
            return self.push_content(line_no, line, true);
        }

        let marker = heading(line).filter(|_| !self.inline.starts_with_channel(line));
        if let Some((level, text)) = marker {
            match level {
                1 => return self.set_title(line_no, text),
                2 => return self.start_field(line_no, text),
                _ => {}
            }
        } else if let Some(found) = Directive::from_line(trimmed) {
            return self.apply_directive(line_no, found);
        } else if trimmed == "---" {
            self.section = Section::Footer;
            return Ok(());
        } else if let Some(url) = directive::image_url(trimmed) {
            self.image = Some(url.to_string());
            return Ok(());
        } else if references::is_definition(line) {
            return Ok(());
        }

        self.push_content(line_no, line, false)
    }

    fn set_title(&mut self, line_no: usize, text: &str) -> Result<(), ParseError> {
        if self.title.is_some() {
            return Err(ParseError::DuplicateTitle { line: line_no });
        }
        self.title = Some(text.to_string());
        self.section = Section::Body;
        Ok(())
    }

    fn start_field(&mut self, line_no: usize, text: &str) -> Result<(), ParseError> {
        let name = self
            .inline
            .render(text)
            .map_err(|source| ParseError::Inline {
                line: line_no,
                source,
            })?;
        self.fields.push(FieldText {
            name,
            inline: self.section == Section::PendingInlineField,
            value: SectionText::default(),
        });
        self.section = Section::Field;
        Ok(())
    }

    fn apply_directive(&mut self, line_no: usize, directive: Directive) -> Result<(), ParseError> {
        match directive {
            Directive::Inline => self.section = Section::PendingInlineField,
            Directive::Footer => self.section = Section::Footer,
            Directive::UserAuthor => self.set_author = true,
            Directive::NoEmbed => self.plain_mode = true,
            Directive::Image(url) => self.image = Some(url),
            Directive::Alias(aliases) => {
                for alias in aliases {
                    if self.aliases.contains(&alias) {
                        return Err(ParseError::DuplicateAlias {
                            line: line_no,
                            alias,
                        });
                    }
                    self.aliases.insert(alias);
                }
            }
            Directive::Unknown(body) => {
                log::warn!("line {line_no}: unrecognized directive \"{body}\"");
            }
        }
        Ok(())
    }

    /// Append a content line to the current section.
    ///
    /// `verbatim` lines belong to a code block and skip inline rewriting.
    fn push_content(
        &mut self,
        line_no: usize,
        line: &str,
        verbatim: bool,
    ) -> Result<(), ParseError> {
        let trimmed = line.trim();
        let blockquote = trimmed.starts_with('>');
        let hard = verbatim
            || (blockquote && self.last_was_blockquote)
            || trimmed.is_empty()
            || trimmed.starts_with('#')
            || is_list_item(trimmed);

        let rendered = if verbatim {
            line.to_string()
        } else {
            self.inline
                .render(line)
                .map_err(|source| ParseError::Inline {
                    line: line_no,
                    source,
                })?
        };
        if !trimmed.is_empty() {
            self.last_was_blockquote = blockquote;
        }

        let target = match self.section {
            Section::Body => Some(&mut self.body),
            Section::Field => self.fields.last_mut().map(|field| &mut field.value),
            Section::Footer => Some(&mut self.footer),
            Section::PendingInlineField => None,
        };
        match target {
            Some(text) => text.push(&rendered, hard),
            None if trimmed.is_empty() => {}
            None => return Err(ParseError::ContentBeforeInlineField { line: line_no }),
        }
        Ok(())
    }

    /// Check end-of-input invariants and build the result.
    fn finish(self) -> Result<ParsedArticle, ParseError> {
        if self.in_code_block {
            return Err(ParseError::UnterminatedCodeBlock);
        }
        if self.section == Section::PendingInlineField {
            return Err(ParseError::DanglingInlineDirective);
        }
        let title = self
            .title
            .filter(|title| !title.is_empty())
            .ok_or(ParseError::MissingTitle)?;

        let body = self.body.finish();
        let footer = self.footer.finish();
        let fields: Vec<Field> = self
            .fields
            .into_iter()
            .map(|field| Field {
                name: field.name,
                value: field.value.finish().unwrap_or_default(),
                inline: field.inline,
            })
            .collect();

        if self.plain_mode {
            if body.is_none() {
                return Err(ParseError::PlainWithoutBody);
            }
            if footer.is_some() {
                return Err(ParseError::PlainWithFooter);
            }
            if !fields.is_empty() {
                return Err(ParseError::PlainWithFields);
            }
        }

        Ok(ParsedArticle {
            document: Document {
                name: None,
                title,
                body,
                fields,
                footer,
                image: self.image,
                set_author: self.set_author,
                plain_mode: self.plain_mode,
            },
            aliases: self.aliases,
        })
    }
}

/// Heading level and text for a line opening with a `#` run.
fn heading(line: &str) -> Option<(usize, &str)> {
    let rest = line.trim_start_matches('#');
    let level = line.len() - rest.len();
    (level > 0).then_some((level, rest.trim()))
}

fn is_fence(trimmed: &str) -> bool {
    trimmed.starts_with("```")
}

/// `- item` or `1. item`.
fn is_list_item(trimmed: &str) -> bool {
    if trimmed == "-" || trimmed.starts_with("- ") {
        return true;
    }
    let rest = trimmed.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == trimmed.len() {
        return false;
    }
    match rest.strip_prefix('.') {
        Some(after) => after.is_empty() || after.starts_with(char::is_whitespace),
        None => false,
    }
}
