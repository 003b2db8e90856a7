//! Token-level view of SQL source text.
//!
//! Both extractors work on the same [`Scan`]: a flat list of significant
//! tokens with byte spans. Whitespace and comments are dropped here, so a
//! commented-out column or a dotted name inside `-- a.b` never reaches the
//! extractors. String and numeric literals survive as opaque tokens.

use crate::types::{Dialect, Span};
use sqlparser::tokenizer::{Location, Token, TokenWithSpan, Tokenizer};
#[cfg(feature = "tracing")]
use tracing::debug;

/// Lexical class of a significant token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Identifier or keyword. `quoted` is true for `"Name"`-style identifiers,
    /// in which case `value` holds the text between the quotes.
    Word { value: String, quoted: bool },
    Period,
    LParen,
    RParen,
    Comma,
    SemiColon,
    /// Text the tokenizer could not read, up to the end of its line.
    Skipped,
    /// Literals, operators and anything else the extractors only step over.
    Other,
}

#[derive(Debug, Clone)]
pub(crate) struct ScanToken {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

impl ScanToken {
    /// Identifier text, quoted or not.
    pub(crate) fn word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word { value, .. } => Some(value),
            _ => None,
        }
    }

    /// True for an unquoted word equal to `keyword`, ignoring ASCII case.
    pub(crate) fn is_keyword(&self, keyword: &str) -> bool {
        matches!(
            &self.kind,
            TokenKind::Word { value, quoted: false } if value.eq_ignore_ascii_case(keyword)
        )
    }

    pub(crate) fn is_unquoted_word(&self) -> bool {
        matches!(self.kind, TokenKind::Word { quoted: false, .. })
    }

    pub(crate) fn is(&self, kind: &TokenKind) -> bool {
        &self.kind == kind
    }

    fn shifted(mut self, by: usize) -> Self {
        self.span = Span::new(self.span.start + by, self.span.end + by);
        self
    }
}

/// Text the tokenizer could not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScanError {
    pub(crate) message: String,
    /// From the failing character to the end of its line; nothing in this
    /// range produced tokens.
    pub(crate) span: Span,
}

/// Significant tokens of one SQL document.
#[derive(Debug, Clone)]
pub(crate) struct Scan {
    tokens: Vec<ScanToken>,
    errors: Vec<ScanError>,
}

impl Scan {
    pub(crate) fn tokens(&self) -> &[ScanToken] {
        &self.tokens
    }

    pub(crate) fn errors(&self) -> &[ScanError] {
        &self.errors
    }
}

/// Tokenizes `sql`. Never fails: on a lexical error the rest of the failing
/// line is skipped and tokenizing resumes on the next line, so one stray quote
/// cannot hide the statements that follow it.
pub(crate) fn scan(sql: &str, dialect: Dialect) -> Scan {
    let sqlparser_dialect = dialect.to_sqlparser_dialect();
    let mut tokens: Vec<ScanToken> = Vec::new();
    let mut errors = Vec::new();
    let mut offset = 0;

    while offset < sql.len() {
        let chunk = &sql[offset..];
        let mut tokenizer = Tokenizer::new(sqlparser_dialect.as_ref(), chunk);
        let mut raw: Vec<TokenWithSpan> = Vec::new();
        let outcome = tokenizer.tokenize_with_location_into_buf(&mut raw);

        let index = LineIndex::new(chunk);
        let first_new = tokens.len();
        tokens.extend(
            raw.into_iter()
                .filter_map(|token| significant_token(&index, token))
                .map(|token| token.shifted(offset)),
        );

        let Err(err) = outcome else {
            break;
        };

        let scanned_to = tokens[first_new..]
            .last()
            .map_or(offset, |token| token.span.end);
        let failed_at = index
            .offset(err.location)
            .map_or(scanned_to, |relative| offset + relative)
            .max(scanned_to);
        let resume = sql[failed_at..]
            .find('\n')
            .map_or(sql.len(), |newline| failed_at + newline + 1);

        let span = Span::new(failed_at, resume);
        tokens.push(ScanToken {
            kind: TokenKind::Skipped,
            span,
        });
        errors.push(ScanError {
            message: err.message,
            span,
        });
        offset = resume;
    }

    #[cfg(feature = "tracing")]
    debug!(
        tokens = tokens.len(),
        skipped_lines = errors.len(),
        "scanned SQL source"
    );

    Scan { tokens, errors }
}

fn significant_token(index: &LineIndex<'_>, token: TokenWithSpan) -> Option<ScanToken> {
    let kind = match token.token {
        Token::Word(word) => TokenKind::Word {
            value: word.value,
            quoted: word.quote_style.is_some(),
        },
        Token::Period => TokenKind::Period,
        Token::LParen => TokenKind::LParen,
        Token::RParen => TokenKind::RParen,
        Token::Comma => TokenKind::Comma,
        Token::SemiColon => TokenKind::SemiColon,
        Token::Whitespace(_) | Token::EOF => return None,
        _ => TokenKind::Other,
    };

    let start = index.offset(token.span.start)?;
    let end = index.offset(token.span.end).unwrap_or(start).max(start);
    Some(ScanToken {
        kind,
        span: Span::new(start, end),
    })
}

/// Converts tokenizer line/column locations into byte offsets.
struct LineIndex<'a> {
    sql: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(sql: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(sql.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { sql, line_starts }
    }

    /// Byte offset of a 1-based line/column location. Columns count characters.
    fn offset(&self, location: Location) -> Option<usize> {
        let line = usize::try_from(location.line).ok()?;
        let column = usize::try_from(location.column).ok()?;
        if line == 0 || column == 0 {
            return None;
        }

        let line_start = *self.line_starts.get(line - 1)?;
        let line_end = self
            .line_starts
            .get(line)
            .map_or(self.sql.len(), |next| next - 1);
        let line_slice = &self.sql[line_start..line_end];

        match line_slice.char_indices().nth(column - 1) {
            Some((rel_offset, _)) => Some(line_start + rel_offset),
            None if column - 1 == line_slice.chars().count() => Some(line_end),
            None => None,
        }
    }
}

/// Index of the `)` closing the `(` at `open`, if the group is balanced.
pub(crate) fn matching_paren(tokens: &[ScanToken], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Skips a possibly qualified object name (`a`, `a.b`, `a.b.c`) starting at
/// `start`. Returns the index after the name and the last name segment.
pub(crate) fn object_name(tokens: &[ScanToken], start: usize) -> Option<(usize, &str)> {
    let mut last = tokens.get(start)?.word()?;
    let mut idx = start + 1;
    while let (Some(dot), Some(next)) = (tokens.get(idx), tokens.get(idx + 1)) {
        match (dot.is(&TokenKind::Period), next.word()) {
            (true, Some(segment)) => {
                last = segment;
                idx += 2;
            }
            _ => break,
        }
    }
    Some((idx, last))
}

/// Index after an optional `IF NOT EXISTS` clause at `start`.
pub(crate) fn skip_if_not_exists(tokens: &[ScanToken], start: usize) -> usize {
    let matches = ["IF", "NOT", "EXISTS"]
        .iter()
        .enumerate()
        .all(|(offset, kw)| tokens.get(start + offset).is_some_and(|t| t.is_keyword(kw)));
    if matches {
        start + 3
    } else {
        start
    }
}
