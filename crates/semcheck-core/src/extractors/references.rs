use super::tables::skip_or_replace;
use crate::scanner::{object_name, skip_if_not_exists, Scan, ScanToken, TokenKind};
use crate::types::ColumnReference;
#[cfg(feature = "tracing")]
use tracing::trace;

pub(crate) fn references_from_scan(scan: &Scan) -> Vec<ColumnReference> {
    let tokens = scan.tokens();
    let mut references = Vec::new();
    let mut idx = 0;

    while idx < tokens.len() {
        let Some(body_start) = semantic_view_body(tokens, idx) else {
            idx += 1;
            continue;
        };
        let body_end = block_end(tokens, body_start);

        #[cfg(feature = "tracing")]
        let before = references.len();

        collect_dotted(&tokens[body_start..body_end], &mut references);

        #[cfg(feature = "tracing")]
        trace!(
            references = references.len() - before,
            "scanned semantic view block"
        );

        idx = body_end;
    }

    references
}

/// If a semantic view header starts at `start`, returns the index of the first
/// token after the view's name.
///
/// The header is `CREATE` followed by unquoted words containing `SEMANTIC VIEW`,
/// such as `CREATE OR REPLACE SEMANTIC VIEW`.
fn semantic_view_body(tokens: &[ScanToken], start: usize) -> Option<usize> {
    if !tokens.get(start)?.is_keyword("CREATE") {
        return None;
    }

    let mut idx = skip_or_replace(tokens, start + 1);
    loop {
        let token = tokens.get(idx)?;
        if token.is_keyword("SEMANTIC") && tokens.get(idx + 1)?.is_keyword("VIEW") {
            idx += 2;
            break;
        }
        if !token.is_unquoted_word() || token.is_keyword("TABLE") || token.is_keyword("VIEW") {
            return None;
        }
        idx += 1;
    }

    idx = skip_if_not_exists(tokens, idx);
    Some(object_name(tokens, idx).map_or(idx, |(after_name, _)| after_name))
}

/// End of a block body: the next `CREATE` outside parentheses, or end of input.
/// A `;` closes any parentheses left open, so an unbalanced view still ends at
/// the next statement.
fn block_end(tokens: &[ScanToken], body_start: usize) -> usize {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(body_start) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen => depth = depth.saturating_sub(1),
            TokenKind::SemiColon => depth = 0,
            _ if depth == 0 && token.is_keyword("CREATE") => return idx,
            _ => {}
        }
    }
    tokens.len()
}

/// Collects every `identifier . identifier` triple, left to right. A match
/// consumes both identifiers, so `a.b.c` yields only `a.b`.
fn collect_dotted(tokens: &[ScanToken], out: &mut Vec<ColumnReference>) {
    let mut idx = 0;
    while idx + 2 < tokens.len() {
        let triple = (
            tokens[idx].word(),
            tokens[idx + 1].is(&TokenKind::Period),
            tokens[idx + 2].word(),
        );
        match triple {
            (Some(alias), true, Some(column)) => {
                let span = tokens[idx].span.to(tokens[idx + 2].span);
                out.push(ColumnReference::new(alias, column, span));
                idx += 3;
            }
            _ => idx += 1,
        }
    }
}
