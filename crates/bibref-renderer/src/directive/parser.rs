//! Directive syntax parsing.
//!
//! Recognises inline `:name[content]` anywhere in a line and leaf
//! `::name[content]` when it is the only thing on its line.

use super::DirectiveArgs;

/// A directive found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedDirective {
    pub(crate) name: String,
    pub(crate) args: DirectiveArgs,
}

/// Parse a whole line as a leaf directive.
///
/// Returns `None` unless the trimmed line is exactly one `::name...` directive.
pub(crate) fn parse_leaf_line(line: &str) -> Option<ParsedDirective> {
    let trimmed = line.trim();
    let body = trimmed.strip_prefix("::")?;
    if body.starts_with(':') {
        return None;
    }

    let (directive, consumed) = parse_body(body)?;
    body[consumed..].trim().is_empty().then_some(directive)
}

/// Find the first inline directive in `line`.
///
/// Returns the directive with its byte range `(start, end)` in `line`.
/// Colon runs longer than one (`::`, `https://`) are never inline directives,
/// and nothing inside a backtick code span is.
pub(crate) fn find_inline(line: &str) -> Option<(ParsedDirective, usize, usize)> {
    let spans = code_spans(line);
    let mut offset = 0;

    while let Some(found) = line[offset..].find(':') {
        let start = offset + found;

        if let Some(&(_, span_end)) = spans.iter().find(|(s, e)| (*s..*e).contains(&start)) {
            offset = span_end;
            continue;
        }

        let run = line[start..].bytes().take_while(|&b| b == b':').count();

        if run == 1
            && let Some((directive, consumed)) = parse_body(&line[start + 1..])
        {
            return Some((directive, start, start + 1 + consumed));
        }

        offset = start + run;
    }

    None
}

/// Byte ranges of the code spans in `line`, backticks included.
///
/// A span opens with a run of N backticks and closes at the next run of
/// exactly N. An opening run with no closer is literal text. Escaped
/// backticks (`` \` ``) never open a span.
fn code_spans(line: &str) -> Vec<(usize, usize)> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'`' || (i > 0 && bytes[i - 1] == b'\\') {
            i += 1;
            continue;
        }

        let open = backtick_run(bytes, i);
        let mut j = i + open;
        let mut close = None;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let run = backtick_run(bytes, j);
                if run == open {
                    close = Some(j + run);
                    break;
                }
                j += run;
            } else {
                j += 1;
            }
        }

        match close {
            Some(end) => {
                spans.push((i, end));
                i = end;
            }
            None => i += open,
        }
    }

    spans
}

fn backtick_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|&&b| b == b'`').count()
}

/// Parse `name[content]` at the start of `s`.
///
/// Returns the directive and the number of bytes consumed.
fn parse_body(s: &str) -> Option<(ParsedDirective, usize)> {
    let name_len = s
        .find(|c: char| !is_name_char(c))
        .unwrap_or(s.len());
    if name_len == 0 {
        return None;
    }

    let mut pos = name_len;
    let content = delimited(&s[pos..], '[', ']');
    if let Some(content) = content {
        pos += content.len() + 2;
    }

    let directive = ParsedDirective {
        name: s[..name_len].to_owned(),
        args: DirectiveArgs::new(content.unwrap_or_default()),
    };
    Some((directive, pos))
}

/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Text between a balanced `open`/`close` pair at the start of `s`.
fn delimited(s: &str, open: char, close: char) -> Option<&str> {
    if !s.starts_with(open) {
        return None;
    }

    let mut depth = 0_usize;
    for (i, c) in s.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&s[open.len_utf8()..i]);
            }
        }
    }
    None
}
