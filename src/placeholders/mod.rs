//! Locate bind placeholders in SQL text.
//!
//! A lightweight state machine skips quoted strings, backtick identifiers and comments, so
//! `':name'` inside a literal is never mistaken for a placeholder. Backslash escapes inside
//! literals are honoured only for [`Dialect::Standard`]; `SQLite` has none.

mod parsers;
mod scanner;

use parsers::{
    is_block_comment_end, is_block_comment_start, is_double_colon, is_doubled,
    is_line_comment_start,
};
use scanner::{State, scan_ident, skip_digits};

use crate::types::Dialect;

/// A placeholder found in SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder<'a> {
    /// `:name` (the name excludes the leading marker)
    Named(&'a str),
    /// `?` (optionally numbered, e.g. `?2`)
    Positional,
}

/// A placeholder and its byte range in the scanned SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub placeholder: Placeholder<'a>,
}

/// Find every placeholder outside literals and comments, in text order.
#[must_use]
pub fn scan_placeholders(sql: &str, dialect: Dialect) -> Vec<PlaceholderSpan<'_>> {
    let backslash_escapes = dialect == Dialect::Standard;
    let bytes = sql.as_bytes();
    let mut spans = Vec::new();
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::SingleQuoted,
                b'"' => state = State::DoubleQuoted,
                b'`' => state = State::BacktickQuoted,
                _ if is_line_comment_start(bytes, idx) => state = State::LineComment,
                _ if is_block_comment_start(bytes, idx) => {
                    state = State::BlockComment(1);
                    idx += 1;
                }
                b':' if !is_double_colon(bytes, idx) => {
                    if let Some(end) = scan_ident(bytes, idx + 1) {
                        spans.push(PlaceholderSpan {
                            start: idx,
                            end,
                            placeholder: Placeholder::Named(&sql[idx + 1..end]),
                        });
                        idx = end;
                        continue;
                    }
                }
                b'?' => {
                    let end = skip_digits(bytes, idx + 1);
                    spans.push(PlaceholderSpan {
                        start: idx,
                        end,
                        placeholder: Placeholder::Positional,
                    });
                    idx = end;
                    continue;
                }
                _ => {}
            },
            State::SingleQuoted | State::DoubleQuoted | State::BacktickQuoted => {
                let quote = match state {
                    State::SingleQuoted => b'\'',
                    State::DoubleQuoted => b'"',
                    _ => b'`',
                };
                if b == quote {
                    if is_doubled(bytes, idx, quote) {
                        idx += 1;
                    } else {
                        state = State::Normal;
                    }
                } else if backslash_escapes && b == b'\\' && quote != b'`' {
                    idx += 1;
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment(depth) => {
                if is_block_comment_start(bytes, idx) {
                    state = State::BlockComment(depth + 1);
                    idx += 1;
                } else if is_block_comment_end(bytes, idx) {
                    state = if depth == 1 {
                        State::Normal
                    } else {
                        State::BlockComment(depth - 1)
                    };
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    spans
}

/// Rebuild `sql`, replacing each placeholder with `replace`'s output.
///
/// Returning `None` keeps the placeholder text as written.
pub fn substitute<F>(sql: &str, dialect: Dialect, mut replace: F) -> String
where
    F: FnMut(Placeholder<'_>) -> Option<String>,
{
    let mut out = String::with_capacity(sql.len());
    let mut cursor = 0;
    for span in scan_placeholders(sql, dialect) {
        out.push_str(&sql[cursor..span.start]);
        match replace(span.placeholder) {
            Some(text) => out.push_str(&text),
            None => out.push_str(&sql[span.start..span.end]),
        }
        cursor = span.end;
    }
    out.push_str(&sql[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(sql: &str) -> Vec<Placeholder<'_>> {
        names_in(sql, Dialect::Standard)
    }

    fn names_in(sql: &str, dialect: Dialect) -> Vec<Placeholder<'_>> {
        scan_placeholders(sql, dialect)
            .into_iter()
            .map(|s| s.placeholder)
            .collect()
    }

    #[test]
    fn finds_named_placeholders_in_order() {
        assert_eq!(
            names("UPDATE t SET name = :name WHERE t.id = :id"),
            [Placeholder::Named("name"), Placeholder::Named("id")]
        );
    }

    #[test]
    fn finds_positional_placeholders() {
        assert_eq!(
            names("INSERT INTO t (a,b) VALUES (?,?),(?2,?)").len(),
            4
        );
    }

    #[test]
    fn skips_literals_comments_and_casts() {
        let sql = "select ':a', \"?\", `:b` -- :c\n/* ? /* :d */ */ x::text from t where a = :e";
        assert_eq!(names(sql), [Placeholder::Named("e")]);
    }

    #[test]
    fn handles_escaped_quotes() {
        assert_eq!(names("select 'it''s :x', 'a\\'b :y' where z = ?"), [Placeholder::Positional]);
    }

    #[test]
    fn backslash_ends_an_embedded_literal() {
        let sql = r"SELECT * FROM t WHERE path = 'C:\' AND id = :id";
        assert_eq!(names_in(sql, Dialect::Embedded), [Placeholder::Named("id")]);
        // For a server the backslash escapes the quote, so the literal runs on.
        assert!(names_in(sql, Dialect::Standard).is_empty());
    }

    #[test]
    fn substitute_keeps_unmatched_placeholders() {
        let out = substitute("a = :a and b = :b", Dialect::Standard, |p| match p {
            Placeholder::Named("a") => Some("1".to_string()),
            _ => None,
        });
        assert_eq!(out, "a = 1 and b = :b");
    }

    #[test]
    fn bare_colon_is_not_a_placeholder() {
        assert!(names("select '10:30' as t, 1 : 2").is_empty());
    }
}
