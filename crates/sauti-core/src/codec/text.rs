//! Rendering and parsing of the bracket token format.
//!
//! The wire format is the concatenation of `<open><prefix><code><close>`
//! tokens with no separators, e.g. `[St8][Pi3][Hu5]`. Parsing is strict:
//! every byte must belong to a well-formed token, and the first fault aborts
//! with its byte offset.

use crate::config::{StreamRole, StreamTable};
use crate::error::{Error, Result};

/// Wire-level token: stream role plus code, no timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub role: StreamRole,
    pub code: u32,
}

pub(crate) fn render(events: &[super::align::Event], table: &StreamTable) -> Result<String> {
    let mut out = String::new();
    for event in events {
        let entry = table.entry(event.role).ok_or_else(|| {
            Error::Configuration(format!("stream '{}' is not configured", event.role))
        })?;
        out.push(table.open_delimiter());
        out.push_str(&entry.prefix);
        out.push_str(&event.code.to_string());
        out.push(table.close_delimiter());
    }
    Ok(out)
}

pub(crate) fn parse(input: &str, table: &StreamTable) -> Result<Vec<Token>> {
    let open = table.open_delimiter();
    let close = table.close_delimiter();

    let mut tokens = Vec::new();
    let mut offset = 0usize;

    while offset < input.len() {
        let rest = &input[offset..];
        if !rest.starts_with(open) {
            return Err(malformed(offset, format!("expected '{open}'")));
        }
        let body_start = open.len_utf8();
        let Some(body_len) = rest[body_start..].find(close) else {
            return Err(malformed(offset, "unterminated token".to_string()));
        };
        let body = &rest[body_start..body_start + body_len];

        tokens.push(parse_body(body, offset, table)?);
        offset += body_start + body_len + close.len_utf8();
    }

    Ok(tokens)
}

fn parse_body(body: &str, token_offset: usize, table: &StreamTable) -> Result<Token> {
    if body.is_empty() {
        return Err(malformed(token_offset, "empty token".to_string()));
    }

    let code_start = body
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| malformed(token_offset, format!("token '{body}' has no code")))?;
    let (prefix, digits) = body.split_at(code_start);

    if prefix.is_empty() {
        return Err(malformed(
            token_offset,
            format!("token '{body}' has no stream prefix"),
        ));
    }
    let role = table.role_for_prefix(prefix).ok_or_else(|| {
        malformed(token_offset, format!("unknown stream prefix '{prefix}'"))
    })?;
    let code = digits
        .parse::<u32>()
        .map_err(|_| malformed(token_offset, format!("invalid code '{digits}'")))?;

    Ok(Token { role, code })
}

fn malformed(offset: usize, reason: String) -> Error {
    Error::MalformedSequence { offset, reason }
}
