//! Block-directive parser for the combined provider
//!
//! The combined provider is configured with a nested block of key/value
//! directives:
//!
//! ```text
//! combined {
//!     duckdns_token {env.DUCKDNS_TOKEN}
//!     myaddr_key   {env.MYADDR_KEY}
//! }
//! ```
//!
//! The surrounding `combined { ... }` header is optional; a bare list of
//! directives parses the same way. `#` starts a comment, arguments may be
//! double-quoted.
//!
//! Parse rules:
//! - `duckdns_token` and `myaddr_key` each take exactly one argument
//! - each key may be set at most once
//! - any other key is an unrecognized option
//! - at the end of the block both credentials must be present

use crate::config::ProviderConfig;
use crate::error::{Error, Result};

/// Parse a combined-provider configuration block
///
/// Returns [`ProviderConfig::Combined`] with both credentials set (still
/// unprovisioned: placeholders are resolved later by
/// [`ProviderConfig::provision`](crate::config::ProviderConfig::provision)).
pub fn parse_block(source: &str) -> Result<ProviderConfig> {
    let mut duckdns_token: Option<String> = None;
    let mut myaddr_key: Option<String> = None;

    let mut in_block = false;
    let mut saw_header = false;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let mut tokens = tokenize(raw_line, line_no)?;
        if tokens.is_empty() {
            continue;
        }

        // Optional `<name> {` header before any directive
        if !saw_header && !in_block && tokens.last().map(String::as_str) == Some("{") {
            tokens.pop();
            if tokens.len() > 1 {
                return Err(Error::config(format!(
                    "line {line_no}: unexpected argument '{}' after provider name",
                    tokens[1]
                )));
            }
            saw_header = true;
            in_block = true;
            continue;
        }

        // Closing brace ends the block
        if tokens[0] == "}" {
            if !in_block {
                return Err(Error::config(format!("line {line_no}: unexpected '}}'")));
            }
            if tokens.len() > 1 {
                return Err(Error::config(format!(
                    "line {line_no}: unexpected token after '}}'"
                )));
            }
            in_block = false;
            continue;
        }

        let key = tokens[0].as_str();
        let args = &tokens[1..];

        match key {
            "duckdns_token" => {
                if duckdns_token.is_some() {
                    return Err(Error::config("duckdns_token already set"));
                }
                duckdns_token = Some(single_arg(key, args, line_no)?);
            }
            "myaddr_key" => {
                if myaddr_key.is_some() {
                    return Err(Error::config("myaddr_key already set"));
                }
                myaddr_key = Some(single_arg(key, args, line_no)?);
            }
            _ => {
                return Err(Error::config(format!("unrecognized option '{key}'")));
            }
        }
    }

    if in_block {
        return Err(Error::config("unclosed configuration block"));
    }

    let duckdns_token = duckdns_token.ok_or_else(|| Error::config("missing duckdns_token"))?;
    let myaddr_key = myaddr_key.ok_or_else(|| Error::config("missing myaddr_key"))?;

    Ok(ProviderConfig::Combined {
        duckdns_token,
        myaddr_key,
    })
}

/// Require exactly one argument for a directive
fn single_arg(key: &str, args: &[String], line_no: usize) -> Result<String> {
    match args {
        [value] => Ok(value.clone()),
        [] => Err(Error::config(format!(
            "line {line_no}: {key} expects exactly one argument, got none"
        ))),
        _ => Err(Error::config(format!(
            "line {line_no}: {key} expects exactly one argument, got {}",
            args.len()
        ))),
    }
}

/// Split a line into whitespace-separated tokens
///
/// Double-quoted tokens keep their inner whitespace; an unquoted `#`
/// starts a comment running to the end of the line.
fn tokenize(line: &str, line_no: usize) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '#' {
            break;
        }
        if c == '"' {
            chars.next();
            let mut token = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                token.push(c);
            }
            if !closed {
                return Err(Error::config(format!(
                    "line {line_no}: unterminated quoted string"
                )));
            }
            tokens.push(token);
            continue;
        }

        let mut token = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() || c == '#' {
                break;
            }
            token.push(c);
            chars.next();
        }
        tokens.push(token);
    }

    Ok(tokens)
}
