//! # Entry Builder
//!
//! Turns hosts file lines into [`Entry`] values. Each line is first split on
//! whitespace as a quick shape check (at least an address and a host, with an
//! optional `#` comment after them), then scanned with the
//! [tokenizer](crate::tokenizer) which enforces the full lexical grammar.
//!
//! Whole-file parsing is fail-fast: the first bad line aborts the parse and is
//! reported with its 0-based line index.

use std::{
    io::{self, BufRead},
    net::Ipv4Addr,
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    entry::Entry,
    hosts::Hosts,
    tokenizer::{
        comment::COMMENT_START,
        token::{lex, Token, TokenizerError},
    },
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("invalid IP address: {0}")]
    InvalidIp(String),
    #[error("invalid host entry: {0}")]
    InvalidEntry(String),
    #[error(transparent)]
    Lex(#[from] TokenizerError),
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("error on line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: EntryError,
    },
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /// 0-based index of the line that failed.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Line { line, .. } | ParseError::Read { line, .. } => *line,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Returns true for lines that never yield an entry: blank or comment-only.
fn is_skipped(line: &str) -> bool {
    line.is_empty() || line.starts_with(COMMENT_START)
}

/// Field-split shape check run before scanning.
fn check_fields(line: &str) -> Result<(), EntryError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(EntryError::InvalidEntry(line.to_string()));
    }
    if fields[0].parse::<Ipv4Addr>().is_err() {
        return Err(EntryError::InvalidIp(fields[0].to_string()));
    }
    if let Some(comment) = fields.get(2) {
        if !comment.starts_with(COMMENT_START) {
            return Err(EntryError::InvalidEntry(line.to_string()));
        }
    }
    Ok(())
}

/// Parses one line into an entry.
///
/// Surrounding whitespace is ignored. Blank lines and lines starting with `#`
/// yield `Ok(None)`.
///
/// # Examples
///
/// ```
/// # use hostsmap::parser::parse_entry;
/// let entry = parse_entry("109.94.209.70   fitgirl-repack.net      # Fake FitGirl site")
///     .unwrap()
///     .unwrap();
/// assert_eq!(entry.hostname(), "fitgirl-repack.net");
/// assert_eq!(entry.comment(), Some("# Fake FitGirl site"));
/// ```
pub fn parse_entry(line: &str) -> Result<Option<Entry>, EntryError> {
    let line = line.trim();
    if is_skipped(line) {
        return Ok(None);
    }
    check_fields(line)?;

    let mut address = None;
    let mut hostname = None;
    let mut comment = None;
    for token in lex(line) {
        match token.token {
            Token::Ip(ip) => address = Some(ip),
            Token::Host(host) => hostname = Some(host),
            Token::Comment(text) => comment = Some(text),
            Token::Eof => break,
            Token::Newline => {
                return Err(EntryError::InvalidEntry(format!(
                    "line break inside entry {:?}",
                    line
                )))
            }
            Token::Error(_) => return Err(TokenizerError::from_token(line, &token).into()),
        }
    }

    let (Some(address), Some(hostname)) = (address, hostname) else {
        return Err(EntryError::InvalidEntry(line.to_string()));
    };
    let entry = Entry::new(address, hostname)?;
    match comment {
        Some(comment) => entry.with_comment(comment).map(Some),
        None => Ok(Some(entry)),
    }
}

/// Parses a whole hosts file.
///
/// # Examples
///
/// ```
/// # use hostsmap::parser::parse;
/// let hosts = parse("# local\n127.0.0.1 localhost\n\n10.0.0.1 db # primary\n").unwrap();
/// assert_eq!(hosts.len(), 2);
///
/// let err = parse("127.0.0.1 localhost\n::1 localhost\n").unwrap_err();
/// assert_eq!(err.line(), 1);
/// ```
pub fn parse(input: &str) -> ParseResult<Hosts> {
    let mut hosts = Hosts::new();
    let mut skipped = 0;
    for (line, text) in input.lines().enumerate() {
        match parse_line(line, text)? {
            Some(entry) => hosts.append(entry),
            None => skipped += 1,
        }
    }
    debug!(entries = hosts.len(), skipped, "parsed hosts");
    Ok(hosts)
}

/// Parses a whole hosts file from a reader.
pub fn parse_reader<R: BufRead>(reader: R) -> ParseResult<Hosts> {
    let mut hosts = Hosts::new();
    let mut skipped = 0;
    for (line, text) in reader.lines().enumerate() {
        let text = text.map_err(|source| {
            warn!(line, "failed to read hosts line: {}", source);
            ParseError::Read { line, source }
        })?;
        match parse_line(line, &text)? {
            Some(entry) => hosts.append(entry),
            None => skipped += 1,
        }
    }
    debug!(entries = hosts.len(), skipped, "parsed hosts");
    Ok(hosts)
}

fn parse_line(line: usize, text: &str) -> ParseResult<Option<Entry>> {
    parse_entry(text).map_err(|source| {
        warn!(line, "invalid hosts line: {}", source);
        ParseError::Line { line, source }
    })
}
