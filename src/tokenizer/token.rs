use std::{iter::FusedIterator, net::Ipv4Addr};

use nom::{
    error::{VerboseError, VerboseErrorKind},
    IResult,
};
use thiserror::Error;

use super::{
    address::parse_address,
    comment::{parse_comment, COMMENT_START},
    host::parse_host,
    whitespace::{parse_newline, parse_whitespace},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ip(Ipv4Addr),
    Host(String),
    Comment(String),
    Newline,
    Eof,
    // Diagnostic message; always the last item of a scan
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum TokenKind {
    #[strum(serialize = "IP")]
    Ip,
    #[strum(serialize = "HOST")]
    Host,
    #[strum(serialize = "COMMENT")]
    Comment,
    #[strum(serialize = "NEWLINE")]
    Newline,
    #[strum(serialize = "EOF")]
    Eof,
    #[strum(serialize = "ERROR")]
    Error,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Ip(_) => TokenKind::Ip,
            Token::Host(_) => TokenKind::Host,
            Token::Comment(_) => TokenKind::Comment,
            Token::Newline => TokenKind::Newline,
            Token::Eof => TokenKind::Eof,
            Token::Error(_) => TokenKind::Error,
        }
    }
}

/// A token together with the source text it was scanned from.
///
/// `start` and `end` are byte offsets into the scanned input, `line` and
/// `column` are 1-based. For `Error` tokens `text` holds the diagnostic and
/// `start == end` points at the offending character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    pub token: Token,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl TokenSpan {
    pub fn kind(&self) -> TokenKind {
        self.token.kind()
    }

    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end,
            line: self.line,
            column: self.column,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line: {}, column: {}, start: {}, end: {}",
            self.line, self.column, self.start, self.end
        )
    }
}

pub type ParserResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

pub type TokenizerResult<T> = Result<T, TokenizerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    #[error("Lex error: {message} ({span}), found: {found:?}")]
    Lex {
        message: String,
        found: String,
        span: Span,
    },
}

impl TokenizerError {
    /// Builds a lex error from an `Error` token scanned out of `input`.
    pub fn from_token(input: &str, token: &TokenSpan) -> Self {
        let message = match &token.token {
            Token::Error(message) => message.clone(),
            other => format!("unexpected {} token", other.kind()),
        };
        TokenizerError::Lex {
            message,
            found: input
                .get(token.start..)
                .unwrap_or_default()
                .chars()
                .take(20)
                .collect(),
            span: token.span(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Line,
    Address,
    Separator,
    Host,
    AfterHost,
    Comment,
    Terminator,
    Newline,
}

/// Lazy, pull-based scanner over hosts file text.
///
/// Each call to [`Iterator::next`] runs the state machine until one token is
/// produced. The iterator ends after `Eof` or after the first `Error`.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    start: usize,
    pos: usize,
    line: usize,
    line_start: usize,
    state: Option<State>,
}

pub fn lex(input: &str) -> Lexer<'_> {
    Lexer {
        input,
        start: 0,
        pos: 0,
        line: 1,
        line_start: 0,
        state: Some(State::Line),
    }
}

/// Scans the whole input, failing on the first lexical error.
#[tracing::instrument(level = "debug", skip(input))]
pub fn tokenize(input: &str) -> TokenizerResult<Vec<TokenSpan>> {
    let mut tokens = Vec::new();
    for token in lex(input) {
        if token.kind() == TokenKind::Error {
            let error = TokenizerError::from_token(input, &token);
            tracing::error!("{}", error);
            return Err(error);
        }
        tokens.push(token);
    }
    Ok(tokens)
}

type Step = (Option<TokenSpan>, Option<State>);

impl<'a> Lexer<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance_to(&mut self, rest: &'a str) {
        self.pos = self.input.len() - rest.len();
    }

    fn ignore(&mut self) {
        self.start = self.pos;
    }

    /// Skips spaces and tabs, returning whether any were skipped.
    fn skip_whitespace(&mut self) -> bool {
        let skipped = match parse_whitespace(self.rest()) {
            Ok((rest, _)) => {
                self.advance_to(rest);
                true
            }
            Err(_) => false,
        };
        self.ignore();
        skipped
    }

    fn column(&self, offset: usize) -> usize {
        self.input[self.line_start..offset].chars().count() + 1
    }

    fn emit(&mut self, token: Token) -> TokenSpan {
        let span = TokenSpan {
            token,
            text: self.input[self.start..self.pos].to_string(),
            start: self.start,
            end: self.pos,
            line: self.line,
            column: self.column(self.start),
        };
        self.start = self.pos;
        span
    }

    fn error(&mut self, message: String) -> Step {
        let span = TokenSpan {
            token: Token::Error(message.clone()),
            text: message,
            start: self.pos,
            end: self.pos,
            line: self.line,
            column: self.column(self.pos),
        };
        (Some(span), None)
    }

    fn unexpected(&mut self) -> Step {
        match self.peek() {
            Some(c) => self.error(format!("unexpected character at {}, got: {:?}", self.pos, c)),
            None => self.error(format!("unexpected end of input at {}", self.pos)),
        }
    }

    fn step(&mut self, state: State) -> Step {
        match state {
            State::Line => {
                self.skip_whitespace();
                match self.peek() {
                    Some(COMMENT_START) => (None, Some(State::Comment)),
                    Some('\n' | '\r') => (None, Some(State::Newline)),
                    None => (Some(self.emit(Token::Eof)), None),
                    Some(_) => (None, Some(State::Address)),
                }
            }
            State::Address => match parse_address(self.rest()) {
                Ok((rest, address)) => {
                    self.advance_to(rest);
                    (Some(self.emit(Token::Ip(address))), Some(State::Separator))
                }
                Err(err) => {
                    let (offset, expected) = self.describe_failure(&err);
                    self.pos = offset;
                    self.error(format!(
                        "invalid IP address, expected {} at {}",
                        expected, offset
                    ))
                }
            },
            State::Separator => {
                if self.skip_whitespace() {
                    (None, Some(State::Host))
                } else {
                    self.error(format!("expected space between IP and host at {}", self.pos))
                }
            }
            State::Host => match parse_host(self.rest()) {
                Ok((rest, host)) => {
                    self.advance_to(rest);
                    let token = Token::Host(host.to_string());
                    (Some(self.emit(token)), Some(State::AfterHost))
                }
                Err(_) => self.error(format!("missing host definition at {}", self.pos)),
            },
            State::AfterHost => {
                let separated = self.skip_whitespace();
                match self.peek() {
                    None => (Some(self.emit(Token::Eof)), None),
                    Some('\n' | '\r') => (None, Some(State::Newline)),
                    Some(COMMENT_START) if separated => (None, Some(State::Comment)),
                    Some(_) => self.unexpected(),
                }
            }
            State::Comment => match parse_comment(self.rest()) {
                Ok((rest, comment)) => {
                    self.advance_to(rest);
                    let token = Token::Comment(comment.to_string());
                    (Some(self.emit(token)), Some(State::Terminator))
                }
                Err(_) => self.unexpected(),
            },
            State::Terminator => match self.peek() {
                None => (Some(self.emit(Token::Eof)), None),
                Some(_) => (None, Some(State::Newline)),
            },
            State::Newline => match parse_newline(self.rest()) {
                Ok((rest, _)) => {
                    self.advance_to(rest);
                    let newline = self.emit(Token::Newline);
                    self.line += 1;
                    self.line_start = self.pos;
                    (Some(newline), Some(State::Line))
                }
                Err(_) => self.unexpected(),
            },
        }
    }

    /// Locates the innermost failure of an address parse and names what was expected there.
    fn describe_failure(&self, err: &nom::Err<VerboseError<&'a str>>) -> (usize, &'static str) {
        match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => match e.errors.first() {
                Some((rest, kind)) => {
                    let offset = self.input.len() - rest.len();
                    let expected = match kind {
                        VerboseErrorKind::Char('.') => "'.'",
                        _ => "octet",
                    };
                    (offset, expected)
                }
                None => (self.pos, "octet"),
            },
            nom::Err::Incomplete(_) => (self.input.len(), "octet"),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = TokenSpan;

    fn next(&mut self) -> Option<TokenSpan> {
        loop {
            let state = self.state.take()?;
            let (token, next) = self.step(state);
            self.state = next;
            if token.is_some() {
                return token;
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}
