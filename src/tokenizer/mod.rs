//! # Tokenizer Component
//!
//! The tokenizer performs lexical analysis of hosts files, turning raw text into
//! a stream of classified items for the entry builder.
//!
//! ## Grammar
//!
//! ```text
//! line    := WS* (comment | entry | NEWLINE | EOF)
//! entry   := ip WS+ host (WS* comment)? (WS* (NEWLINE | EOF))
//! ip      := octet '.' octet '.' octet '.' octet
//! octet   := '0' | nonzero-digit digit*        (value 0..=255)
//! host    := (letter | digit | '.' | '_' | '-' | '*')+
//! comment := '#' any-char-except-newline*
//! ```
//!
//! ## Component Structure
//!
//! * [`token`]: Token types, the lazy [`Lexer`](token::Lexer) state machine and error types
//! * [`address`]: IPv4 octet and address lexemes
//! * [`host`]: Host name lexeme
//! * [`comment`]: Trailing and standalone comments
//! * [`whitespace`]: Separators and line breaks
//!
//! ## Scanning Model
//!
//! [`lex`](token::lex) returns an iterator that scans on demand. Items come out in
//! source order, and an `Error` item is always the last item of a scan. Dropping
//! the iterator early is safe; a new call to `lex` starts again from the
//! beginning of the input.
//!
//! ## Usage Example
//!
//! ```rust
//! use hostsmap::tokenizer::token::{tokenize, TokenKind};
//!
//! let tokens = tokenize("127.0.0.1 localhost # loopback\n").unwrap();
//! let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind()).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Ip,
//!         TokenKind::Host,
//!         TokenKind::Comment,
//!         TokenKind::Newline,
//!         TokenKind::Eof
//!     ]
//! );
//! ```

pub mod address;
pub mod comment;
pub mod host;
pub mod token;
pub mod whitespace;

pub use token::{lex, tokenize, Lexer, Span, Token, TokenKind, TokenSpan, TokenizerError};
