//! # Whitespace Handling
//!
//! Separators between fields are runs of spaces and tabs. Line breaks are
//! lexed separately so that they can be reported as `Newline` items; both
//! `\n` and `\r\n` are accepted.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    error::context,
};

use super::token::ParserResult;

/// Returns true for the characters that separate fields on a line.
pub fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Parses a run of spaces and tabs.
///
/// # Examples
///
/// ```
/// # use hostsmap::tokenizer::whitespace::parse_whitespace;
/// let (rest, ws) = parse_whitespace(" \t localhost").unwrap();
/// assert_eq!(ws, " \t ");
/// assert_eq!(rest, "localhost");
/// ```
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_whitespace(input: &str) -> ParserResult<&str> {
    context("whitespace expected", take_while1(is_separator))(input)
}

/// Parses a single line break, either `\n` or `\r\n`.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_newline(input: &str) -> ParserResult<&str> {
    context("newline expected", alt((tag("\r\n"), tag("\n"))))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace() {
        let (rest, ws) = parse_whitespace("   host").unwrap();
        assert_eq!(ws, "   ");
        assert_eq!(rest, "host");

        let (rest, ws) = parse_whitespace("\t\t  host").unwrap();
        assert_eq!(ws, "\t\t  ");
        assert_eq!(rest, "host");
    }

    #[test]
    fn test_whitespace_does_not_cross_lines() {
        let (rest, ws) = parse_whitespace(" \nhost").unwrap();
        assert_eq!(ws, " ");
        assert_eq!(rest, "\nhost");
    }

    #[test]
    fn test_newline() {
        let (rest, nl) = parse_newline("\nnext").unwrap();
        assert_eq!(nl, "\n");
        assert_eq!(rest, "next");

        let (rest, nl) = parse_newline("\r\nnext").unwrap();
        assert_eq!(nl, "\r\n");
        assert_eq!(rest, "next");
    }

    #[test]
    fn test_error() {
        assert!(parse_whitespace("host").is_err());
        assert!(parse_whitespace("").is_err());
        assert!(parse_newline("host").is_err());
        assert!(parse_newline("\rhost").is_err());
    }
}
