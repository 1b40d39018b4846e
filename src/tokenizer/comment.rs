use nom::{
    bytes::complete::take_while,
    character::complete::char,
    combinator::recognize,
    error::context,
    sequence::preceded,
};

use super::token::ParserResult;

pub const COMMENT_START: char = '#';

/// Parses a comment from `#` up to, but not including, the line break.
/// The returned slice keeps the leading `#` and any trailing spaces.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_comment(input: &str) -> ParserResult<&str> {
    context(
        "comment",
        recognize(preceded(
            char(COMMENT_START),
            take_while(|c| c != '\n' && c != '\r'),
        )),
    )(input)
}
