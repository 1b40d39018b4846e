use std::net::Ipv4Addr;

use nom::{
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{map, map_res, not, recognize, value},
    error::context,
    sequence::{pair, terminated, tuple},
};

use super::token::ParserResult;

/// Parses one dotted-decimal octet.
///
/// A lone `0` is the only octet allowed to start with a zero, so `099` is
/// rejected. Values above 255 are rejected as well.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_octet(input: &str) -> ParserResult<u8> {
    context(
        "octet",
        alt((
            map_res(
                recognize(pair(one_of("123456789"), digit0)),
                |digits: &str| digits.parse::<u8>(),
            ),
            value(0, terminated(char('0'), not(digit1))),
        )),
    )(input)
}

/// Parses a dotted-decimal IPv4 address.
#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_address(input: &str) -> ParserResult<Ipv4Addr> {
    context(
        "IPv4 address",
        map(
            tuple((
                parse_octet,
                char('.'),
                parse_octet,
                char('.'),
                parse_octet,
                char('.'),
                parse_octet,
            )),
            |(a, _, b, _, c, _, d)| Ipv4Addr::new(a, b, c, d),
        ),
    )(input)
}
