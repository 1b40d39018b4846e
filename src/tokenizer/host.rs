use nom::{bytes::complete::take_while1, error::context};

use super::token::ParserResult;

/// Host names are drawn from letters, digits and `.`, `_`, `-`, `*`.
/// Letters and digits are Unicode-aware so internationalized names lex as one host.
pub fn is_host_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | '*')
}

/// Returns true when `host` is a non-empty run of host characters.
pub fn is_valid_host(host: &str) -> bool {
    !host.is_empty() && host.chars().all(is_host_char)
}

#[tracing::instrument(level = "debug", skip(input))]
pub fn parse_host(input: &str) -> ParserResult<&str> {
    context("host", take_while1(is_host_char))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host() {
        let test_cases = [
            ("localhost", "localhost", ""),
            ("fitgirl-repack.net  # site", "fitgirl-repack.net", "  # site"),
            ("*.fitgirl-repacks.xyz\t", "*.fitgirl-repacks.xyz", "\t"),
            ("host_name.internal\n", "host_name.internal", "\n"),
            ("bücher.example", "bücher.example", ""),
        ];

        for (input, expected, expected_rest) in test_cases.iter() {
            let (rest, host) = parse_host(input).unwrap();
            assert_eq!(host, *expected);
            assert_eq!(rest, *expected_rest);
        }
    }

    #[test]
    fn test_host_stops_at_comment_marker() {
        let (rest, host) = parse_host("host# comment#").unwrap();
        assert_eq!(host, "host");
        assert_eq!(rest, "# comment#");
    }

    #[test]
    fn test_missing_host() {
        assert!(parse_host("").is_err());
        assert!(parse_host(" host").is_err());
        assert!(parse_host("#host").is_err());
    }

    #[test]
    fn test_is_valid_host() {
        assert!(is_valid_host("kubernetes.docker.internal"));
        assert!(is_valid_host("*"));
        assert!(!is_valid_host(""));
        assert!(!is_valid_host("k#"));
        assert!(!is_valid_host("two words"));
    }
}
