//! Property-based tests for the parse/serialize round trip and removal.

use std::{collections::HashSet, net::Ipv4Addr};

use hostsmap::{parse, tokenizer::{lex, TokenKind}, Entry, EntryFilter, Hosts};
use proptest::prelude::*;

fn entry_strategy() -> impl Strategy<Value = Entry> {
    let address = any::<[u8; 4]>().prop_map(Ipv4Addr::from);
    let hostname = "[a-zA-Z0-9*][a-zA-Z0-9._*-]{0,24}";
    let comment = prop::option::of("#[!-~]{0,10}( {1,3}[!-~]{1,10}){0,3}[ \t]{0,3}");

    (address, hostname, comment).prop_map(|(address, hostname, comment)| {
        let entry = Entry::new(address, hostname).unwrap();
        match comment {
            Some(comment) => entry.with_comment(comment).unwrap(),
            None => entry,
        }
    })
}

/// Entries drawn from a small pool so that duplicates are common.
fn pooled_entry_strategy() -> impl Strategy<Value = Entry> {
    let address = prop::sample::select(vec![
        Ipv4Addr::new(10, 0, 0, 1),
        Ipv4Addr::new(10, 0, 0, 2),
        Ipv4Addr::LOCALHOST,
    ]);
    let hostname = prop::sample::select(vec!["a", "b.example", "*.ads"]);
    let comment = prop::sample::select(vec!["", "# one", "# two  words"]);

    (address, hostname, comment).prop_map(|(address, hostname, comment)| {
        Entry::new(address, hostname)
            .unwrap()
            .with_comment(comment)
            .unwrap()
    })
}

fn filter_strategy() -> impl Strategy<Value = EntryFilter> {
    (
        prop::collection::vec(prop::sample::select(vec![Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::LOCALHOST]), 0..2),
        prop::collection::vec(prop::sample::select(vec!["a", "*.ads", "missing"]), 0..2),
        prop::collection::vec(prop::sample::select(vec!["# one", "# two  words"]), 0..2),
        any::<bool>(),
    )
        .prop_map(|(addresses, hostnames, comments, no_comment)| {
            let filter = EntryFilter::new()
                .with_addresses(addresses)
                .with_hostnames(hostnames)
                .with_comments(comments);
            if no_comment {
                filter.with_no_comment()
            } else {
                filter
            }
        })
}

proptest! {
    #[test]
    fn test_serialize_parse_round_trip(entries in prop::collection::vec(entry_strategy(), 0..20)) {
        let hosts = Hosts::from(entries);
        let text = hosts.serialize();
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(reparsed.serialize(), text);
        prop_assert_eq!(reparsed, hosts);
    }

    #[test]
    fn test_lexer_ends_with_one_terminal(input in "[0-9a-z.# \t\r\n]{0,64}|\\PC{0,32}") {
        let tokens: Vec<_> = lex(&input).collect();
        let last = tokens.last().map(|t| t.kind());
        prop_assert!(matches!(last, Some(TokenKind::Eof | TokenKind::Error)));
        prop_assert!(tokens[..tokens.len() - 1].iter().all(|t| !matches!(t.kind(), TokenKind::Eof | TokenKind::Error)));
        prop_assert!(tokens.iter().all(|t| input.is_char_boundary(t.start) && t.end <= input.len()));
    }

    #[test]
    fn test_dedup_keeps_first_occurrences(entries in prop::collection::vec(pooled_entry_strategy(), 0..30)) {
        let mut hosts = Hosts::from(entries.clone());
        let removed = hosts.remove_matching(&EntryFilter::all(), true);

        let mut seen = HashSet::new();
        let expected: Vec<Entry> = entries.iter().filter(|e| seen.insert((*e).clone())).cloned().collect();
        prop_assert_eq!(hosts.entries(), expected.as_slice());
        prop_assert_eq!(removed.len() + hosts.len(), entries.len());
    }

    #[test]
    fn test_remove_partitions_by_filter(
        entries in prop::collection::vec(pooled_entry_strategy(), 0..30),
        filter in filter_strategy(),
    ) {
        let mut hosts = Hosts::from(entries.clone());
        let removed = hosts.remove_matching(&filter, false);

        prop_assert!(removed.iter().all(|e| filter.matches(e)));
        prop_assert!(hosts.iter().all(|e| !filter.matches(e)));
        let expected_kept: Vec<Entry> = entries.iter().filter(|e| !filter.matches(e)).cloned().collect();
        prop_assert_eq!(hosts.entries(), expected_kept.as_slice());
    }
}
