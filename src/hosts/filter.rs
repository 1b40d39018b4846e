use std::net::Ipv4Addr;

use crate::entry::Entry;

/// Predicate over entries, built from filter categories.
///
/// Values within a category are OR'd and categories are AND'd. A category
/// without values does not constrain the match, so an empty filter matches
/// every entry. Two categories take precedence over the rest:
///
/// * match-all accepts every entry;
/// * no-comment accepts any entry without a comment, whatever the other
///   categories say. Entries that do have a comment fail the no-comment
///   category.
///
/// All comparisons are exact. Comment values must include the leading `#`.
///
/// # Examples
///
/// ```
/// # use std::net::Ipv4Addr;
/// # use hostsmap::{Entry, EntryFilter};
/// let entry = Entry::new(Ipv4Addr::new(10, 0, 0, 1), "db").unwrap();
/// let filter = EntryFilter::new()
///     .with_addresses([Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(10, 0, 0, 2)])
///     .with_hostnames(["db"]);
/// assert!(filter.matches(&entry));
/// assert!(!filter.with_comments(["# primary"]).matches(&entry));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    addresses: Vec<Ipv4Addr>,
    hostnames: Vec<String>,
    comments: Vec<String>,
    no_comment: bool,
    match_all: bool,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter that accepts every entry.
    pub fn all() -> Self {
        Self::new().with_match_all()
    }

    pub fn with_addresses<I>(mut self, addresses: I) -> Self
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        self.addresses.extend(addresses);
        self
    }

    pub fn with_hostnames<I, S>(mut self, hostnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hostnames.extend(hostnames.into_iter().map(Into::into));
        self
    }

    pub fn with_comments<I, S>(mut self, comments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments.extend(comments.into_iter().map(Into::into));
        self
    }

    pub fn with_no_comment(mut self) -> Self {
        self.no_comment = true;
        self
    }

    pub fn with_match_all(mut self) -> Self {
        self.match_all = true;
        self
    }

    /// True when no category is set.
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
            && self.hostnames.is_empty()
            && self.comments.is_empty()
            && !self.no_comment
            && !self.match_all
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if self.match_all {
            return true;
        }
        if self.no_comment {
            return entry.has_no_comment();
        }

        (self.addresses.is_empty() || self.addresses.contains(&entry.address()))
            && (self.hostnames.is_empty() || self.hostnames.iter().any(|h| h == entry.hostname()))
            && (self.comments.is_empty()
                || entry
                    .comment()
                    .is_some_and(|c| self.comments.iter().any(|f| f == c)))
    }
}
