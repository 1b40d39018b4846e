use std::{fmt, net::Ipv4Addr, str::FromStr};

use crate::{
    parser::{parse_entry, EntryError},
    tokenizer::{comment::COMMENT_START, host::is_valid_host},
};

/// One address-to-hostname mapping line.
///
/// The hostname is never empty and a comment, when present, starts with `#`.
/// Equality is structural over all three fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    address: Ipv4Addr,
    hostname: String,
    comment: Option<String>,
}

impl Entry {
    pub fn new(address: Ipv4Addr, hostname: impl Into<String>) -> Result<Self, EntryError> {
        let hostname = hostname.into();
        if !is_valid_host(&hostname) {
            return Err(EntryError::InvalidEntry(format!(
                "invalid host name {:?}",
                hostname
            )));
        }
        Ok(Self {
            address,
            hostname,
            comment: None,
        })
    }

    /// Attaches a trailing comment. An empty comment clears it.
    ///
    /// Trailing whitespace is dropped, since a written line loses it on the
    /// next parse.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Result<Self, EntryError> {
        let mut comment = comment.into();
        if comment.is_empty() {
            self.comment = None;
            return Ok(self);
        }
        if !comment.starts_with(COMMENT_START) || comment.contains(['\n', '\r']) {
            return Err(EntryError::InvalidEntry(format!(
                "comment must be a single line starting with '#', got {:?}",
                comment
            )));
        }
        comment.truncate(comment.trim_end().len());
        self.comment = Some(comment);
        Ok(self)
    }

    pub fn address(&self) -> Ipv4Addr {
        self.address
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// True when the entry has no comment, or one that is only whitespace.
    pub fn has_no_comment(&self) -> bool {
        self.comment.as_deref().map_or(true, |c| c.trim().is_empty())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.address, self.hostname)?;
        if let Some(comment) = &self.comment {
            write!(f, " {}", comment)?;
        }
        Ok(())
    }
}

impl FromStr for Entry {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_entry(s)?.ok_or_else(|| EntryError::InvalidEntry(format!("no entry in {:?}", s)))
    }
}
