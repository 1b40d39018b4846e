//! # Hosts Collection
//!
//! [`Hosts`] is the ordered list of entries backing one hosts file. It never
//! touches the file itself: callers parse text into it with
//! [`parse`](crate::parser::parse), mutate it, and write the serialized form
//! back with [`Hosts::write_to`].
//!
//! Removal is driven by an [`EntryFilter`]. Entries the filter rejects are
//! always kept. Entries it accepts are either all removed, or, in
//! duplicates-only mode, reduced to their first occurrence.

pub mod filter;

use std::{
    collections::HashSet,
    fmt,
    io::{self, Write},
    slice,
    str::FromStr,
};

use tracing::debug;

use crate::{
    entry::Entry,
    parser::{parse, ParseError},
};

pub use filter::EntryFilter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hosts {
    entries: Vec<Entry>,
}

impl Hosts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry at the end. No validation or deduplication happens here.
    pub fn append(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Renders every entry on its own line, each terminated by `\n`.
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Writes the serialized collection and returns the number of bytes written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<usize> {
        let text = self.serialize();
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(text.len())
    }

    /// Removes entries accepted by `filter` and returns them in their original order.
    ///
    /// With `duplicates_only`, the first occurrence of each distinct accepted
    /// entry is kept and only later identical occurrences are removed.
    pub fn remove_matching(&mut self, filter: &EntryFilter, duplicates_only: bool) -> Vec<Entry> {
        let mut kept = Vec::with_capacity(self.entries.len());
        let mut removed = Vec::new();
        let mut seen = HashSet::new();
        let mut matched = 0;

        for entry in std::mem::take(&mut self.entries) {
            if !filter.matches(&entry) {
                kept.push(entry);
                continue;
            }
            matched += 1;
            if duplicates_only && seen.insert(entry.clone()) {
                kept.push(entry);
            } else {
                removed.push(entry);
            }
        }

        debug!(
            matched,
            removed = removed.len(),
            kept = kept.len(),
            duplicates_only,
            "removed matching entries"
        );
        self.entries = kept;
        removed
    }

    /// Removes every repeated entry, keeping first occurrences.
    pub fn dedup(&mut self) -> Vec<Entry> {
        self.remove_matching(&EntryFilter::all(), true)
    }
}

impl fmt::Display for Hosts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}

impl From<Vec<Entry>> for Hosts {
    fn from(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<Entry> for Hosts {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<Entry> for Hosts {
    fn extend<I: IntoIterator<Item = Entry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl IntoIterator for Hosts {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Hosts {
    type Item = &'a Entry;
    type IntoIter = slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromStr for Hosts {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
