//! # hostsmap: structured hosts file editing
//!
//! hostsmap keeps a structured view over a hosts file: one IPv4 address to
//! hostname mapping per line, with an optional trailing `#` comment.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source Text → Tokenizer → Entry Builder → Hosts Collection → Serialized Text
//! ```
//!
//! * [`tokenizer`]: lexical analysis with octet-level address validation
//! * [`parser`]: builds [`Entry`] values line by line, reporting the failing line
//! * [`hosts`]: the ordered [`Hosts`] collection and [`EntryFilter`] predicates
//! * [`config`]: where the hosts file lives and which editor opens it
//! * [`error`]: the crate-level error type
//!
//! ## Usage Example
//!
//! ```rust
//! use hostsmap::{parse, EntryFilter};
//!
//! let mut hosts = parse("127.0.0.1 localhost\n10.0.0.1 db\n10.0.0.1 db\n").unwrap();
//! let removed = hosts.remove_matching(&EntryFilter::all(), true);
//! assert_eq!(removed.len(), 1);
//! assert_eq!(hosts.serialize(), "127.0.0.1 localhost\n10.0.0.1 db\n");
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod hosts;
pub mod parser;
pub mod tokenizer;

// Re-exports
pub use entry::Entry;
pub use error::*;
pub use hosts::{EntryFilter, Hosts};
pub use parser::{parse, parse_entry, parse_reader, EntryError, ParseError};

#[cfg(test)]
mod tests {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    #[ctor::ctor]
    fn init_tests() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
    }
}
