//! # textloclib
//!
//! A library that classifies the lines and characters of source files and
//! aggregates the results across a file set.
//!
//! ## Overview
//!
//! Every file is handed to a [`Parser`] chosen by its extension. A parser
//! makes a single pass over the text and produces a [`Statistics`] pair:
//!
//! - **Lines**: source, inline comment, block comment, mixed (source and
//!   comment on one line), whitespace-only and empty
//! - **Characters**: whitespace, numerical, alphabetical and special, plus
//!   how many of them sit inside comments
//!
//! Two parsers ship with the library: [`PlainTextParser`] (no comments) and
//! [`CFamilyParser`] (`//` and `/* */`). The [`Aggregator`] keeps the parser
//! registry, resolves extension aliases, falls back to a default parser when
//! configured, and maintains running totals. Processing a file name again
//! replaces its earlier contribution, so totals never double-count.
//!
//! ## Example
//!
//! ```rust
//! use textloclib::{builtin_parsers, Aggregator, CounterOptions, PlainTextParser};
//!
//! let options = CounterOptions::new().default_parser(PlainTextParser::new());
//! let mut aggregator = Aggregator::with_options(options);
//! aggregator.add_parsers(builtin_parsers());
//! aggregator.add_extension_alias("inc", "c").unwrap();
//!
//! let stats = aggregator.process("main.c", "int x; // answer\n/* done */\n").unwrap();
//! assert_eq!(stats.lines.mixed, 1);
//! assert_eq!(stats.lines.block_comments, 1);
//!
//! aggregator.process("README", "Hello\n").unwrap();
//! assert_eq!(aggregator.line_statistics().total, 3);
//!
//! // processing the same file again does not double-count
//! aggregator.process("README", "Hello\n").unwrap();
//! assert_eq!(aggregator.line_statistics().total, 3);
//! ```

pub mod alias;
pub mod counter;
pub mod error;
pub mod extension;
pub mod filter;
pub mod parser;
pub mod stats;

pub use alias::ExtensionAliasTable;
pub use counter::{Aggregator, CountSnapshot, CounterOptions};
pub use error::TextlocError;
pub use extension::{clean_extension, extract_extension, has_extension};
pub use filter::{discover_files, discover_files_in_paths, FilterConfig};
pub use parser::{
    builtin_parsers, parser_from_id, CFamilyParser, ExtensionSet, Parser, PlainTextParser,
    BUILTIN_PARSER_IDS,
};
pub use stats::{CharacterStats, LineStats, Statistics};

/// Result type for textloclib operations
pub type Result<T> = std::result::Result<T, TextlocError>;
