//! Aggregation across files.
//!
//! The [`Aggregator`] owns the parser registry and the alias table, picks a
//! parser for every file it is handed, and keeps running totals. Processing
//! the same file name twice replaces its earlier contribution instead of
//! adding to it, so the totals always equal the sum over the tracked files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::alias::ExtensionAliasTable;
use crate::error::TextlocError;
use crate::extension::{clean_extension, extract_extension_from_path};
use crate::parser::Parser;
use crate::stats::{CharacterStats, LineStats, Statistics};
use crate::Result;

/// Options controlling parser resolution.
#[derive(Debug, Default)]
pub struct CounterOptions {
    /// Reject files without a usable extension instead of using the default
    pub require_extension: bool,
    /// Parser used when no registered parser claims a file
    pub default_parser: Option<Box<dyn Parser>>,
}

impl CounterOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require every file to resolve through its extension.
    pub fn require_extension(mut self, require: bool) -> Self {
        self.require_extension = require;
        self
    }

    /// Set the fallback parser.
    pub fn default_parser(mut self, parser: impl Parser + 'static) -> Self {
        self.default_parser = Some(Box::new(parser));
        self
    }

    /// Set the fallback parser from a boxed instance.
    pub fn default_parser_boxed(mut self, parser: Box<dyn Parser>) -> Self {
        self.default_parser = Some(parser);
        self
    }
}

/// Everything the aggregator has counted so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountSnapshot {
    /// Last statistics per processed file name
    pub files: BTreeMap<String, Statistics>,
    /// Line totals over all files
    pub lines: LineStats,
    /// Character totals over all files
    pub characters: CharacterStats,
}

/// Dispatches files to parsers and accumulates their statistics.
#[derive(Debug, Default)]
pub struct Aggregator {
    options: CounterOptions,
    parsers: Vec<Box<dyn Parser>>,
    aliases: ExtensionAliasTable,
    files: BTreeMap<String, Statistics>,
    totals: Statistics,
}

impl Aggregator {
    /// Create an aggregator with no parsers and default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with no parsers and the given options.
    pub fn with_options(options: CounterOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Current resolution options.
    pub fn options(&self) -> &CounterOptions {
        &self.options
    }

    /// Toggle whether files must resolve through their extension.
    pub fn set_require_extension(&mut self, require: bool) {
        self.options.require_extension = require;
    }

    /// Replace the fallback parser, returning the previous one.
    pub fn set_default_parser(&mut self, parser: Option<Box<dyn Parser>>) -> Option<Box<dyn Parser>> {
        std::mem::replace(&mut self.options.default_parser, parser)
    }

    // ------------------------------------------------------------------
    // Processing
    // ------------------------------------------------------------------

    /// Classify `contents` and fold the result into the totals.
    ///
    /// If `file_name` was processed before, its previous statistics are
    /// subtracted first. On error nothing changes.
    pub fn process(&mut self, file_name: &str, contents: &str) -> Result<Statistics> {
        if contents.is_empty() {
            return Err(TextlocError::EmptyContents);
        }

        let parser = self.parser_for_file(file_name)?;
        debug!(file = file_name, parser = parser.id(), "classifying file");
        let stats = parser.parse(contents)?;

        self.record(file_name, stats);
        Ok(stats)
    }

    /// Read a file from disk and [`process`](Self::process) it under its
    /// path.
    pub fn process_file(&mut self, path: impl AsRef<Path>) -> Result<Statistics> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| TextlocError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.process(&path.to_string_lossy(), &contents)
    }

    /// Process several files.
    ///
    /// Per-file errors (empty file, no parser, unreadable file) are collected
    /// and returned unless `fail_fast` is set, in which case the first error
    /// is returned. Other errors always abort.
    pub fn process_files<P: AsRef<Path>>(
        &mut self,
        files: &[P],
        fail_fast: bool,
    ) -> Result<Vec<(PathBuf, TextlocError)>> {
        let mut skipped = Vec::new();

        for file in files {
            let path = file.as_ref();
            match self.process_file(path) {
                Ok(_) => {}
                Err(e) if e.is_per_file() && !fail_fast => {
                    warn!(file = %path.display(), error = %e, "skipping file");
                    skipped.push((path.to_path_buf(), e));
                }
                Err(e) => return Err(e),
            }
        }

        Ok(skipped)
    }

    /// Store already computed statistics for `file_name`.
    ///
    /// This is the reconciliation half of [`process`](Self::process): the
    /// previous statistics of the file, if any, are removed from the totals
    /// and returned. Useful when parsing happens elsewhere, e.g. on worker
    /// threads.
    pub fn record(&mut self, file_name: impl Into<String>, stats: Statistics) -> Option<Statistics> {
        let previous = self.files.insert(file_name.into(), stats);
        if let Some(previous) = previous {
            self.totals -= previous;
        }
        self.totals += stats;
        previous
    }

    /// Forget all processed files and zero the totals.
    pub fn reset(&mut self) {
        self.files.clear();
        self.totals = Statistics::default();
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    /// Pick the parser that would handle `file_name`.
    ///
    /// The extension is aliased once and matched against the registry; the
    /// default parser is used when there is no extension or no match, unless
    /// extensions are required.
    pub fn parser_for_file(&self, file_name: &str) -> Result<&dyn Parser> {
        let extension = extract_extension_from_path(file_name);

        if extension.is_empty() {
            return self.fallback_parser().ok_or_else(|| TextlocError::NoExtension {
                file: file_name.to_string(),
            });
        }

        let resolved = self.alias_extension(&extension);
        if let Some(parser) = self.parser_for_extension(&resolved) {
            return Ok(parser);
        }

        self.fallback_parser()
            .ok_or_else(|| TextlocError::NoParserForExtension {
                file: file_name.to_string(),
                extension: resolved,
            })
    }

    /// Whether [`parser_for_file`](Self::parser_for_file) would succeed.
    pub fn can_process(&self, file_name: &str) -> bool {
        self.parser_for_file(file_name).is_ok()
    }

    fn fallback_parser(&self) -> Option<&dyn Parser> {
        if self.options.require_extension {
            return None;
        }
        self.options.default_parser.as_deref()
    }

    /// First registered parser claiming `ext`. Never the default parser.
    pub fn parser_for_extension(&self, ext: &str) -> Option<&dyn Parser> {
        let ext = clean_extension(ext);
        if ext.is_empty() {
            return None;
        }
        self.parsers
            .iter()
            .find(|parser| parser.has_extension(&ext))
            .map(|parser| -> &dyn Parser { &**parser })
    }

    /// Whether a registered parser claims `ext`.
    pub fn has_parser_for_extension(&self, ext: &str) -> bool {
        self.parser_for_extension(ext).is_some()
    }

    // ------------------------------------------------------------------
    // Parser registry
    // ------------------------------------------------------------------

    /// Whether a parser with this id is registered.
    pub fn has_parser(&self, id: &str) -> bool {
        self.parsers.iter().any(|parser| parser.id() == id)
    }

    /// Registered parser with the given id.
    pub fn parser(&self, id: &str) -> Option<&dyn Parser> {
        self.parsers
            .iter()
            .find(|parser| parser.id() == id)
            .map(|parser| -> &dyn Parser { &**parser })
    }

    /// Mutable access, e.g. to change a registered parser's extensions.
    pub fn parser_mut(&mut self, id: &str) -> Option<&mut (dyn Parser + 'static)> {
        self.parsers
            .iter_mut()
            .find(|parser| parser.id() == id)
            .map(|parser| parser.as_mut())
    }

    /// Register a parser. Returns `false` if its id is already taken.
    pub fn add_parser(&mut self, parser: Box<dyn Parser>) -> bool {
        if self.has_parser(parser.id()) {
            return false;
        }
        self.parsers.push(parser);
        true
    }

    /// Register several parsers. Returns `true` if any was added.
    pub fn add_parsers(&mut self, parsers: impl IntoIterator<Item = Box<dyn Parser>>) -> bool {
        parsers
            .into_iter()
            .fold(false, |added, parser| self.add_parser(parser) || added)
    }

    /// Unregister a parser by id and hand it back.
    pub fn remove_parser(&mut self, id: &str) -> Option<Box<dyn Parser>> {
        let idx = self.parsers.iter().position(|parser| parser.id() == id)?;
        Some(self.parsers.remove(idx))
    }

    /// Registered parsers in registration order
    pub fn parsers(&self) -> impl Iterator<Item = &dyn Parser> {
        self.parsers.iter().map(|parser| -> &dyn Parser { &**parser })
    }

    /// Ids of the registered parsers in registration order.
    pub fn parser_ids(&self) -> Vec<String> {
        self.parsers.iter().map(|parser| parser.id().to_string()).collect()
    }

    /// Unregister every parser. Processed totals are kept.
    pub fn clear_parsers(&mut self) {
        self.parsers.clear();
    }

    // ------------------------------------------------------------------
    // Extension aliases
    // ------------------------------------------------------------------

    /// Alias `from` to `to`, returning the target it replaced.
    pub fn add_extension_alias(&mut self, from: &str, to: &str) -> Result<Option<String>> {
        self.aliases.insert(from, to)
    }

    /// Add several aliases; none are applied if any pair is invalid.
    pub fn add_extension_aliases<A, B>(
        &mut self,
        pairs: impl IntoIterator<Item = (A, B)>,
    ) -> Result<Vec<(String, String)>>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        self.aliases.insert_many(pairs)
    }

    /// Drop the alias for `from`, returning its target.
    pub fn remove_extension_alias(&mut self, from: &str) -> Option<String> {
        self.aliases.remove(from)
    }

    /// Target configured for `from`, without resolution.
    pub fn extension_alias(&self, from: &str) -> Option<&str> {
        self.aliases.get(from)
    }

    /// All aliases as `(from, to)` pairs in insertion order.
    pub fn extension_aliases(&self) -> Vec<(String, String)> {
        self.aliases.entries()
    }

    /// Remove every alias.
    pub fn clear_extension_aliases(&mut self) {
        self.aliases.clear();
    }

    /// Clean `ext` and apply at most one alias.
    pub fn alias_extension(&self, ext: &str) -> String {
        self.aliases.resolve(ext)
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Latest statistics per processed file name.
    pub fn files_read(&self) -> &BTreeMap<String, Statistics> {
        &self.files
    }

    /// Number of distinct files counted.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Line totals over all files.
    pub fn line_statistics(&self) -> LineStats {
        self.totals.lines
    }

    /// Character totals over all files.
    pub fn character_statistics(&self) -> CharacterStats {
        self.totals.characters
    }

    /// Totals as a single [`Statistics`] pair
    pub fn totals(&self) -> Statistics {
        self.totals
    }

    /// Files and totals together.
    pub fn statistics(&self) -> CountSnapshot {
        CountSnapshot {
            files: self.files.clone(),
            lines: self.totals.lines,
            characters: self.totals.characters,
        }
    }
}
