//! Parsers turn file contents into line and character statistics.
//!
//! Every parser owns a set of extensions it claims and a classification
//! strategy. The [`Parser`] trait is what the aggregator stores, so new
//! variants only need to describe their identity and how they scan.
//!
//! ## Built-in parsers
//!
//! | id        | name       | comments          |
//! |-----------|------------|-------------------|
//! | `plain`   | Plain Text | none              |
//! | `cfamily` | C-Family   | `//` and `/* */`  |

pub mod cfamily;
pub mod plain;
mod scanner;

use std::fmt;

use crate::error::TextlocError;
use crate::extension::clean_extension;
use crate::stats::Statistics;
use crate::Result;

pub use cfamily::CFamilyParser;
pub use plain::PlainTextParser;
pub use scanner::CommentSyntax;

use scanner::Scanner;

/// Ids of the parsers shipped with the library, in registration order.
pub const BUILTIN_PARSER_IDS: &[&str] = &[plain::ID, cfamily::ID];

/// An ordered, deduplicated set of cleaned extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl ExtensionSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw extensions, dropping invalid ones and duplicates.
    pub fn from_extensions<S: AsRef<str>>(extensions: impl IntoIterator<Item = S>) -> Self {
        let mut set = Self::new();
        for ext in extensions {
            set.insert(ext.as_ref());
        }
        set
    }

    /// Insert a raw extension. Returns `false` if it is invalid or present.
    pub fn insert(&mut self, ext: &str) -> bool {
        let cleaned = clean_extension(ext);
        if cleaned.is_empty() || self.extensions.contains(&cleaned) {
            return false;
        }
        self.extensions.push(cleaned);
        true
    }

    /// Remove a raw extension. Returns `false` if it is invalid or absent.
    pub fn remove(&mut self, ext: &str) -> bool {
        let cleaned = clean_extension(ext);
        if cleaned.is_empty() {
            return false;
        }
        match self.extensions.iter().position(|e| *e == cleaned) {
            Some(idx) => {
                self.extensions.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Whether the cleaned form of `ext` is in the set.
    pub fn contains(&self, ext: &str) -> bool {
        let cleaned = clean_extension(ext);
        !cleaned.is_empty() && self.extensions.contains(&cleaned)
    }

    /// Extensions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }

    /// Number of extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Whether the set has no extensions.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Owned copy of the extensions.
    pub fn to_vec(&self) -> Vec<String> {
        self.extensions.clone()
    }
}

/// A named classification strategy.
///
/// Implementors provide their identity, access to their extension set and the
/// scan itself; the extension bookkeeping comes for free. Parsing takes
/// `&self`, so one parser may classify files from several threads while the
/// aggregator serializes the bookkeeping.
pub trait Parser: fmt::Debug + Send + Sync {
    /// Dispatch key, unique within a registry
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Extensions this parser claims
    fn extension_set(&self) -> &ExtensionSet;

    /// Mutable access to the claimed extensions
    fn extension_set_mut(&mut self) -> &mut ExtensionSet;

    /// Classify `contents` in a single pass.
    ///
    /// Fails with [`TextlocError::EmptyContents`] on empty input.
    fn parse(&self, contents: &str) -> Result<Statistics>;

    /// Snapshot of the claimed extensions
    fn extensions(&self) -> Vec<String> {
        self.extension_set().to_vec()
    }

    /// Whether the cleaned form of `ext` is claimed.
    fn has_extension(&self, ext: &str) -> bool {
        self.extension_set().contains(ext)
    }

    /// Claim an extension. Returns `false` for invalid values and duplicates.
    fn add_extension(&mut self, ext: &str) -> bool {
        self.extension_set_mut().insert(ext)
    }

    /// Claim several extensions. Returns `true` if any was added.
    fn add_extensions(&mut self, exts: &[&str]) -> bool {
        let set = self.extension_set_mut();
        exts.iter().fold(false, |added, ext| set.insert(ext) || added)
    }

    /// Stop claiming an extension. Returns `false` if it was not claimed.
    fn remove_extension(&mut self, ext: &str) -> bool {
        self.extension_set_mut().remove(ext)
    }
}

/// Run the shared scanner after rejecting empty input.
pub(crate) fn scan(contents: &str, syntax: CommentSyntax) -> Result<Statistics> {
    if contents.is_empty() {
        return Err(TextlocError::EmptyContents);
    }
    Ok(Scanner::new(contents, syntax).scan())
}

/// Construct a built-in parser by id.
pub fn parser_from_id(id: &str) -> Result<Box<dyn Parser>> {
    match id.trim().to_lowercase().as_str() {
        plain::ID => Ok(Box::new(PlainTextParser::new())),
        cfamily::ID => Ok(Box::new(CFamilyParser::new())),
        other => Err(TextlocError::InvalidArgument(format!(
            "unknown parser '{}' (expected one of: {})",
            other,
            BUILTIN_PARSER_IDS.join(", ")
        ))),
    }
}

/// Fresh instances of every built-in parser.
pub fn builtin_parsers() -> Vec<Box<dyn Parser>> {
    vec![
        Box::new(PlainTextParser::new()),
        Box::new(CFamilyParser::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_set_insert() {
        let mut set = ExtensionSet::new();
        assert!(set.insert(".TXT"));
        assert!(!set.insert("txt"));
        assert!(!set.insert("a|b"));
        assert!(!set.insert(""));
        assert_eq!(set.to_vec(), vec!["txt".to_string()]);
    }

    #[test]
    fn test_extension_set_remove() {
        let mut set = ExtensionSet::from_extensions(["md", "txt"]);
        assert!(set.remove("MD"));
        assert!(!set.remove("md"));
        assert!(!set.remove("<>"));
        assert_eq!(set.len(), 1);
        assert!(set.contains(".txt"));
    }

    #[test]
    fn test_extension_set_keeps_order() {
        let set = ExtensionSet::from_extensions(["c", "b", "a", "b"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_add_extensions_reports_any_success() {
        let mut parser = PlainTextParser::new();
        assert!(parser.add_extensions(&["txt", "TXT", "md"]));
        assert!(!parser.add_extensions(&["txt", "", "md"]));
        assert_eq!(parser.extensions(), vec!["txt", "md"]);
    }

    #[test]
    fn test_parser_from_id() {
        assert_eq!(parser_from_id("plain").unwrap().id(), "plain");
        assert_eq!(parser_from_id(" CFamily ").unwrap().id(), "cfamily");
        assert!(matches!(
            parser_from_id("cobol"),
            Err(TextlocError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_builtin_parsers_match_ids() {
        let ids: Vec<String> = builtin_parsers()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, BUILTIN_PARSER_IDS);
    }
}
