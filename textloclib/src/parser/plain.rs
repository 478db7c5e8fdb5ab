//! The plain text parser: lines are source, whitespace or empty.

use super::{scan, CommentSyntax, ExtensionSet, Parser};
use crate::stats::Statistics;
use crate::Result;

pub const ID: &str = "plain";
pub const NAME: &str = "Plain Text";

/// Classifies text with no notion of comments.
///
/// Starts without any extensions; it usually serves as the default parser or
/// gets its extensions from configuration.
#[derive(Debug, Clone, Default)]
pub struct PlainTextParser {
    extensions: ExtensionSet,
}

impl PlainTextParser {
    /// Create a plain text parser that claims no extensions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser claiming the given extensions.
    pub fn with_extensions(extensions: &[&str]) -> Self {
        Self {
            extensions: ExtensionSet::from_extensions(extensions),
        }
    }
}

impl Parser for PlainTextParser {
    fn id(&self) -> &str {
        ID
    }

    fn name(&self) -> &str {
        NAME
    }

    fn extension_set(&self) -> &ExtensionSet {
        &self.extensions
    }

    fn extension_set_mut(&mut self) -> &mut ExtensionSet {
        &mut self.extensions
    }

    fn parse(&self, contents: &str) -> Result<Statistics> {
        scan(contents, CommentSyntax::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TextlocError;
    use crate::stats::{CharacterStats, LineStats};

    fn stats(contents: &str) -> Statistics {
        PlainTextParser::new().parse(contents).unwrap()
    }

    #[test]
    fn identity() {
        let parser = PlainTextParser::new();
        assert_eq!(parser.id(), "plain");
        assert_eq!(parser.name(), "Plain Text");
        assert!(parser.extensions().is_empty());
    }

    #[test]
    fn with_extensions_cleans_input() {
        let parser = PlainTextParser::with_extensions(&["TXT", ".md", "bad|ext"]);
        assert_eq!(parser.extensions(), vec!["txt", "md"]);
        assert!(parser.has_extension("Md"));
        assert!(!parser.has_extension("rs"));
    }

    #[test]
    fn empty_contents_fail() {
        let result = PlainTextParser::new().parse("");
        assert!(matches!(result, Err(TextlocError::EmptyContents)));
    }

    #[test]
    fn mixed_terminators() {
        let stats = stats("123\nabc\n!@#\n\t\r\n\r\n\tdef");

        assert_eq!(
            stats.lines,
            LineStats {
                total: 6,
                total_source: 4,
                source: 4,
                total_comments: 0,
                inline_comments: 0,
                block_comments: 0,
                mixed: 0,
                whitespace: 1,
                empty: 1,
            }
        );
        assert_eq!(
            stats.characters,
            CharacterStats {
                total: 14,
                source: 12,
                comment: 0,
                whitespace: 2,
                numerical: 3,
                alphabetical: 6,
                special: 3,
            }
        );
    }

    #[test]
    fn one_code_line() {
        let stats = stats("let x = 1;\n");

        assert_eq!(stats.lines.total, 1);
        assert_eq!(stats.lines.source, 1);
        assert_eq!(stats.characters.whitespace, 3);
        assert_eq!(stats.characters.alphabetical, 4);
        assert_eq!(stats.characters.numerical, 1);
        assert_eq!(stats.characters.special, 2);
        assert_eq!(stats.characters.source, 7);
    }

    #[test]
    fn only_newlines() {
        let stats = stats("\n\n\n");
        assert_eq!(stats.lines.empty, 3);
        assert_eq!(stats.lines.total, 3);
        assert_eq!(stats.characters.total, 0);
    }

    #[test]
    fn whitespace_only_file() {
        let stats = stats("  \t ");
        assert_eq!(stats.lines.whitespace, 1);
        assert_eq!(stats.characters.whitespace, 4);
        assert_eq!(stats.characters.source, 0);
    }
}
