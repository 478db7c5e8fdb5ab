//! The C-family parser: plain text classification plus `//` and `/* */`
//! comment tracking.

use super::{scan, CommentSyntax, ExtensionSet, Parser};
use crate::stats::Statistics;
use crate::Result;

pub const ID: &str = "cfamily";
pub const NAME: &str = "C-Family";

/// Extensions claimed by a fresh C-family parser.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    // C, C++, C#, Objective-C
    "c", "h", "cc", "cpp", "cxx", "c++", "hh", "hpp", "hxx", "h++", "ino", "cs", "m", "mm",
    // JavaScript and TypeScript
    "js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts",
    // JVM and mobile
    "java", "kt", "kts", "scala", "sc", "groovy", "gradle", "swift", "dart",
    // others
    "php", "go", "rs", "zig", "proto",
    // CSS preprocessors
    "less", "scss", "sass", "styl",
];

/// Classifies C-like sources, telling comments apart from code.
///
/// Detection is naive: markers inside string literals still count, and block
/// comments do not nest.
#[derive(Debug, Clone)]
pub struct CFamilyParser {
    extensions: ExtensionSet,
}

impl Default for CFamilyParser {
    fn default() -> Self {
        Self {
            extensions: ExtensionSet::from_extensions(DEFAULT_EXTENSIONS),
        }
    }
}

impl CFamilyParser {
    /// Create a parser claiming [`DEFAULT_EXTENSIONS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser claiming the defaults plus `extensions`.
    pub fn with_extensions(extensions: &[&str]) -> Self {
        let mut parser = Self::new();
        parser.add_extensions(extensions);
        parser
    }
}

impl Parser for CFamilyParser {
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
        scan(contents, CommentSyntax::CFamily)
    }
}
