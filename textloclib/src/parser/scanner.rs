//! Single-pass line and character scanner shared by all parsers.
//!
//! The scanner walks the contents one character at a time, classifying each
//! character and closing a line at every `\n`. A `\r` directly followed by
//! `\n` belongs to the line terminator and is not counted. When the comment
//! syntax allows it, a two-character lookback drives the comment state
//! machine:
//!
//! ```text
//!            "//"                    end of line
//!   Normal ---------> InlineComment -------------> Normal
//!     |
//!     |  "/*"                  "*/"
//!     +-------> BlockComment -------> Normal
//! ```
//!
//! Block comments survive line ends; inline comments never do.

use std::iter::Peekable;
use std::str::Chars;

use tracing::warn;

use crate::stats::{CharacterStats, LineStats, Statistics};

/// Regex `\s` whitespace: Unicode `White_Space` plus the byte order mark,
/// minus NEL (U+0085).
fn is_space(c: char) -> bool {
    c == '\u{FEFF}' || (c.is_whitespace() && c != '\u{85}')
}

/// Which comment markers the scanner recognizes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommentSyntax {
    /// No comments at all; every line is source, whitespace or empty
    None,
    /// `//` inline comments and `/* */` block comments
    CFamily,
}

/// Comment state of the scanner.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Normal,
    InlineComment,
    BlockComment,
}

/// Tracks what has been seen on the current line.
#[derive(Default, Debug, Copy, Clone)]
struct LineContext {
    /// Characters consumed, excluding the terminator
    chars: u64,
    /// Non-whitespace characters outside comments
    source_chars: u64,
    /// A block comment was open at some point on this line
    touched_block: bool,
}

impl LineContext {
    fn has_source(&self) -> bool {
        self.source_chars > 0
    }
}

pub(crate) struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    syntax: CommentSyntax,
    mode: Mode,
    prev: Option<char>,
    line: LineContext,
    /// Lines closed so far, counted apart from the per-class tallies
    closed: u64,
    lines: LineStats,
    characters: CharacterStats,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(contents: &'a str, syntax: CommentSyntax) -> Self {
        Self {
            chars: contents.chars().peekable(),
            syntax,
            mode: Mode::Normal,
            prev: None,
            line: LineContext::default(),
            closed: 0,
            lines: LineStats::default(),
            characters: CharacterStats::default(),
        }
    }

    /// Scan everything and return the statistics.
    pub(crate) fn scan(mut self) -> Statistics {
        let mut terminated = false;

        while let Some(c) = self.chars.next() {
            terminated = false;
            match c {
                '\n' => {
                    self.finish_line();
                    terminated = true;
                }
                '\r' if self.chars.peek() == Some(&'\n') => {}
                _ => self.visit_char(c),
            }
        }

        if !terminated {
            self.finish_line();
        }

        self.finish()
    }

    fn visit_char(&mut self, c: char) {
        self.line.chars += 1;
        let whitespace = self.classify(c);

        match self.mode {
            Mode::Normal => {
                if self.opens_comment(c) {
                    // The '/' that starts the marker was tallied as source
                    // when it was read. Move it over to the comment side and
                    // count the second marker character as comment only.
                    self.characters.source -= 1;
                    self.line.source_chars -= 1;
                    self.characters.comment += 2;

                    if c == '/' {
                        self.mode = Mode::InlineComment;
                    } else {
                        self.mode = Mode::BlockComment;
                        self.line.touched_block = true;
                    }
                    self.prev = None;
                    return;
                }

                if !whitespace {
                    self.characters.source += 1;
                    self.line.source_chars += 1;
                }
            }
            Mode::InlineComment => {
                self.characters.comment += 1;
            }
            Mode::BlockComment => {
                self.characters.comment += 1;
                if self.prev == Some('*') && c == '/' {
                    self.mode = Mode::Normal;
                    self.prev = None;
                    return;
                }
            }
        }

        self.prev = Some(c);
    }

    fn opens_comment(&self, c: char) -> bool {
        self.syntax == CommentSyntax::CFamily && self.prev == Some('/') && (c == '/' || c == '*')
    }

    /// Bump the class counter for `c`; returns whether it was whitespace.
    fn classify(&mut self, c: char) -> bool {
        if is_space(c) {
            self.characters.whitespace += 1;
            return true;
        }

        if c.is_ascii_digit() {
            self.characters.numerical += 1;
        } else if c.is_alphabetic() {
            self.characters.alphabetical += 1;
        } else {
            self.characters.special += 1;
        }
        false
    }

    fn finish_line(&mut self) {
        let line = self.line;
        let commented = match self.mode {
            Mode::InlineComment => {
                self.mode = Mode::Normal;
                Some(Mode::InlineComment)
            }
            Mode::BlockComment => Some(Mode::BlockComment),
            Mode::Normal if line.touched_block => Some(Mode::BlockComment),
            Mode::Normal => None,
        };

        match commented {
            Some(_) if line.has_source() => self.lines.mixed += 1,
            Some(Mode::InlineComment) => self.lines.inline_comments += 1,
            Some(_) => self.lines.block_comments += 1,
            None if line.chars == 0 => self.lines.empty += 1,
            None if line.has_source() => self.lines.source += 1,
            None => self.lines.whitespace += 1,
        }
        self.closed += 1;

        self.prev = None;
        self.line = LineContext {
            touched_block: self.mode == Mode::BlockComment,
            ..Default::default()
        };
    }

    fn finish(mut self) -> Statistics {
        let lines = &mut self.lines;
        lines.total = self.closed;
        lines.total_source = lines.source + lines.mixed;
        lines.total_comments = lines.inline_comments + lines.block_comments + lines.mixed;

        self.characters.total = self.characters.classified();

        if lines.classified() != lines.total {
            warn!(
                total = lines.total,
                classified = lines.classified(),
                "line classes do not add up to the line total"
            );
        }

        Statistics::from_parts(self.lines, self.characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(contents: &str) -> Statistics {
        Scanner::new(contents, CommentSyntax::None).scan()
    }

    fn cfamily(contents: &str) -> Statistics {
        Scanner::new(contents, CommentSyntax::CFamily).scan()
    }

    #[test]
    fn single_source_line() {
        let stats = plain("abc");
        assert_eq!(stats.lines.total, 1);
        assert_eq!(stats.lines.source, 1);
        assert_eq!(stats.characters.total, 3);
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        let stats = plain("abc\n");
        assert_eq!(stats.lines.total, 1);
        assert_eq!(stats.lines.empty, 0);
    }

    #[test]
    fn blank_lines() {
        let stats = plain("\n \t\n");
        assert_eq!(stats.lines.empty, 1);
        assert_eq!(stats.lines.whitespace, 1);
        assert_eq!(stats.lines.total, 2);
        assert_eq!(stats.characters.whitespace, 2);
    }

    #[test]
    fn lone_carriage_return_is_whitespace() {
        let stats = plain("a\rb");
        assert_eq!(stats.lines.total, 1);
        assert_eq!(stats.characters.whitespace, 1);
        assert_eq!(stats.characters.total, 3);
    }

    #[test]
    fn crlf_only_line_is_empty() {
        let stats = plain("\r\n");
        assert_eq!(stats.lines.empty, 1);
        assert_eq!(stats.characters.total, 0);
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        let stats = plain("\u{FEFF}\nabc");
        assert_eq!(stats.lines.whitespace, 1);
        assert_eq!(stats.lines.source, 1);
        assert_eq!(stats.characters.whitespace, 1);
        assert_eq!(stats.characters.special, 0);
    }

    #[test]
    fn next_line_is_not_whitespace() {
        let stats = plain("\u{0085}");
        assert_eq!(stats.characters.whitespace, 0);
        assert_eq!(stats.characters.special, 1);
        assert_eq!(stats.lines.source, 1);
    }

    #[test]
    fn space_predicate() {
        for c in [' ', '\t', '\u{0B}', '\u{0C}', '\u{A0}', '\u{2028}', '\u{3000}', '\u{FEFF}'] {
            assert!(is_space(c), "{c:?}");
        }
        for c in ['\u{85}', 'a', '0', '\u{200B}'] {
            assert!(!is_space(c), "{c:?}");
        }
    }

    #[test]
    fn line_total_counts_closed_lines() {
        let stats = cfamily("a\n/* x\n\n*/ b // c\n\n  ");
        assert_eq!(stats.lines.total, 6);
        assert_eq!(stats.lines.total, stats.lines.classified());
        assert_eq!(stats.lines.empty, 1);
        assert_eq!(stats.lines.source, 1);
        assert_eq!(stats.lines.block_comments, 2);
        assert_eq!(stats.lines.mixed, 1);
        assert_eq!(stats.lines.whitespace, 1);
    }

    #[test]
    fn plain_ignores_comment_markers() {
        let stats = plain("// not a comment\n/* nor this */");
        assert_eq!(stats.lines.source, 2);
        assert_eq!(stats.lines.total_comments, 0);
        assert_eq!(stats.characters.comment, 0);
    }

    #[test]
    fn unicode_letters_are_alphabetical() {
        let stats = plain("é1-");
        assert_eq!(stats.characters.alphabetical, 1);
        assert_eq!(stats.characters.numerical, 1);
        assert_eq!(stats.characters.special, 1);
    }

    #[test]
    fn inline_marker_is_not_source() {
        let stats = cfamily("//");
        assert_eq!(stats.characters.source, 0);
        assert_eq!(stats.characters.comment, 2);
        assert_eq!(stats.characters.special, 2);
        assert_eq!(stats.lines.inline_comments, 1);
    }

    #[test]
    fn block_open_and_close_on_one_line() {
        let stats = cfamily("/* c */");
        assert_eq!(stats.lines.block_comments, 1);
        assert_eq!(stats.lines.total, 1);
        assert_eq!(stats.characters.comment, 7);
        assert_eq!(stats.characters.source, 0);
    }

    #[test]
    fn marker_characters_are_not_reused() {
        // "/*/" opens a block but does not close it.
        let stats = cfamily("/*/\nx");
        assert_eq!(stats.lines.block_comments, 2);
        assert_eq!(stats.lines.source, 0);

        // "*//" closes the block, the trailing '/' is source.
        let stats = cfamily("/* *//");
        assert_eq!(stats.lines.mixed, 1);
        assert_eq!(stats.characters.source, 1);
    }

    #[test]
    fn lookback_resets_at_line_end() {
        let stats = cfamily("a/\n/b");
        assert_eq!(stats.lines.source, 2);
        assert_eq!(stats.characters.comment, 0);
    }

    #[test]
    fn whitespace_breaks_markers() {
        let stats = cfamily("/ /");
        assert_eq!(stats.lines.source, 1);
        assert_eq!(stats.characters.comment, 0);
    }
}
