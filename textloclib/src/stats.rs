//! Core data structures for line and character statistics

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Line classification counts for one file or a set of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    /// All classified lines
    pub total: u64,
    /// Lines carrying source text (`source + mixed`)
    pub total_source: u64,
    /// Lines with source text and no comment
    pub source: u64,
    /// Lines carrying a comment (`inline_comments + block_comments + mixed`)
    pub total_comments: u64,
    /// Lines holding only a `//` comment
    pub inline_comments: u64,
    /// Lines inside or touched by a `/* */` comment with no source text
    pub block_comments: u64,
    /// Lines holding both source text and a comment
    pub mixed: u64,
    /// Lines with whitespace only
    pub whitespace: u64,
    /// Zero-length lines
    pub empty: u64,
}

impl LineStats {
    /// Create a new LineStats with all zeros
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the exclusive line classes.
    ///
    /// Equals `total` whenever the record is consistent.
    pub fn classified(&self) -> u64 {
        self.source
            + self.inline_comments
            + self.block_comments
            + self.mixed
            + self.whitespace
            + self.empty
    }

    /// Whether the derived counters agree with the exclusive classes.
    pub fn is_consistent(&self) -> bool {
        self.total == self.classified()
            && self.total_source == self.source + self.mixed
            && self.total_comments == self.inline_comments + self.block_comments + self.mixed
    }

    /// Lines that are either empty or whitespace only
    pub fn blank(&self) -> u64 {
        self.whitespace + self.empty
    }
}

impl Add for LineStats {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for LineStats {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.total_source += other.total_source;
        self.source += other.source;
        self.total_comments += other.total_comments;
        self.inline_comments += other.inline_comments;
        self.block_comments += other.block_comments;
        self.mixed += other.mixed;
        self.whitespace += other.whitespace;
        self.empty += other.empty;
    }
}

impl Sub for LineStats {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self -= other;
        self
    }
}

impl SubAssign for LineStats {
    fn sub_assign(&mut self, other: Self) {
        self.total = self.total.saturating_sub(other.total);
        self.total_source = self.total_source.saturating_sub(other.total_source);
        self.source = self.source.saturating_sub(other.source);
        self.total_comments = self.total_comments.saturating_sub(other.total_comments);
        self.inline_comments = self.inline_comments.saturating_sub(other.inline_comments);
        self.block_comments = self.block_comments.saturating_sub(other.block_comments);
        self.mixed = self.mixed.saturating_sub(other.mixed);
        self.whitespace = self.whitespace.saturating_sub(other.whitespace);
        self.empty = self.empty.saturating_sub(other.empty);
    }
}

/// Character classification counts.
///
/// `comment` overlaps the class counters: a commented letter counts towards
/// both `alphabetical` and `comment`. Line terminators are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStats {
    /// All classified characters
    pub total: u64,
    /// Non-whitespace characters outside comments
    pub source: u64,
    /// Characters inside comments, markers included
    pub comment: u64,
    pub whitespace: u64,
    pub numerical: u64,
    pub alphabetical: u64,
    pub special: u64,
}

impl CharacterStats {
    /// Create a new CharacterStats with all zeros
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of the exclusive character classes
    pub fn classified(&self) -> u64 {
        self.whitespace + self.numerical + self.alphabetical + self.special
    }
}

impl Add for CharacterStats {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl AddAssign for CharacterStats {
    fn add_assign(&mut self, other: Self) {
        self.total += other.total;
        self.source += other.source;
        self.comment += other.comment;
        self.whitespace += other.whitespace;
        self.numerical += other.numerical;
        self.alphabetical += other.alphabetical;
        self.special += other.special;
    }
}

impl Sub for CharacterStats {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self -= other;
        self
    }
}

impl SubAssign for CharacterStats {
    fn sub_assign(&mut self, other: Self) {
        self.total = self.total.saturating_sub(other.total);
        self.source = self.source.saturating_sub(other.source);
        self.comment = self.comment.saturating_sub(other.comment);
        self.whitespace = self.whitespace.saturating_sub(other.whitespace);
        self.numerical = self.numerical.saturating_sub(other.numerical);
        self.alphabetical = self.alphabetical.saturating_sub(other.alphabetical);
        self.special = self.special.saturating_sub(other.special);
    }
}

/// The result of one classification pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub lines: LineStats,
    pub characters: CharacterStats,
}

impl Statistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair up line and character statistics
    pub fn from_parts(lines: LineStats, characters: CharacterStats) -> Self {
        Self { lines, characters }
    }
}

impl Add for Statistics {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            lines: self.lines + other.lines,
            characters: self.characters + other.characters,
        }
    }
}

impl AddAssign for Statistics {
    fn add_assign(&mut self, other: Self) {
        self.lines += other.lines;
        self.characters += other.characters;
    }
}

impl Sub for Statistics {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            lines: self.lines - other.lines,
            characters: self.characters - other.characters,
        }
    }
}

impl SubAssign for Statistics {
    fn sub_assign(&mut self, other: Self) {
        self.lines -= other.lines;
        self.characters -= other.characters;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lines() -> LineStats {
        LineStats {
            total: 10,
            total_source: 5,
            source: 4,
            total_comments: 4,
            inline_comments: 2,
            block_comments: 1,
            mixed: 1,
            whitespace: 1,
            empty: 1,
        }
    }

    #[test]
    fn test_line_stats_default() {
        let lines = LineStats::new();
        assert_eq!(lines.total, 0);
        assert_eq!(lines.classified(), 0);
        assert!(lines.is_consistent());
    }

    #[test]
    fn test_line_stats_consistency() {
        let lines = sample_lines();
        assert_eq!(lines.classified(), 10);
        assert!(lines.is_consistent());
        assert_eq!(lines.blank(), 2);

        let broken = LineStats {
            total: 11,
            ..sample_lines()
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_line_stats_add_sub() {
        let a = sample_lines();
        let sum = a + a;
        assert_eq!(sum.total, 20);
        assert_eq!(sum.mixed, 2);
        assert!(sum.is_consistent());

        assert_eq!(sum - a, a);
    }

    #[test]
    fn test_sub_saturates() {
        let small = LineStats {
            total: 1,
            source: 1,
            total_source: 1,
            ..Default::default()
        };
        let diff = small - sample_lines();
        assert_eq!(diff, LineStats::new());
    }

    #[test]
    fn test_character_stats_add_sub() {
        let a = CharacterStats {
            total: 6,
            source: 4,
            comment: 2,
            whitespace: 1,
            numerical: 1,
            alphabetical: 3,
            special: 1,
        };
        let mut acc = CharacterStats::new();
        acc += a;
        acc += a;
        assert_eq!(acc.total, 12);
        assert_eq!(acc.classified(), 12);

        acc -= a;
        assert_eq!(acc, a);
    }

    #[test]
    fn test_statistics_pairwise() {
        let stats = Statistics::from_parts(
            sample_lines(),
            CharacterStats {
                total: 3,
                alphabetical: 3,
                source: 3,
                ..Default::default()
            },
        );
        let doubled = stats + stats;
        assert_eq!(doubled.lines.total, 20);
        assert_eq!(doubled.characters.alphabetical, 6);
        assert_eq!(doubled - stats, stats);
    }
}
