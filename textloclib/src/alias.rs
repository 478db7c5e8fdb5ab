//! Extension aliases: rewrite one extension into another before a parser is
//! looked up.
//!
//! Resolution applies a single substitution. With `a -> b` and `b -> c`
//! configured, `a` resolves to `b`, which rules out cycles.

use crate::error::TextlocError;
use crate::extension::clean_extension;
use crate::Result;

/// Ordered mapping from a cleaned extension to its replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionAliasTable {
    entries: Vec<(String, String)>,
}

impl ExtensionAliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `from` to `to`, returning the previous target of `from` if any.
    ///
    /// Fails with [`TextlocError::InvalidAlias`] if either side cleans to an
    /// empty extension.
    pub fn insert(&mut self, from: &str, to: &str) -> Result<Option<String>> {
        let (from, to) = clean_pair(from, to)?;
        Ok(self.insert_clean(from, to))
    }

    /// Insert several aliases at once.
    ///
    /// Every pair is validated before any is applied, so a malformed pair
    /// leaves the table unchanged. Returns the `(from, previous target)` pairs
    /// that were overwritten.
    pub fn insert_many<A, B>(
        &mut self,
        pairs: impl IntoIterator<Item = (A, B)>,
    ) -> Result<Vec<(String, String)>>
    where
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let cleaned = pairs
            .into_iter()
            .map(|(from, to)| clean_pair(from.as_ref(), to.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut overwritten = Vec::new();
        for (from, to) in cleaned {
            if let Some(previous) = self.insert_clean(from.clone(), to) {
                overwritten.push((from, previous));
            }
        }
        Ok(overwritten)
    }

    fn insert_clean(&mut self, from: String, to: String) -> Option<String> {
        match self.entries.iter_mut().find(|(key, _)| *key == from) {
            Some((_, target)) => Some(std::mem::replace(target, to)),
            None => {
                self.entries.push((from, to));
                None
            }
        }
    }

    /// Remove the alias for `from`, returning its target.
    pub fn remove(&mut self, from: &str) -> Option<String> {
        let from = clean_extension(from);
        let idx = self.entries.iter().position(|(key, _)| *key == from)?;
        Some(self.entries.remove(idx).1)
    }

    /// Target configured for `from`, without resolution.
    pub fn get(&self, from: &str) -> Option<&str> {
        let from = clean_extension(from);
        self.entries
            .iter()
            .find(|(key, _)| *key == from)
            .map(|(_, target)| target.as_str())
    }

    /// Snapshot of all aliases in insertion order
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.clone()
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no alias is configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every alias.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Clean `ext` and apply at most one alias substitution.
    pub fn resolve(&self, ext: &str) -> String {
        let ext = clean_extension(ext);
        match self.entries.iter().find(|(key, _)| *key == ext) {
            Some((_, target)) => target.clone(),
            None => ext,
        }
    }
}

fn clean_pair(from: &str, to: &str) -> Result<(String, String)> {
    let cleaned_from = clean_extension(from);
    let cleaned_to = clean_extension(to);
    if cleaned_from.is_empty() || cleaned_to.is_empty() {
        return Err(TextlocError::InvalidAlias {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok((cleaned_from, cleaned_to))
}
