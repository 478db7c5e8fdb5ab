//! File extension normalization.
//!
//! Extensions are compared in a cleaned form: the text after the last dot,
//! lower-cased and trimmed. Anything containing a character that cannot
//! appear in a file extension cleans to the empty string, which callers treat
//! as "no valid extension".

use std::path::Path;

/// Characters that disqualify an extension.
const FORBIDDEN: &[char] = &['\0', '\\', '/', ':', '*', '\'', '"', '<', '>', '|', '.'];

/// Check whether a file name carries an extension.
///
/// Hidden files such as `.gitignore` have no extension, and neither does a
/// name ending in a dot.
pub fn has_extension(name: &str) -> bool {
    match name.rfind('.') {
        Some(idx) => idx >= 1 && idx + 1 < name.len(),
        None => false,
    }
}

/// Normalize an extension fragment.
///
/// Returns an empty string when the fragment is not a valid extension.
///
/// ```rust
/// use textloclib::extension::clean_extension;
///
/// assert_eq!(clean_extension(".RS"), "rs");
/// assert_eq!(clean_extension("tar.GZ"), "gz");
/// assert_eq!(clean_extension("a|b"), "");
/// ```
pub fn clean_extension(ext: &str) -> String {
    let tail = match ext.rfind('.') {
        Some(idx) => &ext[idx + 1..],
        None => ext,
    };

    if tail.contains(FORBIDDEN) {
        return String::new();
    }

    tail.trim().to_lowercase()
}

/// Extract the cleaned extension of a file name.
///
/// Only the final dot-separated segment counts: `multi.ext.file` yields
/// `file`.
pub fn extract_extension(name: &str) -> String {
    if !has_extension(name) {
        return String::new();
    }

    match name.rfind('.') {
        Some(idx) => clean_extension(&name[idx + 1..]),
        None => String::new(),
    }
}

/// Extract the cleaned extension from the last component of a path.
pub fn extract_extension_from_path(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_name()
        .map(|name| extract_extension(&name.to_string_lossy()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension("main.rs"));
        assert!(has_extension("a.b"));
        assert!(has_extension("archive.tar.gz"));

        assert!(!has_extension(""));
        assert!(!has_extension("Makefile"));
        assert!(!has_extension(".gitignore"));
        assert!(!has_extension("sometype."));
        assert!(!has_extension("."));
    }

    #[test]
    fn test_clean_extension() {
        assert_eq!(clean_extension("rs"), "rs");
        assert_eq!(clean_extension(".Rs"), "rs");
        assert_eq!(clean_extension("  CPP "), "cpp");
        assert_eq!(clean_extension("file.name.TS"), "ts");
        assert_eq!(clean_extension(""), "");
    }

    #[test]
    fn test_clean_extension_rejects_forbidden_characters() {
        for bad in ["a\0b", "a\\b", "a/b", "a:b", "a*b", "a'b", "a\"b", "a<b", "a>b", "a|b"] {
            assert_eq!(clean_extension(bad), "", "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn test_extract_extension() {
        assert_eq!(extract_extension("Cased.BmP"), "bmp");
        assert_eq!(extract_extension("multi.ext.file"), "file");
        assert_eq!(extract_extension("sometype."), "");
        assert_eq!(extract_extension("noext"), "");
        assert_eq!(extract_extension(".hidden"), "");
        assert_eq!(extract_extension("src/main.rs"), "rs");
    }

    #[test]
    fn test_extract_extension_from_path() {
        assert_eq!(extract_extension_from_path("some.dir/Makefile"), "");
        assert_eq!(extract_extension_from_path("some.dir/lib.RS"), "rs");
        assert_eq!(extract_extension_from_path("/"), "");
    }
}
