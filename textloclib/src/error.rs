//! Error types for textloclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while classifying and aggregating files
#[derive(Error, Debug)]
pub enum TextlocError {
    /// Contents handed to a parser or to the aggregator were empty
    #[error("contents must not be empty")]
    EmptyContents,

    /// The file name carries no usable extension and no default parser applies
    #[error("no extension found for '{file}' and no default parser is available")]
    NoExtension { file: String },

    /// No registered parser claims the extension and no default parser applies
    #[error("no parser registered for extension '{extension}' (file '{file}')")]
    NoParserForExtension { file: String, extension: String },

    /// An alias side cleaned to an empty extension
    #[error("invalid extension alias '{from}' -> '{to}'")]
    InvalidAlias { from: String, to: String },

    /// Programmer or configuration error (unknown parser id, malformed flag)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TextlocError {
    /// Whether the error concerns a single file's data rather than the setup.
    ///
    /// The CLI uses this to decide whether a file can be skipped.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            TextlocError::EmptyContents
                | TextlocError::NoExtension { .. }
                | TextlocError::NoParserForExtension { .. }
                | TextlocError::FileRead { .. }
        )
    }
}
