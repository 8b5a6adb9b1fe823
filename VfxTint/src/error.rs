//! Error types for `VfxTint`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `VfxTint` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== Load Errors ====================
    /// An asset file is not valid JSON. Only that file is skipped.
    #[error("failed to parse {relative_path}: {source}")]
    Parse {
        /// Path of the file relative to the import root.
        relative_path: String,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Reading one file of a batch failed, so the whole batch was dropped.
    #[error("failed to read {path}: {source}")]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Two files of one load share a relative path. The later one is skipped.
    #[error("duplicate file in load: {relative_path}")]
    DuplicateFile {
        /// The relative path that was already taken.
        relative_path: String,
    },

    /// The keyword dictionary could not be loaded.
    #[error("keyword dictionary unavailable: {message}")]
    DictionaryUnavailable {
        /// Why the dictionary could not be loaded.
        message: String,
    },

    // ==================== Transform Errors ====================
    /// A bulk transform was invoked with nothing selected.
    #[error("no parameters selected; select at least one parameter before applying the {operation}")]
    EmptySelection {
        /// The transform that was rejected.
        operation: &'static str,
    },

    /// Shuffle was invoked with no palette colors.
    #[error("shuffle palette is empty")]
    EmptyPalette,

    /// A hex color string could not be parsed.
    #[error("invalid hex color: {0:?} (expected #rgb or #rrggbb)")]
    InvalidHex(String),

    // ==================== Save / Export Errors ====================
    /// There is nothing loaded to save.
    #[error("no parameters to save")]
    NothingToSave,

    /// A parameter points at a file that is not part of the loaded set.
    #[error("original file not loaded: {relative_path}")]
    MissingOriginalFile {
        /// The relative path that has no original document.
        relative_path: String,
    },

    /// Writing one file of a batch failed; files already replaced were restored.
    #[error("failed to write {path}: {source}")]
    Write {
        /// The target file.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// A payload path escapes the output directory.
    #[error("invalid output path: {0}")]
    InvalidPath(String),

    // ==================== Session File Errors ====================
    /// A session file is not a JSON array of parameter records.
    #[error("invalid project file format: {message}")]
    InvalidSessionFile {
        /// Description of what is invalid.
        message: String,
    },

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `VfxTint` operations.
pub type Result<T> = std::result::Result<T, Error>;
