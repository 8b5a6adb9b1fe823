//! Type definitions for extracted color parameters

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::LinearColor;

/// One step into a JSON document: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location of a value inside a parsed document, recorded at extraction time.
///
/// This is the only link between a [`ColorParameter`] and the document it
/// came from; write-back never re-derives it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamPath(Vec<PathSegment>);

impl ParamPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Follow the path through `root`.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(root, |node, segment| match segment {
            PathSegment::Key(key) => node.get(key.as_str()),
            PathSegment::Index(index) => node.get(*index),
        })
    }

    /// Follow the path through `root`, mutably.
    pub fn resolve_mut<'a>(&self, root: &'a mut Value) -> Option<&'a mut Value> {
        self.0.iter().try_fold(root, |node, segment| match segment {
            PathSegment::Key(key) => node.get_mut(key.as_str()),
            PathSegment::Index(index) => node.get_mut(*index),
        })
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for ParamPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
            }
        }
        Ok(())
    }
}

/// A color field extracted from an asset export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorParameter {
    /// Unique within a load; stable across re-extraction of the same files.
    pub id: String,
    /// Display name of the source file.
    pub file_name: String,
    /// Path relative to the import root; key into the original files.
    pub relative_path: String,
    /// Human label: `"<parent> - <field>"` or the raw material parameter name.
    pub param_name: String,
    /// Where the RGBA object lives inside the original document.
    pub path: ParamPath,
    pub rgba: LinearColor,
}

impl ColorParameter {
    /// Same parameter with a new color.
    #[must_use]
    pub fn with_rgba(&self, rgba: LinearColor) -> Self {
        Self {
            rgba,
            ..self.clone()
        }
    }

    /// The folder this parameter's file lives in, `/` for the import root.
    pub fn folder(&self) -> &str {
        folder_of(&self.relative_path)
    }

    /// Relative path with a trailing `.json` removed (case-insensitive).
    pub fn relative_path_stem(&self) -> &str {
        strip_json_extension(&self.relative_path)
    }
}

/// Root folder sentinel for files at the top of the import.
pub const ROOT_FOLDER: &str = "/";

/// Folder part of a `/`-separated relative path.
pub fn folder_of(relative_path: &str) -> &str {
    match relative_path.rfind('/') {
        Some(index) if index > 0 => &relative_path[..index],
        _ => ROOT_FOLDER,
    }
}

/// Remove a trailing `.json`, ignoring case.
pub fn strip_json_extension(path: &str) -> &str {
    let split = path.len().saturating_sub(5);
    match (path.get(..split), path.get(split..)) {
        (Some(stem), Some(ext)) if ext.eq_ignore_ascii_case(".json") => stem,
        _ => path,
    }
}

/// Which of the known export shapes a document matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetFormat {
    /// Material instance with a `VectorParameterValues` array.
    VectorParameterMaterial,
    /// Data table export with `RichTextStyleRow` rows.
    DataTable,
    /// Any document with an `Exports` array.
    GenericExports,
    /// None of the above; yields no parameters.
    Unrecognized,
}

impl fmt::Display for AssetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetFormat::VectorParameterMaterial => "material",
            AssetFormat::DataTable => "data table",
            AssetFormat::GenericExports => "generic export",
            AssetFormat::Unrecognized => "unrecognized",
        };
        f.write_str(name)
    }
}
