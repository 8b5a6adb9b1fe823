//! Collecting exported JSON files from disk

use std::fs;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A file handed to the engine: display name, `/`-separated path relative to
/// the import root, and raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub name: String,
    pub relative_path: String,
    pub content: String,
}

impl SourceFile {
    pub fn new(
        name: impl Into<String>,
        relative_path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// True for paths ending in `.json`, ignoring case.
pub fn is_json_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Find all .json files under `root`, sorted.
///
/// Any traversal error aborts the search.
pub fn find_json_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root.as_ref()).follow_links(true) {
        let entry = entry?;
        if entry.file_type().is_file() && is_json_file(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Read every .json file under `root` in parallel.
///
/// Relative paths are taken from `root`. A single failed read fails the whole
/// batch so a load never sees a partial directory.
pub fn collect_json_files<P: AsRef<Path>>(root: P) -> Result<Vec<SourceFile>> {
    let root = root.as_ref();
    let paths = find_json_files(root)?;
    debug!("Found {} JSON files under {}", paths.len(), root.display());
    read_files(root, &paths)
}

/// Read `paths` in parallel, naming each relative to `base`.
///
/// Paths outside `base` fall back to their file name.
pub fn read_files(base: &Path, paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut files = paths
        .par_iter()
        .map(|path| read_source(base, path))
        .collect::<Result<Vec<_>>>()?;
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    info!("Read {} files from {}", files.len(), base.display());
    Ok(files)
}

/// Gather sources from a mix of directories and single files.
///
/// Files found by walking a directory keep that directory's name as their
/// first path segment, so `a/x.json` and `b/x.json` stay distinct. A single
/// file is named by its file name alone.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let prefix = directory_name(input);
            files.extend(collect_json_files(input)?.into_iter().map(|mut file| {
                if let Some(prefix) = &prefix {
                    file.relative_path = format!("{prefix}/{}", file.relative_path);
                }
                file
            }));
        } else {
            let base = input.parent().unwrap_or_else(|| Path::new(""));
            files.push(read_source(base, input)?);
        }
    }
    Ok(files)
}

fn read_source(base: &Path, path: &Path) -> Result<SourceFile> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    // Invalid UTF-8 is left for the JSON parser to reject per file
    let content = String::from_utf8_lossy(&bytes).into_owned();

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let relative_path = path
        .strip_prefix(base)
        .ok()
        .map(to_slash_path)
        .filter(|relative| !relative.is_empty())
        .unwrap_or_else(|| name.clone());

    Ok(SourceFile {
        name,
        relative_path,
        content,
    })
}

/// Last component of `dir`, resolving `.` and similar through the filesystem.
fn directory_name(dir: &Path) -> Option<String> {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            let resolved = fs::canonicalize(dir).ok()?;
            resolved.file_name().map(|name| name.to_string_lossy().into_owned())
        })
}

/// Join the normal components of `path` with `/`.
fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_collect_walks_and_filters() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("fx/sub")).unwrap();
        fs::write(dir.path().join("root.json"), "{}").unwrap();
        fs::write(dir.path().join("fx/sub/deep.JSON"), "[]").unwrap();
        fs::write(dir.path().join("fx/readme.txt"), "ignored").unwrap();

        let files = collect_json_files(dir.path()).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["fx/sub/deep.JSON", "root.json"]);
        assert_eq!(files[0].name, "deep.JSON");
        assert_eq!(files[0].content, "[]");
    }

    #[test]
    fn test_single_file_uses_file_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("single.json");
        fs::write(&path, "{}").unwrap();

        let files = collect_inputs(&[path]).unwrap();
        assert_eq!(files, vec![SourceFile::new("single.json", "single.json", "{}")]);
    }

    #[test]
    fn test_directories_keep_their_name() {
        let dir = tempdir().unwrap();
        for name in ["first", "second"] {
            fs::create_dir_all(dir.path().join(name).join("fx")).unwrap();
            fs::write(dir.path().join(name).join("fx/x.json"), "{}").unwrap();
        }

        let files =
            collect_inputs(&[dir.path().join("first"), dir.path().join("second/")]).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["first/fx/x.json", "second/fx/x.json"]);
        assert_eq!(files[1].name, "x.json");
    }

    #[test]
    fn test_missing_file_fails_batch() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.json");
        fs::write(&good, "{}").unwrap();
        let missing = dir.path().join("missing.json");

        let err = read_files(dir.path(), &[good, missing]).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
