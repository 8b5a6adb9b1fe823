//! Writing a batch of files under a base directory
//!
//! Every payload is first staged as a temporary file next to its target.
//! Targets are only replaced once the whole batch has been staged, so a
//! failure while staging leaves the output directory untouched. Targets are
//! then replaced one by one; if a replacement fails, the targets already
//! replaced get their previous contents back (or are removed if they did not
//! exist). Directories created for the batch are left in place.

use std::collections::BTreeSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::writeback::FilePayload;

/// Write `files` under `base_dir`, creating directories as needed.
///
/// Returns the written paths in payload order.
pub fn write_files<P: AsRef<Path>>(base_dir: P, files: &[FilePayload]) -> Result<Vec<PathBuf>> {
    let base_dir = base_dir.as_ref();
    let targets = files
        .iter()
        .map(|file| target_path(base_dir, &file.relative_path))
        .collect::<Result<Vec<_>>>()?;

    let parents: BTreeSet<&Path> = targets.iter().filter_map(|t| t.parent()).collect();
    for parent in parents {
        fs::create_dir_all(parent).map_err(|source| Error::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let staged = files
        .par_iter()
        .zip(targets.par_iter())
        .map(|(file, target)| stage(target, &file.contents))
        .collect::<Result<Vec<_>>>()?;
    debug!("Staged {} files under {}", staged.len(), base_dir.display());

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    let mut previous: Vec<Option<Vec<u8>>> = Vec::with_capacity(staged.len());
    for (temp, target) in staged.into_iter().zip(targets) {
        let replaced = previous_contents(&target).and_then(|contents| {
            temp.persist(&target).map_err(|e| Error::Write {
                path: target.clone(),
                source: e.error,
            })?;
            Ok(contents)
        });
        match replaced {
            Ok(contents) => {
                previous.push(contents);
                written.push(target);
            }
            Err(err) => {
                roll_back(&written, previous);
                return Err(err);
            }
        }
    }

    info!("Wrote {} files to {}", written.len(), base_dir.display());
    Ok(written)
}

fn stage(target: &Path, contents: &str) -> Result<NamedTempFile> {
    let write_error = |source| Error::Write {
        path: target.to_path_buf(),
        source,
    };
    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(parent).map_err(write_error)?;
    temp.write_all(contents.as_bytes()).map_err(write_error)?;
    temp.flush().map_err(write_error)?;
    Ok(temp)
}

/// Current contents of `target`, or `None` if it does not exist yet.
fn previous_contents(target: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(target) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Write {
            path: target.to_path_buf(),
            source,
        }),
    }
}

/// Undo the replacements made so far, newest first.
fn roll_back(written: &[PathBuf], previous: Vec<Option<Vec<u8>>>) {
    for (target, contents) in written.iter().zip(previous).rev() {
        let restored = match contents {
            Some(contents) => fs::write(target, contents),
            None => fs::remove_file(target),
        };
        if let Err(e) = restored {
            warn!("Failed to restore {}: {e}", target.display());
        }
    }
}

/// `base_dir` joined with a `/`-separated relative path that must stay inside it.
fn target_path(base_dir: &Path, relative_path: &str) -> Result<PathBuf> {
    let relative = Path::new(relative_path);
    let mut target = base_dir.to_path_buf();
    let mut has_file = false;

    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                target.push(part);
                has_file = true;
            }
            Component::CurDir => {}
            _ => return Err(Error::InvalidPath(relative_path.to_string())),
        }
    }

    if has_file {
        Ok(target)
    } else {
        Err(Error::InvalidPath(relative_path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writes_nested_files() {
        let dir = tempdir().unwrap();
        let files = vec![
            FilePayload::new("a.json", "{}"),
            FilePayload::new("fx/deep/b.json", "[]"),
        ];

        let written = write_files(dir.path(), &files).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(fs::read_to_string(dir.path().join("a.json")).unwrap(), "{}");
        assert_eq!(fs::read_to_string(dir.path().join("fx/deep/b.json")).unwrap(), "[]");
    }

    #[test]
    fn test_escaping_path_writes_nothing() {
        let dir = tempdir().unwrap();
        let files = vec![
            FilePayload::new("ok.json", "{}"),
            FilePayload::new("../escape.json", "{}"),
        ];

        let err = write_files(dir.path(), &files).unwrap_err();
        assert!(matches!(err, Error::InvalidPath(_)));
        assert!(!dir.path().join("ok.json").exists());
    }

    #[test]
    fn test_failed_replace_restores_earlier_targets() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "old").unwrap();
        // A directory where c.json should go
        fs::create_dir(dir.path().join("c.json")).unwrap();
        let files = vec![
            FilePayload::new("a.json", "new"),
            FilePayload::new("b.json", "created"),
            FilePayload::new("c.json", "blocked"),
        ];

        let err = write_files(dir.path(), &files).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert_eq!(fs::read_to_string(dir.path().join("a.json")).unwrap(), "old");
        assert!(!dir.path().join("b.json").exists());
        assert!(dir.path().join("c.json").is_dir());
    }

    #[test]
    fn test_overwrites_existing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), "old").unwrap();
        write_files(dir.path(), &[FilePayload::new("a.json", "new")]).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a.json")).unwrap(), "new");
    }
}
