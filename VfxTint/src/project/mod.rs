//! Project files (`*.rvfxp`)
//!
//! A project file records the colors of a set of parameters independently of
//! the asset files they came from: a JSON array of
//! `{ "relativePath", "paramName", "rgba": { "R", "G", "B", "A" } }` records,
//! where `relativePath` has its `.json` extension removed. Importing one is an
//! authoritative overwrite that ignores the grayscale and intensity options.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::color::LinearColor;
use crate::error::{Error, Result};
use crate::formats::{ColorParameter, strip_json_extension};
use crate::session::{SelectionSet, Snapshot};

/// Extension of project files, without the dot.
pub const PROJECT_FILE_EXTENSION: &str = "rvfxp";

/// Session name used until the user picks one.
pub const DEFAULT_SESSION_NAME: &str = "YourProjectName";

/// File stem used when the session name is blank.
const FALLBACK_FILE_STEM: &str = "project";

/// One record of a project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    /// Relative path of the asset, without `.json`.
    pub relative_path: String,
    pub param_name: String,
    pub rgba: LinearColor,
}

impl SessionEntry {
    /// Record for `param`, with the `.json` extension stripped.
    pub fn from_parameter(param: &ColorParameter) -> Self {
        Self {
            relative_path: param.relative_path_stem().to_string(),
            param_name: param.param_name.clone(),
            rgba: param.rgba,
        }
    }

    fn key(&self) -> (&str, &str) {
        (strip_json_extension(&self.relative_path), &self.param_name)
    }
}

/// File name for a project export: the trimmed session name (or `project`)
/// with `.rvfxp` appended unless it already ends with it.
///
/// ```
/// use vfxtint::project::project_file_name;
///
/// assert_eq!(project_file_name("  Fire  "), "Fire.rvfxp");
/// assert_eq!(project_file_name(""), "project.rvfxp");
/// assert_eq!(project_file_name("ice.rvfxp"), "ice.rvfxp");
/// ```
pub fn project_file_name(session_name: &str) -> String {
    let stem = match session_name.trim() {
        "" => FALLBACK_FILE_STEM,
        trimmed => trimmed,
    };
    let suffix = format!(".{PROJECT_FILE_EXTENSION}");
    if stem.ends_with(&suffix) {
        stem.to_string()
    } else {
        format!("{stem}{suffix}")
    }
}

/// Records for every selected parameter, in snapshot order.
pub fn export_entries(
    params: &[Arc<ColorParameter>],
    selection: &SelectionSet,
) -> Result<Vec<SessionEntry>> {
    if selection.is_empty() {
        return Err(Error::EmptySelection { operation: "export" });
    }
    Ok(params
        .iter()
        .filter(|p| selection.contains(&p.id))
        .map(|p| SessionEntry::from_parameter(p))
        .collect())
}

/// Project file body: the records as 2-space indented JSON.
pub fn to_project_text(entries: &[SessionEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Parse the text of a project file.
///
/// Anything but a JSON array is rejected. Array elements that are not
/// records are skipped.
pub fn parse_project(text: &str) -> Result<Vec<SessionEntry>> {
    let value: Value = serde_json::from_str(text).map_err(|e| Error::InvalidSessionFile {
        message: e.to_string(),
    })?;
    entries_from_value(&value)
}

/// Records of an already parsed project document.
pub fn entries_from_value(value: &Value) -> Result<Vec<SessionEntry>> {
    let Some(items) = value.as_array() else {
        return Err(Error::InvalidSessionFile {
            message: "expected a JSON array of parameter records".to_string(),
        });
    };

    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match SessionEntry::deserialize(item) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("Skipping project record {index}: {e}"),
        }
    }
    Ok(entries)
}

/// Overwrite the color of every parameter that has a matching record.
///
/// Records match on relative path (extension ignored) plus parameter name;
/// a later record wins over an earlier one with the same key. Returns the
/// new snapshot and the number of parameters that matched.
pub fn apply_entries(params: &[Arc<ColorParameter>], entries: &[SessionEntry]) -> (Snapshot, usize) {
    let lookup: HashMap<(&str, &str), LinearColor> =
        entries.iter().map(|entry| (entry.key(), entry.rgba)).collect();

    let mut updated = 0;
    let snapshot = params
        .iter()
        .map(|param| {
            let key = (param.relative_path_stem(), param.param_name.as_str());
            match lookup.get(&key) {
                Some(&rgba) => {
                    updated += 1;
                    Arc::new(param.with_rgba(rgba.sanitized()))
                }
                None => Arc::clone(param),
            }
        })
        .collect();

    debug!("Project records matched {updated} of {} parameters", params.len());
    (snapshot, updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::ParamPath;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn param(relative_path: &str, param_name: &str, rgba: LinearColor) -> Arc<ColorParameter> {
        Arc::new(ColorParameter {
            id: format!("{relative_path}-{param_name}"),
            file_name: relative_path.rsplit('/').next().unwrap_or_default().to_string(),
            relative_path: relative_path.to_string(),
            param_name: param_name.to_string(),
            path: ParamPath::new(),
            rgba,
        })
    }

    #[test]
    fn test_import_matches_without_extension() {
        let params = vec![
            param("foo/bar.json", "X - ColorAndOpacity", LinearColor::new(0.2, 0.2, 0.9, 1.0)),
            param("foo/bar.json", "Y - BaseColor", LinearColor::new(0.1, 0.3, 0.5, 1.0)),
        ];
        let document = json!([
            {"relativePath": "foo/bar", "paramName": "X - ColorAndOpacity", "rgba": {"R": 1, "G": 0, "B": 0, "A": 1}},
            {"relativePath": "elsewhere", "paramName": "Z", "rgba": {"R": 0, "G": 1, "B": 0, "A": 1}}
        ]);

        let entries = entries_from_value(&document).unwrap();
        let (snapshot, updated) = apply_entries(&params, &entries);

        assert_eq!(updated, 1);
        assert_eq!(snapshot[0].rgba, LinearColor::new(1.0, 0.0, 0.0, 1.0));
        assert!(Arc::ptr_eq(&snapshot[1], &params[1]));
    }

    #[test]
    fn test_import_is_not_guarded() {
        let params = vec![param("a.json", "Gray", LinearColor::new(0.5, 0.5, 0.5, 1.0))];
        let entries = vec![SessionEntry {
            relative_path: "a".to_string(),
            param_name: "Gray".to_string(),
            rgba: LinearColor::new(3.0, 0.0, 0.0, 0.25),
        }];
        let (snapshot, _) = apply_entries(&params, &entries);
        assert_eq!(snapshot[0].rgba, LinearColor::new(3.0, 0.0, 0.0, 0.25));
    }

    #[test]
    fn test_rejects_non_array() {
        let err = parse_project(r#"{"relativePath": "a"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidSessionFile { .. }));
        let err = parse_project("not json").unwrap_err();
        assert!(matches!(err, Error::InvalidSessionFile { .. }));
    }

    #[test]
    fn test_export_selected_only() {
        let params = vec![
            param("fx/a.JSON", "One", LinearColor::new(1.0, 0.5, 0.0, 1.0)),
            param("fx/b.json", "Two", LinearColor::new(0.0, 0.5, 1.0, 1.0)),
        ];
        let mut selection = SelectionSet::new();
        selection.insert(params[0].id.clone());

        let entries = export_entries(&params, &selection).unwrap();
        assert_eq!(
            entries,
            vec![SessionEntry {
                relative_path: "fx/a".to_string(),
                param_name: "One".to_string(),
                rgba: LinearColor::new(1.0, 0.5, 0.0, 1.0),
            }]
        );

        let text = to_project_text(&entries).unwrap();
        assert!(text.contains("\n  {\n    \"relativePath\": \"fx/a\""));
        assert_eq!(parse_project(&text).unwrap(), entries);

        let err = export_entries(&params, &SelectionSet::new()).unwrap_err();
        assert!(matches!(err, Error::EmptySelection { operation: "export" }));
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let document = json!([
            42,
            {"relativePath": "a", "paramName": "P", "rgba": {"R": "0.5", "G": null, "B": 1}}
        ]);
        let entries = entries_from_value(&document).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].rgba, LinearColor::new(0.5, 0.0, 1.0, 0.0));
    }
}
