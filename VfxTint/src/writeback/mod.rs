//! Write-back of edited colors into the original documents
//!
//! The originals are never modified: every call works on a deep copy, writes
//! each parameter's RGBA at its recorded [`ParamPath`], and renders every
//! original file (changed or not) as 2-space indented JSON.
//!
//! [`ParamPath`]: crate::formats::ParamPath

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::color::LinearColor;
use crate::error::{Error, Result};
use crate::formats::ColorParameter;

/// One file to be written, relative to an output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilePayload {
    pub relative_path: String,
    pub contents: String,
}

impl FilePayload {
    pub fn new(relative_path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            contents: contents.into(),
        }
    }
}

/// Serialized files plus the parameters that could not be written.
#[derive(Debug, Default)]
pub struct WriteBack {
    /// One payload per original file, in load order.
    pub files: Vec<FilePayload>,
    /// Parameters skipped because their file or path was missing.
    pub skipped: Vec<Error>,
}

/// Apply `params` to a copy of `original_files` and serialize every file.
///
/// A parameter whose file is not loaded, or whose path no longer resolves,
/// is skipped and reported; the rest of the batch is still written.
pub fn serialize_files(
    original_files: &IndexMap<String, Value>,
    params: &[Arc<ColorParameter>],
) -> Result<WriteBack> {
    let mut documents = original_files.clone();
    let mut skipped = Vec::new();

    for param in params {
        let Some(document) = documents.get_mut(&param.relative_path) else {
            warn!(
                "Original file not found for parameter {} ({})",
                param.param_name, param.relative_path
            );
            skipped.push(Error::MissingOriginalFile {
                relative_path: param.relative_path.clone(),
            });
            continue;
        };

        match param.path.resolve_mut(document) {
            Some(target) => write_color(target, param.rgba),
            None => {
                warn!(
                    "Path {} no longer resolves in {}",
                    param.path, param.relative_path
                );
                skipped.push(Error::InvalidPath(format!(
                    "{}: {}",
                    param.relative_path, param.path
                )));
            }
        }
    }

    let files = documents
        .iter()
        .map(|(relative_path, document)| {
            Ok(FilePayload::new(
                relative_path.clone(),
                serde_json::to_string_pretty(document)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Serialized {} files ({} parameters skipped)",
        files.len(),
        skipped.len()
    );
    Ok(WriteBack { files, skipped })
}

/// Overwrite the R, G, B and A members of `target`, leaving any other
/// members (such as `$type`) and their order intact.
fn write_color(target: &mut Value, rgba: LinearColor) {
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(object) = target {
        object.insert("R".to_string(), json!(rgba.r));
        object.insert("G".to_string(), json!(rgba.g));
        object.insert("B".to_string(), json!(rgba.b));
        object.insert("A".to_string(), json!(rgba.a));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::extract;
    use pretty_assertions::assert_eq;

    fn material() -> Value {
        json!({
            "Exports": [{
                "Data": [{
                    "Name": "VectorParameterValues",
                    "Value": [{
                        "Value": [
                            {"Name": "ParameterInfo", "Value": [{"Name": "Name", "Value": "Glow_Color"}]},
                            {"Name": "ParameterValue", "Value": [{
                                "Name": "ParameterValue",
                                "Value": {"$type": "UAssetAPI.UnrealTypes.FLinearColor, UAssetAPI", "R": 1.0, "G": 0.5, "B": 0.25, "A": 1.0}
                            }]}
                        ]
                    }]
                }]
            }]
        })
    }

    fn loaded(relative_path: &str, document: Value) -> IndexMap<String, Value> {
        let mut files = IndexMap::new();
        files.insert(relative_path.to_string(), document);
        files
    }

    #[test]
    fn test_writes_color_in_place() {
        let dictionary = crate::dictionary::KeywordDictionary::bundled().unwrap();
        let files = loaded("fx/glow.json", material());
        let params: Vec<_> = extract(&files["fx/glow.json"], "glow.json", "fx/glow.json", Some(&dictionary))
            .into_iter()
            .map(|p| Arc::new(p.with_rgba(LinearColor::new(0.0, 0.0, 1.0, 0.5))))
            .collect();
        assert_eq!(params.len(), 1);

        let out = serialize_files(&files, &params).unwrap();
        assert!(out.skipped.is_empty());
        assert_eq!(out.files.len(), 1);

        let written: Value = serde_json::from_str(&out.files[0].contents).unwrap();
        let color = params[0].path.resolve(&written).unwrap();
        assert_eq!(
            color,
            &json!({"$type": "UAssetAPI.UnrealTypes.FLinearColor, UAssetAPI", "R": 0.0, "G": 0.0, "B": 1.0, "A": 0.5})
        );
        let keys: Vec<_> = color.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["$type", "R", "G", "B", "A"]);

        // originals untouched
        assert_eq!(files["fx/glow.json"], material());
    }

    #[test]
    fn test_unchanged_files_are_still_written() {
        let mut files = loaded("a.json", json!({"Exports": []}));
        files.insert("b.json".to_string(), json!({"Name": "nothing here"}));

        let out = serialize_files(&files, &[]).unwrap();
        let paths: Vec<_> = out.files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["a.json", "b.json"]);
        assert_eq!(out.files[1].contents, "{\n  \"Name\": \"nothing here\"\n}");
    }

    #[test]
    fn test_missing_original_is_skipped() {
        let dictionary = crate::dictionary::KeywordDictionary::bundled().unwrap();
        let document = material();
        let mut params: Vec<_> = extract(&document, "glow.json", "glow.json", Some(&dictionary))
            .into_iter()
            .map(Arc::new)
            .collect();
        let mut orphan = (*params[0]).clone();
        orphan.relative_path = "gone.json".to_string();
        params.push(Arc::new(orphan));

        let out = serialize_files(&loaded("glow.json", document), &params).unwrap();
        assert_eq!(out.files.len(), 1);
        assert_eq!(out.skipped.len(), 1);
        assert!(matches!(
            &out.skipped[0],
            Error::MissingOriginalFile { relative_path } if relative_path == "gone.json"
        ));
    }
}
