//! Export format detection and color extraction
//!
//! Three shapes of exported asset JSON are understood, checked in priority
//! order:
//!
//! 1. **Material** - `Exports[0].Data` holds a `VectorParameterValues`
//!    property; entries are classified by the [`KeywordDictionary`].
//! 2. **Data table** - a `DataTableExport` whose `RichTextStyleRow` rows are
//!    scanned for color fields.
//! 3. **Generic** - any `Exports` array; every export's `Data` is scanned.
//!
//! Every extracted [`ColorParameter`] records the exact [`ParamPath`] of its
//! RGBA object so it can be written back later.

mod collector;
mod detect;
mod material;
mod scan;
mod table;
mod types;

use serde_json::Value;
use tracing::debug;

pub use detect::{DATA_TABLE_EXPORT_TYPE, RICH_TEXT_STYLE_ROW, VECTOR_PARAMETER_VALUES, detect_format};
pub use scan::COLOR_FIELD_NAMES;
pub use types::{
    AssetFormat, ColorParameter, ParamPath, PathSegment, ROOT_FOLDER, folder_of,
    strip_json_extension,
};

use crate::dictionary::KeywordDictionary;
use collector::Collector;

/// Parameters extracted from one document, with the shape that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub format: AssetFormat,
    pub parameters: Vec<ColorParameter>,
}

/// Extract every color parameter from `document`.
///
/// An unrecognized document is not an error; it simply yields nothing.
pub fn extract(
    document: &Value,
    file_name: &str,
    relative_path: &str,
    dictionary: Option<&KeywordDictionary>,
) -> Vec<ColorParameter> {
    extract_detailed(document, file_name, relative_path, dictionary).parameters
}

/// Like [`extract`], also reporting the detected [`AssetFormat`].
pub fn extract_detailed(
    document: &Value,
    file_name: &str,
    relative_path: &str,
    dictionary: Option<&KeywordDictionary>,
) -> Extraction {
    let format = detect_format(document);
    let mut collector = Collector::new(file_name, relative_path);

    match format {
        AssetFormat::VectorParameterMaterial => {
            material::extract_vector_parameters(document, dictionary, &mut collector);
        }
        AssetFormat::DataTable => table::extract_table_rows(document, &mut collector),
        AssetFormat::GenericExports => table::extract_exports(document, &mut collector),
        AssetFormat::Unrecognized => {}
    }

    let parameters = collector.finish();
    debug!(
        "Extracted {} color parameters from {relative_path} ({format})",
        parameters.len()
    );
    Extraction { format, parameters }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::LinearColor;
    use serde_json::json;

    fn dictionary() -> KeywordDictionary {
        KeywordDictionary {
            include_keywords: vec!["color".to_string()],
            exclude_exact: vec!["Excluded_Color".to_string()],
        }
    }

    fn vector_parameter(name: &str, r: f64, g: f64, b: f64, a: f64) -> Value {
        json!({
            "Value": [
                {"Name": "ParameterInfo", "Value": [
                    {"Name": "Association", "Value": "GlobalParameter"},
                    {"Name": "Name", "Value": name}
                ]},
                {"Name": "ParameterValue", "Value": [
                    {"Name": "ParameterValue", "Value": {"$type": "FLinearColor", "R": r, "G": g, "B": b, "A": a}}
                ]}
            ]
        })
    }

    fn material(params: Vec<Value>) -> Value {
        json!({
            "Exports": [{
                "Data": [
                    {"Name": "ScalarParameterValues", "Value": []},
                    {"Name": "VectorParameterValues", "Value": params}
                ]
            }]
        })
    }

    #[test]
    fn test_material_extraction() {
        let doc = material(vec![
            vector_parameter("Emissive_Color", 2.0, 0.5, 0.5, 1.0),
            vector_parameter("Excluded_Color", 1.0, 0.0, 0.0, 1.0),
            vector_parameter("Color_Offset", 1.0, 0.0, 0.0, 1.0),
            vector_parameter("Panner", 1.0, 0.0, 0.0, 1.0),
        ]);
        let extraction = extract_detailed(&doc, "M_Fire.json", "fx/M_Fire.json", Some(&dictionary()));

        assert_eq!(extraction.format, AssetFormat::VectorParameterMaterial);
        assert_eq!(extraction.parameters.len(), 1);
        let param = &extraction.parameters[0];
        assert_eq!(param.id, "fx/M_Fire.json-Emissive_Color-0");
        assert_eq!(param.param_name, "Emissive_Color");
        assert_eq!(param.file_name, "M_Fire.json");
        assert_eq!(param.rgba, LinearColor::new(2.0, 0.5, 0.5, 1.0));
        assert_eq!(
            param.path.to_string(),
            "Exports[0].Data[1].Value[0].Value[1].Value[0].Value"
        );
        assert_eq!(param.path.resolve(&doc).and_then(|v| v.get("R")), Some(&json!(2.0)));
    }

    #[test]
    fn test_material_without_dictionary_yields_nothing() {
        let doc = material(vec![vector_parameter("Emissive_Color", 1.0, 0.0, 0.0, 1.0)]);
        let extraction = extract_detailed(&doc, "m.json", "m.json", None);
        assert_eq!(extraction.format, AssetFormat::VectorParameterMaterial);
        assert!(extraction.parameters.is_empty());
    }

    #[test]
    fn test_data_table_extraction() {
        let color = |name: &str| {
            json!({
                "Name": name,
                "StructType": "LinearColor",
                "Value": [{"Name": name, "Value": {"R": "0.25", "G": null, "B": 1, "A": 1}}]
            })
        };
        let doc = json!({
            "Exports": [{
                "$type": DATA_TABLE_EXPORT_TYPE,
                "Table": {"Data": [
                    {"Name": "Default", "StructType": "RichTextStyleRow", "Value": [
                        {"Name": "TextStyle", "Value": [color("ColorAndOpacity"), color("ColorAndOpacity")]}
                    ]},
                    {"Name": "Ignored", "StructType": "OtherRow", "Value": [color("BaseColor")]}
                ]}
            }]
        });
        let params = extract(&doc, "DT.json", "ui/DT.json", None);

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].param_name, "Default - ColorAndOpacity");
        assert_eq!(params[0].id, "ui/DT.json-Default-ColorAndOpacity-0");
        assert_eq!(params[1].id, "ui/DT.json-Default-ColorAndOpacity-1");
        assert_eq!(params[0].rgba, LinearColor::new(0.25, 0.0, 1.0, 1.0));
        assert_eq!(
            params[1].path.to_string(),
            "Exports[0].Table.Data[0].Value[0].Value[1].Value[0].Value"
        );
    }

    #[test]
    fn test_generic_extraction() {
        let doc = json!({
            "Exports": [
                {"ObjectName": "WBP_Button", "Data": [
                    {"Name": "HighlightColor", "StructType": "LinearColor",
                     "Value": [{"Value": {"R": 1, "G": 1, "B": 0, "A": 1}}]}
                ]},
                {"Data": [
                    {"Name": "BaseColor", "StructType": "LinearColor",
                     "Value": [{"Value": {"R": 0, "G": 1, "B": 0, "A": 1}}]}
                ]},
                {"ObjectName": "NoData"}
            ]
        });
        let params = extract(&doc, "WBP.json", "WBP.json", None);

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].param_name, "WBP_Button - HighlightColor");
        assert_eq!(params[1].param_name, "Export_1 - BaseColor");
        assert_eq!(params[1].path.to_string(), "Exports[1].Data[0].Value[0].Value");
    }

    #[test]
    fn test_unrecognized_document() {
        let extraction = extract_detailed(&json!({"Name": "x"}), "x.json", "x.json", None);
        assert_eq!(extraction.format, AssetFormat::Unrecognized);
        assert!(extraction.parameters.is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let doc = material(vec![
            vector_parameter("A_Color", 1.0, 0.0, 0.0, 1.0),
            vector_parameter("B_Color", 0.0, 1.0, 0.0, 1.0),
        ]);
        let first = extract(&doc, "m.json", "m.json", Some(&dictionary()));
        let second = extract(&doc, "m.json", "m.json", Some(&dictionary()));
        assert_eq!(first, second);
    }
}
