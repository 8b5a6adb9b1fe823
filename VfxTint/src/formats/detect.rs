//! Export shape detection
//!
//! Documents are checked against the known shapes in priority order; the
//! first whose marker fields are present claims the document.

use serde_json::Value;

use super::types::AssetFormat;

/// Name of the material property holding vector parameters.
pub const VECTOR_PARAMETER_VALUES: &str = "VectorParameterValues";

/// `$type` of a data table export.
pub const DATA_TABLE_EXPORT_TYPE: &str = "UAssetAPI.ExportTypes.DataTableExport, UAssetAPI";

/// Row struct type scanned in data tables.
pub const RICH_TEXT_STYLE_ROW: &str = "RichTextStyleRow";

/// Determine which export shape `document` matches.
pub fn detect_format(document: &Value) -> AssetFormat {
    if vector_parameter_entries(document).is_some() {
        AssetFormat::VectorParameterMaterial
    } else if data_table_rows(document).is_some() {
        AssetFormat::DataTable
    } else if document.get("Exports").is_some_and(Value::is_array) {
        AssetFormat::GenericExports
    } else {
        AssetFormat::Unrecognized
    }
}

/// Find the first element of `items` whose `Name` equals `name`.
pub(crate) fn find_named<'a>(items: &'a [Value], name: &str) -> Option<(usize, &'a Value)> {
    items
        .iter()
        .enumerate()
        .find(|(_, item)| item.get("Name").and_then(Value::as_str) == Some(name))
}

/// `Exports[0].Data[i]` where `Name == "VectorParameterValues"`, with its
/// index and `Value` array.
pub(crate) fn vector_parameter_entries(document: &Value) -> Option<(usize, &Vec<Value>)> {
    let data = document.pointer("/Exports/0/Data")?.as_array()?;
    let (index, property) = find_named(data, VECTOR_PARAMETER_VALUES)?;
    let entries = property.get("Value")?.as_array()?;
    Some((index, entries))
}

/// `Exports[0].Table.Data` of a data table export.
pub(crate) fn data_table_rows(document: &Value) -> Option<&Vec<Value>> {
    let export = document.pointer("/Exports/0")?;
    if export.get("$type").and_then(Value::as_str) != Some(DATA_TABLE_EXPORT_TYPE) {
        return None;
    }
    export.pointer("/Table/Data")?.as_array()
}
