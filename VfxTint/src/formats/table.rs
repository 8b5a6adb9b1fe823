//! Data table and generic export walkers

use serde_json::Value;

use super::collector::Collector;
use super::detect::{RICH_TEXT_STYLE_ROW, data_table_rows};
use super::scan::scan_color_fields;
use super::types::ParamPath;

/// Scan every `RichTextStyleRow` of a data table, labelled by row name.
pub(crate) fn extract_table_rows(document: &Value, collector: &mut Collector<'_>) {
    let Some(rows) = data_table_rows(document) else {
        return;
    };
    let table_path = ParamPath::new()
        .child("Exports")
        .child(0usize)
        .child("Table")
        .child("Data");

    for (row_index, row) in rows.iter().enumerate() {
        if row.get("StructType").and_then(Value::as_str) != Some(RICH_TEXT_STYLE_ROW) {
            continue;
        }
        let Some(value) = row.get("Value") else {
            continue;
        };
        let style_name = row
            .get("Name")
            .and_then(Value::as_str)
            .map_or_else(|| format!("Row_{row_index}"), str::to_string);
        let row_path = table_path.child(row_index).child("Value");
        scan_color_fields(value, &row_path, &style_name, collector);
    }
}

/// Scan the `Data` array of every export, labelled by `ObjectName`.
pub(crate) fn extract_exports(document: &Value, collector: &mut Collector<'_>) {
    let Some(exports) = document.get("Exports").and_then(Value::as_array) else {
        return;
    };

    for (export_index, export) in exports.iter().enumerate() {
        let Some(data) = export.get("Data").filter(|data| data.is_array()) else {
            continue;
        };
        let parent = export
            .get("ObjectName")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map_or_else(|| format!("Export_{export_index}"), str::to_string);
        let base = ParamPath::new()
            .child("Exports")
            .child(export_index)
            .child("Data");
        scan_color_fields(data, &base, &parent, collector);
    }
}
