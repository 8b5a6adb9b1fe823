//! Recursive color-field scan shared by data table and generic exports

use serde_json::{Map, Value};

use super::collector::Collector;
use super::types::ParamPath;
use crate::color::LinearColor;

/// Property names that hold a color when typed as `LinearColor`.
pub const COLOR_FIELD_NAMES: [&str; 6] = [
    "ColorAndOpacity",
    "SpecifiedColor",
    "BaseColor",
    "HighlightColor",
    "FontTopColor",
    "FontButtomColor",
];

const LINEAR_COLOR_STRUCT: &str = "LinearColor";

/// Depth-first walk of `node`, collecting every color leaf under `parent`.
///
/// A matched leaf stops recursion on its branch.
pub(crate) fn scan_color_fields(
    node: &Value,
    path: &ParamPath,
    parent: &str,
    collector: &mut Collector<'_>,
) {
    match node {
        Value::Object(map) => {
            if let Some((field, color)) = color_leaf(map) {
                let leaf_path = path.child("Value").child(0usize).child("Value");
                collector.push_field(parent, field, leaf_path, LinearColor::from_json(color));
                return;
            }
            for (key, child) in map {
                scan_color_fields(child, &path.child(key.as_str()), parent, collector);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                scan_color_fields(item, &path.child(index), parent, collector);
            }
        }
        _ => {}
    }
}

/// `(field name, RGBA object)` if `map` is a recognized color property.
fn color_leaf(map: &Map<String, Value>) -> Option<(&str, &Value)> {
    let name = map.get("Name")?.as_str()?;
    if !COLOR_FIELD_NAMES.contains(&name) {
        return None;
    }
    if map.get("StructType").and_then(Value::as_str) != Some(LINEAR_COLOR_STRUCT) {
        return None;
    }
    let color = map.get("Value")?.get(0)?.get("Value")?;
    if color.as_object()?.contains_key("R") {
        Some((name, color))
    } else {
        None
    }
}
