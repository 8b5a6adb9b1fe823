//! Material instance exports (`VectorParameterValues`)

use serde_json::Value;
use tracing::{debug, warn};

use super::collector::Collector;
use super::detect::{find_named, vector_parameter_entries};
use super::types::ParamPath;
use crate::color::LinearColor;
use crate::dictionary::KeywordDictionary;

/// Collect every vector parameter the dictionary classifies as a color.
///
/// Without a dictionary nothing can be classified, so the material yields no
/// parameters.
pub(crate) fn extract_vector_parameters(
    document: &Value,
    dictionary: Option<&KeywordDictionary>,
    collector: &mut Collector<'_>,
) {
    let Some((property_index, entries)) = vector_parameter_entries(document) else {
        return;
    };
    let Some(dictionary) = dictionary else {
        warn!("Keyword dictionary not loaded; skipping material vector parameters");
        return;
    };

    let base = ParamPath::new()
        .child("Exports")
        .child(0usize)
        .child("Data")
        .child(property_index)
        .child("Value");

    for (param_index, entry) in entries.iter().enumerate() {
        let Some(fields) = entry.get("Value").and_then(Value::as_array) else {
            continue;
        };
        let Some(name) = parameter_name(fields) else {
            continue;
        };
        if !dictionary.classify(name) {
            debug!("Skipping non-color vector parameter {name}");
            continue;
        }
        let Some((value_index, inner_index, color)) = parameter_color(fields) else {
            continue;
        };

        let path = base
            .child(param_index)
            .child("Value")
            .child(value_index)
            .child("Value")
            .child(inner_index)
            .child("Value");
        collector.push_vector_parameter(name, param_index, path, LinearColor::from_json(color));
    }
}

/// `ParameterInfo.Name` of one vector parameter entry.
fn parameter_name(fields: &[Value]) -> Option<&str> {
    let (_, info) = find_named(fields, "ParameterInfo")?;
    let info_fields = info.get("Value")?.as_array()?;
    let (_, name) = find_named(info_fields, "Name")?;
    name.get("Value")?.as_str().filter(|name| !name.is_empty())
}

/// `ParameterValue.ParameterValue` struct, with the indices used to reach it.
fn parameter_color(fields: &[Value]) -> Option<(usize, usize, &Value)> {
    let (value_index, value) = find_named(fields, "ParameterValue")?;
    let inner = value.get("Value")?.as_array()?;
    let (inner_index, linear) = find_named(inner, "ParameterValue")?;
    let color = linear.get("Value").filter(|color| color.is_object())?;
    Some((value_index, inner_index, color))
}
