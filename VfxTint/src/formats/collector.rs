//! Accumulates extracted parameters for one file and assigns their ids

use super::types::{ColorParameter, ParamPath};
use crate::color::LinearColor;

/// Per-file parameter sink.
///
/// Ids combine the relative path, a label and a per-file ordinal, so they are
/// unique within a load and identical when the same file is extracted again.
pub(crate) struct Collector<'a> {
    file_name: &'a str,
    relative_path: &'a str,
    params: Vec<ColorParameter>,
}

impl<'a> Collector<'a> {
    pub(crate) fn new(file_name: &'a str, relative_path: &'a str) -> Self {
        Self {
            file_name,
            relative_path,
            params: Vec::new(),
        }
    }

    /// A material vector parameter, identified by its index in the array.
    pub(crate) fn push_vector_parameter(
        &mut self,
        name: &str,
        param_index: usize,
        path: ParamPath,
        rgba: LinearColor,
    ) {
        let id = format!("{}-{name}-{param_index}", self.relative_path);
        self.push(id, name.to_string(), path, rgba);
    }

    /// A color field found by the recursive scan.
    pub(crate) fn push_field(&mut self, parent: &str, field: &str, path: ParamPath, rgba: LinearColor) {
        let ordinal = self.params.len();
        let id = format!("{}-{parent}-{field}-{ordinal}", self.relative_path);
        self.push(id, format!("{parent} - {field}"), path, rgba);
    }

    fn push(&mut self, id: String, param_name: String, path: ParamPath, rgba: LinearColor) {
        self.params.push(ColorParameter {
            id,
            file_name: self.file_name.to_string(),
            relative_path: self.relative_path.to_string(),
            param_name,
            path,
            rgba,
        });
    }

    pub(crate) fn finish(self) -> Vec<ColorParameter> {
        self.params
    }
}
