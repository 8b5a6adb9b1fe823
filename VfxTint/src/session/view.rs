//! Display view over the current snapshot - folder, grayscale and name
//! filtering plus color sorting
//!
//! None of this touches history; it only decides which rows a frontend shows
//! and in which order.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::color::rgb_to_hsl;
use crate::formats::ColorParameter;

/// Sort direction for the color column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Snapshot order.
    #[default]
    None,
    /// By hue, then saturation, then lightness.
    Ascending,
    Descending,
}

impl SortOrder {
    /// Next state of a sort header click: none -> ascending -> descending -> none.
    #[must_use]
    pub fn cycle(self) -> Self {
        match self {
            SortOrder::None => SortOrder::Ascending,
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::None,
        }
    }
}

/// Which rows are displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFilter {
    /// Enabled folders. Only consulted when at least one folder is known.
    pub folders: BTreeSet<String>,
    pub show_grayscale: bool,
    /// Case-insensitive substring over parameter and file names.
    pub search: String,
    pub sort: SortOrder,
}

impl Default for ViewFilter {
    fn default() -> Self {
        Self {
            folders: BTreeSet::new(),
            show_grayscale: true,
            search: String::new(),
            sort: SortOrder::None,
        }
    }
}

/// Distinct folders of `params`, sorted.
pub fn folders_of(params: &[Arc<ColorParameter>]) -> BTreeSet<String> {
    params.iter().map(|p| p.folder().to_string()).collect()
}

/// The displayed rows: sorted first, then filtered.
pub fn display_list(
    params: &[Arc<ColorParameter>],
    known_folders: &BTreeSet<String>,
    filter: &ViewFilter,
) -> Vec<Arc<ColorParameter>> {
    let mut rows: Vec<Arc<ColorParameter>> = params.to_vec();

    if filter.sort != SortOrder::None {
        rows.sort_by(|a, b| compare_color(a, b));
        if filter.sort == SortOrder::Descending {
            rows.reverse();
        }
    }

    let search = filter.search.to_lowercase();
    rows.retain(|p| {
        if !known_folders.is_empty() && !filter.folders.contains(p.folder()) {
            return false;
        }
        if !filter.show_grayscale && p.rgba.is_grayscale() {
            return false;
        }
        search.is_empty()
            || p.param_name.to_lowercase().contains(&search)
            || p.file_name.to_lowercase().contains(&search)
    });

    rows
}

/// Order by (hue, saturation, lightness).
fn compare_color(a: &ColorParameter, b: &ColorParameter) -> Ordering {
    let hsl_a = rgb_to_hsl(a.rgba.r, a.rgba.g, a.rgba.b);
    let hsl_b = rgb_to_hsl(b.rgba.r, b.rgba.g, b.rgba.b);
    hsl_a
        .0
        .total_cmp(&hsl_b.0)
        .then(hsl_a.1.total_cmp(&hsl_b.1))
        .then(hsl_a.2.total_cmp(&hsl_b.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::LinearColor;
    use crate::formats::ParamPath;

    fn param(id: &str, relative_path: &str, rgba: LinearColor) -> Arc<ColorParameter> {
        Arc::new(ColorParameter {
            id: id.to_string(),
            file_name: relative_path.rsplit('/').next().unwrap_or_default().to_string(),
            relative_path: relative_path.to_string(),
            param_name: format!("Style - {id}"),
            path: ParamPath::new(),
            rgba,
        })
    }

    fn params() -> Vec<Arc<ColorParameter>> {
        vec![
            param("blue", "ui/a.json", LinearColor::new(0.0, 0.0, 1.0, 1.0)),
            param("gray", "b.json", LinearColor::new(0.5, 0.5, 0.5, 1.0)),
            param("red", "fx/c.json", LinearColor::new(1.0, 0.0, 0.0, 1.0)),
            param("green", "fx/d.json", LinearColor::new(0.0, 1.0, 0.0, 1.0)),
        ]
    }

    fn ids(rows: &[Arc<ColorParameter>]) -> Vec<&str> {
        rows.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_folders() {
        let folders = folders_of(&params());
        assert_eq!(
            folders.into_iter().collect::<Vec<_>>(),
            vec!["/".to_string(), "fx".to_string(), "ui".to_string()]
        );
    }

    #[test]
    fn test_filter_by_folder_and_grayscale() {
        let params = params();
        let known = folders_of(&params);
        let filter = ViewFilter {
            folders: ["fx".to_string(), "/".to_string()].into_iter().collect(),
            show_grayscale: false,
            ..ViewFilter::default()
        };
        assert_eq!(ids(&display_list(&params, &known, &filter)), vec!["red", "green"]);
    }

    #[test]
    fn test_search_matches_param_or_file() {
        let params = params();
        let filter = ViewFilter {
            search: "D.JSON".to_string(),
            ..ViewFilter::default()
        };
        assert_eq!(ids(&display_list(&params, &BTreeSet::new(), &filter)), vec!["green"]);
    }

    #[test]
    fn test_sort_by_color() {
        let params = params();
        let mut filter = ViewFilter {
            sort: SortOrder::Ascending,
            ..ViewFilter::default()
        };
        // gray and red share hue 0; gray has lower saturation
        assert_eq!(
            ids(&display_list(&params, &BTreeSet::new(), &filter)),
            vec!["gray", "red", "green", "blue"]
        );
        filter.sort = filter.sort.cycle();
        assert_eq!(
            ids(&display_list(&params, &BTreeSet::new(), &filter)),
            vec!["blue", "green", "red", "gray"]
        );
        assert_eq!(filter.sort.cycle(), SortOrder::None);
    }
}
