//! Bulk color transforms - master color, hue shift and shuffle
//!
//! Each transform is a pure function from one snapshot to the next. Only
//! selected parameters are considered; everything else is passed through by
//! sharing its `Arc`, and a selected parameter whose color does not change is
//! shared too. An empty selection is rejected before any work is done.

mod options;

use std::collections::HashMap;
use std::sync::Arc;

use crate::color::{LinearColor, Rgb, hex_to_rgb, recolor, shift_hue};
use crate::error::{Error, Result};
use crate::formats::ColorParameter;
use crate::session::{SelectionSet, Snapshot};

pub use options::{GrayscaleGuard, TransformOptions};

/// Shuffle palette used until the user edits it.
pub const DEFAULT_PALETTE: [&str; 3] = ["#ccffff", "#88eeee", "#66dddd"];

/// New RGBA for `param` after applying `target`. Alpha is never touched.
///
/// With [`GrayscaleGuard::Respect`] and `ignore_grayscale` set, grayscale
/// parameters come back unchanged.
pub fn apply_color(
    param: &ColorParameter,
    target: Rgb,
    options: TransformOptions,
    guard: GrayscaleGuard,
) -> LinearColor {
    if is_guarded(param, options, guard) {
        return param.rgba;
    }
    recolor(param.rgba, target, options.preserve_intensity)
}

/// Apply one shared target color to every selected parameter.
pub fn apply_master_color(
    params: &[Arc<ColorParameter>],
    selection: &SelectionSet,
    target: Rgb,
    options: TransformOptions,
) -> Result<Snapshot> {
    map_selected(params, selection, "master color", |param| {
        apply_color(param, target, options, GrayscaleGuard::Respect)
    })
}

/// Rotate the hue of every selected parameter by `degrees`.
///
/// Intensity is always preserved; only the grayscale option applies.
pub fn apply_hue_shift(
    params: &[Arc<ColorParameter>],
    selection: &SelectionSet,
    degrees: f64,
    options: TransformOptions,
) -> Result<Snapshot> {
    map_selected(params, selection, "hue shift", |param| {
        hue_shifted(param, degrees, options).unwrap_or(param.rgba)
    })
}

/// Color to display for `param` while a hue shift of `staged_degrees` is
/// staged but not committed.
///
/// Returns `None` when the row is not previewing (not selected, no shift
/// staged, or grayscale-guarded); callers then show the committed value.
/// Always derived from the committed value, never accumulated.
pub fn preview_hue_shift(
    param: &ColorParameter,
    selection: &SelectionSet,
    staged_degrees: f64,
    options: TransformOptions,
) -> Option<LinearColor> {
    if staged_degrees == 0.0 || !selection.contains(&param.id) {
        return None;
    }
    hue_shifted(param, staged_degrees, options)
}

fn hue_shifted(param: &ColorParameter, degrees: f64, options: TransformOptions) -> Option<LinearColor> {
    if is_guarded(param, options, GrayscaleGuard::Respect) {
        return None;
    }
    Some(shift_hue(param.rgba, degrees))
}

/// Give each selected file its own palette color.
///
/// Files are numbered in order of first appearance among the selected
/// parameters; file `i` gets `palette[i % palette.len()]`.
pub fn apply_shuffle<S: AsRef<str>>(
    params: &[Arc<ColorParameter>],
    selection: &SelectionSet,
    palette: &[S],
    options: TransformOptions,
) -> Result<Snapshot> {
    if selection.is_empty() {
        return Err(Error::EmptySelection { operation: "shuffle" });
    }
    if palette.is_empty() {
        return Err(Error::EmptyPalette);
    }

    let assignments = shuffle_assignments(params, selection, palette.len());
    map_selected(params, selection, "shuffle", |param| {
        let target = assignments
            .get(param.relative_path.as_str())
            .map(|&slot| hex_to_rgb(palette[slot].as_ref()));
        match target {
            Some(target) => apply_color(param, target, options, GrayscaleGuard::Respect),
            None => param.rgba,
        }
    })
}

/// Palette slot per selected file, keyed by relative path.
pub fn shuffle_assignments<'a>(
    params: &'a [Arc<ColorParameter>],
    selection: &SelectionSet,
    palette_len: usize,
) -> HashMap<&'a str, usize> {
    let mut assignments = HashMap::new();
    if palette_len == 0 {
        return assignments;
    }
    for param in params.iter().filter(|p| selection.contains(&p.id)) {
        let next = assignments.len() % palette_len;
        assignments.entry(param.relative_path.as_str()).or_insert(next);
    }
    assignments
}

fn is_guarded(param: &ColorParameter, options: TransformOptions, guard: GrayscaleGuard) -> bool {
    guard == GrayscaleGuard::Respect && options.ignore_grayscale && param.rgba.is_grayscale()
}

fn map_selected<F>(
    params: &[Arc<ColorParameter>],
    selection: &SelectionSet,
    operation: &'static str,
    transform: F,
) -> Result<Snapshot>
where
    F: Fn(&ColorParameter) -> LinearColor,
{
    if selection.is_empty() {
        return Err(Error::EmptySelection { operation });
    }

    Ok(params
        .iter()
        .map(|param| {
            if !selection.contains(&param.id) {
                return Arc::clone(param);
            }
            let rgba = transform(param);
            if rgba == param.rgba {
                Arc::clone(param)
            } else {
                Arc::new(param.with_rgba(rgba))
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::ParamPath;

    fn param(id: &str, file: &str, rgba: LinearColor) -> Arc<ColorParameter> {
        Arc::new(ColorParameter {
            id: id.to_string(),
            file_name: file.to_string(),
            relative_path: file.to_string(),
            param_name: id.to_string(),
            path: ParamPath::new(),
            rgba,
        })
    }

    fn select(ids: &[&str]) -> SelectionSet {
        let mut selection = SelectionSet::new();
        selection.select_only(ids.iter().copied());
        selection
    }

    #[test]
    fn test_master_color_preserves_intensity() {
        let params = vec![param("a", "a.json", LinearColor::new(2.0, 0.5, 0.5, 1.0))];
        let out = apply_master_color(
            &params,
            &select(&["a"]),
            hex_to_rgb("#0000FF"),
            TransformOptions::new(),
        )
        .unwrap();
        assert_eq!(out[0].rgba, LinearColor::new(0.0, 0.0, 2.0, 1.0));
    }

    #[test]
    fn test_master_color_skips_grayscale_and_unselected() {
        let params = vec![
            param("gray", "a.json", LinearColor::new(0.4, 0.4, 0.4, 1.0)),
            param("other", "a.json", LinearColor::new(1.0, 0.0, 0.0, 1.0)),
        ];
        let out = apply_master_color(
            &params,
            &select(&["gray"]),
            Rgb::new(0.0, 1.0, 0.0),
            TransformOptions::new(),
        )
        .unwrap();
        assert!(Arc::ptr_eq(&out[0], &params[0]));
        assert!(Arc::ptr_eq(&out[1], &params[1]));

        let unguarded = TransformOptions::new().with_ignore_grayscale(false);
        let out = apply_master_color(&params, &select(&["gray"]), Rgb::new(0.0, 1.0, 0.0), unguarded)
            .unwrap();
        assert_eq!(out[0].rgba, LinearColor::new(0.0, 0.4, 0.0, 1.0));
    }

    #[test]
    fn test_empty_selection_rejected() {
        let params = vec![param("a", "a.json", LinearColor::new(1.0, 0.0, 0.0, 1.0))];
        let err = apply_hue_shift(&params, &SelectionSet::new(), 30.0, TransformOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptySelection { operation: "hue shift" }));
        let err = apply_shuffle(&params, &SelectionSet::new(), &DEFAULT_PALETTE, TransformOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptySelection { operation: "shuffle" }));
    }

    #[test]
    fn test_manual_edit_bypasses_guard() {
        let gray = param("gray", "a.json", LinearColor::new(0.5, 0.5, 0.5, 1.0));
        let rgba = apply_color(
            &gray,
            Rgb::new(1.0, 0.0, 0.0),
            TransformOptions::new(),
            GrayscaleGuard::Bypass,
        );
        assert_eq!(rgba, LinearColor::new(0.5, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_hue_shift_zero_is_noop() {
        let params = vec![
            param("a", "a.json", LinearColor::new(2.0, 0.5, 0.25, 1.0)),
            param("b", "a.json", LinearColor::new(0.1, 0.6, 0.3, 1.0)),
        ];
        let out = apply_hue_shift(&params, &select(&["a", "b"]), 0.0, TransformOptions::new()).unwrap();
        for (before, after) in params.iter().zip(&out) {
            assert!((before.rgba.r - after.rgba.r).abs() < 1e-9);
            assert!((before.rgba.g - after.rgba.g).abs() < 1e-9);
            assert!((before.rgba.b - after.rgba.b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_preview_is_derived_from_committed_value() {
        let red = param("a", "a.json", LinearColor::new(1.0, 0.0, 0.0, 1.0));
        let selection = select(&["a"]);
        let options = TransformOptions::new();

        let first = preview_hue_shift(&red, &selection, 120.0, options).unwrap();
        let second = preview_hue_shift(&red, &selection, 120.0, options).unwrap();
        assert_eq!(first, second);
        assert!(preview_hue_shift(&red, &selection, 0.0, options).is_none());
        assert!(preview_hue_shift(&red, &SelectionSet::new(), 120.0, options).is_none());
    }

    #[test]
    fn test_shuffle_cycles_palette_by_file() {
        let params: Vec<_> = ["f0", "f1", "f2", "f3"]
            .iter()
            .map(|file| param(file, &format!("{file}.json"), LinearColor::new(1.0, 0.0, 0.0, 1.0)))
            .collect();
        let selection = select(&["f0", "f1", "f2", "f3"]);
        let palette = ["#ff0000", "#00ff00", "#0000ff"];

        let slots = shuffle_assignments(&params, &selection, palette.len());
        assert_eq!(slots["f0.json"], 0);
        assert_eq!(slots["f1.json"], 1);
        assert_eq!(slots["f2.json"], 2);
        assert_eq!(slots["f3.json"], 0);

        let out = apply_shuffle(&params, &selection, &palette, TransformOptions::new()).unwrap();
        assert_eq!(out[1].rgba, LinearColor::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(out[3].rgba, LinearColor::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_shuffle_empty_palette() {
        let params = vec![param("a", "a.json", LinearColor::new(1.0, 0.0, 0.0, 1.0))];
        let palette: [&str; 0] = [];
        let err = apply_shuffle(&params, &select(&["a"]), &palette, TransformOptions::new()).unwrap_err();
        assert!(matches!(err, Error::EmptyPalette));
    }
}
