//! Session setup shared by the subcommands

use std::path::{Path, PathBuf};

use crate::cli::progress::{print_warning, spinner_unless};
use crate::config::Preferences;
use crate::dictionary::KeywordDictionary;
use crate::formats::{ColorParameter, ROOT_FOLDER};
use crate::io::collect_inputs;
use crate::session::{LoadReport, SaveReport, Session};

use super::definitions::{InputArgs, OutputArgs, TransformArgs};

/// Build a session from saved preferences plus command-line overrides, and
/// load the inputs into it.
pub fn open_session(
    input: &InputArgs,
    transform: Option<TransformArgs>,
) -> anyhow::Result<(Session, LoadReport)> {
    let mut preferences = Preferences::load();
    if let Some(transform) = transform {
        if transform.keep_grayscale {
            preferences.ignore_grayscale = false;
        }
        if transform.no_preserve_intensity {
            preferences.preserve_intensity = false;
        }
    }
    if input.hide_grayscale {
        preferences.show_grayscale = false;
    }

    // An explicit dictionary must load; a configured one only warns
    let mut session = match &input.dictionary {
        Some(path) => {
            let dictionary = KeywordDictionary::load(path)?;
            Session::with_dictionary(preferences, Some(dictionary))
        }
        None => Session::from_preferences(preferences),
    };

    let pb = spinner_unless(input.quiet, "Reading files...");
    let files = collect_inputs(&input.input);
    pb.finish_and_clear();
    let report = session.load(files?);

    if !input.quiet {
        for error in &report.errors {
            print_warning(&format!("Skipped: {error}"));
        }
    }

    if !input.folder.is_empty() {
        session.filter_mut().folders = input.folder.iter().map(|f| normalize_folder(f)).collect();
    }
    if let Some(search) = &input.search {
        session.filter_mut().search.clone_from(search);
    }

    Ok((session, report))
}

/// Select the displayed parameters matching any of `patterns`, or every
/// displayed parameter when there are none. Returns the selection size.
pub fn select_targets(session: &mut Session, patterns: &[String]) -> usize {
    let patterns: Vec<String> = patterns.iter().map(|p| p.to_lowercase()).collect();
    let ids: Vec<String> = session
        .display_list()
        .iter()
        .filter(|param| patterns.is_empty() || matches_any(param, &patterns))
        .map(|param| param.id.clone())
        .collect();

    let count = ids.len();
    session.selection_mut().select_only(ids);
    count
}

fn matches_any(param: &ColorParameter, patterns: &[String]) -> bool {
    let name = param.param_name.to_lowercase();
    let path = param.relative_path.to_lowercase();
    patterns
        .iter()
        .any(|pattern| name.contains(pattern) || path.contains(pattern))
}

/// Directory that receives the `output` folder.
pub fn output_root(input: &InputArgs, output: &OutputArgs) -> PathBuf {
    if let Some(dir) = &output.output {
        return dir.clone();
    }
    let first = input.input.first().map_or(Path::new("."), PathBuf::as_path);
    if first.is_dir() {
        first.to_path_buf()
    } else {
        first
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }
}

/// Save the session, reporting skipped parameters.
pub fn save(session: &mut Session, root: &Path, quiet: bool) -> anyhow::Result<SaveReport> {
    let pb = spinner_unless(quiet, "Writing files...");
    let report = session.save_to(root);
    pb.finish_and_clear();
    let report = report?;

    if !quiet {
        for skipped in &report.skipped {
            print_warning(&format!("Not written: {skipped}"));
        }
    }
    Ok(report)
}

/// Folder names as the view stores them: no trailing `/`, root as `/`.
fn normalize_folder(folder: &str) -> String {
    match folder.trim().trim_end_matches('/') {
        "" | "." => ROOT_FOLDER.to_string(),
        trimmed => trimmed.trim_start_matches("./").to_string(),
    }
}
