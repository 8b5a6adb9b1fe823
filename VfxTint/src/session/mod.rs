//! Editing session: loaded files, undo history, selection and settings
//!
//! A [`Session`] owns everything one editing pass needs. Every mutation of
//! the parameter list goes through [`History::commit`] with a freshly built
//! snapshot, so undo and redo always see complete, unmodified states.
//! Failed operations return an error and leave the session as it was.

mod history;
mod reset;
mod selection;
mod view;

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

pub use history::{History, Snapshot};
pub use reset::{DEFAULT_RESET_HOLD, ResetHold, ResetPoll};
pub use selection::{ClickMode, SelectionSet};
pub use view::{SortOrder, ViewFilter, display_list, folders_of};

use crate::color::{Channel, LinearColor, parse_hex};
use crate::config::Preferences;
use crate::dictionary::KeywordDictionary;
use crate::error::{Error, Result};
use crate::formats::{ColorParameter, extract};
use crate::io::{SourceFile, write_files};
use crate::project;
use crate::transform::{self, GrayscaleGuard, TransformOptions};
use crate::writeback::{FilePayload, serialize_files};

/// Outcome of [`Session::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Files parsed and added to the session.
    pub files_loaded: usize,
    /// Files ignored because their relative path was already loaded.
    pub files_already_loaded: usize,
    /// Parameters extracted from the newly loaded files.
    pub parameters_added: usize,
    /// Files that were skipped: [`Error::Parse`] for invalid JSON,
    /// [`Error::DuplicateFile`] for a relative path repeated within the load.
    pub errors: Vec<Error>,
}

/// Outcome of a successful save.
#[derive(Debug)]
pub struct SaveReport {
    pub files_written: usize,
    /// Directory the files were written under.
    pub output_dir: PathBuf,
    /// Parameters that could not be written back.
    pub skipped: Vec<Error>,
}

/// One editing session over a set of exported asset files.
#[derive(Debug)]
pub struct Session {
    original_files: IndexMap<String, Value>,
    history: History,
    selection: SelectionSet,
    folders: BTreeSet<String>,
    filter: ViewFilter,
    options: TransformOptions,
    palette: Vec<String>,
    master_color: String,
    staged_hue_shift: f64,
    session_name: String,
    output_root: Option<PathBuf>,
    dictionary: Option<KeywordDictionary>,
    reset_hold: ResetHold,
    preferences: Preferences,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session with default preferences and the bundled dictionary.
    pub fn new() -> Self {
        Self::from_preferences(Preferences::default())
    }

    /// A session configured from `preferences`.
    ///
    /// The configured dictionary is used when set, the bundled one otherwise.
    /// A dictionary that fails to load disables material classification
    /// instead of failing the session.
    pub fn from_preferences(preferences: Preferences) -> Self {
        let dictionary = match preferences.dictionary_path() {
            Some(path) => KeywordDictionary::load(&path),
            None => KeywordDictionary::bundled(),
        };
        let dictionary = dictionary
            .map_err(|e| warn!("{e}; material vector parameters will not be extracted"))
            .ok();
        Self::with_dictionary(preferences, dictionary)
    }

    /// A session with an explicit dictionary (or none).
    pub fn with_dictionary(preferences: Preferences, dictionary: Option<KeywordDictionary>) -> Self {
        Self {
            original_files: IndexMap::new(),
            history: History::new(),
            selection: SelectionSet::new(),
            folders: BTreeSet::new(),
            filter: ViewFilter {
                show_grayscale: preferences.show_grayscale,
                ..ViewFilter::default()
            },
            options: preferences.transform_options(),
            palette: preferences.shuffle_palette.clone(),
            master_color: preferences.master_color.clone(),
            staged_hue_shift: 0.0,
            session_name: preferences.session_name.clone(),
            output_root: None,
            dictionary,
            reset_hold: ResetHold::new(),
            preferences,
        }
    }

    // ===== Loading =====

    /// Load `files`, appending when parameters are already loaded.
    pub fn load(&mut self, files: Vec<SourceFile>) -> LoadReport {
        let append = !self.parameters().is_empty();
        self.load_with(files, append)
    }

    /// Load `files`, either replacing the session's files and history or
    /// appending to them.
    ///
    /// When appending, files whose relative path is already loaded are
    /// skipped and the new parameters are committed as one history entry.
    /// Files that fail to parse, or repeat a relative path seen earlier in
    /// the same load, are skipped and reported.
    pub fn load_with(&mut self, files: Vec<SourceFile>, append: bool) -> LoadReport {
        let mut report = LoadReport::default();
        let mut documents = if append {
            self.original_files.clone()
        } else {
            IndexMap::new()
        };
        let mut params: Snapshot = if append {
            self.parameters().to_vec()
        } else {
            Vec::new()
        };

        for file in files {
            if documents.contains_key(&file.relative_path) {
                if append && self.original_files.contains_key(&file.relative_path) {
                    debug!("Skipping already loaded {}", file.relative_path);
                    report.files_already_loaded += 1;
                } else {
                    warn!("Skipping duplicate {}", file.relative_path);
                    report.errors.push(Error::DuplicateFile {
                        relative_path: file.relative_path,
                    });
                }
                continue;
            }
            let document: Value = match serde_json::from_str(&file.content) {
                Ok(document) => document,
                Err(source) => {
                    warn!("Failed to parse {}: {source}", file.relative_path);
                    report.errors.push(Error::Parse {
                        relative_path: file.relative_path,
                        source,
                    });
                    continue;
                }
            };

            let extracted = extract(
                &document,
                &file.name,
                &file.relative_path,
                self.dictionary.as_ref(),
            );
            report.files_loaded += 1;
            report.parameters_added += extracted.len();
            params.extend(extracted.into_iter().map(Arc::new));
            documents.insert(file.relative_path, document);
        }

        self.folders = folders_of(&params);
        self.filter.folders = self.folders.clone();
        self.original_files = documents;

        if append {
            self.history.commit(params);
        } else {
            let ids: HashSet<&str> = params.iter().map(|p| p.id.as_str()).collect();
            self.selection.retain(|id| ids.contains(id));
            self.history.replace(params);
        }

        info!(
            "Loaded {} files ({} parameters, {} failed)",
            report.files_loaded,
            report.parameters_added,
            report.errors.len()
        );
        report
    }

    // ===== History =====

    /// The committed parameter list.
    pub fn parameters(&self) -> &[Arc<ColorParameter>] {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Commit `snapshot` as the next history entry.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.history.commit(snapshot);
        debug!(
            "Committed snapshot {} of {}",
            self.history.index() + 1,
            self.history.len()
        );
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo()
    }

    /// Drop all loaded state and restore every setting to the preferences
    /// the session was created with.
    pub fn reset(&mut self) {
        let preferences = self.preferences.clone();
        let dictionary = self.dictionary.take();
        *self = Self::with_dictionary(preferences, dictionary);
        info!("Session reset");
    }

    /// Start the press-and-hold reset gesture.
    pub fn press_reset(&mut self, now: Instant) {
        let hold = self.preferences.reset_hold();
        self.reset_hold.press(now, hold);
    }

    /// Cancel a pending reset. Returns true if one was pending.
    pub fn release_reset(&mut self) -> bool {
        self.reset_hold.release()
    }

    /// Advance the reset gesture, resetting the session once it fires.
    pub fn poll_reset(&mut self, now: Instant) -> ResetPoll {
        let poll = self.reset_hold.poll(now);
        if poll == ResetPoll::Fired {
            self.reset();
        }
        poll
    }

    pub fn reset_hold_duration(&self) -> Duration {
        self.preferences.reset_hold()
    }

    // ===== Files and view =====

    /// Parsed original documents keyed by relative path, in load order.
    pub fn original_files(&self) -> &IndexMap<String, Value> {
        &self.original_files
    }

    /// Distinct folders of the loaded parameters, sorted.
    pub fn folders(&self) -> &BTreeSet<String> {
        &self.folders
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut ViewFilter {
        &mut self.filter
    }

    /// Cycle the color sort: none, ascending, descending.
    pub fn toggle_sort(&mut self) -> SortOrder {
        self.filter.sort = self.filter.sort.cycle();
        self.filter.sort
    }

    /// Enable or disable one folder in the filter.
    pub fn toggle_folder(&mut self, folder: &str) {
        if !self.filter.folders.remove(folder) {
            self.filter.folders.insert(folder.to_string());
        }
    }

    /// The rows a frontend should display, sorted then filtered.
    pub fn display_list(&self) -> Vec<Arc<ColorParameter>> {
        display_list(self.parameters(), &self.folders, &self.filter)
    }

    /// Color to display for `param`, including a staged hue shift preview.
    pub fn displayed_color(&self, param: &ColorParameter) -> LinearColor {
        transform::preview_hue_shift(param, &self.selection, self.staged_hue_shift, self.options)
            .unwrap_or(param.rgba)
    }

    // ===== Selection =====

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    /// Apply a row click against the current display list.
    pub fn click(&mut self, id: &str, mode: ClickMode) {
        let view = self.display_list();
        self.selection.click(id, &view, mode);
    }

    /// Select every displayed row, or clear when all already are.
    pub fn toggle_select_all(&mut self) {
        let view = self.display_list();
        self.selection.toggle_all(&view);
    }

    // ===== Settings =====

    pub fn options(&self) -> TransformOptions {
        self.options
    }

    pub fn set_options(&mut self, options: TransformOptions) {
        self.options = options;
    }

    pub fn master_color(&self) -> &str {
        &self.master_color
    }

    /// Set the master color from `#rgb` or `#rrggbb` text.
    pub fn set_master_color(&mut self, hex: &str) -> Result<()> {
        let rgb = parse_hex(hex)?;
        self.master_color = crate::color::rgba_to_display_hex(rgb.r, rgb.g, rgb.b);
        Ok(())
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    /// Replace the shuffle palette. Every entry must be a valid hex color.
    pub fn set_palette(&mut self, palette: Vec<String>) -> Result<()> {
        for hex in &palette {
            parse_hex(hex)?;
        }
        self.palette = palette;
        Ok(())
    }

    /// Replace one palette entry. Out-of-range indices are ignored.
    pub fn set_palette_color(&mut self, index: usize, hex: &str) -> Result<()> {
        parse_hex(hex)?;
        if let Some(slot) = self.palette.get_mut(index) {
            *slot = hex.to_string();
        }
        Ok(())
    }

    pub fn staged_hue_shift(&self) -> f64 {
        self.staged_hue_shift
    }

    /// Stage a hue shift for preview without committing it.
    pub fn stage_hue_shift(&mut self, degrees: f64) {
        self.staged_hue_shift = if degrees.is_finite() { degrees } else { 0.0 };
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    pub fn set_session_name(&mut self, name: impl Into<String>) {
        self.session_name = name.into();
    }

    /// Directory remembered from the last successful save.
    pub fn output_root(&self) -> Option<&Path> {
        self.output_root.as_deref()
    }

    pub fn dictionary(&self) -> Option<&KeywordDictionary> {
        self.dictionary.as_ref()
    }

    /// Replace the dictionary used by later loads.
    pub fn set_dictionary(&mut self, dictionary: Option<KeywordDictionary>) {
        self.dictionary = dictionary;
    }

    // ===== Transforms =====

    /// Recolor the selection with the master color.
    pub fn apply_master_color(&mut self) -> Result<()> {
        let target = parse_hex(&self.master_color)?;
        let snapshot =
            transform::apply_master_color(self.parameters(), &self.selection, target, self.options)?;
        self.commit(snapshot);
        Ok(())
    }

    /// Rotate the hue of the selection, then clear the staged shift.
    pub fn apply_hue_shift(&mut self, degrees: f64) -> Result<()> {
        let snapshot =
            transform::apply_hue_shift(self.parameters(), &self.selection, degrees, self.options)?;
        self.commit(snapshot);
        self.staged_hue_shift = 0.0;
        Ok(())
    }

    /// Commit the staged hue shift.
    pub fn apply_staged_hue_shift(&mut self) -> Result<()> {
        self.apply_hue_shift(self.staged_hue_shift)
    }

    /// Give each selected file its own palette color.
    pub fn apply_shuffle(&mut self) -> Result<()> {
        let snapshot =
            transform::apply_shuffle(self.parameters(), &self.selection, &self.palette, self.options)?;
        self.commit(snapshot);
        Ok(())
    }

    // ===== Manual edits =====

    /// Replace all four channels of one parameter. Returns false for an
    /// unknown id.
    pub fn edit_parameter(&mut self, id: &str, rgba: LinearColor) -> bool {
        self.edit_with(id, |_| rgba.sanitized())
    }

    /// Recolor one parameter from hex text, ignoring the grayscale option.
    pub fn edit_parameter_hex(&mut self, id: &str, hex: &str) -> Result<bool> {
        let target = parse_hex(hex)?;
        let options = self.options;
        Ok(self.edit_with(id, |param| {
            transform::apply_color(param, target, options, GrayscaleGuard::Bypass)
        }))
    }

    /// Set one channel of one parameter.
    pub fn edit_channel(&mut self, id: &str, channel: Channel, value: f64) -> bool {
        self.edit_with(id, |param| param.rgba.with_channel(channel, value))
    }

    fn edit_with<F>(&mut self, id: &str, edit: F) -> bool
    where
        F: FnOnce(&ColorParameter) -> LinearColor,
    {
        let params = self.parameters();
        let Some(position) = params.iter().position(|p| p.id == id) else {
            return false;
        };
        let rgba = edit(&params[position]);
        let mut snapshot = params.to_vec();
        snapshot[position] = Arc::new(params[position].with_rgba(rgba));
        self.commit(snapshot);
        true
    }

    // ===== Project files =====

    /// Project file for the selected parameters, named after the session.
    pub fn export_project(&self) -> Result<FilePayload> {
        let entries = project::export_entries(self.parameters(), &self.selection)?;
        Ok(FilePayload::new(
            project::project_file_name(&self.session_name),
            project::to_project_text(&entries)?,
        ))
    }

    /// Write the project file into `dir`.
    pub fn export_project_to(&self, dir: &Path) -> Result<PathBuf> {
        let payload = self.export_project()?;
        let mut written = write_files(dir, std::slice::from_ref(&payload))?;
        written.pop().ok_or_else(|| Error::InvalidPath(payload.relative_path))
    }

    /// Apply project file text. Always commits; returns how many parameters
    /// were updated.
    pub fn import_project(&mut self, text: &str) -> Result<usize> {
        let entries = project::parse_project(text)?;
        let (snapshot, updated) = project::apply_entries(self.parameters(), &entries);
        self.commit(snapshot);
        info!("Imported project: {updated} parameters updated");
        Ok(updated)
    }

    /// Read and apply a project file from disk.
    pub fn import_project_file(&mut self, path: &Path) -> Result<usize> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.import_project(&text)
    }

    // ===== Saving =====

    /// Serialize every loaded file with the current colors.
    pub fn serialize(&self) -> Result<Vec<FilePayload>> {
        Ok(serialize_files(&self.original_files, self.parameters())?.files)
    }

    /// Save into the remembered output root, asking `choose_dir` for one if
    /// none is remembered yet. Returns `Ok(None)` when the choice is
    /// cancelled.
    pub fn save_with<F>(&mut self, choose_dir: F) -> Result<Option<SaveReport>>
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        if self.parameters().is_empty() {
            return Err(Error::NothingToSave);
        }
        let root = match self.output_root.clone().or_else(choose_dir) {
            Some(root) => root,
            None => {
                info!("Save cancelled");
                return Ok(None);
            }
        };
        self.save_to(&root).map(Some)
    }

    /// Save into `<root>/<output dir name>/` and remember `root`.
    pub fn save_to(&mut self, root: &Path) -> Result<SaveReport> {
        if self.parameters().is_empty() {
            return Err(Error::NothingToSave);
        }

        let write_back = serialize_files(&self.original_files, self.parameters())?;
        let output_dir = root.join(&self.preferences.output_dir_name);
        let written = write_files(&output_dir, &write_back.files)?;

        self.output_root = Some(root.to_path_buf());
        info!(
            "Saved {} files to {}",
            written.len(),
            output_dir.display()
        );
        Ok(SaveReport {
            files_written: written.len(),
            output_dir,
            skipped: write_back.skipped,
        })
    }
}
