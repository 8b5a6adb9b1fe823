//! Parameter selection for bulk transforms
//!
//! Selection is keyed by parameter id and is not part of the undo history.

use std::collections::HashSet;
use std::sync::Arc;

use crate::formats::ColorParameter;

/// How a row click affects the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickMode {
    /// Toggle the clicked row.
    #[default]
    Toggle,
    /// Select every row between the last clicked row and this one.
    SelectRange,
    /// Deselect every row between the last clicked row and this one.
    DeselectRange,
}

/// Set of selected parameter ids, with the anchor used for range clicks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
    anchor: Option<usize>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.anchor = None;
    }

    /// Keep only the ids for which `keep` returns true.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.ids.retain(|id| keep(id));
    }

    /// Apply a row click on the displayed list `view`.
    ///
    /// Range modes need a previous click; without one they toggle. Ids that
    /// are not displayed are ignored.
    pub fn click(&mut self, id: &str, view: &[Arc<ColorParameter>], mode: ClickMode) {
        let Some(index) = view.iter().position(|p| p.id == id) else {
            return;
        };

        match (mode, self.anchor) {
            (ClickMode::SelectRange | ClickMode::DeselectRange, Some(anchor)) => {
                let (start, end) = (anchor.min(index), anchor.max(index));
                for param in view.iter().take(end + 1).skip(start) {
                    if mode == ClickMode::DeselectRange {
                        self.ids.remove(&param.id);
                    } else {
                        self.ids.insert(param.id.clone());
                    }
                }
            }
            _ => {
                if !self.ids.remove(id) {
                    self.ids.insert(id.to_string());
                }
            }
        }

        self.anchor = Some(index);
    }

    /// Select every displayed row, or clear when all of them already are.
    pub fn toggle_all(&mut self, view: &[Arc<ColorParameter>]) {
        if self.ids.len() == view.len() {
            self.ids.clear();
        } else {
            self.ids = view.iter().map(|p| p.id.clone()).collect();
        }
    }

    /// Replace the selection with `ids`.
    pub fn select_only<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self.anchor = None;
    }
}
