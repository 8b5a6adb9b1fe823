//! Linear undo/redo history of parameter snapshots

use std::sync::Arc;

use crate::formats::ColorParameter;

/// One immutable parameter-list state.
///
/// Parameters are shared between snapshots; a transform only allocates the
/// elements it changes.
pub type Snapshot = Vec<Arc<ColorParameter>>;

/// Snapshots plus a cursor. Committing after an undo discards the redo branch.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// A history holding the single empty snapshot.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Vec::new()],
            index: 0,
        }
    }

    /// Replace the whole history with `initial` as its only snapshot.
    pub fn replace(&mut self, initial: Snapshot) {
        self.snapshots = vec![initial];
        self.index = 0;
    }

    /// Drop the redo branch, push `snapshot` and move the cursor onto it.
    pub fn commit(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(snapshot);
        self.index = self.snapshots.len() - 1;
    }

    /// Step back one snapshot. Returns false at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Step forward one snapshot. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 >= self.snapshots.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Back to the single empty snapshot.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn current(&self) -> &[Arc<ColorParameter>] {
        &self.snapshots[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Every snapshot, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::LinearColor;
    use crate::formats::ParamPath;

    fn snapshot(r: f64) -> Snapshot {
        vec![Arc::new(ColorParameter {
            id: "a".to_string(),
            file_name: "a.json".to_string(),
            relative_path: "a.json".to_string(),
            param_name: "A".to_string(),
            path: ParamPath::new(),
            rgba: LinearColor::new(r, 0.0, 0.0, 1.0),
        })]
    }

    #[test]
    fn test_starts_empty() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo_bounds() {
        let mut history = History::new();
        history.replace(snapshot(0.0));
        history.commit(snapshot(1.0));

        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(history.index(), 0);
        assert!(history.redo());
        assert!(!history.redo());
        assert_eq!(history.current()[0].rgba.r, 1.0);
    }

    #[test]
    fn test_commit_after_undo_discards_redo() {
        let mut history = History::new();
        history.replace(snapshot(0.0));
        history.commit(snapshot(1.0));
        history.commit(snapshot(2.0));

        history.undo();
        history.commit(snapshot(3.0));

        assert_eq!(history.len(), 3);
        assert!(!history.redo());
        assert_eq!(history.current()[0].rgba.r, 3.0);
        history.undo();
        assert_eq!(history.current()[0].rgba.r, 1.0);
    }

    #[test]
    fn test_earlier_snapshots_unchanged() {
        let mut history = History::new();
        let first = snapshot(0.5);
        history.replace(first.clone());
        history.commit(snapshot(0.9));
        assert_eq!(history.snapshots()[0], first);
    }
}
