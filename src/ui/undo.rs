//! Snapshot-based undo history.
//!
//! Every mutating action pushes a deep copy of the tube list before it runs, so the
//! top of the stack is always the state just before the latest action. Undo pops that
//! snapshot and restores it. The history is seeded with the initial scene; the seed is
//! a floor that is never popped.

use crate::types::{Scene, Tube};

/// Value copy of every tube at one instant. Selection is not part of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    tubes: Vec<Tube>,
}

impl Snapshot {
    /// Copies the tubes of `scene`.
    pub fn capture(scene: &Scene) -> Self {
        Self {
            tubes: scene.tubes.clone(),
        }
    }

    /// The captured tubes.
    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }
}

/// Linear undo stack. No redo.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    snapshots: Vec<Snapshot>,
}

impl UndoHistory {
    /// Creates a history seeded with the current state of `scene`.
    pub fn new(scene: &Scene) -> Self {
        Self {
            snapshots: vec![Snapshot::capture(scene)],
        }
    }

    /// Records the current state of `scene`. Call before mutating it.
    pub fn snapshot(&mut self, scene: &Scene) {
        self.snapshots.push(Snapshot::capture(scene));
    }

    /// Returns true if anything beyond the seed snapshot remains.
    pub fn can_undo(&self) -> bool {
        self.snapshots.len() > 1
    }

    /// Pops the state recorded before the latest action.
    ///
    /// # Returns
    ///
    /// The snapshot to restore, or None when only the seed remains
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.snapshots.pop()
    }

    /// Number of stored snapshots, including the seed. Never below one.
    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(&Scene::default())
    }
}
