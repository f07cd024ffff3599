//! Direct-manipulation drag gestures.
//!
//! A gesture remembers the tube as it was when the pointer went down and the press
//! point. Every move recomputes the result from that captured state, so the outcome
//! depends only on the current pointer position and never on the path taken.

use crate::geometry::Point;
use crate::types::{AnglePreset, Tube, TubeIndex};

/// How a pointer move is interpreted while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Move the tube's center
    Translate,
    /// Spin the tube about its original center
    Rotate,
}

impl DragMode {
    /// Picks the mode for a single move event.
    ///
    /// Rotation needs both shift held and the `Free` angle mode; anything else,
    /// including shift under a fixed preset, translates.
    pub fn resolve(shift_held: bool, angle_mode: AnglePreset) -> Self {
        if shift_held && angle_mode.is_free() {
            DragMode::Rotate
        } else {
            DragMode::Translate
        }
    }
}

/// An in-progress drag on one tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    /// Slot of the tube being manipulated
    pub index: TubeIndex,
    /// The tube as it was at press time
    pub original: Tube,
    /// Pointer position at press time
    pub press: Point,
}

impl DragGesture {
    /// Starts a gesture on `original` (stored in slot `index`) pressed at `press`.
    pub fn new(index: TubeIndex, original: Tube, press: Point) -> Self {
        Self {
            index,
            original,
            press,
        }
    }

    /// Center after translating by the pointer's total displacement.
    pub fn translated_center(&self, current: Point) -> Point {
        self.original.center + (current - self.press)
    }

    /// Rotation after sweeping from the press point to `current` about the original center.
    pub fn rotated_angle(&self, current: Point) -> f64 {
        let center = self.original.center;
        self.original.rotation + (current.angle_from(center) - self.press.angle_from(center))
    }

    /// Applies one move event to the live tube.
    ///
    /// Translation only touches the center and rotation only touches the angle, so an
    /// angle assigned mid-drag survives later translate moves.
    pub fn apply(&self, mode: DragMode, current: Point, tube: &mut Tube) {
        match mode {
            DragMode::Translate => tube.center = self.translated_center(current),
            DragMode::Rotate => tube.rotation = self.rotated_angle(current),
        }
    }
}
