//! Core data types for the tube joint designer.
//!
//! This module defines the tube model, the scene (ordered tubes plus selection),
//! and the angle presets offered by the control panel.

use crate::geometry::{Point, Transform, TubeShape, WorldOutline};
use std::fmt;
use std::str::FromStr;

/// Slot of a tube within the scene. Tubes are identified by position, not value.
pub type TubeIndex = usize;

/// A rectangular tube cross-section placed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tube {
    /// Center of the cross-section in canvas coordinates
    pub center: Point,
    /// Outer extent along the local x axis
    pub length: f64,
    /// Outer extent along the local y axis
    pub width: f64,
    /// Wall thickness
    pub thickness: f64,
    /// Rotation about the center in radians, not normalized
    pub rotation: f64,
}

impl Tube {
    /// Creates an unrotated tube.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position in canvas coordinates
    /// * `length` - Outer length
    /// * `width` - Outer width
    /// * `thickness` - Wall thickness
    pub fn new(center: Point, length: f64, width: f64, thickness: f64) -> Self {
        Self {
            center,
            length,
            width,
            thickness,
            rotation: 0.0,
        }
    }

    /// Local-space outline, independent of position and rotation.
    pub fn outline(&self) -> TubeShape {
        TubeShape::from_dimensions(self.length, self.width, self.thickness)
    }

    /// Placement of the local outline: rotate by `rotation`, then move to `center`.
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.center,
            rotation: self.rotation,
        }
    }

    /// The outline placed in canvas space.
    pub fn world_outline(&self) -> WorldOutline {
        WorldOutline {
            shape: self.outline(),
            transform: self.transform(),
        }
    }

    /// Returns true if `point` lies on the tube's frame (or solid body).
    pub fn hit_test(&self, point: Point) -> bool {
        self.world_outline().contains(point)
    }
}

/// The document being edited: tubes in paint order plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// Tubes in z-order; later entries are drawn on top
    pub tubes: Vec<Tube>,
    /// Slot of the selected tube, if any
    selected: Option<TubeIndex>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tube on top of all others and selects it.
    ///
    /// # Returns
    ///
    /// The slot of the new tube.
    pub fn push_tube(&mut self, tube: Tube) -> TubeIndex {
        self.tubes.push(tube);
        let index = self.tubes.len() - 1;
        self.selected = Some(index);
        index
    }

    /// Finds the topmost tube under `point`, scanning from the top of the z-order.
    pub fn topmost_hit(&self, point: Point) -> Option<TubeIndex> {
        self.tubes.iter().rposition(|tube| tube.hit_test(point))
    }

    /// Currently selected slot.
    pub fn selected(&self) -> Option<TubeIndex> {
        self.selected
    }

    /// Sets the selection; slots past the end of the scene clear it.
    pub fn select(&mut self, index: Option<TubeIndex>) {
        self.selected = index.filter(|i| *i < self.tubes.len());
    }

    /// The selected tube, if any.
    pub fn selected_tube(&self) -> Option<&Tube> {
        self.selected.and_then(|i| self.tubes.get(i))
    }

    /// Mutable access to the selected tube, if any.
    pub fn selected_tube_mut(&mut self) -> Option<&mut Tube> {
        self.selected.and_then(|i| self.tubes.get_mut(i))
    }

    /// Replaces every tube with copies of `tubes` and drops the selection.
    pub fn restore(&mut self, tubes: &[Tube]) {
        self.tubes = tubes.to_vec();
        self.selected = None;
    }

    /// Number of tubes.
    pub fn len(&self) -> usize {
        self.tubes.len()
    }

    /// Whether the scene has no tubes.
    pub fn is_empty(&self) -> bool {
        self.tubes.is_empty()
    }
}

/// Angle choices offered by the control panel.
///
/// `Free` enables shift-drag rotation; every other preset is a fixed angle that is
/// applied to the selected tube when chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnglePreset {
    /// Rotation follows shift-drag gestures
    #[default]
    Free,
    /// 0°
    Deg0,
    /// 30°
    Deg30,
    /// 45°
    Deg45,
    /// 90°
    Deg90,
    /// 135°
    Deg135,
}

impl AnglePreset {
    /// All presets in the order the selector lists them.
    pub const ALL: [AnglePreset; 6] = [
        AnglePreset::Free,
        AnglePreset::Deg0,
        AnglePreset::Deg30,
        AnglePreset::Deg45,
        AnglePreset::Deg90,
        AnglePreset::Deg135,
    ];

    /// Label shown in the selector.
    pub fn label(self) -> &'static str {
        match self {
            AnglePreset::Free => "Free",
            AnglePreset::Deg0 => "0°",
            AnglePreset::Deg30 => "30°",
            AnglePreset::Deg45 => "45°",
            AnglePreset::Deg90 => "90°",
            AnglePreset::Deg135 => "135°",
        }
    }

    /// Fixed angle in degrees, or `None` for `Free`.
    pub fn degrees(self) -> Option<f64> {
        match self {
            AnglePreset::Free => None,
            AnglePreset::Deg0 => Some(0.0),
            AnglePreset::Deg30 => Some(30.0),
            AnglePreset::Deg45 => Some(45.0),
            AnglePreset::Deg90 => Some(90.0),
            AnglePreset::Deg135 => Some(135.0),
        }
    }

    /// Fixed angle in radians, or `None` for `Free`.
    pub fn radians(self) -> Option<f64> {
        self.degrees().map(f64::to_radians)
    }

    /// Whether shift-drag rotation is allowed under this preset.
    pub fn is_free(self) -> bool {
        self == AnglePreset::Free
    }
}

impl fmt::Display for AnglePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failure to turn a selector label into an [`AnglePreset`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseAngleError {
    /// The label is neither `Free` nor a number of degrees
    #[error("`{0}` is not an angle")]
    NotAnAngle(String),
    /// The label is a number, but not one of the offered presets
    #[error("{0}° is not an available angle preset")]
    Unsupported(f64),
}

impl FromStr for AnglePreset {
    type Err = ParseAngleError;

    /// Accepts `Free` (any case) or a degree value with an optional trailing `°`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("free") {
            return Ok(AnglePreset::Free);
        }
        let number = trimmed.trim_end_matches('°').trim_end();
        let degrees: f64 = number
            .parse()
            .map_err(|_| ParseAngleError::NotAnAngle(trimmed.to_string()))?;
        AnglePreset::ALL
            .into_iter()
            .find(|preset| preset.degrees() == Some(degrees))
            .ok_or(ParseAngleError::Unsupported(degrees))
    }
}
