//! Application state management structures.
//!
//! This module contains the main application struct, which owns the scene, the undo
//! history and the in-progress gesture, plus the UI preferences persisted between runs.

use super::undo::UndoHistory;
use crate::gesture::DragGesture;
use crate::types::*;
use eframe::egui;
use serde::{Deserialize, Serialize};

/// Storage key under which the persisted app state is saved.
pub const APP_STATE_KEY: &str = "app_state";

/// State related to pointer interaction with tubes.
#[derive(Debug, Default)]
pub struct InteractionState {
    /// Drag in progress, captured on press over a tube and cleared on release
    pub gesture: Option<DragGesture>,
}

impl InteractionState {
    /// Returns true while a press-drag-release gesture is active.
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }
}

/// The main application structure containing UI state and the tube scene.
///
/// Only the UI preferences are serialized; the scene, its history and the angle mode
/// start fresh on every launch.
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct TubeDesignerApp {
    /// The tubes being edited plus the selection
    #[serde(skip)]
    pub scene: Scene,
    /// Snapshots for undo, seeded with the empty scene
    #[serde(skip)]
    pub undo_history: UndoHistory,
    /// Pointer gesture state
    #[serde(skip)]
    pub interaction: InteractionState,
    /// Current value of the angle selector
    #[serde(skip)]
    pub angle_mode: AnglePreset,
    /// Size of the canvas during the last frame, used to center new tubes
    #[serde(skip)]
    pub canvas_size: egui::Vec2,
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
    /// Persisted last known window inner size in logical points (desktop only)
    pub window_inner_size: Option<(f32, f32)>,
    /// Whether we've already applied the stored window geometry this session
    #[serde(skip)]
    pub applied_viewport_restore: bool,
}

impl Default for TubeDesignerApp {
    fn default() -> Self {
        let scene = Scene::new();
        let undo_history = UndoHistory::new(&scene);
        let (width, height) = crate::constants::DEFAULT_WINDOW_SIZE;
        Self {
            scene,
            undo_history,
            interaction: InteractionState::default(),
            angle_mode: AnglePreset::Free,
            canvas_size: egui::vec2(width, height),
            dark_mode: false,
            window_inner_size: None,
            applied_viewport_restore: false,
        }
    }
}

impl TubeDesignerApp {
    /// Creates the app, restoring persisted preferences when storage has them.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let restored = cc
            .storage
            .and_then(|storage| storage.get_string(APP_STATE_KEY))
            .and_then(|json| match Self::from_json(&json) {
                Ok(app) => Some(app),
                Err(err) => {
                    log::warn!("Ignoring unreadable saved state: {err}");
                    None
                }
            });
        restored.unwrap_or_default()
    }

    /// Serializes the persisted part of the application state to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes application state from JSON; skipped fields start fresh.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
