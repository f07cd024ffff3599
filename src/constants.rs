//! Shared application-wide constants.
//! Centralizes tweakable values used across UI rendering and interactions.

// Window
/// Window title shown by the native shell.
pub const APP_TITLE: &str = "Tube Joint Designer";
/// Initial window inner size in logical points.
pub const DEFAULT_WINDOW_SIZE: (f32, f32) = (1000.0, 800.0);

// Default tube geometry
/// Length of a freshly added tube in canvas units.
pub const DEFAULT_TUBE_LENGTH: f64 = 200.0;
/// Width of a freshly added tube in canvas units.
pub const DEFAULT_TUBE_WIDTH: f64 = 50.0;
/// Wall thickness of a freshly added tube in canvas units.
pub const DEFAULT_TUBE_THICKNESS: f64 = 5.0;

// Tube rendering
/// Outline stroke width in screen pixels.
pub const TUBE_STROKE_WIDTH: f32 = 1.0;
/// Fill of the selected tube (cyan).
pub const SELECTED_FILL: egui::Color32 = egui::Color32::from_rgb(0, 255, 255);
/// Fill of unselected tubes (light gray).
pub const TUBE_FILL: egui::Color32 = egui::Color32::from_rgb(192, 192, 192);
/// Canvas background in light mode.
pub const CANVAS_BACKGROUND_LIGHT: egui::Color32 = egui::Color32::WHITE;
/// Canvas background in dark mode.
pub const CANVAS_BACKGROUND_DARK: egui::Color32 = egui::Color32::from_rgb(30, 30, 30);
