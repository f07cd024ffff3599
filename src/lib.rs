//! # Tube Joint Designer
//!
//! An interactive 2D editor for laying out rectangular tube cross-sections, meant for
//! quick visual prototyping of tube-joint layouts.
//!
//! ## Features
//! - Hollow (or solid, when the walls meet) rectangular tubes with position, size,
//!   wall thickness and rotation
//! - Click to select the topmost tube, drag to move it
//! - Shift-drag to rotate it while the angle selector is set to `Free`
//! - Fixed angle presets (0°, 30°, 45°, 90°, 135°) for the selected tube
//! - Linear undo of every add, drag and preset change

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod constants;
mod geometry;
mod gesture;
mod types;
mod ui;

// Re-export public types and functions
pub use geometry::*;
pub use gesture::*;
pub use types::*;
pub use ui::{InteractionState, Snapshot, TubeDesignerApp, UndoHistory};

/// Runs the tube designer application with default settings.
///
/// This function opens the native window and starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use tube_joint_designer::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(constants::APP_TITLE)
            .with_inner_size(constants::DEFAULT_WINDOW_SIZE),
        ..Default::default()
    };
    eframe::run_native(
        constants::APP_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(TubeDesignerApp::new(cc)))),
    )
}
