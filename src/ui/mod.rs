//! User interface components and interaction logic for the tube joint designer.
//!
//! # Module Organization
//!
//! - `state` - The main `TubeDesignerApp` struct and persisted preferences
//! - `undo` - Snapshot-based undo history
//! - `canvas` - Pointer handling and the drag gesture state machine
//! - `rendering` - Drawing tubes on the canvas

mod canvas;
mod rendering;
mod state;
mod undo;

pub use state::{InteractionState, TubeDesignerApp, APP_STATE_KEY};
pub use undo::{Snapshot, UndoHistory};

use crate::constants::*;
use crate::geometry::Point;
use crate::types::*;
use eframe::egui;

impl eframe::App for TubeDesignerApp {
    /// Persist UI preferences between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.to_json() {
            Ok(json) => {
                storage.set_string(APP_STATE_KEY, json);
            }
            Err(err) => {
                log::error!("Failed to serialize app state: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    ///
    /// Lays out the control panel along the bottom edge and the canvas in the
    /// remaining space.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        self.handle_undo_keys(ctx);

        // Restore native window size once per session, then track it for the next save
        if !self.applied_viewport_restore {
            if let Some((w, h)) = self.window_inner_size {
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(egui::vec2(w, h)));
            }
            self.applied_viewport_restore = true;
        }
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.window_inner_size = Some((rect.width(), rect.height()));
        }

        egui::TopBottomPanel::bottom("control_panel").show(ctx, |ui| {
            self.draw_controls(ui);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.draw_canvas(ui);
            });
    }
}

impl TubeDesignerApp {
    /// Draws the angle selector and command buttons.
    pub fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Angle:");
            let mut current = self.angle_mode;
            let mut chosen = None;
            egui::ComboBox::from_id_salt("angle_preset_combo")
                .selected_text(current.label())
                .show_ui(ui, |ui| {
                    for preset in AnglePreset::ALL {
                        if ui.selectable_value(&mut current, preset, preset.label()).clicked() {
                            chosen = Some(preset);
                        }
                    }
                });
            // Re-choosing the current preset applies it again
            if let Some(preset) = chosen {
                self.apply_angle_preset(preset);
            }

            if ui.button("Add Tube").clicked() {
                self.add_default_tube();
            }

            ui.add_enabled_ui(self.undo_history.can_undo(), |ui| {
                if ui.button("Undo").clicked() {
                    self.perform_undo();
                }
            });

            ui.separator();
            ui.checkbox(&mut self.dark_mode, "Dark mode");
        });
    }

    /// Allocates the canvas, processes pointer input on it, then paints the scene.
    pub fn draw_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        self.canvas_size = response.rect.size();

        self.handle_tube_pointer(ui, &response);

        self.render_tubes(&painter, response.rect);
    }

    /// Handles the Cmd/Ctrl+Z undo shortcut.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context for checking input
    fn handle_undo_keys(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Z) && i.modifiers.command) {
            self.perform_undo();
        }
    }

    /// Records an undo snapshot, then appends `tube` on top and selects it.
    ///
    /// # Returns
    ///
    /// The slot of the new tube.
    pub fn add_tube(&mut self, tube: Tube) -> TubeIndex {
        self.undo_history.snapshot(&self.scene);
        let index = self.scene.push_tube(tube);
        log::info!(
            "Added tube {index} at ({:.1}, {:.1})",
            tube.center.x,
            tube.center.y
        );
        index
    }

    /// Adds a tube with the default geometry centered in the canvas.
    pub fn add_default_tube(&mut self) -> TubeIndex {
        let center = Point::new(
            (self.canvas_size.x / 2.0) as f64,
            (self.canvas_size.y / 2.0) as f64,
        );
        self.add_tube(Tube::new(
            center,
            DEFAULT_TUBE_LENGTH,
            DEFAULT_TUBE_WIDTH,
            DEFAULT_TUBE_THICKNESS,
        ))
    }

    /// Reverts the scene to the state before the latest action.
    ///
    /// Does nothing once only the initial state remains. The selection and any drag in
    /// progress are dropped since their slots may no longer exist.
    pub fn perform_undo(&mut self) {
        if let Some(snapshot) = self.undo_history.undo() {
            self.scene.restore(snapshot.tubes());
            self.interaction.gesture = None;
            log::info!("Undo: {} tube(s) restored", self.scene.len());
        }
    }

    /// Sets the angle mode and, for a fixed preset, snaps the selected tube to it.
    ///
    /// `Free` only changes how later shift-drags behave. A fixed preset records an
    /// undo snapshot and overwrites the selected tube's rotation.
    pub fn apply_angle_preset(&mut self, preset: AnglePreset) {
        self.angle_mode = preset;
        let Some(radians) = preset.radians() else {
            return;
        };
        if self.scene.selected_tube().is_none() {
            return;
        }
        self.undo_history.snapshot(&self.scene);
        if let Some(tube) = self.scene.selected_tube_mut() {
            tube.rotation = radians;
        }
        log::info!("Applied angle preset {preset}");
    }

    /// Parses a selector label and applies it like [`Self::apply_angle_preset`].
    pub fn apply_angle_label(&mut self, label: &str) -> Result<(), ParseAngleError> {
        let preset: AnglePreset = label.parse()?;
        self.apply_angle_preset(preset);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
