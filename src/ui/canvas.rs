//! Canvas pointer interaction.
//!
//! Translates raw egui pointer input into press, drag and release events in canvas
//! coordinates and runs the gesture state machine on them: a press selects the
//! topmost tube under the pointer and, on a hit, starts a drag; each move either
//! translates or rotates that tube; release ends the drag but keeps the selection.

use super::state::TubeDesignerApp;
use crate::geometry::Point;
use crate::gesture::{DragGesture, DragMode};
use eframe::egui;

impl TubeDesignerApp {
    /// Converts a screen position into canvas coordinates (origin at the canvas' top-left).
    pub fn screen_to_canvas(canvas_rect: egui::Rect, screen_pos: egui::Pos2) -> Point {
        let local = screen_pos - canvas_rect.min;
        Point::new(local.x as f64, local.y as f64)
    }

    /// Converts a canvas position back into screen space.
    pub fn canvas_to_screen(canvas_rect: egui::Rect, point: Point) -> egui::Pos2 {
        canvas_rect.min + egui::vec2(point.x as f32, point.y as f32)
    }

    /// Feeds this frame's primary-button pointer input into the gesture state machine.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `response` - The response from the canvas widget
    pub fn handle_tube_pointer(&mut self, ui: &egui::Ui, response: &egui::Response) {
        let canvas_rect = response.rect;
        let (pressed, released, moved, shift_held, pointer_pos) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
                i.modifiers.shift,
                i.pointer.interact_pos(),
            )
        });

        // Presses on popups layered over the canvas are not canvas presses
        if pressed {
            if let Some(pos) = pointer_pos.filter(|_| response.contains_pointer()) {
                self.pointer_pressed(Self::screen_to_canvas(canvas_rect, pos));
            }
        } else if moved && self.interaction.is_dragging() {
            // A move coalesced with the release arrives after the button is already up;
            // apply it before the release below ends the gesture.
            if let Some(pos) = pointer_pos {
                self.pointer_dragged(Self::screen_to_canvas(canvas_rect, pos), shift_held);
            }
        }

        if released {
            self.pointer_released();
        }
    }

    /// Handles a primary-button press at `point`.
    ///
    /// Selects the topmost tube under the pointer, or clears the selection on a miss.
    /// A hit records an undo snapshot and captures the tube for the drag that follows.
    pub fn pointer_pressed(&mut self, point: Point) {
        let hit = self.scene.topmost_hit(point);
        self.scene.select(hit);

        self.interaction.gesture = None;
        if let Some(index) = hit {
            self.undo_history.snapshot(&self.scene);
            let original = self.scene.tubes[index];
            log::debug!("Drag started on tube {index} at ({:.1}, {:.1})", point.x, point.y);
            self.interaction.gesture = Some(DragGesture::new(index, original, point));
        }
    }

    /// Handles pointer motion with the primary button held.
    ///
    /// The mode is decided per event from the shift key and the current angle mode.
    pub fn pointer_dragged(&mut self, point: Point, shift_held: bool) {
        let Some(gesture) = self.interaction.gesture else {
            return;
        };
        let mode = DragMode::resolve(shift_held, self.angle_mode);
        if let Some(tube) = self.scene.tubes.get_mut(gesture.index) {
            gesture.apply(mode, point, tube);
        }
    }

    /// Ends the current gesture. The selection is kept.
    pub fn pointer_released(&mut self) {
        if let Some(gesture) = self.interaction.gesture.take() {
            log::debug!("Drag finished on tube {}", gesture.index);
        }
    }
}
