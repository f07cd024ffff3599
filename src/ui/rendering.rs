//! Canvas rendering for tubes.
//!
//! Each tube is filled as one unfeathered mesh built from its convex quads (the same
//! pieces hit-testing is defined on), so the bands meet without seams, and is then
//! outlined along its outer and inner boundaries, where the strokes antialias the edges.

use super::state::TubeDesignerApp;
use crate::constants::*;
use crate::geometry::Quad;
use eframe::egui;

impl TubeDesignerApp {
    /// Paints the canvas background and every tube, bottom to top.
    ///
    /// # Arguments
    ///
    /// * `painter` - The egui painter for drawing operations
    /// * `canvas_rect` - The screen-space rectangle of the canvas area
    pub fn render_tubes(&self, painter: &egui::Painter, canvas_rect: egui::Rect) {
        let background = if self.dark_mode {
            CANVAS_BACKGROUND_DARK
        } else {
            CANVAS_BACKGROUND_LIGHT
        };
        painter.rect_filled(canvas_rect, 0.0, background);
        painter.extend(self.tube_shapes(canvas_rect));
    }

    /// Builds the paint list for all tubes, the selected one filled in the highlight color.
    pub fn tube_shapes(&self, canvas_rect: egui::Rect) -> Vec<egui::Shape> {
        let outline_color = if self.dark_mode {
            egui::Color32::from_gray(230)
        } else {
            egui::Color32::BLACK
        };
        let stroke = egui::Stroke::new(TUBE_STROKE_WIDTH, outline_color);
        let to_screen = |quad: Quad| -> Vec<egui::Pos2> {
            quad.iter()
                .map(|p| Self::canvas_to_screen(canvas_rect, *p))
                .collect()
        };

        let mut shapes = Vec::new();
        for (index, tube) in self.scene.tubes.iter().enumerate() {
            let outline = tube.world_outline();
            let fill = if self.scene.selected() == Some(index) {
                SELECTED_FILL
            } else {
                TUBE_FILL
            };

            let mut mesh = egui::Mesh::default();
            for quad in outline.fill_quads() {
                let base = mesh.vertices.len() as u32;
                for corner in to_screen(quad) {
                    mesh.colored_vertex(corner, fill);
                }
                mesh.add_triangle(base, base + 1, base + 2);
                mesh.add_triangle(base, base + 2, base + 3);
            }
            if !mesh.is_empty() {
                shapes.push(egui::Shape::mesh(mesh));
            }
            for ring in [outline.outer_ring(), outline.inner_ring()].into_iter().flatten() {
                shapes.push(egui::Shape::closed_line(to_screen(ring), stroke));
            }
        }
        shapes
    }
}
