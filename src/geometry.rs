//! Outline geometry for tube cross-sections.
//!
//! A tube's outline is described in its own local frame (centered at the origin,
//! unrotated) as a [`TubeShape`], and placed in the canvas by a rigid [`Transform`].
//! Fill rendering and hit-testing both go through [`WorldOutline`], so they always
//! agree on what counts as "inside".

use std::ops::{Add, Sub};

/// A point (or displacement) in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate, growing to the right
    pub x: f64,
    /// Vertical coordinate, growing downwards
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a point from its coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Signed angle in radians of the vector from `origin` to `self`, in `(-π, π]`.
    pub fn angle_from(self, origin: Point) -> f64 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Four corners of a convex quadrilateral, clockwise on screen (y pointing down).
pub type Quad = [Point; 4];

/// Local-space outline of a tube, centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TubeShape {
    /// Non-positive length or width: nothing to draw or hit.
    Empty,
    /// Walls too thick for a hole to remain.
    Solid {
        /// Half of the outer length
        half_length: f64,
        /// Half of the outer width
        half_width: f64,
    },
    /// Outer rectangle minus a concentric inner rectangle.
    Framed {
        /// Half of the outer length
        half_length: f64,
        /// Half of the outer width
        half_width: f64,
        /// Half of the inner (hole) length, never larger than `half_length`
        inner_half_length: f64,
        /// Half of the inner (hole) width, never larger than `half_width`
        inner_half_width: f64,
    },
}

impl TubeShape {
    /// Builds the outline for the given outer size and wall thickness.
    ///
    /// The hole is only cut when both `length - 2 * thickness` and
    /// `width - 2 * thickness` are positive. A negative thickness makes the hole
    /// swallow the whole rectangle, which leaves a zero-area frame.
    pub fn from_dimensions(length: f64, width: f64, thickness: f64) -> Self {
        if !(length > 0.0 && width > 0.0) {
            return TubeShape::Empty;
        }

        let half_length = length / 2.0;
        let half_width = width / 2.0;
        let inner_length = length - thickness * 2.0;
        let inner_width = width - thickness * 2.0;

        if inner_length > 0.0 && inner_width > 0.0 {
            TubeShape::Framed {
                half_length,
                half_width,
                inner_half_length: (inner_length / 2.0).min(half_length),
                inner_half_width: (inner_width / 2.0).min(half_width),
            }
        } else {
            TubeShape::Solid {
                half_length,
                half_width,
            }
        }
    }

    /// Filled area of the outline.
    pub fn area(&self) -> f64 {
        match *self {
            TubeShape::Empty => 0.0,
            TubeShape::Solid {
                half_length,
                half_width,
            } => 4.0 * half_length * half_width,
            TubeShape::Framed {
                half_length,
                half_width,
                inner_half_length,
                inner_half_width,
            } => 4.0 * (half_length * half_width - inner_half_length * inner_half_width),
        }
    }

    /// Whether a local-space point lies on the filled part of the outline.
    ///
    /// The outer boundary counts as inside, the inner boundary belongs to the frame.
    pub fn contains(&self, local: Point) -> bool {
        if self.area() <= 0.0 {
            return false;
        }
        match *self {
            TubeShape::Empty => false,
            TubeShape::Solid {
                half_length,
                half_width,
            } => local.x.abs() <= half_length && local.y.abs() <= half_width,
            TubeShape::Framed {
                half_length,
                half_width,
                inner_half_length,
                inner_half_width,
            } => {
                let in_outer = local.x.abs() <= half_length && local.y.abs() <= half_width;
                let in_hole =
                    local.x.abs() < inner_half_length && local.y.abs() < inner_half_width;
                in_outer && !in_hole
            }
        }
    }

    /// Outer boundary corners, or `None` for an empty shape.
    pub fn outer_ring(&self) -> Option<Quad> {
        match *self {
            TubeShape::Empty => None,
            TubeShape::Solid {
                half_length,
                half_width,
            }
            | TubeShape::Framed {
                half_length,
                half_width,
                ..
            } => Some(rect_corners(half_length, half_width)),
        }
    }

    /// Hole boundary corners, present only for framed shapes.
    pub fn inner_ring(&self) -> Option<Quad> {
        match *self {
            TubeShape::Framed {
                inner_half_length,
                inner_half_width,
                ..
            } => Some(rect_corners(inner_half_length, inner_half_width)),
            _ => None,
        }
    }

    /// Convex pieces whose union is exactly the filled area.
    ///
    /// A framed outline is split into top and bottom bands spanning the full length,
    /// plus left and right bands between them.
    pub fn fill_quads(&self) -> Vec<Quad> {
        match *self {
            TubeShape::Empty => Vec::new(),
            TubeShape::Solid {
                half_length,
                half_width,
            } => vec![rect_corners(half_length, half_width)],
            TubeShape::Framed {
                half_length: hl,
                half_width: hw,
                inner_half_length: il,
                inner_half_width: iw,
            } => vec![
                // top
                [
                    Point::new(-hl, -hw),
                    Point::new(hl, -hw),
                    Point::new(hl, -iw),
                    Point::new(-hl, -iw),
                ],
                // bottom
                [
                    Point::new(-hl, iw),
                    Point::new(hl, iw),
                    Point::new(hl, hw),
                    Point::new(-hl, hw),
                ],
                // left
                [
                    Point::new(-hl, -iw),
                    Point::new(-il, -iw),
                    Point::new(-il, iw),
                    Point::new(-hl, iw),
                ],
                // right
                [
                    Point::new(il, -iw),
                    Point::new(hl, -iw),
                    Point::new(hl, iw),
                    Point::new(il, iw),
                ],
            ],
        }
    }
}

fn rect_corners(half_length: f64, half_width: f64) -> Quad {
    [
        Point::new(-half_length, -half_width),
        Point::new(half_length, -half_width),
        Point::new(half_length, half_width),
        Point::new(-half_length, half_width),
    ]
}

/// Rigid placement: rotate about the local origin, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Where the local origin lands in the canvas
    pub translation: Point,
    /// Rotation in radians; any real value, only its value modulo 2π matters
    pub rotation: f64,
}

impl Transform {
    /// Maps a local-space point into canvas space.
    pub fn apply(&self, local: Point) -> Point {
        let (sin, cos) = self.rotation.sin_cos();
        Point::new(
            local.x * cos - local.y * sin + self.translation.x,
            local.x * sin + local.y * cos + self.translation.y,
        )
    }

    /// Maps a canvas-space point back into local space.
    pub fn invert(&self, world: Point) -> Point {
        let (sin, cos) = self.rotation.sin_cos();
        let d = world - self.translation;
        Point::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos)
    }

    fn apply_quad(&self, quad: Quad) -> Quad {
        quad.map(|p| self.apply(p))
    }
}

/// A tube outline placed in the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldOutline {
    /// Local-space shape
    pub shape: TubeShape,
    /// Local-to-canvas placement
    pub transform: Transform,
}

impl WorldOutline {
    /// Whether a canvas-space point lies on the filled outline.
    pub fn contains(&self, point: Point) -> bool {
        self.shape.contains(self.transform.invert(point))
    }

    /// Filled area; rigid transforms preserve it.
    pub fn area(&self) -> f64 {
        self.shape.area()
    }

    /// Outer boundary in canvas space.
    pub fn outer_ring(&self) -> Option<Quad> {
        self.shape.outer_ring().map(|q| self.transform.apply_quad(q))
    }

    /// Hole boundary in canvas space.
    pub fn inner_ring(&self) -> Option<Quad> {
        self.shape.inner_ring().map(|q| self.transform.apply_quad(q))
    }

    /// Convex fill pieces in canvas space.
    pub fn fill_quads(&self) -> Vec<Quad> {
        self.shape
            .fill_quads()
            .into_iter()
            .map(|q| self.transform.apply_quad(q))
            .collect()
    }
}
