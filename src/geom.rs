//! Plain 2-D geometry: points, vectors, sizes, rectangles and edge insets.
//!
//! Coordinates grow rightwards and downwards. Rectangles are stored as an
//! origin (top-left corner) plus a non-negative size.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use std::ops::{Add, AddAssign, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point in either page or canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    #[must_use]
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub fn scaled(self, k: f64) -> Vector {
        Vector::new(self.dx * k, self.dy * k)
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.dx, self.y + v.dy)
    }
}

impl Sub<Vector> for Point {
    type Output = Point;

    fn sub(self, v: Vector) -> Point {
        Point::new(self.x - v.dx, self.y - v.dy)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.dx + other.dx, self.dy + other.dy)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Vector) {
        self.dx += other.dx;
        self.dy += other.dy;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.dx - other.dx, self.dy - other.dy)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.dx, -self.dy)
    }
}

/// Width and height of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Self = Self { width: 0.0, height: 0.0 };

    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Grow each dimension up to `min`; dimensions already at least `min` are kept.
    #[must_use]
    pub fn max(self, min: Size) -> Size {
        Size::new(self.width.max(min.width), self.height.max(min.height))
    }
}

/// Per-side distances used to grow or shrink a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    #[must_use]
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }

    #[must_use]
    pub fn uniform(d: f64) -> Self {
        Self::new(d, d, d, d)
    }

    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// The degenerate rectangle at the origin.
    pub const ZERO: Self = Self { origin: Point::ZERO, size: Size::ZERO };

    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { origin: Point::new(x, y), size: Size::new(width, height) }
    }

    #[must_use]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// The rectangle spanned by two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let min_x = a.x.min(b.x);
        let min_y = a.y.min(b.y);
        Self::new(min_x, min_y, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    #[must_use]
    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    #[must_use]
    pub fn mid_y(&self) -> f64 {
        self.origin.y + self.size.height / 2.0
    }

    #[must_use]
    pub fn mid(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// The same size placed at the origin.
    #[must_use]
    pub fn local_bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.size)
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom edges are not.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x < self.max_x() && p.y >= self.min_y() && p.y < self.max_y()
    }

    /// Closed containment: every edge counts as inside.
    #[must_use]
    pub fn contains_inclusive(&self, p: Point) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Whether the two rectangles share any interior area.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Grow every side by `d`.
    #[must_use]
    pub fn outset(&self, d: f64) -> Rect {
        self.outset_by(Insets::uniform(d))
    }

    #[must_use]
    pub fn outset_by(&self, insets: Insets) -> Rect {
        Rect::new(
            self.origin.x - insets.left,
            self.origin.y - insets.top,
            self.size.width + insets.horizontal(),
            self.size.height + insets.vertical(),
        )
    }

    /// Shrink every side by `d`. Sizes never go negative.
    #[must_use]
    pub fn inset(&self, d: f64) -> Rect {
        self.inset_by(Insets::uniform(d))
    }

    #[must_use]
    pub fn inset_by(&self, insets: Insets) -> Rect {
        Rect::new(
            self.origin.x + insets.left,
            self.origin.y + insets.top,
            (self.size.width - insets.horizontal()).max(0.0),
            (self.size.height - insets.vertical()).max(0.0),
        )
    }

    #[must_use]
    pub fn translate(&self, v: Vector) -> Rect {
        Rect::from_origin_size(self.origin + v, self.size)
    }

    /// Snap outwards to whole units: origin floored, far edges ceiled.
    #[must_use]
    pub fn integral(&self) -> Rect {
        let min_x = self.min_x().floor();
        let min_y = self.min_y().floor();
        let max_x = self.max_x().ceil();
        let max_y = self.max_y().ceil();
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}
