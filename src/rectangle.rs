// src/rectangle.rs

use druid::{Point, Rect};
use serde::Serialize;
use std::fmt;

/// Sequential rectangle identifier, reset to 0 by `DrawingSession::reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RectId(pub u64);

impl fmt::Display for RectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rect-{}", self.0)
    }
}

/// Opaque 8-bit RGB fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A rectangle anchored on its first click and sized by the pointer.
///
/// `anchor` never moves once created; `corner` is whichever point the
/// pointer last reported, so the drawn bounds work for drags in any direction.
pub struct Rectangle {
    id: RectId,
    anchor: Point,
    corner: Point,
    color: Rgb,
}

impl Rectangle {
    /// A fresh zero-area rectangle at `anchor` (drawing-area coordinates).
    pub fn new(id: RectId, anchor: Point, color: Rgb) -> Self {
        Rectangle { id, anchor, corner: anchor, color }
    }

    pub fn id(&self) -> RectId {
        self.id
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Moves the free corner. The caller has already removed the drawing-area offset.
    pub(crate) fn stretch_to(&mut self, corner: Point) {
        self.corner = corner;
    }

    /// Displayed bounds: top-left is `min(anchor, corner)`, size is `abs(corner - anchor)`.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.anchor, self.corner).abs()
    }

    pub fn width(&self) -> f64 {
        (self.corner.x - self.anchor.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.corner.y - self.anchor.y).abs()
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn contains(&self, point: Point) -> bool {
        let b = self.bounds();
        point.x >= b.x0 && point.x <= b.x1 && point.y >= b.y0 && point.y <= b.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREY: Rgb = Rgb::new(128, 128, 128);

    #[test]
    fn new_rectangle_has_no_area() {
        let r = Rectangle::new(RectId(0), Point::new(10.0, 20.0), GREY);
        assert_eq!(r.area(), 0.0);
        assert_eq!(r.bounds(), Rect::new(10.0, 20.0, 10.0, 20.0));
    }

    #[test]
    fn stretching_up_and_left_keeps_positive_size() {
        let mut r = Rectangle::new(RectId(3), Point::new(50.0, 50.0), GREY);
        r.stretch_to(Point::new(20.0, 10.0));
        assert_eq!(r.bounds(), Rect::new(20.0, 10.0, 50.0, 50.0));
        assert_eq!(r.width(), 30.0);
        assert_eq!(r.height(), 40.0);
        assert_eq!(r.area(), 1200.0);
        assert_eq!(r.anchor(), Point::new(50.0, 50.0));
    }

    #[test]
    fn contains_includes_edges() {
        let mut r = Rectangle::new(RectId(0), Point::new(0.0, 0.0), GREY);
        r.stretch_to(Point::new(10.0, 10.0));
        assert!(r.contains(Point::new(0.0, 10.0)));
        assert!(r.contains(Point::new(5.0, 5.0)));
        assert!(!r.contains(Point::new(10.5, 5.0)));
    }

    #[test]
    fn id_display() {
        assert_eq!(RectId(7).to_string(), "rect-7");
    }
}
