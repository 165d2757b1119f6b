//! Screen geometry for pointer interactions

use serde::{Deserialize, Serialize};

use crate::task::{TaskId, TaskStatus};

/// A point in view coordinates (pixels, y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.left, self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Same size, moved by `(dx, dy)`
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            left: self.left + dx,
            top: self.top + dy,
            ..*self
        }
    }

    /// Smallest Euclidean distance between any corner of `self` and any
    /// corner of `other`
    pub fn min_corner_distance(&self, other: &Rect) -> f64 {
        let theirs = other.corners();
        self.corners()
            .iter()
            .flat_map(|a| theirs.iter().map(move |b| a.distance(b)))
            .fold(f64::INFINITY, f64::min)
    }
}

/// Measured position of one task card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotLayout {
    pub task_id: TaskId,
    pub rect: Rect,
}

/// Measured position of one column and the cards rendered inside it, top to bottom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayout {
    pub status: TaskStatus,
    pub rect: Rect,
    #[serde(default)]
    pub slots: Vec<SlotLayout>,
}

/// Geometry of every drop container on screen, columns left to right
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    pub columns: Vec<ColumnLayout>,
}

impl Layout {
    pub fn new(columns: Vec<ColumnLayout>) -> Self {
        Self { columns }
    }

    /// Rect of the card for `task_id`, if it is on screen
    pub fn slot_rect(&self, task_id: &TaskId) -> Option<Rect> {
        self.columns
            .iter()
            .flat_map(|c| c.slots.iter())
            .find(|s| s.task_id == *task_id)
            .map(|s| s.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(
            rect.corners(),
            [
                Point::new(10.0, 20.0),
                Point::new(40.0, 20.0),
                Point::new(10.0, 60.0),
                Point::new(40.0, 60.0),
            ]
        );
        assert_eq!(rect.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn test_min_corner_distance_identical_rects_is_zero() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(rect.min_corner_distance(&rect), 0.0);
    }

    #[test]
    fn test_min_corner_distance_picks_closest_pair() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(13.0, 14.0, 10.0, 10.0);
        // bottom-right of a (10,10) to top-left of b (13,14)
        assert_eq!(a.min_corner_distance(&b), 5.0);
        assert_eq!(b.min_corner_distance(&a), 5.0);
    }

    #[test]
    fn test_translate_keeps_size() {
        let rect = Rect::new(0.0, 0.0, 10.0, 20.0).translate(5.0, -5.0);
        assert_eq!(rect, Rect::new(5.0, -5.0, 10.0, 20.0));
    }
}
