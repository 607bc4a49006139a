//! Axis-aligned geometry for bricks, paddle and ball bounds
//!
//! Screen space: origin top-left, x grows right, y grows down.
//! - `Rect`: axis-aligned box (top-left origin, non-negative size)
//! - `Direction`: compass face / grid offset (N = up, S = down)
//! - `Faces`: closed set of directions, stored as a bitmask

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 1-D interval overlap: `[a0, a1)` against `[b0, b1)`.
///
/// Strict on both ends, so intervals that only touch do not overlap.
#[inline]
pub fn overlaps(a0: f32, a1: f32, b0: f32, b1: f32) -> bool {
    a1 > b0 && b1 > a0
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self {
            x: center.x - radius,
            y: center.y - radius,
            w: radius * 2.0,
            h: radius * 2.0,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Overlap on the X axis only
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        overlaps(self.left(), self.right(), other.left(), other.right())
    }

    /// Overlap on the Y axis only
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        overlaps(self.top(), self.bottom(), other.top(), other.bottom())
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// Collision axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Compass direction, doubling as a rectangle face label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Top edge / previous row
    N,
    /// Bottom edge / next row
    S,
    /// Left edge / previous column
    W,
    /// Right edge / next column
    E,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::N, Direction::S, Direction::W, Direction::E];

    /// Velocity component a bounce off this face flips
    pub fn axis(self) -> Axis {
        match self {
            Direction::N | Direction::S => Axis::Y,
            Direction::W | Direction::E => Axis::X,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::W => Direction::E,
            Direction::E => Direction::W,
        }
    }

    /// Grid offset as (row delta, col delta)
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::N => (-1, 0),
            Direction::S => (1, 0),
            Direction::W => (0, -1),
            Direction::E => (0, 1),
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::N => 0b0001,
            Direction::S => 0b0010,
            Direction::W => 0b0100,
            Direction::E => 0b1000,
        }
    }
}

/// Set of rectangle faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Faces(u8);

impl Faces {
    pub const NONE: Faces = Faces(0);

    pub fn insert(&mut self, dir: Direction) {
        self.0 |= dir.bit();
    }

    pub fn with(mut self, dir: Direction) -> Self {
        self.insert(dir);
        self
    }

    pub fn contains(&self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Faces in N, S, W, E order
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl From<Direction> for Faces {
    fn from(dir: Direction) -> Self {
        Faces::NONE.with(dir)
    }
}

impl FromIterator<Direction> for Faces {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut faces = Faces::NONE;
        for dir in iter {
            faces.insert(dir);
        }
        faces
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        assert!(!overlaps(0.0, 10.0, 10.0, 20.0));
        assert!(overlaps(0.0, 10.01, 10.0, 20.0));
    }

    #[test]
    fn test_around_circle() {
        let r = Rect::around_circle(Vec2::new(300.0, 300.0), 12.0);
        assert_eq!(r, Rect::new(288.0, 288.0, 24.0, 24.0));
        assert_eq!(r.center(), Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_direction_axis_and_opposite() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.opposite().axis(), dir.axis());
        }
        assert_eq!(Direction::N.axis(), Axis::Y);
        assert_eq!(Direction::E.axis(), Axis::X);
    }

    #[test]
    fn test_faces_set() {
        let mut faces = Faces::default();
        assert!(faces.is_empty());

        faces.insert(Direction::E);
        faces.insert(Direction::N);
        faces.insert(Direction::N);

        assert_eq!(faces.len(), 2);
        assert!(faces.contains(Direction::N));
        assert!(!faces.contains(Direction::S));
        assert_eq!(faces.iter().collect::<Vec<_>>(), vec![Direction::N, Direction::E]);

        let collected: Faces = [Direction::W, Direction::S].into_iter().collect();
        assert_eq!(collected, Faces::from(Direction::S).with(Direction::W));
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(
            a0 in -1000.0f32..1000.0,
            a_len in 0.0f32..500.0,
            b0 in -1000.0f32..1000.0,
            b_len in 0.0f32..500.0,
        ) {
            let (a1, b1) = (a0 + a_len, b0 + b_len);
            prop_assert_eq!(overlaps(a0, a1, b0, b1), overlaps(b0, b1, a0, a1));
        }

        #[test]
        fn prop_rect_intersection_is_symmetric(
            ax in 0.0f32..600.0, ay in 0.0f32..600.0, aw in 0.0f32..100.0, ah in 0.0f32..100.0,
            bx in 0.0f32..600.0, by in 0.0f32..600.0, bw in 0.0f32..100.0, bh in 0.0f32..100.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
