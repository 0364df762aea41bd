//! 2D geometry used by scene nodes and layout.
//!
//! All coordinates are f32 scene units. Directions follow the usual screen
//! convention of the playback engines we target: +y is up, +x is right, and the
//! diagonal constants (`UL`, `UR`, ...) are the unnormalized sums of their axes.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

const SIGN_EPS: f32 = 1e-6;

/// Point or displacement in scene space.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ORIGIN: Vec2 = Vec2::new(0.0, 0.0);
    pub const UP: Vec2 = Vec2::new(0.0, 1.0);
    pub const DOWN: Vec2 = Vec2::new(0.0, -1.0);
    pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
    pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);
    pub const UL: Vec2 = Vec2::new(-1.0, 1.0);
    pub const UR: Vec2 = Vec2::new(1.0, 1.0);
    pub const DL: Vec2 = Vec2::new(-1.0, -1.0);
    pub const DR: Vec2 = Vec2::new(1.0, -1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `radians` from the +x axis, counter-clockwise.
    #[inline]
    pub fn from_angle(radians: f32) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    #[inline]
    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    /// Angle of this vector from the +x axis in radians, in (-pi, pi].
    #[inline]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Unit-length copy; the zero vector stays zero.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            self
        } else {
            self * (1.0 / len)
        }
    }

    /// Componentwise sign with a small dead zone around zero.
    pub fn signum(self) -> Self {
        Self::new(sign0(self.x), sign0(self.y))
    }

    pub fn approx_eq(self, other: Vec2, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    /// Scale this point about `pivot`.
    #[inline]
    pub fn scale_about(self, pivot: Vec2, factor: f32) -> Self {
        pivot + (self - pivot) * factor
    }
}

fn sign0(v: f32) -> f32 {
    if v > SIGN_EPS {
        1.0
    } else if v < -SIGN_EPS {
        -1.0
    } else {
        0.0
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Axis-aligned bounding box described by its center and extents.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Bounds {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.height / 2.0
    }

    /// Point on the box boundary selected by the sign of each component of
    /// `direction` (edge midpoints for axis directions, corners for diagonals).
    pub fn critical_point(&self, direction: Vec2) -> Vec2 {
        let s = direction.signum();
        Vec2::new(
            self.center.x + s.x * self.width / 2.0,
            self.center.y + s.y * self.height / 2.0,
        )
    }

    /// Center a box of this size must move to so that it sits beside `target`
    /// along `direction`, `buff` units away.
    pub fn next_to(&self, target: &Bounds, direction: Vec2, buff: f32) -> Vec2 {
        let target_point = target.critical_point(direction);
        let align_point = self.critical_point(-direction);
        self.center + (target_point - align_point) + direction * buff
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let left = self.left().min(other.left());
        let right = self.right().max(other.right());
        let bottom = self.bottom().min(other.bottom());
        let top = self.top().max(other.top());
        Bounds::new(
            Vec2::new((left + right) / 2.0, (bottom + top) / 2.0),
            right - left,
            top - bottom,
        )
    }

    /// Union over an iterator; `None` when empty.
    pub fn enclosing<I>(iter: I) -> Option<Bounds>
    where
        I: IntoIterator<Item = Bounds>,
    {
        iter.into_iter().reduce(|acc, b| acc.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_to_places_edge_to_edge() {
        let target = Bounds::new(Vec2::ORIGIN, 2.0, 1.0);
        let me = Bounds::new(Vec2::new(5.0, 5.0), 0.5, 0.5);
        let c = me.next_to(&target, Vec2::DOWN, 0.25);
        assert!(c.approx_eq(Vec2::new(0.0, -0.5 - 0.25 - 0.25), 1e-6));
        let c = me.next_to(&target, Vec2::RIGHT, 0.0);
        assert!(c.approx_eq(Vec2::new(1.25, 0.0), 1e-6));
    }

    #[test]
    fn diagonal_critical_point_is_corner() {
        let b = Bounds::new(Vec2::new(1.0, 1.0), 2.0, 4.0);
        assert_eq!(b.critical_point(Vec2::UR), Vec2::new(2.0, 3.0));
        assert_eq!(b.critical_point(Vec2::DL), Vec2::new(0.0, -1.0));
        assert_eq!(b.critical_point(Vec2::ORIGIN), b.center);
    }

    #[test]
    fn union_covers_both() {
        let a = Bounds::new(Vec2::ORIGIN, 1.0, 1.0);
        let b = Bounds::new(Vec2::new(3.0, 0.0), 1.0, 3.0);
        let u = a.union(&b);
        assert_eq!(u.left(), -0.5);
        assert_eq!(u.right(), 3.5);
        assert_eq!(u.top(), 1.5);
        assert_eq!(u.bottom(), -1.5);
    }
}
