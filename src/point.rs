use num::Integer;
use serde::{Deserialize, Serialize};
use std::cmp::{max, min};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D integer lattice point. Used both as an absolute position and as a relative offset.
///
/// Ordering is lexicographic on `(x, y)`, which is also the column order of canonical state
/// matrices.
#[derive(
    Copy, Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Point> for [i32; 2] {
    fn from(p: Point) -> [i32; 2] {
        [p.x, p.y]
    }
}

impl From<[i32; 2]> for Point {
    fn from(other: [i32; 2]) -> Self {
        Point::new(other[0], other[1])
    }
}

impl From<(i32, i32)> for Point {
    fn from(other: (i32, i32)) -> Self {
        let (x, y) = other;

        Point::new(x, y)
    }
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        [0, 0].into()
    }

    pub fn map_components(&self, f: &impl Fn(i32) -> i32) -> Self {
        [f(self.x), f(self.y)].into()
    }

    /// Componentwise maximum.
    pub fn join(&self, other: &Self) -> Self {
        [max(self.x, other.x), max(self.y, other.y)].into()
    }

    /// Componentwise minimum.
    pub fn meet(&self, other: &Self) -> Self {
        [min(self.x, other.x), min(self.y, other.y)].into()
    }

    /// Chebyshev (L-infinity) norm, the radius of the smallest square window containing `self`.
    pub fn chebyshev_norm(&self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    pub fn manhattan_norm(&self) -> i32 {
        self.x.abs() + self.y.abs()
    }

    /// Scales cell coordinates up to world coordinates.
    pub fn to_world(&self, cell_size: i32) -> Self {
        *self * cell_size
    }

    /// Like `to_world`, but returns `None` on overflow.
    pub fn checked_to_world(&self, cell_size: i32) -> Option<Self> {
        self.checked_mul(cell_size)
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        Some([self.x.checked_add(other.x)?, self.y.checked_add(other.y)?].into())
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        Some([self.x.checked_sub(other.x)?, self.y.checked_sub(other.y)?].into())
    }

    pub fn checked_mul(&self, rhs: i32) -> Option<Self> {
        Some([self.x.checked_mul(rhs)?, self.y.checked_mul(rhs)?].into())
    }

    /// The cell containing world point `self`. Uses floor division, so every world point inside a
    /// cell's square maps back to that cell.
    pub fn to_cell(&self, cell_size: i32) -> Self {
        self.map_components(&|c| Integer::div_floor(&c, &cell_size))
    }

    /// Componentwise division rounding toward zero.
    pub fn div_truncate(&self, rhs: i32) -> Self {
        self.map_components(&|c| c / rhs)
    }

    /// Componentwise division rounding toward negative infinity.
    pub fn div_floor(&self, rhs: i32) -> Self {
        self.map_components(&|c| Integer::div_floor(&c, &rhs))
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        [self.x + other.x, self.y + other.y].into()
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        [-self.x, -self.y].into()
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        [self.x - other.x, self.y - other.y].into()
    }
}

impl Mul<i32> for Point {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        [rhs * self.x, rhs * self.y].into()
    }
}
