//! World-space projection for pointy-top hex cells.

use std::fmt;
use std::ops::{Add, Sub};

use crate::geom::{Axial, FracAxial};

const SQRT_3: f32 = 1.732_050_8;

/// A 2D world-space position (ground plane).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
}

impl WorldPos {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: WorldPos) -> f32 {
        let d = self - other;
        (d.x * d.x + d.y * d.y).sqrt()
    }
}

impl fmt::Display for WorldPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl Add for WorldPos {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorldPos {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Pointy-top hex projection with a uniform cell spacing.
///
/// `spacing` is the distance from a cell center to any of its corners.
/// Cell `(0, 0)` sits at the world origin.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexLayout {
    pub spacing: f32,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self { spacing: 1.0 }
    }
}

impl HexLayout {
    #[inline]
    pub const fn new(spacing: f32) -> Self {
        Self { spacing }
    }

    /// Center of cell `a` in world space.
    #[inline]
    pub fn axial_to_world(&self, a: Axial) -> WorldPos {
        let q = a.q as f32;
        let r = a.r as f32;
        WorldPos {
            x: self.spacing * (SQRT_3 * q + SQRT_3 / 2.0 * r),
            y: self.spacing * (1.5 * r),
        }
    }

    /// Fractional axial coordinate under a world position.
    #[inline]
    pub fn world_to_frac(&self, p: WorldPos) -> FracAxial {
        FracAxial {
            q: (SQRT_3 / 3.0 * p.x - p.y / 3.0) / self.spacing,
            r: (2.0 / 3.0 * p.y) / self.spacing,
        }
    }

    /// The cell containing a world position.
    #[inline]
    pub fn world_to_axial(&self, p: WorldPos) -> Axial {
        self.world_to_frac(p).round()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn layout_round_trip() {
        let l = HexLayout::new(1.5);
        let json = serde_json::to_string(&l).unwrap();
        let back: HexLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(l, back);
    }
}
