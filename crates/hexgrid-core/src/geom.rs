//! Hex geometry primitives: [`Axial`], [`Cube`] and [`FracAxial`].
//!
//! Axial `(q, r)` is the addressing scheme used everywhere a cell is named.
//! Cube `(x, y, z)` with `x + y + z == 0` is used for distance and rounding,
//! with `x = q`, `z = r` and `y = -q - r`.
//!
//! Coordinates are supported while every cube component stays within
//! `±`[`MAX_COORD`]. [`Cube::distance`] is total over all inputs, and ranges
//! clamp their radius to [`MAX_COORD`].

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Largest supported magnitude of a cube component.
///
/// Sums and differences of two in-range coordinates stay inside `i32`.
pub const MAX_COORD: i32 = i32::MAX / 4;

// ---------------------------------------------------------------------------
// Axial
// ---------------------------------------------------------------------------

/// An integer axial hex coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { q: 0, r: 0 };

    /// The six axial direction offsets, counter-clockwise starting east.
    pub const DIRECTIONS: [Axial; 6] = [
        Axial::new(1, 0),
        Axial::new(1, -1),
        Axial::new(0, -1),
        Axial::new(-1, 0),
        Axial::new(-1, 1),
        Axial::new(0, 1),
    ];

    /// Create a new coordinate.
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The equivalent cube coordinate.
    #[inline]
    pub const fn to_cube(self) -> Cube {
        Cube {
            x: self.q,
            y: -self.q - self.r,
            z: self.r,
        }
    }

    /// The neighbour in direction `dir` (taken modulo 6).
    #[inline]
    pub fn neighbor(self, dir: usize) -> Self {
        self + Self::DIRECTIONS[dir % 6]
    }

    /// All six neighbouring coordinates, whether or not they exist in a grid.
    #[inline]
    pub fn neighbors(self) -> [Axial; 6] {
        Self::DIRECTIONS.map(|d| self + d)
    }

    /// Hex distance (number of steps) between two coordinates.
    #[inline]
    pub fn distance(self, other: Axial) -> i32 {
        self.to_cube().distance(other.to_cube())
    }

    /// Every coordinate within `radius` steps of `self`.
    ///
    /// A negative radius yields nothing. The radius is clamped to
    /// [`MAX_COORD`].
    #[inline]
    pub fn range(self, radius: i32) -> HexRange {
        HexRange::new(self, radius)
    }

    /// Coordinates on the straight line from `self` to `end`, both included.
    ///
    /// The line is sampled at `distance + 1` evenly spaced points in axial
    /// space and each sample is cube-rounded. Consecutive repeated samples are
    /// dropped; the samples move monotonically, so no other repeat can occur.
    pub fn line_to(self, end: Axial) -> Vec<Axial> {
        let n = self.distance(end);
        let mut out: Vec<Axial> = Vec::with_capacity(n as usize + 1);
        for i in 0..=n {
            let t = if n == 0 { 0.0 } else { i as f32 / n as f32 };
            let p = FracAxial::lerp(self, end, t).round();
            if out.last() != Some(&p) {
                out.push(p);
            }
        }
        out
    }
}

/// Hex distance between two axial coordinates.
#[inline]
pub fn hex_distance(a: Axial, b: Axial) -> i32 {
    a.distance(b)
}

impl PartialOrd for Axial {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Axial {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.r.cmp(&other.r).then(self.q.cmp(&other.q))
    }
}

impl fmt::Display for Axial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl Add for Axial {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for Axial {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Mul<i32> for Axial {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.q * rhs, self.r * rhs)
    }
}

impl Neg for Axial {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.q, -self.r)
    }
}

impl From<(i32, i32)> for Axial {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

impl From<Cube> for Axial {
    fn from(c: Cube) -> Self {
        Self::new(c.x, c.z)
    }
}

// ---------------------------------------------------------------------------
// Cube
// ---------------------------------------------------------------------------

/// An integer cube coordinate. Always satisfies `x + y + z == 0`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    /// Half the sum of absolute component differences.
    ///
    /// Computed in `i64` and saturated to `i32::MAX`, so it is total over all
    /// inputs.
    #[inline]
    pub fn distance(self, other: Cube) -> i32 {
        let d = |a: i32, b: i32| (i64::from(a) - i64::from(b)).abs();
        let sum = d(self.x, other.x) + d(self.y, other.y) + d(self.z, other.z);
        i32::try_from(sum / 2).unwrap_or(i32::MAX)
    }

    /// Round a fractional cube coordinate to the nearest valid cell.
    ///
    /// Each component is rounded independently, then the component with the
    /// largest rounding error is recomputed from the other two so that the
    /// result keeps `x + y + z == 0`.
    pub fn round(fx: f32, fy: f32, fz: f32) -> Cube {
        let mut rx = fx.round();
        let mut ry = fy.round();
        let mut rz = fz.round();

        let dx = (rx - fx).abs();
        let dy = (ry - fy).abs();
        let dz = (rz - fz).abs();

        if dx > dy && dx > dz {
            rx = -ry - rz;
        } else if dy > dz {
            ry = -rx - rz;
        } else {
            rz = -rx - ry;
        }

        Cube {
            x: rx as i32,
            y: ry as i32,
            z: rz as i32,
        }
    }
}

impl From<Axial> for Cube {
    fn from(a: Axial) -> Self {
        a.to_cube()
    }
}

// ---------------------------------------------------------------------------
// FracAxial
// ---------------------------------------------------------------------------

/// A fractional axial coordinate, produced by interpolation or by inverting
/// the world projection.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FracAxial {
    pub q: f32,
    pub r: f32,
}

impl FracAxial {
    #[inline]
    pub const fn new(q: f32, r: f32) -> Self {
        Self { q, r }
    }

    /// Linear interpolation between two cell coordinates.
    #[inline]
    pub fn lerp(a: Axial, b: Axial, t: f32) -> Self {
        Self {
            q: a.q as f32 + (b.q - a.q) as f32 * t,
            r: a.r as f32 + (b.r - a.r) as f32 * t,
        }
    }

    /// The nearest integer coordinate, using cube rounding.
    #[inline]
    pub fn round(self) -> Axial {
        let x = self.q;
        let z = self.r;
        Cube::round(x, -x - z, z).into()
    }
}

impl From<Axial> for FracAxial {
    fn from(a: Axial) -> Self {
        Self::new(a.q as f32, a.r as f32)
    }
}

// ---------------------------------------------------------------------------
// HexRange
// ---------------------------------------------------------------------------

/// Iterator over all coordinates within a given hex distance of a center.
///
/// Walks the q-bounded/r-bounded diamond so that no coordinate outside the
/// radius is ever produced.
#[derive(Clone, Debug)]
pub struct HexRange {
    center: Axial,
    radius: i32,
    dq: i32,
    dr: i32,
}

impl HexRange {
    fn new(center: Axial, radius: i32) -> Self {
        let radius = radius.min(MAX_COORD);
        let dq = -radius;
        Self {
            center,
            radius,
            dq,
            dr: Self::r_min(radius, dq),
        }
    }

    #[inline]
    fn r_min(radius: i32, dq: i32) -> i32 {
        (-radius).max(-dq - radius)
    }

    #[inline]
    fn r_max(radius: i32, dq: i32) -> i32 {
        radius.min(-dq + radius)
    }

    /// Number of coordinates in a full range of `radius`, saturating at
    /// `usize::MAX`.
    #[inline]
    pub fn count_for(radius: i32) -> usize {
        if radius < 0 {
            return 0;
        }
        let n = radius.min(MAX_COORD) as usize;
        n.saturating_add(1)
            .saturating_mul(n)
            .saturating_mul(3)
            .saturating_add(1)
    }
}

impl Iterator for HexRange {
    type Item = Axial;

    fn next(&mut self) -> Option<Axial> {
        if self.radius < 0 || self.dq > self.radius {
            return None;
        }
        let p = self.center + Axial::new(self.dq, self.dr);
        self.dr += 1;
        if self.dr > Self::r_max(self.radius, self.dq) {
            self.dq += 1;
            self.dr = Self::r_min(self.radius, self.dq);
        }
        Some(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn axial_arithmetic() {
        let a = Axial::new(1, 2);
        let b = Axial::new(3, -4);
        assert_eq!(a + b, Axial::new(4, -2));
        assert_eq!(b - a, Axial::new(2, -6));
        assert_eq!(a * 3, Axial::new(3, 6));
        assert_eq!(-a, Axial::new(-1, -2));
    }

    #[test]
    fn cube_sum_is_zero() {
        for a in Axial::ZERO.range(4) {
            let c = a.to_cube();
            assert_eq!(c.x + c.y + c.z, 0);
            assert_eq!(Axial::from(c), a);
        }
    }

    #[test]
    fn distance_symmetric_and_reflexive() {
        let pts: Vec<Axial> = Axial::new(1, -1).range(3).collect();
        for &a in &pts {
            assert_eq!(hex_distance(a, a), 0);
            for &b in &pts {
                assert_eq!(hex_distance(a, b), hex_distance(b, a));
            }
        }
    }

    #[test]
    fn neighbors_are_one_step_away() {
        let c = Axial::new(-2, 5);
        let ns = c.neighbors();
        let unique: HashSet<_> = ns.iter().copied().collect();
        assert_eq!(unique.len(), 6);
        for n in ns {
            assert_eq!(c.distance(n), 1);
        }
        assert_eq!(c.neighbor(6), c.neighbor(0));
    }

    #[test]
    fn distance_known_values() {
        assert_eq!(hex_distance(Axial::new(-1, -1), Axial::new(1, 1)), 4);
        assert_eq!(hex_distance(Axial::new(0, 0), Axial::new(2, -1)), 2);
        assert_eq!(hex_distance(Axial::new(0, 0), Axial::new(3, -3)), 3);
    }

    #[test]
    fn cube_round_fixes_largest_error() {
        // Independent rounding would give (0, -1, 0), which breaks the sum.
        let c = Cube::round(0.4, -0.8, 0.4);
        assert_eq!(c.x + c.y + c.z, 0);
        assert_eq!(c, Cube { x: 0, y: -1, z: 1 });

        let c = Cube::round(1.1, -2.05, 0.95);
        assert_eq!(c, Cube { x: 1, y: -2, z: 1 });
    }

    #[test]
    fn frac_round_identity_on_integers() {
        for a in Axial::ZERO.range(3) {
            assert_eq!(FracAxial::from(a).round(), a);
        }
    }

    #[test]
    fn range_zero_is_center() {
        let c = Axial::new(4, -7);
        let pts: Vec<_> = c.range(0).collect();
        assert_eq!(pts, vec![c]);
        assert_eq!(c.range(-1).count(), 0);
    }

    #[test]
    fn range_counts_and_bounds() {
        let c = Axial::new(2, 3);
        for radius in 0..6 {
            let pts: Vec<_> = c.range(radius).collect();
            assert_eq!(pts.len(), HexRange::count_for(radius));
            let unique: HashSet<_> = pts.iter().copied().collect();
            assert_eq!(unique.len(), pts.len());
            assert!(pts.iter().all(|&p| c.distance(p) <= radius));
        }
    }

    #[test]
    fn line_to_self() {
        let a = Axial::new(3, -1);
        assert_eq!(a.line_to(a), vec![a]);
    }

    #[test]
    fn line_is_contiguous() {
        let a = Axial::new(-3, 1);
        let b = Axial::new(4, -2);
        let line = a.line_to(b);
        assert_eq!(line.len() as i32, a.distance(b) + 1);
        assert_eq!(line.first(), Some(&a));
        assert_eq!(line.last(), Some(&b));
        for w in line.windows(2) {
            assert_eq!(w[0].distance(w[1]), 1);
        }
    }

    #[test]
    fn long_line_has_one_cell_per_step() {
        let end = Axial::new(40_000, 0);
        let line = Axial::ZERO.line_to(end);
        assert_eq!(line.len(), 40_001);
        assert_eq!(line.last(), Some(&end));
        assert!(line.iter().enumerate().all(|(i, p)| *p == Axial::new(i as i32, 0)));
    }

    #[test]
    fn huge_radius_is_clamped() {
        let mut it = Axial::ZERO.range(i32::MAX);
        assert_eq!(it.next(), Some(Axial::new(-MAX_COORD, 0)));
        assert_eq!(it.next(), Some(Axial::new(-MAX_COORD, 1)));
        assert_eq!(HexRange::count_for(i32::MAX), HexRange::count_for(MAX_COORD));
    }

    #[test]
    fn distance_saturates() {
        let a = Cube { x: i32::MAX, y: 0, z: i32::MIN + 1 };
        let b = Cube { x: i32::MIN + 1, y: 0, z: i32::MAX };
        assert_eq!(a.distance(b), i32::MAX);
        let far = Axial::new(MAX_COORD, 0);
        assert_eq!(far.distance(-far), 2 * MAX_COORD);
    }

    #[test]
    fn axial_ordering_is_row_major() {
        let mut v = vec![Axial::new(1, 1), Axial::new(0, 1), Axial::new(5, 0)];
        v.sort();
        assert_eq!(v, vec![Axial::new(5, 0), Axial::new(0, 1), Axial::new(1, 1)]);
    }
}
