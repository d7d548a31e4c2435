//! Grid build configuration.

use hexgrid_core::{Axial, HexLayout};

use crate::error::GridError;

/// Which coordinates a freshly built grid contains.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridShape {
    /// Every `(q, r)` with `|q| <= radius` and `|r| <= radius`.
    #[default]
    Rhombus,
    /// Every coordinate within hex distance `radius` of the origin.
    Hexagon,
}

impl GridShape {
    /// Coordinates covered by this shape at `radius`, in build order.
    pub fn coords(self, radius: i32) -> Vec<Axial> {
        match self {
            Self::Rhombus => {
                let mut out = Vec::with_capacity(((2 * radius + 1).max(0) as usize).pow(2));
                for q in -radius..=radius {
                    for r in -radius..=radius {
                        out.push(Axial::new(q, r));
                    }
                }
                out
            }
            Self::Hexagon => Axial::ZERO.range(radius).collect(),
        }
    }
}

/// Parameters for [`HexGrid::new`](crate::HexGrid::new).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    pub radius: i32,
    pub spacing: f32,
    pub shape: GridShape,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            spacing: 1.0,
            shape: GridShape::Rhombus,
        }
    }
}

impl GridConfig {
    /// Set the radius (builder).
    pub const fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    /// Set the cell spacing (builder).
    pub const fn with_spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the shape (builder).
    pub const fn with_shape(mut self, shape: GridShape) -> Self {
        self.shape = shape;
        self
    }

    /// Check that the values describe a buildable grid.
    pub fn validate(&self) -> Result<(), GridError> {
        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return Err(GridError::InvalidSpacing(self.spacing));
        }
        if self.radius < 0 {
            return Err(GridError::InvalidRadius(self.radius));
        }
        Ok(())
    }

    #[inline]
    pub fn layout(&self) -> HexLayout {
        HexLayout::new(self.spacing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(GridConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let c = GridConfig::default().with_spacing(0.0);
        assert_eq!(c.validate(), Err(GridError::InvalidSpacing(0.0)));
        let c = GridConfig::default().with_spacing(f32::NAN);
        assert!(matches!(c.validate(), Err(GridError::InvalidSpacing(_))));
        let c = GridConfig::default().with_radius(-1);
        assert_eq!(c.validate(), Err(GridError::InvalidRadius(-1)));
    }

    #[test]
    fn shape_sizes() {
        assert_eq!(GridShape::Rhombus.coords(1).len(), 9);
        assert_eq!(GridShape::Rhombus.coords(3).len(), 49);
        assert_eq!(GridShape::Hexagon.coords(1).len(), 7);
        assert_eq!(GridShape::Hexagon.coords(3).len(), 37);
        assert_eq!(GridShape::Rhombus.coords(0), vec![Axial::ZERO]);
    }
}
