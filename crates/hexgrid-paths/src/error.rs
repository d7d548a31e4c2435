//! Error types for grid construction and path search.

use std::fmt;

use hexgrid_core::{Axial, WorldPos};

/// Grid configuration and indexing errors.
///
/// None of these abort a grid build: the builder logs them and skips the
/// offending cell or clamps the offending value.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// A second cell was registered at an occupied coordinate.
    DuplicateCoordinate(Axial),
    /// Cell spacing must be finite and strictly positive.
    InvalidSpacing(f32),
    /// Grid radius must not be negative.
    InvalidRadius(i32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCoordinate(a) => write!(f, "grid: duplicate cell at {a}"),
            Self::InvalidSpacing(s) => write!(f, "grid: invalid cell spacing {s}"),
            Self::InvalidRadius(r) => write!(f, "grid: invalid radius {r}"),
        }
    }
}

impl std::error::Error for GridError {}

/// Reasons a path request produced no path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathError {
    /// A segment endpoint is outside the grid or not walkable.
    InvalidEndpoint { pos: WorldPos, coord: Axial },
    /// The open set ran dry before reaching the segment target.
    SearchExhausted { from: Axial, to: Axial },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoint { pos, coord } => {
                write!(f, "path: endpoint {pos} (cell {coord}) is missing or blocked")
            }
            Self::SearchExhausted { from, to } => {
                write!(f, "path: no route from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for PathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = GridError::DuplicateCoordinate(Axial::new(1, -2));
        assert_eq!(e.to_string(), "grid: duplicate cell at (1, -2)");

        let e = PathError::SearchExhausted {
            from: Axial::ZERO,
            to: Axial::new(3, 0),
        };
        assert_eq!(e.to_string(), "path: no route from (0, 0) to (3, 0)");
    }
}
