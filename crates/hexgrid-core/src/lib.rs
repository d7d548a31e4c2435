//! **hexgrid-core** — coordinate math for hexagonal grids.
//!
//! This crate provides the leaf types used by the rest of the *hexgrid*
//! workspace: axial and cube coordinates, cube rounding, the hex distance
//! metric, and the pointy-top world-space projection.

pub mod geom;
pub mod layout;

pub use geom::{Axial, Cube, FracAxial, HexRange, MAX_COORD, hex_distance};
pub use layout::{HexLayout, WorldPos};
