//! Hex grid spatial index and multi-waypoint A* pathfinding.
//!
//! This crate builds on the coordinate math of `hexgrid-core`:
//!
//! - **[`HexGrid`]**: cells keyed by axial coordinate with O(1) lookup,
//!   neighbour, radius and line queries, and world/axial conversion
//! - **[`IndexedHeap`]**: a generic binary min-heap with tracked positions,
//!   so a queued item's key can be decreased in O(log n)
//! - **[`HexPathfinder`]**: A* across an ordered list of waypoints,
//!   producing a single world-space polyline or nothing at all
//! - **[`PathDispatcher`]**: runs requests on a worker thread and hands each
//!   caller a [`PathTicket`] for its one result
//!
//! Per-cell search state is stored on the cells themselves, so a grid
//! supports one search at a time. `HexPathfinder` takes `&mut HexGrid` and
//! `PathDispatcher` holds the grid behind a lock for the same reason.

mod cell;
mod config;
mod dispatcher;
mod error;
mod grid;
mod heap;
mod pathfinder;

pub use cell::{CellId, HexCell, SearchState};
pub use config::{GridConfig, GridShape};
pub use dispatcher::{PathDispatcher, PathRequest, PathTicket};
pub use error::{GridError, PathError};
pub use grid::HexGrid;
pub use heap::{HeapItem, IndexedHeap};
pub use pathfinder::{HexPathfinder, PathResult, STEP_COST};

pub use hexgrid_core::{Axial, Cube, HexLayout, WorldPos, hex_distance};
