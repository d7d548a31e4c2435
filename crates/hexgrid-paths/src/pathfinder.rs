//! Multi-segment A* search through ordered waypoints.
//!
//! A request `start -> w1 -> ... -> wn -> target` is solved as consecutive
//! segments. Each segment is an independent A* run over the grid's cells
//! using [`IndexedHeap`] as the open set. The segments' routes are joined
//! into one world-space polyline. Any failing segment fails the whole
//! request and nothing partial is returned.

use hexgrid_core::{Axial, WorldPos, hex_distance};
use log::{debug, trace};

use crate::cell::{CellId, SearchState};
use crate::error::PathError;
use crate::grid::HexGrid;
use crate::heap::IndexedHeap;

/// Cost of moving between two adjacent cells.
pub const STEP_COST: i32 = 10;

/// Outcome of a path request: the polyline and whether it is valid.
///
/// A failed request always carries an empty polyline.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub path: Vec<WorldPos>,
    pub success: bool,
}

impl PathResult {
    /// The "no path" outcome.
    pub fn failed() -> Self {
        Self {
            path: Vec::new(),
            success: false,
        }
    }

    /// Number of positions in the polyline.
    #[inline]
    pub fn len(&self) -> usize {
        self.path.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of cell-to-cell moves.
    #[inline]
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl From<Result<Vec<WorldPos>, PathError>> for PathResult {
    fn from(res: Result<Vec<WorldPos>, PathError>) -> Self {
        match res {
            Ok(path) => Self {
                path,
                success: true,
            },
            Err(e) => {
                debug!("{e}");
                Self::failed()
            }
        }
    }
}

/// Admissible estimate in step-cost units.
#[inline]
fn heuristic(a: Axial, b: Axial) -> i32 {
    hex_distance(a, b) * STEP_COST
}

/// A* pathfinder that reuses its open set and scratch buffers across
/// requests.
///
/// Per-cell search state lives in the [`HexGrid`] itself, so a search needs
/// exclusive access to the grid for its whole duration.
#[derive(Debug, Default)]
pub struct HexPathfinder {
    open: IndexedHeap,
    nbuf: Vec<CellId>,
    route: Vec<CellId>,
}

impl HexPathfinder {
    pub fn new() -> Self {
        Self {
            open: IndexedHeap::new(),
            nbuf: Vec::with_capacity(6),
            route: Vec::new(),
        }
    }

    /// Find a path from `start` through each of `waypoints` in order to
    /// `target`.
    ///
    /// Never fails loudly: every error collapses into
    /// [`PathResult::failed`].
    pub fn find_path(
        &mut self,
        grid: &mut HexGrid,
        start: WorldPos,
        target: WorldPos,
        waypoints: &[WorldPos],
    ) -> PathResult {
        self.try_find_path(grid, start, target, waypoints).into()
    }

    /// Like [`find_path`](Self::find_path) but reports why no path was found.
    ///
    /// Positions are cell centers. Each segment contributes its cells from
    /// its start to its target; the shared waypoint between two segments
    /// appears once.
    pub fn try_find_path(
        &mut self,
        grid: &mut HexGrid,
        start: WorldPos,
        target: WorldPos,
        waypoints: &[WorldPos],
    ) -> Result<Vec<WorldPos>, PathError> {
        self.route.clear();
        let mut from = start;
        for &to in waypoints.iter().chain(std::iter::once(&target)) {
            let seg_start = self.route.len();
            self.search_segment(grid, from, to)?;
            if seg_start > 0 {
                // Drop the segment start: it is the previous segment's target.
                self.route.remove(seg_start);
            }
            from = to;
        }

        let layout = grid.layout();
        let cells = grid.cells_mut();
        for &id in &self.route {
            cells[id.0].state = SearchState::Path;
        }
        Ok(self
            .route
            .iter()
            .map(|&id| layout.axial_to_world(cells[id.0].coord()))
            .collect())
    }

    fn endpoint(grid: &HexGrid, pos: WorldPos) -> Result<CellId, PathError> {
        let coord = grid.world_to_axial(pos);
        grid.cell_id(coord)
            .filter(|&id| grid.cell_by_id(id).is_some_and(|c| c.walkable))
            .ok_or(PathError::InvalidEndpoint { pos, coord })
    }

    /// Run A* for one segment, appending its route (start first) to
    /// `self.route`.
    fn search_segment(
        &mut self,
        grid: &mut HexGrid,
        from: WorldPos,
        to: WorldPos,
    ) -> Result<(), PathError> {
        let start = Self::endpoint(grid, from)?;
        let goal = Self::endpoint(grid, to)?;

        grid.reset_search_state();

        let cells = grid.cells_mut();
        let start_coord = cells[start.0].coord();
        let goal_coord = cells[goal.0].coord();
        {
            let s = &mut cells[start.0];
            s.g = 0;
            s.h = heuristic(start_coord, goal_coord);
            s.state = SearchState::Open;
        }
        self.open.push(cells, start.0);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(ci) = self.open.pop(grid.cells_mut()) else {
                break 'search false;
            };
            expanded += 1;

            let cells = grid.cells_mut();
            cells[ci].state = SearchState::Closed;
            if ci == goal.0 {
                break 'search true;
            }
            let current_g = cells[ci].g;

            nbuf.clear();
            grid.neighbor_ids(CellId(ci), &mut nbuf);

            let cells = grid.cells_mut();
            for &nid in nbuf.iter() {
                let ni = nid.0;
                if !cells[ni].walkable || cells[ni].state == SearchState::Closed {
                    continue;
                }
                let tentative_g = current_g + STEP_COST;
                let queued = self.open.contains(&*cells, ni);
                if queued && tentative_g >= cells[ni].g {
                    continue;
                }

                let n = &mut cells[ni];
                n.g = tentative_g;
                n.h = heuristic(n.coord(), goal_coord);
                n.parent = Some(CellId(ci));
                if queued {
                    self.open.decrease_key(cells, ni);
                } else {
                    n.state = SearchState::Open;
                    self.open.push(cells, ni);
                }
            }
        };

        self.nbuf = nbuf;
        // Leftover open ids must not outlive the segment: the arena may
        // shrink before the next search.
        self.open.clear(grid.cells_mut());
        trace!("path: segment {start_coord} -> {goal_coord} expanded {expanded} cells");

        if !found {
            return Err(PathError::SearchExhausted {
                from: start_coord,
                to: goal_coord,
            });
        }

        let cells = grid.cells_mut();
        let seg_start = self.route.len();
        let mut cur = Some(goal);
        while let Some(id) = cur {
            self.route.push(id);
            cur = cells[id.0].parent;
        }
        self.route[seg_start..].reverse();
        Ok(())
    }
}
