//! The [`HexGrid`] type — the spatial index over a set of hex cells.
//!
//! Cells live in a dense arena addressed by [`CellId`]; a hash map from
//! [`Axial`] to id gives O(1) coordinate lookup. The grid is the sole owner
//! of its cells.
//!
//! Ids are positions in the arena. [`HexGrid::remove_cell`] compacts the
//! arena, so every [`CellId`] obtained before a removal must be looked up
//! again with [`HexGrid::cell_id`].

use std::collections::HashMap;

use hexgrid_core::{Axial, HexLayout, WorldPos, hex_distance};
use log::{debug, warn};

use crate::cell::{CellId, HexCell, SearchState};
use crate::config::GridConfig;
use crate::error::GridError;

/// A hex grid: cells keyed by axial coordinate plus a world projection.
#[derive(Clone, Debug)]
pub struct HexGrid {
    cells: Vec<HexCell>,
    index: HashMap<Axial, CellId>,
    layout: HexLayout,
    radius: i32,
    extent: i32,
}

impl HexGrid {
    /// Build a grid with one walkable cell per coordinate of `config.shape`.
    ///
    /// Invalid values are logged and replaced (spacing 1.0, radius 0) rather
    /// than failing the build.
    pub fn new(config: GridConfig) -> Self {
        let mut config = config;
        if let Err(e) = config.validate() {
            warn!("{e}; using fallback values");
            if !config.spacing.is_finite() || config.spacing <= 0.0 {
                config.spacing = 1.0;
            }
            config.radius = config.radius.max(0);
        }

        let coords = config.shape.coords(config.radius);
        let mut grid = Self::empty(config.layout());
        grid.cells.reserve(coords.len());
        for coord in coords {
            grid.register(coord, true);
        }
        grid.radius = config.radius;
        debug!(
            "grid: built {} cells ({:?}, radius {}, spacing {})",
            grid.len(),
            config.shape,
            config.radius,
            config.spacing
        );
        grid
    }

    /// An empty grid with the given projection.
    pub fn empty(layout: HexLayout) -> Self {
        Self {
            cells: Vec::new(),
            index: HashMap::new(),
            layout,
            radius: 0,
            extent: 0,
        }
    }

    /// Build a grid from an externally supplied list of `(coord, walkable)`.
    ///
    /// Duplicate coordinates are logged and skipped; the first registration
    /// wins. With no configured radius, [`radius`](Self::radius) reports the
    /// farthest cell from the origin.
    pub fn from_cells(layout: HexLayout, cells: impl IntoIterator<Item = (Axial, bool)>) -> Self {
        let mut grid = Self::empty(layout);
        for (coord, walkable) in cells {
            grid.register(coord, walkable);
        }
        grid.radius = grid.extent;
        grid
    }

    fn register(&mut self, coord: Axial, walkable: bool) -> Option<CellId> {
        match self.insert_cell(coord, walkable) {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("{e}; keeping the first registration");
                None
            }
        }
    }

    /// Add a cell. Fails if `coord` is already occupied.
    pub fn insert_cell(&mut self, coord: Axial, walkable: bool) -> Result<CellId, GridError> {
        if self.index.contains_key(&coord) {
            return Err(GridError::DuplicateCoordinate(coord));
        }
        let id = CellId(self.cells.len());
        self.cells.push(HexCell::new(coord, walkable));
        self.index.insert(coord, id);
        self.extent = self.extent.max(hex_distance(Axial::ZERO, coord));
        Ok(id)
    }

    /// Remove the cell at `coord`, returning it.
    ///
    /// The last cell in the arena takes the removed cell's id, so this
    /// invalidates every previously obtained [`CellId`], not only the removed
    /// one. All search state is cleared since predecessor links may now be
    /// stale.
    pub fn remove_cell(&mut self, coord: Axial) -> Option<HexCell> {
        let id = self.index.remove(&coord)?;
        let cell = self.cells.swap_remove(id.0);
        if let Some(moved) = self.cells.get(id.0) {
            self.index.insert(moved.coord(), id);
        }
        if hex_distance(Axial::ZERO, coord) == self.extent {
            self.extent = self
                .cells
                .iter()
                .map(|c| hex_distance(Axial::ZERO, c.coord()))
                .max()
                .unwrap_or(0);
        }
        self.reset_search_state();
        Some(cell)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn layout(&self) -> HexLayout {
        self.layout
    }

    /// The radius the grid was built with.
    ///
    /// Cells added or removed later do not change it. For a rhombus this is
    /// the bound on `|q|` and `|r|`, which is smaller than
    /// [`max_distance_from_origin`](Self::max_distance_from_origin).
    #[inline]
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Largest hex distance from the origin of any current cell.
    #[inline]
    pub fn max_distance_from_origin(&self) -> i32 {
        self.extent
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells, in arena order.
    pub fn iter(&self) -> impl Iterator<Item = &HexCell> {
        self.cells.iter()
    }

    #[inline]
    pub fn contains(&self, coord: Axial) -> bool {
        self.index.contains_key(&coord)
    }

    #[inline]
    pub fn cell_id(&self, coord: Axial) -> Option<CellId> {
        self.index.get(&coord).copied()
    }

    /// The cell at `coord`, or `None` if there is none.
    #[inline]
    pub fn cell(&self, coord: Axial) -> Option<&HexCell> {
        self.cell_id(coord).map(|id| &self.cells[id.0])
    }

    #[inline]
    pub fn cell_by_id(&self, id: CellId) -> Option<&HexCell> {
        self.cells.get(id.0)
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [HexCell] {
        &mut self.cells
    }

    /// Set walkability of the cell at `coord`. Returns `false` if there is no
    /// such cell.
    pub fn set_walkable(&mut self, coord: Axial, walkable: bool) -> bool {
        match self.cell_id(coord) {
            Some(id) => {
                self.cells[id.0].walkable = walkable;
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Existing cells adjacent to `coord` (0 to 6 of them).
    pub fn neighbors(&self, coord: Axial) -> Vec<&HexCell> {
        coord.neighbors().into_iter().filter_map(|n| self.cell(n)).collect()
    }

    /// Append ids of existing cells adjacent to `id` into `buf`. The caller
    /// clears `buf` before calling.
    pub(crate) fn neighbor_ids(&self, id: CellId, buf: &mut Vec<CellId>) {
        let coord = self.cells[id.0].coord();
        for n in coord.neighbors() {
            if let Some(nid) = self.cell_id(n) {
                buf.push(nid);
            }
        }
    }

    /// Hex distance between two coordinates.
    #[inline]
    pub fn distance(&self, a: Axial, b: Axial) -> i32 {
        hex_distance(a, b)
    }

    /// Existing cells within `radius` steps of `center`, walkable or not.
    ///
    /// Only the part of the range that can hold cells is walked, so a huge
    /// radius costs no more than one covering the whole grid.
    pub fn cells_in_radius(&self, center: Axial, radius: i32) -> Vec<&HexCell> {
        let reach = hex_distance(center, Axial::ZERO).saturating_add(self.extent);
        center.range(radius.min(reach)).filter_map(|a| self.cell(a)).collect()
    }

    /// Distinct existing walkable cells on the straight line from `start` to
    /// `end`. Missing or blocked cells along the way are skipped.
    pub fn cells_along_line(&self, start: Axial, end: Axial) -> Vec<&HexCell> {
        start
            .line_to(end)
            .into_iter()
            .filter_map(|a| self.cell(a))
            .filter(|c| c.walkable)
            .collect()
    }

    /// Cells marked as part of the last successful route.
    pub fn path_cells(&self) -> Vec<&HexCell> {
        self.cells.iter().filter(|c| c.state() == SearchState::Path).collect()
    }

    // -----------------------------------------------------------------------
    // Coordinate conversion
    // -----------------------------------------------------------------------

    #[inline]
    pub fn axial_to_world(&self, a: Axial) -> WorldPos {
        self.layout.axial_to_world(a)
    }

    #[inline]
    pub fn world_to_axial(&self, p: WorldPos) -> Axial {
        self.layout.world_to_axial(p)
    }

    /// The cell under a world position.
    #[inline]
    pub fn cell_at_world(&self, p: WorldPos) -> Option<&HexCell> {
        self.cell(self.world_to_axial(p))
    }

    /// Clear the search bookkeeping of every cell.
    pub fn reset_search_state(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_search();
        }
    }
}

impl Default for HexGrid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}
