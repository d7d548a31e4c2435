//! The [`HexCell`] type — a grid cell with its per-search bookkeeping.

use hexgrid_core::Axial;

use crate::heap::HeapItem;

/// Handle to a cell inside a [`HexGrid`](crate::HexGrid).
///
/// Handles stay valid until the next [`HexGrid::remove_cell`](crate::HexGrid::remove_cell)
/// of any cell. Removal moves the last cell into the freed slot, so older
/// handles may then name a different cell or none at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    /// Position of the cell in the grid's arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Search progress of a cell during the current segment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    #[default]
    Unvisited,
    Open,
    Closed,
    /// On the route returned by the last successful search.
    Path,
}

/// A single hex cell.
///
/// `coord` and `walkable` describe the map. Everything else is scratch space
/// for the pathfinder and is only meaningful during and right after a search.
#[derive(Clone, Debug)]
pub struct HexCell {
    coord: Axial,
    pub walkable: bool,
    pub(crate) state: SearchState,
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) parent: Option<CellId>,
    pub(crate) heap_index: Option<usize>,
}

impl HexCell {
    /// Create a cell with cleared search state.
    pub fn new(coord: Axial, walkable: bool) -> Self {
        Self {
            coord,
            walkable,
            state: SearchState::Unvisited,
            g: 0,
            h: 0,
            parent: None,
            heap_index: None,
        }
    }

    #[inline]
    pub fn coord(&self) -> Axial {
        self.coord
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Accumulated cost from the segment start.
    #[inline]
    pub fn g_cost(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate to the segment target.
    #[inline]
    pub fn h_cost(&self) -> i32 {
        self.h
    }

    #[inline]
    pub fn f_cost(&self) -> i32 {
        self.g + self.h
    }

    /// Predecessor on the current search tree.
    #[inline]
    pub fn parent(&self) -> Option<CellId> {
        self.parent
    }

    /// Forget everything the last search wrote.
    pub fn reset_search(&mut self) {
        self.state = SearchState::Unvisited;
        self.g = 0;
        self.h = 0;
        self.parent = None;
        self.heap_index = None;
    }
}

impl HeapItem for HexCell {
    type Key = (i32, i32);

    #[inline]
    fn heap_key(&self) -> (i32, i32) {
        (self.f_cost(), self.h)
    }

    #[inline]
    fn heap_index(&self) -> Option<usize> {
        self.heap_index
    }

    #[inline]
    fn set_heap_index(&mut self, idx: Option<usize>) {
        self.heap_index = idx;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_search_fields() {
        let mut c = HexCell::new(Axial::new(1, 2), true);
        c.state = SearchState::Closed;
        c.g = 30;
        c.h = 20;
        c.parent = Some(CellId(4));
        c.heap_index = Some(3);

        c.reset_search();
        assert_eq!(c.state(), SearchState::Unvisited);
        assert_eq!(c.g_cost(), 0);
        assert_eq!(c.h_cost(), 0);
        assert_eq!(c.parent(), None);
        assert_eq!(c.heap_index(), None);
        assert_eq!(c.coord(), Axial::new(1, 2));
        assert!(c.walkable);
    }

    #[test]
    fn key_prefers_lower_total_then_lower_h() {
        let mut a = HexCell::new(Axial::ZERO, true);
        let mut b = HexCell::new(Axial::new(1, 0), true);
        a.g = 20;
        a.h = 10;
        b.g = 10;
        b.h = 20;
        assert_eq!(a.f_cost(), b.f_cost());
        assert!(a.heap_key() < b.heap_key());

        b.g = 0;
        assert!(b.heap_key() < a.heap_key());
    }
}
