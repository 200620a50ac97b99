//! Bounds-checked storage for the live grid and its tick buffer.

use planet_sandbox_core::{Cell, CellCoord, CellView, GridSize};

/// Owns the live grid together with the snapshot taken at the start of a tick.
#[derive(Clone, Debug)]
pub(crate) struct CellStore {
    size: GridSize,
    cells: Vec<Cell>,
    buffer: Vec<Cell>,
}

impl CellStore {
    /// Creates a grid filled with empty cells.
    pub(crate) fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: vec![Cell::EMPTY; size.cell_count()],
            buffer: vec![Cell::EMPTY; size.cell_count()],
        }
    }

    pub(crate) fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the live cell, `None` outside the grid.
    pub(crate) fn get(&self, coord: CellCoord) -> Option<Cell> {
        self.size
            .index(coord)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Overwrites the live cell. Coordinates outside the grid are ignored.
    pub(crate) fn set(&mut self, coord: CellCoord, cell: Cell) {
        if let Some(slot) = self
            .size
            .index(coord)
            .and_then(|index| self.cells.get_mut(index))
        {
            *slot = cell;
        }
    }

    /// Exchanges two live cells. Ignored unless both coordinates are inside the grid.
    pub(crate) fn swap(&mut self, first: CellCoord, second: CellCoord) {
        if let (Some(a), Some(b)) = (self.size.index(first), self.size.index(second)) {
            self.cells.swap(a, b);
        }
    }

    /// Reports whether the live cell is empty. Out-of-bounds slots are never empty.
    pub(crate) fn is_empty(&self, coord: CellCoord) -> bool {
        self.get(coord).map_or(false, |cell| cell.is_empty())
    }

    /// Copies every live cell into the tick buffer.
    pub(crate) fn snapshot(&mut self) {
        self.buffer.copy_from_slice(&self.cells);
    }

    /// Returns the cell captured by the last snapshot.
    pub(crate) fn buffered(&self, coord: CellCoord) -> Option<Cell> {
        self.size
            .index(coord)
            .and_then(|index| self.buffer.get(index).copied())
    }

    pub(crate) fn view(&self) -> CellView<'_> {
        CellView::new(&self.cells, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planet_sandbox_core::Element;

    fn store(width: u32, height: u32) -> CellStore {
        CellStore::new(GridSize::new(width, height).expect("valid size"))
    }

    #[test]
    fn out_of_bounds_reads_are_distinct_from_empty() {
        let grid = store(3, 3);
        assert_eq!(grid.get(CellCoord::new(1, 1)), Some(Cell::EMPTY));
        assert_eq!(grid.get(CellCoord::new(-1, 1)), None);
        assert_eq!(grid.get(CellCoord::new(1, 3)), None);
        assert!(grid.is_empty(CellCoord::new(0, 0)));
        assert!(!grid.is_empty(CellCoord::new(3, 0)));
    }

    #[test]
    fn out_of_bounds_writes_do_not_corrupt_state() {
        let mut grid = store(2, 2);
        grid.set(CellCoord::new(2, 0), Cell::new(Element::Stone));
        grid.set(CellCoord::new(0, -1), Cell::new(Element::Stone));
        grid.swap(CellCoord::new(0, 0), CellCoord::new(5, 5));
        assert!(grid.view().iter().all(Cell::is_empty));
    }

    #[test]
    fn swap_moves_data_with_the_cell() {
        let mut grid = store(2, 1);
        let lava = Cell::with_life(Element::Lava, 7);
        grid.set(CellCoord::new(0, 0), lava);
        grid.swap(CellCoord::new(0, 0), CellCoord::new(1, 0));
        assert_eq!(grid.get(CellCoord::new(1, 0)), Some(lava));
        assert_eq!(grid.get(CellCoord::new(0, 0)), Some(Cell::EMPTY));
    }

    #[test]
    fn snapshot_is_detached_from_live_grid() {
        let mut grid = store(2, 2);
        let coord = CellCoord::new(1, 1);
        grid.set(coord, Cell::new(Element::Sand));
        grid.snapshot();
        grid.set(coord, Cell::new(Element::Water));
        assert_eq!(
            grid.buffered(coord).map(|cell| cell.element()),
            Some(Element::Sand)
        );
        assert_eq!(grid.get(coord).map(|cell| cell.element()), Some(Element::Water));
    }
}
