//! Single-step displacement shared by every moving element.

use planet_sandbox_core::{CellCoord, Heading};
use rand::Rng;

use crate::{grid::CellStore, SimRng};

/// Moves the cell at `coord` by one step if the destination yields.
///
/// Succeeds iff the destination lies inside the grid and holds an empty or
/// gaseous cell, in which case the two cells swap places.
pub(crate) fn try_move(grid: &mut CellStore, coord: CellCoord, columns: i32, rows: i32) -> bool {
    let target = coord.offset(columns, rows);
    let Some(occupant) = grid.get(target) else {
        return false;
    };
    if !occupant.element().is_displaceable() {
        return false;
    }
    grid.swap(coord, target);
    true
}

/// Picks a horizontal offset of `-1` or `1` with equal odds.
pub(crate) fn random_side(rng: &mut SimRng) -> i32 {
    random_heading(rng).delta()
}

pub(crate) fn random_heading(rng: &mut SimRng) -> Heading {
    if rng.gen_bool(0.5) {
        Heading::Left
    } else {
        Heading::Right
    }
}
