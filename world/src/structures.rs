//! Free-footprint search and template stamping for agent-built structures.

use planet_sandbox_core::{Cell, CellCoord, Element, HouseVariant, StructureKind};

use crate::grid::CellStore;

/// One slot of a structure template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Left untouched when stamping.
    Open,
    /// Filled with the element.
    Solid(Element),
}

const H: Slot = Slot::Solid(Element::HouseHuman);
const A: Slot = Slot::Solid(Element::HouseAlien);
const O: Slot = Slot::Open;

/// 3x3 house: solid shell around an open doorway.
const HUMAN_HOUSE: &[&[Slot]] = &[&[H, H, H], &[H, O, H], &[H, H, H]];

/// 4x4 dome with clipped corners and a hollow upper half.
const ALIEN_DOME: &[&[Slot]] = &[
    &[O, A, A, O],
    &[A, O, O, A],
    &[A, A, A, A],
    &[O, A, A, O],
];

/// Relative position of the doorway inside the human house.
pub(crate) const HOUSE_DOOR: (i32, i32) = (1, 1);

/// Width and height of the area a structure occupies.
pub(crate) const fn footprint(kind: StructureKind) -> (i32, i32) {
    match kind {
        StructureKind::HumanHouse => (3, 3),
        StructureKind::AlienDome => (4, 4),
    }
}

/// Finds the first origin near `center` whose `width x height` footprint is
/// entirely inside the grid and empty.
///
/// Candidate origins are visited row by row over the offsets
/// `-height..=height` and `-width..=width`.
pub(crate) fn find_build_spot(
    grid: &CellStore,
    center: CellCoord,
    width: i32,
    height: i32,
) -> Option<CellCoord> {
    (-height..=height)
        .flat_map(|rows| (-width..=width).map(move |columns| center.offset(columns, rows)))
        .find(|origin| footprint_is_free(grid, *origin, width, height))
}

fn footprint_is_free(grid: &CellStore, origin: CellCoord, width: i32, height: i32) -> bool {
    (0..height).all(|rows| (0..width).all(|columns| grid.is_empty(origin.offset(columns, rows))))
}

/// Walks a template row by row, handing every slot and its relative position to `setter`.
pub(crate) fn apply_pattern<F>(pattern: &[&[Slot]], mut setter: F)
where
    F: FnMut(Slot, i32, i32),
{
    for (row, slots) in (0i32..).zip(pattern.iter()) {
        for (column, slot) in (0i32..).zip(slots.iter()) {
            setter(*slot, column, row);
        }
    }
}

/// Stamps the structure with its upper-left corner at `origin`.
pub(crate) fn stamp(grid: &mut CellStore, origin: CellCoord, kind: StructureKind) {
    match kind {
        StructureKind::HumanHouse => apply_pattern(HUMAN_HOUSE, |slot, column, row| {
            let Slot::Solid(element) = slot else {
                return;
            };
            let variant = if (column, row) == HOUSE_DOOR {
                HouseVariant::Door
            } else if row == 0 {
                HouseVariant::Roof
            } else {
                HouseVariant::Wall
            };
            grid.set(origin.offset(column, row), Cell::house(element, variant));
        }),
        StructureKind::AlienDome => apply_pattern(ALIEN_DOME, |slot, column, row| {
            let Slot::Solid(element) = slot else {
                return;
            };
            let variant = if row <= 1 {
                HouseVariant::Glass
            } else {
                HouseVariant::Base
            };
            grid.set(origin.offset(column, row), Cell::house(element, variant));
        }),
    }
}
