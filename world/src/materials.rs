//! Update rules for every non-agent element that changes over time.
//!
//! Rules act on the live grid. Decaying elements store their decremented life
//! back into the grid before moving so the swap carries the new value along.

use planet_sandbox_core::{Cell, CellCoord, Element, Event};
use tracing::debug;

use crate::{
    movement::{random_side, try_move},
    TickContext,
};

/// Life given to fire started by lava or another fire.
pub(crate) const IGNITED_FIRE_LIFE: u32 = 20;
/// Life of the smoke a burnt-out fire leaves behind.
pub(crate) const SMOKE_FROM_FIRE_LIFE: u32 = 20;
/// Life of the smoke an agent turns into when it burns.
pub(crate) const SMOKE_FROM_AGENT_LIFE: u32 = 10;
/// Ticks a plant must wait before it may spread.
pub(crate) const PLANT_SPREAD_THRESHOLD: u32 = 30;

const NEIGHBOURHOOD: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const PLANT_SPREAD_ORDER: [(i32, i32); 3] = [(0, -1), (-1, 0), (1, 0)];

pub(crate) fn update_sand(ctx: &mut TickContext<'_>, coord: CellCoord) {
    if try_move(ctx.grid, coord, 0, 1) {
        return;
    }
    let side = random_side(ctx.rng);
    if try_move(ctx.grid, coord, side, 1) {
        return;
    }
    let _ = try_move(ctx.grid, coord, -side, 1);
}

pub(crate) fn update_water(ctx: &mut TickContext<'_>, coord: CellCoord) {
    if try_move(ctx.grid, coord, 0, 1) {
        return;
    }
    let side = random_side(ctx.rng);
    if try_move(ctx.grid, coord, side, 0) {
        return;
    }
    let _ = try_move(ctx.grid, coord, -side, 0);
}

pub(crate) fn update_lava(ctx: &mut TickContext<'_>, coord: CellCoord) {
    if !age(ctx, coord, Cell::new(Element::Stone)) {
        return;
    }
    ignite_neighbours(ctx, coord);
    if try_move(ctx.grid, coord, 0, 1) {
        return;
    }
    let side = random_side(ctx.rng);
    let _ = try_move(ctx.grid, coord, side, 0);
}

pub(crate) fn update_fire(ctx: &mut TickContext<'_>, coord: CellCoord) {
    if !age(
        ctx,
        coord,
        Cell::with_life(Element::Smoke, SMOKE_FROM_FIRE_LIFE),
    ) {
        return;
    }
    ignite_neighbours(ctx, coord);
    for (columns, rows) in NEIGHBOURHOOD {
        let neighbour = coord.offset(columns, rows);
        let Some(cell) = ctx.grid.get(neighbour) else {
            continue;
        };
        if cell.element().is_agent() {
            ctx.grid.set(
                neighbour,
                Cell::with_life(Element::Smoke, SMOKE_FROM_AGENT_LIFE),
            );
            debug!(
                agent = %cell.element(),
                column = neighbour.column(),
                row = neighbour.row(),
                "agent burned"
            );
            ctx.events.push(Event::AgentPerished {
                agent: cell.element(),
                coord: neighbour,
            });
        }
    }
}

pub(crate) fn update_smoke(ctx: &mut TickContext<'_>, coord: CellCoord) {
    if !age(ctx, coord, Cell::EMPTY) {
        return;
    }
    if !try_move(ctx.grid, coord, 0, -1) {
        let side = random_side(ctx.rng);
        let _ = try_move(ctx.grid, coord, side, -1);
    }
}

pub(crate) fn update_steam(ctx: &mut TickContext<'_>, coord: CellCoord) {
    if !age(ctx, coord, Cell::new(Element::Water)) {
        return;
    }
    if !try_move(ctx.grid, coord, 0, -1) {
        let side = random_side(ctx.rng);
        let _ = try_move(ctx.grid, coord, side, 0);
    }
}

pub(crate) fn update_plant(ctx: &mut TickContext<'_>, coord: CellCoord) {
    let Some(mut plant) = ctx.grid.get(coord) else {
        return;
    };
    let Some(ticks) = plant.growth_mut() else {
        return;
    };
    *ticks = ticks.saturating_add(1);
    if *ticks > PLANT_SPREAD_THRESHOLD {
        for (columns, rows) in PLANT_SPREAD_ORDER {
            let target = coord.offset(columns, rows);
            if ctx.grid.is_empty(target) {
                ctx.grid.set(target, Cell::new(Element::Plant));
                *ticks = 0;
                break;
            }
        }
    }
    ctx.grid.set(coord, plant);
}

/// Counts down the life of the decaying cell at `coord`.
///
/// Returns `false` once the cell has been replaced by `product`.
fn age(ctx: &mut TickContext<'_>, coord: CellCoord, product: Cell) -> bool {
    let Some(mut cell) = ctx.grid.get(coord) else {
        return false;
    };
    let Some(remaining) = cell.life_mut() else {
        return false;
    };
    *remaining = remaining.saturating_sub(1);
    if *remaining == 0 {
        ctx.grid.set(coord, product);
        return false;
    }
    ctx.grid.set(coord, cell);
    true
}

fn ignite_neighbours(ctx: &mut TickContext<'_>, coord: CellCoord) {
    for (columns, rows) in NEIGHBOURHOOD {
        let neighbour = coord.offset(columns, rows);
        if ctx
            .grid
            .get(neighbour)
            .is_some_and(|cell| cell.element().is_flammable())
        {
            ctx.grid.set(
                neighbour,
                Cell::with_life(Element::Fire, IGNITED_FIRE_LIFE),
            );
        }
    }
}
