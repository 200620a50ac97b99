#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Planet Sandbox.
//!
//! The world owns the live grid, the tick buffer and the single seeded random
//! source. Every tick snapshots the live grid, then walks the snapshot from the
//! bottom row to the top, left to right, dispatching each occupied cell to the
//! rule for its element. Rules read and write the live grid directly, so a
//! cell moved early in a tick is visible to rules that run later in the same
//! tick. A cell is only updated while its live element still matches the
//! snapshot.

mod agents;
mod grid;
mod materials;
mod movement;
mod structures;

use std::ops::RangeInclusive;

use planet_sandbox_core::{Cell, CellCoord, Command, ConfigureError, Element, Event, GridSize};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::trace;

use crate::grid::CellStore;

/// Random source threaded through every rule.
pub(crate) type SimRng = ChaCha8Rng;

/// Mutable state handed to the update rules while a tick is in progress.
pub(crate) struct TickContext<'a> {
    pub(crate) grid: &'a mut CellStore,
    pub(crate) rng: &'a mut SimRng,
    pub(crate) events: &'a mut Vec<Event>,
}

/// Represents the authoritative Planet Sandbox world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: CellStore,
    rng: SimRng,
    tick_index: u64,
}

impl World {
    /// Creates an empty world of the provided size, seeding its random source.
    #[must_use]
    pub fn new(size: GridSize, seed: u64) -> Self {
        Self {
            grid: CellStore::new(size),
            rng: SimRng::seed_from_u64(seed),
            tick_index: 0,
        }
    }

    /// Validates the dimensions and allocates an empty world.
    ///
    /// The grid size is fixed for the lifetime of the returned world.
    pub fn configure(width: u32, height: u32, seed: u64) -> Result<Self, ConfigureError> {
        GridSize::new(width, height).map(|size| Self::new(size, seed))
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SetCell { coord, cell } => world.grid.set(coord, cell),
        Command::Paint {
            center,
            radius,
            density,
            element,
        } => {
            let count = paint(world, center, radius, density, element);
            out_events.push(Event::CellsPainted { element, count });
        }
        Command::Tick => advance(world, out_events),
    }
}

fn advance(world: &mut World, out_events: &mut Vec<Event>) {
    world.grid.snapshot();
    let size = world.grid.size();
    let columns = size.width() as i32;
    let rows = size.height() as i32;
    let emitted_before = out_events.len();

    {
        let mut ctx = TickContext {
            grid: &mut world.grid,
            rng: &mut world.rng,
            events: out_events,
        };
        for row in (0..rows).rev() {
            for column in 0..columns {
                let coord = CellCoord::new(column, row);
                let Some(buffered) = ctx.grid.buffered(coord) else {
                    continue;
                };
                if buffered.is_empty() {
                    continue;
                }
                // Something else moved into this slot earlier in the tick.
                let live = ctx.grid.get(coord).map(|cell| cell.element());
                if live != Some(buffered.element()) {
                    continue;
                }
                update_cell(&mut ctx, coord, buffered.element());
            }
        }
    }

    world.tick_index = world.tick_index.saturating_add(1);
    trace!(
        tick = world.tick_index,
        events = out_events.len() - emitted_before,
        "tick complete"
    );
    out_events.push(Event::TimeAdvanced {
        tick: world.tick_index,
    });
}

fn update_cell(ctx: &mut TickContext<'_>, coord: CellCoord, element: Element) {
    match element {
        Element::Sand => materials::update_sand(ctx, coord),
        Element::Water => materials::update_water(ctx, coord),
        Element::Lava => materials::update_lava(ctx, coord),
        Element::Fire => materials::update_fire(ctx, coord),
        Element::Steam => materials::update_steam(ctx, coord),
        Element::Smoke => materials::update_smoke(ctx, coord),
        Element::Plant => materials::update_plant(ctx, coord),
        Element::Human => agents::update_agent(ctx, coord, &agents::HUMAN),
        Element::Alien => agents::update_agent(ctx, coord, &agents::ALIEN),
        Element::Empty
        | Element::Stone
        | Element::Wood
        | Element::Metal
        | Element::Alloy
        | Element::Glass
        | Element::Crystal
        | Element::HouseHuman
        | Element::HouseAlien => {}
    }
}

fn paint(world: &mut World, center: CellCoord, radius: i32, density: f64, element: Element) -> u32 {
    if radius < 0 {
        return 0;
    }
    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let size = world.grid.size();
    let limit = f64::from(radius);
    let mut count = 0;

    for columns in offset_range(center.column(), radius, size.width()) {
        for rows in offset_range(center.row(), radius, size.height()) {
            let coord = center.offset(columns, rows);
            if !size.contains(coord) {
                continue;
            }
            let distance = (f64::from(columns).powi(2) + f64::from(rows).powi(2)).sqrt();
            if distance > limit {
                continue;
            }
            if !world.rng.gen_bool(density) {
                continue;
            }
            world.grid.set(coord, Cell::new(element));
            count += 1;
        }
    }
    count
}

/// Offsets along one axis that stay within `radius` and inside the grid.
fn offset_range(origin: i32, radius: i32, extent: u32) -> RangeInclusive<i32> {
    let last = i32::try_from(extent).unwrap_or(i32::MAX).saturating_sub(1);
    (-radius).max(origin.saturating_neg())..=radius.min(last.saturating_sub(origin))
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use planet_sandbox_core::{Cell, CellCoord, CellView, GridSize};

    use super::World;

    /// Returns the cell at the provided coordinate, `None` outside the grid.
    #[must_use]
    pub fn cell(world: &World, coord: CellCoord) -> Option<Cell> {
        world.grid.get(coord)
    }

    /// Exposes a read-only view of the live grid.
    #[must_use]
    pub fn cell_view(world: &World) -> CellView<'_> {
        world.grid.view()
    }

    /// Dimensions fixed when the world was configured.
    #[must_use]
    pub fn size(world: &World) -> GridSize {
        world.grid.size()
    }

    /// Number of ticks completed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_rejects_zero_dimensions() {
        assert_eq!(
            World::configure(0, 10, 1).map(|_| ()),
            Err(ConfigureError::ZeroDimension {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn tick_reports_monotonic_index() {
        let mut world = World::configure(4, 4, 1).expect("valid size");
        let mut events = Vec::new();
        apply(&mut world, Command::Tick, &mut events);
        apply(&mut world, Command::Tick, &mut events);
        assert_eq!(
            events,
            vec![
                Event::TimeAdvanced { tick: 1 },
                Event::TimeAdvanced { tick: 2 }
            ]
        );
        assert_eq!(query::tick_index(&world), 2);
    }

    #[test]
    fn negative_radius_paints_nothing() {
        let mut world = World::configure(4, 4, 1).expect("valid size");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::Paint {
                center: CellCoord::new(1, 1),
                radius: -1,
                density: 1.0,
                element: Element::Sand,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::CellsPainted {
                element: Element::Sand,
                count: 0
            }]
        );
    }

    #[test]
    fn nan_density_paints_nothing() {
        let mut world = World::configure(4, 4, 1).expect("valid size");
        assert_eq!(
            paint(&mut world, CellCoord::new(1, 1), 2, f64::NAN, Element::Sand),
            0
        );
    }
}
