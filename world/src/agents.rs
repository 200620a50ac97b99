//! Foraging and building behaviour shared by both agent kinds.
//!
//! An agent has no identity beyond its grid slot: it is the cell at its
//! coordinates, and it moves by swapping that cell (data included) with a
//! neighbour.

use planet_sandbox_core::{AgentData, Cell, CellCoord, Element, Event, Heading, StructureKind};
use rand::Rng;
use tracing::debug;

use crate::{
    grid::CellStore,
    movement::{random_heading, try_move},
    structures::{find_build_spot, footprint, stamp},
    TickContext,
};

/// Parameters that specialise the shared agent behaviour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct AgentProfile {
    /// Element of the agent itself.
    pub(crate) agent: Element,
    /// Element the agent searches for and harvests.
    pub(crate) resource: Element,
    /// Manhattan radius of the resource search.
    pub(crate) search_radius: i32,
    /// Steering toward resources waits for the task cooldown to expire.
    pub(crate) steer_when_idle_only: bool,
    /// Maximum carried units, `None` when unbounded.
    pub(crate) carry_cap: Option<u32>,
    /// Task cooldown applied after each harvest.
    pub(crate) harvest_cooldown: Option<u32>,
    /// Chance per neighbouring plant of turning it into wood.
    pub(crate) plant_to_wood_chance: Option<f64>,
    /// Carried units required before building.
    pub(crate) build_threshold: u32,
    /// Structure stamped when building.
    pub(crate) structure: StructureKind,
    /// Build cooldown applied after each structure.
    pub(crate) build_cooldown: u32,
}

pub(crate) const HUMAN: AgentProfile = AgentProfile {
    agent: Element::Human,
    resource: Element::Wood,
    search_radius: 8,
    steer_when_idle_only: true,
    carry_cap: Some(8),
    harvest_cooldown: Some(30),
    plant_to_wood_chance: Some(0.05),
    build_threshold: 6,
    structure: StructureKind::HumanHouse,
    build_cooldown: 160,
};

// Crystal carrying is unbounded; only the build threshold drains it.
pub(crate) const ALIEN: AgentProfile = AgentProfile {
    agent: Element::Alien,
    resource: Element::Crystal,
    search_radius: 10,
    steer_when_idle_only: false,
    carry_cap: None,
    harvest_cooldown: None,
    plant_to_wood_chance: None,
    build_threshold: 4,
    structure: StructureKind::AlienDome,
    build_cooldown: 180,
};

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

/// Runs one tick of agent behaviour for the agent at `coord`.
pub(crate) fn update_agent(ctx: &mut TickContext<'_>, coord: CellCoord, profile: &AgentProfile) {
    let Some(mut agent) = ctx.grid.get(coord).and_then(|cell| cell.agent_data().copied()) else {
        return;
    };

    let mut heading = match agent.heading {
        Some(heading) => heading,
        None => random_heading(ctx.rng),
    };
    agent.heading = Some(heading);
    agent.task_cooldown = agent.task_cooldown.saturating_sub(1);
    agent.build_cooldown = agent.build_cooldown.saturating_sub(1);
    ctx.grid.set(coord, Cell::agent(profile.agent, agent));

    if try_move(ctx.grid, coord, 0, 1) {
        return;
    }

    let may_steer = !profile.steer_when_idle_only || agent.task_cooldown == 0;
    if may_steer {
        if let Some(target) =
            locate_resource(ctx.grid, coord, profile.resource, profile.search_radius)
        {
            heading = Heading::from_offset(target.column() - coord.column()).unwrap_or(heading);
        }
    }

    let position = if try_move(ctx.grid, coord, heading.delta(), 0) {
        coord.offset(heading.delta(), 0)
    } else {
        heading = heading.reversed();
        coord
    };
    agent.heading = Some(heading);

    harvest(ctx, coord, profile, &mut agent);
    build(ctx, coord, profile, &mut agent);

    if ctx
        .grid
        .get(position)
        .is_some_and(|cell| cell.element() == profile.agent)
    {
        ctx.grid.set(position, Cell::agent(profile.agent, agent));
    }
}

/// Finds the resource cell closest to `center` by Manhattan distance.
///
/// Ties go to the cell met first in a row-major scan of the search window.
pub(crate) fn locate_resource(
    grid: &CellStore,
    center: CellCoord,
    resource: Element,
    radius: i32,
) -> Option<CellCoord> {
    let limit = radius.unsigned_abs();
    let mut closest: Option<(u32, CellCoord)> = None;
    for rows in -radius..=radius {
        for columns in -radius..=radius {
            let candidate = center.offset(columns, rows);
            if grid.get(candidate).map(|cell| cell.element()) != Some(resource) {
                continue;
            }
            let distance = center.manhattan_distance(candidate);
            if distance > limit {
                continue;
            }
            if closest.map_or(true, |(best, _)| distance < best) {
                closest = Some((distance, candidate));
            }
        }
    }
    closest.map(|(_, coord)| coord)
}

fn harvest(
    ctx: &mut TickContext<'_>,
    center: CellCoord,
    profile: &AgentProfile,
    agent: &mut AgentData,
) {
    for (columns, rows) in NEIGHBOURHOOD {
        let neighbour = center.offset(columns, rows);
        let Some(cell) = ctx.grid.get(neighbour) else {
            continue;
        };
        let element = cell.element();
        let has_room = profile.carry_cap.map_or(true, |cap| agent.carried < cap);
        if element == profile.resource && has_room {
            ctx.grid.set(neighbour, Cell::EMPTY);
            agent.carried = agent.carried.saturating_add(1);
            if let Some(cooldown) = profile.harvest_cooldown {
                agent.task_cooldown = cooldown;
            }
        }
        if let Some(chance) = profile.plant_to_wood_chance {
            if element == Element::Plant && ctx.rng.gen_bool(chance) {
                ctx.grid.set(neighbour, Cell::new(Element::Wood));
            }
        }
    }
}

fn build(
    ctx: &mut TickContext<'_>,
    center: CellCoord,
    profile: &AgentProfile,
    agent: &mut AgentData,
) {
    if agent.carried < profile.build_threshold || agent.build_cooldown != 0 {
        return;
    }
    let (width, height) = footprint(profile.structure);
    let Some(origin) = find_build_spot(ctx.grid, center, width, height) else {
        return;
    };
    stamp(ctx.grid, origin, profile.structure);
    agent.carried -= profile.build_threshold;
    agent.build_cooldown = profile.build_cooldown;
    debug!(
        kind = ?profile.structure,
        column = origin.column(),
        row = origin.row(),
        "structure built"
    );
    ctx.events.push(Event::StructureBuilt {
        kind: profile.structure,
        origin,
    });
}
