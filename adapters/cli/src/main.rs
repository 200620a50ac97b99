#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Planet Sandbox world without a display.

mod config;

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use planet_sandbox_core::{Command, Event, StructureKind};
use planet_sandbox_rendering::glyph_rows;
use planet_sandbox_system_census::Census;
use planet_sandbox_system_playback::{Playback, PlaybackInput};
use planet_sandbox_system_worldgen::WorldGeneration;
use planet_sandbox_world::{self as world, query, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CliArgs, SandboxConfig};

/// Entry point for the Planet Sandbox command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let config = SandboxConfig::resolve(&args)?;
    let stdout = io::stdout();
    run(&config, &mut stdout.lock())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(config: &SandboxConfig, out: &mut impl Write) -> Result<()> {
    let mut world = World::configure(config.width, config.height, config.seed)
        .context("configure world")?;
    let planet = config.planet.planet();
    info!(
        planet = planet.name(),
        width = config.width,
        height = config.height,
        seed = config.seed,
        "{}",
        planet.description()
    );

    let mut commands = Vec::new();
    let mut events = Vec::new();
    WorldGeneration.handle(config.planet, query::size(&world), config.seed, &mut commands);
    apply_all(&mut world, &mut commands, &mut events);

    let mut census = Census::new();
    let mut playback = Playback::new();
    for _ in 0..config.ticks {
        events.clear();
        playback.handle(PlaybackInput::default(), &mut commands);
        apply_all(&mut world, &mut commands, &mut events);
        census.handle(&events, query::cell_view(&world));

        let tick = query::tick_index(&world);
        if config.report_every == 0 || tick % config.report_every != 0 {
            continue;
        }
        if let Some(report) = census.last_report() {
            info!(
                tick,
                occupied = report.occupied(),
                houses = report.structures_built(StructureKind::HumanHouse),
                domes = report.structures_built(StructureKind::AlienDome),
                perished = report.agents_perished(),
                "{report}"
            );
        }
    }

    if config.dump {
        for line in glyph_rows(query::cell_view(&world)) {
            writeln!(out, "{line}").context("write grid dump")?;
        }
    }
    Ok(())
}

fn apply_all(world: &mut World, commands: &mut Vec<Command>, events: &mut Vec<Event>) {
    for command in commands.drain(..) {
        world::apply(world, command, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planet_sandbox_system_worldgen::PlanetId;

    fn small(planet: PlanetId, dump: bool) -> SandboxConfig {
        SandboxConfig {
            width: 40,
            height: 30,
            seed: 3,
            planet,
            ticks: 20,
            report_every: 5,
            dump,
        }
    }

    #[test]
    fn dump_prints_one_line_per_row() {
        let mut out = Vec::new();
        run(&small(PlanetId::Terra, true), &mut out).expect("run succeeds");

        let text = String::from_utf8(out).expect("utf8 dump");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 30);
        assert!(lines.iter().all(|line| line.chars().count() == 40));
        assert!(lines[29].contains(':'), "terra rests on sand");
    }

    #[test]
    fn runs_without_dump_print_nothing() {
        for planet in PlanetId::ALL {
            let mut out = Vec::<u8>::new();
            run(&small(planet, false), &mut out).expect("run succeeds");
            assert!(out.is_empty());
        }
    }

    #[test]
    fn zero_sized_worlds_are_rejected() {
        let config = SandboxConfig {
            width: 0,
            ..small(PlanetId::Terra, false)
        };
        assert!(run(&config, &mut Vec::<u8>::new()).is_err());
    }
}
