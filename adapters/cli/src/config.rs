//! Run configuration assembled from an optional TOML file and command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use planet_sandbox_system_worldgen::PlanetId;
use serde::Deserialize;

/// Seed used when neither the file nor the flags provide one.
pub(crate) const DEFAULT_SEED: u64 = 0x5A4D_B0C5;

/// Command-line arguments accepted by the headless runner.
#[derive(Debug, Parser)]
#[command(
    name = "planet-sandbox",
    about = "Runs a Planet Sandbox world headlessly and reports its population"
)]
pub(crate) struct CliArgs {
    /// Planet preset to generate (terra, pyros, aquarea, xylon).
    #[arg(long)]
    pub(crate) planet: Option<PlanetId>,
    /// Grid width in cells.
    #[arg(long)]
    pub(crate) width: Option<u32>,
    /// Grid height in cells.
    #[arg(long)]
    pub(crate) height: Option<u32>,
    /// Seed for world generation and the simulation.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of ticks to simulate.
    #[arg(long)]
    pub(crate) ticks: Option<u64>,
    /// Log a census every this many ticks, 0 disables reports.
    #[arg(long)]
    pub(crate) report_every: Option<u64>,
    /// TOML file providing defaults for the other options.
    #[arg(long, value_name = "TOML")]
    pub(crate) config: Option<PathBuf>,
    /// Print the final grid as glyphs.
    #[arg(long)]
    pub(crate) dump: bool,
}

/// Fully resolved run configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SandboxConfig {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) seed: u64,
    pub(crate) planet: PlanetId,
    pub(crate) ticks: u64,
    pub(crate) report_every: u64,
    pub(crate) dump: bool,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            width: 120,
            height: 80,
            seed: DEFAULT_SEED,
            planet: PlanetId::Terra,
            ticks: 600,
            report_every: 100,
            dump: false,
        }
    }
}

impl SandboxConfig {
    /// Parses a configuration file body. Missing fields keep their defaults.
    pub(crate) fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse sandbox config TOML")
    }

    /// Reads and parses the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("load {}", path.display()))
    }

    /// Loads the file named by `args`, if any, then lets every flag override it.
    pub(crate) fn resolve(args: &CliArgs) -> Result<Self> {
        let base = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(args))
    }

    fn with_overrides(self, args: &CliArgs) -> Self {
        Self {
            width: args.width.unwrap_or(self.width),
            height: args.height.unwrap_or(self.height),
            seed: args.seed.unwrap_or(self.seed),
            planet: args.planet.unwrap_or(self.planet),
            ticks: args.ticks.unwrap_or(self.ticks),
            report_every: args.report_every.unwrap_or(self.report_every),
            dump: args.dump || self.dump,
        }
    }
}
