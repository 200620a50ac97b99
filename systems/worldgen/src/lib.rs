#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic planet presets that populate a freshly configured world.

use std::{fmt, str::FromStr};

use planet_sandbox_core::{Cell, CellCoord, Command, Element, GridSize, Rgb};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

/// Identifies one of the built-in planet presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetId {
    /// Balanced home world.
    #[default]
    Terra,
    /// Volcanic world.
    Pyros,
    /// Ocean world with floating islands.
    Aquarea,
    /// Alien forest world.
    Xylon,
}

impl PlanetId {
    /// Every preset in presentation order.
    pub const ALL: [PlanetId; 4] = [
        PlanetId::Terra,
        PlanetId::Pyros,
        PlanetId::Aquarea,
        PlanetId::Xylon,
    ];

    /// Stable identifier used in configuration files and seed derivation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PlanetId::Terra => "terra",
            PlanetId::Pyros => "pyros",
            PlanetId::Aquarea => "aquarea",
            PlanetId::Xylon => "xylon",
        }
    }

    /// Presentation data for the preset.
    #[must_use]
    pub const fn planet(self) -> &'static Planet {
        match self {
            PlanetId::Terra => &TERRA,
            PlanetId::Pyros => &PYROS,
            PlanetId::Aquarea => &AQUAREA,
            PlanetId::Xylon => &XYLON,
        }
    }
}

impl fmt::Display for PlanetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a planet identifier is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown planet `{0}`, expected one of terra, pyros, aquarea, xylon")]
pub struct UnknownPlanet(pub String);

impl FromStr for PlanetId {
    type Err = UnknownPlanet;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        PlanetId::ALL
            .into_iter()
            .find(|planet| planet.as_str() == normalized)
            .ok_or_else(|| UnknownPlanet(value.to_owned()))
    }
}

/// Display name, blurb and backdrop of a planet preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Planet {
    id: PlanetId,
    name: &'static str,
    description: &'static str,
    sky: Rgb,
}

impl Planet {
    /// Identifier of the preset.
    #[must_use]
    pub const fn id(&self) -> PlanetId {
        self.id
    }

    /// Human readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// One sentence describing the preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Backdrop color drawn behind empty cells.
    #[must_use]
    pub const fn sky(&self) -> Rgb {
        self.sky
    }
}

const TERRA: Planet = Planet {
    id: PlanetId::Terra,
    name: "Terra",
    description: "The classic human home world with a balanced mix of water, forest and fertile ground.",
    sky: Rgb::new(27, 42, 93),
};

const PYROS: Planet = Planet {
    id: PlanetId::Pyros,
    name: "Pyros",
    description: "A volcanic world full of lava. Humans rarely venture here, but metal is plentiful.",
    sky: Rgb::new(88, 26, 26),
};

const AQUAREA: Planet = Planet {
    id: PlanetId::Aquarea,
    name: "Aquarea",
    description: "An ocean world with floating islands, ideal for plant experiments and steam.",
    sky: Rgb::new(20, 68, 94),
};

const XYLON: Planet = Planet {
    id: PlanetId::Xylon,
    name: "Xylon",
    description: "A strange forest world inhabited by aliens who raise shimmering bio-domes.",
    sky: Rgb::new(26, 59, 40),
};

const ISLAND_FIRST_COLUMN: u32 = 10;
const ISLAND_SPACING: usize = 25;
const ISLAND_HALF_WIDTH: i32 = 4;
const ISLAND_HEIGHT: i32 = 5;

/// Pure system that turns a planet preset into the commands populating a world.
#[derive(Debug, Default)]
pub struct WorldGeneration;

impl WorldGeneration {
    /// Emits `SetCell` commands that lay out `planet` on an empty grid of `size`.
    ///
    /// Only non-empty cells produce commands, in row-major order. The same
    /// planet, size and seed always yield the same commands.
    pub fn handle(&mut self, planet: PlanetId, size: GridSize, seed: u64, out: &mut Vec<Command>) {
        let mut rng = ChaCha8Rng::seed_from_u64(derive_planet_seed(seed, planet));
        let mut plan = Plan::new(size);

        match planet {
            PlanetId::Terra => {
                plan.fill_bottom_rows(15, Element::Sand);
                plan.scatter(&mut rng, Element::Water, 450);
                plan.scatter(&mut rng, Element::Wood, 260);
                plan.scatter(&mut rng, Element::Plant, 160);
                plan.scatter(&mut rng, Element::Human, 10);
            }
            PlanetId::Pyros => {
                plan.fill_bottom_rows(12, Element::Stone);
                plan.scatter(&mut rng, Element::Lava, 260);
                plan.scatter(&mut rng, Element::Metal, 200);
                plan.scatter(&mut rng, Element::Fire, 80);
                plan.scatter(&mut rng, Element::Human, 6);
            }
            PlanetId::Aquarea => {
                plan.scatter(&mut rng, Element::Water, 1100);
                plan.raise_islands(&mut rng);
                plan.scatter(&mut rng, Element::Plant, 220);
                plan.scatter(&mut rng, Element::Human, 8);
                plan.scatter(&mut rng, Element::Metal, 120);
            }
            PlanetId::Xylon => {
                plan.fill_bottom_rows(20, Element::Plant);
                plan.scatter(&mut rng, Element::Crystal, 320);
                plan.scatter(&mut rng, Element::Alien, 14);
            }
        }

        let emitted_before = out.len();
        plan.emit(out);
        debug!(
            planet = %planet,
            seed,
            cells = out.len() - emitted_before,
            "planet generated"
        );
    }
}

/// Element layout assembled before any command is emitted.
struct Plan {
    size: GridSize,
    elements: Vec<Element>,
}

impl Plan {
    fn new(size: GridSize) -> Self {
        Self {
            size,
            elements: vec![Element::Empty; size.cell_count()],
        }
    }

    fn put(&mut self, coord: CellCoord, element: Element) {
        if let Some(index) = self.size.index(coord) {
            self.elements[index] = element;
        }
    }

    fn is_empty(&self, coord: CellCoord) -> bool {
        self.size
            .index(coord)
            .is_some_and(|index| self.elements[index] == Element::Empty)
    }

    fn fill_bottom_rows(&mut self, rows: u32, element: Element) {
        let height = self.size.height();
        for row in height.saturating_sub(rows)..height {
            for column in 0..self.size.width() {
                self.put(CellCoord::new(column as i32, row as i32), element);
            }
        }
    }

    /// Makes `attempts` random placements, each landing only on an empty slot.
    fn scatter(&mut self, rng: &mut ChaCha8Rng, element: Element, attempts: u32) {
        for _ in 0..attempts {
            let column = rng.gen_range(0..self.size.width());
            let row = rng.gen_range(0..self.size.height());
            let coord = CellCoord::new(column as i32, row as i32);
            if self.is_empty(coord) {
                self.put(coord, element);
            }
        }
    }

    fn raise_islands(&mut self, rng: &mut ChaCha8Rng) {
        for center in (ISLAND_FIRST_COLUMN..self.size.width()).step_by(ISLAND_SPACING) {
            let top: i32 = rng.gen_range(15..30);
            for row in top..top + ISLAND_HEIGHT {
                for columns in -ISLAND_HALF_WIDTH..=ISLAND_HALF_WIDTH {
                    self.put(CellCoord::new(center as i32 + columns, row), Element::Sand);
                }
            }
        }
    }

    fn emit(&self, out: &mut Vec<Command>) {
        for (index, element) in self.elements.iter().enumerate() {
            if *element == Element::Empty {
                continue;
            }
            out.push(Command::SetCell {
                coord: self.size.coord_of(index),
                cell: Cell::new(*element),
            });
        }
    }
}

fn derive_planet_seed(base: u64, planet: PlanetId) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(base.to_le_bytes());
    hasher.update(planet.as_str().as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
