#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Planet Sandbox engine.
//!
//! This crate defines the value types and the message surface that connect
//! adapters, the authoritative world, and pure systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to. Systems consume event streams, query immutable
//! [`CellView`] snapshots, and respond exclusively with new command batches.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Remaining ticks assigned to freshly created lava.
pub const LAVA_BASELINE_LIFE: u32 = 80;
/// Remaining ticks assigned to freshly created fire.
pub const FIRE_BASELINE_LIFE: u32 = 25;
/// Remaining ticks assigned to freshly created smoke.
pub const SMOKE_BASELINE_LIFE: u32 = 18;
/// Remaining ticks assigned to freshly created steam.
pub const STEAM_BASELINE_LIFE: u32 = 40;

/// Every element type a grid cell may hold.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    /// Vacant slot. A first-class value, never an absence.
    Empty,
    /// Granular solid that piles diagonally.
    Sand,
    /// Liquid that spreads sideways.
    Water,
    /// Static rock, also the product of cooled lava.
    Stone,
    /// Flowing heat source that ignites fuel and cools into stone.
    Lava,
    /// Rising gas that condenses back into water.
    Steam,
    /// Stationary combustion that spreads to fuel and burns agents.
    Fire,
    /// Rising gas that dissipates into nothing.
    Smoke,
    /// Static fuel harvested by humans.
    Wood,
    /// Slowly spreading vegetation.
    Plant,
    /// Static structural material.
    Metal,
    /// Static structural material.
    Alloy,
    /// Static structural material.
    Glass,
    /// Wood-gathering agent that builds houses.
    Human,
    /// Crystal-gathering agent that builds domes.
    Alien,
    /// Static resource harvested by aliens.
    Crystal,
    /// Building block of a human house.
    HouseHuman,
    /// Building block of an alien dome.
    HouseAlien,
}

impl Element {
    /// All elements in declaration order.
    pub const ALL: [Element; 18] = [
        Element::Empty,
        Element::Sand,
        Element::Water,
        Element::Stone,
        Element::Lava,
        Element::Steam,
        Element::Fire,
        Element::Smoke,
        Element::Wood,
        Element::Plant,
        Element::Metal,
        Element::Alloy,
        Element::Glass,
        Element::Human,
        Element::Alien,
        Element::Crystal,
        Element::HouseHuman,
        Element::HouseAlien,
    ];

    /// Stable lowercase identifier used by configuration files and the CLI.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Sand => "sand",
            Self::Water => "water",
            Self::Stone => "stone",
            Self::Lava => "lava",
            Self::Steam => "steam",
            Self::Fire => "fire",
            Self::Smoke => "smoke",
            Self::Wood => "wood",
            Self::Plant => "plant",
            Self::Metal => "metal",
            Self::Alloy => "alloy",
            Self::Glass => "glass",
            Self::Human => "human",
            Self::Alien => "alien",
            Self::Crystal => "crystal",
            Self::HouseHuman => "house_human",
            Self::HouseAlien => "house_alien",
        }
    }

    /// Position of the element inside [`Element::ALL`].
    #[must_use]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    /// Reports whether another cell may move into a slot holding this element.
    ///
    /// Only vacant slots and the two light gases yield their position.
    #[must_use]
    pub const fn is_displaceable(self) -> bool {
        matches!(self, Self::Empty | Self::Steam | Self::Smoke)
    }

    /// Reports whether the element is one of the autonomous agents.
    #[must_use]
    pub const fn is_agent(self) -> bool {
        matches!(self, Self::Human | Self::Alien)
    }

    /// Reports whether fire and lava turn this element into fire.
    #[must_use]
    pub const fn is_flammable(self) -> bool {
        matches!(self, Self::Wood | Self::Plant)
    }

    /// Remaining ticks a fresh cell of this element starts with, if it decays.
    #[must_use]
    pub const fn baseline_life(self) -> Option<u32> {
        match self {
            Self::Lava => Some(LAVA_BASELINE_LIFE),
            Self::Fire => Some(FIRE_BASELINE_LIFE),
            Self::Smoke => Some(SMOKE_BASELINE_LIFE),
            Self::Steam => Some(STEAM_BASELINE_LIFE),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a known element.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown element `{0}`")]
pub struct UnknownElement(pub String);

impl FromStr for Element {
    type Err = UnknownElement;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        Element::ALL
            .into_iter()
            .find(|element| element.name() == normalized)
            .ok_or_else(|| UnknownElement(value.to_owned()))
    }
}

/// Horizontal bias an agent walks with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
}

impl Heading {
    /// Column offset of a single step along the heading.
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    /// Heading pointing the other way.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Heading matching the sign of a column offset, `None` for zero.
    #[must_use]
    pub const fn from_offset(offset: i32) -> Option<Self> {
        if offset < 0 {
            Some(Self::Left)
        } else if offset > 0 {
            Some(Self::Right)
        } else {
            None
        }
    }
}

/// Persistent state carried by an agent cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentData {
    /// Walking direction, chosen at random on the agent's first update.
    pub heading: Option<Heading>,
    /// Number of resource units carried (wood for humans, crystals for aliens).
    pub carried: u32,
    /// Ticks until the agent may be steered toward a resource again.
    pub task_cooldown: u32,
    /// Ticks until the agent may build again.
    pub build_cooldown: u32,
}

/// Role tag of a structure cell. Only affects presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseVariant {
    /// Top row of a human house.
    Roof,
    /// Side and bottom of a human house.
    Wall,
    /// Doorway of a human house.
    Door,
    /// Upper half of an alien dome.
    Glass,
    /// Lower half of an alien dome.
    Base,
}

/// Element-specific data attached to a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellData {
    /// No ancillary state.
    Inert,
    /// Remaining ticks before a decaying element turns into its product.
    Life {
        /// Ticks left until decay.
        remaining: u32,
    },
    /// Ticks a plant has waited since it last spread.
    Growth {
        /// Ticks since the last successful spread.
        ticks: u32,
    },
    /// Agent memory.
    Agent(AgentData),
    /// Structure role.
    House(HouseVariant),
}

impl CellData {
    /// Data a freshly created cell of the provided element starts with.
    #[must_use]
    pub const fn fresh(element: Element) -> Self {
        match element {
            Element::Lava => Self::Life {
                remaining: LAVA_BASELINE_LIFE,
            },
            Element::Fire => Self::Life {
                remaining: FIRE_BASELINE_LIFE,
            },
            Element::Smoke => Self::Life {
                remaining: SMOKE_BASELINE_LIFE,
            },
            Element::Steam => Self::Life {
                remaining: STEAM_BASELINE_LIFE,
            },
            Element::Plant => Self::Growth { ticks: 0 },
            Element::Human | Element::Alien => Self::Agent(AgentData {
                heading: None,
                carried: 0,
                task_cooldown: 0,
                build_cooldown: 0,
            }),
            Element::HouseHuman => Self::House(HouseVariant::Wall),
            Element::HouseAlien => Self::House(HouseVariant::Base),
            _ => Self::Inert,
        }
    }
}

/// Contents of a single grid slot.
///
/// Cells are plain values. The element and its data variant always agree
/// because cells can only be built through the constructors below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    element: Element,
    data: CellData,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// The vacant cell.
    pub const EMPTY: Cell = Cell {
        element: Element::Empty,
        data: CellData::Inert,
    };

    /// Creates a fresh cell holding the baseline data for its element.
    #[must_use]
    pub const fn new(element: Element) -> Self {
        Self {
            element,
            data: CellData::fresh(element),
        }
    }

    /// Creates a decaying cell with an explicit remaining life.
    ///
    /// A `remaining` of zero starts the cell at its baseline life. Elements
    /// that do not decay ignore `remaining` and receive their fresh data.
    #[must_use]
    pub const fn with_life(element: Element, remaining: u32) -> Self {
        match element.baseline_life() {
            Some(baseline) => Self {
                element,
                data: CellData::Life {
                    remaining: if remaining == 0 { baseline } else { remaining },
                },
            },
            None => Self::new(element),
        }
    }

    /// Creates a structure cell tagged with the provided variant.
    ///
    /// Elements other than the two house types receive their fresh data.
    #[must_use]
    pub const fn house(element: Element, variant: HouseVariant) -> Self {
        match element {
            Element::HouseHuman | Element::HouseAlien => Self {
                element,
                data: CellData::House(variant),
            },
            _ => Self::new(element),
        }
    }

    /// Creates an agent cell carrying the provided memory.
    ///
    /// Non-agent elements receive their fresh data.
    #[must_use]
    pub const fn agent(element: Element, agent: AgentData) -> Self {
        if element.is_agent() {
            Self {
                element,
                data: CellData::Agent(agent),
            }
        } else {
            Self::new(element)
        }
    }

    /// Element held by the cell.
    #[must_use]
    pub const fn element(&self) -> Element {
        self.element
    }

    /// Data attached to the cell.
    #[must_use]
    pub const fn data(&self) -> &CellData {
        &self.data
    }

    /// Reports whether the cell is vacant.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.element, Element::Empty)
    }

    /// Remaining life of a decaying cell.
    #[must_use]
    pub const fn life(&self) -> Option<u32> {
        match self.data {
            CellData::Life { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Mutable access to the remaining life of a decaying cell.
    pub fn life_mut(&mut self) -> Option<&mut u32> {
        match &mut self.data {
            CellData::Life { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Ticks a plant has waited since it last spread.
    #[must_use]
    pub const fn growth(&self) -> Option<u32> {
        match self.data {
            CellData::Growth { ticks } => Some(ticks),
            _ => None,
        }
    }

    /// Mutable access to a plant's growth counter.
    pub fn growth_mut(&mut self) -> Option<&mut u32> {
        match &mut self.data {
            CellData::Growth { ticks } => Some(ticks),
            _ => None,
        }
    }

    /// Memory of an agent cell.
    #[must_use]
    pub const fn agent_data(&self) -> Option<&AgentData> {
        match &self.data {
            CellData::Agent(agent) => Some(agent),
            _ => None,
        }
    }

    /// Role tag of a structure cell.
    #[must_use]
    pub const fn house_variant(&self) -> Option<HouseVariant> {
        match self.data {
            CellData::House(variant) => Some(variant),
            _ => None,
        }
    }
}

/// Opaque 24-bit display color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    red: u8,
    green: u8,
    blue: u8,
}

impl Rgb {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Components as an `[r, g, b]` triple.
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

/// Location of a grid cell. Coordinates may lie outside the grid; every grid
/// operation treats such locations as absent.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index; row 0 is the top of the grid.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index, increasing downward.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Coordinate displaced by the provided column and row offsets.
    #[must_use]
    pub const fn offset(self, columns: i32, rows: i32) -> Self {
        Self {
            column: self.column.saturating_add(columns),
            row: self.row.saturating_add(rows),
        }
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }
}

/// Reasons a grid cannot be configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigureError {
    /// One of the dimensions is zero.
    #[error("grid dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension {
        /// Requested column count.
        width: u32,
        /// Requested row count.
        height: u32,
    },
    /// The dimensions cannot be addressed with signed coordinates or exceed memory indexing.
    #[error("grid dimensions {width}x{height} are too large")]
    TooLarge {
        /// Requested column count.
        width: u32,
        /// Requested row count.
        height: u32,
    },
}

/// Validated dimensions of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Validates the provided dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigureError> {
        if width == 0 || height == 0 {
            return Err(ConfigureError::ZeroDimension { width, height });
        }
        let fits_coords = i32::try_from(width).is_ok() && i32::try_from(height).is_ok();
        let cells = u64::from(width) * u64::from(height);
        if !fits_coords || usize::try_from(cells).is_err() {
            return Err(ConfigureError::TooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the coordinate lies inside `[0, width) x [0, height)`.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.column() >= 0
            && coord.row() >= 0
            && (coord.column() as u32) < self.width
            && (coord.row() as u32) < self.height
    }

    /// Row-major index of an in-bounds coordinate.
    #[must_use]
    pub const fn index(&self, coord: CellCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.row() as usize * self.width as usize + coord.column() as usize)
        } else {
            None
        }
    }

    /// Coordinate of a row-major index.
    #[must_use]
    pub const fn coord_of(&self, index: usize) -> CellCoord {
        let width = self.width as usize;
        CellCoord::new((index % width) as i32, (index / width) as i32)
    }
}

/// Structures agents know how to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    /// 3x3 wooden house built by humans.
    HumanHouse,
    /// 4x4 crystal dome built by aliens.
    AlienDome,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Overwrites a single cell. Ignored outside the grid.
    SetCell {
        /// Cell to overwrite.
        coord: CellCoord,
        /// Replacement contents.
        cell: Cell,
    },
    /// Sprays fresh cells of an element over a disc.
    Paint {
        /// Center of the disc.
        center: CellCoord,
        /// Euclidean radius in cells.
        radius: i32,
        /// Probability in `0.0..=1.0` that each in-radius cell is overwritten.
        density: f64,
        /// Element painted into the selected cells.
        element: Element,
    },
    /// Advances the simulation by exactly one tick.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation advanced one tick.
    TimeAdvanced {
        /// Number of ticks completed since the world was configured.
        tick: u64,
    },
    /// Confirms a paint command and how many cells it overwrote.
    CellsPainted {
        /// Element that was painted.
        element: Element,
        /// Number of cells overwritten.
        count: u32,
    },
    /// Announces that an agent stamped a structure.
    StructureBuilt {
        /// Kind of structure.
        kind: StructureKind,
        /// Upper-left cell of the footprint.
        origin: CellCoord,
    },
    /// Announces that fire turned an agent into smoke.
    AgentPerished {
        /// Element of the agent that died.
        agent: Element,
        /// Cell the agent occupied.
        coord: CellCoord,
    },
}

/// Read-only view into the dense cell grid.
#[derive(Clone, Copy, Debug)]
pub struct CellView<'a> {
    cells: &'a [Cell],
    size: GridSize,
}

impl<'a> CellView<'a> {
    /// Captures a new view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [Cell], size: GridSize) -> Self {
        Self { cells, size }
    }

    /// Returns the cell at the provided coordinate, `None` outside the grid.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<&'a Cell> {
        self.size.index(coord).and_then(|index| self.cells.get(index))
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Cell> + 'a {
        self.cells.iter()
    }

    /// Returns the cells of a single row, `None` outside the grid.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&'a [Cell]> {
        if row >= self.size.height() {
            return None;
        }
        let width = self.size.width() as usize;
        let start = row as usize * width;
        self.cells.get(start..start + width)
    }

    /// Provides the dimensions of the underlying grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }
}
