#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Planet Sandbox adapters.

use glam::Vec2;
use planet_sandbox_core::{
    Cell, CellCoord, CellView, Command, Element, GridSize, HouseVariant, Rgb,
};
use std::{error::Error, fmt};

/// Color a single cell is drawn with.
#[must_use]
pub const fn color_of(cell: &Cell) -> Rgb {
    match cell.element() {
        Element::Empty => Rgb::new(9, 14, 24),
        Element::Sand => Rgb::new(196, 155, 84),
        Element::Water => Rgb::new(70, 165, 255),
        Element::Stone => Rgb::new(143, 147, 153),
        Element::Metal => Rgb::new(174, 181, 198),
        Element::Alloy => Rgb::new(225, 193, 109),
        Element::Glass => Rgb::new(138, 211, 255),
        Element::Lava => Rgb::new(255, 59, 31),
        Element::Steam => Rgb::new(179, 215, 255),
        Element::Smoke => Rgb::new(85, 88, 95),
        Element::Fire => Rgb::new(255, 107, 45),
        Element::Wood => Rgb::new(123, 81, 50),
        Element::Plant => Rgb::new(65, 182, 111),
        Element::Crystal => Rgb::new(162, 92, 255),
        Element::Human => Rgb::new(245, 215, 183),
        Element::Alien => Rgb::new(99, 255, 150),
        Element::HouseHuman => match cell.house_variant() {
            Some(HouseVariant::Roof) => Rgb::new(210, 92, 53),
            Some(HouseVariant::Door) => Rgb::new(90, 55, 35),
            _ => Rgb::new(189, 134, 92),
        },
        Element::HouseAlien => match cell.house_variant() {
            Some(HouseVariant::Glass) => Rgb::new(120, 205, 255),
            _ => Rgb::new(100, 40, 150),
        },
    }
}

/// Single character used when dumping the grid to a terminal.
#[must_use]
pub const fn glyph_of(element: Element) -> char {
    match element {
        Element::Empty => ' ',
        Element::Sand => ':',
        Element::Water => '~',
        Element::Stone => '#',
        Element::Lava => '%',
        Element::Steam => '\'',
        Element::Fire => '^',
        Element::Smoke => '"',
        Element::Wood => '=',
        Element::Plant => '*',
        Element::Metal => 'm',
        Element::Alloy => 'a',
        Element::Glass => 'g',
        Element::Human => 'H',
        Element::Alien => 'A',
        Element::Crystal => '+',
        Element::HouseHuman => '[',
        Element::HouseAlien => 'o',
    }
}

/// Renders every row of the grid as a line of glyphs.
#[must_use]
pub fn glyph_rows(view: CellView<'_>) -> Vec<String> {
    (0..view.size().height())
        .filter_map(|row| view.row(row))
        .map(|cells| cells.iter().map(|cell| glyph_of(cell.element())).collect())
        .collect()
}

/// Row-major RGB pixels of a whole grid, one pixel per cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    size: GridSize,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Number of bytes per pixel.
    pub const CHANNELS: usize = 3;

    /// Captures the colors of every cell in the view.
    #[must_use]
    pub fn capture(view: CellView<'_>) -> Self {
        let mut pixels = Vec::with_capacity(view.size().cell_count() * Self::CHANNELS);
        for cell in view.iter() {
            pixels.extend_from_slice(&color_of(cell).to_array());
        }
        Self {
            size: view.size(),
            pixels,
        }
    }

    /// Dimensions of the captured grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Raw pixel bytes, three per cell.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Color captured for a single cell, `None` outside the grid.
    #[must_use]
    pub fn pixel(&self, coord: CellCoord) -> Option<Rgb> {
        let start = self.size.index(coord)? * Self::CHANNELS;
        match self.pixels.get(start..start + Self::CHANNELS)? {
            [red, green, blue] => Some(Rgb::new(*red, *green, *blue)),
            _ => None,
        }
    }
}

/// Paint brush selected by the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    /// Element sprayed by the brush.
    pub element: Element,
    /// Radius of the brush in cells.
    pub radius: i32,
    /// Chance that each covered cell is overwritten.
    pub density: f64,
}

impl Brush {
    /// Creates a new brush descriptor.
    #[must_use]
    pub const fn new(element: Element, radius: i32, density: f64) -> Self {
        Self {
            element,
            radius,
            density,
        }
    }

    /// Paint command applying the brush around `center`.
    #[must_use]
    pub const fn stroke(&self, center: CellCoord) -> Command {
        Command::Paint {
            center,
            radius: self.radius,
            density: self.density,
            element: self.element,
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Self::new(Element::Sand, 3, 0.8)
    }
}

/// Maps pointer positions on a displayed canvas back to grid cells.
///
/// The canvas backing store holds `cell_length` pixels per cell and may be
/// displayed stretched to any on-screen size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasLayout {
    grid: GridSize,
    cell_length: f32,
    origin: Vec2,
    displayed: Vec2,
}

impl CanvasLayout {
    /// Default backing-store pixels per cell.
    pub const DEFAULT_CELL_LENGTH: f32 = 10.0;

    /// Creates a layout for a canvas whose upper-left corner sits at `origin`
    /// and which is shown `displayed` pixels wide and tall.
    ///
    /// Returns an error when the cell length or the displayed size is not
    /// strictly positive.
    pub fn new(
        grid: GridSize,
        cell_length: f32,
        origin: Vec2,
        displayed: Vec2,
    ) -> Result<Self, RenderingError> {
        if cell_length.is_nan() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }
        if displayed.is_nan() || displayed.min_element() <= 0.0 {
            return Err(RenderingError::DegenerateCanvas {
                width: displayed.x,
                height: displayed.y,
            });
        }
        Ok(Self {
            grid,
            cell_length,
            origin,
            displayed,
        })
    }

    /// Size of the canvas backing store in pixels.
    #[must_use]
    pub fn backing_size(&self) -> Vec2 {
        Vec2::new(self.grid.width() as f32, self.grid.height() as f32) * self.cell_length
    }

    /// Grid cell under `pointer`, `None` when the pointer is off the canvas.
    #[must_use]
    pub fn cell_at(&self, pointer: Vec2) -> Option<CellCoord> {
        let local = pointer - self.origin;
        let inside = local.x >= 0.0
            && local.y >= 0.0
            && local.x < self.displayed.x
            && local.y < self.displayed.y;
        if !inside {
            return None;
        }
        let scale = self.backing_size() / self.displayed;
        let cell = (local * scale / self.cell_length).floor();
        let coord = CellCoord::new(cell.x as i32, cell.y as i32);
        self.grid.contains(coord).then_some(coord)
    }

    /// Paint command for a brush stroke under `pointer`.
    #[must_use]
    pub fn stroke_at(&self, pointer: Vec2, brush: &Brush) -> Option<Command> {
        self.cell_at(pointer).map(|center| brush.stroke(center))
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must cover at least part of a pixel.
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
    /// The displayed canvas must have area.
    DegenerateCanvas {
        /// Displayed width.
        width: f32,
        /// Displayed height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell length must be positive (received {cell_length})")
            }
            Self::DegenerateCanvas { width, height } => {
                write!(f, "canvas must have area (received {width}x{height})")
            }
        }
    }
}

impl Error for RenderingError {}
