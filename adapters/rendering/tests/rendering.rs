use std::collections::HashSet;

use glam::Vec2;
use planet_sandbox_core::{Cell, CellCoord, CellView, Command, Element, GridSize, HouseVariant, Rgb};
use planet_sandbox_rendering::{
    color_of, glyph_of, glyph_rows, Brush, CanvasLayout, FrameBuffer,
};

fn grid(width: u32, height: u32) -> GridSize {
    GridSize::new(width, height).expect("valid size")
}

#[test]
fn house_variants_are_colored_individually() {
    let roof = color_of(&Cell::house(Element::HouseHuman, HouseVariant::Roof));
    let wall = color_of(&Cell::house(Element::HouseHuman, HouseVariant::Wall));
    let door = color_of(&Cell::house(Element::HouseHuman, HouseVariant::Door));
    let glass = color_of(&Cell::house(Element::HouseAlien, HouseVariant::Glass));
    let base = color_of(&Cell::house(Element::HouseAlien, HouseVariant::Base));

    assert_eq!(roof, Rgb::new(210, 92, 53));
    assert_eq!(wall, Rgb::new(189, 134, 92));
    assert_eq!(door, Rgb::new(90, 55, 35));
    assert_eq!(glass, Rgb::new(120, 205, 255));
    assert_eq!(base, Rgb::new(100, 40, 150));
}

#[test]
fn every_element_has_a_distinct_glyph() {
    let glyphs: HashSet<char> = Element::ALL.into_iter().map(glyph_of).collect();
    assert_eq!(glyphs.len(), Element::ALL.len());
    assert_eq!(glyph_of(Element::Empty), ' ');
}

#[test]
fn frame_buffer_captures_row_major_pixels() {
    let size = grid(2, 2);
    let cells = [
        Cell::EMPTY,
        Cell::new(Element::Sand),
        Cell::new(Element::Water),
        Cell::new(Element::Lava),
    ];
    let frame = FrameBuffer::capture(CellView::new(&cells, size));

    assert_eq!(frame.size(), size);
    assert_eq!(frame.pixels().len(), 12);
    assert_eq!(&frame.pixels()[3..6], &[196, 155, 84]);
    assert_eq!(
        frame.pixel(CellCoord::new(0, 1)),
        Some(color_of(&Cell::new(Element::Water)))
    );
    assert_eq!(frame.pixel(CellCoord::new(2, 0)), None);
}

#[test]
fn glyph_rows_follow_the_grid() {
    let size = grid(3, 2);
    let cells = [
        Cell::new(Element::Human),
        Cell::EMPTY,
        Cell::new(Element::Alien),
        Cell::new(Element::Stone),
        Cell::new(Element::Stone),
        Cell::new(Element::Stone),
    ];
    assert_eq!(
        glyph_rows(CellView::new(&cells, size)),
        vec!["H A".to_owned(), "###".to_owned()]
    );
}

#[test]
fn pointer_maps_through_a_stretched_canvas() {
    let layout = CanvasLayout::new(
        grid(120, 80),
        CanvasLayout::DEFAULT_CELL_LENGTH,
        Vec2::new(100.0, 50.0),
        Vec2::new(600.0, 400.0),
    )
    .expect("valid layout");

    assert_eq!(layout.cell_at(Vec2::new(100.0, 50.0)), Some(CellCoord::new(0, 0)));
    assert_eq!(layout.cell_at(Vec2::new(112.0, 57.0)), Some(CellCoord::new(2, 1)));
    assert_eq!(layout.cell_at(Vec2::new(699.9, 449.9)), Some(CellCoord::new(119, 79)));
}

#[test]
fn pointer_outside_the_canvas_maps_to_nothing() {
    let layout = CanvasLayout::new(grid(10, 10), 10.0, Vec2::ZERO, Vec2::splat(100.0))
        .expect("valid layout");

    assert_eq!(layout.cell_at(Vec2::new(-0.5, 10.0)), None);
    assert_eq!(layout.cell_at(Vec2::new(10.0, 100.0)), None);
    assert_eq!(layout.cell_at(Vec2::new(f32::NAN, 10.0)), None);
}

#[test]
fn brush_strokes_become_paint_commands() {
    let layout = CanvasLayout::new(grid(10, 10), 10.0, Vec2::ZERO, Vec2::splat(100.0))
        .expect("valid layout");
    let brush = Brush::new(Element::Plant, 2, 0.5);

    assert_eq!(
        layout.stroke_at(Vec2::new(45.0, 15.0), &brush),
        Some(Command::Paint {
            center: CellCoord::new(4, 1),
            radius: 2,
            density: 0.5,
            element: Element::Plant,
        })
    );
    assert_eq!(layout.stroke_at(Vec2::new(150.0, 15.0), &brush), None);
}
