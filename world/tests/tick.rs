use planet_sandbox_core::{Cell, CellCoord, Command, Element, Event};
use planet_sandbox_world::{self as world, query, World};

fn place(world: &mut World, column: i32, row: i32, cell: Cell) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::SetCell {
            coord: CellCoord::new(column, row),
            cell,
        },
        &mut events,
    );
}

fn tick(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::Tick, &mut events);
    events
}

fn paint(world: &mut World, column: i32, row: i32, radius: i32, density: f64, element: Element) -> u32 {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Paint {
            center: CellCoord::new(column, row),
            radius,
            density,
            element,
        },
        &mut events,
    );
    match events.as_slice() {
        [Event::CellsPainted { element: painted, count }] if *painted == element => *count,
        other => panic!("unexpected paint events: {other:?}"),
    }
}

fn count(world: &World, element: Element) -> usize {
    query::cell_view(world)
        .iter()
        .filter(|cell| cell.element() == element)
        .count()
}

fn element_at(world: &World, column: i32, row: i32) -> Option<Element> {
    query::cell(world, CellCoord::new(column, row)).map(|cell| cell.element())
}

#[test]
fn cells_displaced_into_unscanned_slots_wait_for_the_next_tick() {
    let mut world = World::configure(1, 3, 5).expect("valid grid");
    place(&mut world, 0, 1, Cell::new(Element::Steam));
    place(&mut world, 0, 2, Cell::new(Element::Smoke));

    let _ = tick(&mut world);

    assert_eq!(
        query::cell(&world, CellCoord::new(0, 1)),
        Some(Cell::with_life(Element::Smoke, 17)),
        "smoke moved up once and was not updated again"
    );
    assert_eq!(
        query::cell(&world, CellCoord::new(0, 2)),
        Some(Cell::with_life(Element::Steam, 40)),
        "displaced steam skipped this tick"
    );
}

#[test]
fn a_falling_column_moves_together_in_one_tick() {
    let mut world = World::configure(1, 4, 5).expect("valid grid");
    for row in 0..3 {
        place(&mut world, 0, row, Cell::new(Element::Sand));
    }

    let _ = tick(&mut world);

    assert_eq!(element_at(&world, 0, 0), Some(Element::Empty));
    for row in 1..4 {
        assert_eq!(element_at(&world, 0, row), Some(Element::Sand));
    }
}

#[test]
fn inert_materials_are_conserved() {
    let mut world = World::configure(16, 12, 21).expect("valid grid");
    for column in 0..16 {
        place(&mut world, column, 11, Cell::new(Element::Stone));
    }
    let _ = paint(&mut world, 4, 3, 3, 0.6, Element::Sand);
    let _ = paint(&mut world, 11, 3, 3, 0.6, Element::Water);
    let tracked = [Element::Sand, Element::Water, Element::Stone];
    let before: Vec<usize> = tracked.iter().map(|element| count(&world, *element)).collect();

    for _ in 0..60 {
        let _ = tick(&mut world);
        let now: Vec<usize> = tracked.iter().map(|element| count(&world, *element)).collect();
        assert_eq!(now, before);
    }
}

#[test]
fn decaying_elements_lose_one_life_per_tick() {
    let cases = [
        (Element::Lava, 80, Cell::new(Element::Stone)),
        (Element::Fire, 25, Cell::with_life(Element::Smoke, 20)),
        (Element::Smoke, 18, Cell::EMPTY),
        (Element::Steam, 40, Cell::new(Element::Water)),
    ];
    for (element, baseline, product) in cases {
        let mut world = World::configure(1, 1, 9).expect("valid grid");
        place(&mut world, 0, 0, Cell::new(element));
        let origin = CellCoord::new(0, 0);
        assert_eq!(
            query::cell(&world, origin).and_then(|cell| cell.life()),
            Some(baseline)
        );

        for elapsed in 1..baseline {
            let _ = tick(&mut world);
            assert_eq!(
                query::cell(&world, origin).and_then(|cell| cell.life()),
                Some(baseline - elapsed),
                "{element} after {elapsed} ticks"
            );
        }
        let _ = tick(&mut world);
        assert_eq!(query::cell(&world, origin), Some(product), "{element} product");
    }
}

#[test]
fn injected_cells_without_life_start_from_the_baseline() {
    let mut world = World::configure(1, 1, 2).expect("valid grid");
    place(&mut world, 0, 0, Cell::with_life(Element::Fire, 0));

    let _ = tick(&mut world);

    let cell = query::cell(&world, CellCoord::new(0, 0)).expect("in bounds");
    assert_eq!(cell.element(), Element::Fire);
    assert_eq!(cell.life(), Some(24));
}

#[test]
fn full_density_paints_the_whole_disc() {
    let mut world = World::configure(11, 11, 2).expect("valid grid");
    place(&mut world, 5, 5, Cell::new(Element::Stone));

    let painted = paint(&mut world, 5, 5, 3, 1.0, Element::Sand);

    let mut expected = 0;
    for row in 0..11 {
        for column in 0..11 {
            let inside = (column - 5) * (column - 5) + (row - 5) * (row - 5) <= 9;
            if inside {
                expected += 1;
            }
            let want = if inside { Element::Sand } else { Element::Empty };
            assert_eq!(element_at(&world, column, row), Some(want), "({column}, {row})");
        }
    }
    assert_eq!(painted, expected);
}

#[test]
fn painting_clips_to_the_grid() {
    let mut world = World::configure(5, 5, 2).expect("valid grid");

    let painted = paint(&mut world, 0, 0, 2, 1.0, Element::Water);

    let expected = (0..=2)
        .flat_map(|column: i32| (0..=2).map(move |row: i32| column * column + row * row))
        .filter(|distance| *distance <= 4)
        .count();
    assert_eq!(painted as usize, expected);
    assert_eq!(count(&world, Element::Water), expected);
}

#[test]
fn zero_density_paints_nothing() {
    let mut world = World::configure(8, 8, 2).expect("valid grid");

    let painted = paint(&mut world, 4, 4, 5, 0.0, Element::Metal);

    assert_eq!(painted, 0);
    assert!(query::cell_view(&world).iter().all(Cell::is_empty));
}

#[test]
fn writes_outside_the_grid_are_ignored() {
    let mut world = World::configure(3, 3, 2).expect("valid grid");
    place(&mut world, -1, 0, Cell::new(Element::Stone));
    place(&mut world, 3, 3, Cell::new(Element::Stone));

    assert!(query::cell_view(&world).iter().all(Cell::is_empty));
    assert_eq!(query::cell(&world, CellCoord::new(3, 0)), None);
}

#[test]
fn every_tick_reports_its_index() {
    let mut world = World::configure(3, 3, 2).expect("valid grid");
    for expected in 1..=5 {
        let events = tick(&mut world);
        assert_eq!(events.last(), Some(&Event::TimeAdvanced { tick: expected }));
    }
    assert_eq!(query::tick_index(&world), 5);
}
