use std::collections::HashSet;

use pipes_core::{CanvasSize, Direction, PipeColor, PipeId, PipeSnapshot, Thickness};
use pipes_simulation::{Config, Simulation};
use pipes_world::{query, Cell};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn canvas(columns: u32, rows: u32) -> CanvasSize {
    CanvasSize::new(columns, rows).expect("valid canvas")
}

fn simulation(config: Config, size: CanvasSize, seed: u64) -> Simulation<ChaCha8Rng> {
    Simulation::new(config, size, ChaCha8Rng::seed_from_u64(seed))
}

fn only_pipe(simulation: &Simulation<ChaCha8Rng>) -> PipeSnapshot {
    let pipes = query::pipe_view(simulation.world()).into_vec();
    assert_eq!(pipes.len(), 1, "expected a single pipe");
    pipes[0]
}

fn faces_inward_from_edge(size: CanvasSize, pipe: &PipeSnapshot) -> bool {
    let cell = pipe.cell;
    match pipe.heading {
        Direction::Right => cell.column() == 0,
        Direction::Left => cell.column() == size.columns() - 1,
        Direction::Down => cell.row() == 0,
        Direction::Up => cell.row() == size.rows() - 1,
    }
}

#[test]
fn new_simulation_spawns_configured_population() {
    let size = canvas(30, 12);
    let config = Config::new(5, 2_000, 0.02, None, Thickness::Bold, 10).expect("valid config");
    let simulation = simulation(config, size, 1);

    let pipes = query::pipe_view(simulation.world()).into_vec();
    assert_eq!(pipes.len(), 5);
    for pipe in &pipes {
        assert!(size.is_edge(pipe.cell));
        assert!(faces_inward_from_edge(size, pipe), "{pipe:?}");
        assert_eq!(pipe.thickness, Thickness::Bold);
    }
    assert_eq!(simulation.tick_speed(), config.tick_speed());
}

#[test]
fn population_is_conserved_across_ticks() {
    let size = canvas(10, 5);
    let config = Config::new(4, 10_000, 0.02, None, Thickness::Thin, 3).expect("valid config");
    let mut simulation = simulation(config, size, 77);

    for _ in 0..500 {
        simulation.tick();
        assert_eq!(query::pipe_count(simulation.world()), 4);
        for pipe in query::pipe_view(simulation.world()).iter() {
            assert!(size.contains(pipe.cell), "{pipe:?} escaped the canvas");
        }
    }
}

#[test]
fn always_turning_pipe_never_paints_two_straight_segments() {
    let size = canvas(10, 5);
    let config = Config::new(1, 10_000, 0.02, None, Thickness::Thin, 1).expect("valid config");
    let mut simulation = simulation(config, size, 4);
    let mut surviving_steps = 0;

    for _ in 0..200 {
        let before = only_pipe(&simulation);
        simulation.tick();
        let after = only_pipe(&simulation);
        if after.id != before.id {
            continue;
        }

        surviving_steps += 1;
        assert!(before.heading.is_perpendicular_to(after.heading));
        match query::canvas(simulation.world()).cell(after.cell) {
            Some(Cell::Painted { glyph, .. }) => {
                assert!(glyph.shape().is_corner(), "straight glyph at {:?}", after.cell);
            }
            other => panic!("expected a painted corner, found {other:?}"),
        }
    }

    assert!(surviving_steps > 0, "pipe never survived a step");
}

#[test]
fn non_turning_pipe_crosses_canvas_and_is_replaced() {
    let size = canvas(10, 5);
    let config =
        Config::new(1, 10_000, 0.02, None, Thickness::Bold, u32::MAX).expect("valid config");
    let mut simulation = simulation(config, size, 9);
    let mut replacements = 0;

    for _ in 0..100 {
        let before = only_pipe(&simulation);
        simulation.tick();
        let after = only_pipe(&simulation);

        if after.id == before.id {
            assert_eq!(after.heading, before.heading);
            assert_eq!(before.heading.advance(before.cell), Some(after.cell));
        } else {
            replacements += 1;
            let next = before.heading.advance(before.cell);
            assert!(
                next.map_or(true, |cell| !size.contains(cell)),
                "{before:?} retired while inside the canvas"
            );
            assert!(size.is_edge(after.cell));
            assert!(faces_inward_from_edge(size, &after), "{after:?}");
        }
    }

    assert!(replacements >= 5, "only {replacements} replacements");
}

#[test]
fn reset_waits_for_interval_then_blanks_canvas() {
    let size = canvas(10, 5);
    let config = Config::new(3, 25, 0.02, None, Thickness::Bold, 4).expect("valid config");
    let mut simulation = simulation(config, size, 31);

    for _ in 0..24 {
        simulation.tick();
        assert!(!simulation.maybe_reset());
    }
    simulation.tick();
    assert_eq!(simulation.ticks_since_reset(), 25);
    let before: HashSet<PipeId> = query::pipe_view(simulation.world())
        .iter()
        .map(|pipe| pipe.id)
        .collect();
    assert!(query::canvas(simulation.world()).painted_cells() > 0);

    assert!(simulation.maybe_reset());

    assert_eq!(simulation.ticks_since_reset(), 0);
    assert_eq!(query::canvas(simulation.world()).painted_cells(), 0);
    let pipes = query::pipe_view(simulation.world()).into_vec();
    assert_eq!(pipes.len(), 3);
    for pipe in &pipes {
        assert!(!before.contains(&pipe.id), "{:?} survived the reset", pipe.id);
        assert!(size.is_edge(pipe.cell));
        assert!(faces_inward_from_edge(size, pipe), "{pipe:?}");
    }
    assert!(!simulation.maybe_reset());
}

#[test]
fn frame_is_stable_without_mutation() {
    let size = canvas(16, 6);
    let config = Config::new(2, 100, 0.02, None, Thickness::Thin, 5).expect("valid config");
    let mut simulation = simulation(config, size, 5);
    for _ in 0..12 {
        simulation.tick();
    }

    let first = simulation.frame();
    let second = simulation.frame();

    assert_eq!(first, second);
    assert_eq!(first.lines().count(), 6);
}

#[test]
fn color_override_applies_to_every_pipe() {
    let size = canvas(12, 6);
    let config = Config::new(6, 100, 0.02, Some(PipeColor::White), Thickness::Thin, 2)
        .expect("valid config");
    let mut simulation = simulation(config, size, 17);
    for _ in 0..60 {
        simulation.tick();
        assert!(query::pipe_view(simulation.world())
            .iter()
            .all(|pipe| pipe.color == PipeColor::White));
    }

    assert!(simulation.frame().contains("\x1b[37m"));
}
