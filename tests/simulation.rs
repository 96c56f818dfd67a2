use rand::rngs::StdRng;
use rand::SeedableRng;

use shader_wasm::config::SnakeConfig;
use shader_wasm::input::Command;
use shader_wasm::sim::{Direction, Grid, Phase, Position, Simulation, StepOutcome};

fn manual() -> Simulation {
    let config = SnakeConfig {
        autopilot: false,
        ..SnakeConfig::default()
    };
    Simulation::new(&config, 0.0)
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn starts_centered_heading_left() {
    let sim = manual();
    assert_eq!(sim.head(), Position::new(50, 30));
    assert_eq!(sim.direction(), Direction::Left);
    assert_eq!(sim.tick(), 0);
    assert_eq!(sim.phase(), Phase::Running);
    assert!(sim.grid().cells().iter().all(|&c| c == 0));
    assert_eq!(sim.grid().cells().len(), 100 * 60);
}

#[test]
fn steering_up_moves_towards_positive_y() {
    let mut sim = manual();
    sim.apply(Command::Steer(Direction::Up));
    assert_eq!(sim.step(10.0, &mut rng()), StepOutcome::Moved);
    assert_eq!(sim.head(), Position::new(50, 31));
    assert_eq!(sim.tick(), 1);
    assert_eq!(sim.last_update_ms(), 10.0);
}

#[test]
fn each_direction_moves_one_cell() {
    for direction in Direction::ALL {
        let mut sim = manual();
        sim.steer(direction);
        let before = sim.head();
        sim.step(0.0, &mut rng());
        let (dx, dy) = direction.vector();
        assert_eq!(sim.head(), Position::new(before.x + dx, before.y + dy));
        assert_eq!((dx.abs() + dy.abs()), 1);
    }
}

#[test]
fn stamps_the_cell_being_left() {
    let mut sim = manual();
    let mut r = rng();
    sim.step(0.0, &mut r);
    sim.step(0.0, &mut r);
    sim.step(0.0, &mut r);
    let grid = sim.grid();
    assert_eq!(grid.get(Position::new(50, 30)), Some(0));
    assert_eq!(grid.get(Position::new(49, 30)), Some(1));
    assert_eq!(grid.get(Position::new(48, 30)), Some(2));
    // the current head has not been stamped yet
    assert_eq!(grid.get(Position::new(47, 30)), Some(0));
    assert_eq!(grid.index(Position::new(48, 30)), Some(30 * 100 + 48));
}

#[test]
fn leaving_the_field_ends_the_game_without_moving() {
    let mut sim = manual();
    let mut r = rng();
    for _ in 0..50 {
        assert_eq!(sim.step(1.0, &mut r), StepOutcome::Moved);
    }
    assert_eq!(sim.head(), Position::new(0, 30));
    assert_eq!(sim.tick(), 50);

    assert_eq!(sim.step(2.0, &mut r), StepOutcome::HitWall);
    assert!(sim.is_game_over());
    assert_eq!(sim.head(), Position::new(0, 30));
    assert_eq!(sim.tick(), 50);
    assert_eq!(sim.last_update_ms(), 1.0);
    // last legal cell still carries its mark
    assert_eq!(sim.grid().get(Position::new(0, 30)), Some(50));

    let view = sim.view();
    assert!(view.game_over);
    assert_eq!(view.tick, 50);
}

#[test]
fn tick_after_game_over_restarts_from_the_center() {
    let mut sim = manual();
    let mut r = rng();
    sim.steer(Direction::Down);
    while sim.step(0.0, &mut r) == StepOutcome::Moved {}
    assert!(sim.is_game_over());
    assert_eq!(sim.head(), Position::new(50, 0));

    sim.steer(Direction::Right);
    assert_eq!(sim.step(5.0, &mut r), StepOutcome::Moved);
    assert_eq!(sim.phase(), Phase::Running);
    // reset to the center heading left, then one step from there
    assert_eq!(sim.direction(), Direction::Left);
    assert_eq!(sim.head(), Position::new(49, 30));
    assert_eq!(sim.tick(), 1);
    assert!(sim.grid().cells().iter().all(|&c| c == 0));
}

#[test]
fn reset_restores_initial_state() {
    let mut sim = manual();
    let mut r = rng();
    sim.steer(Direction::Up);
    for _ in 0..5 {
        sim.step(0.0, &mut r);
    }
    sim.reset();
    assert_eq!(sim.head(), Position::new(50, 30));
    assert_eq!(sim.direction(), Direction::Left);
    assert_eq!(sim.tick(), 0);
    assert!(sim.grid().cells().iter().all(|&c| c == 0));
}

#[test]
fn steering_is_ignored_under_autopilot() {
    let mut sim = Simulation::new(&SnakeConfig::default(), 0.0);
    assert!(sim.autopilot_enabled());
    assert!(!sim.steer(Direction::Up));
    assert_eq!(sim.direction(), Direction::Left);

    sim.apply(Command::ToggleAutopilot);
    assert!(!sim.autopilot_enabled());
    assert!(sim.steer(Direction::Up));
    assert_eq!(sim.direction(), Direction::Up);
}

#[test]
fn autopilot_run_keeps_invariants() {
    let mut sim = Simulation::new(&SnakeConfig::default(), 0.0);
    let mut r = StdRng::seed_from_u64(42);

    for _ in 0..20_000 {
        let restarting = sim.is_game_over();
        let before_cells = sim.grid().cells().to_vec();
        let before_head = sim.head();
        let before_tick = sim.tick();
        let before_dir = sim.direction();

        let outcome = sim.step(0.0, &mut r);
        if restarting {
            continue;
        }

        let turn = (sim.direction().index() - before_dir.index()).rem_euclid(4);
        assert_ne!(turn, 2, "autopilot reversed");

        for (after, before) in sim.grid().cells().iter().zip(&before_cells) {
            assert!(after >= before, "trail stamp went backwards");
        }

        match outcome {
            StepOutcome::Moved => {
                assert_eq!(sim.tick(), before_tick + 1);
                let (dx, dy) = sim.direction().vector();
                assert_eq!(sim.head(), Position::new(before_head.x + dx, before_head.y + dy));
                assert!(sim.grid().contains(sim.head()));
            }
            StepOutcome::HitWall => {
                assert_eq!(sim.tick(), before_tick);
                assert_eq!(sim.head(), before_head);
                let next = before_head.offset(sim.direction().vector());
                assert!(!sim.grid().contains(next));
            }
        }
    }
}

#[test]
fn ticks_since_update_is_scaled_by_interval() {
    let mut sim = manual();
    sim.step(100.0, &mut rng());
    let view = sim.view();
    assert_eq!(view.ticks_since_update(125.0, 10), 2.5);
    assert_eq!(view.width, 100);
    assert_eq!(view.height, 60);
}

#[test]
fn custom_grid_size_centers_head() {
    let config = SnakeConfig {
        grid_width: 9,
        grid_height: 4,
        autopilot: false,
        ..SnakeConfig::default()
    };
    let sim = Simulation::new(&config, 0.0);
    assert_eq!(sim.head(), Position::new(4, 2));
    assert_eq!(sim.grid().cells().len(), 36);
}

#[test]
fn grid_rejects_out_of_range_coordinates() {
    let mut grid = Grid::new(100, 60);
    grid.stamp(Position::new(3, 4), 9);
    let before = grid.cells().to_vec();

    assert!(!grid.stamp(Position::new(-1, 0), 5));
    assert!(!grid.stamp(Position::new(100, 0), 5));
    assert!(!grid.stamp(Position::new(0, 60), 5));
    assert!(!grid.stamp(Position::new(0, -1), 5));
    assert_eq!(grid.cells(), &before[..]);

    assert_eq!(grid.get(Position::new(0, 60)), None);
    assert_eq!(grid.get(Position::new(-1, 59)), None);
    assert_eq!(grid.index(Position::new(100, 0)), None);
    assert_eq!(grid.index(Position::new(99, 59)), Some(5999));
    assert_eq!(grid.index(Position::new(0, 0)), Some(0));
    assert_eq!(grid.get(Position::new(3, 4)), Some(9));
}

#[test]
fn trail_texels_mark_the_starting_cell_once_left() {
    let mut sim = manual();
    let origin = 30 * 100 + 50;

    // nothing visited before the first tick
    assert!(sim.view().trail_texels().iter().all(|&t| t == 0));

    let mut r = rng();
    sim.step(0.0, &mut r);
    sim.step(0.0, &mut r);
    let texels = sim.view().trail_texels();
    assert_eq!(texels[origin], 1);
    assert_eq!(texels[origin - 1], 2);
    // current head not stamped yet
    assert_eq!(texels[origin - 2], 0);
    assert_eq!(texels.iter().filter(|&&t| t > 0).count(), 2);
}

#[test]
fn trail_texels_keep_the_last_legal_cell_at_game_over() {
    let mut sim = manual();
    let mut r = rng();
    while sim.step(0.0, &mut r) == StepOutcome::Moved {}
    let view = sim.view();
    let texels = view.trail_texels();
    assert_eq!(texels[30 * 100], 51);
    assert_eq!(texels[30 * 100 + 50], 1);
    assert_eq!(view.origin, Position::new(50, 30));
}
