use rand::rngs::StdRng;
use rand::SeedableRng;

use shader_wasm::sim::{edge_proximity, Autopilot, Direction, Position};

const W: u32 = 100;
const H: u32 = 60;

#[test]
fn proximity_is_zero_at_center_and_one_at_edges() {
    assert_eq!(edge_proximity(Position::new(50, 30), W, H), 0.0);
    assert_eq!(edge_proximity(Position::new(0, 30), W, H), 1.0);
    assert_eq!(edge_proximity(Position::new(50, 0), W, H), 1.0);
    assert!((edge_proximity(Position::new(99, 30), W, H) - 0.98).abs() < 1e-12);
    // larger axis wins
    assert!((edge_proximity(Position::new(25, 30), W, H) - 0.5).abs() < 1e-12);
}

#[test]
fn fresh_autopilot_holds_course_at_center() {
    let mut pilot = Autopilot::new(60.0);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(pilot.change_probability(Position::new(50, 30), W, H), 0.0);
    let dir = pilot.decide(Position::new(50, 30), W, H, Direction::Up, &mut rng);
    assert_eq!(dir, Direction::Up);
    assert_eq!(pilot.stable_ticks(), 1);
}

#[test]
fn edge_forces_a_quarter_turn() {
    for seed in 0..32 {
        let mut pilot = Autopilot::new(60.0);
        let mut rng = StdRng::seed_from_u64(seed);
        assert!(pilot.change_probability(Position::new(0, 30), W, H).is_infinite());
        let dir = pilot.decide(Position::new(0, 30), W, H, Direction::Left, &mut rng);
        assert!(dir == Direction::Up || dir == Direction::Down, "got {dir:?}");
        assert_eq!(pilot.stable_ticks(), 0);
    }
}

#[test]
fn a_turn_is_certain_once_the_horizon_is_reached() {
    let mut rng = StdRng::seed_from_u64(9);
    let center = Position::new(50, 30);
    let mut pilot = Autopilot::new(60.0);
    let mut dir = Direction::Right;
    let mut turned = false;
    for _ in 0..=60 {
        let next = pilot.decide(center, W, H, dir, &mut rng);
        if next != dir {
            let turn = (next.index() - dir.index()).rem_euclid(4);
            assert!(turn == 1 || turn == 3);
            turned = true;
            break;
        }
        dir = next;
    }
    assert!(turned);
    assert_eq!(pilot.stable_ticks(), 0);
}

#[test]
fn probability_grows_with_stable_ticks() {
    let mut pilot = Autopilot::new(60.0);
    let mut rng = StdRng::seed_from_u64(3);
    let center = Position::new(50, 30);
    // the first decision never turns at the center
    pilot.decide(center, W, H, Direction::Left, &mut rng);
    let p1 = pilot.change_probability(center, W, H);
    assert!((p1 - 1.0 / 60.0).abs() < 1e-12);

    let near_edge = Position::new(50, 3);
    let p_edge = pilot.change_probability(near_edge, W, H);
    assert!(p_edge > p1);
}

#[test]
fn rotation_wraps_both_ways() {
    assert_eq!(Direction::Left.rotated(-1), Direction::Down);
    assert_eq!(Direction::Down.rotated(1), Direction::Left);
    assert_eq!(Direction::Up.rotated(1), Direction::Right);
    assert_eq!(Direction::from_index(-1), Direction::Down);
}
