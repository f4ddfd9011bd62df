// engine/tests/dynamics_characterization.rs
#![forbid(unsafe_code)]

/**
 * Transition kernel characterization tests.
 *
 * Purpose:
 * - Lock the boundary/obstacle bounce rules and the distance-shaped reward.
 *
 * What is tested:
 * - Leaving the grid is a no-op with the blocked reward and a boundary flag.
 * - Entering an obstacle is a no-op with the blocked reward and an obstacle flag.
 * - Moving closer/farther from the end earns +1/-1.
 * - A unit move always changes Manhattan distance by one, so the neutral reward never fires
 *   under the default model.
 * - Custom reward models flow through `Dynamics`.
 */
use gridworld_engine::{
    Action, Cell, Dynamics, GridSpec, RewardModel, Violation, step,
};

fn open_5x5(start: Cell, end: Cell) -> GridSpec {
    GridSpec::new(5, start, end, []).expect("valid open grid")
}

#[test]
fn stepping_off_the_top_edge_bounces_with_boundary_penalty() {
    let spec = open_5x5(Cell::new(4, 4), Cell::new(0, 2));
    let r = step(Cell::new(0, 0), Action::Up, &spec);
    assert_eq!(r.next_state, Cell::new(0, 0));
    assert_eq!(r.reward, -10.0);
    assert!(r.blocked());
    assert_eq!(r.violation, Some(Violation::Boundary));
}

#[test]
fn every_edge_bounces() {
    let spec = open_5x5(Cell::new(2, 2), Cell::new(1, 1));
    let cases = [
        (Cell::new(0, 3), Action::Up),
        (Cell::new(4, 3), Action::Down),
        (Cell::new(3, 0), Action::Left),
        (Cell::new(3, 4), Action::Right),
    ];
    for (cell, action) in cases {
        let r = step(cell, action, &spec);
        assert_eq!(r.next_state, cell, "{action} from {cell}");
        assert_eq!(r.violation, Some(Violation::Boundary));
        assert_eq!(r.reward, -10.0);
    }
}

#[test]
fn moving_towards_the_end_earns_plus_one() {
    let spec = open_5x5(Cell::new(4, 4), Cell::new(0, 2));
    let r = step(Cell::new(2, 2), Action::Up, &spec);
    assert_eq!(r.next_state, Cell::new(1, 2));
    assert_eq!(r.reward, 1.0);
    assert!(!r.blocked());
}

#[test]
fn moving_away_from_the_end_costs_one() {
    let spec = open_5x5(Cell::new(4, 4), Cell::new(0, 2));
    let r = step(Cell::new(1, 2), Action::Down, &spec);
    assert_eq!(r.next_state, Cell::new(2, 2));
    assert_eq!(r.reward, -1.0);
    assert_eq!(r.violation, None);
}

#[test]
fn stepping_into_an_obstacle_bounces_with_obstacle_penalty() {
    let spec = GridSpec::new(5, Cell::new(0, 0), Cell::new(4, 4), [Cell::new(2, 2)])
        .expect("valid grid");
    let r = step(Cell::new(1, 2), Action::Down, &spec);
    assert_eq!(r.next_state, Cell::new(1, 2));
    assert_eq!(r.reward, -10.0);
    assert_eq!(r.violation, Some(Violation::Obstacle));
}

#[test]
fn unit_moves_never_leave_distance_unchanged() {
    let spec = GridSpec::new(
        7,
        Cell::new(0, 0),
        Cell::new(3, 4),
        [Cell::new(1, 1), Cell::new(5, 2)],
    )
    .expect("valid grid");

    for cell in spec.free_cells() {
        for &action in Action::all() {
            let r = step(cell, action, &spec);
            assert!(
                [-10.0, 1.0, -1.0].contains(&r.reward),
                "{action} from {cell} gave {}",
                r.reward
            );
            if r.blocked() {
                assert_eq!(r.next_state, cell);
            } else {
                assert_eq!(r.next_state.manhattan(cell), 1);
                assert!(!spec.is_obstacle(r.next_state));
            }
        }
    }
}

#[test]
fn custom_reward_model_is_applied() {
    let spec = open_5x5(Cell::new(4, 4), Cell::new(0, 2));
    let rewards = RewardModel {
        blocked: -3.0,
        closer: 2.5,
        farther: -0.5,
        neutral: 0.0,
    };
    let dynamics = Dynamics::new(&spec, rewards);

    assert_eq!(dynamics.step(Cell::new(0, 0), Action::Left).reward, -3.0);
    assert_eq!(dynamics.step(Cell::new(2, 2), Action::Up).reward, 2.5);
    assert_eq!(dynamics.step(Cell::new(2, 2), Action::Down).reward, -0.5);
}

#[test]
fn shifted_matches_action_deltas() {
    let c = Cell::new(2, 2);
    assert_eq!(c.shifted(Action::Up, 5), Some(Cell::new(1, 2)));
    assert_eq!(c.shifted(Action::Down, 5), Some(Cell::new(3, 2)));
    assert_eq!(c.shifted(Action::Left, 5), Some(Cell::new(2, 1)));
    assert_eq!(c.shifted(Action::Right, 5), Some(Cell::new(2, 3)));
    assert_eq!(Cell::new(0, 0).shifted(Action::Up, 5), None);
    assert_eq!(Cell::new(4, 4).shifted(Action::Right, 5), None);
}
