// engine/tests/solver_contracts.rs
#![forbid(unsafe_code)]

/**
 * Contract tests for the two sweep loops (policy evaluation, value iteration).
 *
 * Invariants covered:
 * - The end cell is pinned to exactly 100.0 and obstacles stay undefined.
 * - On termination the last sweep changed every cell by less than theta
 *   (checked against the snapshot one sweep earlier, recovered through the sweep cap).
 * - Value iteration dominates the evaluation of any fixed policy.
 * - Greedy ties resolve in Up, Down, Left, Right order.
 * - The sweep cap surfaces `NonConvergence` with the partial table attached.
 * - Bad configs and incomplete policies are rejected before any sweep runs.
 */
use gridworld_engine::{
    Action, Cell, CellValue, ConstantPolicy, GridSpec, PolicyTable, RandomPolicy, SolveError,
    SolverConfig, Stage, SweepCap, evaluate_policy, iterate_values,
};

/// Worst-case gap between two truncated fixed points: 2 * gamma / (1 - gamma) * theta.
const DOMINANCE_TOL: f64 = 2.0 * 9.0 * 0.001 + 1e-9;

fn fixture_spec() -> GridSpec {
    GridSpec::new(
        5,
        Cell::new(0, 0),
        Cell::new(4, 4),
        [Cell::new(2, 2), Cell::new(1, 3)],
    )
    .expect("fixture grid should build")
}

fn assert_pinned(spec: &GridSpec, values: &gridworld_engine::ValueTable) {
    assert_eq!(values.get(spec.end()), CellValue::Defined(100.0));
    for &o in spec.obstacles() {
        assert_eq!(values.get(o), CellValue::Undefined);
        assert!(values.value(o).is_none());
    }
    for cell in spec.free_cells() {
        let v = values.value(cell).expect("free cells carry a number");
        assert!(v.is_finite());
    }
}

#[test]
fn policy_evaluation_pins_end_and_obstacles() {
    let spec = fixture_spec();
    let policy = PolicyTable::tabulate(&spec, &mut RandomPolicy::new(7));
    let eval = evaluate_policy(&spec, &policy, &SolverConfig::default()).expect("converges");
    assert_pinned(&spec, &eval.values);
    assert!(eval.convergence.final_delta < 0.001);
}

#[test]
fn value_iteration_pins_end_and_obstacles() {
    let spec = fixture_spec();
    let vi = iterate_values(&spec, &SolverConfig::default()).expect("converges");
    assert_pinned(&spec, &vi.values);

    assert_eq!(vi.policy.get(spec.end()), None);
    for &o in spec.obstacles() {
        assert_eq!(vi.policy.get(o), None);
    }
    for cell in spec.free_cells() {
        assert!(vi.policy.get(cell).is_some());
    }
}

#[test]
fn partial_tables_are_pinned_too() {
    let spec = fixture_spec();
    let cfg = SolverConfig {
        max_sweeps: SweepCap::Fixed(3),
        ..SolverConfig::default()
    };
    match iterate_values(&spec, &cfg) {
        Err(SolveError::NonConvergence {
            stage,
            sweeps,
            partial,
            ..
        }) => {
            assert_eq!(stage, Stage::ValueIteration);
            assert_eq!(sweeps, 3);
            assert_pinned(&spec, &partial);
        }
        other => panic!("expected NonConvergence, got {other:?}"),
    }
}

#[test]
fn last_sweep_changes_every_cell_by_less_than_theta() {
    let spec = fixture_spec();
    let cfg = SolverConfig::default();

    let vi = iterate_values(&spec, &cfg).expect("converges");
    let n = vi.convergence.sweeps;
    assert!(n > 1);

    let capped = SolverConfig {
        max_sweeps: SweepCap::Fixed(n - 1),
        ..cfg
    };
    let Err(SolveError::NonConvergence { partial, delta, .. }) = iterate_values(&spec, &capped)
    else {
        panic!("one sweep short of convergence must hit the cap");
    };
    assert!(delta >= cfg.theta);
    assert!(vi.values.max_abs_diff(&partial) < cfg.theta);
    assert_eq!(vi.values.max_abs_diff(&partial), vi.convergence.final_delta);

    let policy = PolicyTable::tabulate(&spec, &mut RandomPolicy::new(3));
    let pe = evaluate_policy(&spec, &policy, &cfg).expect("converges");
    let m = pe.convergence.sweeps;
    let capped = SolverConfig {
        max_sweeps: SweepCap::Fixed(m - 1),
        ..cfg
    };
    let Err(SolveError::NonConvergence { partial, stage, .. }) =
        evaluate_policy(&spec, &policy, &capped)
    else {
        panic!("one sweep short of convergence must hit the cap");
    };
    assert_eq!(stage, Stage::PolicyEvaluation);
    assert!(pe.values.max_abs_diff(&partial) < cfg.theta);
}

#[test]
fn value_iteration_dominates_any_fixed_policy() {
    let spec = fixture_spec();
    let cfg = SolverConfig::default();
    let vi = iterate_values(&spec, &cfg).expect("converges");

    let mut policies: Vec<PolicyTable> = Action::all()
        .iter()
        .map(|&a| PolicyTable::tabulate(&spec, &mut ConstantPolicy(a)))
        .collect();
    for seed in 0..8 {
        policies.push(PolicyTable::tabulate(&spec, &mut RandomPolicy::new(seed)));
    }
    policies.push(vi.policy.clone());

    for policy in &policies {
        let pe = evaluate_policy(&spec, policy, &cfg).expect("converges");
        for cell in spec.free_cells() {
            let (Some(v_opt), Some(v_pi)) = (vi.values.value(cell), pe.values.value(cell)) else {
                panic!("free cell {cell} lost its value");
            };
            assert!(
                v_opt + DOMINANCE_TOL >= v_pi,
                "cell {cell}: optimal {v_opt} < policy {v_pi}"
            );
        }
    }
}

#[test]
fn greedy_ties_prefer_down_over_right() {
    // Open grid, symmetric about the main diagonal: from (3,3) and (0,0) Down and
    // Right lead to mirror-image cells with bitwise-equal values.
    let spec = GridSpec::new(5, Cell::new(1, 0), Cell::new(4, 4), []).expect("valid");
    let vi = iterate_values(&spec, &SolverConfig::default()).expect("converges");
    assert_eq!(vi.values.get(Cell::new(4, 3)), vi.values.get(Cell::new(3, 4)));
    assert_eq!(vi.policy.get(Cell::new(3, 3)), Some(Action::Down));
    assert_eq!(vi.policy.get(Cell::new(0, 0)), Some(Action::Down));
}

#[test]
fn greedy_ties_prefer_up_over_left() {
    let spec = GridSpec::new(5, Cell::new(4, 4), Cell::new(0, 0), []).expect("valid");
    let vi = iterate_values(&spec, &SolverConfig::default()).expect("converges");
    assert_eq!(vi.values.get(Cell::new(0, 1)), vi.values.get(Cell::new(1, 0)));
    assert_eq!(vi.policy.get(Cell::new(1, 1)), Some(Action::Up));
    assert_eq!(vi.policy.get(Cell::new(4, 4)), Some(Action::Up));
}

#[test]
fn start_cell_is_an_ordinary_cell() {
    let spec = fixture_spec();
    let vi = iterate_values(&spec, &SolverConfig::default()).expect("converges");
    let v_start = vi.values.value(spec.start()).expect("start has a value");
    // Eight closer-moves from (0,0): sum_{k<8} 0.9^k + 0.9^8 * 100.
    let expected: f64 = (0..8).map(|k| 0.9f64.powi(k)).sum::<f64>() + 0.9f64.powi(8) * 100.0;
    assert!((v_start - expected).abs() < 0.01, "{v_start} vs {expected}");
}

#[test]
fn stuck_policy_converges_to_the_bounce_fixed_point() {
    // Always Up: row 0 bounces forever, V = -10 / (1 - 0.9) = -100.
    let spec = fixture_spec();
    let policy = PolicyTable::tabulate(&spec, &mut ConstantPolicy(Action::Up));
    let pe = evaluate_policy(&spec, &policy, &SolverConfig::default()).expect("converges");
    let v = pe.values.value(Cell::new(0, 1)).expect("defined");
    assert!((v + 100.0).abs() < 0.01, "got {v}");
}

#[test]
fn gamma_one_with_a_bounce_cycle_hits_the_cap() {
    let spec = fixture_spec();
    let policy = PolicyTable::tabulate(&spec, &mut ConstantPolicy(Action::Up));
    let cfg = SolverConfig {
        gamma: 1.0,
        ..SolverConfig::default()
    };
    let err = evaluate_policy(&spec, &policy, &cfg).expect_err("values diverge");
    match err {
        SolveError::NonConvergence { sweeps, delta, .. } => {
            assert_eq!(sweeps, 10 * 5 * 5);
            assert!(delta >= cfg.theta);
        }
        other => panic!("expected NonConvergence, got {other:?}"),
    }
}

#[test]
fn invalid_configs_are_rejected() {
    let spec = fixture_spec();
    for cfg in [
        SolverConfig {
            gamma: 1.5,
            ..SolverConfig::default()
        },
        SolverConfig {
            gamma: f64::NAN,
            ..SolverConfig::default()
        },
        SolverConfig {
            theta: 0.0,
            ..SolverConfig::default()
        },
        SolverConfig {
            terminal_value: f64::INFINITY,
            ..SolverConfig::default()
        },
    ] {
        assert!(matches!(
            iterate_values(&spec, &cfg),
            Err(SolveError::InvalidConfig { .. })
        ));
    }
}

#[test]
fn incomplete_policies_are_rejected() {
    let spec = fixture_spec();
    let cfg = SolverConfig::default();

    let mut policy = PolicyTable::tabulate(&spec, &mut ConstantPolicy(Action::Right));
    policy.set(Cell::new(3, 1), None);
    assert_eq!(
        evaluate_policy(&spec, &policy, &cfg),
        Err(SolveError::MissingAction {
            cell: Cell::new(3, 1)
        })
    );

    let wrong_size = PolicyTable::empty(6);
    assert_eq!(
        evaluate_policy(&spec, &wrong_size, &cfg),
        Err(SolveError::PolicySizeMismatch { policy: 6, grid: 5 })
    );
}
