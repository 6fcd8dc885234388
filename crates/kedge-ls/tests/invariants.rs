// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Engine state invariants, observed through the public inspection
//! accessors at the stable points a caller can reach: after construction
//! plus one restart (a zero-budget run) and after a full run.

use kedge_ls::{SearchEngine, SearchMonitor, SearchStatistics};
use kedge_model::constraint::Constraint;
use kedge_model::constraints::linear_sum::LinearSum;
use kedge_model::domain::Domain;
use kedge_model::index::VariableIndex;
use kedge_model::model::{Model, ModelBuilder};
use std::time::Duration;

const TOLERANCE: f64 = 1.0e-9;

// Three variables, two overlapping constraints, deliberately unsatisfiable
// so a run keeps moving for its whole budget.
fn tense_model() -> Model<i32> {
    let mut builder: ModelBuilder<i32> = ModelBuilder::new();
    let x = builder.add_variable("x", Domain::range(0, 10));
    let y = builder.add_variable("y", Domain::range(0, 10));
    let z = builder.add_variable("z", Domain::range(0, 10));
    builder.add_constraint(LinearSum::equal(vec![x, y], vec![1.0, 1.0], 4.0));
    builder.add_constraint(LinearSum::equal(vec![y, z], vec![1.0, 1.0], 25.0));
    builder.build().expect("valid model")
}

fn assert_cost_invariants(engine: &SearchEngine<i32>) {
    // P1: the current satisfaction error is the sum of constraint errors.
    let sum: f64 = engine.error_constraints().iter().sum();
    assert!(
        (engine.current_sat_error() - sum).abs() < TOLERANCE,
        "P1 violated: current {} vs sum {}",
        engine.current_sat_error(),
        sum
    );

    // P2: each variable's error is the sum over the constraints containing
    // it, recomputed here from the scopes.
    for (index, &variable_error) in engine.error_variables().iter().enumerate() {
        let variable = VariableIndex::new(index);
        let expected: f64 = engine
            .model()
            .constraints()
            .iter()
            .zip(engine.error_constraints().iter())
            .filter(|(constraint, _)| constraint.has_variable(variable))
            .map(|(_, &error)| error)
            .sum();
        assert!(
            (variable_error - expected).abs() < TOLERANCE,
            "P2 violated for variable {}: {} vs {}",
            index,
            variable_error,
            expected
        );
    }

    // P3: a fresh error query matches the cached vector.
    for (cached, constraint) in engine
        .error_constraints()
        .iter()
        .zip(engine.model().constraints().iter())
    {
        assert!(
            (cached - constraint.error()).abs() < TOLERANCE,
            "P3 violated: cached {} vs fresh {}",
            cached,
            constraint.error()
        );
    }

    // The non-tabu mirror is the variable error vector masked by the tabu
    // counters.
    for (index, &masked) in engine.error_non_tabu_variables().iter().enumerate() {
        let expected = if engine.weak_tabu()[index] == 0 {
            engine.error_variables()[index]
        } else {
            0.0
        };
        assert!(
            (masked - expected).abs() < TOLERANCE,
            "non-tabu mirror violated for variable {}",
            index
        );
    }
}

#[test]
fn test_invariants_hold_after_a_bare_restart() {
    let mut engine = SearchEngine::new(tense_model(), false).with_seed(2);
    let _ = engine.solve(Duration::ZERO);
    assert_cost_invariants(&engine);
}

#[test]
fn test_invariants_hold_after_a_full_run() {
    let mut engine = SearchEngine::new(tense_model(), false).with_seed(4);
    let outcome = engine.solve(Duration::from_millis(5));
    assert!(outcome.statistics().iterations > 0);
    assert_cost_invariants(&engine);
}

// P4: the best satisfaction error never increases within a run.
struct BestRecorder {
    bests: Vec<f64>,
}

impl SearchMonitor for BestRecorder {
    fn name(&self) -> &str {
        "BestRecorder"
    }

    fn on_start(&mut self, _statistics: &SearchStatistics) {}

    fn on_restart(&mut self, _statistics: &SearchStatistics) {}

    fn on_move_applied(&mut self, _variable: VariableIndex, _statistics: &SearchStatistics) {}

    fn on_new_best(&mut self, sat_error: f64, _opt_cost: f64, _statistics: &SearchStatistics) {
        self.bests.push(sat_error);
    }

    fn on_end(&mut self, _statistics: &SearchStatistics) {}
}

#[test]
fn test_best_sat_error_is_non_increasing() {
    let mut engine = SearchEngine::new(tense_model(), false).with_seed(8);
    let mut monitor = BestRecorder { bests: Vec::new() };
    let _ = engine.solve_with_monitor(Duration::from_millis(5), &mut monitor);

    assert!(!monitor.bests.is_empty());
    for window in monitor.bests.windows(2) {
        assert!(
            window[1] <= window[0],
            "best sat error increased: {:?}",
            monitor.bests
        );
    }
}

#[test]
fn test_values_stay_within_their_domains() {
    let mut engine = SearchEngine::new(tense_model(), false).with_seed(6);
    let outcome = engine.solve(Duration::from_millis(5));

    for (variable, &value) in engine
        .model()
        .variables()
        .iter()
        .zip(outcome.solution().values().iter())
    {
        assert!(variable.domain().contains(value));
        assert!(variable.domain().contains(variable.value()));
    }
}

#[test]
fn test_optimization_keeps_searching_after_satisfaction() {
    use kedge_model::constraint::ScopedValues;
    use kedge_model::objective::Objective;

    struct MinimizeX {
        values: ScopedValues<i32>,
    }

    impl Objective<i32> for MinimizeX {
        fn name(&self) -> &str {
            "MinimizeX"
        }

        fn cost(&self) -> f64 {
            f64::from(self.values.values()[0])
        }

        fn update_variable(&mut self, variable: VariableIndex, value: i32) {
            if self.values.position(variable).is_some() {
                self.values.set(variable, value);
            }
        }
    }

    let mut builder: ModelBuilder<i32> = ModelBuilder::new();
    let x = builder.add_variable("x", Domain::range(0, 10));
    let y = builder.add_variable("y", Domain::range(0, 10));
    // Any assignment with x + y >= 3 is a solution; the objective prefers a
    // small x.
    builder.add_constraint(LinearSum::at_least(vec![x, y], vec![1.0, 1.0], 3.0));
    builder.set_objective(MinimizeX {
        values: ScopedValues::new(vec![x]),
    });
    let model = builder.build().expect("valid model");

    let mut engine = SearchEngine::new(model, false).with_seed(12);
    let outcome = engine.solve(Duration::from_millis(5));

    assert!(outcome.found());
    // The run spent its budget optimizing rather than stopping at the
    // first solution, and drove x to its minimum.
    assert!(outcome.statistics().iterations > 0);
    assert_eq!(outcome.solution().values()[0], 0);
    assert_eq!(outcome.cost(), 0.0);
}

#[test]
fn test_seeded_runs_reproduce_the_same_restart_state() {
    let run = |seed: u64| {
        let mut engine = SearchEngine::new(tense_model(), false).with_seed(seed);
        let outcome = engine.solve(Duration::ZERO);
        (
            outcome.solution().values().to_vec(),
            outcome.cost().to_bits(),
        )
    };
    assert_eq!(run(31), run(31));
    assert_eq!(run(0), run(0));
}
