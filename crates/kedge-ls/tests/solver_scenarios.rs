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

//! End-to-end solver scenarios: knapsack satisfaction and optimization,
//! an unsatisfiable instance, plateau escape, and permutation mode.

use kedge_ls::{SearchEngine, SolveOutcome, TerminationReason};
use kedge_model::constraint::{Constraint, ScopedValues};
use kedge_model::constraints::fix_value::FixValue;
use kedge_model::constraints::linear_sum::LinearSum;
use kedge_model::domain::Domain;
use kedge_model::index::VariableIndex;
use kedge_model::model::{Model, ModelBuilder};
use kedge_model::objective::Objective;
use std::time::Duration;

// Maximize 500·bottle + 650·sandwich, modeled as a negated minimization.
struct MaxValue {
    values: ScopedValues<i32>,
}

impl MaxValue {
    fn new(bottle: VariableIndex, sandwich: VariableIndex) -> Self {
        Self {
            values: ScopedValues::new(vec![bottle, sandwich]),
        }
    }
}

impl Objective<i32> for MaxValue {
    fn name(&self) -> &str {
        "MaxValue"
    }

    fn cost(&self) -> f64 {
        let values = self.values.values();
        -(500.0 * f64::from(values[0]) + 650.0 * f64::from(values[1]))
    }

    fn update_variable(&mut self, variable: VariableIndex, value: i32) {
        if self.values.position(variable).is_some() {
            self.values.set(variable, value);
        }
    }
}

fn knapsack_satisfaction_model() -> (Model<i32>, VariableIndex, VariableIndex) {
    let mut builder: ModelBuilder<i32> = ModelBuilder::new();
    let bottle = builder.add_variable("bottle", Domain::range(0, 51));
    let sandwich = builder.add_variable("sandwich", Domain::range(0, 11));
    builder.add_constraint(LinearSum::at_most(
        vec![bottle, sandwich],
        vec![1.0, 1.25],
        30.0,
    ));
    builder.add_constraint(LinearSum::at_least(
        vec![bottle, sandwich],
        vec![500.0, 650.0],
        15000.0,
    ));
    (builder.build().expect("valid model"), bottle, sandwich)
}

#[test]
fn test_knapsack_satisfaction_finds_a_feasible_assignment() {
    let (model, _, _) = knapsack_satisfaction_model();
    let mut engine = SearchEngine::new(model, false).with_seed(17);
    let outcome = engine.solve(Duration::from_millis(20));

    assert!(outcome.found(), "a solution exists, e.g. (30, 0)");
    assert_eq!(outcome.cost(), 0.0);

    let bottle = f64::from(outcome.solution().values()[0]);
    let sandwich = f64::from(outcome.solution().values()[1]);
    assert!(bottle + 1.25 * sandwich <= 30.0, "capacity respected");
    assert!(500.0 * bottle + 650.0 * sandwich >= 15000.0, "value reached");
}

#[test]
fn test_knapsack_optimization_approaches_the_optimum() {
    let mut builder: ModelBuilder<i32> = ModelBuilder::new();
    let bottle = builder.add_variable("bottle", Domain::range(0, 51));
    let sandwich = builder.add_variable("sandwich", Domain::range(0, 11));
    builder.add_constraint(LinearSum::at_most(
        vec![bottle, sandwich],
        vec![1.0, 1.25],
        30.0,
    ));
    builder.set_objective(MaxValue::new(bottle, sandwich));
    let model = builder.build().expect("valid model");

    let mut engine = SearchEngine::new(model, false).with_seed(23);
    let outcome = engine.solve(Duration::from_millis(10));

    assert!(outcome.found());
    // An optimization run spends the whole budget.
    assert_eq!(outcome.termination_reason(), TerminationReason::TimeLimit);

    let b = f64::from(outcome.solution().values()[0]);
    let s = f64::from(outcome.solution().values()[1]);
    assert!(b + 1.25 * s <= 30.0, "the best solution is feasible");

    // The reported cost is un-negated and consistent with the assignment.
    assert_eq!(outcome.cost(), 500.0 * b + 650.0 * s);
    // The integer optimum is 15200 at (20, 8); the search gets close.
    assert!(outcome.cost() <= 15200.0);
    assert!(
        outcome.cost() >= 14000.0,
        "expected a near-optimal value, got {}",
        outcome.cost()
    );
}

#[test]
fn test_unsatisfiable_instance_reports_the_best_candidate() {
    // x in [0, 4) pinned to the unreachable value 10: the error floor is 7
    // at x = 3.
    let mut builder: ModelBuilder<i32> = ModelBuilder::new();
    let x = builder.add_variable("x", Domain::range(0, 4));
    builder.add_constraint(FixValue::new(x, 10));
    let model = builder.build().expect("valid model");

    let mut engine = SearchEngine::new(model, false).with_seed(5);
    let outcome = engine.solve(Duration::from_millis(1));

    assert!(!outcome.found());
    assert_eq!(outcome.termination_reason(), TerminationReason::TimeLimit);
    assert_eq!(outcome.cost(), 7.0);
    assert_eq!(outcome.solution().values(), &[3]);
}

// Error 0 on (0,0) and (1,1), 1 elsewhere: a two-solution plateau landscape.
struct AgreeOnDiagonal {
    values: ScopedValues<i32>,
}

impl AgreeOnDiagonal {
    fn new(a: VariableIndex, b: VariableIndex) -> Self {
        Self {
            values: ScopedValues::new(vec![a, b]),
        }
    }
}

impl Constraint<i32> for AgreeOnDiagonal {
    fn scope(&self) -> &[VariableIndex] {
        self.values.scope()
    }

    fn error(&self) -> f64 {
        let values = self.values.values();
        if values[0] == values[1] { 0.0 } else { 1.0 }
    }

    fn update_variable(&mut self, variable: VariableIndex, value: i32) {
        self.values.set(variable, value);
    }
}

#[test]
fn test_plateau_landscape_reaches_both_solutions_across_seeds() {
    let mut seen = std::collections::HashSet::new();

    for seed in 0..30 {
        let mut builder: ModelBuilder<i32> = ModelBuilder::new();
        let a = builder.add_variable("a", Domain::range(0, 2));
        let b = builder.add_variable("b", Domain::range(0, 2));
        builder.add_constraint(AgreeOnDiagonal::new(a, b));
        let model = builder.build().expect("valid model");

        let mut engine = SearchEngine::new(model, false).with_seed(seed);
        let outcome = engine.solve(Duration::from_millis(2));
        if outcome.found() {
            seen.insert(outcome.solution().values().to_vec());
        }
    }

    assert!(
        seen.contains(&vec![0, 0]) && seen.contains(&vec![1, 1]),
        "both satisfying assignments must appear over many runs, saw {:?}",
        seen
    );
}

// Error = number of adjacent inversions; zero exactly on the sorted order.
struct SortedOrder {
    values: ScopedValues<i32>,
}

impl SortedOrder {
    fn new(scope: Vec<VariableIndex>) -> Self {
        Self {
            values: ScopedValues::new(scope),
        }
    }
}

impl Constraint<i32> for SortedOrder {
    fn scope(&self) -> &[VariableIndex] {
        self.values.scope()
    }

    fn error(&self) -> f64 {
        let values = self.values.values();
        values
            .windows(2)
            .filter(|window| window[0] > window[1])
            .count() as f64
    }

    fn update_variable(&mut self, variable: VariableIndex, value: i32) {
        self.values.set(variable, value);
    }
}

fn permutation_model(n: usize) -> Model<i32> {
    let mut builder: ModelBuilder<i32> = ModelBuilder::new();
    let mut scope = Vec::new();
    for i in 0..n {
        scope.push(builder.add_variable_starting_at(
            format!("p{}", i),
            Domain::range(0, n as i32),
            i,
        ));
    }
    builder.add_constraint(SortedOrder::new(scope));
    builder.build().expect("valid model")
}

#[test]
fn test_permutation_mode_sorts_by_swapping() {
    let mut engine = SearchEngine::new(permutation_model(4), true).with_seed(13);
    let outcome = engine.solve(Duration::from_millis(20));

    assert!(outcome.found());
    assert_eq!(outcome.solution().values(), &[0, 1, 2, 3]);
}

#[test]
fn test_permutation_mode_preserves_the_value_pool() {
    for seed in 0..10 {
        let mut engine = SearchEngine::new(permutation_model(4), true).with_seed(seed);
        let outcome = engine.solve(Duration::from_millis(2));

        let mut values = outcome.solution().values().to_vec();
        values.sort_unstable();
        assert_eq!(values, vec![0, 1, 2, 3], "swaps never leave the pool");

        // The live variables mirror the reported solution.
        let live: Vec<i32> = engine.model().variables().iter().map(|v| v.value()).collect();
        assert_eq!(live, outcome.solution().values());
    }
}

#[test]
fn test_satisfaction_run_stops_at_the_first_solution() {
    let (model, _, _) = knapsack_satisfaction_model();
    let mut engine = SearchEngine::new(model, false).with_seed(29);
    let outcome: SolveOutcome<i32> = engine.solve(Duration::from_millis(50));

    assert!(outcome.found());
    assert_eq!(outcome.termination_reason(), TerminationReason::Satisfied);
    // Stopping early means the run did not burn the whole budget.
    assert!(outcome.statistics().time_total < Duration::from_millis(50));
}
