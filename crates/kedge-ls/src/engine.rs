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

//! The local-search engine.
//!
//! The engine owns a validated model and drives the wall-clock-bounded
//! search: starting from a random configuration, it repeatedly picks one of
//! the worst variables, evaluates candidate moves through incremental
//! delta-cost simulation, applies the best move, and maintains the weak tabu
//! list. Plateaus are walked or escaped by a stochastic restart; strictly
//! worsening neighborhoods trigger a restart outright. Once every constraint
//! is satisfied, an optimization problem hands control to the objective:
//! cost-improving moves are adopted, equal-cost moves walk or restart
//! stochastically, and cost-worsening moves restart.
//!
//! A satisfaction run stops at the first solution; an optimization run
//! spends the entire budget. Ending without a solution is not an error —
//! the best configuration found is still reported.
//!
//! Within one engine the search is strictly single-threaded and
//! synchronous; the only cancellation signal is the timeout, checked at the
//! top of every iteration. Given the same seed and an iteration-equivalent
//! budget, two runs produce the same sequence of moves.

use crate::eval::MoveEvaluator;
use crate::memory::SearchMemory;
use crate::monitor::{NoopMonitor, SearchMonitor};
use crate::params::SearchParameters;
use crate::result::{SolveOutcome, TerminationReason};
use crate::sampling;
use crate::stats::SearchStatistics;
use crate::tabu::WeakTabuList;
use kedge_core::num::{clamp_cost, SolverValue};
use kedge_model::index::VariableIndex;
use kedge_model::model::Model;
use kedge_model::solution::Solution;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;
use std::time::{Duration, Instant};

/// The metaheuristic search engine.
///
/// Construct it with a validated [`Model`] and call [`SearchEngine::solve`]
/// with a wall-clock budget. The engine owns the model for its lifetime;
/// [`SearchEngine::solve`] can be called repeatedly, each run starting from
/// fresh best tracking.
pub struct SearchEngine<T>
where
    T: SolverValue,
{
    model: Model<T>,
    var_to_ctrs: Vec<SmallVec<[usize; 4]>>,
    permutation_problem: bool,
    parameters: SearchParameters,
    rng: ChaCha8Rng,
    memory: SearchMemory<T>,
    tabu: WeakTabuList,
    evaluator: MoveEvaluator<T>,
    worst_scratch: Vec<usize>,
}

impl<T> SearchEngine<T>
where
    T: SolverValue,
{
    /// Creates an engine over a validated model.
    ///
    /// `permutation_problem` switches the neighborhood to value swaps over
    /// the shared pool declared by the variables' start indices.
    pub fn new(model: Model<T>, permutation_problem: bool) -> Self {
        let num_variables = model.num_variables();
        let num_constraints = model.num_constraints();

        let mut var_to_ctrs: Vec<SmallVec<[usize; 4]>> =
            vec![SmallVec::new(); num_variables];
        for (position, constraint) in model.constraints().iter().enumerate() {
            for &variable in constraint.scope() {
                let row = &mut var_to_ctrs[variable.get()];
                if !row.contains(&position) {
                    row.push(position);
                }
            }
        }

        Self {
            model,
            var_to_ctrs,
            permutation_problem,
            parameters: SearchParameters::default(),
            rng: ChaCha8Rng::seed_from_u64(rand::rng().random()),
            memory: SearchMemory::new(num_variables, num_constraints),
            tabu: WeakTabuList::new(num_variables),
            evaluator: MoveEvaluator::new(num_constraints),
            worst_scratch: Vec::with_capacity(num_variables),
        }
    }

    /// Seeds the engine's random generator for reproducible runs.
    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Overrides the search parameters.
    #[inline]
    pub fn with_parameters(mut self, parameters: SearchParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Runs the search under the given wall-clock budget, starting from a
    /// sampled random configuration.
    pub fn solve(&mut self, timeout: Duration) -> SolveOutcome<T> {
        let mut monitor = NoopMonitor;
        self.run(timeout, false, &mut monitor)
    }

    /// Runs the search keeping the current variable assignment as the
    /// starting point of the first restart.
    pub fn resume(&mut self, timeout: Duration) -> SolveOutcome<T> {
        let mut monitor = NoopMonitor;
        self.run(timeout, true, &mut monitor)
    }

    /// Runs the search with a monitor observing the lifecycle.
    pub fn solve_with_monitor<M>(&mut self, timeout: Duration, monitor: &mut M) -> SolveOutcome<T>
    where
        M: SearchMonitor,
    {
        self.run(timeout, false, monitor)
    }

    /// Returns the model.
    #[inline]
    pub fn model(&self) -> &Model<T> {
        &self.model
    }

    /// Returns the search parameters.
    #[inline]
    pub fn parameters(&self) -> &SearchParameters {
        &self.parameters
    }

    /// The cached error of every constraint.
    #[inline]
    pub fn error_constraints(&self) -> &[f64] {
        self.memory.error_constraints()
    }

    /// The aggregate error of every variable.
    #[inline]
    pub fn error_variables(&self) -> &[f64] {
        self.memory.error_variables()
    }

    /// The aggregate error of every variable, zeroed for tabu variables.
    #[inline]
    pub fn error_non_tabu_variables(&self) -> &[f64] {
        self.memory.error_non_tabu_variables()
    }

    /// The weak tabu counters.
    #[inline]
    pub fn weak_tabu(&self) -> &[u32] {
        self.tabu.counters()
    }

    /// The satisfaction error of the live assignment.
    #[inline]
    pub fn current_sat_error(&self) -> f64 {
        self.memory.current_sat_error()
    }

    /// The best satisfaction error observed since the run started.
    #[inline]
    pub fn best_sat_error(&self) -> f64 {
        self.memory.best_sat_error()
    }

    fn run<M>(&mut self, timeout: Duration, no_random_start: bool, monitor: &mut M) -> SolveOutcome<T>
    where
        M: SearchMonitor,
    {
        let start = Instant::now();
        let mut stats = SearchStatistics::default();

        let num_variables = self.model.num_variables();
        let tabu_time_local_min = self.parameters.resolved_tabu_time_local_min(num_variables);
        let tabu_time_selected = self.parameters.resolved_tabu_time_selected(num_variables);
        let plateau_restart_probability = self.parameters.plateau_restart_probability;

        self.memory.reset_run();
        monitor.on_start(&stats);
        self.restart(no_random_start, &mut stats, monitor);

        while start.elapsed() < timeout
            && (self.memory.best_sat_error() > 0.0 || self.model.is_optimization())
        {
            stats.on_iteration();
            self.tabu.decay();
            self.memory.refresh_non_tabu(&self.tabu);

            let picked = self.pick_worst_variable();

            let best_delta = {
                let (variables, constraints, _) = self.model.parts_mut();
                if self.permutation_problem {
                    self.evaluator
                        .evaluate_swaps(variables, picked, &self.var_to_ctrs, constraints)
                } else {
                    self.evaluator.evaluate_values(
                        &variables[picked.get()],
                        &self.var_to_ctrs[picked.get()],
                        constraints,
                    )
                }
            };

            // A strictly worsening neighborhood is a local minimum: restart.
            if best_delta > 0.0 {
                stats.on_local_minimum();
                self.restart(false, &mut stats, monitor);
                continue;
            }

            let prospective = clamp_cost(self.memory.current_sat_error() + best_delta);

            if self.model.is_optimization() && prospective == 0.0 {
                // Optimization handoff: the move lands on (or stays in) the
                // satisfied region; the objective decides what it is worth.
                self.apply_picked_move(picked);
                self.track_sat_bests(&stats, monitor);

                let cost = self.model.objective().cost();
                debug_assert!(!cost.is_nan(), "the objective reported a NaN cost");

                if cost < self.memory.current_opt_cost() {
                    self.memory.set_current_opt_cost(cost);
                    self.tabu.freeze(picked, tabu_time_selected);
                    stats.on_local_move();
                    monitor.on_move_applied(picked, &stats);
                    self.track_opt_best(&stats, monitor);
                } else if cost == self.memory.current_opt_cost() {
                    if self.rng.random_bool(plateau_restart_probability) {
                        stats.on_plateau_local_minimum();
                        self.restart(false, &mut stats, monitor);
                    } else {
                        self.tabu.freeze(picked, tabu_time_local_min);
                        stats.on_plateau_move();
                        monitor.on_move_applied(picked, &stats);
                    }
                } else {
                    stats.on_local_minimum();
                    self.restart(false, &mut stats, monitor);
                }
                continue;
            }

            if best_delta == 0.0 {
                // Plateau in the satisfaction regime: walk it, or escape.
                if self.rng.random_bool(plateau_restart_probability) {
                    stats.on_plateau_local_minimum();
                    self.restart(false, &mut stats, monitor);
                } else {
                    self.apply_picked_move(picked);
                    self.track_sat_bests(&stats, monitor);
                    self.tabu.freeze(picked, tabu_time_local_min);
                    stats.on_plateau_move();
                    monitor.on_move_applied(picked, &stats);
                }
                continue;
            }

            // Strict improvement.
            self.apply_picked_move(picked);
            self.track_sat_bests(&stats, monitor);
            self.tabu.freeze(picked, tabu_time_selected);
            stats.on_local_move();
            monitor.on_move_applied(picked, &stats);
        }

        self.finalize(start, stats, monitor)
    }

    /// Reseeds the configuration and rebuilds every cost aggregate from
    /// scratch. Global best tracking persists across restarts.
    fn restart<M>(&mut self, keep_assignment: bool, stats: &mut SearchStatistics, monitor: &mut M)
    where
        M: SearchMonitor,
    {
        stats.on_restart();
        self.memory.reset_for_restart();
        self.tabu.reset();

        if !keep_assignment {
            let samplings = self.parameters.samplings;
            let permutation_problem = self.permutation_problem;
            let (variables, constraints, _) = self.model.parts_mut();
            sampling::set_initial_configuration(
                variables,
                constraints,
                permutation_problem,
                samplings,
                &mut self.rng,
            );
        }

        self.sync_mirrors();
        self.recompute_errors();
        self.track_sat_bests(stats, monitor);

        // A restart can land on a solution outright; give the objective its
        // first look at it here, since the handoff only runs on moves.
        if self.model.is_optimization() && self.memory.current_sat_error() == 0.0 {
            let cost = self.model.objective().cost();
            if cost < self.memory.current_opt_cost() {
                self.memory.set_current_opt_cost(cost);
            }
            self.track_opt_best(stats, monitor);
        }

        monitor.on_restart(stats);
    }

    /// Broadcasts the live assignment to every constraint and objective
    /// mirror.
    fn sync_mirrors(&mut self) {
        let (variables, constraints, objective) = self.model.parts_mut();
        for constraint in constraints.iter_mut() {
            for position in 0..constraint.scope().len() {
                let variable = constraint.scope()[position];
                constraint.update_variable(variable, variables[variable.get()].value());
            }
        }
        for variable in variables.iter() {
            objective.update_variable(variable.id(), variable.value());
        }
    }

    /// Recomputes the constraint and variable error vectors from scratch.
    fn recompute_errors(&mut self) {
        let mut total = 0.0;
        for constraint in 0..self.model.num_constraints() {
            let error = self.model.constraints()[constraint].error();
            debug_assert!(
                error.is_finite() && error >= 0.0,
                "constraint {} reported an invalid error {}",
                constraint,
                error
            );
            self.memory.set_constraint_error(constraint, error);
            total += error;
        }
        self.memory.set_current_sat_error(clamp_cost(total));
        self.memory.recompute_variable_errors(&self.var_to_ctrs);
        self.memory.refresh_non_tabu(&self.tabu);
    }

    /// Returns a uniform pick among the variables with the largest aggregate
    /// error. With no violation left, every variable ties.
    fn pick_worst_variable(&mut self) -> VariableIndex {
        self.worst_scratch.clear();
        // Start below zero so rounding drift in the incremental aggregates
        // can never leave the candidate list empty.
        let mut worst_error = f64::NEG_INFINITY;
        for (variable, &error) in self.memory.error_variables().iter().enumerate() {
            if error > worst_error {
                worst_error = error;
                self.worst_scratch.clear();
                self.worst_scratch.push(variable);
            } else if error == worst_error {
                self.worst_scratch.push(variable);
            }
        }

        let pick = self.rng.random_range(0..self.worst_scratch.len());
        VariableIndex::new(self.worst_scratch[pick])
    }

    fn apply_picked_move(&mut self, picked: VariableIndex) {
        if self.permutation_problem {
            self.apply_swap_move(picked);
        } else {
            self.apply_value_move(picked);
        }
    }

    /// Applies the chosen candidate value: assigns the variable, folds the
    /// memoized per-constraint deltas into the error vectors, and notifies
    /// the touched constraints and the objective.
    fn apply_value_move(&mut self, picked: VariableIndex) {
        let row_len = self.var_to_ctrs[picked.get()].len();

        let chosen_index = if self.evaluator.candidate_values().len() > 1 {
            let current = self.model.variables()[picked.get()].value();
            let chosen = {
                let (_, _, objective) = self.model.parts_mut();
                objective.heuristic_value(
                    picked,
                    current,
                    self.evaluator.candidate_values(),
                    &mut self.rng,
                )
            };
            match self
                .evaluator
                .candidate_values()
                .iter()
                .position(|&value| value == chosen)
            {
                Some(index) => index,
                None => panic!(
                    "the objective heuristic_value returned a value outside the candidate list"
                ),
            }
        } else {
            0
        };
        let value = self.evaluator.candidate_values()[chosen_index];

        self.model.variables_mut()[picked.get()].set_value(value);

        for position in 0..row_len {
            let constraint = self.var_to_ctrs[picked.get()][position];
            let delta = self.evaluator.value_delta(chosen_index, row_len, position);
            self.memory.apply_constraint_delta(constraint, delta);
            {
                let scope = self.model.constraints()[constraint].scope();
                for index in 0..scope.len() {
                    self.memory.apply_variable_delta(scope[index].get(), delta);
                }
            }
            self.model.constraints_mut()[constraint].update_variable(picked, value);
        }
        self.model.objective_mut().update_variable(picked, value);

        self.memory.apply_sat_delta(self.evaluator.best_delta());
        self.memory.refresh_non_tabu(&self.tabu);
    }

    /// Applies the chosen swap: exchanges the `(index, value)` pairs of the
    /// picked variable and its partner, then folds the memoized union deltas
    /// into the error vectors and notifies the touched mirrors.
    fn apply_swap_move(&mut self, picked: VariableIndex) {
        let chosen_index = if self.evaluator.candidate_partners().len() > 1 {
            let chosen = {
                let (_, _, objective) = self.model.parts_mut();
                objective.heuristic_variable(self.evaluator.candidate_partners(), &mut self.rng)
            };
            match self
                .evaluator
                .candidate_partners()
                .iter()
                .position(|&variable| variable == chosen)
            {
                Some(index) => index,
                None => panic!(
                    "the objective heuristic_variable returned a variable outside the candidate list"
                ),
            }
        } else {
            0
        };
        let partner = self.evaluator.candidate_partners()[chosen_index];

        let variables = self.model.variables_mut();
        let picked_value = variables[picked.get()].value();
        let picked_index = variables[picked.get()].index();
        let partner_value = variables[partner.get()].value();
        let partner_index = variables[partner.get()].index();
        variables[picked.get()].assign_pooled(partner_value, partner_index);
        variables[partner.get()].assign_pooled(picked_value, picked_index);

        let memo_len = self.evaluator.partner_memo(chosen_index).0.len();
        for position in 0..memo_len {
            let (memo_constraints, memo_deltas) = self.evaluator.partner_memo(chosen_index);
            let constraint = memo_constraints[position];
            let delta = memo_deltas[position];

            self.memory.apply_constraint_delta(constraint, delta);
            {
                let scope = self.model.constraints()[constraint].scope();
                for index in 0..scope.len() {
                    self.memory.apply_variable_delta(scope[index].get(), delta);
                }
            }
            let ctr = &mut self.model.constraints_mut()[constraint];
            if ctr.has_variable(picked) {
                ctr.update_variable(picked, partner_value);
            }
            if ctr.has_variable(partner) {
                ctr.update_variable(partner, picked_value);
            }
        }
        {
            let (_, _, objective) = self.model.parts_mut();
            objective.update_variable(picked, partner_value);
            objective.update_variable(partner, picked_value);
        }

        self.memory.apply_sat_delta(self.evaluator.best_delta());
        self.memory.refresh_non_tabu(&self.tabu);
    }

    /// Folds the current satisfaction error into the restart-local and
    /// global bests, snapshotting the assignment on a global improvement.
    fn track_sat_bests<M>(&mut self, stats: &SearchStatistics, monitor: &mut M)
    where
        M: SearchMonitor,
    {
        self.memory.update_restart_best();
        if self.memory.improves_global_best() {
            let current = self.memory.current_sat_error();
            self.memory.set_best_sat_error(current);
            self.memory.snapshot(self.model.variables());
            monitor.on_new_best(current, self.memory.best_opt_cost(), stats);
        }
    }

    /// Folds the current objective cost into the global best, snapshotting
    /// and running the satisfaction post-processing hook on improvement.
    fn track_opt_best<M>(&mut self, stats: &SearchStatistics, monitor: &mut M)
    where
        M: SearchMonitor,
    {
        let cost = self.memory.current_opt_cost();
        if cost < self.memory.best_opt_cost() {
            self.memory.set_best_opt_cost(cost);
            self.memory.snapshot(self.model.variables());
            {
                let (variables, _, objective) = self.model.parts_mut();
                let (best_cost, best_values) = self.memory.best_mut();
                objective.postprocess_satisfaction(variables, best_cost, best_values);
            }
            monitor.on_new_best(
                self.memory.best_sat_error(),
                self.memory.best_opt_cost(),
                stats,
            );
        }
    }

    /// Restores the best assignment, runs the optimization post-processing
    /// hook, and bundles the outcome.
    fn finalize<M>(
        &mut self,
        start: Instant,
        mut stats: SearchStatistics,
        monitor: &mut M,
    ) -> SolveOutcome<T>
    where
        M: SearchMonitor,
    {
        let found = self.memory.best_sat_error() == 0.0;
        let is_optimization = self.model.is_optimization();

        if found && is_optimization {
            {
                let (variables, _, objective) = self.model.parts_mut();
                let (best_cost, best_values) = self.memory.best_mut();
                objective.postprocess_optimization(variables, best_cost, best_values);
            }
            // A maximization problem is modeled as a negated minimization;
            // report the natural sign.
            if self.memory.best_opt_cost() < 0.0 {
                self.memory.negate_best_opt_cost();
            }
        }

        let final_cost = if found && is_optimization {
            self.memory.best_opt_cost()
        } else {
            self.memory.best_sat_error()
        };

        let best_values = self.memory.best_values().to_vec();
        {
            let variables = self.model.variables_mut();
            for (variable, &value) in variables.iter_mut().zip(best_values.iter()) {
                variable.set_value(value);
            }
        }
        self.sync_mirrors();
        self.recompute_errors();

        stats.set_total_time(start.elapsed());
        monitor.on_end(&stats);

        let termination_reason = if found && !is_optimization {
            TerminationReason::Satisfied
        } else {
            TerminationReason::TimeLimit
        };

        SolveOutcome::new(
            found,
            final_cost,
            Solution::new(final_cost, best_values),
            termination_reason,
            stats,
        )
    }
}

impl<T> std::fmt::Debug for SearchEngine<T>
where
    T: SolverValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("model", &self.model)
            .field("permutation_problem", &self.permutation_problem)
            .field("parameters", &self.parameters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kedge_model::constraints::linear_sum::LinearSum;
    use kedge_model::domain::Domain;
    use kedge_model::model::ModelBuilder;

    // A monitor that records lifecycle calls and never interferes.
    #[derive(Default)]
    struct CountingMonitor {
        started: bool,
        ended: bool,
        restarts: u64,
        moves: u64,
        new_bests: u64,
    }

    impl SearchMonitor for CountingMonitor {
        fn name(&self) -> &str {
            "CountingMonitor"
        }

        fn on_start(&mut self, _statistics: &SearchStatistics) {
            self.started = true;
        }

        fn on_restart(&mut self, _statistics: &SearchStatistics) {
            self.restarts += 1;
        }

        fn on_move_applied(&mut self, _variable: VariableIndex, _statistics: &SearchStatistics) {
            self.moves += 1;
        }

        fn on_new_best(&mut self, _sat_error: f64, _opt_cost: f64, _statistics: &SearchStatistics) {
            self.new_bests += 1;
        }

        fn on_end(&mut self, _statistics: &SearchStatistics) {
            self.ended = true;
        }
    }

    fn knapsack_satisfaction() -> Model<i32> {
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
        builder.build().expect("valid model")
    }

    #[test]
    fn test_zero_timeout_still_reports_a_valid_assignment() {
        let mut engine = SearchEngine::new(knapsack_satisfaction(), false).with_seed(7);
        let outcome = engine.solve(Duration::ZERO);

        // One restart's worth of work, nothing more.
        assert_eq!(outcome.statistics().iterations, 0);
        assert_eq!(outcome.statistics().restarts, 1);
        assert_eq!(outcome.solution().num_variables(), 2);

        // The reported assignment respects the domains.
        let bottle = outcome.solution().values()[0];
        let sandwich = outcome.solution().values()[1];
        assert!((0..51).contains(&bottle));
        assert!((0..11).contains(&sandwich));
    }

    #[test]
    fn test_restart_establishes_cost_invariants() {
        let mut engine = SearchEngine::new(knapsack_satisfaction(), false).with_seed(3);
        let _ = engine.solve(Duration::ZERO);

        // current_sat_error == sum of constraint errors.
        let sum: f64 = engine.error_constraints().iter().sum();
        assert!((engine.current_sat_error() - sum).abs() < 1.0e-9);

        // error_variables[v] == sum over the constraints containing v; both
        // variables sit in both constraints here.
        for &variable_error in engine.error_variables() {
            assert!((variable_error - sum).abs() < 1.0e-9);
        }

        // A fresh constraint error query matches the cached vector.
        for (cached, constraint) in engine
            .error_constraints()
            .iter()
            .zip(engine.model().constraints().iter())
        {
            assert!((cached - constraint.error()).abs() < 1.0e-9);
        }
    }

    #[test]
    fn test_monitor_lifecycle_is_complete() {
        let mut engine = SearchEngine::new(knapsack_satisfaction(), false).with_seed(11);
        let mut monitor = CountingMonitor::default();
        let outcome = engine.solve_with_monitor(Duration::from_millis(20), &mut monitor);

        assert!(monitor.started, "monitor should be started");
        assert!(monitor.ended, "monitor should be ended");
        assert!(monitor.restarts >= 1, "at least the initial restart");
        assert_eq!(monitor.restarts, outcome.statistics().restarts);
        assert_eq!(monitor.moves, outcome.statistics().applied_moves());
    }

    #[test]
    fn test_seeded_zero_budget_runs_are_identical() {
        let run = |seed: u64| {
            let mut engine = SearchEngine::new(knapsack_satisfaction(), false).with_seed(seed);
            engine.solve(Duration::ZERO).solution().values().to_vec()
        };
        assert_eq!(run(99), run(99));
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn test_resume_keeps_the_prepared_assignment() {
        let mut engine = SearchEngine::new(knapsack_satisfaction(), false).with_seed(1);
        engine.model.variables_mut()[0].set_value(30);
        engine.model.variables_mut()[1].set_value(0);

        // (30, 0) satisfies both constraints; with a zero budget the outcome
        // must come from the kept assignment, not a random sample.
        let outcome = engine.resume(Duration::ZERO);
        assert!(outcome.found());
        assert_eq!(outcome.solution().values(), &[30, 0]);
    }

    #[test]
    fn test_single_value_domains_never_change() {
        let mut builder: ModelBuilder<i32> = ModelBuilder::new();
        let x = builder.add_variable("x", Domain::new(vec![4]));
        builder.add_constraint(LinearSum::equal(vec![x], vec![1.0], 0.0));
        let model = builder.build().expect("valid model");

        let mut engine = SearchEngine::new(model, false).with_seed(0);
        let outcome = engine.solve(Duration::from_micros(500));
        assert!(!outcome.found());
        assert_eq!(outcome.solution().values(), &[4]);
        assert_eq!(outcome.cost(), 4.0);
    }
}
