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

//! Cost bookkeeping memory of the search.
//!
//! Holds the aggregate error vectors — per constraint, per variable, and the
//! non-tabu mirror — together with the current satisfaction error, the
//! restart-local bests, the global bests, and the best-assignment snapshot.
//! Buffers are allocated once and reused across restarts and runs.
//!
//! Two maintenance paths keep the vectors consistent: a full recompute used
//! by restarts, and the incremental per-constraint delta application used
//! after every accepted move. At every stable point of the loop the current
//! satisfaction error equals the sum of constraint errors, and each
//! variable's error equals the sum of errors of the constraints containing
//! it (up to the cost epsilon).

use crate::tabu::WeakTabuList;
use kedge_core::num::{clamp_cost, SolverValue};
use kedge_model::variable::Variable;
use smallvec::SmallVec;

/// Aggregate error vectors, best tracking, and the best-assignment snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMemory<T> {
    error_constraints: Vec<f64>,
    error_variables: Vec<f64>,
    error_non_tabu_variables: Vec<f64>,

    current_sat_error: f64,
    current_opt_cost: f64,

    restart_best_sat_error: f64,
    best_sat_error: f64,
    best_opt_cost: f64,

    best_values: Vec<T>,
}

impl<T> SearchMemory<T>
where
    T: SolverValue,
{
    /// Allocates memory for an instance with the given dimensions.
    pub fn new(num_variables: usize, num_constraints: usize) -> Self {
        Self {
            error_constraints: vec![0.0; num_constraints],
            error_variables: vec![0.0; num_variables],
            error_non_tabu_variables: vec![0.0; num_variables],
            current_sat_error: 0.0,
            current_opt_cost: f64::INFINITY,
            restart_best_sat_error: f64::INFINITY,
            best_sat_error: f64::INFINITY,
            best_opt_cost: f64::INFINITY,
            best_values: vec![T::zero(); num_variables],
        }
    }

    /// Resets the global best tracking at the beginning of a run.
    pub fn reset_run(&mut self) {
        self.best_sat_error = f64::INFINITY;
        self.best_opt_cost = f64::INFINITY;
        self.restart_best_sat_error = f64::INFINITY;
        self.current_opt_cost = f64::INFINITY;
    }

    /// Resets the restart-local bests. Global bests persist across restarts.
    pub fn reset_for_restart(&mut self) {
        self.restart_best_sat_error = f64::INFINITY;
        self.current_opt_cost = f64::INFINITY;
    }

    /// Stores a freshly recomputed constraint error.
    #[inline]
    pub fn set_constraint_error(&mut self, constraint: usize, error: f64) {
        self.error_constraints[constraint] = error;
    }

    /// Sets the current satisfaction error (already epsilon-clamped by the
    /// caller or [`Self::apply_sat_delta`]).
    #[inline]
    pub fn set_current_sat_error(&mut self, error: f64) {
        self.current_sat_error = error;
    }

    /// Adds a move's cumulative delta to the current satisfaction error,
    /// clamping rounding noise to zero.
    #[inline]
    pub fn apply_sat_delta(&mut self, delta: f64) {
        self.current_sat_error = clamp_cost(self.current_sat_error + delta);
    }

    /// Adds a per-constraint delta to the constraint error vector.
    #[inline]
    pub fn apply_constraint_delta(&mut self, constraint: usize, delta: f64) {
        self.error_constraints[constraint] += delta;
    }

    /// Adds a per-constraint delta to one variable's aggregate error.
    #[inline]
    pub fn apply_variable_delta(&mut self, variable: usize, delta: f64) {
        self.error_variables[variable] += delta;
    }

    /// Recomputes every variable's aggregate error from the constraint
    /// errors. Used by restarts; the incremental path covers moves.
    pub fn recompute_variable_errors(&mut self, var_to_ctrs: &[SmallVec<[usize; 4]>]) {
        for (variable, row) in var_to_ctrs.iter().enumerate() {
            let mut error = 0.0;
            for &constraint in row {
                error += self.error_constraints[constraint];
            }
            self.error_variables[variable] = error;
        }
    }

    /// Rebuilds the non-tabu mirror: a frozen variable's entry is zero,
    /// a free variable's entry is its aggregate error.
    pub fn refresh_non_tabu(&mut self, tabu: &WeakTabuList) {
        let counters = tabu.counters();
        for (variable, &error) in self.error_variables.iter().enumerate() {
            self.error_non_tabu_variables[variable] = if counters[variable] == 0 {
                error
            } else {
                0.0
            };
        }
    }

    /// Snapshots the current assignment as the global best.
    pub fn snapshot(&mut self, variables: &[Variable<T>]) {
        for (slot, variable) in self.best_values.iter_mut().zip(variables.iter()) {
            *slot = variable.value();
        }
    }

    /// Records the current satisfaction error into the restart-local best.
    #[inline]
    pub fn update_restart_best(&mut self) {
        if self.current_sat_error < self.restart_best_sat_error {
            self.restart_best_sat_error = self.current_sat_error;
        }
    }

    /// Returns `true` if the current satisfaction error beats the global
    /// best.
    #[inline]
    pub fn improves_global_best(&self) -> bool {
        self.current_sat_error < self.best_sat_error
    }

    #[inline]
    pub fn set_best_sat_error(&mut self, error: f64) {
        self.best_sat_error = error;
    }

    #[inline]
    pub fn set_best_opt_cost(&mut self, cost: f64) {
        self.best_opt_cost = cost;
    }

    #[inline]
    pub fn set_current_opt_cost(&mut self, cost: f64) {
        self.current_opt_cost = cost;
    }

    /// Flips the sign of the best objective cost (maximization reporting).
    #[inline]
    pub fn negate_best_opt_cost(&mut self) {
        self.best_opt_cost = -self.best_opt_cost;
    }

    #[inline]
    pub fn error_constraints(&self) -> &[f64] {
        &self.error_constraints
    }

    #[inline]
    pub fn error_variables(&self) -> &[f64] {
        &self.error_variables
    }

    #[inline]
    pub fn error_non_tabu_variables(&self) -> &[f64] {
        &self.error_non_tabu_variables
    }

    #[inline]
    pub fn current_sat_error(&self) -> f64 {
        self.current_sat_error
    }

    #[inline]
    pub fn current_opt_cost(&self) -> f64 {
        self.current_opt_cost
    }

    #[inline]
    pub fn restart_best_sat_error(&self) -> f64 {
        self.restart_best_sat_error
    }

    #[inline]
    pub fn best_sat_error(&self) -> f64 {
        self.best_sat_error
    }

    #[inline]
    pub fn best_opt_cost(&self) -> f64 {
        self.best_opt_cost
    }

    #[inline]
    pub fn best_opt_cost_mut(&mut self) -> &mut f64 {
        &mut self.best_opt_cost
    }

    /// Split access to the best objective cost and the best assignment, for
    /// the post-processing hooks that may rewrite both.
    #[inline]
    pub fn best_mut(&mut self) -> (&mut f64, &mut [T]) {
        (&mut self.best_opt_cost, &mut self.best_values)
    }

    #[inline]
    pub fn best_values(&self) -> &[T] {
        &self.best_values
    }

    #[inline]
    pub fn best_values_mut(&mut self) -> &mut [T] {
        &mut self.best_values
    }
}
