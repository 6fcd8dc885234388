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

//! Delta-error evaluation of candidate moves.
//!
//! The evaluator drives the inner hot loop: given the picked worst variable,
//! it asks every constraint containing it for the hypothetical error delta of
//! each candidate — fresh domain values in standard mode, swap partners in
//! permutation mode — and keeps all candidates achieving the minimum
//! cumulative delta. The per-constraint deltas of those candidates are
//! memoized alongside the sums, so applying the chosen move costs nothing
//! beyond the bookkeeping writes.
//!
//! In permutation mode a swap touches the union of both variables'
//! constraint rows; a bit set marks constraints already counted so shared
//! constraints contribute a single pair-change simulation.
//!
//! All buffers are allocated once and reused across iterations.

use fixedbitset::FixedBitSet;
use kedge_core::num::SolverValue;
use kedge_model::constraint::{Constraint, VariableChange};
use kedge_model::index::VariableIndex;
use kedge_model::variable::Variable;
use smallvec::SmallVec;

/// Evaluates candidate moves and memoizes the best candidates' deltas.
#[derive(Debug, Clone)]
pub struct MoveEvaluator<T> {
    best_delta: f64,

    // Standard mode: candidate values, with per-constraint delta rows
    // flattened in candidate order (row length = adjacency row length).
    candidate_values: Vec<T>,
    value_deltas: Vec<f64>,

    // Permutation mode: candidate swap partners, each with its own
    // constraint-id/delta run delimited by offsets.
    candidate_partners: Vec<VariableIndex>,
    partner_offsets: Vec<usize>,
    partner_constraints: Vec<usize>,
    partner_deltas: Vec<f64>,

    delta_scratch: Vec<f64>,
    union_scratch: Vec<usize>,
    touched: FixedBitSet,
}

impl<T> MoveEvaluator<T>
where
    T: SolverValue,
{
    /// Allocates an evaluator for an instance with `num_constraints`
    /// constraints.
    pub fn new(num_constraints: usize) -> Self {
        Self {
            best_delta: f64::INFINITY,
            candidate_values: Vec::new(),
            value_deltas: Vec::new(),
            candidate_partners: Vec::new(),
            partner_offsets: vec![0],
            partner_constraints: Vec::new(),
            partner_deltas: Vec::new(),
            delta_scratch: Vec::new(),
            union_scratch: Vec::new(),
            touched: FixedBitSet::with_capacity(num_constraints),
        }
    }

    fn reset(&mut self) {
        self.best_delta = f64::INFINITY;
        self.candidate_values.clear();
        self.value_deltas.clear();
        self.candidate_partners.clear();
        self.partner_constraints.clear();
        self.partner_deltas.clear();
        self.partner_offsets.clear();
        self.partner_offsets.push(0);
    }

    /// Sweeps the picked variable's domain, summing per-constraint deltas for
    /// every candidate value other than the current one. Returns the best
    /// cumulative delta (`+inf` when the domain offers no other value).
    pub fn evaluate_values(
        &mut self,
        variable: &Variable<T>,
        row: &[usize],
        constraints: &mut [Box<dyn Constraint<T>>],
    ) -> f64 {
        self.reset();
        let id = variable.id();
        let current = variable.value();

        for &candidate in variable.domain().values() {
            if candidate == current {
                continue;
            }

            self.delta_scratch.clear();
            let mut sum = 0.0;
            for &constraint in row {
                let delta =
                    constraints[constraint].simulate_delta(VariableChange::new(id, current, candidate));
                debug_assert!(
                    !delta.is_nan(),
                    "constraint {} simulated a NaN delta for variable {}",
                    constraint,
                    id
                );
                self.delta_scratch.push(delta);
                sum += delta;
            }

            if sum < self.best_delta {
                self.best_delta = sum;
                self.candidate_values.clear();
                self.value_deltas.clear();
                self.candidate_values.push(candidate);
                self.value_deltas.extend_from_slice(&self.delta_scratch);
            } else if sum == self.best_delta {
                self.candidate_values.push(candidate);
                self.value_deltas.extend_from_slice(&self.delta_scratch);
            }
        }

        self.best_delta
    }

    /// Simulates swapping the picked variable with every other variable,
    /// summing deltas over the union of both constraint rows counted once.
    /// Returns the best cumulative delta (`+inf` when there is no partner).
    pub fn evaluate_swaps(
        &mut self,
        variables: &[Variable<T>],
        picked: VariableIndex,
        var_to_ctrs: &[SmallVec<[usize; 4]>],
        constraints: &mut [Box<dyn Constraint<T>>],
    ) -> f64 {
        self.reset();
        let picked_value = variables[picked.get()].value();

        for other in variables {
            let other_id = other.id();
            if other_id == picked {
                continue;
            }
            let other_value = other.value();

            self.union_scratch.clear();
            for &constraint in &var_to_ctrs[picked.get()] {
                self.touched.insert(constraint);
                self.union_scratch.push(constraint);
            }
            for &constraint in &var_to_ctrs[other_id.get()] {
                if !self.touched.contains(constraint) {
                    self.touched.insert(constraint);
                    self.union_scratch.push(constraint);
                }
            }

            self.delta_scratch.clear();
            let mut sum = 0.0;
            for &constraint in &self.union_scratch {
                let ctr = &mut constraints[constraint];
                let mut changes: SmallVec<[VariableChange<T>; 2]> = SmallVec::new();
                if ctr.has_variable(picked) {
                    changes.push(VariableChange::new(picked, picked_value, other_value));
                }
                if ctr.has_variable(other_id) {
                    changes.push(VariableChange::new(other_id, other_value, picked_value));
                }
                let delta = ctr.simulate_changes(&changes);
                debug_assert!(
                    !delta.is_nan(),
                    "constraint {} simulated a NaN delta for swapping {} and {}",
                    constraint,
                    picked,
                    other_id
                );
                self.delta_scratch.push(delta);
                sum += delta;
            }

            // Release the bits for the next partner.
            for &constraint in &self.union_scratch {
                self.touched.set(constraint, false);
            }

            if sum < self.best_delta {
                self.best_delta = sum;
                self.candidate_partners.clear();
                self.partner_constraints.clear();
                self.partner_deltas.clear();
                self.partner_offsets.clear();
                self.partner_offsets.push(0);
                self.record_partner(other_id);
            } else if sum == self.best_delta {
                self.record_partner(other_id);
            }
        }

        self.best_delta
    }

    fn record_partner(&mut self, partner: VariableIndex) {
        self.candidate_partners.push(partner);
        self.partner_constraints.extend_from_slice(&self.union_scratch);
        self.partner_deltas.extend_from_slice(&self.delta_scratch);
        self.partner_offsets.push(self.partner_constraints.len());
    }

    /// The minimum cumulative delta of the last evaluation.
    #[inline]
    pub fn best_delta(&self) -> f64 {
        self.best_delta
    }

    /// Candidate values achieving the best delta (standard mode).
    #[inline]
    pub fn candidate_values(&self) -> &[T] {
        &self.candidate_values
    }

    /// The memoized per-constraint delta of one candidate value, aligned
    /// with the picked variable's adjacency row.
    #[inline]
    pub fn value_delta(&self, candidate: usize, row_len: usize, position: usize) -> f64 {
        self.value_deltas[candidate * row_len + position]
    }

    /// Candidate swap partners achieving the best delta (permutation mode).
    #[inline]
    pub fn candidate_partners(&self) -> &[VariableIndex] {
        &self.candidate_partners
    }

    /// The memoized `(constraint, delta)` run of one candidate partner.
    #[inline]
    pub fn partner_memo(&self, candidate: usize) -> (&[usize], &[f64]) {
        let start = self.partner_offsets[candidate];
        let end = self.partner_offsets[candidate + 1];
        (
            &self.partner_constraints[start..end],
            &self.partner_deltas[start..end],
        )
    }
}
