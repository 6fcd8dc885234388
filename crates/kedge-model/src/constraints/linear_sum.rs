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

//! Linear arithmetic constraints.
//!
//! `LinearSum` relates a weighted sum of variables to a right-hand side:
//! `Σ coeffᵢ·xᵢ ⋈ rhs` for `⋈ ∈ {=, ≤, ≥}`. The error is the deviation from
//! the feasible half-space (absolute deviation for equality). A running
//! difference `Σ coeffᵢ·xᵢ − rhs` is kept incrementally, making both the
//! error query and delta simulation constant-time in the number of changes.
//!
//! Knapsack-style capacity (`≤`) and minimum-value (`≥`) constraints are the
//! typical uses.

use crate::constraint::{Constraint, ScopedValues, VariableChange};
use crate::index::VariableIndex;
use kedge_core::num::{to_cost, SolverValue};

/// The relation between the weighted sum and the right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinearRelation {
    /// `Σ coeffᵢ·xᵢ = rhs`
    Equal,
    /// `Σ coeffᵢ·xᵢ ≤ rhs`
    AtMost,
    /// `Σ coeffᵢ·xᵢ ≥ rhs`
    AtLeast,
}

/// A linear constraint `Σ coeffᵢ·xᵢ ⋈ rhs` with a running-difference cache.
#[derive(Debug, Clone)]
pub struct LinearSum<T> {
    values: ScopedValues<T>,
    coefficients: Vec<f64>,
    relation: LinearRelation,
    rhs: f64,
    current_diff: f64,
}

impl<T> LinearSum<T>
where
    T: SolverValue,
{
    /// Creates a linear constraint over the given scope.
    ///
    /// # Panics
    ///
    /// Panics if `scope` and `coefficients` differ in length.
    pub fn new(
        scope: Vec<VariableIndex>,
        coefficients: Vec<f64>,
        relation: LinearRelation,
        rhs: f64,
    ) -> Self {
        assert_eq!(
            scope.len(),
            coefficients.len(),
            "called `LinearSum::new` with inconsistent lengths: scope.len() = {}, coefficients.len() = {}",
            scope.len(),
            coefficients.len()
        );

        Self {
            values: ScopedValues::new(scope),
            coefficients,
            relation,
            rhs,
            // All mirrored values start at zero.
            current_diff: -rhs,
        }
    }

    /// Creates `Σ coeffᵢ·xᵢ = rhs`.
    #[inline]
    pub fn equal(scope: Vec<VariableIndex>, coefficients: Vec<f64>, rhs: f64) -> Self {
        Self::new(scope, coefficients, LinearRelation::Equal, rhs)
    }

    /// Creates `Σ coeffᵢ·xᵢ ≤ rhs`.
    #[inline]
    pub fn at_most(scope: Vec<VariableIndex>, coefficients: Vec<f64>, rhs: f64) -> Self {
        Self::new(scope, coefficients, LinearRelation::AtMost, rhs)
    }

    /// Creates `Σ coeffᵢ·xᵢ ≥ rhs`.
    #[inline]
    pub fn at_least(scope: Vec<VariableIndex>, coefficients: Vec<f64>, rhs: f64) -> Self {
        Self::new(scope, coefficients, LinearRelation::AtLeast, rhs)
    }

    #[inline]
    fn error_of(&self, diff: f64) -> f64 {
        match self.relation {
            LinearRelation::Equal => diff.abs(),
            LinearRelation::AtMost => diff.max(0.0),
            LinearRelation::AtLeast => (-diff).max(0.0),
        }
    }
}

impl<T> Constraint<T> for LinearSum<T>
where
    T: SolverValue,
{
    fn scope(&self) -> &[VariableIndex] {
        self.values.scope()
    }

    fn error(&self) -> f64 {
        self.error_of(self.current_diff)
    }

    fn update_variable(&mut self, variable: VariableIndex, value: T) {
        let position = match self.values.position(variable) {
            Some(position) => position,
            None => panic!(
                "called `LinearSum::update_variable` with {} outside the scope",
                variable
            ),
        };
        let previous = self.values.set(variable, value);
        self.current_diff += self.coefficients[position] * (to_cost(value) - to_cost(previous));
    }

    fn simulate_changes(&mut self, changes: &[VariableChange<T>]) -> f64 {
        let mut diff = self.current_diff;
        for change in changes {
            let position = match self.values.position(change.variable) {
                Some(position) => position,
                None => panic!(
                    "called `LinearSum::simulate_changes` with {} outside the scope",
                    change.variable
                ),
            };
            diff += self.coefficients[position]
                * (to_cost(change.candidate) - to_cost(change.current));
        }
        self.error_of(diff) - self.error_of(self.current_diff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vi(index: usize) -> VariableIndex {
        VariableIndex::new(index)
    }

    fn knapsack_capacity() -> LinearSum<i32> {
        // 1·bottle + 1.25·sandwich <= 30
        LinearSum::at_most(vec![vi(0), vi(1)], vec![1.0, 1.25], 30.0)
    }

    #[test]
    #[should_panic(expected = "inconsistent lengths")]
    fn test_mismatched_lengths_panic() {
        let _ = LinearSum::<i32>::equal(vec![vi(0)], vec![1.0, 2.0], 0.0);
    }

    #[test]
    fn test_at_most_error_is_one_sided() {
        let mut c = knapsack_capacity();
        c.update_variable(vi(0), 30);
        c.update_variable(vi(1), 0);
        assert_eq!(c.error(), 0.0);

        c.update_variable(vi(1), 8);
        // 30 + 10 = 40 exceeds the capacity by 10.
        assert_eq!(c.error(), 10.0);
    }

    #[test]
    fn test_at_least_error_is_one_sided() {
        // 500·bottle + 650·sandwich >= 15000
        let mut c = LinearSum::at_least(vec![vi(0), vi(1)], vec![500.0, 650.0], 15000.0);
        c.update_variable(vi(0), 30);
        assert_eq!(c.error(), 0.0);

        c.update_variable(vi(0), 20);
        assert_eq!(c.error(), 5000.0);
    }

    #[test]
    fn test_equal_error_is_absolute() {
        let mut c = LinearSum::equal(vec![vi(0), vi(1)], vec![1.0, 1.0], 10.0);
        c.update_variable(vi(0), 4);
        c.update_variable(vi(1), 4);
        assert_eq!(c.error(), 2.0);

        c.update_variable(vi(0), 8);
        assert_eq!(c.error(), 2.0);
    }

    #[test]
    fn test_simulation_matches_applied_error_and_rolls_back() {
        let mut c = knapsack_capacity();
        c.update_variable(vi(0), 28);
        c.update_variable(vi(1), 4);
        // 28 + 5 = 33 -> error 3
        assert_eq!(c.error(), 3.0);

        let delta = c.simulate_delta(VariableChange::new(vi(1), 4, 0));
        assert_eq!(delta, -3.0);
        assert_eq!(c.error(), 3.0);

        // Pair change: move weight between the two items.
        let changes = [
            VariableChange::new(vi(0), 28, 20),
            VariableChange::new(vi(1), 4, 8),
        ];
        // 20 + 10 = 30 -> error 0, delta -3
        assert_eq!(c.simulate_changes(&changes), -3.0);
        assert_eq!(c.error(), 3.0);
    }

    #[test]
    fn test_incremental_diff_tracks_repeated_updates() {
        let mut c = LinearSum::equal(vec![vi(0)], vec![2.0], 6.0);
        for value in [0, 1, 5, 3, 3, -2] {
            c.update_variable(vi(0), value);
        }
        // 2·(-2) - 6 = -10 -> error 10
        assert_eq!(c.error(), 10.0);
    }
}
