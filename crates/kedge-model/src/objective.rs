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

//! The objective contract.
//!
//! An objective scores assignments once all constraints are satisfied. The
//! engine always minimizes: a maximization problem is modeled by returning
//! the negated natural cost, and the reported best cost is un-negated at the
//! end of a run.
//!
//! Besides the cost itself, the objective participates in tie-breaking: when
//! several candidate values (or swap partners, in permutation mode) lead to
//! the same best satisfaction delta, the engine consults
//! [`Objective::heuristic_value`] (respectively
//! [`Objective::heuristic_variable`]). The provided implementations re-score
//! each candidate by the objective cost and pick uniformly among the minima,
//! which for the [`NullObjective`] degenerates to a uniform random pick.
//!
//! Objectives follow the same cache-inside discipline as constraints: the
//! engine broadcasts every applied move through
//! [`Objective::update_variable`], and `cost` reads only mirrored state.

use crate::index::VariableIndex;
use crate::variable::Variable;
use kedge_core::num::SolverValue;
use rand::{Rng, RngCore};

/// An objective function to minimize once satisfaction is reached.
pub trait Objective<T>
where
    T: SolverValue,
{
    /// Returns the name of the objective.
    fn name(&self) -> &str;

    /// Returns the cost of the mirrored assignment. May be negative.
    fn cost(&self) -> f64;

    /// Notifies the objective that a variable changed its value.
    ///
    /// The engine broadcasts every applied move; implementations are free to
    /// ignore variables they do not track.
    fn update_variable(&mut self, variable: VariableIndex, value: T);

    /// Tie-breaks among candidate values that share the best satisfaction
    /// delta.
    ///
    /// The default re-scores each candidate by the objective cost and returns
    /// a uniform pick among those minimizing it, leaving the mirror unchanged.
    fn heuristic_value(
        &mut self,
        variable: VariableIndex,
        current: T,
        candidates: &[T],
        rng: &mut dyn RngCore,
    ) -> T {
        debug_assert!(
            !candidates.is_empty(),
            "called `Objective::heuristic_value` with an empty candidate list"
        );

        let mut best_cost = f64::INFINITY;
        let mut best: Vec<T> = Vec::new();
        for &candidate in candidates {
            self.update_variable(variable, candidate);
            let cost = self.cost();
            if cost < best_cost {
                best_cost = cost;
                best.clear();
                best.push(candidate);
            } else if cost == best_cost {
                best.push(candidate);
            }
        }
        self.update_variable(variable, current);

        best[rng.random_range(0..best.len())]
    }

    /// Tie-breaks among swap partners that share the best satisfaction delta
    /// (permutation mode).
    ///
    /// The default returns a uniform pick.
    fn heuristic_variable(
        &mut self,
        candidates: &[VariableIndex],
        rng: &mut dyn RngCore,
    ) -> VariableIndex {
        debug_assert!(
            !candidates.is_empty(),
            "called `Objective::heuristic_variable` with an empty candidate list"
        );
        candidates[rng.random_range(0..candidates.len())]
    }

    /// Hook invoked when a solution improves the best objective cost,
    /// allowing domain knowledge to clean up the recorded solution.
    ///
    /// Does nothing by default.
    fn postprocess_satisfaction(
        &mut self,
        _variables: &mut [Variable<T>],
        _best_cost: &mut f64,
        _solution: &mut [T],
    ) {
    }

    /// Hook invoked once at the end of an optimization run on the best
    /// solution found, allowing domain knowledge to improve it further.
    ///
    /// Does nothing by default.
    fn postprocess_optimization(
        &mut self,
        _variables: &mut [Variable<T>],
        _best_cost: &mut f64,
        _solution: &mut [T],
    ) {
    }
}

impl<T> std::fmt::Debug for dyn Objective<T>
where
    T: SolverValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Objective {{ name: {} }}", self.name())
    }
}

/// The objective substituted for pure satisfaction problems.
///
/// Its cost is always zero, so every tie-break degenerates to a uniform
/// random pick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NullObjective;

impl<T> Objective<T> for NullObjective
where
    T: SolverValue,
{
    fn name(&self) -> &str {
        "NullObjective"
    }

    fn cost(&self) -> f64 {
        0.0
    }

    fn update_variable(&mut self, _variable: VariableIndex, _value: T) {}
}
