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

//! Search outcome and termination reporting.
//!
//! The outcome is the single transport object handed to callers when a run
//! ends: whether a solution was found, the best cost, the best assignment,
//! the reason the loop stopped, and the run statistics. A timeout without a
//! solution is not an error — the best candidate found is still reported.

use crate::stats::SearchStatistics;
use kedge_core::num::SolverValue;
use kedge_model::solution::Solution;

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// A satisfaction problem reached zero error and stopped early.
    Satisfied,

    /// The wall-clock budget ran out. For optimization problems this is the
    /// normal way to end a run, whether or not a solution was found.
    TimeLimit,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Satisfied => write!(f, "Satisfied"),
            TerminationReason::TimeLimit => write!(f, "Time Limit Reached"),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome<T> {
    found: bool,
    cost: f64,
    solution: Solution<T>,
    termination_reason: TerminationReason,
    statistics: SearchStatistics,
}

impl<T> SolveOutcome<T>
where
    T: SolverValue,
{
    /// Bundles a finished run.
    #[inline]
    pub fn new(
        found: bool,
        cost: f64,
        solution: Solution<T>,
        termination_reason: TerminationReason,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            found,
            cost,
            solution,
            termination_reason,
            statistics,
        }
    }

    /// Returns `true` iff a configuration satisfying every constraint was
    /// found.
    #[inline]
    pub fn found(&self) -> bool {
        self.found
    }

    /// Returns the best cost: the objective cost for optimization problems
    /// (un-negated for maximization models), otherwise the best satisfaction
    /// error.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns the best assignment found.
    #[inline]
    pub fn solution(&self) -> &Solution<T> {
        &self.solution
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> TerminationReason {
        self.termination_reason
    }

    /// Returns the run statistics.
    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let outcome = SolveOutcome::new(
            true,
            0.0,
            Solution::new(0.0, vec![30_i32, 0]),
            TerminationReason::Satisfied,
            SearchStatistics::default(),
        );
        assert!(outcome.found());
        assert_eq!(outcome.cost(), 0.0);
        assert_eq!(outcome.solution().values(), &[30, 0]);
        assert_eq!(outcome.termination_reason(), TerminationReason::Satisfied);
        assert_eq!(outcome.statistics().iterations, 0);
    }

    #[test]
    fn test_termination_reason_display() {
        assert_eq!(format!("{}", TerminationReason::Satisfied), "Satisfied");
        assert_eq!(
            format!("{}", TerminationReason::TimeLimit),
            "Time Limit Reached"
        );
    }
}
