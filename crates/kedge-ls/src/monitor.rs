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

//! Observation hooks for search runs.
//!
//! A monitor receives lifecycle callbacks from the engine: run start and end,
//! every restart, every applied move, and every new best. Monitors observe
//! only — they cannot steer the search; the sole cancellation signal is the
//! engine's wall-clock budget. Hooks sit outside the hot evaluation path, so
//! an empty monitor imposes no measurable cost.

use crate::stats::SearchStatistics;
use kedge_model::index::VariableIndex;

/// Lifecycle observer of a search run.
pub trait SearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once when a run begins.
    fn on_start(&mut self, statistics: &SearchStatistics);

    /// Called on every restart, after the fresh configuration is costed.
    fn on_restart(&mut self, statistics: &SearchStatistics);

    /// Called after a move (improving or plateau walk) has been applied to
    /// the given variable.
    fn on_move_applied(&mut self, variable: VariableIndex, statistics: &SearchStatistics);

    /// Called when the global best improves. `sat_error` is the best
    /// satisfaction error; `opt_cost` is the best objective cost (infinite
    /// until a solution is found on optimization problems, zero on pure
    /// satisfaction problems).
    fn on_new_best(&mut self, sat_error: f64, opt_cost: f64, statistics: &SearchStatistics);

    /// Called once when the run ends, before the outcome is returned.
    fn on_end(&mut self, statistics: &SearchStatistics);
}

/// A monitor that observes nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopMonitor;

impl SearchMonitor for NoopMonitor {
    fn name(&self) -> &str {
        "NoopMonitor"
    }

    fn on_start(&mut self, _statistics: &SearchStatistics) {}

    fn on_restart(&mut self, _statistics: &SearchStatistics) {}

    fn on_move_applied(&mut self, _variable: VariableIndex, _statistics: &SearchStatistics) {}

    fn on_new_best(&mut self, _sat_error: f64, _opt_cost: f64, _statistics: &SearchStatistics) {}

    fn on_end(&mut self, _statistics: &SearchStatistics) {}
}
